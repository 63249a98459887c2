//! Concurrently-appendable, sequentially-readable chunked container.
//!
//! A [`Bucket<T>`] aggregates elements produced by many worker threads
//! without per-element synchronization: each worker accumulates its own
//! local `Vec<T>` and hands the whole chunk over with [`Bucket::donate`],
//! which is the only mutator safe to call from multiple threads at once.
//! Single-threaded callers may instead grow the bucket element-by-element
//! with [`Bucket::push_back`].
//!
//! Once any reader has observed the bucket via [`Bucket::iterate`], the
//! contract is that no further `donate`/`push_back` call follows — the
//! snapshot taken at that point is treated as final for the rest of the
//! bucket's life. This module does not enforce that at runtime; it relies
//! on the caller (the builder/squisher pipeline) to respect the phase
//! boundary, the same way the lineage's scoped-parallelism helpers rely on
//! callers respecting read/write phase separation.

mod cursor;

pub use cursor::Cursor;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// A chunked container built for write-parallel, read-sequential access.
///
/// `T` must be `Send` for `donate` to be callable from multiple threads.
pub struct Bucket<T> {
    chunks: Mutex<Vec<Vec<T>>>,
    len: AtomicUsize,
}

impl<T> Default for Bucket<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Bucket<T> {
    /// Creates an empty bucket.
    #[must_use]
    pub fn new() -> Self {
        Bucket {
            chunks: Mutex::new(Vec::new()),
            len: AtomicUsize::new(0),
        }
    }

    /// Total number of elements across all chunks.
    #[must_use]
    pub fn size(&self) -> usize {
        self.len.load(Ordering::Acquire)
    }

    /// `true` if the bucket holds no elements.
    #[must_use]
    pub fn empty(&self) -> bool {
        self.size() == 0
    }

    /// Appends a single element. Requires exclusive access, matching the
    /// single-threaded-producer case; concurrent producers should batch
    /// into a local `Vec` and call [`Bucket::donate`] instead.
    pub fn push_back(&mut self, value: T) {
        let chunks = self.chunks.get_mut().expect("bucket mutex poisoned");
        match chunks.last_mut() {
            Some(chunk) => chunk.push(value),
            None => chunks.push(vec![value]),
        }
        *self.len.get_mut() += 1;
    }

    /// Hands an entire local chunk over to the bucket. `seq` is moved out of
    /// (left empty) exactly like `std::mem::take`'s usual contract, so a
    /// worker thread can keep reusing the same local `Vec` across calls
    /// without reallocating it. A no-op for an empty `seq`.
    ///
    /// Safe to call concurrently from multiple threads: the critical
    /// section is just a single `Vec` push behind a short-held lock.
    pub fn donate(&self, seq: &mut Vec<T>) {
        if seq.is_empty() {
            return;
        }
        let chunk = std::mem::take(seq);
        let n = chunk.len();
        self.chunks.lock().expect("bucket mutex poisoned").push(chunk);
        self.len.fetch_add(n, Ordering::AcqRel);
    }

    /// Empties the bucket, dropping all stored elements.
    pub fn clear(&mut self) {
        self.chunks.get_mut().expect("bucket mutex poisoned").clear();
        *self.len.get_mut() = 0;
    }

    /// Takes a read-only snapshot of the current chunk layout for
    /// sequential iteration via [`Cursor`].
    ///
    /// The returned [`BucketView`] borrows from `self`'s current chunk
    /// contents. This borrow is obtained by extending the lifetime of the
    /// slices taken under the lock: sound under the documented contract
    /// that no further mutation happens once a reader exists, since the
    /// chunks themselves (not just the `Vec<Vec<T>>` spine) are never
    /// reallocated or moved by `donate`/`push_back` after they're pushed —
    /// only appended to, and only before any reader is observed.
    #[must_use]
    pub fn iterate(&self) -> BucketView<'_, T> {
        let guard = self.chunks.lock().expect("bucket mutex poisoned");
        let slices: Vec<&[T]> = guard
            .iter()
            .map(|chunk| {
                let ptr = chunk.as_slice() as *const [T];
                // SAFETY: see doc comment above — no mutation follows a reader
                // under the contract this container is used within.
                unsafe { &*ptr }
            })
            .collect();
        BucketView { slices }
    }
}

/// A read-only snapshot of a [`Bucket`]'s chunks, taken by [`Bucket::iterate`].
pub struct BucketView<'a, T> {
    slices: Vec<&'a [T]>,
}

impl<'a, T> BucketView<'a, T> {
    /// A cursor positioned at the first element.
    #[must_use]
    pub fn begin(&self) -> Cursor<'a, T> {
        Cursor::begin(&self.slices)
    }

    /// A cursor positioned one-past-the-last element.
    #[must_use]
    pub fn end(&self) -> Cursor<'a, T> {
        Cursor::end(&self.slices)
    }

    /// Total element count in this snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slices.iter().map(|c| c.len()).sum()
    }

    /// `true` if the snapshot has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates every element in donation/push order.
    pub fn iter(&self) -> Cursor<'a, T> {
        self.begin()
    }
}
