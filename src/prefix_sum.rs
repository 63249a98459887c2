//! Exclusive prefix sum over degree arrays.
//!
//! Given degrees `[d0, d1, ..., dn-1]`, produces offsets
//! `[0, d0, d0+d1, ..., sum(d0..dn-1)]` of length `n+1`, where the final
//! entry is the total sum. Two implementations are provided: a serial scan
//! for small inputs, and a blocked-parallel version (partition into
//! `rayon`-driven chunks, serially prefix-sum each chunk, then fold a
//! running base across chunk boundaries) for large ones — grounded on the
//! `prefix_sum`/`prefix_sum_atomic` pair in the pack's closest analogue
//! graph-builder crate, which partitions by `rayon::current_num_threads()`
//! chunks the same way.

use rayon::prelude::*;

use crate::error::IngestError;

/// Size threshold below which the serial scan is used regardless of caller
/// intent; the blocked-parallel path has fixed overhead that isn't worth
/// paying for small degree arrays.
const PARALLEL_THRESHOLD: usize = 1 << 16;

/// Threshold under `cfg(test)` so property tests can exercise the
/// blocked-parallel path without generating multi-gigabyte inputs.
#[cfg(test)]
const TEST_PARALLEL_THRESHOLD: usize = 256;

/// The threshold actually used to gate the blocked-parallel path: lowered
/// under `cfg(test)` so property tests exercise `prefix_sum_parallel`'s real
/// block-partitioning code instead of silently falling back to the serial
/// scan on every small generated input.
#[must_use]
#[inline]
fn parallel_threshold() -> usize {
    #[cfg(test)]
    {
        TEST_PARALLEL_THRESHOLD
    }
    #[cfg(not(test))]
    {
        PARALLEL_THRESHOLD
    }
}

/// Sums `degrees` as a `u64`, returning [`IngestError::Overflow`] if the
/// accumulation would exceed the 64-bit offset capacity spec §7 describes
/// ("total edge count exceeding offset type capacity"), rather than some
/// smaller, arbitrary bound.
///
/// Called before [`prefix_sum`]/[`prefix_sum_parallel`] by callers (the CSR
/// builder) that must reject an overflowing input instead of silently
/// wrapping or truncating; `prefix_sum` itself stays infallible and is only
/// safe to call once this check has passed.
pub fn checked_degree_total(degrees: &[usize]) -> Result<u64, IngestError> {
    degrees
        .iter()
        .try_fold(0u64, |acc, &d| acc.checked_add(d as u64))
        .ok_or(IngestError::Overflow {
            what: "sum of per-vertex degrees",
            needed: u64::MAX,
        })
}

/// Serial exclusive prefix sum. Returns a vector of length `degrees.len() + 1`.
#[must_use]
pub fn prefix_sum_serial(degrees: &[usize]) -> Vec<usize> {
    let mut offsets = Vec::with_capacity(degrees.len() + 1);
    let mut running = 0usize;
    offsets.push(0);
    for &d in degrees {
        running += d;
        offsets.push(running);
    }
    offsets
}

/// Blocked-parallel exclusive prefix sum, equivalent to [`prefix_sum_serial`]
/// but computed with `rayon` for large inputs.
///
/// Splits `degrees` into `rayon::current_num_threads()` contiguous blocks,
/// computes each block's local exclusive prefix sum and total in parallel,
/// folds a running base across block boundaries serially (cheap: one
/// addition per block), then adds each block's base to its local offsets in
/// parallel.
#[must_use]
pub fn prefix_sum_parallel(degrees: &[usize]) -> Vec<usize> {
    if degrees.len() < parallel_threshold() {
        return prefix_sum_serial(degrees);
    }

    let num_blocks = rayon::current_num_threads().max(1);
    let block_len = degrees.len().div_ceil(num_blocks);

    let blocks: Vec<&[usize]> = degrees.chunks(block_len.max(1)).collect();

    let local: Vec<(Vec<usize>, usize)> = blocks
        .par_iter()
        .map(|block| {
            let mut local_offsets = Vec::with_capacity(block.len());
            let mut running = 0usize;
            for &d in block.iter() {
                local_offsets.push(running);
                running += d;
            }
            (local_offsets, running)
        })
        .collect();

    let mut bases = Vec::with_capacity(local.len() + 1);
    let mut running_base = 0usize;
    for (_, total) in &local {
        bases.push(running_base);
        running_base += total;
    }
    bases.push(running_base);

    let mut offsets = Vec::with_capacity(degrees.len() + 1);
    let flattened: Vec<usize> = local
        .into_par_iter()
        .zip(bases.par_iter())
        .flat_map(|((local_offsets, _), &base)| {
            local_offsets.into_par_iter().map(move |o| o + base)
        })
        .collect();
    offsets.extend(flattened);
    offsets.push(running_base);
    offsets
}

/// Exclusive prefix sum, dispatching to the serial or blocked-parallel
/// implementation based on input size.
#[must_use]
pub fn prefix_sum(degrees: &[usize]) -> Vec<usize> {
    if degrees.len() < parallel_threshold() {
        prefix_sum_serial(degrees)
    } else {
        prefix_sum_parallel(degrees)
    }
}
