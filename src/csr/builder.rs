//! Builds a [`super::CsrGraph`] from an [`crate::edge::EdgeList`].
//!
//! The scatter step mirrors the pack's closest analogue graph-builder
//! crate: compute per-vertex degrees with atomic counters, exclusive-prefix-
//! sum them into offsets, then let every edge find its slot with a single
//! atomic fetch-and-increment keyed on its source vertex. Distinct edges
//! targeting the same source vertex always land on distinct, pre-reserved
//! slots, so the scatter needs no locking — only the short-lived atomic
//! counter array.

use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;

use crate::dest::DestId;
use crate::edge::Edge;
use crate::error::IngestError;
use crate::node::NodeId;
use crate::prefix_sum::{checked_degree_total, prefix_sum};

use super::CsrGraph;

/// A raw pointer wrapper asserting that concurrent writes through it target
/// disjoint indices, so it is sound to share across threads despite `*mut T`
/// not being `Sync` by default. Grounded on the same shared-mutable-pointer
/// pattern the pack's closest analogue graph-builder crate uses to scatter
/// into a preallocated target array from multiple threads.
struct RawSlicePtr<T>(*mut T);

unsafe impl<T> Send for RawSlicePtr<T> {}
unsafe impl<T> Sync for RawSlicePtr<T> {}

impl<T> RawSlicePtr<T> {
    /// Writes `value` at `index`.
    ///
    /// # Safety
    /// The caller must ensure `index < len` and that no other thread writes
    /// to the same `index` concurrently with this call.
    unsafe fn write(&self, index: usize, value: T) {
        unsafe { self.0.add(index).write(value) }
    }
}

/// Builds a CSR graph from an edge list.
///
/// - `num_nodes`: if `None`, inferred as `1 + max(endpoint)` over all edges.
///   If `Some(n)`, every edge endpoint must be `< n` or
///   [`IngestError::NodeOutOfBounds`] is returned.
/// - `undirected`: when `true`, every edge `(u, v)` contributes a record to
///   both `u`'s and `v`'s out-adjacency, and the graph reports
///   `directed() == false` with `in_neigh` aliasing `out_neigh`.
/// - `invert`: when `true` and `undirected` is `false`, also builds an
///   independent in-adjacency (transpose) side.
pub fn build_csr<W>(
    edges: &[Edge<W>],
    num_nodes: Option<usize>,
    undirected: bool,
    invert: bool,
) -> Result<CsrGraph<W>, IngestError>
where
    W: Copy + Send + Sync,
{
    let inferred = infer_num_nodes(edges);
    let num_nodes = match num_nodes {
        Some(n) => {
            if let Some(bad) = inferred.checked_sub(1).filter(|&max| max >= n) {
                return Err(IngestError::NodeOutOfBounds {
                    endpoint: bad,
                    num_nodes: n,
                });
            }
            n
        }
        None => inferred,
    };

    let out_entries = out_side_entries(edges, undirected);
    let (out_offsets, out_neighs) = build_from_entries(out_entries, num_nodes)?;

    let (in_offsets, in_neighs) = if !undirected && invert {
        let in_entries = in_side_entries(edges);
        let (o, n) = build_from_entries(in_entries, num_nodes)?;
        (Some(o), Some(n))
    } else {
        (None, None)
    };

    Ok(CsrGraph {
        num_nodes,
        directed: !undirected,
        out_offsets,
        out_neighs,
        in_offsets,
        in_neighs,
    })
}

/// `1 + max(endpoint)` over every edge, or `0` for an empty edge list.
fn infer_num_nodes<W: Send + Sync>(edges: &[Edge<W>]) -> usize {
    edges
        .par_iter()
        .map(|e| e.u.index().max(e.v.target.index()))
        .max()
        .map_or(0, |m| m + 1)
}

/// `(source_index, record)` pairs for the out-adjacency side.
fn out_side_entries<W: Copy + Send + Sync>(edges: &[Edge<W>], undirected: bool) -> Vec<(usize, DestId<W>)> {
    if undirected {
        edges
            .par_iter()
            .flat_map(|e| {
                [
                    (e.u.index(), e.v),
                    (e.v.target.index(), e.source_as_dest()),
                ]
            })
            .collect()
    } else {
        edges.par_iter().map(|e| (e.u.index(), e.v)).collect()
    }
}

/// `(target_index, record)` pairs for the transposed in-adjacency side.
fn in_side_entries<W: Copy + Send + Sync>(edges: &[Edge<W>]) -> Vec<(usize, DestId<W>)> {
    edges
        .par_iter()
        .map(|e| (e.v.target.index(), e.source_as_dest()))
        .collect()
}

/// Degree-counts, prefix-sums, and scatters `entries` into CSR offsets and
/// adjacency arrays keyed by bucket index (vertex id).
fn build_from_entries<W: Copy + Send + Sync>(
    entries: Vec<(usize, DestId<W>)>,
    num_nodes: usize,
) -> Result<(Vec<usize>, Vec<DestId<W>>), IngestError> {
    let degree_counters: Vec<AtomicUsize> = (0..num_nodes).map(|_| AtomicUsize::new(0)).collect();
    entries.par_iter().for_each(|(bucket, _)| {
        degree_counters[*bucket].fetch_add(1, Ordering::Relaxed);
    });

    let degrees: Vec<usize> = degree_counters.iter().map(|c| c.load(Ordering::Relaxed)).collect();

    // Reject a total that would exceed the 64-bit offset capacity (spec §7)
    // before computing the prefix sum, rather than after, so the scan itself
    // never has to worry about its `usize` accumulator wrapping.
    let total_u64 = checked_degree_total(&degrees)?;
    let total = usize::try_from(total_u64).map_err(|_| IngestError::Overflow {
        what: "CSR adjacency array (exceeds usize on this platform)",
        needed: total_u64,
    })?;

    let offsets = prefix_sum(&degrees);
    debug_assert_eq!(*offsets.last().unwrap_or(&0), total);

    let cursors: Vec<AtomicUsize> = offsets[..num_nodes].iter().map(|&o| AtomicUsize::new(o)).collect();

    let mut neighs: Vec<DestId<W>> = Vec::with_capacity(total);
    let ptr = RawSlicePtr(neighs.as_mut_ptr());

    entries.into_par_iter().for_each(|(bucket, record)| {
        let pos = cursors[bucket].fetch_add(1, Ordering::AcqRel);
        // SAFETY: `pos` was reserved uniquely for this entry by the
        // fetch_add above, and is always `< total` because `degrees[bucket]`
        // entries were counted for exactly this bucket in the prior pass.
        unsafe { ptr.write(pos, record) };
    });

    // SAFETY: every slot in `0..total` received exactly one write above,
    // since the per-bucket cursor range `[offsets[b], offsets[b+1])` exactly
    // matches the number of entries carrying bucket `b`.
    unsafe { neighs.set_len(total) };

    Ok((offsets, neighs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeId;

    fn e(u: usize, v: usize) -> Edge<()> {
        Edge::new(NodeId(u), NodeId(v))
    }

    #[test]
    fn directed_build_infers_node_count() {
        let edges = vec![e(0, 1), e(1, 2), e(2, 0)];
        let g = build_csr(&edges, None, false, false).expect("build");
        assert_eq!(g.num_nodes(), 3);
        assert!(g.directed());
        assert_eq!(g.out_degree(NodeId(0)), 1);
        assert_eq!(g.out_neigh(NodeId(0))[0].target, NodeId(1));
    }

    #[test]
    fn undirected_build_is_symmetric() {
        let edges = vec![e(0, 1), e(1, 2)];
        let g = build_csr(&edges, None, true, false).expect("build");
        assert!(!g.directed());
        assert_eq!(g.out_degree(NodeId(0)), 1);
        assert_eq!(g.out_degree(NodeId(1)), 2);
        assert_eq!(g.in_degree(NodeId(1)), g.out_degree(NodeId(1)));
    }

    #[test]
    fn directed_invert_builds_in_side() {
        let edges = vec![e(0, 1), e(1, 2), e(0, 2)];
        let g = build_csr(&edges, None, false, true).expect("build");
        assert_eq!(g.in_degree(NodeId(2)), 2);
        assert_eq!(g.in_degree(NodeId(0)), 0);
    }

    #[test]
    fn explicit_num_nodes_rejects_out_of_bounds_edge() {
        let edges = vec![e(0, 5)];
        let err = build_csr(&edges, Some(3), false, false).unwrap_err();
        assert!(matches!(err, IngestError::NodeOutOfBounds { .. }));
    }

    #[test]
    fn offsets_monotonic_and_total_matches() {
        let edges = vec![e(0, 1), e(0, 2), e(1, 2), e(2, 0)];
        let g = build_csr(&edges, None, false, false).expect("build");
        assert!(g.out_offsets().windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(*g.out_offsets().last().unwrap(), g.out_neighs().len());
    }
}
