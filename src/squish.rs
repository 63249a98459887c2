//! Canonicalizes a raw [`crate::csr::CsrGraph`]'s adjacency: per-vertex
//! sort, duplicate removal, and self-loop removal.
//!
//! Grounded on `sort_and_deduplicate_targets` in the pack's closest
//! analogue graph-builder crate: sort each vertex's neighbor slice in
//! parallel, partition-dedup it, then remove an at-most-one self-loop via a
//! binary search (a sorted slice has at most one equal-to-`node` entry) and
//! a one-element rotate rather than a second pass. Degrees shrink, so the
//! whole adjacency array is rebuilt against a fresh prefix sum.

use rayon::prelude::*;

use crate::csr::CsrGraph;
use crate::dest::DestId;
use crate::node::NodeId;
use crate::prefix_sum::prefix_sum;

/// Returns a new graph whose adjacency lists are strictly ascending by
/// target, free of duplicate targets, and free of self-loops.
///
/// For an undirected graph only the (sole) out-side storage is
/// canonicalized. For a directed graph with an independent in-side, both
/// sides are canonicalized independently.
#[must_use]
pub fn squish<W>(graph: &CsrGraph<W>) -> CsrGraph<W>
where
    W: Copy + Send + Sync,
{
    let (out_offsets, out_neighs) = squish_side(graph.num_nodes, &graph.out_offsets, &graph.out_neighs);

    let (in_offsets, in_neighs) = match (&graph.in_offsets, &graph.in_neighs) {
        (Some(offsets), Some(neighs)) => {
            let (o, n) = squish_side(graph.num_nodes, offsets, neighs);
            (Some(o), Some(n))
        }
        _ => (None, None),
    };

    CsrGraph {
        num_nodes: graph.num_nodes,
        directed: graph.directed,
        out_offsets,
        out_neighs,
        in_offsets,
        in_neighs,
    }
}

fn squish_side<W>(num_nodes: usize, offsets: &[usize], neighs: &[DestId<W>]) -> (Vec<usize>, Vec<DestId<W>>)
where
    W: Copy + Send + Sync,
{
    let cleaned: Vec<Vec<DestId<W>>> = (0..num_nodes)
        .into_par_iter()
        .map(|node| {
            let mut local: Vec<DestId<W>> = neighs[offsets[node]..offsets[node + 1]].to_vec();
            local.sort_unstable();
            local.dedup();
            // A sorted, deduplicated slice has at most one entry targeting
            // `node` itself.
            if let Ok(idx) = local.binary_search_by_key(&NodeId(node), |d| d.target) {
                local.remove(idx);
            }
            local
        })
        .collect();

    let new_degrees: Vec<usize> = cleaned.iter().map(Vec::len).collect();
    let new_offsets = prefix_sum(&new_degrees);
    let total = *new_offsets.last().unwrap_or(&0);

    let mut new_neighs: Vec<DestId<W>> = Vec::with_capacity(total);
    for slice in &cleaned {
        new_neighs.extend_from_slice(slice);
    }
    debug_assert_eq!(new_neighs.len(), total);

    (new_offsets, new_neighs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csr::build_csr;
    use crate::edge::Edge;

    fn e(u: usize, v: usize) -> Edge<()> {
        Edge::new(NodeId(u), NodeId(v))
    }

    #[test]
    fn removes_duplicates_and_self_loops() {
        let edges = vec![e(0, 1), e(0, 1), e(0, 0), e(0, 2)];
        let raw = build_csr(&edges, None, false, false).expect("build");
        let clean = squish(&raw);
        let targets: Vec<usize> = clean.out_neigh(NodeId(0)).iter().map(|d| d.target.0).collect();
        assert_eq!(targets, vec![1, 2]);
    }

    #[test]
    fn preserves_nodes_with_no_edges() {
        let edges = vec![e(0, 1)];
        let raw = build_csr(&edges, Some(5), false, false).expect("build");
        let clean = squish(&raw);
        assert_eq!(clean.num_nodes(), 5);
        assert_eq!(clean.out_degree(NodeId(4)), 0);
    }

    #[test]
    fn sorted_ascending_output() {
        let edges = vec![e(0, 5), e(0, 1), e(0, 3), e(0, 1)];
        let raw = build_csr(&edges, None, false, false).expect("build");
        let clean = squish(&raw);
        let targets: Vec<usize> = clean.out_neigh(NodeId(0)).iter().map(|d| d.target.0).collect();
        assert_eq!(targets, vec![1, 3, 5]);
    }

    #[test]
    fn squish_is_idempotent() {
        let edges = vec![e(0, 1), e(0, 1), e(1, 0), e(1, 1)];
        let raw = build_csr(&edges, None, false, false).expect("build");
        let once = squish(&raw);
        let twice = squish(&once);
        assert_eq!(once.out_offsets(), twice.out_offsets());
        let a: Vec<usize> = once.out_neighs().iter().map(|d| d.target.0).collect();
        let b: Vec<usize> = twice.out_neighs().iter().map(|d| d.target.0).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn undirected_squish_keeps_in_side_aliased() {
        let edges = vec![e(0, 1)];
        let raw = build_csr(&edges, None, true, false).expect("build");
        let clean = squish(&raw);
        assert!(clean.in_offsets.is_none());
        assert_eq!(clean.in_neigh(NodeId(1)), clean.out_neigh(NodeId(1)));
    }
}
