//! Compressed Sparse Row graph representation.

mod builder;

pub use builder::build_csr;

use crate::dest::DestId;
use crate::node::NodeId;

/// A graph stored as Compressed Sparse Row adjacency.
///
/// For a directed graph with `invert = true`, both `out_*` and `in_*`
/// storage are populated independently. For an undirected graph, only the
/// `out_*` side is ever populated: each edge `(u, v)` contributes `v` to
/// `u`'s adjacency and `u` to `v`'s adjacency within the same array, so
/// `in_neigh(x) == out_neigh(x)` for every vertex and the `in_*` fields stay
/// `None`. This mirrors the CSR/CSC duality described for the distilled
/// system's `CSRGraph`, generalized to an explicit `Option` rather than a
/// templated direction flag.
pub struct CsrGraph<W = ()> {
    pub(crate) num_nodes: usize,
    pub(crate) directed: bool,
    pub(crate) out_offsets: Vec<usize>,
    pub(crate) out_neighs: Vec<DestId<W>>,
    pub(crate) in_offsets: Option<Vec<usize>>,
    pub(crate) in_neighs: Option<Vec<DestId<W>>>,
}

impl<W> CsrGraph<W> {
    /// Number of vertices. Valid node ids are `0..num_nodes`.
    #[must_use]
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// `true` if in- and out-adjacency are stored independently.
    #[must_use]
    pub fn directed(&self) -> bool {
        self.directed
    }

    /// Total number of directed edge records in the out-adjacency array.
    ///
    /// For an undirected graph this is `2 * num_undirected_edges` (each
    /// original edge contributes a record on both endpoints).
    #[must_use]
    pub fn num_edges_directed(&self) -> usize {
        self.out_neighs.len()
    }

    /// Out-degree of `node`.
    #[must_use]
    pub fn out_degree(&self, node: NodeId) -> usize {
        self.out_neigh(node).len()
    }

    /// Out-neighbor slice of `node`, in builder-scatter order (not
    /// necessarily sorted; see [`crate::squish`] for a canonicalized view).
    #[must_use]
    pub fn out_neigh(&self, node: NodeId) -> &[DestId<W>] {
        let i = node.index();
        &self.out_neighs[self.out_offsets[i]..self.out_offsets[i + 1]]
    }

    /// In-degree of `node`.
    #[must_use]
    pub fn in_degree(&self, node: NodeId) -> usize {
        self.in_neigh(node).len()
    }

    /// In-neighbor slice of `node`. For an undirected graph this is
    /// identical to [`CsrGraph::out_neigh`].
    #[must_use]
    pub fn in_neigh(&self, node: NodeId) -> &[DestId<W>] {
        match (&self.in_offsets, &self.in_neighs) {
            (Some(offsets), Some(neighs)) => {
                let i = node.index();
                &neighs[offsets[i]..offsets[i + 1]]
            }
            _ => self.out_neigh(node),
        }
    }

    /// Raw out-offsets array (length `num_nodes + 1`).
    #[must_use]
    pub fn out_offsets(&self) -> &[usize] {
        &self.out_offsets
    }

    /// Raw out-neighbor storage, in scatter order.
    #[must_use]
    pub fn out_neighs(&self) -> &[DestId<W>] {
        &self.out_neighs
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
