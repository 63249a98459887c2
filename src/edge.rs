//! Edge records and edge lists.

use crate::dest::DestId;
use crate::node::NodeId;

/// A single edge `(u, v)`, where `v` carries an optional weight.
#[derive(Clone, Copy, Debug)]
pub struct Edge<W = ()> {
    /// Source vertex.
    pub u: NodeId,
    /// Destination record (target vertex, plus weight if any).
    pub v: DestId<W>,
}

impl<W> Edge<W>
where
    W: Default,
{
    /// Builds an edge with a default-valued weight (e.g. `()` for unweighted).
    #[inline]
    pub fn new(u: NodeId, v: NodeId) -> Self {
        Edge {
            u,
            v: DestId::from(v),
        }
    }
}

impl<W> Edge<W> {
    /// Builds a weighted edge.
    #[inline]
    pub const fn weighted(u: NodeId, v: NodeId, weight: W) -> Self {
        Edge {
            u,
            v: DestId::new(v, weight),
        }
    }

    /// The "source projection" of this edge: a `DestId` for `u` carrying the
    /// same weight, used when scattering into a transposed (in-neighbor)
    /// side — undirected edges carry symmetric weights across endpoints.
    #[inline]
    pub fn source_as_dest(&self) -> DestId<W>
    where
        W: Copy,
    {
        DestId::new(self.u, self.v.weight)
    }
}

/// An ordered, mutable-during-construction sequence of edges with no
/// uniqueness or ordering guarantee on input.
pub type EdgeList<W = ()> = Vec<Edge<W>>;
