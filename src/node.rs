//! Vertex identifiers.

use std::fmt;

/// An integer identifier for a vertex, valid in the range `[0, num_nodes)`.
///
/// `usize::MAX` is reserved as the "unknown / not yet determined" sentinel
/// for a node count that has not been supplied, mirroring the `-1` sentinel
/// used by the source system (whose `NodeID` is signed).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct NodeId(pub usize);

impl NodeId {
    /// Sentinel meaning "node count not yet determined".
    pub const UNKNOWN: NodeId = NodeId(usize::MAX);

    /// The raw index this id refers to.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for NodeId {
    fn from(value: usize) -> Self {
        NodeId(value)
    }
}

impl From<NodeId> for usize {
    fn from(value: NodeId) -> Self {
        value.0
    }
}
