//! Fatal error categories for the ingestion pipeline (see spec §7).
//!
//! The core does not attempt recovery: any of these terminates the current
//! phase and propagates to the caller. Transient categories (I/O retries,
//! partial reads) belong to the reader, not this crate.

use thiserror::Error;

/// Errors that can terminate graph construction.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Total edge (or offset) count would exceed the 64-bit offset type.
    #[error("offset overflow: {what} would require {needed} slots, which exceeds the 64-bit offset capacity")]
    Overflow {
        /// What was being computed when the overflow was detected.
        what: &'static str,
        /// The value (or a lower bound on it) that overflowed.
        needed: u64,
    },

    /// An edge referenced a vertex index that is out of bounds for the
    /// configured (or inferred) node count.
    #[error("edge endpoint {endpoint} is out of bounds for num_nodes={num_nodes}")]
    NodeOutOfBounds {
        /// The out-of-bounds endpoint.
        endpoint: usize,
        /// The node count the endpoint was checked against.
        num_nodes: usize,
    },

    /// [`crate::relabel::relabel_by_degree`] was called on a directed graph.
    ///
    /// Relabeling by degree is only defined for undirected graphs (spec §4.E
    /// precondition); this is a caller bug, not a transient condition.
    #[error("relabel_by_degree requires an undirected graph, got a directed one")]
    RelabelRequiresUndirected,

    /// Allocation of a CSR buffer failed (surfaced by the fallible allocation
    /// APIs rather than aborting the process outright).
    #[error("allocation failed while constructing {what} ({len} elements)")]
    Allocation {
        /// What buffer was being allocated.
        what: &'static str,
        /// The element count that was requested.
        len: usize,
    },
}
