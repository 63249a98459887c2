//! Vertex relabeling by descending out-degree, for locality.
//!
//! High-degree vertices are given the smallest ids so kernels that scan
//! adjacency in id order touch the densest rows first. Only defined for
//! undirected graphs, matching the precondition the distilled system's
//! degree-sort relabeling step carries (a directed graph's in- and
//! out-degree can disagree on which ordering is "best").

use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;

use crate::csr::CsrGraph;
use crate::dest::DestId;
use crate::error::IngestError;
use crate::node::NodeId;
use crate::prefix_sum::prefix_sum;

struct RawSlicePtr<T>(*mut T);
unsafe impl<T> Send for RawSlicePtr<T> {}
unsafe impl<T> Sync for RawSlicePtr<T> {}
impl<T> RawSlicePtr<T> {
    unsafe fn write(&self, index: usize, value: T) {
        unsafe { self.0.add(index).write(value) }
    }
}

/// Returns a new graph with vertices renumbered by descending out-degree,
/// breaking ties by ascending original id (so the permutation is a
/// deterministic function of the input, not of scheduling order).
///
/// # Errors
/// Returns [`IngestError::RelabelRequiresUndirected`] if `graph.directed()`.
pub fn relabel_by_degree<W>(graph: &CsrGraph<W>) -> Result<CsrGraph<W>, IngestError>
where
    W: Copy + Send + Sync,
{
    if graph.directed() {
        return Err(IngestError::RelabelRequiresUndirected);
    }

    let n = graph.num_nodes();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_unstable_by_key(|&old| (std::cmp::Reverse(graph.out_degree(NodeId(old))), old));

    // new_of_old[old_id] = new_id
    let mut new_of_old = vec![0usize; n];
    for (new_id, &old_id) in order.iter().enumerate() {
        new_of_old[old_id] = new_id;
    }

    let new_degrees: Vec<usize> = order.iter().map(|&old| graph.out_degree(NodeId(old))).collect();
    let new_offsets = prefix_sum(&new_degrees);
    let total = *new_offsets.last().unwrap_or(&0);

    let cursors: Vec<AtomicUsize> = new_offsets[..n].iter().map(|&o| AtomicUsize::new(o)).collect();
    let mut new_neighs: Vec<DestId<W>> = Vec::with_capacity(total);
    let ptr = RawSlicePtr(new_neighs.as_mut_ptr());

    (0..n).into_par_iter().for_each(|old_u| {
        let new_u = new_of_old[old_u];
        for d in graph.out_neigh(NodeId(old_u)) {
            let new_target = new_of_old[d.target.index()];
            let pos = cursors[new_u].fetch_add(1, Ordering::AcqRel);
            // SAFETY: `new_u`'s reserved range has exactly `new_degrees[new_u]`
            // slots, matching the number of edges incident to `old_u`.
            unsafe { ptr.write(pos, DestId::new(NodeId(new_target), d.weight)) };
        }
    });

    // SAFETY: every reserved slot was written exactly once above.
    unsafe { new_neighs.set_len(total) };

    (0..n).into_par_iter().for_each(|new_u| {
        let row_ptr = unsafe { ptr.0.add(new_offsets[new_u]) };
        let len = new_offsets[new_u + 1] - new_offsets[new_u];
        // SAFETY: this range was fully initialized by the scatter above and
        // no other thread accesses it concurrently with the sort.
        let row = unsafe { std::slice::from_raw_parts_mut(row_ptr, len) };
        row.sort_unstable();
    });

    Ok(CsrGraph {
        num_nodes: n,
        directed: false,
        out_offsets: new_offsets,
        out_neighs: new_neighs,
        in_offsets: None,
        in_neighs: None,
    })
}
