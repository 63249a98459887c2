use super::*;
use crate::edge::Edge;
use crate::node::NodeId;

fn e(u: usize, v: usize) -> Edge<()> {
    Edge::new(NodeId(u), NodeId(v))
}

#[test]
fn empty_edge_list_yields_empty_graph() {
    let edges: Vec<Edge<()>> = vec![];
    let g = build_csr(&edges, None, false, false).expect("build");
    assert_eq!(g.num_nodes(), 0);
    assert_eq!(g.num_edges_directed(), 0);
    assert_eq!(g.out_offsets(), &[0]);
}

#[test]
fn weighted_build_preserves_weights() {
    let edges = vec![
        Edge::weighted(NodeId(0), NodeId(1), 4.0_f64),
        Edge::weighted(NodeId(0), NodeId(2), 2.5_f64),
    ];
    let g = build_csr(&edges, None, false, false).expect("build");
    let neighs = g.out_neigh(NodeId(0));
    assert_eq!(neighs.len(), 2);
    let total_weight: f64 = neighs.iter().map(|d| d.weight).sum();
    assert_eq!(total_weight, 6.5);
}

#[test]
fn num_nodes_floor_respects_inferred_max() {
    let edges = vec![e(0, 9)];
    let g = build_csr(&edges, None, false, false).expect("build");
    assert_eq!(g.num_nodes(), 10);
}

#[test]
fn explicit_num_nodes_larger_than_inferred_is_accepted() {
    let edges = vec![e(0, 1)];
    let g = build_csr(&edges, Some(100), false, false).expect("build");
    assert_eq!(g.num_nodes(), 100);
    assert_eq!(g.out_degree(NodeId(50)), 0);
}
