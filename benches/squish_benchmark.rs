use criterion::{black_box, criterion_group, criterion_main, Criterion};
use csr_ingest::csr::build_csr;
use csr_ingest::squish::squish;
use csr_ingest::{Edge, NodeId};

fn synthetic_edges_with_duplicates(num_nodes: usize, degree: usize) -> Vec<Edge<()>> {
    let mut edges = Vec::with_capacity(num_nodes * degree * 2);
    for u in 0..num_nodes {
        for k in 0..degree {
            let v = (u + k * 5 + 1) % num_nodes;
            edges.push(Edge::new(NodeId(u), NodeId(v)));
            edges.push(Edge::new(NodeId(u), NodeId(v))); // duplicate, forces dedup work
        }
        edges.push(Edge::new(NodeId(u), NodeId(u))); // self-loop
    }
    edges
}

fn bench_squish(c: &mut Criterion) {
    let edges = synthetic_edges_with_duplicates(50_000, 16);
    let raw = build_csr(&edges, None, true, false).expect("build");

    c.bench_function("squish_50k_nodes", |b| {
        b.iter(|| black_box(squish(&raw)));
    });
}

criterion_group!(benches, bench_squish);
criterion_main!(benches);
