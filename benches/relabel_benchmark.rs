use criterion::{black_box, criterion_group, criterion_main, Criterion};
use csr_ingest::csr::build_csr;
use csr_ingest::relabel::relabel_by_degree;
use csr_ingest::squish::squish;
use csr_ingest::{Edge, NodeId};

fn power_law_edges(num_nodes: usize) -> Vec<Edge<()>> {
    let mut edges = Vec::with_capacity(num_nodes * 4);
    for u in 0..num_nodes {
        // a handful of hubs accumulate most of the degree, the rest stay sparse
        let degree = if u % 97 == 0 { 64 } else { 2 };
        for k in 0..degree {
            let v = (u + k * 31 + 1) % num_nodes;
            edges.push(Edge::new(NodeId(u), NodeId(v)));
        }
    }
    edges
}

fn bench_relabel(c: &mut Criterion) {
    let edges = power_law_edges(50_000);
    let raw = build_csr(&edges, None, true, false).expect("build");
    let clean = squish(&raw);

    c.bench_function("relabel_50k_nodes", |b| {
        b.iter(|| black_box(relabel_by_degree(&clean).expect("relabel")));
    });
}

criterion_group!(benches, bench_relabel);
criterion_main!(benches);
