use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use pathfinder_core::{
    graph::{node_index, Graph},
    registry::AlgorithmKind,
    util::test_graphs::{grid, random_graph},
};
use rand::prelude::*;

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

fn criterion_benchmark(c: &mut Criterion) {
    // 2.5 edges per node on average
    let mut graphs: Vec<(String, Graph)> = [100, 1000, 5000]
        .iter()
        .map(|&n| (format!("random_{n}"), random_graph(n, n * 5 / 2, 42)))
        .collect();
    graphs.push(("grid_30x30".to_string(), grid(30, 30)));

    let mut rng = StdRng::seed_from_u64(7);
    let mut group = c.benchmark_group("strategies");
    for (label, graph) in &graphs {
        let n = graph.nodes().count();
        let src = node_index(rng.gen_range(0..n));
        let dst = node_index(rng.gen_range(0..n));

        for &kind in AlgorithmKind::all() {
            // exhaustive on larger graphs
            if kind == AlgorithmKind::BritishMuseum && n > 1000 {
                continue;
            }
            group.bench_with_input(BenchmarkId::new(kind.help_ref(), label), graph, |b, g| {
                let mut alg = kind.create();
                b.iter(|| alg.find_route(g, src, dst, &mut ()));
            });
        }
    }
    group.finish();
}
