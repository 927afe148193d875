use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use route_core::{
    search::{dijkstra::Dijkstra, heap_dijkstra::HeapDijkstra, ShortestPathEngine},
    util::test_graphs::generate_raster_graph,
};

criterion_group!(benches, linear_vs_heap);
criterion_main!(benches);

pub fn linear_vs_heap(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_source");

    for size in [10, 20, 40].iter() {
        let g = generate_raster_graph(*size, *size, 0.8, 187);
        let mut rng = StdRng::seed_from_u64(187);
        let ids = g.node_ids();
        let origins: Vec<&str> = (0..10).filter_map(|_| ids.choose(&mut rng).copied()).collect();

        group.bench_with_input(BenchmarkId::new("linear", size), &origins, |b, origins| {
            b.iter(|| {
                let mut dijkstra = Dijkstra::new(&g);
                for origin in origins {
                    black_box(dijkstra.shortest_paths(origin).ok());
                }
            })
        });

        group.bench_with_input(BenchmarkId::new("heap", size), &origins, |b, origins| {
            b.iter(|| {
                let mut dijkstra = HeapDijkstra::new(&g);
                for origin in origins {
                    black_box(dijkstra.shortest_paths(origin).ok());
                }
            })
        });
    }

    group.finish();
}
