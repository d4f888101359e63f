use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gflow_core::rng::RngHandle;
use gflow_core::GraphLike;
use gflow_graph::{gen_random_graph, local_complement};

fn local_complement_bench(c: &mut Criterion) {
    let mut rng = RngHandle::from_seed(7);
    let graph = gen_random_graph(200, 0.05, &mut rng).unwrap();
    let vertices: Vec<_> = graph.vertices().collect();

    c.bench_function("local_complement_sweep_200", |b| {
        b.iter(|| {
            let mut scratch = graph.clone();
            for vertex in &vertices {
                black_box(local_complement(&mut scratch, *vertex).unwrap());
            }
        });
    });
}

criterion_group!(benches, local_complement_bench);
criterion_main!(benches);
