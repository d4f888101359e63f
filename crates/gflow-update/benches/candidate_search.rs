use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gflow_core::rng::RngHandle;
use gflow_core::{GraphLike, Vertex};
use gflow_graph::{gen_random_gflow, gen_random_graph};
use gflow_update::oracle::candidates;
use gflow_update::CandidateSearch;
use rand::seq::SliceRandom;

fn candidate_search_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("candidate_search");
    for size in [64usize, 256] {
        let mut rng = RngHandle::from_seed(11);
        let graph = gen_random_graph(size, 0.05, &mut rng).unwrap();
        let gflow = gen_random_gflow(&graph, 0.05, &mut rng).unwrap();
        let vertices: Vec<Vertex> = graph.vertices().collect();
        let targets: Vec<Vertex> = vertices
            .choose_multiple(rng.inner_mut(), 16)
            .copied()
            .collect();

        for strategy in [
            CandidateSearch::Parity,
            CandidateSearch::ReverseIndex,
            CandidateSearch::OddNeighbourhood,
        ] {
            group.bench_with_input(
                BenchmarkId::new(format!("{strategy:?}"), size),
                &strategy,
                |b, strategy| {
                    b.iter(|| {
                        for u in &targets {
                            black_box(candidates(&graph, *u, &gflow, *strategy).unwrap());
                        }
                    });
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, candidate_search_bench);
criterion_main!(benches);
