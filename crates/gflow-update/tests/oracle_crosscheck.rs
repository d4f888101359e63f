use std::collections::BTreeSet;

use gflow_core::rng::RngHandle;
use gflow_core::{GflowState, GraphLike, Vertex};
use gflow_graph::{gen_random_gflow, gen_random_graph, SimpleGraph};
use gflow_update::oracle::{
    keys_with_odd_intersection, keys_with_odd_intersection_indexed,
    keys_with_u_in_odd_neighbourhood, odd_neighbourhood,
};
use gflow_update::{CandidateSearch, GflowUpdater, UpdateConfig};
use proptest::prelude::*;

fn fixture(seed: u64, n: usize, p: f64, density: f64) -> (SimpleGraph, GflowState) {
    let mut rng = RngHandle::from_seed(seed);
    let graph = gen_random_graph(n, p, &mut rng).unwrap();
    let gflow = gen_random_gflow(&graph, density, &mut rng).unwrap();
    (graph, gflow)
}

fn brute_force_odd(graph: &SimpleGraph, set: &BTreeSet<Vertex>) -> BTreeSet<Vertex> {
    graph
        .vertices()
        .filter(|vertex| graph.neighbors(*vertex).unwrap().intersection(set).count() % 2 == 1)
        .collect()
}

#[test]
fn fast_and_slow_formulations_agree_on_seeded_fixtures() {
    for substream in 0..64u64 {
        let mut rng = RngHandle::substream(2024, substream);
        let n = 2 + (substream as usize % 7);
        let graph = gen_random_graph(n, 0.5, &mut rng).unwrap();
        let gflow = gen_random_gflow(&graph, 0.35, &mut rng).unwrap();
        for u in graph.vertices() {
            let fast = keys_with_odd_intersection(&graph, u, &gflow).unwrap();
            let indexed = keys_with_odd_intersection_indexed(&graph, u, &gflow).unwrap();
            let slow = keys_with_u_in_odd_neighbourhood(&graph, u, &gflow).unwrap();
            assert_eq!(fast, slow, "substream {substream}, vertex {u}");
            assert_eq!(indexed, slow, "substream {substream}, vertex {u}");
        }
    }
}

proptest! {
    #[test]
    fn candidate_formulations_agree(
        seed in any::<u64>(),
        n in 1usize..10,
        p in 0.0f64..1.0,
        density in 0.0f64..1.0,
    ) {
        let (graph, gflow) = fixture(seed, n, p, density);
        for u in graph.vertices() {
            let slow = keys_with_u_in_odd_neighbourhood(&graph, u, &gflow).unwrap();
            prop_assert_eq!(keys_with_odd_intersection(&graph, u, &gflow).unwrap(), slow.clone());
            prop_assert_eq!(keys_with_odd_intersection_indexed(&graph, u, &gflow).unwrap(), slow);
        }
    }

    #[test]
    fn odd_neighbourhood_matches_brute_force(seed in any::<u64>(), n in 1usize..10) {
        let (graph, gflow) = fixture(seed, n, 0.5, 0.4);
        for (_, set) in gflow.iter() {
            prop_assert_eq!(odd_neighbourhood(&graph, set).unwrap(), brute_force_odd(&graph, set));
        }
    }

    #[test]
    fn strategies_produce_identical_updates(seed in any::<u64>(), n in 1usize..9) {
        let (graph, gflow) = fixture(seed, n, 0.5, 0.4);
        let u = Vertex::from_raw(seed % n as u64);
        let mut results = Vec::new();
        for strategy in [
            CandidateSearch::Parity,
            CandidateSearch::ReverseIndex,
            CandidateSearch::OddNeighbourhood,
        ] {
            let updater = GflowUpdater::new(UpdateConfig { candidate_search: strategy });
            let mut state = gflow.clone();
            let touched = updater.on_local_complementation(&graph, u, &mut state, true).unwrap();
            results.push((touched, state));
        }
        prop_assert_eq!(&results[0], &results[1]);
        prop_assert_eq!(&results[0], &results[2]);
    }

    #[test]
    fn touched_keys_absorb_u_and_its_correction_set(seed in any::<u64>(), n in 1usize..9) {
        let (graph, before) = fixture(seed, n, 0.5, 0.4);
        let u = Vertex::from_raw(seed % n as u64);
        let mut after = before.clone();
        let touched = GflowUpdater::default()
            .on_local_complementation(&graph, u, &mut after, true)
            .unwrap();
        let correction = after.get(u).unwrap().clone();
        let only_u: BTreeSet<Vertex> = [u].into_iter().collect();
        for (key, set) in before.iter() {
            if key == u {
                prop_assert_eq!(after.get(key).unwrap(), &(set ^ &only_u));
            } else if touched.contains(&key) {
                prop_assert_eq!(after.get(key).unwrap(), &(&(set ^ &correction) ^ &only_u));
            } else {
                prop_assert_eq!(after.get(key).unwrap(), set);
            }
        }
    }
}
