use gflow_core::errors::GflowError;
use gflow_core::{CorrectionSet, GflowState, GraphLike, Vertex};
use gflow_graph::{canonical_hash, gen_path, local_complement};
use gflow_update::GflowUpdater;

fn v(raw: u64) -> Vertex {
    Vertex::from_raw(raw)
}

fn set(raw: &[u64]) -> CorrectionSet {
    raw.iter().copied().map(v).collect()
}

/// Path `0 - 1 - 2 - 3` where each vertex is corrected by its successor.
fn path_gflow() -> GflowState {
    GflowState::from_entries([(v(0), set(&[1])), (v(1), set(&[2])), (v(2), set(&[3]))])
}

#[test]
fn candidates_absorb_the_toggled_correction_set() {
    let graph = gen_path(4).unwrap();
    let mut gflow = path_gflow();
    let touched = GflowUpdater::default()
        .on_local_complementation(&graph, v(2), &mut gflow, true)
        .unwrap();

    assert_eq!(touched, vec![v(0)]);
    assert_eq!(gflow.get(v(2)), Some(&set(&[2, 3])));
    assert_eq!(gflow.get(v(0)), Some(&set(&[1, 3])));
    assert_eq!(gflow.get(v(1)), Some(&set(&[2])));
}

#[test]
fn without_self_toggle_u_is_added_to_candidates() {
    let graph = gen_path(4).unwrap();
    let mut gflow = path_gflow();
    GflowUpdater::default()
        .on_local_complementation(&graph, v(2), &mut gflow, false)
        .unwrap();

    assert_eq!(gflow.get(v(2)), Some(&set(&[3])));
    assert_eq!(gflow.get(v(0)), Some(&set(&[1, 2, 3])));
}

#[test]
fn touched_keys_follow_the_update_formula() {
    let graph = gen_path(4).unwrap();
    let before = path_gflow();
    let mut gflow = before.clone();
    let touched = GflowUpdater::default()
        .on_local_complementation(&graph, v(2), &mut gflow, true)
        .unwrap();

    let correction = gflow.get(v(2)).unwrap().clone();
    for key in touched {
        let expected = &(before.get(key).unwrap() ^ &correction) ^ &set(&[2]);
        assert_eq!(gflow.get(key), Some(&expected));
    }
}

#[test]
fn double_complementation_restores_graph_and_own_correction_set() {
    let mut graph = gen_path(4).unwrap();
    let graph_before = canonical_hash(&graph).unwrap();
    let before = path_gflow();
    let mut gflow = before.clone();
    let updater = GflowUpdater::default();

    let first = updater
        .on_local_complementation(&graph, v(2), &mut gflow, true)
        .unwrap();
    local_complement(&mut graph, v(2)).unwrap();
    let second = updater
        .on_local_complementation(&graph, v(2), &mut gflow, true)
        .unwrap();
    local_complement(&mut graph, v(2)).unwrap();

    assert_eq!(canonical_hash(&graph).unwrap(), graph_before);
    assert_eq!(gflow.get(v(2)), before.get(v(2)));
    // first-round candidates lose their dependence on u, so the second round
    // leaves them alone and they keep the absorbed correction set of u
    assert_eq!(first, vec![v(0)]);
    assert!(second.is_empty());
    for (key, set) in before.iter() {
        if first.contains(&key) {
            assert_eq!(gflow.get(key), Some(&(set ^ before.get(v(2)).unwrap())));
        } else {
            assert_eq!(gflow.get(key), Some(set));
        }
    }
}

#[test]
fn double_complementation_restores_gflow_without_other_candidates() {
    let mut graph = gen_path(4).unwrap();
    let before = path_gflow();
    let mut gflow = before.clone();
    let updater = GflowUpdater::default();
    for _ in 0..2 {
        let touched = updater
            .on_local_complementation(&graph, v(1), &mut gflow, true)
            .unwrap();
        assert!(touched.is_empty());
        local_complement(&mut graph, v(1)).unwrap();
    }
    assert_eq!(gflow, before);
}

#[test]
fn missing_correction_set_is_reported_before_mutation() {
    let graph = gen_path(4).unwrap();
    let mut gflow = path_gflow();
    let err = GflowUpdater::default()
        .on_local_complementation(&graph, v(3), &mut gflow, true)
        .unwrap_err();
    assert!(matches!(err, GflowError::CorrectionSetNotFound(_)));
    assert_eq!(gflow, path_gflow());
}

#[test]
fn removal_eliminates_the_complemented_vertex() {
    let graph = gen_path(4).unwrap();
    let mut gflow = path_gflow();
    let removed = GflowUpdater::default()
        .on_local_complementation_removal(&graph, v(2), &mut gflow)
        .unwrap();

    assert_eq!(removed, set(&[2, 3]));
    assert!(!gflow.contains_key(v(2)));
    assert!(!gflow.is_referenced(v(2)));
    assert_eq!(gflow.get(v(0)), Some(&set(&[1, 3])));
    assert_eq!(gflow.get(v(1)), Some(&set(&[3])));

    // the remaining vertices are still corrected in the rewritten graph
    let mut rewritten = graph.clone();
    local_complement(&mut rewritten, v(2)).unwrap();
    rewritten.remove_vertex(v(2)).unwrap();
    for (key, correction) in gflow.iter() {
        let odd = gflow_update::oracle::odd_neighbourhood(&rewritten, correction).unwrap();
        assert!(odd.contains(&key), "{key} not in odd neighbourhood");
    }
    assert_eq!(rewritten.vertices().len(), 3);
}
