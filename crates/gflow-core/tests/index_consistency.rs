use std::collections::BTreeSet;

use gflow_core::{CorrectionSet, GflowState, Vertex};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Insert(u64, Vec<u64>),
    Remove(u64),
    Toggle(u64, u64),
    Xor(u64, Vec<u64>),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u64..6, prop::collection::vec(0u64..8, 0..5)).prop_map(|(k, s)| Op::Insert(k, s)),
        (0u64..6).prop_map(Op::Remove),
        (0u64..6, 0u64..8).prop_map(|(k, m)| Op::Toggle(k, m)),
        (0u64..6, prop::collection::vec(0u64..8, 0..5)).prop_map(|(k, s)| Op::Xor(k, s)),
    ]
}

fn to_set(raw: &[u64]) -> CorrectionSet {
    raw.iter().copied().map(Vertex::from_raw).collect()
}

proptest! {
    #[test]
    fn keys_containing_matches_full_scan(ops in prop::collection::vec(op(), 0..40)) {
        let mut state = GflowState::new();
        for op in ops {
            match op {
                Op::Insert(k, s) => { state.insert(Vertex::from_raw(k), to_set(&s)); }
                Op::Remove(k) => { state.remove(Vertex::from_raw(k)); }
                Op::Toggle(k, m) => { let _ = state.toggle(Vertex::from_raw(k), Vertex::from_raw(m)); }
                Op::Xor(k, s) => { let _ = state.symmetric_difference_with(Vertex::from_raw(k), &to_set(&s)); }
            }
        }
        for raw in 0u64..8 {
            let member = Vertex::from_raw(raw);
            let indexed: BTreeSet<Vertex> = state.keys_containing(member).collect();
            let scanned: BTreeSet<Vertex> = state
                .iter()
                .filter(|(_, set)| set.contains(&member))
                .map(|(key, _)| key)
                .collect();
            prop_assert_eq!(&indexed, &scanned);
            prop_assert_eq!(state.is_referenced(member), !scanned.is_empty());
        }
    }
}
