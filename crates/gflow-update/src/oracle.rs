//! Parity queries over neighbour sets.
//!
//! Nothing here mutates the graph or the gflow. A correction-set member the
//! graph does not contain has no neighbours, so it never flips a parity; the
//! candidate searches agree on such sets.

use std::collections::{BTreeMap, BTreeSet};

use gflow_core::errors::GflowError;
use gflow_core::{CorrectionSet, GflowState, GraphLike, Vertex};

use crate::config::CandidateSearch;

/// Odd neighbourhood of `vertex_set`: every vertex adjacent to an odd number
/// of members of the set.
///
/// Runs in `O(|vertex_set| · avg degree)`.
pub fn odd_neighbourhood<G: GraphLike>(
    graph: &G,
    vertex_set: &CorrectionSet,
) -> Result<BTreeSet<Vertex>, GflowError> {
    let mut parity: BTreeMap<Vertex, bool> = BTreeMap::new();
    for member in vertex_set {
        for neighbour in graph.neighbors(*member)? {
            *parity.entry(neighbour).or_default() ^= true;
        }
    }
    Ok(parity
        .into_iter()
        .filter_map(|(vertex, odd)| odd.then_some(vertex))
        .collect())
}

/// Keys `k` of `gflow` with `|N(u) ∩ gflow[k]|` odd, by scanning every key.
pub fn keys_with_odd_intersection<G: GraphLike>(
    graph: &G,
    u: Vertex,
    gflow: &GflowState,
) -> Result<BTreeSet<Vertex>, GflowError> {
    let neighbours = graph.neighbors(u)?;
    Ok(gflow
        .iter()
        .filter(|(_, set)| neighbours.intersection(set).count() % 2 == 1)
        .map(|(key, _)| key)
        .collect())
}

/// Same keys as [`keys_with_odd_intersection`], accumulated through the
/// gflow's reverse index. Cost depends on `N(u)` only, not on the key count.
pub fn keys_with_odd_intersection_indexed<G: GraphLike>(
    graph: &G,
    u: Vertex,
    gflow: &GflowState,
) -> Result<BTreeSet<Vertex>, GflowError> {
    let mut parity: BTreeMap<Vertex, bool> = BTreeMap::new();
    for neighbour in graph.neighbors(u)? {
        for key in gflow.keys_containing(neighbour) {
            *parity.entry(key).or_default() ^= true;
        }
    }
    Ok(parity
        .into_iter()
        .filter_map(|(key, odd)| odd.then_some(key))
        .collect())
}

/// Keys `k` with `u ∈ odd_neighbourhood(gflow[k])`.
///
/// One odd-neighbourhood pass per key; kept as the reference formulation.
pub fn keys_with_u_in_odd_neighbourhood<G: GraphLike>(
    graph: &G,
    u: Vertex,
    gflow: &GflowState,
) -> Result<BTreeSet<Vertex>, GflowError> {
    graph.neighbors(u)?;
    let mut keys = BTreeSet::new();
    for (key, set) in gflow.iter() {
        let present: CorrectionSet = set
            .iter()
            .copied()
            .filter(|member| graph.contains_vertex(*member))
            .collect();
        if odd_neighbourhood(graph, &present)?.contains(&u) {
            keys.insert(key);
        }
    }
    Ok(keys)
}

/// Dispatches to the formulation selected by `strategy`.
pub fn candidates<G: GraphLike>(
    graph: &G,
    u: Vertex,
    gflow: &GflowState,
    strategy: CandidateSearch,
) -> Result<BTreeSet<Vertex>, GflowError> {
    match strategy {
        CandidateSearch::Parity => keys_with_odd_intersection(graph, u, gflow),
        CandidateSearch::ReverseIndex => keys_with_odd_intersection_indexed(graph, u, gflow),
        CandidateSearch::OddNeighbourhood => keys_with_u_in_odd_neighbourhood(graph, u, gflow),
    }
}
