use gflow_core::errors::{ErrorInfo, GflowError};
use gflow_core::rng::RngHandle;
use gflow_core::{CorrectionSet, EdgeKind, GflowState, GraphLike, Vertex};
use rand::Rng;

use crate::graph::SimpleGraph;

/// Generates an Erdős–Rényi graph with Hadamard edges.
pub fn gen_random_graph(
    n_vertices: usize,
    edge_probability: f64,
    rng: &mut RngHandle,
) -> Result<SimpleGraph, GflowError> {
    ensure_probability("edge_probability", edge_probability)?;
    let mut graph = SimpleGraph::with_vertices(n_vertices);
    let vertices: Vec<Vertex> = graph.vertices().collect();
    let mut pairs = Vec::new();
    for (idx, a) in vertices.iter().enumerate() {
        for b in &vertices[idx + 1..] {
            if rng.gen_bool(edge_probability) {
                pairs.push((*a, *b));
            }
        }
    }
    graph.add_edges(&pairs, EdgeKind::Hadamard)?;
    Ok(graph)
}

/// Generates the path `0 - 1 - ... - (n-1)`.
pub fn gen_path(n_vertices: usize) -> Result<SimpleGraph, GflowError> {
    let mut graph = SimpleGraph::with_vertices(n_vertices);
    let vertices: Vec<Vertex> = graph.vertices().collect();
    let pairs: Vec<_> = vertices.windows(2).map(|w| (w[0], w[1])).collect();
    graph.add_edges(&pairs, EdgeKind::Hadamard)?;
    Ok(graph)
}

/// Generates the cycle on `n_vertices >= 3` vertices.
pub fn gen_cycle(n_vertices: usize) -> Result<SimpleGraph, GflowError> {
    if n_vertices < 3 {
        return Err(GflowError::Precondition(
            ErrorInfo::new("cycle-too-short", "a cycle needs at least three vertices")
                .with_context("n_vertices", n_vertices),
        ));
    }
    let mut graph = gen_path(n_vertices)?;
    let first = Vertex::from_raw(0);
    let last = Vertex::from_raw(n_vertices as u64 - 1);
    graph.add_edge(last, first, EdgeKind::Hadamard)?;
    Ok(graph)
}

/// Assigns every vertex of `graph` a random correction set.
///
/// Each vertex joins each correction set independently with probability
/// `density`. The result is an arbitrary mapping, not a valid gflow; it is
/// meant for exercising parity queries.
pub fn gen_random_gflow<G: GraphLike>(
    graph: &G,
    density: f64,
    rng: &mut RngHandle,
) -> Result<GflowState, GflowError> {
    ensure_probability("density", density)?;
    let vertices: Vec<Vertex> = graph.vertices().collect();
    let mut gflow = GflowState::new();
    for key in &vertices {
        let set: CorrectionSet = vertices
            .iter()
            .copied()
            .filter(|_| rng.gen_bool(density))
            .collect();
        gflow.insert(*key, set);
    }
    Ok(gflow)
}

fn ensure_probability(name: &str, value: f64) -> Result<(), GflowError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(GflowError::Precondition(
            ErrorInfo::new("invalid-probability", "probability must lie in [0, 1]")
                .with_context(name, value),
        ));
    }
    Ok(())
}
