use gflow_core::errors::GflowError;
use gflow_core::{EdgeKind, GraphLike, Vertex};

/// Edges touched by a local complementation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalComplementOutcome {
    /// Neighbour pairs that were connected and got disconnected.
    pub removed: Vec<(Vertex, Vertex)>,
    /// Neighbour pairs that were disconnected and got a Hadamard edge.
    pub added: Vec<(Vertex, Vertex)>,
}

impl LocalComplementOutcome {
    /// Returns whether the graph changed.
    pub fn changed(&self) -> bool {
        !self.removed.is_empty() || !self.added.is_empty()
    }
}

/// Local complementation at `u`: toggles the edge between every pair of
/// neighbours of `u`.
///
/// The neighbourhood is read once before any edit. Every removal is applied
/// before any addition, so the result does not depend on iteration order.
pub fn local_complement<G: GraphLike>(
    graph: &mut G,
    u: Vertex,
) -> Result<LocalComplementOutcome, GflowError> {
    let neighbours: Vec<Vertex> = graph.neighbors(u)?.into_iter().collect();
    let mut outcome = LocalComplementOutcome::default();
    for (idx, s) in neighbours.iter().enumerate() {
        for t in &neighbours[idx + 1..] {
            if graph.connected(*s, *t)? {
                outcome.removed.push((*s, *t));
            } else {
                outcome.added.push((*s, *t));
            }
        }
    }
    graph.remove_edges(&outcome.removed)?;
    graph.add_edges(&outcome.added, EdgeKind::Hadamard)?;
    tracing::trace!(
        vertex = u.as_raw(),
        removed = outcome.removed.len(),
        added = outcome.added.len(),
        "local complementation applied"
    );
    Ok(outcome)
}
