use std::ops::Deref;

use gflow_core::errors::GflowError;
use gflow_core::{GraphLike, Vertex};
use gflow_graph::{local_complement, LocalComplementOutcome};

/// Private copy of a caller graph used to replay intermediate topologies.
///
/// The copy is taken by [`ScratchGraph::fork`] and dropped with the value;
/// edits never reach the graph it was forked from. Only read access and local
/// complementation are exposed.
#[derive(Debug)]
pub struct ScratchGraph<G: GraphLike> {
    graph: G,
}

impl<G: GraphLike> ScratchGraph<G> {
    /// Takes an independent copy of `source`.
    pub fn fork(source: &G) -> Self {
        Self {
            graph: source.clone(),
        }
    }

    /// Applies a local complementation at `u` to the copy.
    pub fn local_complement(&mut self, u: Vertex) -> Result<LocalComplementOutcome, GflowError> {
        local_complement(&mut self.graph, u)
    }
}

impl<G: GraphLike> Deref for ScratchGraph<G> {
    type Target = G;

    fn deref(&self) -> &G {
        &self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gflow_graph::{canonical_hash, gen_path};

    #[test]
    fn edits_stay_on_the_copy() {
        let graph = gen_path(3).unwrap();
        let before = canonical_hash(&graph).unwrap();
        let mut scratch = ScratchGraph::fork(&graph);
        let outcome = scratch.local_complement(Vertex::from_raw(1)).unwrap();
        assert!(outcome.changed());
        assert!(scratch
            .connected(Vertex::from_raw(0), Vertex::from_raw(2))
            .unwrap());
        assert_eq!(canonical_hash(&graph).unwrap(), before);
    }
}
