#![deny(missing_docs)]

//! Core traits and data types for incremental gflow maintenance.
//!
//! A gflow assigns every non-output vertex of an open graph a correction set.
//! The crates built on top of this one keep that assignment valid while the
//! graph is rewritten, without recomputing it from scratch.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

pub mod errors;
mod gflow;
pub mod rng;
pub mod schema;

pub use errors::{ErrorInfo, GflowError};
pub use gflow::GflowState;
pub use rng::{derive_substream_seed, RngHandle};
pub use schema::SchemaVersion;

/// Identifier for a vertex of a diagram graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Vertex(u64);

impl Vertex {
    /// Creates a new identifier from its raw integer representation.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer representation of the identifier.
    pub fn as_raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Set of vertices whose measurement corrections are tied to one vertex.
pub type CorrectionSet = BTreeSet<Vertex>;

/// Kind of an edge between two vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EdgeKind {
    /// Plain wire.
    Simple,
    /// Wire carrying a Hadamard gate.
    Hadamard,
}

/// Describes the graph collaborator consumed by the gflow updaters.
///
/// `Clone` must produce an independent deep copy: edits on the clone are never
/// visible through the original.
pub trait GraphLike: Clone {
    /// Returns an iterator over all vertex identifiers in ascending order.
    fn vertices(&self) -> Box<dyn ExactSizeIterator<Item = Vertex> + '_>;

    /// Returns whether `vertex` exists.
    fn contains_vertex(&self, vertex: Vertex) -> bool;

    /// Returns the neighbours of `vertex`.
    fn neighbors(&self, vertex: Vertex) -> Result<BTreeSet<Vertex>, GflowError>;

    /// Returns whether an edge joins `a` and `b`.
    fn connected(&self, a: Vertex, b: Vertex) -> Result<bool, GflowError>;

    /// Returns the kind of the edge joining `a` and `b`, if any.
    fn edge_kind(&self, a: Vertex, b: Vertex) -> Result<Option<EdgeKind>, GflowError>;

    /// Adds one edge of kind `kind` per pair.
    fn add_edges(&mut self, pairs: &[(Vertex, Vertex)], kind: EdgeKind) -> Result<(), GflowError>;

    /// Removes the edge joining each pair.
    fn remove_edges(&mut self, pairs: &[(Vertex, Vertex)]) -> Result<(), GflowError>;
}
