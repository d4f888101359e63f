#![deny(missing_docs)]

//! Typed-edge graph implementing the `gflow-core` collaborator contract, plus
//! the local complementation edit.

mod flags;
mod generators;
mod graph;
mod hash;
mod ids;
mod lcomp;
mod serialization;

pub use flags::GraphConfig;
pub use generators::{gen_cycle, gen_path, gen_random_gflow, gen_random_graph};
pub use graph::SimpleGraph;
pub use hash::{canonical_hash, gflow_fingerprint};
pub use lcomp::{local_complement, LocalComplementOutcome};

/// Re-export serialization helpers for downstream crates.
pub use serialization::{graph_from_bytes, graph_from_json, graph_to_bytes, graph_to_json};
