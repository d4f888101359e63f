#![deny(missing_docs)]

//! Incremental gflow maintenance for local complementation, pivot and edge
//! unfusion rewrites.
//!
//! A driver owns the graph and a [`GflowState`](gflow_core::GflowState). For
//! each rewrite it calls the matching [`GflowUpdater`] entry point, which
//! mutates the gflow in place instead of recomputing it:
//!
//! - local complementation: [`GflowUpdater::on_local_complementation`], then
//!   [`gflow_graph::local_complement`] on the graph;
//! - pivot: [`GflowUpdater::on_pivot`], which replays the intermediate graphs
//!   on its own [`ScratchGraph`];
//! - edge unfusion: [`GflowUpdater::on_edge_unfusion`].

mod config;
pub mod oracle;
mod scratch;
mod snapshot;
mod updater;

pub use config::{CandidateSearch, UpdateConfig};
pub use scratch::ScratchGraph;
pub use snapshot::GflowSnapshot;
pub use updater::{reconcile_pivot_entry, GflowUpdater, PivotBranch, PivotOutcome, UnfusionCase};
