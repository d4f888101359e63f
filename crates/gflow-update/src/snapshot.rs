use gflow_core::errors::{ErrorInfo, GflowError};
use gflow_core::{GflowState, GraphLike, SchemaVersion};
use gflow_graph::{canonical_hash, gflow_fingerprint};
use serde::{Deserialize, Serialize};

const SNAPSHOT_SCHEMA: SchemaVersion = SchemaVersion::new(1, 0, 0);

/// Copy of a gflow pinned to the graph it was valid for.
///
/// A driver captures one before a rewrite and restores it if the update fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GflowSnapshot {
    /// Schema version of the payload.
    pub schema_version: SchemaVersion,
    /// Canonical hash of the graph at capture time.
    pub graph_hash: String,
    /// Fingerprint of `gflow`, checked on restore.
    pub gflow_hash: String,
    /// Captured gflow.
    pub gflow: GflowState,
}

impl GflowSnapshot {
    /// Captures `gflow` together with the hash of `graph`.
    pub fn capture<G: GraphLike>(graph: &G, gflow: &GflowState) -> Result<Self, GflowError> {
        Ok(Self {
            schema_version: SNAPSHOT_SCHEMA,
            graph_hash: canonical_hash(graph)?,
            gflow_hash: gflow_fingerprint(gflow),
            gflow: gflow.clone(),
        })
    }

    /// Returns the captured gflow if `graph` is the graph it was captured with.
    pub fn restore<G: GraphLike>(&self, graph: &G) -> Result<GflowState, GflowError> {
        if !SNAPSHOT_SCHEMA.accepts(&self.schema_version) {
            return Err(GflowError::Serde(
                ErrorInfo::new("unsupported-schema", "snapshot schema is not supported")
                    .with_context("major", self.schema_version.major)
                    .with_context("minor", self.schema_version.minor),
            ));
        }
        if gflow_fingerprint(&self.gflow) != self.gflow_hash {
            return Err(GflowError::Serde(ErrorInfo::new(
                "snapshot-corrupt",
                "snapshot gflow does not match its fingerprint",
            )));
        }
        let graph_hash = canonical_hash(graph)?;
        if graph_hash != self.graph_hash {
            return Err(GflowError::Precondition(
                ErrorInfo::new(
                    "snapshot-graph-mismatch",
                    "snapshot was captured for a different graph",
                )
                .with_context("expected", &self.graph_hash)
                .with_context("actual", graph_hash)
                .with_hint("restore the graph before restoring its gflow"),
            ));
        }
        Ok(self.gflow.clone())
    }

    /// Serializes the snapshot to a JSON string.
    pub fn to_json(&self) -> Result<String, GflowError> {
        serde_json::to_string_pretty(self)
            .map_err(|err| GflowError::Serde(ErrorInfo::new("serialize-json", err.to_string())))
    }

    /// Restores a snapshot from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, GflowError> {
        serde_json::from_str(json)
            .map_err(|err| GflowError::Serde(ErrorInfo::new("deserialize-json", err.to_string())))
    }

    /// Serializes the snapshot using `bincode`.
    pub fn to_bytes(&self) -> Result<Vec<u8>, GflowError> {
        bincode::serialize(self)
            .map_err(|err| GflowError::Serde(ErrorInfo::new("serialize-bytes", err.to_string())))
    }

    /// Restores a snapshot from its binary representation.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, GflowError> {
        bincode::deserialize(bytes)
            .map_err(|err| GflowError::Serde(ErrorInfo::new("deserialize-bytes", err.to_string())))
    }
}
