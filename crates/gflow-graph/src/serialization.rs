use gflow_core::errors::{ErrorInfo, GflowError};
use gflow_core::{EdgeKind, GraphLike, SchemaVersion, Vertex};
use serde::{Deserialize, Serialize};

use crate::flags::GraphConfig;
use crate::graph::SimpleGraph;

/// Serializes the graph to a compact binary representation using `bincode`.
pub fn graph_to_bytes(graph: &SimpleGraph) -> Result<Vec<u8>, GflowError> {
    let serializable = SerializableGraph::from_graph(graph);
    bincode::serialize(&serializable)
        .map_err(|err| GflowError::Serde(ErrorInfo::new("serialize-bytes", err.to_string())))
}

/// Restores a graph from its binary representation.
pub fn graph_from_bytes(bytes: &[u8]) -> Result<SimpleGraph, GflowError> {
    let serializable: SerializableGraph = bincode::deserialize(bytes)
        .map_err(|err| GflowError::Serde(ErrorInfo::new("deserialize-bytes", err.to_string())))?;
    serializable.into_graph()
}

/// Serializes the graph to a JSON string.
pub fn graph_to_json(graph: &SimpleGraph) -> Result<String, GflowError> {
    let serializable = SerializableGraph::from_graph(graph);
    serde_json::to_string_pretty(&serializable)
        .map_err(|err| GflowError::Serde(ErrorInfo::new("serialize-json", err.to_string())))
}

/// Restores a graph from a JSON string.
pub fn graph_from_json(json: &str) -> Result<SimpleGraph, GflowError> {
    let serializable: SerializableGraph = serde_json::from_str(json)
        .map_err(|err| GflowError::Serde(ErrorInfo::new("deserialize-json", err.to_string())))?;
    serializable.into_graph()
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializableGraph {
    strict_edges: bool,
    schema_version: SchemaVersion,
    vertices: Vec<bool>,
    edges: Vec<(u64, u64, EdgeKind)>,
}

impl SerializableGraph {
    fn from_graph(graph: &SimpleGraph) -> Self {
        Self {
            strict_edges: graph.config().strict_edges,
            schema_version: graph.config().schema_version,
            vertices: graph.vertex_states(),
            edges: graph
                .edge_list()
                .into_iter()
                .map(|(a, b, kind)| (a.as_raw(), b.as_raw(), kind))
                .collect(),
        }
    }

    fn into_graph(self) -> Result<SimpleGraph, GflowError> {
        let config = GraphConfig {
            strict_edges: self.strict_edges,
            schema_version: self.schema_version,
        };
        let supported = GraphConfig::default().schema_version;
        if !supported.accepts(&config.schema_version) {
            return Err(GflowError::Serde(
                ErrorInfo::new("unsupported-schema", "graph schema is not supported")
                    .with_context("major", config.schema_version.major)
                    .with_context("minor", config.schema_version.minor),
            ));
        }
        let mut graph = SimpleGraph::new(config);
        for alive in self.vertices {
            if alive {
                graph.add_vertex();
            } else {
                graph.push_dead_vertex();
            }
        }
        for (a, b, kind) in self.edges {
            graph.add_edges(&[(Vertex::from_raw(a), Vertex::from_raw(b))], kind)?;
        }
        Ok(graph)
    }
}
