use std::collections::{BTreeMap, BTreeSet};

use gflow_core::errors::{ErrorInfo, GflowError};
use gflow_core::{EdgeKind, GraphLike, Vertex};

use crate::flags::GraphConfig;
use crate::ids::{canonical_pair, make_vertex, vertex_index};

#[derive(Debug, Clone)]
pub(crate) struct VertexRecord {
    alive: bool,
    adjacency: BTreeMap<Vertex, EdgeKind>,
}

impl VertexRecord {
    fn new() -> Self {
        Self {
            alive: true,
            adjacency: BTreeMap::new(),
        }
    }

    fn dead() -> Self {
        Self {
            alive: false,
            adjacency: BTreeMap::new(),
        }
    }
}

/// Undirected simple graph with typed edges, stored as adjacency maps.
///
/// Vertex ids are assigned sequentially and never reused; removed vertices
/// leave a dead slot behind.
#[derive(Debug, Clone)]
pub struct SimpleGraph {
    config: GraphConfig,
    vertices: Vec<VertexRecord>,
    edge_count: usize,
}

impl SimpleGraph {
    /// Creates an empty graph with the provided configuration.
    pub fn new(config: GraphConfig) -> Self {
        Self {
            config,
            vertices: Vec::new(),
            edge_count: 0,
        }
    }

    /// Creates a graph with `count` isolated vertices `0..count`.
    pub fn with_vertices(count: usize) -> Self {
        let mut graph = Self::default();
        graph.add_vertices(count);
        graph
    }

    /// Returns the configuration used by this graph.
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Adds a new isolated vertex.
    pub fn add_vertex(&mut self) -> Vertex {
        let id = make_vertex(self.vertices.len());
        self.vertices.push(VertexRecord::new());
        id
    }

    /// Adds `count` isolated vertices and returns their identifiers.
    pub fn add_vertices(&mut self, count: usize) -> Vec<Vertex> {
        (0..count).map(|_| self.add_vertex()).collect()
    }

    /// Number of alive vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.iter().filter(|record| record.alive).count()
    }

    /// Number of edges.
    pub fn num_edges(&self) -> usize {
        self.edge_count
    }

    /// Adds a single edge.
    pub fn add_edge(&mut self, a: Vertex, b: Vertex, kind: EdgeKind) -> Result<(), GflowError> {
        self.add_edges(&[(a, b)], kind)
    }

    /// Removes a single edge.
    pub fn remove_edge(&mut self, a: Vertex, b: Vertex) -> Result<(), GflowError> {
        self.remove_edges(&[(a, b)])
    }

    /// Removes `vertex` together with all incident edges.
    pub fn remove_vertex(&mut self, vertex: Vertex) -> Result<(), GflowError> {
        let neighbours: Vec<Vertex> = self.record(vertex)?.adjacency.keys().copied().collect();
        for neighbour in &neighbours {
            self.record_mut(*neighbour)?.adjacency.remove(&vertex);
        }
        self.edge_count -= neighbours.len();
        let record = self.record_mut(vertex)?;
        record.adjacency.clear();
        record.alive = false;
        Ok(())
    }

    /// Lists every edge once, endpoints ordered, in ascending order.
    pub fn edge_list(&self) -> Vec<(Vertex, Vertex, EdgeKind)> {
        let mut edges = Vec::with_capacity(self.edge_count);
        for (idx, record) in self.vertices.iter().enumerate() {
            if !record.alive {
                continue;
            }
            let source = make_vertex(idx);
            for (target, kind) in record.adjacency.range(source..) {
                if *target != source {
                    edges.push((source, *target, *kind));
                }
            }
        }
        edges
    }

    /// Returns the raw alive flags for each stored vertex slot.
    pub(crate) fn vertex_states(&self) -> Vec<bool> {
        self.vertices.iter().map(|record| record.alive).collect()
    }

    pub(crate) fn push_dead_vertex(&mut self) {
        self.vertices.push(VertexRecord::dead());
    }

    fn vertex_ids(&self) -> Vec<Vertex> {
        self.vertices
            .iter()
            .enumerate()
            .filter(|(_, record)| record.alive)
            .map(|(idx, _)| make_vertex(idx))
            .collect()
    }

    fn record(&self, id: Vertex) -> Result<&VertexRecord, GflowError> {
        self.vertices
            .get(vertex_index(id))
            .filter(|record| record.alive)
            .ok_or_else(|| unknown_vertex(id))
    }

    fn record_mut(&mut self, id: Vertex) -> Result<&mut VertexRecord, GflowError> {
        self.vertices
            .get_mut(vertex_index(id))
            .filter(|record| record.alive)
            .ok_or_else(|| unknown_vertex(id))
    }

    fn ensure_endpoints(&self, a: Vertex, b: Vertex) -> Result<(), GflowError> {
        self.record(a)?;
        self.record(b)?;
        if a == b {
            let err = graph_error("self-loop", "edges must join distinct vertices");
            return Err(err.with_context("vertex", a.as_raw()));
        }
        Ok(())
    }

    /// Validates a batch of pairs and returns the canonical pairs to touch.
    ///
    /// `present` selects whether the batch expects the edges to exist.
    fn plan_batch(
        &self,
        pairs: &[(Vertex, Vertex)],
        present: bool,
    ) -> Result<BTreeSet<(Vertex, Vertex)>, GflowError> {
        let mut planned = BTreeSet::new();
        for (a, b) in pairs {
            self.ensure_endpoints(*a, *b)?;
            let pair = canonical_pair(*a, *b);
            let exists = self.record(pair.0)?.adjacency.contains_key(&pair.1);
            let repeated = exists == present && !planned.insert(pair);
            if exists != present || repeated {
                if !self.config.strict_edges {
                    continue;
                }
                let (code, message) = if present {
                    ("missing-edge", "edge does not exist")
                } else {
                    ("duplicate-edge", "edge already exists")
                };
                let err = graph_error(code, message)
                    .with_context("a", pair.0.as_raw())
                    .with_context("b", pair.1.as_raw());
                return Err(err);
            }
        }
        Ok(planned)
    }
}

impl Default for SimpleGraph {
    fn default() -> Self {
        Self::new(GraphConfig::default())
    }
}

impl GraphLike for SimpleGraph {
    fn vertices(&self) -> Box<dyn ExactSizeIterator<Item = Vertex> + '_> {
        Box::new(self.vertex_ids().into_iter())
    }

    fn contains_vertex(&self, vertex: Vertex) -> bool {
        self.record(vertex).is_ok()
    }

    fn neighbors(&self, vertex: Vertex) -> Result<BTreeSet<Vertex>, GflowError> {
        Ok(self.record(vertex)?.adjacency.keys().copied().collect())
    }

    fn connected(&self, a: Vertex, b: Vertex) -> Result<bool, GflowError> {
        self.record(b)?;
        Ok(self.record(a)?.adjacency.contains_key(&b))
    }

    fn edge_kind(&self, a: Vertex, b: Vertex) -> Result<Option<EdgeKind>, GflowError> {
        self.record(b)?;
        Ok(self.record(a)?.adjacency.get(&b).copied())
    }

    fn add_edges(&mut self, pairs: &[(Vertex, Vertex)], kind: EdgeKind) -> Result<(), GflowError> {
        let planned = self.plan_batch(pairs, false)?;
        for (a, b) in &planned {
            self.record_mut(*a)?.adjacency.insert(*b, kind);
            self.record_mut(*b)?.adjacency.insert(*a, kind);
        }
        self.edge_count += planned.len();
        Ok(())
    }

    fn remove_edges(&mut self, pairs: &[(Vertex, Vertex)]) -> Result<(), GflowError> {
        let planned = self.plan_batch(pairs, true)?;
        for (a, b) in &planned {
            self.record_mut(*a)?.adjacency.remove(b);
            self.record_mut(*b)?.adjacency.remove(a);
        }
        self.edge_count -= planned.len();
        Ok(())
    }
}

fn graph_error(code: impl Into<String>, message: impl Into<String>) -> GflowError {
    GflowError::Graph(ErrorInfo::new(code, message))
}

fn unknown_vertex(id: Vertex) -> GflowError {
    graph_error("unknown-vertex", "vertex does not exist").with_context("vertex", id.as_raw())
}
