use gflow_core::errors::GflowError;
use gflow_core::{EdgeKind, GflowState, GraphLike};
use sha2::{Digest, Sha256};

/// Computes the canonical structural hash for the provided graph.
///
/// Covers the vertex set and every edge with its kind; two graphs hash equal
/// exactly when they have the same vertices and the same typed edges.
pub fn canonical_hash<G: GraphLike>(graph: &G) -> Result<String, GflowError> {
    let mut hasher = Sha256::new();
    let vertices: Vec<_> = graph.vertices().collect();
    hasher.update((vertices.len() as u64).to_le_bytes());
    for vertex in &vertices {
        hasher.update(vertex.as_raw().to_le_bytes());
    }

    let mut edges = Vec::new();
    for vertex in &vertices {
        for neighbour in graph.neighbors(*vertex)? {
            if neighbour > *vertex {
                let kind = graph.edge_kind(*vertex, neighbour)?;
                edges.push((vertex.as_raw(), neighbour.as_raw(), kind));
            }
        }
    }
    edges.sort();
    hasher.update((edges.len() as u64).to_le_bytes());
    for (a, b, kind) in edges {
        hasher.update(a.to_le_bytes());
        hasher.update(b.to_le_bytes());
        hasher.update(match kind {
            Some(EdgeKind::Simple) => b"s",
            Some(EdgeKind::Hadamard) => b"h",
            None => b"?",
        });
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// Computes a digest of a gflow's keys and correction sets.
pub fn gflow_fingerprint(gflow: &GflowState) -> String {
    let mut hasher = Sha256::new();
    hasher.update((gflow.len() as u64).to_le_bytes());
    for (key, set) in gflow.iter() {
        hasher.update(key.as_raw().to_le_bytes());
        hasher.update((set.len() as u64).to_le_bytes());
        for member in set {
            hasher.update(member.as_raw().to_le_bytes());
        }
    }
    format!("{:x}", hasher.finalize())
}
