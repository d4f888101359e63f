use gflow_core::Vertex;

/// Converts a [`Vertex`] into its underlying index within the vertex table.
pub(crate) fn vertex_index(id: Vertex) -> usize {
    id.as_raw() as usize
}

/// Creates a [`Vertex`] from an index.
pub(crate) fn make_vertex(index: usize) -> Vertex {
    Vertex::from_raw(index as u64)
}

/// Orders the endpoints of an undirected edge so that the smaller id comes first.
pub(crate) fn canonical_pair(a: Vertex, b: Vertex) -> (Vertex, Vertex) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
