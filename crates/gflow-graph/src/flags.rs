use gflow_core::SchemaVersion;

/// Configuration options that control the behaviour of [`SimpleGraph`](crate::SimpleGraph).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphConfig {
    /// Whether adding an existing edge or removing a missing one is an error.
    ///
    /// When disabled such requests are skipped silently.
    pub strict_edges: bool,
    /// Schema version stored alongside serialized payloads.
    pub schema_version: SchemaVersion,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            strict_edges: true,
            schema_version: SchemaVersion::new(1, 0, 0),
        }
    }
}
