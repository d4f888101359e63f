//! Structured error types shared across gflow crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Payload carried by every [`GflowError`]: what broke and where in the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable kebab-case code, e.g. `pivot-no-branch` or `vertex-not-fresh`.
    pub code: String,
    /// One-line description of the broken gflow or graph condition.
    pub message: String,
    /// Offending vertices and edges, keyed by role (`key`, `member`, `vs`).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// How to repair the input, e.g. which vertex needs a correction set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Payload with empty context and no hint.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Records a vertex or other value under `key`; later values overwrite.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Attaches a repair hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for gflow maintenance.
///
/// The three state-consistency families (`CorrectionSetNotFound`,
/// `PivotGflowMismatch`, `UnfusionRelationMissing`) mean the gflow was not
/// valid when the update started. None of them is transient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum GflowError {
    /// A vertex that must carry a correction set has none.
    #[error("correction set not found: {0}")]
    CorrectionSetNotFound(ErrorInfo),
    /// No pivot reconciliation branch matched a correction set.
    #[error("pivot gflow mismatch: {0}")]
    PivotGflowMismatch(ErrorInfo),
    /// The edge being unfused is not (or ambiguously) related in the gflow.
    #[error("unfusion relation missing: {0}")]
    UnfusionRelationMissing(ErrorInfo),
    /// The caller violated the contract of an entry point.
    #[error("precondition violated: {0}")]
    Precondition(ErrorInfo),
    /// Graph collaborator errors.
    #[error("graph error: {0}")]
    Graph(ErrorInfo),
    /// Serialization and schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl GflowError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            GflowError::CorrectionSetNotFound(info)
            | GflowError::PivotGflowMismatch(info)
            | GflowError::UnfusionRelationMissing(info)
            | GflowError::Precondition(info)
            | GflowError::Graph(info)
            | GflowError::Serde(info) => info,
        }
    }

    /// Adds a context entry to the payload, keeping the error family.
    pub fn with_context(self, key: impl Into<String>, value: impl ToString) -> Self {
        match self {
            GflowError::CorrectionSetNotFound(info) => {
                GflowError::CorrectionSetNotFound(info.with_context(key, value))
            }
            GflowError::PivotGflowMismatch(info) => {
                GflowError::PivotGflowMismatch(info.with_context(key, value))
            }
            GflowError::UnfusionRelationMissing(info) => {
                GflowError::UnfusionRelationMissing(info.with_context(key, value))
            }
            GflowError::Precondition(info) => {
                GflowError::Precondition(info.with_context(key, value))
            }
            GflowError::Graph(info) => GflowError::Graph(info.with_context(key, value)),
            GflowError::Serde(info) => GflowError::Serde(info.with_context(key, value)),
        }
    }

    /// Returns whether the error reports an invalid gflow rather than a misuse.
    pub fn is_consistency_fault(&self) -> bool {
        matches!(
            self,
            GflowError::CorrectionSetNotFound(_)
                | GflowError::PivotGflowMismatch(_)
                | GflowError::UnfusionRelationMissing(_)
        )
    }
}
