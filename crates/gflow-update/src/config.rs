use gflow_core::errors::{ErrorInfo, GflowError};
use serde::{Deserialize, Serialize};

/// How the updater finds the keys whose correction set must change.
///
/// Every strategy returns the same keys; they differ only in cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CandidateSearch {
    /// Scan every key and test the parity of its overlap with `N(u)`.
    #[default]
    Parity,
    /// Walk the reverse index of each neighbour of `u` and accumulate parities.
    ReverseIndex,
    /// Compute the odd neighbourhood of every correction set and test `u`.
    OddNeighbourhood,
}

/// Configuration of a [`GflowUpdater`](crate::GflowUpdater).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UpdateConfig {
    /// Candidate search strategy used by every update.
    #[serde(default)]
    pub candidate_search: CandidateSearch,
}

impl UpdateConfig {
    /// Parses a configuration from JSON; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, GflowError> {
        serde_json::from_str(json)
            .map_err(|err| GflowError::Serde(ErrorInfo::new("deserialize-config", err.to_string())))
    }
}
