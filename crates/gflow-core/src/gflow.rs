use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, GflowError};
use crate::{CorrectionSet, Vertex};

/// Caller-owned gflow: one correction set per correctable vertex.
///
/// Alongside the mapping the state keeps a reverse index from every vertex to
/// the keys whose correction set contains it. Correction sets can only be
/// changed through the methods below, which keep both sides in step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SerializedGflow", into = "SerializedGflow")]
pub struct GflowState {
    entries: BTreeMap<Vertex, CorrectionSet>,
    members: BTreeMap<Vertex, BTreeSet<Vertex>>,
}

impl GflowState {
    /// Creates an empty gflow.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a gflow from `(vertex, correction set)` pairs.
    ///
    /// Later pairs replace earlier ones with the same key.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Vertex, CorrectionSet)>,
    {
        let mut state = Self::new();
        for (key, set) in entries {
            state.insert(key, set);
        }
        state
    }

    /// Returns the number of vertices carrying a correction set.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether no vertex carries a correction set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns whether `key` carries a correction set.
    pub fn contains_key(&self, key: Vertex) -> bool {
        self.entries.contains_key(&key)
    }

    /// Returns the correction set of `key`, if any.
    pub fn get(&self, key: Vertex) -> Option<&CorrectionSet> {
        self.entries.get(&key)
    }

    /// Returns the correction set of `key` or a `CorrectionSetNotFound` error.
    pub fn correction_set(&self, key: Vertex) -> Result<&CorrectionSet, GflowError> {
        self.entries.get(&key).ok_or_else(|| missing(key))
    }

    /// Iterates over keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = Vertex> + '_ {
        self.entries.keys().copied()
    }

    /// Iterates over `(key, correction set)` pairs in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (Vertex, &CorrectionSet)> + '_ {
        self.entries.iter().map(|(key, set)| (*key, set))
    }

    /// Keys whose correction set contains `member`, in ascending order.
    pub fn keys_containing(&self, member: Vertex) -> impl Iterator<Item = Vertex> + '_ {
        self.members
            .get(&member)
            .into_iter()
            .flat_map(|keys| keys.iter().copied())
    }

    /// Returns whether any correction set contains `member`.
    pub fn is_referenced(&self, member: Vertex) -> bool {
        self.members
            .get(&member)
            .map(|keys| !keys.is_empty())
            .unwrap_or(false)
    }

    /// Sets the correction set of `key`, returning the previous one.
    pub fn insert(&mut self, key: Vertex, set: CorrectionSet) -> Option<CorrectionSet> {
        let previous = self.remove(key);
        for member in &set {
            self.members.entry(*member).or_default().insert(key);
        }
        self.entries.insert(key, set);
        previous
    }

    /// Removes the correction set of `key`.
    pub fn remove(&mut self, key: Vertex) -> Option<CorrectionSet> {
        let set = self.entries.remove(&key)?;
        for member in &set {
            self.unindex(*member, key);
        }
        Some(set)
    }

    /// Flips membership of `member` in the correction set of `key`.
    ///
    /// Returns whether `member` is present afterwards.
    pub fn toggle(&mut self, key: Vertex, member: Vertex) -> Result<bool, GflowError> {
        let set = self.entries.get_mut(&key).ok_or_else(|| missing(key))?;
        if set.remove(&member) {
            self.unindex(member, key);
            Ok(false)
        } else {
            set.insert(member);
            self.members.entry(member).or_default().insert(key);
            Ok(true)
        }
    }

    /// Adds `member` to the correction set of `key`. Returns whether it was new.
    pub fn insert_member(&mut self, key: Vertex, member: Vertex) -> Result<bool, GflowError> {
        let set = self.entries.get_mut(&key).ok_or_else(|| missing(key))?;
        let inserted = set.insert(member);
        if inserted {
            self.members.entry(member).or_default().insert(key);
        }
        Ok(inserted)
    }

    /// Removes `member` from the correction set of `key`. Returns whether it was present.
    pub fn remove_member(&mut self, key: Vertex, member: Vertex) -> Result<bool, GflowError> {
        let set = self.entries.get_mut(&key).ok_or_else(|| missing(key))?;
        let removed = set.remove(&member);
        if removed {
            self.unindex(member, key);
        }
        Ok(removed)
    }

    /// Replaces the correction set of `key` with its symmetric difference with `other`.
    pub fn symmetric_difference_with(
        &mut self,
        key: Vertex,
        other: &CorrectionSet,
    ) -> Result<(), GflowError> {
        if !self.entries.contains_key(&key) {
            return Err(missing(key));
        }
        for member in other {
            self.toggle(key, *member)?;
        }
        Ok(())
    }

    fn unindex(&mut self, member: Vertex, key: Vertex) {
        if let Some(keys) = self.members.get_mut(&member) {
            keys.remove(&key);
            if keys.is_empty() {
                self.members.remove(&member);
            }
        }
    }
}

impl FromIterator<(Vertex, CorrectionSet)> for GflowState {
    fn from_iter<T: IntoIterator<Item = (Vertex, CorrectionSet)>>(iter: T) -> Self {
        Self::from_entries(iter)
    }
}

fn missing(key: Vertex) -> GflowError {
    GflowError::CorrectionSetNotFound(
        ErrorInfo::new("missing-correction-set", "vertex has no correction set")
            .with_context("vertex", key.as_raw()),
    )
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SerializedGflow {
    entries: Vec<(u64, Vec<u64>)>,
}

impl From<GflowState> for SerializedGflow {
    fn from(state: GflowState) -> Self {
        let entries = state
            .entries
            .into_iter()
            .map(|(key, set)| {
                (
                    key.as_raw(),
                    set.into_iter().map(|member| member.as_raw()).collect(),
                )
            })
            .collect();
        Self { entries }
    }
}

impl From<SerializedGflow> for GflowState {
    fn from(serialized: SerializedGflow) -> Self {
        serialized
            .entries
            .into_iter()
            .map(|(key, set)| {
                (
                    Vertex::from_raw(key),
                    set.into_iter().map(Vertex::from_raw).collect(),
                )
            })
            .collect()
    }
}
