use std::collections::BTreeMap;

use gflow_core::errors::{ErrorInfo, GflowError};
use gflow_core::{CorrectionSet, GflowState, GraphLike, Vertex};
use serde::{Deserialize, Serialize};

use crate::config::UpdateConfig;
use crate::oracle::candidates;
use crate::scratch::ScratchGraph;

/// Reconciliation rule applied to a correction set at the end of a pivot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PivotBranch {
    /// Neither pivot vertex was in the set.
    Unchanged,
    /// The set absorbed the YZ correction set of `u`.
    AbsorbU,
    /// The set absorbed the YZ correction set of `v`.
    AbsorbV,
    /// The set absorbed both YZ correction sets.
    AbsorbBoth,
}

/// Report of a completed pivot update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PivotOutcome {
    /// Branch fired for every reconciled key.
    pub branches: BTreeMap<Vertex, PivotBranch>,
}

impl PivotOutcome {
    /// Number of keys for which `branch` fired.
    pub fn count(&self, branch: PivotBranch) -> usize {
        self.branches
            .values()
            .filter(|fired| **fired == branch)
            .count()
    }
}

/// Which side of the unfused edge carried the gflow relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnfusionCase {
    /// `ve` was in the correction set of `vs`.
    Forward,
    /// `vs` was in the correction set of `ve`.
    Backward,
}

/// Applies the reconciliation rules of a pivot on `(u, v)` to one correction set.
///
/// `gu_yz` and `gv_yz` are the correction sets of `u` and `v` after the three
/// local complementation updates. Rules are tried in order; `None` means none
/// matched, which cannot happen for a valid gflow.
pub fn reconcile_pivot_entry(
    set: &CorrectionSet,
    u: Vertex,
    v: Vertex,
    gu_yz: &CorrectionSet,
    gv_yz: &CorrectionSet,
) -> Option<(PivotBranch, CorrectionSet)> {
    let has_u = set.contains(&u);
    let has_v = set.contains(&v);
    if !has_u && !has_v {
        return Some((PivotBranch::Unchanged, set.clone()));
    }
    let with_u = set ^ gu_yz;
    if has_u && !with_u.contains(&v) {
        return Some((PivotBranch::AbsorbU, with_u));
    }
    let with_v = set ^ gv_yz;
    if has_v && !with_v.contains(&u) {
        return Some((PivotBranch::AbsorbV, with_v));
    }
    if with_u.contains(&v) && with_v.contains(&u) {
        return Some((PivotBranch::AbsorbBoth, &with_u ^ gv_yz));
    }
    None
}

/// Incremental gflow updates for local complementation, pivot and edge unfusion.
///
/// Every entry point mutates the caller's [`GflowState`] in place. On error the
/// state may be partially updated; callers wanting all-or-nothing semantics
/// keep a [`GflowSnapshot`](crate::GflowSnapshot) or a clone.
#[derive(Debug, Clone, Default)]
pub struct GflowUpdater {
    config: UpdateConfig,
}

impl GflowUpdater {
    /// Creates an updater with the provided configuration.
    pub fn new(config: UpdateConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration used by this updater.
    pub fn config(&self) -> &UpdateConfig {
        &self.config
    }

    /// Updates `gflow` for a local complementation at `u`.
    ///
    /// `graph` must be the graph *before* the complementation; the caller
    /// applies [`local_complement`](gflow_graph::local_complement) afterwards.
    /// With `toggle_self`, `u` is flipped in its own correction set first.
    /// Every candidate `k != u` then absorbs `gflow[u]` and flips `u`.
    ///
    /// Returns the keys whose correction set changed, besides `u`.
    pub fn on_local_complementation<G: GraphLike>(
        &self,
        graph: &G,
        u: Vertex,
        gflow: &mut GflowState,
        toggle_self: bool,
    ) -> Result<Vec<Vertex>, GflowError> {
        gflow.correction_set(u)?;
        let touched: Vec<Vertex> = candidates(graph, u, gflow, self.config.candidate_search)?
            .into_iter()
            .filter(|key| *key != u)
            .collect();

        if toggle_self {
            gflow.toggle(u, u)?;
        }
        let correction = gflow.correction_set(u)?.clone();
        for key in &touched {
            gflow.symmetric_difference_with(*key, &correction)?;
            gflow.toggle(*key, u)?;
        }

        tracing::debug!(
            vertex = u.as_raw(),
            toggle_self,
            touched = touched.len(),
            "gflow updated for local complementation"
        );
        Ok(touched)
    }

    /// Updates `gflow` for a pivot on the edge `(u, v)` and drops `u` and `v`.
    ///
    /// The pivot is replayed as local complementations at `u`, `v`, `u` on a
    /// scratch copy of `graph`; the caller's graph is only read. Afterwards no
    /// key or correction set refers to `u` or `v`.
    pub fn on_pivot<G: GraphLike>(
        &self,
        graph: &G,
        u: Vertex,
        v: Vertex,
        gflow: &mut GflowState,
    ) -> Result<PivotOutcome, GflowError> {
        if u == v {
            return Err(GflowError::Precondition(
                ErrorInfo::new("pivot-same-vertex", "pivot needs two distinct vertices")
                    .with_context("vertex", u.as_raw()),
            ));
        }
        gflow.correction_set(u)?;
        gflow.correction_set(v)?;
        if !graph.connected(u, v)? {
            return Err(GflowError::Precondition(
                ErrorInfo::new("pivot-not-adjacent", "pivot vertices must share an edge")
                    .with_context("u", u.as_raw())
                    .with_context("v", v.as_raw()),
            ));
        }

        let mut scratch = ScratchGraph::fork(graph);
        self.on_local_complementation(&*scratch, u, gflow, true)?;
        scratch.local_complement(u)?;
        self.on_local_complementation(&*scratch, v, gflow, true)?;
        scratch.local_complement(v)?;
        // u ends up YZ-measured and must not correct itself
        self.on_local_complementation(&*scratch, u, gflow, false)?;
        drop(scratch);

        let gu_yz = gflow.correction_set(u)?.clone();
        let gv_yz = gflow.correction_set(v)?.clone();
        let keys: Vec<Vertex> = gflow.keys().filter(|key| *key != u && *key != v).collect();
        let mut outcome = PivotOutcome::default();
        for key in keys {
            let set = gflow.correction_set(key)?;
            let Some((branch, updated)) = reconcile_pivot_entry(set, u, v, &gu_yz, &gv_yz) else {
                tracing::warn!(
                    key = key.as_raw(),
                    u = u.as_raw(),
                    v = v.as_raw(),
                    "no pivot reconciliation branch matched"
                );
                return Err(GflowError::PivotGflowMismatch(
                    ErrorInfo::new("pivot-no-branch", "no reconciliation branch matched")
                        .with_context("key", key.as_raw())
                        .with_context("u", u.as_raw())
                        .with_context("v", v.as_raw())
                        .with_hint("the gflow was not valid for the pre-pivot graph"),
                ));
            };
            if branch != PivotBranch::Unchanged {
                gflow.insert(key, updated);
            }
            outcome.branches.insert(key, branch);
        }

        eliminate(gflow, u)?;
        eliminate(gflow, v)?;

        tracing::debug!(
            u = u.as_raw(),
            v = v.as_raw(),
            absorb_u = outcome.count(PivotBranch::AbsorbU),
            absorb_v = outcome.count(PivotBranch::AbsorbV),
            absorb_both = outcome.count(PivotBranch::AbsorbBoth),
            "gflow updated for pivot"
        );
        Ok(outcome)
    }

    /// Updates `gflow` for splitting the edge `(vs, ve)` with fresh vertices
    /// `vid` and `vend`.
    ///
    /// Exactly one of `ve ∈ gflow[vs]` and `vs ∈ gflow[ve]` must hold, and
    /// neither `vid` nor `vend` may appear anywhere in `gflow`. Nothing is
    /// mutated when the call fails.
    pub fn on_edge_unfusion(
        &self,
        gflow: &mut GflowState,
        vs: Vertex,
        ve: Vertex,
        vid: Vertex,
        vend: Vertex,
    ) -> Result<UnfusionCase, GflowError> {
        if vid == vend {
            return Err(GflowError::Precondition(
                ErrorInfo::new("unfusion-vertices-equal", "inserted vertices must differ")
                    .with_context("vertex", vid.as_raw()),
            ));
        }
        for fresh in [vid, vend] {
            let in_use = gflow.contains_key(fresh) || gflow.is_referenced(fresh);
            if fresh == vs || fresh == ve || in_use {
                return Err(GflowError::Precondition(
                    ErrorInfo::new("vertex-not-fresh", "inserted vertex is already in use")
                        .with_context("vertex", fresh.as_raw()),
                ));
            }
        }

        let forward = gflow.get(vs).map(|set| set.contains(&ve));
        let backward = gflow.get(ve).map(|set| set.contains(&vs));
        let case = match (forward, backward) {
            (None, None) => {
                return Err(GflowError::CorrectionSetNotFound(
                    ErrorInfo::new(
                        "missing-correction-set",
                        "neither endpoint of the unfused edge has a correction set",
                    )
                    .with_context("vs", vs.as_raw())
                    .with_context("ve", ve.as_raw()),
                ));
            }
            (Some(true), Some(true)) => {
                tracing::warn!(
                    vs = vs.as_raw(),
                    ve = ve.as_raw(),
                    "unfused edge is related in both directions"
                );
                return Err(GflowError::UnfusionRelationMissing(
                    ErrorInfo::new(
                        "unfusion-relation-ambiguous",
                        "both endpoints correct each other",
                    )
                    .with_context("vs", vs.as_raw())
                    .with_context("ve", ve.as_raw()),
                ));
            }
            (Some(true), _) => UnfusionCase::Forward,
            (_, Some(true)) => UnfusionCase::Backward,
            _ => {
                tracing::warn!(
                    vs = vs.as_raw(),
                    ve = ve.as_raw(),
                    "unfused edge is not related in the gflow"
                );
                return Err(GflowError::UnfusionRelationMissing(
                    ErrorInfo::new(
                        "unfusion-relation-missing",
                        "neither endpoint is in the other's correction set",
                    )
                    .with_context("vs", vs.as_raw())
                    .with_context("ve", ve.as_raw()),
                ));
            }
        };

        match case {
            UnfusionCase::Forward => {
                gflow.insert(vend, CorrectionSet::from([ve]));
                gflow.insert(vid, CorrectionSet::from([vend]));
                gflow.remove_member(vs, ve)?;
                gflow.insert_member(vs, vid)?;
            }
            UnfusionCase::Backward => {
                gflow.insert(vend, CorrectionSet::from([vid]));
                gflow.insert(vid, CorrectionSet::from([vs]));
                gflow.remove_member(ve, vs)?;
                gflow.insert_member(ve, vend)?;
            }
        }
        tracing::debug!(
            vs = vs.as_raw(),
            ve = ve.as_raw(),
            vid = vid.as_raw(),
            vend = vend.as_raw(),
            ?case,
            "gflow updated for edge unfusion"
        );
        Ok(case)
    }

    /// Updates `gflow` for a local complementation at `u` followed by the
    /// deletion of `u`.
    ///
    /// Returns the correction set `u` carried when it was removed.
    pub fn on_local_complementation_removal<G: GraphLike>(
        &self,
        graph: &G,
        u: Vertex,
        gflow: &mut GflowState,
    ) -> Result<CorrectionSet, GflowError> {
        self.on_local_complementation(graph, u, gflow, true)?;
        eliminate(gflow, u)
    }
}

/// Removes `vertex` from every other correction set by absorbing its own,
/// then drops its entry.
fn eliminate(gflow: &mut GflowState, vertex: Vertex) -> Result<CorrectionSet, GflowError> {
    let correction = gflow.correction_set(vertex)?.clone();
    let holders: Vec<Vertex> = gflow
        .keys_containing(vertex)
        .filter(|key| *key != vertex)
        .collect();
    for key in holders {
        gflow.symmetric_difference_with(key, &correction)?;
    }
    gflow.remove(vertex).ok_or_else(|| {
        GflowError::CorrectionSetNotFound(
            ErrorInfo::new("missing-correction-set", "vertex has no correction set")
                .with_context("vertex", vertex.as_raw()),
        )
    })
}
