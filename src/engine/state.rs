// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Search state shared by the MMCS and RS engines.
//!
//! A [`SearchState`] tracks a partial hitting set S together with
//!
//! - `uncov`: the edges (by index) that S does not hit, and
//! - `crit[v]` for each v in S: the edges hit by v and by no other member
//!   of S.
//!
//! S is minimal exactly when every `crit[v]` is non-empty. Vertices
//! outside S always have an empty `crit`.
//!
//! [`SearchState::add_vertex`] and [`SearchState::remove_vertex`] keep
//! both in step incrementally. Removal must mirror the most recent
//! addition; it restores the critical sets exactly from the
//! [`Trail`].

use super::config::CardinalityBound;
use super::statistics::{Counters, Statistics};
use super::trail::Trail;
use crate::cancel::CancelToken;
use crate::family::{SetFamily, VertexSet};
use crate::scheduler::TaskScope;
use crossbeam_channel::Sender;

/// Fork only when more than this many edges remain uncovered.
const MIN_UNCOVERED_TO_FORK: usize = 3;

/// Partial hitting set with its critical and uncovered edge sets.
#[derive(Debug)]
pub struct SearchState {
    hitting: VertexSet,
    crit: Vec<VertexSet>,
    uncov: VertexSet,
    added: Vec<usize>,
    trail: Trail,
}

impl SearchState {
    /// Initial state: S empty, every edge of `family` uncovered.
    pub fn new(family: &SetFamily) -> Self {
        Self {
            hitting: VertexSet::with_capacity(family.num_verts()),
            crit: vec![VertexSet::with_capacity(family.num_edges()); family.num_verts()],
            uncov: VertexSet::full(family.num_edges()),
            added: Vec::new(),
            trail: Trail::new(),
        }
    }

    /// Deep copy for a forked task.
    ///
    /// The copy shares nothing with `self` and starts a fresh trail, so it
    /// can only remove vertices it adds itself.
    pub fn fork(&self) -> Self {
        Self {
            hitting: self.hitting.clone(),
            crit: self.crit.clone(),
            uncov: self.uncov.clone(),
            added: Vec::new(),
            trail: Trail::new(),
        }
    }

    /// The partial hitting set S.
    pub fn hitting(&self) -> &VertexSet {
        &self.hitting
    }

    /// Number of vertices in S.
    pub fn len(&self) -> usize {
        self.hitting.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hitting.is_empty()
    }

    /// Edges hit by `v` and by no other member of S.
    pub fn crit(&self, v: usize) -> &VertexSet {
        &self.crit[v]
    }

    /// Edges not hit by S.
    pub fn uncovered(&self) -> &VertexSet {
        &self.uncov
    }

    /// Check whether S hits every edge.
    pub fn is_complete(&self) -> bool {
        self.uncov.is_empty()
    }

    /// Check whether adding `v` would leave some member of S with no
    /// critical edge.
    ///
    /// Member w loses all its critical edges exactly when `crit[w]` lies
    /// inside the already-covered edges that `v` hits.
    ///
    /// # Panics
    ///
    /// Panics if `v` is already in S.
    pub fn would_violate(&self, v: usize, transpose: &SetFamily) -> bool {
        assert!(
            !self.hitting.contains(v),
            "vertex {v} is already in the hitting set"
        );
        let covered_hits = transpose.edge(v).difference(&self.uncov);
        self.hitting.iter().any(|w| {
            let crit = &self.crit[w];
            debug_assert!(!crit.is_empty(), "vertex {w} has no critical edge");
            crit.is_subset(&covered_hits)
        })
    }

    /// Add `v` to S, updating `crit` and `uncov`.
    ///
    /// # Panics
    ///
    /// Panics if `v` is already in S.
    pub fn add_vertex(&mut self, v: usize, transpose: &SetFamily) {
        assert!(
            self.hitting.insert(v),
            "vertex {v} is already in the hitting set"
        );
        let hits = transpose.edge(v);
        debug_assert!(self.crit[v].is_empty());

        self.crit[v] = hits.intersection(&self.uncov);
        self.uncov.difference_with(hits);

        self.trail.checkpoint();
        for w in self.hitting.iter().filter(|&w| w != v) {
            let lost = self.crit[w].intersection(hits);
            if lost.is_empty() {
                continue;
            }
            self.crit[w].difference_with(hits);
            self.trail.record(w, lost);
        }
        self.added.push(v);
    }

    /// Undo [`add_vertex`](Self::add_vertex) for the most recently added
    /// vertex `v`.
    ///
    /// # Panics
    ///
    /// Panics if `v` is not the most recent vertex added to this state.
    pub fn remove_vertex(&mut self, v: usize) {
        assert_eq!(
            self.added.pop(),
            Some(v),
            "vertices must be removed in reverse order of addition"
        );
        self.hitting.remove(v);

        let crit_v = std::mem::take(&mut self.crit[v]);
        self.uncov.union_with(&crit_v);

        let crit = &mut self.crit;
        self.trail
            .rewind_with(|w, lost| crit[w].union_with(&lost));
    }

    /// Check whether some member of S other than `except` has its earliest
    /// critical edge at or after edge index `edge`.
    ///
    /// # Panics
    ///
    /// Panics if a member of S has no critical edge.
    pub fn any_critical_at_or_after(&self, edge: usize, except: usize) -> bool {
        self.hitting.iter().filter(|&w| w != except).any(|w| {
            let Some(first) = self.crit[w].first() else {
                panic!("vertex {w} has no critical edge");
            };
            first >= edge
        })
    }
}

/// Read-only data shared by every task of one MMCS or RS run.
#[derive(Clone, Copy)]
pub(crate) struct SearchContext<'a> {
    pub family: &'a SetFamily,
    pub transpose: &'a SetFamily,
    pub bound: CardinalityBound,
    pub cancel: &'a CancelToken,
    pub stats: &'a Statistics,
    pub results: &'a Sender<VertexSet>,
}

impl SearchContext<'_> {
    /// Report a minimal hitting set.
    pub fn record(&self, hitting: &VertexSet) {
        self.stats.increment(Counters::HittingSetsFound);
        tracing::trace!(%hitting, "minimal hitting set");
        // The receiver outlives every task of the run.
        let _ = self.results.send(hitting.clone());
    }

    pub fn is_canceled(&self) -> bool {
        self.cancel.is_canceled()
    }

    /// Decide whether to hand the next branch to another worker.
    pub fn should_fork(&self, scope: &TaskScope<'_, '_>, state: &SearchState) -> bool {
        scope.should_fork() && state.uncovered().len() >= MIN_UNCOVERED_TO_FORK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn family() -> SetFamily {
        SetFamily::from_lists(&[vec![1, 2, 5], vec![2, 3, 4], vec![1, 3]])
    }

    fn set(list: &[usize]) -> VertexSet {
        VertexSet::from(list)
    }

    /// Recompute crit and uncov from scratch and compare.
    fn check_consistent(state: &SearchState, family: &SetFamily) {
        for (e, edge) in family.iter().enumerate() {
            let hitters: Vec<usize> = edge.intersection(state.hitting()).iter().collect();
            assert_eq!(state.uncovered().contains(e), hitters.is_empty());
            for v in 0..family.num_verts() {
                let critical = hitters == [v];
                assert_eq!(state.crit(v).contains(e), critical, "edge {e} vertex {v}");
            }
        }
    }

    #[test]
    fn test_initial_state() {
        let family = family();
        let state = SearchState::new(&family);
        assert!(state.is_empty());
        assert_eq!(state.uncovered(), &set(&[0, 1, 2]));
        assert!(!state.is_complete());
    }

    #[test]
    fn test_add_and_remove_round_trip() {
        let family = family();
        let transpose = family.transpose();
        let mut state = SearchState::new(&family);

        state.add_vertex(2, &transpose);
        assert_eq!(state.crit(2), &set(&[0, 1]));
        assert_eq!(state.uncovered(), &set(&[2]));
        check_consistent(&state, &family);

        state.add_vertex(1, &transpose);
        assert_eq!(state.crit(1), &set(&[2]));
        assert_eq!(state.crit(2), &set(&[1]));
        assert!(state.is_complete());
        check_consistent(&state, &family);

        state.remove_vertex(1);
        assert_eq!(state.crit(2), &set(&[0, 1]));
        assert!(state.crit(1).is_empty());
        check_consistent(&state, &family);

        state.remove_vertex(2);
        assert_eq!(state.uncovered(), &set(&[0, 1, 2]));
        check_consistent(&state, &family);
    }

    #[test]
    fn test_would_violate() {
        let family = family();
        let transpose = family.transpose();
        let mut state = SearchState::new(&family);
        state.add_vertex(1, &transpose);
        state.add_vertex(2, &transpose);
        // crit[1] = {2}, crit[2] = {1}; vertex 3 hits edges 1 and 2.
        assert!(state.would_violate(3, &transpose));
        // vertex 4 only hits edge 1, but crit[2] = {1}
        assert!(state.would_violate(4, &transpose));
        // vertex 0 hits nothing
        assert!(!state.would_violate(0, &transpose));
    }

    #[test]
    fn test_any_critical_at_or_after() {
        let family = family();
        let transpose = family.transpose();
        let mut state = SearchState::new(&family);
        state.add_vertex(3, &transpose);
        // crit[3] = {1, 2}
        state.add_vertex(5, &transpose);
        // crit[5] = {0}
        assert!(state.any_critical_at_or_after(1, 5));
        assert!(!state.any_critical_at_or_after(2, 5));
        assert!(state.any_critical_at_or_after(0, 3));
    }

    #[test]
    fn test_fork_is_independent() {
        let family = family();
        let transpose = family.transpose();
        let mut state = SearchState::new(&family);
        state.add_vertex(2, &transpose);

        let mut child = state.fork();
        child.add_vertex(1, &transpose);
        assert!(child.is_complete());
        assert!(!state.is_complete());
        child.remove_vertex(1);
        check_consistent(&child, &family);
    }

    #[test]
    #[should_panic(expected = "already in the hitting set")]
    fn test_add_twice_panics() {
        let family = family();
        let transpose = family.transpose();
        let mut state = SearchState::new(&family);
        state.add_vertex(2, &transpose);
        state.add_vertex(2, &transpose);
    }

    #[test]
    #[should_panic(expected = "reverse order")]
    fn test_out_of_order_removal_panics() {
        let family = family();
        let transpose = family.transpose();
        let mut state = SearchState::new(&family);
        state.add_vertex(2, &transpose);
        state.add_vertex(1, &transpose);
        state.remove_vertex(2);
    }
}
