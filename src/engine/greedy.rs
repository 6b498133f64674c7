// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Score-guided greedy search.
//!
//! Edges with a single vertex must be hit by that vertex, so their union is
//! set aside and added to every answer. The remaining (large) edges are
//! hit by growing candidate sets breadth-first, one vertex per level, and
//! trying the heaviest candidates of each level first.
//!
//! The search is cut short when either cap is reached:
//!
//! - the number of candidates examined reaches the candidate cap, or
//! - the candidates grow past the cardinality bound, counting the forced
//!   singleton vertices.
//!
//! Results always hit every edge. When a cap stops the search they may be
//! incomplete, and a reported set may be a superset of a hitting set that
//! was never examined.

use super::statistics::{Counters, Statistics};
use super::{finish, prepare, CardinalityBound, Prepared, SearchReport, TransversalEngine};
use crate::cancel::CancelToken;
use crate::error::Result;
use crate::family::{SetFamily, VertexSet};
use std::collections::HashSet;
use std::num::NonZeroUsize;
use std::time::Instant;

/// Sequential, possibly incomplete engine ordered by vertex weight.
#[derive(Debug, Default)]
pub struct GreedyEngine {
    bound: CardinalityBound,
    max_candidates: Option<NonZeroUsize>,
    weights: Vec<f64>,
    cancel: CancelToken,
}

impl GreedyEngine {
    pub fn new(bound: CardinalityBound, max_candidates: Option<NonZeroUsize>) -> Self {
        Self {
            bound,
            max_candidates,
            weights: Vec::new(),
            cancel: CancelToken::new(),
        }
    }

    /// Vertex weights indexed by vertex; missing entries weigh 0.
    pub fn with_weights(mut self, weights: Vec<f64>) -> Self {
        self.weights = weights;
        self
    }

    /// Share `cancel` instead of the engine's own token.
    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn weight(&self, v: usize) -> f64 {
        self.weights.get(v).copied().unwrap_or(0.0)
    }

    /// Total weight of a candidate.
    pub fn score(&self, candidate: &VertexSet) -> f64 {
        candidate.iter().map(|v| self.weight(v)).sum()
    }

    fn candidate_cap_reached(&self, examined: usize) -> bool {
        self.max_candidates.is_some_and(|max| examined >= max.get())
    }

    /// Hitting sets of `large`, before the singleton vertices are added.
    fn search(&self, large: &SetFamily, forced: usize, stats: &Statistics) -> Vec<VertexSet> {
        let mut accepted: Vec<VertexSet> = Vec::new();

        let mut seeds: Vec<usize> = large.support().iter().collect();
        seeds.sort_by(|&a, &b| self.weight(b).total_cmp(&self.weight(a)));
        let mut level: Vec<VertexSet> = seeds.into_iter().map(VertexSet::singleton).collect();

        let mut examined = 0;
        let mut cardinality = 1;
        while !level.is_empty() {
            if !self.bound.admits(cardinality + forced) {
                tracing::debug!(
                    cardinality,
                    forced,
                    max = ?self.bound.max(),
                    "cardinality cap reached"
                );
                break;
            }

            let mut scored: Vec<(f64, VertexSet)> =
                level.into_iter().map(|c| (self.score(&c), c)).collect();
            scored.sort_by(|a, b| b.0.total_cmp(&a.0));

            let mut open = Vec::new();
            let mut halted = false;
            for (_, candidate) in scored {
                if self.cancel.is_canceled() || self.candidate_cap_reached(examined) {
                    halted = true;
                    break;
                }
                examined += 1;
                stats.increment(Counters::CandidatesExamined);
                if large.is_transversed_by(&candidate) {
                    accepted.push(candidate);
                } else {
                    open.push(candidate);
                }
            }
            if halted {
                tracing::debug!(examined, "candidate search halted");
                break;
            }

            let budget = self.max_candidates.map(|max| max.get().saturating_sub(examined));
            level = self.grow(large, open, &accepted, budget);
            cardinality += 1;
        }
        accepted
    }

    /// Extend each open candidate by one vertex of an edge it misses.
    ///
    /// Extensions that contain an accepted set are dropped. The next level
    /// keeps the order of first appearance and holds at most `budget`
    /// candidates, the number still allowed to be examined.
    fn grow(
        &self,
        large: &SetFamily,
        open: Vec<VertexSet>,
        accepted: &[VertexSet],
        budget: Option<usize>,
    ) -> Vec<VertexSet> {
        let full = |next: &Vec<VertexSet>| budget.is_some_and(|max| next.len() >= max);
        let mut seen = HashSet::new();
        let mut next = Vec::new();
        for candidate in open {
            if self.cancel.is_canceled() {
                return Vec::new();
            }
            for edge in large.iter().filter(|edge| !edge.intersects(&candidate)) {
                for v in edge.iter() {
                    if full(&next) {
                        tracing::trace!(generated = next.len(), "candidate budget reached");
                        return next;
                    }
                    let mut extended = candidate.clone();
                    extended.insert(v);
                    if accepted.iter().any(|hit| hit.is_subset(&extended)) {
                        continue;
                    }
                    if seen.insert(extended.clone()) {
                        next.push(extended);
                    }
                }
            }
        }
        next
    }
}

impl TransversalEngine for GreedyEngine {
    fn name(&self) -> &str {
        "Greedy"
    }

    fn short_name(&self) -> &str {
        "greedy"
    }

    fn description(&self) -> String {
        let candidates = match self.max_candidates {
            Some(n) => format!("maximum candidates: {n}"),
            None => "no max candidate count".to_string(),
        };
        format!("{} ({}; {})", self.name(), self.bound, candidates)
    }

    fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    fn run(&self, family: &SetFamily) -> Result<SearchReport> {
        let started = Instant::now();
        let stats = Statistics::new();
        let family = match prepare(family) {
            Prepared::Trivial(result) => return Ok(finish(self, result, stats, started)),
            Prepared::Search(family) => family,
        };
        tracing::debug!(
            edges = family.num_edges(),
            verts = family.num_verts(),
            "starting {}",
            self.description()
        );

        let (singletons, large): (Vec<VertexSet>, Vec<VertexSet>) =
            family.into_iter().partition(|edge| edge.len() == 1);
        let mut forced = VertexSet::new();
        for edge in &singletons {
            forced.union_with(edge);
        }
        let large = SetFamily::from_edges(large);

        let mut hitting = if large.is_empty() {
            vec![VertexSet::new()]
        } else {
            self.search(&large, forced.len(), &stats)
        };
        if !self.bound.admits(forced.len()) {
            hitting.clear();
        }

        let transversals: SetFamily = hitting
            .into_iter()
            .map(|mut set| {
                set.union_with(&forced);
                set
            })
            .collect();
        stats.add(Counters::HittingSetsFound, transversals.num_edges() as u64);
        Ok(finish(self, transversals, stats, started))
    }
}
