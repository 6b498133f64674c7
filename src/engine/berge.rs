// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Berge multiplication.
//!
//! Starting from the family `{∅}`, edges are multiplied in one at a time.
//! After edge i the working family holds exactly the minimal hitting sets of
//! edges `0..=i` (restricted to the cardinality bound), so after the last
//! edge it is the answer.
//!
//! The working family is re-minimized after every edge, which is quadratic
//! in its size. Intermediate families are not hitting sets of the whole
//! input, so a canceled run returns nothing.

use super::statistics::{Counters, Statistics};
use super::{finish, prepare, CardinalityBound, Prepared, SearchReport, TransversalEngine};
use crate::cancel::CancelToken;
use crate::error::Result;
use crate::family::{SetFamily, VertexSet};
use std::time::Instant;

/// Sequential, exhaustive engine.
#[derive(Debug, Default)]
pub struct BergeEngine {
    bound: CardinalityBound,
    cancel: CancelToken,
}

impl BergeEngine {
    pub fn new(bound: CardinalityBound) -> Self {
        Self {
            bound,
            cancel: CancelToken::new(),
        }
    }

    /// Share `cancel` instead of the engine's own token.
    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Multiply `edge` into `transversals`, or `None` if canceled.
    fn extend(
        &self,
        transversals: &SetFamily,
        edge: &VertexSet,
        stats: &Statistics,
    ) -> Option<SetFamily> {
        let mut next = SetFamily::with_vertices(transversals.num_verts());
        for partial in transversals {
            if self.cancel.is_canceled() {
                return None;
            }
            stats.increment(Counters::SearchNodes);

            if partial.intersects(edge) {
                next.push(partial.clone());
                continue;
            }
            for v in edge.iter() {
                let mut extended = partial.clone();
                extended.insert(v);
                if self.bound.admits(extended.len()) {
                    next.push(extended);
                }
            }
        }
        next.minimize();
        Some(next)
    }
}

impl TransversalEngine for BergeEngine {
    fn name(&self) -> &str {
        "Berge"
    }

    fn short_name(&self) -> &str {
        "berge"
    }

    fn description(&self) -> String {
        format!("{} ({})", self.name(), self.bound)
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

        let mut transversals = SetFamily::from_edges([VertexSet::new()]);
        for (index, edge) in family.iter().enumerate() {
            match self.extend(&transversals, edge, &stats) {
                Some(next) => transversals = next,
                None => {
                    transversals.clear();
                    break;
                }
            }
            tracing::trace!(
                edge = index,
                partial = transversals.num_edges(),
                "multiplied edge"
            );
        }

        stats.add(Counters::HittingSetsFound, transversals.num_edges() as u64);
        Ok(finish(self, transversals, stats, started))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lists(family: &SetFamily) -> Vec<Vec<usize>> {
        let mut lists = family.edges_as_lists();
        lists.sort();
        lists
    }

    #[test]
    fn test_small_family() {
        let family = SetFamily::from_lists(&[vec![1, 2, 5], vec![2, 3, 4], vec![1, 3]]);
        let result = BergeEngine::default().transversals(&family).unwrap();
        assert_eq!(
            lists(&result),
            vec![vec![1, 2], vec![1, 3], vec![1, 4], vec![2, 3], vec![3, 5]]
        );
    }

    #[test]
    fn test_bounded() {
        let family = SetFamily::from_lists(&[vec![0, 1], vec![2, 3], vec![4]]);
        let result = BergeEngine::new(CardinalityBound::new(2))
            .transversals(&family)
            .unwrap();
        assert!(result.is_empty());

        let result = BergeEngine::new(CardinalityBound::new(3))
            .transversals(&family)
            .unwrap();
        assert_eq!(result.num_edges(), 4);
    }

    #[test]
    fn test_edgeless() {
        let result = BergeEngine::default()
            .transversals(&SetFamily::new())
            .unwrap();
        assert_eq!(result.num_edges(), 1);
        assert!(result.edge(0).is_empty());
    }

    #[test]
    fn test_canceled_before_start() {
        let engine = BergeEngine::default();
        engine.cancel();
        let family = SetFamily::from_lists(&[vec![0, 1], vec![1, 2]]);
        let report = engine.run(&family).unwrap();
        assert!(report.canceled);
        assert!(report.transversals.is_empty());
    }
}
