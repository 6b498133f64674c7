// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! MMCS: minimal-candidate-set search.
//!
//! Each node holds a partial hitting set S (with its critical and uncovered
//! edges) and CAND, the vertices still eligible to join S. A node picks the
//! uncovered edge with the fewest eligible vertices, takes those vertices C
//! out of CAND, and branches on each of them in descending order. A vertex
//! that would make some member of S redundant is skipped for this node and
//! put back into CAND afterwards, so that siblings still see it.
//!
//! Branches are either run in place (mutate, recurse, restore) or handed to
//! the [`Scheduler`] as a deep copy of the node. Both paths enumerate the
//! same sets.

use super::state::{SearchContext, SearchState};
use super::statistics::{Counters, Statistics};
use super::{finish, prepare, CardinalityBound, Prepared, SearchReport, TransversalEngine};
use crate::cancel::CancelToken;
use crate::error::Result;
use crate::family::{SetFamily, VertexSet};
use crate::scheduler::{Scheduler, TaskScope};
use std::num::NonZeroUsize;
use std::time::Instant;

/// Parallel, exhaustive engine.
#[derive(Debug, Default)]
pub struct MmcsEngine {
    bound: CardinalityBound,
    threads: Option<NonZeroUsize>,
    cancel: CancelToken,
}

impl MmcsEngine {
    pub fn new(bound: CardinalityBound, threads: Option<NonZeroUsize>) -> Self {
        Self {
            bound,
            threads,
            cancel: CancelToken::new(),
        }
    }

    /// Share `cancel` instead of the engine's own token.
    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }
}

/// One node's private search data.
struct Node {
    state: SearchState,
    cand: VertexSet,
}

impl Node {
    fn fork(&self) -> Node {
        Node {
            state: self.state.fork(),
            cand: self.cand.clone(),
        }
    }
}

/// Uncovered edge with the fewest eligible vertices, and those vertices.
fn branching_set(ctx: &SearchContext<'_>, node: &Node) -> Option<(usize, VertexSet)> {
    let mut best: Option<(usize, VertexSet)> = None;
    for e in node.state.uncovered().iter() {
        let eligible = ctx.family.edge(e).intersection(&node.cand);
        if best.as_ref().map_or(true, |(_, c)| eligible.len() < c.len()) {
            best = Some((e, eligible));
        }
    }
    best
}

fn search<'scope>(ctx: SearchContext<'scope>, scope: &TaskScope<'_, 'scope>, node: &mut Node) {
    if ctx.is_canceled() {
        return;
    }
    assert!(
        !node.state.is_complete(),
        "search node has no uncovered edge"
    );
    ctx.stats.increment(Counters::SearchNodes);

    let Some((_, branch)) = branching_set(&ctx, node) else {
        return;
    };
    node.cand.difference_with(&branch);

    let mut violators = VertexSet::new();
    for v in branch.iter_rev() {
        if ctx.is_canceled() {
            break;
        }
        if node.state.would_violate(v, ctx.transpose) {
            violators.insert(v);
            ctx.stats.increment(Counters::ViolatorsSkipped);
            continue;
        }

        node.state.add_vertex(v, ctx.transpose);
        let size = node.state.len();
        if node.state.is_complete() {
            if ctx.bound.admits(size) {
                ctx.record(node.state.hitting());
            }
        } else if !node.cand.is_empty() && ctx.bound.allows_growth(size) {
            if ctx.should_fork(scope, &node.state) {
                ctx.stats.increment(Counters::Forks);
                let mut child = node.fork();
                scope.fork(move |scope| search(ctx, scope, &mut child));
            } else {
                search(ctx, scope, node);
            }
        }
        node.state.remove_vertex(v);
        node.cand.insert(v);
    }

    node.cand.union_with(&violators);
}

impl TransversalEngine for MmcsEngine {
    fn name(&self) -> &str {
        "MMCS"
    }

    fn short_name(&self) -> &str {
        "mmcs"
    }

    fn description(&self) -> String {
        let threads = match self.threads {
            Some(n) => format!("threads: {n}"),
            None => "all cores".to_string(),
        };
        format!("{} ({}; {})", self.name(), self.bound, threads)
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

        let transpose = family.transpose();
        let scheduler = Scheduler::new(self.threads)?;
        let (sender, receiver) = crossbeam_channel::unbounded();
        let ctx = SearchContext {
            family: &family,
            transpose: &transpose,
            bound: self.bound,
            cancel: &self.cancel,
            stats: &stats,
            results: &sender,
        };

        let mut root = Node {
            state: SearchState::new(&family),
            cand: VertexSet::full(family.num_verts()),
        };
        scheduler.run(|scope| search(ctx, scope, &mut root));
        drop(sender);

        let transversals: SetFamily = receiver.try_iter().collect();
        Ok(finish(self, transversals, stats, started))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(family: &SetFamily) -> Vec<Vec<usize>> {
        let mut lists = family.edges_as_lists();
        lists.sort();
        lists
    }

    fn engine(max: usize, threads: usize) -> MmcsEngine {
        MmcsEngine::new(CardinalityBound::new(max), NonZeroUsize::new(threads))
    }

    #[test]
    fn test_small_family() {
        let family = SetFamily::from_lists(&[vec![1, 2, 5], vec![2, 3, 4], vec![1, 3]]);
        let result = engine(0, 2).transversals(&family).unwrap();
        assert_eq!(
            sorted(&result),
            vec![vec![1, 2], vec![1, 3], vec![1, 4], vec![2, 3], vec![3, 5]]
        );
    }

    #[test]
    fn test_bound_filters_results() {
        // minimal vertex covers of a path on five vertices
        let family = SetFamily::from_lists(&[vec![0, 1], vec![1, 2], vec![2, 3], vec![3, 4]]);
        let all = engine(0, 1).transversals(&family).unwrap();
        assert_eq!(
            sorted(&all),
            vec![vec![0, 2, 3], vec![0, 2, 4], vec![1, 2, 4], vec![1, 3]]
        );

        let bounded = engine(2, 1).transversals(&family).unwrap();
        assert_eq!(sorted(&bounded), vec![vec![1, 3]]);
    }

    #[test]
    fn test_single_edge() {
        let family = SetFamily::from_lists(&[vec![4, 7, 9]]);
        let result = engine(0, 0).transversals(&family).unwrap();
        assert_eq!(sorted(&result), vec![vec![4], vec![7], vec![9]]);
    }

    #[test]
    fn test_empty_edge_has_no_transversal() {
        let family = SetFamily::from_lists(&[vec![1], vec![]]);
        assert!(engine(0, 1).transversals(&family).unwrap().is_empty());
    }

    #[test]
    fn test_description() {
        assert_eq!(engine(3, 2).description(), "MMCS (max CI size: 3; threads: 2)");
        assert_eq!(engine(0, 0).description(), "MMCS (no max CI size; all cores)");
    }
}
