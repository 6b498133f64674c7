// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! RS: reverse search over the first uncovered edge.
//!
//! Every node branches on the vertices of the lowest-indexed uncovered edge
//! instead of maintaining an eligible set. Two tests keep each minimal
//! hitting set reachable along exactly one path:
//!
//! - a vertex that would make some member of S redundant is skipped, and is
//!   also excluded from every deeper node below this edge;
//! - after adding v, the branch is cut if some other member w of S has its
//!   earliest critical edge at or after the branching edge. Such a w was
//!   (or will be) reached through a different parent.

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
pub struct RsEngine {
    bound: CardinalityBound,
    threads: Option<NonZeroUsize>,
    cancel: CancelToken,
}

impl RsEngine {
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

fn search<'scope>(
    ctx: SearchContext<'scope>,
    scope: &TaskScope<'_, 'scope>,
    state: &mut SearchState,
    violating: &VertexSet,
) {
    if ctx.is_canceled() {
        return;
    }
    ctx.stats.increment(Counters::SearchNodes);

    let Some(edge) = state.uncovered().first() else {
        panic!("search node has no uncovered edge");
    };

    let mut branch = ctx.family.edge(edge).difference(violating);
    let mut next_violating = violating.clone();
    let fresh: Vec<usize> = branch
        .iter()
        .filter(|&v| state.would_violate(v, ctx.transpose))
        .collect();
    for v in fresh {
        branch.remove(v);
        next_violating.insert(v);
        ctx.stats.increment(Counters::ViolatorsSkipped);
    }

    for v in branch.iter_rev() {
        if ctx.is_canceled() {
            break;
        }
        state.add_vertex(v, ctx.transpose);
        if state.any_critical_at_or_after(edge, v) {
            ctx.stats.increment(Counters::OrderPruned);
            state.remove_vertex(v);
            continue;
        }

        let size = state.len();
        if state.is_complete() {
            if ctx.bound.admits(size) {
                ctx.record(state.hitting());
            }
        } else if ctx.bound.allows_growth(size) {
            if ctx.should_fork(scope, state) {
                ctx.stats.increment(Counters::Forks);
                let mut child = state.fork();
                let child_violating = next_violating.clone();
                scope.fork(move |scope| search(ctx, scope, &mut child, &child_violating));
            } else {
                search(ctx, scope, state, &next_violating);
            }
        }
        state.remove_vertex(v);
    }
}

impl TransversalEngine for RsEngine {
    fn name(&self) -> &str {
        "RS"
    }

    fn short_name(&self) -> &str {
        "rs"
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

        let mut root = SearchState::new(&family);
        let violating = VertexSet::new();
        scheduler.run(|scope| search(ctx, scope, &mut root, &violating));
        drop(sender);

        let transversals: SetFamily = receiver.try_iter().collect();
        Ok(finish(self, transversals, stats, started))
    }
}
