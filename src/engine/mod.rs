// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Minimal hitting set (transversal) engines.
//!
//! Four interchangeable strategies implement [`TransversalEngine`]:
//!
//! | engine | threads | complete | notes |
//! |--------|---------|----------|-------|
//! | [`BergeEngine`] | 1 | yes | multiplies in one edge at a time |
//! | [`MmcsEngine`] | pool | yes | branches on the smallest eligible uncovered edge |
//! | [`RsEngine`] | pool | yes | branches on the first uncovered edge, ordered pruning |
//! | [`GreedyEngine`] | 1 | no | highest-weight candidates first, with caps |
//!
//! Every engine minimizes a private copy of its input before searching, so
//! callers may pass any family. Two degenerate inputs are answered without
//! searching: a family with no edges has exactly one minimal hitting set,
//! the empty set; a family containing an empty edge has none.
//!
//! # Example
//!
//! ```
//! use mhs_search::engine::{EngineConfig, EngineKind};
//! use mhs_search::family::SetFamily;
//!
//! let family = SetFamily::from_lists(&[vec![1, 2, 5], vec![2, 3, 4], vec![1, 3]]);
//! let engine = EngineConfig::new(EngineKind::Mmcs).build(None).unwrap();
//! let transversals = engine.transversals(&family).unwrap();
//! assert_eq!(transversals.num_edges(), 5);
//! ```

pub mod berge;
pub mod config;
pub mod greedy;
pub mod mmcs;
pub mod rs;
pub mod state;
pub mod statistics;
pub mod trail;

pub use berge::BergeEngine;
pub use config::{CardinalityBound, EngineConfig, EngineKind};
pub use greedy::GreedyEngine;
pub use mmcs::MmcsEngine;
pub use rs::RsEngine;
pub use statistics::{Counters, Statistics};

use crate::cancel::CancelToken;
use crate::error::Result;
use crate::family::{SetFamily, VertexSet};
use std::time::{Duration, Instant};

/// Outcome of one engine run.
#[derive(Debug)]
pub struct SearchReport {
    /// The minimal hitting sets found, in no particular order.
    pub transversals: SetFamily,
    pub statistics: Statistics,
    pub elapsed: Duration,
    /// True if the run stopped early on its cancel token.
    pub canceled: bool,
}

/// A strategy for computing the minimal hitting sets of a family.
pub trait TransversalEngine: Send + Sync {
    /// Human-readable engine name.
    fn name(&self) -> &str;

    /// Name accepted by [`EngineKind`]'s parser.
    fn short_name(&self) -> &str;

    /// One-line summary of the engine and its options.
    fn description(&self) -> String;

    /// Token that cancels this engine's runs.
    fn cancel_token(&self) -> &CancelToken;

    /// Compute the minimal hitting sets of `family`.
    ///
    /// If the cancel token is set during the run, the report holds the
    /// hitting sets confirmed so far (possibly none) and `canceled` is
    /// true. The token is not reset by the run.
    fn run(&self, family: &SetFamily) -> Result<SearchReport>;

    /// Compute the minimal hitting sets of `family`, discarding statistics.
    fn transversals(&self, family: &SetFamily) -> Result<SetFamily> {
        self.run(family).map(|report| report.transversals)
    }

    /// Request cancellation of the current run.
    fn cancel(&self) {
        self.cancel_token().cancel();
    }
}

/// What an engine should do with its input.
pub(crate) enum Prepared {
    /// Answered without searching.
    Trivial(SetFamily),
    /// Search this minimized, non-degenerate family.
    Search(SetFamily),
}

/// Minimize a private copy of `family` and answer the degenerate cases.
pub(crate) fn prepare(family: &SetFamily) -> Prepared {
    if family.is_empty() {
        return Prepared::Trivial(SetFamily::from_edges([VertexSet::new()]));
    }
    if family.has_empty_edge() {
        return Prepared::Trivial(SetFamily::new());
    }
    Prepared::Search(family.minimization())
}

/// Package a run's results and log the summary line.
pub(crate) fn finish(
    engine: &dyn TransversalEngine,
    transversals: SetFamily,
    statistics: Statistics,
    started: Instant,
) -> SearchReport {
    let elapsed = started.elapsed();
    let canceled = engine.cancel_token().is_canceled();

    tracing::info!(
        engine = engine.short_name(),
        found = transversals.num_edges(),
        seconds = elapsed.as_secs_f64(),
        canceled,
        "Found {} minimal hitting sets in {:.3} seconds",
        transversals.num_edges(),
        elapsed.as_secs_f64()
    );
    tracing::debug!(engine = engine.short_name(), %statistics, "search statistics");

    SearchReport {
        transversals,
        statistics,
        elapsed,
        canceled,
    }
}
