// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Engine selection and options.
//!
//! [`EngineConfig`] collects the options every front end can set and turns
//! them into a boxed [`TransversalEngine`]. Options an engine does not
//! recognize are rejected by [`EngineConfig::validate`] rather than
//! silently ignored.

use super::berge::BergeEngine;
use super::greedy::GreedyEngine;
use super::mmcs::MmcsEngine;
use super::rs::RsEngine;
use super::TransversalEngine;
use crate::error::{MhsError, Result};
use std::fmt;
use std::num::NonZeroUsize;
use strum_macros::{Display, EnumCount, EnumIter, EnumString};

/// The available search algorithms.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter, EnumCount,
)]
#[strum(serialize_all = "lowercase")]
pub enum EngineKind {
    /// Sequential Berge multiplication.
    Berge,
    /// Parallel minimal-candidate-set search.
    #[default]
    Mmcs,
    /// Parallel reverse search with the earliest-critical-edge order.
    Rs,
    /// Score-guided breadth-first search, usually bounded.
    Greedy,
}

impl EngineKind {
    /// Check whether the engine runs on a worker pool.
    pub fn is_parallel(self) -> bool {
        matches!(self, EngineKind::Mmcs | EngineKind::Rs)
    }

    /// Check whether the engine honors a candidate cap.
    pub fn supports_max_candidates(self) -> bool {
        self == EngineKind::Greedy
    }

    /// Check whether the engine uses vertex weights.
    pub fn uses_weights(self) -> bool {
        self == EngineKind::Greedy
    }
}

/// Upper bound on the size of reported hitting sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CardinalityBound(Option<NonZeroUsize>);

impl CardinalityBound {
    pub const UNBOUNDED: CardinalityBound = CardinalityBound(None);

    /// Bound at `max` vertices; 0 means unbounded.
    pub fn new(max: usize) -> Self {
        Self(NonZeroUsize::new(max))
    }

    /// The bound, if any.
    pub fn max(self) -> Option<usize> {
        self.0.map(NonZeroUsize::get)
    }

    /// Check whether a set of `size` vertices may be reported.
    pub fn admits(self, size: usize) -> bool {
        self.0.map_or(true, |max| size <= max.get())
    }

    /// Check whether a set of `size` vertices may still be extended.
    pub fn allows_growth(self, size: usize) -> bool {
        self.0.map_or(true, |max| size < max.get())
    }
}

impl From<Option<NonZeroUsize>> for CardinalityBound {
    fn from(max: Option<NonZeroUsize>) -> Self {
        Self(max)
    }
}

impl fmt::Display for CardinalityBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(max) => write!(f, "max CI size: {max}"),
            None => write!(f, "no max CI size"),
        }
    }
}

/// Options for building an engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineConfig {
    pub kind: EngineKind,
    pub max_cardinality: Option<NonZeroUsize>,
    pub max_candidates: Option<NonZeroUsize>,
    pub threads: Option<NonZeroUsize>,
}

impl EngineConfig {
    pub fn new(kind: EngineKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Bound reported sets at `max` vertices; 0 means unbounded.
    pub fn with_max_cardinality(mut self, max: usize) -> Self {
        self.max_cardinality = NonZeroUsize::new(max);
        self
    }

    pub fn bound(&self) -> CardinalityBound {
        self.max_cardinality.into()
    }

    /// Stop the greedy search after `max` candidates; 0 means no cap.
    pub fn with_max_candidates(mut self, max: usize) -> Self {
        self.max_candidates = NonZeroUsize::new(max);
        self
    }

    /// Use `threads` workers; 0 means one per core.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = NonZeroUsize::new(threads);
        self
    }

    /// Reject options the selected engine does not recognize.
    ///
    /// # Errors
    ///
    /// Returns [`MhsError::InvalidConfig`] naming the offending option.
    pub fn validate(&self) -> Result<()> {
        if self.threads.is_some() && !self.kind.is_parallel() {
            return Err(MhsError::InvalidConfig(format!(
                "the {} engine is sequential and takes no thread count",
                self.kind
            )));
        }
        if self.max_candidates.is_some() && !self.kind.supports_max_candidates() {
            return Err(MhsError::InvalidConfig(format!(
                "the {} engine takes no maximum candidate count",
                self.kind
            )));
        }
        Ok(())
    }

    /// Validate and build the engine.
    ///
    /// `weights` are indexed by vertex and only consulted by the greedy
    /// engine; missing entries count as 0.
    pub fn build(&self, weights: Option<Vec<f64>>) -> Result<Box<dyn TransversalEngine>> {
        self.validate()?;
        if weights.is_some() && !self.kind.uses_weights() {
            tracing::debug!(engine = %self.kind, "vertex weights ignored");
        }

        let engine: Box<dyn TransversalEngine> = match self.kind {
            EngineKind::Berge => Box::new(BergeEngine::new(self.bound())),
            EngineKind::Mmcs => Box::new(MmcsEngine::new(self.bound(), self.threads)),
            EngineKind::Rs => Box::new(RsEngine::new(self.bound(), self.threads)),
            EngineKind::Greedy => Box::new(
                GreedyEngine::new(self.bound(), self.max_candidates)
                    .with_weights(weights.unwrap_or_default()),
            ),
        };
        Ok(engine)
    }
}
