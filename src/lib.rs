// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Minimal hitting set enumeration.
//!
//! Given a family of finite sets (a hypergraph), find the subsets of the
//! vertex universe that intersect every set and are inclusion-minimal with
//! that property. These are also known as minimal transversals.
//!
//! # Architecture
//!
//! ## Families
//!
//! [`family::SetFamily`] is an ordered collection of bit-vector edges
//! ([`family::VertexSet`]) with a cached vertex count. It supports
//! minimization, transposition, coverage queries and a line-oriented text
//! format.
//!
//! ## Adapters
//!
//! [`adapter::DomainHypergraph`] and [`adapter::ScoredHypergraph`] map
//! arbitrary domain objects to dense vertex indices and back, the latter
//! numbering objects by descending weight.
//!
//! ## Engines
//!
//! Four [`engine::TransversalEngine`] implementations, selected through
//! [`engine::EngineConfig`]:
//!
//! 1. **Berge**: multiply edges in one at a time, re-minimizing as it goes.
//! 2. **MMCS**: depth-first search over a candidate set, branching on the
//!    uncovered edge with fewest eligible vertices.
//! 3. **RS**: depth-first search branching on the first uncovered edge,
//!    pruned by an ordering on critical edges.
//! 4. **Greedy**: breadth-first growth of heavy candidates, with caps.
//!
//! MMCS and RS keep their per-branch state in a [`engine::state::SearchState`]
//! that is mutated and restored in place, and deep-copied whenever a branch
//! is forked onto the [`scheduler::Scheduler`]'s work-stealing pool.
//!
//! # Parallelization
//!
//! A branch is forked only while few forked tasks are waiting to start;
//! otherwise it runs in the current thread. This choice never changes the
//! result set. [`scheduler::Scheduler::run`] returns once every forked task
//! has finished.
//!
//! # Cancellation
//!
//! Every engine polls a [`cancel::CancelToken`] at each search node and each
//! loop step. A canceled run returns the minimal hitting sets confirmed so
//! far.
//!
//! # References
//!
//! - Murakami, K. and Uno, T. (2014). "Efficient algorithms for dualizing
//!   large-scale hypergraphs." Discrete Applied Mathematics 170, 83-94.
//! - Berge, C. (1989). "Hypergraphs: Combinatorics of Finite Sets."

pub mod adapter;
pub mod cancel;
pub mod engine;
pub mod error;
pub mod family;
pub mod scheduler;

// Re-export commonly used types
pub use adapter::{DomainHypergraph, ScoredHypergraph, VertexIndex};
pub use cancel::CancelToken;
pub use engine::{EngineConfig, EngineKind, SearchReport, TransversalEngine};
pub use error::{MhsError, Result};
pub use family::{SetFamily, VertexSet};
