// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Mapping between domain objects and dense vertex indices.
//!
//! The engines work on [`SetFamily`] values over vertices `0..n`. An
//! adapter assigns each distinct domain object a vertex, builds the
//! (minimized) family from sets of objects, and converts engine results
//! back into objects.
//!
//! - [`DomainHypergraph`] numbers objects in order of first appearance.
//! - [`ScoredHypergraph`] numbers them by descending weight, so vertex 0 is
//!   the heaviest object.
//!
//! Empty input sets are dropped when the family is built.
//!
//! # Example
//!
//! ```
//! use mhs_search::adapter::{DomainHypergraph, VertexIndex};
//! use mhs_search::engine::{EngineConfig, EngineKind};
//!
//! let sets = vec![vec!["A", "B", "C"], vec!["B", "D", "E"], vec!["A", "D"]];
//! let hypergraph = DomainHypergraph::from_sets(sets);
//! let engine = EngineConfig::new(EngineKind::Berge).build(None).unwrap();
//! let mut found = hypergraph.minimal_hitting_sets(engine.as_ref()).unwrap();
//! for set in &mut found {
//!     set.sort();
//! }
//! found.sort();
//! assert_eq!(found[0], vec!["A", "B"]);
//! assert_eq!(found.len(), 5);
//! ```

pub mod scored;
pub mod unordered;

pub use scored::ScoredHypergraph;
pub use unordered::DomainHypergraph;

use crate::engine::TransversalEngine;
use crate::error::{MhsError, Result};
use crate::family::{SetFamily, VertexSet};
use std::collections::HashMap;
use std::hash::Hash;

/// A set family whose vertices stand for domain objects.
pub trait VertexIndex {
    type Object: Clone;

    /// The indexed family.
    fn family(&self) -> &SetFamily;

    /// The object represented by vertex `index`.
    ///
    /// # Errors
    ///
    /// Returns [`MhsError::UnknownIndex`] if no object has that index.
    fn object(&self, index: usize) -> Result<&Self::Object>;

    /// The vertex representing `object`, if it was seen.
    fn index_of(&self, object: &Self::Object) -> Option<usize>;

    /// Objects of a vertex set, in vertex order.
    fn objects_of(&self, set: &VertexSet) -> Result<Vec<Self::Object>> {
        set.iter().map(|v| self.object(v).cloned()).collect()
    }

    /// Objects of every set in `family`, in edge order.
    fn object_sets(&self, family: &SetFamily) -> Result<Vec<Vec<Self::Object>>> {
        family.iter().map(|set| self.objects_of(set)).collect()
    }

    /// Run `engine` on the indexed family and convert its results.
    fn minimal_hitting_sets(
        &self,
        engine: &dyn TransversalEngine,
    ) -> Result<Vec<Vec<Self::Object>>> {
        let transversals = engine.transversals(self.family())?;
        self.object_sets(&transversals)
    }
}

/// Bidirectional object ↔ index table.
#[derive(Debug, Clone)]
pub(crate) struct ObjectIndex<T> {
    objects: Vec<T>,
    indices: HashMap<T, usize>,
}

impl<T> Default for ObjectIndex<T> {
    fn default() -> Self {
        Self {
            objects: Vec::new(),
            indices: HashMap::new(),
        }
    }
}

impl<T: Eq + Hash + Clone> ObjectIndex<T> {
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Index of `object`, assigning the next free one on first sight.
    pub fn intern(&mut self, object: T) -> usize {
        if let Some(&index) = self.indices.get(&object) {
            return index;
        }
        let index = self.objects.len();
        self.indices.insert(object.clone(), index);
        self.objects.push(object);
        index
    }

    pub fn index_of(&self, object: &T) -> Option<usize> {
        self.indices.get(object).copied()
    }

    pub fn object(&self, index: usize) -> Result<&T> {
        self.objects.get(index).ok_or(MhsError::UnknownIndex(index))
    }

    pub fn objects(&self) -> &[T] {
        &self.objects
    }

    /// Renumber so that new index i holds the object previously at `order[i]`.
    pub fn permute(&mut self, order: &[usize]) {
        debug_assert_eq!(order.len(), self.objects.len());
        let objects: Vec<T> = order.iter().map(|&old| self.objects[old].clone()).collect();
        self.indices = objects
            .iter()
            .enumerate()
            .map(|(index, object)| (object.clone(), index))
            .collect();
        self.objects = objects;
    }
}
