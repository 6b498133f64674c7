// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Adapter that numbers objects in order of first appearance.

use super::{ObjectIndex, VertexIndex};
use crate::error::Result;
use crate::family::{SetFamily, VertexSet};
use std::hash::Hash;

/// Sets of domain objects indexed as a [`SetFamily`].
#[derive(Debug, Clone)]
pub struct DomainHypergraph<T> {
    index: ObjectIndex<T>,
    family: SetFamily,
}

impl<T> Default for DomainHypergraph<T> {
    fn default() -> Self {
        Self {
            index: ObjectIndex::default(),
            family: SetFamily::new(),
        }
    }
}

impl<T: Eq + Hash + Clone> DomainHypergraph<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every non-empty set and minimize the resulting family.
    pub fn from_sets<I, S>(sets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: IntoIterator<Item = T>,
    {
        let mut hypergraph = Self::new();
        for set in sets {
            hypergraph.add_edge(set);
        }
        hypergraph.family.minimize();
        hypergraph
    }

    /// Add a set as an edge, indexing unseen objects.
    ///
    /// Returns the edge index, or `None` if the set was empty and dropped.
    /// The family is not re-minimized.
    pub fn add_edge<S: IntoIterator<Item = T>>(&mut self, set: S) -> Option<usize> {
        let edge: VertexSet = set
            .into_iter()
            .map(|object| self.index.intern(object))
            .collect();
        if edge.is_empty() {
            return None;
        }
        self.family.push(edge);
        Some(self.family.num_edges() - 1)
    }

    /// Number of distinct objects seen.
    pub fn num_objects(&self) -> usize {
        self.index.len()
    }

    /// The objects, indexed by vertex.
    pub fn objects(&self) -> &[T] {
        self.index.objects()
    }
}

impl<T: Eq + Hash + Clone> VertexIndex for DomainHypergraph<T> {
    type Object = T;

    fn family(&self) -> &SetFamily {
        &self.family
    }

    fn object(&self, index: usize) -> Result<&T> {
        self.index.object(index)
    }

    fn index_of(&self, object: &T) -> Option<usize> {
        self.index.index_of(object)
    }
}
