// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Adapter that numbers objects by descending weight.
//!
//! With the heaviest object at vertex 0, engines that iterate vertices in
//! index order see the most valuable vertices first, and the greedy engine
//! can be handed [`ScoredHypergraph::weights`] directly.
//!
//! Objects must be ordered before any edge exists, since renumbering would
//! silently change the meaning of stored edges.

use super::{ObjectIndex, VertexIndex};
use crate::engine::{CardinalityBound, GreedyEngine};
use crate::error::{MhsError, Result};
use crate::family::{SetFamily, VertexSet};
use std::hash::Hash;
use std::num::NonZeroUsize;

/// Sets of weighted domain objects indexed as a [`SetFamily`].
#[derive(Debug, Clone)]
pub struct ScoredHypergraph<T> {
    index: ObjectIndex<T>,
    weights: Vec<f64>,
    family: SetFamily,
}

impl<T> Default for ScoredHypergraph<T> {
    fn default() -> Self {
        Self {
            index: ObjectIndex::default(),
            weights: Vec::new(),
            family: SetFamily::new(),
        }
    }
}

impl<T: Eq + Hash + Clone> ScoredHypergraph<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Weigh every object once, order by descending weight, then index
    /// every non-empty set and minimize the resulting family.
    ///
    /// Objects of equal weight keep their order of first appearance.
    pub fn from_sets<I, S, F>(sets: I, weight: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: IntoIterator<Item = T>,
        F: Fn(&T) -> f64,
    {
        let sets: Vec<Vec<T>> = sets.into_iter().map(|s| s.into_iter().collect()).collect();

        let mut hypergraph = Self::new();
        for object in sets.iter().flatten() {
            if hypergraph.index.index_of(object).is_none() {
                let w = weight(object);
                hypergraph.add_object(object.clone(), w);
            }
        }
        hypergraph.sort_objects();

        for set in sets {
            hypergraph.add_edge(set);
        }
        hypergraph.family.minimize();
        hypergraph
    }

    /// Register an object with its weight. Returns its current index.
    ///
    /// An object seen before keeps its original weight.
    pub fn add_object(&mut self, object: T, weight: f64) -> usize {
        let index = self.index.intern(object);
        if index == self.weights.len() {
            self.weights.push(weight);
        }
        index
    }

    /// Renumber the objects by descending weight.
    ///
    /// # Errors
    ///
    /// Returns [`MhsError::ReorderAfterEdges`] once any edge has been added.
    pub fn order_by_weight(&mut self) -> Result<()> {
        if !self.family.is_empty() {
            return Err(MhsError::ReorderAfterEdges);
        }
        self.sort_objects();
        Ok(())
    }

    fn sort_objects(&mut self) {
        let mut order: Vec<usize> = (0..self.weights.len()).collect();
        order.sort_by(|&a, &b| self.weights[b].total_cmp(&self.weights[a]));
        self.weights = order.iter().map(|&old| self.weights[old]).collect();
        self.index.permute(&order);
    }

    /// Add a set as an edge. Objects not registered yet weigh 0 and are
    /// appended after the ordered ones.
    ///
    /// Returns the edge index, or `None` if the set was empty and dropped.
    pub fn add_edge<S: IntoIterator<Item = T>>(&mut self, set: S) -> Option<usize> {
        let edge: VertexSet = set
            .into_iter()
            .map(|object| self.add_object(object, 0.0))
            .collect();
        if edge.is_empty() {
            return None;
        }
        self.family.push(edge);
        Some(self.family.num_edges() - 1)
    }

    /// Weights indexed by vertex, in descending order once ordered.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Weight of an object, if it was seen.
    pub fn weight_of(&self, object: &T) -> Option<f64> {
        self.index.index_of(object).map(|index| self.weights[index])
    }

    /// Total weight of a vertex set.
    pub fn score(&self, set: &VertexSet) -> f64 {
        set.iter().filter_map(|v| self.weights.get(v)).sum()
    }

    /// The objects, indexed by vertex.
    pub fn objects(&self) -> &[T] {
        self.index.objects()
    }

    /// A greedy engine scoring candidates with these objects' weights.
    pub fn greedy_engine(
        &self,
        bound: CardinalityBound,
        max_candidates: Option<NonZeroUsize>,
    ) -> GreedyEngine {
        GreedyEngine::new(bound, max_candidates).with_weights(self.weights.clone())
    }
}

impl<T: Eq + Hash + Clone> VertexIndex for ScoredHypergraph<T> {
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

#[cfg(test)]
mod tests {
    use super::*;

    fn weight(name: &&str) -> f64 {
        match *name {
            "heavy" => 10.0,
            "mid" => 5.0,
            _ => 1.0,
        }
    }

    #[test]
    fn test_descending_weight_order() {
        let sets = vec![vec!["light", "mid"], vec!["heavy", "light"]];
        let hypergraph = ScoredHypergraph::from_sets(sets, weight);
        assert_eq!(hypergraph.objects(), &["heavy", "mid", "light"]);
        assert_eq!(hypergraph.weights(), &[10.0, 5.0, 1.0]);
        assert_eq!(
            hypergraph.family().edges_as_lists(),
            vec![vec![1, 2], vec![0, 2]]
        );
        assert_eq!(hypergraph.weight_of(&"mid"), Some(5.0));
        assert_eq!(hypergraph.score(&VertexSet::from(&[0, 2][..])), 11.0);
    }

    #[test]
    fn test_ties_keep_first_appearance() {
        let sets = vec![vec!["b", "a"], vec!["c"]];
        let hypergraph = ScoredHypergraph::from_sets(sets, |_: &&str| 0.0);
        assert_eq!(hypergraph.objects(), &["b", "a", "c"]);
    }

    #[test]
    fn test_reorder_after_edges_rejected() {
        let mut hypergraph = ScoredHypergraph::new();
        hypergraph.add_object("x", 1.0);
        hypergraph.add_object("y", 2.0);
        hypergraph.order_by_weight().unwrap();
        assert_eq!(hypergraph.objects(), &["y", "x"]);

        hypergraph.add_edge(["x"]);
        assert!(matches!(
            hypergraph.order_by_weight(),
            Err(MhsError::ReorderAfterEdges)
        ));
    }

    #[test]
    fn test_greedy_engine_uses_object_weights() {
        let sets = vec![vec!["light", "mid", "heavy"], vec!["mid", "heavy"]];
        let hypergraph = ScoredHypergraph::from_sets(sets, weight);
        let engine = hypergraph.greedy_engine(CardinalityBound::UNBOUNDED, NonZeroUsize::new(1));
        assert_eq!(engine.weight(0), 10.0);
        assert_eq!(engine.weight(2), 1.0);

        let found = hypergraph.minimal_hitting_sets(&engine).unwrap();
        assert_eq!(found, vec![vec!["heavy"]]);
    }

    #[test]
    fn test_unregistered_objects_weigh_zero() {
        let mut hypergraph = ScoredHypergraph::new();
        hypergraph.add_object("x", 3.0);
        hypergraph.add_edge(["z", "x"]);
        assert_eq!(hypergraph.weights(), &[3.0, 0.0]);
        assert_eq!(hypergraph.index_of(&"z"), Some(1));
    }
}
