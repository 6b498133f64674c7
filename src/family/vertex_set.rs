// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! VertexSet type for representing sets of vertex indices as bit vectors.
//!
//! A VertexSet is the edge type of a [`SetFamily`](super::SetFamily) and
//! the candidate type of every search engine. Bit i is set if vertex i is in
//! the set. The universe grows on demand.
//!
//! # Examples
//!
//! ```
//! use mhs_search::family::VertexSet;
//!
//! let mut set = VertexSet::new();
//! set.insert(1);
//! set.insert(2);
//! set.insert(5);
//!
//! assert_eq!(set.len(), 3);
//! assert_eq!(format!("{}", set), "{1, 2, 5}");
//!
//! let descending: Vec<usize> = set.iter_rev().collect();
//! assert_eq!(descending, vec![5, 2, 1]);
//! ```

use bit_set::BitSet;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A set of vertices represented as a bit vector.
///
/// Equality, ordering and hashing depend only on the members, never on the
/// allocated capacity, so two sets built in different ways compare equal.
#[derive(Clone, Default)]
pub struct VertexSet(BitSet);

impl VertexSet {
    /// Create an empty vertex set.
    pub fn new() -> Self {
        Self(BitSet::new())
    }

    /// Create an empty vertex set with room for `nbits` vertices.
    pub fn with_capacity(nbits: usize) -> Self {
        Self(BitSet::with_capacity(nbits))
    }

    /// Create the set `{0, 1, ..., n - 1}`.
    pub fn full(n: usize) -> Self {
        (0..n).collect()
    }

    /// Create the set `{v}`.
    pub fn singleton(v: usize) -> Self {
        let mut set = Self::with_capacity(v + 1);
        set.insert(v);
        set
    }

    /// Check if the set contains a vertex.
    pub fn contains(&self, v: usize) -> bool {
        self.0.contains(v)
    }

    /// Insert a vertex. Returns true if it was not already present.
    pub fn insert(&mut self, v: usize) -> bool {
        self.0.insert(v)
    }

    /// Remove a vertex. Returns true if it was present.
    pub fn remove(&mut self, v: usize) -> bool {
        self.0.remove(v)
    }

    /// Remove every vertex.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Number of vertices in the set (population count).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Smallest vertex in the set.
    pub fn first(&self) -> Option<usize> {
        self.0.iter().next()
    }

    /// One past the largest vertex in the set, or 0 if empty.
    pub fn end(&self) -> usize {
        self.0.iter().last().map_or(0, |v| v + 1)
    }

    /// Iterate over the vertices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter()
    }

    /// Iterate over the vertices in descending order.
    pub fn iter_rev(&self) -> impl Iterator<Item = usize> {
        let ascending: Vec<usize> = self.0.iter().collect();
        ascending.into_iter().rev()
    }

    /// In-place union.
    pub fn union_with(&mut self, other: &VertexSet) {
        self.0.union_with(&other.0);
    }

    /// In-place intersection.
    pub fn intersect_with(&mut self, other: &VertexSet) {
        self.0.intersect_with(&other.0);
    }

    /// In-place difference (`self \ other`).
    pub fn difference_with(&mut self, other: &VertexSet) {
        self.0.difference_with(&other.0);
    }

    /// Intersection as a new set.
    pub fn intersection(&self, other: &VertexSet) -> VertexSet {
        let mut result = self.clone();
        result.intersect_with(other);
        result
    }

    /// Difference as a new set.
    pub fn difference(&self, other: &VertexSet) -> VertexSet {
        let mut result = self.clone();
        result.difference_with(other);
        result
    }

    /// Check whether every member of `self` is in `other`.
    pub fn is_subset(&self, other: &VertexSet) -> bool {
        self.0.is_subset(&other.0)
    }

    /// Check whether the two sets share a vertex.
    pub fn intersects(&self, other: &VertexSet) -> bool {
        !self.0.is_disjoint(&other.0)
    }
}

impl PartialEq for VertexSet {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for VertexSet {}

impl PartialOrd for VertexSet {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VertexSet {
    /// Lexicographic order on the ascending member lists.
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl Hash for VertexSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for v in self.iter() {
            v.hash(state);
        }
        self.len().hash(state);
    }
}

impl FromIterator<usize> for VertexSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<&[usize]> for VertexSet {
    fn from(vertices: &[usize]) -> Self {
        vertices.iter().copied().collect()
    }
}

impl fmt::Display for VertexSet {
    /// Format a vertex set as "{1, 2, 5}".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, v) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", v)?;
        }
        write!(f, "}}")
    }
}

impl fmt::Debug for VertexSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
