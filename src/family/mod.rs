// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Set families (hypergraphs) over an indexed vertex universe.
//!
//! A [`SetFamily`] owns an ordered sequence of [`VertexSet`] edges plus a
//! cached vertex count. The vertex count is kept at least one past the
//! highest vertex of any edge: [`SetFamily::push`] maintains it
//! incrementally, and [`SetFamily::update_num_verts`] recomputes it after
//! bulk mutation through [`SetFamily::edges_mut`].
//!
//! # Examples
//!
//! ```
//! use mhs_search::family::{SetFamily, VertexSet};
//!
//! let mut family = SetFamily::from_lists(&[vec![1, 2, 5], vec![2, 3, 4], vec![1, 3], vec![1, 3, 4]]);
//! assert_eq!(family.num_edges(), 4);
//! assert_eq!(family.num_verts(), 6);
//!
//! family.minimize();
//! assert_eq!(family.num_edges(), 3);
//! assert!(family.is_transversed_by(&VertexSet::from(&[1, 2][..])));
//! ```

pub mod io;
pub mod vertex_set;

pub use vertex_set::VertexSet;

use std::collections::BTreeSet;

/// An ordered collection of edges over a shared vertex universe.
#[derive(Debug, Clone, Default)]
pub struct SetFamily {
    edges: Vec<VertexSet>,
    num_verts: usize,
}

impl SetFamily {
    /// Create an empty family with no vertices.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an edgeless family over `num_verts` vertices.
    pub fn with_vertices(num_verts: usize) -> Self {
        Self {
            edges: Vec::new(),
            num_verts,
        }
    }

    /// Create a family of `num_edges` empty edges over `num_verts` vertices.
    ///
    /// Used for per-vertex tables such as transposes and critical-edge sets,
    /// the only places where empty edges are expected to persist.
    pub fn with_empty_edges(num_verts: usize, num_edges: usize) -> Self {
        Self {
            edges: vec![VertexSet::with_capacity(num_verts); num_edges],
            num_verts,
        }
    }

    /// Build a family from edges, computing the vertex count.
    pub fn from_edges<I: IntoIterator<Item = VertexSet>>(edges: I) -> Self {
        let mut family = Self::new();
        for edge in edges {
            family.push(edge);
        }
        family
    }

    /// Build a family from edges given as lists of vertex indices.
    pub fn from_lists<L: AsRef<[usize]>>(lists: &[L]) -> Self {
        Self::from_edges(lists.iter().map(|list| VertexSet::from(list.as_ref())))
    }

    /// Number of vertices.
    pub fn num_verts(&self) -> usize {
        self.num_verts
    }

    /// Number of edges.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Check if the family has no edges.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Get an edge by index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.num_edges()`.
    pub fn edge(&self, index: usize) -> &VertexSet {
        &self.edges[index]
    }

    /// Get an edge by index for in-place modification.
    ///
    /// Call [`update_num_verts`](Self::update_num_verts) afterwards if the
    /// modification may have introduced a new highest vertex.
    pub fn edge_mut(&mut self, index: usize) -> &mut VertexSet {
        &mut self.edges[index]
    }

    /// All edges in order.
    pub fn edges(&self) -> &[VertexSet] {
        &self.edges
    }

    /// All edges for bulk modification.
    pub fn edges_mut(&mut self) -> &mut Vec<VertexSet> {
        &mut self.edges
    }

    /// Iterate over the edges in order.
    pub fn iter(&self) -> std::slice::Iter<'_, VertexSet> {
        self.edges.iter()
    }

    /// Append an edge, growing the vertex count if needed.
    pub fn push(&mut self, edge: VertexSet) {
        self.num_verts = self.num_verts.max(edge.end());
        self.edges.push(edge);
    }

    /// Remove every edge. The vertex count is left unchanged.
    pub fn clear(&mut self) {
        self.edges.clear();
    }

    /// Recompute the vertex count from the edges by a full scan.
    pub fn update_num_verts(&mut self) {
        self.num_verts = self.edges.iter().map(VertexSet::end).max().unwrap_or(0);
    }

    /// Minimize in place: drop empty edges and every edge that is a superset
    /// of another edge.
    ///
    /// Edges are re-ordered by increasing cardinality (stable for equal
    /// sizes). Duplicate edges collapse to one. O(n²) in the edge count.
    pub fn minimize(&mut self) {
        if self.edges.is_empty() {
            return;
        }

        let mut by_cardinality = std::mem::take(&mut self.edges);
        by_cardinality.sort_by_key(VertexSet::len);

        for edge in by_cardinality {
            if edge.is_empty() {
                continue;
            }
            // Anything kept so far is no larger than edge.
            if self.edges.iter().any(|kept| kept.is_subset(&edge)) {
                continue;
            }
            self.edges.push(edge);
        }

        self.update_num_verts();
    }

    /// Return a minimized copy, leaving `self` untouched.
    pub fn minimization(&self) -> SetFamily {
        let mut result = self.clone();
        result.minimize();
        result
    }

    /// Return the transpose (dual) family.
    ///
    /// Edge v of the result is the set of edge indices of `self` that contain
    /// vertex v. The result has `self.num_verts()` edges over
    /// `self.num_edges()` vertices.
    pub fn transpose(&self) -> SetFamily {
        let mut result = SetFamily::with_empty_edges(self.num_edges(), self.num_verts());
        for (e, edge) in self.edges.iter().enumerate() {
            for v in edge.iter() {
                result.edges[v].insert(e);
            }
        }
        result
    }

    /// Vertices covered by at least one edge.
    pub fn support(&self) -> VertexSet {
        let mut result = VertexSet::with_capacity(self.num_verts);
        for edge in &self.edges {
            result.union_with(edge);
        }
        result
    }

    /// Number of edges containing each vertex, indexed by vertex.
    pub fn vertex_degrees(&self) -> Vec<usize> {
        let mut degrees = vec![0; self.num_verts];
        for edge in &self.edges {
            for v in edge.iter() {
                degrees[v] += 1;
            }
        }
        degrees
    }

    /// Check whether `candidate` intersects every edge.
    pub fn is_transversed_by(&self, candidate: &VertexSet) -> bool {
        self.edges.iter().all(|edge| edge.intersects(candidate))
    }

    /// Check whether some edge is contained in `candidate`.
    pub fn has_edge_covered_by(&self, candidate: &VertexSet) -> bool {
        self.edges.iter().any(|edge| edge.is_subset(candidate))
    }

    /// Check whether some edge is empty.
    pub fn has_empty_edge(&self) -> bool {
        self.edges.iter().any(VertexSet::is_empty)
    }

    /// The edges as ascending lists of vertex indices.
    pub fn edges_as_lists(&self) -> Vec<Vec<usize>> {
        self.edges.iter().map(|edge| edge.iter().collect()).collect()
    }

    /// The distinct edges, ignoring order.
    pub fn edge_set(&self) -> BTreeSet<VertexSet> {
        self.edges.iter().cloned().collect()
    }

    /// Check whether both families have the same distinct edges.
    pub fn same_edges(&self, other: &SetFamily) -> bool {
        self.edge_set() == other.edge_set()
    }
}

impl FromIterator<VertexSet> for SetFamily {
    fn from_iter<I: IntoIterator<Item = VertexSet>>(iter: I) -> Self {
        Self::from_edges(iter)
    }
}

impl<'a> IntoIterator for &'a SetFamily {
    type Item = &'a VertexSet;
    type IntoIter = std::slice::Iter<'a, VertexSet>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for SetFamily {
    type Item = VertexSet;
    type IntoIter = std::vec::IntoIter<VertexSet>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> SetFamily {
        SetFamily::from_lists(&[vec![1, 2, 5], vec![2, 3, 4], vec![1, 3]])
    }

    #[test]
    fn test_default_has_no_vertices() {
        let family = SetFamily::new();
        assert_eq!(family.num_verts(), 0);
        assert_eq!(family.num_edges(), 0);
        assert!(family.is_empty());
    }

    #[test]
    fn test_from_lists_counts() {
        let family = SetFamily::from_lists(&[
            vec![1, 2, 5],
            vec![2, 3, 4],
            vec![1, 3],
            vec![1, 3, 4],
        ]);
        assert_eq!(family.num_edges(), 4);
        assert_eq!(family.num_verts(), 6);
        assert_eq!(family.minimization().num_edges(), 3);
        // minimization leaves the original alone
        assert_eq!(family.num_edges(), 4);
    }

    #[test]
    fn test_minimize_drops_supersets_empties_and_duplicates() {
        let mut family = SetFamily::from_lists(&[
            vec![0, 1, 2],
            vec![],
            vec![1],
            vec![3, 4],
            vec![4, 3],
            vec![1, 7],
        ]);
        family.minimize();
        assert_eq!(
            family.edges_as_lists(),
            vec![vec![1], vec![3, 4]],
        );
        assert_eq!(family.num_verts(), 5);
    }

    #[test]
    fn test_minimize_orders_by_cardinality() {
        let mut family = SetFamily::from_lists(&[vec![5, 6, 7], vec![0, 1], vec![2]]);
        family.minimize();
        let sizes: Vec<usize> = family.iter().map(VertexSet::len).collect();
        assert_eq!(sizes, vec![1, 2, 3]);
    }

    #[test]
    fn test_transpose() {
        let family = small();
        let t = family.transpose();
        assert_eq!(t.num_edges(), 6);
        assert_eq!(t.num_verts(), 3);
        assert!(t.edge(0).is_empty());
        assert_eq!(t.edge(1), &VertexSet::from(&[0, 2][..]));
        assert_eq!(t.edge(2), &VertexSet::from(&[0, 1][..]));
        assert_eq!(t.edge(3), &VertexSet::from(&[1, 2][..]));
        assert_eq!(t.edge(4), &VertexSet::singleton(1));
        assert_eq!(t.edge(5), &VertexSet::singleton(0));
    }

    #[test]
    fn test_transpose_twice_restores_incidence() {
        let family = small();
        let back = family.transpose().transpose();
        assert_eq!(back.edges(), family.edges());
    }

    #[test]
    fn test_support_and_degrees() {
        let family = small();
        assert_eq!(family.support(), VertexSet::from(&[1, 2, 3, 4, 5][..]));
        assert_eq!(family.vertex_degrees(), vec![0, 2, 2, 2, 1, 1]);
    }

    #[test]
    fn test_transversal_queries() {
        let family = small();
        assert!(family.is_transversed_by(&VertexSet::from(&[1, 2][..])));
        assert!(!family.is_transversed_by(&VertexSet::from(&[4, 5][..])));
        assert!(family.has_edge_covered_by(&VertexSet::from(&[0, 1, 3][..])));
        assert!(!family.has_edge_covered_by(&VertexSet::from(&[1, 2][..])));
    }

    #[test]
    fn test_update_num_verts_after_bulk_edit() {
        let mut family = small();
        family.edge_mut(0).insert(40);
        assert_eq!(family.num_verts(), 6);
        family.update_num_verts();
        assert_eq!(family.num_verts(), 41);

        family.edges_mut().truncate(1);
        family.edge_mut(0).remove(40);
        family.update_num_verts();
        assert_eq!(family.num_verts(), 6);
    }

    #[test]
    fn test_same_edges_ignores_order() {
        let a = SetFamily::from_lists(&[vec![1, 2], vec![3]]);
        let b = SetFamily::from_lists(&[vec![3], vec![2, 1]]);
        assert!(a.same_edges(&b));
        assert!(!a.same_edges(&small()));
    }
}
