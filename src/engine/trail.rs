// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Trail-based backtracking for critical-edge bookkeeping.
//!
//! Adding a vertex to the candidate set removes edges from the critical
//! sets of the vertices already present. Each removal is recorded on the
//! trail under a checkpoint; removing the vertex again rewinds to that
//! checkpoint and hands every recorded change back so it can be undone.
//!
//! A trail belongs to exactly one search state. Forked states start with a
//! fresh, empty trail.

use crate::family::VertexSet;

/// Edges taken away from one vertex's critical set.
#[derive(Debug, Clone)]
struct TrailEntry {
    vertex: usize,
    edges: VertexSet,
}

/// Stack of recorded changes with nested checkpoints.
#[derive(Debug, Default)]
pub struct Trail {
    entries: Vec<TrailEntry>,
    checkpoints: Vec<usize>,
}

impl Trail {
    /// Create a new empty trail.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a checkpoint for later backtracking.
    ///
    /// Returns the checkpoint index.
    pub fn checkpoint(&mut self) -> usize {
        let checkpoint = self.entries.len();
        self.checkpoints.push(checkpoint);
        checkpoint
    }

    /// Record that `edges` were removed from the critical set of `vertex`.
    pub fn record(&mut self, vertex: usize, edges: VertexSet) {
        self.entries.push(TrailEntry { vertex, edges });
    }

    /// Rewind to the most recent checkpoint, passing each discarded change
    /// to `restore`, most recent first.
    ///
    /// Returns true if there was a checkpoint to rewind to, false otherwise.
    pub fn rewind_with<F: FnMut(usize, VertexSet)>(&mut self, mut restore: F) -> bool {
        let Some(checkpoint) = self.checkpoints.pop() else {
            return false;
        };
        for entry in self.entries.drain(checkpoint..).rev() {
            restore(entry.vertex, entry.edges);
        }
        true
    }

    /// Get the current number of entries in the trail.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the trail is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the number of active checkpoints.
    pub fn checkpoint_depth(&self) -> usize {
        self.checkpoints.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edges(list: &[usize]) -> VertexSet {
        VertexSet::from(list)
    }

    #[test]
    fn test_trail_new() {
        let trail = Trail::new();
        assert_eq!(trail.len(), 0);
        assert_eq!(trail.checkpoint_depth(), 0);
        assert!(trail.is_empty());
    }

    #[test]
    fn test_checkpoint_and_rewind() {
        let mut trail = Trail::new();

        trail.record(1, edges(&[0]));
        let checkpoint = trail.checkpoint();
        assert_eq!(checkpoint, 1);

        trail.record(2, edges(&[3, 4]));
        trail.record(5, edges(&[1]));
        assert_eq!(trail.len(), 3);

        let mut restored = Vec::new();
        assert!(trail.rewind_with(|v, e| restored.push((v, e))));
        assert_eq!(restored, vec![(5, edges(&[1])), (2, edges(&[3, 4]))]);
        assert_eq!(trail.len(), 1);
        assert_eq!(trail.checkpoint_depth(), 0);
    }

    #[test]
    fn test_nested_checkpoints() {
        let mut trail = Trail::new();

        trail.checkpoint();
        trail.record(1, edges(&[0]));
        trail.checkpoint();
        trail.record(2, edges(&[1]));
        assert_eq!(trail.checkpoint_depth(), 2);

        let mut count = 0;
        assert!(trail.rewind_with(|v, _| {
            assert_eq!(v, 2);
            count += 1;
        }));
        assert_eq!(count, 1);
        assert_eq!(trail.len(), 1);

        assert!(trail.rewind_with(|v, _| assert_eq!(v, 1)));
        assert!(trail.is_empty());
    }

    #[test]
    fn test_empty_checkpoint_restores_nothing() {
        let mut trail = Trail::new();
        trail.checkpoint();
        assert!(trail.rewind_with(|_, _| panic!("nothing was recorded")));
    }

    #[test]
    fn test_rewind_empty() {
        let mut trail = Trail::new();
        assert!(!trail.rewind_with(|_, _| {}));
    }
}
