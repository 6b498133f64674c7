// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use mhs_search::engine::{EngineConfig, EngineKind, TransversalEngine};
use mhs_search::family::{SetFamily, VertexSet};
use strum::IntoEnumIterator;

/// The running example: three edges over vertices 1..=5.
pub fn small_family() -> SetFamily {
    SetFamily::from_lists(&[vec![1, 2, 5], vec![2, 3, 4], vec![1, 3]])
}

/// Its five minimal hitting sets, sorted.
pub fn small_family_answer() -> Vec<Vec<usize>> {
    vec![vec![1, 2], vec![1, 3], vec![1, 4], vec![2, 3], vec![3, 5]]
}

/// Edges as sorted lists, sorted.
pub fn sorted_lists(family: &SetFamily) -> Vec<Vec<usize>> {
    let mut lists = family.edges_as_lists();
    lists.sort();
    lists
}

/// One engine of every kind, unbounded, with `threads` workers for the
/// parallel ones.
pub fn all_engines(threads: usize) -> Vec<Box<dyn TransversalEngine>> {
    EngineKind::iter()
        .map(|kind| {
            let config = if kind.is_parallel() {
                EngineConfig::new(kind).with_threads(threads)
            } else {
                EngineConfig::new(kind)
            };
            config.build(None).unwrap()
        })
        .collect()
}

/// Minimal hitting sets by exhaustive subset enumeration.
///
/// Only usable for small vertex counts.
pub fn brute_force(family: &SetFamily, max_cardinality: usize) -> Vec<Vec<usize>> {
    if family.is_empty() {
        return vec![vec![]];
    }
    let n = family.num_verts();
    assert!(n <= 16, "brute force limited to 16 vertices");

    let hitting: Vec<VertexSet> = (0u32..1 << n)
        .map(|mask| (0..n).filter(|&v| mask & (1 << v) != 0).collect::<VertexSet>())
        .filter(|candidate| family.is_transversed_by(candidate))
        .collect();

    let mut minimal: Vec<Vec<usize>> = hitting
        .iter()
        .filter(|candidate| {
            !hitting
                .iter()
                .any(|other| other != *candidate && other.is_subset(candidate))
        })
        .filter(|candidate| max_cardinality == 0 || candidate.len() <= max_cardinality)
        .map(|candidate| candidate.iter().collect())
        .collect();
    minimal.sort();
    minimal
}

/// Check that every set hits every edge and no set contains another.
pub fn assert_minimal_transversals(family: &SetFamily, result: &SetFamily) {
    for t in result {
        assert!(
            family.is_transversed_by(t),
            "{t} misses an edge of the input"
        );
        for other in result {
            assert!(
                !(other != t && other.is_subset(t)),
                "{t} contains {other}"
            );
        }
    }
}
