// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Structural predicates over representations.
//!
//! These are preconditions checked by individual algorithms, not graph-model
//! constraints: a representation may legitimately hold self loops or parallel
//! edges.

use crate::graph::{AdjacencyList, Graph};
use fxhash::FxHashSet;

/// True iff any edge has `source == target`.
pub fn has_self_loop<G: Graph + ?Sized>(graph: &G) -> bool {
    graph.edges().iter().any(|e| e.source == e.target)
}

/// True iff any ordered `(source, target)` pair appears more than once in
/// the oriented adjacency. On an undirected list a self loop also counts,
/// since it is indexed twice from the same endpoint.
pub fn has_multiple_edges<N: Clone, E: Clone>(list: &AdjacencyList<N, E>) -> bool {
    let mut seen = FxHashSet::default();
    for u in 0..list.node_count() {
        seen.clear();
        for &(v, _) in list.adjacent(u) {
            if !seen.insert(v) {
                return true;
            }
        }
    }
    false
}
