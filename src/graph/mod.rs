// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Graph data model.
//!
//! Three interchangeable representations with identical semantics:
//!
//! - [`AdjacencyMatrix`]: n×n cells, each absent or holding the edge datum.
//! - [`AdjacencyList`]: canonical edge array plus per-node oriented adjacency.
//!   Primary structure for traversal algorithms.
//! - [`NodeEdgeList`]: immutable flat snapshot, used as the payload of a
//!   `Step` and never mutated once built.
//!
//! Node ids are dense `0..n` and the node count is fixed for the lifetime of
//! one algorithm run. Attributes are tagged structs selected per algorithm,
//! not an open map; conversions preserve `(source, target, datum)` value
//! identity for every surviving edge.

mod convert;
mod list;
mod matrix;
mod snapshot;

pub use convert::{has_multiple_edges, has_self_loop};
pub use list::AdjacencyList;
pub use matrix::AdjacencyMatrix;
pub use snapshot::NodeEdgeList;

use serde::Serialize;

/// A node with a dense id and an algorithm-tagged attribute struct.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node<N> {
    pub id: usize,
    pub datum: N,
}

/// An edge between node ids. For undirected graphs each logical edge is
/// represented once; traversal logic treats `source`/`target` symmetrically.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge<E> {
    pub source: usize,
    pub target: usize,
    pub datum: E,
}

/// Edge attributes on caller-supplied input graphs: just a weight.
///
/// Unweighted inputs use the `Default` weight of 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct WeightAttr {
    pub weight: i64,
}

impl WeightAttr {
    pub fn new(weight: i64) -> Self {
        Self { weight }
    }
}

/// Capability set shared by all graph representations.
pub trait Graph {
    type NodeAttr: Clone;
    type EdgeAttr: Clone;

    fn directed(&self) -> bool;

    fn node_count(&self) -> usize;

    /// Nodes in id order.
    fn nodes(&self) -> &[Node<Self::NodeAttr>];

    /// Edges in the representation's canonical order. Derived by a matrix
    /// scan for `AdjacencyMatrix`; stored order elsewhere.
    fn edges(&self) -> Vec<Edge<Self::EdgeAttr>>;
}

/// Caller-supplied input graphs: unit node attributes, a weight per edge.
pub type InputGraph = dyn Graph<NodeAttr = (), EdgeAttr = WeightAttr>;
