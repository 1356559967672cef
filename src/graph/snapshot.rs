// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Flat node/edge snapshot.

use crate::graph::{Edge, Graph, Node, WeightAttr};
use serde::Serialize;

/// Immutable flat snapshot: plain node array plus plain edge array.
///
/// Used as the payload of a `Step`. Algorithms rebuild a fresh snapshot for
/// every yield; a snapshot is never mutated once constructed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeEdgeList<N, E> {
    nodes: Vec<Node<N>>,
    edges: Vec<Edge<E>>,
    directed: bool,
}

impl<N: Clone, E: Clone> NodeEdgeList<N, E> {
    pub fn new(nodes: Vec<Node<N>>, edges: Vec<Edge<E>>, directed: bool) -> Self {
        Self {
            nodes,
            edges,
            directed,
        }
    }

    /// Snapshot any representation.
    pub fn from_graph<G>(graph: &G) -> Self
    where
        G: Graph<NodeAttr = N, EdgeAttr = E> + ?Sized,
    {
        Self {
            nodes: graph.nodes().to_vec(),
            edges: graph.edges(),
            directed: graph.directed(),
        }
    }
}

impl NodeEdgeList<(), WeightAttr> {
    /// Input-graph builder from `(source, target, weight)` triples.
    pub fn from_weighted(n: usize, edges: &[(usize, usize, i64)], directed: bool) -> Self {
        let nodes = (0..n).map(|id| Node { id, datum: () }).collect();
        let edges = edges
            .iter()
            .map(|&(source, target, weight)| Edge {
                source,
                target,
                datum: WeightAttr::new(weight),
            })
            .collect();
        Self {
            nodes,
            edges,
            directed,
        }
    }
}

impl<N: Clone, E: Clone> Graph for NodeEdgeList<N, E> {
    type NodeAttr = N;
    type EdgeAttr = E;

    fn directed(&self) -> bool {
        self.directed
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn nodes(&self) -> &[Node<N>] {
        &self.nodes
    }

    fn edges(&self) -> Vec<Edge<E>> {
        self.edges.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_weighted_builds_dense_ids() {
        let g = NodeEdgeList::from_weighted(3, &[(0, 2, 9)], true);
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.nodes()[2].id, 2);
        assert_eq!(g.edges()[0].datum.weight, 9);
    }
}
