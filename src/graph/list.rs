// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Adjacency-list representation.

use crate::graph::{Edge, Graph, Node};

/// Canonical edge array plus per-node oriented adjacency.
///
/// Each adjacency entry is `(neighbor, edge index)` into the canonical array,
/// so in-place mutation of an edge datum stays visible from both endpoints.
/// Undirected graphs index every edge from both sides; the canonical array
/// still holds each logical edge once.
#[derive(Debug, Clone)]
pub struct AdjacencyList<N, E> {
    nodes: Vec<Node<N>>,
    edges: Vec<Edge<E>>,
    adj: Vec<Vec<(usize, usize)>>,
    directed: bool,
}

impl<N: Clone, E: Clone> AdjacencyList<N, E> {
    /// Convert any representation into a list, forcing `directed`.
    pub fn from_graph<G>(graph: &G, directed: bool) -> Self
    where
        G: Graph<NodeAttr = N, EdgeAttr = E> + ?Sized,
    {
        let n = graph.node_count();
        let edges = graph.edges();
        let mut adj: Vec<Vec<(usize, usize)>> = vec![Vec::new(); n];
        for (idx, edge) in edges.iter().enumerate() {
            adj[edge.source].push((edge.target, idx));
            if !directed {
                adj[edge.target].push((edge.source, idx));
            }
        }
        Self {
            nodes: graph.nodes().to_vec(),
            edges,
            adj,
            directed,
        }
    }

    /// Oriented adjacency of a node: `(neighbor, canonical edge index)`.
    ///
    /// Primary query used by traversal algorithms.
    pub fn adjacent(&self, node: usize) -> &[(usize, usize)] {
        &self.adj[node]
    }

    pub fn edge(&self, idx: usize) -> &Edge<E> {
        &self.edges[idx]
    }
}

impl<N: Clone, E: Clone> Graph for AdjacencyList<N, E> {
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
