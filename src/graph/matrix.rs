// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Adjacency-matrix representation.

use crate::graph::{Edge, Graph, Node};

/// n×n matrix where cell `[i][j]` is either absent or holds the edge datum.
///
/// Undirected graphs store every edge in both `[i][j]` and `[j][i]`; when
/// listing edges only the upper triangle (`i <= j`) is materialized so each
/// logical edge appears once. Conversion into a matrix is lossy for
/// multigraphs: parallel edges collapse into one cell, last write wins.
#[derive(Debug, Clone)]
pub struct AdjacencyMatrix<N, E> {
    nodes: Vec<Node<N>>,
    mat: Vec<Vec<Option<E>>>,
    directed: bool,
}

impl<N: Clone, E: Clone> AdjacencyMatrix<N, E> {
    /// Build from raw cells. Row count fixes the node count; node attributes
    /// take their `Default`.
    pub fn new(mat: Vec<Vec<Option<E>>>, directed: bool) -> Self
    where
        N: Default,
    {
        let nodes = (0..mat.len())
            .map(|id| Node {
                id,
                datum: N::default(),
            })
            .collect();
        Self {
            nodes,
            mat,
            directed,
        }
    }

    /// Convert any representation into a matrix, forcing `directed`.
    ///
    /// Forcing an undirected view of a directed graph mirrors each edge; the
    /// reverse drops nothing but fixes each edge's stored orientation.
    pub fn from_graph<G>(graph: &G, directed: bool) -> Self
    where
        G: Graph<NodeAttr = N, EdgeAttr = E> + ?Sized,
    {
        let n = graph.node_count();
        let mut mat: Vec<Vec<Option<E>>> = vec![vec![None; n]; n];
        for edge in graph.edges() {
            if directed {
                mat[edge.source][edge.target] = Some(edge.datum);
            } else {
                mat[edge.source][edge.target] = Some(edge.datum.clone());
                mat[edge.target][edge.source] = Some(edge.datum);
            }
        }
        Self {
            nodes: graph.nodes().to_vec(),
            mat,
            directed,
        }
    }

    /// Direct cell access for algorithms that index by node pair.
    pub fn cell(&self, i: usize, j: usize) -> Option<&E> {
        self.mat[i][j].as_ref()
    }

    pub fn mat(&self) -> &[Vec<Option<E>>] {
        &self.mat
    }
}

impl<N: Clone, E: Clone> Graph for AdjacencyMatrix<N, E> {
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
        let n = self.nodes.len();
        let mut out = Vec::new();
        for i in 0..n {
            for j in 0..n {
                if !self.directed && j < i {
                    continue;
                }
                if let Some(datum) = &self.mat[i][j] {
                    out.push(Edge {
                        source: i,
                        target: j,
                        datum: datum.clone(),
                    });
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::WeightAttr;

    fn w(weight: i64) -> Option<WeightAttr> {
        Some(WeightAttr::new(weight))
    }

    #[test]
    fn test_directed_edges_scan_row_major() {
        let mat: AdjacencyMatrix<(), WeightAttr> = AdjacencyMatrix::new(
            vec![
                vec![None, w(7), w(1)],
                vec![None, None, None],
                vec![None, w(6), None],
            ],
            true,
        );
        let edges = mat.edges();
        let pairs: Vec<_> = edges.iter().map(|e| (e.source, e.target)).collect();
        assert_eq!(pairs, vec![(0, 1), (0, 2), (2, 1)]);
    }

    #[test]
    fn test_undirected_materializes_upper_triangle_once() {
        let g: AdjacencyMatrix<(), WeightAttr> = AdjacencyMatrix::new(
            vec![
                vec![None, w(5), None],
                vec![w(5), None, w(2)],
                vec![None, w(2), None],
            ],
            false,
        );
        let pairs: Vec<_> = g.edges().iter().map(|e| (e.source, e.target)).collect();
        assert_eq!(pairs, vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn test_from_graph_forces_undirected_mirror() {
        let directed: AdjacencyMatrix<(), WeightAttr> =
            AdjacencyMatrix::new(vec![vec![None, w(3)], vec![None, None]], true);
        let undirected = AdjacencyMatrix::from_graph(&directed, false);
        assert!(undirected.cell(1, 0).is_some());
        assert_eq!(undirected.edges().len(), 1);
    }
}
