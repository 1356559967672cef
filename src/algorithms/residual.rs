// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Residual arc-pair network for flow algorithms.
//!
//! Each logical edge contributes two residual arcs at adjacent indices: the
//! forward arc `2k` starts with the full capacity, the paired reverse arc
//! `2k + 1` (reachable as `i ^ 1`) starts empty. Arcs form per-node linked
//! adjacency lists through `head` and `next`.

use crate::graph::{Edge, InputGraph};
use serde::Serialize;

/// Renderer-facing attributes of one logical flow edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FlowEdgeAttr {
    /// Remaining capacity on the forward arc.
    pub flow: i64,
    /// Flow already pushed through (the reverse arc's gain).
    pub used: i64,
    /// 1 = forward arc highlighted, -1 = reverse arc highlighted, 0 = none.
    pub mark: i8,
}

#[derive(Debug, Clone)]
pub struct ResidualArc {
    pub to: usize,
    /// Remaining capacity of this arc.
    pub flow: i64,
    /// Next arc index in the owning node's list, -1 ends the list.
    pub next: i64,
    pub mark: bool,
}

#[derive(Debug, Clone)]
pub struct ResidualNetwork {
    pub head: Vec<i64>,
    pub arcs: Vec<ResidualArc>,
}

impl ResidualNetwork {
    /// Build from an input graph, taking edge weights as capacities.
    pub fn from_graph(graph: &InputGraph) -> Self {
        let n = graph.node_count();
        let mut net = Self {
            head: vec![-1; n],
            arcs: Vec::with_capacity(graph.edges().len() * 2),
        };
        for edge in graph.edges() {
            net.add_pair(edge.source, edge.target, edge.datum.weight);
        }
        net
    }

    fn add_pair(&mut self, source: usize, target: usize, capacity: i64) {
        self.push_arc(source, target, capacity);
        self.push_arc(target, source, 0);
    }

    fn push_arc(&mut self, from: usize, to: usize, flow: i64) {
        let idx = self.arcs.len() as i64;
        self.arcs.push(ResidualArc {
            to,
            flow,
            next: self.head[from],
            mark: false,
        });
        self.head[from] = idx;
    }

    pub fn clear_marks(&mut self) {
        for arc in &mut self.arcs {
            arc.mark = false;
        }
    }

    /// One rendered edge per arc pair, oriented like the original edge.
    /// With `clear` the marks are dropped before the snapshot is taken.
    pub fn snapshot_edges(&mut self, clear: bool) -> Vec<Edge<FlowEdgeAttr>> {
        if clear {
            self.clear_marks();
        }
        self.arcs
            .chunks_exact(2)
            .map(|pair| {
                let (forward, reverse) = (&pair[0], &pair[1]);
                let mark = if forward.mark {
                    1
                } else if reverse.mark {
                    -1
                } else {
                    0
                };
                Edge {
                    source: reverse.to,
                    target: forward.to,
                    datum: FlowEdgeAttr {
                        flow: forward.flow,
                        used: reverse.flow,
                        mark,
                    },
                }
            })
            .collect()
    }
}
