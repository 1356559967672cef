// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Minimum spanning tree via Kruskal's algorithm.
//!
//! Edges are stable-sorted ascending by weight and considered in order; a
//! path-compressing union-find detects cycle formation. The run stops early
//! once `n - 1` edges are accepted; a disconnected graph yields a spanning
//! forest with fewer accepted edges.

use crate::algorithms::{StepRun, SteppingAlgorithm};
use crate::error::EngineError;
use crate::graph::{AdjacencyMatrix, Edge, Graph, InputGraph, Node, NodeEdgeList};
use crate::step::Step;
use serde::Serialize;

pub struct Kruskal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KruskalEdgeAttr {
    pub weight: i64,
    /// 0 = untouched, 1 = accepted, 2 = under consideration, 3 = processed.
    pub chosen: u8,
}

enum State {
    Consider { k: usize },
    Decide { k: usize },
    Final,
    Done,
}

pub struct KruskalRun {
    n: usize,
    edges: Vec<(usize, usize, i64)>,
    chosen: Vec<u8>,
    /// Edge indices in ascending weight order (stable sort).
    order: Vec<usize>,
    father: Vec<usize>,
    counter: usize,
    state: State,
}

impl KruskalRun {
    fn new(graph: &InputGraph) -> Self {
        // undirected view regardless of the input's own flag
        let matrix = AdjacencyMatrix::from_graph(graph, false);
        let n = matrix.node_count();
        let edges: Vec<(usize, usize, i64)> = matrix
            .edges()
            .iter()
            .map(|e| (e.source, e.target, e.datum.weight))
            .collect();
        let mut order: Vec<usize> = (0..edges.len()).collect();
        order.sort_by_key(|&idx| edges[idx].2);
        Self {
            n,
            chosen: vec![0; edges.len()],
            edges,
            order,
            father: (0..n).collect(),
            counter: 0,
            state: State::Consider { k: 0 },
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.father[x] != x {
            self.father[x] = self.father[self.father[x]];
            x = self.father[x];
        }
        x
    }

    fn snapshot(&self) -> NodeEdgeList<(), KruskalEdgeAttr> {
        let nodes = (0..self.n).map(|id| Node { id, datum: () }).collect();
        let edges = self
            .edges
            .iter()
            .enumerate()
            .map(|(idx, &(source, target, weight))| Edge {
                source,
                target,
                datum: KruskalEdgeAttr {
                    weight,
                    chosen: self.chosen[idx],
                },
            })
            .collect();
        NodeEdgeList::new(nodes, edges, false)
    }

    fn step(&self, line: usize) -> Step<(), KruskalEdgeAttr> {
        Step::at_pseudo(self.snapshot(), line)
    }
}

impl Iterator for KruskalRun {
    type Item = Step<(), KruskalEdgeAttr>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.state {
                State::Consider { k } => {
                    if k >= self.order.len() {
                        self.state = State::Final;
                        continue;
                    }
                    self.chosen[self.order[k]] = 2;
                    self.state = State::Decide { k };
                    return Some(self.step(0));
                }
                State::Decide { k } => {
                    let idx = self.order[k];
                    let (source, target, _) = self.edges[idx];
                    let root_s = self.find(source);
                    let root_t = self.find(target);
                    if root_s != root_t {
                        self.father[root_s] = root_t;
                        self.counter += 1;
                        self.chosen[idx] = 1;
                    }
                    for c in self.chosen.iter_mut() {
                        if *c == 2 {
                            *c = 3;
                        }
                    }
                    self.state = if self.n > 0 && self.counter == self.n - 1 {
                        State::Final
                    } else {
                        State::Consider { k: k + 1 }
                    };
                    return Some(self.step(1));
                }
                State::Final => {
                    self.state = State::Done;
                    tracing::debug!(accepted = self.counter, "kruskal done");
                    return Some(self.step(2));
                }
                State::Done => return None,
            }
        }
    }
}

impl StepRun for KruskalRun {
    type NodeAttr = ();
    type EdgeAttr = KruskalEdgeAttr;
    type Summary = ();

    fn summary(&self) -> Option<&()> {
        match self.state {
            State::Done => Some(&()),
            _ => None,
        }
    }
}

impl SteppingAlgorithm for Kruskal {
    type NodeAttr = ();
    type EdgeAttr = KruskalEdgeAttr;
    type Summary = ();
    type Run = KruskalRun;

    fn id() -> &'static str {
        "mst_kruskal"
    }

    fn category() -> &'static str {
        "MST"
    }

    fn description() -> &'static str {
        "Kruskal's minimum spanning tree via union-find"
    }

    fn start(graph: &InputGraph, _params: &[i64]) -> Result<Self::Run, EngineError> {
        Ok(KruskalRun::new(graph))
    }
}
