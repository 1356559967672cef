// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Critical path: topological sort plus longest path in a DAG.
//!
//! Phase 1 repeatedly peels in-degree-zero nodes (Kahn's algorithm),
//! assigning topological indices. Phase 2 walks nodes in topological order
//! and relaxes outgoing edges with `dist[v] = max(dist[v], dist[u] + w)`.
//! Cyclic input is not rejected: unpeeled nodes keep `topo_sequence == -1`
//! and phase 2 walks only the assigned prefix.

use crate::algorithms::{StepRun, SteppingAlgorithm};
use crate::error::EngineError;
use crate::graph::{AdjacencyMatrix, Edge, Graph, InputGraph, Node, NodeEdgeList};
use crate::step::Step;
use fxhash::FxHashMap;
use serde::Serialize;

pub struct CriticalPath;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CriticalPathNodeAttr {
    pub degree: i64,
    pub dist: i64,
    pub topo_sequence: i64,
    /// 0 = unseen, 1 = topologically numbered, 2 = relaxed in phase 2.
    pub visited: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CriticalPathEdgeAttr {
    pub weight: i64,
    pub visited: bool,
}

enum State {
    Phase1Scan { t: usize, i: usize },
    Phase1Edges { t: usize, i: usize },
    Phase2Enter { i: usize },
    Phase2Relax { i: usize },
    Final,
    Done,
}

pub struct CriticalPathRun {
    n: usize,
    weights: Vec<Vec<Option<i64>>>,
    degree: Vec<i64>,
    dist: Vec<i64>,
    topo_sequence: Vec<i64>,
    visited: Vec<u8>,
    edges: Vec<(usize, usize, i64)>,
    edge_visited: Vec<bool>,
    edge_index: FxHashMap<(usize, usize), usize>,
    topo: Vec<usize>,
    counter: usize,
    state: State,
}

impl CriticalPathRun {
    fn new(graph: &InputGraph) -> Self {
        let matrix = AdjacencyMatrix::from_graph(graph, true);
        let n = matrix.node_count();
        let weights: Vec<Vec<Option<i64>>> = matrix
            .mat()
            .iter()
            .map(|row| row.iter().map(|c| c.as_ref().map(|w| w.weight)).collect())
            .collect();
        let edges: Vec<(usize, usize, i64)> = matrix
            .edges()
            .iter()
            .map(|e| (e.source, e.target, e.datum.weight))
            .collect();
        let mut edge_index = FxHashMap::default();
        for (idx, &(s, t, _)) in edges.iter().enumerate() {
            edge_index.insert((s, t), idx);
        }
        let mut degree = vec![0i64; n];
        for &(_, target, _) in &edges {
            degree[target] += 1;
        }
        Self {
            n,
            weights,
            degree,
            dist: vec![0; n],
            topo_sequence: vec![-1; n],
            visited: vec![0; n],
            edge_visited: vec![false; edges.len()],
            edges,
            edge_index,
            topo: Vec::new(),
            counter: 0,
            state: State::Phase1Scan { t: 0, i: 0 },
        }
    }

    fn snapshot(&self) -> NodeEdgeList<CriticalPathNodeAttr, CriticalPathEdgeAttr> {
        let nodes = (0..self.n)
            .map(|id| Node {
                id,
                datum: CriticalPathNodeAttr {
                    degree: self.degree[id],
                    dist: self.dist[id],
                    topo_sequence: self.topo_sequence[id],
                    visited: self.visited[id],
                },
            })
            .collect();
        let edges = self
            .edges
            .iter()
            .enumerate()
            .map(|(idx, &(source, target, weight))| Edge {
                source,
                target,
                datum: CriticalPathEdgeAttr {
                    weight,
                    visited: self.edge_visited[idx],
                },
            })
            .collect();
        NodeEdgeList::new(nodes, edges, true)
    }

    fn step(&self, line: usize) -> Step<CriticalPathNodeAttr, CriticalPathEdgeAttr> {
        Step::at_pseudo(self.snapshot(), line)
    }

    fn mark_edge(&mut self, source: usize, target: usize) {
        if let Some(&idx) = self.edge_index.get(&(source, target)) {
            self.edge_visited[idx] = true;
        }
    }
}

impl Iterator for CriticalPathRun {
    type Item = Step<CriticalPathNodeAttr, CriticalPathEdgeAttr>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.state {
                State::Phase1Scan { t, i } => {
                    if t >= self.n {
                        // phase boundary: forget phase-1 edge markings
                        self.edge_visited.fill(false);
                        self.state = State::Phase2Enter { i: 0 };
                        return Some(self.step(2));
                    }
                    if i >= self.n {
                        self.state = State::Phase1Scan { t: t + 1, i: 0 };
                        continue;
                    }
                    if self.visited[i] == 0 && self.degree[i] == 0 {
                        self.topo_sequence[i] = self.counter as i64;
                        self.visited[i] = 1;
                        self.topo.push(i);
                        self.counter += 1;
                        self.state = State::Phase1Edges { t, i };
                        return Some(self.step(0));
                    }
                    self.state = State::Phase1Scan { t, i: i + 1 };
                }
                State::Phase1Edges { t, i } => {
                    for j in 0..self.n {
                        if self.weights[i][j].is_some() {
                            self.degree[j] -= 1;
                            self.mark_edge(i, j);
                        }
                    }
                    self.state = State::Phase1Scan { t, i: i + 1 };
                    return Some(self.step(1));
                }
                State::Phase2Enter { i } => {
                    if i >= self.topo.len() {
                        self.state = State::Final;
                        continue;
                    }
                    self.state = State::Phase2Relax { i };
                    return Some(self.step(3));
                }
                State::Phase2Relax { i } => {
                    let u = self.topo[i];
                    self.visited[u] = 2;
                    for j in (i + 1)..self.topo.len() {
                        let v = self.topo[j];
                        if let Some(w) = self.weights[u][v] {
                            if self.dist[u] + w > self.dist[v] {
                                self.dist[v] = self.dist[u] + w;
                            }
                            self.mark_edge(u, v);
                        }
                    }
                    self.state = State::Phase2Enter { i: i + 1 };
                    return Some(self.step(4));
                }
                State::Final => {
                    self.state = State::Done;
                    tracing::debug!(nodes = self.n, ordered = self.counter, "critical path done");
                    return Some(self.step(5));
                }
                State::Done => return None,
            }
        }
    }
}

impl StepRun for CriticalPathRun {
    type NodeAttr = CriticalPathNodeAttr;
    type EdgeAttr = CriticalPathEdgeAttr;
    type Summary = ();

    fn summary(&self) -> Option<&()> {
        match self.state {
            State::Done => Some(&()),
            _ => None,
        }
    }
}

impl SteppingAlgorithm for CriticalPath {
    type NodeAttr = CriticalPathNodeAttr;
    type EdgeAttr = CriticalPathEdgeAttr;
    type Summary = ();
    type Run = CriticalPathRun;

    fn id() -> &'static str {
        "cp"
    }

    fn category() -> &'static str {
        "CriticalPath"
    }

    fn description() -> &'static str {
        "Topological sort and longest path in a weighted DAG"
    }

    fn start(graph: &InputGraph, _params: &[i64]) -> Result<Self::Run, EngineError> {
        Ok(CriticalPathRun::new(graph))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::launch;
    use crate::graph::NodeEdgeList;

    fn diamond() -> NodeEdgeList<(), crate::graph::WeightAttr> {
        // 0 -> 1 (1), 0 -> 2 (3), 1 -> 3 (2), 2 -> 3 (1)
        NodeEdgeList::from_weighted(4, &[(0, 1, 1), (0, 2, 3), (1, 3, 2), (2, 3, 1)], true)
    }

    fn last_step(run: CriticalPathRun) -> Step<CriticalPathNodeAttr, CriticalPathEdgeAttr> {
        let mut last = None;
        for step in run {
            last = Some(step);
        }
        last.unwrap()
    }

    #[test]
    fn test_topological_order_respects_edges() {
        let graph = diamond();
        let run = launch::<CriticalPath>(&graph, &[]).unwrap();
        let step = last_step(run);
        let seq: Vec<i64> = step
            .graph
            .nodes()
            .iter()
            .map(|n| n.datum.topo_sequence)
            .collect();
        for edge in step.graph.edges() {
            assert!(seq[edge.source] < seq[edge.target]);
        }
        assert!(seq.iter().all(|&s| s >= 0));
    }

    #[test]
    fn test_longest_path_distances() {
        let graph = diamond();
        let run = launch::<CriticalPath>(&graph, &[]).unwrap();
        let step = last_step(run);
        let dist: Vec<i64> = step.graph.nodes().iter().map(|n| n.datum.dist).collect();
        assert_eq!(dist, vec![0, 1, 3, 4]);
    }

    #[test]
    fn test_step_lines_follow_the_listing() {
        let graph = diamond();
        let run = launch::<CriticalPath>(&graph, &[]).unwrap();
        let lines: Vec<usize> = run.map(|s| s.code_position["pseudo"]).collect();
        // 4 nodes peeled (two yields each), boundary, 4 relaxations (two
        // yields each), final
        assert_eq!(lines.len(), 4 * 2 + 1 + 4 * 2 + 1);
        assert_eq!(lines[0], 0);
        assert_eq!(lines[8], 2);
        assert_eq!(*lines.last().unwrap(), 5);
    }

    #[test]
    fn test_cyclic_input_leaves_nodes_unnumbered() {
        let graph = NodeEdgeList::from_weighted(3, &[(0, 1, 1), (1, 2, 1), (2, 1, 1)], true);
        let run = launch::<CriticalPath>(&graph, &[]).unwrap();
        let step = last_step(run);
        let seq: Vec<i64> = step
            .graph
            .nodes()
            .iter()
            .map(|n| n.datum.topo_sequence)
            .collect();
        assert_eq!(seq[0], 0);
        assert_eq!(seq[1], -1);
        assert_eq!(seq[2], -1);
    }
}
