// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Single-source shortest paths by repeated edge relaxation (Bellman-Ford).
//!
//! Full passes over the edge list run until a pass relaxes nothing. A graph
//! without a negative cycle converges within `n - 1` passes; with one it
//! never would, so the run imposes a hard cap of `n` passes and reports the
//! cycle through its summary instead of yielding forever.

use crate::algorithms::{StepRun, SteppingAlgorithm};
use crate::error::EngineError;
use crate::graph::{Edge, InputGraph, Node, NodeEdgeList};
use crate::params::ParameterDescriptor;
use crate::step::Step;
use serde::Serialize;

pub struct Ford;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FordNodeAttr {
    /// `None` plays the role of +infinity.
    pub dist: Option<i64>,
    pub visited: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FordEdgeAttr {
    pub weight: i64,
    pub chosen: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FordSummary {
    pub distances: Vec<Option<i64>>,
    pub negative_cycle: bool,
}

enum State {
    Init,
    ExamineEdge { k: usize },
    RelaxEdge { k: usize },
    PassBoundary,
    PassDecide,
    Final,
    Done,
}

pub struct FordRun {
    n: usize,
    edges: Vec<(usize, usize, i64)>,
    dist: Vec<Option<i64>>,
    visited: Vec<bool>,
    chosen: Vec<bool>,
    changed: bool,
    passes: usize,
    negative_cycle: bool,
    /// Edge marked by the last relax step, cleared on resume.
    pending_unmark: Option<usize>,
    state: State,
    summary: Option<FordSummary>,
}

impl FordRun {
    fn new(graph: &InputGraph, source: usize) -> Self {
        let n = graph.node_count();
        let edges: Vec<(usize, usize, i64)> = graph
            .edges()
            .iter()
            .map(|e| (e.source, e.target, e.datum.weight))
            .collect();
        let mut dist = vec![None; n];
        dist[source] = Some(0);
        Self {
            n,
            chosen: vec![false; edges.len()],
            edges,
            dist,
            visited: vec![false; n],
            changed: false,
            passes: 0,
            negative_cycle: false,
            pending_unmark: None,
            state: State::Init,
            summary: None,
        }
    }

    fn snapshot(&self) -> NodeEdgeList<FordNodeAttr, FordEdgeAttr> {
        let nodes = (0..self.n)
            .map(|id| Node {
                id,
                datum: FordNodeAttr {
                    dist: self.dist[id],
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
                datum: FordEdgeAttr {
                    weight,
                    chosen: self.chosen[idx],
                },
            })
            .collect();
        NodeEdgeList::new(nodes, edges, true)
    }

    fn step(&self, line: usize) -> Step<FordNodeAttr, FordEdgeAttr> {
        Step::at_pseudo(self.snapshot(), line)
    }
}

impl Iterator for FordRun {
    type Item = Step<FordNodeAttr, FordEdgeAttr>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(k) = self.pending_unmark.take() {
            let (source, target, _) = self.edges[k];
            self.chosen[k] = false;
            self.visited[source] = false;
            self.visited[target] = false;
        }
        loop {
            match self.state {
                State::Init => {
                    self.state = State::ExamineEdge { k: 0 };
                    return Some(self.step(0));
                }
                State::ExamineEdge { k } => {
                    if k >= self.edges.len() {
                        self.state = State::PassBoundary;
                        return Some(self.step(1));
                    }
                    self.state = State::RelaxEdge { k };
                    return Some(self.step(1));
                }
                State::RelaxEdge { k } => {
                    let (source, target, weight) = self.edges[k];
                    self.chosen[k] = true;
                    self.visited[source] = true;
                    self.visited[target] = true;
                    if let Some(ds) = self.dist[source] {
                        let candidate = ds + weight;
                        if self.dist[target].map_or(true, |dt| candidate < dt) {
                            self.dist[target] = Some(candidate);
                            self.changed = true;
                        }
                    }
                    self.pending_unmark = Some(k);
                    self.state = State::ExamineEdge { k: k + 1 };
                    return Some(self.step(2));
                }
                State::PassBoundary => {
                    self.state = State::PassDecide;
                    return Some(self.step(3));
                }
                State::PassDecide => {
                    if !self.changed {
                        self.state = State::Final;
                        continue;
                    }
                    self.passes += 1;
                    if self.passes >= self.n {
                        // still relaxing after n full passes: negative cycle
                        self.negative_cycle = true;
                        tracing::debug!(passes = self.passes, "relaxation pass cap hit");
                        self.state = State::Final;
                        continue;
                    }
                    self.changed = false;
                    self.state = State::ExamineEdge { k: 0 };
                }
                State::Final => {
                    self.state = State::Done;
                    self.summary = Some(FordSummary {
                        distances: self.dist.clone(),
                        negative_cycle: self.negative_cycle,
                    });
                    return Some(self.step(4));
                }
                State::Done => return None,
            }
        }
    }
}

impl StepRun for FordRun {
    type NodeAttr = FordNodeAttr;
    type EdgeAttr = FordEdgeAttr;
    type Summary = FordSummary;

    fn summary(&self) -> Option<&FordSummary> {
        self.summary.as_ref()
    }
}

impl SteppingAlgorithm for Ford {
    type NodeAttr = FordNodeAttr;
    type EdgeAttr = FordEdgeAttr;
    type Summary = FordSummary;
    type Run = FordRun;

    fn id() -> &'static str {
        "sssp_ford"
    }

    fn category() -> &'static str {
        "SSSP"
    }

    fn description() -> &'static str {
        "Bellman-Ford style relaxation to a shortest-path fixpoint"
    }

    fn parameters() -> Vec<ParameterDescriptor> {
        vec![ParameterDescriptor::node_index("start_point")]
    }

    fn start(graph: &InputGraph, params: &[i64]) -> Result<Self::Run, EngineError> {
        Ok(FordRun::new(graph, params[0] as usize))
    }
}
