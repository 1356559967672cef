// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Maximum matching in general graphs, Edmonds-Gabow style.
//!
//! One search phase per unmatched node: a BFS over alternating paths labels
//! outer nodes 2 and inner nodes 1, keeping for every outer node an explicit
//! alternating path back to the phase root. When the BFS scans an edge
//! between two outer nodes it has closed an odd cycle; the nodes on both
//! sides up to the common base (`first`) are relabeled outer and their paths
//! regenerated through the cycle, which is the blossom-shrinking step in
//! path form. An unlabeled unmatched neighbor completes an augmenting path.
//!
//! Steps are sparse by design: one after setup, two per augmentation (path
//! found, path flipped) and one at the end. The search itself is silent.

use crate::algorithms::{StepRun, SteppingAlgorithm};
use crate::error::EngineError;
use crate::graph::{
    has_multiple_edges, has_self_loop, AdjacencyList, Edge, Graph, InputGraph, Node, NodeEdgeList,
    WeightAttr,
};
use crate::step::{DisplayHint, ExtraDatum, Step};
use serde::Serialize;
use serde_json::json;
use std::collections::VecDeque;

pub struct EdmondsGabow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchingNodeAttr {
    /// Matched partner, -1 when exposed.
    pub mate: i64,
    /// 0 = unlabeled, 1 = inner, 2 = outer.
    pub label: u8,
    /// Base of the blossom this outer node currently belongs to.
    pub first: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchingEdgeAttr {
    pub matched: bool,
    pub marked: bool,
}

enum State {
    Init,
    Seek { root: usize },
    Flip { root: usize, x: usize },
    Final,
    Done,
}

pub struct EdmondsGabowRun {
    n: usize,
    adj: AdjacencyList<(), WeightAttr>,
    edge_pairs: Vec<(usize, usize)>,
    mate: Vec<i64>,
    mark: Vec<i64>,
    label: Vec<u8>,
    first: Vec<i64>,
    /// Alternating path from each outer node back to the phase root.
    /// Slot 0 is reserved for the augmenting endpoint.
    path: Vec<Vec<i64>>,
    visit: Vec<bool>,
    queue: VecDeque<usize>,
    matched: usize,
    state: State,
    summary: Option<usize>,
}

impl EdmondsGabowRun {
    fn new(adj: AdjacencyList<(), WeightAttr>) -> Self {
        let n = adj.node_count();
        let edge_pairs = adj.edges().iter().map(|e| (e.source, e.target)).collect();
        Self {
            n,
            adj,
            edge_pairs,
            mate: vec![-1; n],
            mark: vec![-1; n],
            label: vec![0; n],
            first: vec![-1; n],
            path: vec![Vec::new(); n],
            visit: vec![false; n],
            queue: VecDeque::new(),
            matched: 0,
            state: State::Init,
            summary: None,
        }
    }

    /// Snapshot current labels and matching; marks are one-shot and cleared
    /// after every report.
    fn step(&mut self, line: usize) -> Step<MatchingNodeAttr, MatchingEdgeAttr> {
        let nodes = (0..self.n)
            .map(|id| Node {
                id,
                datum: MatchingNodeAttr {
                    mate: self.mate[id],
                    label: self.label[id],
                    first: self.first[id],
                },
            })
            .collect();
        let edges = self
            .edge_pairs
            .iter()
            .map(|&(source, target)| Edge {
                source,
                target,
                datum: MatchingEdgeAttr {
                    matched: self.mate[source] == target as i64,
                    marked: self.mark[source] == target as i64,
                },
            })
            .collect();
        self.mark.fill(-1);
        Step::at_pseudo(NodeEdgeList::new(nodes, edges, false), line).with_extra(vec![
            ExtraDatum::new("$matched$", DisplayHint::Number, json!(self.matched)),
            ExtraDatum::new("$first$", DisplayHint::Array, json!(self.first)),
        ])
    }

    /// Successor of an outer node along its blossom chain, -1 at the end.
    /// Guards cover chains truncated by a previous phase.
    fn chain_next(&self, pos: usize) -> i64 {
        let mate = self.mate[pos];
        if mate < 0 {
            return -1;
        }
        let through = &self.path[mate as usize];
        if through.len() < 4 || through[3] < 0 {
            return -1;
        }
        self.first[through[3] as usize]
    }

    /// Path to a newly outer node `z`: itself, its mate, then `x`'s path.
    fn extend_path(&mut self, root: usize, x: usize, z: usize) {
        let mut built = vec![-1, z as i64, self.mate[z]];
        let mut i = 1;
        loop {
            let item = self.path[x][i];
            built.push(item);
            if item == root as i64 {
                break;
            }
            i += 1;
        }
        self.path[z] = built;
    }

    /// Path for node `t` inside a freshly closed odd cycle: walk `y`'s path
    /// down to `t`, reverse that prefix, then continue along `z`'s path.
    fn cycle_path(&mut self, root: usize, y: usize, z: usize, t: usize) {
        let mut built = vec![-1i64];
        let mut i = 1;
        loop {
            let item = self.path[y][i];
            built.push(item);
            if item == t as i64 {
                break;
            }
            i += 1;
        }
        built[1..].reverse();
        let mut i = 1;
        loop {
            let item = self.path[z][i];
            built.push(item);
            if item == root as i64 {
                break;
            }
            i += 1;
        }
        self.path[t] = built;
    }

    /// One BFS phase from `root`. On success the augmenting path is stored
    /// in `path[x]` (slot 0 holding the free endpoint) and marked; the
    /// matching itself is not flipped yet.
    fn search(&mut self, root: usize) -> Option<usize> {
        self.label.fill(0);
        self.first.fill(-1);
        for p in &mut self.path {
            p.clear();
        }
        self.queue.clear();

        self.queue.push_back(root);
        self.path[root] = vec![-1, root as i64];
        self.label[root] = 2;

        while let Some(x) = self.queue.pop_front() {
            let neighbors: Vec<usize> = self.adj.adjacent(x).iter().map(|&(y, _)| y).collect();
            for y in neighbors {
                if self.label[y] == 0 {
                    if self.mate[y] == -1 {
                        self.path[x][0] = y as i64;
                        let mut i = 0;
                        loop {
                            let a = self.path[x][i] as usize;
                            self.mark[a] = self.path[x][i ^ 1];
                            if a == root {
                                break;
                            }
                            i += 1;
                        }
                        return Some(x);
                    }
                    let z = self.mate[y] as usize;
                    self.label[y] = 1;
                    self.label[z] = 2;
                    self.first[z] = y as i64;
                    self.queue.push_back(z);
                    self.extend_path(root, x, z);
                } else if self.label[y] == 2 {
                    if self.first[x] == self.first[y] {
                        continue;
                    }
                    // find the cycle base: first common node of both chains
                    let mut base = -1i64;
                    self.visit.fill(false);
                    let mut j = self.first[x];
                    while j != -1 {
                        self.visit[j as usize] = true;
                        j = self.chain_next(j as usize);
                    }
                    let mut j = self.first[y];
                    while j != -1 {
                        if self.visit[j as usize] {
                            base = j;
                            break;
                        }
                        j = self.chain_next(j as usize);
                    }

                    let mut j = self.first[x];
                    while j != base {
                        let ju = j as usize;
                        self.cycle_path(root, x, y, ju);
                        self.label[ju] = 2;
                        self.queue.push_back(ju);
                        self.first[ju] = base;
                        j = self.chain_next(ju);
                    }
                    let mut j = self.first[y];
                    while j != base {
                        let ju = j as usize;
                        self.cycle_path(root, y, x, ju);
                        self.label[ju] = 2;
                        self.queue.push_back(ju);
                        self.first[ju] = base;
                        j = self.chain_next(ju);
                    }

                    for j in 0..self.n {
                        if self.label[j] == 2
                            && self.first[j] >= 0
                            && self.label[self.first[j] as usize] == 2
                        {
                            self.first[j] = base;
                        }
                    }
                }
            }
        }
        None
    }
}

impl Iterator for EdmondsGabowRun {
    type Item = Step<MatchingNodeAttr, MatchingEdgeAttr>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.state {
                State::Init => {
                    self.state = State::Seek { root: 0 };
                    return Some(self.step(23));
                }
                State::Seek { root } => {
                    if root >= self.n {
                        self.state = State::Final;
                        continue;
                    }
                    if self.mate[root] != -1 {
                        self.state = State::Seek { root: root + 1 };
                        continue;
                    }
                    match self.search(root) {
                        Some(x) => {
                            self.state = State::Flip { root, x };
                            return Some(self.step(25));
                        }
                        None => self.state = State::Seek { root: root + 1 },
                    }
                }
                State::Flip { root, x } => {
                    let mut i = 0;
                    loop {
                        let a = self.path[x][i] as usize;
                        self.mate[a] = self.path[x][i ^ 1];
                        if a == root {
                            break;
                        }
                        i += 1;
                    }
                    self.matched += 1;
                    tracing::debug!(root, matched = self.matched, "augmented");
                    self.state = State::Seek { root: root + 1 };
                    return Some(self.step(27));
                }
                State::Final => {
                    self.state = State::Done;
                    self.summary = Some(self.matched);
                    return Some(self.step(28));
                }
                State::Done => return None,
            }
        }
    }
}

impl StepRun for EdmondsGabowRun {
    type NodeAttr = MatchingNodeAttr;
    type EdgeAttr = MatchingEdgeAttr;
    type Summary = usize;

    fn summary(&self) -> Option<&usize> {
        self.summary.as_ref()
    }
}

impl SteppingAlgorithm for EdmondsGabow {
    type NodeAttr = MatchingNodeAttr;
    type EdgeAttr = MatchingEdgeAttr;
    type Summary = usize;
    type Run = EdmondsGabowRun;

    fn id() -> &'static str {
        "mm_gabow"
    }

    fn category() -> &'static str {
        "Matching"
    }

    fn description() -> &'static str {
        "Edmonds-Gabow maximum matching in a general graph"
    }

    fn precheck(graph: &InputGraph) -> Result<(), EngineError> {
        if has_self_loop(graph) {
            return Err(EngineError::SelfLoop);
        }
        Ok(())
    }

    fn start(graph: &InputGraph, _params: &[i64]) -> Result<Self::Run, EngineError> {
        let adj = AdjacencyList::from_graph(graph, false);
        if has_multiple_edges(&adj) {
            return Err(EngineError::MultipleEdges);
        }
        Ok(EdmondsGabowRun::new(adj))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::launch;
    use crate::graph::NodeEdgeList;

    fn run_to_end(graph: &NodeEdgeList<(), WeightAttr>) -> EdmondsGabowRun {
        let mut run = launch::<EdmondsGabow>(graph, &[]).unwrap();
        while run.next().is_some() {}
        run
    }

    fn complete_graph(n: usize) -> NodeEdgeList<(), WeightAttr> {
        let mut edges = Vec::new();
        for i in 0..n {
            for j in (i + 1)..n {
                edges.push((i, j, 1));
            }
        }
        NodeEdgeList::from_weighted(n, &edges, false)
    }

    #[test]
    fn test_complete_graph_matching_size() {
        assert_eq!(run_to_end(&complete_graph(5)).summary(), Some(&2));
        assert_eq!(run_to_end(&complete_graph(6)).summary(), Some(&3));
    }

    #[test]
    fn test_path_graph_matches_alternate_edges() {
        let graph = NodeEdgeList::from_weighted(4, &[(0, 1, 1), (1, 2, 1), (2, 3, 1)], false);
        let run = run_to_end(&graph);
        assert_eq!(run.summary(), Some(&2));
        assert_eq!(run.mate, vec![1, 0, 3, 2]);
    }

    #[test]
    fn test_odd_cycle_needs_blossom_handling() {
        // C5: any maximum matching has exactly two edges
        let graph = NodeEdgeList::from_weighted(
            5,
            &[(0, 1, 1), (1, 2, 1), (2, 3, 1), (3, 4, 1), (4, 0, 1)],
            false,
        );
        assert_eq!(run_to_end(&graph).summary(), Some(&2));
    }

    #[test]
    fn test_blossom_with_stem_augments_through_cycle() {
        // triangle 1-2-3 reached through the stem 0-1, tail 3-4; the
        // augmenting path must pass through the shrunken cycle
        let graph = NodeEdgeList::from_weighted(
            5,
            &[(1, 2, 1), (2, 3, 1), (3, 1, 1), (0, 1, 1), (3, 4, 1)],
            false,
        );
        let run = run_to_end(&graph);
        assert_eq!(run.summary(), Some(&2));
    }

    #[test]
    fn test_mate_is_an_involution() {
        let run = run_to_end(&complete_graph(7));
        for (i, &m) in run.mate.iter().enumerate() {
            if m >= 0 {
                assert_eq!(run.mate[m as usize], i as i64);
            }
        }
    }

    #[test]
    fn test_self_loop_rejected() {
        let graph = NodeEdgeList::from_weighted(3, &[(0, 1, 1), (2, 2, 1)], false);
        assert_eq!(
            launch::<EdmondsGabow>(&graph, &[]).err(),
            Some(EngineError::SelfLoop)
        );
    }

    #[test]
    fn test_multiple_edges_rejected() {
        let graph = NodeEdgeList::from_weighted(3, &[(0, 1, 1), (0, 1, 2)], false);
        assert_eq!(
            launch::<EdmondsGabow>(&graph, &[]).err(),
            Some(EngineError::MultipleEdges)
        );
    }

    #[test]
    fn test_step_lines_per_augmentation() {
        let graph = NodeEdgeList::from_weighted(2, &[(0, 1, 1)], false);
        let run = launch::<EdmondsGabow>(&graph, &[]).unwrap();
        let lines: Vec<usize> = run.map(|s| s.code_position["pseudo"]).collect();
        assert_eq!(lines, vec![23, 25, 27, 28]);
    }
}
