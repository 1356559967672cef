// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Maximum flow via Edmonds-Karp: BFS augmenting paths on the residual
//! arc-pair network.
//!
//! Each phase tags nodes 1 (enqueued), 2 (expanding), 3 (expanded) while
//! searching for the sink; the frontier is deliberately rendered at high
//! step density. On success the path is reconstructed backwards through
//! `pre`/`eid`, the bottleneck `flw[T]` is applied to both arcs of every
//! pair on the path, and the next phase begins. The run ends when a BFS
//! fails to reach the sink.

use crate::algorithms::residual::{FlowEdgeAttr, ResidualNetwork};
use crate::algorithms::{StepRun, SteppingAlgorithm};
use crate::error::EngineError;
use crate::graph::{InputGraph, Node, NodeEdgeList};
use crate::params::ParameterDescriptor;
use crate::step::{DisplayHint, ExtraDatum, Step};
use serde::Serialize;
use serde_json::json;
use std::collections::VecDeque;

pub struct EdmondsKarp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FlowNodeAttr {
    /// 0 = untouched, 1 = in queue, 2 = expanding, 3 = expanded.
    pub tag: u8,
}

enum State {
    BfsInit,
    BfsDequeue,
    BfsArcs { pos: usize, arc: i64 },
    ReachedSink,
    Bottleneck,
    Augment,
    Final,
    Done,
}

pub struct EdmondsKarpRun {
    n: usize,
    source: usize,
    sink: usize,
    net: ResidualNetwork,
    queue: VecDeque<usize>,
    pre: Vec<i64>,
    eid: Vec<i64>,
    flw: Vec<i64>,
    tag: Vec<u8>,
    delta: i64,
    maxflow: i64,
    state: State,
    summary: Option<i64>,
}

impl EdmondsKarpRun {
    fn new(graph: &InputGraph, source: usize, sink: usize) -> Self {
        let n = graph.node_count();
        Self {
            n,
            source,
            sink,
            net: ResidualNetwork::from_graph(graph),
            queue: VecDeque::new(),
            pre: vec![-1; n],
            eid: vec![-1; n],
            flw: vec![i64::MAX; n],
            tag: vec![0; n],
            delta: 0,
            maxflow: 0,
            state: State::BfsInit,
            summary: None,
        }
    }

    fn make_step(&mut self, step_id: usize, clear_mark: bool) -> Step<FlowNodeAttr, FlowEdgeAttr> {
        let nodes = (0..self.n)
            .map(|id| Node {
                id,
                datum: FlowNodeAttr { tag: self.tag[id] },
            })
            .collect();
        let edges = self.net.snapshot_edges(clear_mark);
        Step::at_pseudo(NodeEdgeList::new(nodes, edges, true), step_id + 2).with_extra(vec![
            ExtraDatum::new("$maxflow$", DisplayHint::Number, json!(self.maxflow)),
            ExtraDatum::new("$\\delta$", DisplayHint::Number, json!(self.delta)),
        ])
    }

    /// Highlight the augmenting path recorded by the last BFS.
    fn mark_path(&mut self) {
        self.net.clear_marks();
        let mut pos = self.sink;
        while pos != self.source {
            self.net.arcs[self.eid[pos] as usize].mark = true;
            pos = self.pre[pos] as usize;
        }
    }

    /// Apply the bottleneck along the path: forward arcs lose capacity,
    /// paired reverse arcs gain it.
    fn flip_path(&mut self) {
        let mut pos = self.sink;
        while pos != self.source {
            let arc = self.eid[pos] as usize;
            self.net.arcs[arc].flow -= self.delta;
            self.net.arcs[arc ^ 1].flow += self.delta;
            pos = self.pre[pos] as usize;
        }
    }
}

impl Iterator for EdmondsKarpRun {
    type Item = Step<FlowNodeAttr, FlowEdgeAttr>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.state {
                State::BfsInit => {
                    self.queue.clear();
                    self.pre.fill(-1);
                    self.eid.fill(-1);
                    self.flw.fill(i64::MAX);
                    self.tag.fill(0);
                    self.queue.push_back(self.source);
                    self.tag[self.source] = 1;
                    self.pre[self.source] = 0;
                    self.state = State::BfsDequeue;
                    return Some(self.make_step(1, false));
                }
                State::BfsDequeue => {
                    let Some(pos) = self.queue.pop_front() else {
                        self.state = State::Final;
                        continue;
                    };
                    self.tag[pos] = 2;
                    self.state = if pos == self.sink {
                        State::ReachedSink
                    } else {
                        State::BfsArcs {
                            pos,
                            arc: self.net.head[pos],
                        }
                    };
                    return Some(self.make_step(1, false));
                }
                State::BfsArcs { pos, arc } => {
                    if arc == -1 {
                        self.tag[pos] = 3;
                        self.state = State::BfsDequeue;
                        return Some(self.make_step(1, false));
                    }
                    let idx = arc as usize;
                    let (to, flow, next) =
                        (self.net.arcs[idx].to, self.net.arcs[idx].flow, self.net.arcs[idx].next);
                    if self.pre[to] == -1 && flow > 0 {
                        self.net.arcs[idx].mark = true;
                        self.queue.push_back(to);
                        self.tag[to] = 1;
                        self.pre[to] = pos as i64;
                        self.eid[to] = arc;
                        self.flw[to] = self.flw[pos].min(flow);
                        self.state = State::BfsArcs { pos, arc: next };
                        return Some(self.make_step(1, false));
                    }
                    self.state = State::BfsArcs { pos, arc: next };
                }
                State::ReachedSink => {
                    self.tag.fill(0);
                    self.mark_path();
                    self.state = State::Bottleneck;
                    return Some(self.make_step(1, false));
                }
                State::Bottleneck => {
                    self.delta = self.flw[self.sink];
                    self.maxflow += self.delta;
                    tracing::debug!(delta = self.delta, maxflow = self.maxflow, "augmenting");
                    self.state = State::Augment;
                    return Some(self.make_step(2, false));
                }
                State::Augment => {
                    self.flip_path();
                    let step = self.make_step(3, true);
                    self.delta = 0;
                    self.state = State::BfsInit;
                    return Some(step);
                }
                State::Final => {
                    self.state = State::Done;
                    self.summary = Some(self.maxflow);
                    return Some(self.make_step(4, true));
                }
                State::Done => return None,
            }
        }
    }
}

impl StepRun for EdmondsKarpRun {
    type NodeAttr = FlowNodeAttr;
    type EdgeAttr = FlowEdgeAttr;
    type Summary = i64;

    fn summary(&self) -> Option<&i64> {
        self.summary.as_ref()
    }
}

impl SteppingAlgorithm for EdmondsKarp {
    type NodeAttr = FlowNodeAttr;
    type EdgeAttr = FlowEdgeAttr;
    type Summary = i64;
    type Run = EdmondsKarpRun;

    fn id() -> &'static str {
        "mf_ek"
    }

    fn category() -> &'static str {
        "NetworkFlow"
    }

    fn description() -> &'static str {
        "Edmonds-Karp maximum flow with BFS augmenting paths"
    }

    fn parameters() -> Vec<ParameterDescriptor> {
        vec![
            ParameterDescriptor::node_index("source_vertex"),
            ParameterDescriptor::node_index("target_vertex"),
        ]
    }

    fn start(graph: &InputGraph, params: &[i64]) -> Result<Self::Run, EngineError> {
        let (source, sink) = (params[0] as usize, params[1] as usize);
        if source == sink {
            return Err(EngineError::IdenticalEndpoints);
        }
        Ok(EdmondsKarpRun::new(graph, source, sink))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::launch;
    use crate::graph::NodeEdgeList;

    fn small_network() -> NodeEdgeList<(), crate::graph::WeightAttr> {
        // min cut {0} vs rest = 5
        NodeEdgeList::from_weighted(
            4,
            &[(0, 1, 3), (0, 2, 2), (1, 2, 1), (1, 3, 2), (2, 3, 3)],
            true,
        )
    }

    fn drain(run: &mut EdmondsKarpRun) -> Vec<Step<FlowNodeAttr, FlowEdgeAttr>> {
        let mut steps = Vec::new();
        while let Some(step) = run.next() {
            steps.push(step);
        }
        steps
    }

    #[test]
    fn test_max_flow_value() {
        let graph = small_network();
        let mut run = launch::<EdmondsKarp>(&graph, &["0", "3"]).unwrap();
        drain(&mut run);
        assert_eq!(run.summary(), Some(&5));
    }

    #[test]
    fn test_bottlenecks_are_strictly_positive() {
        let graph = small_network();
        let mut run = launch::<EdmondsKarp>(&graph, &["0", "3"]).unwrap();
        for step in drain(&mut run) {
            // extra[1] is $\delta$; only ever 0 (idle) or positive
            let delta = step.extra[1].value.as_i64().unwrap();
            assert!(delta >= 0);
            if step.code_position["pseudo"] == 4 {
                assert!(delta > 0);
            }
        }
    }

    #[test]
    fn test_unreachable_sink_reports_zero() {
        let graph = NodeEdgeList::from_weighted(3, &[(0, 1, 4)], true);
        let mut run = launch::<EdmondsKarp>(&graph, &["0", "2"]).unwrap();
        drain(&mut run);
        assert_eq!(run.summary(), Some(&0));
    }

    #[test]
    fn test_identical_endpoints_rejected() {
        let graph = small_network();
        assert_eq!(
            launch::<EdmondsKarp>(&graph, &["1", "1"]).err(),
            Some(EngineError::IdenticalEndpoints)
        );
    }

    #[test]
    fn test_final_step_reports_flow_in_extra_data() {
        let graph = small_network();
        let mut run = launch::<EdmondsKarp>(&graph, &["0", "3"]).unwrap();
        let steps = drain(&mut run);
        let last = steps.last().unwrap();
        assert_eq!(last.code_position["pseudo"], 6);
        assert_eq!(last.extra[0].label, "$maxflow$");
        assert_eq!(last.extra[0].value.as_i64(), Some(5));
    }
}
