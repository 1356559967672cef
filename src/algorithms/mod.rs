// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Core stepping contract and the algorithm implementations.
//!
//! Every algorithm is an explicit state machine: `start` validates the graph
//! shape and freezes the run's private arrays, then each `Iterator::next`
//! call resumes at the prior suspension point and carries the computation to
//! the next designer-chosen yield. Runs are lazy, finite and consumed once;
//! a fresh run is required per consumption because internal state (union-find
//! parents, BFS queues) persists across yields. Dropping a run abandons the
//! rest of the computation; there is nothing to clean up.

use crate::error::EngineError;
use crate::graph::InputGraph;
use crate::params::{parse_params, ParameterDescriptor};
use crate::step::Step;

mod critical_path;
pub use critical_path::{CriticalPath, CriticalPathEdgeAttr, CriticalPathNodeAttr, CriticalPathRun};

mod kruskal;
pub use kruskal::{Kruskal, KruskalEdgeAttr, KruskalRun};

mod ford;
pub use ford::{Ford, FordEdgeAttr, FordNodeAttr, FordRun, FordSummary};

mod residual;
pub use residual::{FlowEdgeAttr, ResidualArc, ResidualNetwork};

mod edmonds_karp;
pub use edmonds_karp::{EdmondsKarp, EdmondsKarpRun, FlowNodeAttr};

mod matching;
pub use matching::{EdmondsGabow, EdmondsGabowRun, MatchingEdgeAttr, MatchingNodeAttr};

/// A started run: a lazy, finite, single-consumption sequence of steps.
pub trait StepRun: Iterator<Item = Step<Self::NodeAttr, Self::EdgeAttr>> {
    type NodeAttr: Clone;
    type EdgeAttr: Clone;
    /// Result available once the sequence is exhausted (e.g. total flow).
    type Summary;

    /// `Some` only after the iterator has returned `None`.
    fn summary(&self) -> Option<&Self::Summary>;
}

/// Contract every stepping algorithm implements.
pub trait SteppingAlgorithm {
    type NodeAttr: Clone;
    type EdgeAttr: Clone;
    type Summary;
    type Run: StepRun<
        NodeAttr = Self::NodeAttr,
        EdgeAttr = Self::EdgeAttr,
        Summary = Self::Summary,
    >;

    /// Stable identifier.
    fn id() -> &'static str;

    fn category() -> &'static str;

    fn description() -> &'static str;

    /// Parameter schema; all parsers must succeed before `start`.
    fn parameters() -> Vec<ParameterDescriptor> {
        Vec::new()
    }

    /// Structural precondition on the graph shape. Failing here aborts the
    /// run with no steps emitted.
    fn precheck(_graph: &InputGraph) -> Result<(), EngineError> {
        Ok(())
    }

    /// Begin a run with already validated parameters, in descriptor order.
    fn start(graph: &InputGraph, params: &[i64]) -> Result<Self::Run, EngineError>;
}

/// Parse raw textual parameters, check the precondition, start the run.
pub fn launch<A: SteppingAlgorithm>(
    graph: &InputGraph,
    raw_params: &[&str],
) -> Result<A::Run, EngineError> {
    let params = parse_params(&A::parameters(), raw_params, graph)?;
    A::precheck(graph)?;
    tracing::debug!(algorithm = A::id(), ?params, "starting run");
    A::start(graph, &params)
}
