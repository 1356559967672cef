// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Catalog of built-in algorithms behind a type-erased launch interface.
//!
//! The typed [`SteppingAlgorithm`] API keeps per-algorithm attribute structs
//! and summaries; hosts that select an algorithm by id at runtime go through
//! the registry instead and receive uniform [`StepFrame`]s with the graph
//! already serialized.

use crate::algorithms::{
    self, CriticalPath, EdmondsGabow, EdmondsKarp, Ford, Kruskal, SteppingAlgorithm,
};
use crate::error::EngineError;
use crate::graph::InputGraph;
use crate::step::{ExtraDatum, Step};
use fxhash::FxHashMap;
use serde::Serialize;
use serde_json::Value;
use std::marker::PhantomData;

/// Renderer-facing frame with the attribute types erased.
#[derive(Debug, Clone, Serialize)]
pub struct StepFrame {
    /// Serialized [`NodeEdgeList`](crate::graph::NodeEdgeList):
    /// `directed`, `nodes`, `edges`, each datum a JSON value.
    pub graph: Value,
    pub code_position: FxHashMap<&'static str, usize>,
    pub extra: Vec<ExtraDatum>,
}

impl StepFrame {
    fn from_step<N, E>(step: Step<N, E>) -> Self
    where
        N: Serialize + Clone,
        E: Serialize + Clone,
    {
        Self {
            graph: serde_json::to_value(&step.graph).unwrap_or(Value::Null),
            code_position: step.code_position,
            extra: step.extra,
        }
    }
}

/// Catalog metadata for one registered algorithm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlgorithmInfo {
    pub id: &'static str,
    pub category: &'static str,
    pub description: &'static str,
    pub parameter_names: Vec<&'static str>,
}

trait ErasedAlgorithm: Send + Sync {
    fn info(&self) -> AlgorithmInfo;

    fn launch(
        &self,
        graph: &InputGraph,
        raw_params: &[&str],
    ) -> Result<Box<dyn Iterator<Item = StepFrame>>, EngineError>;
}

struct Entry<A>(PhantomData<fn() -> A>);

impl<A> ErasedAlgorithm for Entry<A>
where
    A: SteppingAlgorithm,
    A::NodeAttr: Serialize + 'static,
    A::EdgeAttr: Serialize + 'static,
    A::Run: 'static,
{
    fn info(&self) -> AlgorithmInfo {
        AlgorithmInfo {
            id: A::id(),
            category: A::category(),
            description: A::description(),
            parameter_names: A::parameters().iter().map(|d| d.name()).collect(),
        }
    }

    fn launch(
        &self,
        graph: &InputGraph,
        raw_params: &[&str],
    ) -> Result<Box<dyn Iterator<Item = StepFrame>>, EngineError> {
        let run = algorithms::launch::<A>(graph, raw_params)?;
        Ok(Box::new(run.map(StepFrame::from_step)))
    }
}

pub struct AlgorithmRegistry {
    algorithms: FxHashMap<&'static str, Box<dyn ErasedAlgorithm>>,
}

impl AlgorithmRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            algorithms: FxHashMap::default(),
        };

        registry.register::<CriticalPath>();
        registry.register::<Kruskal>();
        registry.register::<Ford>();
        registry.register::<EdmondsKarp>();
        registry.register::<EdmondsGabow>();

        registry
    }

    pub fn register<A>(&mut self)
    where
        A: SteppingAlgorithm + 'static,
        A::NodeAttr: Serialize + 'static,
        A::EdgeAttr: Serialize + 'static,
        A::Run: 'static,
    {
        self.algorithms.insert(A::id(), Box::new(Entry::<A>(PhantomData)));
    }

    pub fn info(&self, id: &str) -> Option<AlgorithmInfo> {
        self.algorithms.get(id).map(|entry| entry.info())
    }

    /// All registered algorithms, sorted by id.
    pub fn list(&self) -> Vec<AlgorithmInfo> {
        let mut infos: Vec<AlgorithmInfo> =
            self.algorithms.values().map(|entry| entry.info()).collect();
        infos.sort_by_key(|info| info.id);
        infos
    }

    /// Start a run by id, returning serialized frames.
    pub fn launch(
        &self,
        id: &str,
        graph: &InputGraph,
        raw_params: &[&str],
    ) -> Result<Box<dyn Iterator<Item = StepFrame>>, EngineError> {
        match self.algorithms.get(id) {
            Some(entry) => entry.launch(graph, raw_params),
            None => Err(EngineError::UnknownAlgorithm { id: id.to_string() }),
        }
    }
}

impl Default for AlgorithmRegistry {
    fn default() -> Self {
        Self::new()
    }
}
