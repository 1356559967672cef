// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Graph representations and stepping algorithm runs.
//!
//! The crate pairs a small graph data model with a stepping protocol:
//! each algorithm runs to completion as an [`Iterator`] of [`Step`]s, one
//! per semantically meaningful mutation, carrying a full graph snapshot so
//! an external observer can render an animation frame per step. Rendering,
//! input widgets and localization live outside the crate; errors carry
//! stable message keys instead of display text.
//!
//! Typed entry point:
//!
//! ```
//! use stepgraph::algorithms::{launch, Kruskal, StepRun};
//! use stepgraph::graph::NodeEdgeList;
//!
//! let graph = NodeEdgeList::from_weighted(3, &[(0, 1, 1), (1, 2, 2), (0, 2, 10)], false);
//! let mut run = launch::<Kruskal>(&graph, &[]).unwrap();
//! while let Some(step) = run.next() {
//!     let _frame = &step.graph;
//! }
//! assert!(run.summary().is_some());
//! ```
//!
//! Hosts selecting an algorithm by id at runtime use
//! [`AlgorithmRegistry`](registry::AlgorithmRegistry), which erases the
//! per-algorithm attribute types into serialized [`StepFrame`]s.

pub mod algorithms;
pub mod error;
pub mod graph;
pub mod params;
pub mod registry;
pub mod step;

pub use error::{EngineError, Result};
pub use graph::{AdjacencyList, AdjacencyMatrix, Edge, Graph, InputGraph, Node, NodeEdgeList, WeightAttr};
pub use params::ParameterDescriptor;
pub use registry::{AlgorithmInfo, AlgorithmRegistry, StepFrame};
pub use step::{DisplayHint, ExtraDatum, Step};
