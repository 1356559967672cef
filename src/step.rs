// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! One externally observable snapshot of algorithm progress.

use crate::graph::NodeEdgeList;
use fxhash::FxHashMap;
use serde::Serialize;
use serde_json::Value;

/// Display suggestion for an [`ExtraDatum`] value. Renderers may ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayHint {
    Number,
    Array,
    List,
    Map,
    Stack,
}

/// Auxiliary scalar/array display datum: `(label, hint, value)`.
///
/// Labels may carry display formatting (math notation) and must not be used
/// for programmatic logic. Count and order are stable for a given run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtraDatum {
    pub label: &'static str,
    pub hint: DisplayHint,
    pub value: Value,
}

impl ExtraDatum {
    pub fn new(label: &'static str, hint: DisplayHint, value: Value) -> Self {
        Self { label, hint, value }
    }
}

/// One discrete frame of a stepping run.
///
/// A `Step` is a value object: the graph snapshot is rebuilt from the
/// algorithm's private state at every yield, so later mutation never reaches
/// an already observed step. `code_position` maps named pseudocode listings
/// to a current line index; multiple concurrent listings are permitted.
#[derive(Debug, Clone, Serialize)]
pub struct Step<N, E> {
    pub graph: NodeEdgeList<N, E>,
    pub code_position: FxHashMap<&'static str, usize>,
    pub extra: Vec<ExtraDatum>,
}

impl<N: Clone, E: Clone> Step<N, E> {
    /// Step at line `line` of the `"pseudo"` listing, no extra data.
    pub fn at_pseudo(graph: NodeEdgeList<N, E>, line: usize) -> Self {
        let mut code_position = FxHashMap::default();
        code_position.insert("pseudo", line);
        Self {
            graph,
            code_position,
            extra: Vec::new(),
        }
    }

    pub fn with_extra(mut self, extra: Vec<ExtraDatum>) -> Self {
        self.extra = extra;
        self
    }
}
