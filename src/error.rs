// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

use thiserror::Error;

/// Errors surfaced before a stepping run produces its first `Step`.
///
/// Two tiers: parameter validation failures (recoverable, the caller
/// re-prompts for input) and structural precondition failures (the graph has
/// the wrong shape for the algorithm). Once a run is started, failures are
/// not expected and are not caught.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EngineError {
    #[error("parameter '{name}' is not an integer")]
    NotAnInteger { name: &'static str },

    #[error("parameter '{name}' must be in [{lower}, {upper})")]
    OutOfRange {
        name: &'static str,
        lower: i64,
        upper: i64,
    },

    #[error("expected {expected} parameters, got {actual}")]
    ParameterCount { expected: usize, actual: usize },

    #[error("unknown algorithm '{id}'")]
    UnknownAlgorithm { id: String },

    #[error("graph has a self loop")]
    SelfLoop,

    #[error("graph has multiple edges")]
    MultipleEdges,

    #[error("flow endpoints must be distinct")]
    IdenticalEndpoints,
}

impl EngineError {
    /// Stable lookup key for an external localization layer. The crate never
    /// produces display text itself.
    pub fn message_key(&self) -> &'static str {
        match self {
            EngineError::NotAnInteger { .. } => "input.error.not_an_integer",
            EngineError::OutOfRange { .. } => "input.error.out_of_range",
            EngineError::ParameterCount { .. } => "input.error.parameter_count",
            EngineError::UnknownAlgorithm { .. } => "input.error.unknown_algorithm",
            EngineError::SelfLoop => "graph.error.self_loop",
            EngineError::MultipleEdges => "graph.error.multiple_edges",
            EngineError::IdenticalEndpoints => "graph.error.identical_endpoints",
        }
    }

    /// Whether the caller can recover by re-prompting for input.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            EngineError::NotAnInteger { .. }
                | EngineError::OutOfRange { .. }
                | EngineError::ParameterCount { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
