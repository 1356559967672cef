// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Raw-text parameter parsing.
//!
//! Every algorithm publishes a list of descriptors; all parsers must succeed
//! before a run is started. Parsers may depend on the graph (bounding an
//! index by node count). Failures carry a localization key only, never
//! display text.

use crate::error::EngineError;
use crate::graph::InputGraph;

type Parser = Box<dyn Fn(&str, &InputGraph) -> Result<i64, EngineError> + Send + Sync>;

/// Named parameter with a graph-aware parser.
pub struct ParameterDescriptor {
    name: &'static str,
    parser: Parser,
}

impl ParameterDescriptor {
    pub fn new<F>(name: &'static str, parser: F) -> Self
    where
        F: Fn(&str, &InputGraph) -> Result<i64, EngineError> + Send + Sync + 'static,
    {
        Self {
            name,
            parser: Box::new(parser),
        }
    }

    /// Integer restricted to `[lower, upper)`, bounds fixed up front.
    pub fn ranged_int(name: &'static str, lower: i64, upper: i64) -> Self {
        Self::new(name, move |text, _| {
            parse_ranged_int(name, text, lower, upper)
        })
    }

    /// Node index restricted to `[0, node_count)` of the graph under edit.
    pub fn node_index(name: &'static str) -> Self {
        Self::new(name, move |text, graph| {
            parse_ranged_int(name, text, 0, graph.node_count() as i64)
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn parse(&self, text: &str, graph: &InputGraph) -> Result<i64, EngineError> {
        (self.parser)(text, graph)
    }
}

impl std::fmt::Debug for ParameterDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParameterDescriptor")
            .field("name", &self.name)
            .finish()
    }
}

/// Check that `text` is an integer in `[lower, upper)`.
pub fn parse_ranged_int(
    name: &'static str,
    text: &str,
    lower: i64,
    upper: i64,
) -> Result<i64, EngineError> {
    let value: i64 = text
        .trim()
        .parse()
        .map_err(|_| EngineError::NotAnInteger { name })?;
    if value < lower || value >= upper {
        return Err(EngineError::OutOfRange { name, lower, upper });
    }
    Ok(value)
}

/// Parse all raw parameters against the descriptors, in order.
pub fn parse_params(
    descriptors: &[ParameterDescriptor],
    raw: &[&str],
    graph: &InputGraph,
) -> Result<Vec<i64>, EngineError> {
    if raw.len() != descriptors.len() {
        return Err(EngineError::ParameterCount {
            expected: descriptors.len(),
            actual: raw.len(),
        });
    }
    descriptors
        .iter()
        .zip(raw)
        .map(|(desc, text)| desc.parse(text, graph))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeEdgeList;

    #[test]
    fn test_ranged_int_accepts_in_range() {
        assert_eq!(parse_ranged_int("p", " 3 ", 0, 6), Ok(3));
        assert_eq!(parse_ranged_int("p", "0", 0, 6), Ok(0));
    }

    #[test]
    fn test_ranged_int_rejects_bad_input() {
        assert_eq!(
            parse_ranged_int("p", "3.5", 0, 6),
            Err(EngineError::NotAnInteger { name: "p" })
        );
        assert_eq!(
            parse_ranged_int("p", "6", 0, 6),
            Err(EngineError::OutOfRange {
                name: "p",
                lower: 0,
                upper: 6
            })
        );
    }

    #[test]
    fn test_node_index_bounds_by_node_count() {
        let graph = NodeEdgeList::from_weighted(4, &[], true);
        let desc = ParameterDescriptor::node_index("start_point");
        assert_eq!(desc.parse("3", &graph), Ok(3));
        assert!(matches!(
            desc.parse("4", &graph),
            Err(EngineError::OutOfRange { upper: 4, .. })
        ));
    }

    #[test]
    fn test_parse_params_checks_arity() {
        let graph = NodeEdgeList::from_weighted(2, &[], true);
        let descs = vec![
            ParameterDescriptor::node_index("source_vertex"),
            ParameterDescriptor::node_index("target_vertex"),
        ];
        assert_eq!(parse_params(&descs, &["0", "1"], &graph), Ok(vec![0, 1]));
        assert_eq!(
            parse_params(&descs, &["0"], &graph),
            Err(EngineError::ParameterCount {
                expected: 2,
                actual: 1
            })
        );
    }
}
