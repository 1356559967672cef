// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! End-to-end runs of every built-in algorithm through the registry.

use stepgraph::algorithms::{launch, Ford, StepRun};
use stepgraph::graph::NodeEdgeList;
use stepgraph::registry::{AlgorithmRegistry, StepFrame};
use stepgraph::EngineError;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn frames(
    registry: &AlgorithmRegistry,
    id: &str,
    graph: &NodeEdgeList<(), stepgraph::WeightAttr>,
    params: &[&str],
) -> Vec<StepFrame> {
    registry.launch(id, graph, params).unwrap().collect()
}

#[test]
fn test_every_builtin_runs_to_exhaustion() {
    init_tracing();
    let registry = AlgorithmRegistry::new();
    let directed = NodeEdgeList::from_weighted(
        4,
        &[(0, 1, 3), (0, 2, 2), (1, 2, 1), (1, 3, 2), (2, 3, 3)],
        true,
    );
    let undirected = NodeEdgeList::from_weighted(
        4,
        &[(0, 1, 3), (0, 2, 2), (1, 2, 1), (1, 3, 2), (2, 3, 3)],
        false,
    );

    let cases: Vec<(&str, &NodeEdgeList<(), stepgraph::WeightAttr>, Vec<&str>)> = vec![
        ("cp", &directed, vec![]),
        ("mst_kruskal", &undirected, vec![]),
        ("sssp_ford", &directed, vec!["0"]),
        ("mf_ek", &directed, vec!["0", "3"]),
        ("mm_gabow", &undirected, vec![]),
    ];

    for (id, graph, params) in cases {
        let run = frames(&registry, id, graph, &params);
        assert!(!run.is_empty(), "{id} produced no frames");
        for frame in &run {
            // every frame is a full snapshot with the fixed node count
            assert_eq!(frame.graph["nodes"].as_array().unwrap().len(), 4, "{id}");
            assert!(frame.code_position.contains_key("pseudo"), "{id}");
        }
    }
}

#[test]
fn test_frames_are_immutable_snapshots() {
    init_tracing();
    let registry = AlgorithmRegistry::new();
    let graph = NodeEdgeList::from_weighted(3, &[(0, 1, 2), (1, 2, 4)], true);
    let all = frames(&registry, "sssp_ford", &graph, &["0"]);

    // the frame observed at yield time must not reflect later relaxations
    let first = &all[0];
    assert_eq!(first.graph["nodes"][2]["datum"]["dist"], serde_json::json!(null));
    let last = all.last().unwrap();
    assert_eq!(last.graph["nodes"][2]["datum"]["dist"], 6);
}

#[test]
fn test_typed_and_erased_runs_agree() {
    init_tracing();
    let registry = AlgorithmRegistry::new();
    let graph = NodeEdgeList::from_weighted(
        6,
        &[
            (0, 1, 7),
            (0, 2, 1),
            (1, 3, 4),
            (1, 5, 1),
            (2, 1, 6),
            (2, 4, 2),
            (2, 5, 7),
            (4, 1, 3),
            (4, 3, 5),
            (5, 4, 3),
        ],
        true,
    );

    let mut typed = launch::<Ford>(&graph, &["0"]).unwrap();
    let mut typed_count = 0;
    while typed.next().is_some() {
        typed_count += 1;
    }
    let summary = typed.summary().unwrap();

    let erased = frames(&registry, "sssp_ford", &graph, &["0"]);
    assert_eq!(erased.len(), typed_count);
    let last = erased.last().unwrap();
    for (id, dist) in summary.distances.iter().enumerate() {
        assert_eq!(
            last.graph["nodes"][id]["datum"]["dist"],
            serde_json::json!(dist)
        );
    }
}

#[test]
fn test_flow_and_matching_results_via_extra_data() {
    init_tracing();
    let registry = AlgorithmRegistry::new();

    let network = NodeEdgeList::from_weighted(
        4,
        &[(0, 1, 3), (0, 2, 2), (1, 2, 1), (1, 3, 2), (2, 3, 3)],
        true,
    );
    let flow = frames(&registry, "mf_ek", &network, &["0", "3"]);
    let last = flow.last().unwrap();
    assert_eq!(last.extra[0].label, "$maxflow$");
    assert_eq!(last.extra[0].value, serde_json::json!(5));

    let ring = NodeEdgeList::from_weighted(
        6,
        &[(0, 1, 0), (1, 2, 0), (2, 3, 0), (3, 4, 0), (4, 5, 0), (5, 0, 0)],
        false,
    );
    let matching = frames(&registry, "mm_gabow", &ring, &[]);
    let last = matching.last().unwrap();
    assert_eq!(last.extra[0].label, "$matched$");
    assert_eq!(last.extra[0].value, serde_json::json!(3));
}

#[test]
fn test_kruskal_accepts_minimum_tree_edges() {
    init_tracing();
    let registry = AlgorithmRegistry::new();
    let graph = NodeEdgeList::from_weighted(
        4,
        &[(0, 1, 4), (1, 2, 2), (2, 3, 1), (3, 0, 3), (0, 2, 5)],
        false,
    );
    let all = frames(&registry, "mst_kruskal", &graph, &[]);
    let last = all.last().unwrap();
    let total: i64 = last.graph["edges"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|e| e["datum"]["chosen"] == 1)
        .map(|e| e["datum"]["weight"].as_i64().unwrap())
        .sum();
    assert_eq!(total, 6);
}

#[test]
fn test_validation_failures_surface_message_keys() {
    init_tracing();
    let registry = AlgorithmRegistry::new();
    let graph = NodeEdgeList::from_weighted(3, &[(0, 1, 1), (1, 2, 1)], true);

    let err = registry.launch("mf_ek", &graph, &["2", "2"]).err().unwrap();
    assert_eq!(err, EngineError::IdenticalEndpoints);
    assert_eq!(err.message_key(), "graph.error.identical_endpoints");

    let err = registry.launch("sssp_ford", &graph, &["nine"]).err().unwrap();
    assert!(err.is_validation());
    assert_eq!(err.message_key(), "input.error.not_an_integer");
}
