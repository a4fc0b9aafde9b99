// Tests for the filter engine

mod common;

use common::{dataset, record, ring, three_pages};
use serde_json::json;
use std::collections::HashSet;
use wikigraph_core::{FilterParams, GraphMode, LinkGraph};

#[test]
fn test_truncation_keeps_input_order() {
    let graph = LinkGraph::build(&ring(150), GraphMode::Strict);
    let view = graph.filter(&FilterParams::new(0, 100).unwrap());

    let expected: Vec<String> = (1..=100).map(|i| format!("n{}", i)).collect();
    assert_eq!(view.nodes, expected);
}

#[test]
fn test_truncation_is_not_by_degree() {
    // the hub comes last in input order, so it is cut off
    let mut records: Vec<_> = (0..5)
        .map(|i| record(&format!("leaf{}", i), json!(["hub"])))
        .collect();
    records.push(record("hub", json!([])));
    let graph = LinkGraph::build(&dataset(records), GraphMode::Strict);

    let view = graph.filter(&FilterParams::new(0, 5).unwrap());
    assert!(!view.nodes.contains(&"hub"));
    assert!(view.edges.is_empty());
    assert!(!view.is_renderable());
}

#[test]
fn test_min_degree_threshold_is_inclusive() {
    let graph = LinkGraph::build(&three_pages(), GraphMode::Open);

    let view = graph.filter(&FilterParams::new(2, 100).unwrap());
    assert_eq!(view.nodes, vec!["A", "B"]);

    let view = graph.filter(&FilterParams::new(3, 100).unwrap());
    assert_eq!(view.nodes, vec!["A"]);
}

#[test]
fn test_edges_are_induced_by_shown_nodes() {
    let graph = LinkGraph::build(&three_pages(), GraphMode::Open);
    let view = graph.filter(&FilterParams::new(2, 100).unwrap());

    let shown: HashSet<&str> = view.nodes.iter().copied().collect();
    for edge in &view.edges {
        assert!(shown.contains(edge.source.as_str()));
        assert!(shown.contains(edge.target.as_str()));
    }
    assert_eq!(view.edges.len(), 2);
    assert!(view.nodes.len() <= view.params.max_nodes);
}

#[test]
fn test_filter_does_not_touch_base_graph() {
    let graph = LinkGraph::build(&ring(20), GraphMode::Strict);
    let before = (graph.nodes.clone(), graph.edges.clone());

    let first = graph.filter(&FilterParams::new(1, 3).unwrap());
    let second = graph.filter(&FilterParams::new(1, 3).unwrap());

    assert_eq!(first.nodes, second.nodes);
    assert_eq!(first.edges, second.edges);
    assert_eq!(before, (graph.nodes.clone(), graph.edges.clone()));
}

#[test]
fn test_too_strict_filter_is_empty() {
    let graph = LinkGraph::build(&three_pages(), GraphMode::Strict);
    let view = graph.filter(&FilterParams::new(70, 100).unwrap());

    assert!(view.nodes.is_empty());
    assert!(view.edges.is_empty());
    assert!(!view.is_renderable());
}
