// Tests for adjacency search

mod common;

use common::{dataset, record, three_pages};
use serde_json::json;
use wikigraph_core::{GraphMode, LinkGraph, SearchOutcome};

#[test]
fn test_search_unknown_page() {
    let graph = LinkGraph::build(&three_pages(), GraphMode::Strict);

    match graph.search("Jar Jar Binks") {
        SearchOutcome::NotFound { query } => assert_eq!(query, "JarJarBinks"),
        SearchOutcome::Found(_) => panic!("page should not exist"),
    }
}

#[test]
fn test_search_normalizes_input() {
    let graph = LinkGraph::build(&three_pages(), GraphMode::Open);

    let SearchOutcome::Found(adjacency) = graph.search("  A!! ") else {
        panic!("A should be found");
    };
    assert_eq!(adjacency.id, "A");
    assert_eq!(adjacency.outgoing_total, 2);
    assert_eq!(adjacency.incoming_total, 1);
    assert_eq!(adjacency.incoming[0].id, "B");
}

#[test]
fn test_search_uncrawled_target_in_open_mode() {
    let graph = LinkGraph::build(&three_pages(), GraphMode::Open);

    let SearchOutcome::Found(adjacency) = graph.search("C") else {
        panic!("C is a node in open mode");
    };
    assert_eq!(adjacency.incoming_total, 1);
    assert!(adjacency.outgoing.is_empty());

    assert!(matches!(
        LinkGraph::build(&three_pages(), GraphMode::Strict).search("C"),
        SearchOutcome::NotFound { .. }
    ));
}

#[test]
fn test_search_groups_repeated_links() {
    let data = dataset(vec![
        record("Vader", json!(["Luke", "Palpatine"])),
        record("Luke", json!(["Vader"])),
        record("Luke", json!(["Vader", "Leia"])),
        record("Palpatine", json!(["Vader"])),
    ]);
    let graph = LinkGraph::build(&data, GraphMode::Open);

    let SearchOutcome::Found(adjacency) = graph.search("Vader") else {
        panic!("Vader should be found");
    };
    assert_eq!(adjacency.incoming_total, 3);
    assert_eq!(adjacency.incoming[0].id, "Luke");
    assert_eq!(adjacency.incoming[0].count, 2);
    assert_eq!(adjacency.incoming[1].id, "Palpatine");
    assert_eq!(adjacency.incoming[1].count, 1);
    let outgoing: Vec<&str> = adjacency.outgoing.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(outgoing, vec!["Luke", "Palpatine"]);
}
