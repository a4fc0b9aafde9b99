// Tests for the graph cache and the build pipeline

mod common;

use common::three_pages;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;
use wikigraph_core::{
    BuildOptions, BuildProgressCallback, BuildStage, GraphCache, GraphError, GraphMode, LinkGraph,
    build_graph, load_graph,
};

#[test]
fn test_cache_hit_returns_same_snapshot() {
    let cache = GraphCache::new();
    let data = three_pages();

    let first = cache.get_or_build(&data, GraphMode::Strict);
    let second = cache.get_or_build(&data, GraphMode::Strict);

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_cache_separates_modes() {
    let cache = GraphCache::new();
    let data = three_pages();

    let strict = cache.get_or_build(&data, GraphMode::Strict);
    let open = cache.get_or_build(&data, GraphMode::Open);

    assert!(!Arc::ptr_eq(&strict, &open));
    assert_eq!(strict.node_count(), 2);
    assert_eq!(open.node_count(), 3);
    assert_eq!(cache.len(), 2);
}

#[test]
fn test_builder_runs_once_per_key() {
    let cache = GraphCache::new();
    let data = three_pages();
    let builds = AtomicUsize::new(0);

    for _ in 0..3 {
        cache.get_or_build_with(&data, GraphMode::Open, |dataset, mode| {
            builds.fetch_add(1, Ordering::SeqCst);
            LinkGraph::build(dataset, mode)
        });
    }
    assert_eq!(builds.load(Ordering::SeqCst), 1);

    cache.clear();
    assert!(cache.is_empty());
    assert!(cache.get(data.fingerprint, GraphMode::Open).is_none());
}

#[test]
fn test_concurrent_readers_share_graph() {
    let cache = Arc::new(GraphCache::new());
    let data = Arc::new(three_pages());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let cache = Arc::clone(&cache);
            let data = Arc::clone(&data);
            std::thread::spawn(move || cache.get_or_build(&data, GraphMode::Strict).edge_count())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 2);
    }
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_build_graph_reports_stages() {
    let cache = GraphCache::new();
    let stages = Arc::new(Mutex::new(Vec::<BuildStage>::new()));
    let sink = Arc::clone(&stages);
    let callback: BuildProgressCallback =
        Arc::new(move |stage: BuildStage| sink.lock().unwrap().push(stage));

    build_graph(
        &three_pages(),
        &BuildOptions::new(GraphMode::Strict),
        &cache,
        Some(callback.clone()),
    );
    // cache hit: no stages reported
    build_graph(
        &three_pages(),
        &BuildOptions::new(GraphMode::Strict),
        &cache,
        Some(callback),
    );

    let stages = stages.lock().unwrap();
    assert_eq!(stages.first(), Some(&BuildStage::Normalizing));
    assert_eq!(stages.last(), Some(&BuildStage::Done));
    assert_eq!(stages.iter().filter(|s| **s == BuildStage::Done).count(), 1);
}

#[test]
fn test_load_graph_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"{{"document_id": "A", "outgoing_links": ["B", "C"]}}
{{"document_id": "B", "outgoing_links": ["A"]}}"#
    )
    .unwrap();

    let cache = GraphCache::new();
    let graph = load_graph(file.path(), &BuildOptions::new(GraphMode::Open), &cache, None).unwrap();

    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 3);
}

#[test]
fn test_load_graph_missing_file() {
    let cache = GraphCache::new();
    let result = load_graph(
        std::path::Path::new("/nonexistent/wiki.json"),
        &BuildOptions::new(GraphMode::Strict),
        &cache,
        None,
    );

    assert!(matches!(result, Err(GraphError::Load(_))));
    assert!(cache.is_empty());
}
