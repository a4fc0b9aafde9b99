// Tests for visualization payloads and reports

mod common;

use common::{ring, three_pages};
use tempfile::TempDir;
use wikigraph_core::report::{generate_report, write_report};
use wikigraph_core::{FilterParams, GraphError, GraphMode, LinkGraph, ReportFormat, VisualGraph};

// ============================================================================
// ReportFormat Tests
// ============================================================================

#[test]
fn test_report_format_from_str() {
    assert_eq!(ReportFormat::from_str("HTML"), Some(ReportFormat::Html));
    assert_eq!(ReportFormat::from_str("graphviz"), Some(ReportFormat::Dot));
    assert_eq!(ReportFormat::from_str("md"), Some(ReportFormat::Markdown));
    assert_eq!(ReportFormat::from_str("csv"), Some(ReportFormat::Csv));
    assert_eq!(ReportFormat::from_str("pdf"), None);
    assert_eq!(ReportFormat::Text.extension(), "txt");
}

#[test]
fn test_report_format_from_extension() {
    for format in [
        ReportFormat::Html,
        ReportFormat::Json,
        ReportFormat::Dot,
        ReportFormat::Text,
        ReportFormat::Markdown,
        ReportFormat::Csv,
    ] {
        assert_eq!(ReportFormat::from_extension(format.extension()), Some(format));
    }
    assert_eq!(ReportFormat::from_extension("TXT"), Some(ReportFormat::Text));
    assert_eq!(ReportFormat::from_extension("pdf"), None);
}

// ============================================================================
// Visual Payload Tests
// ============================================================================

#[test]
fn test_visual_graph_strict_presentation() {
    let graph = LinkGraph::build(&three_pages(), GraphMode::Strict);
    let view = graph.filter(&FilterParams::new(0, 100).unwrap());
    let visual = VisualGraph::from_view(&view);

    assert!(visual.directed);
    assert_eq!(visual.height, 700);
    assert_eq!(visual.nodes[0].title, "A");
    assert_eq!(visual.nodes[0].size, 11.0);
    assert_eq!(visual.edges.len(), 2);
}

#[test]
fn test_visual_graph_open_presentation() {
    let graph = LinkGraph::build(&three_pages(), GraphMode::Open);
    let view = graph.filter(&FilterParams::new(0, 100).unwrap());
    let visual = VisualGraph::from_view(&view);

    assert_eq!(visual.height, 600);
    assert_eq!(visual.nodes[0].title, "A\nConnections: 3");
    assert_eq!(visual.nodes[0].size, 5.0);
    assert_eq!(visual.options()["physics"]["barnesHut"]["gravitationalConstant"], -30000.0);
}

// ============================================================================
// Report Output Tests
// ============================================================================

#[test]
fn test_html_report_embeds_graph() {
    let graph = LinkGraph::build(&three_pages(), GraphMode::Strict);
    let view = graph.filter(&FilterParams::new(0, 100).unwrap());
    let html = generate_report(&view, ReportFormat::Html).unwrap();

    assert!(html.contains("vis.Network"));
    assert!(html.contains(r#""from":"A","to":"B""#));
    assert!(html.contains("height: 700px"));
    assert!(!html.contains("{{"));
}

#[test]
fn test_json_report_parses() {
    let graph = LinkGraph::build(&three_pages(), GraphMode::Open);
    let view = graph.filter(&FilterParams::new(2, 100).unwrap());
    let json = generate_report(&view, ReportFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["mode"], "open");
    assert_eq!(value["stats"]["total_nodes"], 3);
    assert_eq!(value["stats"]["shown_nodes"], 2);
    assert_eq!(value["top_nodes"][0]["id"], "A");
}

#[test]
fn test_dot_and_csv_reports() {
    let graph = LinkGraph::build(&three_pages(), GraphMode::Strict);
    let view = graph.filter(&FilterParams::new(0, 100).unwrap());

    let dot = generate_report(&view, ReportFormat::Dot).unwrap();
    assert!(dot.starts_with("digraph"));
    assert!(dot.contains("A"));

    let csv = generate_report(&view, ReportFormat::Csv).unwrap();
    assert_eq!(csv, "source,target\nA,B\nB,A\n");
}

#[test]
fn test_text_report_lists_top_nodes() {
    let graph = LinkGraph::build(&ring(3), GraphMode::Strict);
    let view = graph.filter(&FilterParams::default());
    let text = generate_report(&view, ReportFormat::Text).unwrap();

    assert!(text.contains("# Statistics:"));
    assert!(text.contains("Shown nodes:   0"));
    assert!(text.contains("n1"));
}

#[test]
fn test_write_report_to_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("graph.html");
    let graph = LinkGraph::build(&three_pages(), GraphMode::Strict);
    let view = graph.filter(&FilterParams::new(0, 100).unwrap());

    write_report(&view, ReportFormat::Html, &path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("<!DOCTYPE html>"));
}

#[test]
fn test_write_report_refuses_empty_view() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("graph.html");
    let graph = LinkGraph::build(&three_pages(), GraphMode::Strict);
    let view = graph.filter(&FilterParams::new(50, 100).unwrap());

    let result = write_report(&view, ReportFormat::Html, &path);
    assert!(matches!(result, Err(GraphError::InvalidFilter(_))));
    assert!(!path.exists());

    // other formats still describe the empty selection
    let csv_path = dir.path().join("edges.csv");
    write_report(&view, ReportFormat::Csv, &csv_path).unwrap();
    assert_eq!(std::fs::read_to_string(csv_path).unwrap(), "source,target\n");
}
