// Visualization payload and report generation for a filtered graph

use crate::build::GraphStats;
use crate::error::{GraphError, Result};
use crate::filter::{FilterParams, FilteredView};
use crate::graph::{BarnesHut, GraphMode};
use crate::rank::{RankedNode, TOP_NODES};
use petgraph::dot::{Config, Dot};
use petgraph::graph::DiGraph;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

const HTML_TEMPLATE: &str = include_str!("../templates/graph.html");
const BACKGROUND_COLOR: &str = "#222222";
const FONT_COLOR: &str = "white";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    Html,
    Json,
    Dot,
    Text,
    Markdown,
    Csv,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "html" => Some(ReportFormat::Html),
            "json" => Some(ReportFormat::Json),
            "dot" | "graphviz" => Some(ReportFormat::Dot),
            "text" => Some(ReportFormat::Text),
            "markdown" | "md" => Some(ReportFormat::Markdown),
            "csv" => Some(ReportFormat::Csv),
            _ => None,
        }
    }

    /// Format implied by a file extension, the inverse of [`extension`](Self::extension)
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "txt" => Some(ReportFormat::Text),
            "htm" => Some(ReportFormat::Html),
            "gv" => Some(ReportFormat::Dot),
            other => Self::from_str(other),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Html => "html",
            ReportFormat::Json => "json",
            ReportFormat::Dot => "dot",
            ReportFormat::Text => "txt",
            ReportFormat::Markdown => "md",
            ReportFormat::Csv => "csv",
        }
    }
}

/// A node as handed to the renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualNode {
    pub id: String,
    pub label: String,
    pub title: String,
    pub size: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisualEdge {
    pub from: String,
    pub to: String,
}

/// Everything the renderer needs to draw a filtered view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualGraph {
    pub directed: bool,
    pub mode: GraphMode,
    pub height: u32,
    pub physics: BarnesHut,
    pub nodes: Vec<VisualNode>,
    pub edges: Vec<VisualEdge>,
}

impl VisualGraph {
    pub fn from_view(view: &FilteredView<'_>) -> Self {
        let mode = view.graph.mode;
        let nodes = view
            .nodes
            .iter()
            .map(|id| {
                let degree = view.graph.degree(id);
                VisualNode {
                    id: id.to_string(),
                    label: id.to_string(),
                    title: mode.node_title(id, degree),
                    size: mode.node_size(degree),
                }
            })
            .collect();
        let edges = view
            .edges
            .iter()
            .map(|e| VisualEdge {
                from: e.source.clone(),
                to: e.target.clone(),
            })
            .collect();

        Self {
            directed: true,
            mode,
            height: mode.canvas_height(),
            physics: mode.physics(),
            nodes,
            edges,
        }
    }

    /// vis-network options object for this graph
    pub fn options(&self) -> serde_json::Value {
        serde_json::json!({
            "nodes": {
                "shape": "dot",
                "font": { "color": FONT_COLOR }
            },
            "edges": {
                "arrows": { "to": { "enabled": self.directed } },
                "color": { "inherit": true },
                "smooth": false
            },
            "physics": {
                "solver": "barnesHut",
                "barnesHut": {
                    "gravitationalConstant": self.physics.gravity,
                    "centralGravity": self.physics.central_gravity,
                    "springLength": self.physics.spring_length,
                    "springConstant": self.physics.spring_strength,
                    "damping": self.physics.damping,
                    "avoidOverlap": self.physics.overlap
                }
            }
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportData {
    pub mode: GraphMode,
    pub min_degree: usize,
    pub max_nodes: usize,
    pub stats: GraphStats,
    pub top_nodes: Vec<RankedNode>,
    pub graph: VisualGraph,
    pub generated_at: String,
}

pub fn gather_report_data(view: &FilteredView<'_>) -> ReportData {
    let FilterParams {
        min_degree,
        max_nodes,
    } = view.params;

    ReportData {
        mode: view.graph.mode,
        min_degree,
        max_nodes,
        stats: GraphStats::from_view(view),
        top_nodes: view.graph.top_nodes(TOP_NODES),
        graph: VisualGraph::from_view(view),
        generated_at: chrono::Utc::now()
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string(),
    }
}

/// Render a filtered view in the requested format
pub fn generate_report(view: &FilteredView<'_>, format: ReportFormat) -> Result<String> {
    let data = gather_report_data(view);
    let report = match format {
        ReportFormat::Html => generate_html_report(&data)?,
        ReportFormat::Json => generate_json_report(&data)?,
        ReportFormat::Dot => generate_dot_report(&data),
        ReportFormat::Text => generate_text_report(&data),
        ReportFormat::Markdown => generate_markdown_report(&data),
        ReportFormat::Csv => generate_csv_report(&data),
    };
    Ok(report)
}

pub fn generate_html_report(data: &ReportData) -> Result<String> {
    let nodes = script_safe(serde_json::to_string(&data.graph.nodes)?);
    let edges = script_safe(serde_json::to_string(&data.graph.edges)?);
    let options = script_safe(serde_json::to_string(&data.graph.options())?);
    let summary = format!(
        "{} of {} nodes, {} of {} edges ({} mode, min degree {})",
        data.stats.shown_nodes,
        data.stats.total_nodes,
        data.stats.shown_edges,
        data.stats.total_edges,
        data.mode.as_str(),
        data.min_degree
    );

    Ok(HTML_TEMPLATE
        .replace("{{title}}", "Wiki link graph")
        .replace("{{summary}}", &html_escape(&summary))
        .replace("{{height}}", &data.graph.height.to_string())
        .replace("{{nodes}}", &nodes)
        .replace("{{edges}}", &edges)
        .replace("{{options}}", &options)
        .replace("{{background}}", BACKGROUND_COLOR)
        .replace("{{font_color}}", FONT_COLOR))
}

pub fn generate_json_report(data: &ReportData) -> std::result::Result<String, serde_json::Error> {
    serde_json::to_string_pretty(data)
}

/// Graphviz rendering of the shown subgraph
pub fn generate_dot_report(data: &ReportData) -> String {
    let mut graph: DiGraph<&str, &str> = DiGraph::new();
    let mut index = HashMap::new();
    for node in &data.graph.nodes {
        index.insert(node.id.as_str(), graph.add_node(node.label.as_str()));
    }
    for edge in &data.graph.edges {
        if let (Some(&a), Some(&b)) = (index.get(edge.from.as_str()), index.get(edge.to.as_str())) {
            graph.add_edge(a, b, "");
        }
    }
    format!("{}", Dot::with_config(&graph, &[Config::EdgeNoLabel]))
}

pub fn generate_text_report(data: &ReportData) -> String {
    let rule = "━".repeat(60);
    let mut report = String::new();

    report.push_str(&format!("{}\n", rule));
    report.push_str("                    WIKI LINK GRAPH REPORT\n");
    report.push_str(&format!("{}\n\n", rule));

    report.push_str(&format!("Mode:         {}\n", data.mode.as_str()));
    report.push_str(&format!("              {}\n", data.mode.description()));
    report.push_str(&format!("Generated:    {}\n", data.generated_at));
    report.push_str(&format!("Min degree:   {}\n", data.min_degree));
    report.push_str(&format!("Max nodes:    {}\n\n", data.max_nodes));

    report.push_str("# Statistics:\n");
    report.push_str(&format!("  Total nodes:   {}\n", data.stats.total_nodes));
    report.push_str(&format!("  Total edges:   {}\n", data.stats.total_edges));
    report.push_str(&format!("  Shown nodes:   {}\n", data.stats.shown_nodes));
    report.push_str(&format!("  Shown edges:   {}\n\n", data.stats.shown_edges));

    report.push_str("# Most connected:\n");
    if data.top_nodes.is_empty() {
        report.push_str("  (empty)\n");
    }
    for (idx, node) in data.top_nodes.iter().enumerate() {
        report.push_str(&format!(
            "  {:>2}. {:<32} {:>6} connections  {}\n",
            idx + 1,
            node.id,
            node.degree,
            ratio_bar(node.ratio, 20)
        ));
    }

    report.push_str(&format!("\n{}\n", rule));
    report
}

pub fn generate_markdown_report(data: &ReportData) -> String {
    let mut report = String::new();

    report.push_str("# Wiki link graph report\n\n");
    report.push_str(&format!("_{}_\n\n", data.mode.description()));
    report.push_str(&format!(
        "Generated {} with min degree **{}** and at most **{}** nodes.\n\n",
        data.generated_at, data.min_degree, data.max_nodes
    ));

    report.push_str("## Statistics\n\n");
    report.push_str("| | Total | Shown |\n|---|---:|---:|\n");
    report.push_str(&format!(
        "| Nodes | {} | {} |\n",
        data.stats.total_nodes, data.stats.shown_nodes
    ));
    report.push_str(&format!(
        "| Edges | {} | {} |\n\n",
        data.stats.total_edges, data.stats.shown_edges
    ));

    report.push_str("## Most connected\n\n");
    report.push_str("| # | Page | Connections |\n|---:|---|---:|\n");
    for (idx, node) in data.top_nodes.iter().enumerate() {
        report.push_str(&format!("| {} | `{}` | {} |\n", idx + 1, node.id, node.degree));
    }

    report
}

/// Edge list of the shown subgraph
pub fn generate_csv_report(data: &ReportData) -> String {
    let mut report = String::from("source,target\n");
    for edge in &data.graph.edges {
        report.push_str(&format!("{},{}\n", edge.from, edge.to));
    }
    report
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

/// Render and save in one step. Refuses views with nothing to draw.
pub fn write_report(view: &FilteredView<'_>, format: ReportFormat, path: &Path) -> Result<()> {
    if format == ReportFormat::Html && !view.is_renderable() {
        return Err(GraphError::InvalidFilter(
            "not enough data to build the graph, try relaxing the filters".to_string(),
        ));
    }
    let content = generate_report(view, format)?;
    save_report(&content, path)?;
    Ok(())
}

fn ratio_bar(ratio: f64, width: usize) -> String {
    let filled = (ratio.clamp(0.0, 1.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn script_safe(json: String) -> String {
    json.replace("</", "<\\/")
}

fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
