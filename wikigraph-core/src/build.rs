use crate::cache::GraphCache;
use crate::error::Result;
use crate::filter::FilteredView;
use crate::graph::{BuildStage, GraphMode, LinkGraph};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use wikigraph_dataset::Dataset;

/// Options for loading a dataset and building its graph
pub struct BuildOptions {
    pub mode: GraphMode,
    pub show_progress_bar: bool,
}

impl BuildOptions {
    pub fn new(mode: GraphMode) -> Self {
        Self {
            mode,
            show_progress_bar: false,
        }
    }

    pub fn with_progress_bar(mut self, show: bool) -> Self {
        self.show_progress_bar = show;
        self
    }
}

/// Callback for reporting build progress
pub type BuildProgressCallback = Arc<dyn Fn(BuildStage) + Send + Sync>;

/// Build (or fetch from the cache) the graph of a loaded dataset.
pub fn build_graph(
    dataset: &Dataset,
    options: &BuildOptions,
    cache: &GraphCache,
    progress_callback: Option<BuildProgressCallback>,
) -> Arc<LinkGraph> {
    let progress_bar = if options.show_progress_bar {
        let pb = ProgressBar::new(100);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{bar:40.cyan/blue} {pos:>3}% {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        pb.set_message("Processing data...");
        Some(pb)
    } else {
        None
    };

    let graph = cache.get_or_build_with(dataset, options.mode, |dataset, mode| {
        LinkGraph::build_with_progress(dataset, mode, |stage| {
            if let Some(ref pb) = progress_bar {
                pb.set_position(stage.percent());
                pb.set_message(stage.message());
            }
            if let Some(ref callback) = progress_callback {
                callback(stage);
            }
        })
    });

    if let Some(pb) = progress_bar {
        pb.finish_and_clear();
    }

    graph
}

/// Load a dataset file and build its graph in one step
pub fn load_graph(
    path: &Path,
    options: &BuildOptions,
    cache: &GraphCache,
    progress_callback: Option<BuildProgressCallback>,
) -> Result<Arc<LinkGraph>> {
    let dataset = Dataset::load(path)?;
    Ok(build_graph(&dataset, options, cache, progress_callback))
}

/// Figures shown in the statistics sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub shown_nodes: usize,
    pub shown_edges: usize,
}

impl GraphStats {
    pub fn from_view(view: &FilteredView<'_>) -> Self {
        Self {
            total_nodes: view.graph.node_count(),
            total_edges: view.graph.edge_count(),
            shown_nodes: view.nodes.len(),
            shown_edges: view.edges.len(),
        }
    }
}
