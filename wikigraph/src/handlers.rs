use clap::ArgMatches;
use colored::Colorize;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;
use wikigraph_core::filter::{DEFAULT_MAX_NODES, DEFAULT_MIN_DEGREE};
use wikigraph_core::report::write_report;
use wikigraph_core::{
    BuildOptions, FilterParams, GraphCache, GraphError, GraphMode, GraphStats, LinkGraph,
    RankedNode, ReportFormat, SearchOutcome, TOP_NODES, build_graph,
};
use wikigraph_dataset::Dataset;

/// Expand `~` and environment variables in a dataset or output path
pub fn expand_path(raw: &str) -> PathBuf {
    match shellexpand::full(raw) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(_) => PathBuf::from(shellexpand::tilde(raw).as_ref()),
    }
}

pub fn parse_mode(raw: Option<&String>) -> Result<GraphMode, GraphError> {
    match raw {
        None => Ok(GraphMode::Strict),
        Some(s) => GraphMode::from_str(s)
            .ok_or_else(|| GraphError::InvalidFilter(format!("unknown graph mode: {}", s))),
    }
}

pub fn parse_format(raw: &str) -> Result<ReportFormat, GraphError> {
    ReportFormat::from_str(raw).ok_or_else(|| GraphError::UnknownFormat(raw.to_string()))
}

/// `graph.<ext>` in the working directory
pub fn default_output_path(format: ReportFormat) -> PathBuf {
    PathBuf::from(format!("graph.{}", format.extension()))
}

pub fn filter_params(args: &ArgMatches) -> Result<FilterParams, GraphError> {
    let min_degree = args
        .get_one::<usize>("min-degree")
        .copied()
        .unwrap_or(DEFAULT_MIN_DEGREE);
    let max_nodes = args
        .get_one::<usize>("max-nodes")
        .copied()
        .unwrap_or(DEFAULT_MAX_NODES);
    FilterParams::new(min_degree, max_nodes)
}

/// Load a dataset file and build its graph, drawing a progress bar when asked
pub fn load_dataset_graph(
    path: &Path,
    mode: GraphMode,
    show_progress: bool,
) -> Result<(Dataset, Arc<LinkGraph>), GraphError> {
    let dataset = Dataset::load(path)?;

    let cache = GraphCache::new();
    let options = BuildOptions::new(mode).with_progress_bar(show_progress);
    let graph = build_graph(&dataset, &options, &cache, None);
    debug!(
        "Built {} graph: {} nodes, {} edges",
        mode.as_str(),
        graph.node_count(),
        graph.edge_count()
    );
    Ok((dataset, graph))
}

pub fn format_stats(stats: &GraphStats) -> String {
    let mut out = String::new();
    out.push_str(&format!("  Total nodes:  {}\n", stats.total_nodes));
    out.push_str(&format!("  Total edges:  {}\n", stats.total_edges));
    out.push_str(&format!("  Shown nodes:  {}\n", stats.shown_nodes));
    out.push_str(&format!("  Shown edges:  {}\n", stats.shown_edges));
    out
}

pub fn format_top(nodes: &[RankedNode]) -> String {
    let mut out = String::new();
    for (idx, node) in nodes.iter().enumerate() {
        let filled = (node.ratio * 20.0).round() as usize;
        out.push_str(&format!(
            "  {:>2}. {:<32} {:>6}  {}{}\n",
            idx + 1,
            node.id,
            node.degree,
            "█".repeat(filled),
            "░".repeat(20 - filled.min(20))
        ));
    }
    out
}

pub fn format_search(outcome: &SearchOutcome) -> String {
    let mut out = String::new();
    match outcome {
        SearchOutcome::NotFound { query } => {
            out.push_str(&format!("Page '{}' not found in the graph\n", query));
        }
        SearchOutcome::Found(adjacency) => {
            out.push_str(&format!("Incoming links ({}):\n", adjacency.incoming_total));
            for n in &adjacency.incoming {
                out.push_str(&format!("  {:<40} {:>5}\n", n.id, n.count));
            }
            out.push_str(&format!("\nOutgoing links ({}):\n", adjacency.outgoing_total));
            for n in &adjacency.outgoing {
                out.push_str(&format!("  {:<40} {:>5}\n", n.id, n.count));
            }
        }
    }
    out
}

fn print_divider() {
    println!("{}", "═".repeat(60).bright_blue().bold());
}

fn print_header(title: &str) {
    print_divider();
    println!("{}", format!("  {}", title).bright_white().bold());
    print_divider();
    println!();
}

fn print_warning(message: impl Display) {
    println!("{} {}", "⚠".yellow().bold(), message.to_string().yellow());
}

fn exit_with_error(message: impl Display) -> ! {
    eprintln!("{} {}", "✗".red().bold(), message.to_string().red());
    std::process::exit(1);
}

/// Parse the shared dataset and mode arguments, then build the graph
fn load_from_args(args: &ArgMatches, show_progress: bool) -> (GraphMode, Arc<LinkGraph>) {
    let mode = parse_mode(args.get_one::<String>("mode")).unwrap_or_else(|e| exit_with_error(e));
    let Some(raw_path) = args.get_one::<String>("DATASET") else {
        exit_with_error("a dataset path is required");
    };
    let path = expand_path(raw_path);

    match load_dataset_graph(&path, mode, show_progress) {
        Ok((dataset, graph)) => {
            println!(
                "{} Loaded {} records from {}",
                "✓".green().bold(),
                dataset.len().to_string().cyan(),
                path.display().to_string().bright_white()
            );
            (mode, graph)
        }
        Err(e) => exit_with_error(e),
    }
}

pub fn handle_stats(args: &ArgMatches, quiet: bool) {
    let params = filter_params(args).unwrap_or_else(|e| exit_with_error(e));
    let (mode, graph) = load_from_args(args, !quiet);

    let view = graph.filter(&params);
    let stats = GraphStats::from_view(&view);

    println!();
    print_header("GRAPH STATISTICS");
    println!("{} {}", "→".blue(), mode.description());
    println!(
        "{} min degree {}, max nodes {}",
        "→".blue(),
        params.min_degree.to_string().cyan(),
        params.max_nodes.to_string().cyan()
    );
    println!();
    print!("{}", format_stats(&stats));
    println!();

    if !view.is_renderable() {
        print_warning("Not enough data to build the graph. Try relaxing the filters.");
    }
}

pub fn handle_top(args: &ArgMatches, quiet: bool) {
    let count = args.get_one::<usize>("count").copied().unwrap_or(TOP_NODES);
    let (_, graph) = load_from_args(args, !quiet);

    let top = graph.top_nodes(count);
    println!();
    print_header("MOST CONNECTED PAGES");

    if top.is_empty() {
        print_warning("The graph is empty");
        return;
    }
    print!("{}", format_top(&top));
    println!();
}

pub fn handle_search(args: &ArgMatches, quiet: bool) {
    let Some(term) = args.get_one::<String>("TERM") else {
        exit_with_error("a search term is required");
    };
    let (_, graph) = load_from_args(args, !quiet);

    let outcome = graph.search(term);
    println!();
    match &outcome {
        SearchOutcome::NotFound { .. } => print_warning(format_search(&outcome).trim_end()),
        SearchOutcome::Found(adjacency) => {
            print_header(&format!("LINKS OF {}", adjacency.id));
            print!("{}", format_search(&outcome));
            println!();
        }
    }
}

pub fn handle_render(args: &ArgMatches, quiet: bool) {
    let params = filter_params(args).unwrap_or_else(|e| exit_with_error(e));
    let format = args
        .get_one::<String>("format")
        .map(|f| parse_format(f))
        .transpose()
        .unwrap_or_else(|e| exit_with_error(e))
        .unwrap_or(ReportFormat::Html);
    let output = args
        .get_one::<String>("output")
        .map(|p| expand_path(p))
        .unwrap_or_else(|| default_output_path(format));

    let (_, graph) = load_from_args(args, !quiet);
    let view = graph.filter(&params);

    match write_report(&view, format, &output) {
        Ok(()) => println!(
            "{} {} nodes, {} edges written to {}",
            "✓".green().bold(),
            view.nodes.len().to_string().cyan(),
            view.edges.len().to_string().cyan(),
            output.display().to_string().bright_white()
        ),
        Err(GraphError::InvalidFilter(message)) => print_warning(message),
        Err(e) => exit_with_error(e),
    }
}

pub fn handle_ui(args: &ArgMatches) {
    let (_, graph) = load_from_args(args, true);
    if let Err(e) = wikigraph_tui::run(graph) {
        exit_with_error(format!("Error running TUI: {}", e));
    }
}
