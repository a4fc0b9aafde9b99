use colored::Colorize;

pub mod build;
pub mod cache;
pub mod error;
pub mod filter;
pub mod graph;
pub mod normalize;
pub mod query;
pub mod rank;
pub mod report;

pub use build::{BuildOptions, BuildProgressCallback, GraphStats, build_graph, load_graph};
pub use cache::GraphCache;
pub use error::{GraphError, Result};
pub use filter::{FilterLimits, FilterParams, FilteredView};
pub use graph::{BuildStage, Edge, GraphMode, LinkGraph};
pub use normalize::normalize_id;
pub use query::{Adjacency, NeighborCount, SearchOutcome};
pub use rank::{RankedNode, TOP_NODES, truncate_label};
pub use report::{ReportFormat, VisualGraph};

pub fn print_banner() {
    let banner = r#"
 __      __.__ __   .__                             .__
/  \    /  \__|  | _|__| ________________  ______ |  |__
\   \/\/   /  |  |/ /  |/ ___\_  __ \__  \ \____ \|  |  \
 \        /|  |    <|  / /_/  >  | \// __ \|  |_> >   Y  \
  \__/\  / |__|__|_ \__\___  /|__|  (____  /   __/|___|  /
       \/          \/ /_____/            \/|__|        \/
"#;
    println!("{}", banner.bright_cyan().bold());
    println!(
        "{}\n",
        "  explore the link graph of a crawled wiki".bright_white()
    );
}
