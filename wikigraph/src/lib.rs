pub mod handlers;

pub use handlers::{
    default_output_path, expand_path, filter_params, format_search, format_stats, format_top,
    load_dataset_graph, parse_format, parse_mode,
};
