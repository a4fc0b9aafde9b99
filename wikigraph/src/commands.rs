use crate::CLAP_STYLING;
use clap::{Arg, arg, command};

fn dataset_arg() -> Arg {
    arg!(<DATASET>)
        .required(true)
        .help("Path to the crawled pages (JSON array or JSON Lines)")
}

fn mode_arg() -> Arg {
    arg!(-m --"mode" <MODE>)
        .required(false)
        .help("strict: only crawled pages are nodes; open: every linked page is a node")
        .value_parser(["strict", "open"])
        .default_value("strict")
}

fn min_degree_arg() -> Arg {
    arg!(--"min-degree" <N>)
        .required(false)
        .help("Only show pages with at least N connections")
        .value_parser(clap::value_parser!(usize))
        .default_value("10")
}

fn max_nodes_arg() -> Arg {
    arg!(--"max-nodes" <N>)
        .required(false)
        .help("Show at most N pages")
        .value_parser(clap::value_parser!(usize))
        .default_value("100")
}

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("wikigraph")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("wikigraph")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and progress output").required(false))
        .arg(arg!(-v --"verbose" "Log build details to stderr").required(false))
        .subcommand_required(false)
        .subcommand(
            command!("stats")
                .about("Print node and edge counts for the whole graph and the filtered view")
                .arg(dataset_arg())
                .arg(mode_arg())
                .arg(min_degree_arg())
                .arg(max_nodes_arg()),
        )
        .subcommand(
            command!("top")
                .about("List the most connected pages")
                .arg(dataset_arg())
                .arg(mode_arg())
                .arg(
                    arg!(-n --"count" <K>)
                        .required(false)
                        .help("Number of pages to list")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("10"),
                ),
        )
        .subcommand(
            command!("search")
                .about("Show the incoming and outgoing links of a page")
                .arg(dataset_arg())
                .arg(
                    arg!(<TERM>)
                        .required(true)
                        .help("Page name; normalized the same way as page ids"),
                )
                .arg(mode_arg()),
        )
        .subcommand(
            command!("render")
                .about("Write the filtered graph as an interactive page or an export")
                .arg(dataset_arg())
                .arg(mode_arg())
                .arg(min_degree_arg())
                .arg(max_nodes_arg())
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Output file (default: graph.<format extension>)"),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Output format: html, json, dot, text, markdown, csv")
                        .value_parser(["html", "json", "dot", "text", "markdown", "md", "csv"])
                        .default_value("html"),
                ),
        )
        .subcommand(
            command!("ui")
                .about("Explore the graph in an interactive terminal dashboard")
                .arg(dataset_arg())
                .arg(mode_arg()),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_defaults() {
        let matches = command_argument_builder()
            .try_get_matches_from(["wikigraph", "render", "pages.json"])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();

        assert_eq!(name, "render");
        assert_eq!(sub.get_one::<String>("mode").unwrap(), "strict");
        assert_eq!(*sub.get_one::<usize>("min-degree").unwrap(), 10);
        assert_eq!(*sub.get_one::<usize>("max-nodes").unwrap(), 100);
        assert_eq!(sub.get_one::<String>("format").unwrap(), "html");
        assert!(sub.get_one::<String>("output").is_none());
    }

    #[test]
    fn test_search_takes_term() {
        let matches = command_argument_builder()
            .try_get_matches_from([
                "wikigraph",
                "-q",
                "search",
                "pages.json",
                "Darth Vader",
                "-m",
                "open",
            ])
            .unwrap();
        assert!(matches.get_flag("quiet"));

        let (_, sub) = matches.subcommand().unwrap();
        assert_eq!(sub.get_one::<String>("TERM").unwrap(), "Darth Vader");
        assert_eq!(sub.get_one::<String>("mode").unwrap(), "open");
    }

    #[test]
    fn test_rejects_unknown_mode() {
        let result = command_argument_builder()
            .try_get_matches_from(["wikigraph", "stats", "pages.json", "--mode", "closed"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_non_numeric_filter() {
        let result = command_argument_builder()
            .try_get_matches_from(["wikigraph", "stats", "pages.json", "--min-degree", "many"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_command_is_well_formed() {
        command_argument_builder().debug_assert();
    }
}
