use commands::command_argument_builder;
use tracing::Level;
use wikigraph::handlers::{handle_render, handle_search, handle_stats, handle_top, handle_ui};
use wikigraph_core::print_banner;

mod commands;

fn main() {
    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();
    let quiet = chosen_command.get_flag("quiet");
    let verbose = chosen_command.get_flag("verbose");

    if !quiet {
        print_banner();
    }

    if chosen_command.subcommand().is_none() {
        // No subcommand provided, just show the banner
        return;
    }

    match chosen_command.subcommand() {
        Some(("ui", primary_command)) => handle_ui(primary_command),
        Some((name, primary_command)) => {
            // the dashboard owns the terminal, so only the plain commands log
            init_tracing(verbose);
            match name {
                "stats" => handle_stats(primary_command, quiet),
                "top" => handle_top(primary_command, quiet),
                "search" => handle_search(primary_command, quiet),
                "render" => handle_render(primary_command, quiet),
                _ => unreachable!("clap should ensure we don't get here"),
            }
        }
        None => unreachable!("clap should ensure we don't get here"),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);
