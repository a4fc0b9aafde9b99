use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use wikigraph_core::report::write_report;
use wikigraph_core::{
    FilterLimits, FilterParams, GraphError, GraphStats, LinkGraph, RankedNode, ReportFormat, SearchOutcome,
    TOP_NODES,
};

pub mod dashboard;

pub use dashboard::LogLevel;

const HISTORY_LIMIT: usize = 100;
const LOG_LIMIT: usize = 500;
const MAX_NODES_STEP: usize = 100;
const DEFAULT_RENDER_PATH: &str = "graph.html";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExitMode {
    None,
    Normal,    // exit, quit - ask about saving
    ForceQuit, // :q! - don't save, don't ask
    WriteQuit, // :wq!, ZZ - save and quit, don't ask
}

/// Dashboard state: one shared graph snapshot plus the current selection
pub struct App {
    graph: Arc<LinkGraph>,
    limits: FilterLimits,
    params: FilterParams,
    stats: GraphStats,
    top: Vec<RankedNode>,
    search: Option<SearchOutcome>,
    logs: Vec<(LogLevel, String)>,
    scroll_logs: usize,
    input: String,
    cursor_position: usize,
    history: Vec<String>,
    history_index: Option<usize>,
    history_path: PathBuf,
    temp_input: String,
    exit_mode: ExitMode,
    awaiting_save_confirmation: bool,
    should_quit: bool,
}

impl App {
    pub fn new(graph: Arc<LinkGraph>) -> Self {
        let limits = FilterLimits::for_mode(graph.mode);
        let params = limits.clamp(FilterParams::default());
        let top = graph.top_nodes(TOP_NODES);
        let stats = GraphStats::from_view(&graph.filter(&params));

        let mut app = Self {
            graph,
            limits,
            params,
            stats,
            top,
            search: None,
            logs: Vec::new(),
            scroll_logs: 0,
            input: String::new(),
            cursor_position: 0,
            history: Vec::new(),
            history_index: None,
            history_path: default_history_path(),
            temp_input: String::new(),
            exit_mode: ExitMode::None,
            awaiting_save_confirmation: false,
            should_quit: false,
        };

        app.log(
            LogLevel::Info,
            format!(
                "Loaded {} nodes and {} edges ({} mode)",
                app.graph.node_count(),
                app.graph.edge_count(),
                app.graph.mode.as_str()
            ),
        );
        app.log(LogLevel::Info, app.graph.mode.description());
        app.log(LogLevel::Info, "Type 'help' for available commands, 'exit' or 'quit' to exit.");
        app.refresh();
        app
    }

    /// Read and write command history at `path` instead of `~/.wikigraph_history`
    pub fn with_history_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.history_path = path.into();
        self
    }

    pub fn params(&self) -> FilterParams {
        self.params
    }

    pub fn stats(&self) -> GraphStats {
        self.stats
    }

    pub fn search_result(&self) -> Option<&SearchOutcome> {
        self.search.as_ref()
    }

    pub fn logs(&self) -> &[(LogLevel, String)] {
        &self.logs
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn log(&mut self, level: LogLevel, message: impl Into<String>) {
        self.logs.push((level, message.into()));
        if self.logs.len() > LOG_LIMIT {
            self.logs.drain(0..self.logs.len() - LOG_LIMIT);
        }
        // new output snaps back to the bottom
        self.scroll_logs = 0;
    }

    /// Recompute the filtered view after a parameter change
    fn refresh(&mut self) {
        let (stats, renderable) = {
            let view = self.graph.filter(&self.params);
            (GraphStats::from_view(&view), view.is_renderable())
        };
        self.stats = stats;
        if !renderable {
            self.log(
                LogLevel::Warn,
                "Not enough data to build the graph. Try relaxing the filters.",
            );
        }
    }

    fn set_params(&mut self, params: FilterParams) {
        if let Err(e) = self.limits.check(&params) {
            self.log(LogLevel::Error, e.to_string());
            return;
        }
        if params == self.params {
            return;
        }
        self.params = params;
        self.log(
            LogLevel::Info,
            format!(
                "Filter: min degree {}, max nodes {}",
                params.min_degree, params.max_nodes
            ),
        );
        self.refresh();
    }

    pub fn adjust_min_degree(&mut self, delta: isize) {
        let min_degree = self.params.min_degree.saturating_add_signed(delta);
        let params = self.limits.clamp(FilterParams {
            min_degree,
            ..self.params
        });
        self.set_params(params);
    }

    pub fn adjust_max_nodes(&mut self, delta: isize) {
        let max_nodes = self.params.max_nodes.saturating_add_signed(delta);
        let params = self.limits.clamp(FilterParams {
            max_nodes,
            ..self.params
        });
        self.set_params(params);
    }

    pub fn scroll_logs_up(&mut self) {
        self.scroll_logs = (self.scroll_logs + 10).min(self.logs.len());
    }

    pub fn scroll_logs_down(&mut self) {
        self.scroll_logs = self.scroll_logs.saturating_sub(10);
    }

    pub fn navigate_history_backward(&mut self) {
        if self.history.is_empty() {
            return;
        }

        if self.history_index.is_none() {
            self.temp_input = self.input.clone();
        }

        let idx = match self.history_index {
            None => self.history.len() - 1,
            Some(idx) => idx.saturating_sub(1),
        };
        self.history_index = Some(idx);
        self.input = self.history[idx].clone();
        self.cursor_position = self.input.chars().count();
    }

    pub fn navigate_history_forward(&mut self) {
        let Some(idx) = self.history_index else {
            return;
        };

        if idx + 1 >= self.history.len() {
            // past the newest entry, restore what was being typed
            self.input = std::mem::take(&mut self.temp_input);
            self.history_index = None;
        } else {
            self.history_index = Some(idx + 1);
            self.input = self.history[idx + 1].clone();
        }
        self.cursor_position = self.input.chars().count();
    }

    pub fn load_history(&mut self) {
        if let Ok(content) = fs::read_to_string(&self.history_path) {
            let mut lines: Vec<String> = content.lines().map(|s| s.to_string()).collect();
            if lines.len() > HISTORY_LIMIT {
                lines.drain(0..lines.len() - HISTORY_LIMIT);
            }
            self.history = lines;
        }
    }

    pub fn save_history(&self) -> Result<()> {
        fs::write(&self.history_path, self.history.join("\n"))?;
        Ok(())
    }

    fn save_history_logged(&mut self) {
        match self.save_history() {
            Ok(()) => {
                let message = format!("History saved to {}", self.history_path.display());
                self.log(LogLevel::Info, message);
            }
            Err(e) => self.log(LogLevel::Error, format!("Error saving history: {}", e)),
        }
    }

    pub fn request_exit(&mut self, mode: ExitMode) {
        self.exit_mode = mode;

        match mode {
            ExitMode::Normal => {
                if self.history.is_empty() {
                    self.should_quit = true;
                } else {
                    self.awaiting_save_confirmation = true;
                    self.log(LogLevel::Info, "Save command history? [y/N]:");
                }
            }
            ExitMode::ForceQuit => {
                self.should_quit = true;
            }
            ExitMode::WriteQuit => {
                if !self.history.is_empty() {
                    self.save_history_logged();
                }
                self.should_quit = true;
            }
            ExitMode::None => {}
        }
    }

    pub fn handle_save_confirmation(&mut self, response: &str) {
        self.awaiting_save_confirmation = false;

        let response = response.trim().to_lowercase();
        if response == "y" || response == "yes" {
            self.save_history_logged();
        } else {
            self.log(LogLevel::Info, "History not saved.");
        }
        self.should_quit = true;
    }

    pub fn handle_input(&mut self, input: String) {
        if input.trim().is_empty() {
            return;
        }

        if self.awaiting_save_confirmation {
            self.handle_save_confirmation(&input);
            return;
        }

        self.history.push(input.clone());
        if self.history.len() > HISTORY_LIMIT {
            self.history.remove(0);
        }
        self.history_index = None;
        self.temp_input.clear();

        self.log(LogLevel::Info, format!("> {}", input));

        let parts: Vec<&str> = input.split_whitespace().collect();
        match parts[0] {
            "exit" | "quit" => self.request_exit(ExitMode::Normal),
            ":q!" => self.request_exit(ExitMode::ForceQuit),
            ":wq!" | "ZZ" => self.request_exit(ExitMode::WriteQuit),
            "help" => self.show_help(),
            "clear" => {
                self.logs.clear();
                self.scroll_logs = 0;
            }
            "min" => match parts.get(1).map(|s| s.parse::<usize>()) {
                Some(Ok(min_degree)) => self.set_params(FilterParams {
                    min_degree,
                    ..self.params
                }),
                Some(Err(_)) => self.log(LogLevel::Error, format!("Not a number: {}", parts[1])),
                None => self.log(LogLevel::Error, "min requires a degree"),
            },
            "max" => match parts.get(1).map(|s| s.parse::<usize>()) {
                Some(Ok(max_nodes)) => self.set_params(FilterParams {
                    max_nodes,
                    ..self.params
                }),
                Some(Err(_)) => self.log(LogLevel::Error, format!("Not a number: {}", parts[1])),
                None => self.log(LogLevel::Error, "max requires a node count"),
            },
            "search" => {
                let term = parts[1..].join(" ");
                if term.is_empty() {
                    self.log(LogLevel::Error, "search requires a page name");
                } else {
                    self.search_page(&term);
                }
            }
            "render" => {
                let path = parts.get(1).copied().unwrap_or(DEFAULT_RENDER_PATH);
                self.render_to(Path::new(path));
            }
            "stats" => self.show_stats(),
            "top" => self.show_top(),
            other => {
                self.log(LogLevel::Error, format!("Unknown command: {}", other));
                self.log(LogLevel::Info, "Type 'help' for available commands");
            }
        }
    }

    fn show_help(&mut self) {
        for line in [
            "Available commands:",
            "  min <n>          - Show only pages with at least n connections",
            "  max <n>          - Show at most n pages",
            "  search <page>    - Show incoming and outgoing links of a page",
            "  render [path]    - Write the filtered graph (default graph.html)",
            "  stats            - Print graph statistics",
            "  top              - Print the most connected pages",
            "  clear            - Clear the log panel",
            "  help             - Show this help message",
            "  exit, quit       - Exit (:q! skips the save prompt, :wq! saves history)",
        ] {
            self.log(LogLevel::Info, line);
        }
    }

    fn search_page(&mut self, term: &str) {
        let outcome = self.graph.search(term);
        match &outcome {
            SearchOutcome::Found(adjacency) => {
                let message = format!(
                    "{}: {} incoming, {} outgoing",
                    adjacency.id, adjacency.incoming_total, adjacency.outgoing_total
                );
                self.log(LogLevel::Info, message);
            }
            SearchOutcome::NotFound { query } => {
                let message = format!("Page '{}' not found in the graph", query);
                self.log(LogLevel::Warn, message);
            }
        }
        self.search = Some(outcome);
    }

    fn render_to(&mut self, path: &Path) {
        let format = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(ReportFormat::from_extension)
            .unwrap_or(ReportFormat::Html);
        let result = {
            let view = self.graph.filter(&self.params);
            write_report(&view, format, path)
        };
        match result {
            Ok(()) => self.log(LogLevel::Info, format!("Graph written to {}", path.display())),
            Err(GraphError::InvalidFilter(message)) => self.log(LogLevel::Warn, message),
            Err(e) => self.log(LogLevel::Error, e.to_string()),
        }
    }

    fn show_stats(&mut self) {
        let stats = self.stats;
        self.log(LogLevel::Info, format!("Total nodes: {}", stats.total_nodes));
        self.log(LogLevel::Info, format!("Total edges: {}", stats.total_edges));
        self.log(LogLevel::Info, format!("Shown nodes: {}", stats.shown_nodes));
        self.log(LogLevel::Info, format!("Shown edges: {}", stats.shown_edges));
    }

    fn show_top(&mut self) {
        if self.top.is_empty() {
            self.log(LogLevel::Warn, "The graph is empty");
            return;
        }
        let lines: Vec<String> = self
            .top
            .iter()
            .enumerate()
            .map(|(idx, node)| format!("{:>2}. {} ({} connections)", idx + 1, node.id, node.degree))
            .collect();
        for line in lines {
            self.log(LogLevel::Info, line);
        }
    }

    fn byte_index(&self) -> usize {
        self.input
            .char_indices()
            .nth(self.cursor_position)
            .map(|(idx, _)| idx)
            .unwrap_or(self.input.len())
    }

    fn insert_char(&mut self, c: char) {
        let idx = self.byte_index();
        self.input.insert(idx, c);
        self.cursor_position += 1;
        self.history_index = None;
        self.temp_input.clear();
    }

    fn delete_char(&mut self) {
        if self.cursor_position == 0 {
            return;
        }
        self.cursor_position -= 1;
        let idx = self.byte_index();
        self.input.remove(idx);
        self.history_index = None;
        self.temp_input.clear();
    }
}

fn default_history_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".wikigraph_history")
}

/// Run the dashboard over a built graph until the user quits
pub fn run(graph: Arc<LinkGraph>) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(graph);
    app.load_history();

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| dashboard::draw(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
            match key.code {
                KeyCode::Left if ctrl => app.adjust_min_degree(-1),
                KeyCode::Right if ctrl => app.adjust_min_degree(1),
                KeyCode::Up if ctrl => app.adjust_max_nodes(MAX_NODES_STEP as isize),
                KeyCode::Down if ctrl => app.adjust_max_nodes(-(MAX_NODES_STEP as isize)),
                KeyCode::Char('c') if ctrl => app.should_quit = true,
                KeyCode::Char(c) => app.insert_char(c),
                KeyCode::Backspace => app.delete_char(),
                KeyCode::Enter => {
                    let input = std::mem::take(&mut app.input);
                    app.cursor_position = 0;
                    app.handle_input(input);
                }
                KeyCode::Up => app.navigate_history_backward(),
                KeyCode::Down => app.navigate_history_forward(),
                KeyCode::Left => {
                    app.cursor_position = app.cursor_position.saturating_sub(1);
                }
                KeyCode::Right => {
                    if app.cursor_position < app.input.chars().count() {
                        app.cursor_position += 1;
                    }
                }
                KeyCode::Home => app.cursor_position = 0,
                KeyCode::End => app.cursor_position = app.input.chars().count(),
                KeyCode::Esc => app.should_quit = true,
                KeyCode::PageUp => app.scroll_logs_up(),
                KeyCode::PageDown => app.scroll_logs_down(),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
