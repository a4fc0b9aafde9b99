// Panel rendering for the graph dashboard

use crate::{App, ExitMode};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Gauge, List, ListItem, Paragraph, Row, Table, Wrap},
};
use wikigraph_core::{NeighborCount, SearchOutcome, truncate_label};

const PROMPT: &str = "wg> ";
const LABEL_CHARS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

pub fn draw(f: &mut Frame, app: &App) {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),   // Panels
            Constraint::Length(1), // Command line
            Constraint::Length(1), // Hints bar
        ])
        .split(f.area());

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(vertical_chunks[0]);

    let left_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Filters
            Constraint::Length(6), // Statistics
            Constraint::Min(6),    // Top nodes
        ])
        .split(main_chunks[0]);

    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(main_chunks[1]);

    render_filters(f, app, left_chunks[0]);
    render_stats(f, app, left_chunks[1]);
    render_top(f, app, left_chunks[2]);
    render_search(f, app, right_chunks[0]);
    render_logs(f, app, right_chunks[1]);
    render_command_line(f, app, vertical_chunks[1]);
    render_hints(f, vertical_chunks[2]);
}

fn panel(title: impl Into<String>, color: Color) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(title.into())
        .border_style(Style::default().fg(color))
}

fn render_filters(f: &mut Frame, app: &App, area: Rect) {
    let block = panel(format!(" Filters ({}) ", app.graph.mode.as_str()), Color::Cyan);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let value = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let bounds = Style::default().fg(Color::DarkGray);
    let text = vec![
        Line::from(vec![
            Span::raw("Min degree  "),
            Span::styled(app.params.min_degree.to_string(), value),
            Span::styled(
                format!(
                    "  [{}..{}]",
                    app.limits.min_degree.start(),
                    app.limits.min_degree.end()
                ),
                bounds,
            ),
        ]),
        Line::from(vec![
            Span::raw("Max nodes   "),
            Span::styled(app.params.max_nodes.to_string(), value),
            Span::styled(
                format!(
                    "  [{}..{}]",
                    app.limits.max_nodes.start(),
                    app.limits.max_nodes.end()
                ),
                bounds,
            ),
        ]),
        Line::from(Span::styled(app.graph.mode.description(), bounds)),
    ];

    f.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }), inner);
}

fn render_stats(f: &mut Frame, app: &App, area: Rect) {
    let block = panel(" Statistics ", Color::Green);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let stats = app.stats;
    let row = |label: &str, value: usize| {
        Line::from(vec![
            Span::raw(format!("{:<14}", label)),
            Span::styled(
                value.to_string(),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ])
    };
    let text = vec![
        row("Total nodes", stats.total_nodes),
        row("Total edges", stats.total_edges),
        row("Shown nodes", stats.shown_nodes),
        row("Shown edges", stats.shown_edges),
    ];

    f.render_widget(Paragraph::new(text), inner);
}

fn render_top(f: &mut Frame, app: &App, area: Rect) {
    let block = panel(" Most connected ", Color::Yellow);
    let inner = block.inner(area);
    f.render_widget(block, area);

    if app.top.is_empty() {
        let empty = Paragraph::new("The graph is empty").style(Style::default().fg(Color::DarkGray));
        f.render_widget(empty, inner);
        return;
    }

    for (idx, node) in app.top.iter().enumerate().take(inner.height as usize) {
        let row = Rect {
            x: inner.x,
            y: inner.y + idx as u16,
            width: inner.width,
            height: 1,
        };
        let label = format!("{} ({})", truncate_label(&node.id, LABEL_CHARS), node.degree);
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
            .ratio(node.ratio.clamp(0.0, 1.0))
            .label(Span::styled(label, Style::default().fg(Color::White)));
        f.render_widget(gauge, row);
    }
}

fn render_search(f: &mut Frame, app: &App, area: Rect) {
    let title = match &app.search {
        Some(SearchOutcome::Found(adjacency)) => format!(" Search: {} ", adjacency.id),
        _ => " Search ".to_string(),
    };
    let block = panel(title, Color::Blue);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let adjacency = match &app.search {
        None => {
            let hint = Paragraph::new("Type 'search <page>' to list the links of a page")
                .style(Style::default().fg(Color::DarkGray))
                .wrap(Wrap { trim: true });
            f.render_widget(hint, inner);
            return;
        }
        Some(SearchOutcome::NotFound { query }) => {
            let warning = Paragraph::new(format!("Page '{}' not found in the graph", query))
                .style(Style::default().fg(Color::Yellow))
                .wrap(Wrap { trim: true });
            f.render_widget(warning, inner);
            return;
        }
        Some(SearchOutcome::Found(adjacency)) => adjacency,
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    render_neighbors(
        f,
        columns[0],
        &format!("Incoming ({})", adjacency.incoming_total),
        &adjacency.incoming,
    );
    render_neighbors(
        f,
        columns[1],
        &format!("Outgoing ({})", adjacency.outgoing_total),
        &adjacency.outgoing,
    );
}

fn render_neighbors(f: &mut Frame, area: Rect, title: &str, neighbors: &[NeighborCount]) {
    let header = Row::new(vec![Cell::from(title.to_string()), Cell::from("Links")])
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    let rows: Vec<Row> = neighbors
        .iter()
        .map(|n| Row::new(vec![Cell::from(n.id.clone()), Cell::from(n.count.to_string())]))
        .collect();

    let table = Table::new(rows, [Constraint::Min(10), Constraint::Length(6)]).header(header);
    f.render_widget(table, area);
}

fn render_logs(f: &mut Frame, app: &App, area: Rect) {
    let block = panel(" Logs ", Color::Magenta);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let height = inner.height as usize;
    let total_items = app.logs.len();

    // scroll_logs counts lines up from the bottom
    let bottom = total_items.saturating_sub(app.scroll_logs.min(total_items));
    let top = bottom.saturating_sub(height);

    let items: Vec<ListItem> = app.logs[top..bottom]
        .iter()
        .map(|(level, message)| {
            let (prefix, style) = match level {
                LogLevel::Info => ("INFO ", Style::default().fg(Color::Blue)),
                LogLevel::Warn => ("WARN ", Style::default().fg(Color::Yellow)),
                LogLevel::Error => ("ERROR", Style::default().fg(Color::Red)),
            };
            ListItem::new(format!("[{}] {}", prefix, message)).style(style)
        })
        .collect();

    f.render_widget(List::new(items), inner);
}

fn render_command_line(f: &mut Frame, app: &App, area: Rect) {
    let prompt = if app.awaiting_save_confirmation && app.exit_mode == ExitMode::Normal {
        "save? [y/N] "
    } else {
        PROMPT
    };
    let input = Paragraph::new(format!("{}{}", prompt, app.input))
        .style(Style::default().fg(Color::Yellow));
    f.render_widget(input, area);

    f.set_cursor_position((
        area.x + (prompt.chars().count() + app.cursor_position) as u16,
        area.y,
    ));
}

fn render_hints(f: &mut Frame, area: Rect) {
    let key = Style::default().fg(Color::Black).bg(Color::Gray);
    let hints = Line::from(vec![
        Span::styled(" ESC ", key),
        Span::raw(" Exit  "),
        Span::styled(" Ctrl+←/→ ", key),
        Span::raw(" Min degree  "),
        Span::styled(" Ctrl+↑/↓ ", key),
        Span::raw(" Max nodes  "),
        Span::styled(" ↑/↓ ", key),
        Span::raw(" History  "),
        Span::styled(" PgUp/PgDn ", key),
        Span::raw(" Scroll logs"),
    ]);

    let paragraph = Paragraph::new(hints).style(Style::default().bg(Color::Black).fg(Color::Gray));
    f.render_widget(paragraph, area);
}
