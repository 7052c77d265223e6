//! Dashboard view — header, services table, log panel, and footer.
//!
//! Renders an immutable `&DashboardState` into a ratatui `Frame`. Nothing
//! here mutates state or performs I/O; the event loop hands over a snapshot
//! and this module draws it.

use std::time::Duration;

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};

use miaumon_core::state::DashboardState;

/// The dev server URL shown in the header bar.
const DEV_URL: &str = "http://localhost:9245";


/// Render the full screen: header, services, logs, footer.
pub fn render_frame(frame: &mut Frame, state: &DashboardState, now_ms: u64, refresh: Duration) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // header
            Constraint::Length(10), // services table
            Constraint::Min(5),    // log tail
            Constraint::Length(3),  // footer
        ])
        .split(frame.area());

    render_header(frame, chunks[0]);
    render_services(frame, chunks[1], state);
    render_logs(frame, chunks[2], state);
    render_footer(frame, chunks[3], state, now_ms, refresh);
}


/// Top bar: tool name, dev server URL, quit hint.
fn render_header(frame: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::styled("  miau ", Style::default().fg(Color::Cyan).bold()),
        Span::styled("DEV MONITOR", Style::default().fg(Color::Green).bold()),
        Span::styled("  │  ", Style::default().dim()),
        Span::styled(DEV_URL, Style::default().fg(Color::Green).bold().underlined()),
        Span::styled("  │  ", Style::default().dim()),
        Span::styled("Ctrl+C to stop", Style::default().fg(Color::Yellow)),
    ]);
    let header = Paragraph::new(line)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));
    frame.render_widget(header, area);
}


/// Services table: one row per monitored service plus the database row.
fn render_services(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let header = Row::new(vec!["Service", "CPU%", "MEM%", "RAM", "Status"])
        .style(Style::default().fg(Color::Cyan).bold());

    let mut rows: Vec<Row> = state
        .services
        .iter()
        .map(|row| match &row.sample {
            Some(sample) => Row::new(vec![
                Cell::from(row.name.clone()).style(Style::default().bold()),
                Cell::from(format!("{:.1}%", sample.cpu_percent)),
                Cell::from(format!("{:.1}%", sample.mem_percent)),
                Cell::from(format!("{:.0}MB", sample.resident_mb)),
                Cell::from(status_dot(true)).style(Style::default().fg(Color::Green)),
            ]),
            None => Row::new(vec![
                Cell::from(row.name.clone()),
                Cell::from("-"),
                Cell::from("-"),
                Cell::from("-"),
                Cell::from(status_dot(false)),
            ])
            .style(Style::default().dim()),
        })
        .collect();

    // Database indicator rides along as a pseudo-service.
    rows.push(if state.db.exists {
        Row::new(vec![
            Cell::from("SQLite DB").style(Style::default().fg(Color::Magenta)),
            Cell::from("-"),
            Cell::from("-"),
            Cell::from(format!("{:.1}MB", state.db.size_mb)),
            Cell::from(status_dot(true)).style(Style::default().fg(Color::Green)),
        ])
    } else {
        Row::new(vec![
            Cell::from("SQLite DB"),
            Cell::from("-"),
            Cell::from("-"),
            Cell::from("-"),
            Cell::from(status_dot(false)),
        ])
        .style(Style::default().dim())
    });

    let table = Table::new(
        rows,
        [
            Constraint::Fill(1),   // Service
            Constraint::Length(8), // CPU%
            Constraint::Length(8), // MEM%
            Constraint::Length(10), // RAM
            Constraint::Length(8), // Status
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Services")
            .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(table, area);
}


/// Log panel: the colorized tail, with an extract hint when an error is
/// visible.
fn render_logs(frame: &mut Frame, area: Rect, state: &DashboardState) {
    if state.log_tail.is_empty() {
        let placeholder = Paragraph::new(Span::styled("Waiting for logs...", Style::default().dim()))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Logs (Wails)")
                    .border_style(Style::default().dim()),
            );
        frame.render_widget(placeholder, area);
        return;
    }

    let lines: Vec<Line> = state
        .log_tail
        .iter()
        .map(|l| Line::from(Span::styled(l.clone(), line_style(classify(l)))))
        .collect();

    let mut title = vec![Span::raw("Logs (Wails)")];
    if state.has_error {
        title.push(Span::styled(
            "  [E] copy error",
            Style::default().fg(Color::Red).bold(),
        ));
    }
    let border = if state.has_error {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Green)
    };

    let logs = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Line::from(title))
                .border_style(border),
        );
    frame.render_widget(logs, area);
}


/// Footer: transient status message (while visible), system stats, refresh
/// cadence. An unknown system sample renders dimmed dashes, not zeros.
fn render_footer(
    frame: &mut Frame,
    area: Rect,
    state: &DashboardState,
    now_ms: u64,
    refresh: Duration,
) {
    let mut spans: Vec<Span> = Vec::new();

    if let Some(msg) = state.visible_status(now_ms) {
        spans.push(Span::styled(
            msg.text.clone(),
            Style::default().fg(Color::Green).bold(),
        ));
        spans.push(Span::styled("  │  ", Style::default().dim()));
    }

    if state.system.is_known() {
        spans.push(Span::styled(
            format!("CPU {:.1}%", state.system.cpu_total_percent),
            Style::default().fg(Color::Cyan),
        ));
        spans.push(Span::styled("  │  ", Style::default().dim()));
        spans.push(Span::styled(
            format!(
                "RAM {}MB / {}MB ({:.1}%)",
                state.system.mem_used_mb,
                state.system.mem_total_mb,
                state.system.mem_percent()
            ),
            Style::default().fg(Color::Cyan),
        ));
    } else {
        spans.push(Span::styled("CPU --  RAM --", Style::default().dim()));
    }

    spans.push(Span::styled("  │  ", Style::default().dim()));
    spans.push(Span::styled(
        format!("Refresh: {}s", refresh.as_secs()),
        Style::default().dim(),
    ));

    let footer = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().dim()));
    frame.render_widget(footer, area);
}


/// Status indicator: filled dot when sampled, hollow when absent.
fn status_dot(present: bool) -> &'static str {
    if present {
        "\u{25cf}" // ●
    } else {
        "\u{25cb}" // ○
    }
}


// ---------------------------------------------------------------------------
// Log line classification
// ---------------------------------------------------------------------------

/// Coarse category of a log line, for colorization only. The extract hint
/// in the panel title comes from the engine's trigger scan, not from this
/// classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    Error,
    Warn,
    Info,
    Build,
    Ready,
    Hot,
    Plain,
}

/// Classify a log line by substring, first match wins.
pub fn classify(line: &str) -> LineClass {
    let lower = line.to_lowercase();
    if lower.contains("error") || lower.contains("fail") || lower.contains("panic") {
        LineClass::Error
    } else if lower.contains("warn") {
        LineClass::Warn
    } else if lower.contains("info") {
        LineClass::Info
    } else if lower.contains("building") || lower.contains("compiled") {
        LineClass::Build
    } else if lower.contains("watching") || lower.contains("ready") {
        LineClass::Ready
    } else if lower.contains("hmr") || lower.contains("hot") {
        LineClass::Hot
    } else {
        LineClass::Plain
    }
}

/// The display style for a line class.
pub fn line_style(class: LineClass) -> Style {
    match class {
        LineClass::Error => Style::default().fg(Color::Red).bold(),
        LineClass::Warn => Style::default().fg(Color::Yellow),
        LineClass::Info => Style::default().dim(),
        LineClass::Build => Style::default().fg(Color::Green),
        LineClass::Ready => Style::default().fg(Color::Cyan),
        LineClass::Hot => Style::default().fg(Color::Magenta),
        LineClass::Plain => Style::default(),
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
