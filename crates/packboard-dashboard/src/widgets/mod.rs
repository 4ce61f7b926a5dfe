//! Dashboard widgets
//!
//! Each widget renders one panel from `DashboardState` into a buffer.
//! Widgets never own state; the reducer is the only writer.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Row, Table},
};

use crate::state::PanelState;

mod assets;
mod build;
mod log;
mod modules;
mod problems;

pub use assets::AssetsWidget;
pub use build::{OperationWidget, ProgressWidget, StatusWidget};
pub use log::LogWidget;
pub use modules::ModulesWidget;
pub use problems::ProblemsWidget;

/// Convert a theme color name to a ratatui color
pub fn accent_color(name: &str) -> Color {
    match name {
        "red" => Color::Red,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "gray" => Color::DarkGray,
        _ => Color::Green,
    }
}

/// Panel title reflecting the analysis lifecycle
///
/// `loading...` and `(error)` are distinct states with distinct colors so
/// a failed analysis never reads like one still in flight.
pub(crate) fn panel_title<T>(name: &str, panel: &PanelState<T>) -> (String, Style) {
    match panel {
        PanelState::Loading => (
            format!(" {} (loading...) ", name),
            Style::default().fg(Color::Yellow),
        ),
        PanelState::Failed(_) => (
            format!(" {} (error) ", name),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        _ => (format!(" {} ", name), Style::default()),
    }
}

pub(crate) fn bordered_block(title: String, title_style: Style, accent: Color) -> Block<'static> {
    Block::default()
        .title(Span::styled(title, title_style))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent))
}

/// Render plain text lines into a panel body
pub(crate) fn render_lines(lines: &[String], style: Style, inner: Rect, buf: &mut Buffer) {
    for (idx, line) in lines.iter().take(inner.height as usize).enumerate() {
        buf.set_stringn(
            inner.x,
            inner.y + idx as u16,
            line,
            inner.width as usize,
            style,
        );
    }
}

/// Render a header-plus-rows table into a panel body
pub(crate) fn render_table(rows: &[Vec<String>], inner: Rect, buf: &mut Buffer) {
    let Some((header, body)) = rows.split_first() else {
        return;
    };
    let columns = header.len().max(1) as u16;
    let widths = vec![Constraint::Ratio(1, columns as u32); columns as usize];

    let table = Table::new(
        body.iter()
            .map(|row| Row::new(row.iter().map(|cell| Cell::from(cell.clone())))),
        widths,
    )
    .header(
        Row::new(header.iter().map(|cell| Cell::from(cell.clone())))
            .style(Style::default().add_modifier(Modifier::BOLD)),
    );

    Widget::render(table, inner, buf);
}

/// Body lines for a failed analysis: message first, then the stack
pub(crate) fn error_lines(err: &packboard_core::WireError) -> Vec<String> {
    let mut lines = vec![err.message.clone()];
    if let Some(stack) = &err.stack {
        lines.extend(stack.lines().map(String::from));
    }
    lines
}
