//! Status, operation, and progress panels

use ratatui::{
    prelude::*,
    widgets::{Gauge, Paragraph, Widget},
};

use super::bordered_block;
use crate::state::DashboardState;

pub struct StatusWidget;

impl StatusWidget {
    /// `Success` green, `Failed`/`Error` red, everything else plain bold
    pub(crate) fn status_style(status: &str) -> Style {
        let style = Style::default().add_modifier(Modifier::BOLD);
        match status {
            "Success" => style.fg(Color::Green),
            "Failed" | "Error" => style.fg(Color::Red),
            _ => style,
        }
    }

    pub fn render(state: &DashboardState, accent: Color, area: Rect, buf: &mut Buffer) {
        let block = bordered_block(" Status ".to_string(), Style::default(), accent);
        let text = Span::styled(state.status.clone(), Self::status_style(&state.status));
        Paragraph::new(Line::from(text)).block(block).render(area, buf);
    }
}

pub struct OperationWidget;

impl OperationWidget {
    pub fn render(state: &DashboardState, accent: Color, area: Rect, buf: &mut Buffer) {
        let block = bordered_block(" Operation ".to_string(), Style::default(), accent);
        Paragraph::new(state.operation.clone())
            .block(block)
            .render(area, buf);
    }
}

pub struct ProgressWidget;

impl ProgressWidget {
    pub fn render(state: &DashboardState, accent: Color, area: Rect, buf: &mut Buffer) {
        let block = bordered_block(" Progress ".to_string(), Style::default(), accent);
        Gauge::default()
            .block(block)
            .gauge_style(Style::default().fg(accent))
            .ratio(state.progress.clamp(0.0, 1.0))
            .label(state.progress_label())
            .render(area, buf);
    }
}
