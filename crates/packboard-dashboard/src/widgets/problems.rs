//! Duplicates and version skews for the selected bundle
//!
//! Shares its bundle cursor with the modules panel; the reducer keeps the
//! two in sync.

use packboard_format::format_problems;
use ratatui::prelude::*;
use ratatui::widgets::Widget;

use super::{bordered_block, error_lines, panel_title, render_lines};
use crate::state::{DashboardState, PanelState};

pub struct ProblemsWidget;

impl ProblemsWidget {
    pub fn render(state: &DashboardState, accent: Color, area: Rect, buf: &mut Buffer) {
        let (mut title, title_style) = panel_title("Problems", &state.problems);
        if let Some(reports) = state.problems.ready() {
            if let Some(problems) = reports.get(state.selected_bundle) {
                title = format!(
                    " Problems — {} ({}/{}) ",
                    problems.path,
                    state.selected_bundle + 1,
                    reports.len()
                );
            }
        }

        let block = bordered_block(title, title_style, accent);
        let inner = block.inner(area);
        block.render(area, buf);

        match &state.problems {
            PanelState::Idle => {
                render_lines(
                    &["No build analyzed yet".to_string()],
                    Style::default().fg(Color::DarkGray),
                    inner,
                    buf,
                );
            }
            PanelState::Loading => {
                render_lines(
                    &["loading...".to_string()],
                    Style::default().fg(Color::Yellow),
                    inner,
                    buf,
                );
            }
            PanelState::Failed(err) => {
                render_lines(&error_lines(err), Style::default().fg(Color::Red), inner, buf);
            }
            PanelState::Ready(reports) => {
                if let Some(problems) = reports.get(state.selected_bundle) {
                    let lines: Vec<String> =
                        format_problems(problems).lines().map(String::from).collect();
                    render_lines(&lines, Style::default(), inner, buf);
                }
            }
        }
    }
}
