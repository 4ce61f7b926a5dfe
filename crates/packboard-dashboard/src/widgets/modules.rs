//! Module groups for the selected bundle

use packboard_format::module_table;
use ratatui::prelude::*;
use ratatui::widgets::Widget;

use super::{bordered_block, error_lines, panel_title, render_lines, render_table};
use crate::state::{DashboardState, PanelState};

pub struct ModulesWidget;

impl ModulesWidget {
    pub fn render(state: &DashboardState, accent: Color, area: Rect, buf: &mut Buffer) {
        let (mut title, title_style) = panel_title("Modules", &state.sizes);
        if let Some(reports) = state.sizes.ready() {
            if let Some(sizes) = reports.get(state.selected_bundle) {
                title = format!(
                    " Modules — {} ({}/{}) ",
                    sizes.path,
                    state.selected_bundle + 1,
                    reports.len()
                );
            }
        }

        let block = bordered_block(title, title_style, accent);
        let inner = block.inner(area);
        block.render(area, buf);

        match &state.sizes {
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
                if let Some(sizes) = reports.get(state.selected_bundle) {
                    render_table(&module_table(sizes), inner, buf);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use packboard_core::{BundleSizes, ModuleGroup, SizeTier, WireError};

    fn ready_state() -> DashboardState {
        DashboardState {
            sizes: PanelState::Ready(vec![BundleSizes {
                path: "main.js".into(),
                tier: SizeTier::MinifiedGzip,
                groups: vec![ModuleGroup {
                    name: "~/lodash".into(),
                    size: 4000,
                    members: 12,
                }],
                total: 4000,
            }]),
            ..Default::default()
        }
    }

    #[test]
    fn test_render_all_panel_states() {
        let area = Rect::new(0, 0, 60, 10);

        for state in [
            DashboardState::default(),
            DashboardState {
                sizes: PanelState::Loading,
                ..Default::default()
            },
            DashboardState {
                sizes: PanelState::Failed(WireError::new("boom").with_stack("at x")),
                ..Default::default()
            },
            ready_state(),
        ] {
            let mut buf = Buffer::empty(area);
            ModulesWidget::render(&state, Color::Green, area, &mut buf);
        }
    }
}
