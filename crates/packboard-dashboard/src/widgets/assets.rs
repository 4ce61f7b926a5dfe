//! Emitted assets with a grand total

use packboard_format::{asset_table, AssetRow};
use ratatui::prelude::*;
use ratatui::widgets::Widget;

use super::{bordered_block, error_lines, panel_title, render_lines, render_table};
use crate::state::{DashboardState, PanelState};

pub struct AssetsWidget;

impl AssetsWidget {
    pub fn render(state: &DashboardState, accent: Color, area: Rect, buf: &mut Buffer) {
        let (title, title_style) = panel_title("Assets", &state.sizes);
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
                let rows: Vec<AssetRow> = reports
                    .iter()
                    .map(|sizes| AssetRow::new(sizes.path.clone(), Some(sizes.total)))
                    .collect();
                render_table(&asset_table(&rows), inner, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use packboard_core::{BundleSizes, SizeTier};

    #[test]
    fn test_render_ready_assets() {
        let state = DashboardState {
            sizes: PanelState::Ready(vec![
                BundleSizes {
                    path: "main.js".into(),
                    tier: SizeTier::Full,
                    groups: Vec::new(),
                    total: 500,
                },
                BundleSizes {
                    path: "vendor.js".into(),
                    tier: SizeTier::Full,
                    groups: Vec::new(),
                    total: 1500,
                },
            ]),
            ..Default::default()
        };
        let area = Rect::new(0, 0, 50, 8);
        let mut buf = Buffer::empty(area);
        AssetsWidget::render(&state, Color::Green, area, &mut buf);
    }
}
