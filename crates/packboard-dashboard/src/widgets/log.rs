//! Scrolling build log

use ratatui::{
    prelude::*,
    widgets::{List, ListItem, Widget},
};

use super::bordered_block;
use crate::state::DashboardState;

pub struct LogWidget;

impl LogWidget {
    pub fn render(state: &DashboardState, accent: Color, area: Rect, buf: &mut Buffer) {
        let block = bordered_block(" Log ".to_string(), Style::default(), accent);
        let inner = block.inner(area);
        block.render(area, buf);

        if state.log_lines.is_empty() {
            buf.set_string(
                inner.x,
                inner.y,
                "Waiting for build output",
                Style::default().fg(Color::DarkGray),
            );
            return;
        }

        // Tail the log: the newest lines are the ones that matter.
        let visible = inner.height as usize;
        let start = state.log_lines.len().saturating_sub(visible);
        let items: Vec<ListItem> = state.log_lines[start..]
            .iter()
            .map(|line| ListItem::new(line.clone()))
            .collect();
        Widget::render(List::new(items), inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_with_empty_and_overflowing_log() {
        let mut state = DashboardState::default();
        let area = Rect::new(0, 0, 40, 6);
        let mut buf = Buffer::empty(area);
        LogWidget::render(&state, Color::Green, area, &mut buf);

        for i in 0..50 {
            state.log_lines.push(format!("line {}", i));
        }
        let mut buf = Buffer::empty(area);
        LogWidget::render(&state, Color::Green, area, &mut buf);
    }
}
