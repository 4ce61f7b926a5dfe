//! Main UI layout
//!
//! Log pane on the left, build vitals on the right, analysis panels along
//! the bottom. Minimal mode drops the analysis row entirely.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    prelude::*,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::{
    app::App,
    widgets::{
        accent_color, AssetsWidget, LogWidget, ModulesWidget, OperationWidget, ProblemsWidget,
        ProgressWidget, StatusWidget,
    },
};

/// Draw the entire dashboard
pub fn draw(frame: &mut Frame, app: &App) {
    let accent = accent_color(&app.options.color);
    let size = frame.area();

    let constraints = if app.state.minimal {
        vec![Constraint::Length(3), Constraint::Min(0)]
    } else {
        vec![
            Constraint::Length(3),
            Constraint::Percentage(55),
            Constraint::Min(10),
        ]
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(size);

    render_header(frame, chunks[0], app, accent);
    render_main(frame, chunks[1], app, accent);
    if !app.state.minimal {
        render_analysis_row(frame, chunks[2], app, accent);
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &App, accent: Color) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    let mut spans = vec![Span::styled(
        app.title().to_string(),
        Style::default().fg(accent).add_modifier(Modifier::BOLD),
    )];
    if let Some(updated) = app.state.last_updated {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("updated {}", updated.format("%H:%M:%S")),
            Style::default().fg(Color::Gray),
        ));
    }
    let title = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    let keybindings = Paragraph::new(Line::from(vec![
        Span::styled("[q]", Style::default().fg(Color::Yellow)),
        Span::raw("uit "),
        Span::styled("[↑/↓]", Style::default().fg(Color::Yellow)),
        Span::raw(" bundle"),
    ]))
    .block(Block::default().borders(Borders::ALL))
    .alignment(Alignment::Right);
    frame.render_widget(keybindings, chunks[1]);
}

/// Log pane plus the status/operation/progress column
fn render_main(frame: &mut Frame, area: Rect, app: &App, accent: Color) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    frame.render_widget(
        WidgetAdapter::new(|area, buf| LogWidget::render(&app.state, accent, area, buf)),
        chunks[0],
    );

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(chunks[1]);

    frame.render_widget(
        WidgetAdapter::new(|area, buf| StatusWidget::render(&app.state, accent, area, buf)),
        side[0],
    );
    frame.render_widget(
        WidgetAdapter::new(|area, buf| OperationWidget::render(&app.state, accent, area, buf)),
        side[1],
    );
    frame.render_widget(
        WidgetAdapter::new(|area, buf| ProgressWidget::render(&app.state, accent, area, buf)),
        side[2],
    );
}

fn render_analysis_row(frame: &mut Frame, area: Rect, app: &App, accent: Color) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(35),
            Constraint::Percentage(25),
        ])
        .split(area);

    frame.render_widget(
        WidgetAdapter::new(|area, buf| ModulesWidget::render(&app.state, accent, area, buf)),
        chunks[0],
    );
    frame.render_widget(
        WidgetAdapter::new(|area, buf| ProblemsWidget::render(&app.state, accent, area, buf)),
        chunks[1],
    );
    frame.render_widget(
        WidgetAdapter::new(|area, buf| AssetsWidget::render(&app.state, accent, area, buf)),
        chunks[2],
    );
}

/// Bridge static render methods to ratatui's `Widget` trait
struct WidgetAdapter<F>
where
    F: Fn(Rect, &mut Buffer),
{
    render_fn: F,
}

impl<F> WidgetAdapter<F>
where
    F: Fn(Rect, &mut Buffer),
{
    fn new(render_fn: F) -> Self {
        Self { render_fn }
    }
}

impl<F> Widget for WidgetAdapter<F>
where
    F: Fn(Rect, &mut Buffer),
{
    fn render(self, area: Rect, buf: &mut Buffer) {
        (self.render_fn)(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_splits() {
        let rect = Rect::new(0, 0, 100, 30);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Percentage(55),
                Constraint::Min(10),
            ])
            .split(rect);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].height, 3);
        assert!(chunks[2].height >= 10);
    }
}
