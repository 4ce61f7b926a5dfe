//! Main application state
//!
//! Glues the reducer to the event loop: incoming frames mutate the view
//! state and are acknowledged, key events drive the shared bundle cursor.

use crossterm::event::KeyEvent;
use packboard_core::DashboardOptions;

use crate::event::{is_next_bundle_event, is_prev_bundle_event, is_quit_event};
use crate::reducer::apply_batch;
use crate::server::IncomingBatch;
use crate::state::DashboardState;

pub struct App {
    pub state: DashboardState,
    pub options: DashboardOptions,
    pub should_quit: bool,
}

impl App {
    pub fn new(options: DashboardOptions) -> Self {
        Self {
            state: DashboardState::new(&options),
            options,
            should_quit: false,
        }
    }

    /// Apply one frame and acknowledge it
    pub fn apply(&mut self, batch: &IncomingBatch) {
        apply_batch(&mut self.state, &batch.frame);
        batch.ack();
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if is_quit_event(key) {
            self.should_quit = true;
        } else if is_next_bundle_event(key) {
            self.state.select_next();
        } else if is_prev_bundle_event(key) {
            self.state.select_prev();
        }
    }

    /// Header title, defaulting to the project name
    pub fn title(&self) -> &str {
        self.options.title.as_deref().unwrap_or("PACKBOARD")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn test_app_creation() {
        let app = App::new(DashboardOptions::default());
        assert!(!app.should_quit);
        assert_eq!(app.title(), "PACKBOARD");
        assert!(!app.state.minimal);
    }

    #[test]
    fn test_custom_title() {
        let app = App::new(DashboardOptions {
            title: Some("my build".to_string()),
            ..Default::default()
        });
        assert_eq!(app.title(), "my build");
    }

    #[test]
    fn test_quit_key() {
        let mut app = App::new(DashboardOptions::default());
        app.handle_key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE));
        assert!(app.should_quit);
    }
}
