//! Keyboard and resize event handling

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use packboard_core::Result;
use std::time::Duration;

/// Application events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    Key(KeyEvent),
    /// Timer tick; nothing happened within the poll window
    Tick,
    Resize(u16, u16),
}

/// Poll for the next event with a timeout
pub fn poll_event(timeout: Duration) -> Result<AppEvent> {
    if event::poll(timeout)? {
        match event::read()? {
            Event::Key(key) => Ok(AppEvent::Key(key)),
            Event::Resize(width, height) => Ok(AppEvent::Resize(width, height)),
            _ => Ok(AppEvent::Tick),
        }
    } else {
        Ok(AppEvent::Tick)
    }
}

/// Quit on `q`, `Esc`, or Ctrl+C
pub fn is_quit_event(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Move the bundle cursor forward (Down, Right, or `j`)
pub fn is_next_bundle_event(key: KeyEvent) -> bool {
    matches!(
        key.code,
        KeyCode::Down | KeyCode::Right | KeyCode::Char('j')
    )
}

/// Move the bundle cursor back (Up, Left, or `k`)
pub fn is_prev_bundle_event(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Up | KeyCode::Left | KeyCode::Char('k'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_quit_event() {
        assert!(is_quit_event(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(is_quit_event(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(is_quit_event(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!is_quit_event(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::NONE
        )));
    }

    #[test]
    fn test_bundle_navigation_events() {
        assert!(is_next_bundle_event(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE)));
        assert!(is_next_bundle_event(KeyEvent::new(
            KeyCode::Char('j'),
            KeyModifiers::NONE
        )));
        assert!(is_prev_bundle_event(KeyEvent::new(KeyCode::Up, KeyModifiers::NONE)));
        assert!(!is_prev_bundle_event(KeyEvent::new(
            KeyCode::Down,
            KeyModifiers::NONE
        )));
    }
}
