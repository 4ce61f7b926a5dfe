//! Terminal setup and teardown
//!
//! Raw mode plus the alternate screen, with an RAII guard so a panic
//! still restores the user's terminal.

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use packboard_core::{PackboardError, Result};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};

/// Terminal type for the dashboard
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI rendering
pub fn init() -> Result<Tui> {
    enable_raw_mode()
        .map_err(|e| PackboardError::Terminal(format!("failed to enable raw mode: {}", e)))?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(|e| {
        PackboardError::Terminal(format!("failed to enter alternate screen: {}", e))
    })?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
        .map_err(|e| PackboardError::Terminal(format!("failed to create terminal: {}", e)))
}

/// Restore the terminal to its original state
pub fn restore() -> Result<()> {
    execute!(io::stdout(), LeaveAlternateScreen).map_err(|e| {
        PackboardError::Terminal(format!("failed to leave alternate screen: {}", e))
    })?;

    disable_raw_mode()
        .map_err(|e| PackboardError::Terminal(format!("failed to disable raw mode: {}", e)))?;

    Ok(())
}

/// RAII guard restoring the terminal on drop
pub struct TerminalGuard;

impl TerminalGuard {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TerminalGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Best effort; errors in a destructor have nowhere to go.
        let _ = restore();
    }
}
