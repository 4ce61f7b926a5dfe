//! Dashboard view state
//!
//! Everything the screen renders lives here, mutated only by the reducer
//! in `reducer.rs`. Keeping the state plain data (no terminal handles, no
//! sockets) makes every display rule unit-testable without a screen.

use chrono::{DateTime, Utc};
use packboard_core::{BundleProblems, BundleSizes, DashboardOptions, Handshake, WireError};

/// What one analysis-backed panel currently shows
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PanelState<T> {
    /// No build has completed yet
    #[default]
    Idle,
    /// A build finished; the analysis is still running
    Loading,
    /// The producer's analysis failed; the reconstructed error follows
    Failed(WireError),
    Ready(T),
}

impl<T> PanelState<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            PanelState::Ready(value) => Some(value),
            _ => None,
        }
    }
}

/// The consumer's entire mutable state
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub status: String,
    pub operation: String,
    /// Fraction in [0, 1]
    pub progress: f64,
    pub log_lines: Vec<String>,
    /// Set while the most recent `stats` reported errors; raw `log`
    /// messages are dropped so child-process noise cannot bury the
    /// error summary.
    pub suppress_logs: bool,
    pub minimal: bool,
    /// Asset filters relayed to producers in the handshake
    pub include_assets: Vec<String>,
    /// Cursor shared by the modules and problems panels
    pub selected_bundle: usize,
    pub sizes: PanelState<Vec<BundleSizes>>,
    pub problems: PanelState<Vec<BundleProblems>>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            status: String::new(),
            operation: "idle".to_string(),
            progress: 0.0,
            log_lines: Vec::new(),
            suppress_logs: false,
            minimal: false,
            include_assets: Vec::new(),
            selected_bundle: 0,
            sizes: PanelState::Idle,
            problems: PanelState::Idle,
            last_updated: None,
        }
    }
}

impl DashboardState {
    pub fn new(options: &DashboardOptions) -> Self {
        Self {
            minimal: options.minimal,
            include_assets: options.include_assets.clone(),
            ..Default::default()
        }
    }

    /// The handshake sent to every connecting producer
    pub fn handshake(&self) -> Handshake {
        Handshake {
            minimal: self.minimal,
            include_assets: self.include_assets.clone(),
        }
    }

    /// `round(progress * 100)%`; 0 renders as `0%`, never as stale text
    pub fn progress_label(&self) -> String {
        format!("{}%", (self.progress * 100.0).round() as u32)
    }

    /// Bundles navigable by the shared cursor
    ///
    /// Sizes and problems may arrive at different moments; the cursor
    /// ranges over whichever list is longer so neither panel strands it.
    pub fn bundle_count(&self) -> usize {
        let sizes = self.sizes.ready().map(Vec::len).unwrap_or(0);
        let problems = self.problems.ready().map(Vec::len).unwrap_or(0);
        sizes.max(problems)
    }

    /// Move the shared cursor down, clamping at the last bundle
    pub fn select_next(&mut self) {
        let count = self.bundle_count();
        if count > 0 && self.selected_bundle + 1 < count {
            self.selected_bundle += 1;
        }
    }

    /// Move the shared cursor up, clamping at the first bundle
    pub fn select_prev(&mut self) {
        self.selected_bundle = self.selected_bundle.saturating_sub(1);
    }

    /// Pull the cursor back in range after a panel update shrank the list
    pub fn clamp_selection(&mut self) {
        let count = self.bundle_count();
        if count == 0 {
            self.selected_bundle = 0;
        } else if self.selected_bundle >= count {
            self.selected_bundle = count - 1;
        }
    }
}
