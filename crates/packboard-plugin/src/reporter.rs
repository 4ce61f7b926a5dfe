//! Build lifecycle reporter
//!
//! One `BuildReporter` instruments one build pipeline. Each lifecycle
//! hook maps to a single batch of protocol messages; a successful build
//! additionally starts the metrics engine, whose results are forwarded
//! one message per batch as they resolve.

use packboard_core::{
    retry_with_delay, Compilation, Handshake, Message, PackboardError, ReporterOptions,
    StatsPayload,
};
use packboard_format::human_size;
use packboard_metrics::spawn_analysis;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::warn;

use crate::sink::MessageSink;

const IDLE: &str = "idle";
const CLEANUP_ATTEMPTS: usize = 5;
const CLEANUP_DELAY: Duration = Duration::from_millis(300);

const PRODUCTION_WARNING: &str =
    "Bundle analysis is disabled for production builds. Unset NODE_ENV=production to re-enable it.";

/// Is the surrounding environment a production build?
pub fn is_production_env() -> bool {
    std::env::var("NODE_ENV").map(|v| v == "production").unwrap_or(false)
}

/// Raw textual build summary for the log pane
///
/// The consumer formats its own verdict line from the `stats` message;
/// this is the detail that follows it (asset listing plus the raw error
/// and warning text).
fn compilation_text(compilation: &Compilation) -> String {
    let mut out: Vec<String> = compilation
        .assets
        .iter()
        .map(|asset| format!("{}  {}", asset.name, human_size(asset.size)))
        .collect();
    for message in &compilation.errors {
        out.push(String::new());
        out.push(message.clone());
    }
    for message in &compilation.warnings {
        out.push(String::new());
        out.push(message.clone());
    }
    out.join("\n")
}

/// ` (Xs)` for elapsed times of a second or more, ` (Xms)` below that
fn elapsed_suffix(elapsed: Duration) -> String {
    let ms = elapsed.as_millis();
    if ms >= 1000 {
        format!(" ({}s)", (ms as f64 / 1000.0).round() as u64)
    } else {
        format!(" ({}ms)", ms)
    }
}

pub struct BuildReporter {
    sink: Arc<dyn MessageSink>,
    options: ReporterOptions,
    timer: Option<Instant>,
    watching: bool,
    env_warning_shown: bool,
}

impl BuildReporter {
    pub fn new(sink: Arc<dyn MessageSink>, options: ReporterOptions) -> Self {
        Self {
            sink,
            options,
            timer: None,
            watching: false,
            env_warning_shown: false,
        }
    }

    /// Fold the consumer's handshake into the reporter's options
    pub fn apply_handshake(&mut self, handshake: &Handshake) {
        self.options.minimal = self.options.minimal || handshake.minimal;
        if !handshake.include_assets.is_empty() {
            self.options.analysis.include_assets = handshake.include_assets.clone();
        }
    }

    fn time_suffix(&self) -> String {
        self.timer
            .map(|start| elapsed_suffix(start.elapsed()))
            .unwrap_or_default()
    }

    /// The pipeline entered watch mode; rebuilds will follow
    pub fn watch_started(&mut self) {
        self.watching = true;
    }

    /// A compilation began
    pub fn compile_started(&mut self) {
        self.timer = Some(Instant::now());
        self.sink.send(vec![Message::status("Compiling")]);
    }

    /// Incremental progress within the current compilation
    pub fn progress(&self, fraction: f64, operation: &str) {
        self.sink.send(vec![
            Message::status("Compiling"),
            Message::progress(fraction),
            Message::operations(format!("{}{}", operation, self.time_suffix())),
        ]);
    }

    /// Watched inputs changed; the current output is stale
    pub fn invalidated(&mut self) {
        self.timer = None;
        self.sink.send(vec![
            Message::status("Invalidated"),
            Message::progress(0.0),
            Message::operations(IDLE),
            Message::Clear,
        ]);
    }

    /// The compilation aborted before producing stats
    pub fn failed(&mut self) {
        let suffix = self.time_suffix();
        self.timer = None;
        self.sink.send(vec![
            Message::status("Failed"),
            Message::operations(format!("{}{}", IDLE, suffix)),
        ]);
    }

    /// The compilation finished; report stats and start the metrics engine
    pub fn done(&mut self, compilation: Compilation) {
        let suffix = self.time_suffix();
        self.timer = None;

        let stats = StatsPayload {
            errors: compilation.has_errors(),
            warnings: compilation.has_warnings(),
            data: compilation.summary(),
        };
        let log_text = compilation_text(&compilation);
        self.sink.send(vec![
            Message::status("Success"),
            Message::progress(1.0),
            Message::operations(format!("{}{}", IDLE, suffix)),
            Message::Stats { value: stats },
            Message::log(log_text),
        ]);

        if self.options.minimal {
            return;
        }
        if self.options.production {
            if !self.env_warning_shown {
                self.env_warning_shown = true;
                warn!("skipping bundle analysis: NODE_ENV=production");
                self.sink.send(vec![Message::log(PRODUCTION_WARNING)]);
            }
            return;
        }

        let (tx, mut rx) = mpsc::unbounded_channel();
        spawn_analysis(compilation, self.options.analysis.clone(), tx);
        let sink = Arc::clone(&self.sink);
        tokio::spawn(async move {
            // Each analysis result ships the moment it resolves.
            while let Some(message) = rx.recv().await {
                sink.send(vec![message]);
            }
        });
    }

    /// Wait out unacknowledged batches, then let the connection close
    ///
    /// Bounded: after the attempts run out we close anyway rather than
    /// hold the build process open.
    pub async fn cleanup(&mut self) {
        if self.watching {
            return;
        }
        let sink = Arc::clone(&self.sink);
        retry_with_delay("flush outstanding batches", CLEANUP_ATTEMPTS, CLEANUP_DELAY, || {
            let sink = Arc::clone(&sink);
            async move {
                let pending = sink.outstanding();
                if pending == 0 {
                    Ok(())
                } else {
                    Err(PackboardError::Transport(format!(
                        "{} batch(es) unacknowledged",
                        pending
                    )))
                }
            }
        })
        .await;
    }
}
