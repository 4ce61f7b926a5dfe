//! Configuration surfaces for both ends of the dashboard
//!
//! The CLI layer fills these in from flags; defaults match a bare
//! `packboard` invocation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default listen port for the consumer's socket
pub const DEFAULT_PORT: u16 = 9838;

/// Consumer-side options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardOptions {
    /// Border/accent color theme name
    #[serde(default = "default_color")]
    pub color: String,

    /// Suppress all panels except log/status/operation/progress
    #[serde(default)]
    pub minimal: bool,

    /// Terminal window title
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Asset names to limit analysis to, relayed in the handshake
    #[serde(default)]
    pub include_assets: Vec<String>,
}

/// Metrics-engine options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisOptions {
    /// Compute the minified size tier
    #[serde(default = "default_true")]
    pub minified: bool,

    /// Compute the minified+gzipped size tier
    #[serde(default = "default_true")]
    pub gzip: bool,

    /// Asset names to limit analysis to (literal prefix or glob pattern)
    #[serde(default)]
    pub include_assets: Vec<String>,

    /// Explicit project root for version-skew resolution
    #[serde(default)]
    pub root: Option<PathBuf>,
}

/// Producer-side options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReporterOptions {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Skip metrics entirely (set from the consumer's handshake)
    #[serde(default)]
    pub minimal: bool,

    /// Production builds cannot be analyzed; warn once instead
    #[serde(default)]
    pub production: bool,

    #[serde(default)]
    pub analysis: AnalysisOptions,
}

fn default_color() -> String {
    "green".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_true() -> bool {
    true
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            color: default_color(),
            minimal: false,
            title: None,
            host: default_host(),
            port: default_port(),
            include_assets: Vec::new(),
        }
    }
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            minified: true,
            gzip: true,
            include_assets: Vec::new(),
            root: None,
        }
    }
}

impl Default for ReporterOptions {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            minimal: false,
            production: false,
            analysis: AnalysisOptions::default(),
        }
    }
}
