//! # packboard-core
//!
//! Core types for the packboard build dashboard.
//!
//! packboard splits into a producer half (an instrumentation adapter
//! embedded in a build pipeline) and a consumer half (a terminal
//! dashboard). This crate defines everything both halves agree on:
//!
//! - The message protocol (`Message`, `Frame`, `Reply`, `WireError`)
//! - The build-result input shape (`Compilation`, `BuildAsset`, `BuildModule`)
//! - Analysis report shapes carried by `sizes`/`problems` messages
//! - Configuration surfaces for both ends
//! - The unified error type and bounded-retry primitives

mod compilation;
mod config;
mod error;
mod protocol;
mod report;
pub mod retry;

pub use compilation::{BuildAsset, BuildModule, BuildSummary, Compilation, ModuleKind};
pub use config::{AnalysisOptions, DashboardOptions, ReporterOptions, DEFAULT_PORT};
pub use error::{PackboardError, Result};
pub use retry::{fail_open, retry_with_delay};

pub use protocol::{
    decode_analysis, AnalysisOutcome, Frame, Handshake, Message, Reply, StatsPayload, WireError,
};
pub use report::{
    BundleProblems, BundleSizes, DuplicateEntry, DuplicateReport, ModuleGroup, PackageRef,
    SizeRecord, SizeTier, SkewChain, VersionReport,
};
