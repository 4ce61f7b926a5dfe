//! # packboard-format
//!
//! Pure formatting functions mapping analysis results to row-oriented
//! tables and human-readable text. Nothing in this crate touches the
//! terminal; the dashboard widgets consume these outputs verbatim, which
//! keeps every display rule unit-testable without a screen.

mod assets;
mod bytes;
mod modules;
mod output;
mod problems;

pub use assets::{asset_table, AssetRow};
pub use bytes::human_size;
pub use modules::{format_percentage, module_table};
pub use output::{format_build_output, is_likely_syntax_error};
pub use problems::{format_duplicates, format_problems, format_versions};
