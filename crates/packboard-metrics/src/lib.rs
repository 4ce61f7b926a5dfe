//! # packboard-metrics
//!
//! The metrics engine: given a finished build's bundle set, produce the
//! `sizes` and `problems` analyses the dashboard renders.
//!
//! The three analyses (sizes, duplicates, versions) run as independent
//! async tasks per build. A failure in one is serialized onto its own
//! message and never prevents the others from completing.

mod bundle;
mod duplicates;
mod engine;
mod grouping;
mod sizes;
mod versions;

pub use bundle::{collect_bundles, Bundle};
pub use duplicates::analyze_duplicates;
pub use engine::spawn_analysis;
pub use grouping::{group_modules, group_name, package_relative_name};
pub use sizes::{analyze_sizes, chosen_tier, gzip_size, minified_estimate};
pub use versions::{analyze_versions, package_chain, resolve_project_root};
