//! Analysis report shapes carried by `sizes` and `problems` messages
//!
//! All maps are `BTreeMap` so that reports serialize in a deterministic
//! order regardless of analysis traversal order.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which byte measurement a rendering pass uses
///
/// Only one tier is used within a single pass; the table heading reflects
/// the chosen tier. The most compressed available tier wins
/// (gzip > minified > full).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeTier {
    Full,
    Minified,
    MinifiedGzip,
}

impl SizeTier {
    /// Column heading for the module table
    pub fn heading(&self) -> &'static str {
        match self {
            Self::Full => "Size",
            Self::Minified => "Size (min)",
            Self::MinifiedGzip => "Size (min+gz)",
        }
    }
}

/// Byte sizes of one module at each computed tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SizeRecord {
    pub full: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minified: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_gz: Option<u64>,
}

impl SizeRecord {
    /// Size at the given tier, falling back to the full size when the
    /// compressed tier was not computed
    pub fn at(&self, tier: SizeTier) -> u64 {
        match tier {
            SizeTier::Full => self.full,
            SizeTier::Minified => self.minified.unwrap_or(self.full),
            SizeTier::MinifiedGzip => self
                .min_gz
                .or(self.minified)
                .unwrap_or(self.full),
        }
    }
}

/// Source modules collapsed under one display identity
///
/// Either a single project file or a whole dependency package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleGroup {
    /// Display name (`./src/index.js` or `~/lodash`)
    pub name: String,
    /// Aggregate size at the bundle's chosen tier
    pub size: u64,
    /// How many source modules collapsed into this group
    pub members: usize,
}

/// Size analysis for one emitted bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleSizes {
    /// Output name of the bundle
    pub path: String,
    pub tier: SizeTier,
    pub groups: Vec<ModuleGroup>,
    /// Total analyzed code size at `tier` (excludes non-code modules)
    pub total: u64,
}

/// Accounting for one duplicated file name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DuplicateEntry {
    /// Redundant files beyond the first occurrence
    pub extra_files: usize,
    /// Redundant byte-for-byte identical sources
    pub extra_sources: usize,
    /// Bytes spent on those redundant identical copies
    pub wasted_bytes: u64,
}

/// Duplicate-file analysis for one bundle
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DuplicateReport {
    /// Per duplicated package-relative file name
    #[serde(default)]
    pub files: BTreeMap<String, DuplicateEntry>,
    pub extra_files: usize,
    pub extra_sources: usize,
    pub wasted_bytes: u64,
}

impl DuplicateReport {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// One link in a dependency chain: `name@range`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRef {
    pub name: String,
    pub range: String,
}

/// Chain of `dependent@range -> ... -> dependency@range`
pub type SkewChain = Vec<PackageRef>;

/// Version-skew analysis for one bundle
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VersionReport {
    /// Packages required at more than one version, with the chains that
    /// pull each version in
    #[serde(default)]
    pub packages: BTreeMap<String, Vec<SkewChain>>,
}

impl VersionReport {
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

/// Combined problem report for one bundle
///
/// `versions` is `None` when no project root could be resolved, which is a
/// degraded-capability signal distinct from an empty (skew-free) report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleProblems {
    pub path: String,
    #[serde(default)]
    pub duplicates: DuplicateReport,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub versions: Option<VersionReport>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_headings() {
        assert_eq!(SizeTier::Full.heading(), "Size");
        assert_eq!(SizeTier::MinifiedGzip.heading(), "Size (min+gz)");
    }

    #[test]
    fn test_size_record_fallback() {
        let record = SizeRecord {
            full: 1000,
            minified: Some(600),
            min_gz: None,
        };
        assert_eq!(record.at(SizeTier::Full), 1000);
        assert_eq!(record.at(SizeTier::Minified), 600);
        // Gzip was not computed, fall back to the next tier up.
        assert_eq!(record.at(SizeTier::MinifiedGzip), 600);
    }

    #[test]
    fn test_empty_reports() {
        assert!(DuplicateReport::default().is_empty());
        assert!(VersionReport::default().is_empty());
    }

    #[test]
    fn test_problems_serde_round_trip() {
        let mut files = BTreeMap::new();
        files.insert(
            "lodash/index.js".to_string(),
            DuplicateEntry {
                extra_files: 1,
                extra_sources: 1,
                wasted_bytes: 2048,
            },
        );
        let problems = BundleProblems {
            path: "main.js".into(),
            duplicates: DuplicateReport {
                files,
                extra_files: 1,
                extra_sources: 1,
                wasted_bytes: 2048,
            },
            versions: None,
        };
        let wire = serde_json::to_string(&problems).unwrap();
        let restored: BundleProblems = serde_json::from_str(&wire).unwrap();
        assert_eq!(restored, problems);
        // Unresolvable root stays distinct from an empty report.
        assert!(restored.versions.is_none());
    }
}
