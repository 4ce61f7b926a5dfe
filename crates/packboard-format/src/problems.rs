//! Problems pane: duplicate files and version skews
//!
//! The two sub-reports render independently. An unresolvable project root
//! shows an explicit warning; that state must never read like "no skews".

use crate::bytes::human_size;
use packboard_core::{BundleProblems, DuplicateReport, SkewChain, VersionReport};

const NO_PROBLEMS: &str = "No problems detected!";
const NO_DUPLICATES: &str = "No duplicate files!";
const NO_SKEWS: &str = "No version skews!";
const ROOT_UNRESOLVABLE: &str = "Unable to diagnose possible version skews";

/// Render the duplicates block, or `None` when the report is empty
pub fn format_duplicates(report: &DuplicateReport) -> Option<String> {
    if report.is_empty() {
        return None;
    }

    let mut out = vec!["Duplicate files".to_string(), String::new()];
    for (name, entry) in &report.files {
        out.push(format!("- {}", name));
        out.push(format!(
            "  (files: {}, sources: {}, bytes: {})",
            entry.extra_files,
            entry.extra_sources,
            human_size(entry.wasted_bytes)
        ));
    }
    out.push(String::new());
    out.push(format!("Extra duplicate files (unique): {}", report.extra_files));
    out.push(format!(
        "Extra duplicate sources (non-unique): {}",
        report.extra_sources
    ));
    out.push(format!(
        "Wasted duplicate bytes (non-unique): {}",
        human_size(report.wasted_bytes)
    ));

    Some(out.join("\n"))
}

fn format_chain(chain: &SkewChain) -> String {
    chain
        .iter()
        .map(|package| format!("{}@{}", package.name, package.range))
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Render the version-skew block, or `None` when the report is empty
pub fn format_versions(report: &VersionReport) -> Option<String> {
    if report.is_empty() {
        return None;
    }

    let mut out = vec!["Version skews".to_string(), String::new()];
    for (name, chains) in &report.packages {
        out.push(name.clone());
        for chain in chains {
            out.push(format!("  {}", format_chain(chain)));
        }
    }

    Some(out.join("\n"))
}

/// Render the combined problems pane for one bundle
pub fn format_problems(problems: &BundleProblems) -> String {
    let duplicates = format_duplicates(&problems.duplicates);
    // Versions may be absent when no project root could be resolved.
    let versions = match &problems.versions {
        None => Some(ROOT_UNRESOLVABLE.to_string()),
        Some(report) => format_versions(report),
    };

    match (duplicates, versions) {
        (None, None) => NO_PROBLEMS.to_string(),
        (Some(dup), None) => format!("{}\n\n{}", NO_SKEWS, dup),
        (None, Some(ver)) => format!("{}\n{}", NO_DUPLICATES, ver),
        (Some(dup), Some(ver)) => format!("{}\n{}", dup, ver),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use packboard_core::{DuplicateEntry, PackageRef};
    use std::collections::BTreeMap;

    fn skewed_report() -> VersionReport {
        let mut packages = BTreeMap::new();
        packages.insert(
            "lodash".to_string(),
            vec![
                vec![
                    PackageRef {
                        name: "my-app".into(),
                        range: "^1.0.0".into(),
                    },
                    PackageRef {
                        name: "lodash".into(),
                        range: "^4.17.0".into(),
                    },
                ],
                vec![
                    PackageRef {
                        name: "legacy-widget".into(),
                        range: "^0.3.0".into(),
                    },
                    PackageRef {
                        name: "lodash".into(),
                        range: "^3.0.0".into(),
                    },
                ],
            ],
        );
        VersionReport { packages }
    }

    fn duplicated_report() -> DuplicateReport {
        let mut files = BTreeMap::new();
        files.insert(
            "lodash/index.js".to_string(),
            DuplicateEntry {
                extra_files: 1,
                extra_sources: 1,
                wasted_bytes: 2048,
            },
        );
        DuplicateReport {
            files,
            extra_files: 1,
            extra_sources: 1,
            wasted_bytes: 2048,
        }
    }

    #[test]
    fn test_clean_bundle_renders_single_line() {
        let problems = BundleProblems {
            path: "main.js".into(),
            duplicates: DuplicateReport::default(),
            versions: Some(VersionReport::default()),
        };
        assert_eq!(format_problems(&problems), "No problems detected!");
    }

    #[test]
    fn test_duplicates_only() {
        let problems = BundleProblems {
            path: "main.js".into(),
            duplicates: duplicated_report(),
            versions: Some(VersionReport::default()),
        };
        let text = format_problems(&problems);
        assert!(text.starts_with("No version skews!"));
        assert!(text.contains("- lodash/index.js"));
        assert!(text.contains("(files: 1, sources: 1, bytes: 2 KB)"));
        assert!(text.contains("Wasted duplicate bytes (non-unique): 2 KB"));
    }

    #[test]
    fn test_versions_only() {
        let problems = BundleProblems {
            path: "main.js".into(),
            duplicates: DuplicateReport::default(),
            versions: Some(skewed_report()),
        };
        let text = format_problems(&problems);
        assert!(text.starts_with("No duplicate files!"));
        assert!(text.contains("my-app@^1.0.0 -> lodash@^4.17.0"));
        assert!(text.contains("legacy-widget@^0.3.0 -> lodash@^3.0.0"));
    }

    #[test]
    fn test_unresolvable_root_is_not_no_skews() {
        let problems = BundleProblems {
            path: "main.js".into(),
            duplicates: DuplicateReport::default(),
            versions: None,
        };
        let text = format_problems(&problems);
        assert!(text.contains("Unable to diagnose possible version skews"));
        assert!(!text.contains("No version skews!"));
    }

    #[test]
    fn test_both_blocks_render() {
        let problems = BundleProblems {
            path: "main.js".into(),
            duplicates: duplicated_report(),
            versions: Some(skewed_report()),
        };
        let text = format_problems(&problems);
        assert!(text.contains("Duplicate files"));
        assert!(text.contains("Version skews"));
        assert!(!text.contains("No "));
    }
}
