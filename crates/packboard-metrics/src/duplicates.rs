//! Duplicate-file detection within a bundle's dependency graph
//!
//! Modules are keyed by package-relative file name; a name that occurs
//! more than once is duplicated. Byte-for-byte identical copies are found
//! by content fingerprint, and their redundant bytes counted as waste.

use packboard_core::{DuplicateEntry, DuplicateReport, ModuleKind};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

use crate::bundle::Bundle;
use crate::grouping::package_relative_name;

fn fingerprint(source: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(source.trim().as_bytes());
    hex::encode(hasher.finalize())
}

/// Detect duplicated files in one bundle
///
/// A bundle with no duplicates yields an empty report, which the
/// formatter renders as "No duplicate files!".
pub fn analyze_duplicates(bundle: &Bundle) -> DuplicateReport {
    // name -> list of (fingerprint, size)
    let mut by_name: BTreeMap<String, Vec<(Option<String>, u64)>> = BTreeMap::new();

    for module in &bundle.modules {
        if module.kind != ModuleKind::Code {
            continue;
        }
        let name = package_relative_name(&module.identifier, &bundle.context);
        let hash = module.source.as_deref().map(fingerprint);
        let size = module
            .source
            .as_ref()
            .map(|s| s.len() as u64)
            .unwrap_or(module.size);
        by_name.entry(name).or_default().push((hash, size));
    }

    let mut report = DuplicateReport::default();

    for (name, occurrences) in by_name {
        if occurrences.len() < 2 {
            continue;
        }

        let extra_files = occurrences.len() - 1;

        // Sources without text can never be proven identical.
        let mut by_hash: BTreeMap<&str, Vec<u64>> = BTreeMap::new();
        for (hash, size) in &occurrences {
            if let Some(hash) = hash.as_deref() {
                by_hash.entry(hash).or_default().push(*size);
            }
        }

        let mut extra_sources = 0;
        let mut wasted_bytes = 0;
        for sizes in by_hash.values() {
            if sizes.len() > 1 {
                extra_sources += sizes.len() - 1;
                wasted_bytes += sizes.iter().skip(1).sum::<u64>();
            }
        }

        report.extra_files += extra_files;
        report.extra_sources += extra_sources;
        report.wasted_bytes += wasted_bytes;
        report.files.insert(
            name,
            DuplicateEntry {
                extra_files,
                extra_sources,
                wasted_bytes,
            },
        );
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use packboard_core::BuildModule;
    use std::path::PathBuf;

    fn bundle(modules: Vec<BuildModule>) -> Bundle {
        Bundle {
            path: "main.js".into(),
            context: PathBuf::from("/project"),
            modules,
        }
    }

    #[test]
    fn test_no_duplicates_yields_empty_report() {
        let report = analyze_duplicates(&bundle(vec![
            BuildModule::new("/project/src/a.js", 0).with_source("a"),
            BuildModule::new("/project/src/b.js", 0).with_source("b"),
        ]));
        assert!(report.is_empty());
    }

    #[test]
    fn test_identical_copies_counted_as_waste() {
        let source = "module.exports = function identity(x) { return x; };";
        let report = analyze_duplicates(&bundle(vec![
            BuildModule::new("/project/node_modules/lodash/identity.js", 0).with_source(source),
            BuildModule::new(
                "/project/node_modules/cli/node_modules/lodash/identity.js",
                0,
            )
            .with_source(source),
        ]));

        assert_eq!(report.extra_files, 1);
        assert_eq!(report.extra_sources, 1);
        assert_eq!(report.wasted_bytes, source.len() as u64);
        let entry = report.files.get("lodash/identity.js").unwrap();
        assert_eq!(entry.extra_files, 1);
    }

    #[test]
    fn test_same_name_different_content_is_file_dup_only() {
        let report = analyze_duplicates(&bundle(vec![
            BuildModule::new("/project/node_modules/pkg/index.js", 0).with_source("v1"),
            BuildModule::new("/project/node_modules/dep/node_modules/pkg/index.js", 0)
                .with_source("v2 entirely different"),
        ]));

        assert_eq!(report.extra_files, 1);
        assert_eq!(report.extra_sources, 0);
        assert_eq!(report.wasted_bytes, 0);
    }

    #[test]
    fn test_three_copies() {
        let source = "shared";
        let report = analyze_duplicates(&bundle(vec![
            BuildModule::new("/project/node_modules/p/i.js", 0).with_source(source),
            BuildModule::new("/project/node_modules/a/node_modules/p/i.js", 0)
                .with_source(source),
            BuildModule::new("/project/node_modules/b/node_modules/p/i.js", 0)
                .with_source(source),
        ]));

        assert_eq!(report.extra_files, 2);
        assert_eq!(report.extra_sources, 2);
        assert_eq!(report.wasted_bytes, 2 * source.len() as u64);
    }
}
