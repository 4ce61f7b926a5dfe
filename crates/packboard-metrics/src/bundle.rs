//! Bundle selection and filtering
//!
//! Hot-update artifacts and non-JS assets (source maps, stylesheets) are
//! never analyzed. Caller-supplied include filters drop unmatched bundles
//! before any analysis runs.

use glob::Pattern;
use packboard_core::{AnalysisOptions, BuildModule, Compilation};
use std::path::{Path, PathBuf};

/// One emitted output file queued for analysis
#[derive(Debug, Clone)]
pub struct Bundle {
    /// Logical output name
    pub path: String,
    /// Base directory used for dependency resolution
    pub context: PathBuf,
    pub modules: Vec<BuildModule>,
}

fn is_analyzable(name: &str) -> bool {
    // Hot reload assets break analysis and their contents are already
    // included in the new assets. Source maps are not parseable code.
    !name.contains(".hot-update.") && Path::new(name).extension().is_some_and(|ext| ext == "js")
}

fn matches_include(name: &str, include: &[String]) -> bool {
    if include.is_empty() {
        return true;
    }
    include.iter().any(|filter| {
        name.starts_with(filter.as_str())
            || Pattern::new(filter).map(|p| p.matches(name)).unwrap_or(false)
    })
}

/// Select the bundles a compilation is allowed to analyze
pub fn collect_bundles(compilation: &Compilation, options: &AnalysisOptions) -> Vec<Bundle> {
    compilation
        .assets
        .iter()
        .filter(|asset| is_analyzable(&asset.name))
        .filter(|asset| matches_include(&asset.name, &options.include_assets))
        .map(|asset| Bundle {
            path: asset.name.clone(),
            context: compilation.context.clone(),
            modules: asset.modules.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use packboard_core::BuildAsset;

    fn compilation(names: &[&str]) -> Compilation {
        Compilation {
            context: PathBuf::from("/project"),
            assets: names.iter().map(|n| BuildAsset::new(*n, 100)).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_hot_update_and_non_js_excluded() {
        let compilation = compilation(&[
            "main.js",
            "main.js.map",
            "0.abc123.hot-update.js",
            "styles.css",
        ]);
        let bundles = collect_bundles(&compilation, &AnalysisOptions::default());
        let names: Vec<_> = bundles.iter().map(|b| b.path.as_str()).collect();
        assert_eq!(names, vec!["main.js"]);
    }

    #[test]
    fn test_literal_prefix_filter() {
        let compilation = compilation(&["main.js", "vendor.js", "admin.js"]);
        let options = AnalysisOptions {
            include_assets: vec!["main".into()],
            ..Default::default()
        };
        let bundles = collect_bundles(&compilation, &options);
        assert_eq!(bundles.len(), 1);
        assert_eq!(bundles[0].path, "main.js");
    }

    #[test]
    fn test_glob_filter() {
        let compilation = compilation(&["main.abc123.js", "vendor.def456.js", "admin.js"]);
        let options = AnalysisOptions {
            include_assets: vec!["vendor.*".into()],
            ..Default::default()
        };
        let bundles = collect_bundles(&compilation, &options);
        assert_eq!(bundles.len(), 1);
        assert_eq!(bundles[0].path, "vendor.def456.js");
    }

    #[test]
    fn test_empty_filter_keeps_everything_analyzable() {
        let compilation = compilation(&["a.js", "b.js"]);
        let bundles = collect_bundles(&compilation, &AnalysisOptions::default());
        assert_eq!(bundles.len(), 2);
    }
}
