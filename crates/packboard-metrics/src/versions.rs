//! Version-skew detection
//!
//! A package installed at more than one version within a bundle's
//! dependency graph is a skew. The chain of dependents that pulls each
//! version in is reconstructed from nested `node_modules` paths plus the
//! dependency tables in each package manifest.

use packboard_core::{ModuleKind, PackageRef, Result, SkewChain, VersionReport};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use crate::bundle::Bundle;
use crate::grouping::package_of;

const MANIFEST: &str = "package.json";

#[derive(Debug, Clone, Default, Deserialize)]
struct Manifest {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    dependencies: BTreeMap<String, String>,
    #[serde(default, rename = "devDependencies")]
    dev_dependencies: BTreeMap<String, String>,
}

impl Manifest {
    fn range_for(&self, package: &str) -> String {
        self.dependencies
            .get(package)
            .or_else(|| self.dev_dependencies.get(package))
            .cloned()
            .unwrap_or_else(|| "*".to_string())
    }
}

fn read_manifest(dir: &Path) -> Result<Manifest> {
    let text = fs::read_to_string(dir.join(MANIFEST))?;
    Ok(serde_json::from_str(&text)?)
}

/// Resolve the project root used for version analysis
///
/// Bundle context if it holds a manifest, else the working directory if it
/// does, else the caller override. `None` means version analysis is
/// skipped for this bundle; that is a degraded capability, not a failure.
pub fn resolve_project_root(context: &Path, override_root: Option<&Path>) -> Option<PathBuf> {
    if context.join(MANIFEST).is_file() {
        return Some(context.to_path_buf());
    }
    if let Ok(cwd) = std::env::current_dir() {
        if cwd.join(MANIFEST).is_file() {
            return Some(cwd);
        }
    }
    override_root.map(Path::to_path_buf)
}

/// The chain of packages a module identifier passes through
/// (`node_modules/a/node_modules/b/i.js` -> `["a", "b"]`)
pub fn package_chain(identifier: &str) -> Vec<String> {
    identifier
        .split("node_modules/")
        .skip(1)
        .map(package_of)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

/// Detect version skews for one bundle under a resolved project root
pub fn analyze_versions(bundle: &Bundle, root: &Path) -> Result<VersionReport> {
    let root_manifest = read_manifest(root)?;
    let root_name = root_manifest
        .name
        .clone()
        .unwrap_or_else(|| "project".to_string());
    let root_version = root_manifest
        .version
        .clone()
        .unwrap_or_else(|| "*".to_string());

    let chains: BTreeSet<Vec<String>> = bundle
        .modules
        .iter()
        .filter(|module| module.kind == ModuleKind::Code)
        .map(|module| package_chain(&module.identifier))
        .filter(|chain| !chain.is_empty())
        .collect();

    // package -> installed version -> chains pulling that version in
    let mut installs: BTreeMap<String, BTreeMap<String, Vec<SkewChain>>> = BTreeMap::new();

    for chain in chains {
        let mut dir = root.to_path_buf();
        let mut current = root_manifest.clone();
        let mut refs: SkewChain = vec![PackageRef {
            name: root_name.clone(),
            range: root_version.clone(),
        }];

        let mut resolved = true;
        for package in &chain {
            let range = current.range_for(package);
            dir = dir.join("node_modules").join(package);
            match read_manifest(&dir) {
                Ok(manifest) => {
                    refs.push(PackageRef {
                        name: package.clone(),
                        range,
                    });
                    current = manifest;
                }
                Err(_) => {
                    // Install tree disagrees with the bundle; nothing to report.
                    resolved = false;
                    break;
                }
            }
        }
        if !resolved {
            continue;
        }

        let package = chain.last().cloned().unwrap_or_default();
        let version = current.version.unwrap_or_else(|| "0.0.0".to_string());
        installs
            .entry(package)
            .or_default()
            .entry(version)
            .or_default()
            .push(refs);
    }

    let mut packages = BTreeMap::new();
    for (package, versions) in installs {
        if versions.len() > 1 {
            let chains: Vec<SkewChain> = versions.into_values().flatten().collect();
            packages.insert(package, chains);
        }
    }

    Ok(VersionReport { packages })
}
