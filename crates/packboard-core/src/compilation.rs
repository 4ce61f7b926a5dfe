//! Build-result input consumed by the producer and the metrics engine
//!
//! A `Compilation` is the structured summary a build pipeline hands to the
//! instrumentation adapter when a compile finishes: per-output-file entries
//! with their constituent modules, plus error/warning message lists.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Discriminator separating analyzable code modules from non-code assets
/// (stylesheets, images, source maps pulled in as modules)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleKind {
    Code,
    Asset,
}

/// One source module inside an emitted bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildModule {
    /// Path-like identifier (`src/app.js`, `node_modules/lodash/map.js`)
    pub identifier: String,
    /// Byte size of the module as emitted
    pub size: u64,
    /// Full source text, needed only transiently for analysis
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub kind: ModuleKind,
}

impl BuildModule {
    pub fn new(identifier: impl Into<String>, size: u64) -> Self {
        Self {
            identifier: identifier.into(),
            size,
            source: None,
            kind: ModuleKind::Code,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_kind(mut self, kind: ModuleKind) -> Self {
        self.kind = kind;
        self
    }
}

/// One emitted build output file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildAsset {
    /// Logical output name (`main.js`, `vendor.abc123.js`)
    pub name: String,
    pub size: u64,
    /// Full text content of the emitted file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Modules bundled into this output file
    #[serde(default)]
    pub modules: Vec<BuildModule>,
}

impl BuildAsset {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
            source: None,
            modules: Vec::new(),
        }
    }

    pub fn with_modules(mut self, modules: Vec<BuildModule>) -> Self {
        self.modules = modules;
        self
    }
}

/// A finished build's structured summary
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Compilation {
    /// Base directory used for dependency resolution
    pub context: PathBuf,
    pub assets: Vec<BuildAsset>,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl Compilation {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// The minimal summary shipped inside a `stats` message
    ///
    /// Message strings only; the full module/asset trees stay on the
    /// producer side so payload size stays bounded.
    pub fn summary(&self) -> BuildSummary {
        BuildSummary {
            errors: self.errors.clone(),
            warnings: self.warnings.clone(),
        }
    }
}

/// Minimal build summary carried in `stats` messages
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BuildSummary {
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
}
