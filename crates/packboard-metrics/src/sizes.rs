//! Size analysis: full / minified / minified+gzipped tiers per module
//!
//! The minified tier is an estimate (comments stripped, whitespace
//! collapsed) rather than the output of a real minifier; it exists to rank
//! modules within a bundle, not to promise byte-exact production sizes.

use flate2::{write::GzEncoder, Compression};
use packboard_core::{
    AnalysisOptions, BuildModule, BundleSizes, ModuleKind, Result, SizeRecord, SizeTier,
};
use std::io::Write;

use crate::bundle::Bundle;
use crate::grouping::group_modules;

/// The most compressed tier the options allow (gzip > minified > full)
pub fn chosen_tier(options: &AnalysisOptions) -> SizeTier {
    if options.gzip {
        SizeTier::MinifiedGzip
    } else if options.minified {
        SizeTier::Minified
    } else {
        SizeTier::Full
    }
}

#[derive(PartialEq)]
enum Lex {
    Code,
    LineComment,
    BlockComment,
    Str(char),
}

/// Strip comments and collapse whitespace runs
fn minify(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut state = Lex::Code;
    let mut chars = source.chars().peekable();
    let mut pending_space = false;

    while let Some(c) = chars.next() {
        match state {
            Lex::Code => match c {
                '/' if chars.peek() == Some(&'/') => {
                    chars.next();
                    state = Lex::LineComment;
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    state = Lex::BlockComment;
                }
                '"' | '\'' | '`' => {
                    if pending_space && !out.is_empty() {
                        out.push(' ');
                    }
                    pending_space = false;
                    out.push(c);
                    state = Lex::Str(c);
                }
                c if c.is_whitespace() => pending_space = true,
                c => {
                    if pending_space && !out.is_empty() {
                        out.push(' ');
                    }
                    pending_space = false;
                    out.push(c);
                }
            },
            Lex::LineComment => {
                if c == '\n' {
                    pending_space = true;
                    state = Lex::Code;
                }
            }
            Lex::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    pending_space = true;
                    state = Lex::Code;
                }
            }
            Lex::Str(delim) => {
                out.push(c);
                if c == '\\' {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                } else if c == delim {
                    state = Lex::Code;
                }
            }
        }
    }

    out
}

/// Estimated minified byte size of a source text
pub fn minified_estimate(source: &str) -> u64 {
    minify(source).len() as u64
}

/// Gzipped byte size at the default compression level
pub fn gzip_size(data: &[u8]) -> Result<u64> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    let compressed = encoder.finish()?;
    Ok(compressed.len() as u64)
}

fn size_record(module: &BuildModule, options: &AnalysisOptions) -> Result<SizeRecord> {
    let full = module
        .source
        .as_ref()
        .map(|s| s.len() as u64)
        .unwrap_or(module.size);

    let minified_text = match (&module.source, options.minified) {
        (Some(source), true) => Some(minify(source)),
        _ => None,
    };
    let minified = minified_text.as_ref().map(|t| t.len() as u64);

    let min_gz = if options.gzip {
        let text = minified_text
            .as_deref()
            .or(module.source.as_deref());
        match text {
            Some(text) => Some(gzip_size(text.as_bytes())?),
            None => None,
        }
    } else {
        None
    };

    Ok(SizeRecord {
        full,
        minified,
        min_gz,
    })
}

/// Compute per-bundle size analysis: module groups summed at the chosen
/// tier, plus the bundle's total analyzed code size
pub fn analyze_sizes(bundles: &[Bundle], options: &AnalysisOptions) -> Result<Vec<BundleSizes>> {
    let tier = chosen_tier(options);

    bundles
        .iter()
        .map(|bundle| {
            let mut pairs: Vec<(&str, u64)> = Vec::new();
            let mut total: u64 = 0;
            for module in &bundle.modules {
                if module.kind != ModuleKind::Code {
                    continue;
                }
                let record = size_record(module, options)?;
                let size = record.at(tier);
                total += size;
                pairs.push((module.identifier.as_str(), size));
            }

            Ok(BundleSizes {
                path: bundle.path.clone(),
                tier,
                groups: group_modules(pairs, &bundle.context),
                total,
            })
        })
        .collect()
}
