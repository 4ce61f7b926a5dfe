//! Module grouping: collapsing source modules under display identities
//!
//! Pure path processing, deliberately independent of traversal order so
//! grouping is deterministic. Project files group alone; dependency files
//! collapse into one group per package, with scoped `@scope/name` packages
//! kept as a single unit. When packages nest (`a/node_modules/b`), the
//! innermost package owns the module.

use packboard_core::ModuleGroup;
use std::collections::BTreeMap;
use std::path::Path;

const NODE_MODULES: &str = "node_modules/";

/// Path segment after the innermost `node_modules/`, or `None` for a
/// project-local module
fn dependency_suffix(identifier: &str) -> Option<&str> {
    let normalized = identifier.rfind(NODE_MODULES)?;
    Some(&identifier[normalized + NODE_MODULES.len()..])
}

/// Package name owning a dependency path suffix (`lodash/map.js` ->
/// `lodash`, `@scope/pkg/index.js` -> `@scope/pkg`)
pub(crate) fn package_of(suffix: &str) -> &str {
    let mut segments = suffix.splitn(3, '/');
    let first = segments.next().unwrap_or(suffix);
    if first.starts_with('@') {
        match segments.next() {
            Some(second) => &suffix[..first.len() + 1 + second.len()],
            None => first,
        }
    } else {
        first
    }
}

/// Display name for one module: `./src/app.js` for project files,
/// `~/lodash` (or `~/@scope/pkg`) for dependency files
pub fn group_name(identifier: &str, context: &Path) -> String {
    match dependency_suffix(identifier) {
        Some(suffix) => format!("~/{}", package_of(suffix)),
        None => {
            let path = Path::new(identifier);
            let relative = path.strip_prefix(context).unwrap_or(path);
            format!("./{}", relative.display().to_string().replace('\\', "/"))
        }
    }
}

/// Package-relative file name used as the duplicate-detection key
/// (`lodash/index.js`); project files keep their context-relative path
pub fn package_relative_name(identifier: &str, context: &Path) -> String {
    match dependency_suffix(identifier) {
        Some(suffix) => suffix.to_string(),
        None => {
            let path = Path::new(identifier);
            let relative = path.strip_prefix(context).unwrap_or(path);
            relative.display().to_string().replace('\\', "/")
        }
    }
}

/// Collapse `(identifier, size)` pairs into module groups
///
/// Output is sorted by group name; callers re-sort for display. Input
/// order never affects the result.
pub fn group_modules<'a, I>(modules: I, context: &Path) -> Vec<ModuleGroup>
where
    I: IntoIterator<Item = (&'a str, u64)>,
{
    let mut groups: BTreeMap<String, (u64, usize)> = BTreeMap::new();
    for (identifier, size) in modules {
        let entry = groups.entry(group_name(identifier, context)).or_default();
        entry.0 += size;
        entry.1 += 1;
    }

    groups
        .into_iter()
        .map(|(name, (size, members))| ModuleGroup {
            name,
            size,
            members,
        })
        .collect()
}
