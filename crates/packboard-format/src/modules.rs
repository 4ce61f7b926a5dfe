//! Module table: grouped modules within one bundle

use crate::bytes::human_size;
use packboard_core::BundleSizes;

const PERCENT_PRECISION: i32 = 3;

/// Percentage of `part` in `total`, to three significant digits
///
/// Returns `--` when either side is zero or unknown, so a bundle with no
/// analyzable code never shows a division artifact.
pub fn format_percentage(part: u64, total: u64) -> String {
    if part == 0 || total == 0 {
        return "--".to_string();
    }
    let percent = part as f64 / total as f64 * 100.0;
    format!("{}%", to_precision(percent, PERCENT_PRECISION))
}

/// Format to a fixed number of significant digits, never scientific
fn to_precision(value: f64, digits: i32) -> String {
    let magnitude = value.abs().log10().floor() as i32;
    let decimals = (digits - 1 - magnitude).max(0) as usize;
    format!("{:.*}", decimals, value)
}

/// Build the module table for one bundle
///
/// Groups sorted by descending aggregate size (name as tiebreaker so the
/// order is deterministic); heading reflects the bundle's size tier.
pub fn module_table(sizes: &BundleSizes) -> Vec<Vec<String>> {
    let mut groups: Vec<_> = sizes.groups.iter().collect();
    groups.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.name.cmp(&b.name)));

    let mut rows = Vec::with_capacity(groups.len() + 1);
    rows.push(vec![
        "Name".to_string(),
        sizes.tier.heading().to_string(),
        "Percent".to_string(),
    ]);

    for group in groups {
        rows.push(vec![
            group.name.clone(),
            human_size(group.size),
            format_percentage(group.size, sizes.total),
        ]);
    }

    rows
}
