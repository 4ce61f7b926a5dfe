//! Asset table: the full emitted bundles

use crate::bytes::human_size;
use serde::{Deserialize, Serialize};

/// One emitted asset as the dashboard sees it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRow {
    pub name: String,
    /// A missing size is treated as zero
    pub size: Option<u64>,
}

impl AssetRow {
    pub fn new(name: impl Into<String>, size: Option<u64>) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }
}

/// Build the asset table: header, one row per asset in input order, and a
/// grand total row that is always last and always present
pub fn asset_table(assets: &[AssetRow]) -> Vec<Vec<String>> {
    let mut rows = Vec::with_capacity(assets.len() + 2);
    rows.push(vec!["Name".to_string(), "Size".to_string()]);

    let mut total: u64 = 0;
    for asset in assets {
        let size = asset.size.unwrap_or(0);
        total += size;
        rows.push(vec![asset.name.clone(), human_size(size)]);
    }

    rows.push(vec!["Total".to_string(), human_size(total)]);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_size_renders_as_zero() {
        let assets = vec![
            AssetRow::new("a.js", Some(500)),
            AssetRow::new("b.js", None),
        ];
        let table = asset_table(&assets);
        assert_eq!(
            table,
            vec![
                vec!["Name".to_string(), "Size".to_string()],
                vec!["a.js".to_string(), "500 B".to_string()],
                vec!["b.js".to_string(), "0 B".to_string()],
                vec!["Total".to_string(), "500 B".to_string()],
            ]
        );
    }

    #[test]
    fn test_total_row_present_for_empty_input() {
        let table = asset_table(&[]);
        assert_eq!(table.len(), 2);
        assert_eq!(table[1], vec!["Total".to_string(), "0 B".to_string()]);
    }

    #[test]
    fn test_input_order_preserved_and_total_sums() {
        let assets = vec![
            AssetRow::new("z.js", Some(500)),
            AssetRow::new("a.js", Some(0)),
            AssetRow::new("a.js", Some(500)),
        ];
        let table = asset_table(&assets);
        assert_eq!(table[1][0], "z.js");
        assert_eq!(table[2][1], "0 B");
        assert_eq!(table.last().unwrap()[1], "1000 B");
    }
}
