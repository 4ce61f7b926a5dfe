//! Human-readable byte counts

const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

/// Render a byte count the way the asset and module tables expect
///
/// 1024-based, two decimals with trailing zeros trimmed: `500 B`,
/// `1000 B`, `1.46 KB`, `1 MB`.
pub fn human_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let formatted = format!("{:.2}", value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_sizes_stay_in_bytes() {
        assert_eq!(human_size(0), "0 B");
        assert_eq!(human_size(500), "500 B");
        assert_eq!(human_size(1000), "1000 B");
        assert_eq!(human_size(1023), "1023 B");
    }

    #[test]
    fn test_kilobyte_rounding() {
        assert_eq!(human_size(1024), "1 KB");
        assert_eq!(human_size(1500), "1.46 KB");
        assert_eq!(human_size(2048), "2 KB");
    }

    #[test]
    fn test_larger_units() {
        assert_eq!(human_size(1024 * 1024), "1 MB");
        assert_eq!(human_size(5 * 1024 * 1024 * 1024), "5 GB");
    }
}
