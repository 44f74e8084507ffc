//! Human-readable byte counts in decimal (power of 1000) units.

pub const SIZE_UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB", "PB"];
pub const SIZE_REF: f64 = 1000.0;

/// Render `bytes` with three decimals and the largest unit that keeps the
/// magnitude below 1000. Values past the last unit stay in `PB`.
pub fn human_readable(bytes: u64) -> String {
    let mut size = bytes as f64;
    let mut index = 0;

    while size >= SIZE_REF {
        size /= SIZE_REF;
        index += 1;
    }

    let last = SIZE_UNITS.len() - 1;
    if index > last {
        size *= SIZE_REF.powi((index - last) as i32);
        index = last;
    }

    format!("{:.3} {}", size, SIZE_UNITS[index])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_values_stay_in_bytes() {
        assert_eq!(human_readable(0), "0.000 B");
        assert_eq!(human_readable(999), "999.000 B");
    }

    #[test]
    fn test_unit_boundaries() {
        assert_eq!(human_readable(1000), "1.000 KB");
        assert_eq!(human_readable(1_500_000), "1.500 MB");
        assert_eq!(human_readable(8_237_965_312), "8.238 GB");
        assert_eq!(human_readable(2_000_000_000_000), "2.000 TB");
    }

    #[test]
    fn test_caps_at_petabytes() {
        assert_eq!(human_readable(1_000_000_000_000_000), "1.000 PB");
        assert_eq!(human_readable(1_000_000_000_000_000_000), "1000.000 PB");
        assert_eq!(human_readable(u64::MAX), "18446.744 PB");
    }
}
