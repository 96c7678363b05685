//! Formatting utilities for human-readable sizes.

use crate::config::{SIZE_BASE, SIZE_UNITS};

/// Format a byte count as a human-readable size (e.g., "1.5 KB").
///
/// # Arguments
///
/// * `bytes` - Byte count; `None` is treated as zero
///
/// # Returns
///
/// The value scaled to the largest unit that keeps it at or above one,
/// rounded to two decimals with trailing zeros stripped.
///
/// # Examples
///
/// ```
/// use dropbay_core::format::format_file_size;
///
/// assert_eq!(format_file_size(Some(0)), "0 Bytes");
/// assert_eq!(format_file_size(Some(1024)), "1 KB");
/// assert_eq!(format_file_size(Some(1536)), "1.5 KB");
/// assert_eq!(format_file_size(None), "0 Bytes");
/// ```
pub fn format_file_size(bytes: Option<u64>) -> String {
    let bytes = match bytes {
        None | Some(0) => return "0 Bytes".to_string(),
        Some(b) => b,
    };

    // floor(log_1024(bytes)) without floating point error at exact powers
    let mut unit = 0;
    let mut scaled = bytes;
    while scaled >= SIZE_BASE && unit < SIZE_UNITS.len() - 1 {
        scaled /= SIZE_BASE;
        unit += 1;
    }

    let value = bytes as f64 / (SIZE_BASE as f64).powi(unit as i32);
    format!("{} {}", trim_decimals(value), SIZE_UNITS[unit])
}

/// Round to two decimals and drop trailing zeros ("1.50" -> "1.5", "2.00" -> "2").
fn trim_decimals(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}
