//! Utility functions for formatting times, sizes and rates.
//!
//! These helpers are shared by the progress bar renderer and the output
//! summary so that both speak the same units.

use chrono::TimeDelta;

/// Unit prefixes for binary (1024-based) sizes, smallest first.
const SIZE_PREFIXES: [&str; 8] = ["", "K", "M", "G", "T", "P", "E", "Z"];

/// Formats whole seconds as HH:MM:SS (e.g., 3661 -> "01:01:01").
///
/// Hours are not wrapped at 24. Negative inputs are prefixed with `-`.
#[must_use]
pub fn human_readable_time(seconds: i64) -> String {
    let sign = if seconds < 0 { "-" } else { "" };
    let total_seconds = seconds.unsigned_abs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;
    format!("{sign}{hours:02}:{minutes:02}:{secs:02}")
}

/// Formats a signed duration as HH:MM:SS, truncating sub-second parts.
#[must_use]
pub fn format_time_delta(delta: TimeDelta) -> String {
    human_readable_time(delta.num_seconds())
}

/// Formats a count with binary unit prefixes (e.g., 1536 bytes -> "1.50 KB").
///
/// The value is divided by 1024 while it is at least 1024 and a larger
/// prefix exists; zettabytes are the largest unit.
#[must_use]
pub fn format_size(size: u64, base_unit: &str, decimal_places: usize) -> String {
    let mut value = size as f64;
    let mut prefix = SIZE_PREFIXES[0];
    for next in &SIZE_PREFIXES[1..] {
        if value < 1024.0 {
            break;
        }
        value /= 1024.0;
        prefix = next;
    }
    format!("{value:.decimal_places$} {prefix}{base_unit}")
}

/// Formats a byte count with two decimals (e.g., 0 -> "0.00 B").
#[must_use]
pub fn human_readable_size(bytes: u64) -> String {
    format_size(bytes, "B", 2)
}

/// Formats bits per second as megabits per second (e.g., 2500000 -> "2.50 Mbps").
#[must_use]
pub fn format_bitrate_mbps(bits_per_second: u64) -> String {
    format!("{:.2} Mbps", bits_per_second as f64 / 1_000_000.0)
}

/// Parses an ffprobe frame rate, either rational ("30000/1001") or plain ("25").
///
/// Returns `None` for unparseable input or a zero denominator.
#[must_use]
pub fn parse_frame_rate(rate: &str) -> Option<f64> {
    let rate = rate.trim();
    let value = match rate.split_once('/') {
        Some((num, den)) => {
            let num = num.trim().parse::<f64>().ok()?;
            let den = den.trim().parse::<f64>().ok()?;
            if den == 0.0 {
                return None;
            }
            num / den
        }
        None => rate.parse::<f64>().ok()?,
    };
    value.is_finite().then_some(value)
}
