//! Countdown display formatting.

/// Format a number of seconds as a zero-padded `mm:ss` string.
///
/// Negative or non-finite input formats as `"00:00"` rather than erroring;
/// fractional seconds are truncated.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "00:00".to_string();
    }

    let total = seconds.floor() as u64;
    let mins = total / 60;
    let secs = total % 60;
    format!("{mins:02}:{secs:02}")
}
