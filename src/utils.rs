//! Small helpers shared across the pipeline: log truncation and rounding.

use std::time::Duration;

/// Truncate a string for logging purposes.
///
/// Long strings are cut to at most `max` bytes (backing off to the nearest
/// char boundary, article text is mostly Cyrillic) with an ellipsis and the
/// number of dropped bytes appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…(+{} bytes)", &s[..end], s.len() - end)
}

/// Round `value` to `places` decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Elapsed time in seconds, rounded to milliseconds.
pub fn secs_rounded(elapsed: Duration) -> f64 {
    round_to(elapsed.as_secs_f64(), 3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_for_log_short_string() {
        let s = "Hello, world!";
        assert_eq!(truncate_for_log(s, 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_respects_char_boundaries() {
        // every Cyrillic letter is two bytes in UTF-8
        let s = "жестокость";
        let result = truncate_for_log(s, 3);
        assert!(result.starts_with("ж…"));
        assert!(result.contains("(+18 bytes)"));
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(5.0, 2), 5.0);
        assert_eq!(round_to(33.333333, 2), 33.33);
        assert_eq!(round_to(0.30049, 3), 0.3);
    }

    #[test]
    fn test_secs_rounded() {
        assert_eq!(secs_rounded(Duration::from_millis(1234)), 1.234);
        assert_eq!(secs_rounded(Duration::from_micros(300_400)), 0.3);
    }
}
