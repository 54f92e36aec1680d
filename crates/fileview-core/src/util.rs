//! Small text and clock helpers shared by the gallery modules.

/// Longest value echoed into a log line.
pub const LOG_TEXT_LIMIT: usize = 180;

/// Trimmed text, or `None` when nothing but whitespace is left.
pub fn non_blank(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}

/// Trim and cut `value` to at most `limit` characters.
pub fn truncate_chars(value: &str, limit: usize) -> String {
    value.trim().chars().take(limit).collect()
}

/// Current Unix timestamp in milliseconds.
pub fn unix_timestamp_millis_now() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
