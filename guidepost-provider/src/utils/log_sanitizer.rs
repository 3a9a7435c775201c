//! Log truncation for response bodies.
//!
//! Destination payloads for busy junctions run to many kilobytes; only the
//! head is useful in a log line.

/// Maximum number of characters kept in a log line.
const TRUNCATE_LIMIT: usize = 256;

/// Truncate a string for logging.
///
/// Counts characters, not bytes, so multi-byte labels are never split.
pub fn truncate_for_log(s: &str) -> String {
    match s.char_indices().nth(TRUNCATE_LIMIT) {
        None => s.to_string(),
        Some((cut, _)) => format!(
            "{}... [truncated, total {} bytes]",
            &s[..cut],
            s.len()
        ),
    }
}
