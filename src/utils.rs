//! String helpers shared by the scrapers and logging.
//!
//! Listing pages are mostly CJK text, so everything here slices on character
//! boundaries instead of byte offsets.

/// Return the first `n` characters of `s`.
///
/// Shorter input is returned whole, without padding.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(char_prefix("2024-10-01 公告", 10), "2024-10-01");
/// assert_eq!(char_prefix("2024", 10), "2024");
/// ```
pub fn char_prefix(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to `max` characters with an ellipsis and a count of
/// the dropped bytes appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    let head = char_prefix(s, max);
    if head.len() == s.len() {
        s.to_string()
    } else {
        format!("{}…(+{} bytes)", head, s.len() - head.len())
    }
}
