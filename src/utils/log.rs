//! Log truncation utilities
//!
//! Captured process output can be arbitrarily large — a full zone dump
//! serialized by `ConvertTo-Json` easily runs to megabytes — so debug logs
//! carry only a bounded prefix of it.

/// Maximum number of bytes of process output to include in a log line.
const TRUNCATE_LIMIT: usize = 256;

/// Largest byte index `<= index` that is a char boundary of `s`.
/// (`str::floor_char_boundary` is stable only since 1.91.0.)
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

/// Bound a captured output stream for logging.
///
/// Output within the limit is passed through unchanged; anything longer is
/// cut at a character boundary and suffixed with the total size, so the log
/// still says how much the process actually produced.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... ({} bytes total)",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}
