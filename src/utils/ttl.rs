//! TTL string to TimeSpan conversion
//!
//! The `DnsServer` cmdlets take `-TimeToLive` as a .NET TimeSpan literal
//! (`hh:mm:ss`, or `d.hh:mm:ss` for a day or more). Callers express TTLs in
//! the more convenient unit-suffix form (`"1h"`, `"30m"`, `"1h 30m"`), and
//! [`format_ttl`] converts between the two.

use crate::error::{DnsServerError, Result};

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 60 * 60;
const SECS_PER_DAY: u64 = 24 * 60 * 60;

/// Convert a unit-suffix duration string to the TimeSpan token the
/// `DnsServer` module expects.
///
/// Accepts one or more whitespace-separated `<number><unit>` segments with
/// units `d`, `h`, `m`, `s`. Segments are summed, so `"90m"` and `"1h 30m"`
/// produce the same token.
///
/// Malformed input fails fast with [`DnsServerError::InvalidTtl`] before any
/// process is spawned; there is deliberately no silent default.
///
/// # Examples
///
/// ```rust
/// use windns::format_ttl;
///
/// assert_eq!(format_ttl("1h").unwrap(), "01:00:00");
/// assert_eq!(format_ttl("1h 30m").unwrap(), "01:30:00");
/// assert_eq!(format_ttl("2d").unwrap(), "2.00:00:00");
/// assert!(format_ttl("bogus").is_err());
/// ```
pub fn format_ttl(ttl: &str) -> Result<String> {
    let invalid = |detail: &str| DnsServerError::InvalidTtl {
        value: ttl.to_string(),
        detail: detail.to_string(),
    };

    if ttl.trim().is_empty() {
        return Err(invalid("empty duration"));
    }

    let mut total_secs: u64 = 0;
    for segment in ttl.split_whitespace() {
        let unit_at = segment
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| invalid("missing unit suffix (expected d, h, m or s)"))?;
        let (digits, unit) = segment.split_at(unit_at);

        if digits.is_empty() {
            return Err(invalid("missing numeric value"));
        }
        let value: u64 = digits
            .parse()
            .map_err(|_| invalid("numeric value out of range"))?;

        let unit_secs = match unit {
            "d" => SECS_PER_DAY,
            "h" => SECS_PER_HOUR,
            "m" => SECS_PER_MINUTE,
            "s" => 1,
            other => {
                return Err(invalid(&format!(
                    "unknown unit '{other}' (expected d, h, m or s)"
                )));
            }
        };

        total_secs = total_secs
            .checked_add(value.saturating_mul(unit_secs))
            .ok_or_else(|| invalid("duration overflows"))?;
    }

    Ok(render_timespan(total_secs))
}

/// Render a second count as a TimeSpan literal.
fn render_timespan(total_secs: u64) -> String {
    let days = total_secs / SECS_PER_DAY;
    let hours = (total_secs % SECS_PER_DAY) / SECS_PER_HOUR;
    let minutes = (total_secs % SECS_PER_HOUR) / SECS_PER_MINUTE;
    let seconds = total_secs % SECS_PER_MINUTE;

    if days > 0 {
        format!("{days}.{hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    }
}
