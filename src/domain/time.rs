//! Timestamp normalization.
//!
//! Source `time` cells are converted to epoch seconds (UTC). The accepted
//! forms are fixed and tried in order:
//!
//! - RFC 3339: `2024-05-01T00:00:00Z`, `2024-05-01T08:00:00+08:00`
//! - space-separated with an offset: `2024-05-01 00:00:00+00:00`
//! - naive date-time, read as UTC: `2024-05-01 00:00:00`, `2024-05-01T00:00:00.250`
//! - date only, read as UTC midnight: `2024-05-01`
//!
//! Fractional seconds are floored away.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};

const OFFSET_FMTS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"];
const NAIVE_FMTS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];
const DATE_FMT: &str = "%Y-%m-%d";

/// Parse a source time cell into epoch seconds, or `None` if it matches none
/// of the accepted forms.
pub fn parse_epoch_seconds(s: &str) -> Option<i64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp());
    }
    for fmt in OFFSET_FMTS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.timestamp());
        }
    }
    for fmt in NAIVE_FMTS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc().timestamp());
        }
    }
    NaiveDate::parse_from_str(s, DATE_FMT)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp())
}

/// Calendar `(year, month)` of an epoch-seconds value, in UTC.
pub fn year_month(secs: i64) -> Option<(i32, u32)> {
    let dt = DateTime::<Utc>::from_timestamp(secs, 0)?;
    Some((dt.year(), dt.month()))
}

/// Current wall-clock time formatted for `lastUpdated`.
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
