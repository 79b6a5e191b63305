//! Display formatting helpers
//!
//! Pure functions turning backend timestamps into the `DD.MM.YY` and
//! `HH:MM` strings the UI shows. Formatting never fails: unparseable
//! input is echoed back unchanged.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

/// Parses the timestamp shapes the backend actually emits: RFC 3339 with
/// offset, naive date-time, or date-only. Offset-carrying values are
/// converted to local time; naive values are taken as-is.
fn parse_timestamp(ts: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(ts, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    if let Ok(d) = NaiveDate::parse_from_str(ts, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0);
    }
    None
}

/// `DD.MM.YY`, zero-padded, two-digit year.
pub fn format_date(ts: &str) -> String {
    match parse_timestamp(ts) {
        Some(dt) => dt.format("%d.%m.%y").to_string(),
        None => ts.to_string(),
    }
}

/// `HH:MM`, zero-padded, 24-hour clock.
pub fn format_time(ts: &str) -> String {
    match parse_timestamp(ts) {
        Some(dt) => dt.format("%H:%M").to_string(),
        None => ts.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_naive_datetime() {
        assert_eq!(format_date("2024-06-01T10:05:00"), "01.06.24");
        assert_eq!(format_time("2024-06-01T10:05:00"), "10:05");
    }

    #[test]
    fn formats_with_fractional_seconds() {
        assert_eq!(format_date("2024-12-09T21:30:00.123456"), "09.12.24");
        assert_eq!(format_time("2024-12-09T21:30:00.123456"), "21:30");
    }

    #[test]
    fn offset_input_converts_to_local_time() {
        let ts = "2024-06-01T10:05:00+04:00";
        let local = DateTime::parse_from_rfc3339(ts)
            .unwrap()
            .with_timezone(&Local)
            .naive_local();
        assert_eq!(format_date(ts), local.format("%d.%m.%y").to_string());
        assert_eq!(format_time(ts), local.format("%H:%M").to_string());
    }

    #[test]
    fn formats_date_only_as_midnight() {
        assert_eq!(format_date("2024-06-01"), "01.06.24");
        assert_eq!(format_time("2024-06-01"), "00:00");
    }

    #[test]
    fn zero_pads_single_digits() {
        assert_eq!(format_date("2025-02-03T04:05:06"), "03.02.25");
        assert_eq!(format_time("2025-02-03T04:05:06"), "04:05");
    }

    #[test]
    fn echoes_unparseable_input() {
        assert_eq!(format_date("not-a-date"), "not-a-date");
        assert_eq!(format_time(""), "");
    }
}
