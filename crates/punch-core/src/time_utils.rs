use chrono::{DateTime, NaiveDateTime, NaiveTime};

// ── Epoch plausibility window ─────────────────────────────────────────────────

/// 2000-01-01 00:00:00 UTC – lower bound for treating a bare number as a
/// Unix timestamp in search arguments.
pub const EPOCH_PLAUSIBLE_MIN: i64 = 946_684_800;
/// 2100-01-01 00:00:00 UTC – upper bound of the same window.
pub const EPOCH_PLAUSIBLE_MAX: i64 = 4_102_444_800;

// ── Timestamp normalisation ───────────────────────────────────────────────────

/// Accepted punch timestamp patterns, in resolution order.
///
/// The longer form with seconds is tried before the shorter form per
/// separator style, and ambiguous numeric dates (e.g. `03/04/2024`)
/// resolve to whichever pattern matches first.
const PUNCH_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

/// Parse a raw timestamp token into a canonical naive instant.
///
/// A token composed entirely of decimal digits is interpreted as Unix
/// epoch seconds and converted directly, with no range validation.
/// Anything else is matched against [`PUNCH_FORMATS`]; the first
/// pattern that parses wins. Returns `None` when nothing matches –
/// the caller records an error entry and drops the row.
pub fn parse_timestamp(token: &str) -> Option<NaiveDateTime> {
    if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
        let secs: i64 = token.parse().ok()?;
        return DateTime::from_timestamp(secs, 0).map(|dt| dt.naive_utc());
    }

    for fmt in PUNCH_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(token, fmt) {
            return Some(dt);
        }
    }

    None
}

/// Resolve a search-layer date argument.
///
/// A decimal value within the plausible Unix window
/// [`EPOCH_PLAUSIBLE_MIN`], [`EPOCH_PLAUSIBLE_MAX`] is converted to its
/// ISO calendar date; everything else passes through unchanged as a
/// literal date string.
pub fn epoch_to_date(arg: &str) -> String {
    if let Ok(secs) = arg.parse::<i64>() {
        if (EPOCH_PLAUSIBLE_MIN..=EPOCH_PLAUSIBLE_MAX).contains(&secs) {
            if let Some(dt) = DateTime::from_timestamp(secs, 0) {
                return dt.naive_utc().date().to_string();
            }
        }
    }
    arg.to_string()
}

// ── Formatting helpers ────────────────────────────────────────────────────────

/// Render a time of day as zero-padded `HH:MM`.
pub fn format_hhmm(t: NaiveTime) -> String {
    t.format("%H:%M").to_string()
}

/// Render a whole-second duration as zero-padded `HH:MM`
/// (floor hours, floor minutes).
pub fn duration_hhmm(secs: i64) -> String {
    format!("{:02}:{:02}", secs / 3600, (secs % 3600) / 60)
}

/// The same duration as fractional hours, rounded to two decimals.
/// Bulk (`HH:MM`) and search (fractional) renderings must always be
/// derived from one shared whole-second value.
pub fn fractional_hours(secs: i64) -> f64 {
    (secs as f64 / 3600.0 * 100.0).round() / 100.0
}

/// Parse a `HH:MM` or `HH:MM:SS` string back into seconds.
/// Used when deserialising exported summaries.
pub fn parse_duration_hhmm(s: &str) -> Option<i64> {
    let mut parts = s.split(':');
    let hours: i64 = parts.next()?.parse().ok()?;
    let minutes: i64 = parts.next()?.parse().ok()?;
    let seconds: i64 = match parts.next() {
        Some(sec) => sec.parse().ok()?,
        None => 0,
    };
    if parts.next().is_some() {
        return None;
    }
    Some(hours * 3600 + minutes * 60 + seconds)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    // ── parse_timestamp ───────────────────────────────────────────────────────

    #[test]
    fn test_parse_epoch_seconds() {
        // 2024-03-01 09:15:00 UTC
        let dt = parse_timestamp("1709284500").expect("epoch should parse");
        assert_eq!(dt.date().to_string(), "2024-03-01");
        assert_eq!(dt.time().to_string(), "09:15:00");
    }

    #[test]
    fn test_parse_epoch_no_range_validation() {
        // Raw punches accept epochs outside the search plausibility window.
        let dt = parse_timestamp("100000").expect("small epoch should still parse");
        assert_eq!(dt.date().year(), 1970);
    }

    #[test]
    fn test_parse_iso_with_seconds() {
        let dt = parse_timestamp("2024-03-01 09:15:00").expect("should parse");
        assert_eq!(dt.time().hour(), 9);
        assert_eq!(dt.time().minute(), 15);
        assert_eq!(dt.time().second(), 0);
    }

    #[test]
    fn test_parse_iso_without_seconds() {
        let dt = parse_timestamp("2024-03-01 09:15").expect("should parse");
        assert_eq!(dt.time().second(), 0);
    }

    #[test]
    fn test_parse_day_first_dashes() {
        let dt = parse_timestamp("01-03-2024 08:55").expect("should parse");
        assert_eq!(dt.date().to_string(), "2024-03-01");
    }

    #[test]
    fn test_parse_slash_year_first() {
        let dt = parse_timestamp("2024/03/01 17:45:10").expect("should parse");
        assert_eq!(dt.date().to_string(), "2024-03-01");
        assert_eq!(dt.time().second(), 10);
    }

    #[test]
    fn test_ambiguous_slash_date_resolves_month_first() {
        // 03/04/2024 matches %m/%d/%Y before %d/%m/%Y: March 4th, not April 3rd.
        let dt = parse_timestamp("03/04/2024 10:00").expect("should parse");
        assert_eq!(dt.date().month(), 3);
        assert_eq!(dt.date().day(), 4);
    }

    #[test]
    fn test_parse_rejects_date_only() {
        assert!(parse_timestamp("2024-03-01").is_none());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_timestamp("not-a-time").is_none());
        assert!(parse_timestamp("").is_none());
    }

    // ── epoch_to_date ─────────────────────────────────────────────────────────

    #[test]
    fn test_epoch_to_date_within_window() {
        assert_eq!(epoch_to_date("1709284500"), "2024-03-01");
    }

    #[test]
    fn test_epoch_to_date_below_window_passes_through() {
        assert_eq!(epoch_to_date("100000"), "100000");
    }

    #[test]
    fn test_epoch_to_date_above_window_passes_through() {
        assert_eq!(epoch_to_date("9999999999999"), "9999999999999");
    }

    #[test]
    fn test_epoch_to_date_non_numeric_passes_through() {
        assert_eq!(epoch_to_date("2024-03-01"), "2024-03-01");
    }

    // ── duration formatting ───────────────────────────────────────────────────

    #[test]
    fn test_duration_hhmm_floors_to_minutes() {
        // 8h50m30s renders as 08:50 – whole seconds are truncated.
        assert_eq!(duration_hhmm(8 * 3600 + 50 * 60 + 30), "08:50");
    }

    #[test]
    fn test_duration_hhmm_zero() {
        assert_eq!(duration_hhmm(0), "00:00");
    }

    #[test]
    fn test_fractional_hours_rounds_two_decimals() {
        assert_eq!(fractional_hours(8 * 3600 + 50 * 60), 8.83);
        assert_eq!(fractional_hours(0), 0.0);
        assert_eq!(fractional_hours(3600), 1.0);
    }

    #[test]
    fn test_parse_duration_hhmm_round_trip() {
        assert_eq!(parse_duration_hhmm("08:50"), Some(8 * 3600 + 50 * 60));
        assert_eq!(parse_duration_hhmm("00:00"), Some(0));
        assert_eq!(parse_duration_hhmm("01:02:03"), Some(3723));
        assert_eq!(parse_duration_hhmm("bogus"), None);
    }
}
