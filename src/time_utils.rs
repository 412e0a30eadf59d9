// SPDX-License-Identifier: MIT
// Copyright 2026 Aqualog Authors

//! Shared helpers for date/time formatting and day-window arithmetic.
//!
//! All stored timestamps are normalized through [`format_utc_rfc3339`] so the
//! strings are fixed-width and lexicographic order equals chronological order,
//! which keeps Firestore range filters on `created_at` correct.

use chrono::{DateTime, Duration, NaiveDate, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix (whole seconds).
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Current calendar date in UTC.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// Half-open UTC window `[start_of_day, start_of_next_day)` for a date.
pub fn day_window_utc(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = date.and_hms_opt(0, 0, 0).unwrap().and_utc();
    (start, start + Duration::days(1))
}

/// Whole minutes elapsed between `then` and `now`, clamped to zero.
///
/// The clamp covers clock skew: clients may log drinks with future
/// timestamps, which would otherwise yield negative elapsed time.
pub fn minutes_since(now: DateTime<Utc>, then: DateTime<Utc>) -> i64 {
    (now - then).num_minutes().max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_drops_subseconds() {
        let dt = DateTime::from_timestamp(1_704_103_200, 123_456_789).unwrap();
        let formatted = format_utc_rfc3339(dt);
        assert!(formatted.ends_with('Z'));
        assert!(!formatted.contains('.'));
    }

    #[test]
    fn test_day_window_bounds() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        let (start, end) = day_window_utc(date);

        assert_eq!(format_utc_rfc3339(start), "2026-03-14T00:00:00Z");
        assert_eq!(format_utc_rfc3339(end), "2026-03-15T00:00:00Z");
        assert_eq!(end - start, Duration::days(1));
    }

    #[test]
    fn test_minutes_since_whole_minutes() {
        let then = DateTime::from_timestamp(1_000_000, 0).unwrap();
        let now = then + Duration::seconds(179 * 60 + 59);
        assert_eq!(minutes_since(now, then), 179);
    }

    #[test]
    fn test_minutes_since_clamps_future_timestamps() {
        let now = DateTime::from_timestamp(1_000_000, 0).unwrap();
        let future = now + Duration::minutes(42);
        assert_eq!(minutes_since(now, future), 0);
    }
}
