//! Day-level calendar arithmetic.
//!
//! All dates are `NaiveDate` (year, month, day with no time zone), so day
//! differences are exact and unaffected by DST transitions.

use chrono::{Duration, NaiveDate};

/// Return the date `days` whole days before `date`.
///
/// Negative values move forward. Results saturate at the calendar bounds
/// rather than overflowing.
pub fn subtract_days(date: NaiveDate, days: i64) -> NaiveDate {
    Duration::try_days(days)
        .and_then(|delta| date.checked_sub_signed(delta))
        .unwrap_or(if days >= 0 {
            NaiveDate::MIN
        } else {
            NaiveDate::MAX
        })
}

/// Whole calendar days from `start` to `end`.
///
/// Negative when `end` precedes `start`, zero when they are equal.
#[inline]
pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}

/// Parse an ISO `YYYY-MM-DD` date, ignoring surrounding whitespace.
///
/// Returns `None` for empty or unparseable input.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
}

/// Scheduling boundary for a nominal project end date.
///
/// The end date itself is a full day of work, so the backward pass starts
/// from the following midnight.
pub fn project_deadline(end_date: NaiveDate) -> Option<NaiveDate> {
    end_date.succ_opt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_subtract_days_within_month() {
        assert_eq!(subtract_days(d(2024, 6, 30), 10), d(2024, 6, 20));
        assert_eq!(subtract_days(d(2024, 6, 30), 0), d(2024, 6, 30));
    }

    #[test]
    fn test_subtract_days_crosses_month_and_year() {
        assert_eq!(subtract_days(d(2024, 3, 1), 1), d(2024, 2, 29));
        assert_eq!(subtract_days(d(2023, 3, 1), 1), d(2023, 2, 28));
        assert_eq!(subtract_days(d(2025, 1, 3), 5), d(2024, 12, 29));
    }

    #[test]
    fn test_subtract_negative_days_moves_forward() {
        assert_eq!(subtract_days(d(2024, 12, 30), -3), d(2025, 1, 2));
    }

    #[test]
    fn test_subtract_days_does_not_mutate_input() {
        let date = d(2024, 1, 20);
        let earlier = subtract_days(date, 4);
        assert_eq!(date, d(2024, 1, 20));
        assert_eq!(earlier, d(2024, 1, 16));
    }

    #[test]
    fn test_subtract_days_saturates() {
        assert_eq!(subtract_days(d(2024, 1, 1), i64::MAX), NaiveDate::MIN);
        assert_eq!(subtract_days(NaiveDate::MAX, -1), NaiveDate::MAX);
    }

    #[test]
    fn test_days_between_sign() {
        assert_eq!(days_between(d(2024, 1, 14), d(2024, 1, 20)), 6);
        assert_eq!(days_between(d(2024, 1, 20), d(2024, 1, 14)), -6);
        assert_eq!(days_between(d(2024, 1, 20), d(2024, 1, 20)), 0);
    }

    #[test]
    fn test_days_between_across_dst_and_leap_year() {
        // US DST starts 2024-03-10; date-only math is unaffected
        assert_eq!(days_between(d(2024, 3, 9), d(2024, 3, 11)), 2);
        assert_eq!(days_between(d(2024, 1, 1), d(2025, 1, 1)), 366);
    }

    #[test]
    fn test_subtract_then_between_round_trip() {
        let anchor = d(2024, 2, 15);
        for n in [0, 1, 13, 29, 365, 1000] {
            assert_eq!(days_between(anchor, subtract_days(anchor, n)), -n);
        }
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-06-30"), Some(d(2024, 6, 30)));
        assert_eq!(parse_date("  2024-06-30\n"), Some(d(2024, 6, 30)));
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("2024-02-30"), None);
        assert_eq!(parse_date("next friday"), None);
    }

    #[test]
    fn test_project_deadline_adds_one_day() {
        assert_eq!(project_deadline(d(2024, 12, 31)), Some(d(2025, 1, 1)));
        assert_eq!(project_deadline(NaiveDate::MAX), None);
    }
}
