//! Overdue arithmetic
//!
//! Day counts are the floor of the millisecond delta divided by one day,
//! not a calendar-aware subtraction. Date-only strings are read as UTC
//! midnight, so two plain `YYYY-MM-DD` values always differ by whole days;
//! mixing in a time-of-day component can shift the result by one.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const MS_PER_DAY: i64 = 86_400_000;

/// Parse a reference or due date into a UTC instant.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 date-times, and `YYYY-MM-DDTHH:MM[:SS]`
/// without an offset (read as UTC). Anything else is `None`.
pub fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.and_utc())
}

/// Whole days `today` is past `due_date`, clamped at zero.
///
/// `None` when the due date is absent or either side fails to parse.
pub fn days_overdue(today: &str, due_date: Option<&str>) -> Option<i64> {
    let due = parse_instant(due_date?)?;
    let today = parse_instant(today)?;

    let delta_ms = (today - due).num_milliseconds();
    Some(delta_ms.div_euclid(MS_PER_DAY).max(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overdue_by_whole_days() {
        assert_eq!(days_overdue("2025-12-15", Some("2025-11-30")), Some(15));
        assert_eq!(days_overdue("2025-03-01", Some("2025-02-28")), Some(1));
    }

    #[test]
    fn overdue_across_leap_day() {
        assert_eq!(days_overdue("2024-03-01", Some("2024-02-28")), Some(2));
    }

    #[test]
    fn same_day_is_zero() {
        assert_eq!(days_overdue("2025-11-30", Some("2025-11-30")), Some(0));
    }

    #[test]
    fn future_due_date_clamps_to_zero() {
        assert_eq!(days_overdue("2025-11-20", Some("2025-12-01")), Some(0));
    }

    #[test]
    fn absent_due_date() {
        assert_eq!(days_overdue("2025-11-20", None), None);
    }

    #[test]
    fn unparseable_dates_are_absent() {
        assert_eq!(days_overdue("yesterday", Some("2025-11-30")), None);
        assert_eq!(days_overdue("2025-12-15", Some("2025-13-45")), None);
    }

    #[test]
    fn partial_day_truncates() {
        // 14 days and 23 hours rounds down.
        assert_eq!(
            days_overdue("2025-12-14T23:00:00Z", Some("2025-11-30")),
            Some(14)
        );
    }

    #[test]
    fn offset_shifts_day_boundary() {
        // 2025-12-15T01:00+02:00 is 2025-12-14T23:00Z: one day short.
        assert_eq!(
            days_overdue("2025-12-15T01:00:00+02:00", Some("2025-11-30")),
            Some(14)
        );
    }

    #[test]
    fn naive_datetime_read_as_utc() {
        assert_eq!(
            parse_instant("2025-12-15T12:30"),
            parse_instant("2025-12-15T12:30:00Z")
        );
    }
}
