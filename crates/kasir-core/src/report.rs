//! # Report Windows
//!
//! Time windows over which sales are summarized.
//!
//! ## Window Shape
//! ```text
//!   local day D                     local day D+1
//!   00:00 ─────────────────────────► 00:00
//!   │◄──────────── included ────────►│ excluded
//!   start                             end
//!
//!   [start, end)  half-open, converted to UTC for storage comparison
//! ```
//!
//! The clock and the time zone are inputs, never read here. The API layer
//! passes `Local::now()` and `Local`; tests pass fixed offsets.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::Serialize;

use crate::error::ValidationError;
use crate::validation::ValidationResult;

/// Stored timestamps carry a four-digit year; instants outside
/// `0000..=9999` do not compare correctly as text.
const MAX_WINDOW_YEAR: i32 = 9999;

/// A half-open `[start, end)` interval of instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ReportWindow {
    /// The local calendar day containing `now`: `[midnight, midnight + 24h)`.
    pub fn today<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        let tz = now.timezone();
        let start = local_midnight(now.date_naive(), &tz);

        ReportWindow {
            start,
            end: start + Duration::hours(24),
        }
    }

    /// Inclusive calendar-date range, from `start` 00:00 local through the
    /// last instant of `end` local.
    ///
    /// ## Errors
    /// - `ValidationError::InvalidRange` when `start` is after `end`
    /// - `ValidationError::InvalidDate` when a bound falls outside the years
    ///   0000 to 9999 once converted to UTC
    pub fn for_range<Tz: TimeZone>(
        start: NaiveDate,
        end: NaiveDate,
        tz: &Tz,
    ) -> ValidationResult<Self> {
        if start > end {
            return Err(ValidationError::InvalidRange);
        }

        let day_after_end = end.succ_opt().ok_or_else(|| ValidationError::InvalidDate {
            field: "end_date".to_string(),
        })?;

        let start = local_midnight(start, tz);
        if start.year() < 0 {
            return Err(ValidationError::InvalidDate {
                field: "start_date".to_string(),
            });
        }

        let end = local_midnight(day_after_end, tz);
        if end.year() > MAX_WINDOW_YEAR {
            return Err(ValidationError::InvalidDate {
                field: "end_date".to_string(),
            });
        }

        Ok(ReportWindow { start, end })
    }
}

/// Start of `day` in `tz`, as UTC.
///
/// On a DST fold the earlier instant wins. When midnight does not exist
/// (a spring-forward gap at 00:00) the first hour after it is used.
fn local_midnight<Tz: TimeZone>(day: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    let midnight: NaiveDateTime = day.and_time(NaiveTime::MIN);

    tz.from_local_datetime(&midnight)
        .earliest()
        .or_else(|| {
            tz.from_local_datetime(&(midnight + Duration::hours(1)))
                .earliest()
        })
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| midnight.and_utc())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn wib() -> FixedOffset {
        FixedOffset::east_opt(7 * 3600).unwrap()
    }

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_today_uses_local_midnight() {
        let now = wib().with_ymd_and_hms(2026, 3, 10, 15, 30, 0).unwrap();
        let window = ReportWindow::today(&now);

        assert_eq!(window.start, utc("2026-03-09T17:00:00Z"));
        assert_eq!(window.end, utc("2026-03-10T17:00:00Z"));
    }

    #[test]
    fn test_today_just_after_midnight() {
        let now = wib().with_ymd_and_hms(2026, 3, 10, 0, 0, 1).unwrap();
        let window = ReportWindow::today(&now);

        assert_eq!(window.start, utc("2026-03-09T17:00:00Z"));
        assert!(window.start <= now.with_timezone(&Utc));
    }

    #[test]
    fn test_range_is_inclusive_of_end_date() {
        let window = ReportWindow::for_range(date(2026, 3, 1), date(2026, 3, 2), &wib()).unwrap();

        assert_eq!(window.start, utc("2026-02-28T17:00:00Z"));
        assert_eq!(window.end, utc("2026-03-02T17:00:00Z"));

        // 23:59:59.999 local on the end date is the last instant inside
        assert!(utc("2026-03-02T16:59:59.999Z") < window.end);
    }

    #[test]
    fn test_single_day_range_matches_today() {
        let now = Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap();
        let today = ReportWindow::today(&now);
        let range = ReportWindow::for_range(date(2026, 6, 1), date(2026, 6, 1), &Utc).unwrap();

        assert_eq!(today, range);
    }

    #[test]
    fn test_range_rejects_start_after_end() {
        let err = ReportWindow::for_range(date(2026, 3, 2), date(2026, 3, 1), &Utc).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidRange));
        assert_eq!(err.to_string(), "start_date must be before end_date");
    }

    #[test]
    fn test_range_end_must_fit_four_digit_year() {
        let err = ReportWindow::for_range(date(2000, 1, 1), date(9999, 12, 31), &Utc).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidDate { ref field } if field == "end_date"));
        assert_eq!(err.to_string(), "Invalid end_date format. Use YYYY-MM-DD");

        // West of UTC the last local day already spills into year 10000
        let west = FixedOffset::west_opt(5 * 3600).unwrap();
        assert!(ReportWindow::for_range(date(2000, 1, 1), date(9999, 12, 31), &west).is_err());

        let window = ReportWindow::for_range(date(2000, 1, 1), date(9999, 12, 30), &Utc).unwrap();
        assert_eq!(window.end, utc("9999-12-31T00:00:00Z"));

        // East of UTC the same end date still fits
        assert!(ReportWindow::for_range(date(2000, 1, 1), date(9999, 12, 31), &wib()).is_ok());
    }
}
