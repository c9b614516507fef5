use crate::error::{OkrError, Result};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::Serialize;

pub const QUARTER_START_MONTHS: [u32; 4] = [1, 4, 7, 10];

/// Inclusive calendar-day window, interpreted in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(OkrError::InvalidWindow {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// From the first day of `today`'s quarter up to and including `today`.
    pub fn current_quarter(today: NaiveDate) -> Self {
        Self {
            start: quarter_start(today),
            end: today,
        }
    }

    /// Fills whichever bound is missing from the current-quarter default.
    pub fn resolve(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<Self> {
        let default = Self::current_quarter(today);
        Self::new(start.unwrap_or(default.start), end.unwrap_or(default.end))
    }

    /// Midnight of `start` through the last instant of `end`, both inclusive.
    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        let day = instant.date_naive();
        self.start <= day && day <= self.end
    }
}

pub fn quarter_start(date: NaiveDate) -> NaiveDate {
    let month = (date.month0() / 3) * 3 + 1;
    NaiveDate::from_ymd_opt(date.year(), month, 1).unwrap_or(date)
}

pub fn is_quarter_start_month(month: u32) -> bool {
    QUARTER_START_MONTHS.contains(&month)
}

/// Calendar month before `(year, month)`, wrapping January into December.
pub fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month <= 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[test]
    fn quarter_start_maps_every_month() {
        assert_eq!(quarter_start(date(2025, 2, 17)), date(2025, 1, 1));
        assert_eq!(quarter_start(date(2025, 4, 1)), date(2025, 4, 1));
        assert_eq!(quarter_start(date(2025, 9, 30)), date(2025, 7, 1));
        assert_eq!(quarter_start(date(2025, 12, 31)), date(2025, 10, 1));
    }

    #[test]
    fn window_rejects_end_before_start() {
        let err = DateWindow::new(date(2025, 5, 2), date(2025, 5, 1))
            .expect_err("window should be rejected");
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("before start date"));
    }

    #[test]
    fn single_day_window_is_valid() {
        assert!(DateWindow::new(date(2025, 5, 1), date(2025, 5, 1)).is_ok());
    }

    #[test]
    fn resolve_defaults_to_current_quarter() {
        let window = DateWindow::resolve(None, None, date(2025, 5, 20)).expect("valid window");
        assert_eq!(window.start, date(2025, 4, 1));
        assert_eq!(window.end, date(2025, 5, 20));
    }

    #[test]
    fn window_bounds_are_inclusive_to_the_second() {
        let window = DateWindow::new(date(2025, 4, 1), date(2025, 4, 30)).expect("valid window");
        let at = |y, m, d, h, min, s| {
            Utc.with_ymd_and_hms(y, m, d, h, min, s)
                .single()
                .expect("valid instant")
        };
        assert!(!window.contains(&at(2025, 3, 31, 23, 59, 59)));
        assert!(window.contains(&at(2025, 4, 1, 0, 0, 0)));
        assert!(window.contains(&at(2025, 4, 30, 23, 59, 59)));
        assert!(!window.contains(&at(2025, 5, 1, 0, 0, 0)));
    }

    #[test]
    fn previous_month_wraps_year() {
        assert_eq!(previous_month(2025, 1), (2024, 12));
        assert_eq!(previous_month(2025, 5), (2025, 4));
    }

    #[test]
    fn quarter_start_months() {
        let starts: Vec<u32> = (1..=12).filter(|m| is_quarter_start_month(*m)).collect();
        assert_eq!(starts, vec![1, 4, 7, 10]);
    }
}
