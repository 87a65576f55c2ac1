//! Payroll period model.
//!
//! This module contains the [`PayMonth`] type: the calendar month that every
//! payroll and reporting call is scoped to.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A calendar month of a given year.
///
/// # Example
///
/// ```
/// use attendance_payroll::models::PayMonth;
/// use chrono::NaiveDate;
///
/// let period = PayMonth::new(2, 2024).unwrap();
/// assert_eq!(period.first_day(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
/// assert_eq!(period.last_day(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2024, 2, 15).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PayMonth {
    /// The year.
    pub year: i32,
    /// The month, 1 through 12.
    pub month: u32,
}

impl PayMonth {
    /// Creates a period, rejecting months outside 1..=12.
    pub fn new(month: u32, year: i32) -> EngineResult<Self> {
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(EngineError::InvalidPeriod { month, year });
        }
        Ok(Self { year, month })
    }

    /// Returns the period containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The first calendar day of the month.
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// The last calendar day of the month.
    pub fn last_day(&self) -> NaiveDate {
        let (year, month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    /// Checks if a given date falls within this month (inclusive).
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.first_day() && date <= self.last_day()
    }
}

impl fmt::Display for PayMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{}", self.month, self.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_new_rejects_month_zero_and_thirteen() {
        assert!(matches!(
            PayMonth::new(0, 2026),
            Err(EngineError::InvalidPeriod { month: 0, year: 2026 })
        ));
        assert!(matches!(
            PayMonth::new(13, 2026),
            Err(EngineError::InvalidPeriod { month: 13, .. })
        ));
    }

    #[test]
    fn test_december_last_day_crosses_year() {
        let period = PayMonth::new(12, 2026).unwrap();
        assert_eq!(period.last_day(), make_date("2026-12-31"));
    }

    #[test]
    fn test_february_non_leap_year() {
        let period = PayMonth::new(2, 2026).unwrap();
        assert_eq!(period.last_day(), make_date("2026-02-28"));
    }

    #[test]
    fn test_contains_date_boundaries() {
        let period = PayMonth::new(1, 2026).unwrap();
        assert!(period.contains_date(make_date("2026-01-01")));
        assert!(period.contains_date(make_date("2026-01-31")));
        assert!(!period.contains_date(make_date("2025-12-31")));
        assert!(!period.contains_date(make_date("2026-02-01")));
    }

    #[test]
    fn test_of_date() {
        assert_eq!(
            PayMonth::of(make_date("2026-10-16")),
            PayMonth { year: 2026, month: 10 }
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(PayMonth::new(3, 2026).unwrap().to_string(), "03/2026");
    }
}
