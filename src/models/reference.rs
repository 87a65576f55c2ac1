//! Reference data models: departments, positions and working shifts.
//!
//! These records are loaded once from configuration and never mutated by
//! the ledger or the payroll engine.

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The two working shifts of a business day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShiftType {
    /// Morning shift.
    Morning,
    /// Afternoon shift.
    Afternoon,
}

impl ShiftType {
    /// Returns true if the business is closed for this shift on `date`.
    ///
    /// Sundays are closed entirely; Saturdays only run the morning shift.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_payroll::models::ShiftType;
    /// use chrono::NaiveDate;
    ///
    /// let saturday = NaiveDate::from_ymd_opt(2026, 1, 17).unwrap();
    /// assert!(!ShiftType::Morning.is_closed_on(saturday));
    /// assert!(ShiftType::Afternoon.is_closed_on(saturday));
    /// ```
    pub fn is_closed_on(self, date: NaiveDate) -> bool {
        match (self, date.weekday()) {
            (_, Weekday::Sun) => true,
            (ShiftType::Afternoon, Weekday::Sat) => true,
            _ => false,
        }
    }
}

impl fmt::Display for ShiftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShiftType::Morning => write!(f, "MORNING"),
            ShiftType::Afternoon => write!(f, "AFTERNOON"),
        }
    }
}

/// A scheduled working shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingShift {
    /// Which shift this is.
    pub shift_type: ShiftType,
    /// Scheduled start; check-in opens here.
    pub start_time: NaiveTime,
    /// Scheduled end; check-in closes here.
    pub end_time: NaiveTime,
    /// Start of the break, if any.
    #[serde(default)]
    pub break_start: Option<NaiveTime>,
    /// End of the break, if any.
    #[serde(default)]
    pub break_end: Option<NaiveTime>,
}

impl WorkingShift {
    /// Returns true if `time` lies in `[start_time, end_time]`.
    pub fn window_contains(&self, time: NaiveTime) -> bool {
        self.start_time <= time && time <= self.end_time
    }
}

/// A department of the company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// Short unique code, also the prefix of employee codes.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
}

/// A position and the pay rates attached to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Short unique code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Hourly rate when the monthly hour threshold is met.
    pub rate_base: Decimal,
    /// Hourly rate when the monthly hour threshold is missed.
    pub rate_insufficient: Decimal,
    /// Hourly overtime rate.
    pub rate_overtime: Decimal,
    /// Monthly attendance bonus amount.
    pub attendance_bonus: Decimal,
    /// Whether new employees may be assigned this position.
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}
