//! TimeSheet model and attendance status.
//!
//! A [`TimeSheet`] is one attendance row: a regular shift or an overtime
//! session of one employee on one date.

use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{EmployeeId, ShiftType};

/// Classification of an attendance row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimesheetStatus {
    /// Checked in, not yet checked out.
    Incomplete,
    /// Worked the shift on time.
    Present,
    /// Checked in after the grace period.
    Late,
    /// Checked out before the shift end.
    EarlyLeave,
    /// Did not attend (set out-of-band).
    Absent,
    /// On approved leave (set out-of-band).
    Leave,
}

impl TimesheetStatus {
    /// Returns true for rows whose worked time counts as regular hours.
    pub fn counts_as_worked(self) -> bool {
        matches!(self, TimesheetStatus::Present | TimesheetStatus::EarlyLeave)
    }
}

impl fmt::Display for TimesheetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TimesheetStatus::Incomplete => "INCOMPLETE",
            TimesheetStatus::Present => "PRESENT",
            TimesheetStatus::Late => "LATE",
            TimesheetStatus::EarlyLeave => "EARLY_LEAVE",
            TimesheetStatus::Absent => "ABSENT",
            TimesheetStatus::Leave => "LEAVE",
        };
        f.write_str(label)
    }
}

/// The slot a row occupies on its date: a regular shift or the overtime session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TimesheetSlot {
    /// A regular working shift.
    Shift(ShiftType),
    /// The overtime session of the day (no shift).
    Overtime,
}

/// Unique key of a row for one employee.
///
/// Regular rows are unique per `(date, shift)`, overtime rows per
/// `(date, overtime)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimesheetKey {
    /// Attendance date.
    pub date: NaiveDate,
    /// Shift or overtime slot.
    pub slot: TimesheetSlot,
}

impl TimesheetKey {
    /// Key of a regular shift row.
    pub fn shift(date: NaiveDate, shift_type: ShiftType) -> Self {
        Self {
            date,
            slot: TimesheetSlot::Shift(shift_type),
        }
    }

    /// Key of the overtime row.
    pub fn overtime(date: NaiveDate) -> Self {
        Self {
            date,
            slot: TimesheetSlot::Overtime,
        }
    }
}

/// One attendance row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSheet {
    /// The employee the row belongs to.
    pub employee_id: EmployeeId,
    /// Attendance date.
    pub date: NaiveDate,
    /// The regular shift, `None` on overtime rows.
    pub shift: Option<ShiftType>,
    /// Check-in time of day.
    pub check_in_time: Option<NaiveTime>,
    /// Check-out time of day.
    pub check_out_time: Option<NaiveTime>,
    /// Current classification.
    pub status: TimesheetStatus,
    /// True for overtime rows.
    pub is_overtime: bool,
    /// Overtime hours recorded on the row (two decimal places, never negative).
    pub overtime_hours: Decimal,
    /// Free-form note.
    #[serde(default)]
    pub note: Option<String>,
}

impl TimeSheet {
    /// Creates an empty regular shift row.
    pub fn for_shift(employee_id: EmployeeId, date: NaiveDate, shift_type: ShiftType) -> Self {
        Self {
            employee_id,
            date,
            shift: Some(shift_type),
            check_in_time: None,
            check_out_time: None,
            status: TimesheetStatus::Incomplete,
            is_overtime: false,
            overtime_hours: Decimal::ZERO,
            note: None,
        }
    }

    /// Creates an empty overtime row.
    pub fn for_overtime(employee_id: EmployeeId, date: NaiveDate) -> Self {
        Self {
            shift: None,
            is_overtime: true,
            ..Self::for_shift(employee_id, date, ShiftType::Morning)
        }
    }

    /// Returns the unique key of this row.
    pub fn key(&self) -> TimesheetKey {
        match (self.is_overtime, self.shift) {
            (false, Some(shift_type)) => TimesheetKey::shift(self.date, shift_type),
            _ => TimesheetKey::overtime(self.date),
        }
    }

    /// Seconds between check-in and check-out, if both are recorded.
    pub fn worked_seconds(&self) -> Option<i64> {
        match (self.check_in_time, self.check_out_time) {
            (Some(check_in), Some(check_out)) => Some((check_out - check_in).num_seconds()),
            _ => None,
        }
    }

    /// Hours between check-in and check-out, zero while the row is open.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_payroll::models::{EmployeeId, ShiftType, TimeSheet};
    /// use chrono::{NaiveDate, NaiveTime};
    /// use rust_decimal::Decimal;
    ///
    /// let mut sheet = TimeSheet::for_shift(
    ///     EmployeeId(1),
    ///     NaiveDate::from_ymd_opt(2026, 1, 14).unwrap(),
    ///     ShiftType::Morning,
    /// );
    /// sheet.check_in_time = NaiveTime::from_hms_opt(8, 0, 0);
    /// sheet.check_out_time = NaiveTime::from_hms_opt(11, 30, 0);
    /// assert_eq!(sheet.worked_hours(), Decimal::new(35, 1));
    /// ```
    pub fn worked_hours(&self) -> Decimal {
        self.worked_seconds()
            .map(|seconds| Decimal::from(seconds) / Decimal::from(3600))
            .unwrap_or(Decimal::ZERO)
    }
}

/// Read model of a row returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimesheetView {
    /// Attendance date.
    pub date: NaiveDate,
    /// Shift label, `"OVERTIME"` for overtime rows.
    pub shift: String,
    /// Check-in time of day.
    pub check_in_time: Option<NaiveTime>,
    /// Check-out time of day.
    pub check_out_time: Option<NaiveTime>,
    /// Current classification.
    pub status: TimesheetStatus,
    /// True for overtime rows.
    pub is_overtime: bool,
    /// Overtime hours recorded on the row.
    pub overtime_hours: Decimal,
    /// Free-form note.
    pub note: Option<String>,
}

impl From<&TimeSheet> for TimesheetView {
    fn from(sheet: &TimeSheet) -> Self {
        Self {
            date: sheet.date,
            shift: sheet
                .shift
                .map(|shift_type| shift_type.to_string())
                .unwrap_or_else(|| "OVERTIME".to_string()),
            check_in_time: sheet.check_in_time,
            check_out_time: sheet.check_out_time,
            status: sheet.status,
            is_overtime: sheet.is_overtime,
            overtime_hours: sheet.overtime_hours,
            note: sheet.note.clone(),
        }
    }
}
