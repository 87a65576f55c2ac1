//! Attendance policy rules.
//!
//! These are fixed business rules rather than configuration: a 15 minute
//! grace period after shift start, check-outs at most 30 minutes early, and
//! at most two early leaves per employee per calendar month.

use chrono::{Duration, NaiveTime};
use rust_decimal::Decimal;

use crate::models::{TimesheetStatus, WorkingShift};

/// Minutes after shift start before a check-in counts as late.
pub const GRACE_PERIOD_MINUTES: i64 = 15;

/// The earliest a check-out may happen before shift end, in minutes.
pub const EARLY_LEAVE_LIMIT_MINUTES: i64 = 30;

/// Early leaves allowed per employee per calendar month.
pub const EARLY_LEAVE_QUOTA: usize = 2;

/// Whether a check-in at `time` is past the grace period of `shift`.
///
/// # Example
///
/// ```
/// use attendance_payroll::ledger::is_late;
/// use attendance_payroll::models::{ShiftType, WorkingShift};
/// use chrono::NaiveTime;
///
/// let shift = WorkingShift {
///     shift_type: ShiftType::Morning,
///     start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
///     end_time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
///     break_start: None,
///     break_end: None,
/// };
///
/// assert!(!is_late(&shift, NaiveTime::from_hms_opt(8, 15, 0).unwrap()));
/// assert!(is_late(&shift, NaiveTime::from_hms_opt(8, 15, 1).unwrap()));
/// ```
pub fn is_late(shift: &WorkingShift, time: NaiveTime) -> bool {
    time - shift.start_time > Duration::minutes(GRACE_PERIOD_MINUTES)
}

/// Seconds between `time` and the end of `shift`.
///
/// Positive when leaving before the end, negative when leaving after it.
pub fn seconds_early(shift: &WorkingShift, time: NaiveTime) -> i64 {
    (shift.end_time - time).num_seconds()
}

/// Whether leaving `seconds_early` before shift end is past the early-leave
/// limit. Exactly 30 minutes is accepted; 30 minutes and one second is not.
pub fn exceeds_early_leave_limit(seconds_early: i64) -> bool {
    seconds_early > EARLY_LEAVE_LIMIT_MINUTES * 60
}

/// `seconds_early` as minutes, counting a started minute as a whole one.
pub fn minutes_early_rounded_up(seconds_early: i64) -> i64 {
    if seconds_early > 0 {
        (seconds_early + 59) / 60
    } else {
        seconds_early / 60
    }
}

/// Status of a row after check-in.
pub fn check_in_status(shift: &WorkingShift, time: NaiveTime) -> TimesheetStatus {
    if is_late(shift, time) {
        TimesheetStatus::Late
    } else {
        TimesheetStatus::Incomplete
    }
}

/// Final status of a row after check-out.
///
/// Lateness dominates: a `LATE` row stays `LATE` however early or late the
/// employee leaves.
pub fn check_out_status(current: TimesheetStatus, seconds_early: i64) -> TimesheetStatus {
    match current {
        TimesheetStatus::Late => TimesheetStatus::Late,
        TimesheetStatus::Incomplete
        | TimesheetStatus::Present
        | TimesheetStatus::EarlyLeave
        | TimesheetStatus::Absent
        | TimesheetStatus::Leave => {
            if seconds_early > 0 {
                TimesheetStatus::EarlyLeave
            } else {
                TimesheetStatus::Present
            }
        }
    }
}

/// Overtime hours between check-in and check-out, rounded to 2 places and
/// never negative.
pub fn overtime_hours(check_in: NaiveTime, check_out: NaiveTime) -> Decimal {
    let seconds = (check_out - check_in).num_seconds().max(0);
    (Decimal::from(seconds) / Decimal::from(3600)).round_dp(2)
}
