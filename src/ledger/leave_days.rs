//! Leave-day counting.
//!
//! Approved leave is counted per calendar day inside the month: weekdays
//! count one day, Saturdays half a day and Sundays nothing.

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;

use crate::models::{LeaveRequest, PayMonth};

const HALF_DAY: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Leave weight of a single calendar day.
pub fn leave_day_weight(date: NaiveDate) -> Decimal {
    match date.weekday() {
        Weekday::Sun => Decimal::ZERO,
        Weekday::Sat => HALF_DAY,
        Weekday::Mon | Weekday::Tue | Weekday::Wed | Weekday::Thu | Weekday::Fri => Decimal::ONE,
    }
}

/// Sum of leave-day weights over `[from, to]`.
pub fn weighted_days(from: NaiveDate, to: NaiveDate) -> Decimal {
    from.iter_days()
        .take_while(|date| *date <= to)
        .map(leave_day_weight)
        .sum()
}

/// Counts approved leave days falling inside `period`.
///
/// Each approved request is clipped to the month before counting, so a
/// request spanning two months contributes only its in-month days.
///
/// # Example
///
/// ```
/// use attendance_payroll::ledger::count_leave_days;
/// use attendance_payroll::models::{
///     ApprovalState, EmployeeId, LeaveRequest, LeaveType, PayMonth, RequestId, RequestStatus,
/// };
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let date = |d| NaiveDate::from_ymd_opt(2026, 1, d).unwrap();
/// let mut approval = ApprovalState::pending();
/// approval.status = RequestStatus::Approved;
/// let request = LeaveRequest {
///     id: RequestId(1),
///     employee_id: EmployeeId(1),
///     leave_type: LeaveType::Annual,
///     from_date: date(12), // Monday
///     to_date: date(18),   // Sunday
///     approval,
///     attachment_ref: None,
///     note: None,
///     created_at: date(1).and_hms_opt(9, 0, 0).unwrap(),
/// };
///
/// let days = count_leave_days([&request], PayMonth::new(1, 2026).unwrap());
/// assert_eq!(days, Decimal::new(55, 1));
/// ```
pub fn count_leave_days<'a, I>(requests: I, period: PayMonth) -> Decimal
where
    I: IntoIterator<Item = &'a LeaveRequest>,
{
    let month_start = period.first_day();
    let month_end = period.last_day();

    requests
        .into_iter()
        .filter(|request| request.is_approved())
        .filter(|request| request.from_date <= month_end && request.to_date >= month_start)
        .map(|request| {
            let from = request.from_date.max(month_start);
            let to = request.to_date.min(month_end);
            weighted_days(from, to)
        })
        .sum()
}
