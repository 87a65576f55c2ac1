//! Monthly attendance aggregation.
//!
//! Reduces one employee's attendance rows and approved leave for a month to
//! the three quantities the salary rules consume.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::count_leave_days;
use crate::models::{AuditTrace, PayMonth};
use crate::store::EmployeeRecords;

/// Hours and leave days of one employee-month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MonthlyAttendance {
    /// Hours worked on regular shifts classified `PRESENT` or `EARLY_LEAVE`.
    pub regular_hours: Decimal,
    /// Overtime hours recorded on regular-shift rows.
    pub overtime_hours: Decimal,
    /// Weighted approved leave days inside the month.
    pub leave_days: Decimal,
}

impl MonthlyAttendance {
    /// Regular plus overtime hours.
    pub fn total_hours(&self) -> Decimal {
        self.regular_hours + self.overtime_hours
    }
}

/// Aggregates a month of attendance, recording each figure in `trace`.
///
/// Only rows with a shift take part: overtime sessions carry no shift and
/// are left out of both sums. Open rows (no check-out) contribute zero
/// hours.
pub fn aggregate_month(
    records: &EmployeeRecords,
    period: PayMonth,
    trace: &mut AuditTrace,
) -> MonthlyAttendance {
    let shift_rows: Vec<_> = records
        .timesheets_in(period)
        .filter(|sheet| sheet.shift.is_some())
        .collect();

    let worked_rows: Vec<_> = shift_rows
        .iter()
        .filter(|sheet| sheet.status.counts_as_worked())
        .collect();
    let regular_hours: Decimal = worked_rows.iter().map(|sheet| sheet.worked_hours()).sum();
    trace.record(
        "regular_hours",
        "Regular Hours Aggregation",
        serde_json::json!({
            "period": period.to_string(),
            "shift_rows": shift_rows.len(),
            "worked_rows": worked_rows.len(),
        }),
        serde_json::json!({ "regular_hours": regular_hours.to_string() }),
        format!(
            "Summed check-in to check-out time of {} PRESENT/EARLY_LEAVE shift rows",
            worked_rows.len()
        ),
    );

    let overtime_hours: Decimal = shift_rows.iter().map(|sheet| sheet.overtime_hours).sum();
    trace.record(
        "overtime_hours",
        "Overtime Hours Aggregation",
        serde_json::json!({ "shift_rows": shift_rows.len() }),
        serde_json::json!({ "overtime_hours": overtime_hours.to_string() }),
        "Summed the overtime field of regular-shift rows".to_string(),
    );

    let leave_days = count_leave_days(records.leave_requests(), period);
    trace.record(
        "leave_days",
        "Approved Leave Days",
        serde_json::json!({
            "period": period.to_string(),
            "approved_requests": records.leave_requests().filter(|r| r.is_approved()).count(),
        }),
        serde_json::json!({ "leave_days": leave_days.to_string() }),
        "Weekdays count 1, Saturdays 0.5, Sundays 0, clipped to the month".to_string(),
    );

    MonthlyAttendance {
        regular_hours,
        overtime_hours,
        leave_days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EmployeeId, ShiftType, TimeSheet, TimesheetStatus};
    use chrono::{NaiveDate, NaiveTime};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn make_time(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M:%S").unwrap()
    }

    fn closed_row(
        date: &str,
        shift_type: ShiftType,
        check_in: &str,
        check_out: &str,
        status: TimesheetStatus,
    ) -> TimeSheet {
        let mut sheet = TimeSheet::for_shift(EmployeeId(1), make_date(date), shift_type);
        sheet.check_in_time = Some(make_time(check_in));
        sheet.check_out_time = Some(make_time(check_out));
        sheet.status = status;
        sheet
    }

    fn january() -> PayMonth {
        PayMonth::new(1, 2026).unwrap()
    }

    #[test]
    fn test_only_present_and_early_leave_rows_count() {
        let mut records = EmployeeRecords::default();
        records
            .insert_timesheet(closed_row(
                "2026-01-12",
                ShiftType::Morning,
                "08:00:00",
                "12:00:00",
                TimesheetStatus::Present,
            ))
            .unwrap();
        records
            .insert_timesheet(closed_row(
                "2026-01-12",
                ShiftType::Afternoon,
                "13:00:00",
                "16:30:00",
                TimesheetStatus::EarlyLeave,
            ))
            .unwrap();
        records
            .insert_timesheet(closed_row(
                "2026-01-13",
                ShiftType::Morning,
                "08:30:00",
                "12:00:00",
                TimesheetStatus::Late,
            ))
            .unwrap();

        let mut trace = AuditTrace::default();
        let attendance = aggregate_month(&records, january(), &mut trace);
        assert_eq!(attendance.regular_hours, dec("7.5"));
        assert_eq!(trace.steps.len(), 3);
    }

    #[test]
    fn test_overtime_session_rows_are_excluded() {
        let mut records = EmployeeRecords::default();
        let mut session = TimeSheet::for_overtime(EmployeeId(1), make_date("2026-01-12"));
        session.check_in_time = Some(make_time("18:00:00"));
        session.check_out_time = Some(make_time("20:00:00"));
        session.status = TimesheetStatus::Present;
        session.overtime_hours = dec("2.00");
        records.insert_timesheet(session).unwrap();

        let mut shift_row = closed_row(
            "2026-01-13",
            ShiftType::Morning,
            "08:00:00",
            "12:00:00",
            TimesheetStatus::Present,
        );
        shift_row.overtime_hours = dec("1.25");
        records.insert_timesheet(shift_row).unwrap();

        let mut trace = AuditTrace::default();
        let attendance = aggregate_month(&records, january(), &mut trace);
        assert_eq!(attendance.regular_hours, dec("4"));
        assert_eq!(attendance.overtime_hours, dec("1.25"));
        assert_eq!(attendance.total_hours(), dec("5.25"));
    }

    #[test]
    fn test_open_rows_contribute_nothing() {
        let mut records = EmployeeRecords::default();
        let mut open = TimeSheet::for_shift(EmployeeId(1), make_date("2026-01-12"), ShiftType::Morning);
        open.check_in_time = Some(make_time("08:00:00"));
        open.status = TimesheetStatus::Present;
        records.insert_timesheet(open).unwrap();

        let mut trace = AuditTrace::default();
        let attendance = aggregate_month(&records, january(), &mut trace);
        assert_eq!(attendance.regular_hours, Decimal::ZERO);
    }

    #[test]
    fn test_empty_month() {
        let records = EmployeeRecords::default();
        let mut trace = AuditTrace::default();
        let attendance = aggregate_month(&records, january(), &mut trace);
        assert_eq!(attendance, MonthlyAttendance::default());
    }
}
