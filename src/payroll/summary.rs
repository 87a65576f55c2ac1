//! Monthly attendance summary report.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{AuditTrace, EmployeeSummary, PayMonth, TimesheetStatus};
use crate::store::AttendanceStore;

use super::engine::PayrollEngine;
use super::hours::aggregate_month;

/// Number of shift rows per status in a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusCounts {
    /// `PRESENT` rows.
    pub present: u32,
    /// `LATE` rows.
    pub late: u32,
    /// `EARLY_LEAVE` rows.
    pub early_leave: u32,
    /// `ABSENT` rows.
    pub absent: u32,
    /// `LEAVE` rows.
    pub leave: u32,
    /// Rows still waiting for a check-out.
    pub incomplete: u32,
}

impl StatusCounts {
    fn add(&mut self, status: TimesheetStatus) {
        let slot = match status {
            TimesheetStatus::Present => &mut self.present,
            TimesheetStatus::Late => &mut self.late,
            TimesheetStatus::EarlyLeave => &mut self.early_leave,
            TimesheetStatus::Absent => &mut self.absent,
            TimesheetStatus::Leave => &mut self.leave,
            TimesheetStatus::Incomplete => &mut self.incomplete,
        };
        *slot += 1;
    }
}

/// One employee's line in the attendance summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    /// The employee.
    pub employee: EmployeeSummary,
    /// The month.
    pub month: u32,
    /// The year.
    pub year: i32,
    /// Shift rows per status.
    pub status_counts: StatusCounts,
    /// Hours payroll would count as regular.
    pub regular_hours: Decimal,
    /// Overtime hours payroll would count.
    pub overtime_hours: Decimal,
    /// Weighted approved leave days.
    pub leave_days: Decimal,
    /// Evaluation content, if the month has been evaluated.
    pub evaluation: Option<String>,
}

impl<S: AttendanceStore> PayrollEngine<S> {
    /// Summarizes a month of attendance for every active employee,
    /// optionally restricted to one department. Read-only.
    ///
    /// Employees with no rows in the month still appear, with zero counts.
    pub fn attendance_summary(
        &self,
        department: Option<&str>,
        period: PayMonth,
    ) -> EngineResult<Vec<AttendanceSummary>> {
        let mut employees = self.active_employees(department)?;
        employees.sort_by(|a, b| a.employee_code.cmp(&b.employee_code));

        employees
            .iter()
            .map(|employee| {
                let records = self.store.snapshot(employee.id)?;

                let mut status_counts = StatusCounts::default();
                records
                    .timesheets_in(period)
                    .filter(|sheet| sheet.shift.is_some())
                    .for_each(|sheet| status_counts.add(sheet.status));

                let attendance = aggregate_month(&records, period, &mut AuditTrace::default());

                Ok(AttendanceSummary {
                    employee: self.reference.summarize(employee),
                    month: period.month,
                    year: period.year,
                    status_counts,
                    regular_hours: attendance.regular_hours,
                    overtime_hours: attendance.overtime_hours,
                    leave_days: attendance.leave_days,
                    evaluation: records
                        .evaluation(period)
                        .and_then(|evaluation| evaluation.content.clone()),
                })
            })
            .collect()
    }
}
