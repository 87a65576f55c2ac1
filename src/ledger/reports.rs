//! Read-only attendance reports.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    EmployeeId, EmployeeSummary, LeaveBalance, LeaveRequest, OvertimeRequest, PayMonth,
    RequestStatus, TimesheetView,
};
use crate::store::AttendanceStore;

use super::AttendanceLedger;
use super::leave_days::count_leave_days;

/// A request awaiting a manager's decision, with who filed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingRequest<T> {
    /// The requesting employee.
    pub employee: EmployeeSummary,
    /// The request.
    #[serde(flatten)]
    pub request: T,
}

impl<S: AttendanceStore> AttendanceLedger<S> {
    /// Attendance rows of one day.
    pub fn daily_timesheet(
        &self,
        employee_id: EmployeeId,
        date: NaiveDate,
    ) -> EngineResult<Vec<TimesheetView>> {
        let records = self.store.snapshot(employee_id)?;
        Ok(records
            .timesheets_between(date, date)
            .map(TimesheetView::from)
            .collect())
    }

    /// Attendance rows of one month, ordered by date.
    pub fn monthly_timesheet(
        &self,
        employee_id: EmployeeId,
        period: PayMonth,
    ) -> EngineResult<Vec<TimesheetView>> {
        let records = self.store.snapshot(employee_id)?;
        Ok(records
            .timesheets_in(period)
            .map(TimesheetView::from)
            .collect())
    }

    /// Approved leave days falling inside a month.
    pub fn leave_days_in_month(
        &self,
        employee_id: EmployeeId,
        period: PayMonth,
    ) -> EngineResult<Decimal> {
        let records = self.store.snapshot(employee_id)?;
        Ok(count_leave_days(records.leave_requests(), period))
    }

    /// Leave balance of a year.
    pub fn leave_balance(&self, employee_id: EmployeeId, year: i32) -> EngineResult<LeaveBalance> {
        let records = self.store.snapshot(employee_id)?;
        records
            .leave_balance(year)
            .cloned()
            .ok_or(EngineError::LeaveBalanceMissing { employee_id, year })
    }

    /// An employee's leave requests, newest first.
    pub fn leave_requests_for(&self, employee_id: EmployeeId) -> EngineResult<Vec<LeaveRequest>> {
        let records = self.store.snapshot(employee_id)?;
        let mut requests: Vec<LeaveRequest> = records.leave_requests().cloned().collect();
        requests.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(requests)
    }

    /// An employee's overtime requests, newest first.
    pub fn overtime_requests_for(
        &self,
        employee_id: EmployeeId,
    ) -> EngineResult<Vec<OvertimeRequest>> {
        let records = self.store.snapshot(employee_id)?;
        let mut requests: Vec<OvertimeRequest> = records.overtime_requests().cloned().collect();
        requests.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(requests)
    }

    /// Every pending leave request across employees, newest first.
    pub fn pending_leave_requests(&self) -> EngineResult<Vec<PendingRequest<LeaveRequest>>> {
        let mut pending = Vec::new();
        for employee in self.store.employees() {
            let records = self.store.snapshot(employee.id)?;
            let summary = self.summarize(&employee);
            pending.extend(
                records
                    .leave_requests()
                    .filter(|r| r.approval.status == RequestStatus::Pending)
                    .map(|r| PendingRequest {
                        employee: summary.clone(),
                        request: r.clone(),
                    }),
            );
        }
        pending.sort_by(|a, b| {
            b.request
                .created_at
                .cmp(&a.request.created_at)
                .then(b.request.id.cmp(&a.request.id))
        });
        Ok(pending)
    }

    /// Every pending overtime request across employees, newest first.
    pub fn pending_overtime_requests(&self) -> EngineResult<Vec<PendingRequest<OvertimeRequest>>> {
        let mut pending = Vec::new();
        for employee in self.store.employees() {
            let records = self.store.snapshot(employee.id)?;
            let summary = self.summarize(&employee);
            pending.extend(
                records
                    .overtime_requests()
                    .filter(|r| r.approval.status == RequestStatus::Pending)
                    .map(|r| PendingRequest {
                        employee: summary.clone(),
                        request: r.clone(),
                    }),
            );
        }
        pending.sort_by(|a, b| {
            b.request
                .created_at
                .cmp(&a.request.created_at)
                .then(b.request.id.cmp(&a.request.id))
        });
        Ok(pending)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::super::{LeaveSubmission, OvertimeSubmission};
    use super::*;
    use crate::models::{LeaveType, ManagerId, ShiftType};
    use chrono::NaiveTime;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn leave(from: &str, to: &str) -> LeaveSubmission {
        LeaveSubmission {
            leave_type: LeaveType::Annual,
            from_date: make_date(from),
            to_date: make_date(to),
            attachment_ref: None,
            note: None,
        }
    }

    #[test]
    fn test_monthly_timesheet_lists_rows_in_order() {
        let ledger = create_ledger();
        let employee = register(&ledger, "ENG");
        ledger
            .check_in(employee.id, ShiftType::Afternoon, make_datetime("2026-01-14 13:00:00"))
            .unwrap();
        ledger
            .check_in(employee.id, ShiftType::Morning, make_datetime("2026-01-13 08:00:00"))
            .unwrap();
        ledger
            .check_in(employee.id, ShiftType::Morning, make_datetime("2026-02-02 08:00:00"))
            .unwrap();

        let rows = ledger
            .monthly_timesheet(employee.id, PayMonth::new(1, 2026).unwrap())
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, make_date("2026-01-13"));
        assert_eq!(rows[1].shift, "AFTERNOON");
    }

    #[test]
    fn test_leave_days_in_month_counts_approved_only() {
        let ledger = create_ledger();
        let employee = register(&ledger, "ENG");
        let now = make_datetime("2026-01-02 09:00:00");
        let approved = ledger
            .submit_leave(employee.id, leave("2026-01-12", "2026-01-18"), now)
            .unwrap();
        ledger
            .submit_leave(employee.id, leave("2026-01-19", "2026-01-20"), now)
            .unwrap();
        ledger.approve_leave(approved.id, ManagerId(1), now).unwrap();

        let days = ledger
            .leave_days_in_month(employee.id, PayMonth::new(1, 2026).unwrap())
            .unwrap();
        assert_eq!(days, dec("5.5"));
    }

    #[test]
    fn test_leave_balance_missing_for_untouched_year() {
        let ledger = create_ledger();
        let employee = register(&ledger, "ENG");
        assert!(matches!(
            ledger.leave_balance(employee.id, 2030),
            Err(EngineError::LeaveBalanceMissing { year: 2030, .. })
        ));
    }

    #[test]
    fn test_pending_lists_span_employees() {
        let ledger = create_ledger();
        let first = register(&ledger, "ENG");
        let second = register(&ledger, "HR");
        ledger
            .submit_leave(first.id, leave("2026-01-12", "2026-01-12"), make_datetime("2026-01-02 09:00:00"))
            .unwrap();
        let decided = ledger
            .submit_leave(second.id, leave("2026-01-13", "2026-01-13"), make_datetime("2026-01-03 09:00:00"))
            .unwrap();
        ledger
            .submit_leave(second.id, leave("2026-01-14", "2026-01-14"), make_datetime("2026-01-04 09:00:00"))
            .unwrap();
        ledger
            .reject_leave(decided.id, ManagerId(1), make_datetime("2026-01-05 09:00:00"))
            .unwrap();

        let pending = ledger.pending_leave_requests().unwrap();
        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].employee.employee_code, "HR001");
        assert_eq!(pending[0].employee.department, "Human Resources");
        assert_eq!(pending[1].employee.employee_code, "ENG001");
    }

    #[test]
    fn test_pending_overtime_and_own_requests() {
        let ledger = create_ledger();
        let employee = register(&ledger, "ENG");
        let submission = OvertimeSubmission {
            date: make_date("2026-01-14"),
            from_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            to_time: NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
            note: Some("release".to_string()),
        };
        let request = ledger
            .submit_overtime(employee.id, submission, make_datetime("2026-01-10 09:00:00"))
            .unwrap();

        assert_eq!(ledger.pending_overtime_requests().unwrap().len(), 1);
        ledger
            .approve_overtime(request.id, ManagerId(1), make_datetime("2026-01-11 09:00:00"))
            .unwrap();
        assert!(ledger.pending_overtime_requests().unwrap().is_empty());

        let own = ledger.overtime_requests_for(employee.id).unwrap();
        assert_eq!(own.len(), 1);
        assert_eq!(own[0].approval.status, RequestStatus::Approved);
    }

    #[test]
    fn test_pending_request_serializes_flat() {
        let ledger = create_ledger();
        let employee = register(&ledger, "ENG");
        ledger
            .submit_leave(employee.id, leave("2026-01-12", "2026-01-12"), make_datetime("2026-01-02 09:00:00"))
            .unwrap();
        let pending = ledger.pending_leave_requests().unwrap();
        let json = serde_json::to_value(&pending[0]).unwrap();
        assert_eq!(json["status"], "PENDING");
        assert_eq!(json["employee"]["employee_code"], "ENG001");
        assert_eq!(json["from_date"], "2026-01-12");
    }
}
