//! The per-employee record book.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use chrono::NaiveDate;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    EmployeeEvaluation, EmployeeId, LeaveBalance, LeaveRequest, OvertimeRequest, PayMonth,
    RequestId, SalaryRecord, ShiftType, TimeSheet, TimesheetKey,
};

/// Everything stored for one employee, keyed by each record's unique
/// constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeRecords {
    timesheets: BTreeMap<TimesheetKey, TimeSheet>,
    leave_requests: BTreeMap<RequestId, LeaveRequest>,
    overtime_requests: BTreeMap<RequestId, OvertimeRequest>,
    leave_balances: BTreeMap<i32, LeaveBalance>,
    salary_records: BTreeMap<PayMonth, SalaryRecord>,
    evaluations: BTreeMap<PayMonth, EmployeeEvaluation>,
}

impl EmployeeRecords {
    /// Inserts a new attendance row.
    ///
    /// Fails with `Conflict` when a row with the same
    /// `(date, shift | overtime)` key exists.
    pub fn insert_timesheet(&mut self, sheet: TimeSheet) -> EngineResult<&mut TimeSheet> {
        match self.timesheets.entry(sheet.key()) {
            Entry::Occupied(existing) => Err(EngineError::Conflict {
                message: format!(
                    "timesheet for employee {} on {} already exists",
                    existing.get().employee_id,
                    existing.get().date
                ),
            }),
            Entry::Vacant(slot) => Ok(slot.insert(sheet)),
        }
    }

    /// Gets an attendance row by key.
    pub fn timesheet(&self, key: &TimesheetKey) -> Option<&TimeSheet> {
        self.timesheets.get(key)
    }

    /// Gets an attendance row by key for mutation.
    pub fn timesheet_mut(&mut self, key: &TimesheetKey) -> Option<&mut TimeSheet> {
        self.timesheets.get_mut(key)
    }

    /// Rows dated within `[from, to]`, ordered by date then slot.
    pub fn timesheets_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> impl Iterator<Item = &TimeSheet> + '_ {
        self.timesheets
            .range(TimesheetKey::shift(from, ShiftType::Morning)..)
            .take_while(move |(key, _)| key.date <= to)
            .map(|(_, sheet)| sheet)
    }

    /// Rows dated within a month.
    pub fn timesheets_in(&self, period: PayMonth) -> impl Iterator<Item = &TimeSheet> + '_ {
        self.timesheets_between(period.first_day(), period.last_day())
    }

    /// Adds a leave request. Fails with `Conflict` on a reused id.
    pub fn insert_leave_request(&mut self, request: LeaveRequest) -> EngineResult<()> {
        match self.leave_requests.entry(request.id) {
            Entry::Occupied(_) => Err(EngineError::Conflict {
                message: format!("leave request {} already exists", request.id),
            }),
            Entry::Vacant(slot) => {
                slot.insert(request);
                Ok(())
            }
        }
    }

    /// Gets a leave request for mutation.
    pub fn leave_request_mut(&mut self, id: RequestId) -> EngineResult<&mut LeaveRequest> {
        self.leave_requests
            .get_mut(&id)
            .ok_or(EngineError::RequestNotFound { request_id: id })
    }

    /// All leave requests, oldest first.
    pub fn leave_requests(&self) -> impl Iterator<Item = &LeaveRequest> + '_ {
        self.leave_requests.values()
    }

    /// Adds an overtime request. Fails with `Conflict` on a reused id.
    pub fn insert_overtime_request(&mut self, request: OvertimeRequest) -> EngineResult<()> {
        match self.overtime_requests.entry(request.id) {
            Entry::Occupied(_) => Err(EngineError::Conflict {
                message: format!("overtime request {} already exists", request.id),
            }),
            Entry::Vacant(slot) => {
                slot.insert(request);
                Ok(())
            }
        }
    }

    /// Gets an overtime request for mutation.
    pub fn overtime_request_mut(&mut self, id: RequestId) -> EngineResult<&mut OvertimeRequest> {
        self.overtime_requests
            .get_mut(&id)
            .ok_or(EngineError::RequestNotFound { request_id: id })
    }

    /// All overtime requests, oldest first.
    pub fn overtime_requests(&self) -> impl Iterator<Item = &OvertimeRequest> + '_ {
        self.overtime_requests.values()
    }

    /// Whether an approved overtime request covers `date`.
    pub fn approved_overtime_on(&self, date: NaiveDate) -> bool {
        self.overtime_requests.values().any(|r| r.authorizes(date))
    }

    /// Gets the leave balance of a year, creating the default one if absent.
    pub fn ensure_leave_balance(&mut self, employee_id: EmployeeId, year: i32) -> &mut LeaveBalance {
        self.leave_balances
            .entry(year)
            .or_insert_with(|| LeaveBalance::new(employee_id, year))
    }

    /// Gets the leave balance of a year.
    pub fn leave_balance(&self, year: i32) -> Option<&LeaveBalance> {
        self.leave_balances.get(&year)
    }

    /// Gets the leave balance of a year for mutation.
    pub fn leave_balance_mut(&mut self, year: i32) -> Option<&mut LeaveBalance> {
        self.leave_balances.get_mut(&year)
    }

    /// Creates the empty salary record and evaluation of a month if absent.
    pub fn ensure_monthly_records(&mut self, employee_id: EmployeeId, period: PayMonth) {
        self.salary_records
            .entry(period)
            .or_insert_with(|| SalaryRecord::empty(employee_id, period));
        self.evaluations
            .entry(period)
            .or_insert_with(|| EmployeeEvaluation::empty(employee_id, period));
    }

    /// Gets the salary record of a month.
    pub fn salary_record(&self, period: PayMonth) -> Option<&SalaryRecord> {
        self.salary_records.get(&period)
    }

    /// Inserts or overwrites the salary record of its month.
    pub fn upsert_salary_record(&mut self, record: SalaryRecord) {
        self.salary_records.insert(record.period(), record);
    }

    /// Gets the evaluation of a month.
    pub fn evaluation(&self, period: PayMonth) -> Option<&EmployeeEvaluation> {
        self.evaluations.get(&period)
    }

    /// Gets the evaluation of a month, creating an empty one if absent.
    pub fn ensure_evaluation(
        &mut self,
        employee_id: EmployeeId,
        period: PayMonth,
    ) -> &mut EmployeeEvaluation {
        self.evaluations
            .entry(period)
            .or_insert_with(|| EmployeeEvaluation::empty(employee_id, period))
    }
}
