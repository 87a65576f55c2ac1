//! Leave and overtime requests and their approval lifecycle.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Deserialize;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    ApprovalState, Decision, EmployeeId, LeaveRequest, LeaveType, ManagerId, OvertimeRequest,
    RequestId,
};
use crate::store::{AttendanceStore, RequestKind};

use super::AttendanceLedger;

/// A leave request as submitted by an employee.
#[derive(Debug, Clone, Deserialize)]
pub struct LeaveSubmission {
    /// Kind of leave.
    #[serde(default)]
    pub leave_type: LeaveType,
    /// First day of leave.
    pub from_date: NaiveDate,
    /// Last day of leave, inclusive.
    pub to_date: NaiveDate,
    /// Reference to an uploaded supporting document.
    #[serde(default)]
    pub attachment_ref: Option<String>,
    /// Free-text note.
    #[serde(default)]
    pub note: Option<String>,
}

/// An overtime request as submitted by an employee.
#[derive(Debug, Clone, Deserialize)]
pub struct OvertimeSubmission {
    /// Day of the overtime.
    pub date: NaiveDate,
    /// Planned start.
    pub from_time: NaiveTime,
    /// Planned end.
    pub to_time: NaiveTime,
    /// Free-text note.
    #[serde(default)]
    pub note: Option<String>,
}

impl<S: AttendanceStore> AttendanceLedger<S> {
    /// Files a pending leave request.
    ///
    /// Fails with `InvalidRange` when `to_date` is before `from_date`.
    pub fn submit_leave(
        &self,
        employee_id: EmployeeId,
        submission: LeaveSubmission,
        now: NaiveDateTime,
    ) -> EngineResult<LeaveRequest> {
        if submission.to_date < submission.from_date {
            return Err(EngineError::InvalidRange {
                field: "to_date".to_string(),
                message: format!(
                    "{} is before from_date {}",
                    submission.to_date, submission.from_date
                ),
            });
        }
        self.store.employee(employee_id)?;

        let request = LeaveRequest {
            id: RequestId(self.store.next_id()),
            employee_id,
            leave_type: submission.leave_type,
            from_date: submission.from_date,
            to_date: submission.to_date,
            approval: ApprovalState::pending(),
            attachment_ref: submission.attachment_ref,
            note: submission.note,
            created_at: now,
        };
        self.store.transaction(employee_id, |records| {
            records.insert_leave_request(request.clone())
        })?;
        self.store
            .index_request(RequestKind::Leave, request.id, employee_id);

        debug!(employee_id = %employee_id, request_id = %request.id, "Leave request submitted");
        Ok(request)
    }

    /// Approves or rejects a pending leave request.
    ///
    /// Approval consumes `(to_date - from_date).days + 1` days from the
    /// balance of the request's starting year, in the same transaction as
    /// the status change. Rejection leaves the balance untouched. Balances
    /// are never created here: approving against a year with no balance
    /// fails with `LeaveBalanceMissing`.
    pub fn decide_leave(
        &self,
        request_id: RequestId,
        decision: Decision,
        manager: ManagerId,
        now: NaiveDateTime,
    ) -> EngineResult<LeaveRequest> {
        let owner = self.store.request_owner(RequestKind::Leave, request_id)?;

        let request = self.store.transaction(owner, |records| {
            let request = records.leave_request_mut(request_id)?;
            request.approval.decide(request_id, decision, manager, now)?;
            let request = request.clone();

            if decision == Decision::Approve {
                let year = request.from_date.year();
                let balance = records
                    .leave_balance_mut(year)
                    .ok_or(EngineError::LeaveBalanceMissing {
                        employee_id: owner,
                        year,
                    })?;
                balance.consume(request.calendar_days());
            }
            Ok(request)
        })?;

        debug!(
            request_id = %request_id,
            manager_id = %manager,
            status = %request.approval.status,
            "Leave request decided"
        );
        Ok(request)
    }

    /// Approves a pending leave request.
    pub fn approve_leave(
        &self,
        request_id: RequestId,
        manager: ManagerId,
        now: NaiveDateTime,
    ) -> EngineResult<LeaveRequest> {
        self.decide_leave(request_id, Decision::Approve, manager, now)
    }

    /// Rejects a pending leave request.
    pub fn reject_leave(
        &self,
        request_id: RequestId,
        manager: ManagerId,
        now: NaiveDateTime,
    ) -> EngineResult<LeaveRequest> {
        self.decide_leave(request_id, Decision::Reject, manager, now)
    }

    /// Withdraws the employee's own pending leave request.
    pub fn cancel_leave(
        &self,
        employee_id: EmployeeId,
        request_id: RequestId,
    ) -> EngineResult<LeaveRequest> {
        self.ensure_owner(RequestKind::Leave, employee_id, request_id)?;
        self.store.transaction(employee_id, |records| {
            let request = records.leave_request_mut(request_id)?;
            request.approval.cancel(request_id)?;
            Ok(request.clone())
        })
    }

    /// Files a pending overtime request.
    ///
    /// Fails with `InvalidRange` when `to_time` is before `from_time`.
    pub fn submit_overtime(
        &self,
        employee_id: EmployeeId,
        submission: OvertimeSubmission,
        now: NaiveDateTime,
    ) -> EngineResult<OvertimeRequest> {
        if submission.to_time < submission.from_time {
            return Err(EngineError::InvalidRange {
                field: "to_time".to_string(),
                message: format!(
                    "{} is before from_time {}",
                    submission.to_time, submission.from_time
                ),
            });
        }
        self.store.employee(employee_id)?;

        let request = OvertimeRequest {
            id: RequestId(self.store.next_id()),
            employee_id,
            date: submission.date,
            from_time: submission.from_time,
            to_time: submission.to_time,
            approval: ApprovalState::pending(),
            note: submission.note,
            created_at: now,
        };
        self.store.transaction(employee_id, |records| {
            records.insert_overtime_request(request.clone())
        })?;
        self.store
            .index_request(RequestKind::Overtime, request.id, employee_id);

        debug!(employee_id = %employee_id, request_id = %request.id, "Overtime request submitted");
        Ok(request)
    }

    /// Approves or rejects a pending overtime request.
    pub fn decide_overtime(
        &self,
        request_id: RequestId,
        decision: Decision,
        manager: ManagerId,
        now: NaiveDateTime,
    ) -> EngineResult<OvertimeRequest> {
        let owner = self.store.request_owner(RequestKind::Overtime, request_id)?;
        let request = self.store.transaction(owner, |records| {
            let request = records.overtime_request_mut(request_id)?;
            request.approval.decide(request_id, decision, manager, now)?;
            Ok(request.clone())
        })?;

        debug!(
            request_id = %request_id,
            manager_id = %manager,
            status = %request.approval.status,
            "Overtime request decided"
        );
        Ok(request)
    }

    /// Approves a pending overtime request.
    pub fn approve_overtime(
        &self,
        request_id: RequestId,
        manager: ManagerId,
        now: NaiveDateTime,
    ) -> EngineResult<OvertimeRequest> {
        self.decide_overtime(request_id, Decision::Approve, manager, now)
    }

    /// Rejects a pending overtime request.
    pub fn reject_overtime(
        &self,
        request_id: RequestId,
        manager: ManagerId,
        now: NaiveDateTime,
    ) -> EngineResult<OvertimeRequest> {
        self.decide_overtime(request_id, Decision::Reject, manager, now)
    }

    /// Withdraws the employee's own pending overtime request.
    pub fn cancel_overtime(
        &self,
        employee_id: EmployeeId,
        request_id: RequestId,
    ) -> EngineResult<OvertimeRequest> {
        self.ensure_owner(RequestKind::Overtime, employee_id, request_id)?;
        self.store.transaction(employee_id, |records| {
            let request = records.overtime_request_mut(request_id)?;
            request.approval.cancel(request_id)?;
            Ok(request.clone())
        })
    }

    // Another employee's request is reported as not found.
    fn ensure_owner(
        &self,
        kind: RequestKind,
        employee_id: EmployeeId,
        request_id: RequestId,
    ) -> EngineResult<()> {
        match self.store.request_owner(kind, request_id)? {
            owner if owner == employee_id => Ok(()),
            _ => Err(EngineError::RequestNotFound { request_id }),
        }
    }
}
