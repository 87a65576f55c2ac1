//! Leave and overtime request models.
//!
//! Both request kinds share the same approval lifecycle:
//! `PENDING → APPROVED | REJECTED` by a manager, or `PENDING → CANCELLED`
//! by the requesting employee.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::{EmployeeId, ManagerId};

/// Unique identifier for a leave or overtime request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    /// Waiting for a manager decision.
    Pending,
    /// Approved by a manager.
    Approved,
    /// Rejected by a manager.
    Rejected,
    /// Withdrawn by the employee.
    Cancelled,
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RequestStatus::Pending => "PENDING",
            RequestStatus::Approved => "APPROVED",
            RequestStatus::Rejected => "REJECTED",
            RequestStatus::Cancelled => "CANCELLED",
        };
        f.write_str(label)
    }
}

/// A manager's decision on a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Approve the request.
    Approve,
    /// Reject the request.
    Reject,
}

impl Decision {
    fn status(self) -> RequestStatus {
        match self {
            Decision::Approve => RequestStatus::Approved,
            Decision::Reject => RequestStatus::Rejected,
        }
    }
}

/// Kind of leave requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaveType {
    /// Annual leave.
    #[default]
    Annual,
    /// Sick leave.
    Sick,
    /// Unpaid leave.
    Unpaid,
    /// Anything else.
    Other,
}

/// Fields shared by both request kinds that track the manager decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalState {
    /// Current status.
    pub status: RequestStatus,
    /// The manager who decided the request.
    pub approved_by: Option<ManagerId>,
    /// When the decision was made.
    pub approved_at: Option<NaiveDateTime>,
}

impl ApprovalState {
    /// A fresh pending state.
    pub fn pending() -> Self {
        Self {
            status: RequestStatus::Pending,
            approved_by: None,
            approved_at: None,
        }
    }

    /// Applies a manager decision; only pending requests can be decided.
    pub fn decide(
        &mut self,
        request_id: RequestId,
        decision: Decision,
        manager: ManagerId,
        at: NaiveDateTime,
    ) -> EngineResult<()> {
        self.ensure_pending(request_id)?;
        self.status = decision.status();
        self.approved_by = Some(manager);
        self.approved_at = Some(at);
        Ok(())
    }

    /// Withdraws a pending request.
    pub fn cancel(&mut self, request_id: RequestId) -> EngineResult<()> {
        self.ensure_pending(request_id)?;
        self.status = RequestStatus::Cancelled;
        Ok(())
    }

    fn ensure_pending(&self, request_id: RequestId) -> EngineResult<()> {
        match self.status {
            RequestStatus::Pending => Ok(()),
            status => Err(EngineError::RequestNotPending { request_id, status }),
        }
    }
}

/// A request for leave over an inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// Unique identifier.
    pub id: RequestId,
    /// The requesting employee.
    pub employee_id: EmployeeId,
    /// Kind of leave.
    pub leave_type: LeaveType,
    /// First day of leave.
    pub from_date: NaiveDate,
    /// Last day of leave (inclusive, never before `from_date`).
    pub to_date: NaiveDate,
    /// Decision state.
    #[serde(flatten)]
    pub approval: ApprovalState,
    /// Reference to an uploaded attachment.
    #[serde(default)]
    pub attachment_ref: Option<String>,
    /// Free-form note.
    #[serde(default)]
    pub note: Option<String>,
    /// When the request was submitted.
    pub created_at: NaiveDateTime,
}

impl LeaveRequest {
    /// Calendar days covered by the request, both ends included.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_payroll::models::{
    ///     ApprovalState, EmployeeId, LeaveRequest, LeaveType, RequestId,
    /// };
    /// use chrono::NaiveDate;
    ///
    /// let request = LeaveRequest {
    ///     id: RequestId(1),
    ///     employee_id: EmployeeId(1),
    ///     leave_type: LeaveType::Annual,
    ///     from_date: NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
    ///     to_date: NaiveDate::from_ymd_opt(2026, 1, 14).unwrap(),
    ///     approval: ApprovalState::pending(),
    ///     attachment_ref: None,
    ///     note: None,
    ///     created_at: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap().and_hms_opt(9, 0, 0).unwrap(),
    /// };
    /// assert_eq!(request.calendar_days(), 3);
    /// ```
    pub fn calendar_days(&self) -> u32 {
        let days = (self.to_date - self.from_date).num_days() + 1;
        u32::try_from(days.max(0)).unwrap_or(u32::MAX)
    }

    /// Returns true if the request has been approved.
    pub fn is_approved(&self) -> bool {
        self.approval.status == RequestStatus::Approved
    }
}

/// A request to work overtime on a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeRequest {
    /// Unique identifier.
    pub id: RequestId,
    /// The requesting employee.
    pub employee_id: EmployeeId,
    /// Overtime date.
    pub date: NaiveDate,
    /// Planned start.
    pub from_time: NaiveTime,
    /// Planned end.
    pub to_time: NaiveTime,
    /// Decision state.
    #[serde(flatten)]
    pub approval: ApprovalState,
    /// Free-form note.
    #[serde(default)]
    pub note: Option<String>,
    /// When the request was submitted.
    pub created_at: NaiveDateTime,
}

impl OvertimeRequest {
    /// Returns true if this request authorizes overtime on `date`.
    pub fn authorizes(&self, date: NaiveDate) -> bool {
        self.date == date && self.approval.status == RequestStatus::Approved
    }
}
