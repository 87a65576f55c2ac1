//! Core data models for the attendance and payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod audit;
mod employee;
mod leave_balance;
mod period;
mod reference;
mod request;
mod salary;
mod timesheet;

pub use audit::{AuditStep, AuditTrace};
pub use employee::{Employee, EmployeeId, EmployeeSummary, ManagerId};
pub use leave_balance::{DEFAULT_ANNUAL_LEAVES, LeaveBalance};
pub use period::PayMonth;
pub use reference::{Department, Position, ShiftType, WorkingShift};
pub use request::{
    ApprovalState, Decision, LeaveRequest, LeaveType, OvertimeRequest, RequestId, RequestStatus,
};
pub use salary::{EmployeeEvaluation, SalaryRecord, SalaryRecordView};
pub use timesheet::{TimeSheet, TimesheetKey, TimesheetSlot, TimesheetStatus, TimesheetView};
