//! Error types for the attendance and payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every rejection the ledger, payroll engine and reference data loader
//! can produce. Errors are propagated to the caller; logging and HTTP status
//! mapping happen at the boundary.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{EmployeeId, RequestId, RequestStatus, ShiftType};

/// Broad classification of an [`EngineError`].
///
/// The boundary layer uses the kind to decide how an error is reported
/// (for example which HTTP status it maps to).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Bad input, rejected before any mutation.
    Validation,
    /// The request conflicts with the current state of a record.
    StateConflict,
    /// A referenced employee, shift, request or reference row does not exist.
    NotFound,
    /// Stored data violates a precondition the engine relies on.
    Consistency,
    /// Reference data could not be loaded.
    Config,
}

/// The main error type for the engine.
///
/// # Example
///
/// ```
/// use attendance_payroll::error::{EngineError, ErrorKind};
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/shifts.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/shifts.yaml");
/// assert_eq!(error.kind(), ErrorKind::Config);
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A required field is absent or blank.
    #[error("Missing required field '{field}'")]
    MissingField {
        /// The missing field.
        field: String,
    },

    /// A date or time range ends before it starts.
    #[error("Invalid range for '{field}': {message}")]
    InvalidRange {
        /// The field holding the range.
        field: String,
        /// A description of the problem.
        message: String,
    },

    /// A month/year pair does not name a calendar month.
    #[error("Invalid payroll period {month}/{year}")]
    InvalidPeriod {
        /// The requested month.
        month: u32,
        /// The requested year.
        year: i32,
    },

    /// The business is closed for this shift on this day.
    #[error("{shift_type} shift is closed on {date}")]
    ClosedDay {
        /// The day of the attempted check-in.
        date: NaiveDate,
        /// The requested shift.
        shift_type: ShiftType,
    },

    /// Check-in was attempted outside the shift window.
    #[error("Check-in at {time} is outside the {shift_type} window {start}-{end}")]
    OutsideWindow {
        /// The requested shift.
        shift_type: ShiftType,
        /// The time of the attempt.
        time: NaiveTime,
        /// Shift start.
        start: NaiveTime,
        /// Shift end.
        end: NaiveTime,
    },

    /// Check-out is further before the shift end than allowed.
    #[error("Check-out is {minutes_early} minutes early (limit {limit})")]
    EarlyLeaveTooLarge {
        /// Time between check-out and shift end, in minutes rounded up.
        minutes_early: i64,
        /// The largest accepted value.
        limit: i64,
    },

    /// The row for this shift already has a check-in.
    #[error("Employee {employee_id} already checked in on {date}")]
    AlreadyCheckedIn {
        /// The employee.
        employee_id: EmployeeId,
        /// The attendance date.
        date: NaiveDate,
    },

    /// The row for this shift already has a check-out.
    #[error("Employee {employee_id} already checked out on {date}")]
    AlreadyCheckedOut {
        /// The employee.
        employee_id: EmployeeId,
        /// The attendance date.
        date: NaiveDate,
    },

    /// Check-out without a prior check-in.
    #[error("Employee {employee_id} has not checked in on {date}")]
    NotCheckedIn {
        /// The employee.
        employee_id: EmployeeId,
        /// The attendance date.
        date: NaiveDate,
    },

    /// The monthly early-leave quota is used up.
    #[error("Employee {employee_id} already has {count} early leaves this month")]
    EarlyLeaveQuotaExceeded {
        /// The employee.
        employee_id: EmployeeId,
        /// Early-leave rows already recorded this month.
        count: usize,
    },

    /// Overtime attendance without an approved overtime request.
    #[error("Employee {employee_id} has no approved overtime request on {date}")]
    OvertimeNotApproved {
        /// The employee.
        employee_id: EmployeeId,
        /// The overtime date.
        date: NaiveDate,
    },

    /// The request was already decided or cancelled.
    #[error("Request {request_id} is {status}, expected PENDING")]
    RequestNotPending {
        /// The request.
        request_id: RequestId,
        /// Its current status.
        status: RequestStatus,
    },

    /// A unique key is already taken in the store.
    #[error("Conflict: {message}")]
    Conflict {
        /// Which key collided.
        message: String,
    },

    /// No employee with this id.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The employee id that was not found.
        employee_id: EmployeeId,
    },

    /// No working shift of this type in the reference data.
    #[error("Shift not found: {shift_type}")]
    ShiftNotFound {
        /// The shift type that was not found.
        shift_type: ShiftType,
    },

    /// No leave or overtime request with this id.
    #[error("Request not found: {request_id}")]
    RequestNotFound {
        /// The request id that was not found.
        request_id: RequestId,
    },

    /// Position code missing from the reference data.
    #[error("Position not found: {code}")]
    PositionNotFound {
        /// The position code.
        code: String,
    },

    /// Department code missing from the reference data.
    #[error("Department not found: {code}")]
    DepartmentNotFound {
        /// The department code.
        code: String,
    },

    /// Approval needs a leave balance that does not exist.
    #[error("Leave balance missing for employee {employee_id} in {year}")]
    LeaveBalanceMissing {
        /// The employee.
        employee_id: EmployeeId,
        /// The balance year.
        year: i32,
    },
}

impl EngineError {
    /// Returns the broad classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ErrorKind::Config
            }
            EngineError::MissingField { .. }
            | EngineError::InvalidRange { .. }
            | EngineError::InvalidPeriod { .. }
            | EngineError::ClosedDay { .. }
            | EngineError::OutsideWindow { .. }
            | EngineError::EarlyLeaveTooLarge { .. } => ErrorKind::Validation,
            EngineError::AlreadyCheckedIn { .. }
            | EngineError::AlreadyCheckedOut { .. }
            | EngineError::NotCheckedIn { .. }
            | EngineError::EarlyLeaveQuotaExceeded { .. }
            | EngineError::OvertimeNotApproved { .. }
            | EngineError::RequestNotPending { .. }
            | EngineError::Conflict { .. } => ErrorKind::StateConflict,
            EngineError::EmployeeNotFound { .. }
            | EngineError::ShiftNotFound { .. }
            | EngineError::RequestNotFound { .. }
            | EngineError::PositionNotFound { .. }
            | EngineError::DepartmentNotFound { .. } => ErrorKind::NotFound,
            EngineError::LeaveBalanceMissing { .. } => ErrorKind::Consistency,
        }
    }

    /// Returns a stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::ConfigNotFound { .. } => "CONFIG_NOT_FOUND",
            EngineError::ConfigParseError { .. } => "CONFIG_PARSE_ERROR",
            EngineError::MissingField { .. } => "MISSING_FIELD",
            EngineError::InvalidRange { .. } => "INVALID_RANGE",
            EngineError::InvalidPeriod { .. } => "INVALID_PERIOD",
            EngineError::ClosedDay { .. } => "CLOSED_DAY",
            EngineError::OutsideWindow { .. } => "OUTSIDE_WINDOW",
            EngineError::EarlyLeaveTooLarge { .. } => "EARLY_LEAVE_TOO_LARGE",
            EngineError::AlreadyCheckedIn { .. } => "ALREADY_CHECKED_IN",
            EngineError::AlreadyCheckedOut { .. } => "ALREADY_CHECKED_OUT",
            EngineError::NotCheckedIn { .. } => "NOT_CHECKED_IN",
            EngineError::EarlyLeaveQuotaExceeded { .. } => "EARLY_LEAVE_QUOTA_EXCEEDED",
            EngineError::OvertimeNotApproved { .. } => "OVERTIME_NOT_APPROVED",
            EngineError::RequestNotPending { .. } => "REQUEST_NOT_PENDING",
            EngineError::Conflict { .. } => "CONFLICT",
            EngineError::EmployeeNotFound { .. } => "EMPLOYEE_NOT_FOUND",
            EngineError::ShiftNotFound { .. } => "SHIFT_NOT_FOUND",
            EngineError::RequestNotFound { .. } => "REQUEST_NOT_FOUND",
            EngineError::PositionNotFound { .. } => "POSITION_NOT_FOUND",
            EngineError::DepartmentNotFound { .. } => "DEPARTMENT_NOT_FOUND",
            EngineError::LeaveBalanceMissing { .. } => "LEAVE_BALANCE_MISSING",
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/file.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/file.yaml"
        );
    }

    #[test]
    fn test_shift_not_found_displays_shift_type() {
        let error = EngineError::ShiftNotFound {
            shift_type: ShiftType::Afternoon,
        };
        assert_eq!(error.to_string(), "Shift not found: AFTERNOON");
        assert_eq!(error.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_request_not_pending_displays_status() {
        let error = EngineError::RequestNotPending {
            request_id: RequestId(7),
            status: RequestStatus::Approved,
        };
        assert_eq!(error.to_string(), "Request 7 is APPROVED, expected PENDING");
        assert_eq!(error.kind(), ErrorKind::StateConflict);
    }

    #[test]
    fn test_missing_field_is_validation() {
        let error = EngineError::MissingField {
            field: "full_name".to_string(),
        };
        assert_eq!(error.to_string(), "Missing required field 'full_name'");
        assert_eq!(error.kind(), ErrorKind::Validation);
        assert_eq!(error.code(), "MISSING_FIELD");
    }

    #[test]
    fn test_early_leave_too_large_is_validation() {
        let error = EngineError::EarlyLeaveTooLarge {
            minutes_early: 31,
            limit: 30,
        };
        assert_eq!(error.to_string(), "Check-out is 31 minutes early (limit 30)");
        assert_eq!(error.kind(), ErrorKind::Validation);
        assert_eq!(error.code(), "EARLY_LEAVE_TOO_LARGE");
    }

    #[test]
    fn test_leave_balance_missing_is_consistency() {
        let error = EngineError::LeaveBalanceMissing {
            employee_id: EmployeeId(3),
            year: 2026,
        };
        assert_eq!(
            error.to_string(),
            "Leave balance missing for employee 3 in 2026"
        );
        assert_eq!(error.kind(), ErrorKind::Consistency);
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_not_found() -> EngineResult<()> {
            Err(EngineError::EmployeeNotFound {
                employee_id: EmployeeId(1),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
