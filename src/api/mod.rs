//! HTTP API module for the attendance and payroll engine.
//!
//! This module exposes the attendance ledger and the payroll engine as a
//! JSON REST API.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    CancelRequest, DateQuery, DecisionRequest, EvaluationRequest, LeaveRequestBody,
    OvertimeAttendanceRequest, OvertimeRequestBody, PeriodQuery, ShiftAttendanceRequest,
    YearQuery,
};
pub use response::{ApiError, ApiErrorResponse, LeaveDaysResponse, status_for};
pub use state::AppState;
