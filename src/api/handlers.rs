//! HTTP request handlers for the attendance and payroll API.
//!
//! Every handler tags its log lines with a fresh correlation id, takes
//! "now" from the state's clock and maps engine errors through
//! [`ApiErrorResponse`].

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    routing::{get, post},
};
use serde::de::DeserializeOwned;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineResult;
use crate::ledger::{EmployeeRegistration, PendingRequest};
use crate::models::{
    Employee, EmployeeEvaluation, EmployeeId, LeaveBalance, LeaveRequest, OvertimeRequest,
    PayMonth, RequestId, SalaryRecordView, TimesheetView,
};
use crate::payroll::{AttendanceSummary, PayrollFilter};

use super::request::{
    CancelRequest, DateQuery, DecisionRequest, EvaluationRequest, LeaveRequestBody,
    OvertimeAttendanceRequest, OvertimeRequestBody, PeriodQuery, ShiftAttendanceRequest,
    YearQuery,
};
use super::response::{ApiErrorResponse, LeaveDaysResponse};
use super::state::AppState;

type ApiResult<T> = Result<Json<T>, ApiErrorResponse>;
type Created<T> = Result<(StatusCode, Json<T>), ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/employees", post(register_employee).get(list_employees))
        .route("/employees/:id/deactivate", post(deactivate_employee))
        .route("/employees/:id/timesheet", get(monthly_timesheet))
        .route("/employees/:id/timesheet/daily", get(daily_timesheet))
        .route("/employees/:id/leave-days", get(leave_days))
        .route("/employees/:id/leave-balance", get(leave_balance))
        .route("/employees/:id/leave-requests", get(employee_leave_requests))
        .route("/employees/:id/overtime-requests", get(employee_overtime_requests))
        .route("/attendance/check-in", post(check_in))
        .route("/attendance/check-out", post(check_out))
        .route("/attendance/overtime/check-in", post(overtime_check_in))
        .route("/attendance/overtime/check-out", post(overtime_check_out))
        .route("/leave-requests", post(submit_leave))
        .route("/leave-requests/pending", get(pending_leave_requests))
        .route("/leave-requests/:id/approve", post(approve_leave))
        .route("/leave-requests/:id/reject", post(reject_leave))
        .route("/leave-requests/:id/cancel", post(cancel_leave))
        .route("/overtime-requests", post(submit_overtime))
        .route("/overtime-requests/pending", get(pending_overtime_requests))
        .route("/overtime-requests/:id/approve", post(approve_overtime))
        .route("/overtime-requests/:id/reject", post(reject_overtime))
        .route("/overtime-requests/:id/cancel", post(cancel_overtime))
        .route("/evaluations", post(evaluate_employee))
        .route("/payroll/monthly", get(monthly_payroll))
        .route("/reports/attendance-summary", get(attendance_summary))
        .with_state(state)
}

/// Logs the outcome of an engine call and wraps it for axum.
fn respond<T>(correlation_id: Uuid, operation: &'static str, result: EngineResult<T>) -> ApiResult<T> {
    match result {
        Ok(value) => {
            info!(correlation_id = %correlation_id, operation, "Request completed");
            Ok(Json(value))
        }
        Err(error) => {
            warn!(
                correlation_id = %correlation_id,
                operation,
                error_code = error.code(),
                error = %error,
                "Request rejected"
            );
            Err(error.into())
        }
    }
}

fn created<T>(result: ApiResult<T>) -> Created<T> {
    result.map(|json| (StatusCode::CREATED, json))
}

fn parse_body<T>(
    correlation_id: Uuid,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, ApiErrorResponse> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            warn!(
                correlation_id = %correlation_id,
                error = %rejection.body_text(),
                "Invalid request body"
            );
            Err(rejection.into())
        }
    }
}

fn parse_query<T: DeserializeOwned>(
    correlation_id: Uuid,
    query: Result<Query<T>, QueryRejection>,
) -> Result<T, ApiErrorResponse> {
    match query {
        Ok(Query(query)) => Ok(query),
        Err(rejection) => {
            warn!(
                correlation_id = %correlation_id,
                error = %rejection.body_text(),
                "Invalid query string"
            );
            Err(rejection.into())
        }
    }
}

fn parse_path<T: DeserializeOwned + Send>(
    correlation_id: Uuid,
    path: Result<Path<T>, PathRejection>,
) -> Result<T, ApiErrorResponse> {
    match path {
        Ok(Path(value)) => Ok(value),
        Err(rejection) => {
            warn!(
                correlation_id = %correlation_id,
                error = %rejection.body_text(),
                "Invalid path parameter"
            );
            Err(rejection.into())
        }
    }
}

// Employees

async fn register_employee(
    State(state): State<AppState>,
    payload: Result<Json<EmployeeRegistration>, JsonRejection>,
) -> Created<Employee> {
    let correlation_id = Uuid::new_v4();
    let registration = parse_body(correlation_id, payload)?;
    let result = state
        .ledger()
        .register_employee(registration, state.now().date());
    created(respond(correlation_id, "register_employee", result))
}

async fn list_employees(State(state): State<AppState>) -> ApiResult<Vec<Employee>> {
    Ok(Json(state.ledger().employees()))
}

async fn deactivate_employee(
    State(state): State<AppState>,
    path: Result<Path<EmployeeId>, PathRejection>,
) -> ApiResult<Employee> {
    let correlation_id = Uuid::new_v4();
    let employee_id = parse_path(correlation_id, path)?;
    let result = state.ledger().deactivate_employee(employee_id);
    respond(correlation_id, "deactivate_employee", result)
}

async fn monthly_timesheet(
    State(state): State<AppState>,
    path: Result<Path<EmployeeId>, PathRejection>,
    query: Result<Query<PeriodQuery>, QueryRejection>,
) -> ApiResult<Vec<TimesheetView>> {
    let correlation_id = Uuid::new_v4();
    let employee_id = parse_path(correlation_id, path)?;
    let query = parse_query(correlation_id, query)?;
    let result = query
        .period(state.now().date())
        .and_then(|period| state.ledger().monthly_timesheet(employee_id, period));
    respond(correlation_id, "monthly_timesheet", result)
}

async fn daily_timesheet(
    State(state): State<AppState>,
    path: Result<Path<EmployeeId>, PathRejection>,
    query: Result<Query<DateQuery>, QueryRejection>,
) -> ApiResult<Vec<TimesheetView>> {
    let correlation_id = Uuid::new_v4();
    let employee_id = parse_path(correlation_id, path)?;
    let date = parse_query(correlation_id, query)?
        .date
        .unwrap_or_else(|| state.now().date());
    let result = state.ledger().daily_timesheet(employee_id, date);
    respond(correlation_id, "daily_timesheet", result)
}

async fn leave_days(
    State(state): State<AppState>,
    path: Result<Path<EmployeeId>, PathRejection>,
    query: Result<Query<PeriodQuery>, QueryRejection>,
) -> ApiResult<LeaveDaysResponse> {
    let correlation_id = Uuid::new_v4();
    let employee_id = parse_path(correlation_id, path)?;
    let query = parse_query(correlation_id, query)?;
    let result = query.period(state.now().date()).and_then(|period: PayMonth| {
        let leave_days = state.ledger().leave_days_in_month(employee_id, period)?;
        Ok(LeaveDaysResponse {
            employee_id,
            month: period.month,
            year: period.year,
            leave_days,
        })
    });
    respond(correlation_id, "leave_days_in_month", result)
}

async fn leave_balance(
    State(state): State<AppState>,
    path: Result<Path<EmployeeId>, PathRejection>,
    query: Result<Query<YearQuery>, QueryRejection>,
) -> ApiResult<LeaveBalance> {
    use chrono::Datelike;

    let correlation_id = Uuid::new_v4();
    let employee_id = parse_path(correlation_id, path)?;
    let year = parse_query(correlation_id, query)?
        .year
        .unwrap_or_else(|| state.now().year());
    let result = state.ledger().leave_balance(employee_id, year);
    respond(correlation_id, "leave_balance", result)
}

async fn employee_leave_requests(
    State(state): State<AppState>,
    path: Result<Path<EmployeeId>, PathRejection>,
) -> ApiResult<Vec<LeaveRequest>> {
    let correlation_id = Uuid::new_v4();
    let employee_id = parse_path(correlation_id, path)?;
    let result = state.ledger().leave_requests_for(employee_id);
    respond(correlation_id, "leave_requests_for", result)
}

async fn employee_overtime_requests(
    State(state): State<AppState>,
    path: Result<Path<EmployeeId>, PathRejection>,
) -> ApiResult<Vec<OvertimeRequest>> {
    let correlation_id = Uuid::new_v4();
    let employee_id = parse_path(correlation_id, path)?;
    let result = state.ledger().overtime_requests_for(employee_id);
    respond(correlation_id, "overtime_requests_for", result)
}

// Attendance

async fn check_in(
    State(state): State<AppState>,
    payload: Result<Json<ShiftAttendanceRequest>, JsonRejection>,
) -> ApiResult<TimesheetView> {
    let correlation_id = Uuid::new_v4();
    let request = parse_body(correlation_id, payload)?;
    let result = state
        .ledger()
        .check_in(request.employee_id, request.shift_type, state.now());
    respond(correlation_id, "check_in", result)
}

async fn check_out(
    State(state): State<AppState>,
    payload: Result<Json<ShiftAttendanceRequest>, JsonRejection>,
) -> ApiResult<TimesheetView> {
    let correlation_id = Uuid::new_v4();
    let request = parse_body(correlation_id, payload)?;
    let result = state
        .ledger()
        .check_out(request.employee_id, request.shift_type, state.now());
    respond(correlation_id, "check_out", result)
}

async fn overtime_check_in(
    State(state): State<AppState>,
    payload: Result<Json<OvertimeAttendanceRequest>, JsonRejection>,
) -> ApiResult<TimesheetView> {
    let correlation_id = Uuid::new_v4();
    let request = parse_body(correlation_id, payload)?;
    let result = state
        .ledger()
        .overtime_check_in(request.employee_id, state.now());
    respond(correlation_id, "overtime_check_in", result)
}

async fn overtime_check_out(
    State(state): State<AppState>,
    payload: Result<Json<OvertimeAttendanceRequest>, JsonRejection>,
) -> ApiResult<TimesheetView> {
    let correlation_id = Uuid::new_v4();
    let request = parse_body(correlation_id, payload)?;
    let result = state
        .ledger()
        .overtime_check_out(request.employee_id, state.now());
    respond(correlation_id, "overtime_check_out", result)
}

// Leave requests

async fn submit_leave(
    State(state): State<AppState>,
    payload: Result<Json<LeaveRequestBody>, JsonRejection>,
) -> Created<LeaveRequest> {
    let correlation_id = Uuid::new_v4();
    let body = parse_body(correlation_id, payload)?;
    let result = state
        .ledger()
        .submit_leave(body.employee_id, body.submission, state.now());
    created(respond(correlation_id, "submit_leave", result))
}

async fn pending_leave_requests(
    State(state): State<AppState>,
) -> ApiResult<Vec<PendingRequest<LeaveRequest>>> {
    let correlation_id = Uuid::new_v4();
    let result = state.ledger().pending_leave_requests();
    respond(correlation_id, "pending_leave_requests", result)
}

async fn approve_leave(
    State(state): State<AppState>,
    path: Result<Path<RequestId>, PathRejection>,
    payload: Result<Json<DecisionRequest>, JsonRejection>,
) -> ApiResult<LeaveRequest> {
    let correlation_id = Uuid::new_v4();
    let request_id = parse_path(correlation_id, path)?;
    let body = parse_body(correlation_id, payload)?;
    let result = state
        .ledger()
        .approve_leave(request_id, body.manager_id, state.now());
    respond(correlation_id, "approve_leave", result)
}

async fn reject_leave(
    State(state): State<AppState>,
    path: Result<Path<RequestId>, PathRejection>,
    payload: Result<Json<DecisionRequest>, JsonRejection>,
) -> ApiResult<LeaveRequest> {
    let correlation_id = Uuid::new_v4();
    let request_id = parse_path(correlation_id, path)?;
    let body = parse_body(correlation_id, payload)?;
    let result = state
        .ledger()
        .reject_leave(request_id, body.manager_id, state.now());
    respond(correlation_id, "reject_leave", result)
}

async fn cancel_leave(
    State(state): State<AppState>,
    path: Result<Path<RequestId>, PathRejection>,
    payload: Result<Json<CancelRequest>, JsonRejection>,
) -> ApiResult<LeaveRequest> {
    let correlation_id = Uuid::new_v4();
    let request_id = parse_path(correlation_id, path)?;
    let body = parse_body(correlation_id, payload)?;
    let result = state.ledger().cancel_leave(body.employee_id, request_id);
    respond(correlation_id, "cancel_leave", result)
}

// Overtime requests

async fn submit_overtime(
    State(state): State<AppState>,
    payload: Result<Json<OvertimeRequestBody>, JsonRejection>,
) -> Created<OvertimeRequest> {
    let correlation_id = Uuid::new_v4();
    let body = parse_body(correlation_id, payload)?;
    let result = state
        .ledger()
        .submit_overtime(body.employee_id, body.submission, state.now());
    created(respond(correlation_id, "submit_overtime", result))
}

async fn pending_overtime_requests(
    State(state): State<AppState>,
) -> ApiResult<Vec<PendingRequest<OvertimeRequest>>> {
    let correlation_id = Uuid::new_v4();
    let result = state.ledger().pending_overtime_requests();
    respond(correlation_id, "pending_overtime_requests", result)
}

async fn approve_overtime(
    State(state): State<AppState>,
    path: Result<Path<RequestId>, PathRejection>,
    payload: Result<Json<DecisionRequest>, JsonRejection>,
) -> ApiResult<OvertimeRequest> {
    let correlation_id = Uuid::new_v4();
    let request_id = parse_path(correlation_id, path)?;
    let body = parse_body(correlation_id, payload)?;
    let result = state
        .ledger()
        .approve_overtime(request_id, body.manager_id, state.now());
    respond(correlation_id, "approve_overtime", result)
}

async fn reject_overtime(
    State(state): State<AppState>,
    path: Result<Path<RequestId>, PathRejection>,
    payload: Result<Json<DecisionRequest>, JsonRejection>,
) -> ApiResult<OvertimeRequest> {
    let correlation_id = Uuid::new_v4();
    let request_id = parse_path(correlation_id, path)?;
    let body = parse_body(correlation_id, payload)?;
    let result = state
        .ledger()
        .reject_overtime(request_id, body.manager_id, state.now());
    respond(correlation_id, "reject_overtime", result)
}

async fn cancel_overtime(
    State(state): State<AppState>,
    path: Result<Path<RequestId>, PathRejection>,
    payload: Result<Json<CancelRequest>, JsonRejection>,
) -> ApiResult<OvertimeRequest> {
    let correlation_id = Uuid::new_v4();
    let request_id = parse_path(correlation_id, path)?;
    let body = parse_body(correlation_id, payload)?;
    let result = state.ledger().cancel_overtime(body.employee_id, request_id);
    respond(correlation_id, "cancel_overtime", result)
}

// Payroll

async fn evaluate_employee(
    State(state): State<AppState>,
    payload: Result<Json<EvaluationRequest>, JsonRejection>,
) -> ApiResult<EmployeeEvaluation> {
    let correlation_id = Uuid::new_v4();
    let body = parse_body(correlation_id, payload)?;
    let result = PayMonth::new(body.month, body.year).and_then(|period| {
        state.payroll().evaluate_employee(
            body.manager_id,
            body.employee_id,
            period,
            &body.content,
            state.now(),
        )
    });
    respond(correlation_id, "evaluate_employee", result)
}

async fn monthly_payroll(
    State(state): State<AppState>,
    query: Result<Query<PayrollFilter>, QueryRejection>,
) -> ApiResult<Vec<SalaryRecordView>> {
    let correlation_id = Uuid::new_v4();
    let filter = parse_query(correlation_id, query)?;
    let result = state
        .payroll()
        .run_monthly_payroll(&filter, state.now().date());
    respond(correlation_id, "run_monthly_payroll", result)
}

async fn attendance_summary(
    State(state): State<AppState>,
    query: Result<Query<PayrollFilter>, QueryRejection>,
) -> ApiResult<Vec<AttendanceSummary>> {
    let correlation_id = Uuid::new_v4();
    let filter = parse_query(correlation_id, query)?;
    let result = filter.period(state.now().date()).and_then(|period| {
        state
            .payroll()
            .attendance_summary(filter.department.as_deref(), period)
    });
    respond(correlation_id, "attendance_summary", result)
}
