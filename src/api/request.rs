//! Request types for the attendance and payroll API.
//!
//! JSON bodies and query strings accepted by the handlers. Leave and
//! overtime submissions reuse the ledger's submission types, flattened next
//! to the employee id.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::ledger::{LeaveSubmission, OvertimeSubmission};
use crate::models::{EmployeeId, ManagerId, PayMonth, ShiftType};

/// Body of `POST /attendance/check-in` and `/attendance/check-out`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftAttendanceRequest {
    /// The employee checking in or out.
    pub employee_id: EmployeeId,
    /// Which shift.
    pub shift_type: ShiftType,
}

/// Body of the overtime check-in and check-out endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OvertimeAttendanceRequest {
    /// The employee checking in or out.
    pub employee_id: EmployeeId,
}

/// Body of `POST /leave-requests`.
#[derive(Debug, Clone, Deserialize)]
pub struct LeaveRequestBody {
    /// The requesting employee.
    pub employee_id: EmployeeId,
    /// The leave being requested.
    #[serde(flatten)]
    pub submission: LeaveSubmission,
}

/// Body of `POST /overtime-requests`.
#[derive(Debug, Clone, Deserialize)]
pub struct OvertimeRequestBody {
    /// The requesting employee.
    pub employee_id: EmployeeId,
    /// The overtime being requested.
    #[serde(flatten)]
    pub submission: OvertimeSubmission,
}

/// Body of the approve and reject endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionRequest {
    /// The deciding manager.
    pub manager_id: ManagerId,
}

/// Body of the cancel endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelRequest {
    /// The employee who filed the request.
    pub employee_id: EmployeeId,
}

/// Body of `POST /evaluations`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationRequest {
    /// The evaluating manager.
    pub manager_id: ManagerId,
    /// The evaluated employee.
    pub employee_id: EmployeeId,
    /// Month, 1 to 12.
    pub month: u32,
    /// Year.
    pub year: i32,
    /// Evaluation text.
    pub content: String,
}

/// `?month=&year=` query; either part defaults to the current month.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PeriodQuery {
    /// Month, 1 to 12.
    #[serde(default)]
    pub month: Option<u32>,
    /// Year.
    #[serde(default)]
    pub year: Option<i32>,
}

impl PeriodQuery {
    /// Resolves the period against `today`.
    pub fn period(&self, today: NaiveDate) -> EngineResult<PayMonth> {
        use chrono::Datelike;
        PayMonth::new(
            self.month.unwrap_or_else(|| today.month()),
            self.year.unwrap_or_else(|| today.year()),
        )
    }
}

/// `?date=` query of the daily timesheet; defaults to today.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DateQuery {
    /// The day.
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// `?year=` query of the leave balance; defaults to the current year.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct YearQuery {
    /// The year.
    #[serde(default)]
    pub year: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LeaveType;

    #[test]
    fn test_leave_request_body_flattens_submission() {
        let body: LeaveRequestBody = serde_json::from_str(
            r#"{"employee_id": 4, "from_date": "2026-01-19", "to_date": "2026-01-20", "leave_type": "SICK"}"#,
        )
        .unwrap();
        assert_eq!(body.employee_id, EmployeeId(4));
        assert_eq!(body.submission.leave_type, LeaveType::Sick);
        assert_eq!(body.submission.attachment_ref, None);
    }

    #[test]
    fn test_period_query_defaults() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
        let query = PeriodQuery {
            month: Some(2),
            year: None,
        };
        assert_eq!(query.period(today).unwrap(), PayMonth::new(2, 2026).unwrap());
        assert_eq!(
            PeriodQuery::default().period(today).unwrap(),
            PayMonth::new(3, 2026).unwrap()
        );
    }
}
