//! Employee model and identifier types.
//!
//! This module defines the Employee struct and the newtype identifiers used
//! for employees and managers throughout the engine.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Unique identifier for an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(pub u64);

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identifier of the manager acting on a request or evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ManagerId(pub u64);

impl fmt::Display for ManagerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Represents an employee whose attendance is tracked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: EmployeeId,
    /// Human-facing code: department code plus a three digit sequence (e.g. "ENG001").
    pub employee_code: String,
    /// The employee's full name.
    pub full_name: String,
    /// Code of the department the employee belongs to.
    pub department_code: String,
    /// Code of the position that determines pay rates.
    pub position_code: String,
    /// The date the employee joined.
    #[serde(default)]
    pub join_date: Option<NaiveDate>,
    /// Inactive employees are excluded from payroll runs.
    pub is_active: bool,
}

impl Employee {
    /// Builds the employee code for the `sequence`-th employee of a department.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_payroll::models::Employee;
    ///
    /// assert_eq!(Employee::code_for("ENG", 7), "ENG007");
    /// assert_eq!(Employee::code_for("HR", 1234), "HR1234");
    /// ```
    pub fn code_for(department_code: &str, sequence: u32) -> String {
        format!("{}{:03}", department_code, sequence)
    }

    /// Returns the numeric suffix of the employee code if it was generated
    /// for `department_code`.
    pub fn sequence_in(&self, department_code: &str) -> Option<u32> {
        self.employee_code
            .strip_prefix(department_code)
            .and_then(|suffix| suffix.parse().ok())
    }

    /// Returns true if the employee belongs to the given department.
    pub fn in_department(&self, department_code: &str) -> bool {
        self.department_code == department_code
    }
}

/// Compact employee description embedded in report views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSummary {
    /// Unique identifier for the employee.
    pub id: EmployeeId,
    /// Human-facing employee code.
    pub employee_code: String,
    /// The employee's full name.
    pub full_name: String,
    /// Department name (falls back to the code when unknown).
    pub department: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_employee() -> Employee {
        Employee {
            id: EmployeeId(1),
            employee_code: "ENG001".to_string(),
            full_name: "Tran Van A".to_string(),
            department_code: "ENG".to_string(),
            position_code: "DEV".to_string(),
            join_date: NaiveDate::from_ymd_opt(2024, 3, 1),
            is_active: true,
        }
    }

    #[test]
    fn test_code_for_pads_to_three_digits() {
        assert_eq!(Employee::code_for("ENG", 1), "ENG001");
        assert_eq!(Employee::code_for("ENG", 42), "ENG042");
    }

    #[test]
    fn test_sequence_in_own_department() {
        let employee = create_test_employee();
        assert_eq!(employee.sequence_in("ENG"), Some(1));
    }

    #[test]
    fn test_sequence_in_other_department_is_none() {
        let employee = create_test_employee();
        assert_eq!(employee.sequence_in("HR"), None);
    }

    #[test]
    fn test_deserialize_employee_without_join_date() {
        let json = r#"{
            "id": 5,
            "employee_code": "HR002",
            "full_name": "Le Thi B",
            "department_code": "HR",
            "position_code": "STAFF",
            "is_active": true
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.id, EmployeeId(5));
        assert_eq!(employee.join_date, None);
        assert!(employee.in_department("HR"));
    }

    #[test]
    fn test_employee_id_serializes_as_number() {
        assert_eq!(serde_json::to_string(&EmployeeId(12)).unwrap(), "12");
    }
}
