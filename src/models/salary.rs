//! Monthly salary records and employee evaluations.
//!
//! Both records are unique per `(employee, month, year)`. They are created
//! as empty shells with the first attendance row of a month and overwritten
//! in place by every payroll run for that month.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{EmployeeId, EmployeeSummary, ManagerId, PayMonth};

/// Salary of one employee for one month.
///
/// # Example
///
/// ```
/// use attendance_payroll::models::{EmployeeId, PayMonth, SalaryRecord};
/// use rust_decimal::Decimal;
///
/// let record = SalaryRecord::empty(EmployeeId(1), PayMonth::new(1, 2026).unwrap());
/// assert_eq!(record.gross_salary, Decimal::ZERO);
/// assert_eq!(record.note, "");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRecord {
    /// The employee.
    pub employee_id: EmployeeId,
    /// The month.
    pub month: u32,
    /// The year.
    pub year: i32,
    /// Pay for regular hours plus paid leave.
    pub base_salary: Decimal,
    /// Pay for overtime hours.
    pub overtime_pay: Decimal,
    /// Attendance bonus, zero when not earned.
    pub attendance_bonus: Decimal,
    /// Annual bonus and other one-off amounts.
    pub other_bonus: Decimal,
    /// Sum of every component.
    pub gross_salary: Decimal,
    /// Notes produced by the last run.
    pub note: String,
}

impl SalaryRecord {
    /// An all-zero record for a period.
    pub fn empty(employee_id: EmployeeId, period: PayMonth) -> Self {
        Self {
            employee_id,
            month: period.month,
            year: period.year,
            base_salary: Decimal::ZERO,
            overtime_pay: Decimal::ZERO,
            attendance_bonus: Decimal::ZERO,
            other_bonus: Decimal::ZERO,
            gross_salary: Decimal::ZERO,
            note: String::new(),
        }
    }

    /// The period this record belongs to.
    pub fn period(&self) -> PayMonth {
        PayMonth {
            year: self.year,
            month: self.month,
        }
    }
}

/// Monthly evaluation of an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeEvaluation {
    /// The employee.
    pub employee_id: EmployeeId,
    /// The month.
    pub month: u32,
    /// The year.
    pub year: i32,
    /// Manager who last edited the evaluation by hand.
    pub evaluated_by: Option<ManagerId>,
    /// When the manager edited it.
    pub evaluated_at: Option<NaiveDateTime>,
    /// Evaluation text.
    pub content: Option<String>,
}

impl EmployeeEvaluation {
    /// An empty evaluation for a period.
    pub fn empty(employee_id: EmployeeId, period: PayMonth) -> Self {
        Self {
            employee_id,
            month: period.month,
            year: period.year,
            evaluated_by: None,
            evaluated_at: None,
            content: None,
        }
    }
}

/// Salary record as shown on the payroll report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRecordView {
    /// Who the record belongs to.
    pub employee: EmployeeSummary,
    /// The month.
    pub month: u32,
    /// The year.
    pub year: i32,
    /// Pay for regular hours plus paid leave.
    pub base_salary: Decimal,
    /// Pay for overtime hours.
    pub overtime_pay: Decimal,
    /// Attendance bonus.
    pub attendance_bonus: Decimal,
    /// Annual bonus and other one-off amounts.
    pub other_bonus: Decimal,
    /// Sum of every component.
    pub gross_salary: Decimal,
    /// Notes produced by the last run.
    pub note: String,
}

impl SalaryRecordView {
    /// Combines a record with the employee it belongs to.
    pub fn new(employee: EmployeeSummary, record: &SalaryRecord) -> Self {
        Self {
            employee,
            month: record.month,
            year: record.year,
            base_salary: record.base_salary,
            overtime_pay: record.overtime_pay,
            attendance_bonus: record.attendance_bonus,
            other_bonus: record.other_bonus,
            gross_salary: record.gross_salary,
            note: record.note.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_record_period_round_trips() {
        let period = PayMonth::new(11, 2026).unwrap();
        let record = SalaryRecord::empty(EmployeeId(3), period);
        assert_eq!(record.period(), period);
    }

    #[test]
    fn test_decimal_fields_serialize_as_strings() {
        let mut record = SalaryRecord::empty(EmployeeId(3), PayMonth::new(1, 2026).unwrap());
        record.gross_salary = dec("9600000.00");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["gross_salary"], "9600000.00");
    }

    #[test]
    fn test_view_copies_amounts() {
        let mut record = SalaryRecord::empty(EmployeeId(3), PayMonth::new(1, 2026).unwrap());
        record.base_salary = dec("100.00");
        record.note = "annual bonus forfeited".to_string();
        let view = SalaryRecordView::new(
            EmployeeSummary {
                id: EmployeeId(3),
                employee_code: "ENG003".to_string(),
                full_name: "Pham C".to_string(),
                department: "Engineering".to_string(),
            },
            &record,
        );
        assert_eq!(view.base_salary, dec("100.00"));
        assert_eq!(view.note, "annual bonus forfeited");
        assert_eq!(view.month, 1);
    }
}
