//! Per-employee payroll computation.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ReferenceData;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditTrace, Employee, EmployeeEvaluation, EmployeeId, ManagerId, PayMonth, SalaryRecord,
};
use crate::store::AttendanceStore;

use super::evaluation::evaluation_for;
use super::hours::{MonthlyAttendance, aggregate_month};
use super::salary::{AnnualBonus, calculate_salary};

/// Everything one payroll run produced for one employee-month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollOutcome {
    /// The stored salary record.
    pub record: SalaryRecord,
    /// The stored evaluation.
    pub evaluation: EmployeeEvaluation,
    /// The aggregated attendance the salary was computed from.
    pub attendance: MonthlyAttendance,
    /// Rules applied, in order.
    pub audit_trace: AuditTrace,
}

/// Whether a run on `as_of` for `period` is the year-end run.
///
/// Only a run made on December 31 for that December qualifies.
pub fn is_year_end_run(period: PayMonth, as_of: NaiveDate) -> bool {
    as_of.month() == 12 && as_of.day() == 31 && PayMonth::of(as_of) == period
}

/// Computes salary records and evaluations from the attendance ledger.
///
/// The engine only reads attendance rows, leave requests and balances; it
/// writes nothing but the salary record and evaluation of the period.
pub struct PayrollEngine<S> {
    pub(super) store: Arc<S>,
    pub(super) reference: Arc<ReferenceData>,
}

impl<S> Clone for PayrollEngine<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            reference: Arc::clone(&self.reference),
        }
    }
}

impl<S: AttendanceStore> PayrollEngine<S> {
    /// Creates an engine.
    pub fn new(store: Arc<S>, reference: Arc<ReferenceData>) -> Self {
        Self { store, reference }
    }

    /// Computes and stores the salary and evaluation of one employee-month.
    ///
    /// Returns `None` without writing when the employee has no salary record
    /// for the period, i.e. never checked in that month. The read of the
    /// month's rows and the upsert happen in one transaction, so concurrent
    /// check-ins of the same employee are never half-seen. Re-running with
    /// unchanged attendance reproduces the same record.
    pub fn run(
        &self,
        employee: &Employee,
        period: PayMonth,
        as_of: NaiveDate,
    ) -> EngineResult<Option<PayrollOutcome>> {
        let position = self.reference.position(&employee.position_code)?;
        let employee_id = employee.id;

        let outcome = self.store.transaction(employee_id, |records| {
            if records.salary_record(period).is_none() {
                return Ok(None);
            }

            let mut trace = AuditTrace::default();
            let attendance = aggregate_month(records, period, &mut trace);

            let annual_bonus = if is_year_end_run(period, as_of) {
                let balance = records.leave_balance(period.year).ok_or(
                    EngineError::LeaveBalanceMissing {
                        employee_id,
                        year: period.year,
                    },
                )?;
                AnnualBonus::Due {
                    used_leaves: balance.used_leaves,
                }
            } else {
                AnnualBonus::NotDue
            };

            let salary = calculate_salary(&attendance, position, annual_bonus, &mut trace);

            let content = evaluation_for(attendance.regular_hours, salary.attendance_bonus_awarded);
            trace.record(
                "evaluation",
                "Monthly Evaluation",
                serde_json::json!({
                    "regular_hours": attendance.regular_hours.to_string(),
                    "attendance_bonus_awarded": salary.attendance_bonus_awarded,
                }),
                serde_json::json!({ "content": content }),
                format!("Evaluation set to '{}'", content),
            );

            let record = SalaryRecord {
                employee_id,
                month: period.month,
                year: period.year,
                base_salary: salary.base_salary,
                overtime_pay: salary.overtime_pay,
                attendance_bonus: salary.attendance_bonus,
                other_bonus: salary.other_bonus,
                gross_salary: salary.gross_salary,
                note: salary.note(),
            };
            records.upsert_salary_record(record.clone());

            // Overwrites any manual edit made since the last run.
            let evaluation = records.ensure_evaluation(employee_id, period);
            evaluation.content = Some(content.to_string());
            let evaluation = evaluation.clone();

            Ok(Some(PayrollOutcome {
                record,
                evaluation,
                attendance,
                audit_trace: trace,
            }))
        })?;

        if let Some(outcome) = &outcome {
            debug!(
                employee_id = %employee_id,
                period = %period,
                gross_salary = %outcome.record.gross_salary,
                steps = outcome.audit_trace.steps.len(),
                "Payroll computed"
            );
        }
        Ok(outcome)
    }

    /// Records a manager's evaluation of an employee-month.
    ///
    /// Creates the evaluation when the month has none yet. The next payroll
    /// run for the month replaces `content` with the automatic evaluation.
    pub fn evaluate_employee(
        &self,
        manager: ManagerId,
        employee_id: EmployeeId,
        period: PayMonth,
        content: &str,
        now: NaiveDateTime,
    ) -> EngineResult<EmployeeEvaluation> {
        let content = content.trim();
        if content.is_empty() {
            return Err(EngineError::MissingField {
                field: "content".to_string(),
            });
        }

        self.store.transaction(employee_id, |records| {
            let evaluation = records.ensure_evaluation(employee_id, period);
            evaluation.content = Some(content.to_string());
            evaluation.evaluated_by = Some(manager);
            evaluation.evaluated_at = Some(now);
            Ok(evaluation.clone())
        })
    }
}
