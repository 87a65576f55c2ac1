//! Monthly payroll batch over all active employees.

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::EngineResult;
use crate::models::{Employee, PayMonth, SalaryRecordView};
use crate::store::AttendanceStore;

use super::engine::PayrollEngine;

/// Which employees and month a batch covers.
///
/// Missing `month` or `year` default to the current month at call time.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PayrollFilter {
    /// Restrict to one department code.
    #[serde(default)]
    pub department: Option<String>,
    /// Month, 1 to 12.
    #[serde(default)]
    pub month: Option<u32>,
    /// Year.
    #[serde(default)]
    pub year: Option<i32>,
}

impl PayrollFilter {
    /// Resolves the period, defaulting to the month containing `today`.
    pub fn period(&self, today: NaiveDate) -> EngineResult<PayMonth> {
        PayMonth::new(
            self.month.unwrap_or_else(|| today.month()),
            self.year.unwrap_or_else(|| today.year()),
        )
    }
}

impl<S: AttendanceStore> PayrollEngine<S> {
    /// Active employees, optionally restricted to one department.
    ///
    /// Fails with `DepartmentNotFound` for an unknown department code.
    pub fn active_employees(&self, department: Option<&str>) -> EngineResult<Vec<Employee>> {
        if let Some(code) = department {
            self.reference.department(code)?;
        }
        Ok(self
            .store
            .employees()
            .into_iter()
            .filter(|e| e.is_active)
            .filter(|e| department.is_none_or(|code| e.in_department(code)))
            .collect())
    }

    /// Runs payroll for every selected employee and returns the records,
    /// ordered by employee code.
    ///
    /// Employees without a salary record for the period are skipped. A
    /// failure for one employee is logged and skipped; the rest of the batch
    /// still runs. Safe to call any number of times for the same month.
    pub fn run_monthly_payroll(
        &self,
        filter: &PayrollFilter,
        today: NaiveDate,
    ) -> EngineResult<Vec<SalaryRecordView>> {
        let period = filter.period(today)?;
        let employees = self.active_employees(filter.department.as_deref())?;

        let mut views = Vec::with_capacity(employees.len());
        let mut skipped = 0usize;
        let mut failed = 0usize;

        for employee in &employees {
            match self.run(employee, period, today) {
                Ok(Some(outcome)) => {
                    let summary = self.reference.summarize(employee);
                    views.push(SalaryRecordView::new(summary, &outcome.record));
                }
                Ok(None) => skipped += 1,
                Err(error) => {
                    failed += 1;
                    warn!(
                        employee_id = %employee.id,
                        employee_code = %employee.employee_code,
                        period = %period,
                        error_code = error.code(),
                        error = %error,
                        "Payroll failed for employee, skipping"
                    );
                }
            }
        }

        views.sort_by(|a, b| a.employee.employee_code.cmp(&b.employee.employee_code));

        info!(
            period = %period,
            department = filter.department.as_deref().unwrap_or("*"),
            computed = views.len(),
            skipped,
            failed,
            "Monthly payroll completed"
        );
        Ok(views)
    }
}
