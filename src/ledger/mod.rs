//! The attendance ledger.
//!
//! The ledger owns every attendance state transition: shift and overtime
//! check-in/check-out, the leave and overtime approval lifecycle, and the
//! leave balance updates that approvals cause. It also registers employees
//! and answers the read-only attendance reports.
//!
//! All mutations for one employee run inside a single store transaction, so
//! a rejected operation never leaves a partial write behind.

mod attendance;
mod leave_days;
mod policy;
mod reports;
mod requests;

pub use leave_days::{count_leave_days, leave_day_weight, weighted_days};
pub use policy::{
    EARLY_LEAVE_LIMIT_MINUTES, EARLY_LEAVE_QUOTA, GRACE_PERIOD_MINUTES, check_in_status,
    check_out_status, exceeds_early_leave_limit, is_late, minutes_early_rounded_up,
    overtime_hours, seconds_early,
};
pub use reports::PendingRequest;
pub use requests::{LeaveSubmission, OvertimeSubmission};

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use tracing::debug;

use crate::config::ReferenceData;
use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, EmployeeId, EmployeeSummary};
use crate::store::AttendanceStore;

/// Data needed to register a new employee.
#[derive(Debug, Clone, Deserialize)]
pub struct EmployeeRegistration {
    /// Full name.
    pub full_name: String,
    /// Department code; also the prefix of the generated employee code.
    pub department_code: String,
    /// Position code.
    pub position_code: String,
    /// Date the employee joined.
    #[serde(default)]
    pub join_date: Option<NaiveDate>,
}

/// Attendance ledger over a store and the reference tables.
pub struct AttendanceLedger<S> {
    store: Arc<S>,
    reference: Arc<ReferenceData>,
}

impl<S> Clone for AttendanceLedger<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            reference: Arc::clone(&self.reference),
        }
    }
}

impl<S: AttendanceStore> AttendanceLedger<S> {
    /// Creates a ledger.
    pub fn new(store: Arc<S>, reference: Arc<ReferenceData>) -> Self {
        Self { store, reference }
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// The reference tables.
    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    /// Registers an employee.
    ///
    /// The employee code is the department code followed by a three digit
    /// sequence number, one more than the highest already used in that
    /// department. The leave balance for `today`'s year is created with the
    /// employee.
    pub fn register_employee(
        &self,
        registration: EmployeeRegistration,
        today: NaiveDate,
    ) -> EngineResult<Employee> {
        let full_name = registration.full_name.trim();
        if full_name.is_empty() {
            return Err(EngineError::MissingField {
                field: "full_name".to_string(),
            });
        }
        self.reference.department(&registration.department_code)?;
        self.reference.position(&registration.position_code)?;

        let sequence = self
            .store
            .employees()
            .iter()
            .filter_map(|e| e.sequence_in(&registration.department_code))
            .max()
            .unwrap_or(0)
            + 1;

        let employee = Employee {
            id: EmployeeId(self.store.next_id()),
            employee_code: Employee::code_for(&registration.department_code, sequence),
            full_name: full_name.to_string(),
            department_code: registration.department_code,
            position_code: registration.position_code,
            join_date: registration.join_date,
            is_active: true,
        };
        self.store.insert_employee(employee.clone())?;
        self.store.transaction(employee.id, |records| {
            records.ensure_leave_balance(employee.id, today.year());
            Ok(())
        })?;

        debug!(
            employee_id = %employee.id,
            employee_code = %employee.employee_code,
            "Employee registered"
        );
        Ok(employee)
    }

    /// All employees, active or not, ordered by id.
    pub fn employees(&self) -> Vec<Employee> {
        self.store.employees()
    }

    /// Marks an employee inactive so payroll runs skip them.
    pub fn deactivate_employee(&self, employee_id: EmployeeId) -> EngineResult<Employee> {
        let mut employee = self.store.employee(employee_id)?;
        employee.is_active = false;
        self.store.update_employee(employee.clone())?;
        Ok(employee)
    }

    /// The reporting summary of an employee.
    pub fn summarize(&self, employee: &Employee) -> EmployeeSummary {
        self.reference.summarize(employee)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::store::MemoryStore;
    use chrono::NaiveDateTime;

    pub fn create_ledger() -> AttendanceLedger<MemoryStore> {
        let reference = ConfigLoader::load("./config/reference").unwrap();
        AttendanceLedger::new(Arc::new(MemoryStore::new()), Arc::new(reference))
    }

    pub fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    pub fn make_datetime(datetime_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(datetime_str, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    pub fn register(ledger: &AttendanceLedger<MemoryStore>, department: &str) -> Employee {
        ledger
            .register_employee(
                EmployeeRegistration {
                    full_name: "Nguyen Van A".to_string(),
                    department_code: department.to_string(),
                    position_code: "DEV".to_string(),
                    join_date: None,
                },
                make_date("2026-01-01"),
            )
            .unwrap()
    }
}
