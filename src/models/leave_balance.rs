//! Yearly leave allowance of an employee.

use serde::{Deserialize, Serialize};

use super::EmployeeId;

/// Leave days granted per employee per year when the balance is first created.
pub const DEFAULT_ANNUAL_LEAVES: u32 = 6;

/// Leave allowance of one employee for one year.
///
/// `remaining_leaves` never goes below zero: consuming more days than are
/// left floors it at zero while `used_leaves` keeps counting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveBalance {
    /// The employee.
    pub employee_id: EmployeeId,
    /// The calendar year.
    pub year: i32,
    /// Days granted for the year.
    pub total_leaves: u32,
    /// Days consumed by approved requests.
    pub used_leaves: u32,
    /// Days still available.
    pub remaining_leaves: u32,
}

impl LeaveBalance {
    /// Creates the default balance for a year.
    pub fn new(employee_id: EmployeeId, year: i32) -> Self {
        Self {
            employee_id,
            year,
            total_leaves: DEFAULT_ANNUAL_LEAVES,
            used_leaves: 0,
            remaining_leaves: DEFAULT_ANNUAL_LEAVES,
        }
    }

    /// Records `days` of approved leave.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_payroll::models::{EmployeeId, LeaveBalance};
    ///
    /// let mut balance = LeaveBalance::new(EmployeeId(1), 2026);
    /// balance.consume(4);
    /// balance.consume(4);
    /// assert_eq!(balance.used_leaves, 8);
    /// assert_eq!(balance.remaining_leaves, 0);
    /// ```
    pub fn consume(&mut self, days: u32) {
        self.used_leaves = self.used_leaves.saturating_add(days);
        self.remaining_leaves = self.remaining_leaves.saturating_sub(days);
    }
}
