//! The payroll engine.
//!
//! Payroll reads the attendance ledger for one month and produces a
//! [`SalaryRecord`](crate::models::SalaryRecord) and an automatic evaluation
//! per employee. Every rule that contributes to the salary is recorded as a
//! step in an [`AuditTrace`](crate::models::AuditTrace).
//!
//! ## Rules
//!
//! 1. Regular hours: worked time of `PRESENT`/`EARLY_LEAVE` shift rows.
//! 2. Base pay: regular hours at the full rate from 192 hours up, otherwise
//!    at the reduced rate.
//! 3. Leave pay: approved leave days at 8 hours and 85% of the full rate.
//! 4. Attendance bonus: above 200 total hours.
//! 5. Overtime pay at the overtime rate.
//! 6. Annual bonus on the December 31 run when at most 6 leave days were used.

mod batch;
mod engine;
mod evaluation;
mod hours;
mod salary;
mod summary;

pub use batch::PayrollFilter;
pub use engine::{PayrollEngine, PayrollOutcome, is_year_end_run};
pub use evaluation::{EXCELLENT, GOOD, NEEDS_IMPROVEMENT, evaluation_for};
pub use hours::{MonthlyAttendance, aggregate_month};
pub use salary::{
    ANNUAL_BONUS, ANNUAL_BONUS_MAX_USED_LEAVES, ATTENDANCE_BONUS_HOURS, AnnualBonus,
    FULL_MONTH_HOURS, HOURS_PER_LEAVE_DAY, LEAVE_PAY_FACTOR, SalaryBreakdown, calculate_salary,
};
pub use summary::{AttendanceSummary, StatusCounts};
