//! Automatic monthly evaluation.

use rust_decimal::Decimal;

use super::salary::FULL_MONTH_HOURS;

/// Evaluation for a month below the full-month hours.
pub const NEEDS_IMPROVEMENT: &str = "needs improvement";
/// Evaluation for a full month that earned the attendance bonus.
pub const EXCELLENT: &str = "excellent";
/// Evaluation for a full month without the attendance bonus.
pub const GOOD: &str = "good";

/// The evaluation text for a month.
///
/// # Example
///
/// ```
/// use attendance_payroll::payroll::evaluation_for;
/// use rust_decimal::Decimal;
///
/// assert_eq!(evaluation_for(Decimal::new(150, 0), false), "needs improvement");
/// assert_eq!(evaluation_for(Decimal::new(210, 0), true), "excellent");
/// assert_eq!(evaluation_for(Decimal::new(195, 0), false), "good");
/// ```
pub fn evaluation_for(regular_hours: Decimal, attendance_bonus_awarded: bool) -> &'static str {
    if regular_hours < FULL_MONTH_HOURS {
        NEEDS_IMPROVEMENT
    } else if attendance_bonus_awarded {
        EXCELLENT
    } else {
        GOOD
    }
}
