//! Monthly salary rules.
//!
//! Turns a [`MonthlyAttendance`] and the employee's position rates into the
//! salary components. All arithmetic is exact decimal; only the final
//! per-field values are rounded to 2 places.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AuditTrace, Position};

use super::hours::MonthlyAttendance;

/// Regular hours below which the reduced `rate_insufficient` applies.
pub const FULL_MONTH_HOURS: Decimal = Decimal::from_parts(192, 0, 0, false, 0);

/// Total hours above which the attendance bonus is paid.
pub const ATTENDANCE_BONUS_HOURS: Decimal = Decimal::from_parts(200, 0, 0, false, 0);

/// Paid hours per leave day.
pub const HOURS_PER_LEAVE_DAY: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// Share of the base rate paid for leave hours.
pub const LEAVE_PAY_FACTOR: Decimal = Decimal::from_parts(85, 0, 0, false, 2);

/// Year-end bonus for employees within their leave allowance.
pub const ANNUAL_BONUS: Decimal = Decimal::from_parts(1_500_000, 0, 0, false, 0);

/// Most leave days an employee may use and still earn the annual bonus.
pub const ANNUAL_BONUS_MAX_USED_LEAVES: u32 = 6;

/// Outcome of the year-end bonus check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnualBonus {
    /// Not a year-end run.
    NotDue,
    /// Year-end run.
    Due {
        /// Leave days used during the year.
        used_leaves: u32,
    },
}

/// Salary components of one employee-month, rounded to 2 places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryBreakdown {
    /// Pay for regular hours at the base or insufficient rate.
    pub base_pay: Decimal,
    /// Pay for approved leave.
    pub leave_pay: Decimal,
    /// `base_pay + leave_pay`.
    pub base_salary: Decimal,
    /// Pay for overtime hours.
    pub overtime_pay: Decimal,
    /// Attendance bonus, zero when not earned.
    pub attendance_bonus: Decimal,
    /// Annual bonus, zero when not due or forfeited.
    pub other_bonus: Decimal,
    /// Sum of every component.
    pub gross_salary: Decimal,
    /// Whether the attendance bonus was earned.
    pub attendance_bonus_awarded: bool,
    /// Notes for the salary record, in rule order.
    pub notes: Vec<String>,
}

impl SalaryBreakdown {
    /// The notes joined into the record's single note field.
    pub fn note(&self) -> String {
        self.notes.join("; ")
    }
}

/// Calculates the salary of one employee-month.
///
/// # Rules
///
/// - Regular hours are paid at `rate_insufficient` below 192 hours and at
///   `rate_base` from 192 hours on.
/// - Each leave day pays 8 hours at 85% of `rate_base`.
/// - The attendance bonus is paid when regular plus overtime hours exceed
///   200.
/// - Overtime hours are paid at `rate_overtime`.
/// - On a year-end run the annual bonus is paid when at most 6 leave days
///   were used that year, and forfeited otherwise.
///
/// # Example
///
/// ```
/// use attendance_payroll::models::{AuditTrace, Position};
/// use attendance_payroll::payroll::{AnnualBonus, MonthlyAttendance, calculate_salary};
/// use rust_decimal::Decimal;
///
/// let position = Position {
///     code: "DEV".to_string(),
///     name: "Developer".to_string(),
///     rate_base: Decimal::new(50000, 0),
///     rate_insufficient: Decimal::new(40000, 0),
///     rate_overtime: Decimal::new(75000, 0),
///     attendance_bonus: Decimal::new(500000, 0),
///     is_active: true,
/// };
/// let attendance = MonthlyAttendance {
///     regular_hours: Decimal::new(192, 0),
///     overtime_hours: Decimal::ZERO,
///     leave_days: Decimal::ZERO,
/// };
///
/// let mut trace = AuditTrace::default();
/// let salary = calculate_salary(&attendance, &position, AnnualBonus::NotDue, &mut trace);
/// assert_eq!(salary.base_salary, Decimal::new(9_600_000, 0));
/// assert_eq!(salary.gross_salary, Decimal::new(9_600_000, 0));
/// ```
pub fn calculate_salary(
    attendance: &MonthlyAttendance,
    position: &Position,
    annual_bonus: AnnualBonus,
    trace: &mut AuditTrace,
) -> SalaryBreakdown {
    let regular_hours = attendance.regular_hours;
    let mut notes = Vec::new();

    let (hourly_rate, rate_name) = if regular_hours < FULL_MONTH_HOURS {
        (position.rate_insufficient, "rate_insufficient")
    } else {
        (position.rate_base, "rate_base")
    };
    let base_pay = hourly_rate * regular_hours;
    trace.record(
        "base_pay",
        "Regular Hours Pay",
        serde_json::json!({
            "regular_hours": regular_hours.to_string(),
            "threshold": FULL_MONTH_HOURS.to_string(),
            "rate": hourly_rate.to_string(),
        }),
        serde_json::json!({ "base_pay": base_pay.to_string() }),
        format!(
            "{} regular hours {} {} threshold, paid at {} ({})",
            regular_hours,
            if regular_hours < FULL_MONTH_HOURS { "below" } else { "meets" },
            FULL_MONTH_HOURS,
            rate_name,
            hourly_rate
        ),
    );

    let leave_pay = attendance.leave_days * HOURS_PER_LEAVE_DAY * position.rate_base * LEAVE_PAY_FACTOR;
    trace.record(
        "leave_pay",
        "Paid Leave",
        serde_json::json!({
            "leave_days": attendance.leave_days.to_string(),
            "hours_per_day": HOURS_PER_LEAVE_DAY.to_string(),
            "rate_base": position.rate_base.to_string(),
            "factor": LEAVE_PAY_FACTOR.to_string(),
        }),
        serde_json::json!({ "leave_pay": leave_pay.to_string() }),
        format!(
            "{} leave days x {}h x {} x {}",
            attendance.leave_days, HOURS_PER_LEAVE_DAY, position.rate_base, LEAVE_PAY_FACTOR
        ),
    );

    let total_hours = attendance.total_hours();
    let attendance_bonus_awarded = total_hours > ATTENDANCE_BONUS_HOURS;
    let attendance_bonus = if attendance_bonus_awarded {
        position.attendance_bonus
    } else {
        Decimal::ZERO
    };
    trace.record(
        "attendance_bonus",
        "Attendance Bonus",
        serde_json::json!({
            "total_hours": total_hours.to_string(),
            "threshold": ATTENDANCE_BONUS_HOURS.to_string(),
        }),
        serde_json::json!({
            "awarded": attendance_bonus_awarded,
            "attendance_bonus": attendance_bonus.to_string(),
        }),
        if attendance_bonus_awarded {
            format!("{} total hours exceed {}", total_hours, ATTENDANCE_BONUS_HOURS)
        } else {
            format!("{} total hours do not exceed {}", total_hours, ATTENDANCE_BONUS_HOURS)
        },
    );

    let overtime_pay = position.rate_overtime * attendance.overtime_hours;
    trace.record(
        "overtime_pay",
        "Overtime Pay",
        serde_json::json!({
            "overtime_hours": attendance.overtime_hours.to_string(),
            "rate_overtime": position.rate_overtime.to_string(),
        }),
        serde_json::json!({ "overtime_pay": overtime_pay.to_string() }),
        format!(
            "{} overtime hours at {}",
            attendance.overtime_hours, position.rate_overtime
        ),
    );

    let other_bonus = match annual_bonus {
        AnnualBonus::NotDue => Decimal::ZERO,
        AnnualBonus::Due { used_leaves } if used_leaves <= ANNUAL_BONUS_MAX_USED_LEAVES => {
            notes.push(format!("annual bonus {}", ANNUAL_BONUS));
            ANNUAL_BONUS
        }
        AnnualBonus::Due { .. } => {
            notes.push("annual bonus forfeited".to_string());
            Decimal::ZERO
        }
    };
    trace.record(
        "annual_bonus",
        "Annual Bonus",
        serde_json::json!({
            "annual_bonus": annual_bonus,
            "max_used_leaves": ANNUAL_BONUS_MAX_USED_LEAVES,
        }),
        serde_json::json!({ "other_bonus": other_bonus.to_string() }),
        match annual_bonus {
            AnnualBonus::NotDue => "Not a year-end run".to_string(),
            AnnualBonus::Due { used_leaves } => format!(
                "{} leave days used against an allowance of {}",
                used_leaves, ANNUAL_BONUS_MAX_USED_LEAVES
            ),
        },
    );

    let gross_salary = base_pay + overtime_pay + attendance_bonus + leave_pay + other_bonus;
    let breakdown = SalaryBreakdown {
        base_pay: base_pay.round_dp(2),
        leave_pay: leave_pay.round_dp(2),
        base_salary: (base_pay + leave_pay).round_dp(2),
        overtime_pay: overtime_pay.round_dp(2),
        attendance_bonus: attendance_bonus.round_dp(2),
        other_bonus: other_bonus.round_dp(2),
        gross_salary: gross_salary.round_dp(2),
        attendance_bonus_awarded,
        notes,
    };
    trace.record(
        "gross_salary",
        "Gross Salary",
        serde_json::json!({
            "base_pay": base_pay.to_string(),
            "leave_pay": leave_pay.to_string(),
            "overtime_pay": overtime_pay.to_string(),
            "attendance_bonus": attendance_bonus.to_string(),
            "other_bonus": other_bonus.to_string(),
        }),
        serde_json::json!({ "gross_salary": breakdown.gross_salary.to_string() }),
        "Summed every component and rounded to 2 places".to_string(),
    );

    breakdown
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_position() -> Position {
        Position {
            code: "DEV".to_string(),
            name: "Developer".to_string(),
            rate_base: dec("50000.00"),
            rate_insufficient: dec("40000.00"),
            rate_overtime: dec("75000.00"),
            attendance_bonus: dec("500000.00"),
            is_active: true,
        }
    }

    fn attendance(regular: &str, overtime: &str, leave: &str) -> MonthlyAttendance {
        MonthlyAttendance {
            regular_hours: dec(regular),
            overtime_hours: dec(overtime),
            leave_days: dec(leave),
        }
    }

    fn calculate(attendance: MonthlyAttendance, annual_bonus: AnnualBonus) -> SalaryBreakdown {
        let mut trace = AuditTrace::default();
        calculate_salary(&attendance, &create_position(), annual_bonus, &mut trace)
    }

    #[test]
    fn test_below_threshold_uses_insufficient_rate() {
        let salary = calculate(attendance("191.99", "0", "0"), AnnualBonus::NotDue);
        // 191.99 x 40000
        assert_eq!(salary.base_pay, dec("7679600.00"));
        assert_eq!(salary.base_salary, dec("7679600.00"));
    }

    #[test]
    fn test_at_threshold_uses_base_rate() {
        let salary = calculate(attendance("192.00", "0", "0"), AnnualBonus::NotDue);
        assert_eq!(salary.base_pay, dec("9600000.00"));
    }

    #[test]
    fn test_leave_pay() {
        // 5.5 days x 8h x 50000 x 0.85
        let salary = calculate(attendance("0", "0", "5.5"), AnnualBonus::NotDue);
        assert_eq!(salary.leave_pay, dec("1870000.00"));
        assert_eq!(salary.base_salary, dec("1870000.00"));
        assert_eq!(salary.gross_salary, dec("1870000.00"));
    }

    #[test]
    fn test_attendance_bonus_requires_more_than_200_hours() {
        let at_limit = calculate(attendance("192", "8", "0"), AnnualBonus::NotDue);
        assert!(!at_limit.attendance_bonus_awarded);
        assert_eq!(at_limit.attendance_bonus, Decimal::ZERO);

        let above = calculate(attendance("192", "8.01", "0"), AnnualBonus::NotDue);
        assert!(above.attendance_bonus_awarded);
        assert_eq!(above.attendance_bonus, dec("500000.00"));
    }

    #[test]
    fn test_gross_is_sum_of_components() {
        let salary = calculate(attendance("200", "10", "1"), AnnualBonus::NotDue);
        // 200 x 50000 + 10 x 75000 + 500000 + 1 x 8 x 50000 x 0.85
        assert_eq!(salary.base_pay, dec("10000000"));
        assert_eq!(salary.overtime_pay, dec("750000"));
        assert_eq!(salary.leave_pay, dec("340000"));
        assert_eq!(salary.gross_salary, dec("11590000"));
    }

    #[test]
    fn test_annual_bonus_paid_within_allowance() {
        let salary = calculate(
            attendance("192", "0", "0"),
            AnnualBonus::Due { used_leaves: 6 },
        );
        assert_eq!(salary.other_bonus, dec("1500000"));
        assert_eq!(salary.note(), "annual bonus 1500000");
        assert_eq!(salary.gross_salary, dec("11100000"));
    }

    #[test]
    fn test_annual_bonus_forfeited_beyond_allowance() {
        let salary = calculate(
            attendance("192", "0", "0"),
            AnnualBonus::Due { used_leaves: 7 },
        );
        assert_eq!(salary.other_bonus, Decimal::ZERO);
        assert_eq!(salary.note(), "annual bonus forfeited");
    }

    #[test]
    fn test_no_note_outside_year_end() {
        let salary = calculate(attendance("192", "0", "0"), AnnualBonus::NotDue);
        assert!(salary.notes.is_empty());
        assert_eq!(salary.note(), "");
    }

    #[test]
    fn test_only_final_values_are_rounded() {
        // 1/3 hour three times would round to 0.99 if rounded early.
        let third = Decimal::ONE / Decimal::from(3);
        let attendance = MonthlyAttendance {
            regular_hours: third + third + third,
            overtime_hours: Decimal::ZERO,
            leave_days: Decimal::ZERO,
        };
        let salary = calculate(attendance, AnnualBonus::NotDue);
        assert_eq!(salary.base_pay, dec("40000.00"));
    }

    #[test]
    fn test_trace_records_every_rule() {
        let mut trace = AuditTrace::default();
        calculate_salary(
            &attendance("192", "0", "0"),
            &create_position(),
            AnnualBonus::NotDue,
            &mut trace,
        );
        let rules: Vec<&str> = trace.steps.iter().map(|s| s.rule_id.as_str()).collect();
        assert_eq!(
            rules,
            vec![
                "base_pay",
                "leave_pay",
                "attendance_bonus",
                "overtime_pay",
                "annual_bonus",
                "gross_salary"
            ]
        );
    }
}
