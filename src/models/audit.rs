//! Audit trace models.
//!
//! Every payroll run records the rules it applied as a list of
//! [`AuditStep`]s so a salary figure can be traced back to its inputs.

use serde::{Deserialize, Serialize};

/// A single step in the audit trace recording a calculation decision.
///
/// # Example
///
/// ```
/// use attendance_payroll::models::AuditStep;
///
/// let step = AuditStep {
///     step_number: 1,
///     rule_id: "regular_hours".to_string(),
///     rule_name: "Regular Hours Aggregation".to_string(),
///     input: serde_json::json!({"rows": 20}),
///     output: serde_json::json!({"regular_hours": "160"}),
///     reasoning: "Summed 20 present rows".to_string(),
/// };
/// assert_eq!(step.step_number, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// Ordered collection of audit steps with automatic numbering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
}

impl AuditTrace {
    /// Appends a step, numbering it after the previous one.
    pub fn record(
        &mut self,
        rule_id: &str,
        rule_name: &str,
        input: serde_json::Value,
        output: serde_json::Value,
        reasoning: String,
    ) {
        let step_number = self.steps.len() as u32 + 1;
        self.steps.push(AuditStep {
            step_number,
            rule_id: rule_id.to_string(),
            rule_name: rule_name.to_string(),
            input,
            output,
            reasoning,
        });
    }

    /// Finds the step recorded for a rule.
    pub fn step(&self, rule_id: &str) -> Option<&AuditStep> {
        self.steps.iter().find(|s| s.rule_id == rule_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_numbers_steps_sequentially() {
        let mut trace = AuditTrace::default();
        trace.record(
            "a",
            "A",
            serde_json::json!({}),
            serde_json::json!({}),
            "first".to_string(),
        );
        trace.record(
            "b",
            "B",
            serde_json::json!({}),
            serde_json::json!({}),
            "second".to_string(),
        );
        assert_eq!(trace.steps[0].step_number, 1);
        assert_eq!(trace.steps[1].step_number, 2);
        assert_eq!(trace.step("b").unwrap().reasoning, "second");
        assert!(trace.step("c").is_none());
    }
}
