//! Audit trail models.
//!
//! Each calculator records an [`AuditStep`] describing what went in, what
//! came out, and the formula that connects them, so a scenario total can be
//! traced back to the raw inputs.

use serde::{Deserialize, Serialize};

/// A single step in the audit trace recording a calculation decision.
///
/// Steps carry no timings, so evaluating the same inputs twice produces
/// identical steps.
///
/// # Example
///
/// ```
/// use childcare_engine::models::AuditStep;
///
/// let step = AuditStep {
///     step_number: 1,
///     rule_id: "leave_loss".to_string(),
///     rule_name: "Parental Leave Income Loss".to_string(),
///     formula: "salary / 261 * (1 - paid) * days * 4".to_string(),
///     input: serde_json::json!({"annual_reference_salary": "66000"}),
///     output: serde_json::json!({"gross_monthly_loss": "303.45"}),
///     reasoning: "Parent 1 loses 303.45 gross per month".to_string(),
/// };
/// assert_eq!(step.rule_id, "leave_loss");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The formula applied in this step.
    pub formula: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}
