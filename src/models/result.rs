//! Result models for scenario evaluation and comparison.
//!
//! All currency values are monthly and unrounded; formatting belongs to
//! whoever displays them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AuditStep, BracketLookup};

/// The derived cost of one scenario.
///
/// Recomputed from scratch whenever any input changes; it has no identity
/// of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioResult {
    /// Gross monthly income lost by parent 1.
    pub gross_leave_loss_1: Decimal,
    /// Net monthly income lost by parent 1.
    pub net_leave_loss_1: Decimal,
    /// Gross monthly income lost by parent 2.
    pub gross_leave_loss_2: Decimal,
    /// Net monthly income lost by parent 2.
    pub net_leave_loss_2: Decimal,
    /// Annual household income after leave, used to pick the subsidy bracket.
    pub adjusted_household_income: Decimal,
    /// The bracket the adjusted income fell into.
    pub bracket: BracketLookup,
    /// The subsidy percentage applied (zero when no bracket was found).
    pub subsidy_pct: Decimal,
    /// Hours of childcare per month.
    pub monthly_care_hours: Decimal,
    /// Monthly childcare cost before subsidy.
    pub gross_childcare_cost: Decimal,
    /// Monthly childcare subsidy.
    pub subsidy_amount: Decimal,
    /// Monthly childcare cost after subsidy.
    pub net_childcare_cost: Decimal,
    /// Net leave loss of both parents plus net childcare cost.
    pub total_monthly_cost: Decimal,
    /// Leave days per week of parent 1, echoed for display.
    pub leave_days_per_week_1: Decimal,
    /// Leave days per week of parent 2, echoed for display.
    pub leave_days_per_week_2: Decimal,
    /// Childcare days per week, echoed for display.
    pub care_days_per_week: u32,
    /// The derivation, step by step.
    pub audit_steps: Vec<AuditStep>,
}

/// Which scenario costs less per month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    /// Scenario A is cheaper.
    ACheaper,
    /// Scenario B is cheaper.
    BCheaper,
    /// Both scenarios cost the same.
    Equal,
}

impl Verdict {
    /// Returns the verdict seen from the other side of the comparison.
    pub fn mirrored(&self) -> Self {
        match self {
            Verdict::ACheaper => Verdict::BCheaper,
            Verdict::BCheaper => Verdict::ACheaper,
            Verdict::Equal => Verdict::Equal,
        }
    }
}

/// The outcome of comparing two scenarios.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// The first scenario.
    pub scenario_a: ScenarioResult,
    /// The second scenario.
    pub scenario_b: ScenarioResult,
    /// `total_b - total_a`; positive means A is cheaper.
    pub difference: Decimal,
    /// Which scenario is cheaper.
    pub verdict: Verdict,
}

impl ComparisonResult {
    /// Returns how much the cheaper scenario saves per month.
    pub fn savings(&self) -> Decimal {
        self.difference.abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_serialization() {
        assert_eq!(
            serde_json::to_string(&Verdict::ACheaper).unwrap(),
            "\"A_CHEAPER\""
        );
        assert_eq!(
            serde_json::to_string(&Verdict::BCheaper).unwrap(),
            "\"B_CHEAPER\""
        );
        assert_eq!(serde_json::to_string(&Verdict::Equal).unwrap(), "\"EQUAL\"");
    }

    #[test]
    fn test_verdict_deserialization() {
        let verdict: Verdict = serde_json::from_str("\"B_CHEAPER\"").unwrap();
        assert_eq!(verdict, Verdict::BCheaper);
    }

    #[test]
    fn test_mirrored_swaps_sides() {
        assert_eq!(Verdict::ACheaper.mirrored(), Verdict::BCheaper);
        assert_eq!(Verdict::BCheaper.mirrored(), Verdict::ACheaper);
        assert_eq!(Verdict::Equal.mirrored(), Verdict::Equal);
    }
}
