//! Scenario comparison.
//!
//! Decides which of two evaluated scenarios is cheaper per month.

use rust_decimal::Decimal;

use crate::models::{ComparisonResult, ScenarioResult, Verdict};

/// Compares two scenarios with exact equality.
///
/// `difference = total_b - total_a`. A positive difference means B costs
/// more, so A is cheaper. `Equal` only when the totals are exactly the same.
///
/// # Examples
///
/// ```
/// use childcare_engine::calculation::{compare_scenarios, evaluate_scenario};
/// use childcare_engine::models::{BracketTable, ScenarioInput, Verdict};
/// use rust_decimal::Decimal;
///
/// let table = BracketTable::new(vec![]);
/// let a = evaluate_scenario(&ScenarioInput::default(), &table, Decimal::new(5, 1));
/// let b = a.clone();
///
/// let comparison = compare_scenarios(a, b);
/// assert_eq!(comparison.verdict, Verdict::Equal);
/// assert_eq!(comparison.difference, Decimal::ZERO);
/// ```
pub fn compare_scenarios(scenario_a: ScenarioResult, scenario_b: ScenarioResult) -> ComparisonResult {
    compare_within(scenario_a, scenario_b, Decimal::ZERO)
}

/// Compares two scenarios, treating totals within `tolerance` as equal.
///
/// The difference is reported unchanged; only the verdict uses the
/// tolerance. A tolerance of zero behaves like [`compare_scenarios`].
pub fn compare_within(
    scenario_a: ScenarioResult,
    scenario_b: ScenarioResult,
    tolerance: Decimal,
) -> ComparisonResult {
    let difference = scenario_b
        .total_monthly_cost
        .saturating_sub(scenario_a.total_monthly_cost);

    let verdict = if difference.abs() <= tolerance.abs() {
        Verdict::Equal
    } else if difference > Decimal::ZERO {
        Verdict::ACheaper
    } else {
        Verdict::BCheaper
    };

    ComparisonResult {
        scenario_a,
        scenario_b,
        difference,
        verdict,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BracketLookup;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn result_with_total(total: &str) -> ScenarioResult {
        ScenarioResult {
            gross_leave_loss_1: Decimal::ZERO,
            net_leave_loss_1: Decimal::ZERO,
            gross_leave_loss_2: Decimal::ZERO,
            net_leave_loss_2: Decimal::ZERO,
            adjusted_household_income: Decimal::ZERO,
            bracket: BracketLookup::NotFound,
            subsidy_pct: Decimal::ZERO,
            monthly_care_hours: Decimal::ZERO,
            gross_childcare_cost: dec(total),
            subsidy_amount: Decimal::ZERO,
            net_childcare_cost: dec(total),
            total_monthly_cost: dec(total),
            leave_days_per_week_1: Decimal::ZERO,
            leave_days_per_week_2: Decimal::ZERO,
            care_days_per_week: 0,
            audit_steps: vec![],
        }
    }

    #[test]
    fn test_a_cheaper_when_b_costs_more() {
        let comparison = compare_scenarios(result_with_total("900"), result_with_total("1000"));
        assert_eq!(comparison.difference, dec("100"));
        assert_eq!(comparison.verdict, Verdict::ACheaper);
        assert_eq!(comparison.savings(), dec("100"));
    }

    #[test]
    fn test_b_cheaper_when_a_costs_more() {
        let comparison = compare_scenarios(result_with_total("1000"), result_with_total("900"));
        assert_eq!(comparison.difference, dec("-100"));
        assert_eq!(comparison.verdict, Verdict::BCheaper);
        assert_eq!(comparison.savings(), dec("100"));
    }

    #[test]
    fn test_equal_totals() {
        let comparison = compare_scenarios(result_with_total("950.50"), result_with_total("950.5"));
        assert_eq!(comparison.difference, Decimal::ZERO);
        assert_eq!(comparison.verdict, Verdict::Equal);
    }

    #[test]
    fn test_strict_comparison_sees_a_cent() {
        let comparison = compare_scenarios(result_with_total("950.00"), result_with_total("950.01"));
        assert_eq!(comparison.verdict, Verdict::ACheaper);
    }

    #[test]
    fn test_tolerance_treats_close_totals_as_equal() {
        let comparison = compare_within(
            result_with_total("950.00"),
            result_with_total("950.004"),
            dec("0.005"),
        );
        assert_eq!(comparison.verdict, Verdict::Equal);
        assert_eq!(comparison.difference, dec("0.004"));
    }

    #[test]
    fn test_tolerance_does_not_hide_real_differences() {
        let comparison = compare_within(
            result_with_total("950.00"),
            result_with_total("949.00"),
            dec("0.005"),
        );
        assert_eq!(comparison.verdict, Verdict::BCheaper);
    }

    #[test]
    fn test_swapping_sides_mirrors_result() {
        let forward = compare_scenarios(result_with_total("812.34"), result_with_total("1020.10"));
        let backward = compare_scenarios(result_with_total("1020.10"), result_with_total("812.34"));

        assert_eq!(forward.difference, -backward.difference);
        assert_eq!(forward.verdict, backward.verdict.mirrored());
    }

    #[test]
    fn test_difference_saturates_at_extremes() {
        let low = result_with_total(&Decimal::MIN.to_string());
        let high = result_with_total(&Decimal::MAX.to_string());

        let comparison = compare_scenarios(low, high);
        assert_eq!(comparison.difference, Decimal::MAX);
        assert_eq!(comparison.verdict, Verdict::ACheaper);
    }
}
