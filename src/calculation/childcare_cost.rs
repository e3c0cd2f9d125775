//! Childcare cost and subsidy calculation.
//!
//! The subsidy is a percentage of the *capped* hourly rate, not of the rate
//! the provider charges. When the provider is more expensive than the cap,
//! the household pays the difference in full.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AuditStep, ChildcareInput};

/// Months per year, used to spread yearly care hours over a month.
pub const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// The monthly cost of childcare for one scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildcareCostResult {
    /// Hours of care per month.
    pub monthly_hours: Decimal,
    /// Cost per month at the provider's hourly rate.
    pub gross_monthly_cost: Decimal,
    /// Subsidy per month.
    pub subsidy_amount: Decimal,
    /// Cost per month after subsidy. May be negative.
    pub net_monthly_cost: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the monthly childcare cost after subsidy.
///
/// ```text
/// monthly_hours = days_per_week * hours_per_day * weeks_per_year / 12
/// gross         = monthly_hours * hourly_rate
/// subsidy       = monthly_hours * subsidy_cap_rate * subsidy_pct
/// net           = gross - subsidy
/// ```
///
/// A negative net cost (cap rate times percentage above the actual rate) is
/// returned as-is.
///
/// # Examples
///
/// ```
/// use childcare_engine::calculation::calculate_childcare_cost;
/// use childcare_engine::models::{CareWeeksPerYear, ChildcareInput};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let childcare = ChildcareInput {
///     hourly_rate: Decimal::from_str("10").unwrap(),
///     subsidy_cap_rate: Decimal::from_str("8").unwrap(),
///     care_days_per_week: 3,
///     care_hours_per_day: Decimal::from_str("10").unwrap(),
///     care_weeks_per_year: CareWeeksPerYear::FullYear,
/// };
///
/// // 3 x 10 x 52 / 12 = 130 hours
/// let result = calculate_childcare_cost(&childcare, Decimal::from_str("0.5").unwrap(), 1);
/// assert_eq!(result.gross_monthly_cost, Decimal::from_str("1300").unwrap());
/// assert_eq!(result.subsidy_amount, Decimal::from_str("520").unwrap());
/// assert_eq!(result.net_monthly_cost, Decimal::from_str("780").unwrap());
/// ```
pub fn calculate_childcare_cost(
    childcare: &ChildcareInput,
    subsidy_pct: Decimal,
    step_number: u32,
) -> ChildcareCostResult {
    let days_per_week = Decimal::from(childcare.care_days_per_week);
    let weeks_per_year = childcare.care_weeks_per_year.weeks();

    let monthly_hours = days_per_week
        .saturating_mul(childcare.care_hours_per_day)
        .saturating_mul(weeks_per_year)
        / MONTHS_PER_YEAR;
    let gross_monthly_cost = monthly_hours.saturating_mul(childcare.hourly_rate);
    let subsidy_amount = monthly_hours
        .saturating_mul(childcare.subsidy_cap_rate)
        .saturating_mul(subsidy_pct);
    let net_monthly_cost = gross_monthly_cost.saturating_sub(subsidy_amount);

    let reasoning = if monthly_hours.is_zero() {
        "No childcare used".to_string()
    } else if childcare.hourly_rate > childcare.subsidy_cap_rate {
        format!(
            "{} hours at €{} = €{}; subsidy {}% of capped €{} = €{}; provider charges €{} above the cap",
            monthly_hours.round_dp(2),
            childcare.hourly_rate.normalize(),
            gross_monthly_cost.round_dp(2),
            (subsidy_pct * Decimal::ONE_HUNDRED).normalize(),
            childcare.subsidy_cap_rate.normalize(),
            subsidy_amount.round_dp(2),
            (childcare.hourly_rate - childcare.subsidy_cap_rate).normalize()
        )
    } else {
        format!(
            "{} hours at €{} = €{}; subsidy {}% of capped €{} = €{}",
            monthly_hours.round_dp(2),
            childcare.hourly_rate.normalize(),
            gross_monthly_cost.round_dp(2),
            (subsidy_pct * Decimal::ONE_HUNDRED).normalize(),
            childcare.subsidy_cap_rate.normalize(),
            subsidy_amount.round_dp(2)
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "childcare_cost".to_string(),
        rule_name: "Childcare Cost After Subsidy".to_string(),
        formula: "days * hours * weeks / 12 * (hourly_rate - cap_rate * subsidy_pct)".to_string(),
        input: serde_json::json!({
            "hourly_rate": childcare.hourly_rate.to_string(),
            "subsidy_cap_rate": childcare.subsidy_cap_rate.to_string(),
            "care_days_per_week": childcare.care_days_per_week,
            "care_hours_per_day": childcare.care_hours_per_day.to_string(),
            "care_weeks_per_year": u32::from(childcare.care_weeks_per_year),
            "subsidy_pct": subsidy_pct.to_string()
        }),
        output: serde_json::json!({
            "monthly_hours": monthly_hours.to_string(),
            "gross_monthly_cost": gross_monthly_cost.to_string(),
            "subsidy_amount": subsidy_amount.to_string(),
            "net_monthly_cost": net_monthly_cost.to_string()
        }),
        reasoning,
    };

    ChildcareCostResult {
        monthly_hours,
        gross_monthly_cost,
        subsidy_amount,
        net_monthly_cost,
        audit_step,
    }
}
