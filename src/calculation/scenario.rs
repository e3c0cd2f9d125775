//! Scenario evaluation.
//!
//! Ties the calculators together for one scenario. Leave lowers the income
//! that decides the subsidy bracket, so taking more leave can move the
//! household into a higher subsidy band: the childcare cost depends on the
//! leave loss.

use rust_decimal::Decimal;

use crate::models::{AuditStep, BracketLookup, BracketTable, ScenarioInput, ScenarioResult};

use super::bracket_resolver::resolve;
use super::childcare_cost::{MONTHS_PER_YEAR, calculate_childcare_cost};
use super::leave_loss::calculate_leave_loss;

/// Evaluates one scenario against the bracket table.
///
/// Steps, each recorded in the audit trail:
/// 1. leave loss for parent 1 and parent 2;
/// 2. `adjusted_income = max(0, salary_1 + salary_2 - (gross_loss_1 + gross_loss_2) * 12)`;
/// 3. subsidy bracket for the adjusted income (no bracket means 0%);
/// 4. childcare cost with that percentage;
/// 5. `total = net_loss_1 + net_loss_2 + net_childcare_cost`.
///
/// The function is pure: the same arguments always give the same result.
/// Inputs are not range-checked here; see [`ScenarioInput::validate`].
/// Amounts beyond the `Decimal` range saturate rather than panic.
pub fn evaluate_scenario(
    input: &ScenarioInput,
    table: &BracketTable,
    tax_factor: Decimal,
) -> ScenarioResult {
    let mut audit_steps: Vec<AuditStep> = Vec::with_capacity(6);
    let mut step_number: u32 = 1;

    let loss_1 = calculate_leave_loss(&input.parent_1, tax_factor, step_number);
    audit_steps.push(loss_1.audit_step.clone());
    step_number += 1;

    let loss_2 = calculate_leave_loss(&input.parent_2, tax_factor, step_number);
    audit_steps.push(loss_2.audit_step.clone());
    step_number += 1;

    let total_annual_income = input
        .parent_1
        .annual_reference_salary
        .saturating_add(input.parent_2.annual_reference_salary);
    let annual_leave_loss = loss_1
        .gross_monthly_loss
        .saturating_add(loss_2.gross_monthly_loss)
        .saturating_mul(MONTHS_PER_YEAR);
    let adjusted_household_income = total_annual_income
        .saturating_sub(annual_leave_loss)
        .max(Decimal::ZERO);

    audit_steps.push(AuditStep {
        step_number,
        rule_id: "adjusted_income".to_string(),
        rule_name: "Adjusted Household Income".to_string(),
        formula: "max(0, salary_1 + salary_2 - (gross_loss_1 + gross_loss_2) * 12)".to_string(),
        input: serde_json::json!({
            "total_annual_income": total_annual_income.to_string(),
            "annual_leave_loss": annual_leave_loss.to_string()
        }),
        output: serde_json::json!({
            "adjusted_household_income": adjusted_household_income.to_string()
        }),
        reasoning: format!(
            "€{} household income - €{} lost to leave per year = €{}",
            total_annual_income.normalize(),
            annual_leave_loss.round_dp(2),
            adjusted_household_income.round_dp(2)
        ),
    });
    step_number += 1;

    let bracket = resolve(table, adjusted_household_income);
    let subsidy_pct = bracket.subsidy_pct();
    audit_steps.push(bracket_audit_step(
        &bracket,
        adjusted_household_income,
        step_number,
    ));
    step_number += 1;

    let childcare = calculate_childcare_cost(&input.childcare, subsidy_pct, step_number);
    audit_steps.push(childcare.audit_step.clone());
    step_number += 1;

    let total_monthly_cost = loss_1
        .net_monthly_loss
        .saturating_add(loss_2.net_monthly_loss)
        .saturating_add(childcare.net_monthly_cost);

    audit_steps.push(AuditStep {
        step_number,
        rule_id: "scenario_total".to_string(),
        rule_name: "Scenario Monthly Total".to_string(),
        formula: "net_loss_1 + net_loss_2 + net_childcare_cost".to_string(),
        input: serde_json::json!({
            "net_leave_loss_1": loss_1.net_monthly_loss.to_string(),
            "net_leave_loss_2": loss_2.net_monthly_loss.to_string(),
            "net_childcare_cost": childcare.net_monthly_cost.to_string()
        }),
        output: serde_json::json!({
            "total_monthly_cost": total_monthly_cost.to_string()
        }),
        reasoning: format!(
            "€{} + €{} + €{} = €{} per month",
            loss_1.net_monthly_loss.round_dp(2),
            loss_2.net_monthly_loss.round_dp(2),
            childcare.net_monthly_cost.round_dp(2),
            total_monthly_cost.round_dp(2)
        ),
    });

    ScenarioResult {
        gross_leave_loss_1: loss_1.gross_monthly_loss,
        net_leave_loss_1: loss_1.net_monthly_loss,
        gross_leave_loss_2: loss_2.gross_monthly_loss,
        net_leave_loss_2: loss_2.net_monthly_loss,
        adjusted_household_income,
        bracket,
        subsidy_pct,
        monthly_care_hours: childcare.monthly_hours,
        gross_childcare_cost: childcare.gross_monthly_cost,
        subsidy_amount: childcare.subsidy_amount,
        net_childcare_cost: childcare.net_monthly_cost,
        total_monthly_cost,
        leave_days_per_week_1: input.parent_1.leave_days_per_week,
        leave_days_per_week_2: input.parent_2.leave_days_per_week,
        care_days_per_week: input.childcare.care_days_per_week,
        audit_steps,
    }
}

fn bracket_audit_step(bracket: &BracketLookup, income: Decimal, step_number: u32) -> AuditStep {
    let (output, reasoning) = match bracket {
        BracketLookup::Found { index, band } => (
            serde_json::json!({
                "status": "found",
                "index": index,
                "lower_bound": band.lower_bound.to_string(),
                "upper_bound": band.upper_bound.amount().map(|u| u.to_string()),
                "subsidy_pct": band.subsidy_pct.to_string()
            }),
            format!(
                "Income €{} falls in band {} starting at €{}: {}% subsidy",
                income.round_dp(2),
                index + 1,
                band.lower_bound.normalize(),
                (band.subsidy_pct * Decimal::ONE_HUNDRED).normalize()
            ),
        ),
        BracketLookup::NotFound => (
            serde_json::json!({
                "status": "not_found",
                "subsidy_pct": Decimal::ZERO.to_string()
            }),
            format!(
                "No subsidy bracket found for income €{}; no subsidy applied",
                income.round_dp(2)
            ),
        ),
    };

    AuditStep {
        step_number,
        rule_id: "subsidy_bracket".to_string(),
        rule_name: "Subsidy Bracket Lookup".to_string(),
        formula: "first band with lower <= income <= upper".to_string(),
        input: serde_json::json!({
            "adjusted_household_income": income.to_string()
        }),
        output,
        reasoning,
    }
}
