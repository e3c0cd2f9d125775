//! Parental leave income loss calculation.
//!
//! This module converts a parent's annual reference salary and weekly leave
//! pattern into the monthly income lost by taking (partially paid) leave.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AuditStep, ParentInput};

/// Standard number of working days per year used to derive a daily wage.
pub const WORKING_DAYS_PER_YEAR: Decimal = Decimal::from_parts(261, 0, 0, false, 0);

/// Weeks per month used to turn a weekly pattern into a monthly amount.
pub const WEEKS_PER_MONTH: Decimal = Decimal::from_parts(4, 0, 0, false, 0);

/// The monthly income loss of one parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveLossResult {
    /// Income lost per month before tax.
    pub gross_monthly_loss: Decimal,
    /// Income lost per month after applying the tax factor.
    pub net_monthly_loss: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the monthly income a parent loses by taking leave.
///
/// ```text
/// daily_wage         = annual_salary / 261
/// paid_daily_amount  = daily_wage * paid_leave_pct
/// loss_per_day       = daily_wage - paid_daily_amount
/// gross_monthly_loss = loss_per_day * leave_days_per_week * 4
/// net_monthly_loss   = gross_monthly_loss * tax_factor
/// ```
///
/// There are no error conditions. Values outside the form's ranges give
/// degenerate results (a paid percentage above 1 gives a negative loss).
///
/// # Examples
///
/// ```
/// use childcare_engine::calculation::calculate_leave_loss;
/// use childcare_engine::models::ParentInput;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let parent = ParentInput {
///     annual_reference_salary: Decimal::from_str("66000").unwrap(),
///     leave_days_per_week: Decimal::ONE,
///     paid_leave_pct: Decimal::from_str("0.70").unwrap(),
/// };
///
/// let result = calculate_leave_loss(&parent, Decimal::from_str("0.5").unwrap(), 1);
/// assert_eq!(result.gross_monthly_loss.round_dp(2), Decimal::from_str("303.45").unwrap());
/// assert_eq!(result.net_monthly_loss.round_dp(2), Decimal::from_str("151.72").unwrap());
/// ```
pub fn calculate_leave_loss(
    parent: &ParentInput,
    tax_factor: Decimal,
    step_number: u32,
) -> LeaveLossResult {
    // Saturating: unvalidated inputs clamp at Decimal::MAX instead of panicking
    let daily_wage = parent.annual_reference_salary / WORKING_DAYS_PER_YEAR;
    let paid_daily_amount = daily_wage.saturating_mul(parent.paid_leave_pct);
    let loss_per_day = daily_wage.saturating_sub(paid_daily_amount);
    let gross_monthly_loss = loss_per_day
        .saturating_mul(parent.leave_days_per_week)
        .saturating_mul(WEEKS_PER_MONTH);
    let net_monthly_loss = gross_monthly_loss.saturating_mul(tax_factor);

    let reasoning = if parent.leave_days_per_week.is_zero() {
        "No leave taken, no income lost".to_string()
    } else {
        format!(
            "€{} lost per leave day x {} days x {} weeks = €{} gross, €{} net",
            loss_per_day.round_dp(2),
            parent.leave_days_per_week.normalize(),
            WEEKS_PER_MONTH,
            gross_monthly_loss.round_dp(2),
            net_monthly_loss.round_dp(2)
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "leave_loss".to_string(),
        rule_name: "Parental Leave Income Loss".to_string(),
        formula: "(salary / 261 - salary / 261 * paid_pct) * leave_days * 4 * tax_factor"
            .to_string(),
        input: serde_json::json!({
            "annual_reference_salary": parent.annual_reference_salary.to_string(),
            "leave_days_per_week": parent.leave_days_per_week.to_string(),
            "paid_leave_pct": parent.paid_leave_pct.to_string(),
            "tax_factor": tax_factor.to_string()
        }),
        output: serde_json::json!({
            "daily_wage": daily_wage.to_string(),
            "loss_per_day": loss_per_day.to_string(),
            "gross_monthly_loss": gross_monthly_loss.to_string(),
            "net_monthly_loss": net_monthly_loss.to_string()
        }),
        reasoning,
    };

    LeaveLossResult {
        gross_monthly_loss,
        net_monthly_loss,
        audit_step,
    }
}
