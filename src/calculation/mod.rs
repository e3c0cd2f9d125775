//! Calculation logic for the childcare cost engine.
//!
//! This module contains the income bracket resolver, the parental leave
//! income loss calculator, the childcare cost calculator, scenario
//! evaluation that chains them together, and the comparison of two
//! scenarios.

mod bracket_resolver;
mod childcare_cost;
mod comparison;
mod leave_loss;
mod scenario;

pub use bracket_resolver::{resolve, resolve_with_neighbors};
pub use childcare_cost::{ChildcareCostResult, MONTHS_PER_YEAR, calculate_childcare_cost};
pub use comparison::{compare_scenarios, compare_within};
pub use leave_loss::{
    LeaveLossResult, WEEKS_PER_MONTH, WORKING_DAYS_PER_YEAR, calculate_leave_loss,
};
pub use scenario::evaluate_scenario;
