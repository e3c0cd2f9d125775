//! Childcare versus parental leave cost engine
//!
//! This crate compares what a household pays per month for a combination of
//! parental leave and subsidised daycare. Each scenario derives the net
//! income lost to unpaid leave, the subsidy bracket for the resulting
//! household income, and the net childcare bill; two scenarios are then
//! compared on their monthly totals.
//!
//! # Example
//!
//! ```
//! use childcare_engine::calculation::{compare_scenarios, evaluate_scenario};
//! use childcare_engine::models::{BracketTable, IncomeBand, ScenarioInput, UpperBound, Verdict};
//! use rust_decimal::Decimal;
//!
//! let table = BracketTable::new(vec![IncomeBand {
//!     lower_bound: Decimal::ZERO,
//!     upper_bound: UpperBound::Unbounded,
//!     subsidy_pct: Decimal::new(40, 2),
//! }]);
//! let tax_factor = Decimal::new(50, 2);
//!
//! let a = ScenarioInput::default();
//! let mut b = ScenarioInput::default();
//! b.childcare.care_days_per_week = 3;
//! b.parent_2.leave_days_per_week = Decimal::ZERO;
//!
//! let comparison = compare_scenarios(
//!     evaluate_scenario(&a, &table, tax_factor),
//!     evaluate_scenario(&b, &table, tax_factor),
//! );
//! assert_ne!(comparison.verdict, Verdict::Equal);
//! ```

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
