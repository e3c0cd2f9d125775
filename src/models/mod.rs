//! Core data models for the childcare cost engine.
//!
//! This module contains the inputs, bracket table and results shared by the
//! calculators, the loader and the HTTP layer.

mod audit;
mod bracket;
mod result;
mod scenario;

pub use audit::AuditStep;
pub use bracket::{BracketLookup, BracketNeighbors, BracketTable, IncomeBand, TableIssue, UpperBound};
pub use result::{ComparisonResult, ScenarioResult, Verdict};
pub use scenario::{
    CareWeeksPerYear, ChildcareInput, MAX_ANNUAL_SALARY, MAX_HOURLY_RATE, ParentInput,
    ScenarioInput, validate_tax_factor,
};
