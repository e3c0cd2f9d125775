//! Scenario input models.
//!
//! A scenario is one household's choice of parental leave and childcare.
//! Inputs are created fresh from user entry and never stored.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Number of weeks per year that childcare is used.
///
/// Childcare contracts are offered either for school weeks only or for the
/// whole year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum CareWeeksPerYear {
    /// 41 weeks, school terms only.
    SchoolWeeks,
    /// 52 weeks, all year round.
    FullYear,
}

impl CareWeeksPerYear {
    /// Returns the number of weeks as a decimal for use in calculations.
    pub fn weeks(&self) -> Decimal {
        Decimal::from(u32::from(*self))
    }
}

impl From<CareWeeksPerYear> for u32 {
    fn from(weeks: CareWeeksPerYear) -> Self {
        match weeks {
            CareWeeksPerYear::SchoolWeeks => 41,
            CareWeeksPerYear::FullYear => 52,
        }
    }
}

impl TryFrom<u32> for CareWeeksPerYear {
    type Error = String;

    fn try_from(weeks: u32) -> Result<Self, Self::Error> {
        match weeks {
            41 => Ok(CareWeeksPerYear::SchoolWeeks),
            52 => Ok(CareWeeksPerYear::FullYear),
            other => Err(format!("care weeks per year must be 41 or 52, got {}", other)),
        }
    }
}

/// Leave parameters for one parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentInput {
    /// Annual reference salary ("SV-loon"), including holiday pay and fixed
    /// allowances (0..=300 000).
    pub annual_reference_salary: Decimal,
    /// Days of parental leave taken per week (0..=5).
    pub leave_days_per_week: Decimal,
    /// Fraction of the daily wage that is still paid during leave (0..=1).
    pub paid_leave_pct: Decimal,
}

/// Childcare parameters for one scenario.
///
/// Fields left out of a request take the form defaults: 11.76 per hour, a
/// cap of 11.23, two days of 10.75 hours, all year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChildcareInput {
    /// Hourly rate charged by the childcare provider (0..=100).
    pub hourly_rate: Decimal,
    /// Maximum hourly rate the subsidy is calculated over (0..=100).
    pub subsidy_cap_rate: Decimal,
    /// Days of care per week (0..=7).
    pub care_days_per_week: u32,
    /// Hours of care per day (0..=24).
    pub care_hours_per_day: Decimal,
    /// Weeks of care per year.
    pub care_weeks_per_year: CareWeeksPerYear,
}

/// The complete input for a single scenario.
///
/// The default is the starting point of the comparison form: two parents
/// on 66 000 and 48 000, one leave day each at 70% pay, and two days of
/// full-year daycare.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioInput {
    /// The first parent.
    pub parent_1: ParentInput,
    /// The second parent.
    pub parent_2: ParentInput,
    /// Childcare usage and rates.
    pub childcare: ChildcareInput,
}

impl Default for ScenarioInput {
    fn default() -> Self {
        Self {
            parent_1: ParentInput {
                annual_reference_salary: Decimal::new(66_000, 0),
                leave_days_per_week: Decimal::ONE,
                paid_leave_pct: Decimal::new(70, 2),
            },
            parent_2: ParentInput {
                annual_reference_salary: Decimal::new(48_000, 0),
                leave_days_per_week: Decimal::ONE,
                paid_leave_pct: Decimal::new(70, 2),
            },
            childcare: ChildcareInput::default(),
        }
    }
}

impl Default for ChildcareInput {
    fn default() -> Self {
        Self {
            hourly_rate: Decimal::new(1176, 2),
            subsidy_cap_rate: Decimal::new(1123, 2),
            care_days_per_week: 2,
            care_hours_per_day: Decimal::new(1075, 2),
            care_weeks_per_year: CareWeeksPerYear::FullYear,
        }
    }
}

/// Checks that `value` lies in `[min, max]`, or is at least `min` when `max` is `None`.
fn check_range(
    field: &str,
    value: Decimal,
    min: Decimal,
    max: Option<Decimal>,
) -> EngineResult<()> {
    let in_range = value >= min && max.is_none_or(|max| value <= max);
    if in_range {
        return Ok(());
    }

    let message = match max {
        Some(max) => format!("must be between {} and {}, got {}", min, max, value),
        None => format!("must be at least {}, got {}", min, value),
    };
    Err(EngineError::InvalidInput {
        field: field.to_string(),
        message,
    })
}

/// Highest annual reference salary accepted from a request.
pub const MAX_ANNUAL_SALARY: Decimal = Decimal::from_parts(300_000, 0, 0, false, 0);

/// Highest hourly childcare or cap rate accepted from a request.
pub const MAX_HOURLY_RATE: Decimal = Decimal::ONE_HUNDRED;

/// Checks that a tax factor lies in `[0, 1]`.
pub fn validate_tax_factor(tax_factor: Decimal) -> EngineResult<()> {
    check_range("tax_factor", tax_factor, Decimal::ZERO, Some(Decimal::ONE))
}

impl ParentInput {
    /// Checks the declared ranges, reporting fields under `prefix`.
    pub fn validate(&self, prefix: &str) -> EngineResult<()> {
        check_range(
            &format!("{}.annual_reference_salary", prefix),
            self.annual_reference_salary,
            Decimal::ZERO,
            Some(MAX_ANNUAL_SALARY),
        )?;
        check_range(
            &format!("{}.leave_days_per_week", prefix),
            self.leave_days_per_week,
            Decimal::ZERO,
            Some(Decimal::new(5, 0)),
        )?;
        check_range(
            &format!("{}.paid_leave_pct", prefix),
            self.paid_leave_pct,
            Decimal::ZERO,
            Some(Decimal::ONE),
        )
    }
}

impl ChildcareInput {
    /// Checks the declared ranges, reporting fields under `prefix`.
    pub fn validate(&self, prefix: &str) -> EngineResult<()> {
        check_range(
            &format!("{}.hourly_rate", prefix),
            self.hourly_rate,
            Decimal::ZERO,
            Some(MAX_HOURLY_RATE),
        )?;
        check_range(
            &format!("{}.subsidy_cap_rate", prefix),
            self.subsidy_cap_rate,
            Decimal::ZERO,
            Some(MAX_HOURLY_RATE),
        )?;
        check_range(
            &format!("{}.care_days_per_week", prefix),
            Decimal::from(self.care_days_per_week),
            Decimal::ZERO,
            Some(Decimal::new(7, 0)),
        )?;
        check_range(
            &format!("{}.care_hours_per_day", prefix),
            self.care_hours_per_day,
            Decimal::ZERO,
            Some(Decimal::new(24, 0)),
        )
    }
}

impl ScenarioInput {
    /// Checks every field against its declared range.
    ///
    /// The calculators never call this; it belongs to whatever boundary
    /// accepts user input. `prefix` names the scenario in error messages.
    pub fn validate(&self, prefix: &str) -> EngineResult<()> {
        self.parent_1.validate(&format!("{}.parent_1", prefix))?;
        self.parent_2.validate(&format!("{}.parent_2", prefix))?;
        self.childcare.validate(&format!("{}.childcare", prefix))
    }
}
