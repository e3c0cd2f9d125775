//! Request types for the childcare cost engine API.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::ScenarioInput;

/// Request body for the `/evaluate` endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvaluateRequest {
    /// Overrides the configured tax factor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_factor: Option<Decimal>,
    /// The scenario to evaluate. Missing sections take the form defaults.
    #[serde(default)]
    pub scenario: ScenarioInput,
}

/// Request body for the `/compare` endpoint.
///
/// One tax factor applies to both scenarios.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompareRequest {
    /// Overrides the configured tax factor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_factor: Option<Decimal>,
    /// Scenario A.
    #[serde(default)]
    pub scenario_a: ScenarioInput,
    /// Scenario B.
    #[serde(default)]
    pub scenario_b: ScenarioInput,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_deserialize_compare_request() {
        let json = r#"{
            "tax_factor": "0.42",
            "scenario_a": {
                "parent_1": {
                    "annual_reference_salary": "66000",
                    "leave_days_per_week": "1",
                    "paid_leave_pct": "0.70"
                }
            },
            "scenario_b": {
                "childcare": { "care_days_per_week": 3 }
            }
        }"#;

        let request: CompareRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.tax_factor, Some(Decimal::from_str("0.42").unwrap()));
        assert_eq!(request.scenario_b.childcare.care_days_per_week, 3);
        assert_eq!(request.scenario_a.childcare.care_days_per_week, 2);
    }

    #[test]
    fn test_empty_evaluate_request_uses_defaults() {
        let request: EvaluateRequest = serde_json::from_str("{}").unwrap();
        assert!(request.tax_factor.is_none());
        assert_eq!(request.scenario, ScenarioInput::default());
    }

    #[test]
    fn test_numeric_tax_factor_accepted() {
        let request: EvaluateRequest = serde_json::from_str(r#"{"tax_factor": 0.37}"#).unwrap();
        assert_eq!(request.tax_factor, Some(Decimal::from_str("0.37").unwrap()));
    }
}
