//! Response types for the childcare cost engine API.
//!
//! This module defines the report envelopes returned by the endpoints and
//! the mapping from engine errors to HTTP error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{BracketNeighbors, ComparisonResult, IncomeBand, ScenarioResult};

/// Response body of `/evaluate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioReport {
    /// Unique identifier of this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// Version of the engine that produced the report.
    pub engine_version: String,
    /// Tax factor the scenario was evaluated with.
    pub tax_factor: Decimal,
    /// The evaluated scenario.
    pub result: ScenarioResult,
    /// The bracket of the adjusted income and its neighbours, if any.
    pub bracket_info: Option<BracketNeighbors>,
}

/// Response body of `/compare`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// Unique identifier of this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// Version of the engine that produced the report.
    pub engine_version: String,
    /// Tax factor both scenarios were evaluated with.
    pub tax_factor: Decimal,
    /// Both scenarios, their difference and the verdict.
    pub comparison: ComparisonResult,
    /// The bracket of scenario A's adjusted income and its neighbours, if any.
    pub bracket_info: Option<BracketNeighbors>,
}

/// Response body of `/brackets`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BracketTableResponse {
    /// Name of the subsidy table.
    pub name: String,
    /// Year the table applies to.
    pub year: u16,
    /// Income bands in ascending order.
    pub bands: Vec<IncomeBand>,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::InvalidInput { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "VALIDATION_ERROR",
                    format!("Invalid input '{}': {}", field, message),
                    field,
                ),
            },
            EngineError::DataLoad(err) => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "DATA_LOAD_ERROR",
                    "Income bracket table could not be loaded",
                    err.to_string(),
                ),
            },
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DataLoadError;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_invalid_input_maps_to_bad_request() {
        let engine_error = EngineError::InvalidInput {
            field: "scenario.parent_1.leave_days_per_week".to_string(),
            message: "must be between 0 and 5, got 6".to_string(),
        };
        let api_error: ApiErrorResponse = engine_error.into();

        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "VALIDATION_ERROR");
        assert!(api_error.error.message.contains("must be between 0 and 5"));
        assert_eq!(
            api_error.error.details.as_deref(),
            Some("scenario.parent_1.leave_days_per_week")
        );
    }

    #[test]
    fn test_data_load_error_maps_to_server_error() {
        let engine_error: EngineError = DataLoadError::EmptyTable {
            path: "toeslagtabel.csv".to_string(),
        }
        .into();
        let api_error: ApiErrorResponse = engine_error.into();

        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "DATA_LOAD_ERROR");
        assert!(
            api_error
                .error
                .details
                .unwrap()
                .contains("toeslagtabel.csv")
        );
    }
}
