//! HTTP request handlers for the childcare cost engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{compare_within, evaluate_scenario, resolve_with_neighbors};
use crate::error::EngineResult;
use crate::models::validate_tax_factor;

use super::request::{CompareRequest, EvaluateRequest};
use super::response::{
    ApiError, ApiErrorResponse, BracketTableResponse, ComparisonReport, ScenarioReport,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/evaluate", post(evaluate_handler))
        .route("/compare", post(compare_handler))
        .route("/brackets", get(brackets_handler))
        .with_state(state)
}

/// Handler for POST /evaluate.
async fn evaluate_handler(
    State(state): State<AppState>,
    payload: Result<Json<EvaluateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing evaluate request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = rejection_error(rejection, correlation_id);
            return json_error(StatusCode::BAD_REQUEST, error);
        }
    };

    let config = state.config();
    let tax_factor = request.tax_factor.unwrap_or_else(|| config.tax_factor());

    let validation =
        validate_tax_factor(tax_factor).and_then(|()| request.scenario.validate("scenario"));
    if let Err(err) = validation {
        return engine_error(err, correlation_id);
    }

    let start_time = Instant::now();
    let result = evaluate_scenario(&request.scenario, config.brackets(), tax_factor);
    let bracket_info = resolve_with_neighbors(config.brackets(), result.adjusted_household_income);

    info!(
        correlation_id = %correlation_id,
        adjusted_income = %result.adjusted_household_income.round_dp(2),
        subsidy_pct = %result.subsidy_pct,
        total_monthly_cost = %result.total_monthly_cost.round_dp(2),
        duration_us = start_time.elapsed().as_micros(),
        "Scenario evaluated"
    );

    json_ok(ScenarioReport {
        calculation_id: correlation_id,
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        tax_factor,
        result,
        bracket_info,
    })
}

/// Handler for POST /compare.
async fn compare_handler(
    State(state): State<AppState>,
    payload: Result<Json<CompareRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing compare request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = rejection_error(rejection, correlation_id);
            return json_error(StatusCode::BAD_REQUEST, error);
        }
    };

    let config = state.config();
    let tax_factor = request.tax_factor.unwrap_or_else(|| config.tax_factor());

    if let Err(err) = validate_compare(&request, tax_factor) {
        return engine_error(err, correlation_id);
    }

    let start_time = Instant::now();
    let scenario_a = evaluate_scenario(&request.scenario_a, config.brackets(), tax_factor);
    let scenario_b = evaluate_scenario(&request.scenario_b, config.brackets(), tax_factor);
    let bracket_info =
        resolve_with_neighbors(config.brackets(), scenario_a.adjusted_household_income);
    let comparison = compare_within(scenario_a, scenario_b, config.equality_tolerance());

    info!(
        correlation_id = %correlation_id,
        total_a = %comparison.scenario_a.total_monthly_cost.round_dp(2),
        total_b = %comparison.scenario_b.total_monthly_cost.round_dp(2),
        difference = %comparison.difference.round_dp(2),
        verdict = ?comparison.verdict,
        duration_us = start_time.elapsed().as_micros(),
        "Scenarios compared"
    );

    json_ok(ComparisonReport {
        calculation_id: correlation_id,
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        tax_factor,
        comparison,
        bracket_info,
    })
}

/// Handler for GET /brackets.
async fn brackets_handler(State(state): State<AppState>) -> Response {
    let config = state.config();
    json_ok(BracketTableResponse {
        name: config.settings().name.clone(),
        year: config.settings().year,
        bands: config.brackets().bands().to_vec(),
    })
}

fn validate_compare(request: &CompareRequest, tax_factor: Decimal) -> EngineResult<()> {
    validate_tax_factor(tax_factor)?;
    request.scenario_a.validate("scenario_a")?;
    request.scenario_b.validate("scenario_b")
}

/// Maps a JSON extraction failure onto an API error.
fn rejection_error(rejection: JsonRejection, correlation_id: Uuid) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    }
}

fn engine_error(err: crate::error::EngineError, correlation_id: Uuid) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request rejected"
    );
    let api_error: ApiErrorResponse = err.into();
    json_error(api_error.status, api_error.error)
}

fn json_error(status: StatusCode, error: ApiError) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error),
    )
        .into_response()
}

fn json_ok<T: Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}
