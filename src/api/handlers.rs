//! HTTP request handlers for the Time & Attendance Variance Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::ReportSettings;
use crate::error::{EngineError, EngineResult};
use crate::models::ReconciliationWindow;

use super::request::{VarianceRequest, WindowRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/variance", post(variance_handler))
        .with_state(state)
}

/// Handler for POST /variance endpoint.
///
/// Accepts a window with its shifts and punches and returns the variance report.
async fn variance_handler(
    State(state): State<AppState>,
    payload: Result<Json<VarianceRequest>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing variance request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
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
            };
            return json_response(StatusCode::BAD_REQUEST, error);
        }
    };

    let window = match validate_window(request.window, state.config().report()) {
        Ok(window) => window,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Rejected reconciliation window"
            );
            let api_error: ApiErrorResponse = err.into();
            return json_response(api_error.status, api_error.error);
        }
    };

    let start_time = Instant::now();
    let directory = request.directory();
    let report = state
        .engine()
        .reconcile(&window, &request.shifts, &request.punches, &directory);

    info!(
        correlation_id = %correlation_id,
        report_id = %report.report_id,
        shifts_count = request.shifts.len(),
        punches_count = request.punches.len(),
        rows_count = report.rows.len(),
        skipped_count = report.warnings.len(),
        variance_minutes = report.totals.variance_minutes,
        duration_us = start_time.elapsed().as_micros(),
        "Variance report completed"
    );

    json_response(StatusCode::OK, report)
}

/// Converts the requested bounds into a window and enforces the configured
/// maximum length.
fn validate_window(
    request: WindowRequest,
    settings: &ReportSettings,
) -> EngineResult<ReconciliationWindow> {
    let window = ReconciliationWindow::try_from(request)?;

    let days = window.length_days();
    if days > i64::from(settings.max_window_days) {
        return Err(EngineError::WindowTooLong {
            days,
            max_days: settings.max_window_days,
        });
    }

    Ok(window)
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}
