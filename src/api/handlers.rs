//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use super::AppState;
use super::types::{ErrorResponse, MonthlyQuery};

/// `GET /sizing` → 200 + `PlantSizingResult` JSON
pub async fn get_sizing(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.sizing.clone())
}

/// Returns the monthly series, or a single month when `?month=N` is given.
///
/// `GET /monthly` → 200 + `Vec<MonthlyMetrics>` JSON
/// `GET /monthly?month=3` → 200 + March as a single `MonthlyMetrics`
/// `GET /monthly?month=13` → 400 + `ErrorResponse`
pub async fn get_monthly(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MonthlyQuery>,
) -> Response {
    let Some(month) = query.month else {
        return Json(state.monthly.clone()).into_response();
    };

    match month.checked_sub(1).and_then(|i| state.monthly.get(i)) {
        Some(m) => Json(m.clone()).into_response(),
        None => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("`month` must be in 1..={}, got {month}", state.monthly.len()),
            }),
        )
            .into_response(),
    }
}

/// `GET /summary` → 200 + `AnnualSummary` JSON
pub async fn get_summary(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.summary.clone())
}
