//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::AppState;
use super::types::{CatalogResponse, ErrorResponse, EstimateResponse};
use crate::catalog;
use crate::config::SystemInput;
use crate::estimator::financial::classify_payback;
use crate::estimator::report;

/// Evaluates a system input into a full estimate.
///
/// `POST /estimate` + `SystemInput` JSON → 200 + `EstimateResponse` JSON
/// Invalid input → 400 + `ErrorResponse`
pub async fn post_estimate(
    State(state): State<Arc<AppState>>,
    Json(input): Json<SystemInput>,
) -> impl IntoResponse {
    let estimate = match state.estimator.evaluate(&input) {
        Ok(estimate) => estimate,
        Err(e) => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            ));
        }
    };

    let site = state.estimator.site();
    let class = classify_payback(estimate.payback, state.estimator.params());

    Ok(Json(EstimateResponse {
        payback_class: class,
        advisory: report::advisory(class),
        production_vs_consumption: report::production_vs_consumption(&estimate, site).to_vec(),
        coverage_breakdown: report::coverage_breakdown(&estimate, site).to_vec(),
        estimate,
    }))
}

/// Returns both reference catalogs.
///
/// `GET /catalog` → 200 + `CatalogResponse` JSON
pub async fn get_catalog(State(_state): State<Arc<AppState>>) -> Json<CatalogResponse> {
    Json(CatalogResponse {
        panel_types: catalog::PANEL_TYPES,
        weather_conditions: catalog::WEATHER_CONDITIONS,
    })
}
