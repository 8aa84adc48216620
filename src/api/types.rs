//! API response types.

use serde::Serialize;

use crate::catalog::{PanelType, WeatherCondition};
use crate::estimator::report::SeriesPoint;
use crate::estimator::types::{Estimate, PaybackClass};

/// Full evaluation response: the estimate, its classification, the
/// advisory line, and both chart series.
#[derive(Debug, Serialize)]
pub struct EstimateResponse {
    /// The derived estimate, full precision.
    pub estimate: Estimate,
    /// Payback quality label.
    pub payback_class: PaybackClass,
    /// Advisory line matching the classification tone.
    pub advisory: &'static str,
    /// Production-versus-consumption chart series.
    pub production_vs_consumption: Vec<SeriesPoint>,
    /// Household-coverage chart series (direct / battery / grid).
    pub coverage_breakdown: Vec<SeriesPoint>,
}

/// Catalog response for populating UI selectors.
#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    /// Available panel technologies.
    pub panel_types: &'static [PanelType],
    /// Available weather conditions.
    pub weather_conditions: &'static [WeatherCondition],
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
