//! Presentation-facing derivations: chart series and advisory text.
//!
//! The engine computes the values; rendering (charts, styling, message
//! tone) belongs to the external presentation layer.

use serde::Serialize;

use crate::config::SiteParameters;
use crate::estimator::types::{Estimate, PaybackClass};

/// One labeled value of a chart series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    /// Series label.
    pub label: &'static str,
    /// Value in kWh/year.
    pub value_kwh: f32,
}

/// Production-versus-consumption series for a two-bar comparison chart.
pub fn production_vs_consumption(estimate: &Estimate, site: &SiteParameters) -> [SeriesPoint; 2] {
    [
        SeriesPoint {
            label: "Production",
            value_kwh: estimate.gross_production_kwh,
        },
        SeriesPoint {
            label: "Consumption",
            value_kwh: site.annual_consumption_kwh,
        },
    ]
}

/// Household-coverage breakdown for a share chart: how much demand is met
/// directly, from the battery, and from the grid.
pub fn coverage_breakdown(estimate: &Estimate, site: &SiteParameters) -> [SeriesPoint; 3] {
    let grid_kwh =
        (site.annual_consumption_kwh - estimate.total_self_consumption_kwh).max(0.0);
    [
        SeriesPoint {
            label: "Direct",
            value_kwh: estimate.direct_self_consumption_kwh,
        },
        SeriesPoint {
            label: "Battery",
            value_kwh: estimate.battery_discharged_kwh,
        },
        SeriesPoint {
            label: "Grid",
            value_kwh: grid_kwh,
        },
    ]
}

/// Advisory line matching the payback classification's message tone.
pub fn advisory(class: PaybackClass) -> &'static str {
    match class {
        PaybackClass::Excellent => "Excellent yield: the installation pays for itself quickly.",
        PaybackClass::Good => "Reasonable payback. Sizing could still be tuned.",
        PaybackClass::Poor => {
            "Long payback. Consider another panel technology or fewer panels."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EngineParams, SystemInput};
    use crate::estimator::Estimator;

    fn make_estimate(input: &SystemInput) -> (Estimate, SiteParameters) {
        let site = SiteParameters::default();
        let estimator = Estimator::new(site.clone(), EngineParams::default())
            .expect("defaults are valid");
        let estimate = estimator.evaluate(input).expect("valid input");
        (estimate, site)
    }

    #[test]
    fn production_series_pairs_production_with_consumption() {
        let (estimate, site) = make_estimate(&SystemInput::default());
        let series = production_vs_consumption(&estimate, &site);
        assert_eq!(series[0].label, "Production");
        assert_eq!(series[0].value_kwh, estimate.gross_production_kwh);
        assert_eq!(series[1].label, "Consumption");
        assert_eq!(series[1].value_kwh, 8260.0);
    }

    #[test]
    fn coverage_breakdown_sums_to_consumption_when_underproducing() {
        let input = SystemInput {
            panel_count: 5,
            weather: "rain".to_string(),
            battery_capacity_kwh: 0.0,
            ..SystemInput::default()
        };
        let (estimate, site) = make_estimate(&input);
        let series = coverage_breakdown(&estimate, &site);
        let total: f32 = series.iter().map(|p| p.value_kwh).sum();
        assert!((total - site.annual_consumption_kwh).abs() < 1e-2);
    }

    #[test]
    fn coverage_grid_share_is_zero_when_demand_saturated() {
        let input = SystemInput {
            panel_count: 30,
            panel_type: "bifacial".to_string(),
            ..SystemInput::default()
        };
        let (estimate, site) = make_estimate(&input);
        let series = coverage_breakdown(&estimate, &site);
        assert_eq!(series[2].label, "Grid");
        assert_eq!(series[2].value_kwh, 0.0);
    }

    #[test]
    fn coverage_shares_are_never_negative() {
        let (estimate, site) = make_estimate(&SystemInput::default());
        for point in coverage_breakdown(&estimate, &site) {
            assert!(point.value_kwh >= 0.0, "{} share negative", point.label);
        }
    }

    #[test]
    fn advisory_tone_matches_class() {
        assert!(advisory(PaybackClass::Excellent).contains("Excellent"));
        assert!(advisory(PaybackClass::Good).contains("Reasonable"));
        assert!(advisory(PaybackClass::Poor).contains("Long payback"));
    }
}
