//! End-to-end integration tests for the estimation pipeline.

use pv_estimator::catalog;
use pv_estimator::config::{EngineParams, SiteParameters, SystemInput};
use pv_estimator::estimator::{Estimator, Payback};

/// Build the default estimator used across integration tests.
fn build_default_estimator() -> Estimator {
    Estimator::new(SiteParameters::default(), EngineParams::default())
        .unwrap_or_else(|e| panic!("default estimator should build: {e}"))
}

fn input(panel_type: &str, panel_count: u32, weather: &str, battery_kwh: f32) -> SystemInput {
    SystemInput {
        panel_type: panel_type.to_string(),
        panel_count,
        tariff_per_kwh: 0.25,
        weather: weather.to_string(),
        battery_capacity_kwh: battery_kwh,
    }
}

#[test]
fn scenario_monocrystalline_in_sun_without_battery() {
    let estimator = build_default_estimator();
    let e = estimator
        .evaluate(&input("monocrystalline", 20, "sunny", 0.0))
        .unwrap_or_else(|err| panic!("valid input: {err}"));

    // 20 * 0.4 = 8.0 kWc; 8.0 * 1300 * 0.85 = 8840 kWh
    assert!((e.installed_kwc - 8.0).abs() < 1e-6);
    assert!((e.gross_production_kwh - 8840.0).abs() < 0.01);
    // direct capped by household consumption
    assert!((e.direct_self_consumption_kwh - 8260.0).abs() < 0.01);
    assert!((e.surplus_kwh - 580.0).abs() < 0.01);
    // no battery
    assert_eq!(e.battery_stored_kwh, 0.0);
    assert_eq!(e.battery_discharged_kwh, 0.0);
    // 8260 * 0.25 = 2065; 8.0 * 4000 = 32000; 32000 / 2065 ~= 15.5 years
    assert!((e.annual_savings - 2065.0).abs() < 0.01);
    assert!((e.total_investment - 32000.0).abs() < 0.01);
    let years = e.payback.years().unwrap_or(f32::NAN);
    assert!((years - 15.5).abs() < 0.05);
}

#[test]
fn scenario_cloudy_weather_stretches_payback() {
    let estimator = build_default_estimator();
    let e = estimator
        .evaluate(&input("monocrystalline", 20, "cloudy", 0.0))
        .unwrap_or_else(|err| panic!("valid input: {err}"));

    // 8.0 * 1300 * 0.85 * 0.65 = 5746 kWh, all consumed directly
    assert!((e.gross_production_kwh - 5746.0).abs() < 0.01);
    assert!((e.direct_self_consumption_kwh - 5746.0).abs() < 0.01);
    assert_eq!(e.surplus_kwh, 0.0);
    // 5746 * 0.25 = 1436.5; 32000 / 1436.5 ~= 22.3 years
    assert!((e.annual_savings - 1436.5).abs() < 0.01);
    let years = e.payback.years().unwrap_or(f32::NAN);
    assert!((years - 22.3).abs() < 0.05);
}

#[test]
fn scenario_battery_idle_when_demand_already_saturated() {
    let estimator = build_default_estimator();
    let e = estimator
        .evaluate(&input("polycrystalline", 20, "sunny", 10.0))
        .unwrap_or_else(|err| panic!("valid input: {err}"));

    // 8.0 * 1300 * 0.80 = 8320 kWh; direct = 8260; surplus = 60
    assert!((e.gross_production_kwh - 8320.0).abs() < 0.01);
    assert!((e.direct_self_consumption_kwh - 8260.0).abs() < 0.01);
    assert!((e.surplus_kwh - 60.0).abs() < 0.01);
    // stored = min(60, 0.6 * 10) = 6; demand saturated, nothing discharges
    assert!((e.battery_stored_kwh - 6.0).abs() < 0.001);
    assert_eq!(e.battery_discharged_kwh, 0.0);
    // savings unaffected by the battery, investment is not
    assert!((e.total_self_consumption_kwh - 8260.0).abs() < 0.01);
    assert!((e.annual_savings - 2065.0).abs() < 0.01);
    assert!((e.total_investment - (8.0 * 3500.0 + 10.0 * 800.0)).abs() < 0.01);
}

#[test]
fn surplus_only_exists_once_demand_is_saturated() {
    // Annualized consequence of direct = min(production, consumption):
    // any surplus implies demand is already fully covered, so stored
    // energy has no open demand left to discharge into.
    let site = SiteParameters {
        annual_consumption_kwh: 10000.0,
        ..SiteParameters::default()
    };
    let estimator = Estimator::new(site, EngineParams::default())
        .unwrap_or_else(|e| panic!("site should be valid: {e}"));

    // 30 bifacial panels: 12 kWc * 1300 * 0.9 = 14040 kWh
    let e = estimator
        .evaluate(&input("bifacial", 30, "sunny", 10.0))
        .unwrap_or_else(|err| panic!("valid input: {err}"));
    assert!((e.direct_self_consumption_kwh - 10000.0).abs() < 0.01);
    assert!((e.surplus_kwh - 4040.0).abs() < 0.5);
    assert!((e.battery_stored_kwh - 6.0).abs() < 0.001);
    assert_eq!(e.battery_discharged_kwh, 0.0);

    // Underproduction leaves demand open but no surplus to store
    let e = estimator
        .evaluate(&input("amorphous", 10, "cloudy", 10.0))
        .unwrap_or_else(|err| panic!("valid input: {err}"));
    assert!(e.gross_production_kwh < 10000.0);
    assert_eq!(e.surplus_kwh, 0.0);
    assert_eq!(e.battery_stored_kwh, 0.0);
    assert_eq!(e.battery_discharged_kwh, 0.0);
}

#[test]
fn invariants_hold_across_the_catalog_cross_product() {
    let estimator = build_default_estimator();
    let consumption = estimator.site().annual_consumption_kwh;

    for panel in catalog::PANEL_TYPES {
        for weather in catalog::WEATHER_CONDITIONS {
            for battery in [0.0, 10.0, 20.0] {
                for count in [5, 17, 30] {
                    let e = estimator
                        .evaluate(&input(panel.name, count, weather.name, battery))
                        .unwrap_or_else(|err| panic!("valid input: {err}"));

                    let label = format!(
                        "{} x{count} {} battery={battery}",
                        panel.name, weather.name
                    );
                    assert!(e.direct_self_consumption_kwh >= 0.0, "{label}");
                    assert!(
                        e.direct_self_consumption_kwh <= e.gross_production_kwh + 1e-3,
                        "{label}"
                    );
                    assert!(e.direct_self_consumption_kwh <= consumption + 1e-3, "{label}");
                    assert!(
                        (e.surplus_kwh
                            - (e.gross_production_kwh - e.direct_self_consumption_kwh).max(0.0))
                        .abs()
                            < 1e-2,
                        "{label}"
                    );
                    assert!(e.battery_stored_kwh <= e.surplus_kwh + 1e-3, "{label}");
                    assert!(e.battery_stored_kwh <= 0.6 * battery + 1e-3, "{label}");
                    assert!(e.battery_discharged_kwh >= 0.0, "{label}");
                    assert!(
                        e.battery_discharged_kwh <= e.battery_stored_kwh + 1e-3,
                        "{label}"
                    );
                    assert!(
                        e.total_self_consumption_kwh <= consumption + 1e-2,
                        "{label}"
                    );
                    assert!(e.annual_savings >= 0.0, "{label}");
                    assert!(e.total_investment > 0.0, "{label}");
                    assert!(
                        e.performance_index.is_some(),
                        "{label}: investment is positive, index must be defined"
                    );
                }
            }
        }
    }
}

#[test]
fn production_monotonic_in_panel_count_end_to_end() {
    let estimator = build_default_estimator();
    let mut previous = 0.0;
    for count in 5..=30 {
        let e = estimator
            .evaluate(&input("heterojunction", count, "partly_cloudy", 5.0))
            .unwrap_or_else(|err| panic!("valid input: {err}"));
        assert!(
            e.gross_production_kwh >= previous,
            "production decreased at {count} panels"
        );
        previous = e.gross_production_kwh;
    }
}

#[test]
fn zero_battery_matches_omitting_the_stage() {
    let estimator = build_default_estimator();
    let with_zero = estimator
        .evaluate(&input("monocrystalline", 20, "sunny", 0.0))
        .unwrap_or_else(|err| panic!("valid input: {err}"));

    assert_eq!(with_zero.battery_stored_kwh, 0.0);
    assert_eq!(with_zero.battery_discharged_kwh, 0.0);
    assert_eq!(
        with_zero.total_self_consumption_kwh,
        with_zero.direct_self_consumption_kwh
    );
    // investment carries no battery term
    assert!((with_zero.total_investment - 32000.0).abs() < 0.01);
}

#[test]
fn repeated_evaluation_is_bit_identical() {
    let estimator = build_default_estimator();
    let probe = input("bifacial", 23, "haze", 13.5);
    let a = estimator
        .evaluate(&probe)
        .unwrap_or_else(|err| panic!("valid input: {err}"));
    let b = estimator
        .evaluate(&probe)
        .unwrap_or_else(|err| panic!("valid input: {err}"));
    assert_eq!(a, b);
}

#[test]
fn bounds_behave_without_clamping_surprises() {
    let estimator = build_default_estimator();

    // Minimum panel count follows the same formula as any other count
    let e = estimator
        .evaluate(&input("amorphous", 5, "rain", 0.0))
        .unwrap_or_else(|err| panic!("valid input: {err}"));
    // 5 * 0.4 * 1300 * 0.65 * 0.4 = 676 kWh
    assert!((e.gross_production_kwh - 676.0).abs() < 0.01);

    // Maximum battery capacity is accepted, not clamped
    let e = estimator
        .evaluate(&input("bifacial", 30, "sunny", 20.0))
        .unwrap_or_else(|err| panic!("valid input: {err}"));
    assert!((e.total_investment - (12.0 * 5500.0 + 20.0 * 800.0)).abs() < 0.01);

    // One past either bound is rejected
    assert!(estimator.evaluate(&input("bifacial", 4, "sunny", 0.0)).is_err());
    assert!(estimator.evaluate(&input("bifacial", 31, "sunny", 0.0)).is_err());
    assert!(
        estimator
            .evaluate(&input("bifacial", 20, "sunny", 20.1))
            .is_err()
    );
}

#[test]
fn unbounded_payback_surfaces_as_sentinel_not_error() {
    // Zero savings cannot be reached through validated input (production
    // and tariff are strictly positive), so exercise the sentinel at the
    // financial stage the way a zero-yield configuration would.
    use pv_estimator::estimator::financial::compute_financials;

    let panel = catalog::panel_type("monocrystalline")
        .unwrap_or_else(|| panic!("catalog entry"));
    let fin = compute_financials(0.0, 0.25, 8.0, panel, 0.0, &EngineParams::default());
    assert_eq!(fin.annual_savings, 0.0);
    assert_eq!(fin.payback, Payback::Unbounded);
    assert!(fin.payback.years().is_none());
}
