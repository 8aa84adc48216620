//! Installed capacity and gross annual production.

use crate::catalog::{PanelType, WeatherCondition};
use crate::config::SiteParameters;

/// Capacity and production outcome of the first stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Production {
    /// Installed nameplate capacity (kWc).
    pub installed_kwc: f32,
    /// Gross annual production (kWh).
    pub gross_production_kwh: f32,
}

/// Computes installed capacity and gross annual production.
///
/// `installed_kwc = panel_count * panel_unit_kwc`;
/// `gross = installed * irradiation * efficiency * weather factor`.
///
/// A single annualized figure: no time dimension, no randomness. Inputs
/// are validated upstream (catalog membership, panel-count bounds), so
/// this stage is pure arithmetic.
pub fn compute_production(
    panel_count: u32,
    panel: &PanelType,
    weather: &WeatherCondition,
    site: &SiteParameters,
    panel_unit_kwc: f32,
) -> Production {
    let installed_kwc = panel_count as f32 * panel_unit_kwc;
    let gross_production_kwh = installed_kwc
        * site.annual_irradiation_kwh_per_kwc
        * panel.efficiency
        * weather.factor;

    Production {
        installed_kwc,
        gross_production_kwh,
    }
}
