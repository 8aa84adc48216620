//! Self-consumption split and battery-assisted coverage.

use crate::config::SiteParameters;

/// Direct self-consumption and surplus split of gross production.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelfConsumption {
    /// Production consumed on-site as it is produced (kWh).
    pub direct_kwh: f32,
    /// Production exceeding immediate on-site demand (kWh).
    pub surplus_kwh: f32,
}

/// Splits gross production into direct self-consumption and surplus.
///
/// `direct = min(gross, annual consumption)`; everything above the
/// consumption ceiling becomes surplus. Monotonic in `gross_production_kwh`.
pub fn split_self_consumption(
    gross_production_kwh: f32,
    site: &SiteParameters,
) -> SelfConsumption {
    let direct_kwh = gross_production_kwh.min(site.annual_consumption_kwh);
    let surplus_kwh = (gross_production_kwh - direct_kwh).max(0.0);

    SelfConsumption {
        direct_kwh,
        surplus_kwh,
    }
}

/// Annual energy captured and released by the battery.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatteryFlow {
    /// Surplus captured by the battery (kWh).
    pub stored_kwh: f32,
    /// Battery energy covering otherwise-uncovered demand (kWh).
    pub discharged_kwh: f32,
}

/// Computes the battery's annual contribution.
///
/// `stored = min(surplus, conversion_factor * capacity)`: the conversion
/// factor folds round-trip losses and usable-capacity limits into a single
/// annualized fraction. `discharged = min(stored, consumption - direct)`:
/// the battery never covers more than the demand direct production left
/// open. A zero capacity makes the whole stage a no-op.
///
/// Static annual approximation: when surplus occurs versus when it is
/// needed is deliberately ignored.
pub fn charge_battery(
    surplus_kwh: f32,
    battery_capacity_kwh: f32,
    direct_kwh: f32,
    site: &SiteParameters,
    conversion_factor: f32,
) -> BatteryFlow {
    if battery_capacity_kwh <= 0.0 {
        return BatteryFlow {
            stored_kwh: 0.0,
            discharged_kwh: 0.0,
        };
    }

    let stored_kwh = surplus_kwh.min(conversion_factor * battery_capacity_kwh);
    let uncovered_kwh = (site.annual_consumption_kwh - direct_kwh).max(0.0);
    let discharged_kwh = stored_kwh.min(uncovered_kwh);

    BatteryFlow {
        stored_kwh,
        discharged_kwh,
    }
}
