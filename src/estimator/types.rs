//! Core estimator types: the result record, the payback sentinel, and the
//! payback classification.

use std::fmt;

use serde::Serialize;

/// Payback period of the investment.
///
/// Zero savings is a legitimate input, not a numeric fault: it yields
/// `Unbounded` rather than a division error or a float infinity leaking
/// through the public type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Payback {
    /// Finite payback period in years.
    Years(f32),
    /// Savings are zero; the investment never pays for itself.
    Unbounded,
}

impl Payback {
    /// Finite years, or `None` when unbounded.
    pub fn years(&self) -> Option<f32> {
        match self {
            Self::Years(y) => Some(*y),
            Self::Unbounded => None,
        }
    }

    /// Years as a float, `f32::INFINITY` when unbounded. Display and
    /// threshold comparisons only; the enum stays the source of truth.
    pub fn years_or_inf(&self) -> f32 {
        match self {
            Self::Years(y) => *y,
            Self::Unbounded => f32::INFINITY,
        }
    }
}

impl fmt::Display for Payback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Years(y) => write!(f, "{y:.1} years"),
            Self::Unbounded => write!(f, "unbounded"),
        }
    }
}

/// Three-way quality label for the payback period, consumed by the
/// presentation layer to choose a message tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaybackClass {
    Excellent,
    Good,
    Poor,
}

/// Complete annualized estimate for one system input.
///
/// Computed once, synchronously, and immutable afterwards. All energy
/// values are kWh/year; monetary values are in the tariff's currency.
/// Full precision is kept internally; rounding happens only in
/// [`Display`](fmt::Display) and other presentation surfaces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Estimate {
    /// Installed nameplate capacity (kWc).
    pub installed_kwc: f32,
    /// Gross annual production (kWh).
    pub gross_production_kwh: f32,
    /// Production consumed on-site as it is produced (kWh).
    pub direct_self_consumption_kwh: f32,
    /// Production exceeding immediate on-site demand (kWh).
    pub surplus_kwh: f32,
    /// Surplus captured by the battery (kWh).
    pub battery_stored_kwh: f32,
    /// Battery energy covering otherwise-uncovered demand (kWh).
    pub battery_discharged_kwh: f32,
    /// Direct plus battery-assisted self-consumption (kWh).
    pub total_self_consumption_kwh: f32,
    /// Annual savings from self-consumed energy.
    pub annual_savings: f32,
    /// Total investment: panels plus battery.
    pub total_investment: f32,
    /// Payback period, finite or unbounded.
    pub payback: Payback,
    /// Production yield per 1000 currency units invested, when defined.
    pub performance_index: Option<f32>,
}

impl fmt::Display for Estimate {
    /// Display rounding: one decimal for capacity, payback, and the
    /// performance index; whole numbers for energy and currency.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- PV estimate ---")?;
        writeln!(f, "Installed capacity:      {:.1} kWc", self.installed_kwc)?;
        writeln!(
            f,
            "Annual production:       {:.0} kWh",
            self.gross_production_kwh
        )?;
        writeln!(
            f,
            "Direct self-consumption: {:.0} kWh",
            self.direct_self_consumption_kwh
        )?;
        writeln!(f, "Surplus:                 {:.0} kWh", self.surplus_kwh)?;
        writeln!(
            f,
            "Battery stored:          {:.0} kWh",
            self.battery_stored_kwh
        )?;
        writeln!(
            f,
            "Battery discharged:      {:.0} kWh",
            self.battery_discharged_kwh
        )?;
        writeln!(
            f,
            "Total self-consumption:  {:.0} kWh",
            self.total_self_consumption_kwh
        )?;
        writeln!(f, "Annual savings:          {:.0} EUR", self.annual_savings)?;
        writeln!(
            f,
            "Total investment:        {:.0} EUR",
            self.total_investment
        )?;
        write!(f, "Payback:                 {}", self.payback)?;
        if let Some(pi) = self.performance_index {
            write!(f, "\nPerformance index:       {pi:.1} kWh per 1000 EUR")?;
        }
        Ok(())
    }
}
