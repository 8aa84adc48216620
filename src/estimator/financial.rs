//! Savings, investment, payback, and classification.

use crate::catalog::PanelType;
use crate::config::EngineParams;
use crate::estimator::types::{Payback, PaybackClass};

/// Monetary outcome of the financial stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Financials {
    /// Annual savings from self-consumed energy.
    pub annual_savings: f32,
    /// Total investment: panels plus battery.
    pub total_investment: f32,
    /// Payback period, finite or unbounded.
    pub payback: Payback,
}

/// Computes savings, total investment, and the payback period.
///
/// `savings = total self-consumption * tariff`;
/// `investment = installed_kwc * panel cost + capacity * battery cost`.
/// Zero savings yields [`Payback::Unbounded`] rather than a division
/// fault.
pub fn compute_financials(
    total_self_consumption_kwh: f32,
    tariff_per_kwh: f32,
    installed_kwc: f32,
    panel: &PanelType,
    battery_capacity_kwh: f32,
    params: &EngineParams,
) -> Financials {
    let annual_savings = total_self_consumption_kwh * tariff_per_kwh;
    let total_investment =
        installed_kwc * panel.cost_per_kwc + battery_capacity_kwh * params.battery_cost_per_kwh;

    let payback = if annual_savings > 0.0 {
        Payback::Years(total_investment / annual_savings)
    } else {
        Payback::Unbounded
    };

    Financials {
        annual_savings,
        total_investment,
        payback,
    }
}

/// Production yield per 1000 currency units invested.
///
/// `None` when the investment is not positive; validated input always
/// carries a positive investment.
pub fn performance_index(gross_production_kwh: f32, total_investment: f32) -> Option<f32> {
    if total_investment > 0.0 {
        Some(gross_production_kwh / total_investment * 1000.0)
    } else {
        None
    }
}

/// Classifies a payback period against the configured thresholds.
///
/// Strict comparisons: below the excellent bound is `Excellent`, below the
/// good bound is `Good`, everything else (including an unbounded payback)
/// is `Poor`.
pub fn classify_payback(payback: Payback, params: &EngineParams) -> PaybackClass {
    let years = payback.years_or_inf();
    if years < params.payback_excellent_below_years {
        PaybackClass::Excellent
    } else if years < params.payback_good_below_years {
        PaybackClass::Good
    } else {
        PaybackClass::Poor
    }
}
