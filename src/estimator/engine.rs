//! The evaluation entry point composing the four estimation stages.

use crate::catalog;
use crate::config::{ConfigError, EngineParams, EstimateConfig, SiteParameters, SystemInput};
use crate::estimator::consumption::{charge_battery, split_self_consumption};
use crate::estimator::financial::{compute_financials, performance_index};
use crate::estimator::production::compute_production;
use crate::estimator::types::Estimate;

/// The estimator: immutable deployment configuration plus a pure
/// [`evaluate`](Estimator::evaluate) mapping one input to one estimate.
///
/// Holds no mutable state and performs no I/O; concurrent evaluations
/// need no coordination.
#[derive(Debug, Clone)]
pub struct Estimator {
    site: SiteParameters,
    params: EngineParams,
}

impl Estimator {
    /// Creates an estimator for the given site and engine parameters.
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError` if either section is invalid.
    pub fn new(site: SiteParameters, params: EngineParams) -> Result<Self, ConfigError> {
        let mut errors = site.validate();
        errors.extend(params.validate());
        match errors.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(Self { site, params }),
        }
    }

    /// Site constants this estimator was built with.
    pub fn site(&self) -> &SiteParameters {
        &self.site
    }

    /// Engine parameters this estimator was built with.
    pub fn params(&self) -> &EngineParams {
        &self.params
    }

    /// Evaluates one system input into a complete estimate.
    ///
    /// Validation is eager: catalog names and bounds are checked before any
    /// arithmetic, and a violation terminates the evaluation with no
    /// partial result. The computation itself is the four-stage pipeline:
    /// production, self-consumption split, battery contribution, financials.
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError` for an unknown catalog name or an
    /// out-of-range value.
    pub fn evaluate(&self, input: &SystemInput) -> Result<Estimate, ConfigError> {
        if let Some(err) = input.validate().into_iter().next() {
            return Err(err);
        }

        // Names are known-good once validation has passed
        let panel = catalog::panel_type(&input.panel_type).ok_or_else(|| ConfigError {
            field: "system.panel_type".into(),
            message: format!("unknown panel type \"{}\"", input.panel_type),
        })?;
        let weather = catalog::weather_condition(&input.weather).ok_or_else(|| ConfigError {
            field: "system.weather".into(),
            message: format!("unknown weather condition \"{}\"", input.weather),
        })?;

        let production = compute_production(
            input.panel_count,
            panel,
            weather,
            &self.site,
            self.params.panel_unit_kwc,
        );
        let split = split_self_consumption(production.gross_production_kwh, &self.site);
        let battery = charge_battery(
            split.surplus_kwh,
            input.battery_capacity_kwh,
            split.direct_kwh,
            &self.site,
            self.params.battery_conversion_factor,
        );
        let total_self_consumption_kwh = split.direct_kwh + battery.discharged_kwh;
        let financials = compute_financials(
            total_self_consumption_kwh,
            input.tariff_per_kwh,
            production.installed_kwc,
            panel,
            input.battery_capacity_kwh,
            &self.params,
        );

        Ok(Estimate {
            installed_kwc: production.installed_kwc,
            gross_production_kwh: production.gross_production_kwh,
            direct_self_consumption_kwh: split.direct_kwh,
            surplus_kwh: split.surplus_kwh,
            battery_stored_kwh: battery.stored_kwh,
            battery_discharged_kwh: battery.discharged_kwh,
            total_self_consumption_kwh,
            annual_savings: financials.annual_savings,
            total_investment: financials.total_investment,
            payback: financials.payback,
            performance_index: performance_index(
                production.gross_production_kwh,
                financials.total_investment,
            ),
        })
    }
}

/// Evaluates a complete configuration in one call: builds the estimator
/// from the site and engine sections, then evaluates the system input.
///
/// # Errors
///
/// Returns the first `ConfigError` from any section.
pub fn evaluate(config: &EstimateConfig) -> Result<Estimate, ConfigError> {
    let estimator = Estimator::new(config.site.clone(), config.engine.clone())?;
    estimator.evaluate(&config.system)
}
