//! TOML-based estimate configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::catalog;

/// Lowest accepted panel count.
pub const PANEL_COUNT_MIN: u32 = 5;
/// Highest accepted panel count.
pub const PANEL_COUNT_MAX: u32 = 30;
/// Lowest accepted electricity tariff (currency per kWh).
pub const TARIFF_MIN: f32 = 0.10;
/// Highest accepted electricity tariff (currency per kWh).
pub const TARIFF_MAX: f32 = 0.50;
/// Highest accepted battery capacity (kWh); zero means no battery.
pub const BATTERY_CAPACITY_MAX_KWH: f32 = 20.0;

/// Top-level estimate configuration parsed from TOML.
///
/// All fields have defaults matching the baseline preset. Load from TOML
/// with [`EstimateConfig::from_toml_file`] or use
/// [`EstimateConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EstimateConfig {
    /// Deployment-site constants.
    #[serde(default)]
    pub site: SiteParameters,
    /// Engine constants and classification thresholds.
    #[serde(default)]
    pub engine: EngineParams,
    /// The installation being estimated.
    #[serde(default)]
    pub system: SystemInput,
}

/// Constants of the deployment site.
///
/// The defaults describe the reference location the estimator is
/// calibrated for; other sites supply their own values.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteParameters {
    /// Annual irradiation yield (kWh per installed kWc per year).
    pub annual_irradiation_kwh_per_kwc: f32,
    /// Annual household consumption (kWh/year).
    pub annual_consumption_kwh: f32,
}

impl Default for SiteParameters {
    fn default() -> Self {
        Self {
            annual_irradiation_kwh_per_kwc: 1300.0,
            annual_consumption_kwh: 8260.0,
        }
    }
}

/// Engine constants: per-panel rating, battery model, payback thresholds.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineParams {
    /// Nameplate rating of a single panel (kWc).
    pub panel_unit_kwc: f32,
    /// Fraction of nameplate battery capacity usable against surplus (0.0-1.0).
    pub battery_conversion_factor: f32,
    /// Battery cost per kWh of capacity.
    pub battery_cost_per_kwh: f32,
    /// Payback below this many years classifies as excellent (strict `<`).
    pub payback_excellent_below_years: f32,
    /// Payback below this many years classifies as good (strict `<`).
    pub payback_good_below_years: f32,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            panel_unit_kwc: 0.4,
            battery_conversion_factor: 0.6,
            battery_cost_per_kwh: 800.0,
            payback_excellent_below_years: 8.0,
            payback_good_below_years: 12.0,
        }
    }
}

/// Caller-supplied description of the installation to estimate.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SystemInput {
    /// Panel technology, one of the catalog names.
    pub panel_type: String,
    /// Number of installed panels.
    pub panel_count: u32,
    /// Electricity tariff (currency per kWh).
    pub tariff_per_kwh: f32,
    /// Weather condition, one of the catalog names.
    pub weather: String,
    /// Battery capacity (kWh); 0 means no battery.
    pub battery_capacity_kwh: f32,
}

impl Default for SystemInput {
    fn default() -> Self {
        Self {
            panel_type: "monocrystalline".to_string(),
            panel_count: 20,
            tariff_per_kwh: 0.25,
            weather: "sunny".to_string(),
            battery_capacity_kwh: 10.0,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"system.panel_count"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {} — {}", self.field, self.message)
    }
}

impl SiteParameters {
    /// Validates site constants and returns a list of errors.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.annual_irradiation_kwh_per_kwc <= 0.0 {
            errors.push(ConfigError {
                field: "site.annual_irradiation_kwh_per_kwc".into(),
                message: "must be > 0".into(),
            });
        }
        if self.annual_consumption_kwh <= 0.0 {
            errors.push(ConfigError {
                field: "site.annual_consumption_kwh".into(),
                message: "must be > 0".into(),
            });
        }
        errors
    }
}

impl EngineParams {
    /// Validates engine constants and returns a list of errors.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.panel_unit_kwc <= 0.0 {
            errors.push(ConfigError {
                field: "engine.panel_unit_kwc".into(),
                message: "must be > 0".into(),
            });
        }
        if !(0.0..=1.0).contains(&self.battery_conversion_factor) {
            errors.push(ConfigError {
                field: "engine.battery_conversion_factor".into(),
                message: "must be in [0.0, 1.0]".into(),
            });
        }
        if self.battery_cost_per_kwh < 0.0 {
            errors.push(ConfigError {
                field: "engine.battery_cost_per_kwh".into(),
                message: "must be >= 0".into(),
            });
        }
        if self.payback_excellent_below_years <= 0.0 {
            errors.push(ConfigError {
                field: "engine.payback_excellent_below_years".into(),
                message: "must be > 0".into(),
            });
        }
        if self.payback_good_below_years <= self.payback_excellent_below_years {
            errors.push(ConfigError {
                field: "engine.payback_good_below_years".into(),
                message: "must be > engine.payback_excellent_below_years".into(),
            });
        }
        errors
    }
}

impl SystemInput {
    /// Validates the input against catalogs and bounds, returning every
    /// violation. An empty vector means the input is safe to evaluate.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if catalog::panel_type(&self.panel_type).is_none() {
            errors.push(ConfigError {
                field: "system.panel_type".into(),
                message: format!(
                    "unknown panel type \"{}\", available: {}",
                    self.panel_type,
                    catalog::panel_type_names()
                ),
            });
        }
        if catalog::weather_condition(&self.weather).is_none() {
            errors.push(ConfigError {
                field: "system.weather".into(),
                message: format!(
                    "unknown weather condition \"{}\", available: {}",
                    self.weather,
                    catalog::weather_condition_names()
                ),
            });
        }
        if !(PANEL_COUNT_MIN..=PANEL_COUNT_MAX).contains(&self.panel_count) {
            errors.push(ConfigError {
                field: "system.panel_count".into(),
                message: format!(
                    "must be in [{PANEL_COUNT_MIN}, {PANEL_COUNT_MAX}], got {}",
                    self.panel_count
                ),
            });
        }
        if !(TARIFF_MIN..=TARIFF_MAX).contains(&self.tariff_per_kwh) {
            errors.push(ConfigError {
                field: "system.tariff_per_kwh".into(),
                message: format!(
                    "must be in [{TARIFF_MIN}, {TARIFF_MAX}], got {}",
                    self.tariff_per_kwh
                ),
            });
        }
        if !(0.0..=BATTERY_CAPACITY_MAX_KWH).contains(&self.battery_capacity_kwh) {
            errors.push(ConfigError {
                field: "system.battery_capacity_kwh".into(),
                message: format!(
                    "must be in [0, {BATTERY_CAPACITY_MAX_KWH}], got {}",
                    self.battery_capacity_kwh
                ),
            });
        }

        errors
    }
}

impl EstimateConfig {
    /// Returns the baseline configuration: monocrystalline, 20 panels,
    /// sunny, 0.25/kWh, 10 kWh battery.
    pub fn baseline() -> Self {
        Self {
            site: SiteParameters::default(),
            engine: EngineParams::default(),
            system: SystemInput::default(),
        }
    }

    /// Returns the no-battery preset: baseline without storage.
    pub fn no_battery() -> Self {
        Self {
            system: SystemInput {
                battery_capacity_kwh: 0.0,
                ..SystemInput::default()
            },
            ..Self::baseline()
        }
    }

    /// Returns the premium preset: bifacial panels with a full-size battery.
    pub fn premium() -> Self {
        Self {
            system: SystemInput {
                panel_type: "bifacial".to_string(),
                battery_capacity_kwh: BATTERY_CAPACITY_MAX_KWH,
                ..SystemInput::default()
            },
            ..Self::baseline()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "no_battery", "premium"];

    /// Loads a configuration from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "no_battery" => Ok(Self::no_battery()),
            "premium" => Ok(Self::premium()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all sections and returns a list of errors.
    ///
    /// Returns an empty vector if the configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = self.site.validate();
        errors.extend(self.engine.validate());
        errors.extend(self.system.validate());
        errors
    }
}
