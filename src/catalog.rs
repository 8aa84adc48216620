//! Fixed reference catalogs for panel technologies and weather conditions.
//!
//! Both tables are process-wide immutable constants: domain reference data,
//! never mutated at runtime. Lookup is by exact name; callers surface unknown
//! names as configuration errors before any arithmetic runs.

use serde::Serialize;

/// A panel technology with its fixed physical and cost attributes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PanelType {
    /// Catalog name, matched exactly.
    pub name: &'static str,
    /// Fraction of nameplate rating actually yielded, in (0, 1].
    pub efficiency: f32,
    /// Installed cost per kWc of nameplate capacity.
    pub cost_per_kwc: f32,
}

/// The panel-technology catalog.
pub const PANEL_TYPES: &[PanelType] = &[
    PanelType {
        name: "monocrystalline",
        efficiency: 0.85,
        cost_per_kwc: 4000.0,
    },
    PanelType {
        name: "polycrystalline",
        efficiency: 0.80,
        cost_per_kwc: 3500.0,
    },
    PanelType {
        name: "amorphous",
        efficiency: 0.65,
        cost_per_kwc: 3000.0,
    },
    PanelType {
        name: "heterojunction",
        efficiency: 0.88,
        cost_per_kwc: 5000.0,
    },
    PanelType {
        name: "bifacial",
        efficiency: 0.90,
        cost_per_kwc: 5500.0,
    },
];

/// A weather condition and its multiplicative production derating factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeatherCondition {
    /// Catalog name, matched exactly.
    pub name: &'static str,
    /// Derating factor applied to production, in (0, 1].
    pub factor: f32,
}

/// The weather-condition catalog.
pub const WEATHER_CONDITIONS: &[WeatherCondition] = &[
    WeatherCondition {
        name: "sunny",
        factor: 1.0,
    },
    WeatherCondition {
        name: "partly_cloudy",
        factor: 0.85,
    },
    WeatherCondition {
        name: "cloudy",
        factor: 0.65,
    },
    WeatherCondition {
        name: "rain",
        factor: 0.40,
    },
    WeatherCondition {
        name: "haze",
        factor: 0.55,
    },
];

/// Looks up a panel technology by name.
pub fn panel_type(name: &str) -> Option<&'static PanelType> {
    PANEL_TYPES.iter().find(|p| p.name == name)
}

/// Looks up a weather condition by name.
pub fn weather_condition(name: &str) -> Option<&'static WeatherCondition> {
    WEATHER_CONDITIONS.iter().find(|w| w.name == name)
}

/// Comma-separated panel names for "unknown name" diagnostics.
pub fn panel_type_names() -> String {
    PANEL_TYPES
        .iter()
        .map(|p| p.name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Comma-separated weather names for "unknown name" diagnostics.
pub fn weather_condition_names() -> String {
    WEATHER_CONDITIONS
        .iter()
        .map(|w| w.name)
        .collect::<Vec<_>>()
        .join(", ")
}
