//! The estimation engine: a pure mapping from a validated system input to
//! an annualized physical and financial estimate.

/// Self-consumption split and battery-assisted coverage.
pub mod consumption;
pub mod engine;
/// Savings, investment, payback, and classification.
pub mod financial;
/// Installed capacity and gross annual production.
pub mod production;
pub mod report;
pub mod types;

// Re-export the main types for convenience
pub use engine::Estimator;
pub use types::Estimate;
pub use types::Payback;
pub use types::PaybackClass;
