pub mod comparison;
mod config;
pub mod cycle;
mod error;
mod platform;
pub mod trajectory;

pub use comparison::{compare, ComparisonRow};
pub use config::{
    default_allocation, AllocationReport, SimulationConfig, SimulationOverrides,
    MAX_CYCLES_PER_MONTH, MAX_MONTHS, MAX_SPREAD_PCT, MIN_CYCLES_PER_MONTH, MIN_SPREAD_PCT,
};
pub use cycle::CycleOutcome;
pub use error::{ConfigIssue, Result, SimError};
pub use platform::{Platform, PlatformCatalog, PlatformSpec};
pub use trajectory::{simulate, simulate_detailed, SimulationRow, TrajectoryOutcome};

/// Rounds half away from zero to `places` decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10_f64.powi(places);
    let scaled = value * scale;
    // Magnitudes that overflow when scaled carry no fractional digits.
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / scale
}
