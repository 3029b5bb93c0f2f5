use serde::Serialize;

use crate::{config::SimulationConfig, cycle, error::Result, platform::Platform, round_to};

/// Standalone performance of one platform if it held the whole initial capital.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub platform: Platform,
    pub fee_pct: f64,
    pub transfer_hours: f64,
    pub daily_limit_usd: f64,
    pub monthly_volume_usd: f64,
    pub cycles_per_month: f64,
    pub monthly_return_pct: f64,
    pub yearly_return_pct: f64,
}

/// Evaluates every catalog platform at the full initial capital.
///
/// The yearly figure extrapolates the first month's rate over twelve months;
/// it does not model the rate degrading as capital approaches the daily cap.
pub fn compare(config: &SimulationConfig) -> Result<Vec<ComparisonRow>> {
    config.validate()?;

    Ok(config
        .platforms
        .iter()
        .map(|(platform, spec)| {
            let outcome = cycle::monthly_return(
                spec,
                config.initial_capital,
                config.spread_pct,
                config.cycles_per_month_base,
            );
            let yearly_return = (1.0 + outcome.monthly_return).powi(12) - 1.0;

            ComparisonRow {
                platform,
                fee_pct: spec.fee_pct,
                transfer_hours: spec.transfer_hours,
                daily_limit_usd: spec.daily_limit_usd,
                monthly_volume_usd: spec.monthly_volume_usd(),
                cycles_per_month: round_to(outcome.achieved_cycles, 1),
                monthly_return_pct: round_to(outcome.monthly_return * 100.0, 2),
                yearly_return_pct: round_to(yearly_return * 100.0, 2),
            }
        })
        .collect())
}
