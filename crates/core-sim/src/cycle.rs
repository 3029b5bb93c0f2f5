//! Per-platform cycle model: how many arbitrage round trips a platform can
//! complete in a month and what they compound to.

use crate::platform::PlatformSpec;

/// Hours in the 30-day reference month.
pub const REFERENCE_MONTH_HOURS: f64 = 720.0;
pub const DAYS_PER_MONTH: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleOutcome {
    pub achieved_cycles: f64,
    /// Fractional return for the month, e.g. `0.05` for 5%.
    pub monthly_return: f64,
    pub monthly_profit: f64,
}

/// Cycle cadence after derating the base rate by transfer latency.
pub fn time_bound_cycles(spec: &PlatformSpec, cycles_per_month_base: f64) -> f64 {
    cycles_per_month_base * (REFERENCE_MONTH_HOURS / (REFERENCE_MONTH_HOURS + spec.transfer_hours))
}

/// Full daily-limit-sized cycles the capital can fund in a month.
///
/// A platform without throughput, or a bucket without capital, funds no cycles.
pub fn capital_bound_cycles(spec: &PlatformSpec, capital: f64) -> f64 {
    if spec.daily_limit_usd <= 0.0 {
        return 0.0;
    }

    let effective_capital = capital.max(0.0).min(spec.monthly_volume_usd());
    (DAYS_PER_MONTH * effective_capital / spec.daily_limit_usd).floor()
}

pub fn achieved_cycles(spec: &PlatformSpec, capital: f64, cycles_per_month_base: f64) -> f64 {
    time_bound_cycles(spec, cycles_per_month_base).min(capital_bound_cycles(spec, capital))
}

pub fn monthly_return(
    spec: &PlatformSpec,
    capital: f64,
    spread_pct: f64,
    cycles_per_month_base: f64,
) -> CycleOutcome {
    let achieved_cycles = achieved_cycles(spec, capital, cycles_per_month_base);
    let per_cycle_net_rate = (spread_pct - spec.fee_pct) / 100.0;
    let monthly_return = (1.0 + per_cycle_net_rate).powf(achieved_cycles) - 1.0;

    CycleOutcome {
        achieved_cycles,
        monthly_return,
        monthly_profit: capital * monthly_return,
    }
}
