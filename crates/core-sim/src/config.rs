use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    error::{ConfigIssue, Result},
    platform::{Platform, PlatformCatalog},
};

pub const MAX_MONTHS: u32 = 36;
pub const MIN_SPREAD_PCT: f64 = 0.1;
pub const MAX_SPREAD_PCT: f64 = 10.0;
pub const MIN_CYCLES_PER_MONTH: f64 = 1.0;
pub const MAX_CYCLES_PER_MONTH: f64 = 30.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    pub initial_capital: f64,
    pub months: u32,
    pub spread_pct: f64,
    pub reinvestment_rate_pct: f64,
    pub cycles_per_month_base: f64,
    /// Funded buckets. Only these platforms take part in the monthly loop.
    pub platform_capital: BTreeMap<Platform, f64>,
    pub platforms: PlatformCatalog,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            initial_capital: 4_000.0,
            months: 12,
            spread_pct: 5.5,
            reinvestment_rate_pct: 100.0,
            cycles_per_month_base: 15.0,
            platform_capital: default_allocation(),
            platforms: PlatformCatalog::default(),
        }
    }
}

/// Robinhood, Coinbase, Kraken, and a CashApp reserve traded on standard transfers.
pub fn default_allocation() -> BTreeMap<Platform, f64> {
    BTreeMap::from([
        (Platform::Robinhood, 1_000.0),
        (Platform::Coinbase, 1_500.0),
        (Platform::Kraken, 1_000.0),
        (Platform::CashAppStandard, 500.0),
    ])
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.initial_capital.is_finite() || self.initial_capital <= 0.0 {
            return Err(ConfigIssue::InitialCapital(self.initial_capital).into());
        }
        if self.months > MAX_MONTHS {
            return Err(ConfigIssue::Months {
                max: MAX_MONTHS,
                actual: self.months,
            }
            .into());
        }
        if !self.spread_pct.is_finite()
            || !(MIN_SPREAD_PCT..=MAX_SPREAD_PCT).contains(&self.spread_pct)
        {
            return Err(ConfigIssue::SpreadPct {
                min: MIN_SPREAD_PCT,
                max: MAX_SPREAD_PCT,
                actual: self.spread_pct,
            }
            .into());
        }
        if !self.reinvestment_rate_pct.is_finite()
            || !(0.0..=100.0).contains(&self.reinvestment_rate_pct)
        {
            return Err(ConfigIssue::ReinvestmentRatePct(self.reinvestment_rate_pct).into());
        }
        if !self.cycles_per_month_base.is_finite()
            || !(MIN_CYCLES_PER_MONTH..=MAX_CYCLES_PER_MONTH).contains(&self.cycles_per_month_base)
        {
            return Err(ConfigIssue::CyclesPerMonth {
                min: MIN_CYCLES_PER_MONTH,
                max: MAX_CYCLES_PER_MONTH,
                actual: self.cycles_per_month_base,
            }
            .into());
        }

        for (&platform, &amount) in &self.platform_capital {
            if !amount.is_finite() || amount < 0.0 || amount > self.initial_capital {
                return Err(ConfigIssue::BucketCapital { platform, amount }.into());
            }
            if self.platforms.get(platform).is_none() {
                return Err(ConfigIssue::MissingPlatformSpec(platform).into());
            }
        }

        for (platform, spec) in self.platforms.iter() {
            spec.check(platform)?;
        }

        Ok(())
    }

    pub fn total_allocated(&self) -> f64 {
        self.platform_capital.values().sum()
    }

    pub fn allocation_report(&self) -> AllocationReport {
        let total_allocated = self.total_allocated();
        AllocationReport {
            total_allocated,
            initial_capital: self.initial_capital,
            difference: total_allocated - self.initial_capital,
            is_matching: total_allocated == self.initial_capital,
        }
    }
}

/// Fields a caller may set on top of a base scenario. Present maps replace
/// the base map whole.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationOverrides {
    pub initial_capital: Option<f64>,
    pub months: Option<u32>,
    pub spread_pct: Option<f64>,
    pub reinvestment_rate_pct: Option<f64>,
    pub cycles_per_month_base: Option<f64>,
    pub platform_capital: Option<BTreeMap<Platform, f64>>,
    pub platforms: Option<PlatformCatalog>,
}

impl SimulationOverrides {
    pub fn apply_to(self, base: &SimulationConfig) -> SimulationConfig {
        SimulationConfig {
            initial_capital: self.initial_capital.unwrap_or(base.initial_capital),
            months: self.months.unwrap_or(base.months),
            spread_pct: self.spread_pct.unwrap_or(base.spread_pct),
            reinvestment_rate_pct: self
                .reinvestment_rate_pct
                .unwrap_or(base.reinvestment_rate_pct),
            cycles_per_month_base: self
                .cycles_per_month_base
                .unwrap_or(base.cycles_per_month_base),
            platform_capital: self
                .platform_capital
                .unwrap_or_else(|| base.platform_capital.clone()),
            platforms: self.platforms.unwrap_or_else(|| base.platforms.clone()),
        }
    }
}

/// Reconciliation of the funded buckets against the initial capital.
///
/// A mismatch is reported to the caller; the simulation still runs on the
/// buckets as given.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AllocationReport {
    pub total_allocated: f64,
    pub initial_capital: f64,
    pub difference: f64,
    pub is_matching: bool,
}
