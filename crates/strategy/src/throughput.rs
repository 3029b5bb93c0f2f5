use compound_sim::{cycle::DAYS_PER_MONTH, Platform, SimulationConfig};
use serde::Serialize;

/// How a funded bucket contributes to monthly throughput.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThroughputRole {
    /// Redeployed every day up to the platform's daily limit.
    DailyLimited,
    /// Deposits roll through a multi-day hold; about half the bucket clears per month.
    RollingHold,
    /// Held back for opportunistic trades.
    Reserve,
}

impl ThroughputRole {
    pub fn for_platform(platform: Platform) -> Self {
        match platform {
            Platform::Robinhood | Platform::Kraken => Self::DailyLimited,
            Platform::Coinbase => Self::RollingHold,
            Platform::CashAppFast | Platform::CashAppStandard => Self::Reserve,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketThroughput {
    pub platform: Platform,
    pub role: ThroughputRole,
    pub capital: f64,
    pub effective_daily_usd: f64,
    pub monthly_usd: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThroughputPlan {
    pub buckets: Vec<BucketThroughput>,
    pub max_monthly_usd: f64,
}

impl ThroughputPlan {
    pub fn from_config(config: &SimulationConfig) -> Self {
        let buckets: Vec<BucketThroughput> = config
            .platform_capital
            .iter()
            .filter_map(|(&platform, &capital)| {
                let spec = config.platforms.get(platform)?;
                let role = ThroughputRole::for_platform(platform);
                let monthly_usd = match role {
                    ThroughputRole::DailyLimited => spec.daily_limit_usd * DAYS_PER_MONTH,
                    ThroughputRole::RollingHold => capital / 2.0,
                    ThroughputRole::Reserve => 0.0,
                };

                Some(BucketThroughput {
                    platform,
                    role,
                    capital,
                    effective_daily_usd: spec.daily_limit_usd.min(capital),
                    monthly_usd,
                })
            })
            .collect();

        let max_monthly_usd = buckets.iter().map(|bucket| bucket.monthly_usd).sum();

        Self {
            buckets,
            max_monthly_usd,
        }
    }

    pub fn bucket(&self, platform: Platform) -> Option<&BucketThroughput> {
        self.buckets.iter().find(|bucket| bucket.platform == platform)
    }
}
