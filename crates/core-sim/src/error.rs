use thiserror::Error;

use crate::platform::Platform;

pub type Result<T> = std::result::Result<T, SimError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigIssue),
}

/// Individual reasons a [`crate::SimulationConfig`] is rejected before a run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigIssue {
    #[error("initial capital must be a finite positive amount, got {0}")]
    InitialCapital(f64),
    #[error("months must be at most {max}, got {actual}")]
    Months { max: u32, actual: u32 },
    #[error("spread must be between {min}% and {max}%, got {actual}")]
    SpreadPct { min: f64, max: f64, actual: f64 },
    #[error("reinvestment rate must be between 0% and 100%, got {0}")]
    ReinvestmentRatePct(f64),
    #[error("cycles per month must be between {min} and {max}, got {actual}")]
    CyclesPerMonth { min: f64, max: f64, actual: f64 },
    #[error("{platform} capital must be between 0 and the initial capital, got {amount}")]
    BucketCapital { platform: Platform, amount: f64 },
    #[error("unknown platform `{0}`")]
    UnknownPlatform(String),
    #[error("{0} is funded but has no entry in the platform catalog")]
    MissingPlatformSpec(Platform),
    #[error("{platform} fee must be between 0% and 100%, got {fee_pct}")]
    FeePct { platform: Platform, fee_pct: f64 },
    #[error("{platform} transfer time must be finite and non-negative, got {transfer_hours}")]
    TransferHours {
        platform: Platform,
        transfer_hours: f64,
    },
    #[error("{platform} daily limit must be finite and non-negative, got {daily_limit_usd}")]
    DailyLimit {
        platform: Platform,
        daily_limit_usd: f64,
    },
}

impl SimError {
    pub fn issue(&self) -> &ConfigIssue {
        match self {
            Self::InvalidConfiguration(issue) => issue,
        }
    }
}
