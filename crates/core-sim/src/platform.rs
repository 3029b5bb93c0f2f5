use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ConfigIssue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Platform {
    Robinhood,
    Coinbase,
    Kraken,
    CashAppFast,
    CashAppStandard,
}

impl Platform {
    pub const ALL: [Platform; 5] = [
        Self::Robinhood,
        Self::Coinbase,
        Self::Kraken,
        Self::CashAppFast,
        Self::CashAppStandard,
    ];

    pub fn from_key(value: &str) -> Result<Self, ConfigIssue> {
        match value {
            "robinhood" => Ok(Self::Robinhood),
            "coinbase" => Ok(Self::Coinbase),
            "kraken" => Ok(Self::Kraken),
            "cashapp_fast" => Ok(Self::CashAppFast),
            "cashapp_standard" => Ok(Self::CashAppStandard),
            other => Err(ConfigIssue::UnknownPlatform(other.to_owned())),
        }
    }

    pub fn as_key(self) -> &'static str {
        match self {
            Self::Robinhood => "robinhood",
            Self::Coinbase => "coinbase",
            Self::Kraken => "kraken",
            Self::CashAppFast => "cashapp_fast",
            Self::CashAppStandard => "cashapp_standard",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Robinhood => "Robinhood",
            Self::Coinbase => "Coinbase",
            Self::Kraken => "Kraken",
            Self::CashAppFast => "Cashapp Fast",
            Self::CashAppStandard => "Cashapp Standard",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Platform {
    type Err = ConfigIssue;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::from_key(value)
    }
}

impl TryFrom<String> for Platform {
    type Error = ConfigIssue;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_key(value.as_str())
    }
}

impl From<Platform> for &'static str {
    fn from(platform: Platform) -> Self {
        platform.as_key()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlatformSpec {
    pub fee_pct: f64,
    pub transfer_hours: f64,
    pub daily_limit_usd: f64,
}

impl PlatformSpec {
    pub fn new(fee_pct: f64, transfer_hours: f64, daily_limit_usd: f64) -> Self {
        Self {
            fee_pct,
            transfer_hours,
            daily_limit_usd,
        }
    }

    /// Published fee schedule and limits for each platform.
    pub fn default_for(platform: Platform) -> Self {
        match platform {
            Platform::Robinhood => Self::new(0.1, 24.0, 1_000.0),
            Platform::Coinbase => Self::new(0.4, 144.0, 10_000.0),
            Platform::Kraken => Self::new(0.26, 24.0, 5_000.0),
            Platform::CashAppFast => Self::new(1.7, 1.0, 7_500.0),
            Platform::CashAppStandard => Self::new(0.0, 48.0, 7_500.0),
        }
    }

    /// Capital the platform can turn over in a 30-day month.
    pub fn monthly_volume_usd(&self) -> f64 {
        self.daily_limit_usd * 30.0
    }

    pub(crate) fn check(&self, platform: Platform) -> Result<(), ConfigIssue> {
        if !self.fee_pct.is_finite() || !(0.0..=100.0).contains(&self.fee_pct) {
            return Err(ConfigIssue::FeePct {
                platform,
                fee_pct: self.fee_pct,
            });
        }
        if !self.transfer_hours.is_finite() || self.transfer_hours < 0.0 {
            return Err(ConfigIssue::TransferHours {
                platform,
                transfer_hours: self.transfer_hours,
            });
        }
        if !self.daily_limit_usd.is_finite() || self.daily_limit_usd < 0.0 {
            return Err(ConfigIssue::DailyLimit {
                platform,
                daily_limit_usd: self.daily_limit_usd,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlatformCatalog {
    specs: BTreeMap<Platform, PlatformSpec>,
}

impl PlatformCatalog {
    pub fn empty() -> Self {
        Self {
            specs: BTreeMap::new(),
        }
    }

    pub fn with_spec(mut self, platform: Platform, spec: PlatformSpec) -> Self {
        self.specs.insert(platform, spec);
        self
    }

    pub fn insert(&mut self, platform: Platform, spec: PlatformSpec) -> Option<PlatformSpec> {
        self.specs.insert(platform, spec)
    }

    pub fn get(&self, platform: Platform) -> Option<&PlatformSpec> {
        self.specs.get(&platform)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Platform, &PlatformSpec)> {
        self.specs.iter().map(|(platform, spec)| (*platform, spec))
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl Default for PlatformCatalog {
    fn default() -> Self {
        Self {
            specs: Platform::ALL
                .into_iter()
                .map(|platform| (platform, PlatformSpec::default_for(platform)))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::{Platform, PlatformCatalog, PlatformSpec};
    use crate::error::ConfigIssue;

    #[test]
    fn keys_round_trip_through_parser() {
        for platform in Platform::ALL {
            assert_eq!(Platform::from_key(platform.as_key()), Ok(platform));
        }
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = "binance".parse::<Platform>().unwrap_err();

        assert_eq!(err, ConfigIssue::UnknownPlatform("binance".to_owned()));
    }

    #[test]
    fn display_name_capitalizes_each_word() {
        assert_eq!(Platform::CashAppFast.to_string(), "Cashapp Fast");
        assert_eq!(Platform::Kraken.to_string(), "Kraken");
    }

    #[test]
    fn default_catalog_matches_published_limits() {
        let catalog = PlatformCatalog::default();

        assert_eq!(catalog.len(), 5);
        assert_eq!(
            catalog.get(Platform::Coinbase),
            Some(&PlatformSpec::new(0.4, 144.0, 10_000.0))
        );
        assert_eq!(
            catalog.get(Platform::CashAppStandard),
            Some(&PlatformSpec::new(0.0, 48.0, 7_500.0))
        );
        assert_eq!(
            catalog.get(Platform::Robinhood).map(PlatformSpec::monthly_volume_usd),
            Some(30_000.0)
        );
    }

    #[test]
    fn catalog_iterates_in_declaration_order() {
        let order: Vec<Platform> = PlatformCatalog::default()
            .iter()
            .map(|(platform, _)| platform)
            .collect();

        assert_eq!(order, Platform::ALL.to_vec());
    }

    #[test]
    fn platform_map_keys_serialize_as_wire_keys() {
        let balances = BTreeMap::from([(Platform::CashAppStandard, 500.0)]);
        let json = serde_json::to_string(&balances).unwrap();

        assert_eq!(json, r#"{"cashapp_standard":500.0}"#);

        let parsed: BTreeMap<Platform, f64> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, balances);
    }

    #[test]
    fn unknown_platform_key_fails_deserialization() {
        let parsed = serde_json::from_str::<BTreeMap<Platform, f64>>(r#"{"binance":1.0}"#);

        assert!(parsed.is_err());
    }

    #[test]
    fn spec_check_rejects_negative_daily_limit() {
        let spec = PlatformSpec::new(0.1, 24.0, -1.0);

        assert!(matches!(
            spec.check(Platform::Robinhood),
            Err(ConfigIssue::DailyLimit { .. })
        ));
    }
}
