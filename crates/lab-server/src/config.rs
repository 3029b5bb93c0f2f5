use std::{
    env,
    net::{AddrParseError, Ipv4Addr, SocketAddr},
    str::FromStr,
};

use compound_sim::{SimError, SimulationConfig};
use thiserror::Error;

const DEFAULT_PORT: u16 = 8080;

pub const ENV_ADDR_KEY: &str = "SIM_SERVER_ADDR";
pub const ENV_INITIAL_CAPITAL_KEY: &str = "SIM_INITIAL_CAPITAL";
pub const ENV_MONTHS_KEY: &str = "SIM_MONTHS";
pub const ENV_SPREAD_KEY: &str = "SIM_SPREAD_PCT";
pub const ENV_REINVESTMENT_KEY: &str = "SIM_REINVESTMENT_PCT";
pub const ENV_CYCLES_KEY: &str = "SIM_CYCLES_PER_MONTH";

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    /// Scenario served by `GET /simulations/default` and used as the base
    /// for posted configs.
    pub simulation: SimulationConfig,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("SIM_SERVER_ADDR is not a valid socket address: {0}")]
    InvalidListenAddr(#[source] AddrParseError),
    #[error("{key} must be a number, got `{value}`")]
    InvalidNumber { key: &'static str, value: String },
    #[error("{key} contains non-unicode data")]
    NonUnicode { key: &'static str },
    #[error("default simulation is invalid: {0}")]
    InvalidSimulation(#[from] SimError),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let listen_addr = match read_env(ENV_ADDR_KEY)? {
            Some(value) => value.parse().map_err(ConfigError::InvalidListenAddr)?,
            None => SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)),
        };

        let defaults = SimulationConfig::default();
        let simulation = SimulationConfig {
            initial_capital: parse_number_env(ENV_INITIAL_CAPITAL_KEY, defaults.initial_capital)?,
            months: parse_number_env(ENV_MONTHS_KEY, defaults.months)?,
            spread_pct: parse_number_env(ENV_SPREAD_KEY, defaults.spread_pct)?,
            reinvestment_rate_pct: parse_number_env(
                ENV_REINVESTMENT_KEY,
                defaults.reinvestment_rate_pct,
            )?,
            cycles_per_month_base: parse_number_env(
                ENV_CYCLES_KEY,
                defaults.cycles_per_month_base,
            )?,
            ..defaults
        };
        simulation.validate()?;

        Ok(Self {
            listen_addr,
            simulation,
        })
    }
}

fn read_env(key: &'static str) -> Result<Option<String>, ConfigError> {
    match env::var(key) {
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::NonUnicode { key }),
    }
}

fn parse_number_env<T: FromStr>(key: &'static str, default_value: T) -> Result<T, ConfigError> {
    match read_env(key)? {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { key, value }),
        None => Ok(default_value),
    }
}
