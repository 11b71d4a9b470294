// Process configuration read from the environment (and a .env file, if present).
//
// Variables
// - RATES_PLN_TO_UAH     decimal, default 10.5
// - RATES_MONTHLY_HOURS  positive integer, default 160
// - DEFAULT_CURRENCY     PLN | UAH | USD, default PLN
// - BIND_ADDR            socket address, default 0.0.0.0:8080
// - SEED_FILE            optional path to a JSON seed with users, projects and tasks

use crate::core::cost::currency::Currency;
use crate::core::cost::rate_config::{
    DEFAULT_MONTHLY_HOURS, RateConfig, RateConfigError, default_pln_to_uah,
};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },

    #[error(transparent)]
    Rates(#[from] RateConfigError),
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub rates: RateConfig,
    pub bind_addr: SocketAddr,
    pub seed_file: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let pln_to_uah = parse_or(&lookup, "RATES_PLN_TO_UAH", default_pln_to_uah())?;
        let monthly_hours = parse_or(&lookup, "RATES_MONTHLY_HOURS", DEFAULT_MONTHLY_HOURS)?;
        let default_currency = parse_or(&lookup, "DEFAULT_CURRENCY", Currency::Pln)?;
        let bind_addr = match lookup("BIND_ADDR") {
            Some(raw) => parse("BIND_ADDR", &raw)?,
            None => parse("BIND_ADDR", DEFAULT_BIND_ADDR)?,
        };
        let seed_file = lookup("SEED_FILE")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            rates: RateConfig::new(pln_to_uah, monthly_hours, default_currency)?,
            bind_addr,
            seed_file,
        })
    }
}

fn parse<T: FromStr>(name: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::Invalid {
        name,
        value: raw.to_string(),
    })
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(raw) => parse(name, &raw),
        None => Ok(default),
    }
}

#[cfg(test)]
mod app_config_tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[rstest]
    fn it_should_fall_back_to_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.rates, RateConfig::default());
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR.parse::<SocketAddr>().unwrap());
        assert_eq!(config.seed_file, None);
    }

    #[rstest]
    fn it_should_read_every_variable() {
        let config = config_from(&[
            ("RATES_PLN_TO_UAH", "11.25"),
            ("RATES_MONTHLY_HOURS", "168"),
            ("DEFAULT_CURRENCY", "usd"),
            ("BIND_ADDR", "127.0.0.1:3000"),
            ("SEED_FILE", "seed.json"),
        ])
        .unwrap();
        assert_eq!(config.rates.pln_to_uah(), dec!(11.25));
        assert_eq!(config.rates.monthly_hours(), 168);
        assert_eq!(config.rates.default_currency(), Currency::Usd);
        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(config.seed_file, Some(PathBuf::from("seed.json")));
    }

    #[rstest]
    #[case("RATES_PLN_TO_UAH", "ten")]
    #[case("RATES_MONTHLY_HOURS", "-4")]
    #[case("DEFAULT_CURRENCY", "EUR")]
    #[case("BIND_ADDR", "localhost")]
    fn it_should_fail_on_an_invalid_value(#[case] name: &'static str, #[case] value: &str) {
        let result = config_from(&[(name, value)]);
        assert_eq!(
            result.unwrap_err(),
            ConfigError::Invalid {
                name,
                value: value.to_string()
            }
        );
    }

    #[rstest]
    fn it_should_fail_on_zero_monthly_hours() {
        let result = config_from(&[("RATES_MONTHLY_HOURS", "0")]);
        assert_eq!(result.unwrap_err(), ConfigError::Rates(RateConfigError::ZeroMonthlyHours));
    }

    #[rstest]
    fn it_should_fail_on_a_negative_uah_rate() {
        let result = config_from(&[("RATES_PLN_TO_UAH", "-1")]);
        assert_eq!(
            result.unwrap_err(),
            ConfigError::Rates(RateConfigError::NonPositiveUahRate(Decimal::from(-1)))
        );
    }
}
