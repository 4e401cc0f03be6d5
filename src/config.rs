//! Service configuration from environment variables (and `.env`)

use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;

use crate::availability::DEFAULT_MIN_LEAD_MINUTES;
use crate::models::ClockTime;
use crate::pricing::PricingSettings;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },

    #[error("{0}")]
    Inconsistent(String),
}

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub currency: String,
    pub pricing: PricingSettings,
    pub min_lead_minutes: i64,
    pub catalog_ttl: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            currency: "EUR".to_string(),
            pricing: PricingSettings::default(),
            min_lead_minutes: DEFAULT_MIN_LEAD_MINUTES,
            catalog_ttl: Duration::from_secs(30 * 60),
        }
    }
}

impl Config {
    /// Load from the process environment, after reading `.env` if present
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from any key lookup; unset keys keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let get = |key: &'static str| lookup(key).filter(|v| !v.trim().is_empty());

        let pricing = PricingSettings {
            commission_rate: parse_or(get("COMMISSION_RATE"), "COMMISSION_RATE", defaults.pricing.commission_rate)?,
            workday_hours: parse_or(get("WORKDAY_HOURS"), "WORKDAY_HOURS", defaults.pricing.workday_hours)?,
            half_day_hours: parse_or(get("HALF_DAY_HOURS"), "HALF_DAY_HOURS", defaults.pricing.half_day_hours)?,
            day_start: parse_or::<ClockTime>(get("DAY_START"), "DAY_START", defaults.pricing.day_start)?,
            day_end: parse_or::<ClockTime>(get("DAY_END"), "DAY_END", defaults.pricing.day_end)?,
        };

        let config = Self {
            host: get("HOST").unwrap_or(defaults.host),
            port: parse_or(get("PORT"), "PORT", defaults.port)?,
            currency: get("CURRENCY").unwrap_or(defaults.currency),
            pricing,
            min_lead_minutes: parse_or(get("MIN_LEAD_MINUTES"), "MIN_LEAD_MINUTES", defaults.min_lead_minutes)?,
            catalog_ttl: Duration::from_secs(parse_or(
                get("CATALOG_TTL_SECS"),
                "CATALOG_TTL_SECS",
                defaults.catalog_ttl.as_secs(),
            )?),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.pricing;
        if p.commission_rate < Decimal::ZERO || p.commission_rate > Decimal::ONE_HUNDRED {
            return Err(ConfigError::Inconsistent(format!(
                "COMMISSION_RATE must be between 0 and 100, got {}",
                p.commission_rate
            )));
        }
        if p.workday_hours <= Decimal::ZERO || p.half_day_hours <= Decimal::ZERO {
            return Err(ConfigError::Inconsistent(
                "WORKDAY_HOURS and HALF_DAY_HOURS must be positive".to_string(),
            ));
        }
        if p.half_day_hours > p.workday_hours {
            return Err(ConfigError::Inconsistent(
                "HALF_DAY_HOURS cannot exceed WORKDAY_HOURS".to_string(),
            ));
        }
        if p.day_end <= p.day_start {
            return Err(ConfigError::Inconsistent(format!(
                "DAY_END {} must be after DAY_START {}",
                p.day_end, p.day_start
            )));
        }
        if self.min_lead_minutes < 0 {
            return Err(ConfigError::Inconsistent("MIN_LEAD_MINUTES cannot be negative".to_string()));
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: FromStr>(raw: Option<String>, key: &'static str, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.pricing.commission_rate, dec!(15));
        assert_eq!(config.pricing.workday_minutes(), 480);
        assert_eq!(config.pricing.half_day_minutes(), 240);
        assert_eq!(config.min_lead_minutes, 120);
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("PORT", "8080"),
            ("COMMISSION_RATE", "12.5"),
            ("WORKDAY_HOURS", "7.5"),
            ("DAY_START", "07:30"),
            ("CURRENCY", "CHF"),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.pricing.commission_rate, dec!(12.5));
        assert_eq!(config.pricing.workday_minutes(), 450);
        assert_eq!(config.pricing.day_start.to_string(), "07:30");
        assert_eq!(config.currency, "CHF");
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            load(&[("PORT", "eighty")]),
            Err(ConfigError::Invalid { key: "PORT", .. })
        ));
        assert!(matches!(
            load(&[("COMMISSION_RATE", "150")]),
            Err(ConfigError::Inconsistent(_))
        ));
        assert!(matches!(
            load(&[("DAY_START", "20:00"), ("DAY_END", "08:00")]),
            Err(ConfigError::Inconsistent(_))
        ));
        assert!(matches!(
            load(&[("HALF_DAY_HOURS", "9")]),
            Err(ConfigError::Inconsistent(_))
        ));
    }
}
