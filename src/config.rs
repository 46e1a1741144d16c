use crate::errors::ConfigError;
use chrono_tz::Tz;
use std::{env, time::Duration};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::Sao_Paulo;
pub const DEFAULT_TICK_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Zone whose midnight triggers the daily reset; also used for the header date.
    pub timezone: Tz,
    pub tick_interval: Duration,
    pub seed_demo: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let timezone = match lookup("APP_TIMEZONE") {
            Some(name) => name
                .trim()
                .parse::<Tz>()
                .map_err(|err| ConfigError::invalid("APP_TIMEZONE", err.to_string()))?,
            None => DEFAULT_TIMEZONE,
        };

        let tick_secs = match lookup("APP_TICK_SECS") {
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::invalid(
                        "APP_TICK_SECS",
                        format!("expected a positive number of seconds, got {value:?}"),
                    ));
                }
            },
            None => DEFAULT_TICK_SECS,
        };

        let seed_demo = lookup("APP_SEED_DEMO")
            .map(|value| matches!(value.trim(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            port,
            timezone,
            tick_interval: Duration::from_secs(tick_secs),
            seed_demo,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.timezone, chrono_tz::America::Sao_Paulo);
        assert_eq!(config.tick_interval, Duration::from_secs(60));
        assert!(!config.seed_demo);
    }

    #[test]
    fn reads_overrides() {
        let config = config(&[
            ("PORT", "3000"),
            ("APP_TIMEZONE", "Europe/Lisbon"),
            ("APP_TICK_SECS", "5"),
            ("APP_SEED_DEMO", "true"),
        ])
        .unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.timezone, chrono_tz::Europe::Lisbon);
        assert_eq!(config.tick_interval, Duration::from_secs(5));
        assert!(config.seed_demo);
    }

    #[test]
    fn bad_port_falls_back_to_default() {
        assert_eq!(config(&[("PORT", "eighty")]).unwrap().port, 8080);
    }

    #[test]
    fn rejects_unknown_zone_and_zero_tick() {
        let err = config(&[("APP_TIMEZONE", "Mars/Olympus")]).unwrap_err();
        assert_eq!(err.key, "APP_TIMEZONE");

        let err = config(&[("APP_TICK_SECS", "0")]).unwrap_err();
        assert_eq!(err.key, "APP_TICK_SECS");
    }
}
