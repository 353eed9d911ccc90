//! Runtime settings read from the environment.
//!
//! Every setting has a default, logged when the variable is unset. A variable that is set
//! but cannot be parsed is an error rather than silently falling back.

use std::{env, fmt::Display, str::FromStr};
use thiserror::Error;
use tracing::info;

pub const PORT: &str = "MAKOTI_PORT";
pub const CHANNEL_BUFFER: &str = "MAKOTI_CHANNEL_BUFFER";
pub const REVIEW_BATCH_LIMIT: &str = "MAKOTI_REVIEW_BATCH_LIMIT";
pub const TOP_RATED_LIMIT: &str = "MAKOTI_TOP_RATED_LIMIT";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    /// Request channel capacity of every store actor.
    pub channel_buffer: usize,
    /// Most product ids one batch review query may carry.
    pub review_batch_limit: usize,
    /// Default size of the top-rated ranking.
    pub top_rated_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            channel_buffer: 32,
            review_batch_limit: 10,
            top_rated_limit: 5,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            port: try_load(&lookup, PORT, defaults.port)?,
            channel_buffer: positive(
                try_load(&lookup, CHANNEL_BUFFER, defaults.channel_buffer)?,
                CHANNEL_BUFFER,
            )?,
            review_batch_limit: positive(
                try_load(&lookup, REVIEW_BATCH_LIMIT, defaults.review_batch_limit)?,
                REVIEW_BATCH_LIMIT,
            )?,
            top_rated_limit: try_load(&lookup, TOP_RATED_LIMIT, defaults.top_rated_limit)?,
        })
    }
}

fn try_load<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr + Display,
    T::Err: Display,
{
    let Some(value) = lookup(key) else {
        info!("{key} not set, using default: {default}");
        return Ok(default);
    };
    let parsed = value.trim().parse::<T>();
    parsed.map_err(|e| ConfigError::Invalid {
        key,
        reason: e.to_string(),
        value,
    })
}

fn positive(value: usize, key: &'static str) -> Result<usize, ConfigError> {
    if value == 0 {
        return Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(Config::from_lookup(lookup(&[])).unwrap(), Config::default());
    }

    #[test]
    fn test_reads_overrides() {
        let config =
            Config::from_lookup(lookup(&[(PORT, "8080"), (REVIEW_BATCH_LIMIT, " 30 ")])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.review_batch_limit, 30);
        assert_eq!(config.channel_buffer, 32);
    }

    #[test]
    fn test_invalid_values_are_errors() {
        let err = Config::from_lookup(lookup(&[(PORT, "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: PORT, .. }));

        let err = Config::from_lookup(lookup(&[(REVIEW_BATCH_LIMIT, "0")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: REVIEW_BATCH_LIMIT,
                ..
            }
        ));
    }
}
