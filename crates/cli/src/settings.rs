// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Process configuration
//!
//! Endpoint URLs and the request timeout come from layered sources; stored
//! credentials do not live here. URLs stay as plain strings until
//! [`Settings::engine_config`] so a bad value is reported with the setting
//! name that carried it.

use std::path::PathBuf;

use anyhow::{Context, Result, ensure};
use config::{Config, ConfigError, Environment as ConfigEnv, File};
use orchestrator::{DEFAULT_TIMEOUT_SECONDS, EngineConfig};
use serde::{Deserialize, Deserializer, Serialize, de};
use url::Url;

/// A validated per-request timeout in seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeoutSeconds(u64);

impl TimeoutSeconds {
    /// Create a new `TimeoutSeconds`, ensuring the value is within valid bounds
    ///
    /// # Errors
    ///
    /// Returns an error if the timeout is 0 or greater than 300 seconds
    pub fn new(seconds: u64) -> Result<Self> {
        ensure!(seconds != 0, "timeout must be greater than 0");
        ensure!(seconds <= 300, "timeout cannot exceed 300");
        Ok(Self(seconds))
    }

    /// Get the timeout value in seconds
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl Default for TimeoutSeconds {
    fn default() -> Self {
        Self(DEFAULT_TIMEOUT_SECONDS)
    }
}

impl<'de> Deserialize<'de> for TimeoutSeconds {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let seconds = u64::deserialize(deserializer)?;
        Self::new(seconds).map_err(|e| de::Error::custom(e.to_string()))
    }
}

/// Settings for one `ethq` invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Node provider base URL. The API key is appended as a path segment.
    pub node_url: String,
    /// Block explorer API base URL.
    pub explorer_url: String,
    /// Market data API base URL.
    pub market_url: String,
    /// Per-request timeout in seconds (validated range: 1-300).
    pub timeout_seconds: TimeoutSeconds,
    /// Credential file location, overriding the per-user default.
    pub credentials_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        let defaults = EngineConfig::default();
        Self {
            node_url: defaults.node_url.to_string(),
            explorer_url: defaults.explorer_url.to_string(),
            market_url: defaults.market_url.to_string(),
            timeout_seconds: TimeoutSeconds::default(),
            credentials_path: None,
        }
    }
}

impl Settings {
    /// Load settings using the config crate with hierarchical sources
    ///
    /// Settings are loaded in the following order (later sources override
    /// earlier ones):
    /// 1. Built-in defaults (the public mainnet endpoints)
    /// 2. Per-user file (`<config dir>/ethq/config.toml`)
    /// 3. `ethq.toml` in the working directory
    /// 4. Environment variables with the `ETHQ_` prefix
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be read or a value fails
    /// validation.
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = EngineConfig::default();

        let mut builder = Config::builder()
            .set_default("node_url", defaults.node_url.to_string())?
            .set_default("explorer_url", defaults.explorer_url.to_string())?
            .set_default("market_url", defaults.market_url.to_string())?
            .set_default("timeout_seconds", defaults.timeout_seconds)?;

        if let Some(config_dir) = dirs::config_dir() {
            let user_file = config_dir.join("ethq").join("config");
            builder = builder.add_source(File::from(user_file).required(false));
        }

        builder
            .add_source(File::with_name("ethq").required(false))
            .add_source(ConfigEnv::with_prefix("ETHQ").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// The engine configuration these settings describe.
    ///
    /// # Errors
    ///
    /// Returns an error naming the offending setting if a URL does not parse.
    pub fn engine_config(&self) -> Result<EngineConfig> {
        Ok(EngineConfig {
            node_url: parse_url("node_url", &self.node_url)?,
            explorer_url: parse_url("explorer_url", &self.explorer_url)?,
            market_url: parse_url("market_url", &self.market_url)?,
            timeout_seconds: self.timeout_seconds.value(),
            store_path: self.credentials_path.clone(),
        })
    }
}

fn parse_url(setting: &str, raw: &str) -> Result<Url> {
    Url::parse(raw).with_context(|| format!("{setting} is not a valid URL: '{raw}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_validation() {
        assert!(TimeoutSeconds::new(0).is_err());
        assert!(TimeoutSeconds::new(301).is_err());

        assert!(TimeoutSeconds::new(1).is_ok());
        assert!(TimeoutSeconds::new(30).is_ok());
        assert!(TimeoutSeconds::new(300).is_ok());
    }

    #[test]
    fn defaults_round_trip_into_an_engine_config() {
        let settings = Settings::default();
        let config = settings.engine_config().unwrap();

        let expected = EngineConfig::default();
        assert_eq!(config.node_url, expected.node_url);
        assert_eq!(config.explorer_url, expected.explorer_url);
        assert_eq!(config.market_url, expected.market_url);
        assert_eq!(config.timeout_seconds, DEFAULT_TIMEOUT_SECONDS);
        assert!(config.store_path.is_none());
    }

    #[test]
    fn a_bad_url_is_reported_with_its_setting_name() {
        let settings = Settings {
            explorer_url: "not a url".to_owned(),
            ..Settings::default()
        };

        let error = settings.engine_config().unwrap_err();
        assert!(error.to_string().contains("explorer_url"));
    }
}
