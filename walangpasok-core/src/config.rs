//! Environment-driven configuration.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::refresh::RefreshIntervals;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
/// Errors raised while reading configuration.
pub enum ConfigError {
    /// A required variable is not set.
    #[error("{0} must be set")]
    Missing(&'static str),
    /// A variable is set but cannot be used.
    #[error("{name} is invalid: {reason}")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

#[derive(Debug, Clone)]
/// Credentials and endpoint of one upstream.
pub struct UpstreamConfig {
    /// API key sent with every request.
    pub api_key: String,
    /// Endpoint override; the provider default is used when `None`.
    pub base_url: Option<String>,
}

#[derive(Debug, Clone)]
/// Logging setup for the binary.
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directives.
    pub filter: String,
    /// File receiving log output.
    pub file: PathBuf,
}

#[derive(Debug, Clone)]
/// Complete application configuration.
pub struct Config {
    /// Weather upstream.
    pub weather: UpstreamConfig,
    /// News upstream.
    pub news: UpstreamConfig,
    /// Timeout applied to every outbound request.
    pub http_timeout: Duration,
    /// Refresh cadence of the periodic widgets.
    pub refresh: RefreshIntervals,
    /// Logging.
    pub log: LogConfig,
}

impl Config {
    const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
    const DEFAULT_ANNOUNCEMENT_REFRESH_SECS: u64 = 300; // 5 minutes
    const DEFAULT_WEATHER_REFRESH_SECS: u64 = 600; // 10 minutes
    const DEFAULT_LOG_FILTER: &'static str = "info";
    const DEFAULT_LOG_FILE: &'static str = "walangpasok.log";

    /// Read configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when an API key is missing or a number cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when an API key is missing or a number cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values count as unset.
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let weather = UpstreamConfig {
            api_key: var("OPENWEATHER_API_KEY")
                .ok_or(ConfigError::Missing("OPENWEATHER_API_KEY"))?,
            base_url: var("OPENWEATHER_BASE_URL"),
        };
        let news = UpstreamConfig {
            api_key: var("NEWSAPI_API_KEY").ok_or(ConfigError::Missing("NEWSAPI_API_KEY"))?,
            base_url: var("NEWSAPI_BASE_URL"),
        };

        let http_timeout = seconds(
            "HTTP_TIMEOUT_SECS",
            var("HTTP_TIMEOUT_SECS"),
            Self::DEFAULT_HTTP_TIMEOUT_SECS,
        )?;
        let refresh = RefreshIntervals {
            announcements: seconds(
                "ANNOUNCEMENT_REFRESH_SECS",
                var("ANNOUNCEMENT_REFRESH_SECS"),
                Self::DEFAULT_ANNOUNCEMENT_REFRESH_SECS,
            )?,
            weather: seconds(
                "WEATHER_REFRESH_SECS",
                var("WEATHER_REFRESH_SECS"),
                Self::DEFAULT_WEATHER_REFRESH_SECS,
            )?,
        };

        let log = LogConfig {
            filter: var("WALANGPASOK_LOG")
                .unwrap_or_else(|| Self::DEFAULT_LOG_FILTER.to_owned()),
            file: var("WALANGPASOK_LOG_FILE")
                .map_or_else(|| PathBuf::from(Self::DEFAULT_LOG_FILE), PathBuf::from),
        };

        Ok(Self {
            weather,
            news,
            http_timeout,
            refresh,
            log,
        })
    }
}

fn seconds(
    name: &'static str,
    raw: Option<String>,
    default: u64,
) -> Result<Duration, ConfigError> {
    let Some(raw) = raw else {
        return Ok(Duration::from_secs(default));
    };

    let secs = raw
        .trim()
        .parse::<u64>()
        .map_err(|err| ConfigError::Invalid {
            name,
            reason: err.to_string(),
        })?;

    if secs == 0 {
        return Err(ConfigError::Invalid {
            name,
            reason: String::from("must be greater than zero"),
        });
    }

    Ok(Duration::from_secs(secs))
}
