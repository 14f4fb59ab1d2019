use crate::payload::{Environment, UNKNOWN};
use crate::Error;
use chrono_tz::Tz;
use std::env::var;
use std::str::FromStr;

/// Zone of log timestamps if LOG_TZ is not set
const DEFAULT_LOG_TZ: Tz = Tz::Europe__Budapest;

/// Tracing targets are the lib and the bin names
const DEFAULT_LOG_FILTER: &str = "event_ack=debug,bootstrap=debug";

/// How log records are rendered on stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per line, for CloudWatch
    #[default]
    Json,
    /// Human-readable single lines for running locally
    Compact,
}

impl FromStr for LogFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "compact" => Ok(Self::Compact),
            other => Err(Error::from(format!(
                "Invalid LOG_FORMAT value: {other}. Use json or compact"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// STAGE and AWS_REGION, `unknown` if not set
    pub environment: Environment,
    /// IANA zone of log timestamps, e.g. Europe/Budapest
    pub log_tz: Tz,
    pub log_format: LogFormat,
    /// RUST_LOG syntax, e.g. `event_ack=info`
    pub log_filter: String,
}

impl Config {
    /// Creates a new Config instance from the environment variables.
    /// Missing STAGE and AWS_REGION default to `unknown`.
    /// Returns an error if the logging vars are set to something unparseable.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| var(key).ok())
    }

    /// Same as `from_env`, but takes the values from the `lookup` function.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        // empty values count as unset
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let environment = Environment {
            stage: non_empty("STAGE").unwrap_or_else(|| UNKNOWN.to_string()),
            region: non_empty("AWS_REGION").unwrap_or_else(|| UNKNOWN.to_string()),
        };

        let log_tz = match non_empty("LOG_TZ") {
            Some(v) => v.trim().parse::<Tz>().map_err(|e| {
                Error::from(format!("Invalid LOG_TZ env var. Must be an IANA zone name, e.g. Europe/Budapest. {e}"))
            })?,
            None => DEFAULT_LOG_TZ,
        };

        let log_format = match non_empty("LOG_FORMAT") {
            Some(v) => LogFormat::from_str(&v)?,
            None => LogFormat::default(),
        };

        let log_filter = non_empty("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            environment,
            log_tz,
            log_format,
            log_filter,
        })
    }
}
