use crate::config::{Config, LogFormat};
use crate::payload::{Environment, COMPLETED_MESSAGE, STARTED_MESSAGE};
use crate::Error;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde_json::{json, Value};
use std::fmt;
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::EnvFilter;

/// Logged once per invocation, before any work is done.
#[derive(Debug, Clone, PartialEq)]
pub struct StartedEntry<'a> {
    pub request_id: &'a str,
    pub event: &'a Value,
    /// Milliseconds since epoch, as supplied in the invocation context
    pub deadline_ms: u64,
    pub environment: &'a Environment,
    pub runtime_version: &'a str,
}

/// Logged once per invocation, after the duration is known.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedEntry<'a> {
    pub request_id: &'a str,
    /// E.g. `0.03ms`
    pub duration: &'a str,
    pub environment: &'a Environment,
    pub runtime_version: &'a str,
}

// The fmt JSON layer records fields as flat primitives, so the event goes out as its compact JSON text
// and the environment as separate `stage` / `region` keys.
impl StartedEntry<'_> {
    /// The fields `TracingLog` attaches to the log record, by name.
    pub fn fields(&self) -> Value {
        json!({
            "request_id": self.request_id,
            "event": self.event.to_string(),
            "deadline_ms": self.deadline_ms,
            "stage": self.environment.stage,
            "region": self.environment.region,
            "runtime_version": self.runtime_version,
        })
    }
}

impl CompletedEntry<'_> {
    /// The fields `TracingLog` attaches to the log record, by name.
    pub fn fields(&self) -> Value {
        json!({
            "request_id": self.request_id,
            "duration": self.duration,
            "stage": self.environment.stage,
            "region": self.environment.region,
            "runtime_version": self.runtime_version,
        })
    }
}

/// The sink the handler writes its two log entries to.
/// A failed write is returned to the caller as-is.
/// `TracingLog` never fails: the fmt subscriber drops stderr write errors,
/// so only sinks that can observe their writes return `Err`.
pub trait InvocationLog: Send + Sync {
    fn started(&self, entry: &StartedEntry<'_>) -> Result<(), Error>;
    fn completed(&self, entry: &CompletedEntry<'_>) -> Result<(), Error>;
}

/// Emits entries as `tracing` events with the keys listed by `StartedEntry::fields` and `CompletedEntry::fields`.
/// Where they end up depends on the subscriber set by `init_tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLog;

impl InvocationLog for TracingLog {
    fn started(&self, entry: &StartedEntry<'_>) -> Result<(), Error> {
        info!(
            request_id = entry.request_id,
            event = %entry.event,
            deadline_ms = entry.deadline_ms,
            stage = entry.environment.stage.as_str(),
            region = entry.environment.region.as_str(),
            runtime_version = entry.runtime_version,
            "{STARTED_MESSAGE}"
        );
        Ok(())
    }

    fn completed(&self, entry: &CompletedEntry<'_>) -> Result<(), Error> {
        info!(
            request_id = entry.request_id,
            duration = entry.duration,
            stage = entry.environment.stage.as_str(),
            region = entry.environment.region.as_str(),
            runtime_version = entry.runtime_version,
            "{COMPLETED_MESSAGE}"
        );
        Ok(())
    }
}

/// Writes log timestamps in an IANA zone with microsecond resolution,
/// e.g. `2024-05-01T15:45:07.123456+02:00` for Europe/Budapest in summer.
#[derive(Debug, Clone, Copy)]
pub struct ZonedTimer {
    tz: Tz,
}

impl ZonedTimer {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn format(&self, moment: DateTime<Utc>) -> String {
        moment
            .with_timezone(&self.tz)
            .format("%Y-%m-%dT%H:%M:%S%.6f%:z")
            .to_string()
    }
}

impl FormatTime for ZonedTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "{}", self.format(Utc::now()))
    }
}

/// Installs the global subscriber writing to stderr.
/// Targets not named in `config.log_filter` are logged at ERROR only.
pub fn init_tracing(config: &Config) -> Result<(), Error> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::ERROR.into())
        .parse_lossy(&config.log_filter);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_timer(ZonedTimer::new(config.log_tz))
        .with_ansi(false);

    match config.log_format {
        LogFormat::Json => builder
            .json()
            .flatten_event(true)
            .with_current_span(false)
            .with_span_list(false)
            .try_init()?,
        LogFormat::Compact => builder.compact().with_target(false).try_init()?,
    }

    Ok(())
}
