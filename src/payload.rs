use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// Reported in logs and responses in place of the interpreter version a scripted runtime would report.
pub const RUNTIME_VERSION: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub const STATUS_OK: &str = "ok";
pub const STARTED_MESSAGE: &str = "AWS Rust Lambda SAM function started";
pub const COMPLETED_MESSAGE: &str = "AWS Rust Lambda SAM function executed successfully";

/// Placeholder for environment indicators that are not set
pub const UNKNOWN: &str = "unknown";

/// Deployment indicators attached to every log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    /// STAGE
    pub stage: String,
    /// AWS_REGION
    pub region: String,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            stage: UNKNOWN.to_string(),
            region: UNKNOWN.to_string(),
        }
    }
}

/// The acknowledgment returned to the caller. Serialized to JSON by the runtime.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ResponsePayload {
    pub status: String,
    pub message: String,
    #[serde(rename = "requestId")]
    pub request_id: String,
    /// E.g. `0.02ms`
    pub duration: String,
    /// The invocation event, as received
    pub received: Value,
    /// E.g. `2024-05-01 13:45:07`, UTC
    pub timestamp: String,
    pub runtime_version: String,
}

impl ResponsePayload {
    /// Builds a successful acknowledgment for one invocation.
    pub fn ok(request_id: &str, duration: String, received: Value, finished_at: DateTime<Utc>) -> Self {
        Self {
            status: STATUS_OK.to_string(),
            message: COMPLETED_MESSAGE.to_string(),
            request_id: request_id.to_string(),
            duration,
            received,
            timestamp: format_timestamp(finished_at),
            runtime_version: RUNTIME_VERSION.to_string(),
        }
    }
}

/// Rounds the elapsed milliseconds to 2 decimal places and adds the unit, e.g. `12.35ms`.
/// Negative input is reported as `0ms`.
pub fn format_duration(elapsed_ms: f64) -> String {
    let rounded = (elapsed_ms.max(0.0) * 100.0).round() / 100.0;
    // `-0.0` would otherwise print with a sign
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded}ms")
}

/// Formats the moment as `Y-m-d H:i:s`, e.g. `2024-05-01 13:45:07`.
pub fn format_timestamp(moment: DateTime<Utc>) -> String {
    moment.format("%Y-%m-%d %H:%M:%S").to_string()
}
