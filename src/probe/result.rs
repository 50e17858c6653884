//! The outcome of one probe.

use std::time::Duration;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Serialize, Serializer};

/// Timestamp layout used in the log and on stdout.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Status code recorded when no HTTP response was obtained.
pub const NO_RESPONSE: u16 = 0;

/// `true` iff `status_code` is in `[200, 400)`.
pub fn is_up_status(status_code: u16) -> bool {
    (200..400).contains(&status_code)
}

/// Render a timestamp the way the log stores it.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Current UTC time at millisecond precision.
pub fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

fn serialize_timestamp<S>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(&format_timestamp(ts))
}

/// One check, created once per invocation and never mutated.
///
/// `is_up` is derived from `status_code` at construction, so the two can
/// never disagree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckResult {
    #[serde(serialize_with = "serialize_timestamp")]
    timestamp: DateTime<Utc>,
    target_url: String,
    status_code: u16,
    response_time_ms: f64,
    is_up: bool,
}

impl CheckResult {
    /// Result for a final HTTP response.
    pub fn new(
        timestamp: DateTime<Utc>,
        target_url: impl Into<String>,
        status_code: u16,
        elapsed: Duration,
    ) -> Self {
        Self {
            timestamp,
            target_url: target_url.into(),
            status_code,
            response_time_ms: elapsed.as_secs_f64() * 1000.0,
            is_up: is_up_status(status_code),
        }
    }

    /// Result for an attempt that produced no HTTP response.
    pub fn no_response(
        timestamp: DateTime<Utc>,
        target_url: impl Into<String>,
        elapsed: Duration,
    ) -> Self {
        Self::new(timestamp, target_url, NO_RESPONSE, elapsed)
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn target_url(&self) -> &str {
        &self.target_url
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn response_time_ms(&self) -> f64 {
        self.response_time_ms
    }

    pub fn is_up(&self) -> bool {
        self.is_up
    }
}
