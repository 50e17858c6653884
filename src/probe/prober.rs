//! Single-shot HTTP probing.
//!
//! # Responsibilities
//! - Issue one GET against the target, following redirects
//! - Time it with a monotonic clock
//! - Fold every transport failure into a `CheckResult` with status 0
//!
//! # Design Decisions
//! - Exactly one attempt; retries belong to whoever schedules the process
//! - The configured timeout bounds the whole exchange including DNS
//! - On failure the recorded latency is the time until the failure surfaced
//! - Timing stops at the final response's headers; the body is not read
//! - DNS uses the system resolver on a blocking thread; the timeout drops the
//!   request future and `pipeline::block_on` shuts the runtime down without
//!   joining that thread, so a stalled lookup cannot delay the exit status

use std::error::Error as StdError;
use std::fmt;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::redirect;
use thiserror::Error;
use tokio::time::{self, Instant};

use crate::config::schema::ProbeSettings;
use crate::config::validation::{validate_timeout, ValidationError};
use crate::probe::result::{now_millis, CheckResult};
use crate::probe::target::TargetUrl;

/// Errors raised before any network activity.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Why an attempt produced no response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Timeout,
    Dns,
    Connect,
    Tls,
    Redirect,
    Other,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FailureKind::Timeout => "timeout",
            FailureKind::Dns => "dns",
            FailureKind::Connect => "connect",
            FailureKind::Tls => "tls",
            FailureKind::Redirect => "redirect",
            FailureKind::Other => "other",
        };
        f.write_str(s)
    }
}

impl FailureKind {
    /// Classify a transport error for diagnostics.
    pub fn classify(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            return FailureKind::Timeout;
        }
        if err.is_redirect() {
            return FailureKind::Redirect;
        }

        let chain = error_chain(err).to_ascii_lowercase();
        if chain.contains("dns") || chain.contains("failed to lookup address") {
            FailureKind::Dns
        } else if chain.contains("certificate") || chain.contains("tls") || chain.contains("ssl") {
            FailureKind::Tls
        } else if err.is_connect() {
            FailureKind::Connect
        } else {
            FailureKind::Other
        }
    }
}

fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}

/// Issues probes with a fixed client configuration.
#[derive(Debug, Clone)]
pub struct Prober {
    client: reqwest::Client,
    timeout: Duration,
}

impl Prober {
    /// Build a prober, rejecting bad settings before any request is made.
    ///
    /// `settings.url` is not read here; the target is passed to [`Prober::probe`].
    pub fn new(settings: &ProbeSettings) -> Result<Self, ProbeError> {
        validate_timeout(settings.timeout_secs)?;
        let timeout = Duration::from_secs(settings.timeout_secs);

        let mut headers = HeaderMap::new();
        for (name, value) in &settings.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                ValidationError::InvalidHeader {
                    name: name.clone(),
                    reason: e.to_string(),
                }
            })?;
            let mut header_value =
                HeaderValue::from_str(value).map_err(|e| ValidationError::InvalidHeader {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
            header_value.set_sensitive(true);
            headers.insert(header_name, header_value);
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(redirect::Policy::limited(settings.max_redirects))
            .user_agent(settings.user_agent.clone())
            .default_headers(headers)
            .build()
            .map_err(ProbeError::Client)?;

        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Perform one attempt. Never fails: transport errors become status 0.
    pub async fn probe(&self, target: &TargetUrl) -> CheckResult {
        let timestamp = now_millis();
        let start = Instant::now();
        let response_future = self.client.get(target.url().clone()).send();

        match time::timeout(self.timeout, response_future).await {
            Ok(Ok(response)) => {
                let elapsed = start.elapsed();
                let status = response.status();
                tracing::debug!(
                    status = status.as_u16(),
                    final_url = %response.url(),
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Probe received response"
                );
                CheckResult::new(timestamp, target.as_str(), status.as_u16(), elapsed)
            }
            Ok(Err(e)) => {
                let elapsed = start.elapsed();
                let kind = FailureKind::classify(&e);
                tracing::warn!(
                    kind = %kind,
                    error = %error_chain(&e),
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Probe failed: no response"
                );
                CheckResult::no_response(timestamp, target.as_str(), elapsed)
            }
            Err(_) => {
                let elapsed = start.elapsed();
                tracing::warn!(
                    kind = %FailureKind::Timeout,
                    timeout_secs = self.timeout.as_secs(),
                    "Probe failed: timeout"
                );
                CheckResult::no_response(timestamp, target.as_str(), elapsed)
            }
        }
    }
}

/// Validate the inputs, then probe `target_url` once with default settings.
pub async fn probe(target_url: &str, timeout_secs: u64) -> Result<CheckResult, ProbeError> {
    let target = TargetUrl::parse(target_url)?;
    let settings = ProbeSettings {
        url: target_url.to_string(),
        timeout_secs,
        ..ProbeSettings::default()
    };
    let prober = Prober::new(&settings)?;
    Ok(prober.probe(&target).await)
}
