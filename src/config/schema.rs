//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! Every table carries `#[serde(default)]` so a config file only needs the
//! keys it wants to override.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for a single check.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ProbeConfig {
    /// What to probe and how.
    pub probe: ProbeSettings,

    /// Where and how the result is persisted.
    pub recorder: RecorderConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

/// Probe target and request settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ProbeSettings {
    /// Target URL, recorded verbatim.
    pub url: String,

    /// Upper bound on the whole request (DNS, connect, TLS, headers).
    pub timeout_secs: u64,

    /// Maximum number of redirects to follow.
    pub max_redirects: usize,

    /// User-Agent sent with the probe.
    pub user_agent: String,

    /// Extra request headers, passed through untouched (e.g. credentials).
    pub headers: BTreeMap<String, String>,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            url: String::new(),
            timeout_secs: 10,
            max_redirects: 10,
            user_agent: concat!("uptime-probe/", env!("CARGO_PKG_VERSION")).to_string(),
            headers: BTreeMap::new(),
        }
    }
}

/// Recorder configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RecorderConfig {
    /// Destination CSV file.
    pub log_path: PathBuf,

    /// What to do with the header of an existing log.
    pub header_check: HeaderCheck,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from("data/uptime.csv"),
            header_check: HeaderCheck::Verify,
        }
    }
}

/// Header handling for logs that already exist.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum HeaderCheck {
    /// Refuse to append unless the first line is the expected header.
    #[default]
    Verify,
    /// Append without reading the existing file.
    Trust,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default level for this crate when `RUST_LOG` is unset.
    pub log_level: String,

    /// Output format for diagnostics on stderr.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}
