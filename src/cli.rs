//! Command-line surface.
//!
//! Flags override values from `--config`, which override built-in defaults.
//! Validation happens afterwards, on the merged result.

use std::path::PathBuf;

use clap::Parser;

use crate::config::loader::{read_config, ConfigError};
use crate::config::schema::{HeaderCheck, LogFormat, ProbeConfig};

#[derive(Debug, Parser)]
#[command(name = "uptime-probe")]
#[command(version, about = "Probe one URL, append the result to a CSV log, exit 0 iff healthy", long_about = None)]
pub struct Cli {
    /// TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Target URL (http:// or https://)
    #[arg(value_name = "URL")]
    pub target: Option<String>,

    /// Target URL, as a flag
    #[arg(short, long, conflicts_with = "target")]
    pub url: Option<String>,

    /// Max seconds for the whole attempt (1-300)
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// CSV log to append to
    #[arg(short, long)]
    pub log_path: Option<PathBuf>,

    /// Maximum redirects to follow
    #[arg(long)]
    pub max_redirects: Option<usize>,

    /// User-Agent header
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Extra request header, "Name: value" (repeatable)
    #[arg(short = 'H', long = "header", value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Header handling for an existing log
    #[arg(long, value_enum)]
    pub header_check: Option<HeaderCheck>,

    /// Diagnostics format on stderr
    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,

    /// Default log level when RUST_LOG is unset
    #[arg(long)]
    pub log_level: Option<String>,
}

fn parse_header(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected \"Name: value\", got {:?}", raw))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("header name missing in {:?}", raw));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

impl Cli {
    /// Merge flags over the config file (if any) and defaults.
    pub fn into_config(self) -> Result<ProbeConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => read_config(path)?,
            None => ProbeConfig::default(),
        };

        if let Some(url) = self.target.or(self.url) {
            config.probe.url = url;
        }
        if let Some(timeout) = self.timeout {
            config.probe.timeout_secs = timeout;
        }
        if let Some(path) = self.log_path {
            config.recorder.log_path = path;
        }
        if let Some(max) = self.max_redirects {
            config.probe.max_redirects = max;
        }
        if let Some(ua) = self.user_agent {
            config.probe.user_agent = ua;
        }
        config.probe.headers.extend(self.headers);
        if let Some(check) = self.header_check {
            config.recorder.header_check = check;
        }
        if let Some(format) = self.log_format {
            config.observability.log_format = format;
        }
        if let Some(level) = self.log_level {
            config.observability.log_level = level;
        }

        Ok(config)
    }
}
