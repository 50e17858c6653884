//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate the target URL shape before any network activity
//! - Validate value ranges (timeout bounds, non-empty log path)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProbeConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use reqwest::header::{HeaderName, HeaderValue};
use thiserror::Error;
use url::Url;

use crate::config::schema::ProbeConfig;

/// Smallest accepted per-attempt timeout.
pub const MIN_TIMEOUT_SECS: u64 = 1;
/// Largest accepted per-attempt timeout.
pub const MAX_TIMEOUT_SECS: u64 = 300;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("target URL is empty")]
    EmptyUrl,

    #[error("target URL {0:?} has leading or trailing whitespace")]
    UrlWhitespace(String),

    #[error("target URL {0:?} must start with http:// or https://")]
    UnsupportedScheme(String),

    #[error("target URL {url:?} is malformed: {reason}")]
    MalformedUrl { url: String, reason: String },

    #[error("timeout {0}s is outside {min}..={max}s", min = MIN_TIMEOUT_SECS, max = MAX_TIMEOUT_SECS)]
    TimeoutOutOfRange(u64),

    #[error("log path is empty")]
    EmptyLogPath,

    #[error("header {name:?} is invalid: {reason}")]
    InvalidHeader { name: String, reason: String },
}

/// Validate the whole configuration, collecting every problem.
pub fn validate_config(config: &ProbeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(e) = validate_url(&config.probe.url) {
        errors.push(e);
    }
    if let Err(e) = validate_timeout(config.probe.timeout_secs) {
        errors.push(e);
    }
    if config.recorder.log_path.as_os_str().is_empty() {
        errors.push(ValidationError::EmptyLogPath);
    }
    for (name, value) in &config.probe.headers {
        if let Err(e) = HeaderName::from_bytes(name.as_bytes()) {
            errors.push(ValidationError::InvalidHeader {
                name: name.clone(),
                reason: e.to_string(),
            });
        } else if let Err(e) = HeaderValue::from_str(value) {
            errors.push(ValidationError::InvalidHeader {
                name: name.clone(),
                reason: e.to_string(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Check that `raw` is something the prober may dial.
pub fn validate_url(raw: &str) -> Result<Url, ValidationError> {
    if raw.is_empty() {
        return Err(ValidationError::EmptyUrl);
    }
    if raw.trim() != raw {
        return Err(ValidationError::UrlWhitespace(raw.to_string()));
    }

    let lower = raw.get(..8).unwrap_or(raw).to_ascii_lowercase();
    if !(lower.starts_with("http://") || lower.starts_with("https://")) {
        return Err(ValidationError::UnsupportedScheme(raw.to_string()));
    }

    let url = Url::parse(raw).map_err(|e| ValidationError::MalformedUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    if url.host_str().map_or(true, str::is_empty) {
        return Err(ValidationError::MalformedUrl {
            url: raw.to_string(),
            reason: "missing host".to_string(),
        });
    }
    Ok(url)
}

pub fn validate_timeout(secs: u64) -> Result<(), ValidationError> {
    if (MIN_TIMEOUT_SECS..=MAX_TIMEOUT_SECS).contains(&secs) {
        Ok(())
    } else {
        Err(ValidationError::TimeoutOutOfRange(secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(url: &str) -> ProbeConfig {
        let mut config = ProbeConfig::default();
        config.probe.url = url.to_string();
        config
    }

    #[test]
    fn accepts_http_and_https() {
        assert!(validate_url("https://example.com").is_ok());
        assert!(validate_url("http://127.0.0.1:8080/health?x=1").is_ok());
        assert!(validate_url("HTTPS://EXAMPLE.COM").is_ok());
    }

    #[test]
    fn rejects_missing_scheme() {
        assert_eq!(
            validate_url("example.com"),
            Err(ValidationError::UnsupportedScheme("example.com".into()))
        );
        assert!(matches!(
            validate_url("ftp://example.com"),
            Err(ValidationError::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn rejects_empty_and_hostless() {
        assert_eq!(validate_url(""), Err(ValidationError::EmptyUrl));
        assert!(matches!(
            validate_url("http://"),
            Err(ValidationError::MalformedUrl { .. })
        ));
        assert!(matches!(
            validate_url(" https://example.com"),
            Err(ValidationError::UrlWhitespace(_))
        ));
    }

    #[test]
    fn timeout_bounds() {
        assert!(validate_timeout(0).is_err());
        assert!(validate_timeout(1).is_ok());
        assert!(validate_timeout(300).is_ok());
        assert_eq!(
            validate_timeout(301),
            Err(ValidationError::TimeoutOutOfRange(301))
        );
    }

    #[test]
    fn collects_every_error() {
        let mut config = config_for("example.com");
        config.probe.timeout_secs = 0;
        config.recorder.log_path = Default::default();
        config
            .probe
            .headers
            .insert("bad header".into(), "v".into());

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::EmptyLogPath));
        assert!(errors.contains(&ValidationError::TimeoutOutOfRange(0)));
    }

    #[test]
    fn valid_config_passes() {
        let mut config = config_for("https://example.com");
        config
            .probe
            .headers
            .insert("Authorization".into(), "Bearer token".into());
        assert!(validate_config(&config).is_ok());
    }
}
