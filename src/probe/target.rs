//! Validated probe target.

use std::fmt;

use url::Url;

use crate::config::validation::{validate_url, ValidationError};

/// A URL that passed validation, keeping the caller's spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetUrl {
    raw: String,
    url: Url,
}

impl TargetUrl {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let url = validate_url(raw)?;
        Ok(Self {
            raw: raw.to_string(),
            url,
        })
    }

    /// The string exactly as supplied.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The parsed form used for the request.
    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl fmt::Display for TargetUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
