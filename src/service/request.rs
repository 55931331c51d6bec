//! Extraction requests

use crate::url::normalize_target;
use crate::ExtractError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

/// Extraction depth
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// One fetch of the target: headers, technologies, anchor list
    Basic,

    /// Full crawl, path probes and aggregate counters
    #[default]
    Advanced,
}

impl FromStr for Mode {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(Mode::Basic),
            "advanced" => Ok(Mode::Advanced),
            _ => Err(ExtractError::InvalidRequest(
                "mode must be 'basic' or 'advanced'".to_string(),
            )),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Basic => write!(f, "basic"),
            Mode::Advanced => write!(f, "advanced"),
        }
    }
}

/// Job description accepted by `POST /extract`
///
/// The target may be given as `targetUrl`, `target_url` or `website_url`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ExtractRequest {
    #[serde(
        default,
        rename = "targetUrl",
        alias = "target_url",
        alias = "website_url"
    )]
    pub target_url: Option<String>,

    #[serde(default)]
    pub mode: Option<String>,
}

impl ExtractRequest {
    pub fn new(target_url: impl Into<String>) -> Self {
        Self {
            target_url: Some(target_url.into()),
            mode: None,
        }
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode.to_string());
        self
    }

    /// Resolves the target URL and mode
    ///
    /// # Returns
    ///
    /// * `Ok((Url, Mode))` - Target with `https://` added when no scheme was given
    /// * `Err(ExtractError::InvalidRequest)` - Missing target or unknown mode
    /// * `Err(ExtractError::Url)` - The target is not a usable http(s) URL
    pub fn resolve(&self) -> Result<(Url, Mode), ExtractError> {
        let raw = self
            .target_url
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .ok_or_else(|| ExtractError::InvalidRequest("targetUrl is required".to_string()))?;

        let mode = match self.mode.as_deref() {
            Some(mode) => mode.parse()?,
            None => Mode::default(),
        };

        Ok((normalize_target(raw)?, mode))
    }
}
