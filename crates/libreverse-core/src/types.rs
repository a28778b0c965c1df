//! Common types used throughout the launcher

use crate::error::{LauncherError, LauncherResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use url::{Origin, Url};

/// Schemes an [`Address`] may carry
const ALLOWED_SCHEMES: [&str; 2] = ["http", "https"];

/// A validated http/https address of a remote instance.
///
/// The original string is kept verbatim so that what the user loaded is
/// exactly what ends up in the recent list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Address {
    raw: String,
    #[serde(skip)]
    url: Url,
}

impl Address {
    /// Trim the input and prepend `https://` when no http(s) prefix is present.
    pub fn normalize(input: &str) -> String {
        let trimmed = input.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            trimmed.to_string()
        } else {
            format!("https://{}", trimmed)
        }
    }

    /// Validate an already-normalized address.
    pub fn parse(input: &str) -> LauncherResult<Self> {
        let url = Url::parse(input)?;
        if !ALLOWED_SCHEMES.contains(&url.scheme()) {
            return Err(LauncherError::validation("Invalid protocol"));
        }
        Ok(Self {
            raw: input.to_string(),
            url,
        })
    }

    /// Turn raw user input into an address the way the launcher form does.
    pub fn from_input(input: &str) -> LauncherResult<Self> {
        if input.trim().is_empty() {
            return Err(LauncherError::validation("Please enter a URL"));
        }
        Self::parse(&Self::normalize(input))
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn origin(&self) -> Origin {
        self.url.origin()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Address::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// The two windows the host process manages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowKind {
    Launcher,
    Viewer,
}

impl WindowKind {
    pub fn as_str(self) -> &'static str {
        match self {
            WindowKind::Launcher => "launcher",
            WindowKind::Viewer => "viewer",
        }
    }
}

/// Download progress reported by the update notifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProgress {
    pub percent: f64,
    pub bytes_per_second: u64,
    pub transferred: u64,
    pub total: u64,
}

/// Release metadata attached to update signals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateInfo {
    pub version: String,
}

/// Where the background updater currently stands
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum UpdateState {
    #[default]
    Idle,
    Checking,
    Downloading { percent: f64 },
    Downloaded { version: String },
    Errored,
}

/// Result of a load-instance command, `{success, error?}` on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

impl LoadOutcome {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}
