//! Launcher configuration

use crate::error::{LauncherError, LauncherResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable that overrides the data directory
pub const DATA_DIR_ENV: &str = "LIBREVERSE_DATA_DIR";

/// File name of the optional configuration file inside the data directory
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Launcher configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LauncherConfig {
    /// User data directory (store, config)
    pub data_dir: PathBuf,

    /// Application name shown in menus
    pub app_name: String,

    /// Launcher window settings
    pub launcher: LauncherWindowConfig,

    /// Viewer window settings
    pub viewer: ViewerWindowConfig,

    /// Trailing-edge delay for launcher resize requests
    pub resize_debounce_ms: u64,

    /// Maximum number of remembered addresses
    pub max_recent_urls: usize,

    /// Background update checks
    pub updates: UpdateConfig,

    /// Enable webview devtools
    pub devtools: bool,

    /// Log initialization and page-load timings
    pub perf_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LauncherWindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub min_height: u32,
    /// Fraction of the primary display height the launcher may grow to
    pub max_height_ratio: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerWindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateConfig {
    /// Only production builds check for updates
    pub enabled: bool,

    /// Delay before the first check after startup
    pub startup_delay_secs: u64,

    /// Interval between periodic checks
    pub interval_secs: u64,

    /// Minimum spacing between checks triggered by window focus
    pub focus_throttle_secs: u64,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            app_name: "Libreverse Desktop".to_string(),
            launcher: LauncherWindowConfig::default(),
            viewer: ViewerWindowConfig::default(),
            resize_debounce_ms: 16,
            max_recent_urls: 10,
            updates: UpdateConfig::default(),
            devtools: cfg!(debug_assertions),
            perf_logging: cfg!(debug_assertions),
        }
    }
}

impl Default for LauncherWindowConfig {
    fn default() -> Self {
        Self {
            title: "Libreverse Desktop".to_string(),
            width: 500,
            height: 450,
            min_height: 400,
            max_height_ratio: 0.9,
        }
    }
}

impl Default for ViewerWindowConfig {
    fn default() -> Self {
        Self {
            title: "Libreverse Instance".to_string(),
            width: 1200,
            height: 800,
        }
    }
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            enabled: !cfg!(debug_assertions),
            startup_delay_secs: 3,
            interval_secs: 60 * 60,
            focus_throttle_secs: 30 * 60,
        }
    }
}

impl LauncherConfig {
    /// Resolve the data directory and read `config.json` from it if present.
    ///
    /// A malformed file is logged and ignored.
    pub fn load() -> Self {
        let data_dir = std::env::var_os(DATA_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);
        let mut config = Self::load_from(&data_dir.join(CONFIG_FILE_NAME));
        config.data_dir = data_dir;
        config
    }

    /// Read configuration from an explicit file, falling back to defaults.
    pub fn load_from(path: &Path) -> Self {
        match Self::read(path) {
            Ok(Some(config)) => config,
            Ok(None) => Self::default(),
            Err(e) => {
                log::warn!("Ignoring config {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Parse `path`, or `Ok(None)` when there is no such file.
    pub fn read(path: &Path) -> LauncherResult<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(path)?;
        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|e| LauncherError::config(format!("{}: {}", path.display(), e)))
    }

    /// Path of the recent-address store
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join("config-store.json")
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("libreverse-desktop")
}
