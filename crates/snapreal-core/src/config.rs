use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::retry::RetryPolicy;

/// Retry parameters for HTTP calls (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per request (including the first).
    pub max_attempts: u32,
    /// Fixed delay in seconds between attempts after a transport failure.
    pub delay_secs: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay_secs: 2.0,
        }
    }
}

impl RetryConfig {
    pub fn to_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            delay: Duration::from_secs_f64(self.delay_secs.max(0.0)),
        }
    }
}

/// Global configuration loaded from `~/.config/snapreal/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnaprealConfig {
    /// Scheme and host of the API, e.g. `https://api.track3d.ai`.
    pub base_url: String,
    /// Version path appended to the base URL, e.g. `/api/v1`.
    pub api_version: String,
    /// Folder scanned recursively for descriptor files.
    #[serde(default)]
    pub input_dir: Option<PathBuf>,
    /// Where the CSV of active realities is written.
    #[serde(default)]
    pub output_csv: Option<PathBuf>,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    /// Optional retry policy; if missing, built-in defaults are used.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
}

impl Default for SnaprealConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.track3d.ai".to_string(),
            api_version: "/api/v1".to_string(),
            input_dir: None,
            output_csv: None,
            connect_timeout_secs: 15,
            request_timeout_secs: 60,
            retry: None,
        }
    }
}

impl SnaprealConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry.clone().unwrap_or_default().to_policy()
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("snapreal")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<SnaprealConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = SnaprealConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(&path)
}

/// Load configuration from an explicit file (`--config`). The file must exist.
pub fn load_from(path: &Path) -> Result<SnaprealConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: SnaprealConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}
