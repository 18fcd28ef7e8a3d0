use crate::error::{OverlayError, Result};
use serde::Deserialize;
use std::{collections::HashMap, fs, path::{Path, PathBuf}};
use dirs::config_dir;
use tracing::{debug, info};

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub overlay: OverlayConfig,
    pub device: DeviceConfig,
    pub performance: PerformanceConfig,
    pub host: HostConfig,
    pub colors: HashMap<String, String>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct OverlayConfig {
    /// Seconds between metric refreshes
    pub update_interval: f32,
    /// Font size as a fraction of the container's shorter side
    pub font_size_scale: f32,
    pub separator: String,
    pub fps_precision: usize,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            update_interval: 0.25,
            font_size_scale: 0.025,
            separator: " : ".to_string(),
            fps_precision: 1,
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct DeviceConfig {
    /// Model string to use instead of asking the platform, e.g. "samsung SCV33"
    pub model: Option<String>,
    /// Read pseudo-files below this directory instead of `/`
    pub sysfs_root: Option<String>,
}

impl DeviceConfig {
    pub fn sysfs_root(&self) -> Option<PathBuf> {
        self.sysfs_root
            .as_deref()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .map(|p| PathBuf::from(shellexpand::tilde(p).to_string()))
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct PerformanceConfig {
    pub cpu_level: Option<f32>,
    pub gpu_level: Option<f32>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct HostConfig {
    pub target_fps: u32,
    pub color: Option<String>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            color: None,
        }
    }
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::de::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !(self.overlay.update_interval.is_finite() && self.overlay.update_interval > 0.0) {
            return Err(OverlayError::Config(format!(
                "update_interval must be positive, got {}",
                self.overlay.update_interval
            )));
        }
        if !(self.overlay.font_size_scale.is_finite() && self.overlay.font_size_scale >= 0.0) {
            return Err(OverlayError::Config(format!(
                "font_size_scale must not be negative, got {}",
                self.overlay.font_size_scale
            )));
        }
        if self.host.target_fps == 0 {
            return Err(OverlayError::Config("target_fps must be at least 1".to_string()));
        }
        Ok(())
    }
}

pub fn default_config_path() -> PathBuf {
    config_dir()
        .map(|p| p.join("metrics-overlay/config.toml"))
        .unwrap_or_else(|| "config.toml".into())
}

/// Load the config at `path`, or the user config when `None`.
/// A missing file means defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config_path = match path {
        Some(p) => PathBuf::from(shellexpand::tilde(&p.to_string_lossy()).to_string()),
        None => default_config_path(),
    };

    if !config_path.exists() {
        info!("Config file not found at {:?}, using defaults", config_path);
        return Ok(Config::default());
    }

    let config_data = fs::read_to_string(&config_path)?;
    let config = Config::from_toml(&config_data)?;
    info!("Configuration loaded from {:?}", config_path);
    debug!("Config: {:?}", config);
    Ok(config)
}
