use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

/// Complete careview configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CareviewConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub rotation: RotationConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub mock: MockConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Patient rotation configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RotationConfig {
    /// Seconds between switching the displayed patient
    #[serde(default = "default_rotation_interval")]
    pub interval_seconds: u64,
}

fn default_rotation_interval() -> u64 {
    5
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            interval_seconds: default_rotation_interval(),
        }
    }
}

/// Derived display settings
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Daily step goal used for the progress bar
    #[serde(default = "default_step_goal")]
    pub step_goal: u32,
}

fn default_step_goal() -> u32 {
    3000
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            step_goal: default_step_goal(),
        }
    }
}

/// Mock data generation
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MockConfig {
    /// Fixed RNG seed for reproducible data; random when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

impl CareviewConfig {
    /// Override fields from `CAREVIEW_*` env vars. Unparsable values are ignored.
    pub fn apply_env_overrides(&mut self) {
        if let Some(port) = env_parse("CAREVIEW_PORT") {
            self.server.port = port;
        }
        if let Some(secs) = env_parse("CAREVIEW_ROTATION_INTERVAL_SECONDS") {
            self.rotation.interval_seconds = secs;
        }
        if let Some(goal) = env_parse("CAREVIEW_STEP_GOAL") {
            self.dashboard.step_goal = goal;
        }
        if let Some(seed) = env_parse("CAREVIEW_SEED") {
            self.mock.seed = Some(seed);
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key = key, value = %raw, "Ignoring unparsable env override");
            None
        }
    }
}

/// Load configuration from TOML file
pub fn load_config(path: impl AsRef<Path>) -> Result<CareviewConfig> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: CareviewConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    Ok(config)
}

/// Load from `path` when it exists, otherwise defaults; then apply env overrides.
pub fn load_or_default(path: impl AsRef<Path>) -> Result<CareviewConfig> {
    let path = path.as_ref();
    let mut config = if path.exists() {
        info!(path = %path.display(), "Loading configuration");
        load_config(path)?
    } else {
        info!(path = %path.display(), "No config file, using defaults");
        CareviewConfig::default()
    };
    config.apply_env_overrides();
    Ok(config)
}
