//! Configuration System
//!
//! Handles loading client configuration from files and environment
//! variables. Supports TOML config files and environment variable
//! overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Fixed base URL of the hosted platform.
pub const DEFAULT_BASE_URL: &str = "https://lpgeocqtgovbdadctvfn.supabase.co";

/// Client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the hosted platform.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in milliseconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,

    /// Maximum retry attempts after the initial request.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Which transport to use: real HTTP or canned mock payloads.
    #[serde(default)]
    pub transport: TransportMode,

    /// Directory holding the persisted session values.
    #[serde(default = "default_session_dir")]
    pub session_dir: PathBuf,

    /// Interval between background connectivity probes, in seconds.
    #[serde(default = "default_probe_interval")]
    pub probe_interval_secs: u64,
}

/// Transport strategy, decided once at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    /// Real HTTP calls against the platform.
    #[default]
    Remote,
    /// Canned payloads for offline development.
    Mock,
}

impl FromStr for TransportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "remote" | "http" => Ok(TransportMode::Remote),
            "mock" => Ok(TransportMode::Mock),
            other => Err(format!("unknown transport mode: {other}")),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_request_timeout() -> u64 {
    30_000
}

fn default_max_retries() -> u32 {
    3
}

fn default_session_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|p| p.join("pmbuddy"))
        .unwrap_or_else(|| PathBuf::from("./pmbuddy_session"))
}

fn default_probe_interval() -> u64 {
    120
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_ms: default_request_timeout(),
            max_retries: default_max_retries(),
            transport: TransportMode::default(),
            session_dir: default_session_dir(),
            probe_interval_secs: default_probe_interval(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: ClientConfig = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = ClientConfig::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from the default location or environment
    pub fn load_default() -> Self {
        let config_path = dirs::config_dir().map(|p| p.join("pmbuddy").join("config.toml"));

        if let Some(path) = config_path {
            if path.exists() {
                match Self::load_with_env(&path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(base_url) = std::env::var("PMBUDDY_BASE_URL") {
            self.base_url = base_url;
        }
        if let Ok(timeout) = std::env::var("PMBUDDY_TIMEOUT_MS") {
            if let Ok(ms) = timeout.parse() {
                self.request_timeout_ms = ms;
            }
        }
        if let Ok(retries) = std::env::var("PMBUDDY_MAX_RETRIES") {
            if let Ok(n) = retries.parse() {
                self.max_retries = n;
            }
        }
        if let Ok(mode) = std::env::var("PMBUDDY_TRANSPORT") {
            match mode.parse() {
                Ok(mode) => self.transport = mode,
                Err(e) => tracing::warn!("Ignoring PMBUDDY_TRANSPORT: {}", e),
            }
        }
        if let Ok(dir) = std::env::var("PMBUDDY_SESSION_DIR") {
            self.session_dir = PathBuf::from(dir);
        }
        if let Ok(interval) = std::env::var("PMBUDDY_PROBE_INTERVAL_SECS") {
            if let Ok(secs) = interval.parse() {
                self.probe_interval_secs = secs;
            }
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# PM Buddy Client Configuration
#
# Environment variables override these settings:
# - PMBUDDY_BASE_URL
# - PMBUDDY_TIMEOUT_MS
# - PMBUDDY_MAX_RETRIES
# - PMBUDDY_TRANSPORT
# - PMBUDDY_SESSION_DIR
# - PMBUDDY_PROBE_INTERVAL_SECS

# Base URL of the hosted platform
base_url = "https://lpgeocqtgovbdadctvfn.supabase.co"

# Per-request timeout (ms)
request_timeout_ms = 30000

# Retry ceiling for transient failures
max_retries = 3

# Transport: "remote" (real HTTP) or "mock" (offline development)
transport = "remote"

# Connectivity probe interval (seconds)
probe_interval_secs = 120
"#
    .to_string()
}
