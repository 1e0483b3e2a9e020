//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub timing: TimingConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Which persistence backend holds the local blobs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    File,
    Sqlite,
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "file" => Ok(StoreBackend::File),
            "sqlite" => Ok(StoreBackend::Sqlite),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(ConfigError::Invalid(format!(
                "unknown store backend '{}' (expected file, sqlite or memory)",
                other
            ))),
        }
    }
}

/// Local store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_backend")]
    pub backend: StoreBackend,

    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_backend() -> StoreBackend {
    StoreBackend::File
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("guardian").to_string_lossy().to_string())
        .unwrap_or_else(|| "./guardian_data".to_string())
}

impl StoreConfig {
    /// Data directory with a leading `~` expanded to the home directory
    pub fn data_path(&self) -> PathBuf {
        expand_home(&self.data_dir)
    }

    fn resolve_home(&mut self) {
        self.data_dir = self.data_path().to_string_lossy().into_owned();
    }
}

fn expand_home(path: &str) -> PathBuf {
    let rest = if path == "~" {
        Some("")
    } else {
        path.strip_prefix("~/")
    };

    match (rest, dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            data_dir: default_data_dir(),
        }
    }
}

/// Delays of the simulated asynchronous work
#[derive(Debug, Clone, Deserialize)]
pub struct TimingConfig {
    #[serde(default = "default_reply_delay")]
    pub assistant_reply_delay_ms: u64,

    #[serde(default = "default_reveal_delay")]
    pub onboarding_reveal_delay_ms: u64,
}

fn default_reply_delay() -> u64 {
    1000
}

fn default_reveal_delay() -> u64 {
    1000
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            assistant_reply_delay_ms: default_reply_delay(),
            onboarding_reveal_delay_ms: default_reveal_delay(),
        }
    }
}

impl TimingConfig {
    pub fn assistant_reply_delay(&self) -> Duration {
        Duration::from_millis(self.assistant_reply_delay_ms)
    }

    pub fn onboarding_reveal_delay(&self) -> Duration {
        Duration::from_millis(self.onboarding_reveal_delay_ms)
    }
}

/// Local API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8086
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ApiConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        let mut config: Config = toml::from_str(content)?;
        config.store.resolve_home();
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("guardian").join("config.toml")),
            Some(PathBuf::from("./guardian.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // Store overrides
        if let Ok(data_dir) = std::env::var("GUARDIAN_DATA_DIR") {
            self.store.data_dir = data_dir;
            self.store.resolve_home();
        }
        if let Ok(backend) = std::env::var("GUARDIAN_STORE_BACKEND") {
            match backend.parse() {
                Ok(b) => self.store.backend = b,
                Err(e) => tracing::warn!("Ignoring GUARDIAN_STORE_BACKEND: {}", e),
            }
        }

        // API overrides
        if let Ok(host) = std::env::var("GUARDIAN_API_HOST") {
            self.api.host = host;
        }
        if let Ok(port) = std::env::var("GUARDIAN_API_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        // Logging overrides
        if let Ok(level) = std::env::var("GUARDIAN_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("GUARDIAN_LOG_FORMAT") {
            self.logging.format = format;
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

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Guardian Configuration
#
# Environment variables override these settings:
# - GUARDIAN_DATA_DIR
# - GUARDIAN_STORE_BACKEND
# - GUARDIAN_API_HOST
# - GUARDIAN_API_PORT
# - GUARDIAN_LOG_LEVEL
# - GUARDIAN_LOG_FORMAT

[store]
# Where the onboarding flag, medication schedule and device limits live:
# file, sqlite or memory (memory forgets everything on exit)
backend = "file"

# Directory for the local data files (a leading ~ means your home directory)
data_dir = '@DATA_DIR@'

[timing]
# Delay before the assistant answers a chat message (ms)
assistant_reply_delay_ms = 1000

# Delay before the first-run setup dialog appears (ms)
onboarding_reveal_delay_ms = 1000

[api]
# Local dashboard server; keep it on loopback
host = "127.0.0.1"
port = 8086

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json
format = "pretty"
"#
    .replace("@DATA_DIR@", &default_data_dir())
}
