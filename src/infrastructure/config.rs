use crate::domain::error::SignAidError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_enable_emoji")]
    pub enable_emoji: bool,
    pub http_proxy: Option<String>,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub speech: SpeechConfig,
    #[serde(default)]
    pub logging: Logging,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct StorageConfig {
    pub path: Option<String>,
    #[serde(default)]
    pub in_memory: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SpeechConfig {
    #[serde(default = "default_language")]
    pub language: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Logging {
    #[serde(default = "default_enable")]
    pub enable: bool,
    pub path: Option<String>,
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl BackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
        }
    }
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            enable: true,
            path: None,
            level: "WARN".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            enable_emoji: true,
            http_proxy: None,
            backend: BackendConfig::default(),
            storage: StorageConfig::default(),
            speech: SpeechConfig::default(),
            logging: Logging::default(),
        }
    }
}

// Defaults
fn default_theme() -> String {
    "temp".to_string()
}
fn default_enable_emoji() -> bool {
    true
}
fn default_base_url() -> String {
    // Flask backend 默认端口
    "http://localhost:5001".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_connect_timeout_secs() -> u64 {
    10
}
fn default_language() -> String {
    "en-US".to_string()
}
fn default_enable() -> bool {
    true
}
fn default_log_level() -> String {
    "WARN".to_string()
}

pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("signaid").join("config.toml"))
}

/// Get database path (storage.path, or the config directory by default)
pub fn get_database_path(config: &Config) -> PathBuf {
    if let Some(path) = config.storage.path.as_deref() {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    // ~/.config/signaid/signaid.db (Linux)
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("signaid")
        .join("signaid.db")
}

pub fn load_config() -> Result<Config, SignAidError> {
    match get_config_path() {
        Some(path) => load_config_from(&path),
        None => Ok(Config::default()),
    }
}

/// Load config from an explicit path, falling back to defaults when the file
/// is missing or unparsable.
pub fn load_config_from(path: &Path) -> Result<Config, SignAidError> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path)?;
    match toml::from_str::<Config>(&content) {
        Ok(config) => Ok(config),
        Err(e) => {
            eprintln!(
                "Warning: Failed to parse config file: {}. Using defaults.",
                e
            );
            Ok(Config::default())
        }
    }
}

pub fn generate_config_sample() -> Result<(), SignAidError> {
    let Some(path) = get_config_path() else {
        return Err(SignAidError::Config(
            "Cannot determine config directory".to_string(),
        ));
    };

    if path.exists() {
        eprintln!("Config file already exists at: {}", path.display());
        return Ok(());
    }

    write_config_sample(&path)?;
    println!("Generated config file at: {}", path.display());
    Ok(())
}

pub fn write_config_sample(path: &Path) -> Result<(), SignAidError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let sample = Config::default();
    let toml_content = toml::to_string_pretty(&sample)
        .map_err(|e| SignAidError::Config(format!("Failed to serialize config: {}", e)))?;
    fs::write(path, toml_content)
        .map_err(|e| SignAidError::Config(format!("Failed to write config file: {}", e)))?;

    Ok(())
}
