use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_NAME: &str = env!("CARGO_PKG_NAME");

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: Option<String>,
    pub server: ServerConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// `host:port` string to bind
    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub tasks_file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            tasks_file: dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("taskpad")
                .join("tasks.json"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            server: ServerConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration: an explicit path must load; otherwise the first
    /// readable of `<config_dir>/taskpad/taskpad.yml` and `./taskpad.yml`
    /// wins, and defaults apply when neither is usable.
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        let mut candidates = vec![PathBuf::from(format!("{}.yml", CONFIG_NAME))];
        if let Some(config_dir) = dirs::config_dir() {
            candidates.insert(0, config_dir.join(CONFIG_NAME).join(format!("{}.yml", CONFIG_NAME)));
        }

        for candidate in candidates.iter().filter(|c| c.exists()) {
            match Self::load_from_file(candidate) {
                Ok(config) => return Ok(config),
                Err(e) => log::warn!("Ignoring config {}: {:#}", candidate.display(), e),
            }
        }

        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}
