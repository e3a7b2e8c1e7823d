pub mod error;

use crate::config::error::ConfigError;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "voicesql.yml";
pub const DEFAULT_STORE_FILE: &str = "voicesql-store.json";

/// Where the JSON-backed store persists its state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

fn default_store_path() -> PathBuf {
    PathBuf::from(DEFAULT_STORE_FILE)
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

/// Settings for the external speech-to-text service. The transcription call
/// itself lives outside this workspace; commands arrive here as plain text.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TranscriptionConfig {
    pub base_url: String,
    /// Name of the environment variable holding the API key. The key itself
    /// never lands in the config file.
    pub api_key_env: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcription: Option<TranscriptionConfig>,
}

/// Read `voicesql.yml` from the given path (or the working directory). A
/// missing file is not an error; defaults apply.
pub fn read_config(config_path: Option<PathBuf>) -> Result<AppConfig, ConfigError> {
    let path = match config_path {
        Some(dir) if dir.is_dir() => dir.join(DEFAULT_CONFIG_FILE),
        Some(file) => file,
        None => PathBuf::from(DEFAULT_CONFIG_FILE),
    };

    if !path.exists() {
        debug!("no config file at {}, using defaults", path.display());
        return Ok(AppConfig::default());
    }

    load_config_file(&path)
}

fn load_config_file(path: &Path) -> Result<AppConfig, ConfigError> {
    let file = fs::File::open(path)?;
    let config: AppConfig = serde_yaml::from_reader(file)?;
    Ok(config)
}
