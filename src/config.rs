use std::{fs, path::{Path, PathBuf}};
use serde::{Serialize, Deserialize};
use anyhow::{self, Context};

use crate::store::DEFAULT_KEY;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub key: String
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig { data_dir: PathBuf::from(".saldo"), key: DEFAULT_KEY.to_owned() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub currency: String
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig { currency: String::from("Rp") }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub display: DisplayConfig
}

impl AppConfig {
    pub const DEFAULT_PATH: &'static str = "saldo.toml";

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str(content)
            .with_context(|| "failed to parse config file")?;
        return Ok(config);
    }

    pub fn read(filepath: impl AsRef<Path>) -> anyhow::Result<Self> {
        let filepath = filepath.as_ref();
        let file_content = fs::read_to_string(filepath)
            .with_context(|| format!("failed to read config file {}", filepath.display()))?;
        return Self::parse(&file_content);
    }

    /// Reads `filepath` when given. Otherwise the default location is
    /// used if it exists, and built-in defaults if it doesn't.
    pub fn locate(filepath: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = filepath {
            return Self::read(path);
        }
        let default_path = Path::new(Self::DEFAULT_PATH);
        if default_path.is_file() {
            return Self::read(default_path);
        }
        return Ok(AppConfig::default());
    }
}
