//! `orion.toml` configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "orion.toml";

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "ORION_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrionConfig {
    pub storage: StorageSection,
    pub network: NetworkSection,
    pub ai: AiSection,
    pub log: LogSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSection {
    /// The working schema edited by `orion` commands.
    pub schema_path: PathBuf,
    pub projects_path: PathBuf,
    /// Runtime variable snapshot kept between `orion fire` runs.
    pub state_path: PathBuf,
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            schema_path: PathBuf::from("orion.schema.json"),
            projects_path: PathBuf::from(".orion/projects.json"),
            state_path: PathBuf::from(".orion/state.json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkSection {
    pub timeout_secs: u64,
    pub user_agent: Option<String>,
}

impl Default for NetworkSection {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: None,
        }
    }
}

impl NetworkSection {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiSection {
    pub endpoint: Option<String>,
    pub model: Option<String>,
    /// Environment variable holding the API key.
    pub api_key_env: String,
}

impl Default for AiSection {
    fn default() -> Self {
        Self {
            endpoint: None,
            model: None,
            api_key_env: "GEMINI_API_KEY".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSection {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub filter: Option<String>,
}

impl OrionConfig {
    /// Load configuration.
    ///
    /// An explicit path (flag, then `ORION_CONFIG`) must exist. Without one,
    /// `orion.toml` in the working directory is used if present, and
    /// defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let from_env = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        match explicit.map(Path::to_path_buf).or(from_env) {
            Some(path) => Self::from_file(&path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::from_file(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("failed to parse {}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }
}
