//! Configuration loading for the LSP engine
//!
//! Loads settings from YAML configuration files. Snippet settings can be
//! overridden at runtime by the client through `initializationOptions` and
//! `workspace/didChangeConfiguration`.

use flow_intellisense::Settings;
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Section name used by clients for snippet settings
pub const SETTINGS_SECTION: &str = "flow-helper";

/// Configuration file names looked up in the workspace root, in order
const CONFIG_FILES: &[&str] = &[".flow-lsp.yaml", ".flow-lsp.yml", "flow-lsp.yaml", "flow-lsp.yml"];

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid flow-helper settings: {0}")]
    Settings(#[from] serde_json::Error),
}

/// Main engine configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Engine settings
    pub engine: EngineSettings,
    /// Snippet settings handed to every completion request
    #[serde(rename = "flow-helper", alias = "settings")]
    pub settings: Settings,
}

/// Core engine settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Server name
    pub name: String,
    /// Log level (trace, debug, info, warn, error), used when `RUST_LOG` is unset.
    /// Read once at startup from the config in the working directory.
    pub log_level: String,
    /// Look for a config file in the workspace root
    pub workspace_discovery: bool,
    /// Language ids that get diagnostics
    pub languages: Vec<String>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            name: "flow-lsp".to_string(),
            log_level: "info".to_string(),
            workspace_discovery: true,
            languages: ["vue", "html", "typescript", "mdx"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load configuration from the first config file in the workspace root.
    ///
    /// Defaults when there is none; a file that exists but is broken is an error.
    pub fn load_default(workspace_root: &Path) -> Result<Self, ConfigError> {
        match Self::find_config_file(workspace_root) {
            Some(path) => {
                tracing::info!("Loading config from {}", path.display());
                Self::load(&path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Find the config file in a workspace root
    pub fn find_config_file(workspace_root: &Path) -> Option<PathBuf> {
        CONFIG_FILES
            .iter()
            .map(|name| workspace_root.join(name))
            .find(|candidate| candidate.is_file())
    }

    /// Apply a client settings payload such as `{"flow-helper": {"quotes": "single"}}`.
    ///
    /// Keys present in the payload override the current settings; keys it
    /// leaves out keep their value. Returns whether the payload carried the
    /// settings section.
    pub fn apply_client_settings(&mut self, payload: &Value) -> Result<bool, ConfigError> {
        let Some(section) = payload.get(SETTINGS_SECTION) else {
            return Ok(false);
        };

        let merged = match (serde_json::to_value(self.settings)?, section) {
            (Value::Object(mut current), Value::Object(overrides)) => {
                for (key, value) in overrides {
                    current.insert(settings_key(key).to_string(), value.clone());
                }
                Value::Object(current)
            }
            _ => section.clone(),
        };

        self.settings = Settings::deserialize(merged)?;
        Ok(true)
    }

    /// Log filter directive: `RUST_LOG` when set, otherwise `engine.log_level`
    pub fn log_directive(&self, env: Option<String>) -> String {
        env.filter(|directive| !directive.trim().is_empty())
            .unwrap_or_else(|| self.engine.log_level.clone())
    }

    /// Whether diagnostics are published for a language
    pub fn validates(&self, language_id: &str) -> bool {
        self.engine.languages.iter().any(|lang| lang == language_id)
    }
}

/// Serialized name of a settings key given in any accepted spelling
fn settings_key(key: &str) -> &str {
    match key {
        "indentSize" | "indent_size" => "indent-size",
        other => other,
    }
}
