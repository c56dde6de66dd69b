//! Config struct and loading logic.
//!
//! Priority (highest to lowest):
//! 1. CLI flags (applied by the binary after loading)
//! 2. Environment variables
//! 3. `codelens.toml` in the working directory
//! 4. `~/.config/codelens/config.toml` (global defaults)
//! 5. Built-in defaults

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::constants;
use crate::env::Env;
use crate::models::ProviderName;

/// Errors during config loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseFile {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid config value for {field}: {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub provider: ProviderConfig,
    pub server: ServerConfig,
    pub history: HistoryConfig,
}

/// LLM provider configuration.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub name: ProviderName,
    /// Model identifier. `None` means the provider's default model.
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
}

impl ProviderConfig {
    /// The configured model, or the provider's default.
    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.name.default_model())
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("name", &self.name)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to bind, e.g. `0.0.0.0:3000`.
    pub bind: String,
    /// Maximum accepted request body size in bytes.
    pub body_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: constants::DEFAULT_BIND.to_string(),
            body_limit: constants::DEFAULT_BODY_LIMIT,
        }
    }
}

/// Review history persistence configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Explicit history file. Defaults to `~/.config/codelens/history.json`.
    pub path: Option<PathBuf>,
    /// Maximum number of entries kept.
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: None,
            capacity: constants::HISTORY_CAPACITY,
        }
    }
}

impl HistoryConfig {
    /// Resolve the history file location, if one can be determined.
    pub fn resolved_path(&self) -> Option<PathBuf> {
        self.path.clone().or_else(|| {
            dirs::config_dir().map(|d| {
                d.join(constants::CONFIG_DIR)
                    .join(constants::HISTORY_FILENAME)
            })
        })
    }
}

/// One config file as written on disk.
///
/// Every field is optional so a layer overrides exactly the keys it sets,
/// even when the value equals the built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ConfigLayer {
    provider: ProviderLayer,
    server: ServerLayer,
    history: HistoryLayer,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ProviderLayer {
    name: Option<ProviderName>,
    model: Option<String>,
    base_url: Option<String>,
    api_key: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ServerLayer {
    bind: Option<String>,
    body_limit: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct HistoryLayer {
    path: Option<PathBuf>,
    capacity: Option<usize>,
}

impl Config {
    /// Load configuration with proper layering.
    ///
    /// Reads the global config, then `codelens.toml` in `work_dir`, then
    /// applies environment variable overrides and validates the result.
    pub fn load(work_dir: Option<&Path>, env: &Env) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global = Self::load_file(&global_path)?;
                config.merge(global);
            }
        }

        if let Some(dir) = work_dir {
            let local_path = dir.join(constants::CONFIG_FILENAME);
            if local_path.exists() {
                let local = Self::load_file(&local_path)?;
                config.merge(local);
            }
        }

        config.apply_env_vars(env);
        config.validate()?;

        Ok(config)
    }

    /// Load a config layer from a specific file.
    fn load_file(path: &Path) -> Result<ConfigLayer, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseFile {
            path: path.to_path_buf(),
            source: e,
        })
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(constants::CONFIG_DIR).join("config.toml"))
    }

    /// Merge a file layer into this config; every key the layer sets wins.
    fn merge(&mut self, layer: ConfigLayer) {
        let ConfigLayer {
            provider,
            server,
            history,
        } = layer;

        if let Some(name) = provider.name {
            self.provider.name = name;
        }
        if provider.model.is_some() {
            self.provider.model = provider.model;
        }
        if provider.base_url.is_some() {
            self.provider.base_url = provider.base_url;
        }
        if provider.api_key.is_some() {
            self.provider.api_key = provider.api_key;
        }

        if let Some(bind) = server.bind {
            self.server.bind = bind;
        }
        if let Some(limit) = server.body_limit {
            self.server.body_limit = limit;
        }

        if history.path.is_some() {
            self.history.path = history.path;
        }
        if let Some(capacity) = history.capacity {
            self.history.capacity = capacity;
        }
    }

    /// Reject values no component can work with.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.history.capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "history.capacity",
                message: "must be at least 1".to_string(),
            });
        }
        if self.server.body_limit == 0 {
            return Err(ConfigError::Invalid {
                field: "server.body_limit",
                message: "must be at least 1 byte".to_string(),
            });
        }
        Ok(())
    }

    /// Apply environment variable overrides.
    fn apply_env_vars(&mut self, env: &Env) {
        if let Some(val) = env.get(constants::ENV_PROVIDER) {
            match val.parse::<ProviderName>() {
                Ok(name) => self.provider.name = name,
                Err(e) => tracing::warn!("ignoring invalid {}: {e}", constants::ENV_PROVIDER),
            }
        }
        if let Some(val) = env.get(constants::ENV_MODEL) {
            self.provider.model = Some(val);
        }
        if let Some(val) = env.get(constants::ENV_BASE_URL) {
            self.provider.base_url = Some(val);
        }

        // Provider-specific API key resolution
        if let Some(key) = env.first_of(&[
            constants::ENV_API_KEY,
            self.provider.name.api_key_env_var(),
        ]) {
            self.provider.api_key = Some(key);
        }

        if let Some(bind) = env.get(constants::ENV_BIND) {
            self.server.bind = bind;
        } else if let Some(port) = env.get(constants::ENV_PORT) {
            match port.trim().parse::<u16>() {
                Ok(port) => self.server.bind = format!("0.0.0.0:{port}"),
                Err(_) => tracing::warn!("ignoring invalid {}: {port}", constants::ENV_PORT),
            }
        }

        if let Some(path) = env.get(constants::ENV_HISTORY_PATH) {
            self.history.path = Some(PathBuf::from(path));
        }
    }
}
