//! Configuration file loading and parsing.

use crate::env::{vars, Environment};
use crate::types::{CasebookConfig, TIMELINE_FILTERS};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Location of the config file relative to the project directory.
pub const CONFIG_FILE: &str = ".casebook/config.yaml";

/// Config loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read config: {source}")]
    ReadError {
        #[from]
        source: std::io::Error,
    },

    #[error("invalid YAML at line {}: {message}", line.map(|l| l.to_string()).unwrap_or_else(|| "unknown".to_string()))]
    ParseError { line: Option<usize>, message: String },

    #[error("validation error: {message}")]
    ValidationError { message: String },

    #[error("environment variable not found: {var}")]
    EnvVarNotFound { var: String },
}

/// Configuration loader.
pub struct ConfigLoader {
    base_path: PathBuf,
}

impl ConfigLoader {
    /// Create a loader for the given project directory.
    pub fn new(project_dir: impl AsRef<Path>) -> Self {
        Self {
            base_path: project_dir.as_ref().to_path_buf(),
        }
    }

    /// Path of the project config file, honouring `CASEBOOK_CONFIG`.
    pub fn config_path(&self) -> PathBuf {
        match std::env::var(vars::CASEBOOK_CONFIG) {
            Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => self.base_path.join(CONFIG_FILE),
        }
    }

    /// Load the project config, falling back to defaults when absent.
    pub fn load(&self) -> Result<CasebookConfig, ConfigError> {
        let config_path = self.config_path();

        if !config_path.exists() {
            let mut config = CasebookConfig::default();
            apply_overrides(&mut config, Environment::get(vars::CASEBOOK_API_URL));
            validate(&config)?;
            return Ok(config);
        }

        Self::read(&config_path)
    }

    /// Load an explicitly named config file, which must exist.
    pub fn load_from(path: impl AsRef<Path>) -> Result<CasebookConfig, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }
        Self::read(path)
    }

    fn read(path: &Path) -> Result<CasebookConfig, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let expanded = expand_env_vars(&contents)?;

        let mut config: CasebookConfig = serde_yaml::from_str(&expanded)
            .map_err(|e| ConfigError::ParseError {
                line: e.location().map(|l| l.line()),
                message: e.to_string(),
            })?;

        apply_overrides(&mut config, Environment::get(vars::CASEBOOK_API_URL));
        validate(&config)?;
        Ok(config)
    }

    /// Save configuration to the project config file.
    pub fn save(&self, config: &CasebookConfig) -> Result<PathBuf, ConfigError> {
        let config_path = self.config_path();
        Self::save_to(&config_path, config)?;
        Ok(config_path)
    }

    /// Save configuration to an explicit path, creating parent directories.
    pub fn save_to(path: impl AsRef<Path>, config: &CasebookConfig) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }

        let yaml = serde_yaml::to_string(config)
            .map_err(|e| ConfigError::ParseError {
                line: None,
                message: e.to_string(),
            })?;

        std::fs::write(path, yaml)?;
        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new(std::env::current_dir().unwrap_or_default())
    }
}

/// `CASEBOOK_API_URL` replaces `api.base_url` when set.
fn apply_overrides(config: &mut CasebookConfig, api_url: Option<String>) {
    if let Some(url) = api_url {
        config.api.base_url = url;
    }
}

/// Expand environment variables in the form `${VAR}` or `${VAR:-default}`.
pub fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
    let re = regex::Regex::new(r"\$\{([^}:]+)(?::-([^}]*))?\}").map_err(|e| {
        ConfigError::ValidationError {
            message: e.to_string(),
        }
    })?;

    let mut result = content.to_string();
    for cap in re.captures_iter(content) {
        let full_match = &cap[0];
        let var_name = &cap[1];
        let default = cap.get(2).map(|m| m.as_str());

        let value = match std::env::var(var_name) {
            Ok(v) => v,
            Err(_) => match default {
                Some(d) => d.to_string(),
                None => {
                    return Err(ConfigError::EnvVarNotFound {
                        var: var_name.to_string(),
                    })
                }
            },
        };

        result = result.replace(full_match, &value);
    }

    Ok(result)
}

/// Validate configuration values.
pub fn validate(config: &CasebookConfig) -> Result<(), ConfigError> {
    if config.api.request_timeout_secs == 0 {
        return Err(ConfigError::ValidationError {
            message: "api.request_timeout_secs must be greater than 0".to_string(),
        });
    }

    if config.api.base_url.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            message: "api.base_url must not be empty".to_string(),
        });
    }

    let filter = config.timeline.default_filter.trim().to_ascii_lowercase();
    if !TIMELINE_FILTERS.contains(&filter.as_str()) {
        return Err(ConfigError::ValidationError {
            message: format!(
                "timeline.default_filter must be one of {}, got '{}'",
                TIMELINE_FILTERS.join(", "),
                config.timeline.default_filter
            ),
        });
    }

    if config.timeline.unknown_actor.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            message: "timeline.unknown_actor must not be blank".to_string(),
        });
    }

    Ok(())
}
