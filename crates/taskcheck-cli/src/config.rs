//! # Configuration
//!
//! Optional YAML configuration, looked up in this order:
//!
//! 1. the file given with the global `--config` flag (must exist),
//! 2. `taskcheck.yaml` in the current directory (if present),
//! 3. built-in defaults.
//!
//! Environment variables override the file:
//!
//! - `TASKCHECK_STRICT` (`true`/`false`, `1`/`0`)
//! - `TASKCHECK_MAX_SUGGESTIONS` (non-negative integer)
//!
//! ```yaml
//! max_suggestions: 5
//! strict: false
//! extra_countries: [Kosovo]
//! extra_languages: [Ladin]
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use taskcheck_core::BuiltinDictionary;
use taskcheck_schema::{ValidatorOptions, DEFAULT_MAX_SUGGESTIONS};

/// Configuration file looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = "taskcheck.yaml";

/// Environment variable overriding [`CheckConfig::strict`].
pub const ENV_STRICT: &str = "TASKCHECK_STRICT";
/// Environment variable overriding [`CheckConfig::max_suggestions`].
pub const ENV_MAX_SUGGESTIONS: &str = "TASKCHECK_MAX_SUGGESTIONS";

/// Settings of the `check` subcommand.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckConfig {
    /// Upper bound on "did you mean" suggestions per name.
    pub max_suggestions: usize,
    /// Fail on warnings as well as errors.
    pub strict: bool,
    /// Country names accepted in addition to the built-in table.
    pub extra_countries: Vec<String>,
    /// Language names accepted in addition to the built-in table.
    pub extra_languages: Vec<String>,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            strict: false,
            extra_countries: Vec::new(),
            extra_languages: Vec::new(),
        }
    }
}

impl CheckConfig {
    /// Parse a configuration document. An empty document yields the
    /// defaults.
    pub fn from_yaml(source: &str) -> Result<Self, serde_yaml::Error> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(source)
    }

    /// Load the configuration file and apply environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if an explicit file cannot be read, a file
    /// is not valid configuration, or an override has an invalid value.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::from_file(fallback)?
                } else {
                    tracing::debug!("no configuration file, using defaults");
                    Self::default()
                }
            }
        };
        config.apply_overrides(|var| std::env::var(var).ok())?;
        Ok(config)
    }

    /// Read and parse `path`.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&source).map_err(|source| ConfigError::Invalid {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Apply overrides from `lookup`, which maps a variable name to its
    /// value.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_STRICT) {
            self.strict = match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" | "" => false,
                _ => {
                    return Err(ConfigError::InvalidOverride {
                        var: ENV_STRICT,
                        value,
                    })
                }
            };
        }
        if let Some(value) = lookup(ENV_MAX_SUGGESTIONS) {
            self.max_suggestions =
                value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidOverride {
                        var: ENV_MAX_SUGGESTIONS,
                        value: value.clone(),
                    })?;
        }
        Ok(())
    }

    /// The built-in dictionary extended with the configured names.
    pub fn dictionary(&self) -> BuiltinDictionary {
        BuiltinDictionary::new()
            .with_extra_countries(self.extra_countries.iter().cloned())
            .with_extra_languages(self.extra_languages.iter().cloned())
    }

    pub fn validator_options(&self) -> ValidatorOptions {
        ValidatorOptions {
            max_suggestions: self.max_suggestions,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read configuration file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid configuration file {}: {source}", .path.display())]
    Invalid {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("invalid value '{value}' for {var}")]
    InvalidOverride { var: &'static str, value: String },
}
