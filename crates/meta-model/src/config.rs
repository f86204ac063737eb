//! Schema defaults
//!
//! Settings the reference schema builder falls back to when a migration does
//! not say otherwise. Loaded from the environment or from a YAML document.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

use crate::error::ConfigError;
use crate::migrations::MorphType;

/// Environment variable holding the default morph key type
pub const MORPH_KEY_TYPE_ENV: &str = "META_MODEL_MORPH_KEY_TYPE";

/// Environment variable holding the default string column length
pub const STRING_LENGTH_ENV: &str = "META_MODEL_STRING_LENGTH";

/// Defaults used by [`SchemaBuilder`](crate::schema::SchemaBuilder)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    /// Key type of `{name}_id` when a migration uses plain `morphs`
    pub default_morph_key_type: MorphType,
    /// Length of `VARCHAR` columns, including `{name}_type`
    pub default_string_length: u32,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            default_morph_key_type: MorphType::Default,
            default_string_length: 255,
        }
    }
}

impl SchemaConfig {
    /// Load configuration from environment variables, keeping defaults for
    /// anything unset
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(value) = env::var(MORPH_KEY_TYPE_ENV) {
            config.default_morph_key_type =
                value.parse().map_err(|_| ConfigError::InvalidValue {
                    field: MORPH_KEY_TYPE_ENV.to_string(),
                    value: value.clone(),
                    expected: "default, numeric, uuid or ulid".to_string(),
                })?;
        }

        if let Ok(value) = env::var(STRING_LENGTH_ENV) {
            config.default_string_length =
                value.parse().map_err(|_| ConfigError::InvalidValue {
                    field: STRING_LENGTH_ENV.to_string(),
                    value: value.clone(),
                    expected: "a positive integer".to_string(),
                })?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_string_length == 0 || self.default_string_length > 10_485_760 {
            return Err(ConfigError::ValidationFailed {
                message: format!(
                    "default_string_length must be between 1 and 10485760, got {}",
                    self.default_string_length
                ),
            });
        }
        Ok(())
    }
}
