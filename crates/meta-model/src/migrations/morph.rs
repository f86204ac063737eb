//! Morph column strategies
//!
//! A polymorphic relation is stored as a `{name}_type` / `{name}_id` column
//! pair. The strategy decides the key type of the `{name}_id` column.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::MigrationError;

/// Key type used for polymorphic relation columns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MorphType {
    /// Whatever the schema collaborator uses for plain `morphs`
    #[default]
    Default,
    /// Auto-increment integer keys
    Numeric,
    /// UUID keys
    Uuid,
    /// ULID keys
    Ulid,
}

impl MorphType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MorphType::Default => "default",
            MorphType::Numeric => "numeric",
            MorphType::Uuid => "uuid",
            MorphType::Ulid => "ulid",
        }
    }

    /// Check if no explicit strategy was selected
    pub fn is_default(&self) -> bool {
        matches!(self, MorphType::Default)
    }
}

impl FromStr for MorphType {
    type Err = MigrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "default" => Ok(MorphType::Default),
            "numeric" => Ok(MorphType::Numeric),
            "uuid" => Ok(MorphType::Uuid),
            "ulid" => Ok(MorphType::Ulid),
            _ => Err(MigrationError::UnknownMorphType(s.to_string())),
        }
    }
}

impl fmt::Display for MorphType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
