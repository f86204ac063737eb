//! Error types for customizable migrations
//!
//! Migration faults are raised by the composer itself; schema faults come
//! from the schema collaborator and are passed through untouched.

use thiserror::Error;

/// Result type alias for migration operations
pub type MigrationResult<T> = Result<T, MigrationError>;

/// Result type alias for schema collaborator operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors raised while configuring or running a customizable migration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MigrationError {
    /// A shortcut property that the migration does not declare
    #[error("Undefined property: {migration}::{property}")]
    UnknownConfigurationProperty { migration: String, property: String },

    /// The morph primitive was invoked more than once in a single `create`
    #[error("Using multiple customizable morph calls is unsupported.")]
    DuplicateMorphDefinition,

    /// A morph kind that is not numeric, uuid or ulid
    #[error("Invalid morph type '{0}'. Expected: numeric, uuid or ulid")]
    UnknownMorphType(String),

    /// Error reported by the schema collaborator
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Errors raised by a schema collaborator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("Invalid identifier '{identifier}': {reason}")]
    InvalidIdentifier { identifier: String, reason: String },

    #[error("Table '{0}' has no columns")]
    EmptyTable(String),

    #[error("Schema error: {0}")]
    Other(String),
}

/// Errors raised while loading schema configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for field '{field}': '{value}'. Expected: {expected}")]
    InvalidValue {
        field: String,
        value: String,
        expected: String,
    },

    #[error("Configuration validation failed: {message}")]
    ValidationFailed { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
