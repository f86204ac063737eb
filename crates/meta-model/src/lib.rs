//! # meta-model: customizable migrations and models
//!
//! Declare a table once, then compose it at migration time: extra columns,
//! hooks around create and drop, and the key type used for polymorphic
//! relations. Models get overridable table names and attribute lists
//! merged with what they declare.
//!
//! DDL itself is left to a [`Schema`] implementation; [`SchemaBuilder`]
//! renders PostgreSQL statements.

pub mod config;
pub mod error;
pub mod migrations;
pub mod model;
pub mod naming;
pub mod schema;

pub use config::SchemaConfig;
pub use error::{ConfigError, MigrationError, MigrationResult, SchemaError, SchemaResult};
pub use migrations::{
    Columns, CustomizableMigration, Migration, MigrationDirection, ModelMigration, MorphType,
    TableCallback, TableDefinition,
};
pub use model::{AttributeOverride, Casts, CustomizableModel};
pub use schema::{Blueprint, Schema, SchemaBuilder, TableBuilder, TableMode};
