//! Schema collaborator contract
//!
//! Migrations never emit DDL themselves. They describe tables through a
//! [`Blueprint`] handed out by a [`Schema`], and the schema decides what
//! that means: [`SchemaBuilder`] renders PostgreSQL statements, a host
//! framework might execute them against a live connection.

pub mod identifier;
pub mod schema_builder;

pub use identifier::validate_identifier;
pub use schema_builder::{SchemaBuilder, TableBuilder, TableMode};

use crate::error::MigrationResult;

/// Schema operations a migration relies on
pub trait Schema {
    /// Table definition handed to create and alter callbacks
    type Blueprint: Blueprint;

    /// Create a new table, letting `define` describe its columns
    fn create<F>(&mut self, table: &str, define: F) -> MigrationResult<()>
    where
        F: FnOnce(&mut Self::Blueprint) -> MigrationResult<()>;

    /// Alter an existing table
    fn table<F>(&mut self, table: &str, alter: F) -> MigrationResult<()>
    where
        F: FnOnce(&mut Self::Blueprint) -> MigrationResult<()>;

    /// Drop a table if it exists
    fn drop_if_exists(&mut self, table: &str) -> MigrationResult<()>;
}

/// Column primitives a table definition exposes
///
/// Every morph primitive adds a `{name}_type` / `{name}_id` pair and an
/// index over both columns. `index` overrides the generated index name.
pub trait Blueprint {
    /// Morph columns keyed the way the schema defaults say
    fn morphs(&mut self, name: &str, index: Option<&str>) -> &mut Self;

    fn numeric_morphs(&mut self, name: &str, index: Option<&str>) -> &mut Self;

    fn uuid_morphs(&mut self, name: &str, index: Option<&str>) -> &mut Self;

    fn ulid_morphs(&mut self, name: &str, index: Option<&str>) -> &mut Self;

    fn nullable_morphs(&mut self, name: &str, index: Option<&str>) -> &mut Self;

    fn nullable_numeric_morphs(&mut self, name: &str, index: Option<&str>) -> &mut Self;

    fn nullable_uuid_morphs(&mut self, name: &str, index: Option<&str>) -> &mut Self;

    fn nullable_ulid_morphs(&mut self, name: &str, index: Option<&str>) -> &mut Self;

    /// Add a column with a raw SQL type
    fn column(&mut self, name: &str, column_type: &str) -> &mut Self;

    /// Drop a column from an existing table
    fn drop_column(&mut self, name: &str) -> &mut Self;
}
