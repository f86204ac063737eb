//! Schema Builder - PostgreSQL rendering of schema changes
//!
//! Collects the statements a migration would run instead of executing them,
//! which makes it usable for dry runs, SQL dumps and tests.

use tracing::debug;

use super::{validate_identifier, Blueprint, Schema};
use crate::config::SchemaConfig;
use crate::error::{MigrationResult, SchemaError};
use crate::migrations::MorphType;

/// Schema implementation that records DDL statements
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    statements: Vec<String>,
    config: SchemaConfig,
}

impl SchemaBuilder {
    /// Create a new schema builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a schema builder with explicit defaults
    pub fn with_config(config: SchemaConfig) -> Self {
        Self {
            statements: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &SchemaConfig {
        &self.config
    }

    /// Get all SQL statements
    pub fn to_sql(&self) -> Vec<String> {
        self.statements.clone()
    }

    /// All statements as a single SQL string
    pub fn build(&self) -> String {
        self.statements.join("\n")
    }

    fn run<F>(&mut self, table: &str, mode: TableMode, define: F) -> MigrationResult<()>
    where
        F: FnOnce(&mut TableBuilder) -> MigrationResult<()>,
    {
        validate_identifier(table)?;

        let mut table_builder = TableBuilder::with_config(table, mode, self.config.clone());
        define(&mut table_builder)?;

        if let Some(error) = table_builder.invalid.take() {
            return Err(error.into());
        }

        if mode == TableMode::Create && table_builder.columns.is_empty() {
            return Err(SchemaError::EmptyTable(table.to_string()).into());
        }

        let statements = table_builder.to_sql();
        debug!("Rendered {} statement(s) for table {}", statements.len(), table);
        self.statements.extend(statements);
        Ok(())
    }
}

impl Schema for SchemaBuilder {
    type Blueprint = TableBuilder;

    fn create<F>(&mut self, table: &str, define: F) -> MigrationResult<()>
    where
        F: FnOnce(&mut TableBuilder) -> MigrationResult<()>,
    {
        self.run(table, TableMode::Create, define)
    }

    fn table<F>(&mut self, table: &str, alter: F) -> MigrationResult<()>
    where
        F: FnOnce(&mut TableBuilder) -> MigrationResult<()>,
    {
        self.run(table, TableMode::Alter, alter)
    }

    fn drop_if_exists(&mut self, table: &str) -> MigrationResult<()> {
        validate_identifier(table)?;
        self.statements.push(format!("DROP TABLE IF EXISTS {};", table));
        Ok(())
    }
}

/// Whether a table builder describes a new table or changes to one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableMode {
    Create,
    Alter,
}

/// Table builder for CREATE TABLE and ALTER TABLE statements
#[derive(Debug, Clone)]
pub struct TableBuilder {
    table_name: String,
    mode: TableMode,
    config: SchemaConfig,
    columns: Vec<String>,
    constraints: Vec<String>,
    dropped_columns: Vec<String>,
    indexes: Vec<String>,
    invalid: Option<SchemaError>,
}

impl TableBuilder {
    pub fn new(table_name: &str) -> Self {
        Self::with_config(table_name, TableMode::Create, SchemaConfig::default())
    }

    pub fn with_config(table_name: &str, mode: TableMode, config: SchemaConfig) -> Self {
        Self {
            table_name: table_name.to_string(),
            mode,
            config,
            columns: Vec::new(),
            constraints: Vec::new(),
            dropped_columns: Vec::new(),
            indexes: Vec::new(),
            invalid: None,
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn mode(&self) -> TableMode {
        self.mode
    }

    /// Remember the first identifier that is unsafe to render
    fn check_identifier(&mut self, identifier: &str) {
        if self.invalid.is_some() {
            return;
        }
        if let Err(error) = validate_identifier(identifier) {
            self.invalid = Some(error);
        }
    }

    /// Add an ID column (auto-increment primary key)
    pub fn id(&mut self, name: &str) -> &mut Self {
        self.columns.push(format!("{} BIGSERIAL PRIMARY KEY", name));
        self
    }

    /// Add a UUID column
    pub fn uuid(&mut self, name: &str) -> &mut Self {
        self.columns
            .push(format!("{} UUID DEFAULT gen_random_uuid()", name));
        self
    }

    /// Add a string column, `None` uses the configured default length
    pub fn string(&mut self, name: &str, length: Option<u32>) -> &mut Self {
        let length = length.unwrap_or(self.config.default_string_length);
        self.columns.push(format!("{} VARCHAR({})", name, length));
        self
    }

    pub fn text(&mut self, name: &str) -> &mut Self {
        self.columns.push(format!("{} TEXT", name));
        self
    }

    /// Add an integer column
    pub fn integer(&mut self, name: &str) -> &mut Self {
        self.columns.push(format!("{} INTEGER", name));
        self
    }

    /// Add a boolean column
    pub fn boolean(&mut self, name: &str) -> &mut Self {
        self.columns.push(format!("{} BOOLEAN", name));
        self
    }

    /// Add timestamp columns
    pub fn timestamps(&mut self) -> &mut Self {
        self.columns
            .push("created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP".to_string());
        self.columns
            .push("updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP".to_string());
        self
    }

    /// Add a foreign key constraint
    pub fn foreign_key(
        &mut self,
        column: &str,
        references_table: &str,
        references_column: &str,
    ) -> &mut Self {
        self.constraints.push(format!(
            "FOREIGN KEY ({}) REFERENCES {} ({})",
            column, references_table, references_column
        ));
        self
    }

    /// Add a unique constraint
    pub fn unique(&mut self, columns: &[&str]) -> &mut Self {
        self.constraints
            .push(format!("UNIQUE ({})", columns.join(", ")));
        self
    }

    /// Create an index, named `{table}_{columns}_index` unless given a name
    pub fn index(&mut self, columns: &[&str], index_name: Option<&str>) -> &mut Self {
        if let Some(name) = index_name {
            self.check_identifier(name);
        }
        let default_name = format!("{}_{}_index", self.table_name, columns.join("_"));
        let index_name = index_name.unwrap_or(&default_name);
        self.indexes.push(format!(
            "CREATE INDEX {} ON {} ({});",
            index_name,
            self.table_name,
            columns.join(", ")
        ));
        self
    }

    /// Drop both columns of a morph relation
    pub fn drop_morphs(&mut self, name: &str) -> &mut Self {
        self.drop_column(&format!("{}_type", name));
        self.drop_column(&format!("{}_id", name))
    }

    fn add_morph_columns(
        &mut self,
        name: &str,
        key_type: MorphType,
        nullable: bool,
        index: Option<&str>,
    ) -> &mut Self {
        let key_type = if key_type.is_default() {
            self.config.default_morph_key_type
        } else {
            key_type
        };
        let id_type = match key_type {
            MorphType::Default | MorphType::Numeric => "BIGINT",
            MorphType::Uuid => "UUID",
            MorphType::Ulid => "CHAR(26)",
        };
        let null = if nullable { "NULL" } else { "NOT NULL" };

        let type_column = format!("{}_type", name);
        let id_column = format!("{}_id", name);
        self.check_identifier(&type_column);
        self.check_identifier(&id_column);

        self.columns.push(format!(
            "{} VARCHAR({}) {}",
            type_column, self.config.default_string_length, null
        ));
        self.columns.push(format!("{} {} {}", id_column, id_type, null));
        self.index(&[type_column.as_str(), id_column.as_str()], index)
    }

    /// Render the statements for this table
    pub fn to_sql(&self) -> Vec<String> {
        let mut statements = Vec::new();

        match self.mode {
            TableMode::Create => {
                let mut parts = self.columns.clone();
                parts.extend(self.constraints.clone());

                statements.push(format!(
                    "CREATE TABLE {} (\n    {}\n);",
                    self.table_name,
                    parts.join(",\n    ")
                ));
            }
            TableMode::Alter => {
                for column in &self.columns {
                    statements.push(format!(
                        "ALTER TABLE {} ADD COLUMN {};",
                        self.table_name, column
                    ));
                }
                for constraint in &self.constraints {
                    statements.push(format!(
                        "ALTER TABLE {} ADD {};",
                        self.table_name, constraint
                    ));
                }
                for column in &self.dropped_columns {
                    statements.push(format!(
                        "ALTER TABLE {} DROP COLUMN {};",
                        self.table_name, column
                    ));
                }
            }
        }

        statements.extend(self.indexes.clone());
        statements
    }
}

impl Blueprint for TableBuilder {
    fn morphs(&mut self, name: &str, index: Option<&str>) -> &mut Self {
        self.add_morph_columns(name, MorphType::Default, false, index)
    }

    fn numeric_morphs(&mut self, name: &str, index: Option<&str>) -> &mut Self {
        self.add_morph_columns(name, MorphType::Numeric, false, index)
    }

    fn uuid_morphs(&mut self, name: &str, index: Option<&str>) -> &mut Self {
        self.add_morph_columns(name, MorphType::Uuid, false, index)
    }

    fn ulid_morphs(&mut self, name: &str, index: Option<&str>) -> &mut Self {
        self.add_morph_columns(name, MorphType::Ulid, false, index)
    }

    fn nullable_morphs(&mut self, name: &str, index: Option<&str>) -> &mut Self {
        self.add_morph_columns(name, MorphType::Default, true, index)
    }

    fn nullable_numeric_morphs(&mut self, name: &str, index: Option<&str>) -> &mut Self {
        self.add_morph_columns(name, MorphType::Numeric, true, index)
    }

    fn nullable_uuid_morphs(&mut self, name: &str, index: Option<&str>) -> &mut Self {
        self.add_morph_columns(name, MorphType::Uuid, true, index)
    }

    fn nullable_ulid_morphs(&mut self, name: &str, index: Option<&str>) -> &mut Self {
        self.add_morph_columns(name, MorphType::Ulid, true, index)
    }

    fn column(&mut self, name: &str, column_type: &str) -> &mut Self {
        self.columns.push(format!("{} {}", name, column_type));
        self
    }

    fn drop_column(&mut self, name: &str) -> &mut Self {
        self.dropped_columns.push(name.to_string());
        self
    }
}
