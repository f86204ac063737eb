//! Customizable Migration - composable table migrations
//!
//! [`CustomizableMigration`] owns the schema collaborator, the table name
//! resolved from a model, and three ordered callback lists:
//!
//! - `with`: extra columns, run wherever the definition calls
//!   [`Columns::add_columns`]
//! - `after_up`: alterations applied once the table exists
//! - `before_down`: alterations applied before the table is dropped
//!
//! The morph strategy picks which morph primitive [`Columns::morph`] and
//! [`Columns::nullable_morph`] end up calling on the blueprint.

use std::fmt;
use std::ops::{Deref, DerefMut};

use tracing::{debug, info, warn};

use super::MorphType;
use crate::error::{MigrationError, MigrationResult};
use crate::model::CustomizableModel;
use crate::schema::{Blueprint, Schema};

/// A column or hook callback run against a table blueprint
pub type TableCallback<B> = Box<dyn Fn(&mut B)>;

/// Migration direction for execution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationDirection {
    /// Apply the migration
    Up,
    /// Rollback the migration
    Down,
}

/// Entry points a migration runner calls
pub trait Migration {
    /// Apply the migration
    fn up(&mut self) -> MigrationResult<()>;

    /// Reverse the migration
    fn down(&mut self) -> MigrationResult<()>;

    /// Run the migration in the given direction
    fn run(&mut self, direction: MigrationDirection) -> MigrationResult<()> {
        match direction {
            MigrationDirection::Up => self.up(),
            MigrationDirection::Down => self.down(),
        }
    }
}

/// The table shape of a migration
pub trait TableDefinition<B: Blueprint> {
    /// Runs once when the migration is constructed, after the table name
    /// is resolved
    fn boot<S>(&mut self, _table: &str, _schema: &mut S) -> MigrationResult<()>
    where
        S: Schema<Blueprint = B>,
    {
        Ok(())
    }

    /// Describe the table columns
    fn create(&self, table: &mut Columns<'_, B>) -> MigrationResult<()>;
}

/// Table blueprint handed to [`TableDefinition::create`]
///
/// Dereferences to the underlying blueprint. A single `Columns` lives for
/// exactly one `create` call, and only one morph primitive may fire in it
/// until [`reset_morph`](Self::reset_morph) is called.
pub struct Columns<'a, B: Blueprint> {
    blueprint: &'a mut B,
    additional: &'a [TableCallback<B>],
    morph_type: MorphType,
    morph_index_name: Option<&'a str>,
    morph_called: bool,
}

impl<'a, B: Blueprint> Columns<'a, B> {
    pub fn new(
        blueprint: &'a mut B,
        additional: &'a [TableCallback<B>],
        morph_type: MorphType,
        morph_index_name: Option<&'a str>,
    ) -> Self {
        Self {
            blueprint,
            additional,
            morph_type,
            morph_index_name,
            morph_called: false,
        }
    }

    /// The underlying blueprint
    pub fn table(&mut self) -> &mut B {
        &mut *self.blueprint
    }

    /// Run every additional column callback, in the order they were added
    pub fn add_columns(&mut self) {
        for callback in self.additional {
            callback(&mut *self.blueprint);
        }
    }

    /// Add morph columns using the selected strategy
    pub fn morph(&mut self, name: &str) -> MigrationResult<()> {
        self.emit_morph(name, None, false)
    }

    /// Like [`morph`](Self::morph), using `default_index` when the migration
    /// has no index name configured
    pub fn morph_with_index(&mut self, name: &str, default_index: &str) -> MigrationResult<()> {
        self.emit_morph(name, Some(default_index), false)
    }

    /// Add nullable morph columns using the selected strategy
    pub fn nullable_morph(&mut self, name: &str) -> MigrationResult<()> {
        self.emit_morph(name, None, true)
    }

    pub fn nullable_morph_with_index(
        &mut self,
        name: &str,
        default_index: &str,
    ) -> MigrationResult<()> {
        self.emit_morph(name, Some(default_index), true)
    }

    /// Allow one more morph primitive in this `create`
    pub fn reset_morph(&mut self) {
        self.morph_called = false;
    }

    fn emit_morph(
        &mut self,
        name: &str,
        default_index: Option<&str>,
        nullable: bool,
    ) -> MigrationResult<()> {
        if self.morph_called {
            warn!("Rejected second morph definition '{}'", name);
            return Err(MigrationError::DuplicateMorphDefinition);
        }
        self.morph_called = true;

        let index = self.morph_index_name.or(default_index);
        let table = &mut *self.blueprint;

        match (self.morph_type, nullable) {
            (MorphType::Numeric, false) => table.numeric_morphs(name, index),
            (MorphType::Uuid, false) => table.uuid_morphs(name, index),
            (MorphType::Ulid, false) => table.ulid_morphs(name, index),
            (MorphType::Default, false) => table.morphs(name, index),
            (MorphType::Numeric, true) => table.nullable_numeric_morphs(name, index),
            (MorphType::Uuid, true) => table.nullable_uuid_morphs(name, index),
            (MorphType::Ulid, true) => table.nullable_ulid_morphs(name, index),
            (MorphType::Default, true) => table.nullable_morphs(name, index),
        };

        Ok(())
    }
}

impl<B: Blueprint> Deref for Columns<'_, B> {
    type Target = B;

    fn deref(&self) -> &B {
        &*self.blueprint
    }
}

impl<B: Blueprint> DerefMut for Columns<'_, B> {
    fn deref_mut(&mut self) -> &mut B {
        &mut *self.blueprint
    }
}

/// A table migration with configurable columns, hooks and morph strategy
pub struct CustomizableMigration<S: Schema, D> {
    schema: S,
    definition: D,
    table: String,
    with: Vec<TableCallback<S::Blueprint>>,
    after_up: Vec<TableCallback<S::Blueprint>>,
    before_down: Vec<TableCallback<S::Blueprint>>,
    morph_type: MorphType,
    morph_index_name: Option<String>,
}

impl<S, D> CustomizableMigration<S, D>
where
    S: Schema,
    D: TableDefinition<S::Blueprint>,
{
    /// Create a migration for the table of model `M`
    pub fn new<M>(schema: S, definition: D) -> MigrationResult<Self>
    where
        M: CustomizableModel + Default,
    {
        Self::for_table(schema, M::default().table(), definition)
    }

    /// Create a migration for an explicit table name
    pub fn for_table(
        schema: S,
        table: impl Into<String>,
        definition: D,
    ) -> MigrationResult<Self> {
        let mut migration = Self {
            schema,
            definition,
            table: table.into(),
            with: Vec::new(),
            after_up: Vec::new(),
            before_down: Vec::new(),
            morph_type: MorphType::Default,
            morph_index_name: None,
        };

        migration
            .definition
            .boot(&migration.table, &mut migration.schema)?;

        Ok(migration)
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn morph_type(&self) -> MorphType {
        self.morph_type
    }

    pub fn morph_index_name(&self) -> Option<&str> {
        self.morph_index_name.as_deref()
    }

    pub fn definition(&self) -> &D {
        &self.definition
    }

    pub fn schema(&self) -> &S {
        &self.schema
    }

    pub fn schema_mut(&mut self) -> &mut S {
        &mut self.schema
    }

    pub fn into_schema(self) -> S {
        self.schema
    }

    /// Add extra columns to the table
    pub fn with<F>(mut self, callback: F) -> Self
    where
        F: Fn(&mut S::Blueprint) + 'static,
    {
        self.with.push(Box::new(callback));
        self
    }

    pub fn with_many<I>(mut self, callbacks: I) -> Self
    where
        I: IntoIterator<Item = TableCallback<S::Blueprint>>,
    {
        self.with.extend(callbacks);
        self
    }

    /// Alter the table right after it is created
    pub fn after_up<F>(mut self, callback: F) -> Self
    where
        F: Fn(&mut S::Blueprint) + 'static,
    {
        self.after_up.push(Box::new(callback));
        self
    }

    pub fn after_up_many<I>(mut self, callbacks: I) -> Self
    where
        I: IntoIterator<Item = TableCallback<S::Blueprint>>,
    {
        self.after_up.extend(callbacks);
        self
    }

    /// Alter the table right before it is dropped
    pub fn before_down<F>(mut self, callback: F) -> Self
    where
        F: Fn(&mut S::Blueprint) + 'static,
    {
        self.before_down.push(Box::new(callback));
        self
    }

    pub fn before_down_many<I>(mut self, callbacks: I) -> Self
    where
        I: IntoIterator<Item = TableCallback<S::Blueprint>>,
    {
        self.before_down.extend(callbacks);
        self
    }

    /// Set the morph strategy and, optionally, the morph index name
    pub fn morph(mut self, morph_type: MorphType, index_name: Option<&str>) -> Self {
        self.morph_type = morph_type;
        self.morph_index_name = index_name.map(str::to_string);
        self
    }

    /// Set the morph strategy by name: `numeric`, `uuid` or `ulid`
    pub fn select_morph(self, kind: &str, index_name: Option<&str>) -> MigrationResult<Self> {
        let morph_type = kind.parse()?;
        Ok(self.morph(morph_type, index_name))
    }

    pub fn morph_numeric(self) -> Self {
        self.morph(MorphType::Numeric, None)
    }

    pub fn morph_uuid(self) -> Self {
        self.morph(MorphType::Uuid, None)
    }

    pub fn morph_ulid(self) -> Self {
        self.morph(MorphType::Ulid, None)
    }

    /// Apply a morph shortcut by property name, e.g. from configuration
    pub fn shortcut(self, property: &str) -> MigrationResult<Self> {
        match property {
            "morphNumeric" | "morph_numeric" => Ok(self.morph_numeric()),
            "morphUuid" | "morph_uuid" => Ok(self.morph_uuid()),
            "morphUlid" | "morph_ulid" => Ok(self.morph_ulid()),
            _ => Err(MigrationError::UnknownConfigurationProperty {
                migration: std::any::type_name::<D>().to_string(),
                property: property.to_string(),
            }),
        }
    }
}

impl<S, D> Migration for CustomizableMigration<S, D>
where
    S: Schema,
    D: TableDefinition<S::Blueprint>,
{
    fn up(&mut self) -> MigrationResult<()> {
        let Self {
            schema,
            definition,
            table,
            with,
            after_up,
            morph_type,
            morph_index_name,
            ..
        } = self;

        debug!("Creating table {} with {} morph columns", table, morph_type);
        schema.create(table, |blueprint| {
            let mut columns =
                Columns::new(blueprint, &with[..], *morph_type, morph_index_name.as_deref());
            definition.create(&mut columns)
        })?;

        debug!("Running {} after-up callback(s) on {}", after_up.len(), table);
        for callback in after_up.iter() {
            schema.table(table, |blueprint| {
                callback(blueprint);
                Ok(())
            })?;
        }

        info!("Migrated table {}", table);
        Ok(())
    }

    fn down(&mut self) -> MigrationResult<()> {
        debug!(
            "Running {} before-down callback(s) on {}",
            self.before_down.len(),
            self.table
        );
        for callback in &self.before_down {
            self.schema.table(&self.table, |blueprint| {
                callback(blueprint);
                Ok(())
            })?;
        }

        self.schema.drop_if_exists(&self.table)?;

        info!("Rolled back table {}", self.table);
        Ok(())
    }
}

impl<S: Schema + fmt::Debug, D: fmt::Debug> fmt::Debug for CustomizableMigration<S, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomizableMigration")
            .field("table", &self.table)
            .field("definition", &self.definition)
            .field("schema", &self.schema)
            .field("with", &self.with.len())
            .field("after_up", &self.after_up.len())
            .field("before_down", &self.before_down.len())
            .field("morph_type", &self.morph_type)
            .field("morph_index_name", &self.morph_index_name)
            .finish()
    }
}

/// Models that know which table definition migrates them
pub trait ModelMigration: CustomizableModel + Default {
    type Definition: Default;

    /// Build the migration for this model
    fn migration<S>(schema: S) -> MigrationResult<CustomizableMigration<S, Self::Definition>>
    where
        S: Schema,
        Self::Definition: TableDefinition<S::Blueprint>,
    {
        CustomizableMigration::new::<Self>(schema, Self::Definition::default())
    }

    /// Build the migration with an initial set of extra columns
    fn migration_with<S, I>(
        schema: S,
        columns: I,
    ) -> MigrationResult<CustomizableMigration<S, Self::Definition>>
    where
        S: Schema,
        Self::Definition: TableDefinition<S::Blueprint>,
        I: IntoIterator<Item = TableCallback<S::Blueprint>>,
    {
        Ok(Self::migration(schema)?.with_many(columns))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{SchemaBuilder, TableBuilder};

    #[derive(Debug, Default)]
    struct CommentsTable;

    impl TableDefinition<TableBuilder> for CommentsTable {
        fn create(&self, table: &mut Columns<'_, TableBuilder>) -> MigrationResult<()> {
            table.id("id");
            table.text("body");
            table.morph("commentable")?;
            table.add_columns();
            table.timestamps();
            Ok(())
        }
    }

    fn comments() -> CustomizableMigration<SchemaBuilder, CommentsTable> {
        CustomizableMigration::for_table(SchemaBuilder::new(), "comments", CommentsTable).unwrap()
    }

    #[test]
    fn test_up_renders_create_table() {
        let mut migration = comments();
        migration.up().unwrap();

        let sql = migration.schema().build();
        assert!(sql.contains("CREATE TABLE comments"));
        assert!(sql.contains("commentable_id BIGINT NOT NULL"));
        assert!(sql.contains(
            "CREATE INDEX comments_commentable_type_commentable_id_index ON comments"
        ));
    }

    #[test]
    fn test_morph_strategy_and_index_reach_sql() {
        let mut migration = comments().morph(MorphType::Ulid, Some("commentable_index"));
        migration.up().unwrap();

        let sql = migration.schema().build();
        assert!(sql.contains("commentable_id CHAR(26) NOT NULL"));
        assert!(sql.contains("CREATE INDEX commentable_index ON comments"));
    }

    #[test]
    fn test_extra_columns_and_hooks_render_in_order() {
        let mut migration = comments()
            .with(|table| {
                table.boolean("approved");
            })
            .after_up(|table| {
                table.column("score", "INTEGER");
            })
            .before_down(|table| {
                table.drop_morphs("commentable");
            });

        migration.up().unwrap();
        migration.down().unwrap();

        let statements = migration.schema().to_sql();
        assert!(statements[0].contains("approved BOOLEAN"));
        assert_eq!(
            &statements[2..],
            &[
                "ALTER TABLE comments ADD COLUMN score INTEGER;".to_string(),
                "ALTER TABLE comments DROP COLUMN commentable_type;".to_string(),
                "ALTER TABLE comments DROP COLUMN commentable_id;".to_string(),
                "DROP TABLE IF EXISTS comments;".to_string(),
            ]
        );
    }

    #[test]
    fn test_run_dispatches_direction() {
        let mut migration = comments();
        migration.run(MigrationDirection::Down).unwrap();

        assert_eq!(
            migration.into_schema().to_sql(),
            vec!["DROP TABLE IF EXISTS comments;".to_string()]
        );
    }

    #[test]
    fn test_select_morph_rejects_unknown_kind() {
        let result = comments().select_morph("bigint", None);
        assert_eq!(
            result.err(),
            Some(MigrationError::UnknownMorphType("bigint".to_string()))
        );
    }
}
