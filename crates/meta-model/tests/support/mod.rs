//! Recording schema double shared by the integration tests

#![allow(dead_code)]

use meta_model::{
    AttributeOverride, Blueprint, Casts, Columns, CustomizableModel, MigrationResult,
    ModelMigration, Schema, SchemaError, TableDefinition,
};

/// Everything the schema and its blueprints were asked to do, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Create(String),
    Alter(String),
    DropIfExists(String),
    Column {
        method: &'static str,
        name: String,
        arg: Option<String>,
    },
}

impl Call {
    pub fn column(method: &'static str, name: &str, arg: Option<&str>) -> Self {
        Call::Column {
            method,
            name: name.to_string(),
            arg: arg.map(str::to_string),
        }
    }
}

#[derive(Debug, Default)]
pub struct RecordingBlueprint {
    calls: Vec<Call>,
}

impl RecordingBlueprint {
    fn record(&mut self, method: &'static str, name: &str, arg: Option<&str>) -> &mut Self {
        self.calls.push(Call::column(method, name, arg));
        self
    }
}

impl Blueprint for RecordingBlueprint {
    fn morphs(&mut self, name: &str, index: Option<&str>) -> &mut Self {
        self.record("morphs", name, index)
    }

    fn numeric_morphs(&mut self, name: &str, index: Option<&str>) -> &mut Self {
        self.record("numeric_morphs", name, index)
    }

    fn uuid_morphs(&mut self, name: &str, index: Option<&str>) -> &mut Self {
        self.record("uuid_morphs", name, index)
    }

    fn ulid_morphs(&mut self, name: &str, index: Option<&str>) -> &mut Self {
        self.record("ulid_morphs", name, index)
    }

    fn nullable_morphs(&mut self, name: &str, index: Option<&str>) -> &mut Self {
        self.record("nullable_morphs", name, index)
    }

    fn nullable_numeric_morphs(&mut self, name: &str, index: Option<&str>) -> &mut Self {
        self.record("nullable_numeric_morphs", name, index)
    }

    fn nullable_uuid_morphs(&mut self, name: &str, index: Option<&str>) -> &mut Self {
        self.record("nullable_uuid_morphs", name, index)
    }

    fn nullable_ulid_morphs(&mut self, name: &str, index: Option<&str>) -> &mut Self {
        self.record("nullable_ulid_morphs", name, index)
    }

    fn column(&mut self, name: &str, column_type: &str) -> &mut Self {
        self.record("column", name, Some(column_type))
    }

    fn drop_column(&mut self, name: &str) -> &mut Self {
        self.record("drop_column", name, None)
    }
}

/// Schema that records calls instead of touching a database
#[derive(Debug, Default)]
pub struct RecordingSchema {
    pub calls: Vec<Call>,
    pub fail_create: Option<SchemaError>,
}

impl RecordingSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_create(error: SchemaError) -> Self {
        Self {
            calls: Vec::new(),
            fail_create: Some(error),
        }
    }

    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    /// Blueprint calls only, whichever table operation issued them
    pub fn column_calls(&self) -> Vec<Call> {
        self.calls
            .iter()
            .filter(|call| matches!(call, Call::Column { .. }))
            .cloned()
            .collect()
    }

    pub fn count(&self, expected: &Call) -> usize {
        self.calls.iter().filter(|call| *call == expected).count()
    }

    fn run<F>(&mut self, define: F) -> MigrationResult<()>
    where
        F: FnOnce(&mut RecordingBlueprint) -> MigrationResult<()>,
    {
        let mut blueprint = RecordingBlueprint::default();
        let result = define(&mut blueprint);
        self.calls.extend(blueprint.calls);
        result
    }
}

impl Schema for RecordingSchema {
    type Blueprint = RecordingBlueprint;

    fn create<F>(&mut self, table: &str, define: F) -> MigrationResult<()>
    where
        F: FnOnce(&mut RecordingBlueprint) -> MigrationResult<()>,
    {
        self.calls.push(Call::Create(table.to_string()));
        if let Some(error) = self.fail_create.clone() {
            return Err(error.into());
        }
        self.run(define)
    }

    fn table<F>(&mut self, table: &str, alter: F) -> MigrationResult<()>
    where
        F: FnOnce(&mut RecordingBlueprint) -> MigrationResult<()>,
    {
        self.calls.push(Call::Alter(table.to_string()));
        self.run(alter)
    }

    fn drop_if_exists(&mut self, table: &str) -> MigrationResult<()> {
        self.calls.push(Call::DropIfExists(table.to_string()));
        Ok(())
    }
}

/// Records a `create_call` column, then the extra columns when asked to
#[derive(Debug, Default)]
pub struct TestMigration {
    pub call_method: bool,
}

impl TableDefinition<RecordingBlueprint> for TestMigration {
    fn create(&self, table: &mut Columns<'_, RecordingBlueprint>) -> MigrationResult<()> {
        table.column("create_call", "TEXT");

        if self.call_method {
            table.add_columns();
        }

        Ok(())
    }
}

/// Model with list defaults and per-instance overrides
#[derive(Debug, Default)]
pub struct TestModel {
    pub table: Option<String>,
    pub casts: Option<AttributeOverride<TestModel, Casts>>,
    pub fillable: Option<AttributeOverride<TestModel, Vec<String>>>,
    pub guarded: Option<AttributeOverride<TestModel, Vec<String>>>,
    pub hidden: Option<AttributeOverride<TestModel, Vec<String>>>,
    pub visible: Option<AttributeOverride<TestModel, Vec<String>>>,
    pub appends: Option<AttributeOverride<TestModel, Vec<String>>>,
}

impl CustomizableModel for TestModel {
    fn model_name() -> &'static str {
        "TestModel"
    }

    fn declared_hidden(&self) -> Vec<String> {
        vec!["baz".to_string()]
    }

    fn declared_visible(&self) -> Vec<String> {
        vec!["quz".to_string()]
    }

    fn declared_appends(&self) -> Vec<String> {
        vec!["qux".to_string()]
    }

    fn custom_table(&self) -> Option<String> {
        self.table.clone()
    }

    fn custom_casts(&self) -> Option<AttributeOverride<Self, Casts>> {
        self.casts.clone()
    }

    fn custom_fillable(&self) -> Option<AttributeOverride<Self, Vec<String>>> {
        self.fillable.clone()
    }

    fn custom_guarded(&self) -> Option<AttributeOverride<Self, Vec<String>>> {
        self.guarded.clone()
    }

    fn custom_hidden(&self) -> Option<AttributeOverride<Self, Vec<String>>> {
        self.hidden.clone()
    }

    fn custom_visible(&self) -> Option<AttributeOverride<Self, Vec<String>>> {
        self.visible.clone()
    }

    fn custom_appends(&self) -> Option<AttributeOverride<Self, Vec<String>>> {
        self.appends.clone()
    }
}

impl ModelMigration for TestModel {
    type Definition = TestMigration;
}

/// Model whose table name is always overridden
#[derive(Debug, Default)]
pub struct RenamedModel;

impl CustomizableModel for RenamedModel {
    fn model_name() -> &'static str {
        "RenamedModel"
    }

    fn custom_table(&self) -> Option<String> {
        Some("foo".to_string())
    }
}

impl ModelMigration for RenamedModel {
    type Definition = TestMigration;
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}
