//! Customizable migrations
//!
//! A migration is declared once as a [`TableDefinition`] and wrapped in a
//! [`CustomizableMigration`] that lets callers bolt on extra columns, hooks
//! around create and drop, and a key type for polymorphic relations.

pub mod customizable;
pub mod morph;

pub use customizable::{
    Columns, CustomizableMigration, Migration, MigrationDirection, ModelMigration,
    TableCallback, TableDefinition,
};
pub use morph::MorphType;
