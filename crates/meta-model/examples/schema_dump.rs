//! Schema Dump Example
//!
//! Renders the SQL of a comments migration for each morph strategy.
//! Run with `RUST_LOG=debug` to see the migration steps.

use meta_model::{
    Blueprint, Columns, CustomizableModel, Migration, MigrationResult,
    ModelMigration, MorphType, SchemaBuilder, SchemaConfig, TableBuilder, TableDefinition,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default)]
struct Comment;

impl CustomizableModel for Comment {
    fn model_name() -> &'static str {
        "Comment"
    }
}

#[derive(Debug, Default)]
struct CreateCommentsTable;

impl TableDefinition<TableBuilder> for CreateCommentsTable {
    fn create(&self, table: &mut Columns<'_, TableBuilder>) -> MigrationResult<()> {
        table.id("id");
        table.uuid("public_id");
        table.integer("author_id");
        table.morph("commentable")?;
        table.reset_morph();
        table.nullable_morph("reply_to")?;
        table.text("body");
        table.add_columns();
        table.timestamps();
        table.foreign_key("author_id", "users", "id");
        table.unique(&["public_id"]);
        Ok(())
    }
}

impl ModelMigration for Comment {
    type Definition = CreateCommentsTable;
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = SchemaConfig::from_env()?;

    for morph_type in [
        MorphType::Default,
        MorphType::Numeric,
        MorphType::Uuid,
        MorphType::Ulid,
    ] {
        let mut migration = Comment::migration(SchemaBuilder::with_config(config.clone()))?
            .morph(morph_type, None)
            .with(|table| {
                table.boolean("approved");
            })
            .after_up(|table| {
                table.column("score", "INTEGER");
            })
            .before_down(|table| {
                table.drop_morphs("reply_to");
                table.drop_morphs("commentable");
            });

        migration.up()?;
        migration.down()?;

        println!("-- morph type: {}", morph_type);
        println!("{}\n", migration.schema().build());
    }

    Ok(())
}
