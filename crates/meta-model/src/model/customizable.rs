//! Customizable Model - overridable table name and attribute lists
//!
//! A model declares its own attribute lists through the `declared_*`
//! methods and may layer an [`AttributeOverride`] on top through the
//! `custom_*` hooks. The public accessors merge both: list attributes keep
//! declared entries first, casts let the override win on key collisions.

use super::overrides::{merge_casts, merge_list, AttributeOverride, Casts};
use crate::naming::table_name_for;

pub trait CustomizableModel: Sized {
    /// Type name of the model, used for the default table name
    fn model_name() -> &'static str;

    /// Primary key field name
    fn primary_key_name(&self) -> &str {
        "id"
    }

    /// Whether the primary key auto-increments
    fn incrementing(&self) -> bool {
        true
    }

    /// Cast type of the primary key
    fn key_type(&self) -> &str {
        "int"
    }

    /// Casts the model declares, the incrementing key cast first
    fn declared_casts(&self) -> Casts {
        let mut casts = Casts::new();
        if self.incrementing() {
            casts.insert(self.primary_key_name().to_string(), self.key_type().to_string());
        }
        casts
    }

    fn declared_fillable(&self) -> Vec<String> {
        Vec::new()
    }

    fn declared_guarded(&self) -> Vec<String> {
        Vec::new()
    }

    fn declared_hidden(&self) -> Vec<String> {
        Vec::new()
    }

    fn declared_visible(&self) -> Vec<String> {
        Vec::new()
    }

    fn declared_appends(&self) -> Vec<String> {
        Vec::new()
    }

    fn custom_table(&self) -> Option<String> {
        None
    }

    fn custom_casts(&self) -> Option<AttributeOverride<Self, Casts>> {
        None
    }

    fn custom_fillable(&self) -> Option<AttributeOverride<Self, Vec<String>>> {
        None
    }

    fn custom_guarded(&self) -> Option<AttributeOverride<Self, Vec<String>>> {
        None
    }

    fn custom_hidden(&self) -> Option<AttributeOverride<Self, Vec<String>>> {
        None
    }

    fn custom_visible(&self) -> Option<AttributeOverride<Self, Vec<String>>> {
        None
    }

    fn custom_appends(&self) -> Option<AttributeOverride<Self, Vec<String>>> {
        None
    }

    /// Table name: the custom table when set, otherwise the pluralized
    /// snake case model name
    fn table(&self) -> String {
        match self.custom_table() {
            Some(table) if !table.is_empty() => table,
            _ => table_name_for(Self::model_name()),
        }
    }

    fn casts(&self) -> Casts {
        match self.custom_casts() {
            Some(custom) => merge_casts(self.declared_casts(), custom.resolve(self)),
            None => self.declared_casts(),
        }
    }

    fn fillable(&self) -> Vec<String> {
        merge_custom(self, self.declared_fillable(), self.custom_fillable())
    }

    fn guarded(&self) -> Vec<String> {
        merge_custom(self, self.declared_guarded(), self.custom_guarded())
    }

    fn hidden(&self) -> Vec<String> {
        merge_custom(self, self.declared_hidden(), self.custom_hidden())
    }

    fn visible(&self) -> Vec<String> {
        merge_custom(self, self.declared_visible(), self.custom_visible())
    }

    fn appends(&self) -> Vec<String> {
        merge_custom(self, self.declared_appends(), self.custom_appends())
    }
}

fn merge_custom<M>(
    model: &M,
    base: Vec<String>,
    custom: Option<AttributeOverride<M, Vec<String>>>,
) -> Vec<String> {
    match custom {
        Some(custom) => merge_list(base, custom.resolve(model)),
        None => base,
    }
}
