//! Attribute overrides and how they merge with declared values

use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// Attribute casts, attribute name to cast type, in declaration order
pub type Casts = IndexMap<String, String>;

/// A model attribute override: a fixed value, or one computed from the
/// model instance when the attribute is read
pub enum AttributeOverride<M, T> {
    Literal(T),
    Computed(Arc<dyn Fn(&M) -> T + Send + Sync>),
}

impl<M, T: Clone> AttributeOverride<M, T> {
    pub fn literal(value: T) -> Self {
        AttributeOverride::Literal(value)
    }

    pub fn computed<F>(callback: F) -> Self
    where
        F: Fn(&M) -> T + Send + Sync + 'static,
    {
        AttributeOverride::Computed(Arc::new(callback))
    }

    /// Resolve the override against a model instance
    pub fn resolve(&self, model: &M) -> T {
        match self {
            AttributeOverride::Literal(value) => value.clone(),
            AttributeOverride::Computed(callback) => callback(model),
        }
    }
}

impl<M, T: Clone> Clone for AttributeOverride<M, T> {
    fn clone(&self) -> Self {
        match self {
            AttributeOverride::Literal(value) => AttributeOverride::Literal(value.clone()),
            AttributeOverride::Computed(callback) => AttributeOverride::Computed(callback.clone()),
        }
    }
}

impl<M, T: fmt::Debug> fmt::Debug for AttributeOverride<M, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeOverride::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            AttributeOverride::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl<M> From<Vec<String>> for AttributeOverride<M, Vec<String>> {
    fn from(value: Vec<String>) -> Self {
        AttributeOverride::Literal(value)
    }
}

impl<M> From<&[&str]> for AttributeOverride<M, Vec<String>> {
    fn from(value: &[&str]) -> Self {
        AttributeOverride::Literal(value.iter().map(|s| s.to_string()).collect())
    }
}

impl<M> From<Casts> for AttributeOverride<M, Casts> {
    fn from(value: Casts) -> Self {
        AttributeOverride::Literal(value)
    }
}

/// Append `extra` after `base`
pub fn merge_list(mut base: Vec<String>, extra: Vec<String>) -> Vec<String> {
    base.extend(extra);
    base
}

/// Union of two cast maps; keys in `extra` replace the base cast in place
pub fn merge_casts(mut base: Casts, extra: Casts) -> Casts {
    base.extend(extra);
    base
}
