//! Model System - customizable model metadata
//!
//! - `customizable`: the [`CustomizableModel`] trait and its merged accessors
//! - `overrides`: [`AttributeOverride`] and the merge rules

pub mod customizable;
pub mod overrides;

pub use customizable::CustomizableModel;
pub use overrides::{merge_casts, merge_list, AttributeOverride, Casts};
