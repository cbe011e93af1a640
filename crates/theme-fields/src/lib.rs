//! Custom-field schema compilation.
//!
//! Field specifications from the payload are compiled into the array shape
//! `acf_add_local_field_group()` expects. Compilation is a pipeline over an
//! immutable field tree:
//!
//! 1. [`expand`]: splice shared field sets in place and generate every key
//! 2. [`collect_key_map`]: map author-facing `twKey`s to generated keys
//! 3. [`rewrite_conditions`]: point conditional-logic rules at generated keys
//! 4. [`render`]: sorted PHP array literals
//!
//! [`build`], [`build_fields`] and [`build_group`] run the whole pipeline.

pub mod error;
pub mod expand;
pub mod remap;
pub mod render;
pub mod spec;

pub use error::{Error, Result};
pub use expand::{ExpandedField, expand};
pub use remap::{KeyMap, collect_key_map, rewrite_conditions};
pub use render::{build, build_fields, build_group, render};
pub use spec::{Choice, ConditionRule, FieldSet, FieldSpec, GroupSpec, LocationRule, parse_group};
