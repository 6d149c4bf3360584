//! Canonical document tree.
//!
//! This is the schema every converter targets and the editor and storage
//! layers consume. It is format-agnostic: nothing here knows about Markdown
//! or ADF.

pub mod json;
pub mod nodes;
pub mod validate;

pub use json::{to_json, to_json_string};
pub use nodes::*;
pub use validate::{validate, SchemaViolation, ViolationKind};
