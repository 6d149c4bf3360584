//! Knobs shared by the converters.

use serde::{Deserialize, Serialize};

/// Default bound on container nesting for both converters.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// What the ADF converter does with an unknown node that carries children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnknownNodePolicy {
    /// Keep the node with its original type and convert its children.
    #[default]
    PassThrough,
    /// Drop the node and its children.
    Drop,
}

impl UnknownNodePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnknownNodePolicy::PassThrough => "pass-through",
            UnknownNodePolicy::Drop => "drop",
        }
    }
}

impl std::str::FromStr for UnknownNodePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pass-through" | "passthrough" => Ok(UnknownNodePolicy::PassThrough),
            "drop" => Ok(UnknownNodePolicy::Drop),
            other => Err(format!(
                "unknown node policy '{other}', expected 'pass-through' or 'drop'"
            )),
        }
    }
}

/// Options for [`crate::markdown_to_canonical_with`] and
/// [`crate::adf_to_canonical_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Maximum nesting of block containers before content is flattened
    /// (Markdown) or dropped (ADF).
    pub max_depth: usize,
    pub unknown_nodes: UnknownNodePolicy,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        ConvertOptions {
            max_depth: DEFAULT_MAX_DEPTH,
            unknown_nodes: UnknownNodePolicy::default(),
        }
    }
}
