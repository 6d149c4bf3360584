//! Error types for conversion and format operations

use thiserror::Error;

/// Errors that can occur during format operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// Error during parsing
    #[error("Parse error: {0}")]
    ParseError(String),
    /// Error during serialization
    #[error("Serialization error: {0}")]
    SerializationError(String),
    /// Format does not support the operation
    #[error("Operation not supported: {0}")]
    NotSupported(String),
}

/// Failure while converting a single source node.
///
/// These never leave the converters: the offending node is dropped and the
/// error is logged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    #[error("expected a JSON object, found {0}")]
    NotAnObject(&'static str),
    #[error("'{node_type}' node is missing '{field}'")]
    MissingField {
        node_type: String,
        field: &'static str,
    },
    #[error("'{node_type}' node has an invalid '{field}'")]
    InvalidField {
        node_type: String,
        field: &'static str,
    },
    #[error("nesting deeper than {0} levels")]
    DepthExceeded(usize),
}
