//! Canonical JSON output format
//!
//! Serializes the canonical tree in its storage shape, see
//! [`crate::canonical::json`].

use crate::canonical::{to_json_string, Document};
use crate::error::FormatError;
use crate::format::Format;

/// Format implementation for canonical JSON
#[derive(Debug, Clone, Copy)]
pub struct JsonFormat {
    pretty: bool,
}

impl JsonFormat {
    pub fn new(pretty: bool) -> Self {
        JsonFormat { pretty }
    }
}

impl Default for JsonFormat {
    fn default() -> Self {
        JsonFormat { pretty: true }
    }
}

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Canonical rich-text JSON"
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        to_json_string(doc, self.pretty).map_err(|e| FormatError::SerializationError(e.to_string()))
    }
}
