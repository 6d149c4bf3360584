//! Atlassian Document Format (ADF) implementation
//!
//! ADF is the JSON tree Jira and Confluence store rich text in. The source
//! text must be valid JSON; everything past that point is best effort and
//! never fails, see [`converter`].

pub mod converter;

use crate::canonical::Document;
use crate::error::FormatError;
use crate::format::Format;
use crate::options::ConvertOptions;

/// Format implementation for ADF documents
#[derive(Debug, Clone, Default)]
pub struct AdfFormat {
    options: ConvertOptions,
}

impl AdfFormat {
    pub fn new(options: ConvertOptions) -> Self {
        AdfFormat { options }
    }
}

impl Format for AdfFormat {
    fn name(&self) -> &str {
        "adf"
    }

    fn description(&self) -> &str {
        "Atlassian Document Format (JSON)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["adf", "json"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        let value: serde_json::Value = serde_json::from_str(source)
            .map_err(|e| FormatError::ParseError(format!("invalid ADF JSON: {e}")))?;
        Ok(converter::convert_document(&value, &self.options))
    }
}
