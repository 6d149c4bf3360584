//! Rich-text task descriptions, normalized
//!
//!     Task descriptions arrive in two shapes: Markdown typed by people, and ADF (Atlassian
//!     Document Format) trees pulled from Jira. This crate converts both into one canonical
//!     rich-text tree that the editor and the storage layer understand.
//!
//!     Conversion is best effort and never fails. Malformed Markdown falls back to literal
//!     text, ADF nodes without a canonical counterpart are dropped, and a node that fails to
//!     convert is logged and left out while its siblings survive. The worst case is an empty
//!     document.
//!
//!     This is a pure lib: it logs through the `log` facade and never installs a logger,
//!     reads the environment or prints.
//!
//!     The file structure :
//!     .
//!     ├── error.rs                # FormatError, ConversionError
//!     ├── options.rs              # ConvertOptions, UnknownNodePolicy
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── canonical               # The canonical tree, its JSON shape and validator
//!     └── formats
//!         ├── markdown
//!         │   ├── parser.rs       # Line-based block builder
//!         │   ├── inline.rs       # Inline mark scanner
//!         │   └── mod.rs
//!         ├── adf
//!         │   ├── converter.rs    # Policy-driven tree converter
//!         │   └── mod.rs
//!         ├── json                # Canonical JSON output
//!         └── treeviz             # Tree view output
//!
//! Testing
//!     tests
//!     ├── <format>
//!     │   └── <testname>.rs
//!     └── fixtures
//!
//!     Rust does not discover tests in subdirectories by default, so tests/lib.rs includes
//!     them as modules.
pub mod canonical;
pub mod error;
pub mod format;
pub mod formats;
pub mod options;
pub mod registry;

pub use canonical::{to_json, to_json_string, validate, Document};
pub use error::{ConversionError, FormatError};
pub use format::Format;
pub use options::{ConvertOptions, UnknownNodePolicy};
pub use registry::FormatRegistry;

/// Convert Markdown to the canonical tree. `None` and `""` give an empty
/// document.
pub fn markdown_to_canonical(markdown: Option<&str>) -> Document {
    markdown_to_canonical_with(markdown, &ConvertOptions::default())
}

/// [`markdown_to_canonical`] with explicit options.
pub fn markdown_to_canonical_with(markdown: Option<&str>, options: &ConvertOptions) -> Document {
    match markdown {
        Some(source) => formats::markdown::parser::parse_from_markdown(source, options),
        None => Document::default(),
    }
}

/// Convert a parsed ADF document to the canonical tree.
pub fn adf_to_canonical(adf: &serde_json::Value) -> Document {
    adf_to_canonical_with(adf, &ConvertOptions::default())
}

/// [`adf_to_canonical`] with explicit options.
pub fn adf_to_canonical_with(adf: &serde_json::Value, options: &ConvertOptions) -> Document {
    formats::adf::converter::convert_document(adf, options)
}
