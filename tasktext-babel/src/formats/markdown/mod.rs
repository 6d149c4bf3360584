//! Markdown format implementation
//!
//! Markdown is read in two passes. [`parser`] splits the source into lines
//! and builds the block tree; [`inline`] scans the text of each leaf block
//! into marked runs.
//!
//! # Element Mapping
//!
//! | Markdown                      | Canonical node            |
//! |-------------------------------|---------------------------|
//! | `#` .. `######` heading       | heading (level 1-6)       |
//! | paragraph                     | paragraph                 |
//! | `-` / `*` / `+` list          | bulletList                |
//! | `1.` / `1)` list              | orderedList               |
//! | `>` quote                     | blockquote                |
//! | fenced or indented code       | codeBlock                 |
//! | `---` / `***` / `___`         | horizontalRule            |
//! | `**x**`, `*x*`, `~~x~~`       | bold, italic, strike      |
//! | `` `x` ``                     | code mark                 |
//! | `[x](url)`                    | link mark                 |
//! | two trailing spaces or `\`    | hardBreak                 |
//!
//! Anything else (tables, HTML, reference links, setext headings) is kept as
//! paragraph text. Parsing never fails.

pub mod inline;
pub mod parser;

use crate::canonical::Document;
use crate::error::FormatError;
use crate::format::Format;
use crate::options::ConvertOptions;

/// Format implementation for Markdown
#[derive(Debug, Clone, Default)]
pub struct MarkdownFormat {
    options: ConvertOptions,
}

impl MarkdownFormat {
    pub fn new(options: ConvertOptions) -> Self {
        MarkdownFormat { options }
    }
}

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "Markdown task descriptions"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        Ok(parser::parse_from_markdown(source, &self.options))
    }
}
