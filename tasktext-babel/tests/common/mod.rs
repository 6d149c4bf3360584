//! Shared helpers for the integration tests.

use std::path::PathBuf;
use tasktext_babel::canonical::{Block, Inline, Mark, Text};

pub fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"))
}

pub fn text(text: &str, marks: Vec<Mark>) -> Inline {
    Inline::Text(Text {
        text: text.to_string(),
        marks,
    })
}

pub fn para(content: Vec<Inline>) -> Block {
    Block::paragraph(content)
}

pub fn link(href: &str) -> Mark {
    Mark::Link {
        href: href.to_string(),
    }
}
