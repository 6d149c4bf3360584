//! Structural checks for the canonical tree.
//!
//! Both converters are expected to produce documents that pass these checks,
//! except for ADF unknown-node pass-through, which is reported here so callers
//! can decide whether to store such documents.

use super::nodes::*;
use std::fmt;

/// A single schema violation and where it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// Location in the tree, e.g. `content[0].content[2]`.
    pub path: String,
    pub kind: ViolationKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    /// Heading level outside `1..=6`
    HeadingLevel(u8),
    /// Link mark with an empty `href`
    EmptyLinkHref,
    /// Code block holding more than one run or a marked run
    CodeBlockContent,
    /// Text run with no text and no marks
    EmptyText,
    /// The same mark kind twice on one run
    DuplicateMark(&'static str),
    /// Pass-through node outside the schema
    UnknownNode(String),
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationKind::HeadingLevel(level) => {
                write!(f, "heading level {level} is outside 1..=6")
            }
            ViolationKind::EmptyLinkHref => write!(f, "link mark without href"),
            ViolationKind::CodeBlockContent => {
                write!(f, "code block content must be a single unmarked text")
            }
            ViolationKind::EmptyText => write!(f, "empty text run without marks"),
            ViolationKind::DuplicateMark(name) => write!(f, "mark '{name}' applied twice"),
            ViolationKind::UnknownNode(node_type) => {
                write!(f, "node type '{node_type}' is not part of the schema")
            }
        }
    }
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.kind)
    }
}

/// Walk the document and collect every violation, in document order.
pub fn validate(doc: &Document) -> Vec<SchemaViolation> {
    let mut violations = Vec::new();
    check_blocks(&doc.content, "content", &mut violations);
    violations
}

fn check_blocks(blocks: &[Block], path: &str, out: &mut Vec<SchemaViolation>) {
    for (i, block) in blocks.iter().enumerate() {
        check_block(block, &format!("{path}[{i}]"), out);
    }
}

fn check_block(block: &Block, path: &str, out: &mut Vec<SchemaViolation>) {
    let child_path = format!("{path}.content");
    match block {
        Block::Paragraph(p) => check_inlines(&p.content, &child_path, out),
        Block::Heading(h) => {
            if !(1..=6).contains(&h.level) {
                push(out, path, ViolationKind::HeadingLevel(h.level));
            }
            check_inlines(&h.content, &child_path, out);
        }
        Block::BulletList(list) | Block::OrderedList(list) => {
            for (i, item) in list.content.iter().enumerate() {
                let item_path = format!("{child_path}[{i}].content");
                check_blocks(&item.content, &item_path, out);
            }
        }
        Block::Blockquote(quote) => check_blocks(&quote.content, &child_path, out),
        Block::CodeBlock(code) => {
            if code.content.len() > 1 || code.content.iter().any(|t| !t.marks.is_empty()) {
                push(out, path, ViolationKind::CodeBlockContent);
            }
        }
        Block::HorizontalRule => {}
        Block::Unknown(node) => check_unknown(node, path, out),
    }
}

fn check_inlines(inlines: &[Inline], path: &str, out: &mut Vec<SchemaViolation>) {
    for (i, inline) in inlines.iter().enumerate() {
        check_inline(inline, &format!("{path}[{i}]"), out);
    }
}

fn check_inline(inline: &Inline, path: &str, out: &mut Vec<SchemaViolation>) {
    match inline {
        Inline::Text(text) => check_text(text, path, out),
        Inline::Mention(_) | Inline::HardBreak => {}
        Inline::Unknown(node) => check_unknown(node, path, out),
    }
}

fn check_text(text: &Text, path: &str, out: &mut Vec<SchemaViolation>) {
    if text.text.is_empty() && text.marks.is_empty() {
        push(out, path, ViolationKind::EmptyText);
    }
    for (i, mark) in text.marks.iter().enumerate() {
        if let Mark::Link { href } = mark {
            if href.trim().is_empty() {
                push(out, path, ViolationKind::EmptyLinkHref);
            }
        }
        if text.marks[..i].iter().any(|earlier| earlier.same_kind(mark)) {
            push(out, path, ViolationKind::DuplicateMark(mark.name()));
        }
    }
}

fn check_unknown(node: &UnknownNode, path: &str, out: &mut Vec<SchemaViolation>) {
    push(out, path, ViolationKind::UnknownNode(node.node_type.clone()));
    for (i, child) in node.content.iter().enumerate() {
        let child_path = format!("{path}.content[{i}]");
        match child {
            Node::Block(block) => check_block(block, &child_path, out),
            Node::Inline(inline) => check_inline(inline, &child_path, out),
        }
    }
}

fn push(out: &mut Vec<SchemaViolation>, path: &str, kind: ViolationKind) {
    out.push(SchemaViolation {
        path: path.to_string(),
        kind,
    });
}
