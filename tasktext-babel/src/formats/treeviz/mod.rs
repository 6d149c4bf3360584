//! Treeviz formatter for canonical documents
//!
//! A visual tree of the canonical document, one node per line:
//!
//! <prefix><connector> <icon> <label>
//!
//! Text labels are truncated to 30 characters. Marks are listed after the
//! text in brackets.
//!
//! ```text
//! ⧉ Document (2 blocks)
//! ├─ § heading 2
//! │ └─ ◦ "Release"
//! └─ ☰ bulletList (1 items)
//!   └─ • listItem
//!     └─ ¶ paragraph
//!       └─ ◦ "ship it" [bold]
//! ```

use super::icons::get_icon;
use crate::canonical::{Block, Document, Inline, ListItem, Node, Text};
use crate::error::FormatError;
use crate::format::Format;

const MAX_LABEL_CHARS: usize = 30;

/// A node of the rendered tree: its line label and its children.
struct Entry {
    icon: &'static str,
    label: String,
    children: Vec<Entry>,
}

impl Entry {
    fn leaf(node_type: &str, label: String) -> Self {
        Entry {
            icon: get_icon(node_type),
            label,
            children: Vec::new(),
        }
    }
}

fn block_entry(block: &Block) -> Entry {
    let node_type = block.node_type();
    let (label, children) = match block {
        Block::Paragraph(p) => (node_type.to_string(), inline_entries(&p.content)),
        Block::Heading(h) => (format!("{node_type} {}", h.level), inline_entries(&h.content)),
        Block::BulletList(list) | Block::OrderedList(list) => (
            format!("{node_type} ({} items)", list.content.len()),
            list.content.iter().map(item_entry).collect(),
        ),
        Block::Blockquote(q) => (node_type.to_string(), block_entries(&q.content)),
        Block::CodeBlock(code) => {
            let label = match &code.language {
                Some(language) => format!("{node_type} {language}"),
                None => node_type.to_string(),
            };
            (label, code.content.iter().map(text_entry).collect())
        }
        Block::HorizontalRule => (node_type.to_string(), Vec::new()),
        Block::Unknown(unknown) => (
            format!("{node_type} (unknown)"),
            unknown.content.iter().map(node_entry).collect(),
        ),
    };
    Entry {
        icon: get_icon(node_type),
        label,
        children,
    }
}

fn item_entry(item: &ListItem) -> Entry {
    Entry {
        icon: get_icon("listItem"),
        label: "listItem".to_string(),
        children: block_entries(&item.content),
    }
}

fn inline_entry(inline: &Inline) -> Entry {
    match inline {
        Inline::Text(text) => text_entry(text),
        Inline::Mention(mention) => Entry::leaf(
            "mention",
            format!("{} ({})", truncate(&mention.label), mention.id),
        ),
        Inline::HardBreak => Entry::leaf("hardBreak", "hardBreak".to_string()),
        Inline::Unknown(unknown) => Entry {
            icon: get_icon(&unknown.node_type),
            label: format!("{} (unknown)", unknown.node_type),
            children: unknown.content.iter().map(node_entry).collect(),
        },
    }
}

fn text_entry(text: &Text) -> Entry {
    let mut label = format!("{:?}", truncate(&text.text));
    if !text.marks.is_empty() {
        let names: Vec<&str> = text.marks.iter().map(|m| m.name()).collect();
        label.push_str(&format!(" [{}]", names.join(", ")));
    }
    Entry::leaf("text", label)
}

fn node_entry(node: &Node) -> Entry {
    match node {
        Node::Block(block) => block_entry(block),
        Node::Inline(inline) => inline_entry(inline),
    }
}

fn block_entries(blocks: &[Block]) -> Vec<Entry> {
    blocks.iter().map(block_entry).collect()
}

fn inline_entries(inlines: &[Inline]) -> Vec<Entry> {
    inlines.iter().map(inline_entry).collect()
}

fn truncate(text: &str) -> String {
    if text.chars().count() > MAX_LABEL_CHARS {
        let head: String = text.chars().take(MAX_LABEL_CHARS - 1).collect();
        format!("{head}…")
    } else {
        text.to_string()
    }
}

fn format_entries(entries: &[Entry], prefix: &str, output: &mut String) {
    for (i, entry) in entries.iter().enumerate() {
        let is_last = i == entries.len() - 1;
        let connector = if is_last { "└─" } else { "├─" };
        output.push_str(&format!(
            "{prefix}{connector} {} {}\n",
            entry.icon, entry.label
        ));
        let child_prefix = format!("{prefix}{}", if is_last { "  " } else { "│ " });
        format_entries(&entry.children, &child_prefix, output);
    }
}

pub fn to_treeviz_str(doc: &Document) -> String {
    let mut output = format!(
        "{} Document ({} blocks)\n",
        get_icon("doc"),
        doc.content.len()
    );
    format_entries(&block_entries(&doc.content), "", &mut output);
    output
}

/// Format implementation for the tree view
#[derive(Debug, Clone, Copy, Default)]
pub struct TreevizFormat;

impl Format for TreevizFormat {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn description(&self) -> &str {
        "Visual tree representation with indentation and Unicode icons"
    }

    fn file_extensions(&self) -> &[&str] {
        &["tree", "treeviz"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(to_treeviz_str(doc))
    }
}
