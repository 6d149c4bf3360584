//! Storage JSON shape of the canonical tree.
//!
//! Nodes are tagged by `type`, containers always carry a `content` array and
//! node parameters live under `attrs`. Text runs omit `marks` when they have
//! none.

use super::nodes::*;
use serde_json::{json, Map, Value};

/// Convert a document to its storage JSON value.
pub fn to_json(doc: &Document) -> Value {
    json!({
        "type": "doc",
        "content": doc.content.iter().map(block_to_json).collect::<Vec<_>>(),
    })
}

/// Convert a document to a JSON string, optionally pretty-printed.
pub fn to_json_string(doc: &Document, pretty: bool) -> Result<String, serde_json::Error> {
    let value = to_json(doc);
    if pretty {
        serde_json::to_string_pretty(&value)
    } else {
        serde_json::to_string(&value)
    }
}

fn block_to_json(block: &Block) -> Value {
    match block {
        Block::Paragraph(p) => container("paragraph", inlines_to_json(&p.content)),
        Block::Heading(h) => json!({
            "type": "heading",
            "attrs": { "level": h.level },
            "content": inlines_to_json(&h.content),
        }),
        Block::BulletList(list) => container("bulletList", items_to_json(list)),
        Block::OrderedList(list) => container("orderedList", items_to_json(list)),
        Block::Blockquote(quote) => container(
            "blockquote",
            quote.content.iter().map(block_to_json).collect(),
        ),
        Block::CodeBlock(code) => json!({
            "type": "codeBlock",
            "attrs": { "language": code.language },
            "content": code.content.iter().map(text_to_json).collect::<Vec<_>>(),
        }),
        Block::HorizontalRule => json!({ "type": "horizontalRule" }),
        Block::Unknown(node) => unknown_to_json(node),
    }
}

fn items_to_json(list: &List) -> Vec<Value> {
    list.content
        .iter()
        .map(|item| container("listItem", item.content.iter().map(block_to_json).collect()))
        .collect()
}

fn inlines_to_json(inlines: &[Inline]) -> Vec<Value> {
    inlines.iter().map(inline_to_json).collect()
}

fn inline_to_json(inline: &Inline) -> Value {
    match inline {
        Inline::Text(text) => text_to_json(text),
        Inline::Mention(mention) => json!({
            "type": "mention",
            "attrs": { "id": mention.id, "label": mention.label },
        }),
        Inline::HardBreak => json!({ "type": "hardBreak" }),
        Inline::Unknown(node) => unknown_to_json(node),
    }
}

fn text_to_json(text: &Text) -> Value {
    let mut object = Map::new();
    object.insert("type".to_string(), json!("text"));
    object.insert("text".to_string(), json!(text.text));
    if !text.marks.is_empty() {
        let marks = text.marks.iter().map(mark_to_json).collect::<Vec<_>>();
        object.insert("marks".to_string(), Value::Array(marks));
    }
    Value::Object(object)
}

fn mark_to_json(mark: &Mark) -> Value {
    match mark {
        Mark::Link { href } => json!({ "type": "link", "attrs": { "href": href } }),
        other => json!({ "type": other.name() }),
    }
}

fn unknown_to_json(node: &UnknownNode) -> Value {
    let content = node
        .content
        .iter()
        .map(|child| match child {
            Node::Block(block) => block_to_json(block),
            Node::Inline(inline) => inline_to_json(inline),
        })
        .collect();
    container(&node.node_type, content)
}

fn container(node_type: &str, content: Vec<Value>) -> Value {
    json!({ "type": node_type, "content": content })
}
