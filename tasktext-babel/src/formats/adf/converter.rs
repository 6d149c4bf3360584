//! ADF tree converter (Atlassian Document Format → canonical tree)
//!
//! Every node's `type` is classified into a [`NodePolicy`] first and the
//! policy decides what happens to it. Conversion of a single node returns a
//! `Result`; a failed child is logged and left out of its parent while its
//! siblings carry on, so no error ever reaches the caller.

use crate::canonical::{
    Block, Blockquote, CodeBlock, Document, Heading, Inline, List, ListItem, Mark, Mention, Node,
    Text, UnknownNode,
};
use crate::error::ConversionError;
use crate::formats::markdown::inline::{push_inline, with_mark};
use crate::options::{ConvertOptions, UnknownNodePolicy};
use serde_json::{Map, Value};

/// What to do with an ADF node, decided from its `type` alone (plus whether
/// it carries a `content` array).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodePolicy {
    Convert(AdfKind),
    Drop(DropReason),
    PassThroughUnknown,
}

/// ADF node types with a canonical counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdfKind {
    Paragraph,
    BulletList,
    OrderedList,
    /// Mapped to a bullet list
    TaskList,
    ListItem,
    TaskItem,
    Heading,
    Blockquote,
    CodeBlock,
    Rule,
    Text,
    Mention,
    Emoji,
    HardBreak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// Explicitly not rendered (`inlineCard`, `media…`)
    Excluded,
    /// Complex structure without a canonical form (`table…`, `expand`, extensions)
    Unsupported,
    /// Unknown type without children
    UnknownLeaf,
}

/// Classify a node type. `has_content` tells whether the node carries a
/// `content` array, which only matters for unknown types.
pub fn classify(node_type: &str, has_content: bool) -> NodePolicy {
    let kind = match node_type {
        "paragraph" => AdfKind::Paragraph,
        "bulletList" => AdfKind::BulletList,
        "orderedList" => AdfKind::OrderedList,
        "taskList" => AdfKind::TaskList,
        "listItem" => AdfKind::ListItem,
        "taskItem" => AdfKind::TaskItem,
        "heading" => AdfKind::Heading,
        "blockquote" => AdfKind::Blockquote,
        "codeBlock" => AdfKind::CodeBlock,
        "rule" => AdfKind::Rule,
        "text" => AdfKind::Text,
        "mention" => AdfKind::Mention,
        "emoji" => AdfKind::Emoji,
        "hardBreak" => AdfKind::HardBreak,
        "inlineCard" => return NodePolicy::Drop(DropReason::Excluded),
        t if t.starts_with("media") => return NodePolicy::Drop(DropReason::Excluded),
        t if t.starts_with("table")
            || t == "expand"
            || t == "nestedExpand"
            || is_extension(t) =>
        {
            return NodePolicy::Drop(DropReason::Unsupported)
        }
        _ if has_content => return NodePolicy::PassThroughUnknown,
        _ => return NodePolicy::Drop(DropReason::UnknownLeaf),
    };
    NodePolicy::Convert(kind)
}

/// `extension`, `extensionFrame`, `bodiedExtension`, `inlineExtension` and kin.
fn is_extension(node_type: &str) -> bool {
    let lower = node_type.to_ascii_lowercase();
    lower.starts_with("extension") || lower.ends_with("extension")
}

/// Convert an ADF document. Anything that is not an object with a `content`
/// array converts to an empty document.
pub fn convert_document(root: &Value, options: &ConvertOptions) -> Document {
    let Some(content) = root.get("content").and_then(Value::as_array) else {
        log::debug!("ADF root has no content array, returning an empty document");
        return Document::default();
    };
    if let Some(node_type) = root.get("type").and_then(Value::as_str) {
        if node_type != "doc" {
            log::debug!("ADF root has type '{node_type}', converting its content anyway");
        }
    }
    let converter = Converter { options };
    Document::new(converter.blocks(content, 0))
}

/// One converted node, before the parent decides where it fits.
enum Converted {
    Block(Block),
    Inline(Inline),
    Item(ListItem),
}

struct Converter<'o> {
    options: &'o ConvertOptions,
}

impl Converter<'_> {
    /// Convert one node, whatever its kind. `Ok(None)` means dropped by policy.
    fn node(&self, value: &Value, depth: usize) -> Result<Option<Converted>, ConversionError> {
        if depth > self.options.max_depth {
            return Err(ConversionError::DepthExceeded(self.options.max_depth));
        }
        let object = value.as_object().ok_or(ConversionError::NotAnObject(json_kind(value)))?;
        let node_type = object
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| ConversionError::MissingField {
                node_type: "node".to_string(),
                field: "type",
            })?;
        let content = object.get("content").and_then(Value::as_array);

        match classify(node_type, content.is_some()) {
            NodePolicy::Convert(kind) => self.convert(kind, node_type, object, depth).map(Some),
            NodePolicy::Drop(reason) => {
                log::debug!("dropping ADF '{node_type}' node ({reason:?})");
                Ok(None)
            }
            NodePolicy::PassThroughUnknown => match self.options.unknown_nodes {
                UnknownNodePolicy::PassThrough => {
                    let children = content.map(Vec::as_slice).unwrap_or_default();
                    Ok(Some(Converted::Block(Block::Unknown(
                        self.unknown(node_type, children, depth),
                    ))))
                }
                UnknownNodePolicy::Drop => {
                    log::debug!("dropping unknown ADF '{node_type}' node");
                    Ok(None)
                }
            },
        }
    }

    fn convert(
        &self,
        kind: AdfKind,
        node_type: &str,
        object: &Map<String, Value>,
        depth: usize,
    ) -> Result<Converted, ConversionError> {
        let children = object
            .get("content")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();
        let attrs = object.get("attrs").and_then(Value::as_object);

        let converted = match kind {
            AdfKind::Paragraph => Converted::Block(Block::paragraph(self.inlines(children, depth))),
            AdfKind::Heading => {
                let level = attrs
                    .and_then(|a| a.get("level"))
                    .and_then(Value::as_i64)
                    .unwrap_or(1)
                    .clamp(1, 6) as u8;
                Converted::Block(Block::Heading(Heading {
                    level,
                    content: self.inlines(children, depth),
                }))
            }
            AdfKind::BulletList | AdfKind::TaskList => {
                Converted::Block(Block::BulletList(self.list(children, depth)))
            }
            AdfKind::OrderedList => Converted::Block(Block::OrderedList(self.list(children, depth))),
            AdfKind::ListItem | AdfKind::TaskItem => Converted::Item(ListItem {
                content: self.blocks(children, depth),
            }),
            AdfKind::Blockquote => Converted::Block(Block::Blockquote(Blockquote {
                content: self.blocks(children, depth),
            })),
            AdfKind::CodeBlock => {
                let language = attrs
                    .and_then(|a| a.get("language"))
                    .and_then(Value::as_str)
                    .filter(|l| !l.is_empty())
                    .map(str::to_string);
                let code: String = children
                    .iter()
                    .filter_map(|child| child.get("text").and_then(Value::as_str))
                    .collect();
                Converted::Block(Block::CodeBlock(CodeBlock::new(language, code)))
            }
            AdfKind::Rule => Converted::Block(Block::HorizontalRule),
            AdfKind::Text => {
                let text = object
                    .get("text")
                    .and_then(Value::as_str)
                    .ok_or_else(|| missing(node_type, "text"))?;
                let marks = object
                    .get("marks")
                    .and_then(Value::as_array)
                    .map(|marks| convert_marks(marks))
                    .unwrap_or_default();
                Converted::Inline(Inline::Text(Text {
                    text: text.to_string(),
                    marks,
                }))
            }
            AdfKind::Mention => {
                let attrs = attrs.ok_or_else(|| missing(node_type, "attrs"))?;
                let id = match attrs.get("id") {
                    Some(Value::String(id)) => id.clone(),
                    Some(Value::Number(id)) => id.to_string(),
                    Some(_) => {
                        return Err(ConversionError::InvalidField {
                            node_type: node_type.to_string(),
                            field: "id",
                        })
                    }
                    None => return Err(missing(node_type, "id")),
                };
                let label = attrs
                    .get("text")
                    .and_then(Value::as_str)
                    .or_else(|| attrs.get("displayName").and_then(Value::as_str))
                    .unwrap_or_default()
                    .to_string();
                Converted::Inline(Inline::Mention(Mention { id, label }))
            }
            AdfKind::Emoji => {
                let attrs = attrs.ok_or_else(|| missing(node_type, "attrs"))?;
                let shortcode = attrs
                    .get("shortName")
                    .and_then(Value::as_str)
                    .or_else(|| attrs.get("text").and_then(Value::as_str))
                    .ok_or_else(|| missing(node_type, "shortName"))?;
                Converted::Inline(Inline::plain(shortcode))
            }
            AdfKind::HardBreak => Converted::Inline(Inline::HardBreak),
        };
        Ok(converted)
    }

    /// Children in block position. Runs of stray inline nodes are wrapped in
    /// a paragraph, which is also how `taskItem` text ends up in its item.
    fn blocks(&self, children: &[Value], depth: usize) -> Vec<Block> {
        let mut blocks = Vec::new();
        let mut loose: Vec<Inline> = Vec::new();

        for converted in self.children(children, depth) {
            match converted {
                Converted::Inline(inline) => push_inline(&mut loose, inline),
                Converted::Block(block) => {
                    flush_loose(&mut blocks, &mut loose);
                    blocks.push(block);
                }
                Converted::Item(item) => {
                    flush_loose(&mut blocks, &mut loose);
                    blocks.extend(item.content);
                }
            }
        }
        flush_loose(&mut blocks, &mut loose);
        blocks
    }

    /// Children in inline position. Block nodes cannot live here and are
    /// dropped; unknown containers become inline pass-through nodes.
    fn inlines(&self, children: &[Value], depth: usize) -> Vec<Inline> {
        let mut inlines = Vec::new();
        for converted in self.children(children, depth) {
            match converted {
                Converted::Inline(inline) => push_inline(&mut inlines, inline),
                Converted::Block(Block::Unknown(node)) => inlines.push(Inline::Unknown(node)),
                Converted::Block(block) => {
                    log::debug!("dropping '{}' block inside inline content", block.node_type());
                }
                Converted::Item(_) => log::debug!("dropping list item inside inline content"),
            }
        }
        inlines
    }

    /// List children. A list nested directly in a list joins the previous
    /// item; anything else that is not an item gets an item of its own.
    fn list(&self, children: &[Value], depth: usize) -> List {
        let mut items: Vec<ListItem> = Vec::new();
        for converted in self.children(children, depth) {
            match converted {
                Converted::Item(item) => items.push(item),
                Converted::Block(block @ (Block::BulletList(_) | Block::OrderedList(_))) => {
                    match items.last_mut() {
                        Some(last) => last.content.push(block),
                        None => items.push(ListItem {
                            content: vec![block],
                        }),
                    }
                }
                Converted::Block(block) => items.push(ListItem {
                    content: vec![block],
                }),
                Converted::Inline(inline) => items.push(ListItem {
                    content: vec![Block::paragraph(vec![inline])],
                }),
            }
        }
        List { content: items }
    }

    fn unknown(&self, node_type: &str, children: &[Value], depth: usize) -> UnknownNode {
        let content = self
            .children(children, depth)
            .into_iter()
            .map(|converted| match converted {
                Converted::Block(block) => Node::Block(block),
                Converted::Inline(inline) => Node::Inline(inline),
                Converted::Item(item) => Node::Block(Block::BulletList(List {
                    content: vec![item],
                })),
            })
            .collect();
        UnknownNode {
            node_type: node_type.to_string(),
            content,
        }
    }

    /// Convert each child on its own; failures and `null`s are left out.
    fn children(&self, children: &[Value], depth: usize) -> Vec<Converted> {
        children
            .iter()
            .filter_map(|child| {
                if child.is_null() {
                    return None;
                }
                match self.node(child, depth + 1) {
                    Ok(Some(Converted::Inline(Inline::Text(text))))
                        if text.text.is_empty() && text.marks.is_empty() =>
                    {
                        None
                    }
                    Ok(converted) => converted,
                    Err(err) => {
                        log::warn!("skipping ADF node: {err}");
                        None
                    }
                }
            })
            .collect()
    }
}

/// Map ADF marks onto canonical ones. Marks with no canonical counterpart
/// and links without an `href` are left out.
fn convert_marks(marks: &[Value]) -> Vec<Mark> {
    marks.iter().fold(Vec::new(), |acc, mark| {
        let mark_type = mark.get("type").and_then(Value::as_str).unwrap_or_default();
        let converted = match mark_type {
            "strong" => Mark::Bold,
            "em" => Mark::Italic,
            "strike" => Mark::Strike,
            "code" => Mark::Code,
            "link" => {
                let href = mark
                    .get("attrs")
                    .and_then(|a| a.get("href"))
                    .and_then(Value::as_str)
                    .filter(|h| !h.trim().is_empty());
                match href {
                    Some(href) => Mark::Link {
                        href: href.to_string(),
                    },
                    None => return acc,
                }
            }
            other => {
                log::debug!("ignoring ADF mark '{other}'");
                return acc;
            }
        };
        with_mark(&acc, converted)
    })
}

fn flush_loose(blocks: &mut Vec<Block>, loose: &mut Vec<Inline>) {
    if !loose.is_empty() {
        blocks.push(Block::paragraph(std::mem::take(loose)));
    }
}

fn missing(node_type: &str, field: &'static str) -> ConversionError {
    ConversionError::MissingField {
        node_type: node_type.to_string(),
        field,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
