//! Core data structures for the canonical document tree.
//!
//! Every container owns its children in a `Vec`, so the tree is a strict
//! hierarchy without shared or back references. Converters build a fresh tree
//! per call and never touch it again once it is returned.

/// Represents the root of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub content: Vec<Block>,
}

impl Document {
    pub fn new(content: Vec<Block>) -> Self {
        Document { content }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Block-level node: a paragraph or anything larger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph(Paragraph),
    Heading(Heading),
    BulletList(List),
    OrderedList(List),
    Blockquote(Blockquote),
    CodeBlock(CodeBlock),
    HorizontalRule,
    /// Unknown ADF container kept with its original type name.
    Unknown(UnknownNode),
}

impl Block {
    /// Name used in the storage JSON `type` field.
    pub fn node_type(&self) -> &str {
        match self {
            Block::Paragraph(_) => "paragraph",
            Block::Heading(_) => "heading",
            Block::BulletList(_) => "bulletList",
            Block::OrderedList(_) => "orderedList",
            Block::Blockquote(_) => "blockquote",
            Block::CodeBlock(_) => "codeBlock",
            Block::HorizontalRule => "horizontalRule",
            Block::Unknown(node) => &node.node_type,
        }
    }

    pub fn paragraph(content: Vec<Inline>) -> Self {
        Block::Paragraph(Paragraph { content })
    }
}

/// Represents a paragraph of inline content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    pub content: Vec<Inline>,
}

/// Represents a heading. `level` is always within `1..=6`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub level: u8,
    pub content: Vec<Inline>,
}

/// Items of a bullet or ordered list; the kind lives on the [`Block`] variant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct List {
    pub content: Vec<ListItem>,
}

/// Represents an item in a list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListItem {
    pub content: Vec<Block>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blockquote {
    pub content: Vec<Block>,
}

/// Verbatim code. `content` holds at most one unmarked [`Text`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeBlock {
    pub language: Option<String>,
    pub content: Vec<Text>,
}

impl CodeBlock {
    pub fn new(language: Option<String>, code: String) -> Self {
        let content = if code.is_empty() {
            Vec::new()
        } else {
            vec![Text::plain(code)]
        };
        CodeBlock { language, content }
    }

    /// The verbatim code, concatenated.
    pub fn code(&self) -> String {
        self.content.iter().map(|t| t.text.as_str()).collect()
    }
}

/// Inline content, such as text runs, mentions and hard breaks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(Text),
    Mention(Mention),
    HardBreak,
    /// Unknown ADF inline container kept with its original type name.
    Unknown(UnknownNode),
}

impl Inline {
    pub fn node_type(&self) -> &str {
        match self {
            Inline::Text(_) => "text",
            Inline::Mention(_) => "mention",
            Inline::HardBreak => "hardBreak",
            Inline::Unknown(node) => &node.node_type,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Inline::Text(Text::plain(text))
    }

    pub fn marked(text: impl Into<String>, marks: Vec<Mark>) -> Self {
        Inline::Text(Text {
            text: text.into(),
            marks,
        })
    }
}

/// A run of text carrying a set of marks in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Text {
    pub text: String,
    pub marks: Vec<Mark>,
}

impl Text {
    pub fn plain(text: impl Into<String>) -> Self {
        Text {
            text: text.into(),
            marks: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mention {
    pub id: String,
    pub label: String,
}

/// Text-run decoration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Mark {
    Bold,
    Italic,
    Strike,
    Code,
    Link { href: String },
}

impl Mark {
    pub fn name(&self) -> &'static str {
        match self {
            Mark::Bold => "bold",
            Mark::Italic => "italic",
            Mark::Strike => "strike",
            Mark::Code => "code",
            Mark::Link { .. } => "link",
        }
    }

    /// Two marks of the same kind may not decorate one run; links compare by
    /// kind only, so an inner link does not stack on an outer one.
    pub fn same_kind(&self, other: &Mark) -> bool {
        self.name() == other.name()
    }
}

/// Either side of the tree, used for the children of unknown containers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Block(Block),
    Inline(Inline),
}

/// A node whose type the converters do not know but which carried children.
///
/// The original type name is preserved and the children are converted
/// normally. Such nodes fall outside the canonical schema and are reported by
/// [`crate::canonical::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownNode {
    pub node_type: String,
    pub content: Vec<Node>,
}
