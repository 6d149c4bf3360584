//! Icon mapping for the tree view
//!
//! Keyed by canonical node type names, as returned by `node_type()`.

/// Get the Unicode icon for a canonical node type
pub fn get_icon(node_type: &str) -> &'static str {
    match node_type {
        "doc" => "⧉",
        "heading" => "§",
        "paragraph" => "¶",
        "bulletList" => "☰",
        "orderedList" => "≡",
        "listItem" => "•",
        "blockquote" => "\"",
        "codeBlock" => "𝒱",
        "horizontalRule" => "⎯",
        "text" => "◦",
        "mention" => "@",
        "hardBreak" => "↵",
        _ => "○",
    }
}
