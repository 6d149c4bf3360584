//! Per-type node policies of the ADF converter

use crate::common::{fixture, link, para, text};
use serde_json::{json, Value};
use tasktext_babel::canonical::{Block, Inline, Mark};
use tasktext_babel::formats::adf::converter::{classify, AdfKind, DropReason, NodePolicy};
use tasktext_babel::{adf_to_canonical, adf_to_canonical_with, ConvertOptions, UnknownNodePolicy};

fn paragraph_of(inline: Value) -> Value {
    json!({ "type": "doc", "content": [{ "type": "paragraph", "content": [inline] }] })
}

#[test]
fn test_policy_table() {
    let cases = [
        ("taskList", true, NodePolicy::Convert(AdfKind::TaskList)),
        ("taskItem", true, NodePolicy::Convert(AdfKind::TaskItem)),
        ("hardBreak", false, NodePolicy::Convert(AdfKind::HardBreak)),
        ("inlineCard", false, NodePolicy::Drop(DropReason::Excluded)),
        ("mediaGroup", true, NodePolicy::Drop(DropReason::Excluded)),
        ("tableCell", true, NodePolicy::Drop(DropReason::Unsupported)),
        ("nestedExpand", true, NodePolicy::Drop(DropReason::Unsupported)),
        ("inlineExtension", false, NodePolicy::Drop(DropReason::Unsupported)),
        ("extensionFrame", true, NodePolicy::Drop(DropReason::Unsupported)),
        ("decisionList", true, NodePolicy::PassThroughUnknown),
        ("date", false, NodePolicy::Drop(DropReason::UnknownLeaf)),
    ];
    for (node_type, has_content, expected) in cases {
        assert_eq!(classify(node_type, has_content), expected, "{node_type}");
    }
}

#[test]
fn test_extension_frame_with_content_is_dropped() {
    let doc = adf_to_canonical(&json!({
        "type": "doc",
        "content": [
            { "type": "extensionFrame", "content": [
                { "type": "paragraph", "content": [{ "type": "text", "text": "macro body" }] }
            ] },
            { "type": "paragraph", "content": [{ "type": "text", "text": "kept" }] }
        ]
    }));
    assert_eq!(doc.content, vec![para(vec![Inline::plain("kept")])]);
}

#[test]
fn test_unsupported_marks_are_ignored() {
    let doc = adf_to_canonical(&paragraph_of(json!({
        "type": "text",
        "text": "x",
        "marks": [
            { "type": "underline" },
            { "type": "link", "attrs": {} },
            { "type": "code" },
            { "type": "strike" },
            { "type": "strike" }
        ]
    })));
    assert_eq!(
        doc.content,
        vec![para(vec![text("x", vec![Mark::Code, Mark::Strike])])]
    );
}

#[test]
fn test_link_mark_keeps_href() {
    let doc = adf_to_canonical(&paragraph_of(json!({
        "type": "text",
        "text": "docs",
        "marks": [{ "type": "link", "attrs": { "href": "https://d.example", "title": "Docs" } }]
    })));
    assert_eq!(
        doc.content,
        vec![para(vec![text("docs", vec![link("https://d.example")])])]
    );
}

#[test]
fn test_block_inside_paragraph_is_dropped() {
    let doc = adf_to_canonical(&json!({
        "type": "doc",
        "content": [{
            "type": "paragraph",
            "content": [
                { "type": "text", "text": "a" },
                { "type": "rule" },
                { "type": "text", "text": "b" }
            ]
        }]
    }));
    assert_eq!(doc.content, vec![para(vec![Inline::plain("ab")])]);
}

#[test]
fn test_drop_policy_removes_unknown_containers() {
    let options = ConvertOptions {
        unknown_nodes: UnknownNodePolicy::Drop,
        ..ConvertOptions::default()
    };
    let source: Value = serde_json::from_str(&fixture("issue.adf")).unwrap();

    let kept = adf_to_canonical(&source);
    let dropped = adf_to_canonical_with(&source, &options);

    assert_eq!(kept.content.len(), 6);
    assert_eq!(dropped.content.len(), 5);
    assert!(!dropped
        .content
        .iter()
        .any(|block| matches!(block, Block::Unknown(_))));
}
