//! ADF documents converted end to end

use crate::common::{fixture, para, text};
use serde_json::json;
use tasktext_babel::canonical::{
    Block, CodeBlock, Heading, Inline, List, ListItem, Mark, Mention, Node, UnknownNode,
};
use tasktext_babel::format::Format;
use tasktext_babel::formats::AdfFormat;
use tasktext_babel::{adf_to_canonical, FormatError, FormatRegistry};

#[test]
fn test_issue_fixture() {
    let doc = AdfFormat::default()
        .parse(&fixture("issue.adf"))
        .expect("fixture is valid JSON");

    let expected = vec![
        Block::Heading(Heading {
            level: 2,
            content: vec![Inline::plain("Login fails")],
        }),
        para(vec![
            Inline::Mention(Mention {
                id: "5b10a2844c20165700ede21g".to_string(),
                label: "@Dana".to_string(),
            }),
            Inline::plain(" the "),
            text("SSO", vec![Mark::Bold]),
            Inline::plain(" button does nothing."),
        ]),
        Block::BulletList(List {
            content: vec![ListItem {
                content: vec![
                    para(vec![Inline::plain("open the app")]),
                    Block::OrderedList(List {
                        content: vec![ListItem {
                            content: vec![para(vec![Inline::plain("click login")])],
                        }],
                    }),
                ],
            }],
        }),
        Block::CodeBlock(CodeBlock::new(
            Some("text".to_string()),
            "HTTP 500".to_string(),
        )),
        Block::Unknown(UnknownNode {
            node_type: "panel".to_string(),
            content: vec![Node::Block(para(vec![Inline::plain(
                "Blocks the release.",
            )]))],
        }),
        Block::HorizontalRule,
    ];
    assert_eq!(doc.content, expected);
}

#[test]
fn test_table_only_document_is_empty() {
    let doc = adf_to_canonical(&json!({
        "type": "doc",
        "content": [{
            "type": "table",
            "content": [{ "type": "tableRow", "content": [{ "type": "tableCell", "content": [
                { "type": "paragraph", "content": [{ "type": "text", "text": "cell" }] }
            ] }] }]
        }]
    }));
    assert!(doc.content.is_empty());
}

#[test]
fn test_null_sibling_is_skipped() {
    let doc = adf_to_canonical(&json!({
        "type": "doc",
        "content": [null, { "type": "paragraph", "content": [{ "type": "text", "text": "hi" }] }]
    }));
    assert_eq!(doc.content, vec![para(vec![Inline::plain("hi")])]);
}

#[test]
fn test_stray_inline_is_wrapped() {
    let doc = adf_to_canonical(&json!({
        "type": "doc",
        "content": [
            { "type": "text", "text": "loose " },
            { "type": "text", "text": "words", "marks": [{ "type": "em" }] },
            { "type": "rule" }
        ]
    }));
    assert_eq!(
        doc.content,
        vec![
            para(vec![
                Inline::plain("loose "),
                text("words", vec![Mark::Italic]),
            ]),
            Block::HorizontalRule,
        ]
    );
}

#[test]
fn test_invalid_json_through_registry() {
    let registry = FormatRegistry::default();
    assert!(matches!(
        registry.parse("{\"type\": ", "adf"),
        Err(FormatError::ParseError(_))
    ));
}
