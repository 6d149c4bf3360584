//! Converter output checked against the canonical schema

use crate::common::fixture;
use serde_json::json;
use tasktext_babel::canonical::ViolationKind;
use tasktext_babel::{
    adf_to_canonical, adf_to_canonical_with, markdown_to_canonical, to_json, validate,
    ConvertOptions, UnknownNodePolicy,
};

#[test]
fn test_markdown_fixture_validates() {
    let doc = markdown_to_canonical(Some(&fixture("task.md")));
    let violations = validate(&doc);
    assert!(violations.is_empty(), "{violations:?}");
}

#[test]
fn test_adf_pass_through_is_reported() {
    let source = serde_json::from_str(&fixture("issue.adf")).unwrap();
    let violations = validate(&adf_to_canonical(&source));
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].path, "content[4]");
    assert_eq!(
        violations[0].kind,
        ViolationKind::UnknownNode("panel".to_string())
    );

    let options = ConvertOptions {
        unknown_nodes: UnknownNodePolicy::Drop,
        ..ConvertOptions::default()
    };
    assert!(validate(&adf_to_canonical_with(&source, &options)).is_empty());
}

#[test]
fn test_storage_json_shape() {
    let doc = markdown_to_canonical(Some("## Hi *there*\n\n```rs\nx\n```"));
    assert_eq!(
        to_json(&doc),
        json!({
            "type": "doc",
            "content": [
                {
                    "type": "heading",
                    "attrs": { "level": 2 },
                    "content": [
                        { "type": "text", "text": "Hi " },
                        { "type": "text", "text": "there", "marks": [{ "type": "italic" }] }
                    ]
                },
                {
                    "type": "codeBlock",
                    "attrs": { "language": "rs" },
                    "content": [{ "type": "text", "text": "x" }]
                }
            ]
        })
    );
}

#[test]
fn test_adf_and_markdown_agree_on_shared_content() {
    let from_markdown = markdown_to_canonical(Some("- **ship** it\n\n> later"));
    let from_adf = adf_to_canonical(&json!({
        "type": "doc",
        "content": [
            { "type": "bulletList", "content": [
                { "type": "listItem", "content": [
                    { "type": "paragraph", "content": [
                        { "type": "text", "text": "ship", "marks": [{ "type": "strong" }] },
                        { "type": "text", "text": " it" }
                    ] }
                ] }
            ] },
            { "type": "blockquote", "content": [
                { "type": "paragraph", "content": [{ "type": "text", "text": "later" }] }
            ] }
        ]
    }));
    assert_eq!(from_markdown, from_adf);
}
