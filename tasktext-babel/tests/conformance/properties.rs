//! Property tests: any input converts, deterministically, into a valid tree

use proptest::prelude::*;
use serde_json::{json, Value};
use tasktext_babel::{adf_to_canonical, markdown_to_canonical, validate};

/// Lines built from the Markdown syntax the converter reacts to, so the
/// generator reaches lists, quotes, fences and marks often.
fn markdown_line() -> impl Strategy<Value = String> {
    let prefix = prop_oneof![
        Just(""),
        Just("# "),
        Just("###### "),
        Just("####### "),
        Just("- "),
        Just("  - "),
        Just("    "),
        Just("1. "),
        Just("> "),
        Just("> > "),
        Just("```"),
        Just("---"),
    ];
    let word = prop_oneof![
        "[a-z]{1,6}",
        Just("**".to_string()),
        Just("*".to_string()),
        Just("~~".to_string()),
        Just("`".to_string()),
        Just("[".to_string()),
        Just("](".to_string()),
        Just(")".to_string()),
        Just("\\".to_string()),
        Just("  ".to_string()),
    ];
    (prefix, prop::collection::vec(word, 0..8))
        .prop_map(|(prefix, words)| format!("{prefix}{}", words.join(" ")))
}

fn markdown_document() -> impl Strategy<Value = String> {
    prop::collection::vec(markdown_line(), 0..12).prop_map(|lines| lines.join("\n"))
}

fn adf_node() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        "[a-z ]{0,8}".prop_map(|text| json!({ "type": "text", "text": text })),
        Just(json!({ "type": "text", "text": "b", "marks": [{ "type": "strong" }, { "type": "link" }] })),
        Just(json!({ "type": "hardBreak" })),
        Just(json!({ "type": "mention", "attrs": { "id": "1" } })),
        Just(json!({ "type": "emoji", "attrs": {} })),
        Just(json!({ "type": "rule" })),
        Just(json!({ "type": "inlineCard" })),
        Just(json!(null)),
        Just(json!(7)),
        Just(json!({ "type": "heading", "attrs": { "level": 12 } })),
    ];
    leaf.prop_recursive(6, 64, 4, |inner| {
        let kind = prop_oneof![
            Just("paragraph"),
            Just("bulletList"),
            Just("orderedList"),
            Just("listItem"),
            Just("taskList"),
            Just("taskItem"),
            Just("blockquote"),
            Just("codeBlock"),
            Just("heading"),
            Just("table"),
            Just("panel"),
        ];
        (kind, prop::collection::vec(inner, 0..4))
            .prop_map(|(kind, content)| json!({ "type": kind, "content": content }))
    })
}

proptest! {
    #[test]
    fn markdown_never_panics_and_validates(source in markdown_document()) {
        let violations = validate(&markdown_to_canonical(Some(&source)));
        prop_assert!(violations.is_empty(), "{:?}", violations);
    }

    #[test]
    fn markdown_accepts_arbitrary_text(source in ".*") {
        let violations = validate(&markdown_to_canonical(Some(&source)));
        prop_assert!(violations.is_empty(), "{:?}", violations);
    }

    #[test]
    fn markdown_is_deterministic(source in markdown_document()) {
        prop_assert_eq!(
            markdown_to_canonical(Some(&source)),
            markdown_to_canonical(Some(&source))
        );
    }

    #[test]
    fn adf_never_panics(content in prop::collection::vec(adf_node(), 0..6)) {
        let source = json!({ "type": "doc", "content": content });
        let doc = adf_to_canonical(&source);
        prop_assert_eq!(&doc, &adf_to_canonical(&source));
        for violation in validate(&doc) {
            prop_assert!(
                matches!(violation.kind, tasktext_babel::canonical::ViolationKind::UnknownNode(_)),
                "unexpected violation {}",
                violation
            );
        }
    }
}
