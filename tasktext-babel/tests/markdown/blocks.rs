//! Block structure of converted Markdown

use crate::common::{fixture, link, para, text};
use insta::assert_snapshot;
use tasktext_babel::canonical::{Block, CodeBlock, Heading, Inline, List, ListItem, Mark};
use tasktext_babel::format::Format;
use tasktext_babel::formats::treeviz::to_treeviz_str;
use tasktext_babel::formats::MarkdownFormat;
use tasktext_babel::{markdown_to_canonical, markdown_to_canonical_with, ConvertOptions, Document};

fn item(blocks: Vec<Block>) -> ListItem {
    ListItem { content: blocks }
}

#[test]
fn test_missing_and_empty_input() {
    assert_eq!(markdown_to_canonical(None), Document::default());
    assert_eq!(markdown_to_canonical(Some("")), Document::default());
    assert_eq!(markdown_to_canonical(Some("\n\n   \n")), Document::default());
}

#[test]
fn test_nested_bullet_list() {
    let doc = markdown_to_canonical(Some("- a\n  - b\n- c"));
    assert_eq!(
        doc.content,
        vec![Block::BulletList(List {
            content: vec![
                item(vec![
                    para(vec![Inline::plain("a")]),
                    Block::BulletList(List {
                        content: vec![item(vec![para(vec![Inline::plain("b")])])],
                    }),
                ]),
                item(vec![para(vec![Inline::plain("c")])]),
            ],
        })]
    );
}

#[test]
fn test_seven_hashes_is_a_paragraph() {
    let doc = markdown_to_canonical(Some("####### x"));
    assert_eq!(doc.content, vec![para(vec![Inline::plain("####### x")])]);
}

#[test]
fn test_task_fixture() {
    let doc = MarkdownFormat::default()
        .parse(&fixture("task.md"))
        .expect("markdown never fails to parse");

    let expected = vec![
        Block::Heading(Heading {
            level: 1,
            content: vec![Inline::plain("Release checklist")],
        }),
        para(vec![
            Inline::plain("Ship the "),
            text("new importer", vec![Mark::Bold]),
            Inline::plain(" before "),
            text("Friday", vec![Mark::Italic]),
            Inline::plain(". Owners: see the "),
            text("runbook", vec![link("https://example.com/runbook")]),
            Inline::plain("."),
        ]),
        Block::BulletList(List {
            content: vec![
                item(vec![para(vec![
                    Inline::plain("write "),
                    text("docs", vec![Mark::Strike]),
                    Inline::plain(" notes"),
                ])]),
                item(vec![
                    para(vec![
                        Inline::plain("run "),
                        text("cargo test", vec![Mark::Code]),
                    ]),
                    Block::BulletList(List {
                        content: vec![item(vec![para(vec![Inline::plain("fix failures")])])],
                    }),
                ]),
                item(vec![para(vec![Inline::plain("tag the release")])]),
            ],
        }),
        Block::OrderedList(List {
            content: vec![
                item(vec![para(vec![Inline::plain("build")])]),
                item(vec![para(vec![Inline::plain("publish")])]),
            ],
        }),
        Block::Blockquote(tasktext_babel::canonical::Blockquote {
            content: vec![para(vec![
                Inline::plain("Ping ops when "),
                text("done", vec![Mark::Bold]),
                Inline::plain("."),
            ])],
        }),
        Block::CodeBlock(CodeBlock::new(
            Some("sh".to_string()),
            "make release".to_string(),
        )),
        Block::HorizontalRule,
    ];
    assert_eq!(doc.content, expected);
}

#[test]
fn test_code_block_keeps_markup_verbatim() {
    let doc = markdown_to_canonical(Some("```\n**not bold** [x](y)\n```"));
    let Block::CodeBlock(code) = &doc.content[0] else {
        panic!("expected a code block, got {:?}", doc.content[0]);
    };
    assert_eq!(code.language, None);
    assert_eq!(code.code(), "**not bold** [x](y)");
}

#[test]
fn test_depth_limit_flattens_to_text() {
    let options = ConvertOptions {
        max_depth: 1,
        ..ConvertOptions::default()
    };
    let doc = markdown_to_canonical_with(Some("> > quoted twice"), &options);
    assert_eq!(
        doc.content,
        vec![Block::Blockquote(tasktext_babel::canonical::Blockquote {
            content: vec![para(vec![Inline::plain("> quoted twice")])],
        })]
    );
}

#[test]
fn test_unsupported_syntax_stays_text() {
    let doc = markdown_to_canonical(Some("| a | b |\n|---|---|\n<div>x</div>"));
    assert_eq!(doc.content.len(), 1);
    assert!(matches!(doc.content[0], Block::Paragraph(_)));
}

#[test]
fn test_tree_view_of_nested_content() {
    let doc = markdown_to_canonical(Some("# Release\n\n- **ship** it\n  1. tag"));
    let tree = to_treeviz_str(&doc);
    assert_snapshot!(tree.trim_end(), @r#"
⧉ Document (2 blocks)
├─ § heading 1
│ └─ ◦ "Release"
└─ ☰ bulletList (1 items)
  └─ • listItem
    ├─ ¶ paragraph
    │ ├─ ◦ "ship" [bold]
    │ └─ ◦ " it"
    └─ ≡ orderedList (1 items)
      └─ • listItem
        └─ ¶ paragraph
          └─ ◦ "tag"
"#);
}
