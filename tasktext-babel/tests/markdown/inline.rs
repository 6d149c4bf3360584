//! Inline marks of converted Markdown

use crate::common::{link, para, text};
use std::time::{Duration, Instant};
use tasktext_babel::canonical::{Block, Inline, Mark};
use tasktext_babel::markdown_to_canonical;

fn inlines(markdown: &str) -> Vec<Inline> {
    match markdown_to_canonical(Some(markdown)).content.as_slice() {
        [Block::Paragraph(p)] => p.content.clone(),
        other => panic!("expected a single paragraph, got {other:?}"),
    }
}

#[test]
fn test_bold_then_plain() {
    assert_eq!(
        markdown_to_canonical(Some("**bold** text")).content,
        vec![para(vec![
            text("bold", vec![Mark::Bold]),
            Inline::plain(" text"),
        ])]
    );
}

#[test]
fn test_unterminated_bold_is_literal() {
    assert_eq!(
        inlines("**unterminated"),
        vec![Inline::plain("**unterminated")]
    );
}

#[test]
fn test_nested_marks_accumulate() {
    assert_eq!(
        inlines("**bold ~~and struck~~**"),
        vec![
            text("bold ", vec![Mark::Bold]),
            text("and struck", vec![Mark::Bold, Mark::Strike]),
        ]
    );
}

#[test]
fn test_link_with_marked_label() {
    assert_eq!(
        inlines("see [**the** docs](https://d.example)"),
        vec![
            Inline::plain("see "),
            text("the", vec![link("https://d.example"), Mark::Bold]),
            text(" docs", vec![link("https://d.example")]),
        ]
    );
}

#[test]
fn test_code_span_is_verbatim() {
    assert_eq!(
        inlines("use `**x**` here"),
        vec![
            Inline::plain("use "),
            text("**x**", vec![Mark::Code]),
            Inline::plain(" here"),
        ]
    );
}

#[test]
fn test_escaped_delimiters() {
    assert_eq!(inlines(r"\*not italic\*"), vec![Inline::plain("*not italic*")]);
}

#[test]
fn test_link_without_target_is_literal() {
    assert_eq!(inlines("[label]()"), vec![Inline::plain("[label]()")]);
}

#[test]
fn test_hard_break_between_lines() {
    assert_eq!(
        inlines("first  \nsecond"),
        vec![
            Inline::plain("first"),
            Inline::HardBreak,
            Inline::plain("second"),
        ]
    );
}

#[test]
fn test_escaped_closer_is_skipped() {
    assert_eq!(
        inlines(r"*a\*b*"),
        vec![text("a*b", vec![Mark::Italic])]
    );
}

#[test]
fn test_link_target_with_parentheses() {
    assert_eq!(
        inlines("[w](http://x.org/foo_(bar)) end"),
        vec![
            text("w", vec![link("http://x.org/foo_(bar)")]),
            Inline::plain(" end"),
        ]
    );
}

#[test]
fn test_long_line_of_unclosed_openers_scans_quickly() {
    for unit in ["**a ", "~~a ", "*a ", "[a](", "[a "] {
        let line = unit.repeat(100_000 / unit.len());
        let started = Instant::now();
        let runs = inlines(&line);
        let elapsed = started.elapsed();

        assert!(
            elapsed < Duration::from_secs(2),
            "{unit:?} line took {elapsed:?}"
        );
        let plain: String = runs
            .iter()
            .map(|inline| match inline {
                Inline::Text(run) => run.text.as_str(),
                other => panic!("unexpected inline {other:?}"),
            })
            .collect();
        assert_eq!(plain, line.trim_end());
    }
}
