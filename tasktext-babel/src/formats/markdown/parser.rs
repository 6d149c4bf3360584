//! Markdown block builder (Markdown → canonical tree)
//!
//! Recursive descent over line slices. Every sub-parser returns the node it
//! built together with the number of lines it consumed, and the caller resumes
//! exactly there:
//!
//!     parse_blocks ──► parse_list ──► parse_list_item ──► parse_blocks (item body)
//!                  └─► parse_blockquote ──────────────────► parse_blocks (quote body)
//!
//! Nested bodies are re-parsed from copies with their container prefix
//! (list indentation, `>` marker) stripped, so each level only ever sees
//! column-relative lines. The parser never fails: anything it does not
//! recognize becomes paragraph text.

use super::inline::{push_inline, scan_inline};
use crate::canonical::{Block, Blockquote, CodeBlock, Document, Heading, Inline, List, ListItem};
use crate::options::ConvertOptions;

/// Parse a Markdown string into a canonical document.
pub fn parse_from_markdown(source: &str, options: &ConvertOptions) -> Document {
    let lines: Vec<String> = source.lines().map(expand_leading_tabs).collect();
    Document::new(parse_blocks(&lines, 0, options.max_depth))
}

/// Classification of a single line, computed without context.
#[derive(Debug, Clone, PartialEq)]
enum LineKind {
    Blank,
    /// Four or more columns of indentation
    Indented,
    Fence(Fence),
    Heading { level: u8, text: String },
    Rule,
    Quote,
    ListItem(Marker),
    Text,
}

#[derive(Debug, Clone, PartialEq)]
struct Fence {
    indent: usize,
    ch: char,
    len: usize,
    language: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
struct Marker {
    ordered: bool,
    /// Columns before the marker
    indent: usize,
    /// Column where the item's text starts
    content_col: usize,
}

fn classify(line: &str) -> LineKind {
    if line.trim().is_empty() {
        return LineKind::Blank;
    }
    let indent = indent_of(line);
    if indent >= 4 {
        return LineKind::Indented;
    }
    let rest = &line[indent..];

    if let Some(fence) = fence_open(rest, indent) {
        return LineKind::Fence(fence);
    }
    if let Some((level, text)) = heading(rest) {
        return LineKind::Heading { level, text };
    }
    if is_rule(rest) {
        return LineKind::Rule;
    }
    if rest.starts_with('>') {
        return LineKind::Quote;
    }
    if let Some(marker) = list_marker(rest, indent) {
        return LineKind::ListItem(marker);
    }
    LineKind::Text
}

/// Parse a run of lines into blocks. `depth` counts enclosing containers.
fn parse_blocks(lines: &[String], depth: usize, max_depth: usize) -> Vec<Block> {
    if depth >= max_depth {
        log::warn!("markdown nesting deeper than {max_depth} levels, keeping it as text");
        return flatten_to_paragraphs(lines);
    }

    let mut blocks = Vec::new();
    let mut pos = 0;

    while pos < lines.len() {
        let rest = &lines[pos..];
        let (block, consumed) = match classify(&rest[0]) {
            LineKind::Blank => (None, 1),
            LineKind::Indented => {
                let (block, consumed) = parse_indented_code(rest);
                (Some(block), consumed)
            }
            LineKind::Fence(fence) => {
                let (block, consumed) = parse_fenced_code(rest, &fence);
                (Some(block), consumed)
            }
            LineKind::Heading { level, text } => (
                Some(Block::Heading(Heading {
                    level,
                    content: scan_inline(&text, &[]),
                })),
                1,
            ),
            LineKind::Rule => (Some(Block::HorizontalRule), 1),
            LineKind::Quote => {
                let (block, consumed) = parse_blockquote(rest, depth, max_depth);
                (Some(block), consumed)
            }
            LineKind::ListItem(marker) => {
                let (block, consumed) = parse_list(rest, &marker, depth, max_depth);
                (Some(block), consumed)
            }
            LineKind::Text => {
                let (block, consumed) = parse_paragraph(rest);
                (Some(block), consumed)
            }
        };

        blocks.extend(block);
        pos += consumed.max(1);
    }

    blocks
}

/// Paragraph lines continue until a blank line or the start of another
/// construct. Indented lines are lazy continuations here, not code.
fn parse_paragraph(lines: &[String]) -> (Block, usize) {
    let consumed = 1 + lines[1..]
        .iter()
        .take_while(|line| matches!(classify(line), LineKind::Text | LineKind::Indented))
        .count();
    (build_paragraph(&lines[..consumed]), consumed)
}

/// Join lines into one paragraph. A line ending in two spaces or a backslash
/// is followed by a hard break, any other line break by a space.
fn build_paragraph(lines: &[String]) -> Block {
    let mut content: Vec<Inline> = Vec::new();
    let last = lines.len().saturating_sub(1);

    for (i, line) in lines.iter().enumerate() {
        let text = line.trim_start();
        let hard_break = i < last && (text.ends_with("  ") || text.ends_with('\\'));
        let text = text.trim_end();
        let text = if hard_break {
            text.strip_suffix('\\').unwrap_or(text)
        } else {
            text
        };

        for inline in scan_inline(text, &[]) {
            push_inline(&mut content, inline);
        }
        if i < last {
            if hard_break {
                content.push(Inline::HardBreak);
            } else {
                push_inline(&mut content, Inline::plain(" "));
            }
        }
    }

    Block::paragraph(content)
}

fn flatten_to_paragraphs(lines: &[String]) -> Vec<Block> {
    lines
        .split(|line| line.trim().is_empty())
        .filter(|group| !group.is_empty())
        .map(build_paragraph)
        .collect()
}

fn parse_blockquote(lines: &[String], depth: usize, max_depth: usize) -> (Block, usize) {
    let mut body = Vec::new();
    let mut consumed = 0;

    for line in lines {
        match classify(line) {
            LineKind::Quote => body.push(strip_quote_marker(line)),
            // Lazy continuation of a quoted paragraph
            LineKind::Text if is_open_paragraph(&body) => body.push(line.trim_start().to_string()),
            _ => break,
        }
        consumed += 1;
    }

    let content = parse_blocks(&body, depth + 1, max_depth);
    (Block::Blockquote(Blockquote { content }), consumed.max(1))
}

fn strip_quote_marker(line: &str) -> String {
    let rest = line.trim_start();
    let rest = rest.strip_prefix('>').unwrap_or(rest);
    rest.strip_prefix(' ').unwrap_or(rest).to_string()
}

/// Parse consecutive items of the same kind. Blank lines between items are
/// allowed; a marker of the other kind ends the list.
fn parse_list(lines: &[String], first: &Marker, depth: usize, max_depth: usize) -> (Block, usize) {
    let mut items = Vec::new();
    let mut pos = 0;

    while pos < lines.len() {
        let marker = match classify(&lines[pos]) {
            LineKind::ListItem(marker) if marker.ordered == first.ordered => marker,
            _ => break,
        };
        let (item, consumed) = parse_list_item(&lines[pos..], &marker, depth, max_depth);
        items.push(item);
        pos += consumed;

        let blanks = count_blank(&lines[pos..]);
        match lines.get(pos + blanks).map(|line| classify(line)) {
            Some(LineKind::ListItem(next)) if blanks > 0 && next.ordered == first.ordered => {
                pos += blanks;
            }
            _ => {
                if blanks == 0 {
                    continue;
                }
                break;
            }
        }
    }

    let list = List { content: items };
    let block = if first.ordered {
        Block::OrderedList(list)
    } else {
        Block::BulletList(list)
    };
    (block, pos.max(1))
}

/// An item owns its first line, every following line indented past its
/// marker, blank lines followed by such lines, and lazy paragraph
/// continuations. Nested item markers must reach the content column.
fn parse_list_item(
    lines: &[String],
    marker: &Marker,
    depth: usize,
    max_depth: usize,
) -> (ListItem, usize) {
    let first = &lines[0];
    let mut body = vec![first.get(marker.content_col..).unwrap_or("").to_string()];
    let mut pos = 1;

    while pos < lines.len() {
        let line = &lines[pos];
        let kind = classify(line);

        if kind == LineKind::Blank {
            let blanks = count_blank(&lines[pos..]);
            let resumes = lines
                .get(pos + blanks)
                .is_some_and(|next| belongs_to_item(next, marker));
            if !resumes {
                break;
            }
            body.extend(std::iter::repeat(String::new()).take(blanks));
            pos += blanks;
            continue;
        }

        if belongs_to_item(line, marker) {
            body.push(strip_indent(line, marker.content_col));
        } else if kind == LineKind::Text && is_open_paragraph(&body) {
            body.push(line.trim_start().to_string());
        } else {
            break;
        }
        pos += 1;
    }

    let mut content = parse_blocks(&body, depth + 1, max_depth);
    if content.is_empty() {
        content.push(Block::paragraph(Vec::new()));
    }
    (ListItem { content }, pos)
}

fn belongs_to_item(line: &str, marker: &Marker) -> bool {
    let indent = indent_of(line);
    if indent <= marker.indent {
        return false;
    }
    // A less indented marker is a sibling, not a child.
    match list_marker(line.trim_start(), indent) {
        Some(_) => indent >= marker.content_col,
        None => true,
    }
}

/// Whether the last body line is paragraph text a lazy line may extend.
fn is_open_paragraph(body: &[String]) -> bool {
    body.last()
        .is_some_and(|last| matches!(classify(last), LineKind::Text))
}

fn parse_fenced_code(lines: &[String], fence: &Fence) -> (Block, usize) {
    let mut code_lines = Vec::new();
    let mut consumed = lines.len();

    for (i, line) in lines.iter().enumerate().skip(1) {
        if is_fence_close(line, fence) {
            consumed = i + 1;
            break;
        }
        code_lines.push(strip_indent(line, fence.indent));
    }

    let block = CodeBlock::new(fence.language.clone(), code_lines.join("\n"));
    (Block::CodeBlock(block), consumed)
}

fn parse_indented_code(lines: &[String]) -> (Block, usize) {
    let mut code_lines: Vec<String> = Vec::new();
    let mut consumed = 0;

    while consumed < lines.len() {
        let line = &lines[consumed];
        if indent_of(line) >= 4 && !line.trim().is_empty() {
            code_lines.push(strip_indent(line, 4));
            consumed += 1;
            continue;
        }
        let blanks = count_blank(&lines[consumed..]);
        let resumes = blanks > 0
            && lines
                .get(consumed + blanks)
                .is_some_and(|next| indent_of(next) >= 4);
        if !resumes {
            break;
        }
        code_lines.extend(std::iter::repeat(String::new()).take(blanks));
        consumed += blanks;
    }

    let block = CodeBlock::new(None, code_lines.join("\n"));
    (Block::CodeBlock(block), consumed.max(1))
}

fn fence_open(rest: &str, indent: usize) -> Option<Fence> {
    let ch = rest.chars().next().filter(|c| *c == '`' || *c == '~')?;
    let len = rest.len() - rest.trim_start_matches(ch).len();
    if len < 3 {
        return None;
    }
    let info = rest[len..].trim();
    if ch == '`' && info.contains('`') {
        return None;
    }
    Some(Fence {
        indent,
        ch,
        len,
        language: info.split_whitespace().next().map(str::to_string),
    })
}

fn is_fence_close(line: &str, fence: &Fence) -> bool {
    let indent = indent_of(line);
    if indent >= 4 {
        return false;
    }
    let rest = &line[indent..];
    let run = rest.len() - rest.trim_start_matches(fence.ch).len();
    run >= fence.len && rest[run..].trim().is_empty()
}

/// `#` × 1..=6 followed by whitespace. A closing `#` sequence is dropped.
fn heading(rest: &str) -> Option<(u8, String)> {
    let hashes = rest.len() - rest.trim_start_matches('#').len();
    if !(1..=6).contains(&hashes) {
        return None;
    }
    let after = &rest[hashes..];
    if !after.starts_with([' ', '\t']) {
        return None;
    }
    let text = after.trim();
    let without_closing = text.trim_end_matches('#');
    let text = if without_closing.is_empty() {
        ""
    } else if without_closing.ends_with([' ', '\t']) {
        without_closing.trim_end()
    } else {
        text
    };
    Some((hashes as u8, text.to_string()))
}

/// Three or more of the same `-`, `*` or `_`, optionally separated by spaces.
fn is_rule(rest: &str) -> bool {
    let mut marks = rest.chars().filter(|c| !c.is_whitespace());
    let Some(first) = marks.next() else {
        return false;
    };
    if !matches!(first, '-' | '*' | '_') {
        return false;
    }
    let mut count = 1;
    for c in marks {
        if c != first {
            return false;
        }
        count += 1;
    }
    count >= 3
}

/// `-`, `*`, `+`, or digits followed by `.` or `)`, then whitespace.
fn list_marker(rest: &str, indent: usize) -> Option<Marker> {
    let bytes = rest.as_bytes();
    let (ordered, width) = match bytes.first()? {
        b'-' | b'*' | b'+' => (false, 1),
        b'0'..=b'9' => {
            let digits = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
            if digits > 9 || !matches!(bytes.get(digits), Some(b'.') | Some(b')')) {
                return None;
            }
            (true, digits + 1)
        }
        _ => return None,
    };

    let after = &rest[width..];
    if !after.starts_with([' ', '\t']) {
        return None;
    }
    let spaces = after.len() - after.trim_start_matches(' ').len();
    // Five or more spaces start indented content; only one belongs to the marker.
    let gap = if spaces > 4 || after.trim().is_empty() {
        1
    } else {
        spaces.max(1)
    };

    Some(Marker {
        ordered,
        indent,
        content_col: indent + width + gap,
    })
}

fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

fn strip_indent(line: &str, columns: usize) -> String {
    let strip = indent_of(line).min(columns);
    line[strip..].to_string()
}

fn count_blank(lines: &[String]) -> usize {
    lines
        .iter()
        .take_while(|line| line.trim().is_empty())
        .count()
}

fn expand_leading_tabs(line: &str) -> String {
    let body = line.trim_start_matches([' ', '\t']);
    let prefix = &line[..line.len() - body.len()];
    if !prefix.contains('\t') {
        return line.to_string();
    }
    let mut columns = 0;
    for c in prefix.chars() {
        columns = if c == '\t' { columns + 4 - columns % 4 } else { columns + 1 };
    }
    format!("{}{}", " ".repeat(columns), body)
}
