//! Inline mark scanner
//!
//! Turns one line of Markdown into a flat run of [`Inline`] nodes. The scan is
//! left to right with a plain-text accumulator; at every position the
//! delimiters are tried in a fixed order:
//!
//! | Order | Syntax        | Mark            |
//! |-------|---------------|-----------------|
//! | 1     | `**text**`    | Bold            |
//! | 2     | `*text*`      | Italic          |
//! | 3     | `~~text~~`    | Strike          |
//! | 4     | `` `code` ``  | Code (verbatim) |
//! | 5     | `[text](url)` | Link            |
//!
//! Bold is tried before italic so `**x**` is never read as nested italics. The
//! delimited text is scanned again with the new mark added to the inherited
//! ones, which is how `[**a**](u)` ends up with both Bold and Link. When no
//! closer exists the opening character is kept as literal text and the scan
//! moves one character forward, so malformed input always terminates.

use crate::canonical::{Inline, Mark, Text};
use std::collections::HashMap;

/// Deepest mark nesting scanned recursively; deeper spans keep their raw text.
const MAX_INLINE_NESTING: usize = 8;

/// Scan `text` into inline nodes, adding `inherited` marks to every run.
pub fn scan_inline(text: &str, inherited: &[Mark]) -> Vec<Inline> {
    scan(text, inherited, 0)
}

fn scan(text: &str, inherited: &[Mark], depth: usize) -> Vec<Inline> {
    let mut out = Vec::new();
    let mut pending = String::new();
    let mut closers = Closers::default();
    let mut pos = 0;

    while pos < text.len() {
        let rest = &text[pos..];

        if let Some(escaped) = escaped_char(rest) {
            pending.push(escaped);
            pos += 1 + escaped.len_utf8();
            continue;
        }

        if let Some(span) = match_span(text, pos, &mut closers) {
            flush(&mut out, &mut pending, inherited);
            emit_span(&mut out, text, &span, inherited, depth);
            pos = span.end;
            continue;
        }

        if rest.starts_with('`') {
            // An unmatched backtick run stays literal as a whole.
            let run = rest.len() - rest.trim_start_matches('`').len();
            pending.push_str(&rest[..run]);
            pos += run;
            continue;
        }

        let ch = rest.chars().next().unwrap_or(' ');
        pending.push(ch);
        pos += ch.len_utf8();
    }

    flush(&mut out, &mut pending, inherited);
    out
}

/// Append an inline, merging it into the previous text run when both carry
/// the same marks. Unmarked empty runs are discarded.
pub(crate) fn push_inline(out: &mut Vec<Inline>, inline: Inline) {
    if let Inline::Text(text) = inline {
        if text.text.is_empty() && text.marks.is_empty() {
            return;
        }
        if let Some(Inline::Text(last)) = out.last_mut() {
            if last.marks == text.marks {
                last.text.push_str(&text.text);
                return;
            }
        }
        out.push(Inline::Text(text));
    } else {
        out.push(inline);
    }
}

/// `inherited` plus `mark`, unless a mark of that kind is already present.
pub(crate) fn with_mark(inherited: &[Mark], mark: Mark) -> Vec<Mark> {
    let mut marks = inherited.to_vec();
    if !marks.iter().any(|m| m.same_kind(&mark)) {
        marks.push(mark);
    }
    marks
}

#[derive(Debug)]
enum SpanKind {
    /// Delimited text that is scanned again with `mark` added.
    Marked { mark: Mark, inner: (usize, usize) },
    /// Verbatim code.
    Code { inner: (usize, usize) },
}

#[derive(Debug)]
struct Span {
    kind: SpanKind,
    /// Byte offset just past the closing delimiter.
    end: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Emphasis {
    Bold,
    Italic,
    Strike,
}

impl Emphasis {
    fn delim(self) -> &'static str {
        match self {
            Emphasis::Bold => "**",
            Emphasis::Italic => "*",
            Emphasis::Strike => "~~",
        }
    }

    fn mark(self) -> Mark {
        match self {
            Emphasis::Bold => Mark::Bold,
            Emphasis::Italic => Mark::Italic,
            Emphasis::Strike => Mark::Strike,
        }
    }
}

/// Closer lookups for one scanned line.
///
/// Whether a position closes a span depends only on the characters around
/// it, so a search that found nothing from offset `x` finds nothing from any
/// later offset either. Remembering that, and pairing brackets and backtick
/// runs once up front, keeps a whole line linear.
#[derive(Debug, Default)]
struct Closers {
    /// Per emphasis kind, the offset from which no closer exists.
    exhausted: [Option<usize>; 3],
    pairs: Option<Pairs>,
    /// Start offsets of maximal backtick runs, keyed by run length.
    backtick_runs: Option<HashMap<usize, Vec<usize>>>,
}

/// Matching `]` for every `[` and matching `)` for every `(`, skipping
/// backslash-escaped characters.
#[derive(Debug)]
struct Pairs {
    brackets: HashMap<usize, usize>,
    parens: HashMap<usize, usize>,
}

impl Pairs {
    fn new(text: &str) -> Self {
        let mut brackets = HashMap::new();
        let mut parens = HashMap::new();
        let mut open_brackets = Vec::new();
        let mut open_parens = Vec::new();
        let mut chars = text.char_indices();
        while let Some((offset, ch)) = chars.next() {
            match ch {
                '\\' => {
                    chars.next();
                }
                '[' => open_brackets.push(offset),
                ']' => {
                    if let Some(open) = open_brackets.pop() {
                        brackets.insert(open, offset);
                    }
                }
                '(' => open_parens.push(offset),
                ')' => {
                    if let Some(open) = open_parens.pop() {
                        parens.insert(open, offset);
                    }
                }
                _ => {}
            }
        }
        Pairs { brackets, parens }
    }
}

fn backtick_runs(text: &str) -> HashMap<usize, Vec<usize>> {
    let bytes = text.as_bytes();
    let mut runs: HashMap<usize, Vec<usize>> = HashMap::new();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'`' {
            i += 1;
            continue;
        }
        let start = i;
        while i < bytes.len() && bytes[i] == b'`' {
            i += 1;
        }
        runs.entry(i - start).or_default().push(start);
    }
    runs
}

fn match_span(text: &str, pos: usize, closers: &mut Closers) -> Option<Span> {
    for kind in [Emphasis::Bold, Emphasis::Italic, Emphasis::Strike] {
        if let Some((start, inner_end, end)) = match_emphasis(text, pos, kind, closers) {
            return Some(Span {
                kind: SpanKind::Marked {
                    mark: kind.mark(),
                    inner: (start, inner_end),
                },
                end,
            });
        }
    }
    if let Some((start, inner_end, end)) = match_code(text, pos, closers) {
        return Some(Span {
            kind: SpanKind::Code {
                inner: (start, inner_end),
            },
            end,
        });
    }
    match_link(text, pos, closers)
}

fn emit_span(out: &mut Vec<Inline>, text: &str, span: &Span, inherited: &[Mark], depth: usize) {
    match &span.kind {
        SpanKind::Marked { mark, inner } => {
            let inner_text = &text[inner.0..inner.1];
            let marks = with_mark(inherited, mark.clone());
            let display = match mark {
                Mark::Link { href } if inner_text.is_empty() => href.as_str(),
                _ => inner_text,
            };
            if depth >= MAX_INLINE_NESTING {
                push_inline(out, Inline::marked(display, marks));
            } else {
                for inline in scan(display, &marks, depth + 1) {
                    push_inline(out, inline);
                }
            }
        }
        SpanKind::Code { inner } => {
            let code = strip_code_padding(&text[inner.0..inner.1]);
            let marks = with_mark(inherited, Mark::Code);
            push_inline(out, Inline::marked(code, marks));
        }
    }
}

fn flush(out: &mut Vec<Inline>, pending: &mut String, inherited: &[Mark]) {
    if pending.is_empty() {
        return;
    }
    let text = std::mem::take(pending);
    push_inline(
        out,
        Inline::Text(Text {
            text,
            marks: inherited.to_vec(),
        }),
    );
}

/// A backslash before ASCII punctuation yields that character.
fn escaped_char(rest: &str) -> Option<char> {
    let mut chars = rest.chars();
    if chars.next()? != '\\' {
        return None;
    }
    chars.next().filter(|c| c.is_ascii_punctuation())
}

/// Whether the byte at `at` follows an odd run of backslashes.
fn is_escaped(bytes: &[u8], at: usize) -> bool {
    let backslashes = bytes[..at].iter().rev().take_while(|&&b| b == b'\\').count();
    backslashes % 2 == 1
}

/// Match `delim … delim` starting at `pos`, returning
/// `(inner_start, inner_end, end)`.
///
/// The opener must be followed by a non-space character and the closer must
/// follow a non-space character. A single `*` never pairs with part of a
/// `**` run.
fn match_emphasis(
    text: &str,
    pos: usize,
    kind: Emphasis,
    closers: &mut Closers,
) -> Option<(usize, usize, usize)> {
    let delim = kind.delim();
    if !text[pos..].starts_with(delim) {
        return None;
    }
    let inner_start = pos + delim.len();
    let first = text[inner_start..].chars().next()?;
    if first.is_whitespace() || (kind == Emphasis::Italic && first == '*') {
        return None;
    }

    let from = inner_start + first.len_utf8();
    let exhausted = &mut closers.exhausted[kind as usize];
    if exhausted.is_some_and(|offset| from >= offset) {
        return None;
    }
    match find_emphasis_closer(text, from, kind) {
        Some(closer) => Some((inner_start, closer, closer + delim.len())),
        None => {
            *exhausted = Some(from);
            None
        }
    }
}

fn find_emphasis_closer(text: &str, from: usize, kind: Emphasis) -> Option<usize> {
    let delim = kind.delim();
    let bytes = text.as_bytes();
    let mut search = from;
    while search < text.len() {
        let candidate = search + text[search..].find(delim)?;
        search = candidate + 1;

        if kind == Emphasis::Italic
            && (bytes.get(candidate + 1) == Some(&b'*') || bytes[candidate - 1] == b'*')
        {
            continue;
        }
        let before = text[..candidate].chars().next_back();
        if before.is_some_and(|c| !c.is_whitespace()) && !is_escaped(bytes, candidate) {
            return Some(candidate);
        }
    }
    None
}

/// Match a backtick code span whose closing run has the same length as the
/// opening one. Empty spans do not match.
fn match_code(text: &str, pos: usize, closers: &mut Closers) -> Option<(usize, usize, usize)> {
    let rest = &text[pos..];
    let run = rest.len() - rest.trim_start_matches('`').len();
    if run == 0 {
        return None;
    }
    let inner_start = pos + run;
    let starts = closers
        .backtick_runs
        .get_or_insert_with(|| backtick_runs(text))
        .get(&run)?;
    let closer = *starts.get(starts.partition_point(|&start| start < inner_start))?;
    if text[inner_start..closer].trim().is_empty() {
        return None;
    }
    Some((inner_start, closer, closer + run))
}

/// One surrounding space is stripped when the code is padded on both sides.
fn strip_code_padding(code: &str) -> &str {
    if code.len() >= 2 && code.starts_with(' ') && code.ends_with(' ') {
        &code[1..code.len() - 1]
    } else {
        code
    }
}

/// Match `[label](href)`. Brackets inside the label and parentheses inside
/// the destination must balance. The href is the first whitespace-separated
/// word inside the parentheses, so an optional `"title"` is ignored.
fn match_link(text: &str, pos: usize, closers: &mut Closers) -> Option<Span> {
    if !text[pos..].starts_with('[') {
        return None;
    }
    let pairs = closers.pairs.get_or_insert_with(|| Pairs::new(text));
    let label_end = *pairs.brackets.get(&pos)?;

    let href_start = label_end + 1;
    if !text[href_start..].starts_with('(') {
        return None;
    }
    let close = *pairs.parens.get(&href_start)?;
    let href = text[href_start + 1..close].split_whitespace().next()?;
    let href = href
        .strip_prefix('<')
        .and_then(|h| h.strip_suffix('>'))
        .unwrap_or(href);
    if href.is_empty() {
        return None;
    }

    Some(Span {
        kind: SpanKind::Marked {
            mark: Mark::Link {
                href: href.to_string(),
            },
            inner: (pos + 1, label_end),
        },
        end: close + 1,
    })
}
