//! Inline formatting: one line of text into styled spans.
//!
//! Four patterns are recognized, in fixed precedence:
//!
//! | Pattern          | Style                |
//! |------------------|----------------------|
//! | `[text](url)`    | [`SpanStyle::Link`]  |
//! | `**text**`       | [`SpanStyle::Bold`]  |
//! | `*text*`         | [`SpanStyle::Italic`]|
//! | `` `text` ``     | [`SpanStyle::Code`]  |
//!
//! Styles never nest. The text of a styled span is final and is not scanned
//! again for other markers.
//!
//! Two tokenizer modes exist (see [`InlineOrder`]). Both remove exactly the
//! same markers for inputs with a single style; they differ in span order,
//! and in which match wins when patterns overlap.

use memchr::{memchr, memchr3};
use serde::Deserialize;

use crate::model::{Span, SpanStyle};

/// How the inline tokenizer orders and resolves matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InlineOrder {
    /// Single left-to-right scan. At each position the patterns are tried in
    /// precedence order and the first match wins, so spans come out in source
    /// order.
    #[default]
    Source,
    /// One full pass per pattern, in precedence order. Each pass emits its
    /// styled spans and hands the unmatched remainder to the next pass;
    /// leftover text becomes a trailing plain span. Spans of a later pass
    /// always follow those of an earlier one, regardless of source position.
    Pass,
}

/// Inline patterns in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pattern {
    Link,
    Bold,
    Italic,
    Code,
}

const PRECEDENCE: [Pattern; 4] = [Pattern::Link, Pattern::Bold, Pattern::Italic, Pattern::Code];

/// A pattern match starting at some position.
#[derive(Debug, Clone, Copy)]
struct Match<'a> {
    /// Byte offset just past the closing marker.
    end: usize,
    inner: &'a str,
    url: &'a str,
}

impl Pattern {
    /// The byte every match of this pattern starts with.
    fn trigger(self) -> u8 {
        match self {
            Pattern::Link => b'[',
            Pattern::Bold | Pattern::Italic => b'*',
            Pattern::Code => b'`',
        }
    }

    /// Try to match the pattern starting exactly at `pos`.
    fn match_at(self, text: &str, pos: usize) -> Option<Match<'_>> {
        let bytes = text.as_bytes();
        match self {
            Pattern::Link => {
                if bytes.get(pos) != Some(&b'[') {
                    return None;
                }
                let close = pos + 1 + memchr(b']', &bytes[pos + 1..])?;
                if close == pos + 1 || bytes.get(close + 1) != Some(&b'(') {
                    return None;
                }
                let url_start = close + 2;
                let url_end = url_start + memchr(b')', &bytes[url_start..])?;
                if url_end == url_start {
                    return None;
                }
                Some(Match {
                    end: url_end + 1,
                    inner: &text[pos + 1..close],
                    url: &text[url_start..url_end],
                })
            }
            Pattern::Bold => {
                if !bytes[pos..].starts_with(b"**") {
                    return None;
                }
                let start = pos + 2;
                let close = start + find_double_star(&bytes[start..])?;
                Some(Match {
                    end: close + 2,
                    inner: &text[start..close],
                    url: "",
                })
            }
            Pattern::Italic => delimited(text, pos, b'*', true),
            Pattern::Code => delimited(text, pos, b'`', false),
        }
    }

    fn span(self, m: Match<'_>) -> Option<Span> {
        match self {
            Pattern::Link => Span::link(m.inner, m.url),
            Pattern::Bold => Span::bold(m.inner),
            Pattern::Italic => Span::italic(m.inner),
            Pattern::Code => Span::code(m.inner),
        }
    }
}

/// Match `marker inner marker` at `pos`, where `inner` holds no marker.
fn delimited(text: &str, pos: usize, marker: u8, allow_empty: bool) -> Option<Match<'_>> {
    let bytes = text.as_bytes();
    if bytes.get(pos) != Some(&marker) {
        return None;
    }
    let start = pos + 1;
    let close = start + memchr(marker, &bytes[start..])?;
    if close == start && !allow_empty {
        return None;
    }
    Some(Match {
        end: close + 1,
        inner: &text[start..close],
        url: "",
    })
}

fn find_double_star(haystack: &[u8]) -> Option<usize> {
    let mut offset = 0;
    while let Some(i) = memchr(b'*', &haystack[offset..]) {
        let at = offset + i;
        if haystack.get(at + 1) == Some(&b'*') {
            return Some(at);
        }
        offset = at + 1;
    }
    None
}

/// Split one line into styled spans.
///
/// The concatenated span text equals the input with matched markers
/// removed. Unmatched marker characters stay in the text as written.
///
/// # Examples
///
/// ```
/// use mdocx::markdown::{InlineOrder, format_inline};
/// use mdocx::Span;
///
/// let spans = format_inline("**bold** and *italic*", InlineOrder::Source);
/// assert_eq!(spans, vec![
///     Span::bold("bold").unwrap(),
///     Span::plain(" and ").unwrap(),
///     Span::italic("italic").unwrap(),
/// ]);
/// ```
pub fn format_inline(line: &str, order: InlineOrder) -> Vec<Span> {
    match order {
        InlineOrder::Source => scan_source_order(line),
        InlineOrder::Pass => scan_pass_order(line),
    }
}

fn scan_source_order(line: &str) -> Vec<Span> {
    let bytes = line.as_bytes();
    let mut spans = Vec::new();
    let mut plain = String::new();
    let mut plain_start = 0;
    let mut pos = 0;

    while let Some(offset) = memchr3(b'[', b'*', b'`', &bytes[pos..]) {
        let at = pos + offset;
        let found = PRECEDENCE
            .iter()
            .find_map(|&p| p.match_at(line, at).map(|m| (p, m)));

        match found {
            Some((pattern, m)) => {
                plain.push_str(&line[plain_start..at]);
                if let Some(span) = pattern.span(m) {
                    spans.extend(Span::plain(std::mem::take(&mut plain)));
                    spans.push(span);
                }
                pos = m.end;
                plain_start = m.end;
            }
            None => pos = at + 1,
        }
    }

    plain.push_str(&line[plain_start..]);
    spans.extend(Span::plain(plain));
    spans
}

fn scan_pass_order(line: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut working = line.to_string();

    for pattern in PRECEDENCE {
        working = run_pass(pattern, &working, &mut spans);
    }

    spans.extend(Span::plain(working));
    spans
}

/// Emit every match of one pattern and return the unmatched remainder.
fn run_pass(pattern: Pattern, text: &str, spans: &mut Vec<Span>) -> String {
    let bytes = text.as_bytes();
    let trigger = pattern.trigger();
    let mut remainder = String::with_capacity(text.len());
    let mut plain_start = 0;
    let mut pos = 0;

    while let Some(offset) = memchr(trigger, &bytes[pos..]) {
        let at = pos + offset;
        match pattern.match_at(text, at) {
            Some(m) => {
                remainder.push_str(&text[plain_start..at]);
                spans.extend(pattern.span(m));
                pos = m.end;
                plain_start = m.end;
            }
            None => pos = at + 1,
        }
    }

    remainder.push_str(&text[plain_start..]);
    remainder
}
