//! Line-oriented block classification.
//!
//! Each line is checked against the block rules in fixed precedence, first
//! match wins:
//!
//! 1. Fence (```` ``` ```` with optional language) toggles code mode
//! 2. Inside a fence, lines are buffered verbatim
//! 3. Blank line (collapsed with a preceding blank)
//! 4. `#`..`######` heading
//! 5. `>` quote
//! 6. `-`, `*`, `+` bullet item
//! 7. `N.` numbered item
//! 8. `---`, `***`, `___` rule
//! 9. Paragraph
//!
//! All classifier memory lives in [`ClassifierState`], owned by the caller
//! for the duration of one parse.

use std::str::Lines;

use crate::model::Block;

use super::inline::{InlineOrder, format_inline};

/// Mutable state threaded through classification of one text.
#[derive(Debug, Default)]
pub struct ClassifierState {
    in_code_block: bool,
    code_buffer: Vec<String>,
    code_language: Option<String>,
    /// Whether the last emitted block was a [`Block::Blank`].
    last_blank: bool,
}

impl ClassifierState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_code_block(&self) -> bool {
        self.in_code_block
    }

    /// Classify one line, returning the block it completes, if any.
    ///
    /// Fence lines and lines inside a fence produce nothing until the
    /// closing fence, which yields the whole [`Block::CodeBlock`].
    pub fn classify_line(&mut self, line: &str, order: InlineOrder) -> Option<Block> {
        if let Some(info) = fence_info(line) {
            if self.in_code_block {
                // An empty block renders nothing; blank collapsing spans it.
                let empty = self.code_buffer.is_empty();
                let block = self.take_code_block();
                return Some(if empty { block } else { self.emit(block) });
            }
            self.in_code_block = true;
            self.code_language = (!info.is_empty()).then(|| info.to_string());
            self.code_buffer.clear();
            return None;
        }

        if self.in_code_block {
            self.code_buffer.push(line.to_string());
            return None;
        }

        if line.trim().is_empty() {
            if self.last_blank {
                return None;
            }
            return Some(self.emit(Block::Blank));
        }

        let block = classify_text_line(line, order);
        Some(self.emit(block))
    }

    /// Finish classification at end of input.
    ///
    /// An unterminated fence is flushed as a code block so its content is
    /// not lost.
    pub fn finish(mut self) -> Option<Block> {
        if !self.in_code_block || self.code_buffer.is_empty() {
            return None;
        }
        log::debug!(
            "unterminated code fence, flushing {} buffered lines",
            self.code_buffer.len()
        );
        Some(self.take_code_block())
    }

    fn take_code_block(&mut self) -> Block {
        self.in_code_block = false;
        Block::CodeBlock {
            language: self.code_language.take(),
            raw_lines: std::mem::take(&mut self.code_buffer),
        }
    }

    fn emit(&mut self, block: Block) -> Block {
        self.last_blank = block.is_blank();
        block
    }
}

/// Iterator over the blocks of a text.
///
/// Created by [`classify`].
#[derive(Debug)]
pub struct Blocks<'a> {
    lines: Lines<'a>,
    state: Option<ClassifierState>,
    order: InlineOrder,
}

impl Iterator for Blocks<'_> {
    type Item = Block;

    fn next(&mut self) -> Option<Block> {
        let state = self.state.as_mut()?;
        for line in self.lines.by_ref() {
            if let Some(block) = state.classify_line(line, self.order) {
                return Some(block);
            }
        }
        self.state.take()?.finish()
    }
}

/// Classify a whole text into blocks, in source order.
///
/// # Example
///
/// ```
/// use mdocx::Block;
/// use mdocx::markdown::{InlineOrder, classify};
///
/// let blocks: Vec<Block> = classify("```go\nfmt.Println(\"hi\")\n```", InlineOrder::Source).collect();
/// assert_eq!(blocks, vec![Block::CodeBlock {
///     language: Some("go".to_string()),
///     raw_lines: vec!["fmt.Println(\"hi\")".to_string()],
/// }]);
/// ```
pub fn classify(text: &str, order: InlineOrder) -> Blocks<'_> {
    Blocks {
        lines: text.lines(),
        state: Some(ClassifierState::new()),
        order,
    }
}

/// Classify a non-blank line outside a fence.
fn classify_text_line(line: &str, order: InlineOrder) -> Block {
    if let Some((level, rest)) = heading(line) {
        return Block::Heading {
            level,
            spans: format_inline(rest, order),
        };
    }

    if let Some(rest) = line.strip_prefix('>').and_then(after_marker) {
        return Block::Quote {
            spans: format_inline(rest, order),
        };
    }

    let indented = trim_ascii_ws_start(line);

    if let Some(rest) = indented
        .strip_prefix(['-', '*', '+'])
        .and_then(after_marker)
    {
        return Block::BulletItem {
            spans: format_inline(rest, order),
        };
    }

    if let Some((index, rest)) = numbered(indented) {
        return Block::NumberedItem {
            index,
            spans: format_inline(rest, order),
        };
    }

    if is_rule(line) {
        return Block::Rule;
    }

    Block::Paragraph {
        spans: format_inline(line, order),
    }
}

/// If `line` is a fence, return its trimmed info string.
fn fence_info(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    let ticks = trimmed.bytes().take_while(|&b| b == b'`').count();
    if ticks < 3 {
        return None;
    }
    let info = &trimmed[ticks..];
    if info.contains('`') {
        return None;
    }
    Some(info.trim())
}

fn heading(line: &str) -> Option<(u8, &str)> {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if !(1..=6).contains(&hashes) {
        return None;
    }
    let rest = after_marker(&line[hashes..])?;
    Some((hashes as u8, rest))
}

fn numbered(line: &str) -> Option<(u32, &str)> {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let rest = line[digits..].strip_prefix('.').and_then(after_marker)?;
    let index = line[..digits].parse().ok()?;
    Some((index, rest))
}

fn is_rule(line: &str) -> bool {
    let body = line.trim_end_matches(|c: char| c.is_ascii_whitespace());
    body.len() >= 3 && body.bytes().all(|b| matches!(b, b'-' | b'*' | b'_'))
}

/// Require at least one whitespace character after a block marker and
/// return the text following it.
fn after_marker(rest: &str) -> Option<&str> {
    if rest.starts_with(|c: char| c.is_ascii_whitespace()) {
        Some(trim_ascii_ws_start(rest))
    } else {
        None
    }
}

fn trim_ascii_ws_start(s: &str) -> &str {
    s.trim_start_matches(|c: char| c.is_ascii_whitespace())
}
