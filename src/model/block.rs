//! Block-level document nodes.

use super::span::Span;

/// One structural unit of a document.
///
/// Every source line (or fenced run of lines) classifies into exactly one
/// of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// ATX heading, level 1-6.
    Heading { level: u8, spans: Vec<Span> },
    Paragraph { spans: Vec<Span> },
    /// `-`, `*` or `+` list item.
    BulletItem { spans: Vec<Span> },
    /// `N.` list item, keeping the number written in the source.
    NumberedItem { index: u32, spans: Vec<Span> },
    /// `>` block quote line.
    Quote { spans: Vec<Span> },
    /// Fenced code. Lines are kept verbatim, never inline-formatted.
    CodeBlock {
        language: Option<String>,
        raw_lines: Vec<String>,
    },
    /// Horizontal separator.
    Rule,
    /// Paragraph break.
    Blank,
}

impl Block {
    /// Inline spans of the block, if it carries any.
    pub fn spans(&self) -> Option<&[Span]> {
        match self {
            Block::Heading { spans, .. }
            | Block::Paragraph { spans }
            | Block::BulletItem { spans }
            | Block::NumberedItem { spans, .. }
            | Block::Quote { spans } => Some(spans),
            Block::CodeBlock { .. } | Block::Rule | Block::Blank => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Block::Blank)
    }
}
