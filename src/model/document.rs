//! Ordered block documents.

use crate::markdown::{InlineOrder, classify};

use super::block::Block;

/// An ordered sequence of blocks.
///
/// Block order equals source line order, and no two [`Block::Blank`]
/// blocks are ever adjacent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    /// Parse text with the default inline order.
    ///
    /// # Example
    ///
    /// ```
    /// use mdocx::{Block, Document, Span};
    ///
    /// let doc = Document::parse("# Title\n\n- item");
    /// assert_eq!(doc.len(), 3);
    /// assert_eq!(
    ///     doc.blocks()[0],
    ///     Block::Heading { level: 1, spans: vec![Span::plain("Title").unwrap()] }
    /// );
    /// ```
    pub fn parse(text: &str) -> Self {
        Self::parse_with(text, InlineOrder::default())
    }

    /// Parse text using the given inline tokenizer mode.
    pub fn parse_with(text: &str, order: InlineOrder) -> Self {
        let mut builder = DocumentBuilder::new();
        builder.extend(classify(text, order));
        builder.build()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

/// Accumulates classified blocks into a [`Document`].
///
/// Blocks are appended as given; classification (including blank
/// collapsing) happens before they reach the builder.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    blocks: Vec<Block>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    pub fn build(self) -> Document {
        Document {
            blocks: self.blocks,
        }
    }
}

impl Extend<Block> for DocumentBuilder {
    fn extend<I: IntoIterator<Item = Block>>(&mut self, iter: I) {
        self.blocks.extend(iter);
    }
}
