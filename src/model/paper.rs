//! The unit a renderer writes: a title, an outline and a body.

use crate::markdown::InlineOrder;

use super::document::Document;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paper {
    pub title: String,
    pub outline: Document,
    pub body: Document,
}

impl Paper {
    pub fn new(title: impl Into<String>, outline: Document, body: Document) -> Self {
        Self {
            title: title.into(),
            outline,
            body,
        }
    }

    /// Parse outline and body text with the given inline order.
    pub fn parse(title: &str, outline_text: &str, body_text: &str, order: InlineOrder) -> Self {
        Self::new(
            title,
            Document::parse_with(outline_text, order),
            Document::parse_with(body_text, order),
        )
    }
}
