//! Inline text spans.

/// Style attribute carried by a [`Span`].
///
/// Styles do not nest: a span is exactly one of these.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SpanStyle {
    /// Unformatted text.
    #[default]
    Plain,
    /// `**text**`
    Bold,
    /// `*text*`
    Italic,
    /// `` `text` `` rendered in the fixed monospace code style.
    Code,
    /// `[text](url)`. The URL is carried as written, without validation.
    Link { url: String },
}

/// A contiguous run of text with one style.
///
/// Spans are immutable once built and never hold empty text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Span {
    text: String,
    style: SpanStyle,
}

impl Span {
    /// Create a span, returning `None` for empty text.
    pub fn new(text: impl Into<String>, style: SpanStyle) -> Option<Self> {
        let text = text.into();
        if text.is_empty() {
            None
        } else {
            Some(Self { text, style })
        }
    }

    pub fn plain(text: impl Into<String>) -> Option<Self> {
        Self::new(text, SpanStyle::Plain)
    }

    pub fn bold(text: impl Into<String>) -> Option<Self> {
        Self::new(text, SpanStyle::Bold)
    }

    pub fn italic(text: impl Into<String>) -> Option<Self> {
        Self::new(text, SpanStyle::Italic)
    }

    pub fn code(text: impl Into<String>) -> Option<Self> {
        Self::new(text, SpanStyle::Code)
    }

    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Option<Self> {
        Self::new(text, SpanStyle::Link { url: url.into() })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn style(&self) -> &SpanStyle {
        &self.style
    }

    /// The link target, if this is a link span.
    pub fn url(&self) -> Option<&str> {
        match &self.style {
            SpanStyle::Link { url } => Some(url),
            _ => None,
        }
    }
}

/// Concatenate the text of a span sequence, dropping all style.
pub fn plain_text(spans: &[Span]) -> String {
    spans.iter().map(Span::text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_rejected() {
        assert!(Span::plain("").is_none());
        assert!(Span::link("", "https://example.com").is_none());
    }

    #[test]
    fn test_link_url() {
        let span = Span::link("docs", "https://docs.rs").unwrap();
        assert_eq!(span.url(), Some("https://docs.rs"));
        assert_eq!(Span::bold("x").unwrap().url(), None);
    }

    #[test]
    fn test_plain_text() {
        let spans = vec![Span::bold("a").unwrap(), Span::plain(" b").unwrap()];
        assert_eq!(plain_text(&spans), "a b");
    }
}
