//! Core data model for rendering.
//!
//! This module contains:
//! - Styled inline spans
//! - Block-level nodes
//! - The ordered document and its builder
//! - The titled outline/body pair handed to exporters

mod block;
mod document;
mod paper;
mod span;

pub use block::Block;
pub use document::{Document, DocumentBuilder};
pub use paper::Paper;
pub use span::{Span, SpanStyle, plain_text};
