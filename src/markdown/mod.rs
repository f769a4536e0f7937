//! Markdown subset parsing.
//!
//! This module turns loosely formatted text into blocks and spans. The
//! supported subset is fixed and line-oriented:
//!
//! - [`inline`]: links, bold, italic and inline code within one line
//! - [`classify`]: headings, quotes, list items, fenced code, rules, blanks
//! - [`cleanup`]: normalization of raw model responses before parsing
//! - [`extract`]: pulling the first fenced code block out of a response
//!
//! Parsing never fails. Any text classifies into some block sequence;
//! unterminated fences are flushed at end of input.
//!
//! ## Design Notes
//!
//! - **No nesting**: a styled span is final, its text is never rescanned
//! - **Line-local**: inline markers never span lines, and every line
//!   outside a fence is classified on its own

mod classify;
mod cleanup;
mod extract;
mod inline;

pub use classify::{Blocks, ClassifierState, classify};
pub use cleanup::clean_response;
pub use extract::{Extracted, extract_code};
pub use inline::{InlineOrder, format_inline};
