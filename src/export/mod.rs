//! Export module for writing rendered papers to document formats.
//!
//! Provides the `Exporter` trait and the DOCX implementation.
//!
//! # Architecture
//!
//! The `Exporter` trait uses a builder pattern:
//! - `new()` creates an exporter with default configuration
//! - `with_config()` allows customization
//! - `export()` writes to any `Write + Seek` destination
//!
//! # Example
//!
//! ```
//! use mdocx::Paper;
//! use mdocx::export::{DocxExporter, Exporter};
//! use mdocx::markdown::InlineOrder;
//! use std::io::Cursor;
//!
//! let paper = Paper::parse("Title", "# Plan", "Some **text**", InlineOrder::Source);
//! let mut out = Cursor::new(Vec::new());
//! DocxExporter::new().export(&paper, &mut out)?;
//! assert!(!out.into_inner().is_empty());
//! # Ok::<(), std::io::Error>(())
//! ```

use std::io::{self, Seek, Write};

use crate::model::Paper;

mod docx;
mod parts;
mod wordml;

pub use docx::DocxExporter;
pub use wordml::{DocumentXml, LinkRel, synthesize_document};

/// Trait for exporting papers to specific formats.
///
/// Exporters use a builder pattern where configuration is held in the struct,
/// and the `export` method writes to any `Write + Seek` destination.
pub trait Exporter {
    /// Export the paper to the provided writer.
    ///
    /// The writer can be:
    /// - `std::fs::File` for disk output
    /// - `std::io::Cursor<Vec<u8>>` for seekable in-memory output
    /// - Any other type implementing `Write + Seek`
    fn export<W: Write + Seek>(&self, paper: &Paper, writer: &mut W) -> io::Result<()>;
}
