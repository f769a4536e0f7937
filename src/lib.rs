//! # mdocx
//!
//! Render loosely formatted Markdown into styled, paginated DOCX documents.
//!
//! ## Features
//!
//! - Line-oriented Markdown subset: headings, emphasis, inline code, links,
//!   bullet and numbered items, quotes, fenced code, rules
//! - Malformed input never fails: unterminated fences are flushed
//! - Office Open XML output with real heading styles and hyperlinks
//! - TOML-configurable fonts, colors, page layout and section labels
//!
//! ## Quick Start
//!
//! ```no_run
//! mdocx::render("My Paper", "# Outline\n- a", "Body **x**", "out/paper.docx")?;
//! # Ok::<(), mdocx::Error>(())
//! ```
//!
//! ## Pipeline
//!
//! Data flows strictly forward:
//!
//! 1. [`markdown::format_inline`] splits a line into [`Span`]s
//! 2. [`markdown::classify`] turns lines into [`Block`]s
//! 3. [`Document`] collects the blocks in source order
//! 4. [`export::DocxExporter`] maps blocks to paragraphs and runs and writes
//!    the zip package
//!
//! ```
//! use mdocx::{Block, Document};
//!
//! let doc = Document::parse("1. first item");
//! assert!(matches!(doc.blocks()[0], Block::NumberedItem { index: 1, .. }));
//! ```

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

pub mod config;
pub mod error;
pub mod export;
pub mod markdown;
pub mod model;
pub mod util;

pub use config::RenderConfig;
pub use error::{Error, Result};
pub use model::{Block, Document, DocumentBuilder, Paper, Span, SpanStyle};

use export::{DocxExporter, Exporter};

/// Render a title, outline and body to a DOCX file with default styling.
///
/// Missing parent directories are created and an existing file is
/// overwritten.
pub fn render<P: AsRef<Path>>(
    title: &str,
    outline_text: &str,
    body_text: &str,
    output_path: P,
) -> Result<()> {
    render_with_config(
        title,
        outline_text,
        body_text,
        output_path,
        &RenderConfig::default(),
    )
}

/// Render with a custom [`RenderConfig`].
pub fn render_with_config<P: AsRef<Path>>(
    title: &str,
    outline_text: &str,
    body_text: &str,
    output_path: P,
    config: &RenderConfig,
) -> Result<()> {
    let path = output_path.as_ref();
    let paper = Paper::parse(title, outline_text, body_text, config.inline.order);
    log::debug!(
        "parsed {} outline blocks and {} body blocks",
        paper.outline.len(),
        paper.body.len()
    );

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| Error::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let write_error = |source| Error::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(write_error)?;
    let mut writer = BufWriter::new(file);
    DocxExporter::new()
        .with_config(config.clone())
        .export(&paper, &mut writer)
        .map_err(write_error)?;
    writer.flush().map_err(write_error)?;

    log::info!("wrote {}", path.display());
    Ok(())
}
