//! DOCX exporter.
//!
//! Creates Office Open XML word-processing packages from [`Paper`]s.

use std::io::{self, Seek, Write};

use zip::CompressionMethod;
use zip::DateTime;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::config::RenderConfig;
use crate::model::Paper;

use super::Exporter;
use super::parts::{
    APP_XML, CONTENT_TYPES_XML, ROOT_RELS_XML, SETTINGS_XML, generate_core,
    generate_document_rels, generate_styles,
};
use super::wordml::synthesize_document;

/// DOCX format exporter.
///
/// # Example
///
/// ```no_run
/// use mdocx::{Document, Paper};
/// use mdocx::export::{DocxExporter, Exporter};
/// use std::fs::File;
///
/// let paper = Paper::new("Title", Document::parse("# Plan"), Document::parse("Text"));
/// let mut file = File::create("output.docx")?;
/// DocxExporter::new().export(&paper, &mut file)?;
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct DocxExporter {
    config: RenderConfig,
    compression_level: i64,
}

impl DocxExporter {
    /// Create a new exporter with default configuration.
    pub fn new() -> Self {
        Self {
            config: RenderConfig::default(),
            compression_level: 6,
        }
    }

    /// Configure the exporter with custom settings.
    pub fn with_config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    /// Deflate level, clamped to 1-9.
    pub fn with_compression_level(mut self, level: u32) -> Self {
        self.compression_level = i64::from(level.clamp(1, 9));
        self
    }
}

impl Default for DocxExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Exporter for DocxExporter {
    fn export<W: Write + Seek>(&self, paper: &Paper, writer: &mut W) -> io::Result<()> {
        let document = synthesize_document(paper, &self.config);
        let rels = generate_document_rels(&document.links);
        let styles = generate_styles(&self.config);
        let core = generate_core(&paper.title);

        let parts: [(&str, &[u8]); 8] = [
            ("[Content_Types].xml", CONTENT_TYPES_XML.as_bytes()),
            ("_rels/.rels", ROOT_RELS_XML.as_bytes()),
            ("docProps/core.xml", core.as_bytes()),
            ("docProps/app.xml", APP_XML.as_bytes()),
            ("word/document.xml", document.xml.as_bytes()),
            ("word/_rels/document.xml.rels", rels.as_bytes()),
            ("word/styles.xml", styles.as_bytes()),
            ("word/settings.xml", SETTINGS_XML.as_bytes()),
        ];

        let deflated = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(self.compression_level))
            .last_modified_time(DateTime::default());

        let mut zip = ZipWriter::new(writer);
        for (name, content) in parts {
            log::debug!("writing package part {name} ({} bytes)", content.len());
            zip.start_file(name, deflated).map_err(io_error)?;
            zip.write_all(content)?;
        }
        zip.finish().map_err(io_error)?;
        Ok(())
    }
}

fn io_error(e: zip::result::ZipError) -> io::Error {
    io::Error::other(e)
}
