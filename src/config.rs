//! Render configuration, loadable from TOML.
//!
//! Every field has a default, so an empty file (or no file) reproduces the
//! standard look:
//!
//! ```toml
//! [inline]
//! order = "source"      # or "pass"
//!
//! [fonts]
//! body = "Calibri"
//! code = "Courier New"
//! code_size_pt = 10
//!
//! [colors]
//! link = "0000FF"
//! section_header = "#2E74B5"
//!
//! [layout]
//! page = "a4"           # or "letter"
//! indent_twips = 200
//!
//! [sections]
//! outline = "Outline"
//! body = "Body"
//! ```

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::markdown::InlineOrder;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub inline: InlineConfig,
    pub fonts: FontConfig,
    pub colors: ColorConfig,
    pub layout: LayoutConfig,
    pub sections: SectionConfig,
    pub cleanup: CleanupConfig,
}

impl RenderConfig {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct InlineConfig {
    pub order: InlineOrder,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    pub body: String,
    pub code: String,
    pub code_size_pt: u32,
    pub title_size_pt: u32,
    pub section_size_pt: u32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            body: "Calibri".to_string(),
            code: "Courier New".to_string(),
            code_size_pt: 10,
            title_size_pt: 18,
            section_size_pt: 14,
        }
    }
}

/// A six-digit RGB hex color as used in WordprocessingML (`"FF0000"`).
///
/// A leading `#` is accepted and dropped; digits are upper-cased.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct HexColor(String);

impl HexColor {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn fixed(hex: &str) -> Self {
        Self(hex.to_string())
    }
}

impl TryFrom<String> for HexColor {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        let hex = value.strip_prefix('#').unwrap_or(&value);
        if hex.len() == 6 && hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            Ok(Self(hex.to_ascii_uppercase()))
        } else {
            Err(format!("invalid color {value:?}, expected six hex digits"))
        }
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub link: HexColor,
    pub inline_code: HexColor,
    pub code_block: HexColor,
    pub language_tag: HexColor,
    pub rule: HexColor,
    pub section_header: HexColor,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            link: HexColor::fixed("0000FF"),
            inline_code: HexColor::fixed("FF0000"),
            code_block: HexColor::fixed("000000"),
            language_tag: HexColor::fixed("666666"),
            rule: HexColor::fixed("CCCCCC"),
            section_header: HexColor::fixed("2E74B5"),
        }
    }
}

/// Paper size of the document section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    #[default]
    A4,
    Letter,
}

impl PageSize {
    /// Width and height in twips.
    pub fn twips(self) -> (u32, u32) {
        match self {
            PageSize::A4 => (11906, 16838),
            PageSize::Letter => (12240, 15840),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub page: PageSize,
    pub margin_twips: u32,
    /// Left indent of list items, quotes and code blocks.
    pub indent_twips: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page: PageSize::A4,
            margin_twips: 1440,
            indent_twips: 200,
        }
    }
}

/// Labels of the fixed front and back matter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SectionConfig {
    pub outline: String,
    pub body: String,
    pub references: String,
    pub references_placeholder: String,
    pub acknowledgements: String,
    pub acknowledgements_placeholder: String,
}

impl Default for SectionConfig {
    fn default() -> Self {
        Self {
            outline: "Outline".to_string(),
            body: "Body".to_string(),
            references: "References".to_string(),
            references_placeholder: "[Add references here]".to_string(),
            acknowledgements: "Acknowledgements".to_string(),
            acknowledgements_placeholder: "[Add acknowledgements here]".to_string(),
        }
    }
}

/// Response cleanup applied before parsing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CleanupConfig {
    /// Section prefixes removed from the start of a response, in order.
    pub strip_prefixes: Vec<String>,
    /// A first line starting with one of these is dropped.
    pub lead_in_markers: Vec<String>,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            strip_prefixes: ["大纲：", "正文：", "Outline:", "Body:"]
                .map(String::from)
                .to_vec(),
            lead_in_markers: ["好的，", "遵照您的要求", "以下是根据", "Sure,", "Here is"]
                .map(String::from)
                .to_vec(),
        }
    }
}
