//! WordprocessingML body synthesis.
//!
//! Walks a [`Paper`] and emits `word/document.xml`: the title, the
//! outline and body sections, and the placeholder back matter. Block
//! styling is a single exhaustive match over [`Block`].
//!
//! External link targets are collected while writing; the package writer
//! turns them into relationships.

use std::borrow::Cow;
use std::collections::HashMap;

use quick_xml::escape::escape;

use crate::config::{HexColor, RenderConfig};
use crate::model::{Block, Document, Paper, Span, SpanStyle};

/// Relationship ids below this are reserved for the fixed document parts.
const FIRST_LINK_RID: usize = 3;

const BULLET: &str = "\u{2022} ";
const RULE_TEXT: &str = "________________________________________";

/// Result of body synthesis.
#[derive(Debug, Clone)]
pub struct DocumentXml {
    /// Complete `word/document.xml`.
    pub xml: String,
    /// External hyperlink relationships, in first-use order.
    pub links: Vec<LinkRel>,
}

/// One external hyperlink relationship.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRel {
    pub id: String,
    pub url: String,
}

/// Distinct link targets, numbered in first-seen order.
#[derive(Debug, Default)]
struct LinkTable {
    ids: HashMap<String, usize>,
    links: Vec<LinkRel>,
}

impl LinkTable {
    fn id_for(&mut self, url: &str) -> &str {
        let index = match self.ids.get(url) {
            Some(&index) => index,
            None => {
                let index = self.links.len();
                self.links.push(LinkRel {
                    id: format!("rId{}", FIRST_LINK_RID + index),
                    url: url.to_string(),
                });
                self.ids.insert(url.to_string(), index);
                index
            }
        };
        &self.links[index].id
    }
}

/// Paragraph properties (`w:pPr`).
#[derive(Debug, Default, Clone, Copy)]
struct ParaProps<'a> {
    style: Option<&'a str>,
    indent: Option<u32>,
    center: bool,
}

/// Run properties (`w:rPr`).
#[derive(Debug, Default, Clone, Copy)]
struct RunProps<'a> {
    char_style: Option<&'a str>,
    font: Option<&'a str>,
    bold: bool,
    italic: bool,
    color: Option<&'a HexColor>,
    size_pt: Option<u32>,
    underline: bool,
}

/// Synthesize `word/document.xml` for a paper.
pub fn synthesize_document(paper: &Paper, config: &RenderConfig) -> DocumentXml {
    let mut ctx = SynthesisContext {
        out: String::new(),
        config,
        links: LinkTable::default(),
    };

    ctx.out.push_str(DOCUMENT_HEADER);

    ctx.title(&paper.title);

    ctx.section_header(&config.sections.outline);
    ctx.document(&paper.outline);

    ctx.page_break();

    ctx.section_header(&config.sections.body);
    ctx.document(&paper.body);

    ctx.section_header(&config.sections.references);
    ctx.placeholder(&config.sections.references_placeholder);
    ctx.section_header(&config.sections.acknowledgements);
    ctx.placeholder(&config.sections.acknowledgements_placeholder);

    ctx.section_properties();
    ctx.out.push_str("</w:body>\n</w:document>\n");

    DocumentXml {
        xml: ctx.out,
        links: ctx.links.links,
    }
}

struct SynthesisContext<'a> {
    out: String,
    config: &'a RenderConfig,
    links: LinkTable,
}

impl<'a> SynthesisContext<'a> {
    fn title(&mut self, text: &str) {
        let config = self.config;
        let para = ParaProps {
            style: Some("Title"),
            center: true,
            ..Default::default()
        };
        let run = RunProps {
            bold: true,
            size_pt: Some(config.fonts.title_size_pt),
            ..Default::default()
        };
        self.open_paragraph(para);
        self.text_run(run, text);
        self.close_paragraph();
    }

    fn section_header(&mut self, text: &str) {
        let config = self.config;
        let run = RunProps {
            bold: true,
            color: Some(&config.colors.section_header),
            size_pt: Some(config.fonts.section_size_pt),
            ..Default::default()
        };
        self.open_paragraph(ParaProps::default());
        self.text_run(run, text);
        self.close_paragraph();
    }

    fn placeholder(&mut self, text: &str) {
        self.open_paragraph(ParaProps::default());
        self.text_run(RunProps::default(), text);
        self.close_paragraph();
    }

    fn page_break(&mut self) {
        self.out
            .push_str("<w:p><w:r><w:br w:type=\"page\"/></w:r></w:p>\n");
    }

    fn document(&mut self, doc: &Document) {
        for block in doc {
            self.block(block);
        }
    }

    fn block(&mut self, block: &Block) {
        let config = self.config;
        let indented = ParaProps {
            indent: Some(config.layout.indent_twips),
            ..Default::default()
        };

        match block {
            Block::Heading { level, spans } => {
                let style = format!("Heading{level}");
                self.open_paragraph(ParaProps {
                    style: Some(&style),
                    ..Default::default()
                });
                self.spans(spans, RunProps::default());
                self.close_paragraph();
            }
            Block::Paragraph { spans } => {
                self.open_paragraph(ParaProps::default());
                self.spans(spans, RunProps::default());
                self.close_paragraph();
            }
            Block::BulletItem { spans } => {
                self.list_item(indented, BULLET, spans);
            }
            Block::NumberedItem { index, spans } => {
                self.list_item(indented, &format!("{index}. "), spans);
            }
            Block::Quote { spans } => {
                self.open_paragraph(indented);
                let base = RunProps {
                    italic: true,
                    ..Default::default()
                };
                self.spans(spans, base);
                self.close_paragraph();
            }
            Block::CodeBlock {
                language,
                raw_lines,
            } => {
                if raw_lines.is_empty() {
                    return;
                }
                self.open_paragraph(indented);
                if let Some(language) = language {
                    let tag = RunProps {
                        italic: true,
                        color: Some(&config.colors.language_tag),
                        ..Default::default()
                    };
                    self.text_run(tag, &format!("[{language}] "));
                }
                let code = RunProps {
                    font: Some(&config.fonts.code),
                    size_pt: Some(config.fonts.code_size_pt),
                    color: Some(&config.colors.code_block),
                    ..Default::default()
                };
                self.open_run(code);
                for (i, line) in raw_lines.iter().enumerate() {
                    if i > 0 {
                        self.out.push_str("<w:br/>");
                    }
                    self.text(line);
                }
                self.close_run();
                self.close_paragraph();
            }
            Block::Rule => {
                self.open_paragraph(ParaProps::default());
                self.open_run(RunProps {
                    color: Some(&config.colors.rule),
                    ..Default::default()
                });
                self.text(RULE_TEXT);
                self.out.push_str("<w:br/>");
                self.close_run();
                self.close_paragraph();
            }
            Block::Blank => self.out.push_str("<w:p/>\n"),
        }
    }

    fn list_item(&mut self, para: ParaProps<'_>, marker: &str, spans: &[Span]) {
        self.open_paragraph(para);
        let bold = RunProps {
            bold: true,
            ..Default::default()
        };
        self.text_run(bold, marker);
        self.spans(spans, RunProps::default());
        self.close_paragraph();
    }

    /// Write spans as runs on top of the block's base run properties.
    fn spans(&mut self, spans: &[Span], base: RunProps<'a>) {
        let config = self.config;
        let colors = &config.colors;
        let fonts = &config.fonts;

        for span in spans {
            match span.style() {
                SpanStyle::Plain => self.text_run(base, span.text()),
                SpanStyle::Bold => self.text_run(RunProps { bold: true, ..base }, span.text()),
                SpanStyle::Italic => self.text_run(
                    RunProps {
                        italic: true,
                        ..base
                    },
                    span.text(),
                ),
                SpanStyle::Code => self.text_run(
                    RunProps {
                        font: Some(&fonts.code),
                        size_pt: Some(fonts.code_size_pt),
                        color: Some(&colors.inline_code),
                        ..base
                    },
                    span.text(),
                ),
                SpanStyle::Link { url } => {
                    let rid = self.links.id_for(url).to_string();
                    self.out.push_str(&format!(
                        "<w:hyperlink r:id=\"{rid}\" w:history=\"1\">"
                    ));
                    self.text_run(
                        RunProps {
                            char_style: Some("Hyperlink"),
                            color: Some(&colors.link),
                            underline: true,
                            ..base
                        },
                        span.text(),
                    );
                    self.out.push_str("</w:hyperlink>");
                }
            }
        }
    }

    fn section_properties(&mut self) {
        let layout = &self.config.layout;
        let (width, height) = layout.page.twips();
        let margin = layout.margin_twips;
        self.out.push_str(&format!(
            "<w:sectPr><w:pgSz w:w=\"{width}\" w:h=\"{height}\"/>\
             <w:pgMar w:top=\"{margin}\" w:right=\"{margin}\" w:bottom=\"{margin}\" \
             w:left=\"{margin}\" w:header=\"720\" w:footer=\"720\" w:gutter=\"0\"/>\
             </w:sectPr>\n"
        ));
    }

    fn open_paragraph(&mut self, props: ParaProps<'_>) {
        self.out.push_str("<w:p>");
        if props.style.is_none() && props.indent.is_none() && !props.center {
            return;
        }
        self.out.push_str("<w:pPr>");
        if let Some(style) = props.style {
            self.out
                .push_str(&format!("<w:pStyle w:val=\"{}\"/>", escape_text(style)));
        }
        if let Some(indent) = props.indent {
            self.out.push_str(&format!("<w:ind w:left=\"{indent}\"/>"));
        }
        if props.center {
            self.out.push_str("<w:jc w:val=\"center\"/>");
        }
        self.out.push_str("</w:pPr>");
    }

    fn close_paragraph(&mut self) {
        self.out.push_str("</w:p>\n");
    }

    fn text_run(&mut self, props: RunProps<'_>, text: &str) {
        self.open_run(props);
        self.text(text);
        self.close_run();
    }

    /// Open `w:r` with its properties, children in schema order.
    fn open_run(&mut self, props: RunProps<'_>) {
        self.out.push_str("<w:r>");
        let mut rpr = String::new();
        if let Some(style) = props.char_style {
            rpr.push_str(&format!("<w:rStyle w:val=\"{}\"/>", escape_text(style)));
        }
        if let Some(font) = props.font {
            let font = escape_text(font);
            rpr.push_str(&format!(
                "<w:rFonts w:ascii=\"{font}\" w:hAnsi=\"{font}\" w:cs=\"{font}\"/>"
            ));
        }
        if props.bold {
            rpr.push_str("<w:b/>");
        }
        if props.italic {
            rpr.push_str("<w:i/>");
        }
        if let Some(color) = props.color {
            rpr.push_str(&format!("<w:color w:val=\"{color}\"/>"));
        }
        if let Some(size) = props.size_pt {
            let half_points = size * 2;
            rpr.push_str(&format!(
                "<w:sz w:val=\"{half_points}\"/><w:szCs w:val=\"{half_points}\"/>"
            ));
        }
        if props.underline {
            rpr.push_str("<w:u w:val=\"single\"/>");
        }
        if !rpr.is_empty() {
            self.out.push_str("<w:rPr>");
            self.out.push_str(&rpr);
            self.out.push_str("</w:rPr>");
        }
    }

    fn close_run(&mut self) {
        self.out.push_str("</w:r>");
    }

    /// Write run content. Tabs become `w:tab`, newlines become `w:br`.
    fn text(&mut self, text: &str) {
        let mut first = true;
        for line in text.split('\n') {
            if !first {
                self.out.push_str("<w:br/>");
            }
            first = false;
            for (i, piece) in line.split('\t').enumerate() {
                if i > 0 {
                    self.out.push_str("<w:tab/>");
                }
                if !piece.is_empty() {
                    self.out.push_str("<w:t xml:space=\"preserve\">");
                    self.out.push_str(&escape_text(piece));
                    self.out.push_str("</w:t>");
                }
            }
        }
    }
}

/// Whether a character may appear in an XML 1.0 document.
fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
}

/// Escape text for XML content or attribute values, dropping characters
/// XML cannot represent.
pub(crate) fn escape_text(s: &str) -> Cow<'_, str> {
    if s.chars().all(is_xml_char) {
        return escape(s);
    }
    let cleaned: String = s.chars().filter(|&c| is_xml_char(c)).collect();
    Cow::Owned(escape(cleaned.as_str()).into_owned())
}

const DOCUMENT_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
<w:body>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::InlineOrder;

    fn body_xml(outline: &str, body: &str) -> DocumentXml {
        let paper = Paper::parse("Title", outline, body, InlineOrder::Source);
        synthesize_document(&paper, &RenderConfig::default())
    }

    /// Body XML between the fixed "Body" header and the back matter.
    fn rendered_body(body: &str) -> String {
        let xml = body_xml("", body).xml;
        let start = xml.find(">Body</w:t>").unwrap();
        let end = xml.find(">References</w:t>").unwrap();
        xml[start..end].to_string()
    }

    #[test]
    fn test_front_and_back_matter_order() {
        let xml = body_xml("o", "b").xml;
        let positions: Vec<usize> = [
            ">Title<",
            ">Outline<",
            ">o<",
            "w:type=\"page\"",
            ">Body<",
            ">b<",
            ">References<",
            ">[Add references here]<",
            ">Acknowledgements<",
            ">[Add acknowledgements here]<",
            "<w:sectPr>",
        ]
        .iter()
        .map(|needle| xml.find(needle).unwrap_or_else(|| panic!("missing {needle}")))
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");

        for header in ["Outline", "Body", "References", "Acknowledgements"] {
            let run = format!(
                "<w:rPr><w:b/><w:color w:val=\"2E74B5\"/><w:sz w:val=\"28\"/><w:szCs w:val=\"28\"/></w:rPr>\
                 <w:t xml:space=\"preserve\">{header}</w:t>"
            );
            assert!(xml.contains(&run), "{header} header is not bold and colored");
        }
    }

    #[test]
    fn test_title_is_centered_bold_large() {
        let xml = body_xml("", "").xml;
        assert!(xml.contains(
            "<w:p><w:pPr><w:pStyle w:val=\"Title\"/><w:jc w:val=\"center\"/></w:pPr>\
             <w:r><w:rPr><w:b/><w:sz w:val=\"36\"/>"
        ));
    }

    #[test]
    fn test_heading_style() {
        let body = rendered_body("### Third");
        assert!(body.contains("<w:pStyle w:val=\"Heading3\"/>"));
    }

    #[test]
    fn test_bullet_and_number_prefix_runs() {
        let body = rendered_body("- a\n7. b");
        assert!(body.contains("<w:ind w:left=\"200\"/>"));
        assert!(body.contains("<w:rPr><w:b/></w:rPr><w:t xml:space=\"preserve\">\u{2022} </w:t>"));
        assert!(body.contains("<w:rPr><w:b/></w:rPr><w:t xml:space=\"preserve\">7. </w:t>"));
    }

    #[test]
    fn test_quote_is_italic() {
        let body = rendered_body("> **x** y");
        assert!(body.contains("<w:rPr><w:b/><w:i/></w:rPr><w:t xml:space=\"preserve\">x</w:t>"));
        assert!(body.contains("<w:rPr><w:i/></w:rPr><w:t xml:space=\"preserve\"> y</w:t>"));
    }

    #[test]
    fn test_code_block_single_run_with_breaks() {
        let body = rendered_body("```rust\nfn a() {\n\tb();\n}\n```");
        assert!(body.contains("<w:t xml:space=\"preserve\">[rust] </w:t>"));
        assert!(body.contains(
            "<w:t xml:space=\"preserve\">fn a() {</w:t><w:br/><w:tab/>\
             <w:t xml:space=\"preserve\">b();</w:t><w:br/><w:t xml:space=\"preserve\">}</w:t></w:r>"
        ));
        assert!(body.contains("<w:rFonts w:ascii=\"Courier New\""));
    }

    #[test]
    fn test_code_block_without_language_has_no_tag() {
        let body = rendered_body("```\nx\n```");
        assert!(!body.contains("] </w:t>"));
    }

    #[test]
    fn test_empty_code_block_renders_nothing() {
        let body = rendered_body("```\n```");
        assert!(!body.contains("Courier New"));
    }

    #[test]
    fn test_empty_fence_between_blanks_leaves_one_break() {
        let body = rendered_body("a\n\n```\n```\n\nb");
        assert_eq!(body.matches("<w:p/>").count(), 1);
    }

    #[test]
    fn test_inline_code_style() {
        let body = rendered_body("use `x`");
        assert!(body.contains("<w:color w:val=\"FF0000\"/><w:sz w:val=\"20\"/>"));
    }

    #[test]
    fn test_links_are_deduplicated_relationships() {
        let doc = body_xml("[a](https://a.example)", "[b](https://b.example) [c](https://a.example)");
        assert_eq!(
            doc.links,
            vec![
                LinkRel {
                    id: "rId3".to_string(),
                    url: "https://a.example".to_string()
                },
                LinkRel {
                    id: "rId4".to_string(),
                    url: "https://b.example".to_string()
                },
            ]
        );
        assert_eq!(doc.xml.matches("<w:hyperlink r:id=\"rId3\"").count(), 2);
        assert!(doc.xml.contains("<w:rStyle w:val=\"Hyperlink\"/>"));
    }

    #[test]
    fn test_rule_and_blank() {
        let body = rendered_body("a\n\n---");
        assert!(body.contains("<w:p/>"));
        assert!(body.contains("<w:color w:val=\"CCCCCC\"/>"));
        assert!(body.contains(RULE_TEXT));
    }

    #[test]
    fn test_text_is_escaped() {
        let body = rendered_body("a < b & \"c\"\u{1}");
        assert!(body.contains("a &lt; b &amp; &quot;c&quot;</w:t>"));
    }

    #[test]
    fn test_escape_text_drops_control_chars() {
        assert_eq!(escape_text("a\u{0}b\u{B}c"), "abc");
        assert!(matches!(escape_text("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_custom_labels_and_page() {
        let mut config = RenderConfig::default();
        config.sections.outline = "大纲".to_string();
        config.layout.page = crate::config::PageSize::Letter;
        let paper = Paper::parse("T", "", "", InlineOrder::Source);
        let xml = synthesize_document(&paper, &config).xml;
        assert!(xml.contains(">大纲</w:t>"));
        assert!(xml.contains("<w:pgSz w:w=\"12240\" w:h=\"15840\"/>"));
    }
}
