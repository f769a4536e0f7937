use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use mdocx::config::RenderConfig;
use mdocx::{Error, render, render_with_config};
use quick_xml::Reader;
use quick_xml::events::Event;
use tempfile::TempDir;
use zip::ZipArchive;

fn read_part(path: &Path, name: &str) -> String {
    let mut archive = ZipArchive::new(File::open(path).expect("open docx")).expect("valid zip");
    let mut part = String::new();
    archive
        .by_name(name)
        .unwrap_or_else(|_| panic!("missing part {name}"))
        .read_to_string(&mut part)
        .expect("utf-8 part");
    part
}

/// Parse the whole part, failing on malformed XML.
fn assert_well_formed(xml: &str) {
    let mut reader = Reader::from_str(xml);
    let mut depth = 0usize;
    loop {
        match reader.read_event() {
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(_)) => depth -= 1,
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => panic!("malformed XML at {}: {e}", reader.buffer_position()),
        }
    }
    assert_eq!(depth, 0, "unbalanced elements");
}

#[test]
fn test_render_creates_dirs_and_overwrites() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("nested/deeper/out.docx");

    render("T", "# Outline\n- a", "Body **x**", &out).expect("first render");
    let first = fs::metadata(&out).unwrap().len();
    assert!(first > 0);

    render("T", "# Outline\n- a\n- b\n- c", "Body **x**", &out).expect("second render");
    assert!(out.exists());

    let document = read_part(&out, "word/document.xml");
    assert!(document.contains(">c</w:t>"));
}

#[test]
fn test_all_parts_are_well_formed() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("paper.docx");

    let outline = "# Plan\n1. Intro\n2. [Refs](https://example.com/?q=1&r=2)\n> quote";
    let body = "## Start\n\nText with `code` & <tags>.\n\n\n```rust\nfn main() {\n\tprintln!(\"hi\");\n}\n```\n---\n* last";
    render("A & B", outline, body, &out).unwrap();

    for part in [
        "[Content_Types].xml",
        "_rels/.rels",
        "docProps/core.xml",
        "docProps/app.xml",
        "word/document.xml",
        "word/_rels/document.xml.rels",
        "word/styles.xml",
        "word/settings.xml",
    ] {
        assert_well_formed(&read_part(&out, part));
    }
}

#[test]
fn test_hyperlink_relationship_written() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("links.docx");
    render("T", "", "See [docs](https://docs.rs).", &out).unwrap();

    let rels = read_part(&out, "word/_rels/document.xml.rels");
    assert!(rels.contains("Target=\"https://docs.rs\" TargetMode=\"External\""));

    let document = read_part(&out, "word/document.xml");
    assert!(document.contains("<w:hyperlink r:id=\"rId3\""));
    assert!(document.contains(">docs</w:t>"));
}

#[test]
fn test_fence_content_stays_literal() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("code.docx");
    render("T", "", "```\n**bold**\n```", &out).unwrap();

    let document = read_part(&out, "word/document.xml");
    assert!(document.contains(">**bold**</w:t>"));
}

#[test]
fn test_unterminated_fence_rendered() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("open.docx");
    render("T", "", "```py\nline one\nline two", &out).unwrap();

    let document = read_part(&out, "word/document.xml");
    assert!(document.contains(">[py] </w:t>"));
    assert!(document.contains(">line one</w:t><w:br/><w:t xml:space=\"preserve\">line two</w:t>"));
}

#[test]
fn test_pass_order_config() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("pass.docx");
    let config = RenderConfig::from_toml_str("[inline]\norder = \"pass\"").unwrap();
    render_with_config("T", "", "a **b** c", &out, &config).unwrap();

    let document = read_part(&out, "word/document.xml");
    let bold = document.find(">b</w:t>").unwrap();
    let rest = document.find(">a  c</w:t>").unwrap();
    assert!(bold < rest);
}

#[test]
fn test_title_in_core_properties() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("core.docx");
    render("人工智能 & 伦理", "", "", &out).unwrap();

    let core = read_part(&out, "docProps/core.xml");
    assert!(core.contains("<dc:title>人工智能 &amp; 伦理</dc:title>"));
}

#[test]
fn test_unwritable_parent_is_reported() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("file");
    fs::write(&blocker, b"not a directory").unwrap();

    let err = render("T", "", "", blocker.join("out.docx")).unwrap_err();
    assert!(matches!(err, Error::CreateDir { .. } | Error::Write { .. }));
    assert!(err.to_string().contains("file"));
}

#[test]
fn test_output_is_a_directory() {
    let dir = TempDir::new().unwrap();
    let err = render("T", "", "", dir.path()).unwrap_err();
    assert!(matches!(err, Error::Write { .. }));
    assert!(err.to_string().starts_with("failed to write document to"));
}
