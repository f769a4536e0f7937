use mdocx::markdown::{InlineOrder, classify, format_inline};
use mdocx::model::plain_text;
use mdocx::{Block, Document, SpanStyle};
use proptest::prelude::*;

/// Lines built from Markdown-ish fragments, never containing a backtick.
fn fenceless_line() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("# ".to_string()),
            Just("- ".to_string()),
            Just("> ".to_string()),
            Just("1. ".to_string()),
            Just("**".to_string()),
            Just("*".to_string()),
            Just("[a](b)".to_string()),
            Just("---".to_string()),
            Just("   ".to_string()),
            "[a-z ]{0,8}",
        ],
        0..6,
    )
    .prop_map(|parts| parts.concat())
}

fn fenceless_text() -> impl Strategy<Value = String> {
    prop::collection::vec(fenceless_line(), 0..12).prop_map(|lines| lines.join("\n"))
}

proptest! {
    #[test]
    fn no_fence_means_no_code_block(text in fenceless_text()) {
        for block in classify(&text, InlineOrder::Source) {
            let is_code_block = matches!(block, Block::CodeBlock { .. });
            prop_assert!(!is_code_block);
        }
    }

    #[test]
    fn one_block_per_non_blank_line(text in fenceless_text()) {
        let non_blank = text.lines().filter(|l| !l.trim().is_empty()).count();
        let content = classify(&text, InlineOrder::Source)
            .filter(|b| !b.is_blank())
            .count();
        prop_assert_eq!(content, non_blank);
    }

    #[test]
    fn blanks_never_adjacent(text in "[a\n ]{0,40}") {
        let doc = Document::parse(&text);
        for pair in doc.blocks().windows(2) {
            prop_assert!(!(pair[0].is_blank() && pair[1].is_blank()));
        }
    }

    #[test]
    fn plain_text_is_conserved(line in "[^*`\\[]{0,40}") {
        for order in [InlineOrder::Source, InlineOrder::Pass] {
            let spans = format_inline(&line, order);
            prop_assert_eq!(plain_text(&spans), line.clone());
            prop_assert!(spans.iter().all(|s| *s.style() == SpanStyle::Plain));
        }
    }

    #[test]
    fn spans_are_never_empty(line in "[a*`\\[\\]() ]{0,30}") {
        for order in [InlineOrder::Source, InlineOrder::Pass] {
            prop_assert!(format_inline(&line, order).iter().all(|s| !s.text().is_empty()));
        }
    }

    #[test]
    fn fenced_lines_are_kept_verbatim(lines in prop::collection::vec("[a-z*#> -]{0,10}", 1..6)) {
        let text = format!("```\n{}\n```", lines.join("\n"));
        let blocks: Vec<Block> = classify(&text, InlineOrder::Source).collect();
        prop_assert_eq!(blocks.len(), 1);
        match &blocks[0] {
            Block::CodeBlock { language, raw_lines } => {
                prop_assert!(language.is_none());
                prop_assert_eq!(raw_lines, &lines);
            }
            other => prop_assert!(false, "expected code block, got {:?}", other),
        }
    }
}

#[test]
fn test_source_order_interleaves_styles() {
    let spans = format_inline("a **b** `c` [d](e) *f*", InlineOrder::Source);
    let styles: Vec<_> = spans.iter().map(|s| s.style().clone()).collect();
    assert_eq!(
        styles,
        vec![
            SpanStyle::Plain,
            SpanStyle::Bold,
            SpanStyle::Plain,
            SpanStyle::Code,
            SpanStyle::Plain,
            SpanStyle::Link {
                url: "e".to_string()
            },
            SpanStyle::Plain,
            SpanStyle::Italic,
        ]
    );
}

#[test]
fn test_mixed_document() {
    let text = "# Title\n\nIntro *em*\n\n\n- item\n2. two\n> said\n```js\nx\n```\n___";
    let doc = Document::parse(text);
    let kinds: Vec<&str> = doc
        .iter()
        .map(|b| match b {
            Block::Heading { .. } => "heading",
            Block::Paragraph { .. } => "paragraph",
            Block::BulletItem { .. } => "bullet",
            Block::NumberedItem { .. } => "numbered",
            Block::Quote { .. } => "quote",
            Block::CodeBlock { .. } => "code",
            Block::Rule => "rule",
            Block::Blank => "blank",
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            "heading", "blank", "paragraph", "blank", "bullet", "numbered", "quote", "code",
            "rule"
        ]
    );
}
