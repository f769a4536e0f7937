//! Extraction of the first fenced code block from a response.

/// Result of [`extract_code`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    /// Text with the code block removed.
    pub text: String,
    /// Trimmed code, without fences.
    pub code: Option<String>,
    /// Language word written after the opening fence.
    pub language: Option<String>,
}

/// Split the first fenced code block out of `text`.
///
/// A block is an opening ```` ``` ```` with an optional word-character
/// language, whitespace containing a newline, the code, then a newline
/// followed by the closing ```` ``` ````. When no block is found the text is
/// returned unchanged.
///
/// # Example
///
/// ```
/// use mdocx::markdown::extract_code;
///
/// let found = extract_code("Run this:\n```rust\nfn main() {}\n```\nDone.");
/// assert_eq!(found.code.as_deref(), Some("fn main() {}"));
/// assert_eq!(found.language.as_deref(), Some("rust"));
/// assert_eq!(found.text, "Run this:\n\nDone.");
/// ```
pub fn extract_code(text: &str) -> Extracted {
    let mut search = 0;
    while let Some(offset) = text[search..].find("```") {
        let start = search + offset;
        if let Some((language, code_start, code_end, end)) = match_block(text, start) {
            let mut remaining = String::with_capacity(text.len());
            remaining.push_str(&text[..start]);
            remaining.push_str(&text[end..]);
            return Extracted {
                text: remaining.trim().to_string(),
                code: Some(text[code_start..code_end].trim().to_string()),
                language: (!language.is_empty()).then(|| language.to_string()),
            };
        }
        search = start + 1;
    }

    Extracted {
        text: text.to_string(),
        code: None,
        language: None,
    }
}

/// Match a fenced block whose opening fence starts at `start`.
///
/// Returns the language and the byte ranges of the code and of the end of
/// the closing fence.
fn match_block(text: &str, start: usize) -> Option<(&str, usize, usize, usize)> {
    let after_fence = start + 3;
    let lang_len = text[after_fence..]
        .bytes()
        .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
        .count();
    let language = &text[after_fence..after_fence + lang_len];

    // The code starts after a newline in the whitespace run that follows
    // the language, preferring the last one.
    let ws_start = after_fence + lang_len;
    let ws_len = text[ws_start..]
        .bytes()
        .take_while(u8::is_ascii_whitespace)
        .count();

    text[ws_start..ws_start + ws_len]
        .rmatch_indices('\n')
        .find_map(|(newline, _)| {
            let code_start = ws_start + newline + 1;
            // An empty body still needs its own newline before the closing fence.
            let close = text[code_start..].find("\n```")?;
            let code_end = code_start + close;
            Some((language, code_start, code_end, code_end + 4))
        })
}
