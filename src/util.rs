//! File-name helpers.

/// Characters that cannot appear in a file name on common platforms.
const RESERVED: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Build a `.docx` file name from a document title.
///
/// Whitespace runs and reserved characters become `_`; an empty title
/// yields `document.docx`.
///
/// # Examples
///
/// ```
/// use mdocx::util::output_file_name;
///
/// assert_eq!(output_file_name("Rust  in practice"), "Rust_in_practice.docx");
/// assert_eq!(output_file_name("a/b"), "a_b.docx");
/// ```
pub fn output_file_name(title: &str) -> String {
    let mut name = String::with_capacity(title.len() + 5);
    let mut in_whitespace = false;

    for c in title.trim().chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                name.push('_');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        if RESERVED.contains(&c) || c.is_control() {
            name.push('_');
        } else {
            name.push(c);
        }
    }

    if name.is_empty() {
        name.push_str("document");
    }
    name.push_str(".docx");
    name
}

/// Conventional source file name for a code block language.
///
/// Unknown languages map to `output.txt`.
pub fn guess_file_name(language: &str) -> &'static str {
    match language.to_ascii_lowercase().as_str() {
        "java" => "Main.java",
        "python" => "main.py",
        "c" => "main.c",
        "cpp" => "main.cpp",
        "go" => "main.go",
        "rust" => "main.rs",
        "js" => "main.js",
        "ts" => "main.ts",
        _ => "output.txt",
    }
}
