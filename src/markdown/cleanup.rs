//! Cleanup of chat-model responses before rendering.

use crate::config::CleanupConfig;

/// Normalize a model response into renderable Markdown.
///
/// Converts `\r\n` to `\n`, strips configured section prefixes (such as
/// `Outline:`), drops a leading assistant lead-in line, and trims the
/// result.
///
/// # Example
///
/// ```
/// use mdocx::config::CleanupConfig;
/// use mdocx::markdown::clean_response;
///
/// let text = "Outline:Sure, here is your outline.\r\n# Intro\r\n";
/// assert_eq!(clean_response(text, &CleanupConfig::default()), "# Intro");
/// ```
pub fn clean_response(text: &str, config: &CleanupConfig) -> String {
    let normalized = text.replace("\r\n", "\n");
    let mut rest = normalized.as_str();

    for prefix in &config.strip_prefixes {
        if let Some(stripped) = rest.strip_prefix(prefix.as_str()) {
            rest = stripped;
        }
    }

    for marker in &config.lead_in_markers {
        if let Some(after) = rest.strip_prefix(marker.as_str())
            && let Some(newline) = after.find('\n')
            && newline > 0
        {
            rest = &after[newline + 1..];
        }
    }

    rest.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean(text: &str) -> String {
        clean_response(text, &CleanupConfig::default())
    }

    #[test]
    fn test_crlf_normalized() {
        assert_eq!(clean("a\r\nb"), "a\nb");
    }

    #[test]
    fn test_section_prefixes() {
        assert_eq!(clean("大纲：# 一"), "# 一");
        assert_eq!(clean("正文：text"), "text");
        assert_eq!(clean("Body: text"), "text");
    }

    #[test]
    fn test_lead_in_dropped() {
        assert_eq!(clean("好的，这是大纲\n# 标题"), "# 标题");
        assert_eq!(clean("Here is the body you asked for:\nText"), "Text");
    }

    #[test]
    fn test_lead_in_only_at_start() {
        let text = "# Title\nSure, that works.\nMore";
        assert_eq!(clean(text), text);
    }

    #[test]
    fn test_lead_in_without_newline_kept() {
        assert_eq!(clean("Sure, one line"), "Sure, one line");
    }

    #[test]
    fn test_custom_config() {
        let config = CleanupConfig {
            strip_prefixes: vec!["Answer:".to_string()],
            lead_in_markers: vec![],
        };
        assert_eq!(clean_response("Answer: 42", &config), "42");
        assert_eq!(clean_response("Outline: 42", &config), "Outline: 42");
    }
}
