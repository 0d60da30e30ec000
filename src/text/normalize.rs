//! Cleanup of raw extracted text.

use regex::Regex;
use std::sync::OnceLock;

/// Control characters below space that are removed outright.
///
/// Tab and carriage return are left for whitespace collapsing, newline is
/// kept as the line separator.
fn control_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\x00-\x08\x0B\x0C\x0E-\x1F]").expect("valid regex"))
}

/// Runs of whitespace that do not contain a newline.
fn inline_whitespace() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\S\n]+").expect("valid regex"))
}

/// Normalize a page's raw text.
///
/// Strips NUL and other control characters (except newline), collapses
/// whitespace runs within a line to a single space and trims the blob.
/// Returns `None` when there is no text left to process.
pub fn normalize(raw: Option<&str>) -> Option<String> {
    let raw = raw?;
    let cleaned = normalize_str(raw);
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Normalize a string, returning an empty string when nothing remains.
pub fn normalize_str(raw: &str) -> String {
    let stripped = control_chars().replace_all(raw, "");
    let collapsed = inline_whitespace().replace_all(&stripped, " ");
    collapsed.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_or_blank_input_is_skipped() {
        assert_eq!(normalize(None), None);
        assert_eq!(normalize(Some("")), None);
        assert_eq!(normalize(Some(" \t\n \0")), None);
    }

    #[test]
    fn test_strips_nul_and_controls() {
        assert_eq!(normalize_str("a\0b\x07c\x1Fd"), "abcd");
    }

    #[test]
    fn test_collapses_inline_whitespace_but_keeps_newlines() {
        assert_eq!(
            normalize_str("  Title   here \n\n body\t\ttext  "),
            "Title here \n\n body text"
        );
    }

    #[test]
    fn test_tab_and_carriage_return_become_spaces() {
        assert_eq!(normalize_str("a\tb"), "a b");
        assert_eq!(normalize_str("line one\r\nline two"), "line one \nline two");
    }

    #[test]
    fn test_unicode_whitespace_collapses() {
        assert_eq!(normalize_str("a\u{3000}\u{00A0} b"), "a b");
    }

    #[test]
    fn test_no_other_transformation() {
        let text = "<b>&amp; café ﬁ</b>";
        assert_eq!(normalize_str(text), text);
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "  mixed \t whitespace\r\n\n\0and\x0Bcontrols  ",
            "第 1 页\n标题\n这是正文。",
            "\n\n  \n",
            "already clean\ntext",
            "trailing space \n leading space",
        ];
        for sample in samples {
            let once = normalize_str(sample);
            assert_eq!(normalize_str(&once), once, "sample: {:?}", sample);
        }
    }
}
