//! Heading/body classification of extracted lines.
//!
//! Extracted PDF text carries no font metadata, so a line counts as a
//! heading when it is short and does not end like a sentence. Short
//! fragments without terminal punctuation are therefore reported as
//! headings too; this approximation is intentional.

use serde::{Deserialize, Serialize};

/// Lines with at least this many characters are always body text.
pub const HEADING_MAX_CHARS: usize = 50;

/// Terminal markers shared by every target.
const TERMINALS: [char; 5] = ['。', '！', '？', ')', ']'];

/// Structural role of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    /// Title-like line
    Heading,
    /// Ordinary paragraph text
    Body,
}

impl Classification {
    /// Check if this is a heading.
    pub fn is_heading(self) -> bool {
        self == Classification::Heading
    }
}

/// Target-specific variant of the terminal marker set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierProfile {
    /// Word-processing target
    #[default]
    Document,
    /// Slide target; a trailing `.` also marks a sentence
    Slides,
}

impl ClassifierProfile {
    /// Whether `c` ends a sentence under this profile.
    pub fn is_terminal(self, c: char) -> bool {
        TERMINALS.contains(&c) || (self == ClassifierProfile::Slides && c == '.')
    }
}

/// A non-empty, classified line of page text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    /// Zero-based position among the page's non-blank lines
    pub index: usize,
    /// Trimmed line text
    pub text: String,
    /// Heading or body
    pub class: Classification,
}

/// Classify a single non-empty line.
pub fn classify(line: &str, profile: ClassifierProfile) -> Classification {
    let short = line.chars().count() < HEADING_MAX_CHARS;
    let terminated = line.chars().last().is_some_and(|c| profile.is_terminal(c));

    if short && !terminated {
        Classification::Heading
    } else {
        Classification::Body
    }
}

/// Split normalized text into classified lines, skipping blank segments.
pub fn lines(text: &str, profile: ClassifierProfile) -> Vec<Line> {
    text.split('\n')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .enumerate()
        .map(|(index, segment)| Line {
            index,
            text: segment.to_string(),
            class: classify(segment, profile),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALPHABET: [char; 10] = ['a', '中', ' ', '。', '！', '？', ')', ']', '.', ','];

    fn expected(line: &str, profile: ClassifierProfile) -> Classification {
        let last = line.chars().last().unwrap();
        let mut terminals = vec!['。', '！', '？', ')', ']'];
        if profile == ClassifierProfile::Slides {
            terminals.push('.');
        }
        if line.chars().count() < 50 && !terminals.contains(&last) {
            Classification::Heading
        } else {
            Classification::Body
        }
    }

    #[test]
    fn test_classification_over_generated_lines() {
        for profile in [ClassifierProfile::Document, ClassifierProfile::Slides] {
            for len in 1..=60 {
                for &last in &ALPHABET {
                    let line: String = std::iter::repeat('x').take(len - 1).chain([last]).collect();
                    assert_eq!(
                        classify(&line, profile),
                        expected(&line, profile),
                        "len={} last={:?} profile={:?}",
                        len,
                        last,
                        profile
                    );
                }
            }
        }
    }

    #[test]
    fn test_boundary_at_fifty_chars() {
        let forty_nine = "x".repeat(49);
        let fifty = "x".repeat(50);
        assert_eq!(
            classify(&forty_nine, ClassifierProfile::Document),
            Classification::Heading
        );
        assert_eq!(
            classify(&fifty, ClassifierProfile::Document),
            Classification::Body
        );
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 30 CJK characters are 90 bytes but still a short line.
        let line = "标".repeat(30);
        assert_eq!(
            classify(&line, ClassifierProfile::Document),
            Classification::Heading
        );
    }

    #[test]
    fn test_period_only_terminal_for_slides() {
        let line = "This is a body sentence.";
        assert_eq!(
            classify(line, ClassifierProfile::Document),
            Classification::Heading
        );
        assert_eq!(
            classify(line, ClassifierProfile::Slides),
            Classification::Body
        );
    }

    #[test]
    fn test_short_fragment_is_heading() {
        assert_eq!(
            classify("continued from the previous", ClassifierProfile::Slides),
            Classification::Heading
        );
    }

    #[test]
    fn test_lines_skip_blanks_and_number_in_order() {
        let lines = lines(
            "Title\n \n\nThis is a body sentence.\n(note)",
            ClassifierProfile::Slides,
        );
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].index, 0);
        assert_eq!(lines[0].text, "Title");
        assert!(lines[0].class.is_heading());
        assert_eq!(lines[1].index, 1);
        assert_eq!(lines[1].class, Classification::Body);
        assert_eq!(lines[2].index, 2);
        assert_eq!(lines[2].class, Classification::Body);
    }

    #[test]
    fn test_lines_of_empty_text() {
        assert!(lines("", ClassifierProfile::Document).is_empty());
    }
}
