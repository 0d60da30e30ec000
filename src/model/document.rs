//! Word-processing document model.

use super::Grid;
use serde::{Deserialize, Serialize};

/// An in-memory word-processing document, built block by block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentModel {
    /// Document title (stored in the package properties)
    pub title: String,

    /// Body content in reading order
    pub blocks: Vec<Block>,
}

impl DocumentModel {
    /// Create an empty document.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            blocks: Vec::new(),
        }
    }

    /// Append a heading. Level 0 is the document title.
    pub fn add_heading(&mut self, text: impl Into<String>, level: u8) {
        self.blocks.push(Block::Heading {
            text: text.into(),
            level: level.min(9),
            alignment: Alignment::Left,
        });
    }

    /// Append a centered heading.
    pub fn add_centered_heading(&mut self, text: impl Into<String>, level: u8) {
        self.blocks.push(Block::Heading {
            text: text.into(),
            level: level.min(9),
            alignment: Alignment::Center,
        });
    }

    /// Append a body paragraph.
    pub fn add_paragraph(&mut self, text: impl Into<String>) {
        self.blocks.push(Block::Paragraph(text.into()));
    }

    /// Append a table.
    pub fn add_table(&mut self, grid: Grid) {
        self.blocks.push(Block::Table(grid));
    }

    /// Append an explicit page break.
    pub fn add_page_break(&mut self) {
        self.blocks.push(Block::PageBreak);
    }

    /// Number of explicit page breaks.
    pub fn page_break_count(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| matches!(b, Block::PageBreak))
            .count()
    }

    /// Iterate over headings as `(level, text)`.
    pub fn headings(&self) -> impl Iterator<Item = (u8, &str)> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Heading { text, level, .. } => Some((*level, text.as_str())),
            _ => None,
        })
    }
}

/// A content block in a word-processing document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A heading paragraph
    Heading {
        /// Heading text
        text: String,
        /// Outline level (0 = title)
        level: u8,
        /// Horizontal alignment
        alignment: Alignment,
    },

    /// A plain paragraph
    Paragraph(String),

    /// A table; its first row is the header
    Table(Grid),

    /// A hard page break
    PageBreak,
}

/// Paragraph alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Left aligned
    #[default]
    Left,
    /// Centered
    Center,
}
