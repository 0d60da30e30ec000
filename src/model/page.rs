//! Source page records.

use super::RawTable;
use serde::{Deserialize, Serialize};

/// A single page as exposed by a page source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed)
    pub number: u32,

    /// Extracted raw text, if the page has any
    pub text: Option<String>,

    /// Extracted tables, in reading order
    pub tables: Vec<RawTable>,
}

impl Page {
    /// Create an empty page.
    pub fn new(number: u32) -> Self {
        Self {
            number,
            text: None,
            tables: Vec::new(),
        }
    }

    /// Set the extracted text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Append an extracted table.
    pub fn with_table(mut self, table: RawTable) -> Self {
        self.tables.push(table);
        self
    }

    /// Whether the page carries neither text nor tables.
    pub fn is_empty(&self) -> bool {
        self.text.as_deref().map_or(true, |t| t.trim().is_empty()) && self.tables.is_empty()
    }
}
