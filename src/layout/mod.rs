//! Layout builders: place classified page content into a target model.
//!
//! The orchestrator prepares every page once per target with
//! [`PageContent::prepare`], then hands it to a [`LayoutBuilder`]. Each
//! builder owns its pagination policy: page breaks for documents, overflow
//! slides for decks.

mod document;
mod slides;

pub use document::DocumentLayout;
pub use slides::SlideLayout;

use crate::model::{Grid, Page};
use crate::table::{adapt, TableLimits};
use crate::text::{lines, normalize, ClassifierProfile, Line};

/// A consumer of prepared pages that builds one target model.
pub trait LayoutBuilder {
    /// The model produced once all pages are placed.
    type Model;

    /// Terminal-marker profile used to classify this target's lines.
    fn profile(&self) -> ClassifierProfile;

    /// Size limits for tables on this target.
    fn table_limits(&self) -> TableLimits;

    /// Place one page. Pages arrive in source order.
    fn add_page(&mut self, page: &PageContent);

    /// Finish the model.
    fn finish(self) -> Self::Model;
}

/// A page after normalization, classification and table adaptation.
#[derive(Debug, Clone, PartialEq)]
pub struct PageContent {
    /// Page number (1-indexed)
    pub number: u32,
    /// Total pages in the source
    pub total: u32,
    /// Classified non-empty lines
    pub lines: Vec<Line>,
    /// Tables accepted by the target's limits
    pub tables: Vec<Grid>,
}

impl PageContent {
    /// Prepare a source page for a target.
    pub fn prepare(
        page: &Page,
        total: u32,
        profile: ClassifierProfile,
        limits: TableLimits,
    ) -> Self {
        let lines = normalize(page.text.as_deref())
            .map(|text| lines(&text, profile))
            .unwrap_or_default();

        let tables = page
            .tables
            .iter()
            .enumerate()
            .filter_map(|(i, raw)| match adapt(raw, limits) {
                Ok(grid) => Some(grid),
                Err(reason) => {
                    log::debug!("page {}: skipping table {}: {}", page.number, i + 1, reason);
                    None
                }
            })
            .collect();

        Self {
            number: page.number,
            total,
            lines,
            tables,
        }
    }

    /// Whether this is the final page of the source.
    pub fn is_last(&self) -> bool {
        self.number >= self.total
    }

    /// Whether the page has neither text nor tables.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.tables.is_empty()
    }
}

/// Labels inserted by the builders.
///
/// `{n}` is replaced by the page number and `{total}` by the page count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    /// Level-1 heading opening each page of a document
    pub page_heading: String,
    /// Level-3 heading above a page's tables
    pub tables_heading: String,
    /// Caption at the top of each page slide
    pub slide_caption: String,
}

impl Labels {
    /// English labels.
    pub fn english() -> Self {
        Self {
            page_heading: "Page {n}".to_string(),
            tables_heading: "Tables".to_string(),
            slide_caption: "Page {n} / {total}".to_string(),
        }
    }

    /// Chinese labels.
    pub fn chinese() -> Self {
        Self {
            page_heading: "第 {n} 页".to_string(),
            tables_heading: "表格".to_string(),
            slide_caption: "第 {n} 页 / 共 {total} 页".to_string(),
        }
    }

    /// Heading text for page `n`.
    pub fn page_heading(&self, n: u32) -> String {
        self.page_heading.replace("{n}", &n.to_string())
    }

    /// Caption text for page `n` of `total`.
    pub fn slide_caption(&self, n: u32, total: u32) -> String {
        self.slide_caption
            .replace("{n}", &n.to_string())
            .replace("{total}", &total.to_string())
    }
}

impl Default for Labels {
    fn default() -> Self {
        Self::english()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RawTable;
    use crate::text::Classification;

    #[test]
    fn test_prepare_classifies_and_filters() {
        let page = Page::new(1)
            .with_text("Title\nThis is a body sentence.")
            .with_table(RawTable::from_strings([["a", "b"], ["1", "2"]]))
            .with_table(RawTable::default());

        let content = PageContent::prepare(
            &page,
            2,
            ClassifierProfile::Document,
            TableLimits::unbounded(),
        );

        assert_eq!(content.lines.len(), 2);
        assert_eq!(content.lines[0].class, Classification::Heading);
        // Without the slide profile a trailing period is not terminal.
        assert_eq!(content.lines[1].class, Classification::Heading);
        assert_eq!(content.tables.len(), 1);
        assert!(!content.is_last());
    }

    #[test]
    fn test_prepare_empty_page() {
        let content = PageContent::prepare(
            &Page::new(3).with_text(" \0 "),
            3,
            ClassifierProfile::Slides,
            TableLimits::slides(),
        );
        assert!(content.is_empty());
        assert!(content.is_last());
    }

    #[test]
    fn test_labels() {
        let labels = Labels::english();
        assert_eq!(labels.page_heading(4), "Page 4");
        assert_eq!(labels.slide_caption(1, 3), "Page 1 / 3");

        let labels = Labels::chinese();
        assert_eq!(labels.page_heading(2), "第 2 页");
        assert_eq!(labels.slide_caption(2, 5), "第 2 页 / 共 5 页");
    }
}
