//! PDF page sources.
//!
//! The conversion pipeline only needs numbered pages of raw text and
//! tables. [`PageSource`] is that boundary; [`LopdfSource`] reads real PDF
//! files and [`MemorySource`] serves pages that are already in memory.

mod backend;
mod options;
mod spans;
mod table_detector;

pub use backend::{decode_text_simple, LopdfSource};
pub use options::{ErrorMode, ParseOptions};
pub use spans::{extract_spans, TextSpan};
pub use table_detector::TableDetector;

use crate::error::{Error, Result};
use crate::model::Page;

/// A document that yields pages by 1-based number.
pub trait PageSource {
    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Read page `number` (1-indexed).
    fn page(&self, number: u32) -> Result<Page>;
}

/// Pages held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pages: Vec<Page>,
}

impl MemorySource {
    /// Create a source from pages. Page numbers are reassigned 1..=N in order.
    pub fn new(pages: impl IntoIterator<Item = Page>) -> Self {
        let pages = pages
            .into_iter()
            .enumerate()
            .map(|(i, mut page)| {
                page.number = i as u32 + 1;
                page
            })
            .collect();
        Self { pages }
    }

    /// Create a source of `n` pages without content.
    pub fn blank(n: u32) -> Self {
        Self::new((1..=n).map(Page::new))
    }

    /// Append a page.
    pub fn push(&mut self, mut page: Page) {
        page.number = self.pages.len() as u32 + 1;
        self.pages.push(page);
    }
}

impl PageSource for MemorySource {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page(&self, number: u32) -> Result<Page> {
        number
            .checked_sub(1)
            .and_then(|i| self.pages.get(i as usize))
            .cloned()
            .ok_or(Error::PageOutOfRange(number, self.page_count()))
    }
}

impl<S: PageSource + ?Sized> PageSource for &S {
    fn page_count(&self) -> u32 {
        (**self).page_count()
    }

    fn page(&self, number: u32) -> Result<Page> {
        (**self).page(number)
    }
}
