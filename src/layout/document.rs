//! Word-processing layout: headings, paragraphs, tables and page breaks.

use super::{Labels, LayoutBuilder, PageContent};
use crate::model::DocumentModel;
use crate::table::TableLimits;
use crate::text::{Classification, ClassifierProfile};

/// Builds a [`DocumentModel`] page by page.
#[derive(Debug, Clone)]
pub struct DocumentLayout {
    model: DocumentModel,
    labels: Labels,
}

impl DocumentLayout {
    /// Start a document titled after the source file's base name.
    pub fn new(title: impl Into<String>, labels: Labels) -> Self {
        let title = title.into();
        let mut model = DocumentModel::new(title.clone());
        model.add_centered_heading(title, 0);
        Self { model, labels }
    }
}

impl LayoutBuilder for DocumentLayout {
    type Model = DocumentModel;

    fn profile(&self) -> ClassifierProfile {
        ClassifierProfile::Document
    }

    fn table_limits(&self) -> TableLimits {
        TableLimits::unbounded()
    }

    fn add_page(&mut self, page: &PageContent) {
        self.model
            .add_heading(self.labels.page_heading(page.number), 1);

        for line in &page.lines {
            match line.class {
                Classification::Heading => self.model.add_heading(line.text.clone(), 2),
                Classification::Body => self.model.add_paragraph(line.text.clone()),
            }
        }

        if !page.tables.is_empty() {
            self.model.add_heading(self.labels.tables_heading.clone(), 3);
            for grid in &page.tables {
                self.model.add_table(grid.clone());
            }
        }

        if !page.is_last() {
            self.model.add_page_break();
        }
    }

    fn finish(self) -> DocumentModel {
        self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, Page, RawTable};

    fn build(pages: &[Page]) -> DocumentModel {
        let mut layout = DocumentLayout::new("report", Labels::default());
        let total = pages.len() as u32;
        for page in pages {
            let content =
                PageContent::prepare(page, total, layout.profile(), layout.table_limits());
            layout.add_page(&content);
        }
        layout.finish()
    }

    #[test]
    fn test_title_heading_centered() {
        let doc = build(&[]);
        assert_eq!(doc.title, "report");
        assert_eq!(doc.blocks.len(), 1);
        assert!(matches!(
            &doc.blocks[0],
            Block::Heading { text, level: 0, alignment: crate::model::Alignment::Center }
                if text == "report"
        ));
    }

    #[test]
    fn test_two_page_scenario() {
        let doc = build(&[
            Page::new(1).with_text("Title\nThis is a body sentence."),
            Page::new(2),
        ]);

        let body: Vec<_> = doc.blocks[1..].to_vec();
        assert_eq!(
            body,
            vec![
                Block::Heading {
                    text: "Page 1".into(),
                    level: 1,
                    alignment: Default::default()
                },
                Block::Heading {
                    text: "Title".into(),
                    level: 2,
                    alignment: Default::default()
                },
                Block::Heading {
                    text: "This is a body sentence.".into(),
                    level: 2,
                    alignment: Default::default()
                },
                Block::PageBreak,
                Block::Heading {
                    text: "Page 2".into(),
                    level: 1,
                    alignment: Default::default()
                },
            ]
        );
    }

    #[test]
    fn test_body_lines_become_paragraphs() {
        let doc = build(&[Page::new(1).with_text("一个完整的句子。\nShort")]);
        assert_eq!(doc.blocks[2], Block::Paragraph("一个完整的句子。".into()));
        assert!(matches!(&doc.blocks[3], Block::Heading { level: 2, .. }));
    }

    #[test]
    fn test_page_breaks_between_pages_only() {
        for n in 1..=4u32 {
            let pages: Vec<_> = (1..=n).map(Page::new).collect();
            assert_eq!(build(&pages).page_break_count(), (n - 1) as usize);
        }
    }

    #[test]
    fn test_tables_follow_text_under_one_heading() {
        let big: Vec<Vec<String>> = (0..51)
            .map(|r| (0..11).map(|c| format!("{}{}", r, c)).collect())
            .collect();
        let doc = build(&[Page::new(1)
            .with_text("Intro")
            .with_table(RawTable::from_strings([["h1", "h2"], ["a", "b"]]))
            .with_table(RawTable::from_strings(big))]);

        let kinds: Vec<&str> = doc.blocks[1..]
            .iter()
            .map(|b| match b {
                Block::Heading { level: 1, .. } => "page",
                Block::Heading { level: 2, .. } => "line",
                Block::Heading { level: 3, .. } => "tables",
                Block::Table(_) => "table",
                _ => "other",
            })
            .collect();
        assert_eq!(kinds, ["page", "line", "tables", "table", "table"]);
    }

    #[test]
    fn test_no_tables_heading_for_rejected_tables() {
        let doc = build(&[Page::new(1).with_table(RawTable::default())]);
        assert_eq!(doc.headings().count(), 2);
    }
}
