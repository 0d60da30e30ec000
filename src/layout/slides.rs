//! Slide layout: one slide per page, tables stacked below the text frame.
//!
//! Geometry on a 10in × 7.5in slide:
//!
//! | shape        | left  | top            | width | height |
//! |--------------|-------|----------------|-------|--------|
//! | caption      | 0.5in | 0.3in          | 9in   | 0.8in  |
//! | page text    | 0.5in | 1.0in          | 9in   | 5in    |
//! | k-th table   | 0.5in | 5.5in + k×0.5in | 9in   | 0.8in  |
//!
//! A table whose projected height (0.5in per row) would pass 7in moves to
//! a fresh slide at 0.5in from the top. Later tables of the same page stay
//! on that newest slide.

use super::{Labels, LayoutBuilder, PageContent};
use crate::model::{
    Emu, Grid, Rect, Rgb, Shape, SlideDeckModel, TableShape, TextFrame, TextStyle,
};
use crate::table::TableLimits;
use crate::text::{Classification, ClassifierProfile, Line};

const CAPTION_STYLE: TextStyle = TextStyle::sized(14).color(Rgb(100, 100, 100)).centered();
const TITLE_STYLE: TextStyle = TextStyle::sized(24)
    .bold()
    .color(Rgb(0x00, 0x33, 0x66))
    .space_before(12);
const SUBHEADING_STYLE: TextStyle = TextStyle::sized(18)
    .bold()
    .color(Rgb(0x00, 0x66, 0xCC))
    .space_before(18);
const BODY_STYLE: TextStyle = TextStyle::sized(16)
    .color(Rgb(0x00, 0x00, 0x00))
    .space_before(6);
const HEADER_CELL_STYLE: TextStyle = TextStyle::sized(12).bold();
const BODY_CELL_STYLE: TextStyle = TextStyle::sized(10);

const TABLE_LEFT: f64 = 0.5;
const TABLE_TOP: f64 = 5.5;
const TABLE_STEP: f64 = 0.5;
const TABLE_WIDTH: f64 = 9.0;
const TABLE_FRAME_HEIGHT: f64 = 0.8;
const PROJECTED_ROW_HEIGHT: f64 = 0.5;
const BOTTOM_LIMIT: f64 = 7.0;
const OVERFLOW_TOP: f64 = 0.5;

fn caption_bounds() -> Rect {
    Rect::inches(0.5, 0.3, 9.0, 0.8)
}

fn text_bounds() -> Rect {
    Rect::inches(0.5, 1.0, 9.0, 5.0)
}

/// Style tier for a classified line.
fn line_style(line: &Line) -> TextStyle {
    match line.class {
        Classification::Heading if line.index == 0 => TITLE_STYLE,
        Classification::Heading => SUBHEADING_STYLE,
        Classification::Body => BODY_STYLE,
    }
}

/// Split `total` into `n` widths; the last column absorbs the remainder.
fn column_widths(total: Emu, n: usize) -> Vec<Emu> {
    let n = n.max(1) as i64;
    let each = total.get() / n;
    let mut widths = vec![Emu(each); n as usize];
    if let Some(last) = widths.last_mut() {
        *last = Emu(total.get() - each * (n - 1));
    }
    widths
}

fn table_shape(grid: &Grid, top: Emu) -> TableShape {
    let width = Emu::inches(TABLE_WIDTH);
    TableShape {
        bounds: Rect {
            x: Emu::inches(TABLE_LEFT),
            y: top,
            width,
            height: Emu::inches(TABLE_FRAME_HEIGHT),
        },
        column_widths: column_widths(width, grid.column_count()),
        grid: grid.clone(),
        header_style: HEADER_CELL_STYLE,
        body_style: BODY_CELL_STYLE,
    }
}

/// Builds a [`SlideDeckModel`] with one slide per page plus overflow slides.
#[derive(Debug, Clone)]
pub struct SlideLayout {
    deck: SlideDeckModel,
    labels: Labels,
}

impl SlideLayout {
    /// Start an empty 10in × 7.5in deck.
    pub fn new(title: impl Into<String>, labels: Labels) -> Self {
        Self {
            deck: SlideDeckModel::new(title),
            labels,
        }
    }

    fn place_tables(&mut self, page: &PageContent) {
        let bottom_limit = Emu::inches(BOTTOM_LIMIT);
        let row_height = Emu::inches(PROJECTED_ROW_HEIGHT);

        for (k, grid) in page.tables.iter().enumerate() {
            let mut top = Emu::inches(TABLE_TOP) + Emu::inches(TABLE_STEP) * k as i64;
            if top + row_height * grid.row_count() as i64 > bottom_limit {
                log::debug!(
                    "page {}: table {} ({} rows) overflows, adding a slide",
                    page.number,
                    k + 1,
                    grid.row_count()
                );
                self.deck.add_slide();
                top = Emu::inches(OVERFLOW_TOP);
            }

            let shape = table_shape(grid, top);
            if let Some(slide) = self.deck.slides.last_mut() {
                slide.shapes.push(Shape::Table(shape));
            }
        }
    }
}

impl LayoutBuilder for SlideLayout {
    type Model = SlideDeckModel;

    fn profile(&self) -> ClassifierProfile {
        ClassifierProfile::Slides
    }

    fn table_limits(&self) -> TableLimits {
        TableLimits::slides()
    }

    fn add_page(&mut self, page: &PageContent) {
        let caption_text = self.labels.slide_caption(page.number, page.total);
        let slide = self.deck.add_slide();

        let mut caption = TextFrame::new(caption_bounds());
        caption.push_line(caption_text, CAPTION_STYLE);
        slide.shapes.push(Shape::Caption(caption));

        if !page.lines.is_empty() {
            let mut frame = TextFrame::new(text_bounds()).wrapped();
            for line in &page.lines {
                frame.push_line(line.text.clone(), line_style(line));
            }
            slide.shapes.push(Shape::Text(frame));
        }

        self.place_tables(page);
    }

    fn finish(self) -> SlideDeckModel {
        self.deck
    }
}
