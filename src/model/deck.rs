//! Slide-deck model: slides holding positioned text boxes and tables.
//!
//! Geometry is kept in EMU (English Metric Units, 914 400 per inch), the
//! unit the slide container format uses natively.

use super::{Alignment, Grid};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul};

/// EMU per inch.
pub const EMU_PER_INCH: i64 = 914_400;

/// A length in English Metric Units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Emu(pub i64);

impl Emu {
    /// Convert inches to EMU.
    pub fn inches(value: f64) -> Self {
        Emu((value * EMU_PER_INCH as f64).round() as i64)
    }

    /// Raw EMU value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl Add for Emu {
    type Output = Emu;

    fn add(self, rhs: Emu) -> Emu {
        Emu(self.0 + rhs.0)
    }
}

impl Mul<i64> for Emu {
    type Output = Emu;

    fn mul(self, rhs: i64) -> Emu {
        Emu(self.0 * rhs)
    }
}

/// A positioned rectangle on a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    /// Left offset
    pub x: Emu,
    /// Top offset
    pub y: Emu,
    /// Width
    pub width: Emu,
    /// Height
    pub height: Emu,
}

impl Rect {
    /// Build a rectangle from inch values.
    pub fn inches(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x: Emu::inches(x),
            y: Emu::inches(y),
            width: Emu::inches(width),
            height: Emu::inches(height),
        }
    }
}

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Upper-case hex form without `#`, e.g. `003366`.
    pub fn hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

/// Character and paragraph formatting for slide text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font size in points
    pub size_pt: u32,
    /// Bold weight
    pub bold: bool,
    /// Text color; `None` inherits the theme color
    pub color: Option<Rgb>,
    /// Space before the paragraph, in points
    pub space_before_pt: Option<u32>,
    /// Horizontal alignment
    pub alignment: Alignment,
}

impl TextStyle {
    /// Regular text at the given size.
    pub const fn sized(size_pt: u32) -> Self {
        Self {
            size_pt,
            bold: false,
            color: None,
            space_before_pt: None,
            alignment: Alignment::Left,
        }
    }

    /// Set bold weight.
    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Set the text color.
    pub const fn color(mut self, color: Rgb) -> Self {
        self.color = Some(color);
        self
    }

    /// Set the space before the paragraph.
    pub const fn space_before(mut self, pt: u32) -> Self {
        self.space_before_pt = Some(pt);
        self
    }

    /// Center the paragraph.
    pub const fn centered(mut self) -> Self {
        self.alignment = Alignment::Center;
        self
    }
}

/// One paragraph inside a text frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideParagraph {
    /// Paragraph text (empty for the placeholder slot)
    pub text: String,
    /// Formatting; `None` for an unformatted empty slot
    pub style: Option<TextStyle>,
}

/// A text box with one or more paragraphs.
///
/// A new frame already holds one empty paragraph, like a freshly inserted
/// text box in a presentation editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFrame {
    /// Position and size
    pub bounds: Rect,
    /// Wrap text at the frame width
    pub word_wrap: bool,
    /// Paragraphs in order
    pub paragraphs: Vec<SlideParagraph>,
}

impl TextFrame {
    /// Create a frame holding a single empty paragraph.
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            word_wrap: false,
            paragraphs: vec![SlideParagraph {
                text: String::new(),
                style: None,
            }],
        }
    }

    /// Enable word wrap.
    pub fn wrapped(mut self) -> Self {
        self.word_wrap = true;
        self
    }

    /// Write a line into the frame.
    ///
    /// The first line fills the existing empty paragraph; later lines
    /// append new paragraphs.
    pub fn push_line(&mut self, text: impl Into<String>, style: TextStyle) {
        let paragraph = SlideParagraph {
            text: text.into(),
            style: Some(style),
        };
        let slot_free = self.paragraphs.len() == 1
            && self.paragraphs[0].text.is_empty()
            && self.paragraphs[0].style.is_none();
        if slot_free {
            self.paragraphs[0] = paragraph;
        } else {
            self.paragraphs.push(paragraph);
        }
    }
}

/// A table placed on a slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableShape {
    /// Frame position and size
    pub bounds: Rect,
    /// One width per column
    pub column_widths: Vec<Emu>,
    /// Cell content; first row is the header
    pub grid: Grid,
    /// Formatting of the header row
    pub header_style: TextStyle,
    /// Formatting of the data rows
    pub body_style: TextStyle,
}

impl TableShape {
    /// Height of each row when the frame height is shared evenly.
    pub fn row_height(&self) -> Emu {
        Emu(self.bounds.height.get() / self.grid.row_count().max(1) as i64)
    }
}

/// A shape on a slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    /// Caption shown at the top of a page slide
    Caption(TextFrame),
    /// Page text
    Text(TextFrame),
    /// A table
    Table(TableShape),
}

/// One slide.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    /// Shapes in z-order
    pub shapes: Vec<Shape>,
}

impl Slide {
    /// The caption frame, if any.
    pub fn caption(&self) -> Option<&TextFrame> {
        self.shapes.iter().find_map(|s| match s {
            Shape::Caption(frame) => Some(frame),
            _ => None,
        })
    }

    /// The page-text frame, if any.
    pub fn text_frame(&self) -> Option<&TextFrame> {
        self.shapes.iter().find_map(|s| match s {
            Shape::Text(frame) => Some(frame),
            _ => None,
        })
    }

    /// Tables on the slide.
    pub fn tables(&self) -> impl Iterator<Item = &TableShape> {
        self.shapes.iter().filter_map(|s| match s {
            Shape::Table(table) => Some(table),
            _ => None,
        })
    }
}

/// An in-memory slide deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideDeckModel {
    /// Deck title (stored in the package properties)
    pub title: String,
    /// Slide width
    pub width: Emu,
    /// Slide height
    pub height: Emu,
    /// Slides in order
    pub slides: Vec<Slide>,
}

impl SlideDeckModel {
    /// Create an empty 10in × 7.5in deck.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            width: Emu::inches(10.0),
            height: Emu::inches(7.5),
            slides: Vec::new(),
        }
    }

    /// Append a blank slide and return it.
    pub fn add_slide(&mut self) -> &mut Slide {
        self.slides.push(Slide::default());
        let last = self.slides.len() - 1;
        &mut self.slides[last]
    }

    /// Number of slides.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }
}
