//! Data model shared by the conversion pipeline.
//!
//! Source side: [`Page`] and [`RawTable`] as a page source exposes them.
//! Target side: [`DocumentModel`] and [`SlideDeckModel`], built by the
//! layout builders and consumed by the writers.

mod deck;
mod document;
mod page;
mod table;

pub use deck::{
    Emu, Rect, Rgb, Shape, Slide, SlideDeckModel, SlideParagraph, TableShape, TextFrame,
    TextStyle, EMU_PER_INCH,
};
pub use document::{Alignment, Block, DocumentModel};
pub use page::Page;
pub use table::{Grid, RawTable};
