//! # pdf2office
//!
//! Convert the text and tables of PDF documents into Word (`.docx`) and
//! PowerPoint (`.pptx`) files.
//!
//! ## Quick Start
//!
//! ```no_run
//! let result = pdf2office::to_docx("report.pdf", "report.docx");
//! if result.success {
//!     println!("{}", result.message);
//! }
//! ```
//!
//! ## Pipeline
//!
//! - **Page source** ([`parser`]): numbered pages of raw text and tables,
//!   read from PDF with `lopdf`
//! - **Normalization and classification** ([`text`]): control characters
//!   stripped, whitespace collapsed, lines split into headings and body
//! - **Table adaptation** ([`table`]): ragged tables squared, size limits
//!   applied per target
//! - **Layout** ([`layout`]): pages placed into a document or a slide deck
//! - **Serialization** ([`writer`]): OPC zip packages written atomically
//!
//! [`Converter`] drives all of it and reports a [`ConversionResult`]
//! instead of returning errors.

pub mod convert;
pub mod detect;
pub mod error;
pub mod layout;
pub mod model;
pub mod parser;
pub mod table;
pub mod text;
pub mod writer;

// Re-export commonly used types
pub use convert::{
    convert_batch, BatchEntry, ConversionResult, ConvertOptions, Converter, OutputFormat, Stage,
};
pub use detect::{has_pdf_extension, sniff_bytes, sniff_file, PdfVersion};
pub use error::{Error, Result};
pub use layout::{DocumentLayout, Labels, LayoutBuilder, PageContent, SlideLayout};
pub use model::{DocumentModel, Grid, Page, RawTable, SlideDeckModel};
pub use parser::{ErrorMode, LopdfSource, MemorySource, PageSource, ParseOptions};
pub use table::{TableLimits, TableRejection};
pub use text::{classify, lines, normalize, Classification, ClassifierProfile, Line};
pub use writer::OfficePackage;

use std::path::Path;

/// Convert a PDF file to a Word document with default options.
///
/// # Example
///
/// ```no_run
/// let result = pdf2office::to_docx("input.pdf", "output.docx");
/// assert!(result.success, "{}", result.message);
/// ```
pub fn to_docx<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> ConversionResult {
    Converter::default().convert(input, output, OutputFormat::Docx)
}

/// Convert a PDF file to a slide deck with default options.
///
/// # Example
///
/// ```no_run
/// let result = pdf2office::to_pptx("input.pdf", "output.pptx");
/// println!("{} pages", result.pages);
/// ```
pub fn to_pptx<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> ConversionResult {
    Converter::default().convert(input, output, OutputFormat::Pptx)
}

/// Convert a PDF file with custom options.
///
/// # Example
///
/// ```no_run
/// use pdf2office::{convert_with_options, ConvertOptions, Labels, OutputFormat, ParseOptions};
///
/// let options = ConvertOptions::new()
///     .with_labels(Labels::chinese())
///     .with_parse_options(ParseOptions::new().lenient());
/// let result = convert_with_options("in.pdf", "out.pptx", OutputFormat::Pptx, options);
/// ```
pub fn convert_with_options<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    format: OutputFormat,
    options: ConvertOptions,
) -> ConversionResult {
    Converter::new(options).convert(input, output, format)
}
