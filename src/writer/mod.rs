//! Container serialization: models to `.docx` / `.pptx` packages.
//!
//! Both formats are OPC zip packages of XML parts. The writers here stream
//! parts into a [`zip::ZipWriter`] and generate XML with `quick-xml`.

mod docx;
mod package;
mod pptx;
mod xml;

pub use docx::write_docx;
pub use pptx::write_pptx;

use std::io::{Cursor, Seek, Write};
use std::path::Path;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::model::{DocumentModel, SlideDeckModel};

/// A model that serializes to an Office package.
pub trait OfficePackage {
    /// File extension of the package, without the dot.
    const EXTENSION: &'static str;

    /// MIME type of the package.
    const MIME_TYPE: &'static str;

    /// Write the package into `writer` and hand it back.
    fn write_to<W: Write + Seek>(&self, writer: W, created: DateTime<Utc>) -> Result<W>;
}

impl OfficePackage for DocumentModel {
    const EXTENSION: &'static str = "docx";
    const MIME_TYPE: &'static str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

    fn write_to<W: Write + Seek>(&self, writer: W, created: DateTime<Utc>) -> Result<W> {
        write_docx(self, writer, created)
    }
}

impl OfficePackage for SlideDeckModel {
    const EXTENSION: &'static str = "pptx";
    const MIME_TYPE: &'static str =
        "application/vnd.openxmlformats-officedocument.presentationml.presentation";

    fn write_to<W: Write + Seek>(&self, writer: W, created: DateTime<Utc>) -> Result<W> {
        write_pptx(self, writer, created)
    }
}

/// Serialize a model into memory.
pub fn to_bytes<M: OfficePackage>(model: &M) -> Result<Vec<u8>> {
    let cursor = model.write_to(Cursor::new(Vec::new()), Utc::now())?;
    Ok(cursor.into_inner())
}

/// Save a model to `output`.
///
/// The package is written to a staging file first (in `temp_dir` when given,
/// else next to `output`) and renamed into place, so a failed write never
/// leaves a partial file at `output`. An existing file is replaced.
pub fn save<M: OfficePackage>(model: &M, output: &Path, temp_dir: Option<&Path>) -> Result<()> {
    let created = Utc::now();
    package::write_atomic(output, temp_dir, |file| {
        model.write_to(&mut *file, created)?;
        Ok(())
    })?;
    log::debug!("wrote {} package to {}", M::EXTENSION, output.display());
    Ok(())
}
