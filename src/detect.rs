//! Source file sniffing: PDF header check and batch file matching.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const VERSION_LEN: usize = 3; // e.g., "1.7"

/// Version declared in a PDF header, e.g. `1.7`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfVersion(pub String);

impl std::fmt::Display for PdfVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PDF {}", self.0)
    }
}

/// Read the first bytes of `path` and check the PDF header.
pub fn sniff_file<P: AsRef<Path>>(path: P) -> Result<PdfVersion> {
    let mut header = Vec::with_capacity(16);
    File::open(path)?.take(16).read_to_end(&mut header)?;
    sniff_bytes(&header)
}

/// Check that `data` starts with a `%PDF-x.y` header.
pub fn sniff_bytes(data: &[u8]) -> Result<PdfVersion> {
    let rest = data.strip_prefix(PDF_MAGIC).ok_or(Error::UnknownFormat)?;
    let version = rest.get(..VERSION_LEN).ok_or(Error::UnknownFormat)?;
    let version = String::from_utf8_lossy(version).to_string();

    if !is_valid_version(&version) {
        return Err(Error::UnsupportedVersion(version));
    }
    Ok(PdfVersion(version))
}

/// Whether `path` names a PDF by extension (case-insensitive).
///
/// Batch mode uses this to pick candidate files; the header is checked
/// later when each file is opened.
pub fn has_pdf_extension<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}

fn is_valid_version(version: &str) -> bool {
    let bytes = version.as_bytes();
    bytes.len() == 3 && bytes[0].is_ascii_digit() && bytes[1] == b'.' && bytes[2].is_ascii_digit()
}
