//! [`PageSource`] backed by `lopdf`.

use std::collections::BTreeMap;
use std::path::Path;

use lopdf::{Document as LopdfDocument, ObjectId};

use super::options::ParseOptions;
use super::spans::{extract_spans, TextSpan};
use super::table_detector::TableDetector;
use super::PageSource;
use crate::detect::{sniff_bytes, sniff_file, PdfVersion};
use crate::error::{Error, Result};
use crate::model::{Page, RawTable};

/// A PDF document opened with `lopdf`.
pub struct LopdfSource {
    doc: LopdfDocument,
    pages: BTreeMap<u32, ObjectId>,
    version: PdfVersion,
    options: ParseOptions,
    detector: TableDetector,
}

impl LopdfSource {
    /// Open a PDF file.
    ///
    /// Every failure to get a usable document (bad header, parse error,
    /// encryption) is reported as [`Error::SourceUnreadable`].
    pub fn open<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();
        let opened = sniff_file(path).and_then(|version| {
            let doc = LopdfDocument::load(path)?;
            Ok((version, doc))
        });
        Self::finish_open(opened, options)
            .map_err(|e| unreadable(&path.display().to_string(), e))
    }

    /// Open a PDF held in memory.
    pub fn from_bytes(data: &[u8], options: ParseOptions) -> Result<Self> {
        let opened = sniff_bytes(data).and_then(|version| {
            let doc = LopdfDocument::load_mem(data)?;
            Ok((version, doc))
        });
        Self::finish_open(opened, options).map_err(|e| unreadable("<memory>", e))
    }

    fn finish_open(
        opened: Result<(PdfVersion, LopdfDocument)>,
        options: ParseOptions,
    ) -> Result<Self> {
        let (version, doc) = opened?;
        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }
        let pages = doc.get_pages();
        log::debug!("opened {} with {} pages", version, pages.len());
        Ok(Self {
            doc,
            pages,
            version,
            options,
            detector: TableDetector::new(),
        })
    }

    /// Header version of the file.
    pub fn version(&self) -> &PdfVersion {
        &self.version
    }

    fn page_id(&self, number: u32) -> Result<ObjectId> {
        self.pages
            .get(&number)
            .copied()
            .ok_or(Error::PageOutOfRange(number, self.page_count()))
    }

    /// Page text rebuilt from positioned spans, one line per baseline.
    ///
    /// Falls back to `lopdf`'s own extraction when the content stream
    /// yields no spans.
    fn page_text(&self, number: u32, spans: &[TextSpan]) -> Result<Option<String>> {
        if !spans.is_empty() {
            return Ok(Some(self.detector.lines(spans).join("\n")));
        }
        match self.doc.extract_text(&[number]) {
            Ok(text) => Ok(Some(text)),
            Err(e) if self.options.is_lenient() => {
                log::warn!("page {}: text extraction failed, reading as empty: {}", number, e);
                Ok(None)
            }
            Err(e) => Err(Error::TextExtract(format!("page {}: {}", number, e))),
        }
    }

    fn page_tables(&self, spans: &[TextSpan]) -> Vec<RawTable> {
        if !self.options.detect_tables {
            return Vec::new();
        }
        self.detector.detect(spans)
    }
}

impl PageSource for LopdfSource {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page(&self, number: u32) -> Result<Page> {
        let id = self.page_id(number)?;
        let spans = extract_spans(&self.doc, id).unwrap_or_else(|e| {
            log::warn!("page {}: content stream unreadable, using plain text: {}", number, e);
            Vec::new()
        });
        let text = self.page_text(number, &spans)?;
        let tables = self.page_tables(&spans);
        Ok(Page {
            number,
            text,
            tables,
        })
    }
}

fn unreadable(what: &str, err: Error) -> Error {
    match err {
        Error::SourceUnreadable(_) => err,
        other => Error::SourceUnreadable(format!("{}: {}", what, other)),
    }
}

/// Decode a PDF string without font information.
///
/// Tries UTF-16BE (with BOM), then UTF-8, then falls back to Latin-1.
pub fn decode_text_simple(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}
