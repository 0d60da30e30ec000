//! OPC (Open Packaging Conventions) zip container shared by both formats.

use std::io::{Seek, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tempfile::NamedTempFile;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::xml::XmlWriter;
use crate::error::Result;

pub(crate) const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
pub(crate) const REL_CORE_PROPERTIES: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
pub(crate) const REL_EXTENDED_PROPERTIES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";

const CT_RELATIONSHIPS: &str = "application/vnd.openxmlformats-package.relationships+xml";
const CT_CORE: &str = "application/vnd.openxmlformats-package.core-properties+xml";
const CT_EXTENDED: &str = "application/vnd.openxmlformats-officedocument.extended-properties+xml";

/// Relationship list of one part (`*.rels`).
#[derive(Debug, Default)]
pub(crate) struct Relationships {
    entries: Vec<(String, &'static str, String)>,
}

impl Relationships {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a relationship and return its id (`rId1`, `rId2`, ...).
    pub fn add(&mut self, rel_type: &'static str, target: impl Into<String>) -> String {
        let id = format!("rId{}", self.entries.len() + 1);
        self.entries.push((id.clone(), rel_type, target.into()));
        id
    }

    pub fn to_xml(&self) -> Result<Vec<u8>> {
        let mut xml = XmlWriter::new()?;
        xml.start(
            "Relationships",
            &[(
                "xmlns",
                "http://schemas.openxmlformats.org/package/2006/relationships",
            )],
        )?;
        for (id, rel_type, target) in &self.entries {
            xml.empty(
                "Relationship",
                &[("Id", id.as_str()), ("Type", *rel_type), ("Target", target.as_str())],
            )?;
        }
        xml.end("Relationships")?;
        Ok(xml.finish())
    }
}

/// Streams parts into a zip archive and writes `[Content_Types].xml` last.
pub(crate) struct PackageWriter<W: Write + Seek> {
    zip: ZipWriter<W>,
    overrides: Vec<(String, &'static str)>,
}

impl<W: Write + Seek> PackageWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            zip: ZipWriter::new(writer),
            overrides: Vec::new(),
        }
    }

    /// Add a part. `content_type` is recorded as an override unless the
    /// part is a relationship list.
    pub fn add_part(&mut self, name: &str, content_type: &'static str, data: &[u8]) -> Result<()> {
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
        self.zip.start_file(name, options)?;
        self.zip.write_all(data)?;
        if content_type != CT_RELATIONSHIPS {
            self.overrides.push((format!("/{}", name), content_type));
        }
        Ok(())
    }

    pub fn add_rels(&mut self, name: &str, rels: &Relationships) -> Result<()> {
        self.add_part(name, CT_RELATIONSHIPS, &rels.to_xml()?)
    }

    /// Add `docProps/core.xml` and `docProps/app.xml`.
    pub fn add_properties(&mut self, title: &str, created: DateTime<Utc>) -> Result<()> {
        let core = core_properties(title, created)?;
        self.add_part("docProps/core.xml", CT_CORE, &core)?;
        let app = app_properties()?;
        self.add_part("docProps/app.xml", CT_EXTENDED, &app)
    }

    pub fn finish(mut self) -> Result<W> {
        let types = self.content_types()?;
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
        self.zip.start_file("[Content_Types].xml", options)?;
        self.zip.write_all(&types)?;
        Ok(self.zip.finish()?)
    }

    fn content_types(&self) -> Result<Vec<u8>> {
        let mut xml = XmlWriter::new()?;
        xml.start(
            "Types",
            &[(
                "xmlns",
                "http://schemas.openxmlformats.org/package/2006/content-types",
            )],
        )?;
        xml.empty(
            "Default",
            &[("Extension", "rels"), ("ContentType", CT_RELATIONSHIPS)],
        )?;
        xml.empty(
            "Default",
            &[("Extension", "xml"), ("ContentType", "application/xml")],
        )?;
        for (part, content_type) in &self.overrides {
            xml.empty(
                "Override",
                &[("PartName", part.as_str()), ("ContentType", *content_type)],
            )?;
        }
        xml.end("Types")?;
        Ok(xml.finish())
    }
}

/// Package-level relationships pointing at the main part and properties.
pub(crate) fn root_relationships(main_part: &str) -> Relationships {
    let mut rels = Relationships::new();
    rels.add(REL_OFFICE_DOCUMENT, main_part);
    rels.add(REL_CORE_PROPERTIES, "docProps/core.xml");
    rels.add(REL_EXTENDED_PROPERTIES, "docProps/app.xml");
    rels
}

fn core_properties(title: &str, created: DateTime<Utc>) -> Result<Vec<u8>> {
    let stamp = created.format("%Y-%m-%dT%H:%M:%SZ").to_string();
    let mut xml = XmlWriter::new()?;
    xml.start(
        "cp:coreProperties",
        &[
            (
                "xmlns:cp",
                "http://schemas.openxmlformats.org/package/2006/metadata/core-properties",
            ),
            ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
            ("xmlns:dcterms", "http://purl.org/dc/terms/"),
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
        ],
    )?;
    xml.leaf("dc:title", &[], title)?;
    xml.leaf("dc:creator", &[], env!("CARGO_PKG_NAME"))?;
    xml.leaf("dcterms:created", &[("xsi:type", "dcterms:W3CDTF")], &stamp)?;
    xml.leaf("dcterms:modified", &[("xsi:type", "dcterms:W3CDTF")], &stamp)?;
    xml.end("cp:coreProperties")?;
    Ok(xml.finish())
}

fn app_properties() -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.start(
        "Properties",
        &[(
            "xmlns",
            "http://schemas.openxmlformats.org/officeDocument/2006/extended-properties",
        )],
    )?;
    xml.leaf(
        "Application",
        &[],
        concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION")),
    )?;
    xml.end("Properties")?;
    Ok(xml.finish())
}

/// Write a file through a temporary sibling and move it into place.
///
/// The staging file lives in `temp_dir` when given, otherwise next to
/// `output`. If `write` fails the staging file is removed and `output` is
/// left untouched.
pub(crate) fn write_atomic<F>(output: &Path, temp_dir: Option<&Path>, write: F) -> Result<()>
where
    F: FnOnce(&mut std::fs::File) -> Result<()>,
{
    let dir = match temp_dir {
        Some(dir) => dir.to_path_buf(),
        None => staging_dir(output),
    };
    let mut staged = NamedTempFile::new_in(&dir)?;
    write(staged.as_file_mut())?;
    staged.as_file_mut().flush()?;
    staged.persist(output)?;
    Ok(())
}

fn staging_dir(output: &Path) -> PathBuf {
    match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
