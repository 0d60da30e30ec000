//! WordprocessingML (`.docx`) serialization of a [`DocumentModel`].

use std::io::{Seek, Write};

use chrono::{DateTime, Utc};

use super::package::{root_relationships, PackageWriter, Relationships};
use super::xml::XmlWriter;
use crate::error::Result;
use crate::model::{Alignment, Block, DocumentModel, Grid};

const NS_W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

const CT_DOCUMENT: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";
const CT_STYLES: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml";
const REL_STYLES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";

/// Letter page with one-inch margins, in twentieths of a point.
const PAGE_WIDTH: u32 = 12240;
const PAGE_HEIGHT: u32 = 15840;
const MARGIN: u32 = 1440;
const TEXT_WIDTH: u32 = PAGE_WIDTH - 2 * MARGIN;

/// Write `doc` as a `.docx` package.
pub fn write_docx<W: Write + Seek>(doc: &DocumentModel, writer: W, created: DateTime<Utc>) -> Result<W> {
    let mut package = PackageWriter::new(writer);

    package.add_rels("_rels/.rels", &root_relationships("word/document.xml"))?;
    package.add_properties(&doc.title, created)?;
    package.add_part("word/document.xml", CT_DOCUMENT, &document_xml(doc)?)?;
    package.add_part("word/styles.xml", CT_STYLES, &styles_xml()?)?;

    let mut rels = Relationships::new();
    rels.add(REL_STYLES, "styles.xml");
    package.add_rels("word/_rels/document.xml.rels", &rels)?;

    package.finish()
}

fn style_id(level: u8) -> String {
    match level {
        0 => "Title".to_string(),
        n => format!("Heading{}", n),
    }
}

pub(crate) fn document_xml(doc: &DocumentModel) -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.start("w:document", &[("xmlns:w", NS_W), ("xmlns:r", NS_R)])?;
    xml.start("w:body", &[])?;

    for block in &doc.blocks {
        match block {
            Block::Heading {
                text,
                level,
                alignment,
            } => {
                xml.start("w:p", &[])?;
                xml.start("w:pPr", &[])?;
                xml.empty("w:pStyle", &[("w:val", style_id(*level).as_str())])?;
                if *alignment == Alignment::Center {
                    xml.empty("w:jc", &[("w:val", "center")])?;
                }
                xml.end("w:pPr")?;
                write_run(&mut xml, text, false)?;
                xml.end("w:p")?;
            }
            Block::Paragraph(text) => {
                xml.start("w:p", &[])?;
                write_run(&mut xml, text, false)?;
                xml.end("w:p")?;
            }
            Block::Table(grid) => {
                write_table(&mut xml, grid)?;
                // Keeps consecutive tables from merging into one.
                xml.empty("w:p", &[])?;
            }
            Block::PageBreak => {
                xml.start("w:p", &[])?;
                xml.start("w:r", &[])?;
                xml.empty("w:br", &[("w:type", "page")])?;
                xml.end("w:r")?;
                xml.end("w:p")?;
            }
        }
    }

    xml.start("w:sectPr", &[])?;
    xml.empty(
        "w:pgSz",
        &[
            ("w:w", PAGE_WIDTH.to_string().as_str()),
            ("w:h", PAGE_HEIGHT.to_string().as_str()),
        ],
    )?;
    let margin = MARGIN.to_string();
    xml.empty(
        "w:pgMar",
        &[
            ("w:top", margin.as_str()),
            ("w:right", margin.as_str()),
            ("w:bottom", margin.as_str()),
            ("w:left", margin.as_str()),
            ("w:header", "720"),
            ("w:footer", "720"),
            ("w:gutter", "0"),
        ],
    )?;
    xml.end("w:sectPr")?;

    xml.end("w:body")?;
    xml.end("w:document")?;
    Ok(xml.finish())
}

/// One run; embedded newlines become `<w:br/>`.
fn write_run(xml: &mut XmlWriter, text: &str, bold: bool) -> Result<()> {
    xml.start("w:r", &[])?;
    if bold {
        xml.start("w:rPr", &[])?;
        xml.empty("w:b", &[])?;
        xml.end("w:rPr")?;
    }
    for (i, part) in text.split('\n').enumerate() {
        if i > 0 {
            xml.empty("w:br", &[])?;
        }
        xml.leaf("w:t", &[("xml:space", "preserve")], part)?;
    }
    xml.end("w:r")
}

fn write_table(xml: &mut XmlWriter, grid: &Grid) -> Result<()> {
    let col_width = (TEXT_WIDTH / grid.column_count().max(1) as u32).to_string();

    xml.start("w:tbl", &[])?;
    xml.start("w:tblPr", &[])?;
    xml.empty("w:tblStyle", &[("w:val", "TableGrid")])?;
    xml.empty("w:tblW", &[("w:w", "0"), ("w:type", "auto")])?;
    xml.end("w:tblPr")?;

    xml.start("w:tblGrid", &[])?;
    for _ in 0..grid.column_count() {
        xml.empty("w:gridCol", &[("w:w", col_width.as_str())])?;
    }
    xml.end("w:tblGrid")?;

    for (r, row) in grid.rows().iter().enumerate() {
        let header = r == 0;
        xml.start("w:tr", &[])?;
        if header {
            xml.start("w:trPr", &[])?;
            xml.empty("w:tblHeader", &[])?;
            xml.end("w:trPr")?;
        }
        for cell in row {
            xml.start("w:tc", &[])?;
            xml.start("w:tcPr", &[])?;
            xml.empty("w:tcW", &[("w:w", col_width.as_str()), ("w:type", "dxa")])?;
            xml.end("w:tcPr")?;
            xml.start("w:p", &[])?;
            if !cell.is_empty() {
                write_run(xml, cell, header)?;
            }
            xml.end("w:p")?;
            xml.end("w:tc")?;
        }
        xml.end("w:tr")?;
    }

    xml.end("w:tbl")
}

/// Paragraph styles used by the document: Normal, Title, Heading1-9 and TableGrid.
pub(crate) fn styles_xml() -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.start("w:styles", &[("xmlns:w", NS_W)])?;

    xml.start("w:docDefaults", &[])?;
    xml.start("w:rPrDefault", &[])?;
    xml.start("w:rPr", &[])?;
    xml.empty(
        "w:rFonts",
        &[
            ("w:ascii", "Calibri"),
            ("w:hAnsi", "Calibri"),
            ("w:eastAsia", "SimSun"),
            ("w:cs", "Calibri"),
        ],
    )?;
    xml.empty("w:sz", &[("w:val", "22")])?;
    xml.end("w:rPr")?;
    xml.end("w:rPrDefault")?;
    xml.end("w:docDefaults")?;

    xml.start(
        "w:style",
        &[("w:type", "paragraph"), ("w:default", "1"), ("w:styleId", "Normal")],
    )?;
    xml.empty("w:name", &[("w:val", "Normal")])?;
    xml.start("w:pPr", &[])?;
    xml.empty("w:spacing", &[("w:after", "120")])?;
    xml.end("w:pPr")?;
    xml.end("w:style")?;

    paragraph_style(&mut xml, "Title", "Title", 56, "17365D", 0)?;
    for level in 1..=9u8 {
        // 16pt, 13pt, 12pt, then 11pt for the deeper levels
        let half_points = match level {
            1 => 32,
            2 => 26,
            3 => 24,
            _ => 22,
        };
        let id = style_id(level);
        paragraph_style(
            &mut xml,
            &id,
            &format!("heading {}", level),
            half_points,
            "2E74B5",
            level - 1,
        )?;
    }

    xml.start("w:style", &[("w:type", "table"), ("w:styleId", "TableGrid")])?;
    xml.empty("w:name", &[("w:val", "Table Grid")])?;
    xml.start("w:tblPr", &[])?;
    xml.start("w:tblBorders", &[])?;
    for edge in ["top", "left", "bottom", "right", "insideH", "insideV"] {
        xml.empty(
            &format!("w:{}", edge),
            &[
                ("w:val", "single"),
                ("w:sz", "4"),
                ("w:space", "0"),
                ("w:color", "auto"),
            ],
        )?;
    }
    xml.end("w:tblBorders")?;
    xml.end("w:tblPr")?;
    xml.end("w:style")?;

    xml.end("w:styles")?;
    Ok(xml.finish())
}

fn paragraph_style(
    xml: &mut XmlWriter,
    id: &str,
    name: &str,
    half_points: u32,
    color: &str,
    outline_level: u8,
) -> Result<()> {
    xml.start("w:style", &[("w:type", "paragraph"), ("w:styleId", id)])?;
    xml.empty("w:name", &[("w:val", name)])?;
    xml.empty("w:basedOn", &[("w:val", "Normal")])?;
    xml.empty("w:next", &[("w:val", "Normal")])?;
    xml.empty("w:qFormat", &[])?;
    xml.start("w:pPr", &[])?;
    xml.empty("w:keepNext", &[])?;
    xml.empty("w:spacing", &[("w:before", "240"), ("w:after", "120")])?;
    if id != "Title" {
        xml.empty("w:outlineLvl", &[("w:val", outline_level.to_string().as_str())])?;
    }
    xml.end("w:pPr")?;
    xml.start("w:rPr", &[])?;
    xml.empty("w:b", &[])?;
    xml.empty("w:color", &[("w:val", color)])?;
    xml.empty("w:sz", &[("w:val", half_points.to_string().as_str())])?;
    xml.end("w:rPr")?;
    xml.end("w:style")
}
