//! PresentationML (`.pptx`) serialization of a [`SlideDeckModel`].
//!
//! The package carries one slide master, one blank layout and one theme;
//! every slide uses the blank layout and places its own shapes.

use std::io::{Seek, Write};

use chrono::{DateTime, Utc};

use super::package::{root_relationships, PackageWriter, Relationships};
use super::xml::XmlWriter;
use crate::error::Result;
use crate::model::{
    Alignment, Rect, Shape, Slide, SlideDeckModel, SlideParagraph, TableShape, TextFrame,
    TextStyle,
};

const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
const TABLE_URI: &str = "http://schemas.openxmlformats.org/drawingml/2006/table";

const CT_PRESENTATION: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml";
const CT_SLIDE: &str = "application/vnd.openxmlformats-officedocument.presentationml.slide+xml";
const CT_LAYOUT: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml";
const CT_MASTER: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml";
const CT_THEME: &str = "application/vnd.openxmlformats-officedocument.theme+xml";
const CT_PRES_PROPS: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presProps+xml";

const REL_SLIDE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
const REL_LAYOUT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
const REL_MASTER: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";
const REL_THEME: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";
const REL_PRES_PROPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/presProps";

/// First id for slide master and layout entries (ECMA-376 requires >= 2^31).
const MASTER_ID: u32 = 2_147_483_648;
/// First slide id.
const FIRST_SLIDE_ID: u32 = 256;

/// Write `deck` as a `.pptx` package.
pub fn write_pptx<W: Write + Seek>(deck: &SlideDeckModel, writer: W, created: DateTime<Utc>) -> Result<W> {
    let mut package = PackageWriter::new(writer);

    package.add_rels("_rels/.rels", &root_relationships("ppt/presentation.xml"))?;
    package.add_properties(&deck.title, created)?;

    let mut rels = Relationships::new();
    let master_rel = rels.add(REL_MASTER, "slideMasters/slideMaster1.xml");
    let slide_rels: Vec<String> = (1..=deck.slides.len())
        .map(|n| rels.add(REL_SLIDE, format!("slides/slide{}.xml", n)))
        .collect();
    rels.add(REL_THEME, "theme/theme1.xml");
    rels.add(REL_PRES_PROPS, "presProps.xml");

    package.add_part(
        "ppt/presentation.xml",
        CT_PRESENTATION,
        &presentation_xml(deck, &master_rel, &slide_rels)?,
    )?;
    package.add_rels("ppt/_rels/presentation.xml.rels", &rels)?;
    package.add_part("ppt/presProps.xml", CT_PRES_PROPS, &pres_props_xml()?)?;

    let mut master_rels = Relationships::new();
    master_rels.add(REL_LAYOUT, "../slideLayouts/slideLayout1.xml");
    master_rels.add(REL_THEME, "../theme/theme1.xml");
    package.add_part("ppt/slideMasters/slideMaster1.xml", CT_MASTER, &master_xml()?)?;
    package.add_rels("ppt/slideMasters/_rels/slideMaster1.xml.rels", &master_rels)?;

    let mut layout_rels = Relationships::new();
    layout_rels.add(REL_MASTER, "../slideMasters/slideMaster1.xml");
    package.add_part("ppt/slideLayouts/slideLayout1.xml", CT_LAYOUT, &layout_xml()?)?;
    package.add_rels("ppt/slideLayouts/_rels/slideLayout1.xml.rels", &layout_rels)?;

    package.add_part("ppt/theme/theme1.xml", CT_THEME, &theme_xml()?)?;

    for (i, slide) in deck.slides.iter().enumerate() {
        let n = i + 1;
        let mut layout_link = Relationships::new();
        layout_link.add(REL_LAYOUT, "../slideLayouts/slideLayout1.xml");
        package.add_part(&format!("ppt/slides/slide{}.xml", n), CT_SLIDE, &slide_xml(slide)?)?;
        package.add_rels(&format!("ppt/slides/_rels/slide{}.xml.rels", n), &layout_link)?;
    }

    package.finish()
}

fn root_start(xml: &mut XmlWriter, name: &str) -> Result<()> {
    xml.start(name, &[("xmlns:a", NS_A), ("xmlns:r", NS_R), ("xmlns:p", NS_P)])
}

fn presentation_xml(deck: &SlideDeckModel, master_rel: &str, slide_rels: &[String]) -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    root_start(&mut xml, "p:presentation")?;

    xml.start("p:sldMasterIdLst", &[])?;
    xml.empty(
        "p:sldMasterId",
        &[("id", MASTER_ID.to_string().as_str()), ("r:id", master_rel)],
    )?;
    xml.end("p:sldMasterIdLst")?;

    if !slide_rels.is_empty() {
        xml.start("p:sldIdLst", &[])?;
        for (i, rel) in slide_rels.iter().enumerate() {
            let id = (FIRST_SLIDE_ID + i as u32).to_string();
            xml.empty("p:sldId", &[("id", id.as_str()), ("r:id", rel.as_str())])?;
        }
        xml.end("p:sldIdLst")?;
    }

    xml.empty(
        "p:sldSz",
        &[
            ("cx", deck.width.get().to_string().as_str()),
            ("cy", deck.height.get().to_string().as_str()),
        ],
    )?;
    xml.empty("p:notesSz", &[("cx", "6858000"), ("cy", "9144000")])?;
    xml.end("p:presentation")?;
    Ok(xml.finish())
}

fn pres_props_xml() -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    root_start(&mut xml, "p:presentationPr")?;
    xml.end("p:presentationPr")?;
    Ok(xml.finish())
}

/// `p:nvGrpSpPr` + `p:grpSpPr` that open every shape tree.
fn group_header(xml: &mut XmlWriter) -> Result<()> {
    xml.start("p:nvGrpSpPr", &[])?;
    xml.empty("p:cNvPr", &[("id", "1"), ("name", "")])?;
    xml.empty("p:cNvGrpSpPr", &[])?;
    xml.empty("p:nvPr", &[])?;
    xml.end("p:nvGrpSpPr")?;

    xml.start("p:grpSpPr", &[])?;
    xml.start("a:xfrm", &[])?;
    for (name, a, b) in [("a:off", "x", "y"), ("a:ext", "cx", "cy"), ("a:chOff", "x", "y"), ("a:chExt", "cx", "cy")] {
        xml.empty(name, &[(a, "0"), (b, "0")])?;
    }
    xml.end("a:xfrm")?;
    xml.end("p:grpSpPr")
}

fn master_xml() -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    root_start(&mut xml, "p:sldMaster")?;

    xml.start("p:cSld", &[])?;
    xml.start("p:bg", &[])?;
    xml.start("p:bgRef", &[("idx", "1001")])?;
    xml.empty("a:schemeClr", &[("val", "bg1")])?;
    xml.end("p:bgRef")?;
    xml.end("p:bg")?;
    xml.start("p:spTree", &[])?;
    group_header(&mut xml)?;
    xml.end("p:spTree")?;
    xml.end("p:cSld")?;

    xml.empty(
        "p:clrMap",
        &[
            ("bg1", "lt1"),
            ("tx1", "dk1"),
            ("bg2", "lt2"),
            ("tx2", "dk2"),
            ("accent1", "accent1"),
            ("accent2", "accent2"),
            ("accent3", "accent3"),
            ("accent4", "accent4"),
            ("accent5", "accent5"),
            ("accent6", "accent6"),
            ("hlink", "hlink"),
            ("folHlink", "folHlink"),
        ],
    )?;

    xml.start("p:sldLayoutIdLst", &[])?;
    xml.empty(
        "p:sldLayoutId",
        &[("id", (MASTER_ID + 1).to_string().as_str()), ("r:id", "rId1")],
    )?;
    xml.end("p:sldLayoutIdLst")?;

    xml.end("p:sldMaster")?;
    Ok(xml.finish())
}

fn layout_xml() -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.start(
        "p:sldLayout",
        &[
            ("xmlns:a", NS_A),
            ("xmlns:r", NS_R),
            ("xmlns:p", NS_P),
            ("type", "blank"),
            ("preserve", "1"),
        ],
    )?;
    xml.start("p:cSld", &[("name", "Blank")])?;
    xml.start("p:spTree", &[])?;
    group_header(&mut xml)?;
    xml.end("p:spTree")?;
    xml.end("p:cSld")?;
    xml.start("p:clrMapOvr", &[])?;
    xml.empty("a:masterClrMapping", &[])?;
    xml.end("p:clrMapOvr")?;
    xml.end("p:sldLayout")?;
    Ok(xml.finish())
}

fn theme_xml() -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.start("a:theme", &[("xmlns:a", NS_A), ("name", "Office Theme")])?;
    xml.start("a:themeElements", &[])?;

    xml.start("a:clrScheme", &[("name", "Office")])?;
    for (slot, system, value) in [
        ("a:dk1", Some("windowText"), "000000"),
        ("a:lt1", Some("window"), "FFFFFF"),
        ("a:dk2", None, "44546A"),
        ("a:lt2", None, "E7E6E6"),
        ("a:accent1", None, "4472C4"),
        ("a:accent2", None, "ED7D31"),
        ("a:accent3", None, "A5A5A5"),
        ("a:accent4", None, "FFC000"),
        ("a:accent5", None, "5B9BD5"),
        ("a:accent6", None, "70AD47"),
        ("a:hlink", None, "0563C1"),
        ("a:folHlink", None, "954F72"),
    ] {
        xml.start(slot, &[])?;
        match system {
            Some(name) => xml.empty("a:sysClr", &[("val", name), ("lastClr", value)])?,
            None => xml.empty("a:srgbClr", &[("val", value)])?,
        }
        xml.end(slot)?;
    }
    xml.end("a:clrScheme")?;

    xml.start("a:fontScheme", &[("name", "Office")])?;
    for (slot, face) in [("a:majorFont", "Calibri Light"), ("a:minorFont", "Calibri")] {
        xml.start(slot, &[])?;
        xml.empty("a:latin", &[("typeface", face)])?;
        xml.empty("a:ea", &[("typeface", "")])?;
        xml.empty("a:cs", &[("typeface", "")])?;
        xml.end(slot)?;
    }
    xml.end("a:fontScheme")?;

    xml.start("a:fmtScheme", &[("name", "Office")])?;
    for list in ["a:fillStyleLst", "a:lnStyleLst", "a:effectStyleLst", "a:bgFillStyleLst"] {
        xml.start(list, &[])?;
        for _ in 0..3 {
            match list {
                "a:lnStyleLst" => {
                    xml.start("a:ln", &[("w", "6350")])?;
                    placeholder_fill(&mut xml)?;
                    xml.end("a:ln")?;
                }
                "a:effectStyleLst" => {
                    xml.start("a:effectStyle", &[])?;
                    xml.empty("a:effectLst", &[])?;
                    xml.end("a:effectStyle")?;
                }
                _ => placeholder_fill(&mut xml)?,
            }
        }
        xml.end(list)?;
    }
    xml.end("a:fmtScheme")?;

    xml.end("a:themeElements")?;
    xml.end("a:theme")?;
    Ok(xml.finish())
}

fn placeholder_fill(xml: &mut XmlWriter) -> Result<()> {
    xml.start("a:solidFill", &[])?;
    xml.empty("a:schemeClr", &[("val", "phClr")])?;
    xml.end("a:solidFill")
}

pub(crate) fn slide_xml(slide: &Slide) -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    root_start(&mut xml, "p:sld")?;
    xml.start("p:cSld", &[])?;
    xml.start("p:spTree", &[])?;
    group_header(&mut xml)?;

    for (i, shape) in slide.shapes.iter().enumerate() {
        let id = i as u32 + 2;
        match shape {
            Shape::Caption(frame) | Shape::Text(frame) => write_text_box(&mut xml, id, frame)?,
            Shape::Table(table) => write_table(&mut xml, id, table)?,
        }
    }

    xml.end("p:spTree")?;
    xml.end("p:cSld")?;
    xml.start("p:clrMapOvr", &[])?;
    xml.empty("a:masterClrMapping", &[])?;
    xml.end("p:clrMapOvr")?;
    xml.end("p:sld")?;
    Ok(xml.finish())
}

fn write_xfrm(xml: &mut XmlWriter, name: &str, bounds: &Rect) -> Result<()> {
    xml.start(name, &[])?;
    xml.empty(
        "a:off",
        &[
            ("x", bounds.x.get().to_string().as_str()),
            ("y", bounds.y.get().to_string().as_str()),
        ],
    )?;
    xml.empty(
        "a:ext",
        &[
            ("cx", bounds.width.get().to_string().as_str()),
            ("cy", bounds.height.get().to_string().as_str()),
        ],
    )?;
    xml.end(name)
}

fn write_text_box(xml: &mut XmlWriter, id: u32, frame: &TextFrame) -> Result<()> {
    let name = format!("TextBox {}", id - 1);
    xml.start("p:sp", &[])?;

    xml.start("p:nvSpPr", &[])?;
    xml.empty("p:cNvPr", &[("id", id.to_string().as_str()), ("name", name.as_str())])?;
    xml.empty("p:cNvSpPr", &[("txBox", "1")])?;
    xml.empty("p:nvPr", &[])?;
    xml.end("p:nvSpPr")?;

    xml.start("p:spPr", &[])?;
    write_xfrm(xml, "a:xfrm", &frame.bounds)?;
    xml.start("a:prstGeom", &[("prst", "rect")])?;
    xml.empty("a:avLst", &[])?;
    xml.end("a:prstGeom")?;
    xml.empty("a:noFill", &[])?;
    xml.end("p:spPr")?;

    xml.start("p:txBody", &[])?;
    let wrap = if frame.word_wrap { "square" } else { "none" };
    xml.empty("a:bodyPr", &[("wrap", wrap), ("rtlCol", "0")])?;
    xml.empty("a:lstStyle", &[])?;
    for paragraph in &frame.paragraphs {
        write_paragraph(xml, paragraph)?;
    }
    xml.end("p:txBody")?;

    xml.end("p:sp")
}

fn write_paragraph(xml: &mut XmlWriter, paragraph: &SlideParagraph) -> Result<()> {
    xml.start("a:p", &[])?;
    if let Some(style) = &paragraph.style {
        write_paragraph_props(xml, style)?;
    }
    if paragraph.text.is_empty() {
        xml.empty("a:endParaRPr", &[("lang", "en-US"), ("dirty", "0")])?;
    } else {
        write_runs(xml, &paragraph.text, paragraph.style.as_ref())?;
    }
    xml.end("a:p")
}

fn write_paragraph_props(xml: &mut XmlWriter, style: &TextStyle) -> Result<()> {
    let centered = style.alignment == Alignment::Center;
    if !centered && style.space_before_pt.is_none() {
        return Ok(());
    }
    let attrs: &[(&str, &str)] = if centered { &[("algn", "ctr")] } else { &[] };
    match style.space_before_pt {
        Some(pt) => {
            xml.start("a:pPr", attrs)?;
            xml.start("a:spcBef", &[])?;
            xml.empty("a:spcPts", &[("val", (pt * 100).to_string().as_str())])?;
            xml.end("a:spcBef")?;
            xml.end("a:pPr")
        }
        None => xml.empty("a:pPr", attrs),
    }
}

/// Run properties: `sz` in hundredths of a point, `b`, then a solid fill.
fn write_run_props(xml: &mut XmlWriter, name: &str, style: Option<&TextStyle>) -> Result<()> {
    let Some(style) = style else {
        return xml.empty(name, &[("lang", "en-US"), ("dirty", "0")]);
    };
    let size = (style.size_pt * 100).to_string();
    let mut attrs = vec![("lang", "en-US"), ("sz", size.as_str())];
    if style.bold {
        attrs.push(("b", "1"));
    }
    attrs.push(("dirty", "0"));

    match style.color {
        Some(color) => {
            xml.start(name, &attrs)?;
            xml.start("a:solidFill", &[])?;
            xml.empty("a:srgbClr", &[("val", color.hex().as_str())])?;
            xml.end("a:solidFill")?;
            xml.end(name)
        }
        None => xml.empty(name, &attrs),
    }
}

/// Runs separated by `<a:br>` for each embedded newline.
fn write_runs(xml: &mut XmlWriter, text: &str, style: Option<&TextStyle>) -> Result<()> {
    for (i, part) in text.split('\n').enumerate() {
        if i > 0 {
            xml.start("a:br", &[])?;
            write_run_props(xml, "a:rPr", style)?;
            xml.end("a:br")?;
        }
        xml.start("a:r", &[])?;
        write_run_props(xml, "a:rPr", style)?;
        xml.leaf("a:t", &[], part)?;
        xml.end("a:r")?;
    }
    Ok(())
}

fn write_table(xml: &mut XmlWriter, id: u32, table: &TableShape) -> Result<()> {
    let name = format!("Table {}", id - 1);
    xml.start("p:graphicFrame", &[])?;

    xml.start("p:nvGraphicFramePr", &[])?;
    xml.empty("p:cNvPr", &[("id", id.to_string().as_str()), ("name", name.as_str())])?;
    xml.start("p:cNvGraphicFramePr", &[])?;
    xml.empty("a:graphicFrameLocks", &[("noGrp", "1")])?;
    xml.end("p:cNvGraphicFramePr")?;
    xml.empty("p:nvPr", &[])?;
    xml.end("p:nvGraphicFramePr")?;

    write_xfrm(xml, "p:xfrm", &table.bounds)?;

    xml.start("a:graphic", &[])?;
    xml.start("a:graphicData", &[("uri", TABLE_URI)])?;
    xml.start("a:tbl", &[])?;
    xml.empty("a:tblPr", &[("firstRow", "1"), ("bandRow", "1")])?;

    xml.start("a:tblGrid", &[])?;
    for width in &table.column_widths {
        xml.empty("a:gridCol", &[("w", width.get().to_string().as_str())])?;
    }
    xml.end("a:tblGrid")?;

    let row_height = table.row_height().get().to_string();
    for (r, row) in table.grid.rows().iter().enumerate() {
        let style = if r == 0 {
            &table.header_style
        } else {
            &table.body_style
        };
        xml.start("a:tr", &[("h", row_height.as_str())])?;
        for cell in row {
            xml.start("a:tc", &[])?;
            xml.start("a:txBody", &[])?;
            xml.empty("a:bodyPr", &[])?;
            xml.empty("a:lstStyle", &[])?;
            xml.start("a:p", &[])?;
            if cell.is_empty() {
                write_run_props(xml, "a:endParaRPr", Some(style))?;
            } else {
                write_runs(xml, cell, Some(style))?;
            }
            xml.end("a:p")?;
            xml.end("a:txBody")?;
            xml.empty("a:tcPr", &[])?;
            xml.end("a:tc")?;
        }
        xml.end("a:tr")?;
    }

    xml.end("a:tbl")?;
    xml.end("a:graphicData")?;
    xml.end("a:graphic")?;
    xml.end("p:graphicFrame")
}
