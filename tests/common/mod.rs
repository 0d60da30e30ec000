//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::io::{Cursor, Read};
use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// Text placed at an absolute position on a page.
pub struct Placed<'a> {
    pub text: &'a str,
    pub x: i64,
    pub y: i64,
}

pub fn at(text: &str, x: i64, y: i64) -> Placed<'_> {
    Placed { text, x, y }
}

/// Build a PDF with one page per entry, each page drawing its spans with
/// 12pt Helvetica, one text object per span.
pub fn build_pdf(pages: &[Vec<Placed<'_>>]) -> Document {
    let contents = pages
        .iter()
        .map(|spans| {
            spans
                .iter()
                .flat_map(|span| {
                    [
                        Operation::new("BT", vec![]),
                        Operation::new("Tf", vec!["F1".into(), 12.into()]),
                        Operation::new(
                            "Tm",
                            vec![
                                1.into(),
                                0.into(),
                                0.into(),
                                1.into(),
                                span.x.into(),
                                span.y.into(),
                            ],
                        ),
                        Operation::new("Tj", vec![Object::string_literal(span.text)]),
                        Operation::new("ET", vec![]),
                    ]
                })
                .collect()
        })
        .collect();
    build_pdf_from_operations(contents)
}

/// Build a PDF with one page per entry of raw content-stream operations.
/// Font `F1` is Helvetica.
pub fn build_pdf_from_operations(pages: Vec<Vec<Operation>>) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for operations in pages {
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

/// Write a generated PDF to `path`.
pub fn write_pdf(path: &Path, pages: &[Vec<Placed<'_>>]) {
    let mut doc = build_pdf(pages);
    doc.save(path).unwrap();
}

/// Read one part of an Office package as text.
pub fn read_part(package: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(package)).unwrap();
    let mut out = String::new();
    archive
        .by_name(name)
        .unwrap_or_else(|_| panic!("missing part {}", name))
        .read_to_string(&mut out)
        .unwrap();
    out
}

/// Number of `ppt/slides/slideN.xml` parts.
pub fn slide_count(package: &[u8]) -> usize {
    let archive = zip::ZipArchive::new(Cursor::new(package)).unwrap();
    archive
        .file_names()
        .filter(|name| name.starts_with("ppt/slides/slide") && name.ends_with(".xml"))
        .count()
}

/// Number of explicit page breaks in a `.docx`.
pub fn page_break_count(package: &[u8]) -> usize {
    read_part(package, "word/document.xml")
        .matches("<w:br w:type=\"page\"/>")
        .count()
}
