//! Conversions of real PDF files generated with lopdf.

mod common;

use common::{
    at, build_pdf, build_pdf_from_operations, page_break_count, read_part, slide_count, write_pdf,
};
use lopdf::content::Operation;
use lopdf::Object;
use pdf2office::{
    convert_batch, to_docx, to_pptx, ConvertOptions, LopdfSource, OutputFormat, PageSource,
    ParseOptions,
};

fn report_pages() -> Vec<Vec<common::Placed<'static>>> {
    vec![
        vec![at("Quarterly Report", 72, 760), at("Revenue grew in every region.", 72, 730)],
        vec![
            at("Name", 72, 600),
            at("Score", 250, 600),
            at("Alice", 72, 585),
            at("91", 250, 585),
            at("Bob", 72, 570),
            at("78", 250, 570),
        ],
    ]
}

#[test]
fn test_source_reads_pages_and_tables() {
    let mut doc = build_pdf(&report_pages());
    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();

    let source = LopdfSource::from_bytes(&bytes, ParseOptions::default()).unwrap();
    assert_eq!(source.page_count(), 2);
    assert_eq!(source.version().to_string(), "PDF 1.5");

    let first = source.page(1).unwrap();
    assert!(first.text.as_deref().unwrap_or("").contains("Quarterly Report"));
    assert!(first.tables.is_empty());

    let second = source.page(2).unwrap();
    assert_eq!(second.tables.len(), 1);
    assert_eq!(second.tables[0].row_count(), 3);
    assert_eq!(second.tables[0].column_count(), 2);

    assert!(source.page(3).is_err());
}

/// One text object whose lines are moved with `Td`, `T*` and `Tm`.
fn single_text_object_page() -> Vec<Operation> {
    let show = |text: &str| Operation::new("Tj", vec![Object::string_literal(text)]);
    vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), 12.into()]),
        Operation::new("TL", vec![20.into()]),
        Operation::new("Td", vec![72.into(), 760.into()]),
        show("Quarterly Report"),
        Operation::new("Td", vec![0.into(), (-20).into()]),
        show("Revenue grew in every region."),
        Operation::new("T*", vec![]),
        show("Figures below cover the twelve months ending in December"),
        Operation::new(
            "Tm",
            vec![1.into(), 0.into(), 0.into(), 1.into(), 72.into(), 600.into()],
        ),
        show("Appendix"),
        Operation::new("ET", vec![]),
    ]
}

#[test]
fn test_lines_inside_one_text_object_stay_separate() {
    let mut doc = build_pdf_from_operations(vec![single_text_object_page()]);
    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();

    let source = LopdfSource::from_bytes(&bytes, ParseOptions::default()).unwrap();
    assert_eq!(
        source.page(1).unwrap().text.as_deref(),
        Some(
            "Quarterly Report\n\
             Revenue grew in every region.\n\
             Figures below cover the twelve months ending in December\n\
             Appendix"
        )
    );

    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("quarterly.pdf");
    doc.save(&input).unwrap();

    let slides = dir.path().join("quarterly.pptx");
    assert!(to_pptx(&input, &slides).success);
    let slide = read_part(&std::fs::read(&slides).unwrap(), "ppt/slides/slide1.xml");
    assert!(slide.contains("sz=\"2400\" b=\"1\" dirty=\"0\"><a:solidFill><a:srgbClr val=\"003366\"/></a:solidFill></a:rPr><a:t>Quarterly Report</a:t>"));
    assert!(slide.contains("sz=\"1600\" dirty=\"0\"><a:solidFill><a:srgbClr val=\"000000\"/></a:solidFill></a:rPr><a:t>Revenue grew in every region.</a:t>"));

    let document = dir.path().join("quarterly.docx");
    assert!(to_docx(&input, &document).success);
    let xml = read_part(&std::fs::read(&document).unwrap(), "word/document.xml");
    assert!(xml.contains("<w:pStyle w:val=\"Heading2\"/></w:pPr><w:r><w:t xml:space=\"preserve\">Quarterly Report<"));
    assert!(xml.contains("<w:p><w:r><w:t xml:space=\"preserve\">Figures below cover the twelve months ending in December<"));
}

#[test]
fn test_table_detection_can_be_disabled() {
    let mut doc = build_pdf(&report_pages());
    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();

    let source = LopdfSource::from_bytes(&bytes, ParseOptions::new().without_tables()).unwrap();
    assert!(source.page(2).unwrap().tables.is_empty());
}

#[test]
fn test_pdf_to_docx() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("report.pdf");
    write_pdf(&input, &report_pages());
    let output = dir.path().join("report.docx");

    let result = to_docx(&input, &output);
    assert!(result.success, "{}", result.message);
    assert_eq!(result.pages, 2);

    let bytes = std::fs::read(&output).unwrap();
    assert_eq!(page_break_count(&bytes), 1);

    let document = read_part(&bytes, "word/document.xml");
    assert!(document.contains(">Quarterly Report</w:t>"));
    assert!(document.contains(">Page 2</w:t>"));
    assert_eq!(document.matches("<w:tbl>").count(), 1);

    let core = read_part(&bytes, "docProps/core.xml");
    assert!(core.contains("<dc:title>report</dc:title>"));
}

#[test]
fn test_pdf_to_pptx() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("report.pdf");
    write_pdf(&input, &report_pages());
    let output = dir.path().join("slides.pptx");

    let result = to_pptx(&input, &output);
    assert!(result.success, "{}", result.message);
    assert_eq!(result.pages, 2);

    let bytes = std::fs::read(&output).unwrap();
    assert_eq!(slide_count(&bytes), 2);
    assert!(read_part(&bytes, "ppt/slides/slide1.xml").contains("<a:t>Page 1 / 2</a:t>"));
    assert!(read_part(&bytes, "ppt/slides/slide2.xml").contains("<p:graphicFrame>"));
}

#[test]
fn test_output_format_not_taken_from_extension() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("a.pdf");
    write_pdf(&input, &[vec![at("Hello", 72, 700)]]);
    let output = dir.path().join("a.bin");

    let result = pdf2office::Converter::default().convert(&input, &output, OutputFormat::Pptx);
    assert!(result.success);
    assert_eq!(slide_count(&std::fs::read(&output).unwrap()), 1);
}

#[test]
fn test_batch_continues_past_failures() {
    let input_dir = tempfile::tempdir().unwrap();
    let output_dir = tempfile::tempdir().unwrap();
    write_pdf(&input_dir.path().join("b.pdf"), &[vec![at("Second", 72, 700)]]);
    write_pdf(
        &input_dir.path().join("A.PDF"),
        &[vec![at("First", 72, 700)], vec![at("More", 72, 700)]],
    );
    std::fs::write(input_dir.path().join("broken.pdf"), b"not a pdf").unwrap();
    std::fs::write(input_dir.path().join("notes.txt"), b"ignored").unwrap();

    for parallel in [true, false] {
        let options = ConvertOptions::new().with_parallel(parallel);
        let entries = convert_batch(input_dir.path(), output_dir.path(), OutputFormat::Docx, options)
            .unwrap();

        let summary: Vec<_> = entries
            .iter()
            .map(|e| {
                (
                    e.file.file_name().unwrap().to_string_lossy().into_owned(),
                    e.result.success,
                    e.result.pages,
                )
            })
            .collect();
        assert_eq!(
            summary,
            vec![
                ("A.PDF".to_string(), true, 2),
                ("b.pdf".to_string(), true, 1),
                ("broken.pdf".to_string(), false, 0),
            ]
        );
        assert!(output_dir.path().join("A.docx").exists());
        assert!(output_dir.path().join("b.docx").exists());
        assert!(!output_dir.path().join("broken.docx").exists());
    }
}

#[test]
fn test_batch_creates_output_dir() {
    let input_dir = tempfile::tempdir().unwrap();
    let root = tempfile::tempdir().unwrap();
    let output_dir = root.path().join("nested").join("out");
    write_pdf(&input_dir.path().join("one.pdf"), &[vec![at("Only", 72, 700)]]);

    let entries =
        convert_batch(input_dir.path(), &output_dir, OutputFormat::Pptx, ConvertOptions::default())
            .unwrap();
    assert_eq!(entries.len(), 1);
    assert!(output_dir.join("one.pptx").exists());
}

// Needs a case-sensitive file system to hold both names.
#[cfg(target_os = "linux")]
#[test]
fn test_batch_never_writes_one_output_twice() {
    let input_dir = tempfile::tempdir().unwrap();
    write_pdf(&input_dir.path().join("Report.pdf"), &[vec![at("Short", 72, 700)]]);
    write_pdf(
        &input_dir.path().join("Report.PDF"),
        &[vec![at("Long", 72, 700)], vec![at("Longer", 72, 700)]],
    );

    for parallel in [true, false] {
        let output_dir = tempfile::tempdir().unwrap();
        let options = ConvertOptions::new().with_parallel(parallel);
        let entries = convert_batch(input_dir.path(), output_dir.path(), OutputFormat::Docx, options)
            .unwrap();

        assert_eq!(entries.len(), 2);
        assert!(entries[0].file.ends_with("Report.PDF"));
        assert!(entries[0].result.success);
        assert_eq!(entries[0].result.pages, 2);
        assert!(entries[1].file.ends_with("Report.pdf"));
        assert!(!entries[1].result.success);
        assert!(entries[1].result.output.is_none());
        assert!(entries[1].result.message.contains("Report.docx"));

        let written: Vec<_> = std::fs::read_dir(output_dir.path()).unwrap().collect();
        assert_eq!(written.len(), 1);
        let bytes = std::fs::read(output_dir.path().join("Report.docx")).unwrap();
        assert_eq!(page_break_count(&bytes), 1);
    }
}
