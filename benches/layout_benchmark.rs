//! Benchmarks for the layout and serialization pipeline.
//!
//! Run with: cargo bench
//!
//! Pages are synthetic and held in memory, so the numbers exclude PDF
//! parsing.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pdf2office::{
    normalize, sniff_bytes, writer, Converter, MemorySource, Page, RawTable,
};

/// A source of `page_count` pages, each with a few lines and a small table.
fn create_source(page_count: u32) -> MemorySource {
    MemorySource::new((1..=page_count).map(|n| {
        let text = format!(
            "Section {n}\n\nThis paragraph describes the findings of section {n} in some detail.\n\
             Key figures\n   Revenue\tgrew   by {n} percent over the previous period.",
        );
        let table = RawTable::from_strings(
            (0..4).map(|r| (0..3).map(move |c| format!("cell {}-{}", r, c))),
        );
        Page::new(n).with_text(text).with_table(table)
    }))
}

/// Benchmark header sniffing.
fn bench_sniffing(c: &mut Criterion) {
    let header = b"%PDF-1.7\n%\xE2\xE3\xCF\xD3\n";
    let non_pdf = b"Not a PDF file at all, just random text content";

    c.bench_function("sniff_valid_pdf", |b| {
        b.iter(|| sniff_bytes(black_box(header)).unwrap());
    });

    c.bench_function("sniff_non_pdf", |b| {
        b.iter(|| sniff_bytes(black_box(non_pdf)).is_err());
    });
}

/// Benchmark text normalization.
fn bench_normalize(c: &mut Criterion) {
    let raw = "Line\u{0}one \t\t with   spacing\n\n\u{7}Line two\r\n".repeat(200);
    c.bench_function("normalize_page_text", |b| {
        b.iter(|| normalize(black_box(Some(raw.as_str()))));
    });
}

/// Benchmark model building and serialization at various sizes.
fn bench_layout(c: &mut Criterion) {
    let converter = Converter::default();
    let mut group = c.benchmark_group("layout");

    for page_count in [1, 10, 50] {
        let source = create_source(page_count);

        group.bench_function(format!("docx_{}_pages", page_count), |b| {
            b.iter(|| {
                let doc = converter.build_document(black_box(&source), "bench").unwrap();
                writer::to_bytes(&doc).unwrap()
            });
        });

        group.bench_function(format!("pptx_{}_pages", page_count), |b| {
            b.iter(|| {
                let deck = converter.build_deck(black_box(&source), "bench").unwrap();
                writer::to_bytes(&deck).unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_sniffing, bench_normalize, bench_layout);
criterion_main!(benches);
