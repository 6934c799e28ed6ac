//! Benchmarks for pagemark parsing performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks parse synthetic documents of increasing size.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pagemark::{PageBreakOptions, ParseOptions, RenderOptions};

/// Creates a synthetic markdown document with the given number of sections.
fn create_markdown(sections: usize) -> String {
    let mut text = String::from("# Benchmark Report\n\n");

    for i in 0..sections {
        text.push_str(&format!("## Section {}\n", i + 1));
        text.push_str("Paragraph with **bold** and *italic* text for measurement.\n");
        text.push_str("A second paragraph that is plain.\n\n");
        for j in 0..5 {
            text.push_str(&format!("- bullet {} of section {}\n", j + 1, i + 1));
        }
        text.push('\n');
        for j in 0..3 {
            text.push_str(&format!("{}. numbered step {}\n", j + 1, j + 1));
        }
        text.push_str(&format!("### Details {}\nClosing notes.\n\n", i + 1));
    }

    text
}

/// Creates a synthetic plain-text document with the given number of sections.
fn create_plain_text(sections: usize) -> String {
    let mut text = String::from("Benchmark Report\n\n");

    for i in 0..sections {
        text.push_str(&format!("{}. Project Area\n", i + 1));
        text.push_str("Some body text that ends with a period.\n");
        text.push_str("  indented entry without a colon\n");
        text.push_str("Summary Of Findings\n\n");
    }

    text
}

/// Benchmark format detection.
fn bench_format_detection(c: &mut Criterion) {
    let markdown = create_markdown(10);
    let plain = create_plain_text(10);

    c.bench_function("detect_markdown", |b| {
        b.iter(|| pagemark::detect_format(black_box(&markdown)));
    });

    c.bench_function("detect_plain_text", |b| {
        b.iter(|| pagemark::detect_format(black_box(&plain)));
    });
}

/// Benchmark parsing at various sizes.
fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");
    let options = PageBreakOptions::default();

    for sections in [10, 100, 1000].iter() {
        let markdown = create_markdown(*sections);
        let plain = create_plain_text(*sections);

        group.bench_function(format!("markdown_{}_sections", sections), |b| {
            b.iter(|| pagemark::parse_markdown(black_box(&markdown), &options));
        });

        group.bench_function(format!("plain_text_{}_sections", sections), |b| {
            b.iter(|| pagemark::parse_plain_text(black_box(&plain), &options));
        });
    }

    group.finish();
}

/// Benchmark HTML rendering of a parsed stream.
fn bench_rendering(c: &mut Criterion) {
    let stream = pagemark::parse(&create_markdown(100), &ParseOptions::default());
    let options = RenderOptions::default().with_standalone(true);

    c.bench_function("render_html_100_sections", |b| {
        b.iter(|| pagemark::render::to_html(black_box(&stream), &options));
    });
}

/// Benchmark builder pattern overhead.
fn bench_builder_creation(c: &mut Criterion) {
    c.bench_function("builder_creation", |b| {
        b.iter(|| {
            let _builder = pagemark::Pagemark::new()
                .markdown()
                .with_page_capacity(50)
                .standalone();
        });
    });
}

criterion_group!(
    benches,
    bench_format_detection,
    bench_parsing,
    bench_rendering,
    bench_builder_creation,
);
criterion_main!(benches);
