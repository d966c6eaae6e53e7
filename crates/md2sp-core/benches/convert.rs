//! Benchmarks for markdown to SharePoint HTML conversion.

#![allow(clippy::format_push_string)] // Benchmark setup code, performance not critical

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use md2sp_core::{ConvertOptions, Converter, Theme, apply_inline_styles, convert};

/// Generate markdown with headings, prose and a code block per section.
fn generate_markdown(sections: usize, paragraphs_per_section: usize) -> String {
    let mut md = String::with_capacity(sections * (300 + paragraphs_per_section * 120));
    md.push_str("# Document Title\n\n[[toc]]\n\n");

    for i in 0..sections {
        md.push_str(&format!("## Section {i}\n\n"));
        for j in 0..paragraphs_per_section {
            md.push_str(&format!(
                "Paragraph {j} in section {i} has **bold**, *italic*, `code` and https://example.com/{i}.\n\n"
            ));
        }
        md.push_str("```rust\nfn main() {\n    println!(\"hello\");\n}\n```\n\n");
        md.push_str("| Key | Value |\n|:----|------:|\n| a | 1 |\n\n");
    }
    md
}

fn bench_convert_simple(c: &mut Criterion) {
    let options = ConvertOptions::default();
    c.bench_function("convert_simple_markdown", |b| {
        b.iter(|| convert("# Hello\n\nSimple **content**.", &options));
    });
}

fn bench_convert_with_toc(c: &mut Criterion) {
    let markdown = generate_markdown(10, 2);
    let converter = Converter::new().toc(true).theme(Theme::Dark);

    c.bench_function("convert_with_toc_10_sections", |b| {
        b.iter(|| converter.convert(&markdown));
    });
}

fn bench_inline_styles(c: &mut Criterion) {
    let markdown = generate_markdown(20, 3);
    let html = Converter::new().render(&markdown).html;

    c.bench_function("apply_inline_styles_20_sections", |b| {
        b.iter(|| apply_inline_styles(&html, Theme::Light));
    });
}

fn bench_convert_varying_sizes(c: &mut Criterion) {
    let converter = Converter::new();
    let mut group = c.benchmark_group("convert_by_size");

    for (sections, paragraphs) in [(5, 2), (20, 3), (50, 5)] {
        let markdown = generate_markdown(sections, paragraphs);
        group.throughput(Throughput::Bytes(markdown.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("markdown", format!("{sections}s_{paragraphs}p")),
            &markdown,
            |b, md| b.iter(|| converter.convert(md)),
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_convert_simple,
    bench_convert_with_toc,
    bench_inline_styles,
    bench_convert_varying_sizes
);
criterion_main!(benches);
