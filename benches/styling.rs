//! Benchmarks for the live preview render pass.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use readme_studio::styler::{classify_line, render_pass};
use readme_studio::template::{ProjectInfo, TemplateKind};

fn bench_pass_simple(c: &mut Criterion) {
    let md = "# Hello\n\nSome **bold** and `code` with a [link](https://example.com)";
    c.bench_function("pass_simple", |b| b.iter(|| render_pass(black_box(md))));
}

fn bench_pass_advanced_template(c: &mut Criterion) {
    let md = TemplateKind::Advanced.render(&ProjectInfo::default());
    c.bench_function("pass_advanced_template", |b| {
        b.iter(|| render_pass(black_box(&md)))
    });
}

fn bench_pass_large_document(c: &mut Criterion) {
    let section = TemplateKind::Advanced.render(&ProjectInfo::default());
    let md = section.repeat(50);
    c.bench_function("pass_large_document", |b| {
        b.iter(|| render_pass(black_box(&md)))
    });
}

fn bench_classify_line(c: &mut Criterion) {
    c.bench_function("classify_line", |b| {
        b.iter(|| classify_line(black_box("###### deep heading"), black_box(1)))
    });
}

criterion_group!(
    benches,
    bench_pass_simple,
    bench_pass_advanced_template,
    bench_pass_large_document,
    bench_classify_line
);
criterion_main!(benches);
