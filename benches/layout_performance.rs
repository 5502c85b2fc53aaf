//! Layout engine micro-benchmarks
//!
//! Measures line breaking, table sizing and the full render for growing inputs.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use quire::layout::nodes::fit_table_to_width;
use quire::layout::{LayoutConfig, LayoutEngine};
use quire::{DocumentSpec, Pipeline, PipelineConfig};
use serde_json::{Value, json};
use std::hint::black_box;

const LOREM: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod \
                     tempor incididunt ut labore et dolore magna aliqua.";

fn paragraphs(count: usize) -> DocumentSpec {
    let children: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "type": "Paragraph",
                "attributes": { "text-align": if i % 2 == 0 { "justify" } else { "left" } },
                "children": [{ "type": "Text", "content": LOREM }]
            })
        })
        .collect();
    spec(json!({ "pages": [{ "attributes": { "padding": 36.0 }, "children": children }] }))
}

fn table(rows: usize) -> DocumentSpec {
    let rows: Vec<Value> = (0..rows)
        .map(|r| {
            let cells: Vec<Value> = (0..3)
                .map(|c| {
                    json!({ "children": [{
                        "type": "Paragraph",
                        "children": [{ "type": "Text", "content": format!("Row {r} column {c}") }]
                    }]})
                })
                .collect();
            json!({ "cells": cells })
        })
        .collect();
    spec(json!({
        "pages": [{ "children": [{ "type": "Table", "attributes": { "width": 400.0 }, "rows": rows }] }]
    }))
}

fn spec(value: Value) -> DocumentSpec {
    serde_json::from_value(value).expect("benchmark document should parse")
}

fn benchmark_line_breaking(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout_paragraphs");
    let engine = LayoutEngine::new(LayoutConfig::default());

    for count in [1, 10, 100] {
        let document = paragraphs(count);
        group.bench_with_input(BenchmarkId::new("paragraphs", count), &count, |b, _| {
            b.iter(|| {
                let mut tree = document.build_tree().expect("tree");
                black_box(engine.layout(&mut tree).expect("layout"));
            })
        });
    }
    group.finish();
}

fn benchmark_table_resize(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout_tables");
    let engine = LayoutEngine::new(LayoutConfig::default());

    for row_count in [10, 50, 200] {
        let document = table(row_count);
        group.bench_with_input(BenchmarkId::new("rows", row_count), &row_count, |b, _| {
            b.iter(|| {
                let mut tree = document.build_tree().expect("tree");
                engine.layout(&mut tree).expect("layout");
                let page = tree.roots()[0];
                let table = tree.children(page).expect("page")[0];
                fit_table_to_width(&mut tree, table, 500.0).expect("resize");
                black_box(tree);
            })
        });
    }
    group.finish();
}

fn benchmark_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_pdf");
    group.sample_size(20);
    let pipeline = Pipeline::new(PipelineConfig::default());

    for count in [10, 100] {
        let document = paragraphs(count);
        group.bench_with_input(BenchmarkId::new("paragraphs", count), &count, |b, _| {
            b.iter(|| black_box(pipeline.render(&document).expect("render")))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_line_breaking,
    benchmark_table_resize,
    benchmark_render
);
criterion_main!(benches);
