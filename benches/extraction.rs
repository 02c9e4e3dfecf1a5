use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use table_chunker::TableExtractor;

// Helper to generate a document interleaving prose and pipe tables
fn generate_document(table_count: usize, rows_per_table: usize) -> String {
    let mut content = String::new();
    content.push_str("# Benchmark corpus\n\n");

    for table_idx in 0..table_count {
        content.push_str(&format!("## Section {table_idx}\n\nSome prose before the table.\n\n"));
        content.push_str("| Product | Q1 | Q2 | Q3 | Notes |\n");
        content.push_str("| --- | --- | --- | --- | --- |\n");
        for row_idx in 0..rows_per_table {
            content.push_str(&format!(
                "| item-{table_idx}-{row_idx} | {row_idx} | {} | {} | row notes |\n",
                row_idx * 2,
                row_idx * 3
            ));
        }
        content.push('\n');
    }

    content
}

fn benchmark_varying_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("table_count");

    for count in [10, 50, 200].iter() {
        let document = generate_document(*count, 20);

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{count}_tables")),
            &document,
            |b, doc| {
                let extractor = TableExtractor::new();
                b.iter(|| {
                    let result = extractor.extract(black_box(doc));
                    black_box(result);
                });
            },
        );
    }

    group.finish();
}

fn benchmark_html_tables(c: &mut Criterion) {
    let mut html = String::new();
    for idx in 0..50 {
        html.push_str(&format!(
            "<table><tr><th>Name</th><th>Value</th><th>Unit</th><th>Tag</th></tr>\
             <tr><td>row-{idx}</td><td>{idx}</td><td>ms</td><td>bench</td></tr></table>\n"
        ));
    }

    c.bench_function("html_heavy_document", |b| {
        let extractor = TableExtractor::new();
        b.iter(|| {
            let result = extractor.extract(black_box(&html));
            black_box(result);
        });
    });
}

fn benchmark_range_expansion(c: &mut Criterion) {
    let mut document = String::new();
    document.push_str("| Group {A1:C1} |  |  | Total |\n");
    document.push_str("| --- | --- | --- | --- |\n");
    for idx in 0..500 {
        document.push_str(&format!("| g{idx} {{1-2}} | a | b | {idx} |\n"));
    }

    c.bench_function("range_annotated_table", |b| {
        let extractor = TableExtractor::new();
        b.iter(|| {
            let result = extractor.extract(black_box(&document));
            black_box(result);
        });
    });
}

criterion_group!(
    benches,
    benchmark_varying_sizes,
    benchmark_html_tables,
    benchmark_range_expansion
);
criterion_main!(benches);
