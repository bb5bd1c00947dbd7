//! Ingestion benchmarks for colinfer
//!
//! These benchmarks measure column creation, appends that trigger promotion,
//! and multi-column table updates.

use colinfer::{Column, CustomValue, Datum, Dtype, Primitive, Record, Table};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box as hint_black_box;

struct Reprd(i64);

impl CustomValue for Reprd {
    fn dtype_hint(&self) -> Option<Dtype> {
        Some(Dtype::Int)
    }

    fn custom_repr(&self) -> Option<eyre::Result<Primitive>> {
        Some(Ok(Primitive::Int(self.0 + 1)))
    }
}

fn bench_column_create(c: &mut Criterion) {
    let mut group = c.benchmark_group("column_create");

    for size in [100usize, 1_000, 10_000] {
        let ints: Vec<Datum> = (0..size as i64).map(Datum::Int).collect();
        let floats: Vec<Datum> = (0..size).map(|i| Datum::Float(i as f64 * 0.5)).collect();
        let customs: Vec<Datum> = (0..size as i64).map(|i| Datum::object(Reprd(i))).collect();

        group.bench_with_input(BenchmarkId::new("int", size), &ints, |b, values| {
            b.iter(|| hint_black_box(Column::create("a", black_box(values))))
        });
        group.bench_with_input(BenchmarkId::new("float", size), &floats, |b, values| {
            b.iter(|| hint_black_box(Column::create("a", black_box(values))))
        });
        group.bench_with_input(BenchmarkId::new("custom_repr", size), &customs, |b, values| {
            b.iter(|| hint_black_box(Column::create("a", black_box(values))))
        });
    }

    group.finish();
}

fn bench_promotion(c: &mut Criterion) {
    let mut group = c.benchmark_group("promotion");

    for size in [100usize, 1_000, 10_000] {
        let seed = Column::create("a", &(0..size as i64).map(Datum::Int).collect::<Vec<_>>());
        let Ok(seed) = seed else {
            continue;
        };
        let trigger = [Datum::Str("text".into())];

        group.bench_with_input(BenchmarkId::new("int_to_str", size), &seed, |b, seed| {
            b.iter(|| {
                let mut column = seed.clone();
                let _ = column.append(black_box(&trigger));
                hint_black_box(column)
            })
        });
    }

    group.finish();
}

fn bench_table_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("table_update");

    let rows: Vec<Record> = (0..1_000i64)
        .map(|i| {
            let mut r = Record::new();
            r.insert("id".to_string(), Datum::Int(i));
            r.insert("score".to_string(), Datum::Float(i as f64 / 3.0));
            r.insert("label".to_string(), Datum::Str(format!("row{i}")));
            r
        })
        .collect();

    group.bench_function("from_records_1000x3", |b| {
        b.iter(|| hint_black_box(Table::from_records(black_box(&rows))))
    });

    group.finish();
}

criterion_group!(benches, bench_column_create, bench_promotion, bench_table_update);
criterion_main!(benches);
