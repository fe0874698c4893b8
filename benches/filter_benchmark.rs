//! Filter performance benchmarks.
//!
//! Every keystroke that survives the debounce refilters the whole store, so
//! one pass over a large catalogue must stay well under a frame.
//!
//! Run with: cargo bench

#![allow(missing_docs)] // criterion macros generate undocumented items

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tlv::filter::{apply_filter, FilterCriteria};
use tlv::model::{Record, RecordId, RecordStore};

const CATEGORIES: [&str; 5] = ["text", "vision", "audio", "multimodal", "video"];

/// Build a store of `count` records spread over ten years and five categories.
fn generate_store(count: usize) -> RecordStore {
    let records = (0..count)
        .map(|i| {
            let year = 2015 + (i % 10);
            let month = 1 + (i % 12);
            let day = 1 + (i % 28);
            Record::new(
                RecordId::new(format!("model-{i:06}")).expect("valid id"),
                format!("Model {i} Transformer"),
                CATEGORIES[i % CATEGORIES.len()],
                format!("{year:04}-{month:02}-{day:02}"),
            )
        })
        .collect();
    RecordStore::new(records).expect("unique ids")
}

fn bench_apply_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply_filter");

    for count in [1_000usize, 20_000] {
        let store = generate_store(count);

        let search = FilterCriteria::new().with_search("model 12");
        group.bench_with_input(BenchmarkId::new("search", count), &store, |b, store| {
            b.iter(|| apply_filter(black_box(store), black_box(&search)))
        });

        let combined = FilterCriteria::new()
            .with_search("transformer")
            .with_categories(["text", "vision"])
            .with_date_range(
                NaiveDate::from_ymd_opt(2018, 1, 1),
                NaiveDate::from_ymd_opt(2021, 12, 31),
            );
        group.bench_with_input(BenchmarkId::new("combined", count), &store, |b, store| {
            b.iter(|| apply_filter(black_box(store), black_box(&combined)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_apply_filter);
criterion_main!(benches);
