// SPDX-License-Identifier: MPL-2.0
use asset_lens::application::query::{Direction, SiblingNavigator};
use asset_lens::domain::asset::{AssetRecord, VisibilityFilter};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use std::path::PathBuf;

const ASSET_COUNT: usize = 10_000;

/// Every tenth entry is a folder and every seventh file is hidden.
fn snapshot() -> Vec<AssetRecord> {
    (0..ASSET_COUNT)
        .map(|i| {
            if i % 10 == 0 {
                AssetRecord::directory(PathBuf::from(format!("/models/dir_{i:05}")))
            } else {
                let mut record =
                    AssetRecord::file(PathBuf::from(format!("/models/asset_{i:05}.safetensors")));
                record.is_hidden = i % 7 == 0;
                record
            }
        })
        .collect()
}

fn sibling_navigation_benchmark(c: &mut Criterion) {
    let records = snapshot();
    let navigator = SiblingNavigator::new(&records, VisibilityFilter::default());
    let mut group = c.benchmark_group("sibling_navigation");

    group.bench_function("peek_next_mid_list", |b| {
        b.iter(|| black_box(navigator.peek(black_box(5_000), Direction::Next)));
    });

    group.bench_function("peek_previous_mid_list", |b| {
        b.iter(|| black_box(navigator.peek(black_box(5_000), Direction::Previous)));
    });

    group.bench_function("walk_whole_list", |b| {
        b.iter(|| {
            let mut steps = 0usize;
            let mut current = 0;
            while let Some(next) = navigator.peek_next(current) {
                current = next;
                steps += 1;
            }
            black_box(steps)
        });
    });

    group.bench_function("eligible_count", |b| {
        b.iter(|| black_box(navigator.eligible_count()));
    });

    group.finish();
}

criterion_group!(benches, sibling_navigation_benchmark);
criterion_main!(benches);
