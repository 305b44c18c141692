// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for media navigation operations.
//!
//! Measures the performance of:
//! - Directory listing (finding all media files)
//! - Sorting a listing by each key
//! - Navigation operations (next/previous, re-sort with reconciliation)

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use iced_peek::application::query::MediaNavigator;
use iced_peek::config::DEFAULT_VIDEO_EXTENSIONS;
use iced_peek::directory_scanner;
use iced_peek::domain::media::SortKey;
use iced_peek::media::FormatRegistry;
use iced_peek::sorting;
use std::fs::{self, File};
use std::hint::black_box;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

const FILE_COUNT: usize = 500;

/// A directory of empty files with mixed extensions and mtimes.
///
/// Listing only looks at names and metadata, so the files need no content.
fn fixture() -> TempDir {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let extensions = ["png", "jpg", "gif", "webp", "mp4", "txt"];

    for i in 0..FILE_COUNT {
        let ext = extensions[i % extensions.len()];
        let path = dir.path().join(format!("file_{:04}.{ext}", (i * 7919) % FILE_COUNT));
        fs::write(&path, b"").expect("failed to write fixture file");
        File::options()
            .write(true)
            .open(&path)
            .and_then(|f| {
                f.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs((i % 37) as u64))
            })
            .expect("failed to set mtime");
    }

    dir
}

fn registry() -> FormatRegistry {
    FormatRegistry::from_host(DEFAULT_VIDEO_EXTENSIONS)
}

/// Benchmark directory listing performance.
fn bench_list_directory(c: &mut Criterion) {
    let mut group = c.benchmark_group("media_navigation");
    let dir = fixture();
    let registry = registry();

    group.bench_function("list_directory", |b| {
        b.iter(|| {
            let entries = directory_scanner::list(dir.path(), &registry)
                .expect("fixture directory is readable");
            black_box(entries);
        });
    });

    group.finish();
}

/// Benchmark sorting a listing by each key.
fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("media_navigation");
    let dir = fixture();
    let entries =
        directory_scanner::list(dir.path(), &registry()).expect("fixture directory is readable");

    for key in SortKey::ALL {
        group.bench_function(format!("sort_{}", key.label().to_lowercase()), |b| {
            b.iter_batched(
                || entries.clone(),
                |mut entries| {
                    sorting::sort(&mut entries, key);
                    black_box(entries);
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

/// Benchmark navigation operations.
///
/// Measures the pure cursor work without media loading.
fn bench_navigate(c: &mut Criterion) {
    let mut group = c.benchmark_group("media_navigation");
    let dir = fixture();

    let mut navigator = MediaNavigator::new(registry(), SortKey::ModifiedTime);
    navigator
        .open(dir.path())
        .expect("fixture directory is readable");

    group.bench_function("walk_next_previous", |b| {
        b.iter_batched(
            || navigator.clone(),
            |mut nav| {
                while nav.next() {}
                while nav.previous() {}
                black_box(nav.current_index());
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("resort_and_reconcile", |b| {
        b.iter_batched(
            || {
                let mut nav = navigator.clone();
                nav.last();
                nav
            },
            |mut nav| {
                nav.sort_by(SortKey::Name);
                nav.sort_by(SortKey::TypeThenName);
                black_box(nav.current_index());
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_list_directory, bench_sort, bench_navigate);
criterion_main!(benches);
