//! Benchmarks for the static engine.
//!
//! Performance-critical paths:
//! - `compare`: tokenising, Myers diff, move detection and classification
//! - `align_paragraphs`: greedy paragraph pairing
//! - `normalized_similarity`: the Levenshtein core shared by both

#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use revise_engine::{Comparer, Granularity, align_paragraphs, normalized_similarity};

const SENTENCES: [&str; 6] = [
    "The committee reviewed the quarterly figures in detail.",
    "Several members raised concerns about the travel budget.",
    "A revised proposal will be circulated before Friday.",
    "Everyone agreed that the timeline remains ambitious.",
    "The next meeting is scheduled for the first week of May.",
    "Minutes were approved without further amendments.",
];

/// Builds a document of `paragraphs` paragraphs of three sentences each.
fn document(paragraphs: usize) -> String {
    (0..paragraphs)
        .map(|p| {
            (0..3)
                .map(|s| SENTENCES[(p + s) % SENTENCES.len()])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Applies a light edit pass: a word swap every few paragraphs and one moved paragraph.
fn revise(doc: &str) -> String {
    let mut paragraphs: Vec<String> = doc
        .split("\n\n")
        .enumerate()
        .map(|(i, p)| {
            if i % 4 == 0 {
                p.replacen("ambitious", "tight", 1)
                    .replacen("committee", "Committee", 1)
            } else {
                p.to_string()
            }
        })
        .collect();
    if paragraphs.len() > 2 {
        let moved = paragraphs.remove(1);
        paragraphs.push(moved);
    }
    paragraphs.join("\n\n")
}

fn bench_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot_diff/compare");

    for paragraphs in [4usize, 16, 64] {
        let baseline = document(paragraphs);
        let current = revise(&baseline);
        group.throughput(Throughput::Bytes(baseline.len() as u64));

        for granularity in [Granularity::Word, Granularity::Sentence] {
            let comparer = Comparer::new().with_granularity(granularity);
            group.bench_with_input(
                BenchmarkId::new(format!("{granularity:?}"), paragraphs),
                &(&baseline, &current),
                |b, (baseline, current)| {
                    b.iter(|| comparer.compare(black_box(baseline), black_box(current)));
                },
            );
        }
    }

    group.finish();
}

fn bench_align(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot_diff/align_paragraphs");

    for paragraphs in [8usize, 32, 128] {
        let baseline = document(paragraphs);
        let current = revise(&baseline);
        group.bench_with_input(
            BenchmarkId::from_parameter(paragraphs),
            &(&baseline, &current),
            |b, (baseline, current)| {
                b.iter(|| align_paragraphs(black_box(baseline), black_box(current)));
            },
        );
    }

    group.finish();
}

fn bench_similarity(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot_diff/normalized_similarity");

    for len in [32usize, 256, 1024] {
        let a: String = SENTENCES.concat().chars().cycle().take(len).collect();
        let b: String = a.chars().rev().collect();
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &(a, b), |bench, (a, b)| {
            bench.iter(|| normalized_similarity(black_box(a), black_box(b)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_compare, bench_align, bench_similarity);
criterion_main!(benches);
