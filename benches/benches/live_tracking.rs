//! Benchmarks for the live tracking engine.
//!
//! Performance-critical paths:
//! - `apply_local` under sustained typing with coalescing
//! - `reject_all` over many scattered pending changes

#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use revise_engine::{Author, EditOp, ManualClock, TrackingSession};

const BASE: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. ";

fn author() -> Author {
    Author::human("bench", "Bench").unwrap()
}

fn session(doc: &str) -> (TrackingSession<ManualClock>, ManualClock) {
    let clock = ManualClock::new(0);
    (TrackingSession::with_clock(doc, author(), clock.clone()), clock)
}

fn bench_typing(c: &mut Criterion) {
    let mut group = c.benchmark_group("live_tracking/typing");
    let doc = BASE.repeat(20);

    for keystrokes in [100usize, 1000] {
        group.throughput(Throughput::Elements(keystrokes as u64));
        group.bench_with_input(BenchmarkId::from_parameter(keystrokes), &keystrokes, |b, &n| {
            b.iter(|| {
                let (mut session, clock) = session(&doc);
                for i in 0..n {
                    clock.advance(50);
                    session.apply_local(EditOp::insert(100 + i, "x")).unwrap();
                }
                black_box(session.changes().len())
            });
        });
    }

    group.finish();
}

fn bench_reject_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("live_tracking/reject_all");
    let doc = BASE.repeat(50);

    for changes in [10usize, 100, 400] {
        group.bench_with_input(BenchmarkId::from_parameter(changes), &changes, |b, &n| {
            b.iter_batched(
                || {
                    let (mut session, clock) = session(&doc);
                    for i in 0..n {
                        clock.advance(5_000);
                        let at = (i * 7) % 2000;
                        if i % 2 == 0 {
                            session.apply_local(EditOp::insert(at, "new")).unwrap();
                        } else {
                            session.apply_local(EditOp::delete(at, at + 2)).unwrap();
                        }
                    }
                    session
                },
                |mut session| black_box(session.reject_all().unwrap()),
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_typing, bench_reject_all);
criterion_main!(benches);
