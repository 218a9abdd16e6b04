use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;

use ballot_ledger::PollLedger;
use ballot_nullables::NullClock;
use ballot_types::{ParticipantId, PollId, Timestamp};

fn make_ledger(option_count: usize) -> PollLedger {
    PollLedger::new(
        PollId::new(0),
        "bench".to_string(),
        (0..option_count).map(|i| format!("option {i}")).collect(),
        Timestamp::new(0),
        Timestamp::new(u64::MAX),
        Arc::new(NullClock::new(1)),
    )
    .unwrap()
}

fn bench_vote(c: &mut Criterion) {
    let mut group = c.benchmark_group("ledger_vote");

    for prior_voters in [0usize, 1_000, 100_000] {
        let ledger = make_ledger(4);
        for i in 0..prior_voters {
            ledger
                .vote(&ParticipantId::new(format!("seed-{i}")), i % 4)
                .unwrap();
        }
        let mut next = 0u64;

        group.bench_with_input(
            BenchmarkId::new("fresh_participant", prior_voters),
            &prior_voters,
            |b, _| {
                b.iter(|| {
                    next += 1;
                    let who = ParticipantId::new(format!("bench-{next}"));
                    black_box(ledger.vote(black_box(&who), 0))
                });
            },
        );
    }

    group.finish();
}

fn bench_rejections(c: &mut Criterion) {
    let ledger = make_ledger(2);
    let voter = ParticipantId::new("already");
    ledger.vote(&voter, 0).unwrap();

    c.bench_function("ledger_vote_already_voted", |b| {
        b.iter(|| black_box(ledger.vote(black_box(&voter), 1)));
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("ledger_snapshot");

    for option_count in [2usize, 16, 256] {
        let ledger = make_ledger(option_count);
        group.bench_with_input(
            BenchmarkId::new("all_options", option_count),
            &option_count,
            |b, _| {
                b.iter(|| black_box(ledger.all_options()));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_vote, bench_rejections, bench_snapshot);
criterion_main!(benches);
