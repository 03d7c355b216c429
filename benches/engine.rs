use aiops_monitor::analytics::compute_snapshot;
use aiops_monitor::session::SessionRecord;
use aiops_monitor::tier::{Tier, TierConfig};
use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn synthetic_records(count: usize) -> Vec<SessionRecord> {
    let start = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            SessionRecord::new(
                start + Duration::minutes(i as i64 * 7),
                match i % 10 {
                    0 => "timeout",
                    5 => "hallucination",
                    _ => "none",
                },
                i % 8 == 0,
                0.5 + (i % 40) as f64 * 0.1,
                (i % 5) as u32,
            )
        })
        .collect()
}

fn starter_snapshot_benchmark(c: &mut Criterion) {
    let records = synthetic_records(10_000);
    let config = TierConfig::for_tier(Tier::Starter);

    c.bench_function("snapshot_starter_10k", |b| {
        b.iter(|| {
            let snapshot = compute_snapshot(black_box(&records), &config).unwrap();
            black_box(snapshot.accuracy_pct);
        });
    });
}

fn enterprise_snapshot_benchmark(c: &mut Criterion) {
    let records = synthetic_records(10_000);
    let config = TierConfig::for_tier(Tier::Enterprise);

    c.bench_function("snapshot_enterprise_10k", |b| {
        b.iter(|| {
            let snapshot = compute_snapshot(black_box(&records), &config).unwrap();
            black_box(snapshot.churn_risk.as_ref().map(|c| c.score));
        });
    });
}

criterion_group!(
    benches,
    starter_snapshot_benchmark,
    enterprise_snapshot_benchmark
);
criterion_main!(benches);
