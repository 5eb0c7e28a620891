//! Benchmarks for ledger auditing and row verification

use benches::audited_ledger;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ledger::OrgId;

fn bench_stage_one(c: &mut Criterion) {
    let mut group = c.benchmark_group("ledger_stage_one");

    for orgs in [2usize, 4, 8] {
        let (mut ledger, keys, key) = audited_ledger(64, orgs).unwrap();
        group.bench_with_input(BenchmarkId::new("verify_step_one", orgs), &orgs, |b, _| {
            b.iter(|| {
                black_box(
                    ledger
                        .verify_step_one(key, OrgId(1), &keys[1].secret, 1)
                        .unwrap(),
                )
            });
        });
    }

    group.finish();
}

fn bench_stage_two(c: &mut Criterion) {
    let mut group = c.benchmark_group("ledger_stage_two");
    group.sample_size(10);

    for orgs in [2usize, 4, 8] {
        let (mut ledger, _keys, key) = audited_ledger(64, orgs).unwrap();
        group.bench_with_input(BenchmarkId::new("single_column", orgs), &orgs, |b, _| {
            b.iter(|| black_box(ledger.verify_step_two(key, OrgId(0), None).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("all_columns", orgs), &orgs, |b, _| {
            b.iter(|| black_box(ledger.verify_step_two_all(key).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_stage_one, bench_stage_two);
criterion_main!(benches);
