//! Benchmarks for range proof generation and verification

use bulletproofs_core::ParameterSet;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::OsRng;
use range::{prove_range, RangeProver, RangeVerifier};

fn bench_range_proof_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("range_proof_generation");

    for bit_length in [8usize, 16, 32, 64] {
        group.throughput(Throughput::Elements(bit_length as u64));
        let params = ParameterSet::derive(bit_length).unwrap();
        let prover = RangeProver::new(&params);
        let value = ((1u64 << (bit_length - 1)) - 1) as i64; // Near max value

        group.bench_with_input(
            BenchmarkId::new("prove", bit_length),
            &bit_length,
            |b, _| {
                b.iter(|| {
                    let proof = prover.prove(black_box(value), &mut OsRng).unwrap();
                    black_box(proof)
                });
            },
        );
    }

    group.finish();
}

fn bench_range_proof_verification(c: &mut Criterion) {
    let mut group = c.benchmark_group("range_proof_verification");

    for bit_length in [8usize, 16, 32, 64] {
        group.throughput(Throughput::Elements(bit_length as u64));

        // Pre-generate proof for verification benchmark
        let params = ParameterSet::derive(bit_length).unwrap();
        let value = ((1u64 << (bit_length - 1)) - 1) as i64;
        let (proof, _) = prove_range(&params, value, &mut OsRng).unwrap();
        let verifier = RangeVerifier::new(&params);

        group.bench_with_input(
            BenchmarkId::new("verify", bit_length),
            &bit_length,
            |b, _| {
                b.iter(|| black_box(verifier.verify(black_box(&proof))));
            },
        );
    }

    group.finish();
}

fn bench_batch_verification(c: &mut Criterion) {
    let mut group = c.benchmark_group("range_proof_batch_verification");
    let params = ParameterSet::derive(64).unwrap();
    let verifier = RangeVerifier::new(&params);

    for batch in [1usize, 4, 16] {
        group.throughput(Throughput::Elements(batch as u64));
        let proofs: Vec<_> = (0..batch)
            .map(|i| prove_range(&params, i as i64 * 1000, &mut OsRng).unwrap().0)
            .collect();

        group.bench_with_input(BenchmarkId::new("verify_batch", batch), &batch, |b, _| {
            b.iter(|| black_box(verifier.verify_batch(black_box(&proofs))));
        });
    }

    group.finish();
}

fn bench_range_proof_size(_c: &mut Criterion) {
    for bit_length in [8usize, 16, 32, 64] {
        let params = ParameterSet::derive(bit_length).unwrap();
        let (proof, _) = prove_range(&params, 1, &mut OsRng).unwrap();
        let size = proof.to_bytes().len();

        println!("Range proof size for {} bits: {} bytes", bit_length, size);
    }
}

criterion_group!(
    benches,
    bench_range_proof_generation,
    bench_range_proof_verification,
    bench_batch_verification,
    bench_range_proof_size
);
criterion_main!(benches);
