//! Benchmarks for inner product argument

use bulletproofs_core::{
    utils::{inner_product, random_vector},
    vector_commit, ParameterSet,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ipa::{InnerProductProver, InnerProductVerifier};
use rand::rngs::OsRng;

fn bench_ipa_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("ipa_generation");

    for vector_length in [8, 16, 32, 64, 128] {
        group.throughput(Throughput::Elements(vector_length as u64));

        let params = ParameterSet::derive(vector_length).unwrap();
        let a = random_vector(&mut OsRng, vector_length);
        let b = random_vector(&mut OsRng, vector_length);
        let c_val = inner_product(&a, &b).unwrap();
        let p = vector_commit(params.bp_g(), params.bp_h(), &a, &b).unwrap();
        let prover = InnerProductProver::new(params.bp_g(), params.bp_h(), params.u()).unwrap();

        group.bench_with_input(
            BenchmarkId::new("prove", vector_length),
            &vector_length,
            |bench, _| {
                bench.iter(|| {
                    let proof = prover
                        .prove(black_box(&a), black_box(&b), &c_val, &p)
                        .unwrap();
                    black_box(proof)
                });
            },
        );
    }

    group.finish();
}

fn bench_ipa_verification(c: &mut Criterion) {
    let mut group = c.benchmark_group("ipa_verification");

    for vector_length in [8, 16, 32, 64, 128] {
        group.throughput(Throughput::Elements(vector_length as u64));

        let params = ParameterSet::derive(vector_length).unwrap();
        let a = random_vector(&mut OsRng, vector_length);
        let b = random_vector(&mut OsRng, vector_length);
        let c_val = inner_product(&a, &b).unwrap();
        let p = vector_commit(params.bp_g(), params.bp_h(), &a, &b).unwrap();
        let proof = InnerProductProver::new(params.bp_g(), params.bp_h(), params.u())
            .unwrap()
            .prove(&a, &b, &c_val, &p)
            .unwrap();
        let verifier = InnerProductVerifier::new(params.bp_g(), params.bp_h(), params.u()).unwrap();

        group.bench_with_input(
            BenchmarkId::new("verify", vector_length),
            &vector_length,
            |bench, _| {
                bench.iter(|| black_box(verifier.verify(&c_val, &p, black_box(&proof))));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_ipa_generation, bench_ipa_verification);
criterion_main!(benches);
