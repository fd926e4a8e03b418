//! crates/md5-digest/benches/throughput.rs
//!
//! Benchmarks for MD5 digest throughput.
//!
//! Run with: `cargo bench -p md5-digest`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::Rng;

use md5_digest::{Md5, digest, digest_batch, hex_digest};

/// Generate random data of the specified size.
fn generate_random_data(size: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    let mut data = vec![0u8; size];
    rng.fill(&mut data[..]);
    data
}

/// One-shot and streaming digests across message sizes.
fn bench_digest(c: &mut Criterion) {
    let mut group = c.benchmark_group("md5_digest");

    for size in [16, 64, 1024, 8192, 131072] {
        let data = generate_random_data(size);

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("one_shot", size), &data, |b, data| {
            b.iter(|| black_box(digest(black_box(data))));
        });
        group.bench_with_input(BenchmarkId::new("streaming", size), &data, |b, data| {
            b.iter(|| {
                let mut hasher = Md5::new();
                hasher.update(black_box(data));
                black_box(hasher.finalize())
            });
        });
    }

    group.finish();
}

/// Short door-style candidates, the shape of the password search workload.
fn bench_candidates(c: &mut Criterion) {
    let mut group = c.benchmark_group("md5_candidates");
    let inputs: Vec<String> = (0..4096).map(|i| format!("wtnhxymk{i}")).collect();

    group.throughput(Throughput::Elements(inputs.len() as u64));
    group.bench_function("hex_sequential", |b| {
        b.iter(|| {
            for input in &inputs {
                black_box(hex_digest(input.as_bytes()));
            }
        });
    });
    group.bench_function("batch", |b| {
        b.iter(|| black_box(digest_batch(black_box(&inputs))));
    });

    group.finish();
}

criterion_group!(benches, bench_digest, bench_candidates);
criterion_main!(benches);
