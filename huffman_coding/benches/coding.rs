use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use huffman_coding::{count, Coding, Frequencies};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;
use std::hint::black_box;

/// Pseudo-random bytes, skewed towards small values.
fn text(len: usize) -> Vec<u8> {
    let mut rng = Pcg64Mcg::seed_from_u64(1234);
    (0..len).map(|_| rng.gen_range(0..=255u8).min(rng.gen_range(0..=255u8))).collect()
}

fn bench_coding(c: &mut Criterion) {
    for size in [1024, 64 * 1024, 1024 * 1024] {
        let input = text(size);
        let coding = Coding::from_frequencies(<[u32; 256]>::with_counted_all(&input)).unwrap();
        let payload = coding.encode(&input).unwrap();

        let mut group = c.benchmark_group("huffman");
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("count", size), &input,
            |b, i| b.iter(|| count::<u8, _>(black_box(i))));
        group.bench_with_input(BenchmarkId::new("construct", size), &input,
            |b, i| b.iter(|| Coding::<u8>::from_iter(black_box(i)).unwrap()));
        group.bench_with_input(BenchmarkId::new("encode", size), &input,
            |b, i| b.iter(|| coding.encode(black_box(i)).unwrap()));
        group.bench_with_input(BenchmarkId::new("decode", size), &payload,
            |b, p| b.iter(|| coding.decode_payload(black_box(p)).unwrap()));
        group.finish();
    }
}

criterion_group!(benches, bench_coding);
criterion_main!(benches);
