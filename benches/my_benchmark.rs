use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::prelude::*;
use snap_rs::prelude::*;

fn criterion_benchmark(c: &mut Criterion) {
    let mut data = vec![0u8; 10_000_000];
    thread_rng().fill(&mut data[2_000_000..6_000_000]); // mixed compressible/incompressible

    let uncompressed_data: &[u8] = data.as_slice();
    let compressed_data = compress_to_vec(uncompressed_data, Level::Fast).unwrap();

    let mut group = c.benchmark_group("compress");
    group.bench_with_input("ours", &uncompressed_data, |b, input| {
        b.iter(|| compress_to_vec(black_box(input), Level::Fast).unwrap())
    });
    group.finish();

    let mut group = c.benchmark_group("decompress");
    group.bench_with_input("ours", &compressed_data.as_slice(), |b, c| {
        b.iter(|| decompress_to_vec(black_box(c)).unwrap())
    });
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
