use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use gridtag::{GridDecoder, TagEncoder};

fn bench_decode(c: &mut Criterion) {
    let mut encoder = TagEncoder::new();
    let valid = encoder.bit_pattern(1234);
    let mut noisy = valid;
    noisy[17] ^= 1;
    noisy[42] ^= 1;
    let miss = [0u8; 64];

    let mut decoder = GridDecoder::new();
    c.bench_function("decode_clean", |b| {
        b.iter(|| decoder.decode(black_box(&valid)))
    });
    c.bench_function("decode_noisy", |b| {
        b.iter(|| decoder.decode(black_box(&noisy)))
    });
    c.bench_function("decode_miss", |b| {
        b.iter(|| decoder.decode(black_box(&miss)))
    });
}

criterion_group!(benches, bench_decode);
criterion_main!(benches);
