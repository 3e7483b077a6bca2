//! Throughput of the tick protocol: interleaved push/pop at steady state,
//! plus the raw codec and synchronizer costs.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use strait_core::{gray, StraitFifo, Synchronizer};

fn bench_codec(c: &mut Criterion) {
    c.bench_function("gray_encode", |b| {
        let mut x = 0u64;
        b.iter(|| {
            x = x.wrapping_add(1);
            black_box(gray::encode(black_box(x)))
        });
    });

    c.bench_function("gray_decode", |b| {
        let mut x = 0u64;
        b.iter(|| {
            x = x.wrapping_add(1);
            black_box(gray::decode(black_box(x)))
        });
    });
}

fn bench_synchronizer(c: &mut Criterion) {
    c.bench_function("synchronizer_capture", |b| {
        let mut sync = Synchronizer::new();
        let mut sample = 0u64;
        b.iter(|| {
            sample = sample.wrapping_add(1);
            sync.capture(black_box(sample));
            black_box(sync.synced())
        });
    });
}

fn bench_steady_state(c: &mut Criterion) {
    let mut group = c.benchmark_group("fifo_steady_state");
    for address_bits in [4u8, 8, 12] {
        group.bench_function(format!("a{address_bits}_push_pop_tick"), |b| {
            let mut fifo: StraitFifo<u64> = StraitFifo::new(address_bits).unwrap();
            let mut value = 0u64;
            b.iter(|| {
                if fifo.producer_tick(true, black_box(value)) {
                    value = value.wrapping_add(1);
                }
                black_box(fifo.consumer_tick(true))
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_codec, bench_synchronizer, bench_steady_state);
criterion_main!(benches);
