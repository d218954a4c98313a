use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId,
    Criterion,
};
use inversion::MergeCounter;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use randgen::{Gen, NearlySorted, Perm};

fn bench_inversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("inversion");

    let mut rng = ChaCha20Rng::from_seed([
        0x55, 0xEF, 0xE0, 0x3C, 0x71, 0xDA, 0xFC, 0xAB, 0x5C, 0x1A, 0x9F, 0xEB,
        0xA4, 0x9E, 0x61, 0xE6, 0x1E, 0x7E, 0x29, 0x77, 0x38, 0x9A, 0xF5, 0x67,
        0xF5, 0xDD, 0x07, 0x06, 0xAE, 0xE4, 0x5A, 0xDC,
    ]);

    for len in [1_000, 100_000, 1_000_000] {
        let nearly = NearlySorted { len, swaps: len / 100 };
        let inputs = [
            ("shuffled", Perm { len }.generate(&mut rng)),
            ("nearly-sorted", nearly.generate(&mut rng)),
            ("sorted", (0..len).collect()),
            ("reversed", (0..len).rev().collect()),
        ];
        let mut counter = MergeCounter::with_capacity(len);
        for (name, a) in &inputs {
            group.bench_with_input(BenchmarkId::new(*name, len), a, |b, a| {
                b.iter_batched_ref(
                    || a.clone(),
                    |a| black_box(counter.sort_count(a)),
                    BatchSize::LargeInput,
                )
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_inversion);
criterion_main!(benches);
