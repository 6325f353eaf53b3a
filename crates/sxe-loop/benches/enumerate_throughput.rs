use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sxe_loop::{triangle_eq, triangle_sum};

fn enumerate_bench(c: &mut Criterion) {
    c.bench_function("triangle_sum_4d_density_24", |b| {
        b.iter(|| {
            let mut acc = 0u64;
            triangle_sum::iterate(4, 24, &mut |_: usize, _: u64, tuple: &[u64]| {
                acc = acc.wrapping_add(tuple[0]);
            });
            black_box(acc)
        });
    });

    c.bench_function("triangle_eq_3d_gradients_range", |b| {
        let total = triangle_eq::iterations(4, 12);
        b.iter(|| {
            let mut acc = 0u64;
            triangle_eq::iterate_range(
                4,
                12,
                total / 4,
                total / 2,
                &mut |_: usize, _: u64, tuple: &[u64]| {
                    acc = acc.wrapping_add(tuple[3]);
                },
            );
            black_box(acc)
        });
    });

    c.bench_function("triangle_eq_unrank", |b| {
        let total = triangle_eq::iterations(5, 32);
        b.iter(|| {
            for step in 0..64u64 {
                black_box(triangle_eq::permutation(5, 32, step * (total / 64)));
            }
        });
    });
}

criterion_group!(benches, enumerate_bench);
criterion_main!(benches);
