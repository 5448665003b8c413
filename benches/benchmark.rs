use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{distributions::Distribution, SeedableRng};

use ars::{Gamma, Weibull};

fn bench_gamma_draw(c: &mut Criterion) {
    let dist = Gamma::new(3.0, 2.0).unwrap();
    let mut rng = rand_xoshiro::Xoshiro256PlusPlus::seed_from_u64(0);
    c.bench_function("gamma(3, 2) draw", |b| {
        b.iter(|| black_box(dist.sample(&mut rng)))
    });
}

fn bench_gamma_draw_large_shape(c: &mut Criterion) {
    let dist = Gamma::new(50.0, 1.0).unwrap();
    let mut rng = rand_xoshiro::Xoshiro256PlusPlus::seed_from_u64(1);
    c.bench_function("gamma(50, 1) draw", |b| {
        b.iter(|| black_box(dist.sample(&mut rng)))
    });
}

fn bench_weibull_draw(c: &mut Criterion) {
    let dist = Weibull::new(1.0, 2.0).unwrap();
    let mut rng = rand_xoshiro::Xoshiro256PlusPlus::seed_from_u64(2);
    c.bench_function("weibull(1, 2) draw", |b| {
        b.iter(|| black_box(dist.sample(&mut rng)))
    });
}

fn bench_hull_warm_up(c: &mut Criterion) {
    // Amortized cost of the first draws, while the envelope is still
    // coarse and every rejection triggers an insertion.
    c.bench_function("gamma(3, 2) fresh hull, 32 draws", |b| {
        b.iter(|| {
            let dist = Gamma::new(3.0, 2.0).unwrap();
            let mut rng = rand_xoshiro::Xoshiro256PlusPlus::seed_from_u64(3);
            for _ in 0..32 {
                black_box(dist.sample(&mut rng));
            }
        })
    });
}

criterion_group!(
    benches,
    bench_gamma_draw,
    bench_gamma_draw_large_shape,
    bench_weibull_draw,
    bench_hull_warm_up,
);
criterion_main!(benches);
