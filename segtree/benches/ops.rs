use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use segtree::{Operation, SegmentTree};

const SEED: [u8; 32] = [
    0x3A, 0x91, 0x0C, 0x5E, 0xD4, 0x27, 0x88, 0xF1, 0x6B, 0x13, 0xAE, 0x40, 0x9D, 0x72, 0x05, 0xC8,
    0xE9, 0x34, 0x5F, 0xB0, 0x1D, 0x86, 0x63, 0x2A, 0xF7, 0x4C, 0x98, 0x0E, 0xD1, 0x7B, 0x25, 0xBE,
];

fn random_values(n: usize, rng: &mut impl Rng) -> Vec<i64> {
    (0..n).map(|_| rng.gen_range(1..=1000)).collect()
}

fn random_ranges(n: usize, count: usize, rng: &mut impl Rng) -> Vec<(usize, usize)> {
    (0..count)
        .map(|_| {
            let (a, b) = (rng.gen_range(0..n), rng.gen_range(0..n));
            (a.min(b), a.max(b))
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    let mut rng = ChaCha20Rng::from_seed(SEED);
    for n in [1_000, 100_000] {
        let values = random_values(n, &mut rng);
        group.bench_with_input(BenchmarkId::new("sum", n), &values, |b, values| {
            b.iter(|| SegmentTree::new(black_box(values), Operation::Sum).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("lazy-sum", n), &values, |b, values| {
            b.iter(|| SegmentTree::new_lazy(black_box(values), Operation::Sum).unwrap())
        });
    }
    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");
    let mut rng = ChaCha20Rng::from_seed(SEED);
    let n = 100_000;
    let values = random_values(n, &mut rng);
    let ranges = random_ranges(n, 1_000, &mut rng);
    for op in [Operation::Sum, Operation::Min, Operation::Max] {
        let mut st = SegmentTree::new(&values, op).unwrap();
        group.bench_function(BenchmarkId::new("plain", op), |b| {
            b.iter(|| {
                for &(l, r) in &ranges {
                    black_box(st.query(l..=r).unwrap());
                }
            })
        });
    }
    group.finish();
}

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("update");
    let mut rng = ChaCha20Rng::from_seed(SEED);
    let n = 100_000;
    let values = random_values(n, &mut rng);
    let points = (0..1_000)
        .map(|_| (rng.gen_range(0..n), rng.gen_range(1..=1000)))
        .collect::<Vec<_>>();
    let ranges = random_ranges(n, 1_000, &mut rng);

    let mut st = SegmentTree::new(&values, Operation::Sum).unwrap();
    group.bench_function("point", |b| {
        b.iter(|| {
            for &(i, v) in &points {
                st.update_point(i, v).unwrap();
            }
        })
    });
    for op in [Operation::Sum, Operation::Min, Operation::Max] {
        let mut st = SegmentTree::new_lazy(&values, op).unwrap();
        group.bench_function(BenchmarkId::new("range-then-query", op), |b| {
            b.iter(|| {
                for &(l, r) in &ranges {
                    st.update_range(l..=r, 1).unwrap();
                    black_box(st.query(r / 2..=r).unwrap());
                }
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_query, bench_update);
criterion_main!(benches);
