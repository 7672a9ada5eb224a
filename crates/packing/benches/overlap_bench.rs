//! Criterion benchmarks for the periodic overlap check and search steps.
//! Groups: general position of p1, p2gg, c2mm and p6mm (1 to 12 images).
//! Results: by default under target/criterion.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use packing::packed::{greedy, PackedState, SearchCfg};
use packing::shape::Shape;
use packing::symmetry::Catalogue;
use rand::{rngs::StdRng, SeedableRng};

fn bench_overlap(c: &mut Criterion) {
    let catalogue = Catalogue::standard().unwrap();
    let square = Shape::square();
    let cfg = SearchCfg::default();
    let mut group = c.benchmark_group("overlap");
    for label in ["p1", "p2gg", "c2mm", "p6mm"] {
        let wallpaper = catalogue.get(label).unwrap();
        let mut rng = StdRng::seed_from_u64(43);
        let state = PackedState::initialise(&square, wallpaper, &[0], &cfg, &mut rng).unwrap();
        group.bench_with_input(BenchmarkId::new("has_overlap", label), &state, |b, s| {
            b.iter(|| s.has_overlap())
        });
        group.bench_with_input(BenchmarkId::new("instances", label), &state, |b, s| {
            b.iter(|| s.instances())
        });
        group.bench_with_input(BenchmarkId::new("step", label), &state, |b, s| {
            b.iter_batched(
                || (s.clone(), StdRng::seed_from_u64(7)),
                |(mut s, mut rng)| {
                    let _ = s.step(&mut rng, greedy);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_overlap);
criterion_main!(benches);
