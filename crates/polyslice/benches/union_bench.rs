//! Criterion benchmarks for set unions and offsets over random polygon soups.
//! Focus sizes: n in {10, 50, 100} star-shaped polygons of 12 to 40 vertices.
//! Results: by default under target/criterion.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use polyslice::polygons::{offset, union, OffsetOpts};
use polyslice::prelude::*;

fn soup(n: usize, seed: u64) -> Vec<Polygon> {
    let cfg = RadialCfg {
        vertex_count: VertexCount::Uniform { min: 12, max: 40 },
        base_radius: 3.0,
        ..RadialCfg::default()
    };
    // spread grows with n so overlap density stays comparable
    draw_soup(cfg, n, (n as f64).sqrt() * 6.0, ReplayToken::new(seed, 0))
}

fn bench_union(c: &mut Criterion) {
    let k = Kernel::new(GeomCfg::default());
    let mut group = c.benchmark_group("polygons");
    for &n in &[10usize, 50, 100] {
        group.bench_with_input(BenchmarkId::new("union", n), &n, |b, &n| {
            b.iter_batched(
                || soup(n, 41),
                |polys| {
                    let _merged = union(&polys, 0.1, true, &k);
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("offset_3_passes", n), &n, |b, &n| {
            let opts = OffsetOpts {
                count: 3,
                ..OffsetOpts::default()
            };
            b.iter_batched(
                || soup(n, 42),
                |polys| {
                    let _out = offset(&polys, -0.4, &opts, &k).unwrap();
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_union);
criterion_main!(benches);
