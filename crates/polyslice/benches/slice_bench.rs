//! Criterion benchmarks for mesh slicing.
//! Mesh: closed UV sphere of radius 10 with `rings` latitude bands.
//! Results: by default under target/criterion.

use std::f64::consts::{PI, TAU};

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use polyslice::prelude::*;

fn sphere(rings: usize, segments: usize, radius: f64) -> TriangleBuffer {
    let at = |i: usize, j: usize| {
        let (theta, phi) = (PI * i as f64 / rings as f64, TAU * j as f64 / segments as f64);
        [
            radius * theta.sin() * phi.cos(),
            radius * theta.sin() * phi.sin(),
            radius * theta.cos(),
        ]
    };
    let mut coords = Vec::with_capacity(rings * segments * 18);
    for i in 0..rings {
        for j in 0..segments {
            let (a, b, c, d) = (at(i, j), at(i + 1, j), at(i + 1, j + 1), at(i, j + 1));
            if i > 0 {
                coords.extend(a.iter().chain(&b).chain(&d));
            }
            if i + 1 < rings {
                coords.extend(b.iter().chain(&c).chain(&d));
            }
        }
    }
    TriangleBuffer::new(coords).unwrap()
}

fn bench_slice(c: &mut Criterion) {
    let k = Kernel::new(GeomCfg::default());
    let opts = SliceOpts::default();
    let mut group = c.benchmark_group("slicer");
    for &rings in &[16usize, 64, 128] {
        let buf = sphere(rings, rings * 2, 10.0);
        group.bench_with_input(BenchmarkId::new("slice_z_equator", rings), &buf, |b, buf| {
            b.iter(|| slice_z(buf, 0.1, &opts, &k))
        });
        group.bench_with_input(BenchmarkId::new("slice_step_0.5", rings), &buf, |b, buf| {
            b.iter(|| slice(buf, &ZPlan::Step { step: 0.5 }, &opts, &k).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_slice);
criterion_main!(benches);
