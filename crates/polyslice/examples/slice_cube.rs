//! Slice a hollow square tube and print each layer's outline.
//!
//! Usage:
//!   cargo run -p polyslice --example slice_cube
//!   cargo run -p polyslice --example slice_cube -- 0.25
//!
//! Prints, per layer: z, outline count, hole count and area net of holes,
//! then one layer as wire JSON.

use polyslice::api::wire_encode;
use polyslice::prelude::*;

fn quad(out: &mut Vec<f64>, a: [f64; 3], b: [f64; 3], c: [f64; 3], d: [f64; 3]) {
    for v in [a, b, c, a, c, d] {
        out.extend(v);
    }
}

fn tube_walls(out: &mut Vec<f64>, half: f64, height: f64) {
    let ring = [[-half, -half], [half, -half], [half, half], [-half, half]];
    for i in 0..4 {
        let (p, q) = (ring[i], ring[(i + 1) % 4]);
        quad(
            out,
            [p[0], p[1], 0.0],
            [q[0], q[1], 0.0],
            [q[0], q[1], height],
            [p[0], p[1], height],
        );
    }
}

fn main() {
    let step: f64 = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(1.0);
    let mut coords = Vec::new();
    tube_walls(&mut coords, 10.0, 5.0);
    tube_walls(&mut coords, 6.0, 5.0);
    let buf = TriangleBuffer::new(coords).unwrap();
    let k = Kernel::new(GeomCfg::default());
    let set = slice(&buf, &ZPlan::Step { step }, &SliceOpts::default(), &k).unwrap();
    for s in &set.slices {
        let holes: usize = s.tops.iter().map(|t| t.inner().len()).sum();
        let area: f64 = s.tops.iter().map(Polygon::area_deep).sum();
        println!(
            "z={:.3}: tops={}, holes={}, area={:.3}",
            s.z,
            s.tops.len(),
            holes,
            area
        );
    }
    if let Some(mid) = set.slices.get(set.slices.len() / 2) {
        println!("{}", serde_json::to_string(&wire_encode(&mid.tops)).unwrap());
    }
}
