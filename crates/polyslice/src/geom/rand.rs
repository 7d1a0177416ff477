//! Random star-shaped polygons (radial jitter + replay tokens).
//!
//! Purpose
//! - Deterministic polygon soups for benches and randomized tests.
//!
//! Model
//! - `n` angles on [0, 2π) with bounded angular jitter, sorted, each at a
//!   jittered radius. Sorting by angle keeps the ring simple (star-shaped
//!   around the origin), which is all the boolean benches need.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::point::Point;
use crate::polygon::Polygon;

/// Vertex count distribution.
#[derive(Clone, Copy, Debug)]
pub enum VertexCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}
impl VertexCount {
    fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        match *self {
            VertexCount::Fixed(n) => n.max(3),
            VertexCount::Uniform { min, max } => {
                let lo = min.max(3);
                let hi = max.max(lo);
                rng.gen_range(lo..=hi)
            }
        }
    }
}

/// Radial-jitter sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct RadialCfg {
    pub vertex_count: VertexCount,
    /// Angular jitter as a fraction of the base spacing. Clamped to [0, 0.49].
    pub angle_jitter_frac: f64,
    /// Relative radial amplitude; radii are `base_radius * (1 + u)`, `|u| <= radial_jitter`.
    pub radial_jitter: f64,
    pub base_radius: f64,
}
impl Default for RadialCfg {
    fn default() -> Self {
        Self {
            vertex_count: VertexCount::Fixed(12),
            angle_jitter_frac: 0.3,
            radial_jitter: 0.25,
            base_radius: 1.0,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}
impl ReplayToken {
    pub fn new(seed: u64, index: u64) -> Self {
        Self { seed, index }
    }
    #[inline]
    fn rng(self) -> StdRng {
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        StdRng::seed_from_u64(mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15))))
    }
}

/// One star-shaped polygon centered on `center`.
pub fn draw_polygon_radial(cfg: RadialCfg, center: Point, tok: ReplayToken) -> Polygon {
    let mut rng = tok.rng();
    draw_with(&mut rng, cfg, center)
}

fn draw_with<R: Rng>(rng: &mut R, cfg: RadialCfg, center: Point) -> Polygon {
    let n = cfg.vertex_count.sample(rng);
    let aj = cfg.angle_jitter_frac.clamp(0.0, 0.49);
    let rj = cfg.radial_jitter.clamp(0.0, 0.95);
    let r0 = cfg.base_radius.max(1e-6);
    let delta = std::f64::consts::TAU / (n as f64);
    let mut angles: Vec<f64> = (0..n)
        .map(|k| (k as f64) * delta + (rng.gen::<f64>() * 2.0 - 1.0) * aj * delta)
        .collect();
    angles.sort_by(f64::total_cmp);
    let points = angles.into_iter().map(|th| {
        let r = (1.0 + (rng.gen::<f64>() * 2.0 - 1.0) * rj) * r0;
        Point::new(center.x + th.cos() * r, center.y + th.sin() * r, center.z)
    });
    Polygon::from_points(points)
}

/// `count` polygons with centers uniform in `[0, spread]²`.
pub fn draw_soup(cfg: RadialCfg, count: usize, spread: f64, tok: ReplayToken) -> Vec<Polygon> {
    let mut rng = tok.rng();
    (0..count)
        .map(|_| {
            let center = Point::xy(rng.gen::<f64>() * spread, rng.gen::<f64>() * spread);
            draw_with(&mut rng, cfg, center)
        })
        .collect()
}
