//! Boolean and offset engine behind one trait.
//!
//! Purpose
//! - `Clipper` is the only seam to the polygon-clipping library. Callers hand
//!   it flat paths and get back a path tree (`Shape`: outer ring + holes).
//! - Two strategies: `OverlayClipper` (floating point) and `GridClipper`
//!   (snaps every coordinate to a `1/scale` grid around another clipper).
//! - Offsetting is built on the boolean contract (`band`), so every backend
//!   supports it.
//! - `Kernel` bundles the chosen backend with the tolerances; every polygon
//!   operation takes one.

mod band;
mod grid;
mod overlay;

pub use grid::GridClipper;
pub use overlay::OverlayClipper;

use crate::geom::GeomCfg;

/// Open or closed ring of `[x, y]` coordinates; closure is implicit.
pub type Path = Vec<[f64; 2]>;

/// One node of a clip result: an outer ring and the holes directly inside it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Shape {
    pub outer: Path,
    pub holes: Vec<Path>,
}

impl Shape {
    /// First contour is the outer ring, the rest are holes. Degenerate rings are dropped.
    pub fn from_contours(contours: Vec<Path>) -> Option<Shape> {
        let mut rings = contours.into_iter().filter(|c| c.len() >= 3);
        let outer = rings.next()?;
        Some(Shape {
            outer,
            holes: rings.collect(),
        })
    }

    /// Rings with outer counterclockwise and holes clockwise.
    pub fn oriented_paths(&self, out: &mut Vec<Path>) {
        let mut outer = self.outer.clone();
        orient(&mut outer, true);
        out.push(outer);
        for hole in &self.holes {
            let mut h = hole.clone();
            orient(&mut h, false);
            out.push(h);
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClipOp {
    Union,
    Intersect,
    Difference,
    Xor,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fill {
    EvenOdd,
    NonZero,
}

/// How path ends are treated by `Clipper::offset`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ends {
    Closed,
    OpenSquare,
    OpenRound,
}

pub trait Clipper {
    /// Apply `op` between the regions described by `subject` and `clip`,
    /// each interpreted with `fill`.
    fn boolean(&self, subject: &[Path], clip: &[Path], op: ClipOp, fill: Fill) -> Vec<Shape>;

    /// Grow (`delta > 0`) or shrink (`delta < 0`) the region. Joins are round
    /// within `arc_tolerance`. Open paths only grow.
    fn offset(&self, paths: &[Path], delta: f64, ends: Ends, arc_tolerance: f64) -> Vec<Shape> {
        band::offset(self, paths, delta, ends, arc_tolerance)
    }
}

/// Tolerances plus the clipping backend.
#[derive(Clone, Copy, Debug, Default)]
pub struct Kernel<C = OverlayClipper> {
    pub cfg: GeomCfg,
    pub clip: C,
}

impl Kernel {
    pub fn new(cfg: GeomCfg) -> Self {
        Self {
            cfg,
            clip: OverlayClipper,
        }
    }
}

impl Kernel<GridClipper> {
    /// Grid-snapping backend at `cfg.clip_scale`.
    pub fn grid(cfg: GeomCfg) -> Self {
        Self {
            cfg,
            clip: GridClipper::new(cfg.clip_scale),
        }
    }
}

impl<C: Clipper> Kernel<C> {
    pub fn with_clip(cfg: GeomCfg, clip: C) -> Self {
        Self { cfg, clip }
    }
}

/// Shoelace area; positive when counterclockwise.
pub fn signed_area(path: &[[f64; 2]]) -> f64 {
    let n = path.len();
    if n < 3 {
        return 0.0;
    }
    let twice: f64 = (0..n)
        .map(|i| {
            let (a, b) = (path[i], path[(i + 1) % n]);
            a[0] * b[1] - b[0] * a[1]
        })
        .sum();
    twice / 2.0
}

/// Reverse `path` in place unless it already has the requested orientation.
pub fn orient(path: &mut Path, ccw: bool) {
    if (signed_area(path) > 0.0) != ccw {
        path.reverse();
    }
}

#[cfg(test)]
mod tests;
