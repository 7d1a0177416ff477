//! Operations over sets of polygons.
//!
//! Purpose
//! - Nesting (`nest`), winding normalization, offsets and insets with gap
//!   analysis, merge-aware union, set subtraction, fingerprints, directional
//!   fill lines, ray crossings and open-chain healing.
//! - Every function takes a `Kernel` (tolerances + clipper) or a `GeomCfg`
//!   when no clipping is involved. Inputs are borrowed; results are new
//!   polygons.
//!
//! References
//! - Code cross-refs: `Polygon`, `clip::Clipper`, `slicer::slice_z`

mod fill;
mod fingerprint;
mod heal;
mod nest;
mod offset;
mod union;

pub use fill::{fill_area, ray_intersect, FillLine, FillLines, RayHit};
pub use fingerprint::{fingerprint, fingerprint_compare, Print};
pub use heal::{heal_open, Healed};
pub use nest::{align_windings, nest, set_winding};
pub use offset::{
    expand, expand_lines, expand_passes, inset, offset, InsetLayer, OffsetDist, OffsetOpts,
    OffsetOutput,
};
pub use union::{diff, subtract, trim_to, union, xor};

use crate::clip::{Path, Shape};
use crate::geom::Point;
use crate::polygon::Polygon;

/// Set every point (holes included) to `z`.
pub fn set_z(polys: &mut [Polygon], z: f64) {
    for p in polys {
        p.set_z(z);
    }
}

/// Total point count including holes.
pub fn point_count(polys: &[Polygon]) -> usize {
    polys.iter().map(Polygon::deep_len).sum()
}

/// Every polygon and hole as its own shallow polygon.
pub fn flatten(polys: &[Polygon]) -> Vec<Polygon> {
    let mut out = Vec::new();
    for p in polys {
        p.flatten_to(&mut out);
    }
    out
}

/// Rings of every polygon, outer counterclockwise and holes clockwise.
pub fn to_paths(polys: &[Polygon]) -> Vec<Path> {
    let mut out = Vec::new();
    for p in polys {
        p.to_paths(&mut out);
    }
    out
}

/// Rebuild polygons from a clip result, dropping rings under `min_area`.
pub fn from_shapes(shapes: &[Shape], z: f64, min_area: f64) -> Vec<Polygon> {
    shapes
        .iter()
        .filter_map(|s| Polygon::from_shape(s, z, min_area))
        .collect()
}

/// Visit order through polygon centers, nearest neighbour first, starting
/// with the polygon whose center is closest to `start`. Returns indices.
pub fn route(polys: &[Polygon], start: &Point) -> Vec<usize> {
    let centers: Vec<Point> = polys.iter().map(Polygon::average).collect();
    let mut used = vec![false; polys.len()];
    let mut order = Vec::with_capacity(polys.len());
    let mut from = *start;
    while order.len() < polys.len() {
        let next = centers
            .iter()
            .enumerate()
            .filter(|(i, _)| !used[*i])
            .map(|(i, c)| (i, c.dist_to_sq_2d(&from)))
            .reduce(|a, b| if b.1 < a.1 { b } else { a });
        let Some((i, _)) = next else { break };
        used[i] = true;
        order.push(i);
        from = centers[i];
    }
    order
}
