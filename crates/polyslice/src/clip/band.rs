//! Offsetting as a boolean of edge bands.
//!
//! Model
//! - The Minkowski sum of a region with a disk of radius `d` is the region
//!   plus, for every edge, the rectangle swept by the disk along it and, for
//!   every vertex, the disk itself. Shrinking subtracts the same bands.
//! - Disks are regular polygons inscribed in the true circle, with enough
//!   sides that no chord strays more than `arc_tolerance` from the arc.
//! - Region rings are normalized first (non-zero union), then oriented outer
//!   counterclockwise / holes clockwise so the non-zero pass sees them right.

use std::f64::consts::PI;

use super::{orient, ClipOp, Clipper, Ends, Fill, Path, Shape};

const MIN_SIDES: usize = 8;
const MAX_SIDES: usize = 256;

pub(super) fn offset<C: Clipper + ?Sized>(
    clip: &C,
    paths: &[Path],
    delta: f64,
    ends: Ends,
    arc_tolerance: f64,
) -> Vec<Shape> {
    match ends {
        Ends::Closed => {
            let region = clip.boolean(paths, &[], ClipOp::Union, Fill::NonZero);
            if delta == 0.0 || region.is_empty() {
                return region;
            }
            let mut rings = Vec::new();
            for shape in &region {
                shape.oriented_paths(&mut rings);
            }
            let d = delta.abs();
            let mut bands = Vec::new();
            for ring in &rings {
                ring_bands(ring, d, arc_tolerance, &mut bands);
            }
            let op = if delta > 0.0 {
                ClipOp::Union
            } else {
                ClipOp::Difference
            };
            clip.boolean(&rings, &bands, op, Fill::NonZero)
        }
        Ends::OpenSquare | Ends::OpenRound => {
            if delta <= 0.0 {
                return Vec::new();
            }
            let mut bands = Vec::new();
            for path in paths.iter().filter(|p| !p.is_empty()) {
                open_bands(path, delta, arc_tolerance, ends, &mut bands);
            }
            clip.boolean(&bands, &[], ClipOp::Union, Fill::NonZero)
        }
    }
}

pub(super) fn sides(radius: f64, arc_tolerance: f64) -> usize {
    if arc_tolerance >= radius {
        return MIN_SIDES;
    }
    let half = (1.0 - arc_tolerance / radius).acos();
    if half <= 0.0 || !half.is_finite() {
        return MAX_SIDES;
    }
    ((PI / half).ceil() as usize).clamp(MIN_SIDES, MAX_SIDES)
}

fn disk(c: [f64; 2], radius: f64, n: usize) -> Path {
    (0..n)
        .map(|i| {
            let a = 2.0 * PI * i as f64 / n as f64;
            [c[0] + a.cos() * radius, c[1] + a.sin() * radius]
        })
        .collect()
}

/// Rectangle of half-width `d` around `a..b`, stretched by `ext_a`/`ext_b`
/// past each end. `None` for a zero-length edge.
fn edge_rect(a: [f64; 2], b: [f64; 2], d: f64, ext_a: f64, ext_b: f64) -> Option<Path> {
    let (dx, dy) = (b[0] - a[0], b[1] - a[1]);
    let len = (dx * dx + dy * dy).sqrt();
    if len == 0.0 {
        return None;
    }
    let (ux, uy) = (dx / len, dy / len);
    let (nx, ny) = (-uy * d, ux * d);
    let a = [a[0] - ux * ext_a, a[1] - uy * ext_a];
    let b = [b[0] + ux * ext_b, b[1] + uy * ext_b];
    let mut rect = vec![
        [a[0] - nx, a[1] - ny],
        [b[0] - nx, b[1] - ny],
        [b[0] + nx, b[1] + ny],
        [a[0] + nx, a[1] + ny],
    ];
    orient(&mut rect, true);
    Some(rect)
}

fn ring_bands(ring: &Path, d: f64, arc_tolerance: f64, out: &mut Vec<Path>) {
    let n = ring.len();
    for i in 0..n {
        if let Some(rect) = edge_rect(ring[i], ring[(i + 1) % n], d, 0.0, 0.0) {
            out.push(rect);
        }
    }
    let k = sides(d, arc_tolerance);
    for p in ring {
        out.push(disk(*p, d, k));
    }
}

fn open_bands(path: &Path, d: f64, arc_tolerance: f64, ends: Ends, out: &mut Vec<Path>) {
    let n = path.len();
    let k = sides(d, arc_tolerance);
    if n == 1 {
        match ends {
            Ends::OpenRound => out.push(disk(path[0], d, k)),
            _ => {
                let [x, y] = path[0];
                out.push(vec![[x - d, y - d], [x + d, y - d], [x + d, y + d], [x - d, y + d]]);
            }
        }
        return;
    }
    let square = ends == Ends::OpenSquare;
    for i in 0..n - 1 {
        let ext_a = if square && i == 0 { d } else { 0.0 };
        let ext_b = if square && i == n - 2 { d } else { 0.0 };
        if let Some(rect) = edge_rect(path[i], path[i + 1], d, ext_a, ext_b) {
            out.push(rect);
        }
    }
    for (i, p) in path.iter().enumerate() {
        let end = i == 0 || i == n - 1;
        if !end || !square {
            out.push(disk(*p, d, k));
        }
    }
}
