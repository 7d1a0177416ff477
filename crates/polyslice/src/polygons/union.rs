//! Set-level booleans built on the pairwise polygon operations.

use crate::clip::{ClipOp, Clipper, Fill, Kernel, Path};
use crate::polygon::Polygon;

use super::{from_shapes, to_paths};

/// Merge overlapping polygons.
///
/// Pairs whose bounds do not overlap are never sent to the clipper, and a
/// pair that comes back as its two inputs counts as no merge. Merged
/// results are appended and take part in later merges. Without `all`, only
/// merges that yield exactly one polygon are accepted.
pub fn union<C: Clipper>(polys: &[Polygon], min_area: f64, all: bool, k: &Kernel<C>) -> Vec<Polygon> {
    if polys.len() < 2 {
        return polys.to_vec();
    }
    let mut out: Vec<Option<Polygon>> = polys.iter().cloned().map(Some).collect();
    let mut i = 0;
    'outer: while i < out.len() {
        if out[i].is_none() {
            i += 1;
            continue;
        }
        for j in i + 1..out.len() {
            let merged = match (&out[i], &out[j]) {
                (Some(a), Some(b)) => a.union(b, min_area, all, k),
                _ => continue,
            };
            if let Some(merged) = merged {
                out[i] = None;
                out[j] = None;
                out.extend(merged.into_iter().map(Some));
                i += 1;
                continue 'outer;
            }
        }
        i += 1;
    }
    out.into_iter().flatten().collect()
}

/// Fold the set with pairwise symmetric differences, in order.
pub fn xor<C: Clipper>(polys: &[Polygon], k: &Kernel<C>) -> Vec<Polygon> {
    let Some(first) = polys.first() else {
        return Vec::new();
    };
    let z = first.z();
    let mut acc = vec![first.clone()];
    for p in &polys[1..] {
        let shapes = k.clip.boolean(
            &to_paths(&acc),
            &to_paths(std::slice::from_ref(p)),
            ClipOp::Xor,
            Fill::NonZero,
        );
        acc = from_shapes(&shapes, z, k.cfg.min_area);
    }
    acc
}

/// `a - b` (when `want_a`) and `b - a` (when `want_b`), even-odd filled,
/// pieces under `min_area` dropped.
pub fn subtract<C: Clipper>(
    a: &[Polygon],
    b: &[Polygon],
    want_a: bool,
    want_b: bool,
    z: f64,
    min_area: f64,
    k: &Kernel<C>,
) -> (Vec<Polygon>, Vec<Polygon>) {
    let pa = to_paths(a);
    let pb = to_paths(b);
    let run = |s: &[Path], c: &[Path]| {
        let shapes = k.clip.boolean(s, c, ClipOp::Difference, Fill::EvenOdd);
        from_shapes(&shapes, z, min_area)
    };
    let out_a = if want_a { run(&pa, &pb) } else { Vec::new() };
    let out_b = if want_b { run(&pb, &pa) } else { Vec::new() };
    (out_a, out_b)
}

/// `a - b` with no area floor.
pub fn diff<C: Clipper>(a: &[Polygon], b: &[Polygon], z: f64, k: &Kernel<C>) -> Vec<Polygon> {
    subtract(a, b, true, false, z, 0.0, k).0
}

/// Every piece of `a` that lies inside some polygon of `b`.
pub fn trim_to<C: Clipper>(a: &[Polygon], b: &[Polygon], k: &Kernel<C>) -> Vec<Polygon> {
    let mut out = Vec::new();
    for pa in a {
        for pb in b {
            if let Some(mut masked) = pa.mask(pb, false, k) {
                out.append(&mut masked);
            }
        }
    }
    out
}
