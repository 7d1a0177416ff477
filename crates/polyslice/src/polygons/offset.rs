//! Multi-pass offsets, insets and gap analysis.
//!
//! Model
//! - Positive distances grow regions, negative distances shrink them.
//! - Pass `n + 1` offsets the output of pass `n`; passes stop early once a
//!   pass vanishes.
//! - A gap is the part of a pass's input that the offset cannot reach back
//!   to: `input - offset(offset(input, d), -d)`, or the whole input when the
//!   pass vanished. Thin walls show up here.

use crate::clip::{Clipper, Ends, Kernel};
use crate::error::{Error, Result};
use crate::polygon::Polygon;

use super::{align_windings, from_shapes, point_count, set_winding, subtract, to_paths};

/// Distance of the first pass and of every later pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OffsetDist {
    pub first: f64,
    pub next: f64,
}

impl OffsetDist {
    pub fn fixed(dist: f64) -> Self {
        Self {
            first: dist,
            next: dist,
        }
    }
    pub fn stepped(first: f64, next: f64) -> Self {
        Self { first, next }
    }
}

impl From<f64> for OffsetDist {
    fn from(dist: f64) -> Self {
        Self::fixed(dist)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OffsetOpts {
    /// Number of passes; at least 1.
    pub count: usize,
    /// Rings under this area are dropped; defaults to `GeomCfg::min_area`.
    pub min_area: Option<f64>,
    /// Z given to every output point.
    pub z: f64,
    /// Collect gap regions per pass.
    pub gaps: bool,
}

impl Default for OffsetOpts {
    fn default() -> Self {
        Self {
            count: 1,
            min_area: None,
            z: 0.0,
            gaps: false,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct OffsetOutput {
    /// One entry per pass that produced anything.
    pub passes: Vec<Vec<Polygon>>,
    pub gaps: Vec<Polygon>,
}

impl OffsetOutput {
    pub fn first(&self) -> &[Polygon] {
        self.passes.first().map(Vec::as_slice).unwrap_or(&[])
    }
    pub fn last(&self) -> &[Polygon] {
        self.passes.last().map(Vec::as_slice).unwrap_or(&[])
    }
    /// Every pass, in order, as one list.
    pub fn flat(self) -> Vec<Polygon> {
        self.passes.into_iter().flatten().collect()
    }
}

fn offset_once<C: Clipper>(polys: &[Polygon], dist: f64, z: f64, min_area: f64, k: &Kernel<C>) -> Vec<Polygon> {
    if polys.is_empty() {
        return Vec::new();
    }
    let paths = to_paths(polys);
    let shapes = k.clip.offset(&paths, dist, Ends::Closed, k.cfg.arc_tolerance);
    from_shapes(&shapes, z, min_area)
}

/// Offset closed polygons by `dist` in one or more passes.
///
/// Open polygons are ignored. Windings are aligned first so holes run
/// against their parents.
pub fn offset<C: Clipper>(
    polys: &[Polygon],
    dist: impl Into<OffsetDist>,
    opts: &OffsetOpts,
    k: &Kernel<C>,
) -> Result<OffsetOutput> {
    if opts.count == 0 {
        return Err(Error::OffsetCount);
    }
    let dist = dist.into();
    let min_area = opts.min_area.unwrap_or(k.cfg.min_area);
    let mut current: Vec<Polygon> = polys.iter().filter(|p| !p.open).cloned().collect();
    align_windings(&mut current);
    for p in &mut current {
        let cw = p.is_clockwise();
        set_winding(p.inner_mut(), !cw, false);
    }

    let mut out = OffsetOutput::default();
    for pass in 0..opts.count {
        let d = if pass == 0 { dist.first } else { dist.next };
        let next = offset_once(&current, d, opts.z, min_area, k);
        tracing::debug!(pass, dist = d, polys = next.len(), points = point_count(&next), "offset pass");
        if opts.gaps {
            if next.is_empty() {
                out.gaps.extend(current.iter().cloned());
            } else {
                let back = offset_once(&next, -d, opts.z, min_area, k);
                let (gaps, _) = subtract(&current, &back, true, false, opts.z, k.cfg.min_area, k);
                out.gaps.extend(gaps);
            }
        }
        if next.is_empty() {
            break;
        }
        out.passes.push(next.clone());
        current = next;
    }
    Ok(out)
}

/// Single-pass offset of closed polygons; positive grows.
pub fn expand<C: Clipper>(polys: &[Polygon], dist: f64, z: f64, k: &Kernel<C>) -> Vec<Polygon> {
    let closed: Vec<Polygon> = polys.iter().filter(|p| !p.open).cloned().collect();
    offset_once(&closed, dist, z, k.cfg.min_area, k)
}

/// `count` passes (first by `dist`, then by `dist2`) flattened into one list.
pub fn expand_passes<C: Clipper>(
    polys: &[Polygon],
    dist: f64,
    z: f64,
    count: usize,
    dist2: Option<f64>,
    min_area: Option<f64>,
    k: &Kernel<C>,
) -> Result<Vec<Polygon>> {
    let opts = OffsetOpts {
        count,
        min_area,
        z,
        gaps: false,
    };
    let dist = OffsetDist::stepped(dist, dist2.unwrap_or(dist));
    Ok(offset(polys, dist, &opts, k)?.flat())
}

/// Outline around an open polyline, square ends, `dist` on each side.
pub fn expand_lines<C: Clipper>(poly: &Polygon, dist: f64, z: f64, k: &Kernel<C>) -> Vec<Polygon> {
    let path: Vec<[f64; 2]> = poly.points().iter().map(|p| [p.x, p.y]).collect();
    let shapes = k
        .clip
        .offset(&[path], dist, Ends::OpenSquare, k.cfg.arc_tolerance);
    from_shapes(&shapes, z, 0.0)
}

/// One inset step: the shell (`off`), the shell grown back by half the
/// distance (`mid`, the toolpath line) and the thin-wall candidates (`gap`).
#[derive(Clone, Debug, Default)]
pub struct InsetLayer {
    /// 1-based step number.
    pub idx: usize,
    pub off: Vec<Polygon>,
    pub mid: Vec<Polygon>,
    pub gap: Vec<Polygon>,
}

/// Progressive insets of `dist`, up to `count` layers.
///
/// Each layer shrinks the previous shell, then grows it back by the full
/// distance; whatever of the previous shell is not recovered becomes a gap,
/// provided the recovered area differs by more than 0.1 %. `mid` polygons
/// are numbered with increasing depth across layers; their holes share it.
pub fn inset<C: Clipper>(
    polys: &[Polygon],
    dist: f64,
    count: usize,
    z: f64,
    k: &Kernel<C>,
) -> Result<Vec<InsetLayer>> {
    if count == 0 {
        return Err(Error::OffsetCount);
    }
    let opts = OffsetOpts {
        z,
        ..OffsetOpts::default()
    };
    let mut layers = Vec::new();
    let mut reference: Vec<Polygon> = polys.to_vec();
    let mut depth = 0;
    for idx in 1..=count {
        if reference.is_empty() {
            break;
        }
        let off = offset(&reference, -dist, &opts, k)?.flat();
        let mut mid = offset(&off, dist / 2.0, &opts, k)?.flat();
        let cmp = offset(&off, dist, &opts, k)?.flat();

        let aref: f64 = reference.iter().map(Polygon::area_deep).sum();
        let acmp: f64 = cmp.iter().map(Polygon::area_deep).sum();
        let gap = if (aref - acmp).abs() > aref.abs() / 1000.0 {
            subtract(&reference, &cmp, true, false, z, k.cfg.min_area, k).0
        } else {
            Vec::new()
        };

        for m in &mut mid {
            m.depth = depth;
            depth += 1;
            let d = m.depth;
            for hole in m.inner_mut() {
                hole.depth = d;
            }
        }
        layers.push(InsetLayer { idx, off: off.clone(), mid, gap });
        reference = off;
    }
    Ok(layers)
}
