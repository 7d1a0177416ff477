//! Mesh cross-sections.
//!
//! Purpose
//! - Cut a triangle mesh with horizontal planes and rebuild the outline at
//!   each height as nested polygons.
//! - `slice_z` handles one plane; `slice` plans the heights (`ZPlan`),
//!   indexes triangles by height and runs `slice_z` for each plane.
//!
//! Model
//! - A vertex is "on" the plane within `GeomCfg::slice_z`, else under or
//!   over it. Triangles entirely on one side are skipped; triangles lying
//!   in the plane are dropped (their neighbours contribute the outline).
//! - A triangle with exactly one edge in the plane contributes that edge
//!   when its third vertex is on the selected side, or when the plane is
//!   the mesh's top (`Over`) or bottom (`Under`).
//! - Points go through a `PointKey` cache so lines meeting at a vertex share
//!   one point; duplicate lines are removed and collinear runs merged
//!   before stitching.
//!
//! References
//! - Code cross-refs: `remove_duplicate_lines`, `polygons::heal_open`,
//!   `polygons::nest`

mod connect;
mod dedup;

pub use dedup::remove_duplicate_lines;

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::clip::{Clipper, Kernel};
use crate::error::{Error, Result};
use crate::geom::util::triangle_area_3d;
use crate::geom::{Line, Point, PointKey};
use crate::polygon::Polygon;

const PLAN_DECIMALS: i32 = 3;
const PLAN_UNIT: f64 = 0.001;
/// Upper bound on the heights one `Step` plan may produce.
const MAX_PLANES: f64 = 1e6;

/// Flat vertex coordinates, nine per triangle (`x y z` three times).
#[derive(Clone, Debug, PartialEq)]
pub struct TriangleBuffer {
    coords: Vec<f64>,
    z_min: f64,
    z_max: f64,
}

impl TriangleBuffer {
    pub fn new(coords: Vec<f64>) -> Result<Self> {
        if coords.len() % 9 != 0 {
            return Err(Error::TriangleBuffer(coords.len()));
        }
        if let Some(i) = coords.iter().position(|v| !v.is_finite()) {
            return Err(Error::NonFinite(i));
        }
        let (z_min, z_max) = coords
            .iter()
            .skip(2)
            .step_by(3)
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), z| (lo.min(*z), hi.max(*z)));
        let (z_min, z_max) = if coords.is_empty() { (0.0, 0.0) } else { (z_min, z_max) };
        Ok(Self { coords, z_min, z_max })
    }

    pub fn from_f32(coords: &[f32]) -> Result<Self> {
        Self::new(coords.iter().map(|v| f64::from(*v)).collect())
    }

    /// Copy with every coordinate rounded to `decimals` places.
    pub fn rounded(&self, decimals: i32) -> Self {
        let m = 10f64.powi(decimals);
        let coords: Vec<f64> = self.coords.iter().map(|v| (v * m).round() / m).collect();
        Self {
            z_min: (self.z_min * m).round() / m,
            z_max: (self.z_max * m).round() / m,
            coords,
        }
    }

    /// Number of triangles.
    #[inline]
    pub fn len(&self) -> usize {
        self.coords.len() / 9
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }
    #[inline]
    pub fn z_min(&self) -> f64 {
        self.z_min
    }
    #[inline]
    pub fn z_max(&self) -> f64 {
        self.z_max
    }
    pub fn coords(&self) -> &[f64] {
        &self.coords
    }

    pub fn triangle(&self, i: usize) -> [Point; 3] {
        let c = &self.coords[i * 9..i * 9 + 9];
        [
            Point::new(c[0], c[1], c[2]),
            Point::new(c[3], c[4], c[5]),
            Point::new(c[6], c[7], c[8]),
        ]
    }

    pub fn triangles(&self) -> impl Iterator<Item = [Point; 3]> + '_ {
        (0..self.len()).map(|i| self.triangle(i))
    }
}

/// Which side of a plane-lying edge's triangle keeps the edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Selection {
    #[default]
    Over,
    Under,
    /// Keep every plane-lying edge. Yields lines only; nothing is stitched.
    Both,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliceOpts {
    pub select: Selection,
    /// Merge overlapping outlines (heals self-intersecting meshes).
    pub union: bool,
    /// Resolve overlapping outlines by symmetric difference.
    pub xor: bool,
    /// Skip `Polygon::clean` on stitched outlines.
    pub dirty: bool,
}

/// One cross-section.
#[derive(Clone, Debug, Default)]
pub struct Slice {
    pub z: f64,
    /// Deduplicated plane segments.
    pub lines: Vec<Line>,
    /// Top-level outlines with their holes in `inner`.
    pub tops: Vec<Polygon>,
    /// Chains that could not be closed.
    pub open: Vec<Polygon>,
    /// Point count change caused by the union pass, when it ran.
    pub changes: Option<i64>,
}

/// Heights to slice at.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZPlan {
    /// These heights, in any order.
    Explicit(Vec<f64>),
    /// Every `step` from half a step above the bottom of the mesh, while
    /// below its top. `step` must be at least 0.001.
    Step { step: f64 },
    /// Midway between consecutive distinct vertex heights, after dropping
    /// heights closer than `min_step` to the previous one kept.
    Unique { min_step: f64 },
}

#[derive(Clone, Debug, Default)]
pub struct SliceSet {
    /// Ordered by `z`.
    pub slices: Vec<Slice>,
    pub z_min: f64,
    pub z_max: f64,
    /// Area of triangles lying flat at each height, ordered by height.
    pub flats: Vec<(f64, f64)>,
}

fn plan_key(z: f64) -> i64 {
    (z * 10f64.powi(PLAN_DECIMALS)).round() as i64
}

fn round_plan(z: f64) -> f64 {
    let m = 10f64.powi(PLAN_DECIMALS);
    (z * m).round() / m
}

impl ZPlan {
    /// Rounded, sorted, distinct heights. A height landing on a flat face or
    /// an in-plane edge (`marks`) is lifted by one plan unit.
    fn heights(&self, buf: &TriangleBuffer, marks: &BTreeSet<i64>) -> Result<Vec<f64>> {
        let (z_min, z_max) = (buf.z_min(), buf.z_max());
        let zs = match self {
            ZPlan::Explicit(zs) => {
                if let Some(z) = zs.iter().find(|z| !z.is_finite()) {
                    return Err(Error::ZStep(*z));
                }
                zs.clone()
            }
            ZPlan::Step { step } => {
                if !(step.is_finite() && *step >= PLAN_UNIT) || (z_max - z_min) / step > MAX_PLANES {
                    return Err(Error::ZStep(*step));
                }
                (0u32..)
                    .map(|i| z_min + (f64::from(i) + 0.5) * step)
                    .take_while(|z| *z < z_max)
                    .collect()
            }
            ZPlan::Unique { min_step } => {
                if !(*min_step >= 0.0 && min_step.is_finite()) {
                    return Err(Error::ZStep(*min_step));
                }
                let unique: BTreeMap<i64, f64> = buf
                    .coords()
                    .iter()
                    .skip(2)
                    .step_by(3)
                    .map(|z| (plan_key(*z), *z))
                    .collect();
                let mut last: Option<f64> = None;
                let kept: Vec<f64> = unique
                    .into_values()
                    .filter(|z| match last {
                        Some(l) if z - l < *min_step => false,
                        _ => {
                            last = Some(*z);
                            true
                        }
                    })
                    .collect();
                kept.windows(2).map(|w| (w[0] + w[1]) / 2.0).collect()
            }
        };
        let mut zs: Vec<f64> = zs
            .into_iter()
            .map(|z| {
                let z = round_plan(z);
                if marks.contains(&plan_key(z)) {
                    round_plan(z + PLAN_UNIT)
                } else {
                    z
                }
            })
            .collect();
        zs.sort_by(f64::total_cmp);
        zs.dedup_by_key(|z| plan_key(*z));
        Ok(zs)
    }
}

/// Reused per-triangle vertex classification.
#[derive(Default)]
struct Sides {
    on: Vec<Point>,
    over: Vec<Point>,
    under: Vec<Point>,
}

impl Sides {
    fn classify(&mut self, tri: &[Point; 3], z: f64, eps: f64) {
        self.on.clear();
        self.over.clear();
        self.under.clear();
        for p in tri {
            let delta = p.z - z;
            if delta.abs() < eps {
                self.on.push(Point { z, ..*p });
            } else if delta < 0.0 {
                self.under.push(*p);
            } else {
                self.over.push(*p);
            }
        }
    }
}

struct PointCache(HashMap<PointKey, Point>);

impl PointCache {
    fn get(&mut self, p: Point) -> Point {
        *self.0.entry(p.key()).or_insert(p)
    }

    fn line(&mut self, p1: Point, p2: Point, edge: bool) -> Option<Line> {
        let (p1, p2) = (self.get(p1), self.get(p2));
        if p1.key() == p2.key() {
            return None;
        }
        let mut line = Line::ordered(p1, p2);
        line.edge = edge;
        Some(line)
    }
}

/// Plane segments of `tris` at height `z`.
fn plane_lines<'a, I>(tris: I, z: f64, z_min: f64, z_max: f64, select: Selection, eps: f64) -> Vec<Line>
where
    I: IntoIterator<Item = &'a [Point; 3]>,
{
    let at_top = (z - z_max).abs() < eps;
    let at_bottom = (z - z_min).abs() < eps;
    let mut cache = PointCache(HashMap::new());
    let mut sides = Sides::default();
    let mut lines = Vec::new();
    for tri in tris {
        sides.classify(tri, z, eps);
        let (on, over, under) = (sides.on.len(), sides.over.len(), sides.under.len());
        if over == 3 || under == 3 || on == 3 {
            continue;
        }
        if on == 2 {
            let keep = match select {
                Selection::Both => true,
                Selection::Over => over == 1 || at_top,
                Selection::Under => under == 1 || at_bottom,
            };
            if keep {
                lines.extend(cache.line(sides.on[0], sides.on[1], true));
            }
            continue;
        }
        if over == 0 || under == 0 {
            continue;
        }
        let mut pts: Vec<Point> = Vec::with_capacity(2);
        for o in &sides.over {
            for u in &sides.under {
                pts.push(o.intersect_z(u, z));
            }
        }
        if pts.len() < 2 && on == 1 {
            pts.push(sides.on[0]);
        }
        if pts.len() == 2 {
            lines.extend(cache.line(pts[0], pts[1], false));
        } else {
            tracing::trace!(z, crossings = pts.len(), "skipping triangle with odd plane crossings");
        }
    }
    lines
}

fn slice_triangles<'a, I, C>(tris: I, z: f64, z_min: f64, z_max: f64, opts: &SliceOpts, k: &Kernel<C>) -> Slice
where
    I: IntoIterator<Item = &'a [Point; 3]>,
    C: Clipper,
{
    let lines = plane_lines(tris, z, z_min, z_max, opts.select, k.cfg.slice_z);
    let lines = remove_duplicate_lines(lines, &k.cfg);
    if opts.select == Selection::Both {
        return Slice {
            z,
            lines,
            ..Slice::default()
        };
    }
    let stitched = connect::connect(&lines, z, opts, k);
    Slice {
        z,
        lines,
        tops: stitched.tops,
        open: stitched.open,
        changes: stitched.changes,
    }
}

/// Cross-section of the whole buffer at `z`.
pub fn slice_z<C: Clipper>(buf: &TriangleBuffer, z: f64, opts: &SliceOpts, k: &Kernel<C>) -> Slice {
    let tris: Vec<[Point; 3]> = buf.triangles().collect();
    slice_triangles(&tris, z, buf.z_min(), buf.z_max(), opts, k)
}

/// Slice the buffer at every height of `plan`.
///
/// Coordinates are rounded to 3 decimals first. Planned heights that land
/// on a flat face or an in-plane edge move up by 0.001. A mesh without
/// height yields no slices.
pub fn slice<C: Clipper>(buf: &TriangleBuffer, plan: &ZPlan, opts: &SliceOpts, k: &Kernel<C>) -> Result<SliceSet> {
    let buf = buf.rounded(PLAN_DECIMALS);
    let (z_min, z_max) = (buf.z_min(), buf.z_max());

    let mut flat: BTreeMap<i64, (f64, f64)> = BTreeMap::new();
    let mut marks: BTreeSet<i64> = BTreeSet::new();
    let mut tris: Vec<([Point; 3], f64, f64)> = Vec::with_capacity(buf.len());
    for tri in buf.triangles() {
        let [a, b, c] = tri;
        if a.z == b.z && b.z == c.z {
            let e = flat.entry(plan_key(a.z)).or_insert((a.z, 0.0));
            e.1 += triangle_area_3d(&a, &b, &c);
            marks.insert(plan_key(a.z));
        } else if a.z == b.z || a.z == c.z {
            marks.insert(plan_key(a.z));
        } else if b.z == c.z {
            marks.insert(plan_key(b.z));
        }
        let lo = a.z.min(b.z).min(c.z);
        let hi = a.z.max(b.z).max(c.z);
        tris.push((tri, lo, hi));
    }
    let flats: Vec<(f64, f64)> = flat.into_values().collect();
    let zs = plan.heights(&buf, &marks)?;

    if z_max - z_min == 0.0 {
        tracing::debug!(triangles = buf.len(), "mesh has no height; nothing to slice");
        return Ok(SliceSet {
            slices: Vec::new(),
            z_min,
            z_max,
            flats,
        });
    }

    tris.sort_by(|a, b| a.1.total_cmp(&b.1));
    let eps = k.cfg.slice_z;
    let mut slices: Vec<Slice> = zs
        .iter()
        .map(|&z| {
            let end = tris.partition_point(|t| t.1 <= z + eps);
            let live = tris[..end].iter().filter(|t| t.2 >= z - eps).map(|t| &t.0);
            slice_triangles(live, z, z_min, z_max, opts, k)
        })
        .collect();
    slices.sort_by(|a, b| a.z.total_cmp(&b.z));
    tracing::debug!(
        slices = slices.len(),
        triangles = buf.len(),
        z_min,
        z_max,
        "sliced mesh"
    );
    Ok(SliceSet {
        slices,
        z_min,
        z_max,
        flats,
    })
}

#[cfg(test)]
mod tests;
