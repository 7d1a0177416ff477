//! 3D point with planar predicates.
//!
//! Purpose
//! - `Point` is a plain `Copy` value; identity for hashing goes through
//!   `PointKey` (coordinates rounded to 6 decimals), never through equality.
//! - Distance and containment predicates are 2D unless suffixed `_3d`.
//! - Near/mergeable tests check exact equality before any tolerance.

use nalgebra::{Vector2, Vector3};
use serde::{Deserialize, Serialize};

use super::line::Line;
use super::slope::Slope;
use super::types::GeomCfg;
use super::util::is_close_to;
use crate::error::{Error, Result};
use crate::polygon::Polygon;

const KEY_SCALE: f64 = 1e6;

/// Rounded coordinate triple used to deduplicate points across triangles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointKey(pub i64, pub i64, pub i64);

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Optional rotary axis value, carried through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a: Option<f64>,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z, a: None }
    }
    #[inline]
    pub const fn xy(x: f64, y: f64) -> Self {
        Self::new(x, y, 0.0)
    }
    #[inline]
    pub fn with_a(mut self, a: f64) -> Self {
        self.a = Some(a);
        self
    }
    #[inline]
    pub fn from_vec2(v: Vector2<f64>, z: f64) -> Self {
        Self::new(v.x, v.y, z)
    }
    #[inline]
    pub fn to_vec2(&self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }
    #[inline]
    pub fn to_vec3(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    #[inline]
    pub fn key(&self) -> PointKey {
        PointKey(
            (self.x * KEY_SCALE).round() as i64,
            (self.y * KEY_SCALE).round() as i64,
            (self.z * KEY_SCALE).round() as i64,
        )
    }

    #[inline]
    pub fn dist_to_sq_2d(&self, p: &Point) -> f64 {
        let dx = p.x - self.x;
        let dy = p.y - self.y;
        dx * dx + dy * dy
    }
    #[inline]
    pub fn dist_to_2d(&self, p: &Point) -> f64 {
        self.dist_to_sq_2d(p).sqrt()
    }
    #[inline]
    pub fn dist_to_sq_3d(&self, p: &Point) -> f64 {
        let dz = p.z - self.z;
        self.dist_to_sq_2d(p) + dz * dz
    }
    #[inline]
    pub fn dist_to_3d(&self, p: &Point) -> f64 {
        self.dist_to_sq_3d(p).sqrt()
    }

    #[inline]
    pub fn is_equal_2d(&self, p: &Point) -> bool {
        self.x == p.x && self.y == p.y
    }
    #[inline]
    pub fn is_equal_3d(&self, p: &Point) -> bool {
        self.is_equal_2d(p) && self.z == p.z
    }
    pub fn is_mergeable_2d(&self, p: &Point, cfg: &GeomCfg) -> bool {
        self.is_equal_2d(p) || self.dist_to_sq_2d(p) < cfg.merge_sq()
    }
    pub fn is_mergeable_3d(&self, p: &Point, cfg: &GeomCfg) -> bool {
        self.is_equal_3d(p) || self.dist_to_sq_3d(p) < cfg.merge_sq()
    }
    /// Both axes within `dist`, inclusive.
    #[inline]
    pub fn is_near(&self, p: &Point, dist: f64) -> bool {
        is_close_to(self.x, p.x, dist) && is_close_to(self.y, p.y, dist)
    }
    /// Strictly inside the square of half-width `dist` around `p`.
    #[inline]
    pub fn is_in_box(&self, p: &Point, dist: f64) -> bool {
        (self.x - p.x).abs() < dist && (self.y - p.y).abs() < dist
    }

    /// Squared distance to the segment `p1..p2`, clamped to its endpoints.
    pub fn dist_to_line_sq(&self, p1: &Point, p2: &Point) -> f64 {
        let len_sq = p1.dist_to_sq_2d(p2);
        if len_sq == 0.0 {
            return self.dist_to_sq_2d(p1);
        }
        let t = ((self.x - p1.x) * (p2.x - p1.x) + (self.y - p1.y) * (p2.y - p1.y)) / len_sq;
        if t < 0.0 {
            return self.dist_to_sq_2d(p1);
        }
        if t > 1.0 {
            return self.dist_to_sq_2d(p2);
        }
        let proj = Point::xy(p1.x + t * (p2.x - p1.x), p1.y + t * (p2.y - p1.y));
        self.dist_to_sq_2d(&proj)
    }
    #[inline]
    pub fn dist_to_line(&self, p1: &Point, p2: &Point) -> f64 {
        self.dist_to_line_sq(p1, p2).sqrt()
    }

    /// True when the segment `p1..p2` passes within `sqrt(dist_sq)`.
    ///
    /// Rejects early when the point is farther from both endpoints than the
    /// segment is long (padded by `dist_sq` for short segments).
    pub fn within_dist_sq(&self, p1: &Point, p2: &Point, dist_sq: f64) -> bool {
        let mut ll2 = p1.dist_to_sq_2d(p2);
        let dp1 = self.dist_to_sq_2d(p1);
        let dp2 = self.dist_to_sq_2d(p2);
        if ll2 < dist_sq {
            ll2 += dist_sq;
        }
        if dp1 > ll2 && dp2 > ll2 {
            return false;
        }
        self.dist_to_line_sq(p1, p2) < dist_sq
    }

    pub fn on_line(&self, p1: &Point, p2: &Point, cfg: &GeomCfg) -> bool {
        self.dist_to_line(p1, p2) < cfg.point_on_line
    }

    /// Midpoint in the plane, keeping this point's z.
    #[inline]
    pub fn mid_point_to(&self, p: &Point) -> Point {
        Point::new((self.x + p.x) / 2.0, (self.y + p.y) / 2.0, self.z)
    }
    #[inline]
    pub fn mid_point_to_3d(&self, p: &Point) -> Point {
        Point::new(
            (self.x + p.x) / 2.0,
            (self.y + p.y) / 2.0,
            (self.z + p.z) / 2.0,
        )
    }
    #[inline]
    pub fn slope_to(&self, p: &Point) -> Slope {
        Slope::between(self, p)
    }
    #[inline]
    pub fn line_to(&self, p: &Point) -> Line {
        Line::new(*self, *p)
    }

    /// Move `dist` along `slope`.
    pub fn follow(&self, slope: &Slope, dist: f64) -> Point {
        let len = (slope.dx * slope.dx + slope.dy * slope.dy).sqrt();
        if len == 0.0 {
            return *self;
        }
        let ls = dist / len;
        Point {
            x: self.x + slope.dx * ls,
            y: self.y + slope.dy * ls,
            ..*self
        }
    }
    /// Step `mult` slope lengths along `slope`, without normalizing.
    #[inline]
    pub fn project_on_slope(&self, slope: &Slope, mult: f64) -> Point {
        Point {
            x: self.x + slope.dx * mult,
            y: self.y + slope.dy * mult,
            ..*self
        }
    }
    /// Move `dist` toward `p`.
    pub fn offset_point_to(&self, p: &Point, dist: f64) -> Point {
        self.follow(&self.slope_to(p), dist)
    }
    /// Move `dist` away from `p`.
    pub fn offset_point_from(&self, p: &Point, dist: f64) -> Point {
        self.follow(&p.slope_to(self), dist)
    }

    #[inline]
    pub fn translate(&self, dx: f64, dy: f64, dz: f64) -> Point {
        Point {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
            a: self.a,
        }
    }
    pub fn round(&self, decimals: i32) -> Point {
        let m = 10f64.powi(decimals);
        Point {
            x: (self.x * m).round() / m,
            y: (self.y * m).round() / m,
            z: (self.z * m).round() / m,
            a: self.a,
        }
    }

    /// Point where the segment `self..p` crosses the plane at `z`.
    pub fn intersect_z(&self, p: &Point, z: f64) -> Point {
        let dz = p.z - self.z;
        if dz == 0.0 {
            return Point::new(self.x, self.y, z);
        }
        let pct = 1.0 - (p.z - z) / dz;
        Point::new(
            self.x + (p.x - self.x) * pct,
            self.y + (p.y - self.y) * pct,
            z,
        )
    }

    /// Inside the outer ring only (holes ignored). Bounds check, then ray casting.
    pub fn in_polygon(&self, poly: &Polygon) -> bool {
        if !poly.bounds().contains_xy(self.x, self.y) {
            return false;
        }
        let pts = poly.points();
        let n = pts.len();
        if n < 3 {
            return false;
        }
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let (pi, pj) = (&pts[i], &pts[j]);
            if (pi.y > self.y) != (pj.y > self.y)
                && self.x < (pj.x - pi.x) * (self.y - pi.y) / (pj.y - pi.y) + pi.x
            {
                inside = !inside;
            }
            j = i;
        }
        inside
    }

    /// Inside or touching the outer ring and not strictly inside a hole.
    pub fn is_in_polygon(&self, poly: &Polygon, cfg: &GeomCfg) -> bool {
        let merge_sq = cfg.merge_sq();
        if !self.in_polygon(poly) && !self.near_polygon(poly, merge_sq, false) {
            return false;
        }
        !poly
            .inner()
            .iter()
            .any(|hole| self.in_polygon(hole) && !self.near_polygon(hole, merge_sq, false))
    }

    /// Strictly inside the outer ring and outside every hole.
    pub fn is_in_polygon_only(&self, poly: &Polygon) -> bool {
        self.in_polygon(poly) && !poly.inner().iter().any(|hole| self.in_polygon(hole))
    }

    /// Within `sqrt(dist_sq)` of any edge; `deep` includes holes.
    pub fn near_polygon(&self, poly: &Polygon, dist_sq: f64, deep: bool) -> bool {
        if poly.segments().any(|(p1, p2)| self.within_dist_sq(p1, p2, dist_sq)) {
            return true;
        }
        deep && poly
            .inner()
            .iter()
            .any(|hole| self.near_polygon(hole, dist_sq, false))
    }

    /// Minimum distance to any edge of `poly`, stopping once under `threshold`.
    pub fn dist_to_poly_segments(&self, poly: &Polygon, threshold: f64) -> f64 {
        let mut min = f64::INFINITY;
        for (p1, p2) in poly.segments() {
            min = min.min(self.dist_to_line(p1, p2));
            if min <= threshold {
                break;
            }
        }
        min
    }

    /// Index and squared distance of the closest point strictly under `max_sq`.
    ///
    /// `max_sq` must be positive and finite.
    pub fn nearest_to(&self, points: &[Point], max_sq: f64) -> Result<Option<(usize, f64)>> {
        if !max_sq.is_finite() || max_sq <= 0.0 {
            return Err(Error::SearchRadius(max_sq));
        }
        let mut best: Option<(usize, f64)> = None;
        for (i, p) in points.iter().enumerate() {
            let d = self.dist_to_sq_2d(p);
            if d < max_sq && best.map_or(true, |(_, bd)| d < bd) {
                best = Some((i, d));
            }
        }
        Ok(best)
    }

    /// Same-side test against the three edges (either winding).
    pub fn in_triangle(&self, a: &Point, b: &Point, c: &Point) -> bool {
        fn sign(p1: &Point, p2: &Point, p3: &Point) -> f64 {
            (p1.x - p3.x) * (p2.y - p3.y) - (p2.x - p3.x) * (p1.y - p3.y)
        }
        let d1 = sign(self, a, b);
        let d2 = sign(self, b, c);
        let d3 = sign(self, c, a);
        let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
        let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
        !(has_neg && has_pos)
    }
}
