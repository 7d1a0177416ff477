//! Segment between two points, keyed independent of direction.

use super::point::{Point, PointKey};
use super::slope::Slope;
use super::types::GeomCfg;

/// Endpoint keys, smaller first, so `a..b` and `b..a` collide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineKey(pub PointKey, pub PointKey);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    pub p1: Point,
    pub p2: Point,
    pub key: LineKey,
    /// Produced from a triangle edge lying in the slice plane.
    pub edge: bool,
}

impl Line {
    pub fn new(p1: Point, p2: Point) -> Self {
        let (k1, k2) = (p1.key(), p2.key());
        let key = if k1 <= k2 {
            LineKey(k1, k2)
        } else {
            LineKey(k2, k1)
        };
        Self {
            p1,
            p2,
            key,
            edge: false,
        }
    }

    /// Endpoints swapped so that `p1` carries the smaller key.
    pub fn ordered(p1: Point, p2: Point) -> Self {
        if p1.key() <= p2.key() {
            Self::new(p1, p2)
        } else {
            Self::new(p2, p1)
        }
    }

    #[inline]
    pub fn length_sq(&self) -> f64 {
        self.p1.dist_to_sq_2d(&self.p2)
    }
    #[inline]
    pub fn length(&self) -> f64 {
        self.length_sq().sqrt()
    }
    #[inline]
    pub fn slope(&self) -> Slope {
        Slope::between(&self.p1, &self.p2)
    }
    #[inline]
    pub fn midpoint(&self) -> Point {
        self.p1.mid_point_to_3d(&self.p2)
    }
    pub fn reverse(&self) -> Line {
        Line {
            p1: self.p2,
            p2: self.p1,
            ..*self
        }
    }

    /// Both endpoints of `other` lie on the infinite line through `self`.
    pub fn is_collinear(&self, other: &Line, cfg: &GeomCfg) -> bool {
        let (a, b) = (&self.p1, &self.p2);
        let cross = |p: &Point| (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
        let len = self.length();
        if len == 0.0 {
            return false;
        }
        (cross(&other.p1) / len).abs() < cfg.collinear
            && (cross(&other.p2) / len).abs() < cfg.collinear
    }
}
