//! Planar direction with its angle in degrees.

use serde::{Deserialize, Serialize};

use super::point::Point;
use super::types::GeomCfg;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Slope {
    pub dx: f64,
    pub dy: f64,
    /// `atan2(dy, dx)` in degrees, (-180, 180].
    pub angle: f64,
}

impl Slope {
    #[inline]
    pub fn new(dx: f64, dy: f64) -> Self {
        Self {
            dx,
            dy,
            angle: dy.atan2(dx).to_degrees(),
        }
    }
    #[inline]
    pub fn between(p1: &Point, p2: &Point) -> Self {
        Self::new(p2.x - p1.x, p2.y - p1.y)
    }
    #[inline]
    pub fn from_angle(degrees: f64) -> Self {
        let r = degrees.to_radians();
        Self::new(r.cos(), r.sin())
    }

    /// Same direction within a tolerance that tightens with length.
    ///
    /// Near-vertical or near-horizontal pairs (within `merge`) always match.
    pub fn is_same(&self, s: &Slope, cfg: &GeomCfg) -> bool {
        if self.dx.abs() <= cfg.merge && s.dx.abs() <= cfg.merge {
            return true;
        }
        if self.dy.abs() <= cfg.merge && s.dy.abs() <= cfg.merge {
            return true;
        }
        let len = (self.dx * self.dx + self.dy * self.dy).sqrt();
        let prec = (1.0 / len).min(cfg.slope_merge);
        let prec = if prec > 0.0 && prec.is_finite() {
            prec
        } else {
            cfg.slope
        };
        let d = (self.angle - s.angle).abs();
        d <= prec || 360.0 - d <= prec
    }

    /// Rotated 90° counterclockwise.
    #[inline]
    pub fn normal(&self) -> Slope {
        Slope::new(-self.dy, self.dx)
    }
    #[inline]
    pub fn invert(&self) -> Slope {
        Slope::new(-self.dx, -self.dy)
    }
    /// Scaled so the larger component has magnitude 1.
    pub fn to_unit(&self) -> Slope {
        let max = self.dx.abs().max(self.dy.abs());
        if max == 0.0 {
            return *self;
        }
        Slope {
            dx: self.dx / max,
            dy: self.dy / max,
            angle: self.angle,
        }
    }
    #[inline]
    pub fn factor(&self, f: f64) -> Slope {
        Slope {
            dx: self.dx * f,
            dy: self.dy * f,
            angle: self.angle,
        }
    }

    /// Angle from `self` to `other` in (-180, 180]; absolute unless `signed`.
    pub fn angle_diff(&self, other: &Slope, signed: bool) -> f64 {
        let mut diff = other.angle - self.angle;
        while diff < -180.0 {
            diff += 360.0;
        }
        while diff > 180.0 {
            diff -= 360.0;
        }
        if signed {
            diff
        } else {
            diff.abs()
        }
    }
}
