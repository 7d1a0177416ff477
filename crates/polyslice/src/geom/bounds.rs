//! Axis-aligned 2D bounding box.

use serde::{Deserialize, Serialize};

use super::point::Point;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub minx: f64,
    pub miny: f64,
    pub maxx: f64,
    pub maxy: f64,
}

impl Default for Bounds {
    /// Inverted so that the first `update` establishes extents.
    fn default() -> Self {
        Self {
            minx: f64::INFINITY,
            miny: f64::INFINITY,
            maxx: f64::NEG_INFINITY,
            maxy: f64::NEG_INFINITY,
        }
    }
}

impl Bounds {
    pub fn new(minx: f64, miny: f64, maxx: f64, maxy: f64) -> Self {
        Self {
            minx,
            miny,
            maxx,
            maxy,
        }
    }
    pub fn from_points<'a, I: IntoIterator<Item = &'a Point>>(points: I) -> Self {
        let mut b = Bounds::default();
        for p in points {
            b.update(p);
        }
        b
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.minx > self.maxx || self.miny > self.maxy
    }
    #[inline]
    pub fn update(&mut self, p: &Point) -> &mut Self {
        self.minx = self.minx.min(p.x);
        self.maxx = self.maxx.max(p.x);
        self.miny = self.miny.min(p.y);
        self.maxy = self.maxy.max(p.y);
        self
    }
    #[inline]
    pub fn merge(&mut self, b: &Bounds) -> &mut Self {
        self.minx = self.minx.min(b.minx);
        self.maxx = self.maxx.max(b.maxx);
        self.miny = self.miny.min(b.miny);
        self.maxy = self.maxy.max(b.maxy);
        self
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.maxx - self.minx
    }
    #[inline]
    pub fn height(&self) -> f64 {
        self.maxy - self.miny
    }
    #[inline]
    pub fn centerx(&self) -> f64 {
        self.minx + self.width() / 2.0
    }
    #[inline]
    pub fn centery(&self) -> f64 {
        self.miny + self.height() / 2.0
    }
    #[inline]
    pub fn center(&self, z: f64) -> Point {
        Point::new(self.centerx(), self.centery(), z)
    }

    #[inline]
    pub fn contains_xy(&self, x: f64, y: f64) -> bool {
        x >= self.minx && x <= self.maxx && y >= self.miny && y <= self.maxy
    }
    #[inline]
    pub fn contains_offset_xy(&self, x: f64, y: f64, offset: f64) -> bool {
        x >= self.minx - offset
            && x <= self.maxx + offset
            && y >= self.miny - offset
            && y <= self.maxy + offset
    }

    /// `self` lies within `parent` grown by `grace`.
    pub fn is_nested(&self, parent: &Bounds, grace: f64) -> bool {
        self.minx >= parent.minx - grace
            && self.maxx <= parent.maxx + grace
            && self.miny >= parent.miny - grace
            && self.maxy <= parent.maxy + grace
    }
    #[inline]
    pub fn contains(&self, other: &Bounds, grace: f64) -> bool {
        other.is_nested(self, grace)
    }

    /// Center-distance overlap test, loosened by `precision`.
    pub fn overlaps(&self, b: &Bounds, precision: f64) -> bool {
        (self.centerx() - b.centerx()).abs() * 2.0 - precision < self.width() + b.width()
            && (self.centery() - b.centery()).abs() * 2.0 - precision < self.height() + b.height()
    }

    pub fn equals(&self, b: &Bounds, margin: f64) -> bool {
        (self.minx - b.minx).abs() <= margin
            && (self.miny - b.miny).abs() <= margin
            && (self.maxx - b.maxx).abs() <= margin
            && (self.maxy - b.maxy).abs() <= margin
    }

    /// Sum of absolute differences of the four extents.
    pub fn delta(&self, b: &Bounds) -> f64 {
        (self.minx - b.minx).abs()
            + (self.miny - b.miny).abs()
            + (self.maxx - b.maxx).abs()
            + (self.maxy - b.maxy).abs()
    }
}
