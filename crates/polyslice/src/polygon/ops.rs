//! Pairwise booleans and offset.
//!
//! Each operation serializes both operands with their holes (outer ring
//! counterclockwise, holes clockwise), runs the kernel's clipper with the fill
//! rule the operation needs, and rebuilds nested polygons from the result.
//! Difference and mask use even-odd; union, intersect and xor use non-zero.
//! Height and fill angle come from the larger operand.

use super::Polygon;
use crate::clip::{orient, ClipOp, Clipper, Fill, Kernel, Path, Shape};
use crate::geom::{Point, Slope};
use crate::polygons;

impl Polygon {
    /// Append this ring and its holes, oriented for non-zero filling.
    pub fn to_paths(&self, out: &mut Vec<Path>) {
        let mut outer: Path = self.points().iter().map(|p| [p.x, p.y]).collect();
        orient(&mut outer, true);
        out.push(outer);
        for hole in self.inner() {
            let mut ring: Path = hole.points().iter().map(|p| [p.x, p.y]).collect();
            orient(&mut ring, false);
            out.push(ring);
        }
    }

    pub fn from_path(path: &[[f64; 2]], z: f64) -> Polygon {
        Polygon::from_points(path.iter().map(|[x, y]| Point::new(*x, *y, z)))
    }

    /// Outer ring at depth 0 with its holes at depth 1, or `None` when the
    /// outer ring is smaller than `min_area`. Holes under `min_area` are dropped.
    pub fn from_shape(shape: &Shape, z: f64, min_area: f64) -> Option<Polygon> {
        let mut outer = Polygon::from_path(&shape.outer, z);
        if outer.area() < min_area {
            return None;
        }
        for ring in &shape.holes {
            let mut hole = Polygon::from_path(ring, z);
            if hole.area() < min_area {
                continue;
            }
            hole.depth = 1;
            outer.add_inner(hole);
        }
        outer.depth = 0;
        Some(outer)
    }

    fn dominant_fill_angle(&self, other: &Polygon) -> Option<Slope> {
        if self.fill_angle.is_some() && self.area() > other.area() {
            self.fill_angle
        } else {
            other.fill_angle
        }
    }

    fn dominant_z(&self, other: &Polygon) -> f64 {
        if self.area() > other.area() {
            self.z()
        } else {
            other.z()
        }
    }

    fn clip_with<C: Clipper>(
        &self,
        other: &Polygon,
        op: ClipOp,
        fill: Fill,
        min_area: f64,
        k: &Kernel<C>,
    ) -> Vec<Polygon> {
        let (mut a, mut b) = (Vec::new(), Vec::new());
        self.to_paths(&mut a);
        other.to_paths(&mut b);
        let shapes = k.clip.boolean(&a, &b, op, fill);
        polygons::from_shapes(&shapes, self.dominant_z(other), min_area)
    }

    /// Area of `self` not covered by `other`.
    pub fn diff<C: Clipper>(&self, other: &Polygon, k: &Kernel<C>) -> Vec<Polygon> {
        let fill_angle = self.dominant_fill_angle(other);
        let mut out = self.clip_with(other, ClipOp::Difference, Fill::EvenOdd, k.cfg.min_area, k);
        for p in &mut out {
            p.fill_angle = fill_angle;
        }
        out
    }

    /// Area of `self` inside `other`. With `none_on_equiv`, a result that is
    /// just `self` again is reported as `None`.
    pub fn mask<C: Clipper>(
        &self,
        other: &Polygon,
        none_on_equiv: bool,
        k: &Kernel<C>,
    ) -> Option<Vec<Polygon>> {
        let fill_angle = self.dominant_fill_angle(other);
        let mut out = self.clip_with(other, ClipOp::Intersect, Fill::EvenOdd, k.cfg.min_area, k);
        if out.is_empty() {
            return None;
        }
        for p in &mut out {
            p.fill_angle = fill_angle;
        }
        if none_on_equiv && out.len() == 1 && out[0].is_equivalent(self, false, &k.cfg) {
            return None;
        }
        Some(out)
    }

    /// Pieces of the overlap that lie inside `self`.
    pub fn intersect<C: Clipper>(
        &self,
        other: &Polygon,
        min_area: f64,
        k: &Kernel<C>,
    ) -> Option<Vec<Polygon>> {
        if !self.overlaps(other, &k.cfg) {
            return None;
        }
        if self.is_inside(other, k.cfg.close_to_poly_sq, &k.cfg) {
            return Some(vec![self.clone()]);
        }
        let out: Vec<Polygon> = self
            .clip_with(other, ClipOp::Intersect, Fill::NonZero, min_area, k)
            .into_iter()
            .filter(|p| p.is_inside(self, k.cfg.close_to_poly_sq, &k.cfg))
            .collect();
        (!out.is_empty()).then_some(out)
    }

    /// Merge with `other`.
    ///
    /// `None` when the bounds do not overlap or the result is the two inputs
    /// side by side. Without `all`, anything but a single merged polygon is
    /// also `None`.
    pub fn union<C: Clipper>(
        &self,
        other: &Polygon,
        min_area: f64,
        all: bool,
        k: &Kernel<C>,
    ) -> Option<Vec<Polygon>> {
        if !self.overlaps(other, &k.cfg) {
            return None;
        }
        let fill_angle = self.dominant_fill_angle(other);
        let mut out = self.clip_with(other, ClipOp::Union, Fill::NonZero, min_area, k);
        if out.is_empty() || out.len() == 2 || (!all && out.len() != 1) {
            return None;
        }
        for p in &mut out {
            p.fill_angle = fill_angle;
        }
        Some(out)
    }

    /// Symmetric difference.
    pub fn xor<C: Clipper>(&self, other: &Polygon, k: &Kernel<C>) -> Vec<Polygon> {
        self.clip_with(other, ClipOp::Xor, Fill::NonZero, k.cfg.min_area, k)
    }

    /// Offset by `dist`: positive insets, negative outsets. Empty when the
    /// polygon vanishes.
    pub fn offset<C: Clipper>(&self, dist: f64, k: &Kernel<C>) -> Vec<Polygon> {
        polygons::expand(std::slice::from_ref(self), -dist, self.z(), k)
    }
}
