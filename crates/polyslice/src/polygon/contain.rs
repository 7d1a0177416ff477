//! Containment, proximity and equivalence between polygons.
//!
//! Edges longer than `midpoint_check_dist` also have their midpoint tested, so
//! long edges that cut across a concave target are caught.

use super::Polygon;
use crate::geom::{GeomCfg, Point};

impl Polygon {
    /// Bounds overlap, loosened by the merge distance.
    pub fn overlaps(&self, other: &Polygon, cfg: &GeomCfg) -> bool {
        self.bounds().overlaps(&other.bounds(), cfg.merge)
    }

    /// Sample points of every edge: the midpoint of long edges, then the edge end.
    fn edge_samples<'a>(&'a self, cfg: &'a GeomCfg) -> impl Iterator<Item = Point> + 'a {
        self.segments().flat_map(move |(prev, next)| {
            let mid = (prev.dist_to_2d(next) > cfg.midpoint_check_dist)
                .then(|| prev.mid_point_to(next));
            mid.into_iter().chain(std::iter::once(*next))
        })
    }

    /// Every vertex (and long-edge midpoint) lies inside or within
    /// `sqrt(tol_sq)` of `poly`'s outer ring.
    pub fn is_inside(&self, poly: &Polygon, tol_sq: f64, cfg: &GeomCfg) -> bool {
        if !self.bounds().is_nested(&poly.bounds(), tol_sq * 3.0) {
            return false;
        }
        self.edge_samples(cfg)
            .all(|p| p.in_polygon(poly) || p.near_polygon(poly, tol_sq, false))
    }

    /// Likely nested inside `parent`: bounds contained, then `is_inside` at
    /// the nesting tolerance.
    pub fn is_nested(&self, parent: &Polygon, cfg: &GeomCfg) -> bool {
        parent.bounds().contains(&self.bounds(), cfg.bounds)
            && self.is_inside(parent, cfg.nested_sq, cfg)
    }

    /// Any vertex (or long-edge midpoint) inside or on the edge of `poly`.
    pub fn has_points_inside(&self, poly: &Polygon, tol_sq: f64, cfg: &GeomCfg) -> bool {
        if !poly.overlaps(self, cfg) {
            return false;
        }
        self.edge_samples(cfg)
            .any(|p| p.in_polygon(poly) || p.near_polygon(poly, tol_sq, false))
    }

    /// Any vertex (or long-edge midpoint) within `sqrt(dist_sq)` of an edge of `poly`.
    pub fn is_near(&self, poly: &Polygon, dist_sq: f64, cfg: &GeomCfg) -> bool {
        self.edge_samples(cfg)
            .any(|p| p.near_polygon(poly, dist_sq, false))
    }

    /// Essentially the same shape.
    ///
    /// Area and bounds must agree first. Two near-perfect circles of equal
    /// circularity then match outright; otherwise every point of `self` must
    /// lie within `poly_merge` of an edge of `other`. With `recurse`, holes
    /// are compared pairwise in order.
    pub fn is_equivalent(&self, other: &Polygon, recurse: bool, cfg: &GeomCfg) -> bool {
        if (self.area() - other.area()).abs() > cfg.poly_area
            || !self.bounds().equals(&other.bounds(), cfg.poly_bounds)
        {
            return false;
        }
        let (c1, c2) = (self.circularity(), other.circularity());
        if (c1 - c2).abs() < cfg.circularity && (1.0 - c1) < cfg.circularity {
            return true;
        }
        if recurse {
            if self.inner().len() != other.inner().len() {
                return false;
            }
            if !self
                .inner()
                .iter()
                .zip(other.inner())
                .all(|(a, b)| a.is_equivalent(b, false, cfg))
            {
                return false;
            }
        }
        self.points().iter().all(|p| {
            other
                .segments()
                .any(|(a, b)| p.dist_to_line(a, b) < cfg.poly_merge)
        })
    }
}
