//! Closed or open point ring with owned holes.
//!
//! Purpose
//! - `Polygon` owns its points and its `inner` holes; closure is implicit
//!   (the first point is never repeated at the end).
//! - Winding is the sign of the raw doubled area: `area2 > 0` is clockwise
//!   with y pointing up.
//! - Area, perimeter and bounds are memoized per value; every mutating method
//!   drops the memo.
//! - Containment lives in `contain`, booleans in `ops`.

mod contain;
mod ops;

use std::cell::OnceCell;
use std::f64::consts::PI;

use crate::geom::util::{self, Test};
use crate::geom::{Bounds, GeomCfg, Point, Slope};

#[derive(Clone, Debug, Default)]
pub struct Polygon {
    points: Vec<Point>,
    pub open: bool,
    inner: Vec<Polygon>,
    /// Nesting depth assigned by `polygons::nest` (even = solid, odd = hole).
    pub depth: usize,
    /// Preferred infill direction, carried through boolean results.
    pub fill_angle: Option<Slope>,
    area2: OnceCell<f64>,
    perimeter: OnceCell<f64>,
    bounds: OnceCell<Bounds>,
}

impl Polygon {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn from_points<I: IntoIterator<Item = Point>>(points: I) -> Self {
        Self {
            points: points.into_iter().collect(),
            ..Self::default()
        }
    }
    /// Axis-aligned rectangle centered on `center`, counterclockwise.
    pub fn rect(center: Point, width: f64, height: f64) -> Self {
        let (w, h, z) = (width / 2.0, height / 2.0, center.z);
        Self::from_points([
            Point::new(center.x - w, center.y - h, z),
            Point::new(center.x + w, center.y - h, z),
            Point::new(center.x + w, center.y + h, z),
            Point::new(center.x - w, center.y + h, z),
        ])
    }
    /// Regular `points`-gon inscribed in a circle.
    pub fn circle(center: Point, radius: f64, points: usize, clockwise: bool) -> Self {
        let n = points.max(3);
        let step = 2.0 * PI / n as f64 * if clockwise { -1.0 } else { 1.0 };
        Self::from_points((0..n).map(|i| {
            let a = step * i as f64;
            Point::new(
                center.x + a.cos() * radius,
                center.y + a.sin() * radius,
                center.z,
            )
        }))
    }
    /// Monotone-chain hull, counterclockwise. `None` for fewer than 3 distinct corners.
    pub fn convex_hull(points: &[Point]) -> Option<Self> {
        let mut pts: Vec<Point> = points.to_vec();
        pts.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
        pts.dedup_by(|a, b| a.is_equal_2d(b));
        if pts.len() < 3 {
            return None;
        }
        let mut hull: Vec<Point> = Vec::with_capacity(pts.len() * 2);
        for pass in 0..2 {
            let start = hull.len();
            let iter: Box<dyn Iterator<Item = &Point>> = if pass == 0 {
                Box::new(pts.iter())
            } else {
                Box::new(pts.iter().rev())
            };
            for p in iter {
                while hull.len() >= start + 2
                    && util::area2(&hull[hull.len() - 2], &hull[hull.len() - 1], p) <= 0.0
                {
                    hull.pop();
                }
                hull.push(*p);
            }
            hull.pop();
        }
        if hull.len() < 3 {
            return None;
        }
        Some(Self::from_points(hull))
    }

    fn touch(&mut self) {
        self.area2 = OnceCell::new();
        self.perimeter = OnceCell::new();
        self.bounds = OnceCell::new();
    }

    // ---- points ----

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
    /// Point count including every hole.
    pub fn deep_len(&self) -> usize {
        self.len() + self.inner.iter().map(Polygon::deep_len).sum::<usize>()
    }
    pub fn first(&self) -> Option<&Point> {
        self.points.first()
    }
    pub fn last(&self) -> Option<&Point> {
        self.points.last()
    }
    /// Z of the first point, or 0 for an empty polygon.
    pub fn z(&self) -> f64 {
        self.points.first().map_or(0.0, |p| p.z)
    }
    pub fn push(&mut self, p: Point) -> &mut Self {
        self.points.push(p);
        self.touch();
        self
    }
    pub fn add(&mut self, x: f64, y: f64, z: f64) -> &mut Self {
        self.push(Point::new(x, y, z))
    }
    pub fn extend<I: IntoIterator<Item = Point>>(&mut self, points: I) -> &mut Self {
        self.points.extend(points);
        self.touch();
        self
    }
    pub fn into_points(self) -> Vec<Point> {
        self.points
    }
    /// Consecutive point pairs, including the closing edge unless open.
    pub fn segments(&self) -> impl Iterator<Item = (&Point, &Point)> + '_ {
        let n = self.points.len();
        let count = if self.open || n < 2 { n.saturating_sub(1) } else { n };
        (0..count).map(move |i| (&self.points[i], &self.points[(i + 1) % n]))
    }

    pub fn set_open(&mut self, open: bool) -> &mut Self {
        self.open = open;
        self.perimeter = OnceCell::new();
        self
    }
    #[inline]
    pub fn set_closed(&mut self) -> &mut Self {
        self.set_open(false)
    }
    pub fn set_z(&mut self, z: f64) -> &mut Self {
        for p in &mut self.points {
            p.z = z;
        }
        for hole in &mut self.inner {
            hole.set_z(z);
        }
        self
    }
    pub fn translate(&mut self, dx: f64, dy: f64, dz: f64) -> &mut Self {
        for p in &mut self.points {
            *p = p.translate(dx, dy, dz);
        }
        for hole in &mut self.inner {
            hole.translate(dx, dy, dz);
        }
        self.touch();
        self
    }
    /// Scale about the origin.
    pub fn scale(&mut self, sx: f64, sy: f64) -> &mut Self {
        for p in &mut self.points {
            p.x *= sx;
            p.y *= sy;
        }
        for hole in &mut self.inner {
            hole.scale(sx, sy);
        }
        self.touch();
        self
    }

    // ---- holes ----

    #[inline]
    pub fn inner(&self) -> &[Polygon] {
        &self.inner
    }
    #[inline]
    pub fn inner_mut(&mut self) -> &mut Vec<Polygon> {
        &mut self.inner
    }
    pub fn add_inner(&mut self, hole: Polygon) -> &mut Self {
        self.inner.push(hole);
        self
    }
    pub fn clear_inner(&mut self) -> &mut Self {
        self.inner.clear();
        self
    }
    pub fn take_inner(&mut self) -> Vec<Polygon> {
        std::mem::take(&mut self.inner)
    }
    /// Copy without holes.
    pub fn clone_shallow(&self) -> Polygon {
        Polygon {
            points: self.points.clone(),
            open: self.open,
            inner: Vec::new(),
            depth: self.depth,
            fill_angle: self.fill_angle,
            area2: self.area2.clone(),
            perimeter: self.perimeter.clone(),
            bounds: self.bounds.clone(),
        }
    }
    /// Push a shallow copy of this polygon and, recursively, of each hole.
    pub fn flatten_to(&self, out: &mut Vec<Polygon>) {
        out.push(self.clone_shallow());
        for hole in &self.inner {
            hole.flatten_to(out);
        }
    }

    // ---- winding ----

    /// Raw doubled signed area, `Σ (x2 - x1)(y2 + y1)`. Positive when clockwise.
    pub fn area2(&self) -> f64 {
        *self.area2.get_or_init(|| {
            if self.points.len() < 3 {
                return 0.0;
            }
            let n = self.points.len();
            (0..n)
                .map(|i| {
                    let (p1, p2) = (&self.points[i], &self.points[(i + 1) % n]);
                    (p2.x - p1.x) * (p2.y + p1.y)
                })
                .sum()
        })
    }
    #[inline]
    pub fn is_clockwise(&self) -> bool {
        self.area2() > 0.0
    }
    pub fn reverse(&mut self) -> &mut Self {
        let a2 = self.area2.get().copied();
        self.points.reverse();
        self.area2 = OnceCell::new();
        if let Some(a2) = a2 {
            let _ = self.area2.set(-a2);
        }
        self
    }
    pub fn set_clockwise(&mut self, clockwise: bool) -> &mut Self {
        if self.points.len() >= 3 && self.is_clockwise() != clockwise {
            self.reverse();
        }
        self
    }
    #[inline]
    pub fn set_counter_clockwise(&mut self) -> &mut Self {
        self.set_clockwise(false)
    }
    /// Match the winding of `other`.
    pub fn align_winding(&mut self, other: &Polygon) -> &mut Self {
        self.set_clockwise(other.is_clockwise())
    }
    /// Take the winding opposite to `other`.
    pub fn oppose_winding(&mut self, other: &Polygon) -> &mut Self {
        self.set_clockwise(!other.is_clockwise())
    }

    // ---- metrics ----

    pub fn area(&self) -> f64 {
        self.area2().abs() / 2.0
    }
    /// Outer area minus hole areas.
    pub fn area_deep(&self) -> f64 {
        self.area() - self.inner.iter().map(Polygon::area).sum::<f64>()
    }
    pub fn perimeter(&self) -> f64 {
        *self
            .perimeter
            .get_or_init(|| self.segments().map(|(a, b)| a.dist_to_2d(b)).sum())
    }
    pub fn perimeter_deep(&self) -> f64 {
        self.perimeter() + self.inner.iter().map(Polygon::perimeter).sum::<f64>()
    }
    /// `4πA / P²`; 1 for a circle.
    pub fn circularity(&self) -> f64 {
        let p = self.perimeter();
        if p == 0.0 {
            return 0.0;
        }
        4.0 * PI * self.area() / (p * p)
    }
    pub fn circularity_deep(&self) -> f64 {
        let p = self.perimeter_deep();
        if p == 0.0 {
            return 0.0;
        }
        4.0 * PI * self.area_deep() / (p * p)
    }
    pub fn bounds(&self) -> Bounds {
        *self
            .bounds
            .get_or_init(|| Bounds::from_points(self.points.iter()))
    }
    /// Ratio of the smaller area to the larger one.
    pub fn area_diff(&self, other: &Polygon) -> f64 {
        let (a1, a2) = (self.area(), other.area());
        if a1 == 0.0 && a2 == 0.0 {
            return 1.0;
        }
        if a1 > a2 {
            a2 / a1
        } else {
            a1 / a2
        }
    }
    /// Arithmetic mean of the points.
    pub fn average(&self) -> Point {
        let n = self.points.len().max(1) as f64;
        let (sx, sy) = self
            .points
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        Point::new(sx / n, sy / n, self.z())
    }
    /// Circle through three evenly spread points; `None` for collinear picks.
    pub fn circle_center(&self) -> Option<Point> {
        let n = self.points.len();
        if n < 3 {
            return None;
        }
        util::circle_center(&self.points[0], &self.points[n / 3], &self.points[2 * n / 3])
    }
    /// Top-most of the left-most points.
    pub fn leftmost(&self) -> Option<Point> {
        self.points.iter().copied().reduce(|best, p| {
            if p.x < best.x || (p.x == best.x && p.y > best.y) {
                p
            } else {
                best
            }
        })
    }
    pub fn shortest_segment_length(&self) -> Option<f64> {
        self.segments()
            .map(|(a, b)| a.dist_to_2d(b))
            .reduce(f64::min)
    }
    /// Index and distance of the point nearest to `target`.
    pub fn find_closest_point_to(&self, target: &Point) -> Option<(usize, f64)> {
        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| (i, p.dist_to_2d(target)))
            .reduce(|a, b| if b.1 < a.1 { b } else { a })
    }
    /// Crossings of segment `p1..p2` with this ring (and holes when `deep`),
    /// nearest to `p1` first.
    pub fn intersections(&self, p1: &Point, p2: &Point, deep: bool, cfg: &GeomCfg) -> Vec<Point> {
        let mut list: Vec<Point> = self
            .segments()
            .filter_map(|(a, b)| {
                util::intersect(p1, p2, a, b, Test::Segment, cfg.collinear).crossing()
            })
            .map(|c| c.point)
            .collect();
        if deep {
            for hole in &self.inner {
                list.extend(hole.intersections(p1, p2, false, cfg));
            }
        }
        list.sort_by(|a, b| p1.dist_to_sq_2d(a).total_cmp(&p1.dist_to_sq_2d(b)));
        list
    }

    /// Derive a fill direction normal to the longest edge in the hint window.
    ///
    /// Only round-ish shapes (circularity above `hint_min_circ`) get a hint.
    pub fn hint_fill_angle(&mut self, cfg: &GeomCfg) -> Option<Slope> {
        let mut longest: Option<(Point, Point, f64)> = None;
        for (a, b) in self.segments() {
            let d2 = a.dist_to_sq_2d(b);
            if d2 >= cfg.hint_len_min_sq
                && d2 <= cfg.hint_len_max_sq
                && longest.map_or(true, |(_, _, l)| d2 > l)
            {
                longest = Some((*a, *b, d2));
            }
        }
        if let Some((a, b, _)) = longest {
            if self.circularity() >= cfg.hint_min_circ {
                self.fill_angle = Some(a.slope_to(&b).normal());
            }
        }
        self.fill_angle
    }

    // ---- cleanup ----

    /// Drop points closer than `cfg.clean` to their predecessor and points
    /// within `cfg.clean` of the line through their neighbours.
    ///
    /// Returns an unchanged copy when cleaning would collapse the ring.
    pub fn clean(&self, deep: bool, cfg: &GeomCfg) -> Polygon {
        let min_len = if self.open { 2 } else { 3 };
        let tol = cfg.clean;
        let mut pts = self.points.clone();
        loop {
            let mut next = pts.clone();
            next.dedup_by(|a, b| a.dist_to_2d(b) < tol);
            if !self.open && next.len() > 1 && next[0].dist_to_2d(&next[next.len() - 1]) < tol {
                next.pop();
            }
            let n = next.len();
            let mut out: Vec<Point> = Vec::with_capacity(n);
            for i in 0..n {
                if self.open && (i == 0 || i + 1 == n) {
                    out.push(next[i]);
                    continue;
                }
                let prev = out.last().copied().unwrap_or(next[(i + n - 1) % n]);
                if next[i].dist_to_line(&prev, &next[(i + 1) % n]) < tol {
                    continue;
                }
                out.push(next[i]);
            }
            if out.len() < min_len {
                return self.clone();
            }
            if out.len() == pts.len() {
                break;
            }
            pts = out;
        }
        let mut out = Polygon {
            points: pts,
            open: self.open,
            depth: self.depth,
            fill_angle: self.fill_angle,
            ..Polygon::default()
        };
        out.inner = if deep {
            self.inner.iter().map(|h| h.clean(false, cfg)).collect()
        } else {
            self.inner.clone()
        };
        out
    }

    /// Drop points closer than `dist` to the last kept point. `None` when
    /// fewer than two points survive.
    pub fn debur(&self, dist: f64) -> Option<Polygon> {
        let first = *self.points.first()?;
        let mut kept = vec![first];
        let mut last = first;
        for p in &self.points[1..] {
            if last.dist_to_2d(p) >= dist {
                kept.push(*p);
                last = *p;
            }
        }
        if kept.len() < 2 {
            return None;
        }
        let mut out = Polygon::from_points(kept);
        out.open = self.open;
        out.depth = self.depth;
        Some(out)
    }

    /// Same open flag and identical point coordinates, holes included.
    pub fn matches(&self, other: &Polygon) -> bool {
        self.open == other.open
            && self.points.len() == other.points.len()
            && self
                .points
                .iter()
                .zip(&other.points)
                .all(|(a, b)| a.is_equal_3d(b))
            && self.inner.len() == other.inner.len()
            && self.inner.iter().zip(&other.inner).all(|(a, b)| a.matches(b))
    }
}

#[cfg(test)]
mod tests;
