//! Scalar and segment helpers shared across the kernel.

use nalgebra::{Matrix3, Vector3};

use super::point::Point;
use super::slope::Slope;

/// Which parametric window an intersection must fall in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Test {
    /// Both parameters in [0, 1].
    Segment,
    /// First parameter >= 0, second in [0, 1].
    Ray,
    /// Second parameter in [0, 1]; the first line is unbounded.
    Project,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Crossing {
    pub point: Point,
    /// Parameter along the first segment (distance ratio from its start).
    pub ua: f64,
    /// Parameter along the second segment.
    pub ub: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Intersect {
    Crossing(Crossing),
    /// Directions are (numerically) parallel.
    Parallel,
    Miss,
}

impl Intersect {
    pub fn crossing(self) -> Option<Crossing> {
        match self {
            Intersect::Crossing(c) => Some(c),
            _ => None,
        }
    }
}

/// Twice the signed area of triangle `a b c`; positive when counterclockwise.
#[inline]
pub fn area2(a: &Point, b: &Point, c: &Point) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)
}

#[inline]
pub fn is_clockwise3(a: &Point, b: &Point, c: &Point) -> bool {
    area2(a, b, c) < 0.0
}

/// `b` deviates from the line `a..c` by less than `tolerance`.
pub fn is_collinear3(a: &Point, b: &Point, c: &Point, tolerance: f64) -> bool {
    let len = a.dist_to_2d(c);
    if len == 0.0 {
        return a.dist_to_2d(b) < tolerance;
    }
    (area2(a, b, c) / len).abs() < tolerance
}

#[inline]
pub fn is_close_to(v1: f64, v2: f64, dist: f64) -> bool {
    (v1 - v2).abs() <= dist
}

/// `val` lies in `[min, max]`, with `dist` of slack at both ends.
pub fn in_close_range(val: f64, min: f64, max: f64, dist: f64) -> bool {
    (is_close_to(val, min, dist) || val >= min) && (is_close_to(val, max, dist) || val <= max)
}

/// Cross product of the directions `p1..p2` and `p3..p4`; zero when parallel.
#[inline]
pub fn determinant(p1: &Point, p2: &Point, p3: &Point, p4: &Point) -> f64 {
    (p4.y - p3.y) * (p2.x - p1.x) - (p4.x - p3.x) * (p2.y - p1.y)
}

/// Evenly spaced values from `from` toward `to`, no step larger than
/// `max_inc`. `to` is always the last value; `from` is included when
/// `include_from` is set.
pub fn lerp_steps(from: f64, to: f64, max_inc: f64, include_from: bool) -> Vec<f64> {
    let mut out = Vec::new();
    if include_from {
        out.push(from);
    }
    let delta = (to - from).abs();
    if delta == 0.0 || max_inc <= 0.0 || !max_inc.is_finite() {
        return out;
    }
    let steps = (delta / max_inc).ceil().max(1.0) as usize;
    let per = (to - from) / steps as f64;
    out.extend((1..steps).map(|i| from + per * i as f64));
    out.push(to);
    out
}

/// Angle from `n1` to `n2` in radians, swept clockwise (negative) or
/// counterclockwise (positive).
pub fn theta_diff(n1: f64, n2: f64, clockwise: bool) -> f64 {
    let tau = std::f64::consts::TAU;
    let mut diff = (n2 - n1).rem_euclid(tau);
    if diff > std::f64::consts::PI {
        diff -= tau;
    }
    if clockwise && diff > 0.0 {
        diff -= tau;
    }
    if !clockwise && diff < 0.0 {
        diff += tau;
    }
    diff
}

/// Parametric intersection of `p1..p2` with `p3..p4`.
pub fn intersect(p1: &Point, p2: &Point, p3: &Point, p4: &Point, test: Test, eps: f64) -> Intersect {
    let dx1 = p2.x - p1.x;
    let dy1 = p2.y - p1.y;
    let dx2 = p4.x - p3.x;
    let dy2 = p4.y - p3.y;
    let d = determinant(p1, p2, p3, p4);
    if d.abs() < eps {
        return Intersect::Parallel;
    }
    let a = p1.y - p3.y;
    let b = p1.x - p3.x;
    let ua = (dx2 * a - dy2 * b) / d;
    let ub = (dx1 * a - dy1 * b) / d;
    let in_unit = |t: f64| (0.0..=1.0).contains(&t);
    let ok = match test {
        Test::Segment => in_unit(ua) && in_unit(ub),
        Test::Ray => ua >= 0.0 && in_unit(ub),
        Test::Project => in_unit(ub),
    };
    if !ok {
        return Intersect::Miss;
    }
    Intersect::Crossing(Crossing {
        point: Point::new(p1.x + ua * dx1, p1.y + ua * dy1, p1.z),
        ua,
        ub,
    })
}

/// Ray from `start` along `slope` against segment `p1..p2`.
pub fn intersect_ray_line(start: &Point, slope: &Slope, p1: &Point, p2: &Point) -> Option<Crossing> {
    let end = Point::new(start.x + slope.dx, start.y + slope.dy, start.z);
    intersect(start, &end, p1, p2, Test::Ray, 1e-12).crossing()
}

/// Center of the circle through three points; `None` when they are collinear.
pub fn circle_center(a: &Point, b: &Point, c: &Point) -> Option<Point> {
    let m = Matrix3::new(a.x, a.y, 1.0, b.x, b.y, 1.0, c.x, c.y, 1.0);
    let det = m.determinant();
    if det.abs() < 1e-12 {
        return None;
    }
    let sq = |p: &Point| p.x * p.x + p.y * p.y;
    let mx = Matrix3::new(sq(a), a.y, 1.0, sq(b), b.y, 1.0, sq(c), c.y, 1.0);
    let my = Matrix3::new(a.x, sq(a), 1.0, b.x, sq(b), 1.0, c.x, sq(c), 1.0);
    Some(Point::new(
        mx.determinant() / (2.0 * det),
        my.determinant() / (2.0 * det),
        a.z,
    ))
}

/// Z at `(x, y)` on the plane through three points; `None` for a vertical plane.
pub fn z_in_plane(p1: &Point, p2: &Point, p3: &Point, x: f64, y: f64) -> Option<f64> {
    let n: Vector3<f64> = (p2.to_vec3() - p1.to_vec3()).cross(&(p3.to_vec3() - p1.to_vec3()));
    if n.z == 0.0 {
        return None;
    }
    Some((n.x * (x - p1.x) + n.y * (y - p1.y)) / -n.z + p1.z)
}

/// Area of a triangle in space.
pub fn triangle_area_3d(a: &Point, b: &Point, c: &Point) -> f64 {
    let u: Vector3<f64> = b.to_vec3() - a.to_vec3();
    let v: Vector3<f64> = c.to_vec3() - a.to_vec3();
    u.cross(&v).norm() / 2.0
}
