//! Directional fill lines and ray crossings.
//!
//! Model
//! - Fill works in a frame rotated so the fill direction is the x axis and
//!   scanlines are horizontal, anchored at a corner of the region's bounds
//!   (the origin). A scanline crosses an edge when exactly one endpoint lies
//!   on or below it; crossings pair up even-odd, so holes are respected.

use nalgebra::{Rotation2, Vector2};

use crate::geom::util::intersect_ray_line;
use crate::geom::{Bounds, GeomCfg, Point, Slope};
use crate::polygon::Polygon;

use super::flatten;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FillLine {
    pub p1: Point,
    pub p2: Point,
    /// Distance of the line from the origin, in spacings, rounded.
    pub index: i64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FillLines {
    /// Corner the scanlines are counted from.
    pub origin: Point,
    /// Sorted by distance from `origin`.
    pub lines: Vec<FillLine>,
}

/// Map an angle in degrees into `[-90, 90]`; opposite directions fill alike.
fn normalize_angle(angle: f64) -> f64 {
    let mut a = angle % 180.0;
    if a < -90.0 {
        a += 180.0;
    }
    if a > 90.0 {
        a -= 180.0;
    }
    a
}

/// Parallel fill segments at `angle` degrees, `spacing` apart, inside the
/// region described by `polys` (holes included).
///
/// Segments shorter than `min_len` or longer than `max_len` are dropped
/// when those limits are positive. `None` when there is nothing to fill or
/// `spacing` is not positive.
pub fn fill_area(
    polys: &[Polygon],
    angle: f64,
    spacing: f64,
    min_len: f64,
    max_len: f64,
    cfg: &GeomCfg,
) -> Option<FillLines> {
    let first = polys.first()?;
    if !(spacing > 0.0 && spacing.is_finite()) {
        return None;
    }
    let z = first.z();
    let angle = normalize_angle(angle);
    let mut bounds = Bounds::default();
    for p in polys {
        bounds.merge(&p.bounds());
    }
    if bounds.is_empty() {
        return None;
    }
    let origin = if angle < 0.0 {
        Point::new(bounds.minx, bounds.miny, z)
    } else {
        Point::new(bounds.maxx, bounds.miny, z)
    };

    let to_frame = Rotation2::new(-angle.to_radians());
    let from_frame = to_frame.inverse();
    let o = origin.to_vec2();
    let rings = flatten(polys);
    let edges: Vec<(Vector2<f64>, Vector2<f64>)> = rings
        .iter()
        .flat_map(|r| r.segments().map(|(a, b)| (to_frame * (a.to_vec2() - o), to_frame * (b.to_vec2() - o))))
        .collect();
    let (vmin, vmax) = edges
        .iter()
        .flat_map(|(a, b)| [a.y, b.y])
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));

    let mut lines = Vec::new();
    let lo = (vmin / spacing).ceil() as i64;
    let hi = (vmax / spacing).floor() as i64;
    let mut cross = Vec::new();
    for step in lo..=hi {
        let v = step as f64 * spacing;
        cross.clear();
        for (a, b) in &edges {
            if (a.y <= v) != (b.y <= v) {
                cross.push(a.x + (v - a.y) * (b.x - a.x) / (b.y - a.y));
            }
        }
        cross.sort_by(f64::total_cmp);
        for pair in cross.chunks_exact(2) {
            let len = pair[1] - pair[0];
            if len <= cfg.fill_merge {
                continue;
            }
            if (min_len > 0.0 && len < min_len) || (max_len > 0.0 && len > max_len) {
                continue;
            }
            let p1 = Point::from_vec2(o + from_frame * Vector2::new(pair[0], v), z);
            let p2 = Point::from_vec2(o + from_frame * Vector2::new(pair[1], v), z);
            let dist = origin.dist_to_line(&p1, &p2);
            lines.push((dist, FillLine { p1, p2, index: (dist / spacing).round() as i64 }));
        }
    }
    lines.sort_by(|a, b| a.0.total_cmp(&b.0));
    Some(FillLines {
        origin,
        lines: lines.into_iter().map(|(_, l)| l).collect(),
    })
}

/// A ray crossing with a polygon ring.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    pub point: Point,
    /// Distance along the ray in slope lengths.
    pub dist: f64,
    /// Index of the ring among the flattened inputs.
    pub ring: usize,
    /// Depth of that ring.
    pub depth: usize,
}

struct Hit {
    hit: RayHit,
    /// Vertex index when the crossing sits on a ring vertex.
    pos: Option<usize>,
    ring_len: usize,
    edge: (Point, Point),
    del: bool,
}

/// Crossings of the ray from `start` along `slope` with every ring, sorted
/// by distance.
///
/// A ray through a vertex shared by two edges produces two coincident
/// hits: one is kept when the ray passes into the ring there, both are
/// dropped when it only grazes it. With `for_fill`, hit pairs that run
/// along one ring edge are dropped too.
pub fn ray_intersect(start: &Point, slope: &Slope, polys: &[Polygon], for_fill: bool, cfg: &GeomCfg) -> Vec<RayHit> {
    let merge = if for_fill { cfg.fill_merge } else { cfg.merge };
    let rings = flatten(polys);
    let mut hits = Vec::new();
    for (ring, poly) in rings.iter().enumerate() {
        let pts = poly.points();
        let n = pts.len();
        for j in 0..n {
            let j2 = (j + 1) % n;
            let Some(c) = intersect_ray_line(start, slope, &pts[j], &pts[j2]) else {
                continue;
            };
            let pos = if c.point.is_near(&pts[j], merge) {
                Some(j)
            } else if c.point.is_near(&pts[j2], merge) {
                Some(j2)
            } else {
                None
            };
            hits.push(Hit {
                hit: RayHit {
                    point: c.point,
                    dist: c.ua,
                    ring,
                    depth: poly.depth,
                },
                pos,
                ring_len: n,
                edge: (pts[j], pts[j2]),
                del: false,
            });
        }
    }
    hits.sort_by(|a, b| a.hit.dist.total_cmp(&b.hit.dist));

    for i in 1..hits.len() {
        let (head, tail) = hits.split_at_mut(i);
        let (h1, h2) = (&mut head[i - 1], &mut tail[0]);
        if h1.del || h2.del || !h1.hit.point.is_near(&h2.hit.point, merge) {
            continue;
        }
        let far: Vec<Point> = [h1.edge.0, h1.edge.1, h2.edge.0, h2.edge.1]
            .into_iter()
            .zip([&h1.hit.point, &h1.hit.point, &h2.hit.point, &h2.hit.point])
            .filter(|(e, p)| !p.is_near(e, merge))
            .map(|(e, _)| e)
            .collect();
        match far.len() {
            0 | 1 => tracing::trace!(x = h1.hit.point.x, y = h1.hit.point.y, "ray through shared vertex"),
            2 => {
                h1.del = true;
                if intersect_ray_line(start, slope, &far[0], &far[1]).is_none() {
                    h2.del = true;
                }
            }
            _ => {
                h1.del = true;
                h2.del = true;
            }
        }
    }

    if for_fill {
        let live: Vec<usize> = (0..hits.len()).filter(|&i| !hits[i].del).collect();
        for pair in live.chunks_exact(2) {
            let (a, b) = (&hits[pair[0]], &hits[pair[1]]);
            if a.hit.ring != b.hit.ring {
                continue;
            }
            if let (Some(pa), Some(pb)) = (a.pos, b.pos) {
                let diff = pa.abs_diff(pb);
                if diff == 1 || diff == a.ring_len - 1 {
                    hits[pair[0]].del = true;
                    hits[pair[1]].del = true;
                }
            }
        }
    }

    hits.into_iter().filter(|h| !h.del).map(|h| h.hit).collect()
}
