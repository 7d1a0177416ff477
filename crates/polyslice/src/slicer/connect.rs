//! Stitching plane segments into outlines.
//!
//! Model
//! - Segments form a graph over their endpoints. Walks start at forks
//!   (degree > 2), then at dangling ends (degree 1), then anywhere, so plain
//!   cycles are only entered once every irregular point is consumed.
//! - At a fork the walk tries every branch and keeps the one with the
//!   longest perimeter; the others stay available to later walks.
//! - A walk whose ends are joined by a segment becomes a closed polygon;
//!   anything else is an open chain handed to `polygons::heal_open`.

use std::collections::HashMap;

use crate::clip::{Clipper, Kernel};
use crate::geom::{Line, Point, PointKey};
use crate::polygon::Polygon;
use crate::polygons::{flatten, heal_open, nest, point_count, set_winding, union, xor};

use super::SliceOpts;

/// Branches tried per walk before forks fall back to the first link.
const BRANCH_BUDGET: usize = 500;
/// Share of points an outline pair may lose to the union before the pair is
/// xor-ed instead.
const UNION_LOSS_MAX: f64 = 0.4;
const UNION_MIN_AREA: f64 = 0.1;

pub(super) struct Stitched {
    pub tops: Vec<Polygon>,
    pub open: Vec<Polygon>,
    pub changes: Option<i64>,
}

struct Graph {
    points: Vec<Point>,
    adj: Vec<Vec<usize>>,
}

impl Graph {
    fn new(lines: &[Line]) -> Self {
        let mut index: HashMap<PointKey, usize> = HashMap::new();
        let mut g = Graph {
            points: Vec::new(),
            adj: Vec::new(),
        };
        let mut id = |p: Point, g: &mut Graph| {
            *index.entry(p.key()).or_insert_with(|| {
                g.points.push(p);
                g.adj.push(Vec::new());
                g.points.len() - 1
            })
        };
        for line in lines {
            let a = id(line.p1, &mut g);
            let b = id(line.p2, &mut g);
            if a != b {
                g.adj[a].push(b);
                g.adj[b].push(a);
            }
        }
        g
    }

    fn perimeter(&self, path: &[usize]) -> f64 {
        path.windows(2)
            .map(|w| self.points[w[0]].dist_to_2d(&self.points[w[1]]))
            .sum()
    }

    /// Longest unused path from `start`; marks its points used.
    fn walk(&self, start: usize, used: &mut [bool], budget: &mut usize) -> Vec<usize> {
        let mut path = Vec::new();
        let mut p = start;
        loop {
            used[p] = true;
            path.push(p);
            let links: Vec<usize> = self.adj[p].iter().copied().filter(|&q| !used[q]).collect();
            match links.len() {
                0 => return path,
                1 => p = links[0],
                2 if path.len() == 1 && self.adj[p].len() == 2 => p = links[0],
                _ if *budget == 0 => p = links[0],
                _ => {
                    let mut best: Option<(f64, Vec<usize>)> = None;
                    for q in links {
                        if used[q] {
                            continue;
                        }
                        *budget = budget.saturating_sub(1);
                        let branch = self.walk(q, used, budget);
                        for &b in &branch {
                            used[b] = false;
                        }
                        let len = self.points[p].dist_to_2d(&self.points[q]) + self.perimeter(&branch);
                        if best.as_ref().map_or(true, |(l, _)| len > *l) {
                            best = Some((len, branch));
                        }
                    }
                    if let Some((_, branch)) = best {
                        for &b in &branch {
                            used[b] = true;
                        }
                        path.extend(branch);
                    }
                    return path;
                }
            }
        }
    }
}

/// Closed polygons and open chains from the segment graph.
fn trace(lines: &[Line]) -> (Vec<Polygon>, Vec<Vec<Point>>) {
    let g = Graph::new(lines);
    let n = g.points.len();
    let mut used = vec![false; n];
    let mut closed = Vec::new();
    let mut open = Vec::new();
    let forks = g.adj.iter().any(|a| a.len() > 2);
    let frays = g.adj.iter().any(|a| a.len() < 2);
    if forks || frays {
        tracing::debug!(forks, frays, points = n, "irregular slice graph");
    }
    let passes: [&dyn Fn(usize) -> bool; 3] = [
        &|i| g.adj[i].len() > 2,
        &|i| g.adj[i].len() == 1,
        &|_| true,
    ];
    for starts_here in passes {
        for i in 0..n {
            if used[i] || !starts_here(i) {
                continue;
            }
            let mut budget = BRANCH_BUDGET;
            let path = g.walk(i, &mut used, &mut budget);
            let (Some(&first), Some(&last)) = (path.first(), path.last()) else {
                continue;
            };
            if path.len() > 2 && g.adj[first].contains(&last) {
                closed.push(Polygon::from_points(path.iter().map(|&j| g.points[j])));
            } else if path.len() > 1 {
                open.push(path.iter().map(|&j| g.points[j]).collect());
            }
        }
    }
    (closed, open)
}

/// Stitch, heal, clean and nest the outlines of one slice.
pub(super) fn connect<C: Clipper>(lines: &[Line], z: f64, opts: &SliceOpts, k: &Kernel<C>) -> Stitched {
    let cfg = &k.cfg;
    let (mut groups, chains) = trace(lines);
    let healed = heal_open(chains, cfg);
    groups.extend(healed.closed);
    if !healed.open.is_empty() {
        tracing::warn!(z, open = healed.open.len(), "open outline chains; part may not be manifold");
    }
    if !opts.dirty {
        groups = groups.iter().map(|p| p.clean(false, cfg)).collect();
    }

    if opts.xor {
        groups = flatten(&xor(&groups, k));
    }
    let mut changes = None;
    if opts.union {
        let before = point_count(&groups) as i64;
        let mut merged = union(&nest(groups.clone(), false, false, cfg), UNION_MIN_AREA, true, k);
        let delta = point_count(&merged) as i64 - before;
        let loss = if delta < 0 && before > 0 {
            delta.unsigned_abs() as f64 / before as f64
        } else {
            0.0
        };
        if groups.len() == 2 && loss >= UNION_LOSS_MAX {
            let x = groups[0].xor(&groups[1], k);
            tracing::debug!(z, before, loss, xor = x.len(), "union lost too many points; trying xor");
            if !x.is_empty() {
                merged = x;
            }
        }
        changes = Some(delta);
        groups = flatten(&merged);
    }

    let mut tops = nest(groups, false, false, cfg);
    set_winding(&mut tops, false, true);
    Stitched {
        tops,
        open: healed.open,
        changes,
    }
}
