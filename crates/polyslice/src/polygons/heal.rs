//! Reconnecting open chains left over from stitching.
//!
//! Model
//! - Each pass walks the chains in order and keeps extending the current
//!   one with the chain whose end lies nearest to one of its ends, as long
//!   as that gap is within the bridge distance and shorter than the gap
//!   between the chain's own ends. Both orientations of both chains are
//!   tried; the partner is reversed as needed.
//! - After a pass the bridge grows past the smallest gap seen, and passes
//!   repeat while it stays under the configured maximum.
//! - Distances are squared throughout.

use crate::geom::{GeomCfg, Point};
use crate::polygon::Polygon;

const MAX_PASSES: usize = 1000;

#[derive(Clone, Debug, Default)]
pub struct Healed {
    pub closed: Vec<Polygon>,
    pub open: Vec<Polygon>,
}

#[derive(Clone, Copy)]
enum Join {
    /// root end to partner start
    LastFirst,
    /// root end to partner end
    LastLast,
    /// root start to partner start
    FirstFirst,
    /// root start to partner end
    FirstLast,
}

fn append(root: &mut Vec<Point>, tail: Vec<Point>, cfg: &GeomCfg) {
    let mut tail = tail.into_iter().peekable();
    if let (Some(last), Some(head)) = (root.last(), tail.peek()) {
        if last.is_mergeable_2d(head, cfg) {
            tail.next();
        }
    }
    root.extend(tail);
}

/// Bridge open chains into longer chains; chains whose ends meet become
/// closed polygons, the rest stay open.
pub fn heal_open(chains: Vec<Vec<Point>>, cfg: &GeomCfg) -> Healed {
    let mut chains: Vec<Option<Vec<Point>>> = chains
        .into_iter()
        .filter(|c| c.len() > 1)
        .map(Some)
        .collect();
    let mut bridge = cfg.bridge_gap_sq;
    let bridge_max = cfg.bridge_gap_max_sq;

    for pass in 0..MAX_PASSES {
        if bridge <= 0.0 {
            break;
        }
        let mut min_gap = f64::INFINITY;
        for i in 0..chains.len() {
            loop {
                let Some(root) = chains[i].as_ref() else { break };
                let (rfirst, rlast) = (root[0], root[root.len() - 1]);
                let mut best: Option<(f64, usize, Join)> = None;
                let mut best_dist = rfirst.dist_to_sq_2d(&rlast);
                for (j, next) in chains.iter().enumerate().skip(i + 1) {
                    let Some(next) = next else { continue };
                    let (nfirst, nlast) = (next[0], next[next.len() - 1]);
                    for (d, join) in [
                        (rlast.dist_to_sq_2d(&nfirst), Join::LastFirst),
                        (rlast.dist_to_sq_2d(&nlast), Join::LastLast),
                        (rfirst.dist_to_sq_2d(&nfirst), Join::FirstFirst),
                        (rfirst.dist_to_sq_2d(&nlast), Join::FirstLast),
                    ] {
                        min_gap = min_gap.min(d);
                        if d < best_dist && d <= bridge {
                            best_dist = d;
                            best = Some((d, j, join));
                        }
                    }
                }
                let Some((_, j, join)) = best else { break };
                let (Some(mut root), Some(mut next)) = (chains[i].take(), chains[j].take()) else {
                    break;
                };
                let joined = match join {
                    Join::LastFirst => {
                        append(&mut root, next, cfg);
                        root
                    }
                    Join::LastLast => {
                        next.reverse();
                        append(&mut root, next, cfg);
                        root
                    }
                    Join::FirstFirst => {
                        root.reverse();
                        append(&mut root, next, cfg);
                        root
                    }
                    Join::FirstLast => {
                        append(&mut next, root, cfg);
                        next
                    }
                };
                chains[i] = Some(joined);
            }
        }
        let grown = if min_gap.is_finite() {
            (min_gap + 0.01).max(bridge + 0.1)
        } else {
            bridge + 0.1
        };
        tracing::trace!(pass, bridge, grown, min_gap, "bridge pass");
        bridge = grown;
        if bridge >= bridge_max || min_gap >= bridge_max {
            break;
        }
    }

    let close_sq = cfg.bridge_gap_sq.max(cfg.merge_sq());
    let mut out = Healed::default();
    for mut chain in chains.into_iter().flatten() {
        let (first, last) = (chain[0], chain[chain.len() - 1]);
        if first.dist_to_sq_2d(&last) <= close_sq {
            if first.is_mergeable_2d(&last, cfg) {
                chain.pop();
            }
            if chain.len() > 2 {
                out.closed.push(Polygon::from_points(chain));
                continue;
            }
        }
        let mut poly = Polygon::from_points(chain);
        poly.set_open(true);
        out.open.push(poly);
    }
    out
}
