//! Shape fingerprints for cheap "did this layer change" checks.

use serde::{Deserialize, Serialize};

use crate::geom::{Bounds, GeomCfg};
use crate::polygon::Polygon;

use super::flatten;

/// Summary of one ring.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Print {
    pub points: usize,
    pub area: f64,
    pub perimeter: f64,
    pub circularity: f64,
    pub bounds: Bounds,
}

impl Print {
    fn of(p: &Polygon) -> Self {
        Self {
            points: p.len(),
            area: p.area(),
            perimeter: p.perimeter(),
            circularity: p.circularity(),
            bounds: p.bounds(),
        }
    }
}

/// One print per ring (holes flattened out), ordered by area and then by
/// the lower-left corner of the bounds.
pub fn fingerprint(polys: &[Polygon]) -> Vec<Print> {
    let mut prints: Vec<Print> = flatten(polys).iter().map(Print::of).collect();
    prints.sort_by(|a, b| {
        a.area
            .total_cmp(&b.area)
            .then(a.bounds.minx.total_cmp(&b.bounds.minx))
            .then(a.bounds.miny.total_cmp(&b.bounds.miny))
    });
    prints
}

fn within_rel(a: f64, b: f64, rel: f64) -> bool {
    let scale = a.abs().max(b.abs());
    scale == 0.0 || (a - b).abs() <= rel * scale
}

/// Same ring count, and ring by ring: perimeter and circularity within their
/// relative tolerances, bounds within `print_bounds` of each other.
pub fn fingerprint_compare(a: &[Print], b: &[Print], cfg: &GeomCfg) -> bool {
    a.len() == b.len()
        && a.iter().zip(b).all(|(ra, rb)| {
            within_rel(ra.perimeter, rb.perimeter, cfg.print_perimeter)
                && within_rel(ra.circularity, rb.circularity, cfg.print_circularity)
                && ra.bounds.delta(&rb.bounds) <= cfg.print_bounds
        })
}
