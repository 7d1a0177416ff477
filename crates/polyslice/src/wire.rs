//! Flat array encoding of polygons.
//!
//! A polygon is `[open, x0, y0, z0, x1, y1, z1, ...]` with `open` as `1.0`
//! or `0.0`, and its holes travel beside it as a list of the same. Round
//! trips are exact: coordinates are copied, never rounded.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geom::Point;
use crate::polygon::Polygon;

impl Polygon {
    /// Outer ring only; holes are not included.
    pub fn to_array(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(1 + self.len() * 3);
        out.push(if self.open { 1.0 } else { 0.0 });
        for p in self.points() {
            out.extend([p.x, p.y, p.z]);
        }
        out
    }

    pub fn from_array(array: &[f64]) -> Result<Polygon> {
        let Some((&flag, coords)) = array.split_first() else {
            return Err(Error::WireLength(0));
        };
        if coords.len() % 3 != 0 {
            return Err(Error::WireLength(array.len()));
        }
        let open = match flag {
            f if f == 0.0 => false,
            f if f == 1.0 => true,
            f => return Err(Error::WireFlag(f)),
        };
        let mut poly = Polygon::from_points(coords.chunks_exact(3).map(|c| Point::new(c[0], c[1], c[2])));
        poly.set_open(open);
        Ok(poly)
    }
}

/// A polygon and its holes, ready for serde.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WirePolygon {
    pub array: Vec<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inner: Vec<WirePolygon>,
}

impl WirePolygon {
    pub fn from_polygon(poly: &Polygon) -> Self {
        Self {
            array: poly.to_array(),
            inner: poly.inner().iter().map(WirePolygon::from_polygon).collect(),
        }
    }

    /// Holes come back one level below their parent.
    pub fn to_polygon(&self) -> Result<Polygon> {
        self.to_polygon_at(0)
    }

    fn to_polygon_at(&self, depth: usize) -> Result<Polygon> {
        let mut poly = Polygon::from_array(&self.array)?;
        poly.depth = depth;
        for hole in &self.inner {
            poly.add_inner(hole.to_polygon_at(depth + 1)?);
        }
        Ok(poly)
    }
}

pub fn encode(polys: &[Polygon]) -> Vec<WirePolygon> {
    polys.iter().map(WirePolygon::from_polygon).collect()
}

pub fn decode(wire: &[WirePolygon]) -> Result<Vec<Polygon>> {
    wire.iter().map(WirePolygon::to_polygon).collect()
}
