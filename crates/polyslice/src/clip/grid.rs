//! Integer-grid backend: snap, delegate, snap back.
//!
//! Coordinates are rounded to multiples of `1/scale` on the way in and out,
//! the same quantization an integer clipping engine applies. Rings that
//! collapse under snapping are dropped.

use super::{ClipOp, Clipper, Fill, OverlayClipper, Path, Shape};

#[derive(Clone, Copy, Debug)]
pub struct GridClipper<C = OverlayClipper> {
    scale: f64,
    inner: C,
}

impl GridClipper {
    pub fn new(scale: f64) -> Self {
        Self {
            scale,
            inner: OverlayClipper,
        }
    }
}

impl<C> GridClipper<C> {
    pub fn with_inner(scale: f64, inner: C) -> Self {
        Self { scale, inner }
    }
    #[inline]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    fn snap(&self, path: &[[f64; 2]]) -> Option<Path> {
        let s = self.scale;
        let mut out: Path = path
            .iter()
            .map(|[x, y]| [(x * s).round() / s, (y * s).round() / s])
            .collect();
        out.dedup();
        while out.len() > 1 && out.first() == out.last() {
            out.pop();
        }
        (out.len() >= 3).then_some(out)
    }

    fn snap_all(&self, paths: &[Path]) -> Vec<Path> {
        paths.iter().filter_map(|p| self.snap(p)).collect()
    }
}

impl<C: Clipper> Clipper for GridClipper<C> {
    fn boolean(&self, subject: &[Path], clip: &[Path], op: ClipOp, fill: Fill) -> Vec<Shape> {
        let subject = self.snap_all(subject);
        let clip = self.snap_all(clip);
        self.inner
            .boolean(&subject, &clip, op, fill)
            .into_iter()
            .filter_map(|shape| {
                let outer = self.snap(&shape.outer)?;
                Some(Shape {
                    outer,
                    holes: self.snap_all(&shape.holes),
                })
            })
            .collect()
    }
}
