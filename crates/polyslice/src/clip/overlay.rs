//! Floating-point backend on `i_overlay`.

use i_overlay::core::fill_rule::FillRule;
use i_overlay::core::overlay_rule::OverlayRule;
use i_overlay::float::single::SingleFloatOverlay;

use super::{ClipOp, Clipper, Fill, Path, Shape};

#[derive(Clone, Copy, Debug, Default)]
pub struct OverlayClipper;

impl Clipper for OverlayClipper {
    fn boolean(&self, subject: &[Path], clip: &[Path], op: ClipOp, fill: Fill) -> Vec<Shape> {
        let subject: Vec<Path> = subject.iter().filter(|p| p.len() >= 3).cloned().collect();
        let clip: Vec<Path> = clip.iter().filter(|p| p.len() >= 3).cloned().collect();
        if subject.is_empty() && clip.is_empty() {
            return Vec::new();
        }
        let rule = match op {
            ClipOp::Union => OverlayRule::Union,
            ClipOp::Intersect => OverlayRule::Intersect,
            ClipOp::Difference => OverlayRule::Difference,
            ClipOp::Xor => OverlayRule::Xor,
        };
        let fill = match fill {
            Fill::EvenOdd => FillRule::EvenOdd,
            Fill::NonZero => FillRule::NonZero,
        };
        subject
            .overlay(&clip, rule, fill)
            .into_iter()
            .filter_map(Shape::from_contours)
            .collect()
    }
}
