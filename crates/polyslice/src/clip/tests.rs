use super::*;

fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Path {
    vec![[x0, y0], [x1, y0], [x1, y1], [x0, y1]]
}

fn total_area(shapes: &[Shape]) -> f64 {
    shapes
        .iter()
        .map(|s| {
            signed_area(&s.outer).abs() - s.holes.iter().map(|h| signed_area(h).abs()).sum::<f64>()
        })
        .sum()
}

#[test]
fn signed_area_and_orient() {
    let mut r = rect(0.0, 0.0, 2.0, 1.0);
    assert!((signed_area(&r) - 2.0).abs() < 1e-12);
    orient(&mut r, false);
    assert!((signed_area(&r) + 2.0).abs() < 1e-12);
    assert_eq!(signed_area(&r[..2]), 0.0);
}

#[test]
fn overlay_union_and_difference() {
    let c = OverlayClipper;
    let a = vec![rect(0.0, 0.0, 2.0, 2.0)];
    let b = vec![rect(1.0, 0.0, 3.0, 2.0)];
    let u = c.boolean(&a, &b, ClipOp::Union, Fill::NonZero);
    assert_eq!(u.len(), 1);
    assert!((total_area(&u) - 6.0).abs() < 1e-6);
    let d = c.boolean(&a, &b, ClipOp::Difference, Fill::EvenOdd);
    assert!((total_area(&d) - 2.0).abs() < 1e-6);
    assert!(c.boolean(&[], &[], ClipOp::Union, Fill::NonZero).is_empty());
}

#[test]
fn hole_comes_back_as_inner_ring() {
    let c = OverlayClipper;
    let outer = vec![rect(0.0, 0.0, 10.0, 10.0)];
    let hole = vec![rect(4.0, 4.0, 6.0, 6.0)];
    let out = c.boolean(&outer, &hole, ClipOp::Difference, Fill::EvenOdd);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].holes.len(), 1);
    assert!((total_area(&out) - 96.0).abs() < 1e-6);
}

#[test]
fn grid_snaps_results() {
    let c = GridClipper::new(10.0);
    let a = vec![rect(0.0, 0.0, 1.04, 1.0)];
    let out = c.boolean(&a, &[], ClipOp::Union, Fill::NonZero);
    assert_eq!(out.len(), 1);
    assert!((total_area(&out) - 1.0).abs() < 1e-9);
    // collapses below one grid cell
    let tiny = vec![rect(0.0, 0.0, 0.01, 0.01)];
    assert!(c.boolean(&tiny, &[], ClipOp::Union, Fill::NonZero).is_empty());
}

#[test]
fn closed_offset_grows_and_shrinks() {
    let c = OverlayClipper;
    let sq = vec![rect(0.0, 0.0, 10.0, 10.0)];
    let grown = c.offset(&sq, 1.0, Ends::Closed, 0.005);
    assert_eq!(grown.len(), 1);
    let area = total_area(&grown);
    assert!(area > 143.0 && area < 140.0 + std::f64::consts::PI + 1e-6);
    let shrunk = c.offset(&sq, -1.0, Ends::Closed, 0.005);
    assert!((total_area(&shrunk) - 64.0).abs() < 1e-4);
    assert!(c.offset(&sq, -5.5, Ends::Closed, 0.005).is_empty());
    let same = c.offset(&sq, 0.0, Ends::Closed, 0.005);
    assert!((total_area(&same) - 100.0).abs() < 1e-6);
}

#[test]
fn open_paths_expand_into_strokes() {
    let c = OverlayClipper;
    let line = vec![vec![[0.0, 0.0], [10.0, 0.0]]];
    let square = c.offset(&line, 1.0, Ends::OpenSquare, 0.005);
    assert!((total_area(&square) - 24.0).abs() < 1e-4);
    let round = total_area(&c.offset(&line, 1.0, Ends::OpenRound, 0.005));
    assert!(round > 23.0 && round < 20.0 + std::f64::consts::PI);
    assert!(c.offset(&line, -1.0, Ends::OpenSquare, 0.005).is_empty());
}

#[test]
fn disk_sides_track_tolerance() {
    assert_eq!(band::sides(1.0, 2.0), 8);
    assert!(band::sides(10.0, 0.001) > band::sides(1.0, 0.001));
    assert!(band::sides(1e6, 1e-9) <= 256);
}
