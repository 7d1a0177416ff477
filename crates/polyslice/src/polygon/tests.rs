use super::*;
use crate::clip::Kernel;
use proptest::prelude::*;

fn square(cx: f64, cy: f64, size: f64) -> Polygon {
    Polygon::rect(Point::xy(cx, cy), size, size)
}

fn kernel() -> Kernel {
    Kernel::new(GeomCfg::default())
}

#[test]
fn winding_follows_raw_area_sign() {
    let mut p = square(0.0, 0.0, 2.0);
    assert!(!p.is_clockwise());
    assert!((p.area() - 4.0).abs() < 1e-12);
    p.set_clockwise(true);
    assert!(p.is_clockwise());
    assert!(p.area2() > 0.0);
    let mut q = square(5.0, 5.0, 1.0);
    q.oppose_winding(&p);
    assert!(!q.is_clockwise());
    q.align_winding(&p);
    assert!(q.is_clockwise());
}

#[test]
fn memo_is_dropped_on_mutation() {
    let mut p = square(0.0, 0.0, 2.0);
    assert!((p.perimeter() - 8.0).abs() < 1e-12);
    assert_eq!(p.bounds().maxx, 1.0);
    p.scale(2.0, 1.0);
    assert!((p.area() - 8.0).abs() < 1e-12);
    assert!((p.perimeter() - 12.0).abs() < 1e-12);
    assert_eq!(p.bounds().maxx, 2.0);
    p.translate(1.0, 0.0, 0.5);
    assert_eq!(p.bounds().maxx, 3.0);
    assert_eq!(p.z(), 0.5);
}

#[test]
fn open_polygons_skip_the_closing_edge() {
    let mut p = Polygon::from_points([Point::xy(0.0, 0.0), Point::xy(3.0, 0.0), Point::xy(3.0, 4.0)]);
    assert_eq!(p.segments().count(), 3);
    assert!((p.perimeter() - 12.0).abs() < 1e-12);
    p.set_open(true);
    assert_eq!(p.segments().count(), 2);
    assert!((p.perimeter() - 7.0).abs() < 1e-12);
    p.set_closed();
    assert!(!p.open);
}

#[test]
fn deep_metrics_subtract_holes() {
    let mut p = square(0.0, 0.0, 10.0);
    p.add_inner(square(0.0, 0.0, 2.0));
    assert!((p.area_deep() - 96.0).abs() < 1e-9);
    assert!((p.perimeter_deep() - 48.0).abs() < 1e-9);
    assert_eq!(p.deep_len(), 8);
    let mut flat = Vec::new();
    p.flatten_to(&mut flat);
    assert_eq!(flat.len(), 2);
    assert!(flat.iter().all(|f| f.inner().is_empty()));
}

#[test]
fn circle_is_nearly_circular() {
    let c = Polygon::circle(Point::xy(0.0, 0.0), 5.0, 128, false);
    assert!(c.circularity() > 0.99);
    assert!(!c.is_clockwise());
    let center = c.circle_center().unwrap();
    assert!(center.x.abs() < 1e-9 && center.y.abs() < 1e-9);
    assert!(Polygon::circle(Point::xy(0.0, 0.0), 5.0, 16, true).is_clockwise());
}

#[test]
fn convex_hull_drops_interior_points() {
    let pts = [
        Point::xy(0.0, 0.0),
        Point::xy(2.0, 0.0),
        Point::xy(1.0, 1.0),
        Point::xy(2.0, 2.0),
        Point::xy(0.0, 2.0),
        Point::xy(1.0, 0.0),
    ];
    let hull = Polygon::convex_hull(&pts).unwrap();
    assert_eq!(hull.len(), 4);
    assert!((hull.area() - 4.0).abs() < 1e-12);
    assert!(Polygon::convex_hull(&pts[..2]).is_none());
}

#[test]
fn clean_removes_duplicates_and_collinear_points() {
    let c = GeomCfg::default();
    let p = Polygon::from_points([
        Point::xy(0.0, 0.0),
        Point::xy(0.001, 0.0),
        Point::xy(1.0, 0.0),
        Point::xy(2.0, 0.0),
        Point::xy(2.0, 2.0),
        Point::xy(0.0, 2.0),
    ]);
    let cleaned = p.clean(false, &c);
    assert_eq!(cleaned.len(), 4);
    assert!((cleaned.area() - 4.0).abs() < 1e-9);
    let sliver = Polygon::from_points([Point::xy(0.0, 0.0), Point::xy(1.0, 0.0), Point::xy(2.0, 0.0)]);
    assert_eq!(sliver.clean(false, &c).len(), 3);
}

#[test]
fn debur_and_leftmost() {
    let p = Polygon::from_points([
        Point::xy(0.0, 0.0),
        Point::xy(0.05, 0.0),
        Point::xy(1.0, 0.0),
        Point::xy(1.0, 1.0),
    ]);
    assert_eq!(p.debur(0.1).unwrap().len(), 3);
    assert!(Polygon::from_points([Point::xy(0.0, 0.0)]).debur(0.1).is_none());
    let l = square(0.0, 0.0, 2.0).leftmost().unwrap();
    assert_eq!((l.x, l.y), (-1.0, 1.0));
}

#[test]
fn segment_intersections_are_sorted_from_start() {
    let c = GeomCfg::default();
    let mut p = square(0.0, 0.0, 10.0);
    p.add_inner(square(0.0, 0.0, 2.0));
    let a = Point::xy(-10.0, 0.0);
    let b = Point::xy(10.0, 0.0);
    let xs: Vec<f64> = p.intersections(&a, &b, true, &c).iter().map(|p| p.x).collect();
    assert_eq!(xs.len(), 4);
    assert!((xs[0] + 5.0).abs() < 1e-9 && (xs[1] + 1.0).abs() < 1e-9);
    assert!((xs[3] - 5.0).abs() < 1e-9);
    assert_eq!(p.intersections(&a, &b, false, &c).len(), 2);
}

#[test]
fn fill_angle_hint_is_normal_to_the_longest_edge() {
    let c = GeomCfg::default();
    let mut p = square(0.0, 0.0, 10.0);
    let hint = p.hint_fill_angle(&c).unwrap();
    assert!((hint.angle - 90.0).abs() < 1e-9);
    assert_eq!(p.fill_angle, Some(hint));
    let mut needle = Polygon::rect(Point::xy(0.0, 0.0), 100.0, 0.5);
    assert!(needle.hint_fill_angle(&c).is_none());
}

#[test]
fn containment_and_nesting() {
    let c = GeomCfg::default();
    let outer = square(0.0, 0.0, 10.0);
    let inner = square(1.0, 1.0, 2.0);
    let straddle = square(5.0, 0.0, 2.0);
    assert!(inner.is_inside(&outer, c.close_to_poly_sq, &c));
    assert!(inner.is_nested(&outer, &c));
    assert!(!outer.is_nested(&inner, &c));
    assert!(!straddle.is_nested(&outer, &c));
    assert!(straddle.has_points_inside(&outer, c.close_to_poly_sq, &c));
    assert!(straddle.overlaps(&outer, &c));
    assert!(!square(20.0, 0.0, 1.0).overlaps(&outer, &c));
}

#[test]
fn equivalence_tolerates_extra_collinear_points() {
    let c = GeomCfg::default();
    let a = square(0.0, 0.0, 4.0);
    let b = Polygon::from_points([
        Point::xy(-2.0, -2.0),
        Point::xy(0.0, -2.0),
        Point::xy(2.0, -2.0),
        Point::xy(2.0, 2.0),
        Point::xy(-2.0, 2.0),
    ]);
    assert!(a.is_equivalent(&b, false, &c));
    assert!(b.is_equivalent(&a, true, &c));
    assert!(!a.is_equivalent(&square(0.1, 0.0, 4.0), false, &c));
}

#[test]
fn union_of_overlapping_squares() {
    let k = kernel();
    let a = square(0.0, 0.0, 1.0);
    let b = square(0.5, 0.0, 1.0);
    let out = a.union(&b, 0.0, false, &k).unwrap();
    assert_eq!(out.len(), 1);
    assert!((out[0].area() - 1.5).abs() < 1e-6);
    assert!(a.union(&square(3.0, 0.0, 1.0), 0.0, true, &k).is_none());
}

#[test]
fn booleans_keep_the_larger_operand_height() {
    let k = kernel();
    let mut big = square(0.0, 0.0, 4.0);
    big.set_z(2.0);
    let mut small = square(2.0, 0.0, 2.0);
    small.set_z(1.0);
    for out in [
        big.union(&small, 0.0, false, &k).unwrap(),
        small.union(&big, 0.0, false, &k).unwrap(),
        big.diff(&small, &k),
        small.xor(&big, &k),
    ] {
        assert!(!out.is_empty());
        assert!(out.iter().all(|p| p.z() == 2.0));
    }
}

#[test]
fn diff_and_mask_use_even_odd() {
    let k = kernel();
    let a = square(0.0, 0.0, 2.0);
    let b = square(1.0, 0.0, 2.0);
    let d = a.diff(&b, &k);
    assert_eq!(d.len(), 1);
    assert!((d[0].area() - 2.0).abs() < 1e-6);
    let m = a.mask(&b, false, &k).unwrap();
    assert!((m[0].area() - 2.0).abs() < 1e-6);
    let inner = square(0.0, 0.0, 1.0);
    assert!(inner.mask(&a, true, &k).is_none());
    assert!(inner.mask(&square(9.0, 9.0, 1.0), false, &k).is_none());
}

#[test]
fn intersect_returns_self_when_inside() {
    let k = kernel();
    let small = square(0.0, 0.0, 1.0);
    let big = square(0.0, 0.0, 4.0);
    let out = small.intersect(&big, 0.0, &k).unwrap();
    assert_eq!(out.len(), 1);
    assert!(out[0].matches(&small));
    assert!(big.intersect(&square(10.0, 0.0, 1.0), 0.0, &k).is_none());
}

#[test]
fn xor_leaves_the_symmetric_difference() {
    let k = kernel();
    let a = square(0.0, 0.0, 2.0);
    let b = square(1.0, 0.0, 2.0);
    let area: f64 = a.xor(&b, &k).iter().map(Polygon::area_deep).sum();
    assert!((area - 4.0).abs() < 1e-6);
}

#[test]
fn offset_shrinks_and_grows() {
    let k = kernel();
    let p = square(0.0, 0.0, 10.0);
    let shrunk = p.offset(1.0, &k);
    assert_eq!(shrunk.len(), 1);
    assert!((shrunk[0].area() - 64.0).abs() < 1e-4);
    let grown = p.offset(-1.0, &k);
    // rounded corners: 100 + 4*10 + pi
    assert!((grown[0].area() - (140.0 + std::f64::consts::PI)).abs() < 0.05);
    assert!(p.offset(6.0, &k).is_empty());
}

proptest! {
    #[test]
    fn reverse_preserves_area_and_flips_winding(
        cx in -50.0f64..50.0,
        cy in -50.0f64..50.0,
        seed in 0u64..1000,
    ) {
        let cfg = crate::geom::rand::RadialCfg::default();
        let tok = crate::geom::rand::ReplayToken::new(seed, 0);
        let mut p = crate::geom::rand::draw_polygon_radial(cfg, Point::xy(cx, cy), tok);
        let area = p.area();
        let cw = p.is_clockwise();
        p.reverse();
        prop_assert!((p.area() - area).abs() < 1e-9);
        prop_assert_eq!(p.is_clockwise(), !cw);
    }

    #[test]
    fn zero_offset_is_equivalent(seed in 0u64..200) {
        let k = kernel();
        let cfg = crate::geom::rand::RadialCfg { base_radius: 5.0, ..Default::default() };
        let p = crate::geom::rand::draw_polygon_radial(cfg, Point::xy(0.0, 0.0), crate::geom::rand::ReplayToken::new(seed, 1));
        let out = p.offset(0.0, &k);
        prop_assert_eq!(out.len(), 1);
        prop_assert!(out[0].is_equivalent(&p, false, &k.cfg));
    }
}
