use super::*;
use crate::geom::GeomCfg;
use std::collections::BTreeSet;

type P3 = [f64; 3];

fn kernel() -> Kernel {
    Kernel::new(GeomCfg::default())
}

fn quad(out: &mut Vec<f64>, a: P3, b: P3, c: P3, d: P3) {
    for v in [a, b, c, a, c, d] {
        out.extend(v);
    }
}

/// Side walls of the box `[x0, x1] x [y0, y1] x [z0, z1]`, optionally capped.
fn walls(out: &mut Vec<f64>, (x0, y0, x1, y1): (f64, f64, f64, f64), (z0, z1): (f64, f64), caps: bool) {
    let ring = [[x0, y0], [x1, y0], [x1, y1], [x0, y1]];
    for i in 0..4 {
        let (p, q) = (ring[i], ring[(i + 1) % 4]);
        quad(out, [p[0], p[1], z0], [q[0], q[1], z0], [q[0], q[1], z1], [p[0], p[1], z1]);
    }
    if caps {
        let at = |z: f64| ring.map(|[x, y]| [x, y, z]);
        let (b, t) = (at(z0), at(z1));
        quad(out, b[0], b[3], b[2], b[1]);
        quad(out, t[0], t[1], t[2], t[3]);
    }
}

fn unit_cube() -> TriangleBuffer {
    let mut c = Vec::new();
    walls(&mut c, (0.0, 0.0, 1.0, 1.0), (0.0, 1.0), true);
    TriangleBuffer::new(c).unwrap()
}

#[test]
fn buffer_validation() {
    assert_eq!(TriangleBuffer::new(vec![0.0; 10]).unwrap_err(), Error::TriangleBuffer(10));
    let mut c = vec![0.0; 9];
    c[4] = f64::NAN;
    assert_eq!(TriangleBuffer::new(c).unwrap_err(), Error::NonFinite(4));
    let buf = TriangleBuffer::from_f32(&[0.0, 0.0, 1.0, 1.0, 0.0, 2.0, 0.0, 1.0, 3.0]).unwrap();
    assert_eq!(buf.len(), 1);
    assert_eq!((buf.z_min(), buf.z_max()), (1.0, 3.0));
    assert!(TriangleBuffer::new(Vec::new()).unwrap().is_empty());
}

#[test]
fn cube_mid_slice_is_one_square() {
    let k = kernel();
    let s = slice_z(&unit_cube(), 0.5, &SliceOpts::default(), &k);
    assert_eq!(s.lines.len(), 4);
    assert_eq!(s.tops.len(), 1);
    assert!(s.open.is_empty());
    let top = &s.tops[0];
    assert_eq!(top.len(), 4);
    assert!((top.area() - 1.0).abs() < 1e-9);
    assert!(!top.is_clockwise());
    assert!(top.points().iter().all(|p| p.z == 0.5));
    assert_eq!(s.changes, None);
}

#[test]
fn cube_faces_count_at_top_and_bottom() {
    let k = kernel();
    let cube = unit_cube();
    for z in [0.0, 1.0] {
        let s = slice_z(&cube, z, &SliceOpts::default(), &k);
        assert_eq!(s.tops.len(), 1, "z = {z}");
        assert!((s.tops[0].area() - 1.0).abs() < 1e-9);
    }
    let under = SliceOpts {
        select: Selection::Under,
        ..SliceOpts::default()
    };
    assert_eq!(slice_z(&cube, 1.0, &under, &k).tops.len(), 1);
}

#[test]
fn both_selection_returns_lines_only() {
    let k = kernel();
    let opts = SliceOpts {
        select: Selection::Both,
        ..SliceOpts::default()
    };
    let s = slice_z(&unit_cube(), 0.5, &opts, &k);
    assert_eq!(s.lines.len(), 4);
    assert!(s.tops.is_empty() && s.open.is_empty());
}

#[test]
fn frame_has_an_opposite_wound_hole() {
    let k = kernel();
    let mut c = Vec::new();
    walls(&mut c, (-1.0, -1.0, 1.0, 1.0), (0.0, 1.0), false);
    walls(&mut c, (-0.5, -0.5, 0.5, 0.5), (0.0, 1.0), false);
    let buf = TriangleBuffer::new(c).unwrap();
    let s = slice_z(&buf, 0.5, &SliceOpts::default(), &k);
    assert_eq!(s.tops.len(), 1);
    let top = &s.tops[0];
    assert_eq!(top.inner().len(), 1);
    let hole = &top.inner()[0];
    assert_eq!((top.depth, hole.depth), (0, 1));
    assert_ne!(top.is_clockwise(), hole.is_clockwise());
    assert!((top.area_deep() - 3.0).abs() < 1e-9);
}

#[test]
fn union_merges_overlapping_bodies() {
    let k = kernel();
    let mut c = Vec::new();
    walls(&mut c, (0.0, 0.0, 1.0, 1.0), (0.0, 1.0), true);
    walls(&mut c, (0.3, 0.4, 1.3, 1.4), (0.0, 1.0), true);
    let buf = TriangleBuffer::new(c).unwrap();
    assert_eq!(slice_z(&buf, 0.5, &SliceOpts::default(), &k).tops.len(), 2);
    let opts = SliceOpts {
        union: true,
        ..SliceOpts::default()
    };
    let s = slice_z(&buf, 0.5, &opts, &k);
    assert_eq!(s.tops.len(), 1);
    assert!((s.tops[0].area() - 1.58).abs() < 1e-6);
    assert!(s.changes.is_some());
}

#[test]
fn open_surface_leaves_an_open_chain() {
    let k = kernel();
    let mut c = Vec::new();
    quad(&mut c, [0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [2.0, 0.0, 1.0], [0.0, 0.0, 1.0]);
    let buf = TriangleBuffer::new(c).unwrap();
    let s = slice_z(&buf, 0.5, &SliceOpts::default(), &k);
    assert!(s.tops.is_empty());
    assert_eq!(s.open.len(), 1);
    assert!(s.open[0].open);
}

#[test]
fn step_plan_starts_half_a_step_up() {
    let k = kernel();
    let set = slice(&unit_cube(), &ZPlan::Step { step: 0.25 }, &SliceOpts::default(), &k).unwrap();
    let zs: Vec<f64> = set.slices.iter().map(|s| s.z).collect();
    assert_eq!(zs, vec![0.125, 0.375, 0.625, 0.875]);
    assert!(set.slices.iter().all(|s| s.tops.len() == 1));
    assert_eq!(set.flats.len(), 2);
    assert!((set.flats[0].1 - 1.0).abs() < 1e-9);
    assert_eq!((set.z_min, set.z_max), (0.0, 1.0));

    let set = slice(&unit_cube(), &ZPlan::Step { step: 0.3 }, &SliceOpts::default(), &k).unwrap();
    let zs: Vec<f64> = set.slices.iter().map(|s| s.z).collect();
    assert_eq!(zs, vec![0.15, 0.45, 0.75]);
}

#[test]
fn plans_validate_and_sort() {
    let k = kernel();
    let cube = unit_cube();
    let opts = SliceOpts::default();
    assert_eq!(
        slice(&cube, &ZPlan::Step { step: 0.0 }, &opts, &k).unwrap_err(),
        Error::ZStep(0.0)
    );
    assert!(slice(&cube, &ZPlan::Unique { min_step: f64::NAN }, &opts, &k).is_err());
    assert!(slice(&cube, &ZPlan::Explicit(vec![0.5, f64::INFINITY]), &opts, &k).is_err());
    let explicit = slice(&cube, &ZPlan::Explicit(vec![0.75, 0.2504]), &opts, &k).unwrap();
    let zs: Vec<f64> = explicit.slices.iter().map(|s| s.z).collect();
    assert_eq!(zs, vec![0.25, 0.75]);
}

#[test]
fn tiny_steps_are_rejected() {
    let k = kernel();
    let opts = SliceOpts::default();
    for step in [1e-300, 0.0004] {
        assert_eq!(
            slice(&unit_cube(), &ZPlan::Step { step }, &opts, &k).unwrap_err(),
            Error::ZStep(step)
        );
    }
    let mut tall = Vec::new();
    walls(&mut tall, (0.0, 0.0, 1.0, 1.0), (0.0, 2000.0), true);
    let tall = TriangleBuffer::new(tall).unwrap();
    assert!(slice(&tall, &ZPlan::Step { step: 0.001 }, &opts, &k).is_err());
}

#[test]
fn heights_are_distinct_after_rounding() {
    let k = kernel();
    let opts = SliceOpts::default();
    let set = slice(&unit_cube(), &ZPlan::Step { step: 0.001 }, &opts, &k).unwrap();
    let keys: BTreeSet<i64> = set.slices.iter().map(|s| plan_key(s.z)).collect();
    assert_eq!(keys.len(), set.slices.len());
    assert!(set.slices.windows(2).all(|w| w[0].z < w[1].z));

    let plan = ZPlan::Explicit(vec![0.5, 0.5001, 0.4999, 0.25]);
    let zs: Vec<f64> = slice(&unit_cube(), &plan, &opts, &k)
        .unwrap()
        .slices
        .iter()
        .map(|s| s.z)
        .collect();
    assert_eq!(zs, vec![0.25, 0.5]);
}

#[test]
fn unique_plan_cuts_between_vertex_heights() {
    let k = kernel();
    let cube = unit_cube();
    let opts = SliceOpts::default();
    let set = slice(&cube, &ZPlan::Unique { min_step: 0.0 }, &opts, &k).unwrap();
    assert_eq!(set.slices.len(), 1);
    assert_eq!(set.slices[0].z, 0.5);
    assert_eq!(set.slices[0].tops.len(), 1);
    assert!(slice(&cube, &ZPlan::Unique { min_step: 2.0 }, &opts, &k).unwrap().slices.is_empty());

    // a step at 0.4 adds a second band
    let mut c = Vec::new();
    walls(&mut c, (0.0, 0.0, 1.0, 1.0), (0.0, 0.4), true);
    walls(&mut c, (0.0, 0.0, 0.5, 1.0), (0.4, 1.0), true);
    let buf = TriangleBuffer::new(c).unwrap();
    let zs: Vec<f64> = slice(&buf, &ZPlan::Unique { min_step: 0.0 }, &opts, &k)
        .unwrap()
        .slices
        .iter()
        .map(|s| s.z)
        .collect();
    assert_eq!(zs, vec![0.2, 0.7]);
    let merged = slice(&buf, &ZPlan::Unique { min_step: 0.5 }, &opts, &k).unwrap();
    assert_eq!(merged.slices.len(), 1);
    assert_eq!(merged.slices[0].z, 0.5);
}

#[test]
fn heights_on_flat_faces_are_lifted() {
    let k = kernel();
    let opts = SliceOpts::default();
    let mut c = Vec::new();
    walls(&mut c, (0.0, 0.0, 2.0, 2.0), (0.0, 0.5), true);
    walls(&mut c, (0.0, 0.0, 1.0, 1.0), (0.5, 1.0), true);
    let buf = TriangleBuffer::new(c).unwrap();
    let set = slice(&buf, &ZPlan::Step { step: 0.5 }, &opts, &k).unwrap();
    let zs: Vec<f64> = set.slices.iter().map(|s| s.z).collect();
    assert_eq!(zs, vec![0.25, 0.75]);
    let set = slice(&buf, &ZPlan::Explicit(vec![0.5]), &opts, &k).unwrap();
    assert_eq!(set.slices[0].z, 0.501);
    assert_eq!(set.slices[0].tops.len(), 1);
    assert!((set.slices[0].tops[0].area() - 1.0).abs() < 1e-9);
    // top of the base and bottom of the tower share the height
    assert!(set.flats.iter().any(|(z, a)| *z == 0.5 && (*a - 5.0).abs() < 1e-9));
}

#[test]
fn flat_mesh_has_nothing_to_slice() {
    let k = kernel();
    let buf = TriangleBuffer::new(vec![0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 2.0, 0.0]).unwrap();
    let set = slice(&buf, &ZPlan::Step { step: 1.0 }, &SliceOpts::default(), &k).unwrap();
    assert!(set.slices.is_empty());
    assert_eq!(set.flats, vec![(0.0, 2.0)]);
}

#[test]
fn dedup_drops_plain_duplicates_and_keeps_edges() {
    let cfg = GeomCfg::default();
    let (a, b, c) = (Point::xy(0.0, 0.0), Point::xy(1.0, 1.0), Point::xy(2.0, 0.0));
    let plain = vec![Line::ordered(a, b), Line::ordered(b, a), Line::ordered(b, c)];
    let out = remove_duplicate_lines(plain, &cfg);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].key, Line::ordered(b, c).key);

    let mut edge = Line::ordered(a, b);
    edge.edge = true;
    let out = remove_duplicate_lines(vec![edge, Line::ordered(a, b), edge], &cfg);
    assert_eq!(out.len(), 1);
    assert!(out[0].edge);
}

#[test]
fn dedup_merges_collinear_runs() {
    let cfg = GeomCfg::default();
    let pts: Vec<Point> = (0..4).map(|i| Point::xy(i as f64, 0.0)).collect();
    let mut run: Vec<Line> = pts.windows(2).map(|w| Line::ordered(w[0], w[1])).collect();
    run[1].edge = true;
    run.push(Line::ordered(pts[3], Point::xy(3.0, 2.0)));
    let out = remove_duplicate_lines(run, &cfg);
    assert_eq!(out.len(), 2);
    let long = out.iter().find(|l| (l.length() - 3.0).abs() < 1e-12).unwrap();
    assert!(long.edge);
}
