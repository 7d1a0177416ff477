//! Tolerances used by every predicate in the kernel.
//!
//! - `GeomCfg`: one explicit bundle of epsilons instead of process-wide settings.
//!   Units are millimetres; squared fields are compared against squared distances.
//! - `GeomCfg::validate` is the single place that rejects nonsense values.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Geometry configuration (tolerances).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeomCfg {
    /// Points closer than this are merged (2D and 3D).
    pub merge: f64,
    /// Vertices within this vertical distance lie on a slice plane.
    pub slice_z: f64,
    /// Grace used by bounds containment.
    pub bounds: f64,
    /// Default margin for `Bounds::equals`.
    pub bounds_margin: f64,
    /// Fallback slope tolerance when the adaptive one degenerates.
    pub slope: f64,
    /// Upper limit of the length-adaptive slope tolerance.
    pub slope_merge: f64,
    /// Equivalence: allowed absolute area difference.
    pub poly_area: f64,
    /// Equivalence: allowed bounds difference.
    pub poly_bounds: f64,
    /// Equivalence: allowed point-to-edge distance.
    pub poly_merge: f64,
    /// Equivalence: circularity short-circuit window.
    pub circularity: f64,
    /// Coincidence distance for fill ray crossings.
    pub fill_merge: f64,
    pub point_on_line: f64,
    /// Squared "near polygon" distance used by containment.
    pub close_to_poly_sq: f64,
    /// Edges longer than this also have their midpoint tested for containment.
    pub midpoint_check_dist: f64,
    /// Squared tolerance for nesting tests.
    pub nested_sq: f64,
    /// Determinant under which two segments count as parallel.
    pub collinear: f64,
    /// Results of boolean/offset operations smaller than this are dropped.
    pub min_area: f64,
    /// Grid resolution (units per mm) of `GridClipper`.
    pub clip_scale: f64,
    /// Distance under which `Polygon::clean` drops near-duplicate or collinear points.
    pub clean: f64,
    /// Maximum deviation of a round offset join from the true arc.
    pub arc_tolerance: f64,
    /// Squared gap bridged between open slice chains on the first healing pass.
    pub bridge_gap_sq: f64,
    /// Squared gap at which progressive bridging stops. Zero keeps a single pass.
    pub bridge_gap_max_sq: f64,
    /// Fill-angle hint: squared edge length window and minimum circularity.
    pub hint_len_min_sq: f64,
    pub hint_len_max_sq: f64,
    pub hint_min_circ: f64,
    /// Fingerprint comparison: relative perimeter, relative circularity, bounds delta.
    pub print_perimeter: f64,
    pub print_circularity: f64,
    pub print_bounds: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self {
            merge: 0.005,
            slice_z: 0.0001,
            bounds: 0.0001,
            bounds_margin: 0.05,
            slope: 0.02,
            slope_merge: 0.25,
            poly_area: 0.05,
            poly_bounds: 0.01,
            poly_merge: 0.05,
            circularity: 0.001,
            fill_merge: 0.001,
            point_on_line: 0.01,
            close_to_poly_sq: 0.001 * 0.001,
            midpoint_check_dist: 1.0,
            nested_sq: 0.01 * 0.01,
            collinear: 0.0001,
            min_area: 0.1,
            clip_scale: 100_000.0,
            clean: 0.0025,
            arc_tolerance: 0.005,
            bridge_gap_sq: 0.0001,
            bridge_gap_max_sq: 0.0,
            hint_len_min_sq: 3.0 * 3.0,
            hint_len_max_sq: 20.0 * 20.0,
            hint_min_circ: 0.15,
            print_perimeter: 0.005,
            print_circularity: 0.02,
            print_bounds: 0.1,
        }
    }
}

impl GeomCfg {
    /// Squared merge distance.
    #[inline]
    pub fn merge_sq(&self) -> f64 {
        self.merge * self.merge
    }

    /// Reject non-finite or negative tolerances and a non-positive grid scale.
    pub fn validate(&self) -> Result<(), Error> {
        let fields = [
            ("merge", self.merge),
            ("slice_z", self.slice_z),
            ("bounds", self.bounds),
            ("bounds_margin", self.bounds_margin),
            ("slope", self.slope),
            ("slope_merge", self.slope_merge),
            ("poly_area", self.poly_area),
            ("poly_bounds", self.poly_bounds),
            ("poly_merge", self.poly_merge),
            ("circularity", self.circularity),
            ("fill_merge", self.fill_merge),
            ("point_on_line", self.point_on_line),
            ("close_to_poly_sq", self.close_to_poly_sq),
            ("midpoint_check_dist", self.midpoint_check_dist),
            ("nested_sq", self.nested_sq),
            ("collinear", self.collinear),
            ("min_area", self.min_area),
            ("clean", self.clean),
            ("bridge_gap_sq", self.bridge_gap_sq),
            ("bridge_gap_max_sq", self.bridge_gap_max_sq),
            ("hint_len_min_sq", self.hint_len_min_sq),
            ("hint_len_max_sq", self.hint_len_max_sq),
            ("hint_min_circ", self.hint_min_circ),
            ("print_perimeter", self.print_perimeter),
            ("print_circularity", self.print_circularity),
            ("print_bounds", self.print_bounds),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::Tolerance { name, value });
            }
        }
        for (name, value) in [
            ("clip_scale", self.clip_scale),
            ("arc_tolerance", self.arc_tolerance),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::Tolerance { name, value });
            }
        }
        Ok(())
    }
}
