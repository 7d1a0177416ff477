//! Curated surface for callers outside the crate.
//!
//! Collects what a slicing pipeline needs under one path: mesh in, nested
//! polygons per height out, plus the set operations used to turn outlines
//! into shells and fills.

// Geometry and tolerances
pub use crate::geom::{Bounds, GeomCfg, Line, Point, Slope};
pub use crate::polygon::Polygon;
// Clipping backends
pub use crate::clip::{Clipper, GridClipper, Kernel, OverlayClipper};
// Set operations
pub use crate::polygons::{
    fill_area, fingerprint, fingerprint_compare, inset, nest, offset, union, FillLines, InsetLayer,
    OffsetDist, OffsetOpts, OffsetOutput, Print,
};
// Slicing
pub use crate::slicer::{slice, slice_z, Selection, Slice, SliceOpts, SliceSet, TriangleBuffer, ZPlan};
// Wire format
pub use crate::wire::{decode as wire_decode, encode as wire_encode, WirePolygon};
