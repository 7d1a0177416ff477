//! Planar polygon kernel and mesh slicer for toolpath generation.
//!
//! Layers
//! - `geom`: points, slopes, lines, bounds and the tolerance bundle `GeomCfg`.
//! - `polygon`: one ring with owned holes, its metrics and pairwise booleans.
//! - `clip`: the `Clipper` seam to the boolean engine and its `Kernel`.
//! - `polygons`: nesting, offsets/insets, set unions, fills, fingerprints.
//! - `slicer`: triangle mesh to nested polygons per Z.
//! - `wire`: flat array encoding for moving polygons across boundaries.
//!
//! Degenerate geometry yields `None` or empty results; only caller mistakes
//! surface as `Error`.

pub mod api;
pub mod clip;
pub mod error;
pub mod geom;
pub mod polygon;
pub mod polygons;
pub mod slicer;
pub mod wire;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{Error, Result};
pub use geom::GeomCfg;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::clip::{Clipper, GridClipper, Kernel, OverlayClipper};
    pub use crate::geom::rand::{draw_polygon_radial, draw_soup, RadialCfg, ReplayToken, VertexCount};
    pub use crate::geom::{Bounds, GeomCfg, Line, Point, Slope};
    pub use crate::polygon::Polygon;
    pub use crate::slicer::{slice, slice_z, Selection, SliceOpts, TriangleBuffer, ZPlan};
    pub use crate::{Error, Result};
}
