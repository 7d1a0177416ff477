//! Planar primitives and tolerances.
//!
//! Purpose
//! - `Point`, `Slope`, `Line`, `Bounds`: the value types every other module
//!   builds on.
//! - `GeomCfg`: all tolerances in one explicit struct, passed down by value.
//! - `util`: segment intersection and small scalar helpers.

mod bounds;
mod line;
mod point;
pub mod rand;
mod slope;
mod types;
pub mod util;

pub use bounds::Bounds;
pub use line::{Line, LineKey};
pub use point::{Point, PointKey};
pub use slope::Slope;
pub use types::GeomCfg;
