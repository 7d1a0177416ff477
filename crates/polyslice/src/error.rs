//! Contract violations.
//!
//! Degenerate geometry is never an error: operations return `None` or an empty
//! `Vec`. The variants here are caller mistakes and are meant to be propagated.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("triangle buffer length {0} is not a multiple of 9")]
    TriangleBuffer(usize),
    #[error("triangle buffer holds a non-finite coordinate at index {0}")]
    NonFinite(usize),
    #[error("wire array length {0} is not 1 + 3n")]
    WireLength(usize),
    #[error("wire open flag {0} is neither 0 nor 1")]
    WireFlag(f64),
    #[error("invalid tolerance `{name}`: {value}")]
    Tolerance { name: &'static str, value: f64 },
    #[error("offset requires at least one pass")]
    OffsetCount,
    #[error("search radius must be positive and finite, got {0}")]
    SearchRadius(f64),
    #[error("invalid z plan value {0}: heights must be finite, steps at least 0.001 and yield at most 1e6 planes")]
    ZStep(f64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
