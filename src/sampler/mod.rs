//! Curve sampling orchestration.
//!
//! Responsibilities:
//!
//! - build the volume grid (uniform steps + equivalence refinements)
//! - evaluate each volume independently with the solver
//! - sample whole catalogs in parallel

pub mod curve;
pub mod grid;

pub use curve::*;
pub use grid::*;
