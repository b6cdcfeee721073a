//! Input/output helpers.
//!
//! - JSON catalog ingest + validation (`catalog`)
//! - curve CSV export (`export`)
//! - curve JSON read/write (`curve`)

pub mod catalog;
pub mod curve;
pub mod export;

pub use catalog::*;
pub use curve::*;
pub use export::*;
