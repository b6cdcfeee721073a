//! Domain types used throughout the engine.
//!
//! This module defines:
//!
//! - solution descriptions (`ChemicalSpecies`, `Analyte`)
//! - titration topologies with their constants (`Topology`, `TopologyKind`)
//! - validated scenarios (`TitrationRecord`) and their `Landmarks`
//! - curve outputs (`CurvePoint`, `CurveFile`) and indicators (`Indicator`)

pub mod record;
pub mod types;

pub use record::*;
pub use types::*;
