//! Equilibrium solver: regime tables and pH evaluation per topology.
//!
//! The solver is a set of small, pure functions so that the sampler, the CLI and
//! catalog validation can all call it without shared state.

pub mod regime;
pub mod solver;

pub use regime::*;
pub use solver::*;
