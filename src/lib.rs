//! `titration-curves` library crate.
//!
//! The binary (`titr`) is a thin wrapper around this library so that:
//!
//! - the equilibrium engine is testable without spawning processes
//! - catalogs, sampling and indicator matching are reusable from other front-ends
//! - code stays easy to navigate as the project grows
//!
//! The engine itself is `models::solve` / `models::evaluate` over a validated
//! `domain::TitrationRecord`; records only come out of `catalog::Catalog`.

pub mod app;
pub mod catalog;
pub mod cli;
pub mod debug;
pub mod domain;
pub mod error;
pub mod indicator;
pub mod io;
pub mod logging;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
pub mod sampler;
