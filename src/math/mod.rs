//! Mathematical utilities: closed-form acid-base equilibrium expressions.

pub mod acid_base;

pub use acid_base::*;
