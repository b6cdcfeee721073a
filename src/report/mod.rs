//! Reporting utilities: record summaries, tables and indicator reports.

pub mod format;

pub use format::*;
