//! Command-line parsing for the titration curve explorer.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the chemistry code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::TopologyKind;

pub mod picker;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "titr", version, about = "Acid-base titration curves and indicator matching")]
pub struct Cli {
    /// Catalog JSON file (defaults to $TITR_CATALOG, then the built-in catalog).
    #[arg(long, global = true, value_name = "JSON")]
    pub catalog: Option<PathBuf>,

    /// Enable debug logging on stderr.
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List catalog records.
    List(ListArgs),
    /// Show a record's constants and landmarks.
    Show(RecordArgs),
    /// pH of a record at one titrant volume.
    Ph(PhArgs),
    /// Sample a record's curve, print a summary/plot, and optionally export.
    Curve(CurveArgs),
    /// Plot a previously exported curve JSON.
    Plot(PlotArgs),
    /// Check indicators against a pH or a record's equivalence points.
    Indicator(IndicatorArgs),
    /// Sample every record in the catalog.
    Sweep(SweepArgs),
    /// Write a Markdown debug bundle (landmarks + regime tables) for the loaded catalog.
    Debug(DebugArgs),
}

#[derive(Debug, Args, Clone)]
pub struct ListArgs {
    /// Only list records of this topology.
    #[arg(long, value_enum)]
    pub topology: Option<TopologyKind>,
}

#[derive(Debug, Args, Clone)]
pub struct RecordArgs {
    /// Record id (see `titr list`).
    #[arg(short = 'r', long = "record")]
    pub record: String,
}

#[derive(Debug, Args, Clone)]
pub struct PhArgs {
    /// Record id (see `titr list`).
    #[arg(short = 'r', long = "record")]
    pub record: String,

    /// Titrant volume added (mL).
    #[arg(short = 'v', long = "volume")]
    pub volume: f64,

    /// Also report this indicator's colour at the computed pH.
    #[arg(long)]
    pub indicator: Option<String>,
}

/// Options for sampling a single curve.
#[derive(Debug, Args, Clone)]
pub struct CurveArgs {
    /// Record id; prompts with a picker when omitted.
    #[arg(short = 'r', long = "record")]
    pub record: Option<String>,

    /// Upper titrant volume (mL); defaults to twice the last equivalence volume.
    #[arg(long = "max-volume")]
    pub max_volume: Option<f64>,

    /// Print the sampled points as a table.
    #[arg(long)]
    pub table: bool,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Export sampled points to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export curve (record + landmarks + sampled grid) to JSON.
    #[arg(long = "export-curve")]
    pub export_curve: Option<PathBuf>,
}

/// Options for plotting a saved curve.
#[derive(Debug, Args, Clone)]
pub struct PlotArgs {
    /// Curve JSON file produced by `titr curve --export-curve`.
    #[arg(long, value_name = "JSON")]
    pub curve: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}

#[derive(Debug, Args, Clone)]
pub struct IndicatorArgs {
    /// Indicator id; with `--ph`, checks that one indicator.
    #[arg(long, requires = "ph", conflicts_with = "record")]
    pub id: Option<String>,

    /// pH to check; without `--id`, lists every indicator bracketing it.
    #[arg(long)]
    pub ph: Option<f64>,

    /// Check every indicator against this record's equivalence points.
    #[arg(long, conflicts_with = "ph")]
    pub record: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct SweepArgs {
    /// Upper titrant volume (mL) for every record.
    #[arg(long = "max-volume")]
    pub max_volume: Option<f64>,

    /// Write one `<id>.csv` per record into this directory.
    #[arg(long = "export-dir", value_name = "DIR")]
    pub export_dir: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct DebugArgs {
    /// Directory the bundle is written to.
    #[arg(long, value_name = "DIR", default_value = "debug")]
    pub dir: PathBuf,
}
