//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads the titration catalog (file, `$TITR_CATALOG` or built-in)
//! - samples curves and evaluates single readings
//! - prints reports/plots
//! - writes optional exports

use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::debug;

use crate::catalog::Catalog;
use crate::cli::{Command, CurveArgs, DebugArgs, IndicatorArgs, ListArgs, PhArgs, PlotArgs, RecordArgs, SweepArgs};
use crate::domain::CurveConfig;
use crate::error::AppError;

pub mod pipeline;

/// Environment variable naming a catalog JSON used when `--catalog` is absent.
pub const CATALOG_ENV: &str = "TITR_CATALOG";

const SUBCOMMANDS: [&str; 9] = [
    "list", "show", "ph", "curve", "plot", "indicator", "sweep", "debug", "help",
];

/// Entry point for the `titr` binary.
pub fn run() -> Result<(), AppError> {
    // `.env` is optional; real environment variables win.
    dotenvy::dotenv().ok();

    // We want `titr` and `titr -r hcl-naoh` to behave like `titr curve ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    crate::logging::init_cli_logger(cli.verbose);
    let catalog = load_catalog(cli.catalog.as_deref())?;

    match cli.command {
        Command::List(args) => handle_list(&catalog, args),
        Command::Show(args) => handle_show(&catalog, args),
        Command::Ph(args) => handle_ph(&catalog, args),
        Command::Curve(args) => handle_curve(&catalog, args, cli.catalog),
        Command::Plot(args) => handle_plot(args),
        Command::Indicator(args) => handle_indicator(&catalog, args),
        Command::Sweep(args) => handle_sweep(&catalog, args),
        Command::Debug(args) => handle_debug(&catalog, args),
    }
}

/// Load the catalog from `path`, else `$TITR_CATALOG`, else the built-in one.
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog, AppError> {
    let from_env = std::env::var_os(CATALOG_ENV).map(PathBuf::from);
    match path.map(Path::to_path_buf).or(from_env) {
        Some(path) => {
            debug!(path = %path.display(), "loading catalog file");
            Ok(crate::io::load_catalog_json(&path)?)
        }
        None => Catalog::builtin()
            .map_err(|e| AppError::new(4, format!("Built-in catalog is invalid: {e}"))),
    }
}

fn handle_list(catalog: &Catalog, args: ListArgs) -> Result<(), AppError> {
    print!("{}", crate::report::format_catalog_listing(catalog, args.topology));
    Ok(())
}

fn handle_show(catalog: &Catalog, args: RecordArgs) -> Result<(), AppError> {
    let record = catalog.record(&args.record)?;
    print!("{}", crate::report::format_record_summary(record, catalog.indicators()));
    Ok(())
}

fn handle_ph(catalog: &Catalog, args: PhArgs) -> Result<(), AppError> {
    let record = catalog.record(&args.record)?;
    let volume_ml = validate_volume(args.volume)?;
    let indicator = args
        .indicator
        .as_deref()
        .map(|id| catalog.indicator(id))
        .transpose()?;

    let eval = crate::models::evaluate(record, volume_ml);
    if !eval.ph.is_finite() {
        return Err(AppError::new(
            4,
            format!("Non-finite pH for '{}' at {volume_ml} mL.", record.id()),
        ));
    }
    print!("{}", crate::report::format_evaluation(record, &eval, indicator));
    Ok(())
}

fn handle_curve(catalog: &Catalog, args: CurveArgs, catalog_path: Option<PathBuf>) -> Result<(), AppError> {
    let mut config = curve_config_from_args(&args, catalog_path);
    if let Some(v) = config.max_volume_ml {
        if !(v.is_finite() && v > 0.0) {
            return Err(AppError::new(2, format!("--max-volume must be a positive number (got {v}).")));
        }
    }
    if config.record_id.is_none() {
        config.record_id = Some(crate::cli::picker::prompt_for_record(catalog)?);
    }

    let run = pipeline::run_curve(&config, catalog)?;

    println!(
        "{}",
        crate::report::format_record_summary(run.record, catalog.indicators())
    );
    if config.table {
        println!("{}", crate::report::format_points_table(run.record, &run.points));
    }
    if config.plot {
        let plot = crate::plot::render_ascii_plot(
            &run.points,
            Some(run.record.landmarks()),
            config.plot_width,
            config.plot_height,
        );
        println!("{plot}");
    }

    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let curve = crate::io::read_curve_json(&args.curve)?;
    let plot = crate::plot::render_ascii_plot_from_curve_file(&curve, args.width, args.height);

    println!("{} ({})", curve.record_id, curve.topology.display_name());
    println!("{plot}");
    Ok(())
}

fn handle_indicator(catalog: &Catalog, args: IndicatorArgs) -> Result<(), AppError> {
    match (args.id, args.ph, args.record) {
        (Some(id), Some(ph), None) => {
            let ph = validate_ph(ph)?;
            let indicator = catalog.indicator(&id)?;
            let ok = catalog.is_appropriate(&id, ph)?;
            println!(
                "{} [{:.1}, {:.1}] at pH {ph:.2}: {} ({})",
                indicator.name,
                indicator.low,
                indicator.high,
                if ok { "appropriate" } else { "not appropriate" },
                indicator.color_for(ph)
            );
        }
        (None, Some(ph), None) => {
            let ph = validate_ph(ph)?;
            let matches = crate::indicator::appropriate_for(catalog.indicators(), ph);
            print!("{}", crate::report::format_indicator_matches(ph, &matches));
        }
        (None, None, Some(record_id)) => {
            let record = catalog.record(&record_id)?;
            print!(
                "{}",
                crate::report::format_indicator_report(record, catalog.indicators())
            );
        }
        _ => {
            return Err(AppError::new(
                2,
                "Use `titr indicator --id <id> --ph <pH>`, `--ph <pH>` or `--record <id>`.",
            ));
        }
    }
    Ok(())
}

fn handle_sweep(catalog: &Catalog, args: SweepArgs) -> Result<(), AppError> {
    if let Some(v) = args.max_volume {
        if !(v.is_finite() && v > 0.0) {
            return Err(AppError::new(2, format!("--max-volume must be a positive number (got {v}).")));
        }
    }
    let curves = pipeline::run_sweep(catalog, args.max_volume, args.export_dir.as_deref())?;
    print!("{}", crate::report::format_sweep(&curves));
    Ok(())
}

fn handle_debug(catalog: &Catalog, args: DebugArgs) -> Result<(), AppError> {
    let path = crate::debug::write_debug_bundle(catalog, &args.dir)?;
    println!("Wrote debug bundle: {}", path.display());
    Ok(())
}

pub fn curve_config_from_args(args: &CurveArgs, catalog_path: Option<PathBuf>) -> CurveConfig {
    CurveConfig {
        record_id: args.record.clone(),
        catalog_path,
        max_volume_ml: args.max_volume,
        table: args.table,
        plot: !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        export_csv: args.export.clone(),
        export_curve: args.export_curve.clone(),
    }
}

fn validate_volume(volume_ml: f64) -> Result<f64, AppError> {
    if volume_ml.is_finite() && volume_ml >= 0.0 {
        Ok(volume_ml)
    } else {
        Err(AppError::new(
            2,
            format!("Titrant volume must be a non-negative number of mL (got {volume_ml})."),
        ))
    }
}

fn validate_ph(ph: f64) -> Result<f64, AppError> {
    if ph.is_finite() {
        Ok(ph)
    } else {
        Err(AppError::new(2, format!("pH must be a finite number (got {ph}).")))
    }
}

/// Rewrite argv so `titr` defaults to `titr curve`.
///
/// Rules:
/// - `titr`                        -> `titr curve`
/// - `titr -r hcl-naoh ...`        -> `titr curve -r hcl-naoh ...`
/// - `titr --catalog x.json list`  -> unchanged (a subcommand is present)
/// - `titr --help/--version/-h`    -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("curve".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    if argv.iter().skip(1).any(|a| SUBCOMMANDS.contains(&a.as_str())) {
        return argv;
    }

    // If the first token is a flag, treat it as "curve flags".
    if arg1.starts_with('-') {
        argv.insert(1, "curve".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
