//! Debug bundle writer for auditing regime tables and landmarks.

use std::fmt::Write as _;
use std::fs::{File, create_dir_all};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::catalog::Catalog;
use crate::domain::TitrationRecord;
use crate::error::AppError;
use crate::models::{RegimeKind, evaluate, regime_table};
use crate::sampler::sample;

/// Write `titr_debug_<timestamp>.md` under `dir` and return its path.
pub fn write_debug_bundle(catalog: &Catalog, dir: &Path) -> Result<PathBuf, AppError> {
    create_dir_all(dir).map_err(|e| AppError::new(4, format!("Failed to create debug dir: {e}")))?;

    let now = Local::now();
    let path = dir.join(format!("titr_debug_{}.md", now.format("%Y%m%d_%H%M%S")));

    let mut file = File::create(&path)
        .map_err(|e| AppError::new(4, format!("Failed to create debug file: {e}")))?;
    file.write_all(render_debug_bundle(catalog, now).as_bytes())
        .map_err(|e| AppError::new(4, format!("Failed to write debug: {e}")))?;

    Ok(path)
}

/// Markdown dump of every indicator, then every record's landmarks, regime
/// table and regime transitions along its sampled curve.
pub fn render_debug_bundle(catalog: &Catalog, generated: DateTime<Local>) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(out, "# titr debug bundle");
    let _ = writeln!(out, "- generated: {}", generated.to_rfc3339());
    let _ = writeln!(out, "- records: {}", catalog.records().len());
    let _ = writeln!(out, "- indicators: {}", catalog.indicators().len());

    let _ = writeln!(out, "\n## Indicators");
    let _ = writeln!(out, "| id | name | low | high | acidic | basic |");
    let _ = writeln!(out, "| - | - | - | - | - | - |");
    for ind in catalog.indicators() {
        let _ = writeln!(
            out,
            "| {} | {} | {:.1} | {:.1} | {} | {} |",
            ind.id, ind.name, ind.low, ind.high, ind.acidic_color, ind.basic_color
        );
    }

    for record in catalog.records() {
        write_record_section(&mut out, record);
    }

    out
}

fn write_record_section(out: &mut String, record: &TitrationRecord) {
    let _ = writeln!(out, "\n## Record: {}", record.id());
    let _ = writeln!(out, "- titration: {}", record.label());
    let _ = writeln!(out, "- topology: {:?}", record.topology());
    let _ = writeln!(out, "- analyte moles: {:.6e}", record.analyte().moles());
    let _ = writeln!(out, "- initial pH: {:.4}", record.initial_ph());
    let _ = writeln!(out, "- recommended indicator: {}", record.recommended_indicator());

    let _ = writeln!(out, "\n### Landmarks");
    let _ = writeln!(out, "| landmark | volume_ml | pH |");
    let _ = writeln!(out, "| - | - | - |");
    for (i, l) in record.half_equivalence_points().iter().enumerate() {
        let _ = writeln!(out, "| half-equivalence {} | {:.4} | {:.4} |", i + 1, l.volume_ml, l.ph);
    }
    for (i, l) in record.equivalence_points().iter().enumerate() {
        let _ = writeln!(out, "| equivalence {} | {:.4} | {:.4} |", i + 1, l.volume_ml, l.ph);
    }

    let _ = writeln!(out, "\n### Regime table");
    let _ = writeln!(out, "| # | regime | condition | formula |");
    let _ = writeln!(out, "| - | - | - | - |");
    for (i, row) in regime_table(record.topology()).rows().enumerate() {
        let _ = writeln!(
            out,
            "| {} | {} | {:?} | {:?} |",
            i + 1,
            row.kind,
            row.condition,
            row.formula
        );
    }

    let _ = writeln!(out, "\n### Regime trace");
    let _ = writeln!(out, "| from_ml | regime | pH |");
    let _ = writeln!(out, "| - | - | - |");
    let mut last: Option<RegimeKind> = None;
    for p in sample(record, None) {
        let eval = evaluate(record, p.volume_ml);
        if last != Some(eval.regime) {
            let _ = writeln!(out, "| {:.3} | {} | {:.4} |", p.volume_ml, eval.regime, eval.ph);
            last = Some(eval.regime);
        }
    }
}
