//! Shared "curve pipeline" logic used by the `curve` and `sweep` commands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! record lookup -> sampling -> sanity checks -> exports
//!
//! The command handlers can then focus on presentation.

use std::fs::create_dir_all;
use std::path::Path;

use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::domain::{CurveConfig, CurvePoint, TitrationRecord};
use crate::error::AppError;
use crate::sampler::{RecordCurve, sample, sample_catalog};

/// All computed outputs of a single `titr curve` run.
#[derive(Debug, Clone)]
pub struct CurveOutput<'a> {
    pub record: &'a TitrationRecord,
    pub points: Vec<CurvePoint>,
}

/// Sample the configured record and write any requested exports.
pub fn run_curve<'a>(config: &CurveConfig, catalog: &'a Catalog) -> Result<CurveOutput<'a>, AppError> {
    let id = config
        .record_id
        .as_deref()
        .ok_or_else(|| AppError::new(2, "No record selected. Use `titr curve -r <id>`."))?;
    let record = catalog.record(id)?;
    debug!(
        record = id,
        catalog = ?config.catalog_path,
        max_volume_ml = ?config.max_volume_ml,
        "running curve"
    );

    let points = sample(record, config.max_volume_ml);
    ensure_finite(record, &points)?;

    if let Some(path) = &config.export_csv {
        crate::io::write_curve_csv(path, record, &points)?;
        info!(path = %path.display(), "wrote curve CSV");
    }
    if let Some(path) = &config.export_curve {
        crate::io::write_curve_json(path, record, &points)?;
        info!(path = %path.display(), "wrote curve JSON");
    }

    Ok(CurveOutput { record, points })
}

/// Sample every record; optionally write `<id>.csv` per record into `export_dir`.
pub fn run_sweep<'a>(
    catalog: &'a Catalog,
    max_volume_ml: Option<f64>,
    export_dir: Option<&Path>,
) -> Result<Vec<RecordCurve<'a>>, AppError> {
    let curves = sample_catalog(catalog, max_volume_ml);
    for c in &curves {
        ensure_finite(c.record, &c.points)?;
    }

    if let Some(dir) = export_dir {
        create_dir_all(dir)
            .map_err(|e| AppError::new(2, format!("Failed to create export dir '{}': {e}", dir.display())))?;
        for c in &curves {
            crate::io::write_curve_csv(&dir.join(format!("{}.csv", c.record.id())), c.record, &c.points)?;
        }
        info!(dir = %dir.display(), records = curves.len(), "wrote sweep CSVs");
    }

    Ok(curves)
}

fn ensure_finite(record: &TitrationRecord, points: &[CurvePoint]) -> Result<(), AppError> {
    match points.iter().find(|p| !p.ph.is_finite()) {
        Some(p) => Err(AppError::new(
            4,
            format!("Non-finite pH for '{}' at {} mL.", record.id(), p.volume_ml),
        )),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(record_id: Option<&str>) -> CurveConfig {
        CurveConfig {
            record_id: record_id.map(str::to_string),
            catalog_path: None,
            max_volume_ml: None,
            table: false,
            plot: false,
            plot_width: 80,
            plot_height: 20,
            export_csv: None,
            export_curve: None,
        }
    }

    #[test]
    fn curve_run_writes_requested_exports() {
        let catalog = Catalog::builtin().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config(Some("hcooh-naoh"));
        cfg.export_csv = Some(dir.path().join("c.csv"));
        cfg.export_curve = Some(dir.path().join("c.json"));

        let out = run_curve(&cfg, &catalog).unwrap();
        assert_eq!(out.record.id(), "hcooh-naoh");
        assert!(dir.path().join("c.csv").exists());
        assert!(dir.path().join("c.json").exists());
    }

    #[test]
    fn unknown_or_missing_record_is_bad_input() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(run_curve(&config(None), &catalog).unwrap_err().exit_code(), 2);
        assert_eq!(run_curve(&config(Some("nope")), &catalog).unwrap_err().exit_code(), 2);
    }

    #[test]
    fn sweep_exports_one_file_per_record() {
        let catalog = Catalog::builtin().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("sweep");
        let curves = run_sweep(&catalog, None, Some(&out_dir)).unwrap();
        assert_eq!(curves.len(), catalog.records().len());
        for record in catalog.records() {
            assert!(out_dir.join(format!("{}.csv", record.id())).exists());
        }
    }
}
