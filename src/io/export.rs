//! Export sampled curves to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.
//! Each row carries the regime that produced the pH so students can see where
//! the formula switches.

use std::path::Path;

use serde::Serialize;

use crate::domain::{CurvePoint, TitrationRecord};
use crate::error::AppError;
use crate::models::evaluate;

#[derive(Debug, Serialize)]
struct CurveRow {
    volume_ml: f64,
    ph: f64,
    regime: String,
}

/// Write `volume_ml,ph,regime` rows for a sampled record.
pub fn write_curve_csv(path: &Path, record: &TitrationRecord, points: &[CurvePoint]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;

    for p in points {
        let eval = evaluate(record, p.volume_ml);
        writer
            .serialize(CurveRow {
                volume_ml: p.volume_ml,
                ph: p.ph,
                regime: eval.regime.to_string(),
            })
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}
