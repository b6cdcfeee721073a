//! Read/write curve JSON files.
//!
//! Curve JSON is the "portable" representation of a sampled titration:
//! - record id, topology and the two solutions
//! - derived landmarks (initial pH, equivalence and half-equivalence points)
//! - the sampled grid for quick re-plotting
//!
//! The schema is defined by `domain::CurveFile`.

use std::fs::File;
use std::path::Path;

use crate::domain::{CurveFile, CurveGrid, CurvePoint, TitrationRecord};
use crate::error::AppError;

/// Build the curve document for a sampled record.
pub fn curve_file(record: &TitrationRecord, points: &[CurvePoint]) -> CurveFile {
    CurveFile {
        tool: "titr".to_string(),
        record_id: record.id().to_string(),
        topology: record.kind(),
        analyte: record.analyte().clone(),
        titrant: record.titrant().clone(),
        landmarks: record.landmarks().clone(),
        grid: CurveGrid::from_points(points),
    }
}

/// Write a curve JSON file.
pub fn write_curve_json(path: &Path, record: &TitrationRecord, points: &[CurvePoint]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create curve JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, &curve_file(record, points))
        .map_err(|e| AppError::new(2, format!("Failed to write curve JSON: {e}")))?;

    Ok(())
}

/// Read a curve JSON file.
pub fn read_curve_json(path: &Path) -> Result<CurveFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open curve JSON '{}': {e}", path.display())))?;
    let curve: CurveFile =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid curve JSON: {e}")))?;

    if curve.grid.volume_ml.len() != curve.grid.ph.len() {
        return Err(AppError::new(
            2,
            format!(
                "Invalid curve JSON: {} volumes but {} pH values",
                curve.grid.volume_ml.len(),
                curve.grid.ph.len()
            ),
        ));
    }
    Ok(curve)
}
