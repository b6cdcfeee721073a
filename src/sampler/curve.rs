//! Curve sampling.
//!
//! Every point is an independent call into the solver; nothing is carried from
//! one point to the next. Sampling the same record twice yields identical
//! sequences, and a single live reading at any volume equals the sampled value.

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::domain::{CurvePoint, TitrationRecord};
use crate::models::solve;

use super::grid::{GRID_STEP_ML, merge_volumes, refined_volumes, uniform_volumes};

/// Sampled curve for one catalog record.
#[derive(Debug, Clone)]
pub struct RecordCurve<'a> {
    pub record: &'a TitrationRecord,
    pub points: Vec<CurvePoint>,
}

/// Twice the last equivalence volume.
pub fn default_max_volume(record: &TitrationRecord) -> f64 {
    2.0 * record.landmarks().largest_equivalence_volume()
}

/// Sample `record` from 0 mL to `max_volume_ml` (default: [`default_max_volume`]).
///
/// The grid is uniform at 0.5 mL, plus each equivalence volume and its fixed
/// refinement offsets. Output is sorted by volume.
pub fn sample(record: &TitrationRecord, max_volume_ml: Option<f64>) -> Vec<CurvePoint> {
    let max_ml = resolve_max_volume(record, max_volume_ml);

    let equivalence_ml: Vec<f64> = record
        .equivalence_points()
        .iter()
        .map(|l| l.volume_ml)
        .collect();

    let mut volumes = uniform_volumes(max_ml, GRID_STEP_ML);
    volumes.extend(refined_volumes(&equivalence_ml, max_ml));
    let volumes = merge_volumes(volumes);

    let points: Vec<CurvePoint> = volumes
        .into_iter()
        .map(|volume_ml| CurvePoint {
            volume_ml,
            ph: solve(record, volume_ml),
        })
        .collect();

    debug!(record = record.id(), max_ml, points = points.len(), "sampled curve");
    points
}

fn resolve_max_volume(record: &TitrationRecord, requested: Option<f64>) -> f64 {
    let default = default_max_volume(record);
    match requested {
        None => default,
        Some(v) if v.is_finite() && v > 0.0 => v,
        Some(v) => {
            warn!(
                record = record.id(),
                requested = v,
                default,
                "invalid max volume, using default"
            );
            default
        }
    }
}

/// Sample every record of the catalog in parallel, preserving catalog order.
pub fn sample_catalog(catalog: &Catalog, max_volume_ml: Option<f64>) -> Vec<RecordCurve<'_>> {
    catalog
        .records()
        .par_iter()
        .map(|record| RecordCurve {
            record,
            points: sample(record, max_volume_ml),
        })
        .collect()
}

/// Midpoint volume of the steepest consecutive segment, if any.
///
/// Segments shorter than 1e-9 mL are ignored.
pub fn steepest_step(points: &[CurvePoint]) -> Option<f64> {
    let mut best: Option<(f64, f64)> = None;
    for w in points.windows(2) {
        let dv = w[1].volume_ml - w[0].volume_ml;
        if dv <= 1e-9 {
            continue;
        }
        let slope = ((w[1].ph - w[0].ph) / dv).abs();
        if !slope.is_finite() {
            continue;
        }
        if best.is_none_or(|(s, _)| slope > s) {
            best = Some((slope, 0.5 * (w[0].volume_ml + w[1].volume_ml)));
        }
    }
    best.map(|(_, v)| v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn catalog() -> Catalog {
        Catalog::builtin().unwrap()
    }

    #[test]
    fn default_range_is_twice_last_equivalence() {
        let catalog = catalog();
        let record = catalog.record("h3po4-naoh").unwrap();
        let points = sample(record, None);
        assert_relative_eq!(points[0].volume_ml, 0.0);
        assert_relative_eq!(points[points.len() - 1].volume_ml, 60.0, epsilon = 1e-9);
    }

    #[test]
    fn refined_offsets_are_present() {
        let catalog = catalog();
        let record = catalog.record("ch3cooh-naoh").unwrap();
        let eq = record.equivalence_points()[0].volume_ml;
        let points = sample(record, None);
        for offset in [-0.1, -0.05, -0.01, 0.01, 0.05, 0.1] {
            let target = eq + offset;
            assert!(
                points.iter().any(|p| (p.volume_ml - target).abs() < 1e-9),
                "missing {target}"
            );
        }
    }

    #[test]
    fn sorted_ascending() {
        let catalog = catalog();
        let points = sample(catalog.record("h2co3-naoh").unwrap(), None);
        assert!(points.windows(2).all(|w| w[0].volume_ml < w[1].volume_ml));
    }

    #[test]
    fn invalid_max_volume_falls_back() {
        let catalog = catalog();
        let record = catalog.record("hcl-naoh").unwrap();
        assert_eq!(sample(record, Some(-5.0)), sample(record, None));
        assert_eq!(sample(record, Some(f64::NAN)), sample(record, None));
    }

    #[test]
    fn custom_max_volume_is_respected() {
        let catalog = catalog();
        let record = catalog.record("hcl-naoh").unwrap();
        let points = sample(record, Some(30.0));
        assert_relative_eq!(points[points.len() - 1].volume_ml, 30.0);
    }

    #[test]
    fn steepest_step_finds_equivalence() {
        let catalog = catalog();
        let record = catalog.record("hcl-naoh").unwrap();
        let points = sample(record, None);
        let v = steepest_step(&points).unwrap();
        assert!((v - 25.0).abs() < 0.1);
    }

    #[test]
    fn catalog_sampling_keeps_order() {
        let catalog = catalog();
        let curves = sample_catalog(&catalog, None);
        let ids: Vec<&str> = curves.iter().map(|c| c.record.id()).collect();
        let expected: Vec<&str> = catalog.records().iter().map(|r| r.id()).collect();
        assert_eq!(ids, expected);
        assert!(curves.iter().all(|c| !c.points.is_empty()));
    }
}
