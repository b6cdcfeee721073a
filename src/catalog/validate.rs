//! Load-time validation of catalog entries.
//!
//! This module is responsible for turning raw `RecordEntry`/`Indicator` values
//! into the validated `TitrationRecord`s handed to the engine.
//!
//! Design goals:
//! - **Reject** anything that would make the chemistry wrong or a log argument
//!   non-positive (non-positive amounts, unordered Ka, wrong equivalence count)
//! - **Warn** about questionable but computable data (indicator that brackets no
//!   equivalence pH, strong-weak constants that disagree)
//! - derive landmarks once, with the same solver used at play time

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::domain::{
    Analyte, ChemicalSpecies, Indicator, Landmark, Landmarks, MOLE_EPSILON, PKW, RecordEntry,
    TitrationRecord, Topology,
};
use crate::error::CatalogError;
use crate::math::pka;
use crate::models::solver::evaluate_parts;

/// Relative tolerance for declared equivalence volumes.
const EQUIVALENCE_REL_TOL: f64 = 1e-6;

/// Smallest analyte amount accepted, relative to the mole tolerance.
const MIN_ANALYTE_MOLES: f64 = 1000.0 * MOLE_EPSILON;

/// Allowed gap between `pKa + pKb` and 14 before a strong-weak record is flagged.
const PK_SUM_TOLERANCE: f64 = 0.1;

/// Validate the indicator list on its own.
pub fn validate_indicators(indicators: &[Indicator]) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for ind in indicators {
        if ind.id.trim().is_empty() {
            return Err(CatalogError::EmptyId { kind: "indicator" });
        }
        if !seen.insert(ind.id.as_str()) {
            return Err(CatalogError::DuplicateId {
                kind: "indicator",
                id: ind.id.clone(),
            });
        }
        if !(ind.low.is_finite() && ind.high.is_finite() && ind.low < ind.high) {
            return Err(CatalogError::InvalidInterval {
                id: ind.id.clone(),
                low: ind.low,
                high: ind.high,
            });
        }
    }
    Ok(())
}

/// Validate one record entry against an already-validated indicator list.
pub fn validate_entry(
    entry: RecordEntry,
    indicators: &[Indicator],
) -> Result<TitrationRecord, CatalogError> {
    let RecordEntry {
        id,
        analyte,
        titrant,
        topology,
        recommended_indicator,
        equivalence_volumes_ml,
    } = entry;

    if id.trim().is_empty() {
        return Err(CatalogError::EmptyId { kind: "record" });
    }

    check_amounts(&id, &analyte, &titrant)?;
    check_constants(&id, &topology)?;

    let landmarks = derive_landmarks(&analyte, &titrant, &topology);

    if let Some(declared) = equivalence_volumes_ml {
        check_declared_equivalences(&id, &topology, &declared, &landmarks)?;
    }

    let indicator = indicators
        .iter()
        .find(|i| i.id == recommended_indicator)
        .ok_or_else(|| CatalogError::UnknownIndicator(recommended_indicator.clone()))?;
    if !landmarks.equivalence.iter().any(|l| indicator.brackets(l.ph)) {
        warn!(
            record = %id,
            indicator = %indicator.id,
            "recommended indicator does not bracket any equivalence pH"
        );
    }

    debug!(
        record = %id,
        topology = topology.kind().tag(),
        equivalence_points = landmarks.equivalence.len(),
        "validated record"
    );

    Ok(TitrationRecord::from_validated(
        id,
        analyte,
        titrant,
        topology,
        recommended_indicator,
        landmarks,
    ))
}

fn positive(id: &str, field: &'static str, value: f64) -> Result<(), CatalogError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CatalogError::NonPositive {
            id: id.to_string(),
            field,
            value,
        })
    }
}

fn check_amounts(id: &str, analyte: &Analyte, titrant: &ChemicalSpecies) -> Result<(), CatalogError> {
    positive(id, "analyte molarity", analyte.species.molarity)?;
    positive(id, "analyte volume", analyte.volume_ml)?;
    positive(id, "titrant molarity", titrant.molarity)?;

    let moles = analyte.moles();
    if moles < MIN_ANALYTE_MOLES {
        return Err(CatalogError::NegligibleAnalyte {
            id: id.to_string(),
            moles,
        });
    }
    Ok(())
}

fn check_constants(id: &str, topology: &Topology) -> Result<(), CatalogError> {
    match *topology {
        Topology::StrongStrong => {}
        Topology::WeakStrong { ka } => positive(id, "ka", ka)?,
        Topology::StrongWeak { kb, pka_conjugate } => {
            positive(id, "kb", kb)?;
            if !pka_conjugate.is_finite() {
                return Err(CatalogError::NonFinite {
                    id: id.to_string(),
                    field: "pka_conjugate",
                    value: pka_conjugate,
                });
            }
            let gap = (pka_conjugate + pka(kb) - PKW).abs();
            if gap > PK_SUM_TOLERANCE {
                warn!(record = %id, gap, "conjugate pKa and pKb do not sum to 14");
            }
        }
        Topology::Diprotic { ka1, ka2 } => {
            positive(id, "ka1", ka1)?;
            positive(id, "ka2", ka2)?;
            check_decreasing(id, &[ka1, ka2])?;
        }
        Topology::Triprotic { ka1, ka2, ka3 } => {
            positive(id, "ka1", ka1)?;
            positive(id, "ka2", ka2)?;
            positive(id, "ka3", ka3)?;
            check_decreasing(id, &[ka1, ka2, ka3])?;
        }
    }
    Ok(())
}

fn check_decreasing(id: &str, kas: &[f64]) -> Result<(), CatalogError> {
    if kas.windows(2).all(|w| w[0] > w[1]) {
        Ok(())
    } else {
        Err(CatalogError::UnorderedConstants {
            id: id.to_string(),
            kas: kas.to_vec(),
        })
    }
}

/// Equivalence and half-equivalence points, evaluated with the solver.
pub(crate) fn derive_landmarks(
    analyte: &Analyte,
    titrant: &ChemicalSpecies,
    topology: &Topology,
) -> Landmarks {
    let first_equivalence_ml = analyte.volume_ml * analyte.species.molarity / titrant.molarity;
    let at = |volume_ml: f64| Landmark {
        volume_ml,
        ph: evaluate_parts(analyte, titrant, topology, volume_ml).ph,
    };

    let steps = 1..=topology.protic_order();
    Landmarks {
        initial_ph: evaluate_parts(analyte, titrant, topology, 0.0).ph,
        equivalence: steps
            .clone()
            .map(|k| at(first_equivalence_ml * k as f64))
            .collect(),
        half_equivalence: steps
            .map(|k| at(first_equivalence_ml * (k as f64 - 0.5)))
            .collect(),
    }
}

fn check_declared_equivalences(
    id: &str,
    topology: &Topology,
    declared: &[f64],
    landmarks: &Landmarks,
) -> Result<(), CatalogError> {
    let expected = topology.protic_order();
    if declared.len() != expected {
        return Err(CatalogError::EquivalenceCount {
            id: id.to_string(),
            topology: topology.kind().tag(),
            expected,
            found: declared.len(),
        });
    }

    for (index, (&declared, computed)) in declared.iter().zip(&landmarks.equivalence).enumerate() {
        let computed = computed.volume_ml;
        if !declared.is_finite() || (declared - computed).abs() > EQUIVALENCE_REL_TOL * computed {
            return Err(CatalogError::EquivalenceMismatch {
                id: id.to_string(),
                index: index + 1,
                declared,
                computed,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn indicators() -> Vec<Indicator> {
        crate::catalog::builtin::builtin_indicators()
    }

    fn acetic_entry() -> RecordEntry {
        RecordEntry {
            id: "acetic".to_string(),
            analyte: Analyte::new(ChemicalSpecies::new("CH3COOH", "acetic acid", 0.1), 25.0),
            titrant: ChemicalSpecies::new("NaOH", "sodium hydroxide", 0.1),
            topology: Topology::WeakStrong { ka: 1.8e-5 },
            recommended_indicator: "phenolphthalein".to_string(),
            equivalence_volumes_ml: None,
        }
    }

    #[test]
    fn derives_landmarks_for_weak_acid() {
        let record = validate_entry(acetic_entry(), &indicators()).unwrap();
        let eq = record.equivalence_points();
        assert_eq!(eq.len(), 1);
        assert_relative_eq!(eq[0].volume_ml, 25.0, epsilon = 1e-9);
        assert_relative_eq!(eq[0].ph, 8.72, epsilon = 0.01);
        assert_relative_eq!(record.half_equivalence_points()[0].ph, pka(1.8e-5), epsilon = 1e-6);
        assert_relative_eq!(record.initial_ph(), 2.87, epsilon = 0.01);
    }

    #[test]
    fn rejects_non_positive_molarity() {
        let mut entry = acetic_entry();
        entry.titrant.molarity = 0.0;
        let err = validate_entry(entry, &indicators()).unwrap_err();
        assert!(matches!(err, CatalogError::NonPositive { field: "titrant molarity", .. }));
    }

    #[test]
    fn rejects_nan_volume() {
        let mut entry = acetic_entry();
        entry.analyte.volume_ml = f64::NAN;
        assert!(validate_entry(entry, &indicators()).is_err());
    }

    #[test]
    fn rejects_wrong_equivalence_count() {
        let mut entry = acetic_entry();
        entry.topology = Topology::Diprotic { ka1: 4.3e-7, ka2: 4.8e-11 };
        entry.equivalence_volumes_ml = Some(vec![25.0]);
        let err = validate_entry(entry, &indicators()).unwrap_err();
        assert!(matches!(err, CatalogError::EquivalenceCount { expected: 2, found: 1, .. }));
    }

    #[test]
    fn rejects_mismatched_equivalence_volume() {
        let mut entry = acetic_entry();
        entry.equivalence_volumes_ml = Some(vec![20.0]);
        let err = validate_entry(entry, &indicators()).unwrap_err();
        assert!(matches!(err, CatalogError::EquivalenceMismatch { index: 1, .. }));
    }

    #[test]
    fn accepts_matching_declared_volumes() {
        let mut entry = acetic_entry();
        entry.equivalence_volumes_ml = Some(vec![25.0]);
        assert!(validate_entry(entry, &indicators()).is_ok());
    }

    #[test]
    fn rejects_unordered_polyprotic_constants() {
        let mut entry = acetic_entry();
        entry.topology = Topology::Diprotic { ka1: 4.8e-11, ka2: 4.3e-7 };
        let err = validate_entry(entry, &indicators()).unwrap_err();
        assert!(matches!(err, CatalogError::UnorderedConstants { .. }));
    }

    #[test]
    fn rejects_unknown_indicator() {
        let mut entry = acetic_entry();
        entry.recommended_indicator = "litmus".to_string();
        let err = validate_entry(entry, &indicators()).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownIndicator(ref id) if id == "litmus"));
    }

    #[test]
    fn rejects_inverted_indicator_interval() {
        let mut list = indicators();
        list[0].low = 9.0;
        list[0].high = 3.0;
        assert!(matches!(
            validate_indicators(&list),
            Err(CatalogError::InvalidInterval { .. })
        ));
    }

    #[test]
    fn triprotic_landmarks_are_ordered() {
        let mut entry = acetic_entry();
        entry.analyte = Analyte::new(ChemicalSpecies::new("H3PO4", "phosphoric acid", 0.1), 10.0);
        entry.topology = Topology::Triprotic { ka1: 7.5e-3, ka2: 6.2e-8, ka3: 4.8e-13 };
        let record = validate_entry(entry, &indicators()).unwrap();
        let volumes: Vec<f64> = record.equivalence_points().iter().map(|l| l.volume_ml).collect();
        assert_eq!(volumes.len(), 3);
        assert_relative_eq!(volumes[0], 10.0, epsilon = 1e-9);
        assert_relative_eq!(volumes[1], 20.0, epsilon = 1e-9);
        assert_relative_eq!(volumes[2], 30.0, epsilon = 1e-9);
        let phs: Vec<f64> = record.equivalence_points().iter().map(|l| l.ph).collect();
        assert!(phs[0] < phs[1] && phs[1] < phs[2]);
    }
}
