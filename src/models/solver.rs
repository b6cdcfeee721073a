//! pH evaluation for every titration topology.
//!
//! The solver relies on two primitive operations:
//! - build the ordered regime table for a topology
//! - evaluate the first matching row for the mole state at a given volume
//!
//! `solve` is the one function used by the sampler, the CLI's live reading and
//! landmark derivation, so a single reading always agrees with the sampled curve.

use crate::domain::{Analyte, ChemicalSpecies, TitrationRecord, Topology};
use crate::math::pka;

use super::regime::{Condition, Formula, MoleState, Regime, RegimeKind, RegimeTable};

/// Result of a single diagnostic evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    /// Volume actually evaluated (after clamping).
    pub volume_ml: f64,
    pub ph: f64,
    pub regime: RegimeKind,
}

/// pH after `volume_ml` of titrant has been added.
///
/// Negative or non-finite volumes are evaluated as 0 mL.
pub fn solve(record: &TitrationRecord, volume_ml: f64) -> f64 {
    evaluate(record, volume_ml).ph
}

/// Like [`solve`], but also reports which regime produced the value.
pub fn evaluate(record: &TitrationRecord, volume_ml: f64) -> Evaluation {
    evaluate_parts(record.analyte(), record.titrant(), record.topology(), volume_ml)
}

/// Evaluate from unvalidated parts. Used while deriving a record's landmarks,
/// before the record itself exists.
pub(crate) fn evaluate_parts(
    analyte: &Analyte,
    titrant: &ChemicalSpecies,
    topology: &Topology,
    volume_ml: f64,
) -> Evaluation {
    let volume_ml = if volume_ml.is_finite() && volume_ml > 0.0 {
        volume_ml
    } else {
        0.0
    };

    let state = MoleState {
        analyte_moles: analyte.moles(),
        titrant_moles: titrant.moles_in(volume_ml),
        total_volume_l: (analyte.volume_ml + volume_ml) / 1000.0,
        analyte_molarity: analyte.species.molarity,
    };

    let table = regime_table(topology);
    let regime = table.select(&state);
    let ph = regime.formula.ph(&state);
    debug_assert!(
        ph.is_finite(),
        "non-finite pH in regime '{}' at {volume_ml} mL",
        regime.kind
    );
    tracing::trace!(volume_ml, ph, regime = %regime.kind, "evaluated");

    Evaluation {
        volume_ml,
        ph,
        regime: regime.kind,
    }
}

/// Build the ordered regime table for a topology.
pub fn regime_table(topology: &Topology) -> RegimeTable {
    match *topology {
        Topology::StrongStrong => strong_strong_table(),
        Topology::WeakStrong { ka } => polyprotic_table(&[ka]),
        Topology::StrongWeak { kb, pka_conjugate } => weak_base_table(kb, pka_conjugate),
        Topology::Diprotic { ka1, ka2 } => polyprotic_table(&[ka1, ka2]),
        Topology::Triprotic { ka1, ka2, ka3 } => polyprotic_table(&[ka1, ka2, ka3]),
    }
}

fn strong_strong_table() -> RegimeTable {
    RegimeTable::new(
        vec![
            Regime::new(
                RegimeKind::Equivalence { step: 1 },
                Condition::At(1.0),
                Formula::Neutral,
            ),
            Regime::new(
                RegimeKind::AnalyteExcess,
                Condition::Before(1.0),
                Formula::AnalyteAcidExcess,
            ),
        ],
        RegimeKind::TitrantExcess,
        Formula::TitrantBaseExcess { equivalents: 1.0 },
    )
}

fn weak_base_table(kb: f64, pka_conjugate: f64) -> RegimeTable {
    RegimeTable::new(
        vec![
            Regime::new(
                RegimeKind::Initial,
                Condition::AtStart,
                Formula::WeakBaseInitial { kb },
            ),
            Regime::new(
                RegimeKind::Buffer { step: 1 },
                Condition::Before(1.0),
                Formula::BaseBuffer { pka: pka_conjugate },
            ),
            Regime::new(
                RegimeKind::Equivalence { step: 1 },
                Condition::At(1.0),
                Formula::ConjugateAcid { pka: pka_conjugate },
            ),
        ],
        RegimeKind::TitrantExcess,
        Formula::TitrantAcidExcess,
    )
}

/// Weak mono-, di- and triprotic acids share one layout. For each step `k`:
/// buffer, half-equivalence at `(k - ½)·a`, late buffer, equivalence at `k·a`.
/// Inner equivalences use the adjacent-pKa midpoint; the last one is the fully
/// deprotonated conjugate base.
fn polyprotic_table(kas: &[f64]) -> RegimeTable {
    let pkas: Vec<f64> = kas.iter().map(|&ka| pka(ka)).collect();
    let mut rows = Vec::with_capacity(1 + 4 * kas.len());

    if let Some(&ka1) = kas.first() {
        rows.push(Regime::new(
            RegimeKind::Initial,
            Condition::AtStart,
            Formula::WeakAcidInitial { ka: ka1 },
        ));
    }

    for (i, (&ka, &pka_step)) in kas.iter().zip(pkas.iter()).enumerate() {
        let step = (i + 1) as u8;
        let k = (i + 1) as f64;
        let buffer = Formula::AcidBuffer { pka: pka_step, step: k };

        rows.push(Regime::new(
            RegimeKind::Buffer { step },
            Condition::Before(k - 0.5),
            buffer,
        ));
        rows.push(Regime::new(
            RegimeKind::HalfEquivalence { step },
            Condition::At(k - 0.5),
            Formula::HalfEquivalence { pka: pka_step },
        ));
        rows.push(Regime::new(
            RegimeKind::LateBuffer { step },
            Condition::Before(k),
            buffer,
        ));

        let at_equivalence = match pkas.get(i + 1) {
            Some(&pka_next) => Formula::Amphiprotic {
                pka_lower: pka_step,
                pka_upper: pka_next,
            },
            None => Formula::ConjugateBase { ka, equivalents: k },
        };
        rows.push(Regime::new(
            RegimeKind::Equivalence { step },
            Condition::At(k),
            at_equivalence,
        ));
    }

    RegimeTable::new(
        rows,
        RegimeKind::TitrantExcess,
        Formula::TitrantBaseExcess {
            equivalents: kas.len() as f64,
        },
    )
}
