//! Ordered regime tables.
//!
//! A titration curve is piecewise: which formula applies depends on how many
//! moles of titrant have been added relative to the analyte. Each topology is
//! described as an ordered list of `(condition, formula)` rows evaluated top to
//! bottom, followed by an unconditional catch-all row, so:
//!
//! - the table is total (every mole state matches some row)
//! - the ordering can be inspected and tested on its own
//! - every log argument is known to be positive when its row is reached, because
//!   the ε-bounded equality rows are checked before the rows that divide or take
//!   logs of the same difference

use std::fmt;

use crate::domain::{MOLE_EPSILON, PKW};
use crate::math::{
    amphiprotic_ph, conjugate_acid_ph, conjugate_base_ph, henderson_hasselbalch, ph_from_hydronium,
    ph_from_hydroxide, weak_acid_ph, weak_base_ph,
};

/// Amounts in the flask after some titrant has been added.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoleState {
    /// Initial analyte moles (`a`).
    pub analyte_moles: f64,
    /// Titrant moles added so far (`b`).
    pub titrant_moles: f64,
    /// Analyte + titrant volume in litres.
    pub total_volume_l: f64,
    /// Initial analyte concentration (mol/L).
    pub analyte_molarity: f64,
}

/// When a row applies, in terms of `b` against multiples of `a`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Condition {
    /// No titrant yet: `b ≤ ε`.
    AtStart,
    /// Strictly before `m·a`: `b < m·a - ε`.
    Before(f64),
    /// At `m·a` within tolerance: `|b - m·a| ≤ ε`.
    At(f64),
    /// Catch-all.
    Otherwise,
}

impl Condition {
    pub fn holds(self, state: &MoleState) -> bool {
        let a = state.analyte_moles;
        let b = state.titrant_moles;
        match self {
            Condition::AtStart => b <= MOLE_EPSILON,
            Condition::Before(m) => b < m * a - MOLE_EPSILON,
            Condition::At(m) => (b - m * a).abs() <= MOLE_EPSILON,
            Condition::Otherwise => true,
        }
    }
}

/// How the pH is computed inside a regime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Formula {
    /// Neutral salt solution.
    Neutral,
    /// Unreacted strong acid analyte: `p((a - b)/V)`.
    AnalyteAcidExcess,
    /// Strong base beyond the last equivalence: `14 + log10((b - n·a)/V)`.
    TitrantBaseExcess { equivalents: f64 },
    /// Strong acid beyond the weak-base equivalence: `p((b - a)/V)`.
    TitrantAcidExcess,
    /// Weak acid before any base: `√(Ka·Ca)` approximation.
    WeakAcidInitial { ka: f64 },
    /// Weak base before any acid: `√(Kb·Cb)` approximation.
    WeakBaseInitial { kb: f64 },
    /// Acid buffer of protic step `step` (1-based):
    /// conjugate base `b - (step-1)·a`, acid `step·a - b`.
    AcidBuffer { pka: f64, step: f64 },
    /// Weak-base buffer: base `a - b`, conjugate acid `b`.
    BaseBuffer { pka: f64 },
    /// Half-equivalence: `pH = pKa` exactly.
    HalfEquivalence { pka: f64 },
    /// Inner polyprotic equivalence: mean of adjacent pKas.
    Amphiprotic { pka_lower: f64, pka_upper: f64 },
    /// Fully deprotonated base at the last equivalence, `Cb = (b/n)/V`.
    ConjugateBase { ka: f64, equivalents: f64 },
    /// Conjugate acid of a weak base at equivalence, `Ca = b/V`.
    ConjugateAcid { pka: f64 },
}

impl Formula {
    pub fn ph(self, state: &MoleState) -> f64 {
        let a = state.analyte_moles;
        let b = state.titrant_moles;
        let v = state.total_volume_l;
        match self {
            Formula::Neutral => PKW / 2.0,
            Formula::AnalyteAcidExcess => ph_from_hydronium((a - b) / v),
            Formula::TitrantBaseExcess { equivalents } => {
                ph_from_hydroxide((b - equivalents * a) / v)
            }
            Formula::TitrantAcidExcess => ph_from_hydronium((b - a) / v),
            Formula::WeakAcidInitial { ka } => weak_acid_ph(ka, state.analyte_molarity),
            Formula::WeakBaseInitial { kb } => weak_base_ph(kb, state.analyte_molarity),
            Formula::AcidBuffer { pka, step } => {
                henderson_hasselbalch(pka, b - (step - 1.0) * a, step * a - b)
            }
            Formula::BaseBuffer { pka } => henderson_hasselbalch(pka, a - b, b),
            Formula::HalfEquivalence { pka } => pka,
            Formula::Amphiprotic {
                pka_lower,
                pka_upper,
            } => amphiprotic_ph(pka_lower, pka_upper),
            Formula::ConjugateBase { ka, equivalents } => {
                conjugate_base_ph(ka, b / equivalents / v)
            }
            Formula::ConjugateAcid { pka } => conjugate_acid_ph(pka, b / v),
        }
    }
}

/// Name of a regime, for diagnostics and exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegimeKind {
    Initial,
    AnalyteExcess,
    Buffer { step: u8 },
    HalfEquivalence { step: u8 },
    /// Buffer between a half-equivalence and the following equivalence.
    LateBuffer { step: u8 },
    Equivalence { step: u8 },
    TitrantExcess,
}

impl fmt::Display for RegimeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegimeKind::Initial => write!(f, "initial"),
            RegimeKind::AnalyteExcess => write!(f, "analyte excess"),
            RegimeKind::Buffer { step } => write!(f, "buffer {step}"),
            RegimeKind::HalfEquivalence { step } => write!(f, "half-equivalence {step}"),
            RegimeKind::LateBuffer { step } => write!(f, "late buffer {step}"),
            RegimeKind::Equivalence { step } => write!(f, "equivalence {step}"),
            RegimeKind::TitrantExcess => write!(f, "titrant excess"),
        }
    }
}

/// One row of a regime table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Regime {
    pub kind: RegimeKind,
    pub condition: Condition,
    pub formula: Formula,
}

impl Regime {
    pub fn new(kind: RegimeKind, condition: Condition, formula: Formula) -> Self {
        Self {
            kind,
            condition,
            formula,
        }
    }
}

/// Ordered rows plus a catch-all evaluated when no row matches.
#[derive(Debug, Clone, PartialEq)]
pub struct RegimeTable {
    rows: Vec<Regime>,
    otherwise: Regime,
}

impl RegimeTable {
    pub fn new(rows: Vec<Regime>, otherwise_kind: RegimeKind, otherwise: Formula) -> Self {
        Self {
            rows,
            otherwise: Regime::new(otherwise_kind, Condition::Otherwise, otherwise),
        }
    }

    /// All rows in evaluation order, catch-all last.
    pub fn rows(&self) -> impl Iterator<Item = &Regime> {
        self.rows.iter().chain(std::iter::once(&self.otherwise))
    }

    /// First row whose condition holds.
    pub fn select(&self, state: &MoleState) -> &Regime {
        self.rows
            .iter()
            .find(|r| r.condition.holds(state))
            .unwrap_or(&self.otherwise)
    }
}
