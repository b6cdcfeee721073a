//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - declared in a JSON catalog (or the built-in one)
//! - passed by reference into the solver and sampler
//! - exported to JSON/CSV and reloaded later for plotting

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Ion product of water at 25 °C.
pub const KW: f64 = 1e-14;

/// `pH + pOH` at 25 °C.
pub const PKW: f64 = 14.0;

/// Absolute mole tolerance used for every regime boundary comparison.
///
/// Boundaries are always decided on mole differences, never on pH values.
pub const MOLE_EPSILON: f64 = 1e-10;

/// A solution taking part in a titration: formula, display name, molarity (mol/L).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChemicalSpecies {
    pub formula: String,
    pub name: String,
    pub molarity: f64,
}

impl ChemicalSpecies {
    pub fn new(formula: impl Into<String>, name: impl Into<String>, molarity: f64) -> Self {
        Self {
            formula: formula.into(),
            name: name.into(),
            molarity,
        }
    }

    /// Moles contained in `volume_ml` of this solution.
    pub fn moles_in(&self, volume_ml: f64) -> f64 {
        volume_ml * self.molarity / 1000.0
    }
}

/// The solution in the flask. Only the analyte carries a fixed volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analyte {
    #[serde(flatten)]
    pub species: ChemicalSpecies,
    pub volume_ml: f64,
}

impl Analyte {
    pub fn new(species: ChemicalSpecies, volume_ml: f64) -> Self {
        Self { species, volume_ml }
    }

    /// Initial moles of analyte in the flask.
    pub fn moles(&self) -> f64 {
        self.species.moles_in(self.volume_ml)
    }
}

/// Tag-only view of [`Topology`], used for filtering and file metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum TopologyKind {
    StrongStrong,
    WeakStrong,
    StrongWeak,
    Diprotic,
    Triprotic,
}

impl TopologyKind {
    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            TopologyKind::StrongStrong => "strong acid + strong base",
            TopologyKind::WeakStrong => "weak acid + strong base",
            TopologyKind::StrongWeak => "weak base + strong acid",
            TopologyKind::Diprotic => "diprotic acid + strong base",
            TopologyKind::Triprotic => "triprotic acid + strong base",
        }
    }

    /// Catalog tag, as written in JSON.
    pub fn tag(self) -> &'static str {
        match self {
            TopologyKind::StrongStrong => "strong-strong",
            TopologyKind::WeakStrong => "weak-strong",
            TopologyKind::StrongWeak => "strong-weak",
            TopologyKind::Diprotic => "diprotic",
            TopologyKind::Triprotic => "triprotic",
        }
    }

    /// Number of equivalence points the titration passes through.
    pub fn protic_order(self) -> usize {
        match self {
            TopologyKind::StrongStrong | TopologyKind::WeakStrong | TopologyKind::StrongWeak => 1,
            TopologyKind::Diprotic => 2,
            TopologyKind::Triprotic => 3,
        }
    }
}

/// Titration topology together with the dissociation constants it requires.
///
/// Every constant a topology needs is a mandatory field of its variant, so a
/// record can never reach the solver with a constant missing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Topology {
    /// Strong acid analyte titrated with a strong base.
    StrongStrong,
    /// Weak monoprotic acid titrated with a strong base.
    WeakStrong { ka: f64 },
    /// Weak base titrated with a strong acid.
    ///
    /// `pka_conjugate` is the pKa of the conjugate acid (e.g. NH4+) and is used
    /// as given; it is not re-derived from `kb`.
    StrongWeak { kb: f64, pka_conjugate: f64 },
    /// Diprotic acid titrated with a strong base.
    Diprotic { ka1: f64, ka2: f64 },
    /// Triprotic acid titrated with a strong base.
    Triprotic { ka1: f64, ka2: f64, ka3: f64 },
}

impl Topology {
    pub fn kind(&self) -> TopologyKind {
        match self {
            Topology::StrongStrong => TopologyKind::StrongStrong,
            Topology::WeakStrong { .. } => TopologyKind::WeakStrong,
            Topology::StrongWeak { .. } => TopologyKind::StrongWeak,
            Topology::Diprotic { .. } => TopologyKind::Diprotic,
            Topology::Triprotic { .. } => TopologyKind::Triprotic,
        }
    }

    pub fn protic_order(&self) -> usize {
        self.kind().protic_order()
    }

    /// Stepwise acid dissociation constants, strongest first.
    ///
    /// Empty for strong-strong; for strong-weak this is the conjugate acid's Ka.
    pub fn acid_constants(&self) -> Vec<f64> {
        match *self {
            Topology::StrongStrong => Vec::new(),
            Topology::WeakStrong { ka } => vec![ka],
            Topology::StrongWeak { pka_conjugate, .. } => vec![10f64.powf(-pka_conjugate)],
            Topology::Diprotic { ka1, ka2 } => vec![ka1, ka2],
            Topology::Triprotic { ka1, ka2, ka3 } => vec![ka1, ka2, ka3],
        }
    }

    /// pKa values matching [`Topology::acid_constants`].
    ///
    /// The strong-weak pKa is returned exactly as supplied.
    pub fn pkas(&self) -> Vec<f64> {
        match *self {
            Topology::StrongWeak { pka_conjugate, .. } => vec![pka_conjugate],
            _ => self
                .acid_constants()
                .into_iter()
                .map(crate::math::pka)
                .collect(),
        }
    }
}

/// A titration scenario as written in a catalog, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordEntry {
    pub id: String,
    pub analyte: Analyte,
    pub titrant: ChemicalSpecies,
    pub topology: Topology,
    pub recommended_indicator: String,
    /// Equivalence volumes the catalog author expects (mL), checked at load time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equivalence_volumes_ml: Option<Vec<f64>>,
}

/// One sampled point of a titration curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub volume_ml: f64,
    pub ph: f64,
}

/// A notable `(volume, pH)` location on a curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub volume_ml: f64,
    pub ph: f64,
}

/// Derived curve landmarks, one equivalence and one half-equivalence entry per
/// protic step, ordered by volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Landmarks {
    pub initial_ph: f64,
    pub equivalence: Vec<Landmark>,
    pub half_equivalence: Vec<Landmark>,
}

impl Landmarks {
    /// Volume of the last equivalence point (0 when there is none).
    pub fn largest_equivalence_volume(&self) -> f64 {
        self.equivalence
            .iter()
            .map(|l| l.volume_ml)
            .fold(0.0, f64::max)
    }

    pub fn final_equivalence(&self) -> Option<&Landmark> {
        self.equivalence.last()
    }
}

/// An acid-base indicator and its colour change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indicator {
    pub id: String,
    pub name: String,
    /// Lower bound of the transition interval (pH).
    pub low: f64,
    /// Upper bound of the transition interval (pH).
    pub high: f64,
    pub acidic_color: String,
    pub basic_color: String,
}

/// Where a pH falls relative to an indicator's transition interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorState {
    Acidic,
    Transition,
    Basic,
}

/// Options for a single `titr curve` run.
///
/// This is derived from CLI flags (plus environment and defaults).
#[derive(Debug, Clone)]
pub struct CurveConfig {
    pub record_id: Option<String>,
    pub catalog_path: Option<PathBuf>,
    /// Upper volume bound; `None` means twice the last equivalence volume.
    pub max_volume_ml: Option<f64>,
    pub table: bool,
    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
    pub export_csv: Option<PathBuf>,
    pub export_curve: Option<PathBuf>,
}

/// A saved curve file (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveFile {
    pub tool: String,
    pub record_id: String,
    pub topology: TopologyKind,
    pub analyte: Analyte,
    pub titrant: ChemicalSpecies,
    pub landmarks: Landmarks,
    pub grid: CurveGrid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveGrid {
    pub volume_ml: Vec<f64>,
    pub ph: Vec<f64>,
}

impl CurveGrid {
    pub fn from_points(points: &[CurvePoint]) -> Self {
        Self {
            volume_ml: points.iter().map(|p| p.volume_ml).collect(),
            ph: points.iter().map(|p| p.ph).collect(),
        }
    }

    pub fn points(&self) -> Vec<CurvePoint> {
        self.volume_ml
            .iter()
            .zip(self.ph.iter())
            .map(|(&volume_ml, &ph)| CurvePoint { volume_ml, ph })
            .collect()
    }
}
