//! Validated titration scenarios.
//!
//! A `TitrationRecord` can only be produced by catalog validation
//! (`crate::catalog`), so holding one means the positivity and equivalence-count
//! invariants have already been checked. Fields are read through accessors to
//! keep the derived landmarks consistent with the inputs they came from.

use serde::Serialize;

use super::types::{Analyte, ChemicalSpecies, Landmark, Landmarks, Topology, TopologyKind};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitrationRecord {
    id: String,
    analyte: Analyte,
    titrant: ChemicalSpecies,
    topology: Topology,
    pkas: Vec<f64>,
    recommended_indicator: String,
    landmarks: Landmarks,
}

impl TitrationRecord {
    pub(crate) fn from_validated(
        id: String,
        analyte: Analyte,
        titrant: ChemicalSpecies,
        topology: Topology,
        recommended_indicator: String,
        landmarks: Landmarks,
    ) -> Self {
        let pkas = topology.pkas();
        Self {
            id,
            analyte,
            titrant,
            topology,
            pkas,
            recommended_indicator,
            landmarks,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn analyte(&self) -> &Analyte {
        &self.analyte
    }

    pub fn titrant(&self) -> &ChemicalSpecies {
        &self.titrant
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn kind(&self) -> TopologyKind {
        self.topology.kind()
    }

    /// pKa values, strongest acid step first.
    pub fn pkas(&self) -> &[f64] {
        &self.pkas
    }

    pub fn recommended_indicator(&self) -> &str {
        &self.recommended_indicator
    }

    pub fn landmarks(&self) -> &Landmarks {
        &self.landmarks
    }

    pub fn initial_ph(&self) -> f64 {
        self.landmarks.initial_ph
    }

    pub fn equivalence_points(&self) -> &[Landmark] {
        &self.landmarks.equivalence
    }

    pub fn half_equivalence_points(&self) -> &[Landmark] {
        &self.landmarks.half_equivalence
    }

    /// "analyte + titrant" label for listings.
    pub fn label(&self) -> String {
        format!(
            "{} ({}) + {} ({})",
            self.analyte.species.name,
            self.analyte.species.formula,
            self.titrant.name,
            self.titrant.formula
        )
    }
}
