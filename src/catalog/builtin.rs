//! Built-in titration and indicator catalog.
//!
//! Constants are the usual 25 °C textbook values. Every record is titrated at
//! classroom concentrations (0.05–0.5 M) where the simplified expressions hold.

use crate::domain::{Analyte, ChemicalSpecies, Indicator, RecordEntry, Topology};

fn indicator(id: &str, name: &str, low: f64, high: f64, acidic: &str, basic: &str) -> Indicator {
    Indicator {
        id: id.to_string(),
        name: name.to_string(),
        low,
        high,
        acidic_color: acidic.to_string(),
        basic_color: basic.to_string(),
    }
}

pub fn builtin_indicators() -> Vec<Indicator> {
    vec![
        indicator("methyl-orange", "Methyl orange", 3.1, 4.4, "#E53935", "#FDD835"),
        indicator("bromocresol-green", "Bromocresol green", 3.8, 5.4, "#FDD835", "#1E88E5"),
        indicator("methyl-red", "Methyl red", 4.4, 6.2, "#E53935", "#FDD835"),
        indicator("bromothymol-blue", "Bromothymol blue", 6.0, 7.6, "#FDD835", "#1E88E5"),
        indicator("phenol-red", "Phenol red", 6.8, 8.4, "#FDD835", "#E53935"),
        indicator("phenolphthalein", "Phenolphthalein", 8.2, 10.0, "#FFFFFF", "#EC407A"),
        indicator("thymolphthalein", "Thymolphthalein", 9.3, 10.5, "#FFFFFF", "#1E88E5"),
        indicator("alizarin-yellow", "Alizarin yellow R", 10.1, 12.0, "#FDD835", "#E53935"),
    ]
}

fn naoh(molarity: f64) -> ChemicalSpecies {
    ChemicalSpecies::new("NaOH", "Sodium hydroxide", molarity)
}

fn entry(
    id: &str,
    analyte: Analyte,
    titrant: ChemicalSpecies,
    topology: Topology,
    indicator: &str,
    equivalence_volumes_ml: &[f64],
) -> RecordEntry {
    RecordEntry {
        id: id.to_string(),
        analyte,
        titrant,
        topology,
        recommended_indicator: indicator.to_string(),
        equivalence_volumes_ml: Some(equivalence_volumes_ml.to_vec()),
    }
}

pub fn builtin_entries() -> Vec<RecordEntry> {
    vec![
        entry(
            "hcl-naoh",
            Analyte::new(ChemicalSpecies::new("HCl", "Hydrochloric acid", 0.1), 25.0),
            naoh(0.1),
            Topology::StrongStrong,
            "bromothymol-blue",
            &[25.0],
        ),
        entry(
            "hno3-naoh",
            Analyte::new(ChemicalSpecies::new("HNO3", "Nitric acid", 0.05), 20.0),
            naoh(0.1),
            Topology::StrongStrong,
            "bromothymol-blue",
            &[10.0],
        ),
        entry(
            "ch3cooh-naoh",
            Analyte::new(ChemicalSpecies::new("CH3COOH", "Acetic acid", 0.1), 25.0),
            naoh(0.1),
            Topology::WeakStrong { ka: 1.8e-5 },
            "phenolphthalein",
            &[25.0],
        ),
        entry(
            "hcooh-naoh",
            Analyte::new(ChemicalSpecies::new("HCOOH", "Formic acid", 0.5), 10.0),
            naoh(0.5),
            Topology::WeakStrong { ka: 1.8e-4 },
            "phenolphthalein",
            &[10.0],
        ),
        entry(
            "nh3-hcl",
            Analyte::new(ChemicalSpecies::new("NH3", "Ammonia", 0.1), 25.0),
            ChemicalSpecies::new("HCl", "Hydrochloric acid", 0.1),
            Topology::StrongWeak {
                kb: 1.8e-5,
                pka_conjugate: 9.25,
            },
            "methyl-red",
            &[25.0],
        ),
        entry(
            "h2co3-naoh",
            Analyte::new(ChemicalSpecies::new("H2CO3", "Carbonic acid", 0.1), 20.0),
            naoh(0.1),
            Topology::Diprotic {
                ka1: 4.3e-7,
                ka2: 4.8e-11,
            },
            "phenolphthalein",
            &[20.0, 40.0],
        ),
        entry(
            "h3po4-naoh",
            Analyte::new(ChemicalSpecies::new("H3PO4", "Phosphoric acid", 0.1), 10.0),
            naoh(0.1),
            Topology::Triprotic {
                ka1: 7.5e-3,
                ka2: 6.2e-8,
                ka3: 4.8e-13,
            },
            "phenolphthalein",
            &[10.0, 20.0, 30.0],
        ),
        entry(
            "citric-naoh",
            Analyte::new(ChemicalSpecies::new("C6H8O7", "Citric acid", 0.1), 10.0),
            naoh(0.1),
            Topology::Triprotic {
                ka1: 7.4e-4,
                ka2: 1.7e-5,
                ka3: 4.0e-7,
            },
            "phenolphthalein",
            &[10.0, 20.0, 30.0],
        ),
    ]
}
