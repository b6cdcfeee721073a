//! End-to-end titration scenarios over the public library API.

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use titration_curves::catalog::{Catalog, builtin_indicators};
use titration_curves::domain::{Analyte, ChemicalSpecies, RecordEntry, Topology, TopologyKind};
use titration_curves::models::{RegimeKind, evaluate, solve};
use titration_curves::sampler::{REFINEMENT_OFFSETS_ML, sample, steepest_step};

fn catalog() -> Catalog {
    Catalog::builtin().unwrap()
}

#[test]
fn hydrochloric_acid_with_sodium_hydroxide() {
    let catalog = catalog();
    let record = catalog.record("hcl-naoh").unwrap();

    assert_relative_eq!(record.equivalence_points()[0].volume_ml, 25.0, epsilon = 1e-9);
    assert!((solve(record, 0.0) - 1.00).abs() <= 0.02);
    assert!((solve(record, 25.0) - 7.00).abs() <= 0.01);
    assert!((solve(record, 50.0) - 12.52).abs() <= 0.01);
}

#[test]
fn acetic_acid_with_sodium_hydroxide() {
    let catalog = catalog();
    let record = catalog.record("ch3cooh-naoh").unwrap();

    assert!((solve(record, 0.0) - 2.87).abs() <= 0.01);
    assert!((solve(record, 12.5) - 4.74).abs() <= 0.01);
    assert!((solve(record, 25.0) - 8.72).abs() <= 0.01);

    let eq_ph = record.equivalence_points()[0].ph;
    assert!(catalog.is_appropriate("phenolphthalein", eq_ph).unwrap());
    assert!(!catalog.is_appropriate("methyl-orange", eq_ph).unwrap());
}

#[test]
fn strong_strong_equivalence_is_neutral() {
    let catalog = catalog();
    for record in catalog
        .records()
        .iter()
        .filter(|r| r.kind() == TopologyKind::StrongStrong)
    {
        let v = record.equivalence_points()[0].volume_ml;
        assert_relative_eq!(solve(record, v), 7.0, epsilon = 1e-6);
    }
}

#[test]
fn half_equivalence_ph_equals_pka() {
    let catalog = catalog();
    for record in catalog.records().iter().filter(|r| {
        matches!(
            r.kind(),
            TopologyKind::WeakStrong | TopologyKind::Diprotic | TopologyKind::Triprotic
        )
    }) {
        for (half, pka) in record.half_equivalence_points().iter().zip(record.pkas()) {
            assert_relative_eq!(solve(record, half.volume_ml), *pka, epsilon = 1e-6);
        }
    }
}

#[test]
fn carbonic_acid_walks_both_protic_steps() {
    let catalog = catalog();
    let record = catalog.record("h2co3-naoh").unwrap();
    let pkas = record.pkas();

    assert_relative_eq!(solve(record, 10.0), pkas[0], epsilon = 1e-6);
    assert_relative_eq!(solve(record, 30.0), pkas[1], epsilon = 1e-6);
    assert_relative_eq!(solve(record, 20.0), 0.5 * (pkas[0] + pkas[1]), epsilon = 1e-9);
    assert_eq!(evaluate(record, 20.0).regime, RegimeKind::Equivalence { step: 1 });
    assert_eq!(evaluate(record, 40.0).regime, RegimeKind::Equivalence { step: 2 });
    assert_eq!(evaluate(record, 41.0).regime, RegimeKind::TitrantExcess);
}

#[test]
fn sampled_curves_never_decrease_for_monoprotic_acids() {
    let catalog = catalog();
    for record in catalog.records().iter().filter(|r| {
        matches!(r.kind(), TopologyKind::StrongStrong | TopologyKind::WeakStrong)
    }) {
        let points = sample(record, None);
        for w in points.windows(2) {
            assert!(
                w[1].ph >= w[0].ph - 1e-9,
                "{}: pH drops from {} to {} between {} and {} mL",
                record.id(),
                w[0].ph,
                w[1].ph,
                w[0].volume_ml,
                w[1].volume_ml
            );
        }
    }
}

#[test]
fn weak_base_curve_falls() {
    let catalog = catalog();
    let record = catalog.record("nh3-hcl").unwrap();
    let points = sample(record, None);
    assert!(points.windows(2).all(|w| w[1].ph <= w[0].ph + 1e-9));
    assert!(points[0].ph > 11.0);
    assert!(points[points.len() - 1].ph < 2.0);
}

#[test]
fn curve_is_steepest_at_equivalence_and_refined_there() {
    let catalog = catalog();
    for id in ["hcl-naoh", "ch3cooh-naoh", "nh3-hcl"] {
        let record = catalog.record(id).unwrap();
        let eq = record.equivalence_points()[0].volume_ml;
        let points = sample(record, None);

        for offset in REFINEMENT_OFFSETS_ML {
            assert!(points.iter().any(|p| (p.volume_ml - (eq + offset)).abs() < 1e-9));
        }

        let steepest = steepest_step(&points).unwrap();
        assert!((steepest - eq).abs() <= 0.1, "{id}: steepest at {steepest}, eq at {eq}");

        let before = solve(record, eq - 0.1);
        let after = solve(record, eq + 0.1);
        assert!((after - before).abs() > 2.0, "{id}: jump {before} -> {after}");

        let local = (solve(record, eq - 0.01) - solve(record, eq + 0.01)).abs();
        let broad = (solve(record, eq - 5.0) - solve(record, eq + 5.0)).abs() / 500.0;
        assert!(local > 10.0 * broad, "{id}: local {local} vs broad {broad}");
    }
}

#[test]
fn sampling_is_idempotent_and_matches_live_readings() {
    let catalog = catalog();
    for record in catalog.records() {
        let first = sample(record, None);
        let second = sample(record, None);
        assert_eq!(first, second);
        for p in first.iter().step_by(7) {
            assert_eq!(solve(record, p.volume_ml), p.ph);
        }
    }
}

#[test]
fn random_volumes_always_give_finite_ph() {
    let catalog = catalog();
    let mut rng = StdRng::seed_from_u64(7);
    for record in catalog.records() {
        let max = 2.5 * record.landmarks().largest_equivalence_volume();
        for _ in 0..500 {
            let v = rng.gen_range(0.0..max);
            let ph = solve(record, v);
            assert!(ph.is_finite(), "{} at {v} mL", record.id());
        }
    }
}

#[test]
fn random_weak_acids_respect_landmarks() {
    let mut rng = StdRng::seed_from_u64(42);
    let entries: Vec<RecordEntry> = (0..25)
        .map(|i| {
            let ka = 10f64.powf(rng.gen_range(-9.0..-3.0));
            let ca = rng.gen_range(0.01..0.5);
            let cb = rng.gen_range(0.01..0.5);
            let va = rng.gen_range(5.0..50.0);
            RecordEntry {
                id: format!("weak-{i}"),
                analyte: Analyte::new(ChemicalSpecies::new("HA", "Weak acid", ca), va),
                titrant: ChemicalSpecies::new("NaOH", "Sodium hydroxide", cb),
                topology: Topology::WeakStrong { ka },
                recommended_indicator: "phenolphthalein".to_string(),
                equivalence_volumes_ml: None,
            }
        })
        .collect();
    let catalog = Catalog::from_entries(entries, builtin_indicators()).unwrap();

    for record in catalog.records() {
        let half = record.half_equivalence_points()[0];
        assert_relative_eq!(solve(record, half.volume_ml), record.pkas()[0], epsilon = 1e-6);

        let eq = record.equivalence_points()[0];
        assert!(eq.ph > 7.0, "{}: conjugate base should be basic", record.id());
        assert!(solve(record, 0.0) < half.ph);
    }
}

#[test]
fn diprotic_with_missing_constant_is_rejected_at_load() {
    let text = r#"{"records": [{
        "id": "broken",
        "analyte": { "formula": "H2A", "name": "Diacid", "molarity": 0.1, "volume_ml": 10.0 },
        "titrant": { "formula": "NaOH", "name": "Sodium hydroxide", "molarity": 0.1 },
        "topology": { "kind": "diprotic", "ka1": 1e-3 },
        "recommended_indicator": "phenolphthalein"
    }]}"#;
    assert!(titration_curves::io::parse_catalog_json(text).is_err());
}
