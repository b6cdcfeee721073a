//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the chemistry code stays clean and testable
//! - output changes are localized (important for snapshot tests)

use crate::catalog::Catalog;
use crate::domain::{CurvePoint, Indicator, Landmark, TitrationRecord, TopologyKind};
use crate::indicator::find;
use crate::models::{Evaluation, evaluate};
use crate::sampler::{RecordCurve, steepest_step};

/// Record header: solutions, constants, landmarks and the recommended indicator.
pub fn format_record_summary(record: &TitrationRecord, indicators: &[Indicator]) -> String {
    let mut out = String::new();
    let analyte = record.analyte();
    let titrant = record.titrant();

    out.push_str(&format!("=== titr - {} ===\n", record.id()));
    out.push_str(&format!("Topology: {}\n", record.kind().display_name()));
    out.push_str(&format!(
        "Analyte: {} ({}) {:.2} mL @ {:.4} M\n",
        analyte.species.name, analyte.species.formula, analyte.volume_ml, analyte.species.molarity
    ));
    out.push_str(&format!(
        "Titrant: {} ({}) @ {:.4} M\n",
        titrant.name, titrant.formula, titrant.molarity
    ));

    let pka_label = match record.kind() {
        TopologyKind::StrongWeak => "pKa (conjugate acid)",
        _ => "pKa",
    };
    if record.pkas().is_empty() {
        out.push_str(&format!("{pka_label}: -\n"));
    } else {
        out.push_str(&format!("{pka_label}: {}\n", fmt_vec(record.pkas())));
    }
    out.push_str(&format!("Initial pH: {:.3}\n", record.initial_ph()));

    out.push_str("\nLandmarks:\n");
    out.push_str(&format_landmarks("half-equivalence", record.half_equivalence_points()));
    out.push_str(&format_landmarks("equivalence", record.equivalence_points()));

    out.push('\n');
    match find(indicators, record.recommended_indicator()) {
        Ok(ind) => {
            let brackets = record.equivalence_points().iter().any(|eq| ind.brackets(eq.ph));
            out.push_str(&format!(
                "Recommended indicator: {} [{:.1}, {:.1}] ({})\n",
                ind.name,
                ind.low,
                ind.high,
                if brackets { "brackets equivalence" } else { "misses equivalence" }
            ));
        }
        Err(_) => {
            out.push_str(&format!(
                "Recommended indicator: {} (not in catalog)\n",
                record.recommended_indicator()
            ));
        }
    }

    out
}

fn format_landmarks(label: &str, marks: &[Landmark]) -> String {
    let mut out = String::new();
    for (i, m) in marks.iter().enumerate() {
        out.push_str(&format!(
            "  {:<20} {:>9.3} mL  pH {:>6.3}\n",
            format!("{label} {}", i + 1),
            m.volume_ml,
            m.ph
        ));
    }
    out
}

/// One line per record, optionally restricted to one topology.
pub fn format_catalog_listing(catalog: &Catalog, topology: Option<TopologyKind>) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<16} {:<14} {:>9} {}\n", "id", "topology", "eq (mL)", "titration").trim_end());
    out.push('\n');
    out.push_str(&format!("{:-<16} {:-<14} {:-<9} {:-<9}", "", "", "", ""));
    out.push('\n');

    for record in catalog
        .records()
        .iter()
        .filter(|r| topology.is_none_or(|k| r.kind() == k))
    {
        let eq: Vec<String> = record
            .equivalence_points()
            .iter()
            .map(|l| format!("{:.2}", l.volume_ml))
            .collect();
        out.push_str(&format!(
            "{:<16} {:<14} {:>9} {}\n",
            truncate(record.id(), 16),
            record.kind().tag(),
            eq.join("/"),
            record.label()
        ));
    }
    out
}

/// Sampled points with the regime that produced each pH.
pub fn format_points_table(record: &TitrationRecord, points: &[CurvePoint]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:>10} {:>8}  {}\n", "volume_ml", "pH", "regime"));
    out.push_str(&format!("{:->10} {:->8}  {:-<18}\n", "", "", ""));
    for p in points {
        let eval = evaluate(record, p.volume_ml);
        out.push_str(&format!("{:>10.3} {:>8.3}  {}\n", p.volume_ml, p.ph, eval.regime));
    }
    out
}

/// A single reading, optionally with an indicator's colour at that pH.
pub fn format_evaluation(record: &TitrationRecord, eval: &Evaluation, indicator: Option<&Indicator>) -> String {
    let mut out = format!(
        "{}: V={:.3} mL -> pH {:.3} ({})\n",
        record.id(),
        eval.volume_ml,
        eval.ph,
        eval.regime
    );
    if let Some(ind) = indicator {
        out.push_str(&format!(
            "{}: {} ({:?})\n",
            ind.name,
            ind.color_for(eval.ph),
            ind.state(eval.ph)
        ));
    }
    out
}

/// Every indicator checked against each equivalence point of `record`.
pub fn format_indicator_report(record: &TitrationRecord, indicators: &[Indicator]) -> String {
    let mut out = String::new();
    for (i, eq) in record.equivalence_points().iter().enumerate() {
        out.push_str(&format!(
            "Equivalence {} at {:.3} mL, pH {:.3}:\n",
            i + 1,
            eq.volume_ml,
            eq.ph
        ));
        for ind in indicators {
            let mark = if ind.brackets(eq.ph) { "ok" } else { "--" };
            let recommended = if ind.id == record.recommended_indicator() { " *" } else { "" };
            out.push_str(&format!(
                "  [{mark}] {:<18} {:>5.1}-{:<5.1}{recommended}\n",
                ind.id, ind.low, ind.high
            ));
        }
    }
    out
}

/// Indicators whose transition interval contains `ph`.
pub fn format_indicator_matches(ph: f64, matches: &[&Indicator]) -> String {
    if matches.is_empty() {
        return format!("No indicator changes colour at pH {ph:.2}.\n");
    }
    let mut out = format!("Indicators changing colour at pH {ph:.2}:\n");
    for ind in matches {
        out.push_str(&format!("  {:<18} {:>5.1}-{:<5.1} {}\n", ind.id, ind.low, ind.high, ind.name));
    }
    out
}

/// One line per sampled record.
pub fn format_sweep(curves: &[RecordCurve<'_>]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<16} {:>7} {:>10} {:>10}\n", "id", "points", "steepest", "final eq"));
    out.push_str(&format!("{:-<16} {:->7} {:->10} {:->10}\n", "", "", "", ""));
    for c in curves {
        let steepest = steepest_step(&c.points)
            .map(|v| format!("{v:.2}"))
            .unwrap_or_else(|| "-".to_string());
        let final_eq = c
            .record
            .landmarks()
            .final_equivalence()
            .map(|l| format!("{:.2}", l.volume_ml))
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "{:<16} {:>7} {:>10} {:>10}\n",
            truncate(c.record.id(), 16),
            c.points.len(),
            steepest,
            final_eq
        ));
    }
    out
}

fn fmt_vec(v: &[f64]) -> String {
    let parts: Vec<String> = v.iter().map(|x| format!("{x:.3}")).collect();
    format!("[{}]", parts.join(", "))
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::sample;

    fn catalog() -> Catalog {
        Catalog::builtin().unwrap()
    }

    #[test]
    fn summary_shows_landmarks_and_indicator() {
        let catalog = catalog();
        let record = catalog.record("ch3cooh-naoh").unwrap();
        let txt = format_record_summary(record, catalog.indicators());
        assert!(txt.contains("weak acid + strong base"));
        assert!(txt.contains("pKa: [4.745]"));
        assert!(txt.contains("Initial pH: 2.872"));
        assert!(txt.contains("equivalence 1"));
        assert!(txt.contains("Phenolphthalein"));
        assert!(txt.contains("brackets equivalence"));
    }

    #[test]
    fn strong_strong_summary_has_no_pka() {
        let catalog = catalog();
        let txt = format_record_summary(catalog.record("hcl-naoh").unwrap(), catalog.indicators());
        assert!(txt.contains("pKa: -"));
        assert!(!txt.contains("half-equivalence"));
    }

    #[test]
    fn listing_filters_by_topology() {
        let catalog = catalog();
        let txt = format_catalog_listing(&catalog, Some(TopologyKind::Triprotic));
        assert!(txt.contains("h3po4-naoh"));
        assert!(txt.contains("citric-naoh"));
        assert!(!txt.contains("hcl-naoh"));
        assert!(txt.contains("10.00/20.00/30.00"));
    }

    #[test]
    fn points_table_has_one_row_per_point() {
        let catalog = catalog();
        let record = catalog.record("hcl-naoh").unwrap();
        let points = sample(record, Some(2.0));
        let txt = format_points_table(record, &points);
        assert_eq!(txt.lines().count(), points.len() + 2);
        assert!(txt.lines().nth(2).unwrap().ends_with("analyte excess"));
    }

    #[test]
    fn indicator_report_marks_recommended() {
        let catalog = catalog();
        let record = catalog.record("ch3cooh-naoh").unwrap();
        let txt = format_indicator_report(record, catalog.indicators());
        let line = txt.lines().find(|l| l.contains("phenolphthalein")).unwrap();
        assert!(line.contains("[ok]"));
        assert!(line.ends_with('*'));
        let line = txt.lines().find(|l| l.contains("methyl-orange")).unwrap();
        assert!(line.contains("[--]"));
    }

    #[test]
    fn truncate_marks_cut() {
        assert_eq!(truncate("abcdef", 4), "abc.");
        assert_eq!(truncate("abc", 4), "abc");
    }
}
