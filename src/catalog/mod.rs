//! Static titration and indicator catalogs.
//!
//! A `Catalog` is the only way to obtain `TitrationRecord`s: every entry passes
//! through `validate` first, so the engine itself never re-checks its inputs.

use std::collections::HashSet;

use tracing::info;

use crate::domain::{Indicator, RecordEntry, TitrationRecord};
use crate::error::CatalogError;

pub mod builtin;
pub mod validate;

pub use builtin::{builtin_entries, builtin_indicators};
pub use validate::{validate_entry, validate_indicators};

/// Validated, read-only set of records and indicators.
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Vec<TitrationRecord>,
    indicators: Vec<Indicator>,
}

impl Catalog {
    /// The catalog shipped with the crate.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_entries(builtin_entries(), builtin_indicators())
    }

    /// Validate indicators first, then every record against them.
    pub fn from_entries(
        entries: Vec<RecordEntry>,
        indicators: Vec<Indicator>,
    ) -> Result<Self, CatalogError> {
        validate_indicators(&indicators)?;

        let mut seen = HashSet::new();
        let mut records = Vec::with_capacity(entries.len());
        for entry in entries {
            if !seen.insert(entry.id.clone()) {
                return Err(CatalogError::DuplicateId {
                    kind: "record",
                    id: entry.id,
                });
            }
            records.push(validate_entry(entry, &indicators)?);
        }

        info!(
            records = records.len(),
            indicators = indicators.len(),
            "catalog loaded"
        );
        Ok(Self {
            records,
            indicators,
        })
    }

    pub fn records(&self) -> &[TitrationRecord] {
        &self.records
    }

    pub fn indicators(&self) -> &[Indicator] {
        &self.indicators
    }

    pub fn record(&self, id: &str) -> Result<&TitrationRecord, CatalogError> {
        self.records
            .iter()
            .find(|r| r.id() == id)
            .ok_or_else(|| CatalogError::UnknownRecord(id.to_string()))
    }

    pub fn indicator(&self, id: &str) -> Result<&Indicator, CatalogError> {
        crate::indicator::find(&self.indicators, id)
    }

    /// Does `indicator_id`'s transition interval contain `equivalence_ph`?
    pub fn is_appropriate(&self, indicator_id: &str, equivalence_ph: f64) -> Result<bool, CatalogError> {
        crate::indicator::is_appropriate(&self.indicators, indicator_id, equivalence_ph)
    }

    /// Flask colour shown by `indicator_id` at `ph`.
    pub fn color_for(&self, indicator_id: &str, ph: f64) -> Result<&str, CatalogError> {
        crate::indicator::color_for(&self.indicators, indicator_id, ph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_validates() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.records().len(), builtin_entries().len());
        for record in catalog.records() {
            assert_eq!(record.equivalence_points().len(), record.topology().protic_order());
            assert_eq!(record.half_equivalence_points().len(), record.topology().protic_order());
        }
    }

    #[test]
    fn builtin_recommendations_bracket_an_equivalence() {
        let catalog = Catalog::builtin().unwrap();
        for record in catalog.records() {
            let ok = record
                .equivalence_points()
                .iter()
                .any(|l| catalog.is_appropriate(record.recommended_indicator(), l.ph).unwrap());
            assert!(ok, "{} recommends {}", record.id(), record.recommended_indicator());
        }
    }

    #[test]
    fn duplicate_record_ids_are_rejected() {
        let mut entries = builtin_entries();
        entries.push(entries[0].clone());
        let err = Catalog::from_entries(entries, builtin_indicators()).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId { kind: "record", .. }));
    }

    #[test]
    fn unknown_lookup_is_an_error() {
        let catalog = Catalog::builtin().unwrap();
        assert!(matches!(catalog.record("nope"), Err(CatalogError::UnknownRecord(_))));
        assert!(matches!(catalog.indicator("litmus"), Err(CatalogError::UnknownIndicator(_))));
    }
}
