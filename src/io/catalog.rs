//! JSON catalog ingest.
//!
//! A catalog file looks like:
//!
//! ```json
//! {
//!   "indicators": [ { "id": "phenolphthalein", "name": "Phenolphthalein",
//!                     "low": 8.2, "high": 10.0,
//!                     "acidic_color": "#FFFFFF", "basic_color": "#EC407A" } ],
//!   "records": [ { "id": "ch3cooh-naoh",
//!                  "analyte": { "formula": "CH3COOH", "name": "Acetic acid",
//!                               "molarity": 0.1, "volume_ml": 25.0 },
//!                  "titrant": { "formula": "NaOH", "name": "Sodium hydroxide", "molarity": 0.1 },
//!                  "topology": { "kind": "weak-strong", "ka": 1.8e-5 },
//!                  "recommended_indicator": "phenolphthalein" } ]
//! }
//! ```
//!
//! `indicators` is optional and defaults to the built-in list. Parsing is strict:
//! a topology missing one of its constants fails here, before validation.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, builtin_indicators};
use crate::domain::{Indicator, RecordEntry};
use crate::error::CatalogError;

/// On-disk catalog layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indicators: Option<Vec<Indicator>>,
    pub records: Vec<RecordEntry>,
}

/// Parse and validate a catalog from JSON text.
pub fn parse_catalog_json(text: &str) -> Result<Catalog, CatalogError> {
    let file: CatalogFile = serde_json::from_str(text)?;
    let indicators = file.indicators.unwrap_or_else(builtin_indicators);
    Catalog::from_entries(file.records, indicators)
}

/// Read, parse and validate a catalog file.
pub fn load_catalog_json(path: &Path) -> Result<Catalog, CatalogError> {
    let text = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_catalog_json(&text)
}
