use std::path::PathBuf;

use thiserror::Error;

/// Error returned by the application layer, carrying the process exit code.
///
/// - `2`: bad input (arguments, catalog, files)
/// - `4`: internal computation failure
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        AppError::new(2, err.to_string())
    }
}

/// Catalog load and lookup failures.
///
/// Everything here is caught when a catalog is built; a validated catalog never
/// produces these during evaluation.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{kind} id must not be empty")]
    EmptyId { kind: &'static str },

    #[error("duplicate {kind} id '{id}'")]
    DuplicateId { kind: &'static str, id: String },

    #[error("record '{id}': {field} must be a positive finite number (got {value})")]
    NonPositive {
        id: String,
        field: &'static str,
        value: f64,
    },

    #[error("record '{id}': {field} must be finite (got {value})")]
    NonFinite {
        id: String,
        field: &'static str,
        value: f64,
    },

    #[error("record '{id}': stepwise Ka values must strictly decrease (got {kas:?})")]
    UnorderedConstants { id: String, kas: Vec<f64> },

    #[error("record '{id}': analyte amount {moles:e} mol is too small to resolve")]
    NegligibleAnalyte { id: String, moles: f64 },

    #[error("record '{id}': a {topology} titration has {expected} equivalence point(s), catalog declares {found}")]
    EquivalenceCount {
        id: String,
        topology: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("record '{id}': declared equivalence volume #{index} is {declared} mL, amounts give {computed:.4} mL")]
    EquivalenceMismatch {
        id: String,
        index: usize,
        declared: f64,
        computed: f64,
    },

    #[error("indicator '{id}': transition interval [{low}, {high}] must be finite with low < high")]
    InvalidInterval { id: String, low: f64, high: f64 },

    #[error("unknown indicator '{0}'")]
    UnknownIndicator(String),

    #[error("unknown titration record '{0}'")]
    UnknownRecord(String),

    #[error("failed to read catalog '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
