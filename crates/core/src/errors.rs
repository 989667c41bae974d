use thiserror::Error;

/// Unified error type for the entire portfolio-ledger-core library.
/// Every public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Record Entry ────────────────────────────────────────────────
    #[error("Missing field: {0}. Please fill in all the fields.")]
    MissingField(&'static str),

    #[error("Invalid numeric value for {field}: '{value}'")]
    NumericFormat { field: &'static str, value: String },

    #[error("Invalid date format: '{0}'. Please use YYYY-MM-DD.")]
    DateFormat(String),

    #[error("{field} must be greater than zero (got {value})")]
    NonPositiveValue { field: &'static str, value: f64 },

    #[error("Unknown investment type: '{0}'")]
    UnknownCategory(String),

    // ── Selection ───────────────────────────────────────────────────
    #[error("No investment selected")]
    NoSelection,

    #[error("Position {position} is out of range (ledger has {len} records)")]
    PositionOutOfRange { position: usize, len: usize },

    #[error("Record not found: {0}")]
    RecordNotFound(String),

    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    // ── Storage / File ──────────────────────────────────────────────
    #[error("Persistence I/O error: {0}")]
    PersistenceIO(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl CoreError {
    /// Errors the caller can resolve by correcting input or selection and retrying.
    /// Everything else is a failure of the operation itself.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CoreError::MissingField(_)
                | CoreError::NumericFormat { .. }
                | CoreError::DateFormat(_)
                | CoreError::NonPositiveValue { .. }
                | CoreError::UnknownCategory(_)
                | CoreError::NoSelection
                | CoreError::PositionOutOfRange { .. }
                | CoreError::InvalidFilter(_)
        )
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::PersistenceIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}
