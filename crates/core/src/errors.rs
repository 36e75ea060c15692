use thiserror::Error;

/// Unified error type for the entire portfolio-dashboard-core library.
///
/// Pivoting and aggregation never fail; errors only come from the edges
/// (decoding records, reading files, parsing dates, validating settings).
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Dates ───────────────────────────────────────────────────────
    #[error("Invalid report date: {0}")]
    InvalidDate(String),

    // ── Settings / Input ────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),

    // ── Serialization ───────────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── File I/O (native only) ──────────────────────────────────────
    #[error("File I/O error: {0}")]
    FileIO(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}
