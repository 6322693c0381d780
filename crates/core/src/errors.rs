use thiserror::Error;

/// Unified error type for the entire portfolio-rebalancer-core library.
/// Every public fallible function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Input validation ────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),

    // ── Portfolio records ───────────────────────────────────────────
    #[error("Holding not found: {0}")]
    HoldingNotFound(String),

    #[error("Asset class not found: {0}")]
    AssetClassNotFound(String),

    #[error("Asset class already exists: {0}")]
    DuplicateAssetClass(String),

    #[error("Favorite not found: {0}")]
    FavoriteNotFound(String),

    // ── Storage / File ──────────────────────────────────────────────
    #[error("Invalid file format: {0}")]
    InvalidFileFormat(String),

    #[error("Unsupported file version: {0}")]
    UnsupportedVersion(u16),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("File I/O error: {0}")]
    FileIO(String),

    // ── Quotes ──────────────────────────────────────────────────────
    #[error("Quote provider error ({provider}): {message}")]
    Api {
        provider: String,
        message: String,
    },

    #[error("No quote provider registered for {0}")]
    NoProvider(String),

    #[error("Price not available for {symbol}")]
    PriceNotAvailable { symbol: String },
}

impl CoreError {
    /// Shorthand used by the validators.
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        CoreError::ValidationError(msg.into())
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<bincode::Error> for CoreError {
    fn from(e: bincode::Error) -> Self {
        CoreError::Serialization(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}
