use thiserror::Error;

/// Unified error type for the entire net-worth-tracker core library.
/// Every public fallible function returns `Result<T, CoreError>`.
///
/// Two failure classes from the snapshot path deliberately have NO variant
/// here: a malformed snapshot payload is recovered locally (the snapshot is
/// skipped in history queries), and a performance comparison with a zero or
/// missing baseline is simply excluded from rankings.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Storage / File ──────────────────────────────────────────────
    #[error("Invalid file format: {0}")]
    InvalidFileFormat(String),

    #[error("Unsupported file version: {0}")]
    UnsupportedVersion(u16),

    #[error("Encryption failed: {0}")]
    Encryption(String),

    #[error("Decryption failed — wrong password or corrupted file")]
    Decryption,

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── File I/O (native only) ──────────────────────────────────────
    #[error("File I/O error: {0}")]
    FileIO(String),

    // ── Quote providers / Network ───────────────────────────────────
    #[error("API error ({provider}): {message}")]
    Api {
        provider: String,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    // ── Business Logic ──────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Asset not found: {0}")]
    AssetNotFound(i64),

    #[error("No hypothesis configured for asset type: {0}")]
    HypothesisNotFound(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

/// Strip query parameters from URLs embedded in error text, so provider
/// credentials never end up in logs.
fn redact_query(message: String) -> String {
    match message.find('?') {
        Some(idx) => format!("{}?<query redacted>", &message[..idx]),
        None => message,
    }
}

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

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        CoreError::Network(redact_query(e.to_string()))
    }
}

impl From<aes_gcm::Error> for CoreError {
    fn from(_: aes_gcm::Error) -> Self {
        CoreError::Decryption
    }
}
