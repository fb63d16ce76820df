use thiserror::Error;

/// Core error type shared across recordgen crates.
#[derive(Debug, Error)]
pub enum Error {
    /// The schema violates internal invariants.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),
    /// The schema document could not be decoded.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    /// The schema document could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for results returned by recordgen crates.
pub type Result<T> = std::result::Result<T, Error>;
