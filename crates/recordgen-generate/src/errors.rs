use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a generation call. No partial output is produced.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("type name should not be an empty string")]
    EmptyName,
    #[error("cannot resolve module '{module}' from {}", base.display())]
    Resolution { module: String, base: PathBuf },
    #[error("not a valid path: {}", .0.display())]
    NotFound(PathBuf),
    #[error("template error: {0}")]
    Template(String),
    #[error("print error: {0}")]
    Print(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Core(#[from] recordgen_core::Error),
}

/// Result type for generation operations.
pub type Result<T> = std::result::Result<T, GenerateError>;
