//! Error type shared by the library modules.
//!
//! Every variant renders a message that can be shown to the user as-is. The
//! binary wraps these in `anyhow` with additional context.

use thiserror::Error;

/// Result alias used across the Haven core.
pub type Result<T, E = HavenError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum HavenError {
    /// SQLite failure (constraint violation, I/O inside the engine, bad SQL).
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Filesystem failure outside SQLite (seed state file, directories).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Seed state file could not be encoded or decoded.
    #[error("seed state error: {0}")]
    Json(#[from] serde_json::Error),

    /// Caller passed an argument outside the accepted domain.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A save was requested with neither labels nor a numeric value.
    #[error("nothing to save: select at least one label or enter a value")]
    NothingToSave,

    #[error("not found: {0}")]
    NotFound(String),

    /// Worker thread panicked or a lock was poisoned.
    #[error("internal error: {0}")]
    Internal(String),
}
