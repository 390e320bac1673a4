//! Error types for the chemo_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for chemo_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A dose input was non-positive, non-finite, or otherwise unusable
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The resolved number of high days cannot reproduce the target total
    #[error(
        "Rounding inconsistency: computed {high_days} high day(s) for a {days}-day course"
    )]
    RoundingInconsistency { high_days: i64, days: u32 },

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Document export error
    #[error("Export error: {0}")]
    Export(String),
}
