// src/error.rs

//! Engine error types.
//!
//! Every failure mode has a named variant. Validation failures carry enough
//! context to be reported against the offending SKU.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid forecast horizon: {0} days (must be at least 1)")]
    InvalidHorizon(i64),

    #[error("invalid classifier input: {0}")]
    InvalidInput(String),

    #[error("invalid record {sku} @ {store_id}: {reason}")]
    InvalidRecord {
        sku: String,
        store_id: String,
        reason: String,
    },

    #[error("invalid engine configuration: {0}")]
    InvalidConfig(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
