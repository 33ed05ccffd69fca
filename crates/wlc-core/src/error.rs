//! Error types for wlc-core

use thiserror::Error;

/// Core error type for wholelife
#[derive(Error, Debug)]
pub enum CoreError {
    /// C001: Configuration file not found
    #[error("[C001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// C002: Invalid configuration value
    #[error("[C002] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// C003: Invalid discount rate in a project schedule
    #[error("[C003] Invalid discount rate {rate} for year {year}: {reason}")]
    InvalidDiscountRate { year: u32, rate: f64, reason: String },

    /// C004: Snapshot file is malformed
    #[error("[C004] Malformed snapshot file {path}: {message}")]
    SnapshotMalformed { path: String, message: String },

    /// C005: IO error
    #[error("[C005] IO error: {0}")]
    Io(#[from] std::io::Error),

    /// C006: IO error with file path context
    #[error("[C006] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// C007: YAML parse error
    #[error("[C007] Config parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
