//! Error types for the license module.

use thiserror::Error;

/// License-specific errors.
#[derive(Debug, Error)]
pub enum LicenseError {
    /// Key string is not a plausible license key.
    #[error("invalid license key format: {0}")]
    InvalidKeyFormat(String),

    /// Underlying file I/O failed.
    #[error("license store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored document is malformed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Storage location unavailable.
    #[error("storage error: {0}")]
    Storage(String),
}

/// Result type for license operations.
pub type LicenseResult<T> = Result<T, LicenseError>;
