//! Error types for nbody-sandbox.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SandboxError {
    #[error("Body mass must be positive and finite, got {0}")]
    InvalidMass(f64),

    #[error("Non-finite value for {field}: {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("Invalid {field}: {value}")]
    InvalidConfig { field: &'static str, value: f64 },

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown preset: {0}")]
    UnknownPreset(String),
}

pub type Result<T> = std::result::Result<T, SandboxError>;

/// Reject NaN and infinities before they reach the force loop
pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SandboxError::NonFinite { field, value })
    }
}
