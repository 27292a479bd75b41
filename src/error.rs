//! Error types for the fareflow pricing service.
//!
//! This module provides a unified error type [`FareflowError`] for all
//! fareflow operations, along with a convenient [`Result`] type alias.
//!
//! # Error Categories
//!
//! - **Validation**: request payloads that violate the schema or the
//!   categorical whitelists
//! - **Artifacts**: model/scaler files that cannot be read or parsed
//! - **Inference**: scaling or prediction failures during a request
//! - **Configuration**: invalid settings or missing configuration
//!
//! # Example
//!
//! ```rust
//! use fareflow::error::{FareflowError, Result};
//!
//! fn check_price(price: f64) -> Result<f64> {
//!     if price < 0.0 {
//!         return Err(FareflowError::NegativeField {
//!             field: "competitor_price",
//!         });
//!     }
//!     Ok(price)
//! }
//! ```

use std::io;
use thiserror::Error;

/// Main error type for fareflow operations.
#[derive(Error, Debug)]
pub enum FareflowError {
    // Request validation errors
    #[error("{field} must be non-negative")]
    NegativeField { field: &'static str },

    #[error("Invalid {field}: {value}")]
    InvalidCategory { field: &'static str, value: String },

    #[error("Validation error: {0}")]
    Validation(String),

    // Artifact errors
    #[error("Artifact load failed: {0}")]
    ArtifactLoad(String),

    #[error("Invalid artifact: {0}")]
    InvalidArtifact(String),

    // Inference errors
    #[error("Model not loaded")]
    ModelNotLoaded,

    #[error("Scaling failed: {0}")]
    Scaling(String),

    #[error("Prediction failed: {0}")]
    Prediction(String),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration: {field}: {reason}")]
    InvalidConfig { field: String, reason: String },

    // External errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl FareflowError {
    /// Check if the error is a client-side (bad request) error.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            FareflowError::NegativeField { .. }
                | FareflowError::InvalidCategory { .. }
                | FareflowError::Validation(_)
        )
    }
}

impl From<serde_json::Error> for FareflowError {
    fn from(e: serde_json::Error) -> Self {
        FareflowError::Serialization(e.to_string())
    }
}

/// Result type alias for fareflow operations.
pub type Result<T> = std::result::Result<T, FareflowError>;
