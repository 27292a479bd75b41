//! Configuration module for fareflow.

use crate::error::{FareflowError, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Main configuration for a fareflow service instance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FareflowConfig {
    /// HTTP server configuration.
    pub server: ServerConfig,
    /// Artifact locations.
    pub artifacts: ArtifactConfig,
    /// Observability configuration.
    pub observability: ObservabilityConfig,
}

impl FareflowConfig {
    /// Load configuration from a file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| FareflowError::Config(format!("Failed to read config file: {}", e)))?;

        let config: Self = serde_json::from_str(&content)
            .map_err(|e| FareflowError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<()> {
        if self.artifacts.model_path.as_os_str().is_empty() {
            return Err(FareflowError::InvalidConfig {
                field: "artifacts.model_path".to_string(),
                reason: "Model path must not be empty".to_string(),
            });
        }

        if self.artifacts.scaler_path.as_os_str().is_empty() {
            return Err(FareflowError::InvalidConfig {
                field: "artifacts.scaler_path".to_string(),
                reason: "Scaler path must not be empty".to_string(),
            });
        }

        if self.observability.metrics_enabled
            && self.observability.metrics_addr == self.server.bind_addr
        {
            return Err(FareflowError::InvalidConfig {
                field: "observability.metrics_addr".to_string(),
                reason: "Metrics address must differ from the server bind address".to_string(),
            });
        }

        Ok(())
    }

    /// Create a minimal development configuration.
    pub fn development() -> Self {
        Self {
            server: ServerConfig {
                bind_addr: "127.0.0.1:8000".parse().expect("valid socket address"),
            },
            artifacts: ArtifactConfig::default(),
            observability: ObservabilityConfig {
                log_level: "debug".to_string(),
                ..Default::default()
            },
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind the pricing API.
    pub bind_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8000".parse().expect("valid socket address"),
        }
    }
}

/// Artifact location configuration.
///
/// Relative paths are resolved against the directory containing the service
/// executable, falling back to the working directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactConfig {
    /// Path to the serialized regression model.
    pub model_path: PathBuf,
    /// Path to the serialized numeric scaler.
    pub scaler_path: PathBuf,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("models/pricing_model.json"),
            scaler_path: PathBuf::from("models/numeric_scaler.json"),
        }
    }
}

impl ArtifactConfig {
    /// Resolve the model path to an absolute location.
    pub fn resolved_model_path(&self) -> PathBuf {
        resolve_install_relative(&self.model_path)
    }

    /// Resolve the scaler path to an absolute location.
    pub fn resolved_scaler_path(&self) -> PathBuf {
        resolve_install_relative(&self.scaler_path)
    }
}

/// Resolve a path relative to the install location of the service binary.
fn resolve_install_relative(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }

    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(path)))
        .filter(|candidate| candidate.exists())
        .unwrap_or_else(|| path.to_path_buf())
}

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level filter (trace, debug, info, warn, error).
    pub log_level: String,
    /// Emit logs as JSON.
    pub json_logs: bool,
    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,
    /// Address to bind the metrics server.
    pub metrics_addr: SocketAddr,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            metrics_enabled: false,
            metrics_addr: "127.0.0.1:9090".parse().expect("valid socket address"),
        }
    }
}
