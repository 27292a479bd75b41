//! Model and scaler artifacts.
//!
//! Artifacts are produced by an external training process and are opaque to
//! the request path: the handler only sees the [`Predictor`] and [`Scaler`]
//! traits. Loading happens once at startup; a load failure is recorded and
//! the service degrades (missing model disables `/recommend`, missing scaler
//! disables scaling) rather than crashing.

use crate::error::{FareflowError, Result};
use crate::request::NUMERIC_FEATURES;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Feature vector handed to the model: scaled (or raw) numeric values plus
/// the categorical selections, in canonical order.
#[derive(Debug, Clone, PartialEq)]
pub struct Features {
    /// Numeric features: riders, drivers, past rides, average ratings,
    /// expected duration, competitor price.
    pub numeric: [f64; NUMERIC_FEATURES],
    /// (field name, selected value) pairs in category-table order.
    pub categorical: [(&'static str, String); 4],
}

/// A loaded regression model.
pub trait Predictor: Send + Sync {
    /// Produce the normalized predicted price for one feature vector.
    fn predict(&self, features: &Features) -> Result<f64>;

    /// Human-readable identity for logs.
    fn describe(&self) -> String;
}

/// A loaded numeric scaler.
pub trait Scaler: Send + Sync {
    /// Transform raw numeric features into normalized ones.
    fn transform(&self, numeric: &[f64; NUMERIC_FEATURES]) -> Result<[f64; NUMERIC_FEATURES]>;
}

/// Serialized regression model artifact.
///
/// A distilled additive model: intercept plus per-feature coefficients plus
/// per-category effects. The request path never inspects these fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Model name.
    pub name: String,
    /// Artifact version string.
    pub version: String,
    /// Additive intercept.
    pub intercept: f64,
    /// Coefficients over the numeric features, canonical order.
    pub numeric_coefficients: Vec<f64>,
    /// Per-field, per-value additive effects for categorical features.
    pub category_effects: HashMap<String, HashMap<String, f64>>,
}

impl ModelArtifact {
    /// Deserialize a model artifact from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| FareflowError::ArtifactLoad(format!("{}: {}", path.display(), e)))?;

        let artifact: Self = serde_json::from_str(&content)
            .map_err(|e| FareflowError::ArtifactLoad(format!("{}: {}", path.display(), e)))?;

        artifact.check()?;
        Ok(artifact)
    }

    fn check(&self) -> Result<()> {
        if self.numeric_coefficients.len() != NUMERIC_FEATURES {
            return Err(FareflowError::InvalidArtifact(format!(
                "expected {} numeric coefficients, found {}",
                NUMERIC_FEATURES,
                self.numeric_coefficients.len()
            )));
        }
        Ok(())
    }
}

impl Predictor for ModelArtifact {
    fn predict(&self, features: &Features) -> Result<f64> {
        let mut prediction = self.intercept;

        for (value, coefficient) in features.numeric.iter().zip(&self.numeric_coefficients) {
            prediction += value * coefficient;
        }

        for (field, value) in &features.categorical {
            let effects = self.category_effects.get(*field).ok_or_else(|| {
                FareflowError::Prediction(format!("model has no effects for {}", field))
            })?;
            let effect = effects.get(value.as_str()).ok_or_else(|| {
                FareflowError::Prediction(format!("model has no effect for {} = {}", field, value))
            })?;
            prediction += effect;
        }

        if !prediction.is_finite() {
            return Err(FareflowError::Prediction(
                "model produced a non-finite value".to_string(),
            ));
        }

        Ok(prediction)
    }

    fn describe(&self) -> String {
        format!("{} v{}", self.name, self.version)
    }
}

/// Serialized standard-scaler artifact: per-feature mean and scale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerArtifact {
    /// Per-feature means, canonical order.
    pub mean: Vec<f64>,
    /// Per-feature scales (standard deviations), canonical order.
    pub scale: Vec<f64>,
}

impl ScalerArtifact {
    /// Deserialize a scaler artifact from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| FareflowError::ArtifactLoad(format!("{}: {}", path.display(), e)))?;

        let artifact: Self = serde_json::from_str(&content)
            .map_err(|e| FareflowError::ArtifactLoad(format!("{}: {}", path.display(), e)))?;

        artifact.check()?;
        Ok(artifact)
    }

    fn check(&self) -> Result<()> {
        if self.mean.len() != NUMERIC_FEATURES || self.scale.len() != NUMERIC_FEATURES {
            return Err(FareflowError::InvalidArtifact(format!(
                "scaler must carry {} means and scales, found {}/{}",
                NUMERIC_FEATURES,
                self.mean.len(),
                self.scale.len()
            )));
        }
        Ok(())
    }
}

impl Scaler for ScalerArtifact {
    fn transform(&self, numeric: &[f64; NUMERIC_FEATURES]) -> Result<[f64; NUMERIC_FEATURES]> {
        let mut scaled = [0.0; NUMERIC_FEATURES];

        for (i, value) in numeric.iter().enumerate() {
            if self.scale[i] == 0.0 {
                return Err(FareflowError::Scaling(format!(
                    "zero scale for feature index {}",
                    i
                )));
            }
            scaled[i] = (value - self.mean[i]) / self.scale[i];
        }

        Ok(scaled)
    }
}

/// Load the model artifact, degrading to `None` on any failure.
///
/// Single attempt, no retry, no reload.
pub fn load_model(path: &Path) -> Option<Arc<dyn Predictor>> {
    match ModelArtifact::from_file(path) {
        Ok(model) => {
            info!(path = %path.display(), model = %model.describe(), "Model loaded");
            Some(Arc::new(model))
        }
        Err(e) => {
            error!(path = %path.display(), "Failed to load model: {}", e);
            None
        }
    }
}

/// Load the scaler artifact, degrading to `None` on any failure.
pub fn load_scaler(path: &Path) -> Option<Arc<dyn Scaler>> {
    match ScalerArtifact::from_file(path) {
        Ok(scaler) => {
            info!(path = %path.display(), "Scaler loaded");
            Some(Arc::new(scaler))
        }
        Err(e) => {
            warn!(
                path = %path.display(),
                "No scaler loaded, numeric features won't be scaled: {}",
                e
            );
            None
        }
    }
}
