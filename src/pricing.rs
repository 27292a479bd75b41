//! Pricing engine: scaling, inference, and the price formula.
//!
//! Each request is a single stateless transaction: optionally scale the
//! numeric features, obtain a normalized prediction from the model, then
//! blend it with the request's own competitor price and expected duration.

use crate::artifact::{self, Features, Predictor, Scaler};
use crate::config::ArtifactConfig;
use crate::error::{FareflowError, Result};
use crate::request::{CategoryTable, PricingRequest, CATEGORIES};
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

/// Weight applied to the normalized prediction in the price formula.
const PREDICTION_WEIGHT: f64 = 10.0;

/// Advisory bounds band around the competitor price.
const BOUNDS_LOW_FACTOR: f64 = 0.9;
const BOUNDS_HIGH_FACTOR: f64 = 1.1;

/// Advisory low/high price band derived from the competitor price only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceBounds {
    pub low: f64,
    pub high: f64,
}

/// A completed price recommendation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    /// Final recommended price, rounded to 2 decimals.
    pub price_recommended: f64,
    /// Raw normalized model output, rounded to 4 decimals.
    pub predicted_normalized: f64,
    /// Advisory band around the competitor price.
    pub bounds: PriceBounds,
    /// Echo of the allowed-categories table.
    pub categories: CategoryTable,
}

/// Immutable pricing context constructed once at startup and shared across
/// all requests. Holds the loaded artifacts; never mutated afterwards.
pub struct PricingEngine {
    model: Option<Arc<dyn Predictor>>,
    scaler: Option<Arc<dyn Scaler>>,
}

impl PricingEngine {
    /// Build an engine from already-loaded (or absent) artifacts.
    pub fn new(model: Option<Arc<dyn Predictor>>, scaler: Option<Arc<dyn Scaler>>) -> Self {
        Self { model, scaler }
    }

    /// Build an engine by loading artifacts from the configured paths.
    ///
    /// Load failures degrade the engine instead of propagating: a missing
    /// model disables recommendations, a missing scaler disables scaling.
    pub fn from_config(artifacts: &ArtifactConfig) -> Self {
        Self {
            model: artifact::load_model(&artifacts.resolved_model_path()),
            scaler: artifact::load_scaler(&artifacts.resolved_scaler_path()),
        }
    }

    /// Whether the model artifact loaded successfully.
    pub fn model_loaded(&self) -> bool {
        self.model.is_some()
    }

    /// Whether the scaler artifact loaded successfully.
    pub fn scaler_loaded(&self) -> bool {
        self.scaler.is_some()
    }

    /// Produce a price recommendation for an already-validated request.
    ///
    /// Scaling failure is recovered by falling back to the raw numeric
    /// values; inference failure is fatal to the request.
    pub fn recommend(&self, request: &PricingRequest) -> Result<Recommendation> {
        let model = self.model.as_ref().ok_or(FareflowError::ModelNotLoaded)?;

        let raw = request.numeric_features();
        let numeric = match &self.scaler {
            Some(scaler) => match scaler.transform(&raw) {
                Ok(scaled) => scaled,
                Err(e) => {
                    warn!("Scaling failed: {}. Proceeding without scaling.", e);
                    raw
                }
            },
            None => raw,
        };

        let features = Features {
            numeric,
            categorical: [
                ("Time_of_Booking", request.time_of_booking.clone()),
                ("Customer_Loyalty_Status", request.customer_loyalty_status.clone()),
                ("Location_Category", request.location_category.clone()),
                ("Vehicle_Type", request.vehicle_type.clone()),
            ],
        };

        let predicted_norm = model.predict(&features).map_err(|e| match e {
            FareflowError::Prediction(_) => e,
            other => FareflowError::Prediction(other.to_string()),
        })?;

        let base_price = request.competitor_price;
        let hist_cost = request.expected_ride_duration;
        let price_recommended = (base_price + hist_cost) / 2.0 + predicted_norm * PREDICTION_WEIGHT;

        Ok(Recommendation {
            price_recommended: round_to(price_recommended, 2),
            predicted_normalized: round_to(predicted_norm, 4),
            bounds: PriceBounds {
                low: round_to(base_price * BOUNDS_LOW_FACTOR, 2),
                high: round_to(base_price * BOUNDS_HIGH_FACTOR, 2),
            },
            categories: CATEGORIES,
        })
    }
}

/// Round to a fixed number of decimal places.
fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
