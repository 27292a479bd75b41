//! Artifact-to-recommendation integration tests.
//!
//! Exercises the on-disk artifact formats and the engine built from them:
//! loading, scaling, degraded states for missing or corrupt files.

use fareflow::artifact::{load_model, load_scaler, ModelArtifact, ScalerArtifact};
use fareflow::config::ArtifactConfig;
use fareflow::error::FareflowError;
use fareflow::pricing::PricingEngine;
use fareflow::request::{PricingRequest, NUMERIC_FEATURES};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn constant_model(value: f64) -> ModelArtifact {
    let mut effects = HashMap::new();
    for (field, values) in [
        ("Time_of_Booking", fareflow::request::TIME_OF_BOOKING),
        ("Customer_Loyalty_Status", fareflow::request::CUSTOMER_LOYALTY_STATUS),
        ("Location_Category", fareflow::request::LOCATION_CATEGORY),
        ("Vehicle_Type", fareflow::request::VEHICLE_TYPE),
    ] {
        effects.insert(
            field.to_string(),
            values.iter().map(|v| (v.to_string(), 0.0)).collect(),
        );
    }

    ModelArtifact {
        name: "pricing_model".to_string(),
        version: "1".to_string(),
        intercept: value,
        numeric_coefficients: vec![0.0; NUMERIC_FEATURES],
        category_effects: effects,
    }
}

fn identity_scaler() -> ScalerArtifact {
    ScalerArtifact {
        mean: vec![0.0; NUMERIC_FEATURES],
        scale: vec![1.0; NUMERIC_FEATURES],
    }
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) {
    fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

fn request() -> PricingRequest {
    PricingRequest {
        number_of_riders: 50.0,
        number_of_drivers: 25.0,
        location_category: "Urban".to_string(),
        customer_loyalty_status: "Gold".to_string(),
        number_of_past_rides: 12.0,
        average_ratings: 4.2,
        time_of_booking: "Evening".to_string(),
        vehicle_type: "Premium".to_string(),
        expected_ride_duration: 20.0,
        competitor_price: 100.0,
    }
}

#[test]
fn test_engine_from_artifacts_on_disk() {
    let dir = TempDir::new().unwrap();
    let model_path = dir.path().join("pricing_model.json");
    let scaler_path = dir.path().join("numeric_scaler.json");

    write_json(&model_path, &constant_model(0.5));
    write_json(&scaler_path, &identity_scaler());

    let engine = PricingEngine::from_config(&ArtifactConfig {
        model_path,
        scaler_path,
    });

    assert!(engine.model_loaded());
    assert!(engine.scaler_loaded());

    let rec = engine.recommend(&request()).unwrap();
    assert_eq!(rec.price_recommended, 65.0);
    assert_eq!(rec.bounds.low, 90.0);
    assert_eq!(rec.bounds.high, 110.0);
}

#[test]
fn test_scaling_feeds_normalized_features_to_the_model() {
    // Model output depends only on the competitor-price feature; a scaler
    // that halves it must halve the prediction.
    let mut model = constant_model(0.0);
    model.numeric_coefficients = vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.005];

    let scaler = ScalerArtifact {
        mean: vec![0.0; NUMERIC_FEATURES],
        scale: vec![2.0; NUMERIC_FEATURES],
    };

    let dir = TempDir::new().unwrap();
    let model_path = dir.path().join("model.json");
    let scaler_path = dir.path().join("scaler.json");
    write_json(&model_path, &model);
    write_json(&scaler_path, &scaler);

    let unscaled = PricingEngine::new(load_model(&model_path), None);
    let scaled = PricingEngine::new(load_model(&model_path), load_scaler(&scaler_path));

    // Raw: 100 * 0.005 = 0.5 -> price 65.0. Scaled: 50 * 0.005 = 0.25 -> 62.5.
    assert_eq!(unscaled.recommend(&request()).unwrap().price_recommended, 65.0);
    assert_eq!(scaled.recommend(&request()).unwrap().price_recommended, 62.5);
}

#[test]
fn test_missing_model_is_a_permanent_degraded_state() {
    let dir = TempDir::new().unwrap();
    let engine = PricingEngine::from_config(&ArtifactConfig {
        model_path: dir.path().join("missing_model.json"),
        scaler_path: dir.path().join("missing_scaler.json"),
    });

    assert!(!engine.model_loaded());
    assert!(!engine.scaler_loaded());

    for _ in 0..3 {
        let err = engine.recommend(&request()).unwrap_err();
        assert!(matches!(err, FareflowError::ModelNotLoaded));
    }
}

#[test]
fn test_corrupt_scaler_degrades_but_model_still_serves() {
    let dir = TempDir::new().unwrap();
    let model_path = dir.path().join("model.json");
    let scaler_path = dir.path().join("scaler.json");

    write_json(&model_path, &constant_model(0.5));
    fs::write(&scaler_path, "definitely not json").unwrap();

    let engine = PricingEngine::from_config(&ArtifactConfig {
        model_path,
        scaler_path,
    });

    assert!(engine.model_loaded());
    assert!(!engine.scaler_loaded());
    assert_eq!(engine.recommend(&request()).unwrap().price_recommended, 65.0);
}

#[test]
fn test_corrupt_model_disables_recommendations() {
    let dir = TempDir::new().unwrap();
    let model_path = dir.path().join("model.json");
    fs::write(&model_path, "{\"intercept\": \"broken\"}").unwrap();

    let engine = PricingEngine::new(load_model(&model_path), None);
    assert!(!engine.model_loaded());
}

#[test]
fn test_model_with_wrong_coefficient_count_is_absent() {
    let dir = TempDir::new().unwrap();
    let model_path = dir.path().join("model.json");

    let mut model = constant_model(0.5);
    model.numeric_coefficients = vec![0.0; 2];
    write_json(&model_path, &model);

    assert!(load_model(&model_path).is_none());
}
