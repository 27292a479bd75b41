//! Fareflow - a dynamic ride-pricing recommendation service.
//!
//! Fareflow loads a pre-trained regression model and a numeric scaler from
//! disk at startup, validates incoming ride-pricing payloads, and answers
//! with a recommended price that blends the model's normalized prediction
//! with the request's own competitor price and expected duration.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                        Fareflow                          │
//! ├──────────────────────────────────────────────────────────┤
//! │  HTTP API: /health | /categories | /recommend            │
//! ├──────────────────────────────────────────────────────────┤
//! │  Pricing Engine: validate | scale | predict | formula    │
//! ├──────────────────────────────────────────────────────────┤
//! │  Artifacts: regression model | numeric scaler (on disk)  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Artifacts are loaded exactly once; absence degrades the service instead
//! of crashing it. A missing model makes `/recommend` answer with a server
//! error until restart, a missing scaler skips feature scaling.
//!
//! # Quick Start
//!
//! ```no_run
//! use fareflow::config::FareflowConfig;
//!
//! #[tokio::main]
//! async fn main() -> fareflow::Result<()> {
//!     let config = FareflowConfig::development();
//!     fareflow::run(config).await
//! }
//! ```

pub mod artifact;
pub mod config;
pub mod error;
pub mod observability;
pub mod pricing;
pub mod request;
pub mod server;

// Re-exports
pub use error::{FareflowError, Result};

use config::FareflowConfig;
use pricing::PricingEngine;
use server::AppState;
use tracing::{error, info, warn};

/// Run the fareflow service with the given configuration.
pub async fn run(config: FareflowConfig) -> Result<()> {
    observability::init(&config.observability)?;

    info!("Starting fareflow on {}", config.server.bind_addr);

    // Single load attempt; absence is a permanent degraded state.
    let engine = PricingEngine::from_config(&config.artifacts);
    if !engine.model_loaded() {
        warn!("Model absent: every /recommend will fail until restart with a valid artifact");
    }
    if !engine.scaler_loaded() {
        warn!("Scaler absent: numeric features will be used unscaled");
    }

    if config.observability.metrics_enabled {
        let obs_config = config.observability.clone();
        tokio::spawn(async move {
            if let Err(e) = observability::run_metrics_server(obs_config).await {
                error!("Metrics server error: {}", e);
            }
        });
    }

    server::run_server(config.server.bind_addr, AppState::new(engine)).await
}
