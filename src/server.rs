//! HTTP server: router, handlers, and API error mapping.
//!
//! Three routes: `GET /health`, `GET /categories`, and `POST /recommend`.
//! The engine is constructed once at startup and shared immutably across
//! handlers; requests are independent with no cross-request state.

use crate::error::FareflowError;
use crate::pricing::{PricingEngine, Recommendation};
use crate::request::{self, CategoryTable, PricingRequest, CATEGORIES};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use metrics::counter;
use serde::Serialize;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Shared state for API handlers.
#[derive(Clone)]
pub struct AppState {
    /// Pricing engine holding the loaded artifacts.
    pub engine: Arc<PricingEngine>,
}

impl AppState {
    pub fn new(engine: PricingEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}

/// API-level error carrying an HTTP status and a `{"detail": ...}` body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    fn bad_request(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            detail: detail.into(),
        }
    }
}

impl From<FareflowError> for ApiError {
    fn from(e: FareflowError) -> Self {
        let status = if e.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        Self {
            status,
            detail: e.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

#[derive(Debug, Serialize)]
struct HealthReply {
    ok: bool,
}

/// Build the API router around an immutable application state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/categories", get(categories))
        .route("/recommend", post(recommend))
        .layer(TraceLayer::new_for_http())
        // The pricing frontend is served from another origin.
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve the pricing API until a shutdown signal arrives.
pub async fn run_server(bind_addr: SocketAddr, state: AppState) -> crate::error::Result<()> {
    let app = router(state);
    let listener = TcpListener::bind(bind_addr).await?;
    info!(addr = %bind_addr, "Pricing API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| FareflowError::Network(e.to_string()))?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("Shutdown signal received");
}

// API handlers

async fn health(State(state): State<AppState>) -> Json<HealthReply> {
    Json(HealthReply {
        ok: state.engine.model_loaded(),
    })
}

async fn categories() -> Json<CategoryTable> {
    Json(CATEGORIES)
}

async fn recommend(
    State(state): State<AppState>,
    Json(payload): Json<PricingRequest>,
) -> Result<Json<Recommendation>, ApiError> {
    counter!("fareflow_requests_total").increment(1);

    if let Err(errors) = request::validate(&payload) {
        counter!("fareflow_validation_failures_total").increment(1);
        let first = errors.into_iter().next().map(|e| e.message).unwrap_or_default();
        return Err(ApiError::bad_request(first));
    }

    match state.engine.recommend(&payload) {
        Ok(recommendation) => {
            counter!("fareflow_recommendations_total").increment(1);
            info!(
                price_recommended = recommendation.price_recommended,
                predicted_normalized = recommendation.predicted_normalized,
                "Recommendation served"
            );
            Ok(Json(recommendation))
        }
        Err(e) => {
            counter!("fareflow_failed_requests_total").increment(1);
            error!("Recommendation failed: {}", e);
            Err(ApiError::from(e))
        }
    }
}
