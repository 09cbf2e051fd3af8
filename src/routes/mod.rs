pub mod booking_routes;

use axum::{response::Json, routing::get, Router};
use serde_json::json;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::middleware::cors::cors_middleware;
use crate::state::AppState;

const MAX_CONCURRENT_REQUESTS: usize = 256;

/// Router completo del servicio de reservas
pub fn create_app(state: AppState) -> Router {
    let cors = cors_middleware(&state.config.cors_origins);

    Router::new()
        .route("/health", get(health))
        .nest("/api/booking", booking_routes::create_booking_router())
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(ConcurrencyLimitLayer::new(MAX_CONCURRENT_REQUESTS))
        .with_state(state)
}

/// Endpoint de salud
async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "service": "parador-reservas",
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
