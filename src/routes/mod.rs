use axum::{http::StatusCode, middleware, routing::get, Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    config::SearchConfig,
    middleware::{make_span_with_request_id, request_id_middleware},
    services::providers::MetadataProvider,
};

pub mod series;
pub mod titles;
pub mod trending;

/// Shared state handed to every handler
pub struct AppState {
    pub provider: Arc<dyn MetadataProvider>,
    pub search: SearchConfig,
}

impl AppState {
    pub fn new(provider: Arc<dyn MetadataProvider>, search: SearchConfig) -> Self {
        Self { provider, search }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/titles/search", get(titles::search))
        .route("/titles/:kind/:id", get(titles::details))
        .route("/series/:id/episodes", get(series::episodes))
        .route("/trending/:kind", get(trending::trending))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
