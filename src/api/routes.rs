use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        // Catalog
        .route("/catalog", get(handlers::get_catalog))
        .route("/catalog/featured", get(handlers::get_featured))
        .route("/catalog/search", get(handlers::search_catalog))
        .route("/genres", get(handlers::get_genres))
        // User selections
        .route("/preferences", get(handlers::get_preferences))
        .route("/preferences/toggle", post(handlers::toggle_preference))
        .route("/strategies", get(handlers::get_strategies))
        .route("/strategy", put(handlers::select_strategy))
        // Results
        .route("/recommendations", get(handlers::get_recommendations))
        .route("/engine", get(handlers::get_engine_status))
}
