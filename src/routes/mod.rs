use axum::{
    http::StatusCode,
    middleware::{from_fn, from_fn_with_state},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    auth::SessionVerifier,
    db::repositories::{ContentRepository, PreferenceRepository, StatusRepository},
    middleware::{
        auth::require_auth,
        request_id::{make_span_with_request_id, request_id_middleware},
    },
    services::MetadataProvider,
};

pub mod content;
pub mod person;
pub mod platforms;
pub mod preferences;
pub mod search;

/// Shared handles for every request
pub struct AppState {
    pub metadata: Arc<dyn MetadataProvider>,
    pub sessions: Arc<dyn SessionVerifier>,
    pub content: Arc<dyn ContentRepository>,
    pub statuses: Arc<dyn StatusRepository>,
    pub preferences: Arc<dyn PreferenceRepository>,
    /// Region used for watch-provider lookups
    pub watch_region: String,
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes(state))
        .layer(
            ServiceBuilder::new()
                .layer(from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
}

/// API routes under /api/v1, all behind session auth
fn api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/search", get(search::search))
        .route("/content/:id", get(content::get_content))
        .route(
            "/content/:id/status",
            get(content::get_status)
                .post(content::set_status)
                .delete(content::delete_status),
        )
        .route("/person/:id", get(person::get_person))
        .route("/platforms", get(platforms::list_platforms))
        .route(
            "/user/status-preferences",
            get(preferences::get_preferences)
                .post(preferences::save_preference)
                .delete(preferences::reset_preferences),
        )
        .route_layer(from_fn_with_state(state.clone(), require_auth))
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
