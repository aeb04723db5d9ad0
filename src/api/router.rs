use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::api::{self, AppState};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/api/templates", get(api::templates::list_templates))
        .route("/api/templates/:id", get(api::templates::get_template))
        .route(
            "/api/templates/:id/preview",
            post(api::templates::preview_template),
        )
        .route("/api/broadcasts", post(api::broadcasts::send_broadcast))
        .route(
            "/api/broadcasts/template",
            post(api::broadcasts::send_template_broadcast),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn root_handler() -> &'static str {
    "Mailcast Broadcast Service"
}

async fn health_handler() -> &'static str {
    "OK"
}
