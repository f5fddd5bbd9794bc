pub mod api;
pub mod config;
pub mod infrastructure;
pub mod services;

use crate::config::AppConfig;
use crate::services::extractor::ReportExtractor;
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::handlers::extract::extract_text,
        api::handlers::health::health_check,
    ),
    components(
        schemas(
            api::handlers::extract::ResponseEntry,
            api::handlers::health::HealthResponse,
        )
    ),
    tags(
        (name = "extraction", description = "Report extraction endpoints"),
        (name = "system", description = "Service health")
    )
)]
pub struct ApiDoc;

#[derive(Clone)]
pub struct AppState {
    pub extractor: Arc<dyn ReportExtractor>,
    pub config: AppConfig,
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route(
            "/api/extract-text",
            post(api::handlers::extract::extract_text),
        )
        .route("/health", get(api::handlers::health::health_check))
        // Frontend may be served from anywhere: mirror origin, allow all
        // methods/headers, credentials permitted.
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}
