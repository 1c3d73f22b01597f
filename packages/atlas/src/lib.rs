pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod links;
pub mod models;
pub mod repository;
pub mod routes;
pub mod service;
pub mod state;

use std::time::Duration;

use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::warn;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

use crate::config::CorsConfig;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Quantum Computing Atlas API",
        version = "1.0.0",
        description = "Catalog of quantum algorithms, their implementations and the \
                       concrete solutions of quantum computing patterns"
    ),
    tags(
        (name = "Concrete Solutions", description = "Concrete solutions of patterns and their files"),
        (name = "Algorithms", description = "Algorithm CRUD and links to publications and application areas"),
        (name = "Implementations", description = "Implementations of algorithms"),
        (name = "Implementation Packages", description = "Deliverable packages of implementations"),
        (name = "Publications", description = "Publication CRUD operations"),
        (name = "Application Areas", description = "Application area CRUD operations"),
        (name = "Computing Resource Types", description = "Computing resource type CRUD operations"),
        (name = "Providers", description = "Quantum hardware providers and their QPUs"),
    ),
)]
struct ApiDoc;

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(config.max_age));

    if config.allow_origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allow_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/api", routes::api_routes(&state.config))
        .split_for_parts();

    let cors = cors_layer(&state.config.server.cors);

    router
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api.clone()))
        .merge(Scalar::with_url("/scalar", api))
        .layer(cors)
}
