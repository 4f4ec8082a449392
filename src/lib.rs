use axum::{http::StatusCode, response::IntoResponse, routing::get, Router};
use sea_orm::DatabaseConnection;
use utoipa::OpenApi;
// Conditionally import SwaggerUi only when needed (not test)
#[cfg(not(test))]
use utoipa_swagger_ui::SwaggerUi;
// Conditionally import CORS only when needed (not test)
#[cfg(not(test))]
use tower_http::cors::{Any, CorsLayer};
// Conditionally import Governor only when needed (not test)
#[cfg(not(test))]
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};
#[cfg(not(test))]
use std::num::NonZeroU32;
#[cfg(not(test))]
use std::sync::Arc;

pub mod db;
pub mod entities;
pub mod error;
pub mod routes;
pub mod services;

/// Shared request context: the process-wide database handle plus the PIX key
/// configured for this deployment, if any.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub pix_key: Option<String>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, pix_key: Option<String>) -> Self {
        Self { db, pix_key }
    }

    /// State for a real deployment: the PIX key comes from the `PIX_KEY`
    /// environment variable.
    pub fn from_env(db: DatabaseConnection) -> Self {
        let pix_key = std::env::var("PIX_KEY").ok();
        Self::new(db, pix_key)
    }
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = String)
    )
)]
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "Service is healthy")
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bloco Praieira API",
        version = "0.1.0"
    ),
    paths(
        routes::donations::list_donations,
        routes::donations::create_donation,
        routes::members::list_members,
        routes::members::create_member,
        health_check
    ),
    components(schemas(
        routes::donations::DonationsResponse,
        services::donations::CreateDonation,
        services::members::CreateMember,
        entities::donation::Model,
        entities::donation::DonationStatus,
        entities::member::Model,
        entities::member::Instrument
    ))
)]
struct ApiDoc;

/// Create the application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // Build our API documentation (needed regardless for ApiDoc::openapi())
    let api_doc = ApiDoc::openapi();

    // --- Define API routes separately ---
    let api_routes = Router::new()
        .route(
            "/donations",
            get(routes::donations::list_donations).post(routes::donations::create_donation),
        )
        .route(
            "/members",
            get(routes::members::list_members).post(routes::members::create_member),
        )
        .route("/health", get(health_check))
        .with_state(state);

    // --- Conditionally apply layers and Swagger UI only when NOT running tests ---
    #[cfg(not(test))]
    let (docs_router, rate_limited_api_routes) = {
        // Create Swagger UI router
        let docs_router = SwaggerUi::new("/docs").url("/api-doc/openapi.json", api_doc);

        // Configure Rate Limiting
        let governor_conf = Arc::new(
            GovernorConfigBuilder::default()
                .key_extractor(SmartIpKeyExtractor)
                .period(std::time::Duration::from_secs(60))
                .burst_size(NonZeroU32::new(10).unwrap().into())
                .finish()
                .unwrap(),
        );
        // Apply Governor layer ONLY to the api_routes defined above
        let rate_limited_api_routes = api_routes.layer(GovernorLayer {
            config: governor_conf,
        });

        (docs_router, rate_limited_api_routes)
    };

    // For test builds, use the original api_routes and an empty router for docs
    #[cfg(test)]
    let (docs_router, rate_limited_api_routes) = {
        let _ = api_doc;
        (Router::new(), api_routes)
    };

    // --- Build the final application router ---
    let mut app = Router::new()
        .merge(rate_limited_api_routes)
        .merge(docs_router);

    // --- Apply CORS to the whole app (both API and docs) if needed ---
    #[cfg(not(test))]
    {
        app = app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    // Return the final router
    app
}
