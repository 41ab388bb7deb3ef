pub mod extract;
pub mod routes;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use recipe_app::AppContext;
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builds the full HTTP surface over `ctx`.
pub fn router(ctx: AppContext, cors_origin: &str) -> Router {
    let mut cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(Duration::from_secs(60 * 60));
    match cors_origin.parse::<HeaderValue>() {
        Ok(origin) => cors = cors.allow_origin(origin),
        Err(e) => tracing::warn!("Ignoring invalid CORS origin {cors_origin}: {e}"),
    }

    routes::router()
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}
