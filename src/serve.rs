//! Local preview server (enabled with `--features serve`).
//!
//! Serves a generated site from the output directory and exposes the CMS
//! configuration descriptor at `GET /api/admin-config`, the same endpoint
//! shape the production host provides, so the admin panel can be exercised
//! against a local build.

use crate::admin::{self, AdminConfig};
use crate::config::SiteConfig;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

/// Shared application state
#[derive(Clone)]
struct AppState {
    descriptor: Arc<AdminConfig>,
}

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// GET /api/admin-config - CMS configuration descriptor
///
/// The descriptor is built once at startup from the site config; content
/// edits never change it, so there is nothing to recompute per request.
async fn admin_config(State(state): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, Json(state.descriptor.as_ref().clone()))
}

/// Build the router: API routes nested under `/api`, everything else
/// served from the generated output directory.
pub fn app(config: &SiteConfig, dist: &Path) -> Router {
    let state = AppState {
        descriptor: Arc::new(admin::admin_config(config)),
    };

    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/admin-config", get(admin_config))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .fallback_service(ServeDir::new(dist))
        .layer(CorsLayer::permissive())
}

/// Bind and run the preview server until interrupted.
pub async fn run(config: &SiteConfig, dist: PathBuf, port: u16) -> Result<(), std::io::Error> {
    let router = app(config, &dist);
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    println!("Preview server running on http://localhost:{}", port);
    println!("  Site:  http://localhost:{}/", port);
    println!("  Admin: http://localhost:{}/admin/", port);
    println!("  API:   http://localhost:{}/api/admin-config", port);

    axum::serve(listener, router).await
}
