mod api;
mod config;
mod storage;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::http::HeaderValue;
use axum::{extract::State, response::Html, routing::get, Router};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing_subscriber::EnvFilter;

use config::Config;
use storage::Storage;

const CACHE_IMMUTABLE: &str = "public, max-age=31536000, immutable";

const FALLBACK_INDEX: &str = r#"<!DOCTYPE html>
<html>
<head><title>Star Map</title></head>
<body>
<h1>Star Map</h1>
<p>Frontend not built yet. The marker API is available at <a href="/api/points">/api/points</a>.</p>
</body>
</html>"#;

/// Build a cache-controlled static file router.
///
/// Separated so tests can exercise the caching layer with arbitrary directories.
fn cached_static_router(dir: &Path, cache_header: &'static str) -> Router {
    let layer = SetResponseHeaderLayer::overriding(
        axum::http::header::CACHE_CONTROL,
        HeaderValue::from_static(cache_header),
    );
    Router::new()
        .fallback_service(ServeDir::new(dir))
        .layer(layer)
}

/// Build the full application router.
fn build_app(storage: Arc<Storage>, dist_dir: &Path) -> Router {
    let static_files = Router::new()
        .nest("/dist", cached_static_router(dist_dir, CACHE_IMMUTABLE))
        .nest(
            "/assets",
            cached_static_router(&dist_dir.join("assets"), CACHE_IMMUTABLE),
        );

    let index = Router::new()
        .route("/", get(serve_index))
        .with_state(Arc::new(dist_dir.join("index.html")));

    api::router(storage)
        .merge(index)
        .merge(static_files)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}

async fn serve_index(State(index_path): State<Arc<PathBuf>>) -> Html<String> {
    // Serve the built frontend, or a placeholder before the first build
    match tokio::fs::read_to_string(index_path.as_path()).await {
        Ok(html) => Html(html),
        Err(_) => Html(FALLBACK_INDEX.to_string()),
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();

    if let Some(parent) = config.db_path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            tracing::error!(path = %parent.display(), error = %e, "failed to create database directory");
            std::process::exit(1);
        }
    }
    let storage = match Storage::open(&config.db_path) {
        Ok(storage) => storage,
        Err(e) => {
            tracing::error!(path = %config.db_path.display(), error = %e, "failed to open database");
            std::process::exit(1);
        }
    };
    match storage.count_markers() {
        Ok(count) => tracing::info!(markers = count, "loaded marker store"),
        Err(e) => tracing::warn!(error = %e, "could not count stored markers"),
    }

    let app = build_app(storage, &config.dist_dir);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };
    tracing::info!("Server running at http://localhost:{}", config.port);

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server stopped");
        std::process::exit(1);
    }
}
