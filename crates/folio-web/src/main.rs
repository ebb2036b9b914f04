use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use folio_core::cascade::Orchestrator;
use folio_core::config::{builtin, load_config};
use tokio::sync::Semaphore;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing_subscriber::EnvFilter;

mod handlers;
mod models;
mod state;
mod upload;

use state::AppState;

/// Upload limit when `FOLIO_MAX_UPLOAD_BYTES` is unset (16 MiB).
const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Room for multipart boundaries and the small form fields on top of the file.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

const DEFAULT_ADDR: &str = "0.0.0.0:5000";

/// Extractions allowed to run at once when `FOLIO_MAX_CONCURRENT_EXTRACTIONS` is unset.
const DEFAULT_MAX_CONCURRENT_EXTRACTIONS: usize = 4;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = match std::env::var("FOLIO_CONFIG") {
        Ok(path) => load_config(Path::new(&path))
            .with_context(|| format!("loading FOLIO_CONFIG={path}"))?,
        Err(_) => builtin::load_preset("default")?,
    };
    let max_upload_bytes = match std::env::var("FOLIO_MAX_UPLOAD_BYTES") {
        Ok(raw) => raw
            .trim()
            .parse::<usize>()
            .with_context(|| format!("FOLIO_MAX_UPLOAD_BYTES must be a byte count, got '{raw}'"))?,
        Err(_) => DEFAULT_MAX_UPLOAD_BYTES,
    };
    let max_concurrent = match std::env::var("FOLIO_MAX_CONCURRENT_EXTRACTIONS") {
        Ok(raw) => raw
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
            .with_context(|| format!("FOLIO_MAX_CONCURRENT_EXTRACTIONS must be a positive count, got '{raw}'"))?,
        Err(_) => DEFAULT_MAX_CONCURRENT_EXTRACTIONS,
    };
    let cors = cors_layer(std::env::var("FOLIO_CORS_ORIGINS").ok().as_deref())?;

    let orchestrator = Orchestrator::new(config)?;
    for backend in orchestrator.backends() {
        if !backend.is_available() {
            tracing::warn!(backend = backend.backend_name(), "backend unavailable, it will fail over");
        }
    }

    let state = Arc::new(AppState {
        orchestrator,
        max_upload_bytes,
        extraction_slots: Arc::new(Semaphore::new(max_concurrent)),
    });
    let app = router(state, cors);

    let addr: SocketAddr = std::env::var("FOLIO_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()
        .context("FOLIO_ADDR must be host:port")?;
    tracing::info!(%addr, max_upload_bytes, max_concurrent, "listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

pub(crate) fn router(state: Arc<AppState>, cors: CorsLayer) -> Router {
    let body_limit = DefaultBodyLimit::max(state.max_upload_bytes + MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .route("/", get(handlers::health::health))
        .route("/extract-text", post(handlers::extract::extract_text))
        .route(
            "/extract-text-advanced",
            post(handlers::advanced::extract_text_advanced),
        )
        .layer(body_limit)
        .layer(cors)
        .with_state(state)
}

/// Any origin when unset or `*`, otherwise a comma-separated allow list.
pub(crate) fn cors_layer(origins: Option<&str>) -> anyhow::Result<CorsLayer> {
    let origins = match origins.map(str::trim) {
        None | Some("") | Some("*") => return Ok(CorsLayer::permissive()),
        Some(list) => list,
    };

    let allowed = origins
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(|o| HeaderValue::from_str(o).with_context(|| format!("invalid CORS origin '{o}'")))
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}
