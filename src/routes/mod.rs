//! HTTP route handlers for the Medienwald API.
//!
//! - `scan`: rebuilds the media index from a list of roots
//! - `browse`: folder view and the flat legacy listing
//! - `stream`: range-aware delivery of indexed files
//! - `health`: health, readiness, metrics and version endpoints

pub mod browse;
pub mod health;
pub mod scan;
pub mod stream;

use axum::extract::DefaultBodyLimit;
use axum::http::header::{ACCEPT_RANGES, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::middleware::from_fn_with_state;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::compression::predicate::{DefaultPredicate, Predicate};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::middleware;
use crate::state::AppState;

/// Compression minus media bodies: they are already compressed and range
/// responses must keep their exact Content-Length.
#[derive(Clone)]
struct NoMediaDefault(DefaultPredicate);

impl Predicate for NoMediaDefault {
    fn should_compress<B: axum::body::HttpBody>(&self, res: &axum::http::Response<B>) -> bool {
        if res.status() == StatusCode::PARTIAL_CONTENT || res.headers().contains_key(ACCEPT_RANGES) {
            return false;
        }
        if let Some(s) = res.headers().get(CONTENT_TYPE).and_then(|ct| ct.to_str().ok()) {
            if s.starts_with("video/") || s.starts_with("audio/") {
                return false;
            }
        }
        self.0.should_compress(res)
    }
}

/// Builds the complete application router including middleware.
pub fn build_router(state: AppState) -> Router {
    let compression = CompressionLayer::new().compress_when(NoMediaDefault(DefaultPredicate::new()));
    let cfg_arc = state.config.clone();
    let permissive_cors = cfg!(debug_assertions) || state.config.server.permissive_cors;

    let app = Router::new()
        .route("/healthz", get(health::healthz))
        .route("/readyz", get(health::readyz))
        .route("/metrics", get(health::metrics))
        .route("/metrics/prometheus", get(health::metrics_prometheus))
        .route("/version", get(health::version))
        .route("/scan", post(scan::scan))
        .route("/browse", get(browse::browse))
        .route("/media", get(browse::list_media))
        .route("/stream/{id}", get(stream::stream_media))
        .with_state(state)
        // Scan bodies are short lists of paths
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(compression)
        .layer(TraceLayer::new_for_http())
        .layer(from_fn_with_state(cfg_arc, middleware::security_headers::security_headers_middleware));

    // CORS: permissive in debug builds (UI served from another origin), otherwise only via config
    if permissive_cors {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}
