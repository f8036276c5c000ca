use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::json;

// Health check endpoint - lightweight
pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

// Readiness probe: the index must be readable within a short timeout (a stuck writer would block it)
pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    match tokio::time::timeout(std::time::Duration::from_secs(5), state.index.snapshot()).await {
        Ok(snapshot) => (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "generation": snapshot.generation(),
                "records": snapshot.len(),
                "built_at": snapshot.built_at().map(|t| t.to_rfc3339()),
            })),
        )
            .into_response(),
        Err(_) => (StatusCode::SERVICE_UNAVAILABLE, "not ready: timeout").into_response(),
    }
}

// Metrics endpoint: returns JSON snapshot
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.metrics.get_snapshot();
    Json(snapshot)
}

// Prometheus-compatible text exposition format
pub async fn metrics_prometheus(State(state): State<AppState>) -> impl IntoResponse {
    let m = state.metrics.get_snapshot();
    let body = format!(
        "# HELP medienwald_scans_started Total scans started\n# TYPE medienwald_scans_started counter\nmedienwald_scans_started {}\n\
# HELP medienwald_scans_completed Total scans completed\n# TYPE medienwald_scans_completed counter\nmedienwald_scans_completed {}\n\
# HELP medienwald_scans_failed Total scans failed\n# TYPE medienwald_scans_failed counter\nmedienwald_scans_failed {}\n\
# HELP medienwald_files_indexed Files in the current index\n# TYPE medienwald_files_indexed gauge\nmedienwald_files_indexed {}\n\
# HELP medienwald_files_dropped Media files dropped because they could not be stat'ed\n# TYPE medienwald_files_dropped counter\nmedienwald_files_dropped {}\n\
# HELP medienwald_roots_skipped Scan roots skipped\n# TYPE medienwald_roots_skipped counter\nmedienwald_roots_skipped {}\n\
# HELP medienwald_browse_requests Browse requests\n# TYPE medienwald_browse_requests counter\nmedienwald_browse_requests {}\n\
# HELP medienwald_streams_served Streams served\n# TYPE medienwald_streams_served counter\nmedienwald_streams_served {}\n\
# HELP medienwald_bytes_streamed Bytes announced to streaming clients\n# TYPE medienwald_bytes_streamed counter\nmedienwald_bytes_streamed {}\n\
# HELP medienwald_uptime_seconds Uptime seconds\n# TYPE medienwald_uptime_seconds gauge\nmedienwald_uptime_seconds {}\n",
        m.scans_started,
        m.scans_completed,
        m.scans_failed,
        m.files_indexed,
        m.files_dropped,
        m.roots_skipped,
        m.browse_requests,
        m.streams_served,
        m.bytes_streamed,
        m.uptime_seconds,
    );
    ([(header::CONTENT_TYPE, "text/plain; version=0.0.4")], body)
}

// Version/Build info endpoint (JSON)
pub async fn version() -> impl IntoResponse {
    let body = json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "package": {
            "description": env!("CARGO_PKG_DESCRIPTION"),
            "authors": env!("CARGO_PKG_AUTHORS"),
            "license": env!("CARGO_PKG_LICENSE"),
        },
        "build": {
            "profile": if cfg!(debug_assertions) { "debug" } else { "release" },
            "os": std::env::consts::OS,
            "arch": std::env::consts::ARCH,
        }
    });
    (StatusCode::OK, Json(body))
}
