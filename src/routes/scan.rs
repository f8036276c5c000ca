use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::info;

use crate::{
    error::{validation, AppError, AppResult},
    scanner,
    state::AppState,
    types::ScanResponse,
};

/// `POST /scan`: rediscovers all media under the given roots and replaces the index.
pub async fn scan(
    State(state): State<AppState>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> AppResult<Json<ScanResponse>> {
    let Json(body) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let roots = validation::scan_paths(&body)?;

    // One scan at a time; a queued scan runs after the current one has swapped its index in.
    let _scan_guard = state.scan_lock.lock().await;
    state.metrics.inc_scans_started();
    info!("Scan started for {} root(s): {:?}", roots.len(), roots);
    let started = Instant::now();

    // Stops the blocking walkers if the request is dropped before it completes.
    let cancel = state.shutdown.child_token();
    let _abort_on_drop = cancel.clone().drop_guard();

    let outcome = match scanner::run_scan(roots, &state.scan_settings, cancel).await {
        Ok(outcome) => outcome,
        Err(e) => {
            state.metrics.inc_scans_failed();
            return Err(AppError::Scanner(format!("{}", e)));
        }
    };

    let snapshot = state.index.rebuild(outcome.records).await;
    state.metrics.record_scan(&outcome.summary, snapshot.len());
    let s = &outcome.summary;
    info!(
        "Scan finished in {:?}: {} videos, {} audio files, {} dropped, {} root(s) skipped",
        started.elapsed(),
        s.videos,
        s.audios,
        s.files_dropped,
        s.roots_skipped
    );

    Ok(Json(ScanResponse { success: true, count: snapshot.len(), files: snapshot.records().to_vec() }))
}
