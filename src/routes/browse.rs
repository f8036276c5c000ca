use axum::{
    extract::{Query, State},
    Json,
};

use crate::{
    error::AppResult,
    hierarchy::Hierarchy,
    paths,
    state::AppState,
    types::{BrowseQuery, BrowseResponse, MediaKind, MediaListResponse, MediaQuery, MediaRecord},
};

/// `GET /browse`: immediate children of `path` (roots when empty).
pub async fn browse(
    State(state): State<AppState>,
    Query(q): Query<BrowseQuery>,
) -> AppResult<Json<BrowseResponse>> {
    state.metrics.inc_browse();
    let path = q.path.as_deref().map(paths::normalize).unwrap_or_default();
    let kind = MediaKind::parse_filter(q.kind.as_deref());
    let snapshot = state.index.snapshot().await;

    // O(index) per folder; keep it off the async workers
    let prefix = path.clone();
    let items = tokio::task::spawn_blocking(move || Hierarchy::new(&snapshot, kind).list(&prefix)).await?;

    Ok(Json(BrowseResponse { breadcrumbs: paths::breadcrumbs(&path), path, items }))
}

/// `GET /media`: flat listing by exact directory and/or type.
pub async fn list_media(
    State(state): State<AppState>,
    Query(q): Query<MediaQuery>,
) -> Json<MediaListResponse> {
    let folder = q.folder.as_deref().filter(|f| !f.is_empty()).map(paths::normalize);
    let kind = MediaKind::parse_filter(q.kind.as_deref());
    let snapshot = state.index.snapshot().await;

    let files: Vec<MediaRecord> = snapshot
        .filtered(kind)
        .into_iter()
        .filter(|r| folder.as_deref().map_or(true, |f| r.directory == f))
        .cloned()
        .collect();
    Json(MediaListResponse { count: files.len(), files })
}
