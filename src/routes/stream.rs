use std::io::SeekFrom;

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::Response,
};
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio_util::io::ReaderStream;
use tracing::debug;

use crate::{
    error::{AppError, AppResult, OptionExt},
    state::AppState,
};

/// Inclusive byte range within a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
}

impl ByteRange {
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeRequest {
    Partial(ByteRange),
    /// Well-formed, but starts at or past the end of the file.
    Unsatisfiable,
    /// Not a single `bytes=` range; served as a full response.
    Ignored,
}

/// Parses a single-range `Range` header (`bytes=a-b`, `bytes=a-`, `bytes=-n`).
pub fn parse_range_header(value: &str, file_size: u64) -> RangeRequest {
    let Some(spec) = value.trim().strip_prefix("bytes=") else {
        return RangeRequest::Ignored;
    };
    if spec.contains(',') {
        return RangeRequest::Ignored;
    }
    let Some((first, last)) = spec.trim().split_once('-') else {
        return RangeRequest::Ignored;
    };
    let (first, last) = (first.trim(), last.trim());

    if first.is_empty() {
        // Suffix range: last n bytes
        let Ok(n) = last.parse::<u64>() else {
            return RangeRequest::Ignored;
        };
        if n == 0 || file_size == 0 {
            return RangeRequest::Unsatisfiable;
        }
        return RangeRequest::Partial(ByteRange { start: file_size.saturating_sub(n), end: file_size - 1 });
    }

    let Ok(start) = first.parse::<u64>() else {
        return RangeRequest::Ignored;
    };
    let end = if last.is_empty() {
        None
    } else {
        match last.parse::<u64>() {
            Ok(end) if end >= start => Some(end),
            _ => return RangeRequest::Ignored,
        }
    };
    if start >= file_size {
        return RangeRequest::Unsatisfiable;
    }
    let end = end.map_or(file_size - 1, |e| e.min(file_size - 1));
    RangeRequest::Partial(ByteRange { start, end })
}

/// `GET /stream/{id}`: serves an indexed file, honouring a single byte range.
pub async fn stream_media(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> AppResult<Response> {
    let snapshot = state.index.snapshot().await;
    let record = snapshot.get_by_id(&id).ok_or_not_found("Media file")?;
    let file_path = std::path::PathBuf::from(&record.path);

    // io::ErrorKind::NotFound maps to 404
    let mut file = tokio::fs::File::open(&file_path).await?;
    let file_size = file.metadata().await?.len();
    let content_type = mime_guess::from_path(&file_path).first_or_octet_stream();

    let range = headers
        .get(header::RANGE)
        .and_then(|v| v.to_str().ok())
        .map(|v| parse_range_header(v, file_size))
        .unwrap_or(RangeRequest::Ignored);

    let response = match range {
        RangeRequest::Unsatisfiable => return Err(AppError::RangeNotSatisfiable { size: file_size }),
        RangeRequest::Partial(range) => {
            debug!("Range request for {}: {}-{}/{}", record.path, range.start, range.end, file_size);
            file.seek(SeekFrom::Start(range.start)).await?;
            state.metrics.add_stream(range.len());
            // The body owns the handle; it is closed as soon as the client goes away.
            let body = Body::from_stream(ReaderStream::new(file.take(range.len())));
            Response::builder()
                .status(StatusCode::PARTIAL_CONTENT)
                .header(header::CONTENT_TYPE, content_type.as_ref())
                .header(header::CONTENT_LENGTH, range.len())
                .header(
                    header::CONTENT_RANGE,
                    format!("bytes {}-{}/{}", range.start, range.end, file_size),
                )
                .header(header::ACCEPT_RANGES, "bytes")
                .body(body)
        }
        RangeRequest::Ignored => {
            debug!("Streaming entire file {} ({} bytes)", record.path, file_size);
            state.metrics.add_stream(file_size);
            let body = Body::from_stream(ReaderStream::new(file.take(file_size)));
            Response::builder()
                .status(StatusCode::OK)
                .header(header::CONTENT_TYPE, content_type.as_ref())
                .header(header::CONTENT_LENGTH, file_size)
                .header(header::ACCEPT_RANGES, "bytes")
                .body(body)
        }
    };

    response.map_err(|e| AppError::Internal(anyhow::Error::new(e)))
}
