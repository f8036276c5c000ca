use serde::Serialize;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::scanner::ScanResultSummary;

/// Performance metrics for monitoring
#[derive(Clone)]
pub struct Metrics {
    pub scans_started: Arc<AtomicUsize>,
    pub scans_completed: Arc<AtomicUsize>,
    pub scans_failed: Arc<AtomicUsize>,
    pub files_indexed: Arc<AtomicU64>,
    pub files_dropped: Arc<AtomicU64>,
    pub roots_skipped: Arc<AtomicU64>,
    pub browse_requests: Arc<AtomicU64>,
    pub streams_served: Arc<AtomicU64>,
    pub bytes_streamed: Arc<AtomicU64>,
    pub start_time: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            scans_started: Arc::new(AtomicUsize::new(0)),
            scans_completed: Arc::new(AtomicUsize::new(0)),
            scans_failed: Arc::new(AtomicUsize::new(0)),
            files_indexed: Arc::new(AtomicU64::new(0)),
            files_dropped: Arc::new(AtomicU64::new(0)),
            roots_skipped: Arc::new(AtomicU64::new(0)),
            browse_requests: Arc::new(AtomicU64::new(0)),
            streams_served: Arc::new(AtomicU64::new(0)),
            bytes_streamed: Arc::new(AtomicU64::new(0)),
            start_time: Instant::now(),
        }
    }

    pub fn inc_scans_started(&self) {
        self.scans_started.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_scans_failed(&self) {
        self.scans_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a finished scan; `files_indexed` tracks the latest index size.
    pub fn record_scan(&self, summary: &ScanResultSummary, indexed: usize) {
        self.scans_completed.fetch_add(1, Ordering::Relaxed);
        self.files_indexed.store(indexed as u64, Ordering::Relaxed);
        self.files_dropped.fetch_add(summary.files_dropped, Ordering::Relaxed);
        self.roots_skipped.fetch_add(summary.roots_skipped, Ordering::Relaxed);
    }

    pub fn inc_browse(&self) {
        self.browse_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_stream(&self, bytes: u64) {
        self.streams_served.fetch_add(1, Ordering::Relaxed);
        self.bytes_streamed.fetch_add(bytes, Ordering::Relaxed);
    }

    pub fn get_snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            scans_started: self.scans_started.load(Ordering::Relaxed),
            scans_completed: self.scans_completed.load(Ordering::Relaxed),
            scans_failed: self.scans_failed.load(Ordering::Relaxed),
            files_indexed: self.files_indexed.load(Ordering::Relaxed),
            files_dropped: self.files_dropped.load(Ordering::Relaxed),
            roots_skipped: self.roots_skipped.load(Ordering::Relaxed),
            browse_requests: self.browse_requests.load(Ordering::Relaxed),
            streams_served: self.streams_served.load(Ordering::Relaxed),
            bytes_streamed: self.bytes_streamed.load(Ordering::Relaxed),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
pub struct MetricsSnapshot {
    pub scans_started: usize,
    pub scans_completed: usize,
    pub scans_failed: usize,
    pub files_indexed: u64,
    pub files_dropped: u64,
    pub roots_skipped: u64,
    pub browse_requests: u64,
    pub streams_served: u64,
    /// Bytes promised in Content-Length of served streams.
    pub bytes_streamed: u64,
    pub uptime_seconds: u64,
}
