//! The process-wide media index.
//!
//! The index is a single immutable [`IndexSnapshot`] behind an `Arc`. Readers
//! take a clone of the `Arc` and never observe a half-replaced list; a scan
//! builds a complete new snapshot and swaps it in one step.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::paths;
use crate::types::{MediaKind, MediaRecord};

#[derive(Debug, Default)]
pub struct IndexSnapshot {
    records: Vec<MediaRecord>,
    by_path: HashMap<String, usize>,
    generation: u64,
    built_at: Option<DateTime<Utc>>,
}

impl IndexSnapshot {
    fn build(records: Vec<MediaRecord>, generation: u64) -> Self {
        let mut by_path = HashMap::with_capacity(records.len());
        let mut unique = Vec::with_capacity(records.len());
        for rec in records {
            if by_path.contains_key(&rec.path) {
                continue;
            }
            by_path.insert(rec.path.clone(), unique.len());
            unique.push(rec);
        }
        Self { records: unique, by_path, generation, built_at: Some(Utc::now()) }
    }

    pub fn records(&self) -> &[MediaRecord] {
        &self.records
    }

    /// Records, optionally restricted to one media kind.
    pub fn filtered(&self, kind: Option<MediaKind>) -> Vec<&MediaRecord> {
        self.records.iter().filter(|r| kind.map_or(true, |k| r.kind == k)).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 0 for the empty startup index, incremented on every rebuild.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn built_at(&self) -> Option<DateTime<Utc>> {
        self.built_at
    }

    pub fn get_by_path(&self, path: &str) -> Option<&MediaRecord> {
        self.by_path.get(path).map(|&i| &self.records[i])
    }

    pub fn get_by_id(&self, id: &str) -> Option<&MediaRecord> {
        let path = paths::decode_id(id)?;
        self.get_by_path(&path)
    }
}

#[derive(Clone, Default)]
pub struct MediaIndex {
    current: Arc<RwLock<Arc<IndexSnapshot>>>,
}

impl MediaIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consistent view of the index at the time of the call.
    pub async fn snapshot(&self) -> Arc<IndexSnapshot> {
        self.current.read().await.clone()
    }

    /// Replaces the whole index. Duplicate paths keep their first occurrence.
    pub async fn rebuild(&self, records: Vec<MediaRecord>) -> Arc<IndexSnapshot> {
        let mut guard = self.current.write().await;
        let next = Arc::new(IndexSnapshot::build(records, guard.generation + 1));
        *guard = next.clone();
        tracing::debug!(generation = next.generation, records = next.len(), "media index replaced");
        next
    }
}
