use std::{collections::HashSet, path::Path, sync::Arc, time::Duration};

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use tokio::sync::Semaphore;
use tokio::task;
use tokio_util::sync::CancellationToken;
use walkdir::WalkDir;

use crate::config::ScannerConfig;
use crate::paths;
use crate::types::{MediaKind, MediaRecord};

/// System and tooling directories that are never descended into, whatever the requested roots.
pub const SYSTEM_EXCLUDES: &[&str] = &[
    "node_modules",
    "Windows",
    "Program Files",
    "Program Files (x86)",
    "$Recycle.Bin",
    "System Volume Information",
    "Documents and Settings",
    "AppData",
    "Local Settings",
    "Recovery",
    "Boot",
    "Config.Msi",
    "Intel",
    "Application Data",
    ".gemini",
];

#[derive(Debug, Default, Clone)]
pub struct ScanResultSummary {
    pub roots_scanned: u64,
    pub roots_skipped: u64,
    pub videos: u64,
    pub audios: u64,
    /// Media files that could not be stat'ed or have non UTF-8 paths.
    pub files_dropped: u64,
    /// Files reached through more than one (overlapping) root.
    pub duplicates: u64,
}

#[derive(Debug)]
pub struct ScanOutcome {
    pub records: Vec<MediaRecord>,
    pub summary: ScanResultSummary,
}

/// Why a single root contributed nothing. Never fatal for the scan as a whole.
#[derive(Debug, thiserror::Error)]
pub enum RootError {
    #[error("root lies inside an excluded system directory")]
    Excluded,
    #[error("root cannot be read: {0}")]
    Unreadable(#[source] walkdir::Error),
    #[error("walk did not finish within {0:?}")]
    TimedOut(Duration),
    #[error("walk aborted: {0}")]
    Aborted(String),
}

#[derive(Debug, Default)]
struct RootScan {
    records: Vec<MediaRecord>,
    dropped: u64,
}

/// Resolved scanner settings (exclusions compiled once per scan).
#[derive(Clone)]
pub struct ScanSettings {
    pub root_timeout: Duration,
    pub root_concurrency: usize,
    excludes: Arc<GlobSet>,
}

impl ScanSettings {
    pub fn from_config(cfg: &ScannerConfig) -> anyhow::Result<Self> {
        Ok(Self {
            root_timeout: Duration::from_secs(cfg.root_timeout_secs.max(1)),
            root_concurrency: cfg.effective_root_concurrency().max(1),
            excludes: Arc::new(build_globset(&cfg.extra_excludes)?),
        })
    }

    pub fn is_excluded(&self, path: &Path) -> bool {
        matches_excludes(path, &self.excludes)
    }
}

/// Walks every root and returns the discovered media records in root order.
///
/// Roots that are missing, unreadable, excluded or too slow are skipped with a
/// warning. The scan only fails as a whole when `cancel` fires, in which case
/// the caller keeps its previous index.
pub async fn run_scan(
    roots: Vec<String>,
    settings: &ScanSettings,
    cancel: CancellationToken,
) -> anyhow::Result<ScanOutcome> {
    let sem = Arc::new(Semaphore::new(settings.root_concurrency));

    let walks = roots.into_iter().map(|root| {
        let sem = sem.clone();
        let settings = settings.clone();
        let cancel = cancel.child_token();
        async move {
            let res = scan_root(&root, &settings, sem, cancel).await;
            (root, res)
        }
    });
    let results = futures::future::join_all(walks).await;

    if cancel.is_cancelled() {
        anyhow::bail!("scan cancelled");
    }

    let mut summary = ScanResultSummary::default();
    let mut seen: HashSet<String> = HashSet::new();
    let mut records = Vec::new();
    for (root, res) in results {
        match res {
            Ok(scan) => {
                summary.roots_scanned += 1;
                summary.files_dropped += scan.dropped;
                for rec in scan.records {
                    if !seen.insert(rec.path.clone()) {
                        summary.duplicates += 1;
                        continue;
                    }
                    match rec.kind {
                        MediaKind::Video => summary.videos += 1,
                        MediaKind::Audio => summary.audios += 1,
                    }
                    records.push(rec);
                }
            }
            Err(e) => {
                summary.roots_skipped += 1;
                tracing::warn!(root = %root, error = %e, "Issues scanning root, skipping it");
            }
        }
    }

    Ok(ScanOutcome { records, summary })
}

async fn scan_root(
    root: &str,
    settings: &ScanSettings,
    sem: Arc<Semaphore>,
    cancel: CancellationToken,
) -> Result<RootScan, RootError> {
    let permit = sem.acquire_owned().await.map_err(|e| RootError::Aborted(e.to_string()))?;

    let mut target = paths::normalize(root);
    // "D:" alone means "current dir on D", walk the drive root instead
    if target.len() == 2 && target.ends_with(':') {
        target.push('/');
    }
    let excludes = settings.excludes.clone();
    let walk_cancel = cancel.clone();
    let handle = task::spawn_blocking(move || {
        let res = walk_root(&target, &excludes, &walk_cancel);
        drop(permit);
        res
    });

    match tokio::time::timeout(settings.root_timeout, handle).await {
        Ok(Ok(res)) => res,
        Ok(Err(join)) => Err(RootError::Aborted(join.to_string())),
        Err(_) => {
            // the blocking walker checks the token between entries
            cancel.cancel();
            Err(RootError::TimedOut(settings.root_timeout))
        }
    }
}

fn walk_root(root: &str, excludes: &GlobSet, cancel: &CancellationToken) -> Result<RootScan, RootError> {
    if matches_excludes(Path::new(root), excludes) {
        return Err(RootError::Excluded);
    }

    let mut out = RootScan::default();
    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !matches_excludes(e.path(), excludes));

    for entry in walker {
        if cancel.is_cancelled() {
            return Err(RootError::Aborted("cancelled".into()));
        }
        let entry = match entry {
            Ok(e) => e,
            Err(e) if e.depth() == 0 => return Err(RootError::Unreadable(e)),
            Err(e) => {
                tracing::debug!("skipping unreadable entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() || !has_media_extension(entry.path()) {
            continue;
        }
        let Some(raw) = entry.path().to_str() else {
            tracing::debug!("dropping non UTF-8 path {:?}", entry.path());
            out.dropped += 1;
            continue;
        };
        match entry.metadata() {
            Ok(md) => {
                if let Some(rec) = MediaRecord::from_metadata(raw, &md) {
                    out.records.push(rec);
                }
            }
            Err(e) => {
                // permission problems or the file vanished mid-scan
                tracing::debug!("dropping {}: {}", raw, e);
                out.dropped += 1;
            }
        }
    }

    Ok(out)
}

fn has_media_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| MediaKind::from_extension(&e.to_ascii_lowercase()).is_some())
        .unwrap_or(false)
}

fn build_globset(extra: &[String]) -> anyhow::Result<GlobSet> {
    let mut b = GlobSetBuilder::new();
    for name in SYSTEM_EXCLUDES {
        // the directory itself (prunes the walk) and everything below it
        for pat in [format!("**/{}", name), format!("**/{}/**", name)] {
            b.add(GlobBuilder::new(&pat).case_insensitive(true).build()?);
        }
    }
    for p in extra {
        if p.trim().is_empty() {
            continue;
        }
        // patterns are matched against `/`-separated paths, see `matches_excludes`
        let norm = p.trim().replace('\\', "/");
        b.add(GlobBuilder::new(&norm).case_insensitive(true).build()?);
    }
    Ok(b.build()?)
}

fn matches_excludes(path: &Path, set: &GlobSet) -> bool {
    if set.is_empty() {
        return false;
    }
    let s = path.to_string_lossy().replace('\\', "/");
    set.is_match(s.as_str())
}
