use std::sync::Arc;

use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::config::AppConfig;
use crate::index::MediaIndex;
use crate::metrics::Metrics;
use crate::scanner::ScanSettings;

/// The shared application state.
///
/// Cloned into every handler by Axum. All fields are cheap handles onto shared data.
#[derive(Clone)]
pub struct AppState {
    /// The media index, replaced wholesale by each successful scan.
    pub index: MediaIndex,
    /// Serializes scans so that only one of them discovers and swaps at a time.
    pub scan_lock: Arc<Mutex<()>>,
    /// Compiled scanner settings (timeouts, concurrency, exclusion globs).
    pub scan_settings: ScanSettings,
    /// Cancelled on shutdown; running scans abort and leave the index untouched.
    pub shutdown: CancellationToken,
    /// The application configuration.
    pub config: Arc<AppConfig>,
    /// The application metrics.
    pub metrics: Metrics,
}

impl AppState {
    /// Creates a new `AppState` with an empty index.
    ///
    /// Fails when the scanner configuration cannot be compiled (invalid exclude globs).
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let scan_settings = ScanSettings::from_config(&config.scanner)?;
        Ok(Self {
            index: MediaIndex::new(),
            scan_lock: Arc::new(Mutex::new(())),
            scan_settings,
            shutdown: CancellationToken::new(),
            config: Arc::new(config),
            metrics: Metrics::new(),
        })
    }
}
