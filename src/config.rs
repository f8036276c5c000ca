use globset::Glob;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub permissive_cors: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScannerConfig {
    pub root_timeout_secs: u64,
    pub root_concurrency: Option<usize>,
    #[serde(default)]
    pub extra_excludes: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct SecurityConfig {
    pub enable_hsts: Option<bool>,
    pub hsts_max_age: Option<u64>,
    pub hsts_include_subdomains: Option<bool>,
    pub csp: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub scanner: ScannerConfig,
    pub security: Option<SecurityConfig>,
}

const DEFAULTS: &str = include_str!("../config/default.toml");

impl Default for AppConfig {
    fn default() -> Self {
        // Fallback: parse the embedded default TOML
        match ::config::Config::builder()
            .add_source(::config::File::from_str(DEFAULTS, ::config::FileFormat::Toml))
            .build()
        {
            Ok(cfg) => match cfg.try_deserialize() {
                Ok(app_cfg) => app_cfg,
                Err(e) => {
                    eprintln!("FATAL: Failed to deserialize default config: {}", e);
                    panic!("Failed to deserialize default config: {}", e);
                }
            },
            Err(e) => {
                eprintln!("FATAL: Failed to parse default config: {}", e);
                panic!("Failed to parse default config: {}", e);
            }
        }
    }
}

impl Default for ScannerConfig {
    fn default() -> Self {
        // Mirror defaults from config/default.toml
        Self { root_timeout_secs: 600, root_concurrency: Some(4), extra_excludes: Vec::new() }
    }
}

impl ScannerConfig {
    /// Effective number of roots walked in parallel.
    pub fn effective_root_concurrency(&self) -> usize {
        self.root_concurrency.unwrap_or_else(|| (num_cpus::get() / 2).max(1))
    }
}

pub fn load() -> anyhow::Result<AppConfig> {
    // Load .env first (optional)
    let _ = dotenvy::dotenv();

    let mut builder = ::config::Config::builder()
        .add_source(::config::File::from_str(DEFAULTS, ::config::FileFormat::Toml))
        // Optional local file: medienwald.toml (in CWD)
        .add_source(::config::File::with_name("medienwald").required(false));

    if let Ok(custom_path) = std::env::var("MEDIENWALD_CONFIG") {
        builder = builder.add_source(::config::File::with_name(&custom_path).required(false));
    }
    // Environment variables last to have highest precedence
    builder = builder.add_source(::config::Environment::with_prefix("MEDIENWALD").separator("__"));

    let cfg = builder.build()?;
    let app_cfg: AppConfig = cfg.try_deserialize()?;
    validate(&app_cfg)?;
    Ok(app_cfg)
}

/// Layers a TOML snippet over the embedded defaults without consulting the
/// environment. Useful for embedding the service with a fixed configuration.
pub fn from_toml_str(overrides: &str) -> anyhow::Result<AppConfig> {
    let cfg = ::config::Config::builder()
        .add_source(::config::File::from_str(DEFAULTS, ::config::FileFormat::Toml))
        .add_source(::config::File::from_str(overrides, ::config::FileFormat::Toml))
        .build()?;
    let app_cfg: AppConfig = cfg.try_deserialize()?;
    validate(&app_cfg)?;
    Ok(app_cfg)
}

pub fn validate(cfg: &AppConfig) -> anyhow::Result<()> {
    // Server
    if cfg.server.port == 0 {
        return Err(anyhow::anyhow!("invalid server.port: {}", cfg.server.port));
    }
    // Warn for privileged ports on Unix-like systems
    #[cfg(unix)]
    if cfg.server.port < 1024 {
        tracing::warn!("Using privileged port {} - may require elevated permissions", cfg.server.port);
    }

    // Scanner
    if cfg.scanner.root_timeout_secs == 0 {
        return Err(anyhow::anyhow!("scanner.root_timeout_secs must be > 0"));
    }
    if let Some(c) = cfg.scanner.root_concurrency {
        if c == 0 || c > 64 {
            return Err(anyhow::anyhow!("scanner.root_concurrency must be in 1..=64"));
        }
    }
    for pat in &cfg.scanner.extra_excludes {
        let norm = pat.trim().replace('\\', "/");
        if norm.is_empty() {
            continue;
        }
        if let Err(e) = Glob::new(&norm) {
            return Err(anyhow::anyhow!("invalid scanner.extra_excludes pattern {:?}: {}", pat, e));
        }
    }

    Ok(())
}
