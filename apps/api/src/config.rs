use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every setting has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Job dataset to load instead of the bundled seed.
    pub jobs_seed_path: Option<PathBuf>,
    /// Simulated latency of a listing refresh.
    pub refresh_delay: Duration,
    /// External HTML → PNG command used for CV export. Export is disabled
    /// when unset.
    pub rasterizer_command: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            jobs_seed_path: None,
            refresh_delay: Duration::from_millis(1000),
            rasterizer_command: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Config {
            port: non_empty("PORT")
                .map(|v| v.parse::<u16>())
                .transpose()
                .context("PORT must be a valid port number")?
                .unwrap_or(defaults.port),
            rust_log: non_empty("RUST_LOG").unwrap_or(defaults.rust_log),
            jobs_seed_path: non_empty("JOBS_SEED_PATH").map(PathBuf::from),
            refresh_delay: non_empty("REFRESH_DELAY_MS")
                .map(|v| v.parse::<u64>())
                .transpose()
                .context("REFRESH_DELAY_MS must be a whole number of milliseconds")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.refresh_delay),
            rasterizer_command: non_empty("RASTERIZER_COMMAND"),
        })
    }
}
