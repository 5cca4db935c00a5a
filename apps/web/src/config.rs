use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use url::Url;

/// Application configuration loaded from environment variables.
/// Every variable has a default, so a bare `cargo run` serves the bundled listings.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Public URL of the listing page. The jobs fetch target is resolved relative to it.
    /// The flag is read once at startup, not per request: start with
    /// `PAGE_URL=http://localhost:8080/?error` to make the first jobs load fail and exercise
    /// the error panel. Visiting `/?error` in a browser has no effect.
    pub page_url: Url,
    /// File backing the key-value store that holds the active filters.
    /// Empty means in-memory storage.
    pub storage_path: PathBuf,
    /// Job listings served at `/data.json`.
    pub data_path: PathBuf,
    /// Artificial latency before every jobs fetch.
    pub fetch_delay: Duration,
    pub fetch_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let port: u16 = env_or("PORT", 8080)?;
        let default_page_url = Url::parse(&format!("http://localhost:{port}/"))
            .context("default page URL must be valid")?;

        Ok(Config {
            port,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            page_url: env_or("PAGE_URL", default_page_url)?,
            storage_path: env_or("STORAGE_PATH", PathBuf::from(".jobboard/storage.json"))?,
            data_path: env_or("DATA_PATH", PathBuf::from("apps/web/data/data.json"))?,
            fetch_delay: Duration::from_millis(env_or("FETCH_DELAY_MS", 3000)?),
            fetch_timeout: Duration::from_secs(env_or("FETCH_TIMEOUT_SECS", 30)?),
        })
    }
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
impl Config {
    /// Config for in-process tests: no delay, storage and data under the temp dir.
    pub fn for_tests(page_url: &str) -> Self {
        Config {
            port: 0,
            rust_log: "debug".to_string(),
            page_url: Url::parse(page_url).unwrap(),
            storage_path: std::env::temp_dir().join("jobboard-test-storage.json"),
            data_path: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/data/data.json")),
            fetch_delay: Duration::ZERO,
            fetch_timeout: Duration::from_secs(5),
        }
    }
}
