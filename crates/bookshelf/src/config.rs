use std::{env, str::FromStr, time::Duration};

use axum::http::HeaderValue;

use bookshelf_core::storage::MAX_PAGE_LIMIT;
use bookshelf_core::views::ApiVersion;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cache TTL in seconds, 0 disables expiry (default: 3600)
    pub cache_ttl_seconds: u64,
    /// Maximum number of cache entries (default: 10,000)
    pub cache_max_entries: usize,
    /// Upper bound for the `limit` query parameter (default: 100)
    pub max_page_limit: u32,
    /// Version used when `Accept` carries none (default: 1.0)
    pub api_default_version: ApiVersion,
    /// Base URL used to build `Location` headers (default: "http://localhost:3000")
    pub public_url: String,
    /// Session lifetime in hours (default: 24)
    pub session_ttl_hours: i64,
    /// Load demo fixtures at startup (default: true)
    pub seed_fixtures: bool,
    /// Path to SQLite database file (default: "bookshelf.db")
    /// Note: Only used when the `sqlite` feature is enabled.
    #[allow(dead_code)]
    pub sqlite_path: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// - `CACHE_TTL_SECONDS`, `CACHE_MAX_ENTRIES`
    /// - `MAX_PAGE_LIMIT`
    /// - `API_DEFAULT_VERSION`
    /// - `PUBLIC_URL`
    /// - `SESSION_TTL_HOURS`
    /// - `SEED_FIXTURES`
    /// - `SQLITE_PATH`
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source.
    /// Unset or unparseable values fall back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: T) -> T {
            lookup(name)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(default)
        }

        Self {
            cache_ttl_seconds: parsed(&lookup, "CACHE_TTL_SECONDS", 3_600),
            cache_max_entries: parsed(&lookup, "CACHE_MAX_ENTRIES", 10_000),
            max_page_limit: parsed(&lookup, "MAX_PAGE_LIMIT", MAX_PAGE_LIMIT).max(1),
            api_default_version: parsed(&lookup, "API_DEFAULT_VERSION", ApiVersion::default()),
            public_url: lookup("PUBLIC_URL")
                .and_then(|v| usable_public_url(v.trim()))
                .unwrap_or_else(|| DEFAULT_PUBLIC_URL.to_string()),
            session_ttl_hours: parsed(&lookup, "SESSION_TTL_HOURS", 24),
            seed_fixtures: parsed(&lookup, "SEED_FIXTURES", true),
            sqlite_path: lookup("SQLITE_PATH").unwrap_or_else(|| "bookshelf.db".to_string()),
        }
    }

    /// Get cache TTL as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }

    /// Get session lifetime as a chrono Duration.
    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.session_ttl_hours)
    }

    /// Absolute URL of a book resource.
    pub fn book_url(&self, id: i64) -> String {
        format!("{}/api/books/{id}", self.public_url.trim_end_matches('/'))
    }
}

const DEFAULT_PUBLIC_URL: &str = "http://localhost:3000";

/// Accepts an absolute http(s) URL that can be carried in a header value.
fn usable_public_url(value: &str) -> Option<String> {
    let has_scheme = value.starts_with("http://") || value.starts_with("https://");
    if has_scheme && HeaderValue::from_str(value).is_ok() {
        Some(value.to_string())
    } else {
        tracing::warn!(public_url = value, "Ignoring unusable PUBLIC_URL");
        None
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
