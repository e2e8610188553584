//! Application state shared across all request handlers.

use std::sync::Arc;

use anyhow::Context;
use moka::future::Cache;

use crate::config::Config;

/// Cached HTML response with metadata for logging.
#[derive(Clone, Debug)]
pub struct CachedHtml {
    /// Rendered HTML string.
    pub html: String,
    /// When this entry was cached.
    pub cached_at: chrono::DateTime<chrono::Utc>,
}

/// Rendered package pages keyed by slug.
pub type HtmlCache = Cache<String, CachedHtml>;

/// Default cache capacity (number of entries).
/// A storefront publishes at most a few hundred packages.
const DEFAULT_CACHE_CAPACITY: u64 = 1_000;

/// Shared application state available to all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// HTTP client for the upstream API.
    pub http: reqwest::Client,

    /// Application configuration.
    pub config: Arc<Config>,

    /// Rendered package pages. `None` when `CACHE_TTL_SECS=0`.
    pub cache: Option<HtmlCache>,
}

impl AppState {
    /// Create a new application state from configuration.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.upstream_timeout)
            .user_agent(concat!("viajes-preview/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build upstream HTTP client")?;

        let cache = (!config.cache_ttl.is_zero()).then(|| {
            Cache::builder()
                .max_capacity(DEFAULT_CACHE_CAPACITY)
                .time_to_live(config.cache_ttl)
                .build()
        });

        tracing::info!(
            cache_enabled = cache.is_some(),
            cache_capacity = DEFAULT_CACHE_CAPACITY,
            cache_ttl_secs = config.cache_ttl.as_secs(),
            "application state initialized"
        );

        Ok(Self {
            http,
            config: Arc::new(config),
            cache,
        })
    }
}
