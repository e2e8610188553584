//! Application configuration loaded from environment variables.

use std::time::Duration;

use anyhow::Context;

/// Longest time a rendered package page may be served from the in-process
/// cache. Matches the `max-age` sent to crawlers.
pub const MAX_CACHE_TTL: Duration = Duration::from_secs(3600);

const DEFAULT_SITE_DESCRIPTION: &str =
    "Paquetes de viaje todo incluido a los mejores destinos. Cotiza y reserva en línea.";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:3000").
    pub bind_addr: String,

    /// Base URL of the upstream API, without trailing slash.
    /// The public package listing lives at `{api_base_url}/paquetes/publicos`.
    pub api_base_url: String,

    /// Public origin of the storefront (used in canonical URLs and OG tags).
    pub site_url: String,

    /// Base URL that relative image paths from the API are resolved against.
    pub asset_base_url: String,

    /// Site name shown in page titles and `og:site_name`.
    pub site_name: String,

    /// Description used when a package has none, and by the fallback page.
    pub site_description: String,

    /// Image used when a package carries no usable image.
    pub default_image: String,

    /// Directory holding the pre-built SPA bundle.
    pub static_dir: String,

    /// Timeout for the upstream package listing request.
    pub upstream_timeout: Duration,

    /// TTL for rendered package pages. Zero disables the cache.
    pub cache_ttl: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every variable is optional:
    /// - `HOST` (default: "0.0.0.0"), `PORT` (default: 3000)
    /// - `API_BASE_URL`: upstream API (default: "http://localhost:4000/api")
    /// - `SITE_URL`: public storefront origin (default: "http://localhost:3000")
    /// - `ASSET_BASE_URL`: base for relative image paths (default: origin of `API_BASE_URL`)
    /// - `SITE_NAME` (default: "Viajes"), `SITE_DESCRIPTION`
    /// - `DEFAULT_OG_IMAGE` (default: "{SITE_URL}/og-default.jpg")
    /// - `STATIC_DIR`: SPA bundle directory (default: "dist")
    /// - `UPSTREAM_TIMEOUT_SECS` (default: 5)
    /// - `CACHE_TTL_SECS` (default: 300, capped at 3600, 0 disables)
    pub fn from_env() -> anyhow::Result<Self> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 = parse_var("PORT", 3000)?;
        let bind_addr = format!("{host}:{port}");

        let api_base_url = std::env::var("API_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:4000/api".to_string())
            .trim_end_matches('/')
            .to_string();

        let site_url = std::env::var("SITE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .trim_end_matches('/')
            .to_string();

        let asset_base_url = match std::env::var("ASSET_BASE_URL") {
            Ok(url) => url.trim_end_matches('/').to_string(),
            Err(_) => origin_of(&api_base_url).unwrap_or_else(|| site_url.clone()),
        };

        let site_name = std::env::var("SITE_NAME").unwrap_or_else(|_| "Viajes".to_string());

        let site_description = std::env::var("SITE_DESCRIPTION")
            .unwrap_or_else(|_| DEFAULT_SITE_DESCRIPTION.to_string());

        let default_image = std::env::var("DEFAULT_OG_IMAGE")
            .unwrap_or_else(|_| format!("{site_url}/og-default.jpg"));

        let static_dir = std::env::var("STATIC_DIR").unwrap_or_else(|_| "dist".to_string());

        let upstream_timeout = Duration::from_secs(parse_var("UPSTREAM_TIMEOUT_SECS", 5)?);

        let cache_ttl = Duration::from_secs(parse_var("CACHE_TTL_SECS", 300)?).min(MAX_CACHE_TTL);

        tracing::info!(
            bind_addr = %bind_addr,
            api_base_url = %api_base_url,
            site_url = %site_url,
            asset_base_url = %asset_base_url,
            static_dir = %static_dir,
            upstream_timeout_secs = upstream_timeout.as_secs(),
            cache_ttl_secs = cache_ttl.as_secs(),
            "preview configuration loaded"
        );

        Ok(Self {
            bind_addr,
            api_base_url,
            site_url,
            asset_base_url,
            site_name,
            site_description,
            default_image,
            static_dir,
            upstream_timeout,
            cache_ttl,
        })
    }

    /// URL of the upstream public package listing.
    pub fn packages_url(&self) -> String {
        format!("{}/paquetes/publicos", self.api_base_url)
    }

    /// Path of the SPA entry file inside the static bundle.
    pub fn index_path(&self) -> std::path::PathBuf {
        std::path::Path::new(&self.static_dir).join("index.html")
    }
}

#[cfg(test)]
impl Config {
    /// Configuration for unit tests, pointing at a mock upstream.
    pub(crate) fn for_tests(api_base_url: &str) -> Self {
        Self {
            bind_addr: "127.0.0.1:0".to_string(),
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            site_url: "https://viajes.example.com".to_string(),
            asset_base_url: "https://api.viajes.example.com".to_string(),
            site_name: "Viajes".to_string(),
            site_description: DEFAULT_SITE_DESCRIPTION.to_string(),
            default_image: "https://viajes.example.com/og-default.jpg".to_string(),
            static_dir: "dist".to_string(),
            upstream_timeout: Duration::from_secs(2),
            cache_ttl: Duration::from_secs(60),
        }
    }
}

/// Parse a numeric env var, falling back to `default` when unset.
fn parse_var<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid value for {key}: {raw:?}")),
        Err(_) => Ok(default),
    }
}

/// Scheme + host (+ port) of a URL, e.g. "http://localhost:4000".
fn origin_of(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    match parsed.origin() {
        origin @ url::Origin::Tuple(..) => Some(origin.ascii_serialization()),
        url::Origin::Opaque(_) => None,
    }
}
