//! Package detail route.
//!
//! Handles `GET /paquetes/{slug}`. Crawlers get a server-rendered preview
//! page; browsers get the SPA entry file untouched and let the client router
//! take over.

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, Request, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use tower::ServiceExt;
use tower_http::services::ServeFile;

use crate::crawler::RequestContext;
use crate::error::PreviewError;
use crate::render;
use crate::resolve;
use crate::state::{AppState, CachedHtml};

/// Cache-Control sent with crawler pages.
const CRAWLER_CACHE_CONTROL: &str = "public, max-age=3600";

/// Handle a package detail request.
///
/// Never fails: a slug that cannot be decoded, or a crawler page that cannot
/// be generated, still gets a 200 (SPA entry file or fallback page).
pub async fn package_handler(
    State(state): State<AppState>,
    slug: Result<Path<String>, PathRejection>,
    request: Request,
) -> Response {
    let slug = match slug {
        Ok(Path(slug)) => Some(slug),
        Err(rejection) => {
            tracing::debug!(path = %request.uri().path(), error = %rejection, "undecodable package slug");
            None
        }
    };

    let ctx = {
        let user_agent = request
            .headers()
            .get(header::USER_AGENT)
            .map(|ua| String::from_utf8_lossy(ua.as_bytes()).into_owned());
        let label = slug.clone().unwrap_or_else(|| raw_slug(request.uri().path()));
        RequestContext::new(label, user_agent.as_deref())
    };

    tracing::debug!(
        slug = %ctx.slug,
        user_agent = ctx.user_agent.as_deref().unwrap_or_default(),
        crawler = ctx.is_crawler(),
        "package request"
    );

    if !ctx.is_crawler() {
        return serve_index(&state, request).await;
    }

    // An undecodable slug cannot match any package.
    if slug.is_none() {
        return build_response(&render::fallback::render(&state.config).into_string());
    }

    match crawler_page(&state, &ctx.slug).await {
        Ok(html) => build_response(&html),
        Err(err) => {
            tracing::error!(slug = %ctx.slug, error = %err, "preview generation failed, serving SPA");
            serve_index(&state, request).await
        }
    }
}

/// The still-encoded slug segment of a `/paquetes/{slug}` path, for logging.
fn raw_slug(path: &str) -> String {
    path.trim_start_matches("/paquetes/")
        .trim_end_matches('/')
        .to_string()
}

/// Produce the crawler page for `slug`, from cache when possible.
///
/// Only real package pages are cached; the fallback page is re-rendered so
/// an upstream outage is not remembered.
async fn crawler_page(state: &AppState, slug: &str) -> Result<String, PreviewError> {
    if let Some(cache) = &state.cache
        && let Some(cached) = cache.get(slug).await
    {
        tracing::debug!(slug = %slug, cached_at = %cached.cached_at, "cache hit");
        return Ok(cached.html);
    }

    let package = resolve::resolve_package(state, slug).await;
    let html = render::render_page(package.as_ref(), slug, &state.config)?.into_string();

    if package.is_some()
        && let Some(cache) = &state.cache
    {
        let cached = CachedHtml {
            html: html.clone(),
            cached_at: chrono::Utc::now(),
        };
        cache.insert(slug.to_string(), cached).await;
    }

    Ok(html)
}

/// Serve the SPA entry file verbatim.
async fn serve_index(state: &AppState, request: Request) -> Response {
    let mut response = match ServeFile::new(state.config.index_path()).oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    };
    response
        .headers_mut()
        .insert(header::VARY, HeaderValue::from_static("User-Agent"));
    response
}

/// Build an HTTP response with HTML content and security/cache headers.
fn build_response(html: &str) -> Response {
    let mut headers = HeaderMap::new();

    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    );
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(CRAWLER_CACHE_CONTROL),
    );
    // Same URL, different body per client class.
    headers.insert(header::VARY, HeaderValue::from_static("User-Agent"));

    // Security headers
    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static(render::components::CSP_HEADER),
    );
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));

    // ETag (xxHash of content)
    let hash = xxhash_rust::xxh3::xxh3_64(html.as_bytes());
    let etag = format!("\"{}\"", hex_fmt::HexFmt(&hash.to_be_bytes()));
    if let Ok(val) = HeaderValue::from_str(&etag) {
        headers.insert(header::ETAG, val);
    }

    (StatusCode::OK, headers, html.to_string()).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crawler_response_headers() {
        let response = build_response("<!DOCTYPE html><html></html>");
        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers[header::CONTENT_TYPE], "text/html; charset=utf-8");
        assert_eq!(headers[header::CACHE_CONTROL], "public, max-age=3600");
        assert_eq!(headers[header::VARY], "User-Agent");
        assert_eq!(headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
        assert!(headers.contains_key(header::ETAG));
    }

    #[test]
    fn raw_slug_strips_prefix_and_trailing_slash() {
        assert_eq!(raw_slug("/paquetes/%FF"), "%FF");
        assert_eq!(raw_slug("/paquetes/cancun-7d/"), "cancun-7d");
    }

    #[test]
    fn etag_depends_on_content() {
        let a = build_response("a");
        let b = build_response("b");
        assert_ne!(a.headers()[header::ETAG], b.headers()[header::ETAG]);
        let a2 = build_response("a");
        assert_eq!(a.headers()[header::ETAG], a2.headers()[header::ETAG]);
    }
}
