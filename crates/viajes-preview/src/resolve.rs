//! Package resolution against the upstream API.
//!
//! Every lookup fetches the full public listing and scans it for the slug.
//! The API has no per-slug endpoint; rendered pages are cached instead
//! (see [`crate::state::HtmlCache`]).

use crate::catalog::Package;
use crate::error::PreviewError;
use crate::state::AppState;

/// Upper bound on the size of the package listing body.
pub const MAX_LISTING_BYTES: usize = 8 * 1024 * 1024;

/// Fetch the public listing and return the package published under `slug`.
///
/// Makes a single attempt. A non-success status or a body that is not a JSON
/// array of packages is an error.
pub async fn fetch_package(state: &AppState, slug: &str) -> Result<Option<Package>, PreviewError> {
    let url = state.config.packages_url();
    let response = state.http.get(&url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(PreviewError::UpstreamStatus(status));
    }

    let body = read_limited(response, MAX_LISTING_BYTES).await?;
    let packages: Vec<Package> = serde_json::from_slice(&body)?;

    tracing::debug!(slug = %slug, listed = packages.len(), "package listing fetched");

    Ok(packages.into_iter().find(|p| p.matches(slug)))
}

/// Read a response body, giving up once it exceeds `limit` bytes.
async fn read_limited(mut response: reqwest::Response, limit: usize) -> Result<Vec<u8>, PreviewError> {
    if let Some(len) = response.content_length()
        && len > limit as u64
    {
        return Err(PreviewError::UpstreamTooLarge(limit));
    }

    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        if body.len() + chunk.len() > limit {
            return Err(PreviewError::UpstreamTooLarge(limit));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

/// Resolve `slug` to a package, treating every failure as "not found".
///
/// A preview request must never fail because the API is down, so errors are
/// logged and swallowed here.
pub async fn resolve_package(state: &AppState, slug: &str) -> Option<Package> {
    match fetch_package(state, slug).await {
        Ok(Some(package)) => Some(package),
        Ok(None) => {
            tracing::info!(slug = %slug, "package not found in public listing");
            None
        }
        Err(err) => {
            tracing::warn!(slug = %slug, error = %err, "package resolution failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn state_for(server: &MockServer) -> AppState {
        AppState::new(Config::for_tests(&format!("{}/api", server.uri()))).unwrap()
    }

    fn listing() -> serde_json::Value {
        serde_json::json!([
            {"codigoUrl": "oaxaca-4d", "titulo": "Oaxaca Cultural"},
            {"codigoUrl": "cancun-7d", "titulo": "Cancún Todo Incluido"},
            {"codigoUrl": "cancun-7d", "titulo": "Duplicado"}
        ])
    }

    #[tokio::test]
    async fn finds_first_matching_slug() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/paquetes/publicos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(listing()))
            .expect(1)
            .mount(&server)
            .await;

        let state = state_for(&server);
        let pkg = fetch_package(&state, "cancun-7d").await.unwrap().unwrap();
        assert_eq!(pkg.titulo.as_deref(), Some("Cancún Todo Incluido"));
    }

    #[tokio::test]
    async fn unknown_slug_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/paquetes/publicos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(listing()))
            .mount(&server)
            .await;

        let state = state_for(&server);
        assert!(fetch_package(&state, "CANCUN-7D").await.unwrap().is_none());
        assert!(resolve_package(&state, "nowhere").await.is_none());
    }

    #[tokio::test]
    async fn non_success_status_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/paquetes/publicos"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let state = state_for(&server);
        let err = fetch_package(&state, "cancun-7d").await.unwrap_err();
        assert!(matches!(err, PreviewError::UpstreamStatus(s) if s.as_u16() == 503));
        assert!(resolve_package(&state, "cancun-7d").await.is_none());
    }

    #[tokio::test]
    async fn malformed_body_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/paquetes/publicos"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"error":"nope"}"#))
            .mount(&server)
            .await;

        let state = state_for(&server);
        let err = fetch_package(&state, "cancun-7d").await.unwrap_err();
        assert!(matches!(err, PreviewError::Decode(_)));
        assert!(resolve_package(&state, "cancun-7d").await.is_none());
    }

    #[tokio::test]
    async fn oversized_body_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/paquetes/publicos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(listing()))
            .mount(&server)
            .await;

        let response = reqwest::get(format!("{}/api/paquetes/publicos", server.uri()))
            .await
            .unwrap();
        let err = read_limited(response, 16).await.unwrap_err();
        assert!(matches!(err, PreviewError::UpstreamTooLarge(16)));

        let response = reqwest::get(format!("{}/api/paquetes/publicos", server.uri()))
            .await
            .unwrap();
        let body = read_limited(response, MAX_LISTING_BYTES).await.unwrap();
        assert!(serde_json::from_slice::<Vec<Package>>(&body).is_ok());
    }

    #[tokio::test]
    async fn unreachable_upstream_is_none() {
        // Port 9 (discard) on localhost: connection refused.
        let state = AppState::new(Config::for_tests("http://127.0.0.1:9/api")).unwrap();
        assert!(matches!(
            fetch_package(&state, "cancun-7d").await,
            Err(PreviewError::Upstream(_))
        ));
        assert!(resolve_package(&state, "cancun-7d").await.is_none());
    }
}
