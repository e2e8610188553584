//! Error types for the preview service.
//!
//! None of these ever reach a client: the package route logs them and
//! degrades to the fallback page or the SPA entry file.

use reqwest::StatusCode;

/// Preview service error type.
#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    /// The upstream API could not be reached or the body could not be read.
    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    /// The upstream API answered with a non-success status.
    #[error("upstream returned status {0}")]
    UpstreamStatus(StatusCode),

    /// The package listing exceeded the size limit (bytes).
    #[error("upstream body larger than {0} bytes")]
    UpstreamTooLarge(usize),

    /// The package listing was not a JSON array of packages.
    #[error("malformed package listing: {0}")]
    Decode(#[from] serde_json::Error),

    /// A canonical or image URL could not be built.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    /// Anything else.
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_status() {
        let err = PreviewError::UpstreamStatus(StatusCode::BAD_GATEWAY);
        assert_eq!(err.to_string(), "upstream returned status 502 Bad Gateway");
    }

    #[test]
    fn error_display_too_large() {
        let err = PreviewError::UpstreamTooLarge(1024);
        assert_eq!(err.to_string(), "upstream body larger than 1024 bytes");
    }

    #[test]
    fn error_display_decode() {
        let err: PreviewError = serde_json::from_str::<Vec<u8>>("{")
            .unwrap_err()
            .into();
        assert!(err.to_string().starts_with("malformed package listing: "));
    }

    #[test]
    fn error_display_url() {
        let err: PreviewError = url::Url::parse("no scheme").unwrap_err().into();
        assert_eq!(err.to_string(), "invalid url: relative URL without a base");
    }

    #[test]
    fn error_display_internal() {
        let err = PreviewError::Internal(anyhow::anyhow!("something broke"));
        assert_eq!(err.to_string(), "internal error: something broke");
    }
}
