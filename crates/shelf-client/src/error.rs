//! Error types for catalog queries.

use thiserror::Error;

/// Why a catalog query failed.
///
/// The UI treats every variant as the same "fetch failure"; the split exists
/// for logs.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FetchError {
    /// The configured base URL is not an absolute http(s) URL.
    #[error("invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// Connection, DNS or transport failure.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("catalog returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    /// The body was not a product page.
    #[error("could not decode catalog response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Result type alias for catalog queries.
pub type Result<T> = std::result::Result<T, FetchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_names_status_and_url() {
        let err = FetchError::Status {
            status: 503,
            url: "https://dummyjson.com/products?skip=0&limit=20".into(),
        };
        assert_eq!(
            err.to_string(),
            "catalog returned HTTP 503 for https://dummyjson.com/products?skip=0&limit=20"
        );
    }

    #[test]
    fn decode_error_wraps_serde() {
        let err: FetchError = serde_json::from_str::<u8>("nope").unwrap_err().into();
        assert!(matches!(err, FetchError::Decode(_)));
    }
}
