use thiserror::Error;

/// Errors raised while constructing the feed client at startup.
///
/// Request-time failures are reported as `tpgate_core::ProviderError`.
#[derive(Debug, Error)]
pub enum ClientBuildError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid {region} base URL '{url}': {reason}")]
    InvalidBaseUrl {
        region: &'static str,
        url: String,
        reason: String,
    },
}
