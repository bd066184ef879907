use thiserror::Error;

/// Errors raised while constructing a partner client at startup.
///
/// Request-time failures are reported as `tpgate_core::ProviderError`.
#[derive(Debug, Error)]
pub enum ClientBuildError {
    /// The underlying `reqwest::Client` could not be built (e.g. TLS setup).
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
