//! The single error type shared by both partner adapters and the reply
//! normalizer.
//!
//! Every failure that can reach the chat platform is a [`ProviderError`]. The
//! variant records where the failure came from; the payload is always the
//! same `{code, message}` pair, which is all the chat platform ever sees.

use std::fmt;

use thiserror::Error;

/// Stable error codes emitted by this service.
///
/// Partner-relayed errors carry whatever code the partner sent and are not
/// listed here.
pub mod codes {
    pub const INVALID_REQUEST: &str = "invalid_request";
    pub const INVALID_TRS: &str = "invalid_trs";
    pub const INVALID_MARKER: &str = "invalid_marker";
    pub const NETWORK_ERROR: &str = "network_error";
    pub const JSON_ERROR: &str = "json_error";
    pub const PARSE_ERROR: &str = "parse_error";
    pub const RESPONSE_ERROR: &str = "response_error";
    pub const CITY_NOT_FOUND: &str = "city_not_found";
    pub const BRAND_NOT_FOUND: &str = "brand_not_found";
    pub const NO_LINKS: &str = "no_links";
    pub const EMPTY_PARTNER_URL: &str = "empty_partner_url";
    pub const API_ERROR: &str = "api_error";
    pub const WEGOTRIP_API_ERROR: &str = "wegotrip_api_error";
}

/// The `{code, message}` pair carried by every [`ProviderError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl ErrorBody {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// A failure surfaced to the chat platform, tagged by origin.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The inbound request or one of its parameters is malformed.
    #[error("validation error: {0}")]
    Validation(ErrorBody),

    /// The partner could not be reached (connect, TLS, timeout).
    #[error("transport error: {0}")]
    Transport(ErrorBody),

    /// A body could not be encoded, read, or decoded.
    #[error("decode error: {0}")]
    Decode(ErrorBody),

    /// The partner reported an error itself. Relayed verbatim.
    #[error("partner error: {0}")]
    Partner(ErrorBody),

    /// A lookup or protocol rule of this service failed.
    #[error("{0}")]
    Domain(ErrorBody),
}

impl ProviderError {
    #[must_use]
    pub fn body(&self) -> &ErrorBody {
        match self {
            Self::Validation(body)
            | Self::Transport(body)
            | Self::Decode(body)
            | Self::Partner(body)
            | Self::Domain(body) => body,
        }
    }

    #[must_use]
    pub fn code(&self) -> &str {
        &self.body().code
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.body().message
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::Validation(ErrorBody::new(codes::INVALID_REQUEST, message))
    }

    #[must_use]
    pub fn invalid_trs() -> Self {
        Self::Validation(ErrorBody::new(codes::INVALID_TRS, "trs must be an integer"))
    }

    #[must_use]
    pub fn invalid_marker() -> Self {
        Self::Validation(ErrorBody::new(
            codes::INVALID_MARKER,
            "marker must be an integer",
        ))
    }

    pub fn network(partner: &str) -> Self {
        Self::Transport(ErrorBody::new(
            codes::NETWORK_ERROR,
            format!("request to {partner} failed"),
        ))
    }

    pub fn json(message: impl Into<String>) -> Self {
        Self::Decode(ErrorBody::new(codes::JSON_ERROR, message))
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Decode(ErrorBody::new(codes::PARSE_ERROR, message))
    }

    pub fn response(message: impl Into<String>) -> Self {
        Self::Decode(ErrorBody::new(codes::RESPONSE_ERROR, message))
    }

    pub fn partner(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Partner(ErrorBody::new(code, message))
    }

    pub fn domain(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Domain(ErrorBody::new(code, message))
    }

    /// Non-2xx HTTP status with no decodable partner envelope.
    #[must_use]
    pub fn api_status(status: u16) -> Self {
        Self::domain(codes::API_ERROR, format!("status {status}"))
    }

    pub fn city_not_found(city: &str) -> Self {
        Self::domain(codes::CITY_NOT_FOUND, format!("unknown city: {city}"))
    }

    pub fn brand_not_found(brand: &str) -> Self {
        Self::domain(codes::BRAND_NOT_FOUND, format!("unknown brand: {brand}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_read_through_every_variant() {
        let errors = [
            ProviderError::invalid_request("bad json"),
            ProviderError::network("Travelpayouts"),
            ProviderError::parse("bad body"),
            ProviderError::partner("TRS_INVALID", "partner says no"),
            ProviderError::city_not_found("atlantis"),
        ];
        let codes: Vec<&str> = errors.iter().map(ProviderError::code).collect();
        assert_eq!(
            codes,
            [
                "invalid_request",
                "network_error",
                "parse_error",
                "TRS_INVALID",
                "city_not_found"
            ]
        );
        assert_eq!(errors[3].message(), "partner says no");
    }

    #[test]
    fn api_status_message_carries_status_code() {
        let err = ProviderError::api_status(502);
        assert_eq!(err.code(), codes::API_ERROR);
        assert_eq!(err.message(), "status 502");
        assert!(matches!(err, ProviderError::Domain(_)));
    }

    #[test]
    fn partner_errors_are_not_rewritten() {
        let err = ProviderError::partner("link_expired", "Link is no longer valid");
        assert_eq!(
            err.body(),
            &ErrorBody::new("link_expired", "Link is no longer valid")
        );
        assert_eq!(
            err.to_string(),
            "partner error: link_expired: Link is no longer valid"
        );
    }

    #[test]
    fn parameter_errors_are_validation_variants() {
        assert!(matches!(
            ProviderError::invalid_trs(),
            ProviderError::Validation(ref b) if b.code == "invalid_trs"
        ));
        assert!(matches!(
            ProviderError::invalid_marker(),
            ProviderError::Validation(ref b) if b.code == "invalid_marker"
        ));
    }
}
