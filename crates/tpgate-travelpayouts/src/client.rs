//! HTTP client for the Travelpayouts link-creation API.
//!
//! Turns an ordinary URL into a partner (affiliate) URL. Every failure is
//! converted into a [`ProviderError`] at the point it happens; partner-reported
//! codes are relayed unchanged.

use std::time::Duration;

use reqwest::{header, Client, StatusCode, Url};
use tpgate_core::{codes, ProviderError};

use crate::error::ClientBuildError;
use crate::types::{
    CreateLinksRequest, CreateLinksResponse, ErrorEnvelope, LinkItem, SUCCESS_CODE,
};

const CREATE_LINKS_PATH: &str = "links/v1/create";
const PARTNER: &str = "Travelpayouts";

/// Sub-identifier sent with every link; identifies this integration to the partner.
pub const SUB_ID: &str = "social_tool_main";

/// Client for the Travelpayouts link-creation endpoint.
///
/// The base URL comes from configuration, so tests point it at a mock server.
#[derive(Debug, Clone)]
pub struct TravelpayoutsClient {
    client: Client,
    endpoint: Url,
}

impl TravelpayoutsClient {
    /// Creates a client with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ClientBuildError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`ClientBuildError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(timeout_secs: u64, base_url: &str) -> Result<Self, ClientBuildError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        // Exactly one trailing slash so `join` appends instead of replacing
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&normalised)
            .and_then(|base| base.join(CREATE_LINKS_PATH))
            .map_err(|e| ClientBuildError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self { client, endpoint })
    }

    /// Creates an affiliate link for `original_url`.
    ///
    /// `trs` and `marker` arrive as strings from the chat platform and must be
    /// base-10 integers; they are checked before any request is made.
    ///
    /// # Errors
    ///
    /// - `invalid_trs` / `invalid_marker` for non-integer ids (no request sent).
    /// - `json_error` if the request body cannot be encoded.
    /// - `network_error` on connect, TLS, or timeout failure.
    /// - `response_error` if the body cannot be read.
    /// - `api_error`, `parse_error`, `no_links`, `empty_partner_url`, or the
    ///   partner's own `{code, message}`; see [`interpret_response`].
    pub async fn create_affiliate_link(
        &self,
        original_url: &str,
        access_token: &str,
        trs: &str,
        marker: &str,
    ) -> Result<String, ProviderError> {
        let (trs, marker) = parse_ids(trs, marker)?;

        let request = CreateLinksRequest {
            trs,
            marker,
            shorten: true,
            links: vec![LinkItem {
                url: original_url,
                sub_id: SUB_ID,
            }],
        };
        let body = serde_json::to_vec(&request).map_err(|e| {
            tracing::error!(error = %e, "failed to encode link request");
            ProviderError::json("failed to encode request body")
        })?;

        tracing::info!(original_url, trs, marker, "requesting affiliate link");

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(header::CONTENT_TYPE, "application/json")
            .header("X-Access-Token", access_token)
            .body(body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, timeout = e.is_timeout(), "Travelpayouts request failed");
                ProviderError::network(PARTNER)
            })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| {
            tracing::error!(error = %e, "failed to read Travelpayouts response");
            ProviderError::response("failed to read response body")
        })?;
        tracing::debug!(
            status = status.as_u16(),
            body = %String::from_utf8_lossy(&bytes),
            "Travelpayouts response"
        );

        let result = interpret_response(status, &bytes);
        match &result {
            Ok(partner_url) => tracing::info!(partner_url = %partner_url, "affiliate link created"),
            Err(e) => tracing::warn!(code = e.code(), message = e.message(), "affiliate link rejected"),
        }
        result
    }
}

/// Parses the `trs` and `marker` ids, `trs` first.
fn parse_ids(trs: &str, marker: &str) -> Result<(i64, i64), ProviderError> {
    let trs = trs
        .parse::<i64>()
        .map_err(|_| ProviderError::invalid_trs())?;
    let marker = marker
        .parse::<i64>()
        .map_err(|_| ProviderError::invalid_marker())?;
    Ok((trs, marker))
}

/// Applies the response validation chain to a received status and body.
///
/// Order matters: HTTP status, envelope code, link count, per-link code,
/// partner URL.
fn interpret_response(status: StatusCode, body: &[u8]) -> Result<String, ProviderError> {
    if !status.is_success() {
        return Err(error_from_envelope(status, body));
    }

    let envelope: CreateLinksResponse = serde_json::from_slice(body).map_err(|e| {
        tracing::error!(error = %e, "failed to decode Travelpayouts response");
        ProviderError::parse("failed to decode response body")
    })?;

    if envelope.code != SUCCESS_CODE {
        return Err(ProviderError::partner(envelope.code, "non-success code"));
    }

    let Some(link) = envelope.result.links.into_iter().next() else {
        return Err(ProviderError::domain(
            codes::NO_LINKS,
            "partner returned no links",
        ));
    };

    if link.code != SUCCESS_CODE {
        return Err(ProviderError::partner(link.code, link.message));
    }

    if link.partner_url.is_empty() {
        return Err(ProviderError::domain(
            codes::EMPTY_PARTNER_URL,
            "partner returned an empty partner_url",
        ));
    }

    Ok(link.partner_url)
}

/// Maps a non-2xx response to an error, preferring the partner's envelope.
fn error_from_envelope(status: StatusCode, body: &[u8]) -> ProviderError {
    let Ok(envelope) = serde_json::from_slice::<ErrorEnvelope>(body) else {
        return ProviderError::api_status(status.as_u16());
    };

    let message = match envelope.error {
        Some(error) if !error.is_empty() => error,
        _ => envelope.message,
    };

    match (envelope.code.is_empty(), message.is_empty()) {
        (true, true) => ProviderError::api_status(status.as_u16()),
        // No partner code to relay; keep the partner's message under a generic code.
        (true, false) => ProviderError::partner(codes::API_ERROR, message),
        (false, _) => ProviderError::partner(envelope.code, message),
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
