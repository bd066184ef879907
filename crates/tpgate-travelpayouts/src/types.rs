//! Travelpayouts link-creation wire types.
//!
//! Request: `POST /links/v1/create`
//! ```json
//! {"trs": 1, "marker": 2, "shorten": true,
//!  "links": [{"url": "https://...", "sub_id": "social_tool_main"}]}
//! ```
//!
//! Success: `{"code": "success", "status": 200, "result": {"links": [...]}}`
//! where each link carries its own `code`. Failure: `{"error"?, "code",
//! "status", "message"}`.
//!
//! Any field may be `null`; it decodes as its zero value.

use serde::{Deserialize, Serialize};
use tpgate_core::wire::null_as_default;

/// Envelope and per-link `code` value meaning "ok".
pub const SUCCESS_CODE: &str = "success";

#[derive(Debug, Serialize)]
pub struct CreateLinksRequest<'a> {
    pub trs: i64,
    pub marker: i64,
    pub shorten: bool,
    pub links: Vec<LinkItem<'a>>,
}

#[derive(Debug, Serialize)]
pub struct LinkItem<'a> {
    pub url: &'a str,
    pub sub_id: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct CreateLinksResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(default)]
    pub status: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub result: CreateLinksResult,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateLinksResult {
    #[serde(default)]
    pub trs: Option<i64>,
    #[serde(default)]
    pub marker: Option<i64>,
    #[serde(default)]
    pub shorten: Option<bool>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub links: Vec<CreatedLink>,
}

/// One entry of `result.links`. A link can fail on its own even when the
/// envelope reports success.
#[derive(Debug, Deserialize)]
pub struct CreatedLink {
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub partner_url: String,
}

/// Body returned alongside a non-2xx status.
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(default)]
    pub status: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
}
