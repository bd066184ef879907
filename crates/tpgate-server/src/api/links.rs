//! Affiliate-link handlers: by explicit URL and by catalog brand name.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use reqwest::Url;
use serde::Deserialize;
use tpgate_manychat::{ManyChat, Reply};

use super::{accept_json, require, AppState};

/// Partner and marker ids may arrive as JSON strings or numbers; both are
/// handed to the link client as text and parsed there.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum IdField {
    Text(String),
    Number(i64),
}

impl IdField {
    fn into_text(self) -> String {
        match self {
            IdField::Text(text) => text,
            IdField::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct LinkRequest {
    pub link: String,
    pub token: String,
    pub trs: IdField,
    pub marker: IdField,
    #[serde(rename = "type")]
    pub content_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct BrandRequest {
    pub brand_name: String,
    pub token: String,
    pub trs: IdField,
    pub marker: IdField,
    #[serde(rename = "type")]
    pub content_type: Option<String>,
}

pub(super) async fn get_from_link(
    State(state): State<AppState>,
    payload: Result<Json<LinkRequest>, JsonRejection>,
) -> Json<Reply> {
    let req = match accept_json(&state, payload) {
        Ok(req) => req,
        Err(reply) => return reply,
    };
    let manychat = state.manychat.with_content_type(req.content_type.as_deref());

    if let Some(message) = require("link", &req.link)
        .or_else(|| require("token", &req.token))
        .or_else(|| invalid_url(&req.link))
    {
        tracing::warn!(%message, "link request failed validation");
        return Json(manychat.render_validation_error(message));
    }

    Json(create_link(&state, &manychat, req.link.trim(), &req.token, req.trs, req.marker).await)
}

pub(super) async fn get_from_brand(
    State(state): State<AppState>,
    payload: Result<Json<BrandRequest>, JsonRejection>,
) -> Json<Reply> {
    let req = match accept_json(&state, payload) {
        Ok(req) => req,
        Err(reply) => return reply,
    };
    let manychat = state.manychat.with_content_type(req.content_type.as_deref());

    if let Some(message) =
        require("brand_name", &req.brand_name).or_else(|| require("token", &req.token))
    {
        tracing::warn!(%message, "brand request failed validation");
        return Json(manychat.render_validation_error(message));
    }

    let url = match state.brands.resolve(&req.brand_name) {
        Ok(url) => url.to_string(),
        Err(err) => {
            tracing::info!(brand = %req.brand_name, "brand not in catalog");
            return Json(manychat.render_error(&err));
        }
    };
    tracing::debug!(brand = %req.brand_name, %url, "resolved brand");

    Json(create_link(&state, &manychat, &url, &req.token, req.trs, req.marker).await)
}

async fn create_link(
    state: &AppState,
    manychat: &ManyChat,
    url: &str,
    token: &str,
    trs: IdField,
    marker: IdField,
) -> Reply {
    let (trs, marker) = (trs.into_text(), marker.into_text());
    let result = state
        .travelpayouts
        .create_affiliate_link(url, token, &trs, &marker)
        .await;

    match &result {
        Ok(_) => tracing::info!(link = %url, "affiliate link created"),
        Err(err) => tracing::warn!(link = %url, code = err.code(), error = %err, "affiliate link failed"),
    }

    manychat.render_result(&result, |mc, partner_url| mc.render_link(partner_url))
}

fn invalid_url(link: &str) -> Option<String> {
    Url::parse(link.trim())
        .err()
        .map(|e| format!("`link` is not a valid URL: {e}"))
}
