use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Deserialize;
use tpgate_manychat::Reply;
use tpgate_wegotrip::FeedQuery;

use super::{accept_json, require, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct FeedRequest {
    pub city: String,
    pub lang: Option<String>,
    pub currency: Option<String>,
    pub page: Option<i64>,
    #[serde(rename = "type")]
    pub content_type: Option<String>,
}

impl From<FeedRequest> for FeedQuery {
    fn from(req: FeedRequest) -> Self {
        FeedQuery {
            city: req.city,
            language: req.lang,
            currency: req.currency,
            page: req.page,
        }
    }
}

pub(super) async fn get_feed(
    State(state): State<AppState>,
    payload: Result<Json<FeedRequest>, JsonRejection>,
) -> Json<Reply> {
    let mut req = match accept_json(&state, payload) {
        Ok(req) => req,
        Err(reply) => return reply,
    };
    let manychat = state.manychat.with_content_type(req.content_type.take().as_deref());

    if let Some(message) = require("city", &req.city) {
        return Json(manychat.render_validation_error(message));
    }

    let query = FeedQuery::from(req);
    let result = state.wegotrip.get_feed(&query).await;
    match &result {
        Ok(items) => tracing::info!(
            city = %query.city,
            page = query.page(),
            items = items.len(),
            "feed page served"
        ),
        Err(err) => tracing::warn!(city = %query.city, code = err.code(), error = %err, "feed failed"),
    }

    Json(manychat.render_result(&result, |mc, items| mc.render_feed(items)))
}
