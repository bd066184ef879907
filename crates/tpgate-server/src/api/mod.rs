mod feed;
mod links;

use std::sync::Arc;

use axum::{
    extract::rejection::JsonRejection,
    http::{header, HeaderName, Method},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tpgate_core::{AppConfig, BrandCatalog};
use tpgate_manychat::{ManyChat, Reply};
use tpgate_travelpayouts::TravelpayoutsClient;
use tpgate_wegotrip::{CityIndex, WegotripClient};

use crate::middleware::request_id;

/// Shared per-process state. Every field is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub travelpayouts: TravelpayoutsClient,
    pub wegotrip: WegotripClient,
    pub brands: Arc<BrandCatalog>,
    pub manychat: ManyChat,
}

impl AppState {
    /// Builds both partner clients from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client cannot be built or a configured
    /// base URL does not parse.
    pub fn from_config(
        config: &AppConfig,
        cities: Arc<CityIndex>,
        brands: Arc<BrandCatalog>,
    ) -> anyhow::Result<Self> {
        let travelpayouts = TravelpayoutsClient::with_base_url(
            config.request_timeout_secs,
            &config.travelpayouts_base_url,
        )?;
        let wegotrip = WegotripClient::with_base_urls(
            config.request_timeout_secs,
            &config.wegotrip_com_base_url,
            &config.wegotrip_ru_base_url,
            cities,
        )?;

        Ok(Self {
            travelpayouts,
            wegotrip,
            brands,
            manychat: ManyChat::new(config.reply_content_type.clone()),
        })
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

/// Unwraps an inbound JSON body, or renders the rejection as an
/// `invalid_request` reply with the default content type.
pub(super) fn accept_json<T>(
    state: &AppState,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, Json<Reply>> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        tracing::warn!(error = %rejection.body_text(), "rejected inbound payload");
        Json(state.manychat.render_validation_error(rejection.body_text()))
    })
}

/// Returns `Some(message)` when a required string field is blank.
pub(super) fn require(field: &str, value: &str) -> Option<String> {
    value
        .trim()
        .is_empty()
        .then(|| format!("`{field}` is required"))
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/getFromLink", post(links::get_from_link))
        .route("/api/getFromBrand", post(links::get_from_brand))
        .route("/api/getFeed", post(feed::get_feed))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health() -> Json<HealthData> {
    Json(HealthData { status: "ok" })
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
