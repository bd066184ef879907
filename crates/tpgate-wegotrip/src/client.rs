//! HTTP client for the WeGoTrip popular-products feed.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use tpgate_core::{codes, ProviderError};

use crate::cities::{CityIndex, Region, ResolvedCity};
use crate::error::ClientBuildError;
use crate::pagination::page_range;
use crate::types::{ErrorEnvelope, FeedItem, FeedQuery, PopularResponse, Product};

const POPULAR_PATH: &str = "api/v2/products/popular/";
const PARTNER: &str = "WeGoTrip";

/// Client for the WeGoTrip popular-products endpoint on both catalogs.
///
/// The city index is shared and read-only; cloning the client is cheap.
#[derive(Debug, Clone)]
pub struct WegotripClient {
    client: Client,
    com_endpoint: Url,
    ru_endpoint: Url,
    cities: Arc<CityIndex>,
}

impl WegotripClient {
    /// Creates a client with custom per-region API hosts.
    ///
    /// Only the API hosts change; public product links always use the real
    /// WeGoTrip domains.
    ///
    /// # Errors
    ///
    /// Returns [`ClientBuildError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`ClientBuildError::InvalidBaseUrl`] if a base URL does not parse.
    pub fn with_base_urls(
        timeout_secs: u64,
        com_base_url: &str,
        ru_base_url: &str,
        cities: Arc<CityIndex>,
    ) -> Result<Self, ClientBuildError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            com_endpoint: popular_endpoint(Region::Com, com_base_url)?,
            ru_endpoint: popular_endpoint(Region::Ru, ru_base_url)?,
            cities,
        })
    }

    /// Fetches one page of popular activities for a city.
    ///
    /// # Errors
    ///
    /// - `city_not_found` if neither catalog knows the city (no request sent).
    /// - `network_error` on connect, TLS, or timeout failure.
    /// - `response_error` if the body cannot be read.
    /// - `wegotrip_api_error` if the body carries an `errors` list, whatever the status.
    /// - `api_error` for any other non-2xx status.
    /// - `parse_error` if a 2xx body does not decode.
    pub async fn get_feed(&self, query: &FeedQuery) -> Result<Vec<FeedItem>, ProviderError> {
        let city = self.cities.resolve(&query.city).inspect_err(|_| {
            tracing::warn!(city = %query.city, "city not found in either catalog");
        })?;
        let page = query.page();
        tracing::info!(
            city = %query.city,
            city_id = city.id,
            region = %city.region,
            page,
            "resolved city"
        );

        let url = self.request_url(city, query.language(), query.currency());
        let response = self.client.get(url).send().await.map_err(|e| {
            tracing::error!(error = %e, timeout = e.is_timeout(), "WeGoTrip request failed");
            ProviderError::network(PARTNER)
        })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| {
            tracing::error!(error = %e, "failed to read WeGoTrip response");
            ProviderError::response("failed to read response body")
        })?;
        tracing::debug!(status = status.as_u16(), size = bytes.len(), "WeGoTrip response");

        let products = interpret_response(status, &bytes)?;
        let total = products.len();
        let items = build_page(products, page, city);
        tracing::info!(total, page, returned = items.len(), "feed page built");
        Ok(items)
    }

    fn request_url(&self, city: ResolvedCity, language: &str, currency: &str) -> Url {
        let mut url = match city.region {
            Region::Com => self.com_endpoint.clone(),
            Region::Ru => self.ru_endpoint.clone(),
        };
        url.query_pairs_mut()
            .append_pair("city", &city.id.to_string())
            .append_pair("lang", &language.to_lowercase())
            .append_pair("currency", currency);
        url
    }
}

fn popular_endpoint(region: Region, base_url: &str) -> Result<Url, ClientBuildError> {
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(&normalised)
        .and_then(|base| base.join(POPULAR_PATH))
        .map_err(|e| ClientBuildError::InvalidBaseUrl {
            region: region.as_str(),
            url: base_url.to_string(),
            reason: e.to_string(),
        })
}

/// Checks the error envelope, then the status, then decodes the product list.
///
/// The envelope check runs first: the partner reports logical errors with
/// HTTP 200 as well.
fn interpret_response(status: StatusCode, body: &[u8]) -> Result<Vec<Product>, ProviderError> {
    if let Ok(envelope) = serde_json::from_slice::<ErrorEnvelope>(body) {
        // Any entry counts, even `null` or one without a message.
        if let Some(first) = envelope.errors.into_iter().next() {
            let message = first.unwrap_or_default().message;
            tracing::warn!(%message, "WeGoTrip reported an error");
            return Err(ProviderError::domain(codes::WEGOTRIP_API_ERROR, message));
        }
    }

    if !status.is_success() {
        return Err(ProviderError::api_status(status.as_u16()));
    }

    let response: PopularResponse = serde_json::from_slice(body).map_err(|e| {
        tracing::error!(error = %e, "failed to decode WeGoTrip response");
        ProviderError::parse("failed to decode response body")
    })?;
    Ok(response.data.results)
}

/// Cuts `page` out of the product list and turns each product into a card.
fn build_page(products: Vec<Product>, page: usize, city: ResolvedCity) -> Vec<FeedItem> {
    let Some(range) = page_range(page, products.len()) else {
        return Vec::new();
    };
    let domain = city.region.link_domain();

    products
        .into_iter()
        .skip(range.start)
        .take(range.len())
        .map(|product| {
            let deep_link = format!(
                "https://{domain}/{}-d{}/{}-p{}",
                product.city.slug, city.id, product.slug, product.id
            );
            FeedItem {
                id: product.id,
                title: product.title,
                slug: product.slug,
                city_slug: product.city.slug,
                price: product.price.unwrap_or_default(),
                cover_image_url: product.cover,
                deep_link,
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
