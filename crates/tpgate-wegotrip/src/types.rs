//! WeGoTrip popular-products wire types and the feed item handed to callers.
//!
//! Success: `{"data": {"count", "pages", "current", "maxPrice", "results": [...]}}`.
//! Logical errors come back as `{"errors": [{"message": "..."}]}`, sometimes
//! with HTTP 200. Any field may be `null`; it decodes as its zero value.

use rust_decimal::Decimal;
use serde::Deserialize;
use tpgate_core::wire::null_as_default;

use crate::pagination::normalize_page;

const DEFAULT_LANGUAGE: &str = "RU";
const DEFAULT_CURRENCY: &str = "RUB";

/// A feed request as received from the chat platform.
#[derive(Debug, Clone, Default)]
pub struct FeedQuery {
    pub city: String,
    pub language: Option<String>,
    pub currency: Option<String>,
    pub page: Option<i64>,
}

impl FeedQuery {
    #[must_use]
    pub fn new(city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            ..Self::default()
        }
    }

    /// Requested language, `"RU"` when absent or empty.
    #[must_use]
    pub fn language(&self) -> &str {
        non_empty_or(self.language.as_deref(), DEFAULT_LANGUAGE)
    }

    /// Requested currency, `"RUB"` when absent or empty.
    #[must_use]
    pub fn currency(&self) -> &str {
        non_empty_or(self.currency.as_deref(), DEFAULT_CURRENCY)
    }

    /// Requested 1-based page, `1` when absent or `<= 0`.
    #[must_use]
    pub fn page(&self) -> usize {
        normalize_page(self.page)
    }
}

fn non_empty_or<'a>(value: Option<&'a str>, default: &'a str) -> &'a str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => default,
    }
}

/// One activity card, ready for the reply normalizer.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedItem {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub city_slug: String,
    pub price: Decimal,
    pub cover_image_url: String,
    /// Public product page; built locally, never sent by the partner.
    pub deep_link: String,
}

#[derive(Debug, Deserialize)]
pub struct PopularResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: PopularData,
}

#[derive(Debug, Default, Deserialize)]
pub struct PopularData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub count: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pages: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub current: i64,
    #[serde(default, rename = "maxPrice", with = "rust_decimal::serde::float_option")]
    pub max_price: Option<Decimal>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<Product>,
}

#[derive(Debug, Deserialize)]
pub struct Product {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cover: String,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub city: ProductCity,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProductCity {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
}

#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default, deserialize_with = "null_as_default")]
    pub errors: Vec<Option<ErrorMessage>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ErrorMessage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
}
