use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use tpgate_core::ProviderError;
use tpgate_wegotrip::FeedItem;

use crate::fields;

pub const VERSION: &str = "v2";
pub const DEFAULT_CONTENT_TYPE: &str = "instagram";
pub const ACTION_SET_FIELD_VALUE: &str = "set_field_value";

/// A complete ManyChat v2 reply.
///
/// Only [`ManyChat`] builds replies, and every builder path ends by appending
/// exactly one status action, so the status is always the last action.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reply {
    version: &'static str,
    content: Content,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Content {
    #[serde(rename = "type")]
    content_type: String,
    messages: Vec<String>,
    actions: Vec<Action>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Action {
    action: &'static str,
    field_name: String,
    value: Value,
}

impl Reply {
    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content.content_type
    }

    #[must_use]
    pub fn actions(&self) -> &[Action] {
        &self.content.actions
    }

    /// Value of the status action.
    #[must_use]
    pub fn status(&self) -> bool {
        self.content
            .actions
            .last()
            .and_then(|action| action.value.as_bool())
            .unwrap_or(false)
    }

    /// Value of the first action setting `field_name`.
    #[must_use]
    pub fn field(&self, field_name: &str) -> Option<&Value> {
        self.content
            .actions
            .iter()
            .find(|action| action.field_name == field_name)
            .map(|action| &action.value)
    }
}

impl Action {
    #[must_use]
    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// Ordered field assignments; closed by [`ActionList::finish`].
struct ActionList(Vec<Action>);

impl ActionList {
    fn new() -> Self {
        Self(Vec::new())
    }

    fn set(mut self, field_name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.push(Action {
            action: ACTION_SET_FIELD_VALUE,
            field_name: field_name.into(),
            value: value.into(),
        });
        self
    }

    fn finish(self, content_type: &str, status: bool) -> Reply {
        let ActionList(actions) = self.set(fields::STATUS, status);
        Reply {
            version: VERSION,
            content: Content {
                content_type: content_type.to_string(),
                messages: Vec::new(),
                actions,
            },
        }
    }
}

/// Renders request outcomes as ManyChat replies for one content type.
#[derive(Debug, Clone)]
pub struct ManyChat {
    content_type: String,
}

impl Default for ManyChat {
    fn default() -> Self {
        Self::new(DEFAULT_CONTENT_TYPE)
    }
}

impl ManyChat {
    #[must_use]
    pub fn new(content_type: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
        }
    }

    /// Same renderer with another content type; empty keeps the current one.
    #[must_use]
    pub fn with_content_type(&self, content_type: Option<&str>) -> Self {
        match content_type {
            Some(t) if !t.trim().is_empty() => Self::new(t.trim()),
            _ => self.clone(),
        }
    }

    #[must_use]
    pub fn render_link(&self, partner_url: &str) -> Reply {
        ActionList::new()
            .set(fields::AFFILIATE_LINK, partner_url)
            .finish(&self.content_type, true)
    }

    /// Four fields per card (price, URL, image, title), numbered from 1.
    /// An empty feed yields a bare successful status.
    #[must_use]
    pub fn render_feed(&self, items: &[FeedItem]) -> Reply {
        items
            .iter()
            .enumerate()
            .fold(ActionList::new(), |list, (i, item)| {
                let index = i + 1;
                list.set(fields::top_price(index), price_value(item.price))
                    .set(fields::top_url(index), item.deep_link.as_str())
                    .set(fields::top_image(index), item.cover_image_url.as_str())
                    .set(fields::top_title(index), item.title.as_str())
            })
            .finish(&self.content_type, true)
    }

    #[must_use]
    pub fn render_error(&self, err: &ProviderError) -> Reply {
        ActionList::new()
            .set(fields::ERROR_MESSAGE, err.message())
            .set(fields::ERROR_CODE, err.code())
            .finish(&self.content_type, false)
    }

    pub fn render_validation_error(&self, message: impl Into<String>) -> Reply {
        self.render_error(&ProviderError::invalid_request(message))
    }

    pub fn render_result<T, F>(&self, result: &Result<T, ProviderError>, on_success: F) -> Reply
    where
        F: FnOnce(&Self, &T) -> Reply,
    {
        match result {
            Ok(value) => on_success(self, value),
            Err(err) => self.render_error(err),
        }
    }
}

/// Whole prices render as JSON integers, others as floats.
fn price_value(price: Decimal) -> Value {
    let price = price.normalize();
    if price.scale() == 0 {
        if let Some(whole) = price.to_i64() {
            return Value::from(whole);
        }
    }
    price.to_f64().map_or(Value::Null, Value::from)
}
