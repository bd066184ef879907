//! ManyChat custom field names.
//!
//! The bot flows bind these by exact string, so they must not change.

pub const AFFILIATE_LINK: &str = "Ответ API URLs: афф.ссылка";
pub const STATUS: &str = "Ответ API URLs: status";
pub const ERROR_MESSAGE: &str = "Ответ API URLs: error_message";
pub const ERROR_CODE: &str = "Ответ API URLs: error_code";

/// Price of the `index`-th (1-based) feed card.
#[must_use]
pub fn top_price(index: usize) -> String {
    format!("Ответ TOP-подборок [{index}]: Price")
}

#[must_use]
pub fn top_url(index: usize) -> String {
    format!("Ответ TOP-подборок [{index}]: URL")
}

#[must_use]
pub fn top_image(index: usize) -> String {
    format!("Ответ TOP-подборок [{index}]: Картинка")
}

#[must_use]
pub fn top_title(index: usize) -> String {
    format!("Ответ TOP-подборок [{index}]: Название")
}
