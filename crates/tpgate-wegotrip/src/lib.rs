pub mod cities;
pub mod client;
pub mod error;
pub mod pagination;
pub mod types;

pub use cities::{CityIndex, Region, ResolvedCity};
pub use client::WegotripClient;
pub use error::ClientBuildError;
pub use types::{FeedItem, FeedQuery};
