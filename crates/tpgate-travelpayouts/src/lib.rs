pub mod client;
pub mod error;
pub mod types;

pub use client::{TravelpayoutsClient, SUB_ID};
pub use error::ClientBuildError;
