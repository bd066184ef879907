pub mod app_config;
pub mod brands;
pub mod config;
pub mod error;
pub mod wire;

pub use app_config::{AppConfig, Environment};
pub use brands::{load_brand_catalog, BrandCatalog, BrandEntry, BrandsFile};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{codes, ErrorBody, ProviderError};

use thiserror::Error;

/// Errors raised while loading configuration at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read {path}: {source}")]
    FileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),
}
