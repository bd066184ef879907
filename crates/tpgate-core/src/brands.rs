use std::collections::{HashMap, HashSet};
use std::path::Path;

use reqwest::Url;
use serde::Deserialize;

use crate::error::ProviderError;
use crate::ConfigError;

/// Brands every catalog starts with.
const DEFAULT_BRANDS: &[(&str, &str)] = &[
    ("booking", "https://www.booking.com"),
    ("agoda", "https://www.agoda.com"),
    ("aviasales", "https://aviasales.com"),
    ("hotels", "https://hotels.com"),
    ("expedia", "https://www.expedia.com"),
];

#[derive(Debug, Clone, Deserialize)]
pub struct BrandEntry {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct BrandsFile {
    pub brands: Vec<BrandEntry>,
}

/// Read-only brand name → landing URL table.
///
/// Names match exactly; the chat platform sends the same strings the
/// catalog was seeded with.
#[derive(Debug, Clone)]
pub struct BrandCatalog {
    urls: HashMap<String, String>,
}

impl Default for BrandCatalog {
    fn default() -> Self {
        Self {
            urls: DEFAULT_BRANDS
                .iter()
                .map(|(name, url)| ((*name).to_string(), (*url).to_string()))
                .collect(),
        }
    }
}

impl BrandCatalog {
    /// Adds entries whose name is not already present. Existing names keep
    /// their URL. Returns how many entries were inserted.
    pub fn extend_missing(&mut self, entries: impl IntoIterator<Item = BrandEntry>) -> usize {
        let mut inserted = 0;
        for entry in entries {
            if self.urls.contains_key(&entry.name) {
                tracing::debug!(brand = %entry.name, "brand already in catalog; keeping existing url");
                continue;
            }
            self.urls.insert(entry.name, entry.url);
            inserted += 1;
        }
        inserted
    }

    /// Resolves a brand name to its landing URL.
    ///
    /// # Errors
    ///
    /// Returns a `brand_not_found` [`ProviderError`] when the name is unknown.
    pub fn resolve(&self, name: &str) -> Result<&str, ProviderError> {
        self.urls
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| ProviderError::brand_not_found(name))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

/// Builds the brand catalog: defaults first, then entries from `path` for
/// names the defaults do not cover.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_brand_catalog(path: Option<&Path>) -> Result<BrandCatalog, ConfigError> {
    let mut catalog = BrandCatalog::default();
    let Some(path) = path else {
        return Ok(catalog);
    };

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    let brands_file: BrandsFile = serde_yaml::from_str(&content)?;
    validate_brands(&brands_file)?;

    let inserted = catalog.extend_missing(brands_file.brands);
    tracing::info!(
        path = %path.display(),
        inserted,
        total = catalog.len(),
        "loaded brand catalog"
    );
    Ok(catalog)
}

fn validate_brands(brands_file: &BrandsFile) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();

    for brand in &brands_file.brands {
        if brand.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "brand name must be non-empty".to_string(),
            ));
        }

        if let Err(e) = Url::parse(&brand.url) {
            return Err(ConfigError::Validation(format!(
                "brand '{}' has invalid url '{}': {e}",
                brand.name, brand.url
            )));
        }

        if !seen_names.insert(brand.name.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate brand name: '{}'",
                brand.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "brands_test.rs"]
mod tests;
