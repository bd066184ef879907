//! City name → WeGoTrip city id resolution.
//!
//! WeGoTrip runs two disjoint catalogs: the international one on
//! `app.wegotrip.com` and the Russian one on `wegotrip.ru`. A city id is only
//! meaningful on the catalog it came from, so the region a name resolves in
//! decides both the API host and the public link domain for the whole request.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

use serde::Deserialize;
use tpgate_core::{ConfigError, ProviderError};

/// Built-in international catalog.
const COM_CITIES: &[(&str, u32)] = &[
    ("amsterdam", 20),
    ("амстердам", 20),
    ("athens", 36),
    ("афины", 36),
    ("barcelona", 3),
    ("барселона", 3),
    ("berlin", 8),
    ("берлин", 8),
    ("budapest", 27),
    ("будапешт", 27),
    ("dubai", 143),
    ("дубай", 143),
    ("florence", 12),
    ("флоренция", 12),
    ("istanbul", 61),
    ("стамбул", 61),
    ("lisbon", 29),
    ("лиссабон", 29),
    ("london", 9),
    ("лондон", 9),
    ("madrid", 17),
    ("мадрид", 17),
    ("milan", 14),
    ("милан", 14),
    ("paris", 1),
    ("париж", 1),
    ("prague", 6),
    ("прага", 6),
    ("rome", 2),
    ("рим", 2),
    ("tbilisi", 102),
    ("тбилиси", 102),
    ("venice", 11),
    ("венеция", 11),
    ("vienna", 7),
    ("вена", 7),
    ("yerevan", 118),
    ("ереван", 118),
];

/// Built-in Russian catalog.
const RU_CITIES: &[(&str, u32)] = &[
    ("moscow", 1),
    ("москва", 1),
    ("saint petersburg", 2),
    ("st. petersburg", 2),
    ("санкт-петербург", 2),
    ("петербург", 2),
    ("kazan", 5),
    ("казань", 5),
    ("kaliningrad", 9),
    ("калининград", 9),
    ("sochi", 4),
    ("сочи", 4),
    ("nizhny novgorod", 12),
    ("нижний новгород", 12),
    ("yekaterinburg", 15),
    ("екатеринбург", 15),
    ("vladivostok", 23),
    ("владивосток", 23),
];

static BUILT_IN: LazyLock<CityIndex> = LazyLock::new(|| CityIndex {
    com: table_from(COM_CITIES),
    ru: table_from(RU_CITIES),
});

fn table_from(entries: &[(&str, u32)]) -> HashMap<String, u32> {
    entries
        .iter()
        .map(|(name, id)| (normalize_city_name(name), *id))
        .collect()
}

/// Canonical lookup key: trimmed and lowercased. No fuzzy matching beyond that.
#[must_use]
pub fn normalize_city_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Which WeGoTrip catalog a city belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// International catalog, checked first.
    Com,
    Ru,
}

impl Region {
    /// Host used in public product links.
    #[must_use]
    pub fn link_domain(self) -> &'static str {
        match self {
            Region::Com => "app.wegotrip.com",
            Region::Ru => "wegotrip.ru",
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Region::Com => "com",
            Region::Ru => "ru",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedCity {
    pub id: u32,
    pub region: Region,
}

/// Two read-only name → id tables. Safe to share across requests without locking.
#[derive(Debug, Clone, Default)]
pub struct CityIndex {
    com: HashMap<String, u32>,
    ru: HashMap<String, u32>,
}

#[derive(Debug, Deserialize)]
struct CitiesFile {
    #[serde(default)]
    com: HashMap<String, u32>,
    #[serde(default)]
    ru: HashMap<String, u32>,
}

impl CityIndex {
    /// Builds an index from raw tables; names are normalized on the way in.
    #[must_use]
    pub fn new(com: HashMap<String, u32>, ru: HashMap<String, u32>) -> Self {
        let normalize = |table: HashMap<String, u32>| {
            table
                .into_iter()
                .map(|(name, id)| (normalize_city_name(&name), id))
                .collect()
        };
        Self {
            com: normalize(com),
            ru: normalize(ru),
        }
    }

    /// The compiled-in tables.
    #[must_use]
    pub fn built_in() -> Self {
        BUILT_IN.clone()
    }

    /// Loads the tables from a YAML file shaped `{com: {name: id}, ru: {name: id}}`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or parsed, if both
    /// tables are empty, if any id is zero, or if two names in one table
    /// differ only by case or surrounding whitespace.
    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileIo {
            path: path.display().to_string(),
            source: e,
        })?;
        let file: CitiesFile = serde_yaml::from_str(&content)?;

        if file.com.is_empty() && file.ru.is_empty() {
            return Err(ConfigError::Validation(format!(
                "{} defines no cities",
                path.display()
            )));
        }
        if let Some((name, _)) = file
            .com
            .iter()
            .chain(file.ru.iter())
            .find(|(_, id)| **id == 0)
        {
            return Err(ConfigError::Validation(format!(
                "city '{name}' has id 0; ids must be positive"
            )));
        }

        check_normalized_names(Region::Com, &file.com)?;
        check_normalized_names(Region::Ru, &file.ru)?;

        let index = Self::new(file.com, file.ru);
        tracing::info!(
            path = %path.display(),
            com = index.com.len(),
            ru = index.ru.len(),
            "loaded city index"
        );
        Ok(index)
    }

    /// Resolves a city name, international catalog first.
    ///
    /// # Errors
    ///
    /// Returns a `city_not_found` [`ProviderError`] when neither catalog knows the name.
    pub fn resolve(&self, city: &str) -> Result<ResolvedCity, ProviderError> {
        let key = normalize_city_name(city);
        if let Some(&id) = self.com.get(&key) {
            return Ok(ResolvedCity {
                id,
                region: Region::Com,
            });
        }
        if let Some(&id) = self.ru.get(&key) {
            return Ok(ResolvedCity {
                id,
                region: Region::Ru,
            });
        }
        Err(ProviderError::city_not_found(city))
    }
}

/// Rejects two names in one table that normalize to the same key.
fn check_normalized_names(region: Region, table: &HashMap<String, u32>) -> Result<(), ConfigError> {
    let mut seen: HashMap<String, &str> = HashMap::with_capacity(table.len());
    for name in table.keys() {
        if let Some(previous) = seen.insert(normalize_city_name(name), name) {
            return Err(ConfigError::Validation(format!(
                "cities '{previous}' and '{name}' collide in the {region} table"
            )));
        }
    }
    Ok(())
}
