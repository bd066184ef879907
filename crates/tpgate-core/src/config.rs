use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a plain
/// `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let non_empty_path = |var: &str| -> Option<PathBuf> {
        lookup(var)
            .ok()
            .filter(|raw| !raw.trim().is_empty())
            .map(PathBuf::from)
    };

    let env = parse_environment(&or_default("TPGATE_ENV", "development"))?;

    let mut bind_addr = or_default("TPGATE_BIND_ADDR", "0.0.0.0:8080")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("TPGATE_BIND_ADDR", e.to_string()))?;
    // Hosting platforms hand out the listening port via PORT.
    if let Ok(port) = lookup("PORT") {
        let port = port
            .parse::<u16>()
            .map_err(|e| invalid("PORT", e.to_string()))?;
        bind_addr.set_port(port);
    }

    let log_level = or_default("TPGATE_LOG_LEVEL", "info");

    let request_timeout_secs = parse_u64("TPGATE_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(invalid(
            "TPGATE_REQUEST_TIMEOUT_SECS",
            "must be greater than zero".to_string(),
        ));
    }

    let travelpayouts_base_url = or_default(
        "TPGATE_TRAVELPAYOUTS_BASE_URL",
        "https://api.travelpayouts.com",
    );
    let wegotrip_com_base_url =
        or_default("TPGATE_WEGOTRIP_COM_BASE_URL", "https://app.wegotrip.com");
    let wegotrip_ru_base_url = or_default("TPGATE_WEGOTRIP_RU_BASE_URL", "https://wegotrip.ru");
    let reply_content_type = or_default("TPGATE_REPLY_CONTENT_TYPE", "instagram");

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        request_timeout_secs,
        travelpayouts_base_url,
        wegotrip_com_base_url,
        wegotrip_ru_base_url,
        reply_content_type,
        brands_path: non_empty_path("TPGATE_BRANDS_PATH"),
        cities_path: non_empty_path("TPGATE_CITIES_PATH"),
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for unrecognized values.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "TPGATE_ENV".to_string(),
            reason: format!(
                "unrecognized environment '{other}'; expected development, test, or production"
            ),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
