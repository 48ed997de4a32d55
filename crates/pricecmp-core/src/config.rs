use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;

use crate::app_config::{AppConfig, FetchSettings, SearchEngineSettings, BROWSER_USER_AGENT};
use crate::currency::{Currency, ExchangeRates};
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
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_rate = |var: &str| -> Result<Option<Decimal>, ConfigError> {
        let Ok(raw) = lookup(var) else {
            return Ok(None);
        };
        let rate = Decimal::from_str(raw.trim()).map_err(|e| invalid(var, e.to_string()))?;
        if rate <= Decimal::ZERO {
            return Err(invalid(var, format!("rate must be positive, got {rate}")));
        }
        Ok(Some(rate))
    };

    let log_level = or_default("PRICECMP_LOG_LEVEL", "info");
    let target_region = or_default("PRICECMP_TARGET_REGION", "HK");

    let canonical = Currency::from_str(&or_default("PRICECMP_CANONICAL_CURRENCY", "HKD"))
        .map_err(|reason| invalid("PRICECMP_CANONICAL_CURRENCY", reason))?;

    let mut rates = ExchangeRates::new(canonical);
    let usd_rate = parse_rate("PRICECMP_USD_RATE")?.unwrap_or(Decimal::new(78, 1));
    rates = rates.with_rate(Currency::Usd, usd_rate);
    if let Some(rate) = parse_rate("PRICECMP_EUR_RATE")? {
        rates = rates.with_rate(Currency::Eur, rate);
    }
    if let Some(rate) = parse_rate("PRICECMP_GBP_RATE")? {
        rates = rates.with_rate(Currency::Gbp, rate);
    }

    let user_agent = or_default("PRICECMP_USER_AGENT", BROWSER_USER_AGENT);
    let max_redirects = parse_usize("PRICECMP_MAX_REDIRECTS", "5")?;
    let max_retries = parse_u32("PRICECMP_FETCH_MAX_RETRIES", "0")?;
    let retry_backoff_base_ms = parse_u64("PRICECMP_FETCH_RETRY_BACKOFF_BASE_MS", "500")?;

    let page_fetch = FetchSettings {
        timeout: Duration::from_secs(parse_u64("PRICECMP_FETCH_TIMEOUT_SECS", "15")?),
        max_redirects,
        user_agent: user_agent.clone(),
        max_retries,
        retry_backoff_base_ms,
    };
    let search_fetch = FetchSettings {
        timeout: Duration::from_secs(parse_u64("PRICECMP_SEARCH_TIMEOUT_SECS", "10")?),
        max_redirects,
        user_agent,
        max_retries,
        retry_backoff_base_ms,
    };

    let search_engine = SearchEngineSettings {
        endpoint: or_default(
            "PRICECMP_SEARCH_ENGINE_URL",
            "https://www.google.com/search",
        ),
        result_limit: parse_usize("PRICECMP_SEARCH_RESULT_LIMIT", "5")?,
    };

    let synthetic_seed = match lookup("PRICECMP_SYNTHETIC_SEED") {
        Ok(raw) => Some(
            raw.trim()
                .parse::<u64>()
                .map_err(|e| invalid("PRICECMP_SYNTHETIC_SEED", e.to_string()))?,
        ),
        Err(_) => None,
    };

    let partner_app_id = lookup("PRICECMP_PARTNER_APP_ID")
        .ok()
        .filter(|v| !v.trim().is_empty());

    Ok(AppConfig {
        log_level,
        target_region,
        rates,
        page_fetch,
        search_fetch,
        search_engine,
        synthetic_seed,
        partner_app_id,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
