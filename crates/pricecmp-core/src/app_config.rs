use std::time::Duration;

use crate::currency::ExchangeRates;

pub const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// HTTP behavior for one class of request (product pages or search pages).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSettings {
    pub timeout: Duration,
    pub max_redirects: usize,
    pub user_agent: String,
    /// Additional attempts after the first failure. Zero means a single attempt.
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(15),
            max_redirects: 5,
            user_agent: BROWSER_USER_AGENT.to_string(),
            max_retries: 0,
            retry_backoff_base_ms: 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchEngineSettings {
    /// Results endpoint, queried with `?q=site:<domain> <query>`.
    pub endpoint: String,
    /// Maximum organic results kept per lookup.
    pub result_limit: usize,
}

impl Default for SearchEngineSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://www.google.com/search".to_string(),
            result_limit: 5,
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub target_region: String,
    pub rates: ExchangeRates,
    pub page_fetch: FetchSettings,
    pub search_fetch: FetchSettings,
    pub search_engine: SearchEngineSettings,
    /// Fixed seed for the synthetic fallback; `None` seeds from OS entropy.
    pub synthetic_seed: Option<u64>,
    /// Placeholder partner API identifier. Carried for a future direct
    /// integration; nothing in the pipeline reads it.
    pub partner_app_id: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("target_region", &self.target_region)
            .field("rates", &self.rates)
            .field("page_fetch", &self.page_fetch)
            .field("search_fetch", &self.search_fetch)
            .field("search_engine", &self.search_engine)
            .field("synthetic_seed", &self.synthetic_seed)
            .field(
                "partner_app_id",
                &self.partner_app_id.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}
