//! Shared data model and configuration for the price comparison pipeline.

pub mod app_config;
pub mod config;
pub mod currency;
pub mod platform;
pub mod records;
pub mod registry;
pub mod rules;

use thiserror::Error;

pub use app_config::{AppConfig, FetchSettings, SearchEngineSettings};
pub use config::{load_app_config, load_app_config_from_env};
pub use currency::{Currency, ExchangeRates};
pub use platform::{Platform, PlatformProfile, ShippingPolicy, TitleFlavor};
pub use records::{
    ExtractionRecord, NormalizedPriceRecord, Provenance, SearchQuery, SearchResult,
};
pub use registry::PlatformRegistry;
pub use rules::{ExtractionRules, FieldRule, Locator, Method};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
