use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::currency::Currency;
use crate::platform::Platform;

/// A search request. No identity; built once per aggregation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    /// Region the buyer ships to, e.g. `"HK"`.
    pub target_region: String,
    pub canonical_currency: Currency,
}

impl SearchQuery {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        target_region: impl Into<String>,
        canonical_currency: Currency,
    ) -> Self {
        Self {
            text: text.into(),
            target_region: target_region.into(),
            canonical_currency,
        }
    }
}

/// A candidate product page found by discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub snippet: Option<String>,
}

/// Raw fields parsed out of a product page, before currency conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionRecord {
    pub title: String,
    /// Parsed from the page's price text; always positive for a valid record.
    pub price: Decimal,
    pub source_currency: Currency,
    /// Absolute image URL, or empty when the page has none.
    pub image_url: String,
    pub availability: String,
    pub source_url: String,
    /// Name the page was extracted for; may be outside the registry when the
    /// generic rule-set was used.
    pub platform_name: String,
}

/// Where a record's data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Extracted from a fetched product page.
    Live,
    /// Produced by the fallback generator after the live cascade failed.
    Synthetic,
}

/// The canonical record returned to callers.
///
/// `price` and `shipping` are in `currency`, non-negative, and rounded to
/// two decimal places. `ships_to_target` and a zero `shipping` for
/// non-shipping platforms come from the platform profile, never the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedPriceRecord {
    pub id: String,
    pub platform: Platform,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub currency: Currency,
    #[serde(with = "rust_decimal::serde::float")]
    pub shipping: Decimal,
    pub ships_to_target: bool,
    pub url: String,
    pub image: String,
    pub title: String,
    pub availability: String,
    pub provenance: Provenance,
}
