//! Price text parsing, currency conversion, and assembly of the canonical
//! [`NormalizedPriceRecord`] from a raw [`ExtractionRecord`].

use std::str::FromStr;
use std::sync::LazyLock;

use pricecmp_core::{
    Currency, ExchangeRates, ExtractionRecord, NormalizedPriceRecord, Platform, PlatformProfile,
    Provenance,
};
use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};
use uuid::Uuid;

use crate::error::PipelineError;
use crate::imagery::platform_placeholder;

static LEADING_DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\d+(?:\.\d+)?|\.\d+)").expect("valid regex"));

/// Parses free-form price text such as `"$1,234.56"` or `"€45"`.
///
/// Every character other than ASCII digits and `.` is discarded (so commas
/// act as thousands separators), and the longest leading `digits[.digits]`
/// run is parsed. Returns zero when nothing parses; callers treat a zero
/// price as "no price".
#[must_use]
pub fn parse_price(text: &str) -> Decimal {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    let Some(found) = LEADING_DECIMAL.find(&cleaned) else {
        return Decimal::ZERO;
    };
    let literal = found.as_str();
    let parsed = if literal.starts_with('.') {
        Decimal::from_str(&format!("0{literal}"))
    } else {
        Decimal::from_str(literal)
    };
    parsed.unwrap_or(Decimal::ZERO)
}

/// Rounds to two decimal places, half away from zero.
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Builds a record id unique to this call, prefixed with the platform slug.
pub(crate) fn record_id(platform: Platform) -> String {
    format!("{}_{}", platform.slug(), Uuid::new_v4().simple())
}

/// Converts amounts into the canonical currency using a fixed rate table.
#[derive(Debug, Clone, Default)]
pub struct PriceNormalizer {
    rates: ExchangeRates,
}

impl PriceNormalizer {
    #[must_use]
    pub fn new(rates: ExchangeRates) -> Self {
        Self { rates }
    }

    #[must_use]
    pub fn canonical(&self) -> Currency {
        self.rates.canonical()
    }

    /// See [`parse_price`].
    #[must_use]
    pub fn parse(&self, text: &str) -> Decimal {
        parse_price(text)
    }

    /// Converts `amount` in `source` into the canonical currency, rounded to
    /// two decimal places. Negative inputs clamp to zero.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::MissingRate`] if no rate is configured for
    /// `source`, and [`PipelineError::AmountOutOfRange`] if the converted
    /// amount does not fit in a [`Decimal`].
    pub fn convert(&self, amount: Decimal, source: Currency) -> Result<Decimal, PipelineError> {
        let rate = self
            .rates
            .rate(source)
            .ok_or(PipelineError::MissingRate {
                from: source,
                to: self.rates.canonical(),
            })?;
        amount
            .max(Decimal::ZERO)
            .checked_mul(rate)
            .map(round_money)
            .ok_or(PipelineError::AmountOutOfRange {
                amount,
                from: source,
                to: self.rates.canonical(),
            })
    }

    /// Assembles the canonical record for a live extraction.
    ///
    /// `shipping_estimate` is in the profile's source currency and is
    /// ignored for platforms that do not ship to the target region. A page
    /// without an image gets the platform's placeholder.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::MissingRate`] or
    /// [`PipelineError::AmountOutOfRange`] if the extraction's price or the
    /// shipping estimate cannot be converted.
    pub fn normalize(
        &self,
        record: ExtractionRecord,
        profile: &PlatformProfile,
        shipping_estimate: Decimal,
    ) -> Result<NormalizedPriceRecord, PipelineError> {
        let price = self.convert(record.price, record.source_currency)?;
        let ships_to_target = profile.ships_to_target();
        let shipping = if ships_to_target {
            self.convert(shipping_estimate, profile.source_currency)?
        } else {
            Decimal::ZERO
        };

        let image = if record.image_url.is_empty() {
            platform_placeholder(profile.name()).to_owned()
        } else {
            record.image_url
        };

        Ok(NormalizedPriceRecord {
            id: record_id(profile.platform),
            platform: profile.platform,
            price,
            currency: self.canonical(),
            shipping,
            ships_to_target,
            url: record.source_url,
            image,
            title: record.title,
            availability: record.availability,
            provenance: Provenance::Live,
        })
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
