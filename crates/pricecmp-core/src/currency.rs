use std::collections::HashMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Currencies the pipeline knows how to label and convert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Hkd,
    Eur,
    Gbp,
}

impl Currency {
    /// ISO 4217 code, e.g. `"HKD"`.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Hkd => "HKD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "HKD" => Ok(Currency::Hkd),
            "EUR" => Ok(Currency::Eur),
            "GBP" => Ok(Currency::Gbp),
            other => Err(format!("unsupported currency code \"{other}\"")),
        }
    }
}

/// Fixed multipliers from a source currency into the canonical currency.
///
/// Rates are static configuration and go stale; there is no live feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeRates {
    canonical: Currency,
    rates: HashMap<Currency, Decimal>,
}

impl ExchangeRates {
    #[must_use]
    pub fn new(canonical: Currency) -> Self {
        Self {
            canonical,
            rates: HashMap::new(),
        }
    }

    /// Sets the multiplier that converts one unit of `source` into the
    /// canonical currency.
    #[must_use]
    pub fn with_rate(mut self, source: Currency, rate: Decimal) -> Self {
        self.rates.insert(source, rate);
        self
    }

    #[must_use]
    pub fn canonical(&self) -> Currency {
        self.canonical
    }

    /// Returns the multiplier for `source`, or `None` when no rate is
    /// configured. Converting the canonical currency into itself is always 1.
    #[must_use]
    pub fn rate(&self, source: Currency) -> Option<Decimal> {
        if source == self.canonical {
            return Some(Decimal::ONE);
        }
        self.rates.get(&source).copied()
    }
}

impl Default for ExchangeRates {
    /// USD → HKD at the pegged 7.8.
    fn default() -> Self {
        Self::new(Currency::Hkd).with_rate(Currency::Usd, Decimal::new(78, 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_parses_case_insensitively() {
        assert_eq!("hkd".parse::<Currency>().unwrap(), Currency::Hkd);
        assert_eq!(" USD ".parse::<Currency>().unwrap(), Currency::Usd);
        assert!("XYZ".parse::<Currency>().is_err());
    }

    #[test]
    fn currency_serializes_as_iso_code() {
        let json = serde_json::to_string(&Currency::Hkd).unwrap();
        assert_eq!(json, "\"HKD\"");
    }

    #[test]
    fn default_rates_peg_usd_to_hkd() {
        let rates = ExchangeRates::default();
        assert_eq!(rates.canonical(), Currency::Hkd);
        assert_eq!(rates.rate(Currency::Usd), Some(Decimal::new(78, 1)));
    }

    #[test]
    fn canonical_currency_converts_at_one() {
        let rates = ExchangeRates::new(Currency::Eur);
        assert_eq!(rates.rate(Currency::Eur), Some(Decimal::ONE));
    }

    #[test]
    fn unknown_pair_has_no_rate() {
        let rates = ExchangeRates::default();
        assert_eq!(rates.rate(Currency::Gbp), None);
    }
}
