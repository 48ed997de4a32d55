//! HTML field extraction driven by the declarative rule-sets in
//! [`pricecmp_core::rules`].

use pricecmp_core::rules::GENERIC;
use pricecmp_core::{
    Currency, ExtractionRecord, ExtractionRules, FieldRule, Locator, Method, Platform,
    PlatformProfile,
};
use reqwest::Url;
use rust_decimal::Decimal;
use scraper::{ElementRef, Html, Selector};

use crate::error::PipelineError;
use crate::normalize::parse_price;

/// Parses product pages for one platform, or with the generic heuristics
/// when the platform has no dedicated rule-set.
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    platform_name: String,
    rules: ExtractionRules,
    source_currency: Currency,
}

impl FieldExtractor {
    /// Picks the rule-set registered for `platform_name`, falling back to the
    /// generic rule-set for names outside the registry.
    #[must_use]
    pub fn for_platform(platform_name: &str) -> Self {
        match Platform::from_name(platform_name) {
            Some(platform) => Self::for_profile(&platform.profile()),
            None => Self::generic(platform_name),
        }
    }

    /// Uses the rule-set and source currency carried by `profile`.
    #[must_use]
    pub fn for_profile(profile: &PlatformProfile) -> Self {
        Self {
            platform_name: profile.name().to_owned(),
            rules: profile.rules,
            source_currency: profile.source_currency,
        }
    }

    #[must_use]
    pub fn generic(platform_name: &str) -> Self {
        Self {
            platform_name: platform_name.to_owned(),
            rules: GENERIC,
            source_currency: Currency::Usd,
        }
    }

    /// Extracts a record from `html` fetched from `page_url`.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::EmptyResult`] when the page yields neither a
    /// title nor a price, and [`PipelineError::InvalidExtraction`] when only
    /// one of them is missing (a price that parses to zero counts as
    /// missing). Image and availability are optional.
    pub fn extract(&self, html: &str, page_url: &str) -> Result<ExtractionRecord, PipelineError> {
        let document = Html::parse_document(html);

        let title = first_value(&document, self.rules.title).unwrap_or_default();
        let price = first_value(&document, self.rules.price)
            .map_or(Decimal::ZERO, |text| parse_price(&text));
        match (title.is_empty(), price.is_zero()) {
            (true, true) => {
                return Err(PipelineError::EmptyResult {
                    platform: self.platform_name.clone(),
                    what: "product fields",
                })
            }
            (true, false) => return Err(self.invalid("missing title")),
            (false, true) => return Err(self.invalid("missing or zero price")),
            (false, false) => {}
        }

        let image_url = first_value(&document, self.rules.image)
            .map(|src| absolutize(&src, page_url))
            .unwrap_or_default();

        let availability = first_value(&document, self.rules.availability)
            .unwrap_or_else(|| self.rules.default_availability.to_owned());

        tracing::debug!(
            platform = %self.platform_name,
            url = page_url,
            %price,
            "extracted product fields"
        );

        Ok(ExtractionRecord {
            title,
            price,
            source_currency: self.source_currency,
            image_url,
            availability,
            source_url: page_url.to_owned(),
            platform_name: self.platform_name.clone(),
        })
    }

    fn invalid(&self, reason: &'static str) -> PipelineError {
        PipelineError::InvalidExtraction {
            platform: self.platform_name.clone(),
            reason,
        }
    }
}

/// Convenience wrapper over [`FieldExtractor::for_platform`].
///
/// # Errors
///
/// See [`FieldExtractor::extract`].
pub fn extract(
    html: &str,
    platform_name: &str,
    page_url: &str,
) -> Result<ExtractionRecord, PipelineError> {
    FieldExtractor::for_platform(platform_name).extract(html, page_url)
}

/// Evaluates candidates in order; the first non-empty value wins.
fn first_value(document: &Html, rule: FieldRule) -> Option<String> {
    rule.0.iter().find_map(|locator| evaluate(document, locator))
}

fn evaluate(document: &Html, locator: &Locator) -> Option<String> {
    let selector = compile(locator.selector)?;
    let value = match locator.method {
        Method::Text => document.select(&selector).next().map(element_text),
        Method::Attr(name) => document
            .select(&selector)
            .next()
            .and_then(|el| el.value().attr(name))
            .map(|v| v.trim().to_owned()),
        Method::TextContaining(needle) => document
            .select(&selector)
            .map(element_text)
            .find(|text| text.contains(needle)),
        Method::PriceParts { fraction } => {
            let whole = document.select(&selector).next().map(element_text)?;
            let whole = whole.trim_end_matches('.');
            if whole.is_empty() {
                None
            } else {
                let cents = compile(fraction)
                    .and_then(|sel| document.select(&sel).next().map(element_text))
                    .unwrap_or_default();
                Some(format!("{whole}.{cents}"))
            }
        }
    };
    value.filter(|v| !v.is_empty())
}

fn compile(selector: &str) -> Option<Selector> {
    match Selector::parse(selector) {
        Ok(sel) => Some(sel),
        Err(e) => {
            tracing::warn!(selector, error = ?e, "skipping invalid CSS selector");
            None
        }
    }
}

/// Text content with runs of whitespace collapsed to single spaces.
fn element_text(el: ElementRef<'_>) -> String {
    el.text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Resolves relative and protocol-relative image URLs against the page.
fn absolutize(src: &str, page_url: &str) -> String {
    Url::parse(page_url)
        .and_then(|base| base.join(src))
        .map_or_else(|_| src.to_owned(), |url| url.to_string())
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
