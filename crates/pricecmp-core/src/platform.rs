use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::currency::Currency;
use crate::rules::{self, ExtractionRules};

/// The closed set of retail platforms the pipeline compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Platform {
    #[serde(rename = "eBay")]
    Ebay,
    #[serde(rename = "Amazon US")]
    AmazonUs,
    #[serde(rename = "Target")]
    Target,
    #[serde(rename = "StockX")]
    StockX,
    #[serde(rename = "Farfetch")]
    Farfetch,
}

impl Platform {
    pub const ALL: [Platform; 5] = [
        Platform::Ebay,
        Platform::AmazonUs,
        Platform::Target,
        Platform::StockX,
        Platform::Farfetch,
    ];

    /// Display name, also the registry key, e.g. `"Amazon US"`.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Platform::Ebay => "eBay",
            Platform::AmazonUs => "Amazon US",
            Platform::Target => "Target",
            Platform::StockX => "StockX",
            Platform::Farfetch => "Farfetch",
        }
    }

    /// Lowercase identifier used as a record id prefix, e.g. `"amazon"`.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Platform::Ebay => "ebay",
            Platform::AmazonUs => "amazon",
            Platform::Target => "target",
            Platform::StockX => "stockx",
            Platform::Farfetch => "farfetch",
        }
    }

    /// Resolves a display name or slug, ignoring case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted = name.trim();
        Self::ALL.into_iter().find(|p| {
            p.name().eq_ignore_ascii_case(wanted) || p.slug().eq_ignore_ascii_case(wanted)
        })
    }

    /// The static profile for this platform.
    #[must_use]
    pub fn profile(self) -> PlatformProfile {
        match self {
            Platform::Ebay => PlatformProfile {
                platform: self,
                search_domain: "ebay.com",
                direct_search_url: "https://www.ebay.com/sch/i.html?_nkw={query}",
                rules: rules::EBAY,
                source_currency: Currency::Usd,
                shipping: ShippingPolicy::Ships {
                    range: (usd(10), usd(60)),
                    free_chance: 0.0,
                },
                price_range: (usd(100), usd(900)),
                title_flavor: TitleFlavor {
                    alternate: (" - New | eBay", 0.5),
                    plain: " - Used | eBay",
                },
            },
            Platform::AmazonUs => PlatformProfile {
                platform: self,
                search_domain: "amazon.com",
                direct_search_url: "https://www.amazon.com/s?k={query}",
                rules: rules::AMAZON,
                source_currency: Currency::Usd,
                shipping: ShippingPolicy::Ships {
                    range: (usd(15), usd(45)),
                    free_chance: 0.4,
                },
                price_range: (usd(200), usd(1000)),
                title_flavor: TitleFlavor {
                    alternate: (" - Prime | Amazon", 0.6),
                    plain: " | Amazon",
                },
            },
            Platform::Target => PlatformProfile {
                platform: self,
                search_domain: "target.com",
                direct_search_url: "https://www.target.com/s?searchTerm={query}",
                rules: rules::TARGET,
                source_currency: Currency::Usd,
                shipping: ShippingPolicy::DoesNotShip,
                price_range: (usd(150), usd(750)),
                title_flavor: TitleFlavor {
                    alternate: (" - Target Brand | Target", 0.4),
                    plain: " | Target",
                },
            },
            Platform::StockX => PlatformProfile {
                platform: self,
                search_domain: "stockx.com",
                direct_search_url: "https://stockx.com/search?s={query}",
                rules: rules::STOCKX,
                source_currency: Currency::Usd,
                shipping: ShippingPolicy::Ships {
                    range: (usd(20), usd(60)),
                    free_chance: 0.0,
                },
                price_range: (usd(300), usd(1500)),
                title_flavor: TitleFlavor {
                    alternate: (" - StockX Authenticated | StockX", 0.9),
                    plain: " | StockX",
                },
            },
            Platform::Farfetch => PlatformProfile {
                platform: self,
                search_domain: "farfetch.com",
                direct_search_url: "https://www.farfetch.com/shopping/search/items.aspx?q={query}",
                rules: rules::FARFETCH,
                source_currency: Currency::Usd,
                shipping: ShippingPolicy::Ships {
                    range: (usd(30), usd(90)),
                    free_chance: 0.0,
                },
                price_range: (usd(500), usd(2500)),
                title_flavor: TitleFlavor {
                    alternate: (" - Designer Collection | Farfetch", 0.7),
                    plain: " | Farfetch",
                },
            },
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn usd(whole: i64) -> Decimal {
    Decimal::from(whole)
}

/// Whether a platform delivers to the target region, and what it charges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShippingPolicy {
    /// Never ships to the target region: shipping is always zero and the
    /// record is flagged as not shipping.
    DoesNotShip,
    /// Ships; cost is estimated uniformly from `range` (source currency),
    /// except that with probability `free_chance` it is free.
    Ships {
        range: (Decimal, Decimal),
        free_chance: f64,
    },
}

impl ShippingPolicy {
    #[must_use]
    pub fn ships_to_target(&self) -> bool {
        matches!(self, ShippingPolicy::Ships { .. })
    }
}

/// Suffix appended to the query to title a synthetic record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TitleFlavor {
    /// Suffix used with the given probability.
    pub alternate: (&'static str, f64),
    /// Suffix used otherwise.
    pub plain: &'static str,
}

/// Static configuration for one retailer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlatformProfile {
    pub platform: Platform,
    /// Domain used to scope search-engine queries, e.g. `"ebay.com"`.
    pub search_domain: &'static str,
    /// Search page URL with a `{query}` placeholder for the encoded query.
    pub direct_search_url: &'static str,
    pub rules: ExtractionRules,
    pub source_currency: Currency,
    pub shipping: ShippingPolicy,
    /// Bounds for synthetic prices, in the source currency.
    pub price_range: (Decimal, Decimal),
    pub title_flavor: TitleFlavor,
}

impl PlatformProfile {
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.platform.name()
    }

    #[must_use]
    pub fn ships_to_target(&self) -> bool {
        self.shipping.ships_to_target()
    }

    /// Substitutes an already URL-encoded query into the direct-search
    /// template.
    #[must_use]
    pub fn direct_search_url_for(&self, encoded_query: &str) -> String {
        self.direct_search_url.replace("{query}", encoded_query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_name_accepts_display_names_and_slugs() {
        assert_eq!(Platform::from_name("eBay"), Some(Platform::Ebay));
        assert_eq!(Platform::from_name("amazon us"), Some(Platform::AmazonUs));
        assert_eq!(Platform::from_name("amazon"), Some(Platform::AmazonUs));
        assert_eq!(Platform::from_name(" StockX "), Some(Platform::StockX));
        assert_eq!(Platform::from_name("Walmart"), None);
    }

    #[test]
    fn profiles_are_keyed_by_their_platform() {
        for platform in Platform::ALL {
            assert_eq!(platform.profile().platform, platform);
            assert_eq!(platform.profile().name(), platform.name());
        }
    }

    #[test]
    fn target_does_not_ship() {
        assert!(!Platform::Target.profile().ships_to_target());
        for platform in [
            Platform::Ebay,
            Platform::AmazonUs,
            Platform::StockX,
            Platform::Farfetch,
        ] {
            assert!(platform.profile().ships_to_target(), "{platform}");
        }
    }

    #[test]
    fn price_ranges_are_ordered() {
        for platform in Platform::ALL {
            let (min, max) = platform.profile().price_range;
            assert!(min < max, "{platform}");
        }
    }

    #[test]
    fn direct_search_url_substitutes_query() {
        let url = Platform::Farfetch
            .profile()
            .direct_search_url_for("Nike%20Air%20Jordan");
        assert_eq!(
            url,
            "https://www.farfetch.com/shopping/search/items.aspx?q=Nike%20Air%20Jordan"
        );
    }

    #[test]
    fn platform_serializes_as_display_name() {
        let json = serde_json::to_string(&Platform::AmazonUs).unwrap();
        assert_eq!(json, "\"Amazon US\"");
    }
}
