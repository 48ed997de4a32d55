//! Declarative extraction rule-sets.
//!
//! A rule-set is plain data: CSS selector strings paired with the way a value
//! is read out of the first matching element. Compiling and evaluating the
//! selectors is the scraper crate's job.
//!
//! Update these tables when a retailer changes its markup.

/// How a value is read from the element a [`Locator`] matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Whitespace-collapsed text content of the first match.
    Text,
    /// An attribute of the first match, e.g. `src` or `content`.
    Attr(&'static str),
    /// Text of the first match whose text contains the given character.
    TextContaining(char),
    /// Text of the first match joined with `.` to the text of the first
    /// match of `fraction`, for prices split into whole and fractional parts.
    PriceParts { fraction: &'static str },
}

/// One candidate: a CSS selector group and the read method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locator {
    pub selector: &'static str,
    pub method: Method,
}

impl Locator {
    const fn text(selector: &'static str) -> Self {
        Self {
            selector,
            method: Method::Text,
        }
    }

    const fn attr(selector: &'static str, attr: &'static str) -> Self {
        Self {
            selector,
            method: Method::Attr(attr),
        }
    }
}

/// Candidates for one field, evaluated in order until one yields a
/// non-empty value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule(pub &'static [Locator]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionRules {
    pub title: FieldRule,
    pub price: FieldRule,
    pub image: FieldRule,
    pub availability: FieldRule,
    /// Used when no availability candidate matches.
    pub default_availability: &'static str,
}

impl ExtractionRules {
    /// Every selector string in the rule-set, fraction selectors included.
    pub fn selectors(&self) -> impl Iterator<Item = &'static str> + '_ {
        [self.title, self.price, self.image, self.availability]
            .into_iter()
            .flat_map(|rule| rule.0.iter())
            .flat_map(|loc| {
                let extra = match loc.method {
                    Method::PriceParts { fraction } => Some(fraction),
                    _ => None,
                };
                std::iter::once(loc.selector).chain(extra)
            })
    }
}

pub const EBAY: ExtractionRules = ExtractionRules {
    title: FieldRule(&[
        Locator::text("#itm-details-header h1, .x-item-title-label"),
        Locator::text("h1[data-testid=\"product-details-name\"]"),
    ]),
    price: FieldRule(&[
        Locator::text(".price .notranslate"),
        Locator::text("[data-testid=\"price\"] .currency"),
        Locator::text(".u-flL.condText"),
    ]),
    image: FieldRule(&[
        Locator::attr(
            "#icImg, .ux-image-magnify img, [data-testid=\"image\"]",
            "src",
        ),
        Locator::attr(".zoom img", "src"),
    ]),
    availability: FieldRule(&[Locator::text(".u-flL.condText, .avail-qty")]),
    default_availability: "Available",
};

pub const AMAZON: ExtractionRules = ExtractionRules {
    title: FieldRule(&[Locator::text("#productTitle, .product-title")]),
    price: FieldRule(&[
        Locator::text(".a-price .a-offscreen"),
        Locator {
            selector: ".a-price-whole",
            method: Method::PriceParts {
                fraction: ".a-price-fraction",
            },
        },
        Locator::text("#price_inside_buybox"),
    ]),
    image: FieldRule(&[
        Locator::attr("#landingImage, .a-dynamic-image", "src"),
        Locator::attr(".imgTagWrapper img", "src"),
    ]),
    availability: FieldRule(&[Locator::text("#availability span, .a-declarative")]),
    default_availability: "In Stock",
};

pub const TARGET: ExtractionRules = ExtractionRules {
    title: FieldRule(&[Locator::text("[data-test=\"product-title\"], h1")]),
    price: FieldRule(&[
        Locator::text("[data-test=\"product-price\"] span, .price"),
        Locator {
            selector: ".sr-only",
            method: Method::TextContaining('$'),
        },
    ]),
    image: FieldRule(&[Locator::attr(
        "[data-test=\"product-image\"] img, .product-image img",
        "src",
    )]),
    availability: FieldRule(&[Locator::text(
        "[data-test=\"fulfillment-shipping\"], .availability",
    )]),
    default_availability: "In Stock",
};

pub const STOCKX: ExtractionRules = ExtractionRules {
    title: FieldRule(&[Locator::text("h1, .product-title")]),
    price: FieldRule(&[
        Locator::text(".product-price, .price"),
        Locator::text("[data-testid=\"product-price\"]"),
    ]),
    image: FieldRule(&[Locator::attr(
        ".product-media img, .product-image img",
        "src",
    )]),
    availability: FieldRule(&[Locator::text(".availability, .stock-status")]),
    default_availability: "Available",
};

pub const FARFETCH: ExtractionRules = ExtractionRules {
    title: FieldRule(&[Locator::text("[data-testid=\"product-name\"], h1")]),
    price: FieldRule(&[Locator::text("[data-testid=\"product-price\"], .price")]),
    image: FieldRule(&[Locator::attr(
        "[data-testid=\"product-image\"] img, .product-image img",
        "src",
    )]),
    availability: FieldRule(&[Locator::text(
        "[data-testid=\"availability\"], .availability",
    )]),
    default_availability: "In Stock",
};

/// Heuristic rule-set for pages without a dedicated profile: class and
/// attribute substring matching, with the `og:image` meta tag as the last
/// image candidate.
pub const GENERIC: ExtractionRules = ExtractionRules {
    title: FieldRule(&[
        Locator::text("h1"),
        Locator::text("[class*=\"title\"], [class*=\"product-name\"]"),
    ]),
    price: FieldRule(&[
        Locator::text("[class*=\"price\"], [class*=\"cost\"]"),
        Locator::text("[data-testid*=\"price\"]"),
    ]),
    image: FieldRule(&[
        Locator::attr("img[class*=\"product\"], img[class*=\"main\"]", "src"),
        Locator::attr("meta[property=\"og:image\"]", "content"),
    ]),
    availability: FieldRule(&[Locator::text(
        "[class*=\"stock\"], [class*=\"availability\"]",
    )]),
    default_availability: "Available",
};
