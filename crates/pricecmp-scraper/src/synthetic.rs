//! Placeholder records for platforms whose live cascade failed.
//!
//! Values are drawn uniformly from each profile's documented ranges, so a
//! synthetic record is always plausible and always bounded. Records are
//! tagged [`Provenance::Synthetic`].

use std::sync::{Mutex, PoisonError};

use pricecmp_core::{NormalizedPriceRecord, Platform, PlatformProfile, Provenance, ShippingPolicy};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::discovery::direct_search;
use crate::imagery::product_image;
use crate::normalize::{record_id, round_money, PriceNormalizer};

/// Generates fallback records from a seedable random source.
///
/// The random source is the only mutable state shared between concurrent
/// platform tasks; the lock is held only while drawing.
#[derive(Debug)]
pub struct SyntheticDataGenerator {
    rng: Mutex<StdRng>,
    normalizer: PriceNormalizer,
}

/// Random choices for one record, in source currency.
struct Draw {
    price: Decimal,
    shipping: Decimal,
    use_alternate_title: bool,
    availability: &'static str,
}

impl SyntheticDataGenerator {
    /// A fixed `seed` makes the sequence of generated records reproducible;
    /// `None` seeds from the operating system.
    #[must_use]
    pub fn new(seed: Option<u64>, normalizer: PriceNormalizer) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(rng, normalizer)
    }

    #[must_use]
    pub fn with_rng(rng: StdRng, normalizer: PriceNormalizer) -> Self {
        Self {
            rng: Mutex::new(rng),
            normalizer,
        }
    }

    /// Shipping cost estimate in the profile's source currency; zero for
    /// platforms that do not ship to the target region.
    pub fn estimate_shipping(&self, profile: &PlatformProfile) -> Decimal {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        draw_shipping(&mut *rng, profile.shipping)
    }

    /// A complete record for `query` on the profile's platform. Never fails.
    pub fn generate(&self, query: &str, profile: &PlatformProfile) -> NormalizedPriceRecord {
        let draw = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            draw_record(&mut *rng, profile)
        };

        let source = profile.source_currency;
        let converted = self.normalizer.convert(draw.price, source).and_then(|price| {
            self.normalizer
                .convert(draw.shipping, source)
                .map(|shipping| (price, shipping))
        });
        let (price, shipping, currency) = match converted {
            Ok((price, shipping)) => (price, shipping, self.normalizer.canonical()),
            Err(e) => {
                tracing::warn!(
                    platform = %profile.platform,
                    error = %e,
                    "keeping synthetic record in source currency"
                );
                (round_money(draw.price), round_money(draw.shipping), source)
            }
        };

        let suffix = if draw.use_alternate_title {
            profile.title_flavor.alternate.0
        } else {
            profile.title_flavor.plain
        };

        NormalizedPriceRecord {
            id: record_id(profile.platform),
            platform: profile.platform,
            price,
            currency,
            shipping,
            ships_to_target: profile.ships_to_target(),
            url: direct_search(query, profile).url,
            image: product_image(query, profile.platform),
            title: format!("{query}{suffix}"),
            availability: draw.availability.to_owned(),
            provenance: Provenance::Synthetic,
        }
    }
}

fn draw_record<R: Rng + ?Sized>(rng: &mut R, profile: &PlatformProfile) -> Draw {
    let price = draw_amount(rng, profile.price_range);
    let shipping = draw_shipping(rng, profile.shipping);
    let use_alternate_title = rng.random_bool(profile.title_flavor.alternate.1);
    let availability = match profile.platform {
        Platform::Ebay => stock_level(rng, 0.8),
        Platform::Target => stock_level(rng, 0.7),
        Platform::AmazonUs | Platform::Farfetch => "In Stock",
        Platform::StockX => "Available",
    };
    Draw {
        price,
        shipping,
        use_alternate_title,
        availability,
    }
}

fn draw_shipping<R: Rng + ?Sized>(rng: &mut R, policy: ShippingPolicy) -> Decimal {
    match policy {
        ShippingPolicy::DoesNotShip => Decimal::ZERO,
        ShippingPolicy::Ships { range, free_chance } => {
            if free_chance > 0.0 && rng.random_bool(free_chance) {
                Decimal::ZERO
            } else {
                draw_amount(rng, range)
            }
        }
    }
}

/// Uniform amount in whole cents within `[min, max]`.
fn draw_amount<R: Rng + ?Sized>(rng: &mut R, (min, max): (Decimal, Decimal)) -> Decimal {
    let to_cents = |d: Decimal| (d * Decimal::ONE_HUNDRED).trunc().to_i64().unwrap_or(0);
    let (lo, hi) = (to_cents(min), to_cents(max));
    if lo >= hi {
        return Decimal::new(lo, 2);
    }
    Decimal::new(rng.random_range(lo..=hi), 2)
}

fn stock_level<R: Rng + ?Sized>(rng: &mut R, in_stock_chance: f64) -> &'static str {
    if rng.random_bool(in_stock_chance) {
        "In Stock"
    } else {
        "Limited Stock"
    }
}
