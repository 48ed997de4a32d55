//! Plain-text table rendering for terminal output.

use std::fmt::Write as _;

use pricecmp_core::{NormalizedPriceRecord, PlatformRegistry, Provenance, ShippingPolicy};

const TITLE_WIDTH: usize = 48;

pub(crate) fn records_table(records: &[NormalizedPriceRecord]) -> String {
    if records.is_empty() {
        return "no results\n".to_owned();
    }

    let mut out = format!(
        "{:<11}{:>14}{:>12}{:>14}  {:<6}{:<11}TITLE\n",
        "PLATFORM", "PRICE", "SHIPPING", "TOTAL", "SHIPS", "SOURCE"
    );
    for record in records {
        let total = record.price.saturating_add(record.shipping);
        let source = match record.provenance {
            Provenance::Live => "live",
            Provenance::Synthetic => "synthetic",
        };
        let _ = writeln!(
            out,
            "{:<11}{:>14}{:>12.2}{:>14.2}  {:<6}{:<11}{}",
            record.platform.name(),
            format!("{} {:.2}", record.currency, record.price),
            record.shipping,
            total,
            if record.ships_to_target { "yes" } else { "no" },
            source,
            truncate(&record.title, TITLE_WIDTH),
        );
    }
    out
}

pub(crate) fn platforms_table(registry: &PlatformRegistry) -> String {
    let mut out = format!(
        "{:<11}{:<14}{:<6}{:<14}SHIPPING\n",
        "NAME", "DOMAIN", "SHIPS", "PRICE RANGE"
    );
    for profile in registry.profiles() {
        let (min, max) = profile.price_range;
        let shipping = match profile.shipping {
            ShippingPolicy::DoesNotShip => "does not ship".to_owned(),
            ShippingPolicy::Ships { range, free_chance } if free_chance > 0.0 => format!(
                "{}-{} {} ({:.0}% free)",
                range.0,
                range.1,
                profile.source_currency,
                free_chance * 100.0
            ),
            ShippingPolicy::Ships { range, .. } => {
                format!("{}-{} {}", range.0, range.1, profile.source_currency)
            }
        };
        let _ = writeln!(
            out,
            "{:<11}{:<14}{:<6}{:<14}{}",
            profile.name(),
            profile.search_domain,
            if profile.ships_to_target() { "yes" } else { "no" },
            format!("{min}-{max} {}", profile.source_currency),
            shipping,
        );
    }
    out
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_owned()
    } else {
        let mut cut: String = text.chars().take(width.saturating_sub(3)).collect();
        cut.push_str("...");
        cut
    }
}
