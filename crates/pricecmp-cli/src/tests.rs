use std::str::FromStr;

use clap::Parser;
use pricecmp_core::{Currency, NormalizedPriceRecord, Platform, PlatformRegistry, Provenance};
use rust_decimal::Decimal;

use super::*;

#[test]
fn parses_search_with_defaults() {
    let cli = Cli::try_parse_from(["pricecmp", "search", "Nike Air Jordan"])
        .expect("expected valid cli args");

    match cli.command {
        Commands::Search {
            query,
            platforms,
            seed,
            format,
        } => {
            assert_eq!(query, "Nike Air Jordan");
            assert!(platforms.is_empty());
            assert_eq!(seed, None);
            assert_eq!(format, OutputFormat::Table);
        }
        Commands::Platforms => panic!("expected search command"),
    }
}

#[test]
fn parses_repeated_platform_flags() {
    let cli = Cli::try_parse_from([
        "pricecmp",
        "search",
        "iphone",
        "--platform",
        "eBay",
        "--platform",
        "Amazon US",
        "--seed",
        "42",
        "--format",
        "json",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Search {
            ref platforms,
            seed: Some(42),
            format: OutputFormat::Json,
            ..
        } if platforms == &["eBay".to_owned(), "Amazon US".to_owned()]
    ));
}

#[test]
fn parses_platforms_command() {
    let cli = Cli::try_parse_from(["pricecmp", "platforms"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Platforms));
}

#[test]
fn help_is_handled_by_the_parser() {
    let err = Cli::try_parse_from(["pricecmp", "--help"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
}

#[test]
fn search_requires_query() {
    assert!(Cli::try_parse_from(["pricecmp", "search"]).is_err());
}

#[test]
fn rejects_unknown_format() {
    assert!(Cli::try_parse_from(["pricecmp", "search", "x", "--format", "xml"]).is_err());
}

fn record(platform: Platform, title: &str) -> NormalizedPriceRecord {
    NormalizedPriceRecord {
        id: format!("{}_1", platform.slug()),
        platform,
        price: Decimal::from_str("1559.92").unwrap(),
        currency: Currency::Hkd,
        shipping: Decimal::from_str("156").unwrap(),
        ships_to_target: true,
        url: "https://www.ebay.com/itm/1234".to_owned(),
        image: String::new(),
        title: title.to_owned(),
        availability: "Available".to_owned(),
        provenance: Provenance::Live,
    }
}

#[test]
fn records_table_shows_totals() {
    let table = output::records_table(&[record(Platform::Ebay, "Nike Air Jordan - Used")]);
    let row = table.lines().nth(1).expect("expected a data row");
    assert!(row.starts_with("eBay"));
    assert!(row.contains("HKD 1559.92"));
    assert!(row.contains("156.00"));
    assert!(row.contains("1715.92"));
    assert!(row.contains("live"));
    assert!(row.ends_with("Nike Air Jordan - Used"));
}

#[test]
fn records_table_truncates_long_titles() {
    let long = "A".repeat(80);
    let table = output::records_table(&[record(Platform::StockX, &long)]);
    let row = table.lines().nth(1).expect("expected a data row");
    assert!(row.ends_with("..."));
    assert!(!row.contains(&long));
}

#[test]
fn empty_records_table() {
    assert_eq!(output::records_table(&[]), "no results\n");
}

#[test]
fn platforms_table_lists_every_platform() {
    let table = output::platforms_table(&PlatformRegistry::new());
    assert_eq!(table.lines().count(), 6);
    let target = table
        .lines()
        .find(|l| l.starts_with("Target"))
        .expect("expected Target row");
    assert!(target.contains("does not ship"));
    let amazon = table
        .lines()
        .find(|l| l.starts_with("Amazon US"))
        .expect("expected Amazon row");
    assert!(amazon.contains("40% free"));
}
