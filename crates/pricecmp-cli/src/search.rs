//! `search` and `platforms` command handlers.

use pricecmp_core::{AppConfig, PlatformRegistry, SearchQuery};
use pricecmp_scraper::SearchOrchestrator;

use crate::output;
use crate::OutputFormat;

/// Runs the aggregation for `query` and prints the records.
///
/// An empty `platforms` list searches every platform.
///
/// # Errors
///
/// Returns an error if the HTTP clients cannot be built or the records
/// cannot be serialized.
pub(crate) async fn run_search(
    config: &AppConfig,
    query: &str,
    platforms: &[String],
    format: OutputFormat,
) -> anyhow::Result<()> {
    let orchestrator = SearchOrchestrator::from_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build page fetchers: {e}"))?;
    let search_query = SearchQuery::new(query, &config.target_region, config.rates.canonical());

    let records = if platforms.is_empty() {
        orchestrator.search_all_platforms(&search_query).await
    } else {
        orchestrator
            .search_specific_platforms(&search_query, platforms)
            .await
    };

    if records.is_empty() {
        tracing::warn!(requested = ?platforms, "no recognized platforms requested");
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&records)?),
        OutputFormat::Table => print!("{}", output::records_table(&records)),
    }
    Ok(())
}

pub(crate) fn run_platforms() {
    print!("{}", output::platforms_table(&PlatformRegistry::new()));
}
