//! Discovery: mapping a query to a candidate product page per platform.
//!
//! A site-scoped search-engine lookup is tried first. When it fails or finds
//! nothing, the platform's own search page for the query is used instead, so
//! resolution always produces a URL.

mod results;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use pricecmp_core::{Platform, PlatformProfile, PlatformRegistry, SearchEngineSettings, SearchResult};
use reqwest::Url;

use crate::error::{FetchError, PipelineError};
use crate::fetch::PageSource;

/// Characters left unescaped in a URL query component: ASCII alphanumerics
/// and `-_.!~*'()`.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Resolves queries to candidate product pages through a search engine.
#[derive(Debug, Clone)]
pub struct DiscoveryResolver<S> {
    source: S,
    endpoint: String,
    result_limit: usize,
}

impl<S: PageSource> DiscoveryResolver<S> {
    pub fn new(source: S, settings: &SearchEngineSettings) -> Self {
        Self {
            source,
            endpoint: settings.endpoint.clone(),
            result_limit: settings.result_limit,
        }
    }

    /// Engine URL for `site:<domain> <query>`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidUrl`] if the configured endpoint is not a
    /// valid URL.
    pub fn search_url(&self, query: &str, domain: &str) -> Result<Url, FetchError> {
        let site_query = format!("site:{domain} {query}");
        Url::parse_with_params(
            &self.endpoint,
            &[
                ("q", site_query.as_str()),
                ("num", "10"),
                ("hl", "en"),
                ("safe", "active"),
            ],
        )
        .map_err(|_| FetchError::InvalidUrl {
            url: self.endpoint.clone(),
        })
    }

    /// Ranked organic results for `query` on `domain`.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Fetch`] if the results page cannot be
    /// fetched. An empty list is not an error here.
    pub async fn search(
        &self,
        query: &str,
        domain: &str,
    ) -> Result<Vec<SearchResult>, PipelineError> {
        let url = self.search_url(query, domain)?;
        let html = self.source.fetch(url.as_str()).await?;
        Ok(results::parse_results(&html, domain, self.result_limit))
    }

    /// Best candidate page for `query` on the profile's platform. Never
    /// fails: any search error or an empty result list yields the
    /// platform's direct-search page.
    pub async fn resolve(&self, query: &str, profile: &PlatformProfile) -> SearchResult {
        match self.search(query, profile.search_domain).await {
            Ok(results) => match results.into_iter().next() {
                Some(first) => {
                    tracing::debug!(platform = %profile.platform, url = %first.url, "search hit");
                    return first;
                }
                None => {
                    tracing::warn!(
                        platform = %profile.platform,
                        "search returned no results, using direct search URL"
                    );
                }
            },
            Err(e) => {
                tracing::warn!(
                    platform = %profile.platform,
                    error = %e,
                    "search failed, using direct search URL"
                );
            }
        }
        direct_search(query, profile)
    }

    /// Resolves every platform in `registry` concurrently, one result per
    /// platform in registry order.
    pub async fn resolve_all(
        &self,
        query: &str,
        registry: &PlatformRegistry,
    ) -> Vec<(Platform, SearchResult)> {
        let lookups = registry.profiles().map(|profile| async move {
            (profile.platform, self.resolve(query, profile).await)
        });
        futures::future::join_all(lookups).await
    }
}

/// The single synthesized entry pointing at the platform's own search page.
#[must_use]
pub fn direct_search(query: &str, profile: &PlatformProfile) -> SearchResult {
    let encoded = utf8_percent_encode(query, QUERY_COMPONENT).to_string();
    let platform = profile.name();
    SearchResult {
        title: format!("{query} | {platform}"),
        url: profile.direct_search_url_for(&encoded),
        snippet: Some(format!("Direct search for \"{query}\" on {platform}")),
    }
}
