//! Aggregation entry points: one record per requested platform, always.

use futures::future::join_all;
use pricecmp_core::{
    AppConfig, NormalizedPriceRecord, Platform, PlatformProfile, PlatformRegistry, Provenance,
    SearchQuery,
};

use crate::discovery::DiscoveryResolver;
use crate::error::{FetchError, PipelineError};
use crate::extract::FieldExtractor;
use crate::fetch::{PageFetcher, PageSource};
use crate::normalize::PriceNormalizer;
use crate::synthetic::SyntheticDataGenerator;

/// Runs the discovery → fetch → extract → normalize cascade for each
/// platform concurrently and substitutes a synthetic record wherever the
/// cascade fails.
///
/// `S` is the page source for product pages; the resolver carries its own
/// source for search-engine pages so the two can use different timeouts.
pub struct SearchOrchestrator<S> {
    registry: PlatformRegistry,
    resolver: DiscoveryResolver<S>,
    pages: S,
    normalizer: PriceNormalizer,
    synthetic: SyntheticDataGenerator,
}

impl SearchOrchestrator<PageFetcher> {
    /// Wires the network-backed pipeline from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Client`] if either HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, FetchError> {
        let search_pages = PageFetcher::new(&config.search_fetch)?;
        let product_pages = PageFetcher::new(&config.page_fetch)?;
        let normalizer = PriceNormalizer::new(config.rates.clone());
        Ok(Self::new(
            PlatformRegistry::new(),
            DiscoveryResolver::new(search_pages, &config.search_engine),
            product_pages,
            normalizer.clone(),
            SyntheticDataGenerator::new(config.synthetic_seed, normalizer),
        ))
    }
}

impl<S: PageSource> SearchOrchestrator<S> {
    #[must_use]
    pub fn new(
        registry: PlatformRegistry,
        resolver: DiscoveryResolver<S>,
        pages: S,
        normalizer: PriceNormalizer,
        synthetic: SyntheticDataGenerator,
    ) -> Self {
        Self {
            registry,
            resolver,
            pages,
            normalizer,
            synthetic,
        }
    }

    #[must_use]
    pub fn registry(&self) -> &PlatformRegistry {
        &self.registry
    }

    /// One record for every registered platform, in registry order.
    pub async fn search_all_platforms(&self, query: &SearchQuery) -> Vec<NormalizedPriceRecord> {
        let platforms: Vec<Platform> = self.registry.platforms().collect();
        self.search_platforms(query, &platforms).await
    }

    /// One record for each recognized name in `names`, in request order.
    /// Unknown names and repeats are ignored.
    pub async fn search_specific_platforms<N: AsRef<str>>(
        &self,
        query: &SearchQuery,
        names: &[N],
    ) -> Vec<NormalizedPriceRecord> {
        let platforms = self.registry.select(names);
        if platforms.len() < names.len() {
            tracing::debug!(
                requested = names.len(),
                recognized = platforms.len(),
                "ignoring unknown or repeated platform names"
            );
        }
        self.search_platforms(query, &platforms).await
    }

    async fn search_platforms(
        &self,
        query: &SearchQuery,
        platforms: &[Platform],
    ) -> Vec<NormalizedPriceRecord> {
        if query.canonical_currency != self.normalizer.canonical() {
            tracing::warn!(
                requested = %query.canonical_currency,
                configured = %self.normalizer.canonical(),
                "query currency differs from configured canonical currency; using configured"
            );
        }

        let tasks = platforms
            .iter()
            .map(|&platform| self.search_platform(&query.text, self.registry.profile(platform)));
        let records = join_all(tasks).await;

        let live = records
            .iter()
            .filter(|r| r.provenance == Provenance::Live)
            .count();
        tracing::info!(
            query = %query.text,
            region = %query.target_region,
            platforms = records.len(),
            live,
            "search complete"
        );
        records
    }

    /// The cascade boundary: every error becomes a synthetic record.
    async fn search_platform(&self, query: &str, profile: &PlatformProfile) -> NormalizedPriceRecord {
        match self.live_record(query, profile).await {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(
                    platform = %profile.platform,
                    stage = e.stage(),
                    error = %e,
                    "live lookup failed, using synthetic record"
                );
                self.synthetic.generate(query, profile)
            }
        }
    }

    async fn live_record(
        &self,
        query: &str,
        profile: &PlatformProfile,
    ) -> Result<NormalizedPriceRecord, PipelineError> {
        let candidate = self.resolver.resolve(query, profile).await;
        let html = self.pages.fetch(&candidate.url).await?;
        let extracted = FieldExtractor::for_profile(profile).extract(&html, &candidate.url)?;
        let shipping = self.synthetic.estimate_shipping(profile);
        let record = self.normalizer.normalize(extracted, profile, shipping)?;
        tracing::debug!(platform = %profile.platform, url = %record.url, "live record");
        Ok(record)
    }
}
