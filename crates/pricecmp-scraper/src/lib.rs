//! Price discovery and extraction pipeline.
//!
//! Per platform the pipeline resolves a product page, fetches it, extracts
//! title/price/image/availability, and converts the price into the canonical
//! currency. Any failure along the way is replaced by a synthetic record so
//! every requested platform yields exactly one result.

pub mod discovery;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod imagery;
pub mod normalize;
pub mod orchestrator;
mod retry;
pub mod synthetic;

pub use discovery::DiscoveryResolver;
pub use error::{FetchError, PipelineError};
pub use extract::FieldExtractor;
pub use fetch::{PageFetcher, PageSource};
pub use normalize::PriceNormalizer;
pub use orchestrator::SearchOrchestrator;
pub use synthetic::SyntheticDataGenerator;
