use pricecmp_core::Currency;
use rust_decimal::Decimal;
use thiserror::Error;

/// Failure retrieving a page, either a product page or a search-engine
/// results page.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("network error for {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("blocked or empty response from {url}")]
    Blocked { url: String },

    #[error("cannot build request URL from {url}")]
    InvalidUrl { url: String },

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

impl FetchError {
    pub(crate) fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout {
                url: url.to_owned(),
            }
        } else {
            FetchError::Network {
                url: url.to_owned(),
                source: err,
            }
        }
    }
}

/// Any reason a platform's live cascade fails. Every variant is converted
/// into a fallback decision at the cascade boundary and never reaches the
/// aggregation caller.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("no usable {what} for {platform}")]
    EmptyResult {
        platform: String,
        what: &'static str,
    },

    #[error("invalid extraction for {platform}: {reason}")]
    InvalidExtraction {
        platform: String,
        reason: &'static str,
    },

    #[error("no exchange rate configured from {from} to {to}")]
    MissingRate { from: Currency, to: Currency },

    #[error("{amount} {from} is out of range when converted to {to}")]
    AmountOutOfRange {
        amount: Decimal,
        from: Currency,
        to: Currency,
    },
}

impl PipelineError {
    /// Cascade stage the error belongs to, for fallback logging.
    #[must_use]
    pub fn stage(&self) -> &'static str {
        match self {
            PipelineError::Fetch(_) => "fetch",
            PipelineError::EmptyResult { .. } | PipelineError::InvalidExtraction { .. } => {
                "extract"
            }
            PipelineError::MissingRate { .. } | PipelineError::AmountOutOfRange { .. } => {
                "normalize"
            }
        }
    }
}
