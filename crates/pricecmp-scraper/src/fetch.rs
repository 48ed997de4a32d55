//! Bounded HTTP GET of product and search pages.

use std::future::Future;

use pricecmp_core::FetchSettings;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, UPGRADE_INSECURE_REQUESTS};
use reqwest::redirect::Policy;
use reqwest::Client;

use crate::error::FetchError;
use crate::retry::retry_with_backoff;

/// Source of raw HTML for a URL.
///
/// [`PageFetcher`] is the network implementation; tests substitute
/// in-memory fakes.
pub trait PageSource: Send + Sync {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// HTTP fetcher with browser-like headers, a per-request timeout and a
/// redirect cap.
///
/// One attempt per call unless `max_retries` is configured above zero.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl PageFetcher {
    /// # Errors
    ///
    /// Returns [`FetchError::Client`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(settings: &FetchSettings) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .redirect(Policy::limited(settings.max_redirects))
            .user_agent(&settings.user_agent)
            .default_headers(browser_headers())
            .build()?;
        Ok(Self {
            client,
            max_retries: settings.max_retries,
            backoff_base_ms: settings.retry_backoff_base_ms,
        })
    }

    async fn fetch_once(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        if body.trim().is_empty() || looks_like_bot_challenge(&body) {
            return Err(FetchError::Blocked {
                url: url.to_owned(),
            });
        }

        tracing::debug!(url, bytes = body.len(), "fetched page");
        Ok(body)
    }
}

impl PageSource for PageFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            self.fetch_once(url)
        })
        .await
    }
}

fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
    headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
    headers
}

/// Detects interstitials served instead of the requested page: Cloudflare
/// challenges, retailer captcha gates and search-engine abuse pages.
pub(crate) fn looks_like_bot_challenge(body: &str) -> bool {
    let lowered = body.to_ascii_lowercase();
    let has_cloudflare_banner = lowered.contains("attention required! | cloudflare");
    let has_challenge_platform = lowered.contains("/cdn-cgi/challenge-platform/");
    let has_just_a_moment = lowered.contains("just a moment...");
    let has_cookie_gate = lowered.contains("please enable cookies");
    let has_cf_chl = lowered.contains("cf-chl-");
    let has_captcha_gate = lowered.contains("type the characters you see in this image")
        || lowered.contains("/errors/validatecaptcha");
    let has_unusual_traffic = lowered.contains("our systems have detected unusual traffic");

    has_cloudflare_banner
        || has_challenge_platform
        || has_captcha_gate
        || has_unusual_traffic
        || (has_just_a_moment && has_cookie_gate)
        || (has_just_a_moment && has_cf_chl)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_cloudflare_interstitial() {
        let body = "<html><title>Just a moment...</title><script src=\"/cdn-cgi/challenge-platform/h/b\"></script></html>";
        assert!(looks_like_bot_challenge(body));
    }

    #[test]
    fn detects_amazon_captcha() {
        let body = "<form action=\"/errors/validateCaptcha\">Type the characters you see in this image:</form>";
        assert!(looks_like_bot_challenge(body));
    }

    #[test]
    fn detects_search_engine_abuse_page() {
        let body = "<p>Our systems have detected unusual traffic from your computer network.</p>";
        assert!(looks_like_bot_challenge(body));
    }

    #[test]
    fn ordinary_product_page_is_not_a_challenge() {
        let body = "<html><h1>Nike Air Jordan 1</h1><span class=\"price\">$199.99</span></html>";
        assert!(!looks_like_bot_challenge(body));
    }

    #[test]
    fn browser_headers_are_set() {
        let headers = browser_headers();
        assert!(headers.contains_key(ACCEPT));
        assert_eq!(headers.get(ACCEPT_LANGUAGE).unwrap(), "en-US,en;q=0.5");
        assert_eq!(headers.get(UPGRADE_INSECURE_REQUESTS).unwrap(), "1");
    }
}
