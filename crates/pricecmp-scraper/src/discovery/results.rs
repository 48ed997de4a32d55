//! Search-engine results page parsing.

use std::collections::HashSet;
use std::sync::LazyLock;

use pricecmp_core::SearchResult;
use reqwest::Url;
use scraper::{ElementRef, Html, Selector};

// Result blocks: Google organic entries carry `data-ved`; HTML-only engines
// use `.result`.
static BLOCK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div[data-ved], div.result").expect("valid selector"));
static TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h3, a.result__a").expect("valid selector"));
static LINK: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"a[href^="/url?q="], a[href*="uddg="]"#).expect("valid selector")
});
static SPAN: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span").expect("valid selector"));

/// Leaf spans at least this long are taken as the result description.
const SNIPPET_MIN_CHARS: usize = 50;

/// Parses organic results in ranking order, keeping only those hosted on
/// `domain` (or a subdomain of it), dropping repeats, and stopping at
/// `limit`.
pub(crate) fn parse_results(html: &str, domain: &str, limit: usize) -> Vec<SearchResult> {
    let document = Html::parse_document(html);
    let mut seen = HashSet::new();
    let mut results = Vec::new();

    for block in document.select(&BLOCK) {
        if results.len() >= limit {
            break;
        }
        let Some(title) = block.select(&TITLE).next().map(text_of) else {
            continue;
        };
        let Some(url) = block
            .select(&LINK)
            .next()
            .and_then(|a| a.value().attr("href"))
            .and_then(unwrap_redirect)
        else {
            continue;
        };
        if title.is_empty() || !host_matches(&url, domain) || !seen.insert(url.clone()) {
            continue;
        }

        let snippet = block
            .select(&SPAN)
            .filter(|span| !span.children().any(|c| c.value().is_element()))
            .map(text_of)
            .find(|text| text.chars().count() > SNIPPET_MIN_CHARS);

        results.push(SearchResult {
            title,
            url,
            snippet,
        });
    }

    tracing::debug!(domain, count = results.len(), "parsed search results");
    results
}

/// Recovers the destination from an engine redirect link: `/url?q=<enc>&…`
/// or `…/l/?uddg=<enc>&…`. Direct absolute links pass through unchanged.
fn unwrap_redirect(href: &str) -> Option<String> {
    let base = Url::parse("https://www.google.com/").ok()?;
    let link = base.join(href).ok()?;

    let wrapped = link
        .query_pairs()
        .find(|(key, _)| (link.path() == "/url" && key == "q") || key == "uddg")
        .map(|(_, value)| value.into_owned());

    match wrapped {
        Some(target) => Url::parse(&target)
            .ok()
            .filter(|u| matches!(u.scheme(), "http" | "https"))
            .map(String::from),
        None if href.starts_with("http://") || href.starts_with("https://") => {
            Some(href.to_owned())
        }
        None => None,
    }
}

/// `true` if the URL's host is `domain` or a subdomain of it.
fn host_matches(url: &str, domain: &str) -> bool {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_ascii_lowercase))
        .is_some_and(|host| host == domain || host.ends_with(&format!(".{domain}")))
}

fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_owned()
}
