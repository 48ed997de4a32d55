use std::str::FromStr;

use super::*;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

const EBAY_PAGE: &str = r#"
<html><body>
  <div id="itm-details-header"><h1>  Nike Air Jordan
      - Used </h1></div>
  <div class="price"><span class="notranslate">US $199.99</span></div>
  <img id="icImg" src="https://i.ebayimg.com/images/g/abc/s-l500.jpg">
</body></html>
"#;

const AMAZON_SPLIT_PRICE_PAGE: &str = r#"
<html><body>
  <span id="productTitle">Nike Air Jordan 1 Retro High</span>
  <span class="a-price-whole">1,299<span class="a-price-decimal">.</span></span>
  <span class="a-price-fraction">49</span>
  <div class="imgTagWrapper"><img src="/images/I/71abc.jpg"></div>
  <div id="availability"><span> In Stock. </span></div>
</body></html>
"#;

const TARGET_SR_ONLY_PAGE: &str = r#"
<html><body>
  <h1 data-test="product-title">Nike Air Jordan Kids</h1>
  <span class="sr-only">current price</span>
  <span class="sr-only">$89.99</span>
</body></html>
"#;

#[test]
fn ebay_page_extracts_title_price_and_image() {
    let record = extract(EBAY_PAGE, "eBay", "https://www.ebay.com/itm/1234").unwrap();
    assert_eq!(record.title, "Nike Air Jordan - Used");
    assert_eq!(record.price, dec("199.99"));
    assert_eq!(record.source_currency, Currency::Usd);
    assert_eq!(
        record.image_url,
        "https://i.ebayimg.com/images/g/abc/s-l500.jpg"
    );
    assert_eq!(record.source_url, "https://www.ebay.com/itm/1234");
    assert_eq!(record.platform_name, "eBay");
}

#[test]
fn profile_extractor_uses_profile_rules_and_currency() {
    let record = FieldExtractor::for_profile(&Platform::Ebay.profile())
        .extract(EBAY_PAGE, "https://www.ebay.com/itm/1234")
        .unwrap();
    assert_eq!(record.platform_name, "eBay");
    assert_eq!(record.source_currency, Currency::Usd);
    assert_eq!(record.price, dec("199.99"));
}

#[test]
fn missing_availability_uses_platform_default() {
    let record = extract(EBAY_PAGE, "eBay", "https://www.ebay.com/itm/1234").unwrap();
    assert_eq!(record.availability, "Available");
}

#[test]
fn amazon_joins_whole_and_fraction_parts() {
    let record = extract(
        AMAZON_SPLIT_PRICE_PAGE,
        "Amazon US",
        "https://www.amazon.com/dp/B0TEST",
    )
    .unwrap();
    assert_eq!(record.price, dec("1299.49"));
    assert_eq!(record.availability, "In Stock.");
}

#[test]
fn amazon_prefers_offscreen_price() {
    let html = r#"<span id="productTitle">Jordan</span>
        <span class="a-price"><span class="a-offscreen">$150.00</span></span>
        <span class="a-price-whole">999.</span><span class="a-price-fraction">00</span>"#;
    let record = extract(html, "Amazon US", "https://www.amazon.com/dp/B0").unwrap();
    assert_eq!(record.price, dec("150.00"));
}

#[test]
fn relative_image_is_resolved_against_page_url() {
    let record = extract(
        AMAZON_SPLIT_PRICE_PAGE,
        "Amazon US",
        "https://www.amazon.com/dp/B0TEST",
    )
    .unwrap();
    assert_eq!(record.image_url, "https://www.amazon.com/images/I/71abc.jpg");
}

#[test]
fn target_falls_back_to_sr_only_text_with_dollar_sign() {
    let record = extract(
        TARGET_SR_ONLY_PAGE,
        "Target",
        "https://www.target.com/p/jordan/-/A-1",
    )
    .unwrap();
    assert_eq!(record.title, "Nike Air Jordan Kids");
    assert_eq!(record.price, dec("89.99"));
    assert_eq!(record.availability, "In Stock");
    assert!(record.image_url.is_empty());
}

#[test]
fn stockx_reads_product_price() {
    let html = r#"<h1>Jordan 4 Retro Black Cat</h1>
        <div class="product-price">$412</div>
        <div class="product-media"><img src="https://images.stockx.com/j4.jpg"></div>"#;
    let record = extract(html, "StockX", "https://stockx.com/air-jordan-4").unwrap();
    assert_eq!(record.price, dec("412"));
    assert_eq!(record.image_url, "https://images.stockx.com/j4.jpg");
    assert_eq!(record.availability, "Available");
}

#[test]
fn farfetch_reads_test_id_fields() {
    let html = r#"<p data-testid="product-name">Air Jordan 1 Mid</p>
        <p data-testid="product-price">$1,050</p>
        <p data-testid="availability">Only 2 left</p>"#;
    let record = extract(html, "Farfetch", "https://www.farfetch.com/shopping/item-1.aspx").unwrap();
    assert_eq!(record.title, "Air Jordan 1 Mid");
    assert_eq!(record.price, dec("1050"));
    assert_eq!(record.availability, "Only 2 left");
}

#[test]
fn empty_title_is_invalid() {
    let html = r#"<div class="price"><span class="notranslate">$10.00</span></div>"#;
    let result = extract(html, "eBay", "https://www.ebay.com/itm/1");
    assert!(
        matches!(
            result,
            Err(PipelineError::InvalidExtraction { reason: "missing title", .. })
        ),
        "expected InvalidExtraction, got: {result:?}"
    );
}

#[test]
fn zero_price_is_invalid() {
    let html = r#"<h1>Nike Air Jordan</h1><div class="product-price">Sold out</div>"#;
    let result = extract(html, "StockX", "https://stockx.com/x");
    assert!(
        matches!(
            result,
            Err(PipelineError::InvalidExtraction {
                reason: "missing or zero price",
                ..
            })
        ),
        "expected InvalidExtraction, got: {result:?}"
    );
}

#[test]
fn page_without_product_fields_is_empty() {
    let html = "<html><body><p>Access denied</p></body></html>";
    let result = extract(html, "Farfetch", "https://www.farfetch.com/x");
    assert!(
        matches!(
            result,
            Err(PipelineError::EmptyResult {
                what: "product fields",
                ..
            })
        ),
        "expected EmptyResult, got: {result:?}"
    );
}

#[test]
fn unknown_platform_uses_generic_rules() {
    let html = r#"<html><head>
        <meta property="og:image" content="https://cdn.example.com/shoe.jpg">
        </head><body>
        <h1>Air Jordan 1</h1>
        <div class="product-price__value">HK$1,399</div>
        <span class="in-stock-label">Ships in 2 days</span>
        </body></html>"#;
    let record = extract(html, "Some Boutique", "https://shop.example.com/p/1").unwrap();
    assert_eq!(record.platform_name, "Some Boutique");
    assert_eq!(record.title, "Air Jordan 1");
    assert_eq!(record.price, dec("1399"));
    assert_eq!(record.image_url, "https://cdn.example.com/shoe.jpg");
    assert_eq!(record.availability, "Ships in 2 days");
}

#[test]
fn generic_availability_defaults_to_available() {
    let html = r#"<h1>Air Jordan 1</h1><span class="price">$120</span>"#;
    let record = extract(html, "Some Boutique", "https://shop.example.com/p/1").unwrap();
    assert_eq!(record.availability, "Available");
}

#[test]
fn every_rule_selector_compiles() {
    for platform in Platform::ALL {
        for selector in platform.profile().rules.selectors() {
            assert!(
                Selector::parse(selector).is_ok(),
                "{platform}: {selector}"
            );
        }
    }
    for selector in GENERIC.selectors() {
        assert!(Selector::parse(selector).is_ok(), "generic: {selector}");
    }
}
