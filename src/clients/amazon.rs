use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::debug;

use super::{FetchError, ProductPageSource, ScrapedProduct};
use crate::config::ScraperConfig;
use crate::parser::parse_price;

/// Title selectors for a full product scrape, tried in order.
pub const PRODUCT_TITLE_SELECTORS: &[&str] = &["#productTitle", ".product-title-word-break"];

/// Title-only fetches also accept a generic large heading.
pub const ANY_TITLE_SELECTORS: &[&str] = &[
    "#productTitle",
    ".product-title-word-break",
    "h1.a-size-large",
];

/// Tried in order; the first element whose text holds a number is the price.
const PRICE_SELECTORS: [&str; 5] = [
    "span.a-price .a-offscreen",
    "#priceblock_ourprice",
    "#priceblock_dealprice",
    ".a-price .a-offscreen",
    "span.a-price-whole",
];

#[derive(Clone)]
pub struct AmazonClient {
    client: Client,
    base_url: String,
    short_link_base_url: String,
}

impl AmazonClient {
    /// Builds a client whose every request is bounded by the configured timeout.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &ScraperConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {e}"))?;

        Ok(Self::with_shared_client(client, config))
    }

    #[must_use]
    pub fn with_shared_client(client: Client, config: &ScraperConfig) -> Self {
        Self {
            client,
            base_url: config.amazon_base_url.trim_end_matches('/').to_string(),
            short_link_base_url: config.short_link_base_url.trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn product_url(&self, asin: &str) -> String {
        format!("{}/dp/{}", self.base_url, asin)
    }

    async fn fetch_page(&self, asin: &str) -> Result<(StatusCode, String), FetchError> {
        let url = self.product_url(asin);
        debug!(url = %url, "Fetching product page");

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
            .header(reqwest::header::PRAGMA, "no-cache")
            .send()
            .await?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Body(e.to_string()))?;

        Ok((status, body))
    }
}

#[async_trait]
impl ProductPageSource for AmazonClient {
    async fn resolve_short_link(&self, code: &str) -> Result<String, FetchError> {
        let url = format!("{}/d/{}", self.short_link_base_url, code);
        // reqwest follows redirects by default; the final URL is what we want.
        let response = self.client.head(&url).send().await?;
        Ok(response.url().to_string())
    }

    async fn fetch_product(&self, asin: &str) -> Result<ScrapedProduct, FetchError> {
        let (status, body) = self.fetch_page(asin).await?;
        if status != StatusCode::OK {
            return Err(FetchError::Status(status.as_u16()));
        }

        let price = extract_price(&body).ok_or(FetchError::MissingPrice)?;
        Ok(ScrapedProduct {
            title: extract_title(&body, PRODUCT_TITLE_SELECTORS),
            price,
        })
    }

    async fn fetch_title(&self, asin: &str) -> Result<Option<String>, FetchError> {
        let (_, body) = self.fetch_page(asin).await?;
        Ok(extract_title(&body, ANY_TITLE_SELECTORS))
    }
}

/// Finds the product title in a product page; the first non-empty match wins.
#[must_use]
pub fn extract_title(html: &str, selectors: &[&str]) -> Option<String> {
    let document = Html::parse_document(html);
    selectors.iter().find_map(|selector| {
        let selector = Selector::parse(selector).ok()?;
        document
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty())
    })
}

/// Finds the current price in a product page. A zero price counts as missing.
#[must_use]
pub fn extract_price(html: &str) -> Option<f64> {
    let document = Html::parse_document(html);
    PRICE_SELECTORS
        .iter()
        .find_map(|selector| {
            let selector = Selector::parse(selector).ok()?;
            let element = document.select(&selector).next()?;
            parse_price(&element.text().collect::<String>())
        })
        .filter(|price| *price > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRODUCT_PAGE: &str = r#"
        <html><body>
          <h1><span id="productTitle">
             Acer Nitro V Gaming Laptop
          </span></h1>
          <div class="a-section">
            <span class="a-price"><span class="a-offscreen">$1,099.99</span></span>
          </div>
        </body></html>
    "#;

    #[test]
    fn test_extract_title_and_price() {
        assert_eq!(
            extract_title(PRODUCT_PAGE, PRODUCT_TITLE_SELECTORS).as_deref(),
            Some("Acer Nitro V Gaming Laptop")
        );
        assert_eq!(extract_price(PRODUCT_PAGE), Some(1099.99));
    }

    #[test]
    fn test_fallback_selectors() {
        let html = r#"
            <h1 class="a-size-large">Fallback Heading</h1>
            <span id="priceblock_dealprice">Deal: $19.49</span>
        "#;
        assert_eq!(
            extract_title(html, ANY_TITLE_SELECTORS).as_deref(),
            Some("Fallback Heading")
        );
        assert_eq!(extract_price(html), Some(19.49));
    }

    #[test]
    fn test_skips_price_elements_without_numbers() {
        let html = r#"
            <span class="a-price"><span class="a-offscreen">See price in cart</span></span>
            <span class="a-price-whole">42.</span>
        "#;
        assert_eq!(extract_price(html), Some(42.0));
    }

    #[test]
    fn test_product_scrape_ignores_generic_heading() {
        let html = r#"
            <h1 class="a-size-large">Sponsored Picks For You</h1>
            <span class="product-title-word-break">Glow Serum 30ml</span>
        "#;
        assert_eq!(
            extract_title(html, PRODUCT_TITLE_SELECTORS).as_deref(),
            Some("Glow Serum 30ml")
        );

        let heading_only = r#"<h1 class="a-size-large">Fallback Heading</h1>"#;
        assert_eq!(extract_title(heading_only, PRODUCT_TITLE_SELECTORS), None);
        assert_eq!(
            extract_title(heading_only, ANY_TITLE_SELECTORS).as_deref(),
            Some("Fallback Heading")
        );
    }

    #[test]
    fn test_missing_elements() {
        let html = "<html><body><p>Robot check</p></body></html>";
        assert_eq!(extract_title(html, ANY_TITLE_SELECTORS), None);
        assert_eq!(extract_price(html), None);

        let zero = r#"<span id="priceblock_ourprice">$0.00</span>"#;
        assert_eq!(extract_price(zero), None);
    }

    #[test]
    fn test_product_url() {
        let client = AmazonClient::new(&ScraperConfig::default()).unwrap();
        assert_eq!(
            client.product_url("B07PXGQC1Q"),
            "https://www.amazon.com/dp/B07PXGQC1Q"
        );
    }
}
