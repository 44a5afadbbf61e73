//! Product lookup: URL in, priced product with a girl-math pitch out.

use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument};

use crate::clients::{FetchError, ProductPageSource, ScrapedProduct, or_fallback};
use crate::db::Store;
use crate::models::product::ProductInfo;
use crate::parser::{AsinMatch, asin_from_resolved_url, parse_product_url};
use crate::pricing::{GirlMath, ProductCategory, anchored_history, narrative, synthesize};

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Could not find a product ID in URL: {0}")]
    InvalidUrl(String),

    #[error("Product {0} not found")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for LookupError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[derive(Debug, Clone, Default)]
pub struct LookupOptions {
    /// Skip scraping and fabricate the history.
    pub force_demo: bool,
    pub user_id: Option<i32>,
    pub search_term: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LookupOutcome {
    pub product: ProductInfo,
    pub demo: bool,
    pub girl_math: GirlMath,
    pub is_favorite: bool,
}

#[derive(Clone)]
pub struct LookupService {
    store: Store,
    source: Arc<dyn ProductPageSource>,
}

impl LookupService {
    #[must_use]
    pub fn new(store: Store, source: Arc<dyn ProductPageSource>) -> Self {
        Self { store, source }
    }

    /// Extracts the product identifier from a URL, following short links.
    ///
    /// A short link that cannot be resolved yields its raw code.
    pub async fn extract_id(&self, url: &str) -> Option<String> {
        match parse_product_url(url.trim())? {
            AsinMatch::Asin(asin) => Some(asin),
            AsinMatch::ShortLink(code) => {
                let resolved = self
                    .source
                    .resolve_short_link(&code)
                    .await
                    .map(|target| asin_from_resolved_url(&target, &code));
                Some(or_fallback(resolved, "Short link resolution", |_| code.clone()))
            }
        }
    }

    /// Scrapes the product unless `force_demo`; any failure falls back to demo data.
    pub async fn fetch_product_info(&self, asin: &str, force_demo: bool) -> ProductInfo {
        let scraped = if force_demo {
            Err(FetchError::Disabled)
        } else {
            self.source.fetch_product(asin).await.map(Some)
        };

        match or_fallback(scraped, "Live product lookup", |_| None) {
            Some(scraped) => Self::live_product(asin, scraped),
            None => self.demo_product(asin).await,
        }
    }

    fn live_product(asin: &str, scraped: ScrapedProduct) -> ProductInfo {
        let history = anchored_history(scraped.price, &mut rand::rng());
        let title = scraped
            .title
            .unwrap_or_else(|| format!("Product {asin}"));
        ProductInfo::new(asin, title, ProductCategory::infer(asin), history, false)
    }

    async fn demo_product(&self, asin: &str) -> ProductInfo {
        let synthetic = synthesize(asin, &mut rand::rng());

        // Demo prices still carry the real title when the page is reachable.
        let fetched = self.source.fetch_title(asin).await.map(Some);
        let title = match or_fallback(fetched, "Title lookup", |_| None) {
            Some(Some(title)) => title,
            Some(None) => synthetic.title,
            None => synthetic.category.fallback_title(asin),
        };

        ProductInfo::new(asin, title, synthetic.category, synthetic.history, true)
    }

    /// Full lookup: resolve, price, persist, record the search and build the pitch.
    #[instrument(skip(self, options), fields(demo = options.force_demo))]
    pub async fn lookup(
        &self,
        url: &str,
        options: &LookupOptions,
    ) -> Result<LookupOutcome, LookupError> {
        let asin = self
            .extract_id(url)
            .await
            .ok_or_else(|| LookupError::InvalidUrl(url.to_string()))?;

        let product = self.fetch_product_info(&asin, options.force_demo).await;

        self.store.save_product(&product).await?;
        self.store
            .add_search_history(
                Some(&asin),
                Some(url),
                options.search_term.as_deref(),
                options.user_id,
            )
            .await?;

        let is_favorite = self.store.is_favorite(&asin).await?;
        let girl_math = narrative(
            product.current_price,
            product.peak_price,
            product.lowest_price,
            &mut rand::rng(),
        );

        metrics::counter!(
            "product_lookups_total",
            "mode" => if product.demo { "demo" } else { "live" }
        )
        .increment(1);

        info!(
            asin = %asin,
            category = %product.category,
            current_price = product.current_price,
            demo = product.demo,
            "Product looked up"
        );

        Ok(LookupOutcome {
            demo: product.demo,
            product,
            girl_math,
            is_favorite,
        })
    }

    /// Returns a stored product with a fresh narrative.
    pub async fn product(&self, asin: &str) -> Result<LookupOutcome, LookupError> {
        let snapshot = self
            .store
            .get_product(asin)
            .await?
            .ok_or_else(|| LookupError::NotFound(asin.to_string()))?;

        let product = ProductInfo::from(snapshot);
        let is_favorite = self.store.is_favorite(asin).await?;
        let girl_math = narrative(
            product.current_price,
            product.peak_price,
            product.lowest_price,
            &mut rand::rng(),
        );

        Ok(LookupOutcome {
            demo: false,
            product,
            girl_math,
            is_favorite,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::OfflineSource;
    use crate::pricing::HISTORY_DAYS;
    use async_trait::async_trait;

    /// Canned retailer responses.
    struct StubSource {
        resolved: Result<String, FetchError>,
        product: Result<ScrapedProduct, FetchError>,
        title: Result<Option<String>, FetchError>,
    }

    impl StubSource {
        fn failing() -> Self {
            Self {
                resolved: Err(FetchError::Timeout),
                product: Err(FetchError::Status(503)),
                title: Err(FetchError::Connection("refused".to_string())),
            }
        }
    }

    #[async_trait]
    impl ProductPageSource for StubSource {
        async fn resolve_short_link(&self, _code: &str) -> Result<String, FetchError> {
            self.resolved.clone()
        }

        async fn fetch_product(&self, _asin: &str) -> Result<ScrapedProduct, FetchError> {
            self.product.clone()
        }

        async fn fetch_title(&self, _asin: &str) -> Result<Option<String>, FetchError> {
            self.title.clone()
        }
    }

    async fn service(source: impl ProductPageSource + 'static) -> LookupService {
        let store = Store::with_pool_options("sqlite::memory:", 1, 1)
            .await
            .unwrap();
        LookupService::new(store, Arc::new(source))
    }

    #[tokio::test]
    async fn test_extract_id_standard_urls() {
        let svc = service(OfflineSource).await;
        assert_eq!(
            svc.extract_id("https://www.amazon.com/dp/B07PXGQC1Q/")
                .await
                .as_deref(),
            Some("B07PXGQC1Q")
        );
        assert_eq!(
            svc.extract_id(
                "https://www.amazon.com/Apple-AirPods-Pro-2nd-Generation/dp/B0BDHWDR12/"
            )
            .await
            .as_deref(),
            Some("B0BDHWDR12")
        );
        assert_eq!(svc.extract_id("https://example.com").await, None);
        assert_eq!(svc.extract_id("").await, None);
    }

    #[tokio::test]
    async fn test_short_link_falls_back_to_code() {
        let svc = service(StubSource::failing()).await;
        assert_eq!(
            svc.extract_id("https://a.co/d/8iGnbpL").await.as_deref(),
            Some("8iGnbpL")
        );
    }

    #[tokio::test]
    async fn test_short_link_resolves_to_asin() {
        let svc = service(StubSource {
            resolved: Ok("https://www.amazon.com/Nitro-Gaming/dp/B0CHX1W1XY?ref=share".into()),
            ..StubSource::failing()
        })
        .await;
        assert_eq!(
            svc.extract_id("https://a.co/d/8iGnbpL").await.as_deref(),
            Some("B0CHX1W1XY")
        );
    }

    #[tokio::test]
    async fn test_live_product_is_anchored_to_scraped_price() {
        let svc = service(StubSource {
            product: Ok(ScrapedProduct {
                title: Some("Glitter Phone Case".to_string()),
                price: 24.99,
            }),
            ..StubSource::failing()
        })
        .await;

        let product = svc.fetch_product_info("B8GLITTER1", false).await;
        assert!(!product.demo);
        assert_eq!(product.title, "Glitter Phone Case");
        assert_eq!(product.current_price, 24.99);
        assert_eq!(product.category, "fashion");
        assert_eq!(product.price_data.len(), HISTORY_DAYS);
    }

    #[tokio::test]
    async fn test_failed_scrape_falls_back_to_demo() {
        let svc = service(StubSource::failing()).await;

        let product = svc.fetch_product_info("B0BDHWDR12", false).await;
        assert!(product.demo);
        assert_eq!(product.title, "Electronics Device (B0BDHWDR12)");
        assert_eq!(product.price_data.len(), HISTORY_DAYS);
        assert_eq!(product.current_price, *product.price_data.last().unwrap());
    }

    #[tokio::test]
    async fn test_forced_demo_skips_scrape_but_keeps_real_title() {
        let svc = service(StubSource {
            product: Ok(ScrapedProduct {
                title: None,
                price: 10.0,
            }),
            title: Ok(Some("Real Title".to_string())),
            ..StubSource::failing()
        })
        .await;

        let product = svc.fetch_product_info("B3LIPGLOSS", true).await;
        assert!(product.demo);
        assert_eq!(product.title, "Real Title");
        assert_eq!(product.category, "beauty");
    }

    #[tokio::test]
    async fn test_lookup_persists_and_records_history() {
        let svc = service(OfflineSource).await;
        let url = "https://www.amazon.com/dp/B07PXGQC1Q/";

        let outcome = svc.lookup(url, &LookupOptions::default()).await.unwrap();
        assert!(outcome.demo);
        assert!(!outcome.is_favorite);
        assert_eq!(outcome.product.asin, "B07PXGQC1Q");
        assert!(!outcome.girl_math.statement.is_empty());

        let stored = svc.product("B07PXGQC1Q").await.unwrap();
        assert!(!stored.demo);
        assert_eq!(stored.product.price_data, outcome.product.price_data);

        let history = svc.store.recent_searches(10).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].url.as_deref(), Some(url));
        assert_eq!(history[0].title.as_deref(), Some(outcome.product.title.as_str()));
    }

    #[tokio::test]
    async fn test_lookup_rejects_unusable_url() {
        let svc = service(OfflineSource).await;
        let err = svc
            .lookup("https://example.com", &LookupOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, LookupError::InvalidUrl(_)));

        let err = svc.product("B000000000").await.unwrap_err();
        assert!(matches!(err, LookupError::NotFound(_)));
    }
}
