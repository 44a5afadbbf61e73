pub mod amazon;

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

/// Why a network call to a retailer did not produce data.
///
/// These never reach API callers; the lookup path swaps in synthetic data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("connection failed: {0}")]
    Connection(String),

    #[error("failed to read response body: {0}")]
    Body(String),

    #[error("no price found on product page")]
    MissingPrice,

    #[error("live lookups are disabled")]
    Disabled,
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if let Some(status) = err.status() {
            Self::Status(status.as_u16())
        } else {
            Self::Connection(err.to_string())
        }
    }
}

/// Title and price scraped from a live product page.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrapedProduct {
    pub title: Option<String>,
    pub price: f64,
}

/// Everything the lookup path needs from the retailer.
#[async_trait]
pub trait ProductPageSource: Send + Sync {
    /// Follows an `a.co/d/<code>` short link and returns the final URL.
    async fn resolve_short_link(&self, code: &str) -> Result<String, FetchError>;

    /// Scrapes title and current price.
    async fn fetch_product(&self, asin: &str) -> Result<ScrapedProduct, FetchError>;

    /// Scrapes only the title; `Ok(None)` when the page has none.
    async fn fetch_title(&self, asin: &str) -> Result<Option<String>, FetchError>;
}

/// Source used when live scraping is switched off in config.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineSource;

#[async_trait]
impl ProductPageSource for OfflineSource {
    async fn resolve_short_link(&self, _code: &str) -> Result<String, FetchError> {
        Err(FetchError::Disabled)
    }

    async fn fetch_product(&self, _asin: &str) -> Result<ScrapedProduct, FetchError> {
        Err(FetchError::Disabled)
    }

    async fn fetch_title(&self, _asin: &str) -> Result<Option<String>, FetchError> {
        Ok(None)
    }
}

/// Unwraps a fetch result or logs the failure and substitutes `fallback`.
pub fn or_fallback<T>(
    result: Result<T, FetchError>,
    what: &str,
    fallback: impl FnOnce(&FetchError) -> T,
) -> T {
    match result {
        Ok(value) => value,
        Err(FetchError::Disabled) => fallback(&FetchError::Disabled),
        Err(err) => {
            warn!(error = %err, "{what} failed, using fallback");
            fallback(&err)
        }
    }
}
