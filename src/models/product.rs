use serde::{Deserialize, Serialize};

use crate::pricing::{PriceHistory, ProductCategory};

/// A product as returned by a lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductInfo {
    pub asin: String,
    pub title: String,
    pub category: String,
    pub current_price: f64,
    pub peak_price: f64,
    pub lowest_price: f64,
    pub price_data: Vec<f64>,
    /// True when the price history was fabricated rather than anchored to a scrape.
    pub demo: bool,
}

impl ProductInfo {
    #[must_use]
    pub fn new(
        asin: impl Into<String>,
        title: impl Into<String>,
        category: ProductCategory,
        history: PriceHistory,
        demo: bool,
    ) -> Self {
        Self {
            asin: asin.into(),
            title: title.into(),
            category: category.to_string(),
            current_price: history.current_price,
            peak_price: history.peak_price,
            lowest_price: history.lowest_price,
            price_data: history.series,
            demo,
        }
    }
}

/// A product row as persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub asin: String,
    pub title: String,
    pub current_price: f64,
    pub peak_price: f64,
    pub lowest_price: f64,
    pub price_data: Vec<f64>,
    pub category: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ProductSnapshot> for ProductInfo {
    fn from(snapshot: ProductSnapshot) -> Self {
        Self {
            asin: snapshot.asin,
            title: snapshot.title,
            category: snapshot.category,
            current_price: snapshot.current_price,
            peak_price: snapshot.peak_price,
            lowest_price: snapshot.lowest_price,
            price_data: snapshot.price_data,
            demo: false,
        }
    }
}
