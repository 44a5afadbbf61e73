use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

/// Substrings that mark an identifier as a gaming/computer product.
const GAMING_MARKERS: [&str; 6] = ["7D2", "GA4", "RTX", "CPU", "GPU", "7NZ"];

const ASIN_LEN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    /// Unresolved short-link codes; assumed to be a mid-priced tech item.
    Tech,
    Gaming,
    Electronics,
    Fashion,
    Beauty,
    Home,
}

/// How a category's price history moves over the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Volatility {
    /// Slow downward drift with rare, shallow sales.
    Stable,
    /// Wandering trend with frequent, deeper sales.
    Volatile,
}

impl ProductCategory {
    /// Infers the category from the identifier's shape alone.
    #[must_use]
    pub fn infer(asin: &str) -> Self {
        if asin.chars().count() < ASIN_LEN {
            return Self::Tech;
        }

        let upper = asin.to_ascii_uppercase();
        if GAMING_MARKERS.iter().any(|m| upper.contains(m)) {
            return Self::Gaming;
        }

        match upper.get(..2) {
            Some("B0" | "B1" | "B2") => Self::Electronics,
            Some("B7" | "B8") => Self::Fashion,
            Some("B3" | "B4") => Self::Beauty,
            _ => Self::Home,
        }
    }

    /// Range the synthetic base price is drawn from.
    #[must_use]
    pub const fn price_range(self) -> (f64, f64) {
        match self {
            Self::Tech => (100.0, 400.0),
            Self::Gaming => (700.0, 1500.0),
            Self::Electronics => (50.0, 300.0),
            Self::Fashion => (30.0, 100.0),
            Self::Beauty => (15.0, 80.0),
            Self::Home => (20.0, 120.0),
        }
    }

    pub fn sample_base_price<R: Rng + ?Sized>(self, rng: &mut R) -> f64 {
        let (low, high) = self.price_range();
        rng.random_range(low..high)
    }

    #[must_use]
    pub const fn volatility(self) -> Volatility {
        match self {
            Self::Gaming | Self::Electronics => Volatility::Stable,
            Self::Tech | Self::Fashion | Self::Beauty | Self::Home => Volatility::Volatile,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tech => "tech",
            Self::Gaming => "gaming",
            Self::Electronics => "electronics",
            Self::Fashion => "fashion",
            Self::Beauty => "beauty",
            Self::Home => "home",
        }
    }

    const fn title_prefixes(self) -> &'static [&'static str] {
        match self {
            Self::Gaming => &[
                "Gaming Laptop with RTX Graphics",
                "High Performance Gaming PC",
                "Gaming Desktop Computer",
                "Gaming Monitor with High Refresh Rate",
            ],
            Self::Electronics | Self::Tech => &[
                "Premium Electronics Device",
                "Smart Home Tech Gadget",
                "Wireless Bluetooth Device",
                "Tech Gadget Pro - Latest Model",
            ],
            Self::Fashion => &[
                "Designer Fashion Collection",
                "Premium Apparel - Trending Style",
                "Fashion Accessory - Limited Edition",
            ],
            Self::Beauty => &[
                "Premium Beauty Product - Self Care Essential",
                "Luxury Skincare Collection",
                "Beauty and Cosmetics Set",
            ],
            Self::Home => &[
                "Home Essential Item",
                "Home and Kitchen Premium Product",
                "Household Premium Item",
            ],
        }
    }

    /// Picks a plausible placeholder title for a product we could not name.
    pub fn sample_title<R: Rng + ?Sized>(self, asin: &str, rng: &mut R) -> String {
        let prefix = self
            .title_prefixes()
            .choose(rng)
            .copied()
            .unwrap_or("Amazon Product");
        format!("{prefix} - {asin}")
    }

    /// Title used when the product page could not be fetched at all.
    #[must_use]
    pub fn fallback_title(self, asin: &str) -> String {
        match self {
            Self::Gaming => format!("Gaming Laptop or PC ({asin})"),
            Self::Electronics => format!("Electronics Device ({asin})"),
            _ => format!("Amazon Product ({asin})"),
        }
    }
}

impl std::fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
