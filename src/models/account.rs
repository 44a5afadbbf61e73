use serde::{Deserialize, Serialize};
use std::fmt;

/// Subscription tier of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[default]
    Free,
    Besties,
    Platinum,
}

impl Tier {
    pub const ALL: [Self; 3] = [Self::Free, Self::Besties, Self::Platinum];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Besties => "besties",
            Self::Platinum => "platinum",
        }
    }

    /// Strict parse, case-insensitive.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(name.trim()))
    }

    /// Unknown or stale tier names from the database read as `Free`.
    #[must_use]
    pub fn parse_or_free(name: &str) -> Self {
        Self::parse(name).unwrap_or_default()
    }

    #[must_use]
    pub const fn features(self) -> TierFeatures {
        match self {
            Self::Free => TierFeatures {
                tier: Self::Free,
                name: "Barbie Basic",
                price: "Free",
                description: "The basic tier for everyday shoppers.",
                features: &[
                    "Price history from Amazon",
                    "Current prices from different retailers",
                    "Basic Girl Math calculations",
                ],
                max_searches_per_day: Some(10),
                access_to_walmart_prices: true,
                access_to_target_prices: false,
                purchase_recommendations: false,
                background: "#FFD1DC",
            },
            Self::Besties => TierFeatures {
                tier: Self::Besties,
                name: "Clueless Besties",
                price: "$0.99/month",
                description: "As if you'd shop without all this data!",
                features: &[
                    "Everything in Basic tier",
                    "Price history from multiple retailers",
                    "Advanced Girl Math calculations",
                    "Price alerts via email",
                    "Save unlimited favorites",
                ],
                max_searches_per_day: Some(50),
                access_to_walmart_prices: true,
                access_to_target_prices: true,
                purchase_recommendations: false,
                background: "#FFB6C1",
            },
            Self::Platinum => TierFeatures {
                tier: Self::Platinum,
                name: "Mean Girls Platinum",
                price: "$5.00/month",
                description: "So fetch! The ultimate shopping experience.",
                features: &[
                    "Everything in Besties tier",
                    "Price predictions and best time to buy",
                    "Personalized shopping recommendations",
                    "Early access to new features",
                    "Custom shopping lists",
                    "Priority customer support",
                ],
                max_searches_per_day: None,
                access_to_walmart_prices: true,
                access_to_target_prices: true,
                purchase_recommendations: true,
                background: "#FF69B4",
            },
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static description of what a tier unlocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TierFeatures {
    pub tier: Tier,
    pub name: &'static str,
    pub price: &'static str,
    pub description: &'static str,
    pub features: &'static [&'static str],
    /// `None` means unlimited.
    pub max_searches_per_day: Option<u32>,
    pub access_to_walmart_prices: bool,
    pub access_to_target_prices: bool,
    pub purchase_recommendations: bool,
    pub background: &'static str,
}

/// Account data safe to hand to callers (no password hash).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: i32,
    pub username: String,
    pub email: Option<String>,
    pub tier: Tier,
    pub created_at: String,
    pub last_login: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "tier", rename_all = "snake_case")]
pub enum CouponStatus {
    Unknown,
    AlreadyUsed,
    Valid(Tier),
}
