use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteProduct {
    pub asin: String,
    pub added_at: String,
    pub notes: Option<String>,
    pub title: String,
    pub current_price: f64,
}
