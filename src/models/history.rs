use serde::{Deserialize, Serialize};

/// One search history row, joined with the product it resolved to (if stored).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentSearch {
    pub asin: Option<String>,
    pub url: Option<String>,
    pub search_term: Option<String>,
    pub search_date: String,
    pub user_id: Option<i32>,
    pub title: Option<String>,
    pub current_price: Option<f64>,
}
