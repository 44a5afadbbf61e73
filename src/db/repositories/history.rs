use anyhow::{Context, Result};
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder, QuerySelect, Set};
use std::collections::HashMap;

use super::product::ProductRepository;
use crate::entities::{prelude::*, search_history};
use crate::models::history::RecentSearch;

pub struct HistoryRepository {
    conn: DatabaseConnection,
}

impl HistoryRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn add(
        &self,
        asin: Option<&str>,
        url: Option<&str>,
        search_term: Option<&str>,
        user_id: Option<i32>,
    ) -> Result<()> {
        let active_model = search_history::ActiveModel {
            asin: Set(asin.map(str::to_string)),
            url: Set(url.map(str::to_string)),
            search_term: Set(search_term.map(str::to_string)),
            search_date: Set(chrono::Utc::now().to_rfc3339()),
            user_id: Set(user_id),
            ..Default::default()
        };

        SearchHistory::insert(active_model)
            .exec_without_returning(&self.conn)
            .await
            .context("Failed to record search")?;

        Ok(())
    }

    /// Newest first, with product title and price filled in where the product is stored.
    pub async fn recent(&self, limit: u64) -> Result<Vec<RecentSearch>> {
        let rows = SearchHistory::find()
            .order_by_desc(search_history::Column::SearchDate)
            .order_by_desc(search_history::Column::Id)
            .limit(limit)
            .all(&self.conn)
            .await
            .context("Failed to query search history")?;

        let mut asins: Vec<String> = rows.iter().filter_map(|r| r.asin.clone()).collect();
        asins.sort();
        asins.dedup();

        let products: HashMap<String, (String, f64)> = ProductRepository::new(self.conn.clone())
            .get_by_asins(&asins)
            .await?
            .into_iter()
            .map(|p| (p.asin, (p.title, p.current_price)))
            .collect();

        Ok(rows
            .into_iter()
            .map(|row| {
                let product = row.asin.as_ref().and_then(|a| products.get(a));
                RecentSearch {
                    title: product.map(|(title, _)| title.clone()),
                    current_price: product.map(|(_, price)| *price),
                    asin: row.asin,
                    url: row.url,
                    search_term: row.search_term,
                    search_date: row.search_date,
                    user_id: row.user_id,
                }
            })
            .collect())
    }
}
