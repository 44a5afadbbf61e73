use anyhow::{Context, Result};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use std::collections::HashMap;

use super::product::ProductRepository;
use crate::entities::{favorites, prelude::*};
use crate::models::favorite::FavoriteProduct;

pub struct FavoriteRepository {
    conn: DatabaseConnection,
}

impl FavoriteRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Removes the favorite if present, adds it otherwise. Returns the new state.
    pub async fn toggle(&self, asin: &str, notes: Option<&str>, user_id: Option<i32>) -> Result<bool> {
        let txn = self.conn.begin().await?;

        let existing = Favorites::find()
            .filter(favorites::Column::Asin.eq(asin))
            .count(&txn)
            .await
            .context("Failed to query favorites")?;

        let is_favorite = if existing > 0 {
            Favorites::delete_many()
                .filter(favorites::Column::Asin.eq(asin))
                .exec(&txn)
                .await
                .context("Failed to remove favorite")?;
            false
        } else {
            let active_model = favorites::ActiveModel {
                asin: Set(asin.to_string()),
                added_at: Set(chrono::Utc::now().to_rfc3339()),
                notes: Set(notes.map(str::to_string)),
                user_id: Set(user_id),
                ..Default::default()
            };
            Favorites::insert(active_model)
                .exec_without_returning(&txn)
                .await
                .context("Failed to add favorite")?;
            true
        };

        txn.commit().await?;
        Ok(is_favorite)
    }

    pub async fn is_favorite(&self, asin: &str) -> Result<bool> {
        let count = Favorites::find()
            .filter(favorites::Column::Asin.eq(asin))
            .count(&self.conn)
            .await
            .context("Failed to query favorites")?;

        Ok(count > 0)
    }

    /// Newest first. Favorites whose product was never stored are skipped.
    pub async fn list(&self) -> Result<Vec<FavoriteProduct>> {
        let rows = Favorites::find()
            .order_by_desc(favorites::Column::AddedAt)
            .order_by_desc(favorites::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list favorites")?;

        let asins: Vec<String> = rows.iter().map(|r| r.asin.clone()).collect();
        let products: HashMap<String, _> = ProductRepository::new(self.conn.clone())
            .get_by_asins(&asins)
            .await?
            .into_iter()
            .map(|p| (p.asin.clone(), p))
            .collect();

        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let product = products.get(&row.asin)?;
                Some(FavoriteProduct {
                    title: product.title.clone(),
                    current_price: product.current_price,
                    asin: row.asin,
                    added_at: row.added_at,
                    notes: row.notes,
                })
            })
            .collect())
    }
}
