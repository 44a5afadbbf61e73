use anyhow::{Context, Result};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::entities::{prelude::*, products};
use crate::models::product::{ProductInfo, ProductSnapshot};

pub struct ProductRepository {
    conn: DatabaseConnection,
}

impl ProductRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(m: products::Model) -> Result<ProductSnapshot> {
        let price_data: Vec<f64> = serde_json::from_str(&m.price_data)
            .with_context(|| format!("Corrupt price data for product {}", m.asin))?;

        Ok(ProductSnapshot {
            asin: m.asin,
            title: m.title,
            current_price: m.current_price,
            peak_price: m.peak_price,
            lowest_price: m.lowest_price,
            price_data,
            category: m.category,
            created_at: m.created_at,
            updated_at: m.updated_at,
        })
    }

    /// Inserts a new product or refreshes an existing one.
    ///
    /// Category and `created_at` are kept from the first insert.
    pub async fn save(&self, product: &ProductInfo) -> Result<()> {
        let now = chrono::Utc::now().to_rfc3339();
        let price_data =
            serde_json::to_string(&product.price_data).context("Failed to encode price data")?;

        let active_model = products::ActiveModel {
            asin: Set(product.asin.clone()),
            title: Set(product.title.clone()),
            current_price: Set(product.current_price),
            peak_price: Set(product.peak_price),
            lowest_price: Set(product.lowest_price),
            price_data: Set(price_data),
            category: Set(product.category.clone()),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        };

        Products::insert(active_model)
            .on_conflict(
                OnConflict::column(products::Column::Asin)
                    .update_columns([
                        products::Column::Title,
                        products::Column::CurrentPrice,
                        products::Column::PeakPrice,
                        products::Column::LowestPrice,
                        products::Column::PriceData,
                        products::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await
            .with_context(|| format!("Failed to save product {}", product.asin))?;

        Ok(())
    }

    pub async fn get(&self, asin: &str) -> Result<Option<ProductSnapshot>> {
        let model = Products::find_by_id(asin.to_string())
            .one(&self.conn)
            .await
            .context("Failed to query product")?;

        model.map(Self::map_model).transpose()
    }

    pub async fn get_by_asins(&self, asins: &[String]) -> Result<Vec<ProductSnapshot>> {
        if asins.is_empty() {
            return Ok(Vec::new());
        }

        let models = Products::find()
            .filter(products::Column::Asin.is_in(asins.iter().cloned()))
            .all(&self.conn)
            .await
            .context("Failed to query products")?;

        models.into_iter().map(Self::map_model).collect()
    }
}
