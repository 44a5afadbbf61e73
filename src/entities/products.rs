use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub asin: String,
    pub title: String,
    pub current_price: f64,
    pub peak_price: f64,
    pub lowest_price: f64,
    /// JSON array of the 90 daily prices, oldest first
    #[sea_orm(column_type = "Text")]
    pub price_data: String,
    pub category: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
