use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::config::SecurityConfig;
use crate::models::account::{CouponStatus, Tier, UserAccount};
use crate::models::favorite::FavoriteProduct;
use crate::models::history::RecentSearch;
use crate::models::product::{ProductInfo, ProductSnapshot};

pub mod migrator;
pub mod repositories;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:").trim_start_matches("//");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn product_repo(&self) -> repositories::product::ProductRepository {
        repositories::product::ProductRepository::new(self.conn.clone())
    }

    fn history_repo(&self) -> repositories::history::HistoryRepository {
        repositories::history::HistoryRepository::new(self.conn.clone())
    }

    fn favorite_repo(&self) -> repositories::favorite::FavoriteRepository {
        repositories::favorite::FavoriteRepository::new(self.conn.clone())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn coupon_repo(&self) -> repositories::coupon::CouponRepository {
        repositories::coupon::CouponRepository::new(self.conn.clone())
    }

    // ========================================================================
    // Products & history
    // ========================================================================

    pub async fn save_product(&self, product: &ProductInfo) -> Result<()> {
        self.product_repo().save(product).await
    }

    pub async fn get_product(&self, asin: &str) -> Result<Option<ProductSnapshot>> {
        self.product_repo().get(asin).await
    }

    pub async fn add_search_history(
        &self,
        asin: Option<&str>,
        url: Option<&str>,
        search_term: Option<&str>,
        user_id: Option<i32>,
    ) -> Result<()> {
        self.history_repo()
            .add(asin, url, search_term, user_id)
            .await
    }

    pub async fn recent_searches(&self, limit: u64) -> Result<Vec<RecentSearch>> {
        self.history_repo().recent(limit).await
    }

    // ========================================================================
    // Favorites
    // ========================================================================

    pub async fn toggle_favorite(
        &self,
        asin: &str,
        notes: Option<&str>,
        user_id: Option<i32>,
    ) -> Result<bool> {
        self.favorite_repo().toggle(asin, notes, user_id).await
    }

    pub async fn is_favorite(&self, asin: &str) -> Result<bool> {
        self.favorite_repo().is_favorite(asin).await
    }

    pub async fn list_favorites(&self) -> Result<Vec<FavoriteProduct>> {
        self.favorite_repo().list().await
    }

    // ========================================================================
    // Accounts & coupons
    // ========================================================================

    pub async fn create_user(
        &self,
        username: &str,
        password: &str,
        email: Option<&str>,
        tier: Tier,
        config: &SecurityConfig,
    ) -> Result<Option<i32>> {
        self.user_repo()
            .create(username, password, email, tier, config)
            .await
    }

    pub async fn check_login(&self, username: &str, password: &str) -> Result<Option<UserAccount>> {
        self.user_repo().verify_credentials(username, password).await
    }

    pub async fn get_user(&self, id: i32) -> Result<Option<UserAccount>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<UserAccount>> {
        self.user_repo().get_by_username(username).await
    }

    pub async fn verify_coupon(&self, code: &str) -> Result<CouponStatus> {
        self.coupon_repo().status(code).await
    }

    pub async fn apply_coupon(&self, code: &str, user_id: i32) -> Result<Option<Tier>> {
        self.coupon_repo().redeem(code, user_id).await
    }
}
