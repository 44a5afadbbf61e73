use std::sync::Arc;
use tokio::sync::RwLock;

use crate::clients::amazon::AmazonClient;
use crate::clients::{OfflineSource, ProductPageSource};
use crate::config::Config;
use crate::db::Store;
use crate::services::{AccountService, LookupService, SeaOrmAccountService};

/// Builds the HTTP client used for every retailer request.
/// Every request it sends is bounded by `timeout_seconds`.
fn build_shared_http_client(timeout_seconds: u64, user_agent: &str) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_seconds))
        .user_agent(user_agent.to_string())
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub lookup_service: Arc<LookupService>,

    pub account_service: Arc<dyn AccountService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let source: Arc<dyn ProductPageSource> = if config.scraper.live_enabled {
            let http_client = build_shared_http_client(
                config.scraper.request_timeout_seconds,
                &config.scraper.user_agent,
            )?;
            Arc::new(AmazonClient::with_shared_client(http_client, &config.scraper))
        } else {
            tracing::info!("Live scraping disabled, all lookups use demo data");
            Arc::new(OfflineSource)
        };

        Ok(Self::with_source(config, store, source))
    }

    /// Wires services around an already-open store and a chosen page source.
    #[must_use]
    pub fn with_source(config: Config, store: Store, source: Arc<dyn ProductPageSource>) -> Self {
        let lookup_service = Arc::new(LookupService::new(store.clone(), source));
        let account_service: Arc<dyn AccountService> = Arc::new(SeaOrmAccountService::new(
            store.clone(),
            config.security.clone(),
        ));

        Self {
            config: Arc::new(RwLock::new(config)),
            store,
            lookup_service,
            account_service,
        }
    }
}
