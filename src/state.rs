use std::sync::Arc;
use tokio::sync::RwLock;

use crate::clients::{RecipeApi, SpoonacularClient};
use crate::config::Config;
use crate::db::{CacheStore, Store};
use crate::services::{
    AuthService, DiscoveryService, RecipeService, ResponseCache, SeaOrmAuthService,
    SeaOrmRecipeService,
};

/// Build a shared HTTP client with reasonable defaults for API calls.
fn build_shared_http_client(timeout_seconds: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_seconds))
        .user_agent("Cookbook/0.1")
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub cache_store: CacheStore,

    pub response_cache: ResponseCache,

    pub auth_service: Arc<dyn AuthService>,

    pub recipe_service: Arc<dyn RecipeService>,

    pub discovery: DiscoveryService,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let http_client =
            build_shared_http_client(config.spoonacular.request_timeout_seconds.into())?;
        let api = Arc::new(SpoonacularClient::with_shared_client(
            http_client,
            &config.spoonacular,
        ));

        Self::with_recipe_api(config, api).await
    }

    /// Wires every service around `recipe_api` instead of the HTTP client.
    pub async fn with_recipe_api(
        config: Config,
        recipe_api: Arc<dyn RecipeApi>,
    ) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let cache_store = CacheStore::new(&config.general.cache_database_path).await?;
        let response_cache = ResponseCache::new(cache_store.clone());

        let auth_service = Arc::new(SeaOrmAuthService::new(
            store.clone(),
            config.security.clone(),
        )) as Arc<dyn AuthService>;

        let recipe_service = Arc::new(SeaOrmRecipeService::new(store.clone()))
            as Arc<dyn RecipeService>;

        let discovery = DiscoveryService::new(
            recipe_api,
            response_cache.clone(),
            recipe_service.clone(),
            config.spoonacular.home_batch_size,
        );

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            store,
            cache_store,
            response_cache,
            auth_service,
            recipe_service,
            discovery,
        })
    }

    /// Empties the response cache. User data is never touched.
    pub async fn clear_response_cache(&self) -> anyhow::Result<u64> {
        Ok(self.response_cache.clear().await?)
    }
}
