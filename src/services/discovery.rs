//! Search and browse flows.
//!
//! Every flow that talks to the recipe API stores the records it got under
//! its [`Slot`]; the results and details views only ever read from the cache.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::clients::{RecipeApi, SearchQuery};
use crate::config::MAX_PAGE_SIZE;
use crate::domain::{FilterKind, RawRecipe, RecipeDetails, SavedState, Slot, UserId};
use crate::services::recipe_service::{RecipeError, RecipeService};
use crate::services::response_cache::{CacheError, ResponseCache};

#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The API returned no records; carries what was searched for.
    #[error("No recipes found for '{0}'")]
    NotFound(String),

    #[error("Nothing cached for slot {0}")]
    NotCached(Slot),

    #[error("Slot {slot} has no recipe at index {index}")]
    NoSuchIndex { slot: Slot, index: usize },

    #[error("Recipe API error: {0}")]
    Upstream(String),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Recipe(#[from] RecipeError),
}

/// One tile of a results page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeCard {
    pub index: usize,
    pub title: String,
    pub image: Option<String>,
}

impl RecipeCard {
    fn page(records: &[RawRecipe]) -> Vec<Self> {
        records
            .iter()
            .take(MAX_PAGE_SIZE as usize)
            .enumerate()
            .map(|(index, raw)| Self {
                index,
                title: raw.title.clone(),
                image: raw.image.clone(),
            })
            .collect()
    }
}

#[derive(Clone)]
pub struct DiscoveryService {
    api: Arc<dyn RecipeApi>,
    cache: ResponseCache,
    recipes: Arc<dyn RecipeService>,
    home_batch_size: u32,
}

impl DiscoveryService {
    #[must_use]
    pub fn new(
        api: Arc<dyn RecipeApi>,
        cache: ResponseCache,
        recipes: Arc<dyn RecipeService>,
        home_batch_size: u32,
    ) -> Self {
        Self {
            api,
            cache,
            recipes,
            home_batch_size,
        }
    }

    /// Named search, cached in slot 1.
    pub async fn search_by_name(&self, dish_name: &str) -> Result<Vec<RecipeCard>, DiscoveryError> {
        let records = self
            .api
            .search(&SearchQuery::ByName(dish_name.to_string()))
            .await
            .map_err(upstream)?;

        self.store_non_empty(Slot::NamedSearch, records, dish_name)
            .await
    }

    /// Random batch for the home page, cached in slot 2.
    pub async fn home_batch(&self) -> Result<Vec<RecipeCard>, DiscoveryError> {
        let records = self
            .api
            .random(self.home_batch_size)
            .await
            .map_err(upstream)?;

        self.cache.put(Slot::HomeBatch, &records).await?;
        Ok(RecipeCard::page(&records))
    }

    /// Facet search, cached in slot 3.
    pub async fn filtered_search(
        &self,
        kind: FilterKind,
        values: Vec<String>,
    ) -> Result<Vec<RecipeCard>, DiscoveryError> {
        let phrase = values.join(", ");
        let records = self
            .api
            .search(&SearchQuery::Filtered { kind, values })
            .await
            .map_err(upstream)?;

        self.store_non_empty(Slot::FilteredSearch, records, &phrase)
            .await
    }

    /// Single random recipe, cached in slot 4 and returned as details.
    pub async fn random_pick(&self) -> Result<RecipeDetails, DiscoveryError> {
        let records = self.api.random(1).await.map_err(upstream)?;
        let Some(first) = records.first() else {
            return Err(DiscoveryError::NotFound("a random recipe".to_string()));
        };

        let details = RecipeDetails::from_slot(Slot::RandomPick, first);
        self.cache.put(Slot::RandomPick, &records).await?;
        Ok(details)
    }

    /// First page of whatever `slot` currently holds.
    pub async fn results(&self, slot: Slot) -> Result<Vec<RecipeCard>, DiscoveryError> {
        let records = self.cached(slot).await?;
        Ok(RecipeCard::page(&records))
    }

    /// Details of the `index`-th record cached under `slot`.
    pub async fn details(&self, slot: Slot, index: usize) -> Result<RecipeDetails, DiscoveryError> {
        let records = self.cached(slot).await?;
        records
            .get(index)
            .map(|raw| RecipeDetails::from_slot(slot, raw))
            .ok_or(DiscoveryError::NoSuchIndex { slot, index })
    }

    /// Whether `user` has saved the dish described by `details`.
    pub async fn is_saved_by(&self, user: UserId, details: &RecipeDetails) -> Result<bool, DiscoveryError> {
        let Some(recipe) = self.recipes.find_recipe_by_name(&details.dish_name).await? else {
            return Ok(false);
        };
        Ok(self.recipes.is_saved(user, recipe.id).await?)
    }

    /// Saves or unsaves the cached recipe at `slot`/`index` for `user`.
    pub async fn toggle_saved(
        &self,
        user: UserId,
        slot: Slot,
        index: usize,
    ) -> Result<(RecipeDetails, SavedState), DiscoveryError> {
        let details = self.details(slot, index).await?;
        let state = self.recipes.toggle_saved(user, &details).await?;
        Ok((details, state))
    }

    async fn cached(&self, slot: Slot) -> Result<Vec<RawRecipe>, DiscoveryError> {
        self.cache
            .get(slot)
            .await
            .ok_or(DiscoveryError::NotCached(slot))
    }

    async fn store_non_empty(
        &self,
        slot: Slot,
        records: Vec<RawRecipe>,
        phrase: &str,
    ) -> Result<Vec<RecipeCard>, DiscoveryError> {
        if records.is_empty() {
            info!(slot = %slot, phrase, "Search returned no recipes");
            return Err(DiscoveryError::NotFound(phrase.to_string()));
        }

        self.cache.put(slot, &records).await?;
        Ok(RecipeCard::page(&records))
    }
}

fn upstream(err: anyhow::Error) -> DiscoveryError {
    warn!(error = %err, "Recipe API request failed");
    DiscoveryError::Upstream(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SecurityConfig;
    use crate::db::test_support::{cache_store, store};
    use crate::services::recipe_service_impl::SeaOrmRecipeService;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// Returns canned records and remembers the queries it saw.
    #[derive(Default)]
    struct FakeApi {
        search: Vec<RawRecipe>,
        random: Vec<RawRecipe>,
        queries: Mutex<Vec<SearchQuery>>,
    }

    #[async_trait]
    impl RecipeApi for FakeApi {
        async fn search(&self, query: &SearchQuery) -> anyhow::Result<Vec<RawRecipe>> {
            self.queries.lock().unwrap().push(query.clone());
            Ok(self.search.clone())
        }

        async fn random(&self, count: u32) -> anyhow::Result<Vec<RawRecipe>> {
            Ok(self.random.iter().take(count as usize).cloned().collect())
        }
    }

    struct FailingApi;

    #[async_trait]
    impl RecipeApi for FailingApi {
        async fn search(&self, _: &SearchQuery) -> anyhow::Result<Vec<RawRecipe>> {
            anyhow::bail!("connection refused")
        }

        async fn random(&self, _: u32) -> anyhow::Result<Vec<RawRecipe>> {
            anyhow::bail!("connection refused")
        }
    }

    fn record(title: &str) -> RawRecipe {
        serde_json::from_value(json!({
            "title": title,
            "image": format!("https://img.example/{title}.jpg"),
            "analyzedInstructions": [{"steps": [
                {"number": 1, "step": "Mix.", "ingredients": [{"name": "flour"}, {"name": "egg"}]}
            ]}],
            "extendedIngredients": [{"original": "2 cups flour"}]
        }))
        .unwrap()
    }

    async fn service(api: Arc<dyn RecipeApi>) -> (DiscoveryService, UserId) {
        let store = store().await;
        let user = store
            .create_user(
                "d@example.com",
                "password123",
                "D",
                &SecurityConfig {
                    argon2_memory_cost_kib: 1024,
                    argon2_time_cost: 1,
                    ..SecurityConfig::default()
                },
            )
            .await
            .unwrap();
        let cache = ResponseCache::new(cache_store().await);
        let recipes = Arc::new(SeaOrmRecipeService::new(store));
        (DiscoveryService::new(api, cache, recipes, 12), user.id)
    }

    #[tokio::test]
    async fn named_search_caches_slot_one() {
        let api = Arc::new(FakeApi {
            search: vec![record("Pad Thai"), record("Pho")],
            ..FakeApi::default()
        });
        let (discovery, _) = service(api.clone()).await;

        let cards = discovery.search_by_name("noodles").await.unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[1].title, "Pho");
        assert_eq!(
            api.queries.lock().unwrap()[0],
            SearchQuery::ByName("noodles".to_string())
        );

        assert_eq!(discovery.results(Slot::NamedSearch).await.unwrap(), cards);
        let details = discovery.details(Slot::NamedSearch, 0).await.unwrap();
        assert_eq!(details.ingredients, ["flour", "egg"]);
    }

    #[tokio::test]
    async fn empty_search_is_not_found_with_phrase() {
        let (discovery, _) = service(Arc::new(FakeApi::default())).await;

        assert!(matches!(
            discovery.search_by_name("xyzzy").await,
            Err(DiscoveryError::NotFound(ref p)) if p == "xyzzy"
        ));
        assert!(matches!(
            discovery.results(Slot::NamedSearch).await,
            Err(DiscoveryError::NotCached(Slot::NamedSearch))
        ));
    }

    #[tokio::test]
    async fn home_batch_uses_extended_ingredients() {
        let api = Arc::new(FakeApi {
            random: (0..15).map(|i| record(&format!("Dish {i}"))).collect(),
            ..FakeApi::default()
        });
        let (discovery, _) = service(api).await;

        let cards = discovery.home_batch().await.unwrap();
        assert_eq!(cards.len(), 12);

        let details = discovery.details(Slot::HomeBatch, 3).await.unwrap();
        assert_eq!(details.dish_name, "Dish 3");
        assert_eq!(details.ingredients, ["2 cups flour"]);
        assert!(matches!(
            discovery.details(Slot::HomeBatch, 40).await,
            Err(DiscoveryError::NoSuchIndex { index: 40, .. })
        ));
    }

    #[tokio::test]
    async fn results_page_is_capped() {
        let api = Arc::new(FakeApi {
            search: (0..20).map(|i| record(&format!("R{i}"))).collect(),
            ..FakeApi::default()
        });
        let (discovery, _) = service(api).await;

        discovery
            .filtered_search(FilterKind::Diet, vec!["Vegan".to_string()])
            .await
            .unwrap();
        let cards = discovery.results(Slot::FilteredSearch).await.unwrap();
        assert_eq!(cards.len(), 12);
        assert_eq!(cards.last().unwrap().index, 11);
        // The full record list stays cached.
        assert!(discovery.details(Slot::FilteredSearch, 19).await.is_ok());
    }

    #[tokio::test]
    async fn random_pick_and_toggle() {
        let api = Arc::new(FakeApi {
            random: vec![record("Lasagna")],
            ..FakeApi::default()
        });
        let (discovery, user) = service(api).await;

        let picked = discovery.random_pick().await.unwrap();
        assert_eq!(picked.dish_name, "Lasagna");
        assert!(!discovery.is_saved_by(user, &picked).await.unwrap());

        let (details, state) = discovery.toggle_saved(user, Slot::RandomPick, 0).await.unwrap();
        assert_eq!(details, picked);
        assert_eq!(state, SavedState::Saved);
        assert!(discovery.is_saved_by(user, &picked).await.unwrap());

        let (_, state) = discovery.toggle_saved(user, Slot::RandomPick, 0).await.unwrap();
        assert_eq!(state, SavedState::NotSaved);
    }

    #[tokio::test]
    async fn api_failure_is_upstream_error() {
        let (discovery, _) = service(Arc::new(FailingApi)).await;

        assert!(matches!(
            discovery.search_by_name("soup").await,
            Err(DiscoveryError::Upstream(_))
        ));
        assert!(matches!(
            discovery.random_pick().await,
            Err(DiscoveryError::Upstream(_))
        ));
    }
}
