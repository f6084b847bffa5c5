use crate::config::SecurityConfig;
use crate::domain::{RecipeDetails, RecipeId, SavedState, UserId};
use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod error;
pub mod migrator;
pub mod repositories;

pub use error::{StoreError, StoreResult};
pub use repositories::recipe::Recipe;
pub use repositories::user::User;

/// Opens a pooled `SQLite` connection, creating the database file if needed.
async fn connect(db_url: &str, max_connections: u32, min_connections: u32) -> Result<DatabaseConnection> {
    let in_memory = db_url.contains(":memory:");

    if !in_memory {
        let path_str = db_url
            .trim_start_matches("sqlite:")
            .split('?')
            .next()
            .unwrap_or_default();
        if let Some(parent) = Path::new(path_str).parent() {
            tokio::fs::create_dir_all(parent).await.ok();
        }
        if !Path::new(path_str).exists() {
            std::fs::File::create(path_str)?;
        }
    }

    // Every connection to `:memory:` is a separate database.
    let (max_connections, min_connections) = if in_memory {
        (1, 1)
    } else {
        (max_connections, min_connections)
    };

    let mut opt = ConnectOptions::new(db_url.to_string());
    opt.max_connections(max_connections)
        .min_connections(min_connections)
        .connect_timeout(Duration::from_secs(10))
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(600))
        .sqlx_logging(false);

    Ok(Database::connect(opt).await?)
}

async fn ping(conn: &DatabaseConnection) -> Result<()> {
    let backend = conn.get_database_backend();
    conn.query_one(Statement::from_string(backend, "SELECT 1".to_string()))
        .await?;
    Ok(())
}

/// Durable store for users, recipes and saved-recipe links.
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

        let conn = connect(db_url, max_connections, min_connections).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        ping(&self.conn).await
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn recipe_repo(&self) -> repositories::recipe::RecipeRepository {
        repositories::recipe::RecipeRepository::new(self.conn.clone())
    }

    fn saved_repo(&self) -> repositories::saved::SavedRecipeRepository {
        repositories::saved::SavedRecipeRepository::new(self.conn.clone())
    }

    // ========== Users ==========

    pub async fn get_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        self.user_repo().get_by_email(email).await
    }

    pub async fn get_user_by_email_with_password(
        &self,
        email: &str,
    ) -> StoreResult<Option<(User, String)>> {
        self.user_repo().get_by_email_with_password(email).await
    }

    pub async fn get_user(&self, id: UserId) -> StoreResult<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn create_user(
        &self,
        email: &str,
        password: &str,
        name: &str,
        config: &SecurityConfig,
    ) -> StoreResult<User> {
        self.user_repo().create(email, password, name, config).await
    }

    // ========== Recipes ==========

    pub async fn get_recipe_by_name(&self, dish_name: &str) -> StoreResult<Option<Recipe>> {
        self.recipe_repo().get_by_name(dish_name).await
    }

    pub async fn get_recipe(&self, id: RecipeId) -> StoreResult<Option<Recipe>> {
        self.recipe_repo().get_by_id(id).await
    }

    pub async fn create_recipe(&self, details: &RecipeDetails) -> StoreResult<Recipe> {
        self.recipe_repo().create(details).await
    }

    pub async fn find_or_create_recipe(&self, details: &RecipeDetails) -> StoreResult<Recipe> {
        self.recipe_repo().find_or_create(details).await
    }

    // ========== Saved recipes ==========

    pub async fn is_recipe_saved(&self, user_id: UserId, recipe_id: RecipeId) -> StoreResult<bool> {
        self.saved_repo().is_saved(user_id, recipe_id).await
    }

    pub async fn save_recipe(&self, user_id: UserId, recipe_id: RecipeId) -> StoreResult<bool> {
        self.saved_repo().save(user_id, recipe_id).await
    }

    pub async fn unsave_recipe(&self, user_id: UserId, recipe_id: RecipeId) -> StoreResult<bool> {
        self.saved_repo().unsave(user_id, recipe_id).await
    }

    pub async fn toggle_saved_recipe(
        &self,
        user_id: UserId,
        recipe_id: RecipeId,
    ) -> StoreResult<SavedState> {
        self.saved_repo().toggle(user_id, recipe_id).await
    }

    pub async fn list_saved_recipes(&self, user_id: UserId) -> StoreResult<Vec<Recipe>> {
        self.saved_repo().list_for_user(user_id).await
    }

    pub async fn saved_recipe_count(&self, user_id: UserId) -> StoreResult<u64> {
        self.saved_repo().count_for_user(user_id).await
    }
}

/// Backing store of the response cache.
///
/// Kept apart from [`Store`] so clearing the cache can never touch user data,
/// even when both are configured to use the same database file.
#[derive(Clone)]
pub struct CacheStore {
    pub conn: DatabaseConnection,
}

impl CacheStore {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 2, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let conn = connect(db_url, max_connections, min_connections).await?;

        migrator::CacheMigrator::up(&conn, None).await?;

        info!("Response cache database ready");

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        ping(&self.conn).await
    }

    fn cache_repo(&self) -> repositories::cache::CacheRepository {
        repositories::cache::CacheRepository::new(self.conn.clone())
    }

    pub async fn get_payload(&self, slot: &str) -> Result<Option<String>> {
        self.cache_repo().get(slot).await
    }

    pub async fn put_payload(&self, slot: &str, payload: String) -> Result<()> {
        self.cache_repo().put(slot, payload).await
    }

    pub async fn clear(&self) -> Result<u64> {
        self.cache_repo().clear().await
    }

    pub async fn entry_count(&self) -> Result<u64> {
        self.cache_repo().count().await
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::{CacheStore, Store};

    pub fn temp_db_url(label: &str) -> String {
        let path = std::env::temp_dir().join(format!(
            "cookbook-{label}-{}.db",
            uuid::Uuid::new_v4()
        ));
        format!("sqlite:{}", path.display())
    }

    pub async fn store() -> Store {
        Store::new(&temp_db_url("store"))
            .await
            .expect("failed to open test store")
    }

    pub async fn cache_store() -> CacheStore {
        CacheStore::new(&temp_db_url("cache"))
            .await
            .expect("failed to open test cache")
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{cache_store, store, temp_db_url};
    use super::*;
    use crate::domain::Step;
    use crate::entities::{prelude::*, saved_recipes};
    use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

    fn fast_security() -> SecurityConfig {
        SecurityConfig {
            argon2_memory_cost_kib: 1024,
            argon2_time_cost: 1,
            ..SecurityConfig::default()
        }
    }

    fn details(name: &str) -> RecipeDetails {
        RecipeDetails {
            dish_name: name.to_string(),
            dish_photo: None,
            instructions: Vec::new(),
            ingredients: vec!["salt".to_string()],
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_without_a_second_row() {
        let store = store().await;
        let security = fast_security();

        store
            .create_user("cook@example.com", "password123", "Cook", &security)
            .await
            .unwrap();
        let err = store
            .create_user("cook@example.com", "another-pass", "Other", &security)
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::DuplicateEmail(ref e) if e == "cook@example.com"));
        assert_eq!(Users::find().count(&store.conn).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn email_lookup_is_case_sensitive() {
        let store = store().await;
        store
            .create_user("Cook@Example.com", "password123", "Cook", &fast_security())
            .await
            .unwrap();

        assert!(store.get_user_by_email("Cook@Example.com").await.unwrap().is_some());
        assert!(store.get_user_by_email("cook@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn password_hash_is_not_plaintext() {
        let store = store().await;
        store
            .create_user("a@b.co", "password123", "A", &fast_security())
            .await
            .unwrap();

        let (_, hash) = store
            .get_user_by_email_with_password("a@b.co")
            .await
            .unwrap()
            .unwrap();
        assert_ne!(hash, "password123");
        assert!(hash.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn create_then_find_recipe_by_name() {
        let store = store().await;
        let mut pasta = details("Pasta");
        pasta.dish_photo = Some("https://img.example/pasta.jpg".to_string());
        pasta.instructions = vec![serde_json::from_value::<Step>(serde_json::json!({
            "number": 1, "step": "Boil water.", "ingredients": [{"name": "water"}]
        }))
        .unwrap()];

        let created = store.create_recipe(&pasta).await.unwrap();
        let found = store.get_recipe_by_name("Pasta").await.unwrap().unwrap();

        assert_eq!(found.id, created.id);
        assert_eq!(found.instructions, pasta.instructions);
        assert_eq!(found.dish_photo.as_deref(), Some("https://img.example/pasta.jpg"));

        let err = store.create_recipe(&details("Pasta")).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateName(ref n) if n == "Pasta"));
        assert!(store.get_recipe_by_name("Risotto").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn find_or_create_reuses_existing_row() {
        let store = store().await;
        let first = store.find_or_create_recipe(&details("Soup")).await.unwrap();

        let mut changed = details("Soup");
        changed.ingredients = vec!["pepper".to_string()];
        let second = store.find_or_create_recipe(&changed).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.ingredients, ["salt"]);
    }

    #[tokio::test]
    async fn saving_twice_keeps_one_row() {
        let store = store().await;
        let user = store
            .create_user("u@example.com", "password123", "U", &fast_security())
            .await
            .unwrap();
        let recipe = store.create_recipe(&details("Tacos")).await.unwrap();

        assert!(store.save_recipe(user.id, recipe.id).await.unwrap());
        assert!(!store.save_recipe(user.id, recipe.id).await.unwrap());

        let rows = SavedRecipes::find()
            .filter(saved_recipes::Column::UserId.eq(user.id.value()))
            .filter(saved_recipes::Column::RecipeId.eq(recipe.id.value()))
            .count(&store.conn)
            .await
            .unwrap();
        assert_eq!(rows, 1);
        assert!(store.is_recipe_saved(user.id, recipe.id).await.unwrap());
    }

    #[tokio::test]
    async fn unsaving_a_never_saved_recipe_is_a_noop() {
        let store = store().await;
        let user = store
            .create_user("u@example.com", "password123", "U", &fast_security())
            .await
            .unwrap();
        let saved = store.create_recipe(&details("Kept")).await.unwrap();
        let other = store.create_recipe(&details("Never")).await.unwrap();
        store.save_recipe(user.id, saved.id).await.unwrap();

        assert!(!store.unsave_recipe(user.id, other.id).await.unwrap());
        assert_eq!(store.saved_recipe_count(user.id).await.unwrap(), 1);
        assert!(!store.is_recipe_saved(user.id, other.id).await.unwrap());
    }

    #[tokio::test]
    async fn list_saved_is_per_user_and_in_save_order() {
        let store = store().await;
        let security = fast_security();
        let alice = store.create_user("alice@x.io", "password123", "Alice", &security).await.unwrap();
        let bob = store.create_user("bob@x.io", "password123", "Bob", &security).await.unwrap();

        let curry = store.create_recipe(&details("Curry")).await.unwrap();
        let bread = store.create_recipe(&details("Bread")).await.unwrap();

        store.save_recipe(alice.id, curry.id).await.unwrap();
        store.save_recipe(alice.id, bread.id).await.unwrap();
        store.save_recipe(bob.id, bread.id).await.unwrap();

        let names: Vec<String> = store
            .list_saved_recipes(alice.id)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.dish_name)
            .collect();
        assert_eq!(names, ["Curry", "Bread"]);

        let bobs = store.list_saved_recipes(bob.id).await.unwrap();
        assert_eq!(bobs.len(), 1);
        assert_eq!(bobs[0].id, bread.id);
    }

    #[tokio::test]
    async fn toggle_flips_membership() {
        let store = store().await;
        let user = store
            .create_user("t@example.com", "password123", "T", &fast_security())
            .await
            .unwrap();
        let ramen = store.find_or_create_recipe(&details("Ramen")).await.unwrap();

        let state = store.toggle_saved_recipe(user.id, ramen.id).await.unwrap();
        assert_eq!(state, SavedState::Saved);
        assert!(store.is_recipe_saved(user.id, ramen.id).await.unwrap());

        let state = store.toggle_saved_recipe(user.id, ramen.id).await.unwrap();
        assert_eq!(state, SavedState::NotSaved);
        assert!(!store.is_recipe_saved(user.id, ramen.id).await.unwrap());
        // The recipe row outlives the link.
        assert!(store.get_recipe(ramen.id).await.unwrap().is_some());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_saves_of_one_pair_all_succeed() {
        let store = store().await;
        let user = store
            .create_user("race@example.com", "password123", "Race", &fast_security())
            .await
            .unwrap();

        for round in 0..10 {
            let recipe = store
                .create_recipe(&details(&format!("Dish {round}")))
                .await
                .unwrap();

            let (user_id, recipe_id) = (user.id, recipe.id);
            let tasks: Vec<_> = (0..4)
                .map(|_| {
                    let store = store.clone();
                    tokio::spawn(async move { store.save_recipe(user_id, recipe_id).await })
                })
                .collect();

            let mut inserted = 0;
            for task in tasks {
                if task.await.unwrap().unwrap() {
                    inserted += 1;
                }
            }

            assert_eq!(inserted, 1);
            let rows = SavedRecipes::find()
                .filter(saved_recipes::Column::UserId.eq(user.id.value()))
                .filter(saved_recipes::Column::RecipeId.eq(recipe.id.value()))
                .count(&store.conn)
                .await
                .unwrap();
            assert_eq!(rows, 1);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_find_or_create_and_toggle_all_succeed() {
        let store = store().await;
        let security = fast_security();
        let mut users = Vec::new();
        for i in 0..4 {
            let user = store
                .create_user(&format!("cook{i}@example.com"), "password123", "Cook", &security)
                .await
                .unwrap();
            users.push(user.id);
        }

        let tasks: Vec<_> = users
            .iter()
            .map(|&user| {
                let store = store.clone();
                tokio::spawn(async move {
                    let recipe = store.find_or_create_recipe(&details("Paella")).await?;
                    store.toggle_saved_recipe(user, recipe.id).await
                })
            })
            .collect();

        for task in tasks {
            assert_eq!(task.await.unwrap().unwrap(), SavedState::Saved);
        }

        assert_eq!(Recipes::find().count(&store.conn).await.unwrap(), 1);
        assert_eq!(SavedRecipes::find().count(&store.conn).await.unwrap(), 4);
    }

    #[tokio::test]
    async fn cache_upsert_replaces_payload() {
        let cache = cache_store().await;

        assert_eq!(cache.get_payload("1").await.unwrap(), None);
        cache.put_payload("1", "[1,2]".to_string()).await.unwrap();
        cache.put_payload("1", "{\"a\":true}".to_string()).await.unwrap();

        assert_eq!(
            cache.get_payload("1").await.unwrap().as_deref(),
            Some("{\"a\":true}")
        );
        assert_eq!(cache.entry_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn clearing_shared_file_cache_keeps_users() {
        let url = temp_db_url("shared");
        let store = Store::new(&url).await.unwrap();
        let cache = CacheStore::new(&url).await.unwrap();

        store
            .create_user("keep@example.com", "password123", "Keep", &fast_security())
            .await
            .unwrap();
        cache.put_payload("2", "[]".to_string()).await.unwrap();

        assert_eq!(cache.clear().await.unwrap(), 1);
        assert_eq!(cache.get_payload("2").await.unwrap(), None);
        assert!(store.get_user_by_email("keep@example.com").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn ping_succeeds() {
        store().await.ping().await.unwrap();
        cache_store().await.ping().await.unwrap();
    }
}
