//! Cache and recipe store working together, without the HTTP layer.

use cookbook::config::SecurityConfig;
use cookbook::db::{CacheStore, Store};
use cookbook::domain::{RawRecipe, RecipeDetails, Slot};
use cookbook::services::{
    AuthService, RecipeService, ResponseCache, SeaOrmAuthService, SeaOrmRecipeService,
};
use serde_json::{Value, json};

fn temp_url(label: &str) -> String {
    let path = std::env::temp_dir().join(format!("cookbook-{label}-{}.db", uuid::Uuid::new_v4()));
    format!("sqlite:{}", path.display())
}

fn fast_security() -> SecurityConfig {
    SecurityConfig {
        argon2_memory_cost_kib: 1024,
        argon2_time_cost: 1,
        ..SecurityConfig::default()
    }
}

#[tokio::test]
async fn pizza_end_to_end() {
    let store = Store::new(&temp_url("e2e-store")).await.unwrap();
    let cache = ResponseCache::new(CacheStore::new(&temp_url("e2e-cache")).await.unwrap());
    let auth = SeaOrmAuthService::new(store.clone(), fast_security());
    let recipes = SeaOrmRecipeService::new(store.clone());

    let payload = json!([
        {"title": "Pizza", "analyzedInstructions": [], "extendedIngredients": [{"original": "cheese"}]}
    ]);
    cache.put(Slot::HomeBatch, &payload).await.unwrap();
    assert_eq!(cache.get::<Value>(Slot::HomeBatch).await, Some(payload));

    let user = auth
        .create_user("pizza@example.com", "password123", "Pizzaiolo")
        .await
        .unwrap();

    let pizza = recipes
        .create_recipe(&RecipeDetails {
            dish_name: "Pizza".to_string(),
            dish_photo: None,
            instructions: Vec::new(),
            ingredients: vec!["cheese".to_string()],
        })
        .await
        .unwrap();
    recipes.save_for_user(user.id, pizza.id).await.unwrap();

    let saved = recipes.list_saved(user.id).await.unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].dish_name, "Pizza");
    assert_eq!(saved[0].ingredients, ["cheese"]);
}

#[tokio::test]
async fn cached_record_converts_to_saved_recipe() {
    let store = Store::new(&temp_url("convert-store")).await.unwrap();
    let cache = ResponseCache::new(CacheStore::new(&temp_url("convert-cache")).await.unwrap());
    let recipes = SeaOrmRecipeService::new(store.clone());
    let user = store
        .create_user("c@example.com", "password123", "C", &fast_security())
        .await
        .unwrap();

    cache
        .put(
            Slot::NamedSearch,
            &json!([{
                "title": "Shakshuka",
                "image": "https://img.example/shakshuka.jpg",
                "analyzedInstructions": [{"steps": [
                    {"number": 1, "step": "Simmer tomatoes.", "ingredients": [{"name": "tomato"}]},
                    {"number": 2, "step": "Crack eggs.", "ingredients": [{"name": "egg"}]}
                ]}],
                "extendedIngredients": [{"original": "ignored for search records"}]
            }]),
        )
        .await
        .unwrap();

    let records: Vec<RawRecipe> = cache.get(Slot::NamedSearch).await.unwrap();
    let details = RecipeDetails::from_slot(Slot::NamedSearch, &records[0]);
    recipes.toggle_saved(user.id, &details).await.unwrap();

    let stored = recipes.find_recipe_by_name("Shakshuka").await.unwrap().unwrap();
    assert_eq!(stored.ingredients, ["tomato", "egg"]);
    assert_eq!(stored.instructions.len(), 2);
    assert_eq!(stored.dish_photo.as_deref(), Some("https://img.example/shakshuka.jpg"));
    assert!(recipes.is_saved(user.id, stored.id).await.unwrap());
}

#[tokio::test]
async fn clearing_cache_keeps_user_data() {
    let store = Store::new(&temp_url("keep-store")).await.unwrap();
    let cache_store = CacheStore::new(&temp_url("keep-cache")).await.unwrap();
    let cache = ResponseCache::new(cache_store);

    store
        .create_user("keep@example.com", "password123", "Keep", &fast_security())
        .await
        .unwrap();
    cache.put(Slot::RandomPick, &json!([{"title": "Toast"}])).await.unwrap();

    cache.clear().await.unwrap();

    assert!(cache.get::<Value>(Slot::RandomPick).await.is_none());
    assert!(store.get_user_by_email("keep@example.com").await.unwrap().is_some());
}
