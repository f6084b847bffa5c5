use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::SpoonacularConfig;
use crate::domain::{FilterKind, RawRecipe};

const API_KEY_HEADER: &str = "x-api-key";

/// What a complex search looks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    /// Free-text dish name.
    ByName(String),
    /// Facet values forwarded as one comma-joined parameter.
    Filtered { kind: FilterKind, values: Vec<String> },
}

impl SearchQuery {
    /// Query parameters for `/recipes/complexSearch`.
    #[must_use]
    pub fn params(&self, page_size: u32) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("sort", "popularity".to_string()),
            ("number", page_size.to_string()),
            ("instructionsRequired", "true".to_string()),
            ("addRecipeInstructions", "true".to_string()),
            ("addRecipeNutrition", "true".to_string()),
        ];

        match self {
            Self::ByName(name) => params.push(("query", name.clone())),
            Self::Filtered { kind, values } => params.push((kind.query_param(), values.join(","))),
        }

        params
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<RawRecipe>,
}

#[derive(Debug, Deserialize)]
struct RandomResponse {
    recipes: Vec<RawRecipe>,
}

/// Source of recipe records.
///
/// An empty list means the API found nothing.
#[async_trait]
pub trait RecipeApi: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<RawRecipe>>;

    async fn random(&self, count: u32) -> Result<Vec<RawRecipe>>;
}

#[derive(Clone)]
pub struct SpoonacularClient {
    client: Client,
    base_url: String,
    api_key: String,
    page_size: u32,
}

impl SpoonacularClient {
    #[must_use]
    pub fn with_shared_client(client: Client, config: &SpoonacularConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            page_size: config.page_size,
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&'static str, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "Spoonacular request");

        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .query(params)
            .send()
            .await
            .with_context(|| format!("Request to {path} failed"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("Spoonacular API error: {status} - {body}"));
        }

        response
            .json()
            .await
            .with_context(|| format!("Unexpected response body from {path}"))
    }
}

#[async_trait]
impl RecipeApi for SpoonacularClient {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<RawRecipe>> {
        let response: SearchResponse = self
            .get_json("/recipes/complexSearch", &query.params(self.page_size))
            .await?;
        Ok(response.results)
    }

    async fn random(&self, count: u32) -> Result<Vec<RawRecipe>> {
        let response: RandomResponse = self
            .get_json("/recipes/random", &[("number", count.to_string())])
            .await?;
        Ok(response.recipes)
    }
}
