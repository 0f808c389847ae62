use super::RecipeCatalog;
use crate::config::BrowserConfig;
use crate::error::CatalogError;
use crate::model::{RecipePayload, RecipeSummary};
use async_trait::async_trait;
use html_escape::decode_html_entities;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::time::Duration;

/// HTTP client for the Forkify recipe API
pub struct ForkifyCatalog {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    recipes: Vec<WireSummary>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireSummary {
    #[serde(deserialize_with = "string_or_number")]
    recipe_id: String,
    title: String,
    #[serde(default)]
    publisher: String,
    #[serde(default)]
    image_url: String,
}

#[derive(Debug, Deserialize)]
struct RecipeResponse {
    recipe: Option<WireRecipe>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireRecipe {
    title: String,
    #[serde(default)]
    publisher: String,
    #[serde(default)]
    image_url: String,
    #[serde(default)]
    f2f_url: String,
    #[serde(default)]
    source_url: String,
    servings: Option<u32>,
    #[serde(default)]
    ingredients: Vec<String>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

fn decode_html_symbols(text: &str) -> String {
    decode_html_entities(text).trim().to_string()
}

impl From<WireSummary> for RecipeSummary {
    fn from(wire: WireSummary) -> Self {
        RecipeSummary {
            id: wire.recipe_id,
            title: decode_html_symbols(&wire.title),
            author: wire.publisher,
            img: wire.image_url,
        }
    }
}

impl From<WireRecipe> for RecipePayload {
    fn from(wire: WireRecipe) -> Self {
        RecipePayload {
            title: decode_html_symbols(&wire.title),
            author: wire.publisher,
            img: wire.image_url,
            url: wire.f2f_url,
            source_url: wire.source_url,
            servings: wire.servings,
            ingredient_lines: wire
                .ingredients
                .iter()
                .map(|line| decode_html_symbols(line))
                .collect(),
        }
    }
}

impl ForkifyCatalog {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, CatalogError> {
        let timeout = timeout.unwrap_or(Duration::from_secs(30));
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("Mozilla/5.0 (compatible; RecipeBrowser/0.1)")
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &BrowserConfig) -> Result<Self, CatalogError> {
        Self::new(&config.api_base_url, Some(config.request_timeout()))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, CatalogError> {
        let url = format!("{}/{}", self.base_url, path);
        debug!("GET {} {:?}", url, params);

        let response = self.client.get(&url).query(params).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| CatalogError::Decode(e.to_string()))
    }
}

#[async_trait]
impl RecipeCatalog for ForkifyCatalog {
    async fn search_recipes(&self, query: &str) -> Result<Vec<RecipeSummary>, CatalogError> {
        let response: SearchResponse = self.get_json("search", &[("q", query)]).await?;

        if let Some(error) = response.error {
            return Err(CatalogError::Empty(error));
        }
        if response.recipes.is_empty() {
            return Err(CatalogError::Empty(format!("no recipes for '{query}'")));
        }

        Ok(response.recipes.into_iter().map(RecipeSummary::from).collect())
    }

    async fn get_recipe(&self, id: &str) -> Result<RecipePayload, CatalogError> {
        let response: RecipeResponse = self.get_json("get", &[("rId", id)]).await?;

        match (response.recipe, response.error) {
            (_, Some(error)) => Err(CatalogError::Empty(error)),
            (Some(recipe), None) => Ok(recipe.into()),
            (None, None) => Err(CatalogError::Decode("missing 'recipe' field".to_string())),
        }
    }
}
