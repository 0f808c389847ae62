pub mod ingredients;

pub use ingredients::parse_ingredient;

use crate::catalog::RecipeCatalog;
use crate::error::BrowserError;
use crate::model::{Ingredient, RecipePayload};
use log::{debug, error};

/// Servings assumed when the catalog does not state a yield
pub const DEFAULT_SERVINGS: u32 = 4;

/// Minutes of preparation per group of three ingredients
const MINUTES_PER_THREE_INGREDIENTS: usize = 15;

/// Direction of a servings change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServingsDirection {
    Inc,
    Dec,
}

/// One opened recipe
///
/// Ingredient counts are kept at the baseline servings captured by
/// [`RecipeDetail::calc_servings`]; scaled quantities are computed on read.
#[derive(Debug, Clone)]
pub struct RecipeDetail {
    id: String,
    title: String,
    author: String,
    img: String,
    url: String,
    source_url: String,
    stated_servings: Option<u32>,
    ingredient_lines: Vec<String>,
    ingredients: Vec<Ingredient>,
    servings: u32,
    original_servings: u32,
    time: u32,
}

impl RecipeDetail {
    /// Request a recipe from the catalog
    ///
    /// Ingredients are not parsed yet; call [`parse_ingredients`](Self::parse_ingredients),
    /// [`calc_time`](Self::calc_time) and [`calc_servings`](Self::calc_servings) afterwards.
    pub async fn fetch(catalog: &dyn RecipeCatalog, id: &str) -> Result<Self, BrowserError> {
        debug!("Fetching recipe '{}'", id);
        match catalog.get_recipe(id).await {
            Ok(payload) => Self::from_payload(id, payload),
            Err(e) => {
                error!("Fetching recipe '{}' failed: {}", id, e);
                Err(BrowserError::RecipeNotFound {
                    id: id.to_string(),
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Build from a raw payload; a payload without a title is malformed
    pub fn from_payload(id: &str, payload: RecipePayload) -> Result<Self, BrowserError> {
        if payload.title.trim().is_empty() {
            return Err(BrowserError::RecipeNotFound {
                id: id.to_string(),
                reason: "recipe payload has no title".to_string(),
            });
        }

        Ok(Self {
            id: id.to_string(),
            title: payload.title,
            author: payload.author,
            img: payload.img,
            url: payload.url,
            source_url: payload.source_url,
            stated_servings: payload.servings,
            ingredient_lines: payload.ingredient_lines,
            ingredients: Vec::new(),
            servings: DEFAULT_SERVINGS,
            original_servings: DEFAULT_SERVINGS,
            time: 0,
        })
    }

    /// Fetch and run every derivation step
    pub async fn load(
        catalog: &dyn RecipeCatalog,
        id: &str,
        default_servings: u32,
    ) -> Result<Self, BrowserError> {
        let mut recipe = Self::fetch(catalog, id).await?;
        recipe.parse_ingredients();
        recipe.calc_time();
        recipe.calc_servings(default_servings);
        Ok(recipe)
    }

    pub fn parse_ingredients(&mut self) {
        self.ingredients = self
            .ingredient_lines
            .iter()
            .map(|line| parse_ingredient(line))
            .collect();
    }

    /// Fifteen minutes for every three ingredients, rounded down
    pub fn calc_time(&mut self) {
        let minutes = self.ingredients.len() * MINUTES_PER_THREE_INGREDIENTS / 3;
        self.time = u32::try_from(minutes).unwrap_or(u32::MAX);
    }

    /// Take servings from the stated yield, or `fallback` when there is none,
    /// and record it as the scaling baseline
    pub fn calc_servings(&mut self, fallback: u32) {
        let servings = self
            .stated_servings
            .filter(|s| *s > 0)
            .unwrap_or(fallback.max(1));
        self.servings = servings;
        self.original_servings = servings;
    }

    /// Step servings by one
    ///
    /// Decrementing does not stop at one serving; refusing that is up to the caller.
    pub fn update_servings(&mut self, direction: ServingsDirection) {
        self.servings = match direction {
            ServingsDirection::Inc => self.servings.saturating_add(1),
            ServingsDirection::Dec => self.servings.saturating_sub(1),
        };
    }

    /// `count` scaled from the baseline to the current servings
    pub fn scale(&self, count: Option<f64>) -> Option<f64> {
        count.map(|c| c * f64::from(self.servings) / f64::from(self.original_servings))
    }

    /// Ingredients with counts scaled to the current servings
    pub fn scaled_ingredients(&self) -> Vec<Ingredient> {
        self.ingredients
            .iter()
            .map(|ing| Ingredient {
                count: self.scale(ing.count),
                ..ing.clone()
            })
            .collect()
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn img(&self) -> &str {
        &self.img
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    /// Ingredients at the baseline servings
    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    pub fn servings(&self) -> u32 {
        self.servings
    }

    pub fn original_servings(&self) -> u32 {
        self.original_servings
    }

    /// Estimated total time in minutes
    pub fn time(&self) -> u32 {
        self.time
    }
}
