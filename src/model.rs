use serde::{Deserialize, Serialize};

/// One entry of a search result list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub id: String,
    pub title: String,
    pub author: String,
    pub img: String,
}

/// Raw recipe data as returned by the catalog, before any parsing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipePayload {
    pub title: String,
    pub author: String,
    pub img: String,
    pub url: String,
    pub source_url: String,
    /// Stated yield in servings, if the catalog provides one
    pub servings: Option<u32>,
    pub ingredient_lines: Vec<String>,
}

/// A parsed ingredient line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Quantity at the recipe's baseline servings; `None` when no quantity was recognized
    pub count: Option<f64>,
    /// Normalized unit, empty when the line has none
    pub unit: String,
    pub ingredient: String,
}

/// An element of the shopping list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingListItem {
    pub id: String,
    pub count: Option<f64>,
    pub unit: String,
    pub ingredient: String,
}

/// A recipe the user has liked; `id` is the recipe id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LikedRecipe {
    pub id: String,
    pub title: String,
    pub author: String,
    pub img: String,
}
