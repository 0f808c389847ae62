mod forkify;

pub use forkify::ForkifyCatalog;

use crate::error::CatalogError;
use crate::model::{RecipePayload, RecipeSummary};
use async_trait::async_trait;

/// Remote source of recipes
#[async_trait]
pub trait RecipeCatalog: Send + Sync {
    /// Search for recipes matching `query`, in the catalog's order
    async fn search_recipes(&self, query: &str) -> Result<Vec<RecipeSummary>, CatalogError>;

    /// Fetch the full data of one recipe
    async fn get_recipe(&self, id: &str) -> Result<RecipePayload, CatalogError>;
}
