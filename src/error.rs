use thiserror::Error;

/// Errors surfaced by the browser models and the coordinator
#[derive(Error, Debug)]
pub enum BrowserError {
    /// Search request failed, returned nothing, or could not be decoded
    #[error("No recipes found for '{query}': {reason}")]
    SearchFailed { query: String, reason: String },

    /// Recipe could not be fetched or its payload was malformed
    #[error("Recipe '{id}' not found: {reason}")]
    RecipeNotFound { id: String, reason: String },

    /// No element with this id exists in the collection
    #[error("No item with id '{0}'")]
    NotFound(String),

    /// Durable storage could not be read or written
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[from] StorageError),

    /// A search was submitted with a blank query
    #[error("Search query must not be empty")]
    EmptyQuery,

    /// An intent needs a search session but none exists
    #[error("No search has been run yet")]
    NoActiveSearch,

    /// An intent needs an open recipe but none is ready
    #[error("No recipe is open")]
    NoActiveRecipe,

    /// Servings cannot be decreased below one
    #[error("Servings cannot go below 1")]
    ServingsFloor,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

/// Failures of the remote recipe catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Transport failure or timeout
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Catalog answered with a non-success status
    #[error("Catalog responded with status {0}")]
    Status(u16),

    /// Payload did not have the expected shape
    #[error("Malformed payload: {0}")]
    Decode(String),

    /// Catalog reported an error or returned no results
    #[error("Catalog returned no results: {0}")]
    Empty(String),
}

/// Failures of the durable storage backend
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage backend error: {0}")]
    Backend(String),
}
