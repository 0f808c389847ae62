//! Client-side state for a recipe browser.
//!
//! Searches a remote recipe catalog, opens recipes with serving-scaled
//! ingredients, and keeps a shopping list and a favorites list that persist
//! across sessions. [`AppCoordinator`] owns the state and turns user
//! [`Intent`]s into [`ViewModel`]s for a [`Presenter`].

pub mod catalog;
pub mod collection;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod favorites;
pub mod model;
pub mod recipe;
pub mod request;
pub mod search;
pub mod shopping_list;
pub mod storage;
pub mod view;

pub use catalog::{ForkifyCatalog, RecipeCatalog};
pub use collection::{Draftable, PersistentCollection, Record};
pub use config::BrowserConfig;
pub use coordinator::{AppCoordinator, Intent, RecipeState};
pub use error::{BrowserError, CatalogError, StorageError};
pub use favorites::FavoritesList;
pub use model::{Ingredient, LikedRecipe, RecipePayload, RecipeSummary, ShoppingListItem};
pub use recipe::{RecipeDetail, ServingsDirection};
pub use search::SearchSession;
pub use shopping_list::ShoppingList;
pub use storage::{DurableStorage, FileStorage, MemoryStorage};
pub use view::{Presenter, ViewModel};
