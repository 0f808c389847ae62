use crate::model::{Ingredient, LikedRecipe, RecipeSummary, ShoppingListItem};
use serde::Serialize;

/// One page of search results with its pagination controls
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResultsView {
    pub query: String,
    pub page: usize,
    pub pages: usize,
    pub has_prev: bool,
    pub has_next: bool,
    pub results: Vec<RecipeSummary>,
}

/// The open recipe, ingredients already scaled to the current servings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeView {
    pub id: String,
    pub title: String,
    pub author: String,
    pub img: String,
    pub url: String,
    pub source_url: String,
    pub servings: u32,
    pub time: u32,
    pub is_liked: bool,
    pub ingredients: Vec<Ingredient>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LikesView {
    pub count: usize,
    pub likes: Vec<LikedRecipe>,
}

/// Everything the presentation layer is asked to render
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", content = "data", rename_all = "snake_case")]
pub enum ViewModel {
    SearchResults(SearchResultsView),
    /// User-facing message for a failed search
    SearchError(String),
    /// A recipe is being fetched
    RecipeLoading(String),
    RecipeDetail(RecipeView),
    /// User-facing message for a recipe that could not be opened
    RecipeError(String),
    ListItems(Vec<ShoppingListItem>),
    LikedItems(LikesView),
    /// Non-fatal notice that lists are no longer being saved
    StorageUnavailable(String),
}

/// Receives view-models after each state change
pub trait Presenter {
    fn render(&mut self, view: ViewModel);
}

/// Collects rendered views in order
impl Presenter for Vec<ViewModel> {
    fn render(&mut self, view: ViewModel) {
        self.push(view);
    }
}
