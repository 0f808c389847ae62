use crate::catalog::RecipeCatalog;
use crate::config::BrowserConfig;
use crate::error::BrowserError;
use crate::favorites::FavoritesList;
use crate::model::LikedRecipe;
use crate::recipe::{RecipeDetail, ServingsDirection};
use crate::request::{RequestToken, RequestTracker};
use crate::search::SearchSession;
use crate::shopping_list::ShoppingList;
use crate::storage::DurableStorage;
use crate::view::{LikesView, Presenter, RecipeView, SearchResultsView, ViewModel};
use log::{debug, info, warn};
use std::sync::Arc;

/// A user action forwarded by the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    SubmitQuery(String),
    GotoPage(usize),
    IncServings,
    DecServings,
    AddToList,
    ToggleLike,
    DeleteItem(String),
    UpdateItemCount { id: String, count: Option<f64> },
    ClearList,
    ClearLikes,
    SelectRecipe(String),
}

/// Where the open recipe is in its lifecycle
#[derive(Debug, Clone, Default)]
pub enum RecipeState {
    #[default]
    Idle,
    Loading(String),
    Ready(RecipeDetail),
    Failed { id: String, message: String },
}

/// A search that has been started but not yet applied
pub struct SearchRequest {
    token: RequestToken,
    session: SearchSession,
    catalog: Arc<dyn RecipeCatalog>,
}

impl SearchRequest {
    pub async fn run(mut self) -> SearchResponse {
        let outcome = self.session.execute(self.catalog.as_ref()).await;
        SearchResponse {
            token: self.token,
            session: self.session,
            outcome,
        }
    }
}

pub struct SearchResponse {
    token: RequestToken,
    session: SearchSession,
    outcome: Result<(), BrowserError>,
}

/// A recipe fetch that has been started but not yet applied
pub struct RecipeRequest {
    token: RequestToken,
    id: String,
    default_servings: u32,
    catalog: Arc<dyn RecipeCatalog>,
}

impl RecipeRequest {
    pub async fn run(self) -> RecipeResponse {
        let outcome =
            RecipeDetail::load(self.catalog.as_ref(), &self.id, self.default_servings).await;
        RecipeResponse {
            token: self.token,
            id: self.id,
            outcome,
        }
    }
}

pub struct RecipeResponse {
    token: RequestToken,
    id: String,
    outcome: Result<RecipeDetail, BrowserError>,
}

/// Owns the session state and routes intents to the models
///
/// Network requests are split into start, run and finish steps. A response
/// is applied only if no newer request of the same kind was started in the
/// meantime; otherwise it is dropped.
///
/// The first storage failure of the session is rendered once as a
/// [`ViewModel::StorageUnavailable`] notice; both lists keep working in memory.
pub struct AppCoordinator<P: Presenter> {
    catalog: Arc<dyn RecipeCatalog>,
    presenter: P,
    page_size: usize,
    default_servings: u32,
    search: Option<SearchSession>,
    recipe: RecipeState,
    list: ShoppingList,
    likes: FavoritesList,
    search_requests: RequestTracker,
    recipe_requests: RequestTracker,
    storage_error: Option<BrowserError>,
}

impl<P: Presenter> AppCoordinator<P> {
    /// Start a session, restoring the shopping list and favorites from storage
    pub fn new(
        catalog: Arc<dyn RecipeCatalog>,
        storage: Arc<dyn DurableStorage>,
        presenter: P,
        config: &BrowserConfig,
    ) -> Self {
        let mut list = ShoppingList::new(Arc::clone(&storage));
        list.load();
        let mut likes = FavoritesList::new(storage);
        likes.load();
        info!(
            "Session started with {} list item(s) and {} like(s)",
            list.len(),
            likes.count()
        );

        let mut coordinator = Self {
            catalog,
            presenter,
            page_size: config.page_size.max(1),
            default_servings: config.default_servings,
            search: None,
            recipe: RecipeState::Idle,
            list,
            likes,
            search_requests: RequestTracker::new(),
            recipe_requests: RequestTracker::new(),
            storage_error: None,
        };
        coordinator.render_list();
        coordinator.render_likes();
        coordinator
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn search(&self) -> Option<&SearchSession> {
        self.search.as_ref()
    }

    pub fn recipe_state(&self) -> &RecipeState {
        &self.recipe
    }

    /// The open recipe, if it has finished loading
    pub fn recipe(&self) -> Option<&RecipeDetail> {
        match &self.recipe {
            RecipeState::Ready(recipe) => Some(recipe),
            _ => None,
        }
    }

    pub fn shopping_list(&self) -> &ShoppingList {
        &self.list
    }

    pub fn favorites(&self) -> &FavoritesList {
        &self.likes
    }

    /// The storage failure that moved the lists to memory-only operation
    pub fn storage_error(&self) -> Option<&BrowserError> {
        self.storage_error.as_ref()
    }

    /// Route one intent to the model it concerns
    pub async fn dispatch(&mut self, intent: Intent) -> Result<(), BrowserError> {
        debug!("Dispatching {:?}", intent);
        match intent {
            Intent::SubmitQuery(query) => self.submit_query(&query).await,
            Intent::GotoPage(page) => self.goto_page(page),
            Intent::IncServings => self.update_servings(ServingsDirection::Inc),
            Intent::DecServings => self.update_servings(ServingsDirection::Dec),
            Intent::AddToList => self.add_to_list(),
            Intent::ToggleLike => self.toggle_like().map(|_| ()),
            Intent::DeleteItem(id) => {
                self.delete_item(&id);
                Ok(())
            }
            Intent::UpdateItemCount { id, count } => self.update_item_count(&id, count),
            Intent::ClearList => {
                self.clear_list();
                Ok(())
            }
            Intent::ClearLikes => {
                self.clear_likes();
                Ok(())
            }
            Intent::SelectRecipe(id) => self.select_recipe(&id).await,
        }
    }

    pub async fn submit_query(&mut self, query: &str) -> Result<(), BrowserError> {
        let request = self.start_search(query)?;
        let response = request.run().await;
        self.finish_search(response)
    }

    pub fn start_search(&mut self, query: &str) -> Result<SearchRequest, BrowserError> {
        let session = SearchSession::new(query)?;
        Ok(SearchRequest {
            token: self.search_requests.issue(),
            session,
            catalog: Arc::clone(&self.catalog),
        })
    }

    /// Apply a finished search unless a newer one has been started
    pub fn finish_search(&mut self, response: SearchResponse) -> Result<(), BrowserError> {
        if !self.search_requests.is_current(response.token) {
            warn!(
                "Discarding stale results for '{}'",
                response.session.query()
            );
            return Ok(());
        }

        match response.outcome {
            Ok(()) => {
                self.search = Some(response.session);
                self.render_search();
                Ok(())
            }
            Err(e) => {
                self.search = None;
                self.presenter.render(ViewModel::SearchError(
                    "Recipe not found. Try searching for something else.".to_string(),
                ));
                Err(e)
            }
        }
    }

    pub fn goto_page(&mut self, page: usize) -> Result<(), BrowserError> {
        let session = self.search.as_mut().ok_or(BrowserError::NoActiveSearch)?;
        session.set_page(page);
        self.render_search();
        Ok(())
    }

    /// Open a recipe; an empty id is ignored
    pub async fn select_recipe(&mut self, id: &str) -> Result<(), BrowserError> {
        let Some(request) = self.start_recipe(id) else {
            return Ok(());
        };
        let response = request.run().await;
        self.finish_recipe(response)
    }

    /// Discard the open recipe and enter `Loading` for `id`
    pub fn start_recipe(&mut self, id: &str) -> Option<RecipeRequest> {
        let id = id.trim();
        if id.is_empty() {
            return None;
        }

        self.recipe = RecipeState::Loading(id.to_string());
        self.presenter
            .render(ViewModel::RecipeLoading(id.to_string()));

        Some(RecipeRequest {
            token: self.recipe_requests.issue(),
            id: id.to_string(),
            default_servings: self.default_servings,
            catalog: Arc::clone(&self.catalog),
        })
    }

    /// Apply a finished recipe fetch unless a newer one has been started
    pub fn finish_recipe(&mut self, response: RecipeResponse) -> Result<(), BrowserError> {
        if !self.recipe_requests.is_current(response.token) {
            warn!("Discarding stale response for recipe '{}'", response.id);
            return Ok(());
        }

        match response.outcome {
            Ok(recipe) => {
                info!("Recipe '{}' ready", recipe.id());
                self.recipe = RecipeState::Ready(recipe);
                self.render_recipe();
                Ok(())
            }
            Err(e) => {
                let message =
                    "Recipe not found. Please search for another recipe.".to_string();
                self.recipe = RecipeState::Failed {
                    id: response.id,
                    message: message.clone(),
                };
                self.presenter.render(ViewModel::RecipeError(message));
                Err(e)
            }
        }
    }

    /// Change servings of the open recipe, refusing to go below one
    pub fn update_servings(&mut self, direction: ServingsDirection) -> Result<(), BrowserError> {
        let RecipeState::Ready(recipe) = &mut self.recipe else {
            return Err(BrowserError::NoActiveRecipe);
        };
        if direction == ServingsDirection::Dec && recipe.servings() <= 1 {
            return Err(BrowserError::ServingsFloor);
        }

        recipe.update_servings(direction);
        self.render_recipe();
        Ok(())
    }

    /// Add every ingredient of the open recipe, at its current servings, to the list
    pub fn add_to_list(&mut self) -> Result<(), BrowserError> {
        let RecipeState::Ready(recipe) = &self.recipe else {
            return Err(BrowserError::NoActiveRecipe);
        };

        for ingredient in recipe.scaled_ingredients() {
            self.list.add(ingredient);
        }
        self.render_list();
        Ok(())
    }

    /// Like the open recipe, or unlike it if it is already liked.
    /// Returns the new membership.
    pub fn toggle_like(&mut self) -> Result<bool, BrowserError> {
        let RecipeState::Ready(recipe) = &self.recipe else {
            return Err(BrowserError::NoActiveRecipe);
        };

        let liked = if self.likes.is_liked(recipe.id()) {
            self.likes.delete(recipe.id());
            false
        } else {
            self.likes.add(LikedRecipe {
                id: recipe.id().to_string(),
                title: recipe.title().to_string(),
                author: recipe.author().to_string(),
                img: recipe.img().to_string(),
            });
            true
        };

        self.render_recipe();
        self.render_likes();
        Ok(liked)
    }

    pub fn delete_item(&mut self, id: &str) {
        self.list.delete(id);
        self.render_list();
    }

    pub fn update_item_count(&mut self, id: &str, count: Option<f64>) -> Result<(), BrowserError> {
        self.list.update_count(id, count)?;
        self.render_list();
        Ok(())
    }

    pub fn clear_list(&mut self) {
        self.list.clear();
        self.render_list();
    }

    pub fn clear_likes(&mut self) {
        self.likes.clear();
        self.render_likes();
        self.render_recipe();
    }

    fn render_search(&mut self) {
        let Some(session) = &self.search else {
            return;
        };

        let pages = session.page_count(self.page_size);
        let page = session.page();
        let view = SearchResultsView {
            query: session.query().to_string(),
            page,
            pages,
            has_prev: page > 1,
            has_next: page < pages,
            results: session.page_slice(page, self.page_size).to_vec(),
        };
        self.presenter.render(ViewModel::SearchResults(view));
    }

    fn render_recipe(&mut self) {
        let RecipeState::Ready(recipe) = &self.recipe else {
            return;
        };

        let view = RecipeView {
            id: recipe.id().to_string(),
            title: recipe.title().to_string(),
            author: recipe.author().to_string(),
            img: recipe.img().to_string(),
            url: recipe.url().to_string(),
            source_url: recipe.source_url().to_string(),
            servings: recipe.servings(),
            time: recipe.time(),
            is_liked: self.likes.is_liked(recipe.id()),
            ingredients: recipe.scaled_ingredients(),
        };
        self.presenter.render(ViewModel::RecipeDetail(view));
    }

    fn render_list(&mut self) {
        self.presenter
            .render(ViewModel::ListItems(self.list.items().to_vec()));
        self.report_storage_failure();
    }

    fn render_likes(&mut self) {
        let view = LikesView {
            count: self.likes.count(),
            likes: self.likes.items().to_vec(),
        };
        self.presenter.render(ViewModel::LikedItems(view));
        self.report_storage_failure();
    }

    fn report_storage_failure(&mut self) {
        let list_error = self.list.take_storage_error();
        let likes_error = self.likes.take_storage_error();
        let Some(error) = list_error.or(likes_error) else {
            return;
        };
        if self.storage_error.is_some() {
            debug!("Further storage failure after detaching: {}", error);
            return;
        }

        let error = BrowserError::StorageUnavailable(error);
        warn!("{}; changes will not survive this session", error);
        self.presenter
            .render(ViewModel::StorageUnavailable(error.to_string()));
        self.storage_error = Some(error);
    }
}
