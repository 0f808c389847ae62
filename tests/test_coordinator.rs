use async_trait::async_trait;
use recipe_browser::view::LikesView;
use recipe_browser::{
    AppCoordinator, BrowserConfig, BrowserError, CatalogError, DurableStorage, Intent,
    MemoryStorage, RecipeCatalog, RecipePayload, RecipeState, RecipeSummary, StorageError,
    ViewModel,
};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Default)]
struct StubCatalog {
    searches: HashMap<String, Vec<RecipeSummary>>,
    recipes: HashMap<String, RecipePayload>,
}

#[async_trait]
impl RecipeCatalog for StubCatalog {
    async fn search_recipes(&self, query: &str) -> Result<Vec<RecipeSummary>, CatalogError> {
        self.searches
            .get(query)
            .cloned()
            .ok_or_else(|| CatalogError::Empty(query.to_string()))
    }

    async fn get_recipe(&self, id: &str) -> Result<RecipePayload, CatalogError> {
        self.recipes
            .get(id)
            .cloned()
            .ok_or_else(|| CatalogError::Status(404))
    }
}

fn summaries(prefix: &str, n: usize) -> Vec<RecipeSummary> {
    (0..n)
        .map(|i| RecipeSummary {
            id: format!("{prefix}{i}"),
            title: format!("{prefix} {i}"),
            author: "Closet Cooking".to_string(),
            img: String::new(),
        })
        .collect()
}

fn pizza_dough() -> RecipePayload {
    RecipePayload {
        title: "Best Pizza Dough Ever".to_string(),
        author: "101 Cookbooks".to_string(),
        img: "https://example.com/dough.jpg".to_string(),
        url: "https://example.com/view/abc".to_string(),
        source_url: "https://example.com/source/abc".to_string(),
        servings: None,
        ingredient_lines: vec![
            "1 1/2 cups flour".to_string(),
            "2 tsp salt".to_string(),
            "Olive oil".to_string(),
        ],
    }
}

fn catalog() -> Arc<StubCatalog> {
    let mut catalog = StubCatalog::default();
    catalog
        .searches
        .insert("pizza".to_string(), summaries("pizza", 12));
    catalog
        .searches
        .insert("pasta".to_string(), summaries("pasta", 3));
    catalog.recipes.insert("abc".to_string(), pizza_dough());
    let mut soup = pizza_dough();
    soup.title = "Tomato Soup".to_string();
    soup.servings = Some(1);
    catalog.recipes.insert("soup".to_string(), soup);
    Arc::new(catalog)
}

fn app(storage: &MemoryStorage) -> AppCoordinator<Vec<ViewModel>> {
    AppCoordinator::new(
        catalog(),
        Arc::new(storage.clone()),
        Vec::new(),
        &BrowserConfig::default(),
    )
}

/// Storage that reads as empty and refuses every write
struct FullStorage;

impl DurableStorage for FullStorage {
    fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn write(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Backend("quota exceeded".to_string()))
    }
}

/// Storage whose snapshots cannot be read
struct UnreadableStorage;

impl DurableStorage for UnreadableStorage {
    fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Backend("permission denied".to_string()))
    }

    fn write(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Ok(())
    }
}

fn app_with(storage: Arc<dyn DurableStorage>) -> AppCoordinator<Vec<ViewModel>> {
    AppCoordinator::new(catalog(), storage, Vec::new(), &BrowserConfig::default())
}

fn storage_notices(app: &AppCoordinator<Vec<ViewModel>>) -> usize {
    app.presenter()
        .iter()
        .filter(|view| matches!(view, ViewModel::StorageUnavailable(_)))
        .count()
}

fn last_view(app: &AppCoordinator<Vec<ViewModel>>) -> &ViewModel {
    app.presenter().last().unwrap()
}

#[tokio::test]
async fn test_session_start_renders_restored_collections() {
    let storage = MemoryStorage::new();
    let app = app(&storage);

    assert_eq!(
        app.presenter().as_slice(),
        &[
            ViewModel::ListItems(Vec::new()),
            ViewModel::LikedItems(LikesView {
                count: 0,
                likes: Vec::new()
            }),
        ]
    );
}

#[tokio::test]
async fn test_search_and_paginate() {
    let storage = MemoryStorage::new();
    let mut app = app(&storage);

    app.dispatch(Intent::SubmitQuery("pizza".to_string()))
        .await
        .unwrap();
    let ViewModel::SearchResults(first) = last_view(&app) else {
        panic!("expected search results");
    };
    assert_eq!(first.results.len(), 10);
    assert_eq!((first.page, first.pages), (1, 2));
    assert!(!first.has_prev && first.has_next);

    app.dispatch(Intent::GotoPage(2)).await.unwrap();
    let ViewModel::SearchResults(second) = last_view(&app) else {
        panic!("expected search results");
    };
    assert_eq!(second.results.len(), 2);
    assert_eq!(second.results[0].id, "pizza10");
    assert!(second.has_prev && !second.has_next);
}

#[tokio::test]
async fn test_failed_search_is_rendered_and_returned() {
    let storage = MemoryStorage::new();
    let mut app = app(&storage);

    let result = app
        .dispatch(Intent::SubmitQuery("nothing".to_string()))
        .await;

    assert!(matches!(result, Err(BrowserError::SearchFailed { .. })));
    assert!(matches!(last_view(&app), ViewModel::SearchError(_)));
    assert!(app.search().is_none());
    assert!(matches!(
        app.dispatch(Intent::GotoPage(2)).await,
        Err(BrowserError::NoActiveSearch)
    ));
}

#[tokio::test]
async fn test_stale_search_response_is_discarded() {
    let storage = MemoryStorage::new();
    let mut app = app(&storage);

    let older = app.start_search("pizza").unwrap();
    let newer = app.start_search("pasta").unwrap();

    let newer_response = newer.run().await;
    app.finish_search(newer_response).unwrap();
    let older_response = older.run().await;
    app.finish_search(older_response).unwrap();

    let session = app.search().unwrap();
    assert_eq!(session.query(), "pasta");
    assert_eq!(session.results().unwrap().len(), 3);
}

#[tokio::test]
async fn test_stale_recipe_response_is_discarded() {
    let storage = MemoryStorage::new();
    let mut app = app(&storage);

    let older = app.start_recipe("abc").unwrap();
    let newer = app.start_recipe("soup").unwrap();

    let older_response = older.run().await;
    let newer_response = newer.run().await;
    app.finish_recipe(newer_response).unwrap();
    app.finish_recipe(older_response).unwrap();

    assert_eq!(app.recipe().unwrap().title(), "Tomato Soup");
}

#[tokio::test]
async fn test_select_recipe_parses_and_derives() {
    let storage = MemoryStorage::new();
    let mut app = app(&storage);

    app.dispatch(Intent::SelectRecipe("abc".to_string()))
        .await
        .unwrap();

    let ViewModel::RecipeDetail(view) = last_view(&app) else {
        panic!("expected recipe detail");
    };
    assert_eq!(view.servings, 4);
    assert_eq!(view.time, 15);
    assert!(!view.is_liked);
    assert_eq!(view.ingredients[0].count, Some(1.5));
    assert_eq!(view.ingredients[0].unit, "cup");
    assert_eq!(view.ingredients[0].ingredient, "flour");
    assert_eq!(view.ingredients[2].count, None);
}

#[tokio::test]
async fn test_failed_recipe_clears_previous() {
    let storage = MemoryStorage::new();
    let mut app = app(&storage);
    app.select_recipe("abc").await.unwrap();

    let result = app.select_recipe("missing").await;

    assert!(matches!(result, Err(BrowserError::RecipeNotFound { .. })));
    assert!(app.recipe().is_none());
    assert!(matches!(
        app.recipe_state(),
        RecipeState::Failed { id, .. } if id == "missing"
    ));
    assert!(matches!(last_view(&app), ViewModel::RecipeError(_)));
}

#[tokio::test]
async fn test_empty_recipe_id_is_ignored() {
    let storage = MemoryStorage::new();
    let mut app = app(&storage);
    let rendered = app.presenter().len();

    app.dispatch(Intent::SelectRecipe(String::new()))
        .await
        .unwrap();

    assert!(matches!(app.recipe_state(), RecipeState::Idle));
    assert_eq!(app.presenter().len(), rendered);
}

#[tokio::test]
async fn test_servings_floor_is_enforced_by_coordinator() {
    let storage = MemoryStorage::new();
    let mut app = app(&storage);
    app.select_recipe("soup").await.unwrap();

    let result = app.dispatch(Intent::DecServings).await;

    assert!(matches!(result, Err(BrowserError::ServingsFloor)));
    assert_eq!(app.recipe().unwrap().servings(), 1);

    app.dispatch(Intent::IncServings).await.unwrap();
    app.dispatch(Intent::IncServings).await.unwrap();
    let ViewModel::RecipeDetail(view) = last_view(&app) else {
        panic!("expected recipe detail");
    };
    assert_eq!(view.servings, 3);
    assert_eq!(view.ingredients[0].count, Some(4.5));
}

#[tokio::test]
async fn test_servings_without_recipe() {
    let storage = MemoryStorage::new();
    let mut app = app(&storage);
    assert!(matches!(
        app.dispatch(Intent::IncServings).await,
        Err(BrowserError::NoActiveRecipe)
    ));
}

#[tokio::test]
async fn test_add_to_list_twice_keeps_duplicates() {
    let storage = MemoryStorage::new();
    let mut app = app(&storage);
    app.select_recipe("abc").await.unwrap();

    app.dispatch(Intent::AddToList).await.unwrap();
    app.dispatch(Intent::AddToList).await.unwrap();

    assert_eq!(app.shopping_list().len(), 6);
    let ViewModel::ListItems(items) = last_view(&app) else {
        panic!("expected list items");
    };
    assert_eq!(items.len(), 6);
    assert_eq!(items[0].ingredient, items[3].ingredient);
    assert_ne!(items[0].id, items[3].id);
}

#[tokio::test]
async fn test_add_to_list_uses_current_servings() {
    let storage = MemoryStorage::new();
    let mut app = app(&storage);
    app.select_recipe("abc").await.unwrap();
    for _ in 0..4 {
        app.dispatch(Intent::IncServings).await.unwrap();
    }

    app.dispatch(Intent::AddToList).await.unwrap();

    assert_eq!(app.shopping_list().items()[0].count, Some(3.0));
}

#[tokio::test]
async fn test_update_and_delete_items() {
    let storage = MemoryStorage::new();
    let mut app = app(&storage);
    app.select_recipe("abc").await.unwrap();
    app.add_to_list().unwrap();
    let id = app.shopping_list().items()[1].id.clone();

    app.dispatch(Intent::UpdateItemCount {
        id: id.clone(),
        count: Some(5.0),
    })
    .await
    .unwrap();
    assert_eq!(app.shopping_list().items()[1].count, Some(5.0));

    app.dispatch(Intent::DeleteItem(id.clone())).await.unwrap();
    app.dispatch(Intent::DeleteItem(id.clone())).await.unwrap();
    assert_eq!(app.shopping_list().len(), 2);

    let result = app
        .dispatch(Intent::UpdateItemCount { id, count: None })
        .await;
    assert!(matches!(result, Err(BrowserError::NotFound(_))));
}

#[tokio::test]
async fn test_like_toggle_twice_restores_membership() {
    let storage = MemoryStorage::new();
    let mut app = app(&storage);
    app.select_recipe("abc").await.unwrap();
    let before = app.favorites().count();

    assert!(app.toggle_like().unwrap());
    assert!(app.favorites().is_liked("abc"));
    assert!(!app.toggle_like().unwrap());

    assert!(!app.favorites().is_liked("abc"));
    assert_eq!(app.favorites().count(), before);
}

#[tokio::test]
async fn test_like_renders_button_and_menu() {
    let storage = MemoryStorage::new();
    let mut app = app(&storage);
    app.select_recipe("abc").await.unwrap();
    let rendered = app.presenter().len();

    app.dispatch(Intent::ToggleLike).await.unwrap();

    let new_views = &app.presenter()[rendered..];
    assert!(matches!(&new_views[0], ViewModel::RecipeDetail(view) if view.is_liked));
    assert!(matches!(&new_views[1], ViewModel::LikedItems(view) if view.count == 1));
}

#[tokio::test]
async fn test_clear_likes_resets_like_button() {
    let storage = MemoryStorage::new();
    let mut app = app(&storage);
    app.select_recipe("abc").await.unwrap();
    app.toggle_like().unwrap();

    app.dispatch(Intent::ClearLikes).await.unwrap();

    assert_eq!(app.favorites().count(), 0);
    assert!(matches!(last_view(&app), ViewModel::RecipeDetail(view) if !view.is_liked));
}

#[tokio::test]
async fn test_state_survives_new_session() {
    let storage = MemoryStorage::new();
    let mut first = app(&storage);
    first.select_recipe("abc").await.unwrap();
    first.add_to_list().unwrap();
    first.toggle_like().unwrap();

    let second = app(&storage);

    assert_eq!(
        second.shopping_list().items(),
        first.shopping_list().items()
    );
    assert!(second.favorites().is_liked("abc"));
    assert!(second.recipe().is_none());
    assert!(matches!(
        &second.presenter()[1],
        ViewModel::LikedItems(view) if view.count == 1
    ));
}

#[tokio::test]
async fn test_clear_list_then_new_session_is_empty() {
    let storage = MemoryStorage::new();
    let mut first = app(&storage);
    first.select_recipe("abc").await.unwrap();
    first.add_to_list().unwrap();
    assert_eq!(first.shopping_list().len(), 3);

    first.dispatch(Intent::ClearList).await.unwrap();

    let second = app(&storage);
    assert!(second.shopping_list().is_empty());
}

#[tokio::test]
async fn test_failed_write_is_reported_once_and_lists_keep_working() {
    let mut app = app_with(Arc::new(FullStorage));
    assert_eq!(storage_notices(&app), 0);
    assert!(app.storage_error().is_none());

    app.select_recipe("abc").await.unwrap();
    app.add_to_list().unwrap();

    assert_eq!(storage_notices(&app), 1);
    assert!(matches!(
        app.storage_error(),
        Some(BrowserError::StorageUnavailable(StorageError::Backend(reason))) if reason == "quota exceeded"
    ));

    assert!(app.toggle_like().unwrap());
    app.dispatch(Intent::ClearLikes).await.unwrap();

    assert_eq!(storage_notices(&app), 1);
    assert_eq!(app.shopping_list().len(), 3);
    assert_eq!(app.favorites().count(), 0);
}

#[tokio::test]
async fn test_unreadable_storage_is_reported_at_session_start() {
    let app = app_with(Arc::new(UnreadableStorage));

    assert_eq!(storage_notices(&app), 1);
    assert!(matches!(
        &app.presenter()[1],
        ViewModel::StorageUnavailable(message) if message.contains("permission denied")
    ));
    assert!(app.shopping_list().is_empty());
    assert_eq!(app.favorites().count(), 0);
}
