use crate::collection::{PersistentCollection, Record};
use crate::error::StorageError;
use crate::model::LikedRecipe;
use crate::storage::{DurableStorage, LIKES_KEY};
use log::debug;
use std::sync::Arc;

impl Record for LikedRecipe {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Liked recipes persisted under the `likes` key, at most one entry per recipe id
pub struct FavoritesList {
    likes: PersistentCollection<LikedRecipe>,
}

impl FavoritesList {
    pub fn new(storage: Arc<dyn DurableStorage>) -> Self {
        Self {
            likes: PersistentCollection::new(LIKES_KEY, storage),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            likes: PersistentCollection::in_memory(LIKES_KEY),
        }
    }

    pub fn load(&mut self) {
        self.likes.load();
    }

    pub fn items(&self) -> &[LikedRecipe] {
        self.likes.items()
    }

    pub fn is_persistent(&self) -> bool {
        self.likes.is_persistent()
    }

    pub fn take_storage_error(&mut self) -> Option<StorageError> {
        self.likes.take_storage_error()
    }

    pub fn is_liked(&self, id: &str) -> bool {
        self.likes.contains(id)
    }

    pub fn count(&self) -> usize {
        self.likes.len()
    }

    /// Like a recipe; liking an already liked recipe returns the existing entry
    pub fn add(&mut self, like: LikedRecipe) -> LikedRecipe {
        if let Some(existing) = self.likes.get(&like.id) {
            debug!("Recipe '{}' is already liked", like.id);
            return existing.clone();
        }
        self.likes.insert(like)
    }

    pub fn delete(&mut self, id: &str) {
        self.likes.delete(id);
    }

    pub fn clear(&mut self) {
        self.likes.clear();
    }
}
