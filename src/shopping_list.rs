use crate::collection::{Draftable, PersistentCollection, Record};
use crate::error::{BrowserError, StorageError};
use crate::model::{Ingredient, ShoppingListItem};
use crate::storage::{DurableStorage, ITEMS_KEY};
use std::sync::Arc;

impl Record for ShoppingListItem {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Draftable for ShoppingListItem {
    type Draft = Ingredient;

    fn from_draft(id: String, draft: Ingredient) -> Self {
        ShoppingListItem {
            id,
            count: draft.count,
            unit: draft.unit,
            ingredient: draft.ingredient,
        }
    }
}

/// Shopping list persisted under the `items` key
pub struct ShoppingList {
    items: PersistentCollection<ShoppingListItem>,
}

impl ShoppingList {
    pub fn new(storage: Arc<dyn DurableStorage>) -> Self {
        Self {
            items: PersistentCollection::new(ITEMS_KEY, storage),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            items: PersistentCollection::in_memory(ITEMS_KEY),
        }
    }

    pub fn load(&mut self) {
        self.items.load();
    }

    pub fn items(&self) -> &[ShoppingListItem] {
        self.items.items()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_persistent(&self) -> bool {
        self.items.is_persistent()
    }

    pub fn take_storage_error(&mut self) -> Option<StorageError> {
        self.items.take_storage_error()
    }

    /// Add an ingredient as a new line item; duplicates are kept
    pub fn add(&mut self, ingredient: Ingredient) -> ShoppingListItem {
        self.items.add(ingredient)
    }

    pub fn delete(&mut self, id: &str) {
        self.items.delete(id);
    }

    /// Set the count of an item; a non-finite count is stored as no count
    pub fn update_count(&mut self, id: &str, count: Option<f64>) -> Result<(), BrowserError> {
        let count = count.filter(|c| c.is_finite());
        self.items.update(id, |item| item.count = count)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
