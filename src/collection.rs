use crate::error::{BrowserError, StorageError};
use crate::storage::DurableStorage;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

/// A record that can live in a [`PersistentCollection`]
pub trait Record: Clone + Serialize + DeserializeOwned {
    fn id(&self) -> &str;
}

/// A record whose id is generated by the collection on `add`
pub trait Draftable: Record {
    /// The record without its id
    type Draft;

    fn from_draft(id: String, draft: Self::Draft) -> Self;
}

/// Ordered, id-keyed list mirrored to durable storage under a fixed key
///
/// Every mutation rewrites the whole snapshot. If storage fails the
/// collection detaches and keeps working in memory for the rest of its life;
/// the failure is kept until [`take_storage_error`](Self::take_storage_error).
pub struct PersistentCollection<T> {
    key: &'static str,
    items: Vec<T>,
    storage: Option<Arc<dyn DurableStorage>>,
    storage_error: Option<StorageError>,
}

impl<T: Record> PersistentCollection<T> {
    pub fn new(key: &'static str, storage: Arc<dyn DurableStorage>) -> Self {
        Self {
            key,
            items: Vec::new(),
            storage: Some(storage),
            storage_error: None,
        }
    }

    /// A collection that never touches storage
    pub fn in_memory(key: &'static str) -> Self {
        Self {
            key,
            items: Vec::new(),
            storage: None,
            storage_error: None,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Whether mutations are still being written to storage
    pub fn is_persistent(&self) -> bool {
        self.storage.is_some()
    }

    /// The storage failure that detached this collection, if not yet taken
    pub fn take_storage_error(&mut self) -> Option<StorageError> {
        self.storage_error.take()
    }

    /// Restore the snapshot from storage
    ///
    /// An absent or unparsable snapshot leaves the current items untouched.
    pub fn load(&mut self) {
        let Some(storage) = &self.storage else {
            return;
        };

        let raw = match storage.read(self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No stored snapshot for '{}'", self.key);
                return;
            }
            Err(e) => {
                warn!(
                    "Failed to read '{}', continuing in memory only: {}",
                    self.key, e
                );
                self.detach(e);
                return;
            }
        };

        match serde_json::from_str::<Vec<T>>(&raw) {
            Ok(items) => {
                debug!("Restored {} item(s) from '{}'", items.len(), self.key);
                self.items = items;
            }
            Err(e) => warn!("Ignoring unparsable snapshot for '{}': {}", self.key, e),
        }
    }

    /// Append a record that already carries its id
    pub(crate) fn insert(&mut self, record: T) -> T {
        self.items.push(record.clone());
        self.persist();
        record
    }

    /// Remove the element with `id`; missing ids are ignored
    pub fn delete(&mut self, id: &str) {
        match self.items.iter().position(|item| item.id() == id) {
            Some(index) => {
                self.items.remove(index);
            }
            None => debug!("Delete of unknown id '{}' in '{}' ignored", id, self.key),
        }
        self.persist();
    }

    /// Apply `patch` to the element with `id`
    pub fn update<F>(&mut self, id: &str, patch: F) -> Result<(), BrowserError>
    where
        F: FnOnce(&mut T),
    {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id() == id)
            .ok_or_else(|| BrowserError::NotFound(id.to_string()))?;
        patch(item);
        self.persist();
        Ok(())
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.persist();
    }

    fn persist(&mut self) {
        let Some(storage) = &self.storage else {
            return;
        };

        let result = serde_json::to_string(&self.items)
            .map_err(|e| StorageError::Backend(e.to_string()))
            .and_then(|snapshot| storage.write(self.key, &snapshot));

        if let Err(e) = result {
            warn!(
                "Failed to write '{}', continuing in memory only: {}",
                self.key, e
            );
            self.detach(e);
        }
    }

    fn detach(&mut self, error: StorageError) {
        self.storage = None;
        self.storage_error = Some(error);
    }
}

impl<T: Draftable> PersistentCollection<T> {
    /// Store `draft` under a freshly generated id
    pub fn add(&mut self, draft: T::Draft) -> T {
        let id = self.fresh_id();
        self.insert(T::from_draft(id, draft))
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().simple().to_string();
            if !self.contains(&id) {
                return id;
            }
        }
    }
}
