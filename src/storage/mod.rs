mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::StorageError;

/// Storage key holding the shopping list snapshot
pub const ITEMS_KEY: &str = "items";
/// Storage key holding the favorites snapshot
pub const LIKES_KEY: &str = "likes";

/// Key-value store that survives the session
///
/// Values are complete JSON snapshots; `write` always overwrites.
pub trait DurableStorage: Send + Sync {
    /// Read the value under `key`, `None` if nothing has been written yet
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value under `key`
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
