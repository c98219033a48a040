//! Storage layer
//!
//! Persisted state is a set of named text slots, the same shape as browser
//! local storage. Bookmarks and the theme preference each live in one slot.
//!
//! ## Backends
//!
//! - **FileStorage**: one file per slot in the data directory, written atomically
//! - **MemoryStorage**: a `HashMap`, for tests and embedding

pub mod error;
pub mod file;
pub mod memory;

pub use error::{FailureKind, SlotOp, StorageError, StorageResult};
pub use file::{FileStorage, StorageStats};
pub use memory::MemoryStorage;

/// Slot holding the serialized bookmark collection
pub const BOOKMARKS_SLOT: &str = "bookmarks";

/// Slot holding the theme preference
pub const THEME_SLOT: &str = "theme";

/// Slot a corrupt bookmarks value is copied to before it is replaced
pub const BOOKMARKS_BACKUP_SLOT: &str = "bookmarks.corrupt";

/// Key-value storage of named text slots
pub trait SlotStorage {
    /// Read a slot; `Ok(None)` if it has never been written
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Replace the contents of a slot
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;

    /// Delete a slot; removing a missing slot is not an error
    fn remove(&mut self, key: &str) -> StorageResult<()>;

    /// Copy the raw contents of `key` into `to`, even when `get` cannot
    /// decode them; a missing source is not an error
    fn backup(&mut self, key: &str, to: &str) -> StorageResult<()> {
        match self.get(key)? {
            Some(value) => self.set(to, &value),
            None => Ok(()),
        }
    }
}

impl<S: SlotStorage + ?Sized> SlotStorage for &mut S {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }

    fn backup(&mut self, key: &str, to: &str) -> StorageResult<()> {
        (**self).backup(key, to)
    }
}
