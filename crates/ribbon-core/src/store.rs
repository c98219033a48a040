//! Bookmark store
//!
//! The `BookmarkStore` owns the bookmark collection and the slot storage it
//! is persisted to. Every mutation writes the whole collection back before
//! returning, so the persisted slot and the in-memory collection are equal
//! after any successful call.
//!
//! ## Usage
//!
//! ```ignore
//! let mut store = BookmarkStore::load(FileStorage::new(dir));
//!
//! store.add("Example", "example.com")?;   // stored as https://example.com
//! let hits = store.search("exam");
//! store.remove_at(0)?;
//! ```

use tracing::{debug, info, warn};

use crate::error::{IndexError, PersistenceReadError, StoreError};
use crate::models::{Bookmark, BookmarkCollection};
use crate::storage::{SlotStorage, StorageResult, BOOKMARKS_BACKUP_SLOT, BOOKMARKS_SLOT};

/// How the persisted collection was obtained
#[derive(Debug)]
pub enum LoadOutcome {
    /// Nothing had been saved yet
    Fresh,
    /// Saved bookmarks were read and validated
    Restored { count: usize },
    /// Saved state was unusable; the store started empty
    Recovered(PersistenceReadError),
}

impl LoadOutcome {
    pub fn is_recovered(&self) -> bool {
        matches!(self, LoadOutcome::Recovered(_))
    }
}

/// A search hit paired with its position in the full collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match<'a> {
    /// Index into the store's collection (what `remove_at` expects)
    pub index: usize,
    pub bookmark: &'a Bookmark,
}

/// Ordered bookmark collection backed by slot storage
#[derive(Debug)]
pub struct BookmarkStore<S: SlotStorage> {
    storage: S,
    collection: BookmarkCollection,
}

impl<S: SlotStorage> BookmarkStore<S> {
    /// Load the store, falling back to an empty collection on any read problem
    pub fn load(storage: S) -> Self {
        Self::open(storage).0
    }

    /// Load the store and report how the collection was obtained
    ///
    /// An unreadable or corrupt bookmarks slot is copied to the backup slot
    /// before the empty fallback is returned; the next write would otherwise
    /// replace it.
    pub fn open(mut storage: S) -> (Self, LoadOutcome) {
        let raw = match storage.get(BOOKMARKS_SLOT) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("no saved bookmarks, starting empty");
                return (Self::with_collection(storage, BookmarkCollection::new()), LoadOutcome::Fresh);
            }
            Err(e) => {
                warn!("saved bookmarks unreadable, starting empty: {}", e);
                back_up_slot(&mut storage);
                return (
                    Self::with_collection(storage, BookmarkCollection::new()),
                    LoadOutcome::Recovered(PersistenceReadError::Unreadable(e)),
                );
            }
        };

        match decode(&raw) {
            Ok(collection) => {
                let count = collection.len();
                debug!(count, "loaded bookmarks");
                (Self::with_collection(storage, collection), LoadOutcome::Restored { count })
            }
            Err(e) => {
                warn!("saved bookmarks unusable, starting empty: {}", e);
                back_up_slot(&mut storage);
                (
                    Self::with_collection(storage, BookmarkCollection::new()),
                    LoadOutcome::Recovered(e),
                )
            }
        }
    }

    fn with_collection(storage: S, collection: BookmarkCollection) -> Self {
        Self {
            storage,
            collection,
        }
    }

    /// The full collection, newest first
    pub fn collection(&self) -> &BookmarkCollection {
        &self.collection
    }

    pub fn bookmarks(&self) -> &[Bookmark] {
        self.collection.as_slice()
    }

    pub fn get(&self, index: usize) -> Option<&Bookmark> {
        self.collection.get(index)
    }

    pub fn len(&self) -> usize {
        self.collection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collection.is_empty()
    }

    /// The backing storage
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Mutable access to the backing storage, for slots other than bookmarks
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Validate input, prepend a new bookmark and persist
    ///
    /// Title and url are trimmed; a url without an `http://` or `https://`
    /// scheme gets `https://` prepended before it is parsed. If the write
    /// fails the prepend is undone.
    pub fn add(&mut self, title: &str, raw_url: &str) -> Result<Bookmark, StoreError> {
        let bookmark = Bookmark::parse(title, raw_url)?;

        self.collection.prepend(bookmark.clone());
        if let Err(e) = self.persist() {
            self.collection.pop_front();
            return Err(e.into());
        }

        info!(url = %bookmark.url, "added bookmark");
        Ok(bookmark)
    }

    /// Remove the bookmark at `index` and persist
    ///
    /// Returns the removed record. Out-of-range indices leave the collection
    /// untouched. If the write fails the removal is undone.
    pub fn remove_at(&mut self, index: usize) -> Result<Bookmark, StoreError> {
        let len = self.collection.len();
        let removed = self
            .collection
            .remove(index)
            .ok_or(IndexError { index, len })?;

        if let Err(e) = self.persist() {
            self.collection.insert(index, removed);
            return Err(e.into());
        }

        info!(index, url = %removed.url, "removed bookmark");
        Ok(removed)
    }

    /// Bookmarks whose title or url contains `query`, ignoring case
    ///
    /// An empty query returns the whole collection in order.
    pub fn search(&self, query: &str) -> Vec<Bookmark> {
        self.matches(query)
            .into_iter()
            .map(|m| m.bookmark.clone())
            .collect()
    }

    /// Like `search`, keeping each hit's index in the full collection
    pub fn matches(&self, query: &str) -> Vec<Match<'_>> {
        let needle = query.to_lowercase();
        self.collection
            .iter()
            .enumerate()
            .filter(|(_, bookmark)| bookmark.matches_lowercase(&needle))
            .map(|(index, bookmark)| Match { index, bookmark })
            .collect()
    }

    /// Write the full collection to the bookmarks slot
    fn persist(&mut self) -> StorageResult<()> {
        let json = self.collection.to_json()?;
        self.storage.set(BOOKMARKS_SLOT, &json)?;
        debug!(count = self.collection.len(), "persisted bookmarks");
        Ok(())
    }
}

fn back_up_slot<S: SlotStorage>(storage: &mut S) {
    match storage.backup(BOOKMARKS_SLOT, BOOKMARKS_BACKUP_SLOT) {
        Ok(()) => warn!("previous bookmarks kept in '{}'", BOOKMARKS_BACKUP_SLOT),
        Err(e) => warn!("could not back up saved bookmarks: {}", e),
    }
}

/// Parse and validate a persisted collection
fn decode(raw: &str) -> Result<BookmarkCollection, PersistenceReadError> {
    let collection = BookmarkCollection::from_json(raw)?;
    for (index, bookmark) in collection.iter().enumerate() {
        bookmark
            .validate()
            .map_err(|reason| PersistenceReadError::InvalidRecord { index, reason })?;
    }
    Ok(collection)
}
