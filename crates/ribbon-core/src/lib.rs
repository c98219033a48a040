//! Ribbon Core Library
//!
//! This crate provides the core functionality for Ribbon, a local bookmark
//! manager: an ordered bookmark collection persisted to a key-value slot
//! store, case-insensitive search, and a render-ready list view.
//!
//! # Quick Start
//!
//! ```text
//! let config = Config::load()?;
//! let mut store = BookmarkStore::load(config.storage());
//!
//! // Add a bookmark (scheme is optional)
//! store.add("Example", "example.com")?;
//!
//! // Search and render
//! let view = view::render_matches(&store.matches("exam"));
//! println!("{}", view.to_html());
//! ```
//!
//! # Modules
//!
//! - `store`: Bookmark store (main entry point)
//! - `models`: Bookmark and BookmarkCollection
//! - `storage`: Named-slot persistence (file and in-memory)
//! - `view`: Render-ready list view and HTML escaping
//! - `theme`: Light/dark theme preference
//! - `error`: Validation and store errors
//! - `config`: Application configuration

pub mod config;
pub mod error;
pub mod models;
pub mod storage;
pub mod store;
pub mod theme;
pub mod view;

pub use config::Config;
pub use error::{IndexError, PersistenceReadError, StoreError, ValidationError};
pub use models::{Bookmark, BookmarkCollection, Timestamp};
pub use storage::{FileStorage, MemoryStorage, SlotStorage, StorageError, StorageStats};
pub use store::{BookmarkStore, LoadOutcome, Match};
pub use theme::Theme;
pub use view::{escape_html, ItemView, ListView};
