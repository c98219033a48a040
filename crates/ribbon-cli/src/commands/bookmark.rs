//! Bookmark command handlers

use anyhow::{Context, Result};

use ribbon_core::view::{render, render_matches};
use ribbon_core::{BookmarkStore, IndexError, SlotStorage, StoreError};

use crate::notice::Notice;
use crate::output::Output;
use crate::prompt::confirm;

/// Attach the user-facing message to a store error
fn user_error(error: StoreError) -> anyhow::Error {
    let message = Notice::from(&error).message;
    anyhow::Error::new(error).context(message)
}

/// Add a bookmark to the front of the collection
pub fn add<S: SlotStorage>(
    store: &mut BookmarkStore<S>,
    title: &str,
    url: &str,
    output: &Output,
) -> Result<()> {
    let bookmark = store.add(title, url).map_err(user_error)?;

    output.success(&Notice::added().message);
    if !output.is_json() {
        output.print_bookmark(0, &bookmark);
    }

    Ok(())
}

/// List every bookmark
pub fn list<S: SlotStorage>(store: &BookmarkStore<S>, html: bool, output: &Output) -> Result<()> {
    let view = render(store.bookmarks());

    if html {
        print!("{}", view.to_html());
    } else {
        output.print_view(&view);
    }
    Ok(())
}

/// List bookmarks matching a query
pub fn search<S: SlotStorage>(
    store: &BookmarkStore<S>,
    query: &str,
    html: bool,
    output: &Output,
) -> Result<()> {
    let hits = store.matches(query);
    let view = render_matches(&hits);

    if html {
        print!("{}", view.to_html());
    } else {
        output.print_view(&view);
    }
    Ok(())
}

/// Delete the bookmark at a collection index
pub fn delete<S: SlotStorage>(
    store: &mut BookmarkStore<S>,
    index: usize,
    yes: bool,
    output: &Output,
) -> Result<()> {
    let bookmark = store.get(index).cloned().ok_or_else(|| {
        user_error(StoreError::Index(IndexError {
            index,
            len: store.len(),
        }))
    })?;

    if !yes && output.should_prompt() {
        println!("Delete bookmark: {} ({})", bookmark.title, bookmark.url);
        if !confirm("Are you sure you want to delete this bookmark?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    store.remove_at(index).map_err(user_error)?;

    output.success(&Notice::deleted().message);
    Ok(())
}

/// Open the bookmark at a collection index in the default browser
pub fn open<S: SlotStorage>(store: &BookmarkStore<S>, index: usize, output: &Output) -> Result<()> {
    let bookmark = store.get(index).ok_or_else(|| {
        user_error(StoreError::Index(IndexError {
            index,
            len: store.len(),
        }))
    })?;

    open::that(&bookmark.url).with_context(|| format!("Failed to open {}", bookmark.url))?;

    output.message(&format!("Opened {}", bookmark.url));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use ribbon_core::MemoryStorage;

    fn quiet() -> Output {
        Output::new(OutputFormat::Quiet)
    }

    #[test]
    fn test_add_reports_validation_message() {
        let mut store = BookmarkStore::load(MemoryStorage::new());

        let err = add(&mut store, "  ", "example.com", &quiet()).unwrap_err();
        assert_eq!(err.to_string(), "Please fill in both title and URL fields");
        assert!(store.is_empty());

        let err = add(&mut store, "Broken", "http://", &quiet()).unwrap_err();
        assert_eq!(err.to_string(), "Please enter a valid URL");
    }

    #[test]
    fn test_add_then_delete() {
        let mut store = BookmarkStore::load(MemoryStorage::new());
        add(&mut store, "Example", "example.com", &quiet()).unwrap();
        assert_eq!(store.len(), 1);

        // Quiet output never prompts
        delete(&mut store, 0, false, &quiet()).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_delete_out_of_range() {
        let mut store = BookmarkStore::load(MemoryStorage::new());
        add(&mut store, "Example", "example.com", &quiet()).unwrap();

        let err = delete(&mut store, 3, true, &quiet()).unwrap_err();
        assert_eq!(err.to_string(), "That bookmark no longer exists");
        assert_eq!(store.len(), 1);
    }
}
