//! List view synchronisation
//!
//! Turns a bookmark sequence (the whole collection or a search result) into a
//! render-ready `ListView`. Rendering is a pure function of its input: the UI
//! layer calls it again after every mutation or query change instead of
//! patching a previous view.
//!
//! Each item carries two positions. `position` is its offset in the rendered
//! list; `index` is its offset in the store's collection and is the value a
//! delete action hands back to `BookmarkStore::remove_at`. They only differ
//! for filtered views.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::Bookmark;
use crate::store::Match;

/// Placeholder shown when there is nothing to list
pub const EMPTY_MESSAGE: &str = "No bookmarks found. Add your first bookmark!";

/// One rendered bookmark
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemView {
    /// Offset in the rendered sequence
    pub position: usize,
    /// Offset in the store collection, for `remove_at`
    pub index: usize,
    pub title: String,
    pub url: String,
    pub date_added: DateTime<Utc>,
}

impl ItemView {
    /// Markup for a single bookmark card
    pub fn to_html(&self) -> String {
        let title = escape_html(&self.title);
        let url = escape_html(&self.url);
        format!(
            concat!(
                "<div class=\"bookmark-card\" data-index=\"{index}\" data-url=\"{url}\">\n",
                "    <div class=\"bookmark-icon\"><i class=\"bx bx-bookmark\"></i></div>\n",
                "    <h3 class=\"bookmark-title\">{title}</h3>\n",
                "    <p class=\"bookmark-url\">{url}</p>\n",
                "    <button class=\"delete-button\" data-index=\"{index}\" title=\"Delete bookmark\">",
                "<i class=\"bx bx-trash\"></i></button>\n",
                "</div>\n",
            ),
            index = self.index,
            url = url,
            title = title,
        )
    }
}

/// Render-ready bookmark list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "items", rename_all = "lowercase")]
pub enum ListView {
    /// Nothing to show; render the placeholder
    Empty,
    /// One entry per bookmark, in sequence order
    Items(Vec<ItemView>),
}

impl ListView {
    pub fn items(&self) -> &[ItemView] {
        match self {
            ListView::Empty => &[],
            ListView::Items(items) => items,
        }
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ListView::Empty)
    }

    /// Item at a rendered position
    pub fn at(&self, position: usize) -> Option<&ItemView> {
        self.items().get(position)
    }

    /// Markup for the whole list
    pub fn to_html(&self) -> String {
        match self {
            ListView::Empty => format!(
                concat!(
                    "<div class=\"empty-state\">\n",
                    "    <i class=\"bx bx-bookmark-alt\"></i>\n",
                    "    <p>{}</p>\n",
                    "</div>\n",
                ),
                EMPTY_MESSAGE
            ),
            ListView::Items(items) => items.iter().map(ItemView::to_html).collect(),
        }
    }
}

/// Render a plain sequence; positions double as collection indices
pub fn render(bookmarks: &[Bookmark]) -> ListView {
    build(bookmarks.iter().enumerate())
}

/// Render search hits, keeping each hit's collection index
pub fn render_matches(matches: &[Match<'_>]) -> ListView {
    build(matches.iter().map(|m| (m.index, m.bookmark)))
}

fn build<'a>(entries: impl Iterator<Item = (usize, &'a Bookmark)>) -> ListView {
    let items: Vec<ItemView> = entries
        .enumerate()
        .map(|(position, (index, bookmark))| ItemView {
            position,
            index,
            title: bookmark.title.clone(),
            url: bookmark.url.clone(),
            date_added: bookmark.date_added.as_datetime(),
        })
        .collect();

    if items.is_empty() {
        ListView::Empty
    } else {
        ListView::Items(items)
    }
}

/// Escape text for embedding in HTML content or quoted attributes
pub fn escape_html(unsafe_text: &str) -> String {
    let mut escaped = String::with_capacity(unsafe_text.len());
    for c in unsafe_text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use crate::store::BookmarkStore;

    fn store_with(titles: &[&str]) -> BookmarkStore<MemoryStorage> {
        let mut store = BookmarkStore::load(MemoryStorage::new());
        for title in titles.iter().rev() {
            store
                .add(title, &format!("{}.example.com", title.to_lowercase()))
                .unwrap();
        }
        store
    }

    #[test]
    fn test_render_empty() {
        let view = render(&[]);
        assert_eq!(view, ListView::Empty);
        assert!(view.is_empty());
        assert_eq!(view.len(), 0);
        assert!(view.to_html().contains(EMPTY_MESSAGE));
        assert!(!view.to_html().contains("bookmark-card"));
    }

    #[test]
    fn test_render_tags_positions_in_order() {
        let store = store_with(&["A", "B", "C"]);
        let view = render(store.bookmarks());

        let tags: Vec<_> = view.items().iter().map(|i| (i.position, i.index)).collect();
        assert_eq!(tags, vec![(0, 0), (1, 1), (2, 2)]);
        assert_eq!(view.at(1).unwrap().title, "B");
    }

    #[test]
    fn test_render_matches_keeps_collection_index() {
        let store = store_with(&["Alpha", "Beta", "Alphabet"]);
        let view = render_matches(&store.matches("alpha"));

        let tags: Vec<_> = view.items().iter().map(|i| (i.position, i.index)).collect();
        assert_eq!(tags, vec![(0, 0), (1, 2)]);
    }

    #[test]
    fn test_delete_from_filtered_view_hits_the_right_record() {
        let mut store = store_with(&["Alpha", "Beta", "Alphabet"]);
        let view = render_matches(&store.matches("bet"));

        let target = view.at(1).unwrap();
        assert_eq!(target.title, "Alphabet");

        let removed = store.remove_at(target.index).unwrap();
        assert_eq!(removed.title, "Alphabet");

        let remaining: Vec<_> = store.bookmarks().iter().map(|b| b.title.as_str()).collect();
        assert_eq!(remaining, vec!["Alpha", "Beta"]);
    }

    #[test]
    fn test_render_empty_search_shows_placeholder() {
        let store = store_with(&["A"]);
        assert_eq!(render_matches(&store.matches("zzz")), ListView::Empty);
    }

    #[test]
    fn test_render_does_not_mutate_input() {
        let store = store_with(&["A", "B"]);
        let before = store.collection().clone();
        let _ = render(store.bookmarks());
        assert_eq!(store.collection(), &before);
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#039;s&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
        assert_eq!(escape_html("&amp;"), "&amp;amp;");
    }

    #[test]
    fn test_item_html_is_escaped() {
        let mut store = BookmarkStore::load(MemoryStorage::new());
        store
            .add("<script>alert('x')</script>", "example.com/?q=\"a\"&b=<c>")
            .unwrap();

        let html = render(store.bookmarks()).to_html();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#039;x&#039;)&lt;/script&gt;"));
        assert!(html.contains("data-url=\"https://example.com/?q=&quot;a&quot;&amp;b=&lt;c&gt;\""));
        assert!(html.contains("data-index=\"0\""));
    }

    #[test]
    fn test_serialized_view_shape() {
        assert_eq!(
            serde_json::to_value(ListView::Empty).unwrap(),
            serde_json::json!({"state": "empty"})
        );

        let store = store_with(&["A"]);
        let value = serde_json::to_value(render(store.bookmarks())).unwrap();
        assert_eq!(value["state"], "items");
        assert_eq!(value["items"][0]["index"], 0);
        assert_eq!(value["items"][0]["url"], "https://a.example.com");
    }
}
