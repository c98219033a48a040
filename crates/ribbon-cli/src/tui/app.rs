//! TUI application state

use std::time::{Duration, Instant};

use ribbon_core::theme::{load_theme, save_theme};
use ribbon_core::view::render_matches;
use ribbon_core::{BookmarkStore, ItemView, ListView, SlotStorage, Theme};

use crate::notice::Notice;

/// How long a notice stays in the status bar
const NOTICE_TIMEOUT: Duration = Duration::from_secs(3);

/// Input mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Normal navigation mode
    Normal,
    /// Typing into the search bar
    Search,
    /// Add bookmark modal is open
    Add,
    /// Waiting for y/n on a delete
    ConfirmDelete,
}

/// Which field of the add form has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddField {
    Title,
    Url,
}

/// Single-line text input with a cursor counted in chars
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    cursor: usize,
}

impl TextInput {
    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    fn byte_index(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    /// Insert character at cursor position
    pub fn insert(&mut self, c: char) {
        let at = self.byte_index();
        self.value.insert(at, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index();
            self.value.remove(at);
        }
    }

    pub fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn right(&mut self) {
        if self.cursor < self.value.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}

/// Title and URL fields of the add modal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddForm {
    pub title: TextInput,
    pub url: TextInput,
    pub focus: AddField,
}

impl Default for AddForm {
    fn default() -> Self {
        Self {
            title: TextInput::default(),
            url: TextInput::default(),
            focus: AddField::Title,
        }
    }
}

impl AddForm {
    /// The input that currently has focus
    pub fn active_mut(&mut self) -> &mut TextInput {
        match self.focus {
            AddField::Title => &mut self.title,
            AddField::Url => &mut self.url,
        }
    }

    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            AddField::Title => AddField::Url,
            AddField::Url => AddField::Title,
        };
    }
}

/// Main application state
pub struct App<S: SlotStorage> {
    pub store: BookmarkStore<S>,
    /// The rendered list for the current search
    pub view: ListView,
    /// Selected position in `view`
    pub selected: usize,
    pub search: TextInput,
    pub form: AddForm,
    pub input_mode: InputMode,
    pub theme: Theme,
    pub notice: Option<Notice>,
    notice_time: Option<Instant>,
    /// Item awaiting delete confirmation
    pub pending_delete: Option<ItemView>,
    pub show_help: bool,
    pub should_quit: bool,
}

impl<S: SlotStorage> App<S> {
    pub fn new(store: BookmarkStore<S>) -> Self {
        let theme = load_theme(store.storage());
        let mut app = Self {
            store,
            view: ListView::Empty,
            selected: 0,
            search: TextInput::default(),
            form: AddForm::default(),
            input_mode: InputMode::Normal,
            theme,
            notice: None,
            notice_time: None,
            pending_delete: None,
            show_help: false,
            should_quit: false,
        };
        app.refresh();
        app
    }

    /// Re-render the list from the store and the current query
    pub fn refresh(&mut self) {
        self.view = render_matches(&self.store.matches(self.search.as_str()));
        if self.selected >= self.view.len() {
            self.selected = self.view.len().saturating_sub(1);
        }
    }

    pub fn selected_item(&self) -> Option<&ItemView> {
        self.view.at(self.selected)
    }

    /// Show a notice in the status bar
    pub fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
        self.notice_time = Some(Instant::now());
    }

    /// Clear the notice once it has been shown long enough
    pub fn check_notice_timeout(&mut self) {
        if let Some(time) = self.notice_time {
            if time.elapsed() > NOTICE_TIMEOUT {
                self.notice = None;
                self.notice_time = None;
            }
        }
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.view.len() {
            self.selected += 1;
        }
    }

    pub fn move_to_first(&mut self) {
        self.selected = 0;
    }

    pub fn move_to_last(&mut self) {
        self.selected = self.view.len().saturating_sub(1);
    }

    pub fn enter_search_mode(&mut self) {
        self.input_mode = InputMode::Search;
    }

    /// Return to normal mode, keeping the query
    pub fn exit_input_mode(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Drop the query and show everything again
    pub fn clear_search(&mut self) {
        self.search.clear();
        self.input_mode = InputMode::Normal;
        self.refresh();
    }

    pub fn search_insert(&mut self, c: char) {
        self.search.insert(c);
        self.selected = 0;
        self.refresh();
    }

    pub fn search_backspace(&mut self) {
        self.search.backspace();
        self.selected = 0;
        self.refresh();
    }

    pub fn open_add_form(&mut self) {
        self.form = AddForm::default();
        self.input_mode = InputMode::Add;
    }

    pub fn close_add_form(&mut self) {
        self.form = AddForm::default();
        self.input_mode = InputMode::Normal;
    }

    /// Add the bookmark in the form; the modal stays open on failure
    pub fn submit_form(&mut self) {
        let title = self.form.title.as_str().to_string();
        let url = self.form.url.as_str().to_string();

        match self.store.add(&title, &url) {
            Ok(_) => {
                self.close_add_form();
                self.selected = 0;
                self.refresh();
                self.set_notice(Notice::added());
            }
            Err(e) => self.set_notice(Notice::from(&e)),
        }
    }

    /// Ask before deleting the selected bookmark
    pub fn request_delete(&mut self) {
        if let Some(item) = self.selected_item().cloned() {
            self.pending_delete = Some(item);
            self.input_mode = InputMode::ConfirmDelete;
        }
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
        self.input_mode = InputMode::Normal;
    }

    /// Delete the confirmed bookmark by its collection index
    pub fn confirm_delete(&mut self) {
        self.input_mode = InputMode::Normal;
        let Some(item) = self.pending_delete.take() else {
            return;
        };

        match self.store.remove_at(item.index) {
            Ok(_) => {
                self.refresh();
                self.set_notice(Notice::deleted());
            }
            Err(e) => self.set_notice(Notice::from(&e)),
        }
    }

    /// Switch palettes and remember the choice
    pub fn toggle_theme(&mut self) {
        let theme = self.theme.toggle();
        match save_theme(self.store.storage_mut(), theme) {
            Ok(()) => {
                self.theme = theme;
                self.set_notice(Notice::info(format!("Switched to {} theme", theme)));
            }
            Err(e) => self.set_notice(Notice::error(format!("Could not save theme: {}", e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::NoticeKind;
    use ribbon_core::MemoryStorage;

    fn app_with(titles: &[&str]) -> App<MemoryStorage> {
        let mut store = BookmarkStore::load(MemoryStorage::new());
        for title in titles.iter().rev() {
            store
                .add(title, &format!("{}.example.com", title.to_lowercase()))
                .unwrap();
        }
        App::new(store)
    }

    fn type_into_form(app: &mut App<MemoryStorage>, title: &str, url: &str) {
        app.open_add_form();
        for c in title.chars() {
            app.form.active_mut().insert(c);
        }
        app.form.next_field();
        for c in url.chars() {
            app.form.active_mut().insert(c);
        }
    }

    #[test]
    fn test_text_input_editing() {
        let mut input = TextInput::default();
        for c in "héllo".chars() {
            input.insert(c);
        }
        input.left();
        input.left();
        input.backspace();
        assert_eq!(input.as_str(), "hélo");
        assert_eq!(input.cursor(), 2);

        input.insert('X');
        assert_eq!(input.as_str(), "héXlo");

        input.right();
        input.right();
        input.right();
        assert_eq!(input.cursor(), 5);

        input.clear();
        assert!(input.is_empty());
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn test_add_form_switches_fields() {
        let mut form = AddForm::default();
        assert_eq!(form.focus, AddField::Title);
        form.next_field();
        form.active_mut().insert('u');
        assert_eq!(form.url.as_str(), "u");
        form.next_field();
        assert_eq!(form.focus, AddField::Title);
    }

    #[test]
    fn test_new_app_renders_store() {
        let app = app_with(&[]);
        assert!(app.view.is_empty());
        assert!(app.selected_item().is_none());

        let app = app_with(&["A", "B"]);
        assert_eq!(app.view.len(), 2);
        assert_eq!(app.selected_item().unwrap().title, "A");
        assert_eq!(app.theme, Theme::Light);
    }

    #[test]
    fn test_submit_form_success_closes_modal() {
        let mut app = app_with(&["A"]);
        type_into_form(&mut app, "New", "new.example.com");
        app.submit_form();

        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.view.at(0).unwrap().title, "New");
        assert_eq!(app.view.at(0).unwrap().url, "https://new.example.com");
        assert_eq!(app.notice, Some(Notice::added()));
    }

    #[test]
    fn test_submit_form_failure_keeps_modal_open() {
        let mut app = app_with(&["A"]);
        type_into_form(&mut app, "", "example.com");
        app.submit_form();

        assert_eq!(app.input_mode, InputMode::Add);
        assert_eq!(app.form.url.as_str(), "example.com");
        assert_eq!(app.store.len(), 1);
        let notice = app.notice.clone().unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.message, "Please fill in both title and URL fields");
    }

    #[test]
    fn test_live_search_filters_view() {
        let mut app = app_with(&["Alpha", "Beta", "Alphabet"]);
        app.enter_search_mode();
        for c in "BET".chars() {
            app.search_insert(c);
        }
        let titles: Vec<_> = app.view.items().iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Beta", "Alphabet"]);

        app.search_backspace();
        app.search_backspace();
        app.search_backspace();
        assert_eq!(app.view.len(), 3);

        app.search_insert('z');
        assert!(app.view.is_empty());
        app.clear_search();
        assert_eq!(app.view.len(), 3);
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_delete_from_filtered_view() {
        let mut app = app_with(&["Alpha", "Beta", "Alphabet"]);
        for c in "bet".chars() {
            app.search_insert(c);
        }
        app.move_down();
        assert_eq!(app.selected_item().unwrap().title, "Alphabet");

        app.request_delete();
        assert_eq!(app.input_mode, InputMode::ConfirmDelete);
        app.confirm_delete();

        let remaining: Vec<_> = app.store.bookmarks().iter().map(|b| b.title.as_str()).collect();
        assert_eq!(remaining, vec!["Alpha", "Beta"]);
        assert_eq!(app.notice, Some(Notice::deleted()));
        // Selection is clamped to the shorter view
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_cancel_delete_keeps_bookmark() {
        let mut app = app_with(&["A"]);
        app.request_delete();
        app.cancel_delete();
        assert_eq!(app.store.len(), 1);
        assert!(app.pending_delete.is_none());
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_request_delete_on_empty_view_is_noop() {
        let mut app = app_with(&[]);
        app.request_delete();
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_toggle_theme_persists() {
        let mut app = app_with(&["A"]);
        app.toggle_theme();
        assert_eq!(app.theme, Theme::Dark);
        assert_eq!(load_theme(app.store.storage()), Theme::Dark);

        let store = app.store;
        let app = App::new(store);
        assert_eq!(app.theme, Theme::Dark);
    }

    #[test]
    fn test_navigation_bounds() {
        let mut app = app_with(&["A", "B", "C"]);
        app.move_up();
        assert_eq!(app.selected, 0);
        app.move_to_last();
        assert_eq!(app.selected, 2);
        app.move_down();
        assert_eq!(app.selected, 2);
        app.move_to_first();
        assert_eq!(app.selected, 0);
    }
}
