//! Ribbon TUI
//!
//! Terminal user interface for browsing and editing bookmarks.
//!
//! ## Layout
//!
//! - Header: app name, bookmark count, theme
//! - Search bar
//! - Bookmark list (or the empty-state placeholder)
//! - Status bar: notices and key hints
//!
//! ## Keys
//!
//! - j/k or ↑/↓: Move selection up/down
//! - g/G: Jump to first/last
//! - Enter or o: Open bookmark in browser
//! - a or Ctrl+D: Add bookmark
//! - d: Delete bookmark (asks y/n)
//! - / or Ctrl+K: Focus search (Esc clears)
//! - t: Toggle light/dark theme
//! - ?: Help
//! - q or Ctrl+C: Quit

mod app;
mod ui;

use std::io::stdout;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use ribbon_core::storage::BOOKMARKS_BACKUP_SLOT;
use ribbon_core::{BookmarkStore, Config, LoadOutcome, SlotStorage};
use tracing::{info, warn};

use app::{App, InputMode};

use crate::notice::Notice;

/// How often the loop wakes up to expire notices
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Run the TUI application
pub fn run(config: &Config) -> Result<()> {
    let (store, outcome) = BookmarkStore::open(config.storage());
    let mut app = App::new(store);

    if let LoadOutcome::Recovered(e) = outcome {
        warn!("starting with an empty collection: {}", e);
        app.set_notice(Notice::error(format!(
            "Saved bookmarks could not be read; a copy was kept in '{}'",
            BOOKMARKS_BACKUP_SLOT
        )));
    }

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    info!("TUI closed");
    result
}

fn run_app<B: Backend, S: SlotStorage>(terminal: &mut Terminal<B>, app: &mut App<S>) -> Result<()> {
    loop {
        app.check_notice_timeout();

        terminal.draw(|frame| ui::draw(frame, app))?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }

        if let Event::Key(key) = event::read()? {
            // Only handle key press events (not release)
            if key.kind != KeyEventKind::Press {
                continue;
            }

            // If help is showing, any key dismisses it
            if app.show_help {
                app.show_help = false;
                continue;
            }

            match app.input_mode {
                InputMode::Normal => handle_normal_mode(app, key),
                InputMode::Search => handle_search_mode(app, key),
                InputMode::Add => handle_add_mode(app, key),
                InputMode::ConfirmDelete => handle_confirm_mode(app, key),
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle key events in normal mode
fn handle_normal_mode<S: SlotStorage>(app: &mut App<S>, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        // Quit
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('c') if ctrl => app.should_quit = true,

        // Search
        KeyCode::Char('k') if ctrl => app.enter_search_mode(),
        KeyCode::Char('/') => app.enter_search_mode(),
        KeyCode::Esc => app.clear_search(),

        // Navigation
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('g') | KeyCode::Home => app.move_to_first(),
        KeyCode::Char('G') | KeyCode::End => app.move_to_last(),

        // Commands
        KeyCode::Char('d') if ctrl => app.open_add_form(),
        KeyCode::Char('a') => app.open_add_form(),
        KeyCode::Char('d') => app.request_delete(),
        KeyCode::Char('t') => app.toggle_theme(),
        KeyCode::Enter | KeyCode::Char('o') => open_selected(app),
        KeyCode::Char('?') => app.toggle_help(),

        _ => {}
    }
}

/// Handle key events while typing a search query
fn handle_search_mode<S: SlotStorage>(app: &mut App<S>, key: KeyEvent) {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }
        KeyCode::Esc => app.clear_search(),
        KeyCode::Enter => app.exit_input_mode(),
        KeyCode::Up => app.move_up(),
        KeyCode::Down => app.move_down(),
        KeyCode::Backspace => app.search_backspace(),
        KeyCode::Left => app.search.left(),
        KeyCode::Right => app.search.right(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.search_insert(c)
        }
        _ => {}
    }
}

/// Handle key events in the add modal
fn handle_add_mode<S: SlotStorage>(app: &mut App<S>, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.close_add_form(),
        KeyCode::Tab | KeyCode::BackTab => app.form.next_field(),
        KeyCode::Enter => app.submit_form(),
        KeyCode::Backspace => app.form.active_mut().backspace(),
        KeyCode::Left => app.form.active_mut().left(),
        KeyCode::Right => app.form.active_mut().right(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.form.active_mut().insert(c)
        }
        _ => {}
    }
}

/// Handle the y/n delete confirmation
fn handle_confirm_mode<S: SlotStorage>(app: &mut App<S>, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_delete(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_delete(),
        _ => {}
    }
}

fn open_selected<S: SlotStorage>(app: &mut App<S>) {
    let Some(url) = app.selected_item().map(|item| item.url.clone()) else {
        return;
    };

    match open::that(&url) {
        Ok(()) => app.set_notice(Notice::info(format!("Opened {}", url))),
        Err(e) => app.set_notice(Notice::error(format!("Failed to open {}: {}", url, e))),
    }
}
