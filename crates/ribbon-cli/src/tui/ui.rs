//! UI rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use ribbon_core::view::EMPTY_MESSAGE;
use ribbon_core::{SlotStorage, Theme};

use super::app::{AddField, App, InputMode, TextInput};
use crate::notice::NoticeKind;
use crate::output::truncate;

/// Colors for one theme
struct Palette {
    bg: Color,
    fg: Color,
    accent: Color,
    muted: Color,
    success: Color,
    danger: Color,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Palette {
                bg: Color::White,
                fg: Color::Black,
                accent: Color::Blue,
                muted: Color::DarkGray,
                success: Color::Green,
                danger: Color::Red,
            },
            Theme::Dark => Palette {
                bg: Color::Black,
                fg: Color::White,
                accent: Color::Cyan,
                muted: Color::Gray,
                success: Color::LightGreen,
                danger: Color::LightRed,
            },
        }
    }

    fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }
}

/// Main UI rendering function
pub fn draw<S: SlotStorage>(frame: &mut Frame, app: &App<S>) {
    let palette = Palette::for_theme(app.theme);

    frame.render_widget(Block::default().style(palette.base()), frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_header(frame, app, &palette, chunks[0]);
    draw_search_bar(frame, app, &palette, chunks[1]);
    draw_list(frame, app, &palette, chunks[2]);
    draw_status_bar(frame, app, &palette, chunks[3]);

    match app.input_mode {
        InputMode::Add => draw_add_modal(frame, app, &palette),
        InputMode::ConfirmDelete => draw_confirm_popup(frame, app, &palette),
        InputMode::Normal | InputMode::Search => {}
    }

    if app.show_help {
        draw_help_overlay(frame, &palette);
    }
}

fn draw_header<S: SlotStorage>(frame: &mut Frame, app: &App<S>, palette: &Palette, area: Rect) {
    let icon = match app.theme {
        Theme::Light => "☀",
        Theme::Dark => "☾",
    };
    let line = Line::from(vec![
        Span::styled(
            " Ribbon ",
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {} bookmark(s) ", app.store.len()),
            Style::default().fg(palette.muted),
        ),
        Span::styled(format!(" {} {} ", icon, app.theme), Style::default().fg(palette.muted)),
    ]);

    frame.render_widget(Paragraph::new(line).style(palette.base()), area);
}

fn draw_search_bar<S: SlotStorage>(
    frame: &mut Frame,
    app: &App<S>,
    palette: &Palette,
    area: Rect,
) {
    let is_active = app.input_mode == InputMode::Search;

    let border_style = if is_active {
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.muted)
    };

    let title = if app.search.is_empty() {
        " Search ".to_string()
    } else {
        format!(" Search ({} matches) ", app.view.len())
    };

    let content = if app.search.is_empty() && !is_active {
        Span::styled("Press / to search", Style::default().fg(palette.muted))
    } else {
        Span::raw(app.search.as_str())
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(
        Paragraph::new(Line::from(content))
            .block(block)
            .style(palette.base()),
        area,
    );

    if is_active {
        set_cursor(frame, area.x + 1, area.y + 1, &app.search);
    }
}

fn draw_list<S: SlotStorage>(frame: &mut Frame, app: &App<S>, palette: &Palette, area: Rect) {
    let block = Block::default()
        .title(" Bookmarks ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.muted));

    if app.view.is_empty() {
        let placeholder = Paragraph::new(Span::styled(
            EMPTY_MESSAGE,
            Style::default().fg(palette.muted),
        ))
        .block(block)
        .style(palette.base())
        .wrap(Wrap { trim: true });
        frame.render_widget(placeholder, area);
        return;
    }

    let max_len = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = app
        .view
        .items()
        .iter()
        .map(|item| {
            let title = Line::from(Span::styled(
                truncate(&item.title, max_len),
                Style::default().add_modifier(Modifier::BOLD),
            ));
            let url = Line::from(vec![
                Span::styled(
                    truncate(&item.url, max_len.saturating_sub(13)),
                    Style::default().fg(palette.accent),
                ),
                Span::styled(
                    format!("  {}", item.date_added.format("%Y-%m-%d")),
                    Style::default().fg(palette.muted),
                ),
            ]);
            ListItem::new(vec![title, url])
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .style(palette.base())
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = ListState::default();
    state.select(Some(app.selected));

    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_status_bar<S: SlotStorage>(
    frame: &mut Frame,
    app: &App<S>,
    palette: &Palette,
    area: Rect,
) {
    let paragraph = match &app.notice {
        Some(notice) => {
            let color = match notice.kind {
                NoticeKind::Success => palette.success,
                NoticeKind::Error => palette.danger,
                NoticeKind::Info => palette.accent,
            };
            Paragraph::new(notice.message.as_str()).style(palette.base().fg(color))
        }
        None => {
            let hints = match app.input_mode {
                InputMode::Search => "type to filter  enter:done  esc:clear",
                InputMode::Add => "tab:next field  enter:save  esc:cancel",
                InputMode::ConfirmDelete => "y:delete  n:keep",
                InputMode::Normal => {
                    "a:add  d:del  enter:open  /:search  t:theme  ?:help  q:quit"
                }
            };
            Paragraph::new(hints).style(palette.base().fg(palette.muted))
        }
    };

    frame.render_widget(paragraph, area);
}

fn draw_add_modal<S: SlotStorage>(frame: &mut Frame, app: &App<S>, palette: &Palette) {
    let area = centered(frame.area(), 60, 7);
    frame.render_widget(Clear, area);

    const TITLE_LABEL: &str = "Title: ";
    const URL_LABEL: &str = "URL:   ";

    let field_style = |field: AddField| {
        if app.form.focus == field {
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.muted)
        }
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(TITLE_LABEL, field_style(AddField::Title)),
            Span::raw(app.form.title.as_str()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(URL_LABEL, field_style(AddField::Url)),
            Span::raw(app.form.url.as_str()),
        ]),
    ];

    let block = Block::default()
        .title(" Add Bookmark ")
        .borders(Borders::ALL)
        .border_style(Style::default().add_modifier(Modifier::BOLD));

    frame.render_widget(
        Paragraph::new(lines).block(block).style(palette.base()),
        area,
    );

    let (input, row) = match app.form.focus {
        AddField::Title => (&app.form.title, area.y + 1),
        AddField::Url => (&app.form.url, area.y + 3),
    };
    set_cursor(frame, area.x + 1 + TITLE_LABEL.len() as u16, row, input);
}

fn draw_confirm_popup<S: SlotStorage>(frame: &mut Frame, app: &App<S>, palette: &Palette) {
    let Some(item) = &app.pending_delete else {
        return;
    };

    let area = centered(frame.area(), 56, 7);
    frame.render_widget(Clear, area);

    let width = area.width.saturating_sub(2) as usize;
    let lines = vec![
        Line::from("Are you sure you want to delete this bookmark?"),
        Line::from(""),
        Line::from(Span::styled(
            truncate(&item.title, width),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            truncate(&item.url, width),
            Style::default().fg(palette.muted),
        )),
        Line::from(Span::styled(
            "y: delete   n: keep",
            Style::default().fg(palette.danger),
        )),
    ];

    let block = Block::default()
        .title(" Delete ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.danger));

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .style(palette.base())
            .wrap(Wrap { trim: false }),
        area,
    );
}

/// Draw help overlay
fn draw_help_overlay(frame: &mut Frame, palette: &Palette) {
    let area = centered(frame.area(), 46, 19);
    frame.render_widget(Clear, area);

    let help_text = vec![
        Line::from(vec![Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from("Navigation:"),
        Line::from("  j/k, ↑/↓      Move up/down"),
        Line::from("  g/G           First/last bookmark"),
        Line::from("  Enter, o      Open in browser"),
        Line::from(""),
        Line::from("Commands:"),
        Line::from("  a, Ctrl+D     Add bookmark"),
        Line::from("  d             Delete bookmark"),
        Line::from("  /, Ctrl+K     Search"),
        Line::from("  Esc           Clear search"),
        Line::from("  t             Toggle theme"),
        Line::from("  q, Ctrl+C     Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().fg(palette.muted),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().add_modifier(Modifier::BOLD));

    frame.render_widget(
        Paragraph::new(help_text).block(block).style(palette.base()),
        area,
    );
}

/// Place the terminal cursor inside a text input
fn set_cursor(frame: &mut Frame, x: u16, y: u16, input: &TextInput) {
    frame.set_cursor_position((x + input.cursor() as u16, y));
}

/// A rect of at most `width` x `height`, centered in `area`
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    Rect::new(
        area.x + (area.width.saturating_sub(width)) / 2,
        area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    )
}
