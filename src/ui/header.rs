//! Header: app title and the search field

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::app::{App, InputMode};
use crate::ui::Theme;

pub const APP_TITLE: &str = "Movie Trailer App";
pub const SEARCH_PLACEHOLDER: &str = "Search Movies...";

/// Text shown inside the search field
pub fn search_text(app: &App) -> String {
    if app.input_mode == InputMode::Editing {
        let (before, after) = app.search.split_at_cursor();
        format!("⌕ {}│{}", before, after)
    } else if app.search.query.is_empty() {
        format!("⌕ {}", SEARCH_PLACEHOLDER)
    } else {
        format!("⌕ {}", app.search.query)
    }
}

pub fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(22), Constraint::Min(1)])
        .split(area);

    let logo = Paragraph::new(Line::from(Span::styled(APP_TITLE, Theme::title())))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Theme::border()),
        );
    frame.render_widget(logo, chunks[0]);

    let editing = app.input_mode == InputMode::Editing;
    let search_box = Paragraph::new(search_text(app))
        .style(if editing {
            Theme::input().fg(Theme::PRIMARY)
        } else if app.search.query.is_empty() {
            Theme::input().fg(Theme::DIM)
        } else {
            Theme::input()
        })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(if editing {
                    Theme::border_focused()
                } else {
                    Theme::border()
                })
                .title(Span::styled(" SEARCH ", Theme::title()))
                .title(
                    Line::from(Span::styled(" Ctrl+K ", Theme::keybind())).alignment(Alignment::Right),
                ),
        );
    frame.render_widget(search_box, chunks[1]);
}
