//! Terminal UI components
//!
//! One screen: header with the search field, hero with the selected movie,
//! the results grid, and a status bar. The trailer overlay sits on top
//! while a trailer is playing.

pub mod card;
pub mod grid;
pub mod header;
pub mod hero;
pub mod theme;
pub mod trailer;

pub use theme::Theme;

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::app::{App, InputMode};
use crate::player::PlayerType;

/// Settings the views need that are not part of app state
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub image_base: String,
    pub player: PlayerType,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self {
            image_base: crate::models::IMAGE_BASE_URL.to_string(),
            player: PlayerType::default(),
        }
    }
}

/// Hero height in rows
pub const HERO_HEIGHT: u16 = 12;

/// Main render function
pub fn render(frame: &mut Frame, app: &App, ctx: &RenderContext) {
    let area = frame.area();

    frame.render_widget(Clear, area);
    frame.render_widget(Block::default().style(Theme::text()), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),           // Header
            Constraint::Length(HERO_HEIGHT), // Hero
            Constraint::Min(1),              // Grid
            Constraint::Length(1),           // Status bar
        ])
        .split(area);

    header::render_header(frame, chunks[0], app);
    hero::render_hero(frame, chunks[1], app, &ctx.image_base);
    grid::render_grid(frame, chunks[2], app, &ctx.image_base);
    render_status_bar(frame, chunks[3], app);

    if let Some(video) = app.playing_trailer() {
        trailer::render_trailer(frame, chunks[2], video, ctx.player);
    }

    if let Some(ref error) = app.error {
        render_error_popup(frame, area, error);
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mode = match app.input_mode {
        InputMode::Normal => Span::styled(
            " BROWSE ",
            Style::default().fg(Theme::BACKGROUND).bg(Theme::PRIMARY),
        ),
        InputMode::Editing => Span::styled(
            " SEARCH ",
            Style::default().fg(Theme::BACKGROUND).bg(Theme::SECONDARY),
        ),
    };

    let help = match app.input_mode {
        InputMode::Normal => " ←↑↓→ move  ↵ select  p play  x close  r retry  ^K search  q quit ",
        InputMode::Editing => " ↵ search  esc cancel  ^U clear ",
    };

    let line = Line::from(vec![mode, Span::styled(help, Theme::dimmed())]);
    frame.render_widget(Paragraph::new(line).style(Theme::status_bar()), area);
}

fn render_error_popup(frame: &mut Frame, area: Rect, error: &str) {
    let popup = trailer::centered_rect(area, 60, 5);
    frame.render_widget(Clear, popup);

    let block = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(error, Theme::error())),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Theme::error())
            .title(Span::styled(" ✗ ERROR ", Theme::error()))
            .style(Style::default().bg(Theme::BACKGROUND)),
    );
    frame.render_widget(block, popup);
}

/// Grid width in cards for a terminal `width` columns wide
pub fn grid_columns_for(width: u16) -> usize {
    card::grid_columns(width.saturating_sub(2))
}
