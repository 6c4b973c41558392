//! Movie card
//!
//! One cell of the results grid: title, year, rating and poster.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::models::{image_url, MovieSummary};
use crate::ui::Theme;

/// Card width in terminal columns, borders included
pub const CARD_WIDTH: u16 = 26;

/// Card height in terminal rows, borders included
pub const CARD_HEIGHT: u16 = 6;

/// How many cards fit side by side in `width` columns
pub fn grid_columns(width: u16) -> usize {
    usize::from((width / CARD_WIDTH).max(1))
}

/// Stateless card widget for one movie summary
pub struct MovieCard<'a> {
    movie: &'a MovieSummary,
    focused: bool,
    selected: bool,
    image_base: &'a str,
}

impl<'a> MovieCard<'a> {
    pub fn new(movie: &'a MovieSummary, image_base: &'a str) -> Self {
        Self {
            movie,
            focused: false,
            selected: false,
            image_base,
        }
    }

    /// Keyboard focus is on this card
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// This card's movie is the one in the hero
    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Poster file name, the part of the URL worth showing in a cell
    fn poster_label(&self) -> String {
        match self.movie.poster_path.as_deref() {
            Some(path) => {
                let url = image_url(self.image_base, path);
                url.rsplit('/').next().unwrap_or_default().to_string()
            }
            None => "no poster".to_string(),
        }
    }
}

impl Widget for MovieCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Theme::border_focused()
        } else {
            Theme::border()
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(if self.focused {
                BorderType::Thick
            } else {
                BorderType::Rounded
            })
            .border_style(border_style);
        if self.selected {
            block = block.title(Span::styled(" ● ", Theme::title()));
        }

        let year = self
            .movie
            .year()
            .map(|y| y.to_string())
            .unwrap_or_else(|| "----".to_string());

        let lines = vec![
            Line::from(Span::styled(
                self.movie.title.as_str(),
                if self.focused {
                    Theme::title()
                } else {
                    Theme::hero_title()
                },
            )),
            Line::from(vec![
                Span::styled(year, Theme::year()),
                Span::raw("  "),
                Span::styled(
                    format!("★ {:.1}", self.movie.vote_average),
                    Theme::rating(self.movie.vote_average),
                ),
            ]),
            Line::from(Span::styled(self.poster_label(), Theme::dimmed())),
        ];

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
