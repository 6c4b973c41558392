//! Results grid
//!
//! Lays movie cards out in rows, scrolled so the focused card stays visible.
//! Also renders the loading / empty / failed states of the result set.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::app::{App, Catalog, Hero};
use crate::ui::card::{MovieCard, CARD_HEIGHT, CARD_WIDTH};
use crate::ui::Theme;

/// First row to draw so that `focused_row` is on screen
pub fn first_visible_row(focused_row: usize, visible_rows: usize) -> usize {
    let visible_rows = visible_rows.max(1);
    focused_row.saturating_sub(visible_rows - 1)
}

fn centered_message(frame: &mut Frame, area: Rect, lines: Vec<Line>) {
    let para = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(para, area);
}

pub fn render_grid(frame: &mut Frame, area: Rect, app: &App, image_base: &str) {
    let title = match &app.catalog {
        Catalog::Ready { movies, query, .. } if query.is_empty() => {
            format!(" DISCOVER ({}) ", movies.len())
        }
        Catalog::Ready { movies, .. } => format!(" RESULTS ({}) ", movies.len()),
        _ => " RESULTS ".to_string(),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border())
        .title(Span::styled(title, Theme::title()));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    match &app.catalog {
        Catalog::Loading { query } => {
            let msg = if query.is_empty() {
                "⟳ Loading movies...".to_string()
            } else {
                format!("⟳ Searching for \"{}\"...", query)
            };
            centered_message(frame, inner, vec![Line::from(Span::styled(msg, Theme::loading()))]);
        }
        Catalog::Empty { query } => {
            let msg = if query.is_empty() {
                "No movies found".to_string()
            } else {
                format!("No movies found for \"{}\"", query)
            };
            centered_message(
                frame,
                inner,
                vec![
                    Line::from(Span::styled(msg, Theme::dimmed())),
                    Line::from(""),
                    Line::from(vec![
                        Span::styled(" Ctrl+K ", Theme::keybind()),
                        Span::styled("try another search", Theme::dimmed()),
                    ]),
                ],
            );
        }
        Catalog::Failed { error, .. } => {
            centered_message(
                frame,
                inner,
                vec![
                    Line::from(Span::styled(format!("✗ {}", error), Theme::error())),
                    Line::from(""),
                    Line::from(vec![
                        Span::styled(" r ", Theme::keybind()),
                        Span::styled("retry", Theme::dimmed()),
                    ]),
                ],
            );
        }
        Catalog::Ready {
            movies, grid, hero, ..
        } => {
            let columns = grid.columns;
            let visible_rows = usize::from((inner.height / CARD_HEIGHT).max(1));
            let first_row = first_visible_row(grid.row(), visible_rows);
            let selected_id = match hero {
                Hero::Loading { id } | Hero::Failed { id, .. } => *id,
                Hero::Loaded { detail, .. } => detail.id,
            };

            for (index, movie) in movies.iter().enumerate().skip(first_row * columns) {
                let row = index / columns - first_row;
                let col = index % columns;
                if row >= visible_rows {
                    break;
                }

                let x = inner.x + col as u16 * CARD_WIDTH;
                let y = inner.y + row as u16 * CARD_HEIGHT;
                let cell = Rect::new(x, y, CARD_WIDTH, CARD_HEIGHT).intersection(inner);
                if cell.width < 4 || cell.height < 3 {
                    continue;
                }

                let card = MovieCard::new(movie, image_base)
                    .focused(index == grid.selected)
                    .selected(movie.id == selected_id);
                frame.render_widget(card, cell);
            }
        }
    }
}
