//! Trailer overlay
//!
//! Shown while the external player is running; mirrors what it is playing.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::models::Video;
use crate::player::{embed_url, watch_url, PlaybackOptions, PlayerType};
use crate::ui::Theme;

/// Popup rectangle centered in `area`
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height);
    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    }
}

pub fn render_trailer(frame: &mut Frame, area: Rect, video: &Video, player: PlayerType) {
    let popup = centered_rect(area, 72, 9);
    frame.render_widget(Clear, popup);

    let url = match player {
        PlayerType::Browser => embed_url(&video.key, &PlaybackOptions::default()),
        _ => watch_url(&video.key),
    };

    let lines = vec![
        Line::from(Span::styled(video.name.as_str(), Theme::hero_title())),
        Line::from(vec![
            Span::styled(video.kind.as_str(), Theme::year()),
            Span::styled(format!("  via {}", player), Theme::dimmed()),
        ]),
        Line::from(""),
        Line::from(Span::styled(url, Theme::dimmed())),
        Line::from(""),
        Line::from(vec![
            Span::styled(" x ", Theme::keybind()),
            Span::styled("close trailer", Theme::dimmed()),
        ]),
    ];

    let overlay = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Theme::border_focused())
                .title(Span::styled(" ▶ NOW PLAYING ", Theme::title()))
                .style(Style::default().bg(Theme::BACKGROUND)),
        );
    frame.render_widget(overlay, popup);
}
